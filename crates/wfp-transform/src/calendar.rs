//! Expected calendar labels for a date window.

use chrono::{Datelike, Duration, NaiveDate};
use wfp_model::{DateRangeRule, Frequency};

use crate::datefmt::iso;

/// Generates the ISO labels a complete upload must cover: every date (or
/// every anchored weekday) between the offset-adjusted window ends,
/// inclusive.
pub fn expected_labels(range: &DateRangeRule) -> Vec<String> {
    expected_dates(range).into_iter().map(iso).collect()
}

pub fn expected_dates(range: &DateRangeRule) -> Vec<NaiveDate> {
    let start = range.effective_start();
    let end = range.effective_end();
    if start > end {
        return Vec::new();
    }
    match range.frequency {
        Frequency::Daily => {
            let mut dates = Vec::new();
            let mut current = start;
            while current <= end {
                dates.push(current);
                current += Duration::days(1);
            }
            dates
        }
        Frequency::Weekly(anchor) => {
            // First date on or after the window start that falls on the anchor
            // weekday, then every seventh day.
            let offset = (7 + anchor.num_days_from_monday() as i64
                - start.weekday().num_days_from_monday() as i64)
                % 7;
            let mut current = start + Duration::days(offset);
            let mut dates = Vec::new();
            while current <= end {
                dates.push(current);
                current += Duration::days(7);
            }
            dates
        }
    }
}
