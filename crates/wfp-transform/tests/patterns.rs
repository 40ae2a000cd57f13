use chrono::NaiveDate;
use proptest::prelude::*;
use wfp_transform::compile_pattern;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn iso_pattern_round_trips() {
    let pattern = compile_pattern("yyyy-mm-dd");
    let rendered = pattern.render(date(2025, 1, 6)).unwrap();
    assert_eq!(rendered, "2025-01-06");
    assert_eq!(pattern.parse(&rendered), Some(date(2025, 1, 6)));
}

#[test]
fn day_month_year_pattern_round_trips() {
    let pattern = compile_pattern("dd/mm/yyyy");
    let rendered = pattern.render(date(2025, 3, 31)).unwrap();
    assert_eq!(rendered, "31/03/2025");
    assert_eq!(pattern.parse(&rendered), Some(date(2025, 3, 31)));
}

#[test]
fn month_year_pattern_round_trips_at_month_precision() {
    let pattern = compile_pattern("mmm-yy");
    let rendered = pattern.render(date(2025, 6, 18)).unwrap();
    assert_eq!(rendered, "Jun-25");
    // Day precision is lost; the parse lands on the first of the month.
    assert_eq!(pattern.parse(&rendered), Some(date(2025, 6, 1)));
}

#[test]
fn two_digit_year_pattern_round_trips() {
    let pattern = compile_pattern("mm/dd/yy");
    let rendered = pattern.render(date(2025, 1, 6)).unwrap();
    assert_eq!(rendered, "01/06/25");
    assert_eq!(pattern.parse(&rendered), Some(date(2025, 1, 6)));
}

#[test]
fn parse_tolerates_surrounding_whitespace_and_suffix() {
    let pattern = compile_pattern("yyyy/mm/dd");
    assert_eq!(pattern.parse("  2025/01/06 "), Some(date(2025, 1, 6)));
    assert_eq!(pattern.parse("2025/01/06 00:00:00"), Some(date(2025, 1, 6)));
    assert_eq!(pattern.parse("06/01/2025"), None);
}

proptest! {
    // Any date rendered through a day-bearing pattern parses back exactly.
    #[test]
    fn day_bearing_patterns_round_trip(days in 0i64..20_000) {
        let date = NaiveDate::from_ymd_opt(1980, 1, 1).unwrap()
            + chrono::Duration::days(days);
        for tokens in ["yyyy-mm-dd", "dd/mm/yyyy", "mm/dd/yy", "yyyy/mm/dd"] {
            let pattern = compile_pattern(tokens);
            let rendered = pattern.render(date).unwrap();
            prop_assert_eq!(pattern.parse(&rendered), Some(date));
        }
    }
}
