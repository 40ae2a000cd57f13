//! Export-date normalization.
//!
//! Just before export, every date-bearing column is rewritten to ISO
//! `YYYY-MM-DD`: configured patterns first, generic inference as the
//! fallback, unparseable cells emptied. Running the pass on already
//! normalized output changes nothing, since ISO is in the inference set.

use std::collections::BTreeSet;

use polars::prelude::*;
use tracing::debug;
use wfp_model::{ColumnKind, TableRule, TransformConfig};

use crate::cells::column_cells;
use crate::datefmt::{compile_pattern, infer_date, iso};
use crate::error::Result;

/// Rewrites every date-bearing column of an export frame to ISO form.
/// Targets are the declared date columns, any column typed as date, and
/// the melt label column for header-date layouts.
pub fn normalize_dates_for_export(frame: &DataFrame, rule: &TableRule) -> Result<DataFrame> {
    let mut targets: BTreeSet<&str> = BTreeSet::new();
    for spec in &rule.date_columns {
        targets.insert(spec.column.as_str());
    }
    for type_rule in &rule.column_types {
        if type_rule.kind == ColumnKind::Date {
            targets.insert(type_rule.column.as_str());
        }
    }
    if let TransformConfig::DateColumnsAsHeaders { label_name, .. } = &rule.transform {
        targets.insert(label_name.as_str());
    }

    let mut normalized = frame.clone();
    for name in targets {
        if normalized.column(name).is_err() {
            continue;
        }
        let pattern = rule
            .date_column(name)
            .and_then(|spec| spec.pattern.as_deref())
            .map(compile_pattern);
        let cells = column_cells(&normalized, name)?;
        let rewritten: Vec<String> = cells
            .iter()
            .map(|cell| match cell {
                None => String::new(),
                Some(raw) => {
                    let parsed = pattern
                        .as_ref()
                        .and_then(|p| p.parse(raw))
                        .or_else(|| infer_date(raw));
                    parsed.map(iso).unwrap_or_default()
                }
            })
            .collect();
        normalized.with_column(Series::new(name.into(), rewritten))?;
        debug!(column = name, "normalized date column for export");
    }
    Ok(normalized)
}
