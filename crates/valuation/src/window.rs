//! Report-window validation and normalization.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use stockbook_core::{Scope, ValuationError, ValuationResult};

use crate::convert::blank_to_none;

/// A validated, normalized valuation window.
///
/// The inclusive date pair expands to civil datetime boundaries covering the
/// whole of both days: `[start 00:00:00, end 23:59:59.999999999]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub scope: Scope,
}

/// Validates `(start, end, scope)` before any event is read.
///
/// Fails with [`ValuationError::InvalidRange`] when `start` is after `end`.
/// A blank or absent scope normalizes to [`Scope::All`]; a non-blank scope is
/// trimmed and carried as [`Scope::Supplier`]. Pure function, no side effects.
pub fn validate(
    start: NaiveDate,
    end: NaiveDate,
    scope: Option<&str>,
) -> ValuationResult<ReportWindow> {
    if start > end {
        return Err(ValuationError::invalid_range(format!(
            "start {start} must be on or before end {end}"
        )));
    }

    let scope = match blank_to_none(scope) {
        Some(supplier_id) => Scope::Supplier(supplier_id),
        None => Scope::All,
    };

    Ok(ReportWindow {
        start: start.and_time(NaiveTime::MIN),
        end: end_of_day(end),
        scope,
    })
}

fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_nano_opt(23, 59, 59, 999_999_999)
        .unwrap_or_else(|| date.and_time(NaiveTime::MIN))
}
