//! Type coercion from loosely-typed event-source rows to canonical types.
//!
//! The event source yields scalar representations that drift with the backing
//! store: integer widths vary, numerics arrive as decimals or strings, and
//! timestamps show up either decoded or as SQL/ISO literals. This module is
//! the engine's single tolerance boundary for that drift; everything past
//! [`normalize_event`] operates on canonical types only.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use stockbook_core::{RawStockEvent, RawValue, StockEvent, ValuationError, ValuationResult};

/// Coerces a raw scalar to a signed integer quantity.
///
/// Accepts native 32/64-bit integers, decimals with no fractional part, and
/// numeric strings. Anything else is a [`ValuationError::MalformedNumeric`]
/// carrying the offending raw value.
pub fn to_quantity(value: &RawValue) -> ValuationResult<i64> {
    match value {
        RawValue::Int(n) => Ok(i64::from(*n)),
        RawValue::BigInt(n) => Ok(*n),
        RawValue::Decimal(d) => decimal_to_integer(d).ok_or_else(|| malformed(value)),
        RawValue::Text(s) => {
            let trimmed = s.trim();
            if let Ok(n) = trimmed.parse::<i64>() {
                return Ok(n);
            }
            // Numeric strings like "10.0" still count as integral quantities.
            trimmed
                .parse::<Decimal>()
                .ok()
                .and_then(|d| decimal_to_integer(&d))
                .ok_or_else(|| malformed(value))
        }
        RawValue::Null | RawValue::Timestamp(_) => Err(malformed(value)),
    }
}

/// Coerces a raw scalar to a decimal.
pub fn to_decimal(value: &RawValue) -> ValuationResult<Decimal> {
    match value {
        RawValue::Int(n) => Ok(Decimal::from(*n)),
        RawValue::BigInt(n) => Ok(Decimal::from(*n)),
        RawValue::Decimal(d) => Ok(*d),
        RawValue::Text(s) => s.trim().parse::<Decimal>().map_err(|_| malformed(value)),
        RawValue::Null | RawValue::Timestamp(_) => Err(malformed(value)),
    }
}

/// Coerces a raw scalar to an optional decimal; `Null` means absent.
pub fn to_optional_cost(value: &RawValue) -> ValuationResult<Option<Decimal>> {
    match value {
        RawValue::Null => Ok(None),
        other => to_decimal(other).map(Some),
    }
}

/// Coerces a raw scalar to a civil datetime.
///
/// Accepts decoded SQL timestamps and textual literals in SQL
/// (`YYYY-MM-DD HH:MM:SS[.f]`), ISO-8601 `T`, or date-only forms. Both
/// representations are read as the same civil time; there is no timezone
/// conversion because the system tracks none.
pub fn to_timestamp(value: &RawValue) -> ValuationResult<NaiveDateTime> {
    match value {
        RawValue::Timestamp(ts) => Ok(*ts),
        RawValue::Text(s) => parse_datetime_literal(s.trim())
            .ok_or_else(|| ValuationError::malformed_timestamp(s.trim())),
        other => Err(ValuationError::malformed_timestamp(format!("{other:?}"))),
    }
}

/// Normalizes an optional string: trimmed, with blank collapsing to `None`.
pub fn blank_to_none(value: Option<&str>) -> Option<String> {
    match value {
        Some(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

/// Normalizes one event-source row into a canonical [`StockEvent`].
pub fn normalize_event(raw: &RawStockEvent) -> ValuationResult<StockEvent> {
    Ok(StockEvent {
        item_id: raw.item_id.clone(),
        supplier_id: blank_to_none(raw.supplier_id.as_deref()),
        occurred_at: to_timestamp(&raw.occurred_at)?,
        quantity_delta: to_quantity(&raw.quantity_change)?,
        unit_cost: to_optional_cost(&raw.unit_cost)?,
        reason: raw.reason.parse()?,
    })
}

fn decimal_to_integer(d: &Decimal) -> Option<i64> {
    if d.fract().is_zero() { d.to_i64() } else { None }
}

fn parse_datetime_literal(s: &str) -> Option<NaiveDateTime> {
    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(s, format) {
            return Some(ts);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}

fn malformed(value: &RawValue) -> ValuationError {
    ValuationError::malformed_numeric(format!("{value:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use stockbook_core::StockChangeReason;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn quantities_accept_both_integer_widths() {
        assert_eq!(to_quantity(&RawValue::Int(-4)).unwrap(), -4);
        assert_eq!(to_quantity(&RawValue::BigInt(10)).unwrap(), 10);
    }

    #[test]
    fn quantities_accept_integral_decimals_and_numeric_strings() {
        assert_eq!(to_quantity(&RawValue::Decimal(dec!(7))).unwrap(), 7);
        assert_eq!(to_quantity(&RawValue::Text(" 12 ".into())).unwrap(), 12);
        assert_eq!(to_quantity(&RawValue::Text("10.0".into())).unwrap(), 10);
    }

    #[test]
    fn fractional_quantities_are_rejected() {
        assert!(matches!(
            to_quantity(&RawValue::Decimal(dec!(2.5))),
            Err(ValuationError::MalformedNumeric { .. })
        ));
    }

    #[test]
    fn non_numeric_text_is_rejected_with_the_raw_value() {
        let err = to_quantity(&RawValue::Text("lots".into())).unwrap_err();
        match err {
            ValuationError::MalformedNumeric { raw } => assert!(raw.contains("lots")),
            other => panic!("expected MalformedNumeric, got {other:?}"),
        }
    }

    #[test]
    fn decimals_accept_integers_decimals_and_strings() {
        assert_eq!(to_decimal(&RawValue::Int(5)).unwrap(), dec!(5));
        assert_eq!(to_decimal(&RawValue::BigInt(-3)).unwrap(), dec!(-3));
        assert_eq!(to_decimal(&RawValue::Decimal(dec!(5.00))).unwrap(), dec!(5.00));
        assert_eq!(to_decimal(&RawValue::Text("4.25".into())).unwrap(), dec!(4.25));
    }

    #[test]
    fn null_decimal_is_rejected_but_null_cost_is_absent() {
        assert!(to_decimal(&RawValue::Null).is_err());
        assert_eq!(to_optional_cost(&RawValue::Null).unwrap(), None);
        assert_eq!(
            to_optional_cost(&RawValue::Text("5.00".into())).unwrap(),
            Some(dec!(5.00))
        );
    }

    #[test]
    fn timestamps_accept_decoded_sql_and_textual_forms() {
        let expected = ts("2024-02-01 10:00:00");
        assert_eq!(to_timestamp(&RawValue::Timestamp(expected)).unwrap(), expected);
        assert_eq!(
            to_timestamp(&RawValue::Text("2024-02-01 10:00:00".into())).unwrap(),
            expected
        );
        assert_eq!(
            to_timestamp(&RawValue::Text("2024-02-01T10:00:00".into())).unwrap(),
            expected
        );
        assert_eq!(
            to_timestamp(&RawValue::Text("2024-02-01 10:00:00.5".into())).unwrap(),
            ts("2024-02-01 10:00:00") + chrono::Duration::milliseconds(500)
        );
    }

    #[test]
    fn date_only_literal_reads_as_start_of_day() {
        assert_eq!(
            to_timestamp(&RawValue::Text("2024-02-01".into())).unwrap(),
            ts("2024-02-01 00:00:00")
        );
    }

    #[test]
    fn garbage_timestamp_is_rejected() {
        assert!(matches!(
            to_timestamp(&RawValue::Text("yesterday".into())),
            Err(ValuationError::MalformedTimestamp { .. })
        ));
        assert!(to_timestamp(&RawValue::Int(42)).is_err());
    }

    #[test]
    fn blank_to_none_trims_and_collapses() {
        assert_eq!(blank_to_none(Some(" sup-1 ")), Some("sup-1".to_string()));
        assert_eq!(blank_to_none(Some("   ")), None);
        assert_eq!(blank_to_none(Some("")), None);
        assert_eq!(blank_to_none(None), None);
    }

    #[test]
    fn normalize_event_produces_a_canonical_event() {
        let raw = RawStockEvent {
            item_id: "item-1".into(),
            supplier_id: Some(" sup-1 ".into()),
            occurred_at: RawValue::Text("2024-02-01 10:00:00".into()),
            quantity_change: RawValue::Int(10),
            unit_cost: RawValue::Text("5.00".into()),
            reason: "INITIAL_STOCK".into(),
        };

        let event = normalize_event(&raw).unwrap();
        assert_eq!(event.item_id, "item-1");
        assert_eq!(event.supplier_id, Some("sup-1".to_string()));
        assert_eq!(event.occurred_at, ts("2024-02-01 10:00:00"));
        assert_eq!(event.quantity_delta, 10);
        assert_eq!(event.unit_cost, Some(dec!(5.00)));
        assert_eq!(event.reason, StockChangeReason::InitialStock);
    }

    #[test]
    fn normalize_event_surfaces_the_first_malformed_field() {
        let raw = RawStockEvent {
            item_id: "item-1".into(),
            supplier_id: None,
            occurred_at: RawValue::Text("2024-02-01 10:00:00".into()),
            quantity_change: RawValue::Text("many".into()),
            unit_cost: RawValue::Null,
            reason: "SOLD".into(),
        };
        assert!(matches!(
            normalize_event(&raw),
            Err(ValuationError::MalformedNumeric { .. })
        ));
    }
}
