//! Stock event model and the event-source port.
//!
//! Two shapes exist on purpose. [`RawStockEvent`] is what the event source
//! actually yields: loosely-typed scalars whose representation drifts with
//! the backing store (integer widths, decimal-vs-string numerics, timestamp
//! variants). [`StockEvent`] is the canonical form the engine computes over.
//! Normalization between the two lives in the valuation crate and is the only
//! place where type drift is tolerated.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValuationResult;
use crate::reason::StockChangeReason;

/// A loosely-typed scalar from an event-source row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RawValue {
    Null,
    /// Native 32-bit integer column.
    Int(i32),
    /// Native 64-bit integer column.
    BigInt(i64),
    /// Arbitrary-precision decimal column.
    Decimal(Decimal),
    /// Textual projection (numeric strings, timestamp literals).
    Text(String),
    /// SQL-style timestamp, already decoded to a civil datetime.
    Timestamp(NaiveDateTime),
}

/// One stock-change row as yielded by the event source, prior to
/// normalization. Immutable: the engine only reads these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawStockEvent {
    /// Inventory item identifier.
    pub item_id: String,
    /// Supplier identifier (nullable).
    pub supplier_id: Option<String>,
    /// Event timestamp (ordering key).
    pub occurred_at: RawValue,
    /// Signed quantity change (+inbound / -outbound).
    pub quantity_change: RawValue,
    /// Unit cost at event time (`Null` for non-cost-establishing events).
    pub unit_cost: RawValue,
    /// Stock-change reason tag, SCREAMING_SNAKE_CASE.
    pub reason: String,
}

/// Canonical, fully-typed stock event the engine replays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockEvent {
    pub item_id: String,
    pub supplier_id: Option<String>,
    /// Civil time; the system tracks no timezones. Ties in `occurred_at` are
    /// broken by arrival order.
    pub occurred_at: NaiveDateTime,
    pub quantity_delta: i64,
    /// Present only on cost-establishing inbound events.
    pub unit_cost: Option<Decimal>,
    pub reason: StockChangeReason,
}

/// Supplier filter for a valuation query.
///
/// Blank input normalizes to [`Scope::All`], a real sentinel rather than an
/// empty string, so downstream comparisons cannot accidentally match "".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// No supplier restriction.
    All,
    /// Restrict to a single supplier.
    Supplier(String),
}

impl Scope {
    /// Whether an event with the given supplier id falls inside this scope.
    pub fn matches(&self, supplier_id: Option<&str>) -> bool {
        match self {
            Scope::All => true,
            Scope::Supplier(id) => supplier_id == Some(id.as_str()),
        }
    }
}

/// Port through which the engine reads stock-change streams.
///
/// Contract: events with `occurred_at <= upper_bound` for the given scope, in
/// non-decreasing timestamp order (best effort — the engine re-sorts stably).
/// The engine performs exactly one bulk read per invocation and no other IO.
pub trait EventSource {
    fn stream_events(
        &self,
        scope: &Scope,
        upper_bound: NaiveDateTime,
    ) -> ValuationResult<Vec<RawStockEvent>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_scope_matches_any_supplier() {
        assert!(Scope::All.matches(Some("sup-1")));
        assert!(Scope::All.matches(None));
    }

    #[test]
    fn supplier_scope_matches_only_its_own_id() {
        let scope = Scope::Supplier("sup-1".to_string());
        assert!(scope.matches(Some("sup-1")));
        assert!(!scope.matches(Some("sup-2")));
        assert!(!scope.matches(None));
    }

    #[test]
    fn supplier_scope_never_matches_empty_string_by_accident() {
        let scope = Scope::Supplier("sup-1".to_string());
        assert!(!scope.matches(Some("")));
    }
}
