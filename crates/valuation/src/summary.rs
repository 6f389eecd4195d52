//! Bucket aggregation and the financial summary output value.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::tracker::Bucket;

/// Costing method tag carried on every summary.
pub const WAC_METHOD: &str = "WAC";

/// Cross-item accumulator for one replay invocation.
///
/// Pure summation: it preserves the precision produced by the trackers and
/// introduces no rounding until [`BucketTotals::into_summary`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BucketTotals {
    opening_qty: i64,
    opening_value: Decimal,
    purchases_qty: i64,
    purchases_cost: Decimal,
    returns_in_qty: i64,
    returns_in_cost: Decimal,
    cogs_qty: i64,
    cogs_cost: Decimal,
    write_off_qty: i64,
    write_off_cost: Decimal,
    ending_qty: i64,
    ending_value: Decimal,
}

impl BucketTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulates one classified effect. Quantity and value may be negative
    /// (returns-to-supplier net into the purchase bucket).
    pub fn absorb(&mut self, bucket: Bucket, quantity: i64, value: Decimal) {
        match bucket {
            Bucket::Purchase => {
                self.purchases_qty += quantity;
                self.purchases_cost += value;
            }
            Bucket::ReturnIn => {
                self.returns_in_qty += quantity;
                self.returns_in_cost += value;
            }
            Bucket::Cogs => {
                self.cogs_qty += quantity;
                self.cogs_cost += value;
            }
            Bucket::WriteOff => {
                self.write_off_qty += quantity;
                self.write_off_cost += value;
            }
        }
    }

    /// Adds one item's state snapshot at the instant before the window start.
    pub fn record_opening(&mut self, quantity: i64, value: Decimal) {
        self.opening_qty += quantity;
        self.opening_value += value;
    }

    /// Adds one item's final state snapshot at the window end.
    pub fn record_ending(&mut self, quantity: i64, value: Decimal) {
        self.ending_qty += quantity;
        self.ending_value += value;
    }

    /// Finalizes the accumulator into the output value. This is the only
    /// place monetary amounts are rounded (2 digits, half-up).
    pub fn into_summary(self, from_date: NaiveDate, to_date: NaiveDate) -> FinancialSummary {
        FinancialSummary {
            method: WAC_METHOD.to_string(),
            from_date,
            to_date,
            opening_qty: self.opening_qty,
            opening_value: round_money(self.opening_value),
            purchases_qty: self.purchases_qty,
            purchases_cost: round_money(self.purchases_cost),
            returns_in_qty: self.returns_in_qty,
            returns_in_cost: round_money(self.returns_in_cost),
            cogs_qty: self.cogs_qty,
            cogs_cost: round_money(self.cogs_cost),
            write_off_qty: self.write_off_qty,
            write_off_cost: round_money(self.write_off_cost),
            ending_qty: self.ending_qty,
            ending_value: round_money(self.ending_value),
        }
    }
}

fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Point-in-time financial summary under weighted average cost.
///
/// A pure output value: assembled once at the end of a replay, with every
/// field always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialSummary {
    pub method: String,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub opening_qty: i64,
    pub opening_value: Decimal,
    pub purchases_qty: i64,
    pub purchases_cost: Decimal,
    pub returns_in_qty: i64,
    pub returns_in_cost: Decimal,
    pub cogs_qty: i64,
    pub cogs_cost: Decimal,
    pub write_off_qty: i64,
    pub write_off_cost: Decimal,
    pub ending_qty: i64,
    pub ending_value: Decimal,
}

impl FinancialSummary {
    /// The balance identity every summary satisfies:
    /// `ending == opening + purchases + returns_in - cogs - write_offs`.
    pub fn balances(&self) -> bool {
        self.ending_qty
            == self.opening_qty + self.purchases_qty + self.returns_in_qty
                - self.cogs_qty
                - self.write_off_qty
    }
}
