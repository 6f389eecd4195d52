//! Per-item cost-layer tracking.
//!
//! One [`CostLayerTracker`] exists per distinct item encountered during a
//! replay. It owns that item's running `(on_hand, unit_cost)` pair for the
//! lifetime of one invocation and is discarded afterwards — cost layers are
//! never persisted or shared across calls.

use rust_decimal::{Decimal, RoundingStrategy};

use stockbook_core::{StockChangeReason, StockEvent};

/// Internal precision for the weighted-average division. Final outputs are
/// rounded to 2 digits only at the summary boundary.
const WAC_SCALE: u32 = 6;

/// Financial bucket an event's monetary effect lands in.
///
/// Returns-to-supplier have no bucket of their own: they are emitted as
/// negative contributions to `Purchase`, reversing an earlier acquisition
/// rather than consuming inventory for sale or loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    Purchase,
    ReturnIn,
    Cogs,
    WriteOff,
}

/// The classified monetary effect of one applied event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedEffect {
    pub bucket: Bucket,
    /// Signed contribution; negative for returns-to-supplier.
    pub quantity: i64,
    pub value: Decimal,
}

/// Outcome of applying one event to a tracker.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedEffect {
    /// `None` for events that adjust state without a financial bucket
    /// (zero deltas, costless non-return receipts).
    pub effect: Option<ClassifiedEffect>,
    /// Outbound units requested beyond on-hand stock and dropped by the
    /// clamping policy. Not an error; the engine logs these.
    pub clamped_units: i64,
}

impl AppliedEffect {
    fn untracked() -> Self {
        Self {
            effect: None,
            clamped_units: 0,
        }
    }
}

/// Running quantity and weighted-average unit cost for a single item.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CostLayerTracker {
    on_hand: i64,
    unit_cost: Decimal,
}

impl CostLayerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Units currently on hand. Never negative.
    pub fn on_hand(&self) -> i64 {
        self.on_hand
    }

    /// Current weighted-average unit cost. Retains the last blended cost
    /// through depletion so a later costless receipt is valued at the
    /// pre-depletion average.
    pub fn unit_cost(&self) -> Decimal {
        self.unit_cost
    }

    /// Current inventory value, `on_hand * unit_cost`.
    pub fn value(&self) -> Decimal {
        self.unit_cost * Decimal::from(self.on_hand)
    }

    /// Applies one event and returns its classified monetary effect.
    pub fn apply(&mut self, event: &StockEvent) -> AppliedEffect {
        if event.quantity_delta > 0 {
            self.apply_inbound(event.quantity_delta, event.unit_cost, event.reason)
        } else if event.quantity_delta < 0 {
            self.apply_outbound(event.quantity_delta.saturating_neg(), event.reason)
        } else {
            AppliedEffect::untracked()
        }
    }

    fn apply_inbound(
        &mut self,
        quantity: i64,
        unit_cost: Option<Decimal>,
        reason: StockChangeReason,
    ) -> AppliedEffect {
        let effect = if reason.is_return_in() {
            // Customer returns are valued at the supplied cost when one
            // exists, otherwise at the current weighted average. Receiving at
            // the current average leaves the average itself untouched.
            let unit = match unit_cost {
                Some(cost) => {
                    self.receive(quantity, cost);
                    cost
                }
                None => {
                    self.on_hand += quantity;
                    self.unit_cost
                }
            };
            Some(ClassifiedEffect {
                bucket: Bucket::ReturnIn,
                quantity,
                value: unit * Decimal::from(quantity),
            })
        } else if unit_cost.is_some() || reason == StockChangeReason::InitialStock {
            let unit = unit_cost.unwrap_or(self.unit_cost);
            self.receive(quantity, unit);
            Some(ClassifiedEffect {
                bucket: Bucket::Purchase,
                quantity,
                value: unit * Decimal::from(quantity),
            })
        } else {
            // Costless non-return receipt (e.g. a manual correction): the
            // stock level moves, but no financial bucket is charged.
            self.on_hand += quantity;
            None
        };

        AppliedEffect {
            effect,
            clamped_units: 0,
        }
    }

    fn apply_outbound(&mut self, requested: i64, reason: StockChangeReason) -> AppliedEffect {
        let (applied, cost) = self.issue(requested);

        let effect = if reason.is_return_to_supplier() {
            ClassifiedEffect {
                bucket: Bucket::Purchase,
                quantity: -applied,
                value: -cost,
            }
        } else if reason.is_write_off() {
            ClassifiedEffect {
                bucket: Bucket::WriteOff,
                quantity: applied,
                value: cost,
            }
        } else {
            // Sales, and any other outbound movement, consume at cost.
            ClassifiedEffect {
                bucket: Bucket::Cogs,
                quantity: applied,
                value: cost,
            }
        };

        AppliedEffect {
            effect: Some(effect),
            clamped_units: requested - applied,
        }
    }

    /// Inbound receipt: blends the weighted average.
    ///
    /// `new = (on_hand * unit_cost + quantity * unit) / (on_hand + quantity)`,
    /// rounded half-up at [`WAC_SCALE`] digits.
    fn receive(&mut self, quantity: i64, unit: Decimal) {
        let new_on_hand = self.on_hand + quantity;
        if new_on_hand == 0 {
            self.on_hand = 0;
            self.unit_cost = Decimal::ZERO;
            return;
        }

        let pooled = self.value() + unit * Decimal::from(quantity);
        self.unit_cost = (pooled / Decimal::from(new_on_hand))
            .round_dp_with_strategy(WAC_SCALE, RoundingStrategy::MidpointAwayFromZero);
        self.on_hand = new_on_hand;
    }

    /// Outbound issue at the average in force before the decrement, clamped
    /// so on-hand never goes negative. Returns `(applied, cost)`.
    fn issue(&mut self, requested: i64) -> (i64, Decimal) {
        let applied = requested.min(self.on_hand);
        let cost = self.unit_cost * Decimal::from(applied);
        self.on_hand -= applied;
        (applied, cost)
    }
}
