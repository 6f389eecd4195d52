//! Two-phase event replay.

use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::{debug, error, warn};

use stockbook_core::{EventSource, StockEvent, ValuationError, ValuationResult};

use crate::convert;
use crate::summary::{BucketTotals, FinancialSummary};
use crate::tracker::{ClassifiedEffect, CostLayerTracker};
use crate::window;

/// Weighted-average-cost valuation engine, generic over its event source.
///
/// Each invocation is an independent, synchronous computation: one bulk read
/// through the source, a forward replay over per-item trackers built fresh
/// for the call, and a summary out. Nothing is cached or shared between
/// invocations, so concurrent calls need no coordination.
///
/// ```ignore
/// let engine = ValuationEngine::new(InMemoryEventSource::with_rows(rows));
/// let summary = engine.financial_summary_wac(from, to, Some("sup-1"))?;
/// ```
pub struct ValuationEngine<S: EventSource> {
    source: S,
}

impl<S: EventSource> ValuationEngine<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Produces the WAC financial summary for an inclusive date window and
    /// optional supplier scope.
    ///
    /// Phases:
    /// 1. Window validation; failures surface before any event is read.
    /// 2. One bulk read of all events up to the window end (no lower bound —
    ///    opening state needs the full history), normalized to canonical
    ///    events and stably re-sorted by timestamp.
    /// 3. Events before the window start replay into per-item trackers only;
    ///    opening totals are the snapshot of tracker state at that instant,
    ///    not a sum of effects, since cost layers collapse.
    /// 4. In-window events replay with their classified effects routed into
    ///    the bucket accumulator.
    /// 5. Ending totals are the sum of final tracker snapshots.
    ///
    /// A malformed row aborts the whole computation as
    /// [`ValuationError::ComputationFailed`]: an unparseable quantity or cost
    /// poisons the running balance from that point forward, so skipping is
    /// not an option.
    pub fn financial_summary_wac(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        scope: Option<&str>,
    ) -> ValuationResult<FinancialSummary> {
        let window = window::validate(start, end, scope)?;

        let rows = self.source.stream_events(&window.scope, window.end)?;
        let mut events: Vec<StockEvent> = Vec::with_capacity(rows.len());
        for row in &rows {
            let event = convert::normalize_event(row).map_err(|e| {
                error!(item_id = %row.item_id, cause = %e, "unreadable event row; aborting replay");
                ValuationError::computation_failed(row.item_id.clone(), e)
            })?;
            events.push(event);
        }
        // Stable: arrival order breaks timestamp ties.
        events.sort_by_key(|e| e.occurred_at);

        let mut trackers: HashMap<String, CostLayerTracker> = HashMap::new();
        let mut totals = BucketTotals::new();

        for event in events.iter().filter(|e| e.occurred_at < window.start) {
            apply_one(&mut trackers, event);
        }
        for tracker in trackers.values() {
            totals.record_opening(tracker.on_hand(), tracker.value());
        }

        for event in events
            .iter()
            .filter(|e| e.occurred_at >= window.start && e.occurred_at <= window.end)
        {
            let applied = apply_one(&mut trackers, event);
            if let Some(effect) = applied {
                totals.absorb(effect.bucket, effect.quantity, effect.value);
            }
        }

        for tracker in trackers.values() {
            totals.record_ending(tracker.on_hand(), tracker.value());
        }

        debug!(
            items = trackers.len(),
            events = events.len(),
            scope = ?window.scope,
            "wac replay complete"
        );

        Ok(totals.into_summary(start, end))
    }
}

fn apply_one(
    trackers: &mut HashMap<String, CostLayerTracker>,
    event: &StockEvent,
) -> Option<ClassifiedEffect> {
    let tracker = trackers.entry(event.item_id.clone()).or_default();
    let applied = tracker.apply(event);
    if applied.clamped_units > 0 {
        warn!(
            item_id = %event.item_id,
            occurred_at = %event.occurred_at,
            dropped_units = applied.clamped_units,
            "outbound exceeded on-hand stock; decrement clamped"
        );
    }
    applied.effect
}
