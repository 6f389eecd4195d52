//! In-memory event source.

use std::sync::RwLock;

use chrono::NaiveDateTime;

use stockbook_core::{EventSource, RawStockEvent, Scope, ValuationError, ValuationResult};

use crate::convert;

/// In-memory [`EventSource`] holding raw rows in arrival order.
///
/// Intended for tests/dev. Scope and upper-bound filtering mirror what a
/// DB-backed source would push into its query; rows whose timestamps cannot
/// be parsed are passed through so the engine can report them.
#[derive(Debug, Default)]
pub struct InMemoryEventSource {
    rows: RwLock<Vec<RawStockEvent>>,
}

impl InMemoryEventSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<RawStockEvent>) -> Self {
        Self {
            rows: RwLock::new(rows),
        }
    }

    /// Appends a row, preserving arrival order.
    pub fn push(&self, row: RawStockEvent) -> ValuationResult<()> {
        let mut rows = self
            .rows
            .write()
            .map_err(|_| ValuationError::event_source("event store lock poisoned"))?;
        rows.push(row);
        Ok(())
    }
}

impl EventSource for InMemoryEventSource {
    fn stream_events(
        &self,
        scope: &Scope,
        upper_bound: NaiveDateTime,
    ) -> ValuationResult<Vec<RawStockEvent>> {
        let rows = self
            .rows
            .read()
            .map_err(|_| ValuationError::event_source("event store lock poisoned"))?;

        let mut selected: Vec<RawStockEvent> = rows
            .iter()
            .filter(|row| {
                let supplier = convert::blank_to_none(row.supplier_id.as_deref());
                scope.matches(supplier.as_deref())
            })
            .filter(|row| match convert::to_timestamp(&row.occurred_at) {
                Ok(ts) => ts <= upper_bound,
                Err(_) => true,
            })
            .cloned()
            .collect();

        // Non-decreasing timestamp order, arrival order preserved on ties.
        selected.sort_by_key(|row| {
            convert::to_timestamp(&row.occurred_at).unwrap_or(NaiveDateTime::MIN)
        });

        Ok(selected)
    }
}
