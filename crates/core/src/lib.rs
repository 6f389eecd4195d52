//! `stockbook-core` — domain foundation for inventory valuation.
//!
//! This crate contains **pure domain** primitives (no IO, no storage): the
//! canonical stock event model, the stock-change reason taxonomy, the error
//! model, and the `EventSource` port through which event streams arrive.

pub mod error;
pub mod event;
pub mod reason;

pub use error::{ValuationError, ValuationResult};
pub use event::{EventSource, RawStockEvent, RawValue, Scope, StockEvent};
pub use reason::StockChangeReason;
