//! Weighted-average-cost inventory valuation.
//!
//! Given a chronological log of stock-change events for a scope, this crate
//! reconstructs opening inventory, classifies every in-window event into
//! financial buckets (purchases, COGS, customer returns, write-offs, with
//! returns-to-supplier netted into purchases), and produces a point-in-time
//! [`FinancialSummary`].
//!
//! The computation is pure and synchronous: one bulk read through the
//! [`EventSource`](stockbook_core::EventSource) port, a strictly-ordered
//! forward replay with per-item cost-layer state, and a value out. Each
//! invocation owns its own tracker set; concurrent invocations share nothing.

pub mod convert;
pub mod in_memory;
pub mod replay;
pub mod summary;
pub mod tracker;
pub mod window;

pub use in_memory::InMemoryEventSource;
pub use replay::ValuationEngine;
pub use summary::{BucketTotals, FinancialSummary, WAC_METHOD};
pub use tracker::{AppliedEffect, Bucket, ClassifiedEffect, CostLayerTracker};
pub use window::ReportWindow;
