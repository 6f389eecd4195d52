//! Valuation error model.

use thiserror::Error;

/// Result type used across the valuation engine.
pub type ValuationResult<T> = Result<T, ValuationError>;

/// Errors produced by the valuation engine.
///
/// Keep this focused on deterministic failures: none of these are retried
/// internally, because the computation is a pure function of its input
/// snapshot — retrying with unchanged input reproduces the same failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValuationError {
    /// The requested report window is inverted (start after end).
    #[error("invalid range: {0}")]
    InvalidRange(String),

    /// A quantity or cost from the event source could not be read as a number.
    #[error("malformed numeric value: {raw}")]
    MalformedNumeric { raw: String },

    /// A timestamp from the event source could not be read as a civil datetime.
    #[error("malformed timestamp: {raw}")]
    MalformedTimestamp { raw: String },

    /// A stock-change reason tag outside the closed set.
    #[error("unknown stock change reason: {raw}")]
    UnknownReason { raw: String },

    /// A data-format failure wrapped with the offending event's identity.
    ///
    /// An unparseable cost/quantity makes the whole running-balance chain
    /// untrustworthy from that point forward, so the computation aborts.
    #[error("valuation failed for item {item_id}: {source}")]
    ComputationFailed {
        item_id: String,
        #[source]
        source: Box<ValuationError>,
    },

    /// The upstream event read failed.
    #[error("event source failure: {0}")]
    EventSource(String),
}

impl ValuationError {
    pub fn invalid_range(msg: impl Into<String>) -> Self {
        Self::InvalidRange(msg.into())
    }

    pub fn malformed_numeric(raw: impl Into<String>) -> Self {
        Self::MalformedNumeric { raw: raw.into() }
    }

    pub fn malformed_timestamp(raw: impl Into<String>) -> Self {
        Self::MalformedTimestamp { raw: raw.into() }
    }

    pub fn unknown_reason(raw: impl Into<String>) -> Self {
        Self::UnknownReason { raw: raw.into() }
    }

    pub fn computation_failed(item_id: impl Into<String>, source: ValuationError) -> Self {
        Self::ComputationFailed {
            item_id: item_id.into(),
            source: Box::new(source),
        }
    }

    pub fn event_source(msg: impl Into<String>) -> Self {
        Self::EventSource(msg.into())
    }
}
