//! Stock-change reason taxonomy.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValuationError;

/// Why a stock quantity changed.
///
/// This is a closed set: event rows carry these as SCREAMING_SNAKE_CASE tags,
/// and an unrecognized tag is a data-format error, never a silent default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockChangeReason {
    /// Initial quantity entered when an item first enters inventory.
    InitialStock,
    /// Manual correction performed by a user (e.g. discrepancy fix).
    ManualUpdate,
    /// Price correction audit row (quantity delta is zero).
    PriceChange,
    /// Stock sold to a customer (outbound).
    Sold,
    /// Scrapped due to damage, policy, or internal decision.
    Scrapped,
    /// Destroyed beyond use (e.g. fire, critical damage).
    Destroyed,
    /// Damaged but not yet scrapped or returned.
    Damaged,
    /// Past expiration date, no longer sellable.
    Expired,
    /// Missing or lost during handling, shipping, or storage.
    Lost,
    /// Returned back to the supplier (e.g. defective goods).
    ReturnedToSupplier,
    /// Returned by the customer (e.g. refund, exchange).
    ReturnedByCustomer,
}

impl StockChangeReason {
    /// Terminal-loss reasons charged to the write-off bucket.
    pub fn is_write_off(self) -> bool {
        matches!(
            self,
            Self::Damaged | Self::Destroyed | Self::Scrapped | Self::Expired | Self::Lost
        )
    }

    /// Inbound stock coming back from a customer.
    pub fn is_return_in(self) -> bool {
        self == Self::ReturnedByCustomer
    }

    /// Outbound stock reversing an earlier purchase.
    pub fn is_return_to_supplier(self) -> bool {
        self == Self::ReturnedToSupplier
    }

    /// Stable tag as stored by the event source.
    pub fn as_tag(self) -> &'static str {
        match self {
            Self::InitialStock => "INITIAL_STOCK",
            Self::ManualUpdate => "MANUAL_UPDATE",
            Self::PriceChange => "PRICE_CHANGE",
            Self::Sold => "SOLD",
            Self::Scrapped => "SCRAPPED",
            Self::Destroyed => "DESTROYED",
            Self::Damaged => "DAMAGED",
            Self::Expired => "EXPIRED",
            Self::Lost => "LOST",
            Self::ReturnedToSupplier => "RETURNED_TO_SUPPLIER",
            Self::ReturnedByCustomer => "RETURNED_BY_CUSTOMER",
        }
    }
}

impl FromStr for StockChangeReason {
    type Err = ValuationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "INITIAL_STOCK" => Ok(Self::InitialStock),
            "MANUAL_UPDATE" => Ok(Self::ManualUpdate),
            "PRICE_CHANGE" => Ok(Self::PriceChange),
            "SOLD" => Ok(Self::Sold),
            "SCRAPPED" => Ok(Self::Scrapped),
            "DESTROYED" => Ok(Self::Destroyed),
            "DAMAGED" => Ok(Self::Damaged),
            "EXPIRED" => Ok(Self::Expired),
            "LOST" => Ok(Self::Lost),
            "RETURNED_TO_SUPPLIER" => Ok(Self::ReturnedToSupplier),
            "RETURNED_BY_CUSTOMER" => Ok(Self::ReturnedByCustomer),
            other => Err(ValuationError::unknown_reason(other)),
        }
    }
}

impl core::fmt::Display for StockChangeReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_tag())
    }
}
