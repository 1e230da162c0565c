//! Domain terms for the escrowed unit and its quantity.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The symbol of the asset held in escrow, e.g. `"SOL"` or `"USDC"`.
///
/// The state machine never interprets this value; it stores it on the record
/// and hands it to the escrow primitive untouched.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Asset(String);

impl Asset {
    pub fn new<S: Into<String>>(symbol: S) -> Self {
        Asset(symbol.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Asset {
    fn from(symbol: &str) -> Self {
        Asset(symbol.to_owned())
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// An amount of an asset, denominated in the asset's smallest indivisible
/// unit.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Quantity(u64);

impl Quantity {
    pub const ZERO: Quantity = Quantity(0);

    pub const fn new(units: u64) -> Self {
        Quantity(units)
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, rhs: Quantity) -> Option<Quantity> {
        self.0.checked_add(rhs.0).map(Quantity)
    }
}

impl From<u64> for Quantity {
    fn from(units: u64) -> Self {
        Quantity(units)
    }
}

impl From<Quantity> for u64 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spectral::prelude::*;

    #[test]
    fn quantity_serializes_as_expected() {
        let quantity = Quantity::new(100);
        let want = "100".to_string();
        let got = serde_json::to_string(&quantity).expect("failed to serialize");

        assert_that(&got).is_equal_to(&want);
    }

    #[test]
    fn asset_serialization_roundtrip() {
        let asset = Asset::new("USDC");
        let json = serde_json::to_string(&asset).expect("failed to serialize");
        let rinsed: Asset = serde_json::from_str(&json).expect("failed to deserialize");

        assert_eq!(asset, rinsed);
    }

    #[test]
    fn checked_add_detects_overflow() {
        let quantity = Quantity::new(u64::MAX);

        assert_that(&quantity.checked_add(Quantity::new(1))).is_none();
    }
}
