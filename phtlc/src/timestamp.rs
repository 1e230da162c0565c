use serde::{Deserialize, Serialize};
use std::fmt;

/// An exact time and date used to represent absolute timelocks.
///
/// Always interpreted against the host ledger's own clock (block timestamp
/// or slot-derived time), never against client-supplied wall time. The inner
/// value is UNIX epoch seconds.
#[derive(
    Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize, Serialize,
)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    pub const fn from_secs(secs: u64) -> Self {
        Timestamp(secs)
    }

    pub fn plus(self, seconds: u64) -> Self {
        Self(self.0.saturating_add(seconds))
    }

    pub fn minus(self, seconds: u64) -> Self {
        Self(self.0.saturating_sub(seconds))
    }

    /// Big-endian encoding, as used in the canonical signing message.
    pub fn to_be_bytes(self) -> [u8; 8] {
        self.0.to_be_bytes()
    }
}

/// The u64 input is the number of seconds since epoch
impl From<u64> for Timestamp {
    fn from(item: u64) -> Self {
        Self(item)
    }
}

/// The u64 returned is the number of seconds since epoch
impl From<Timestamp> for u64 {
    fn from(item: Timestamp) -> Self {
        item.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plus_saturates_at_the_maximum() {
        let timestamp = Timestamp::from_secs(u64::MAX);
        assert_eq!(timestamp.plus(1), Timestamp::from_secs(u64::MAX));
    }

    #[test]
    fn minus_saturates_at_zero() {
        let timestamp = Timestamp::from_secs(10);
        assert_eq!(timestamp.minus(20), Timestamp::from_secs(0));
    }

    #[test]
    fn timestamps_order_by_their_seconds() {
        let earlier = Timestamp::from_secs(1_000);
        let later = earlier.plus(500);

        assert!(earlier < later);
    }
}
