use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::{
    fmt::{self, Debug},
    str::FromStr,
};

/// The unique identifier of a swap record.
///
/// Chosen by the creating party, typically at random; the record store
/// rejects a second creation under the same id for its whole lifetime.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SwapId([u8; 32]);

impl SwapId {
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        SwapId(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn random<R: RngCore>(rng: &mut R) -> Self {
        let mut bytes = [0u8; 32];
        rng.fill_bytes(&mut bytes);

        SwapId(bytes)
    }
}

impl Debug for SwapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SwapId({:x})", self)
    }
}

impl fmt::Display for SwapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:x}", self)
    }
}

impl fmt::LowerHex for SwapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(hex::encode(self.0).as_str())
    }
}

impl FromStr for SwapId {
    type Err = ParseSwapIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s)?;
        let bytes: [u8; 32] = bytes
            .try_into()
            .map_err(|bytes: Vec<u8>| ParseSwapIdError::InvalidLength(bytes.len()))?;

        Ok(SwapId(bytes))
    }
}

impl TryFrom<String> for SwapId {
    type Error = ParseSwapIdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<SwapId> for String {
    fn from(id: SwapId) -> Self {
        format!("{:x}", id)
    }
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ParseSwapIdError {
    #[error("swap id must be exactly 32 bytes, got {0}")]
    InvalidLength(usize),
    #[error(transparent)]
    FromHex(#[from] hex::FromHexError),
}
