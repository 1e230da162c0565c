//! Define domain specific terms using the identity module so that we can
//! refer to the parties of a swap in an ergonomic fashion.

use serde::{Deserialize, Serialize};
use std::{
    fmt::{self, Debug},
    str::FromStr,
};

/// A party on the host ledger: the 32-byte public key of an account.
///
/// The delegated add-lock flow verifies signatures against the key recorded
/// here for the sender.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identity([u8; 32]);

impl Identity {
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Identity(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identity({:x})", self)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:x}", self)
    }
}

impl fmt::LowerHex for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(hex::encode(self.0).as_str())
    }
}

impl FromStr for Identity {
    type Err = ParseIdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s)?;
        let bytes: [u8; 32] = bytes
            .try_into()
            .map_err(|bytes: Vec<u8>| ParseIdentityError::InvalidLength(bytes.len()))?;

        Ok(Identity(bytes))
    }
}

impl TryFrom<String> for Identity {
    type Error = ParseIdentityError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Identity> for String {
    fn from(identity: Identity) -> Self {
        format!("{:x}", identity)
    }
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ParseIdentityError {
    #[error("identity must be exactly 32 bytes, got {0}")]
    InvalidLength(usize),
    #[error(transparent)]
    FromHex(#[from] hex::FromHexError),
}
