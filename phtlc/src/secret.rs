use crate::secret_hash::SecretHash;
use rand::RngCore;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};

pub const SECRET_LENGTH: usize = 32;

/// The preimage whose digest satisfies a hashlock.
///
/// Revealing it on-ledger via `redeem` is what makes the swap atomic: the
/// counterparty learns the secret from the emitted event and uses it on the
/// other leg.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Ord, Eq, Hash)]
pub struct Secret([u8; SECRET_LENGTH]);

impl Secret {
    pub fn generate<R: RngCore>(rng: &mut R) -> Secret {
        let mut bytes = [0u8; SECRET_LENGTH];
        rng.fill_bytes(&mut bytes);

        Secret(bytes)
    }

    pub fn from_vec(vec: &[u8]) -> Result<Secret, FromVecError> {
        if vec.len() != SECRET_LENGTH {
            return Err(FromVecError::InvalidLength {
                expected: SECRET_LENGTH,
                got: vec.len(),
            });
        }
        let mut data = [0u8; SECRET_LENGTH];
        data.copy_from_slice(&vec[..SECRET_LENGTH]);

        Ok(Secret(data))
    }

    pub fn hash(&self) -> SecretHash {
        SecretHash::new(self)
    }

    pub fn into_raw_secret(self) -> [u8; SECRET_LENGTH] {
        self.0
    }

    pub fn raw_secret(&self) -> &[u8; SECRET_LENGTH] {
        &self.0
    }
}

impl From<[u8; SECRET_LENGTH]> for Secret {
    fn from(secret: [u8; SECRET_LENGTH]) -> Self {
        Secret(secret)
    }
}

impl From<Secret> for SecretHash {
    fn from(secret: Secret) -> Self {
        secret.hash()
    }
}

impl fmt::LowerHex for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(hex::encode(self.0).as_str())
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:x}", self)
    }
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum FromVecError {
    #[error("secret must be exactly {expected} bytes, got {got}")]
    InvalidLength { expected: usize, got: usize },
    #[error(transparent)]
    FromHex(#[from] hex::FromHexError),
}

impl FromStr for Secret {
    type Err = FromVecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let vec = hex::decode(s)?;
        Self::from_vec(&vec)
    }
}

impl Serialize for Secret {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{:x}", self))
    }
}

impl<'de> Deserialize<'de> for Secret {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct Visitor;

        impl de::Visitor<'_> for Visitor {
            type Value = Secret;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a hex encoded 32 byte value")
            }

            fn visit_str<E>(self, v: &str) -> Result<Secret, E>
            where
                E: de::Error,
            {
                Secret::from_str(v).map_err(|_| {
                    de::Error::invalid_value(de::Unexpected::Str(v), &"hex encoded bytes")
                })
            }
        }

        deserializer.deserialize_str(Visitor)
    }
}
