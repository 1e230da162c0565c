use crate::{
    asset::{Asset, Quantity},
    identity::Identity,
    routing::RoutingInfo,
    secret::Secret,
    secret_hash::SecretHash,
    timestamp::Timestamp,
};
use serde::{Deserialize, Serialize};

/// Where a swap record is in its lifecycle.
///
/// `Committed` and `Locked` hold funds in escrow; `Redeemed` and `Refunded`
/// are absorbing. The only transitions are
/// `Committed -> Locked -> {Redeemed, Refunded}` and
/// `Committed -> Refunded`.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Status {
    /// Funds escrowed, hashlock not yet set.
    Committed,
    /// Hashlock set, redeemable against the secret until the timelock.
    Locked,
    Redeemed,
    Refunded,
}

impl Status {
    pub fn is_terminal(self) -> bool {
        matches!(self, Status::Redeemed | Status::Refunded)
    }
}

/// One swap held by the record store.
///
/// Records are never deleted; a terminal record remains queryable as an
/// audit trail, including the secret revealed at redemption.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapRecord {
    /// The identity that deposited the escrowed funds. Only this identity
    /// may refund or attach a hashlock.
    pub sender: Identity,
    /// The identity entitled to redeem.
    pub receiver: Identity,
    pub asset: Asset,
    pub amount: Quantity,
    pub hashlock: Option<SecretHash>,
    /// Set at redemption, for observers of the record.
    pub secret: Option<Secret>,
    pub timelock: Timestamp,
    pub reward: Option<Reward>,
    pub routing: RoutingInfo,
    pub status: Status,
}

/// A secondary escrow paid to whoever performs the redeeming call.
///
/// Carries its own deadline which must come strictly before the main
/// timelock of the record it is attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    pub amount: Quantity,
    pub timelock: Timestamp,
}
