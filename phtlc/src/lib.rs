#![warn(
    unused_extern_crates,
    missing_debug_implementations,
    missing_copy_implementations,
    rust_2018_idioms,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::fallible_impl_from,
    clippy::cast_precision_loss,
    clippy::cast_possible_wrap,
    clippy::print_stdout,
    clippy::dbg_macro
)]
#![cfg_attr(not(test), warn(clippy::unwrap_used))]
#![forbid(unsafe_code)]

//! Pre-hashed timelock contracts (PHTLCs) for cross-chain atomic swaps.
//!
//! An HTLC escrows an asset under a hashlock and a timelock: the receiver
//! can claim the asset by revealing the preimage of the hashlock before the
//! deadline, after which the depositor can reclaim it unconditionally. A
//! PHTLC additionally allows the escrow to be created *before* the hashlock
//! is known and the hashlock to be attached later, either directly by the
//! depositor or by a relayer carrying the depositor's signature.
//!
//! Protocol:
//!
//!  1) `commit(id, receiver, timelock, amount)` - the sender escrows funds
//!      without fixing a hashlock yet.
//!  2) `lock(id, hashlock, timelock, amount)` - the counterparty escrows
//!      funds with a known hashlock, optionally adding a reward for whoever
//!      later performs the redeeming call.
//!  3) `addLock(id, hashlock, timelock)` / `addLockSig(..., signature)` -
//!      the sender (or a relayer holding the sender's signature) attaches
//!      the hashlock to a committed swap.
//!  4) `redeem(id, secret)` - once the receiver knows the secret they can
//!      claim the funds before the timelock expires.
//!  5) `refund(id)` - after the timelock has expired the sender can get
//!      their funds back.
//!
//! The state machine in [`Htlc`] is ledger-agnostic: escrow transfers and
//! the clock are behind the traits in [`ledger`], signature verification
//! behind the one in [`sign`]. One adapter per host ledger plugs in there.

pub mod asset;
pub mod ledger;
pub mod sign;

mod htlc;
mod identity;
mod record;
mod routing;
mod secret;
mod secret_hash;
mod store;
mod swap_id;
mod timestamp;

pub use self::{
    asset::{Asset, Quantity},
    htlc::{CommitParams, Error, Event, Htlc, LockParams, TxResult},
    identity::Identity,
    record::{Reward, Status, SwapRecord},
    routing::{Hop, RoutingInfo},
    secret::Secret,
    secret_hash::SecretHash,
    store::RecordStore,
    swap_id::SwapId,
    timestamp::Timestamp,
};
