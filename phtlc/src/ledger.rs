//! The two primitives the state machine expects from a host ledger.
//!
//! One adapter per target ledger implements these; the state machine itself
//! stays ledger-agnostic.

use crate::{
    asset::{Asset, Quantity},
    identity::Identity,
    timestamp::Timestamp,
};

/// Current time as a UNIX timestamp from the perspective of the implementer.
///
/// Intended for getting the current time from the underlying ledger. The
/// definition of `current time` varies depending on the ledger (block
/// timestamp, slot-derived time); this always refers to the clock the
/// ledger itself enforces, never client wall time.
pub trait CurrentTime {
    fn current_time(&self) -> Timestamp;
}

/// The asset-transfer primitive backing escrow custody.
pub trait Escrow {
    /// Debit `from` and credit protocol custody.
    fn deposit(
        &mut self,
        from: &Identity,
        asset: &Asset,
        quantity: Quantity,
    ) -> Result<(), InsufficientBalance>;

    /// Pay `quantity` out of protocol custody to `to`.
    ///
    /// Infallible on purpose: the state machine only ever releases what an
    /// earlier deposit escrowed, so custody covers every release.
    fn release(&mut self, to: &Identity, asset: &Asset, quantity: Quantity);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("insufficient balance to fund the escrow")]
pub struct InsufficientBalance;
