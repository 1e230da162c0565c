#![allow(dead_code)]

use ed25519_dalek::SigningKey;
use phtlc::{
    asset::{Asset, Quantity},
    ledger::{CurrentTime, Escrow, InsufficientBalance},
    sign::{Domain, Ed25519},
    Htlc, Identity, RoutingInfo, SwapId, Timestamp,
};
use std::{cell::Cell, collections::HashMap, rc::Rc};

/// A hand-cranked ledger clock. Tests keep a handle and move time forward
/// while the machine owns the ledger.
#[derive(Debug, Clone, Default)]
pub struct Clock(Rc<Cell<u64>>);

impl Clock {
    pub fn new(now: u64) -> Self {
        Clock(Rc::new(Cell::new(now)))
    }

    pub fn set(&self, now: u64) {
        self.0.set(now);
    }

    pub fn advance(&self, seconds: u64) {
        self.0.set(self.0.get() + seconds);
    }

    pub fn now(&self) -> u64 {
        self.0.get()
    }
}

/// An in-memory stand-in for a host ledger: account balances, protocol
/// custody and a clock that only moves when the test says so.
#[derive(Debug, Default)]
pub struct TestLedger {
    balances: HashMap<(Identity, Asset), u64>,
    custody: HashMap<Asset, u64>,
    clock: Clock,
}

impl TestLedger {
    pub fn new(clock: Clock) -> Self {
        TestLedger {
            clock,
            ..Default::default()
        }
    }

    pub fn fund(&mut self, who: Identity, asset: &Asset, amount: u64) {
        *self.balances.entry((who, asset.clone())).or_default() += amount;
    }

    pub fn balance_of(&self, who: Identity, asset: &Asset) -> u64 {
        self.balances
            .get(&(who, asset.clone()))
            .copied()
            .unwrap_or_default()
    }

    pub fn custody_of(&self, asset: &Asset) -> u64 {
        self.custody.get(asset).copied().unwrap_or_default()
    }

    /// Everything in circulation for `asset`, wherever it sits. Escrow must
    /// never mint or burn, so this is constant across operations.
    pub fn total_supply(&self, asset: &Asset) -> u64 {
        let in_accounts: u64 = self
            .balances
            .iter()
            .filter(|((_, a), _)| a == asset)
            .map(|(_, amount)| amount)
            .sum();

        in_accounts + self.custody_of(asset)
    }
}

impl Escrow for TestLedger {
    fn deposit(
        &mut self,
        from: &Identity,
        asset: &Asset,
        quantity: Quantity,
    ) -> Result<(), InsufficientBalance> {
        let balance = self.balances.entry((*from, asset.clone())).or_default();
        if *balance < quantity.as_u64() {
            return Err(InsufficientBalance);
        }

        *balance -= quantity.as_u64();
        *self.custody.entry(asset.clone()).or_default() += quantity.as_u64();

        Ok(())
    }

    fn release(&mut self, to: &Identity, asset: &Asset, quantity: Quantity) {
        let custody = self.custody.entry(asset.clone()).or_default();
        assert!(
            *custody >= quantity.as_u64(),
            "release exceeds escrowed custody"
        );

        *custody -= quantity.as_u64();
        *self.balances.entry((*to, asset.clone())).or_default() += quantity.as_u64();
    }
}

impl CurrentTime for TestLedger {
    fn current_time(&self) -> Timestamp {
        Timestamp::from_secs(self.clock.now())
    }
}

pub type TestHtlc = Htlc<TestLedger, Ed25519>;

pub fn htlc(ledger: TestLedger) -> TestHtlc {
    Htlc::new(ledger, Ed25519, domain())
}

pub fn domain() -> Domain {
    Domain::new("phtlc-test", "1", 1)
}

pub fn identity(byte: u8) -> Identity {
    Identity::from_bytes([byte; 32])
}

pub fn swap_id(byte: u8) -> SwapId {
    SwapId::from_bytes([byte; 32])
}

/// A deterministic ed25519 key pair whose verifying key doubles as the
/// on-ledger identity.
pub fn keypair(seed: u8) -> (SigningKey, Identity) {
    let signing_key = SigningKey::from_bytes(&[seed; 32]);
    let identity = Identity::from_bytes(signing_key.verifying_key().to_bytes());

    (signing_key, identity)
}

pub fn routing() -> RoutingInfo {
    RoutingInfo::new("ethereum", "USDC", "0xdeadbeef")
}
