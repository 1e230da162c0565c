//! The state machine governing commitment, locking, redemption and refund.

use crate::{
    asset::{Asset, Quantity},
    identity::Identity,
    ledger::{CurrentTime, Escrow, InsufficientBalance},
    record::{Reward, Status, SwapRecord},
    routing::RoutingInfo,
    secret::Secret,
    secret_hash::SecretHash,
    sign::{add_lock_digest, Domain, VerifySignature},
    store::{self, RecordStore},
    swap_id::SwapId,
    timestamp::Timestamp,
};
use serde::{Deserialize, Serialize};

/// The outcome of one protocol operation: the emitted event, or a
/// definitive rejection. Nothing is mutated on the `Err` path.
pub type TxResult = Result<Event, Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("a swap with this id already exists")]
    AlreadyExists,
    #[error("no swap with this id")]
    NotFound,
    #[error("amount must be greater than zero")]
    InvalidAmount,
    #[error("timelock must be strictly in the future")]
    InvalidTimelock,
    #[error("reward timelock must be strictly in the future and before the timelock")]
    InvalidRewardTimelock,
    #[error("hashlock already set")]
    HashlockAlreadySet,
    #[error("caller is not authorized to perform this operation")]
    Unauthorized,
    #[error("signature does not verify against the sender's key")]
    SignatureMismatch,
    #[error("swap is not in a state that permits this operation")]
    WrongState,
    #[error("secret does not match the hashlock")]
    SecretMismatch,
    #[error("timelock has already expired")]
    Expired,
    #[error("timelock has not yet expired")]
    NotYetExpired,
    #[error("insufficient balance to fund the escrow")]
    InsufficientBalance,
}

impl From<InsufficientBalance> for Error {
    fn from(_: InsufficientBalance) -> Self {
        Error::InsufficientBalance
    }
}

impl From<store::AlreadyExists> for Error {
    fn from(_: store::AlreadyExists) -> Self {
        Error::AlreadyExists
    }
}

impl From<store::NotFound> for Error {
    fn from(_: store::NotFound) -> Self {
        Error::NotFound
    }
}

/// Emitted once per committed operation, for off-chain observers.
///
/// Relayers progress the counterpart leg of a swap from these, so each
/// variant carries every field the operation set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display)]
#[serde(tag = "operation", rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Event {
    Committed {
        id: SwapId,
        sender: Identity,
        receiver: Identity,
        asset: Asset,
        amount: Quantity,
        timelock: Timestamp,
        routing: RoutingInfo,
    },
    Locked {
        id: SwapId,
        sender: Identity,
        receiver: Identity,
        asset: Asset,
        amount: Quantity,
        hashlock: SecretHash,
        timelock: Timestamp,
        reward: Option<Reward>,
        routing: RoutingInfo,
    },
    LockAdded {
        id: SwapId,
        hashlock: SecretHash,
        timelock: Timestamp,
    },
    RewardLocked {
        id: SwapId,
        amount: Quantity,
        timelock: Timestamp,
    },
    Redeemed {
        id: SwapId,
        redeemer: Identity,
        secret: Secret,
    },
    Refunded {
        id: SwapId,
        sender: Identity,
    },
}

/// Arguments to [`Htlc::commit`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitParams {
    pub id: SwapId,
    pub receiver: Identity,
    pub asset: Asset,
    pub amount: Quantity,
    pub timelock: Timestamp,
    pub routing: RoutingInfo,
}

/// Arguments to [`Htlc::lock`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockParams {
    pub id: SwapId,
    pub hashlock: SecretHash,
    pub receiver: Identity,
    pub asset: Asset,
    pub amount: Quantity,
    pub timelock: Timestamp,
    pub reward: Option<Reward>,
    pub routing: RoutingInfo,
}

/// Pre-hashed timelock contracts over one host ledger.
///
/// Generic over the ledger's escrow/clock primitives (`L`) and the
/// signature scheme of the delegated add-lock flow (`V`). The record store
/// is owned exclusively by the machine; callers only observe records
/// through [`Htlc::get_details`] and the emitted [`Event`]s.
///
/// Every operation either passes all of its checks and applies its
/// transition plus transfers, or returns an [`Error`] having mutated
/// nothing: validation runs first, the escrow deposit is the only fallible
/// effect, and record updates come last.
#[derive(Debug)]
pub struct Htlc<L, V> {
    records: RecordStore,
    ledger: L,
    verifier: V,
    domain: Domain,
}

impl<L, V> Htlc<L, V> {
    pub fn new(ledger: L, verifier: V, domain: Domain) -> Self {
        Htlc {
            records: RecordStore::new(),
            ledger,
            verifier,
            domain,
        }
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// Details of a swap, terminal ones included.
    pub fn get_details(&self, id: SwapId) -> Option<&SwapRecord> {
        self.records.get(&id)
    }
}

impl<L, V> Htlc<L, V>
where
    L: Escrow + CurrentTime,
    V: VerifySignature,
{
    /// Escrow funds without fixing a hashlock yet.
    ///
    /// The hashlock is attached later via [`Htlc::add_lock`] or
    /// [`Htlc::add_lock_sig`].
    pub fn commit(&mut self, caller: Identity, params: CommitParams) -> TxResult {
        let CommitParams {
            id,
            receiver,
            asset,
            amount,
            timelock,
            routing,
        } = params;

        if self.records.contains(&id) {
            return Err(Error::AlreadyExists);
        }
        if amount.is_zero() {
            return Err(Error::InvalidAmount);
        }
        if timelock <= self.ledger.current_time() {
            return Err(Error::InvalidTimelock);
        }

        self.ledger.deposit(&caller, &asset, amount)?;

        self.records.create(id, SwapRecord {
            sender: caller,
            receiver,
            asset: asset.clone(),
            amount,
            hashlock: None,
            secret: None,
            timelock,
            reward: None,
            routing: routing.clone(),
            status: Status::Committed,
        })?;

        tracing::info!(%id, %asset, %amount, %timelock, "swap committed");

        Ok(Event::Committed {
            id,
            sender: caller,
            receiver,
            asset,
            amount,
            timelock,
            routing,
        })
    }

    /// Escrow funds with a known hashlock, optionally attaching a reward
    /// for whoever later performs the redeeming call.
    pub fn lock(&mut self, caller: Identity, params: LockParams) -> TxResult {
        let LockParams {
            id,
            hashlock,
            receiver,
            asset,
            amount,
            timelock,
            reward,
            routing,
        } = params;

        if self.records.contains(&id) {
            return Err(Error::AlreadyExists);
        }
        if amount.is_zero() {
            return Err(Error::InvalidAmount);
        }
        let now = self.ledger.current_time();
        if timelock <= now {
            return Err(Error::InvalidTimelock);
        }

        let mut escrowed = amount;
        if let Some(reward) = reward {
            if reward.amount.is_zero() {
                return Err(Error::InvalidAmount);
            }
            if reward.timelock <= now || reward.timelock >= timelock {
                return Err(Error::InvalidRewardTimelock);
            }
            escrowed = escrowed
                .checked_add(reward.amount)
                .ok_or(Error::InvalidAmount)?;
        }

        // One deposit for principal plus reward keeps the operation
        // all-or-nothing.
        self.ledger.deposit(&caller, &asset, escrowed)?;

        self.records.create(id, SwapRecord {
            sender: caller,
            receiver,
            asset: asset.clone(),
            amount,
            hashlock: Some(hashlock),
            secret: None,
            timelock,
            reward,
            routing: routing.clone(),
            status: Status::Locked,
        })?;

        tracing::info!(%id, %asset, %amount, %hashlock, %timelock, "swap locked");

        Ok(Event::Locked {
            id,
            sender: caller,
            receiver,
            asset,
            amount,
            hashlock,
            timelock,
            reward,
            routing,
        })
    }

    /// Attach a reward sub-escrow to an existing swap.
    ///
    /// Only the sender can do this, only while the swap is live and only
    /// once; the reward deadline must fall strictly before the swap's own
    /// timelock.
    pub fn lock_reward(&mut self, caller: Identity, id: SwapId, reward: Reward) -> TxResult {
        let record = self.records.get(&id).ok_or(Error::NotFound)?;

        if record.status.is_terminal() {
            return Err(Error::WrongState);
        }
        if record.reward.is_some() {
            return Err(Error::AlreadyExists);
        }
        if caller != record.sender {
            return Err(Error::Unauthorized);
        }
        if reward.amount.is_zero() {
            return Err(Error::InvalidAmount);
        }
        let now = self.ledger.current_time();
        if reward.timelock <= now || reward.timelock >= record.timelock {
            return Err(Error::InvalidRewardTimelock);
        }

        let asset = record.asset.clone();
        self.ledger.deposit(&caller, &asset, reward.amount)?;
        self.records.update(&id, |record| record.reward = Some(reward))?;

        tracing::info!(%id, amount = %reward.amount, timelock = %reward.timelock, "reward locked");

        Ok(Event::RewardLocked {
            id,
            amount: reward.amount,
            timelock: reward.timelock,
        })
    }

    /// Attach the hashlock to a committed swap, as the sender.
    ///
    /// The timelock supplied here replaces the committed one; it may
    /// refine, not necessarily equal, the original deadline.
    pub fn add_lock(
        &mut self,
        caller: Identity,
        id: SwapId,
        hashlock: SecretHash,
        timelock: Timestamp,
    ) -> TxResult {
        let record = self.records.get(&id).ok_or(Error::NotFound)?;

        if record.status.is_terminal() {
            return Err(Error::WrongState);
        }
        if record.hashlock.is_some() {
            return Err(Error::HashlockAlreadySet);
        }
        if caller != record.sender {
            return Err(Error::Unauthorized);
        }
        if timelock <= self.ledger.current_time() {
            return Err(Error::InvalidTimelock);
        }

        self.apply_lock(id, hashlock, timelock)
    }

    /// Attach the hashlock on behalf of the sender, authorized by the
    /// sender's signature over the canonical `(id, hashlock, timelock)`
    /// digest.
    ///
    /// The digest is recomputed from the submitted arguments, so a
    /// signature only ever authorizes exactly the fields it covered.
    /// State is checked before the signature: replaying a spent signature
    /// fails with [`Error::HashlockAlreadySet`], revealing nothing beyond
    /// what the record's public state already does.
    pub fn add_lock_sig(
        &mut self,
        id: SwapId,
        hashlock: SecretHash,
        timelock: Timestamp,
        signature: &[u8],
    ) -> TxResult {
        let record = self.records.get(&id).ok_or(Error::NotFound)?;

        if record.status.is_terminal() {
            return Err(Error::WrongState);
        }
        if record.hashlock.is_some() {
            return Err(Error::HashlockAlreadySet);
        }

        let digest = add_lock_digest(&self.domain, id, hashlock, timelock);
        if !self.verifier.verify(&digest, signature, &record.sender) {
            return Err(Error::SignatureMismatch);
        }
        if timelock <= self.ledger.current_time() {
            return Err(Error::InvalidTimelock);
        }

        self.apply_lock(id, hashlock, timelock)
    }

    fn apply_lock(&mut self, id: SwapId, hashlock: SecretHash, timelock: Timestamp) -> TxResult {
        self.records.update(&id, |record| {
            record.hashlock = Some(hashlock);
            record.timelock = timelock;
            record.status = Status::Locked;
        })?;

        tracing::info!(%id, %hashlock, %timelock, "hashlock attached");

        Ok(Event::LockAdded {
            id,
            hashlock,
            timelock,
        })
    }

    /// Claim the escrowed funds by revealing the secret of the hashlock.
    ///
    /// The principal goes to the record's receiver. An attached reward goes
    /// to the caller, whoever that is: third parties are paid for
    /// performing the redeeming call on the receiver's behalf.
    pub fn redeem(&mut self, caller: Identity, id: SwapId, secret: Secret) -> TxResult {
        let record = self.records.get(&id).ok_or(Error::NotFound)?;

        if record.status != Status::Locked {
            return Err(Error::WrongState);
        }
        let Some(hashlock) = record.hashlock else {
            return Err(Error::WrongState);
        };
        if secret.hash() != hashlock {
            return Err(Error::SecretMismatch);
        }
        if self.ledger.current_time() >= record.timelock {
            return Err(Error::Expired);
        }

        let receiver = record.receiver;
        let asset = record.asset.clone();
        let amount = record.amount;
        let reward = record.reward;

        self.ledger.release(&receiver, &asset, amount);
        if let Some(reward) = reward {
            self.ledger.release(&caller, &asset, reward.amount);
        }

        self.records.update(&id, |record| {
            record.status = Status::Redeemed;
            record.secret = Some(secret);
        })?;

        tracing::info!(%id, redeemer = %caller, "swap redeemed");

        Ok(Event::Redeemed {
            id,
            redeemer: caller,
            secret,
        })
    }

    /// Reclaim the escrowed funds after the timelock has expired.
    ///
    /// Returns the principal and any unclaimed reward to the sender. Works
    /// from `Committed` as well as `Locked`: a swap that never got its
    /// hashlock still refunds once expired.
    pub fn refund(&mut self, caller: Identity, id: SwapId) -> TxResult {
        let record = self.records.get(&id).ok_or(Error::NotFound)?;

        if record.status.is_terminal() {
            return Err(Error::WrongState);
        }
        if caller != record.sender {
            return Err(Error::Unauthorized);
        }
        if self.ledger.current_time() < record.timelock {
            return Err(Error::NotYetExpired);
        }

        let sender = record.sender;
        let asset = record.asset.clone();
        let amount = record.amount;
        let reward = record.reward;

        self.ledger.release(&sender, &asset, amount);
        if let Some(reward) = reward {
            self.ledger.release(&sender, &asset, reward.amount);
        }

        self.records
            .update(&id, |record| record.status = Status::Refunded)?;

        tracing::info!(%id, "swap refunded");

        Ok(Event::Refunded { id, sender })
    }
}
