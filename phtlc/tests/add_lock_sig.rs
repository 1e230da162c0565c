mod helper;

use ed25519_dalek::Signer;
use helper::*;
use phtlc::{
    asset::{Asset, Quantity},
    sign::{add_lock_digest, Domain, Ed25519},
    CommitParams, Error, Event, Htlc, Secret, Timestamp,
};

const T: u64 = 1_000;

fn asset() -> Asset {
    Asset::new("SOL")
}

fn secret() -> Secret {
    Secret::from(*b"hello world, you are beautiful!!")
}

fn committed_machine() -> (TestHtlc, ed25519_dalek::SigningKey, Clock) {
    let (signing_key, sender) = keypair(42);
    let clock = Clock::new(T);
    let mut ledger = TestLedger::new(clock.clone());
    ledger.fund(sender, &asset(), 100);
    let mut machine = htlc(ledger);

    machine
        .commit(sender, CommitParams {
            id: swap_id(7),
            receiver: identity(2),
            asset: asset(),
            amount: Quantity::new(100),
            timelock: Timestamp::from_secs(T + 1_000),
            routing: routing(),
        })
        .unwrap();

    (machine, signing_key, clock)
}

#[test]
fn a_relayer_attaches_the_hashlock_with_the_senders_signature() {
    let (mut machine, signing_key, clock) = committed_machine();
    let hashlock = secret().hash();
    let timelock = Timestamp::from_secs(T + 900);

    let digest = add_lock_digest(machine.domain(), swap_id(7), hashlock, timelock);
    let signature = signing_key.sign(&digest);

    let event = machine
        .add_lock_sig(swap_id(7), hashlock, timelock, &signature.to_bytes())
        .unwrap();

    assert_eq!(event, Event::LockAdded {
        id: swap_id(7),
        hashlock,
        timelock,
    });

    // The swap now behaves exactly as if the sender had locked it.
    clock.set(T + 500);
    machine.redeem(identity(2), swap_id(7), secret()).unwrap();
    assert_eq!(machine.ledger().balance_of(identity(2), &asset()), 100);
}

#[test]
fn a_signature_covers_exactly_the_fields_submitted() {
    let (mut machine, signing_key, _clock) = committed_machine();
    let hashlock = secret().hash();
    let timelock = Timestamp::from_secs(T + 900);

    let digest = add_lock_digest(machine.domain(), swap_id(7), hashlock, timelock);
    let signature = signing_key.sign(&digest).to_bytes();

    // Substituting any argument invalidates the signature.
    assert_eq!(
        machine.add_lock_sig(swap_id(7), hashlock, timelock.plus(1), &signature),
        Err(Error::SignatureMismatch)
    );
    let other_hashlock = Secret::from([9u8; 32]).hash();
    assert_eq!(
        machine.add_lock_sig(swap_id(7), other_hashlock, timelock, &signature),
        Err(Error::SignatureMismatch)
    );

    // The untampered call still goes through afterwards.
    assert!(machine
        .add_lock_sig(swap_id(7), hashlock, timelock, &signature)
        .is_ok());
}

#[test]
fn a_spent_signature_cannot_be_replayed() {
    let (mut machine, signing_key, _clock) = committed_machine();
    let hashlock = secret().hash();
    let timelock = Timestamp::from_secs(T + 900);

    let digest = add_lock_digest(machine.domain(), swap_id(7), hashlock, timelock);
    let signature = signing_key.sign(&digest).to_bytes();

    machine
        .add_lock_sig(swap_id(7), hashlock, timelock, &signature)
        .unwrap();

    assert_eq!(
        machine.add_lock_sig(swap_id(7), hashlock, timelock, &signature),
        Err(Error::HashlockAlreadySet)
    );
}

#[test]
fn only_the_senders_key_authorizes() {
    let (mut machine, _signing_key, _clock) = committed_machine();
    let (other_key, _) = keypair(43);
    let hashlock = secret().hash();
    let timelock = Timestamp::from_secs(T + 900);

    let digest = add_lock_digest(machine.domain(), swap_id(7), hashlock, timelock);
    let signature = other_key.sign(&digest);

    assert_eq!(
        machine.add_lock_sig(swap_id(7), hashlock, timelock, &signature.to_bytes()),
        Err(Error::SignatureMismatch)
    );
}

#[test]
fn a_valid_signature_over_a_past_timelock_is_rejected() {
    let (mut machine, signing_key, clock) = committed_machine();
    let hashlock = secret().hash();
    let timelock = Timestamp::from_secs(T + 100);

    let digest = add_lock_digest(machine.domain(), swap_id(7), hashlock, timelock);
    let signature = signing_key.sign(&digest);

    clock.set(T + 100);
    assert_eq!(
        machine.add_lock_sig(swap_id(7), hashlock, timelock, &signature.to_bytes()),
        Err(Error::InvalidTimelock)
    );
}

#[test]
fn unknown_and_terminal_records_are_rejected_before_verification() {
    let (mut machine, signing_key, clock) = committed_machine();
    let (_, sender) = keypair(42);
    let hashlock = secret().hash();
    let timelock = Timestamp::from_secs(T + 900);

    let digest = add_lock_digest(machine.domain(), swap_id(9), hashlock, timelock);
    let signature = signing_key.sign(&digest).to_bytes();

    assert_eq!(
        machine.add_lock_sig(swap_id(9), hashlock, timelock, &signature),
        Err(Error::NotFound)
    );

    clock.set(T + 2_000);
    machine.refund(sender, swap_id(7)).unwrap();

    let digest = add_lock_digest(machine.domain(), swap_id(7), hashlock, timelock);
    let signature = signing_key.sign(&digest).to_bytes();
    assert_eq!(
        machine.add_lock_sig(swap_id(7), hashlock, timelock, &signature),
        Err(Error::WrongState)
    );
}

#[test]
fn a_signature_for_one_deployment_does_not_transfer_to_another() {
    let (signing_key, sender) = keypair(42);
    let clock = Clock::new(T);
    let mut ledger = TestLedger::new(clock);
    ledger.fund(sender, &asset(), 100);
    let mut machine = Htlc::new(ledger, Ed25519, Domain::new("phtlc-other", "1", 99));

    machine
        .commit(sender, CommitParams {
            id: swap_id(7),
            receiver: identity(2),
            asset: asset(),
            amount: Quantity::new(100),
            timelock: Timestamp::from_secs(T + 1_000),
            routing: routing(),
        })
        .unwrap();

    let hashlock = secret().hash();
    let timelock = Timestamp::from_secs(T + 900);

    // Signed against the default test deployment, not this one.
    let digest = add_lock_digest(&domain(), swap_id(7), hashlock, timelock);
    let signature = signing_key.sign(&digest);

    assert_eq!(
        machine.add_lock_sig(swap_id(7), hashlock, timelock, &signature.to_bytes()),
        Err(Error::SignatureMismatch)
    );
}
