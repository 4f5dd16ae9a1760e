use super::*;
use crate::{
    config::Config,
    escrow::{EscrowGateway, MemoryEscrow, TransferError},
    sig::{Signer, Verifier},
    types::{Address, ChannelId, Hash, Signature, U256},
};
use rand::{rngs::StdRng, SeedableRng};

const ID: &[u8] = &[0xAA];
const OWNER: Address = Address([0x0E; 20]);
const START_BALANCE: u64 = 10_000;

struct Fixture {
    engine: ChannelEngine<MemoryEscrow>,
    alice: Signer,
    bob: Signer,
}

impl Fixture {
    fn new() -> Self {
        Self::with_config(Config::new(OWNER))
    }

    fn with_config(config: Config) -> Self {
        // Do not use that on any real device, this is just for testing.
        let mut rng = StdRng::seed_from_u64(0);
        let alice = Signer::new(&mut rng);
        let bob = Signer::new(&mut rng);

        let mut escrow = MemoryEscrow::new();
        escrow.mint(alice.address(), amt(START_BALANCE)).unwrap();
        escrow.mint(bob.address(), amt(START_BALANCE)).unwrap();

        Self {
            engine: ChannelEngine::new(config, escrow),
            alice,
            bob,
        }
    }

    fn a(&self) -> Address {
        self.alice.address()
    }

    fn b(&self) -> Address {
        self.bob.address()
    }

    fn alice_at(&self, height: u64) -> CallContext {
        CallContext::new(self.a(), height)
    }

    fn bob_at(&self, height: u64) -> CallContext {
        CallContext::new(self.b(), height)
    }

    fn open(&mut self, deposit: u64) {
        let ctx = self.alice_at(1);
        let b = self.b();
        self.engine.create_channel(ctx, ID, b, amt(deposit)).unwrap();
    }

    fn info(&self) -> ChannelRecord {
        self.engine.get_channel_info(ID, self.a(), self.b()).unwrap()
    }

    fn balance_of(&self, account: Address) -> U256 {
        self.engine.escrow().balance_of(account)
    }

    fn close(&mut self, split: (u64, u64), sig_a: Signature, sig_b: Signature) -> Result<(), ChannelError> {
        let ctx = self.alice_at(5);
        let b = self.b();
        self.engine.close_channel_cooperative(
            ctx,
            ID,
            b,
            amt(split.0),
            amt(split.1),
            &sig_a.0,
            &sig_b.0,
        )
    }

    fn initiate(&mut self, height: u64, split: (u64, u64), sig: Signature) -> Result<(), ChannelError> {
        let ctx = self.alice_at(height);
        let b = self.b();
        self.engine
            .initiate_unilateral_close(ctx, ID, b, amt(split.0), amt(split.1), &sig.0)
    }

    fn resolve(&mut self, height: u64) -> Result<(), ChannelError> {
        let ctx = self.alice_at(height);
        let b = self.b();
        self.engine.resolve_unilateral_close(ctx, ID, b)
    }

    fn assert_all_conserved(&self) {
        for (key, record) in self.engine.ledger().iter() {
            assert!(record.is_conserved(), "{:?}: {:?}", key, record);
        }
    }
}

fn amt(v: u64) -> U256 {
    U256::from(v)
}

fn sign(signer: &Signer, id: &[u8], a: u64, b: u64) -> Signature {
    let id = ChannelId::try_from(id).unwrap();
    signer
        .sign_eth(settlement_hash(id, amt(a), amt(b)).unwrap())
        .unwrap()
}

#[test]
fn create_locks_deposit_on_creator_side() {
    let mut f = Fixture::new();
    f.open(1000);

    let record = f.info();
    assert_eq!(record.total_deposited, amt(1000));
    assert_eq!(record.balance_a, amt(1000));
    assert_eq!(record.balance_b, amt(0));
    assert!(record.is_open);
    assert_eq!(record.dispute_deadline, 0);
    assert_eq!(record.nonce, 0);
    assert_eq!(record.phase(), ChannelPhase::Open);

    assert_eq!(f.balance_of(f.a()), amt(START_BALANCE - 1000));
    assert_eq!(f.engine.custody_balance(), amt(1000));
}

#[test]
fn create_twice_fails_without_effect() {
    let mut f = Fixture::new();
    f.open(1000);

    let (ctx, b) = (f.alice_at(2), f.b());
    assert_eq!(
        f.engine.create_channel(ctx, ID, b, amt(50)),
        Err(ChannelError::ChannelExists)
    );
    assert_eq!(f.info().total_deposited, amt(1000));
    assert_eq!(f.engine.custody_balance(), amt(1000));
    assert_eq!(f.balance_of(f.a()), amt(START_BALANCE - 1000));
}

#[test]
fn create_rejects_malformed_input() {
    let mut f = Fixture::new();
    let (ctx, a, b) = (f.alice_at(1), f.a(), f.b());

    assert_eq!(
        f.engine.create_channel(ctx, &[], b, amt(10)),
        Err(ChannelError::InvalidInput(InvalidInputReason::ChannelIdLength(0)))
    );
    assert_eq!(
        f.engine.create_channel(ctx, &[1u8; 33], b, amt(10)),
        Err(ChannelError::InvalidInput(InvalidInputReason::ChannelIdLength(33)))
    );
    assert_eq!(
        f.engine.create_channel(ctx, ID, b, amt(0)),
        Err(ChannelError::InvalidInput(InvalidInputReason::ZeroAmount))
    );
    assert_eq!(
        f.engine.create_channel(ctx, ID, a, amt(10)),
        Err(ChannelError::InvalidInput(InvalidInputReason::SelfDealing))
    );
    assert!(f.engine.ledger().is_empty());
    assert!(f.engine.custody_balance().is_zero());
}

#[test]
fn create_with_insufficient_funds_records_nothing() {
    let mut f = Fixture::new();
    let (ctx, b) = (f.alice_at(1), f.b());

    let err = f
        .engine
        .create_channel(ctx, ID, b, amt(START_BALANCE + 1))
        .unwrap_err();
    assert_eq!(
        err,
        ChannelError::Transfer(TransferError::InsufficientBalance {
            available: amt(START_BALANCE),
            requested: amt(START_BALANCE + 1),
        })
    );
    assert!(f.engine.get_channel_info(ID, f.a(), f.b()).is_none());
}

#[test]
fn identity_is_id_and_ordered_pair() {
    let mut f = Fixture::new();
    f.open(1000);
    let (a, b) = (f.a(), f.b());

    f.engine
        .create_channel(f.alice_at(1), &[0xBB], b, amt(10))
        .unwrap();
    f.engine
        .create_channel(f.bob_at(1), ID, a, amt(20))
        .unwrap();

    assert_eq!(f.engine.ledger().len(), 3);
    assert_eq!(f.info().total_deposited, amt(1000));
    assert_eq!(
        f.engine.get_channel_info(&[0xBB], a, b).unwrap().total_deposited,
        amt(10)
    );
    let swapped = f.engine.get_channel_info(ID, b, a).unwrap();
    assert_eq!(swapped.total_deposited, amt(20));
    assert_eq!(swapped.balance_a, amt(20));
    assert_eq!(f.engine.custody_balance(), amt(1030));
}

#[test]
fn get_channel_info_for_unknown_or_invalid_id() {
    let mut f = Fixture::new();
    f.open(1000);
    assert!(f.engine.get_channel_info(&[0xAB], f.a(), f.b()).is_none());
    assert!(f.engine.get_channel_info(&[], f.a(), f.b()).is_none());
    assert!(f.engine.get_channel_info(&[0u8; 40], f.a(), f.b()).is_none());
}

#[test]
fn fund_adds_to_creator_side() {
    let mut f = Fixture::new();
    f.open(1000);
    let (ctx, b) = (f.alice_at(3), f.b());

    f.engine.fund_channel(ctx, ID, b, amt(250)).unwrap();

    let record = f.info();
    assert_eq!(record.total_deposited, amt(1250));
    assert_eq!(record.balance_a, amt(1250));
    assert_eq!(record.balance_b, amt(0));
    assert_eq!(f.engine.custody_balance(), amt(1250));
    assert_eq!(f.balance_of(f.a()), amt(START_BALANCE - 1250));
}

#[test]
fn fund_rejections() {
    let mut f = Fixture::new();
    f.open(1000);
    let (ctx, a, b) = (f.alice_at(3), f.a(), f.b());

    assert_eq!(
        f.engine.fund_channel(ctx, &[0xAB], b, amt(1)),
        Err(ChannelError::ChannelNotFound)
    );
    assert_eq!(
        f.engine.fund_channel(ctx, ID, b, amt(0)),
        Err(ChannelError::InvalidInput(InvalidInputReason::ZeroAmount))
    );
    assert_eq!(
        f.engine.fund_channel(ctx, ID, a, amt(1)),
        Err(ChannelError::InvalidInput(InvalidInputReason::SelfDealing))
    );
    // Bob is not participant A of this channel, so from his side it does not
    // exist.
    assert_eq!(
        f.engine.fund_channel(f.bob_at(3), ID, a, amt(1)),
        Err(ChannelError::ChannelNotFound)
    );
    assert!(matches!(
        f.engine.fund_channel(ctx, ID, b, amt(START_BALANCE)),
        Err(ChannelError::Transfer(TransferError::InsufficientBalance { .. }))
    ));
    assert_eq!(f.info().total_deposited, amt(1000));
}

#[test]
fn cooperative_close_pays_both_sides() {
    let mut f = Fixture::new();
    f.open(1000);

    let sig_a = sign(&f.alice, ID, 600, 400);
    let sig_b = sign(&f.bob, ID, 600, 400);
    f.close((600, 400), sig_a, sig_b).unwrap();

    assert_eq!(f.balance_of(f.a()), amt(START_BALANCE - 1000 + 600));
    assert_eq!(f.balance_of(f.b()), amt(START_BALANCE + 400));
    assert!(f.engine.custody_balance().is_zero());

    let record = f.info();
    assert_eq!(record.total_deposited, amt(0));
    assert_eq!(record.balance_a, amt(0));
    assert_eq!(record.balance_b, amt(0));
    assert!(!record.is_open);
    assert_eq!(record.phase(), ChannelPhase::Closed);
}

#[test]
fn cooperative_close_with_zero_share() {
    let mut f = Fixture::new();
    f.open(1000);

    let sig_a = sign(&f.alice, ID, 1000, 0);
    let sig_b = sign(&f.bob, ID, 1000, 0);
    f.close((1000, 0), sig_a, sig_b).unwrap();

    assert_eq!(f.balance_of(f.a()), amt(START_BALANCE));
    assert_eq!(f.balance_of(f.b()), amt(START_BALANCE));
    assert!(!f.info().is_open);
}

#[test]
fn cooperative_close_requires_signatures_over_exact_split() {
    let mut f = Fixture::new();
    f.open(1000);
    let before = f.info();

    // Alice agreed to 600/400, Bob to 500/500.
    let sig_a = sign(&f.alice, ID, 600, 400);
    let sig_b = sign(&f.bob, ID, 500, 500);
    assert_eq!(
        f.close((500, 500), sig_a, sig_b),
        Err(ChannelError::InvalidSignature)
    );
    assert_eq!(
        f.close((600, 400), sig_a, sig_b),
        Err(ChannelError::InvalidSignature)
    );

    // Signatures over the right split but in the wrong slots.
    let sig_a = sign(&f.alice, ID, 600, 400);
    let sig_b = sign(&f.bob, ID, 600, 400);
    assert_eq!(
        f.close((600, 400), sig_b, sig_a),
        Err(ChannelError::InvalidSignature)
    );

    // Signed for another channel id.
    let sig_a = sign(&f.alice, &[0xAB], 600, 400);
    let sig_b = sign(&f.bob, &[0xAB], 600, 400);
    assert_eq!(
        f.close((600, 400), sig_a, sig_b),
        Err(ChannelError::InvalidSignature)
    );

    assert_eq!(f.info(), before);
    assert_eq!(f.engine.custody_balance(), amt(1000));
}

#[test]
fn cooperative_close_rejects_split_not_matching_total() {
    let mut f = Fixture::new();
    f.open(1000);
    let before = f.info();

    let sig_a = sign(&f.alice, ID, 600, 300);
    let sig_b = sign(&f.bob, ID, 600, 300);
    assert_eq!(
        f.close((600, 300), sig_a, sig_b),
        Err(ChannelError::InsufficientFunds)
    );

    let sig_a = sign(&f.alice, ID, 600, 500);
    let sig_b = sign(&f.bob, ID, 600, 500);
    assert_eq!(
        f.close((600, 500), sig_a, sig_b),
        Err(ChannelError::InsufficientFunds)
    );

    assert_eq!(f.info(), before);
    assert_eq!(f.balance_of(f.b()), amt(START_BALANCE));
}

#[test]
fn cooperative_close_rejects_malformed_signatures() {
    let mut f = Fixture::new();
    f.open(1000);
    let (ctx, b) = (f.alice_at(5), f.b());
    let sig = sign(&f.alice, ID, 600, 400);

    assert_eq!(
        f.engine
            .close_channel_cooperative(ctx, ID, b, amt(600), amt(400), &sig.0[..64], &sig.0),
        Err(ChannelError::InvalidInput(InvalidInputReason::SignatureLength(64)))
    );
    assert_eq!(
        f.engine
            .close_channel_cooperative(ctx, ID, b, amt(600), amt(400), &sig.0, &[0u8; 65]),
        Err(ChannelError::InvalidSignature)
    );
    assert!(f.info().is_open);
}

#[test]
fn unilateral_close_waits_for_dispute_window() {
    let mut f = Fixture::new();
    f.open(1000);

    let sig = sign(&f.alice, ID, 700, 300);
    f.initiate(100, (700, 300), sig).unwrap();

    let record = f.info();
    assert_eq!(record.dispute_deadline, 1108);
    assert_eq!(record.balance_a, amt(700));
    assert_eq!(record.balance_b, amt(300));
    assert_eq!(record.total_deposited, amt(1000));
    assert!(record.is_open);
    assert_eq!(record.phase(), ChannelPhase::Disputed { deadline: 1108 });

    assert_eq!(f.resolve(100), Err(ChannelError::DisputePeriod));
    assert_eq!(f.resolve(1107), Err(ChannelError::DisputePeriod));
    assert_eq!(f.info(), record);

    f.resolve(1108).unwrap();
    assert_eq!(f.balance_of(f.a()), amt(START_BALANCE - 1000 + 700));
    assert_eq!(f.balance_of(f.b()), amt(START_BALANCE + 300));
    let record = f.info();
    assert!(!record.is_open);
    assert!(record.total_deposited.is_zero());
    assert!(f.engine.custody_balance().is_zero());
}

#[test]
fn unilateral_close_resolves_after_deadline() {
    let mut f = Fixture::new();
    f.open(1000);

    let sig = sign(&f.alice, ID, 1000, 0);
    f.initiate(10, (1000, 0), sig).unwrap();
    f.resolve(5000).unwrap();
    assert_eq!(f.balance_of(f.a()), amt(START_BALANCE));
}

#[test]
fn unilateral_close_requires_callers_signature_and_conservation() {
    let mut f = Fixture::new();
    f.open(1000);

    let bobs = sign(&f.bob, ID, 700, 300);
    assert_eq!(
        f.initiate(10, (700, 300), bobs),
        Err(ChannelError::InvalidSignature)
    );

    let stale = sign(&f.alice, ID, 800, 200);
    assert_eq!(
        f.initiate(10, (700, 300), stale),
        Err(ChannelError::InvalidSignature)
    );

    let short = sign(&f.alice, ID, 700, 200);
    assert_eq!(
        f.initiate(10, (700, 200), short),
        Err(ChannelError::InsufficientFunds)
    );

    assert_eq!(f.info().phase(), ChannelPhase::Open);
}

#[test]
fn repeated_unilateral_proposal_restarts_window() {
    let mut f = Fixture::new();
    f.open(1000);

    let first = sign(&f.alice, ID, 700, 300);
    f.initiate(10, (700, 300), first).unwrap();
    let second = sign(&f.alice, ID, 900, 100);
    f.initiate(500, (900, 100), second).unwrap();

    let record = f.info();
    assert_eq!(record.dispute_deadline, 1508);
    assert_eq!(record.balance_a, amt(900));
    assert_eq!(f.resolve(1018), Err(ChannelError::DisputePeriod));
    f.resolve(1508).unwrap();
    assert_eq!(f.balance_of(f.b()), amt(START_BALANCE + 100));
}

#[test]
fn cooperative_close_supersedes_pending_dispute() {
    let mut f = Fixture::new();
    f.open(1000);

    let self_favoring = sign(&f.alice, ID, 1000, 0);
    f.initiate(10, (1000, 0), self_favoring).unwrap();

    let sig_a = sign(&f.alice, ID, 500, 500);
    let sig_b = sign(&f.bob, ID, 500, 500);
    f.close((500, 500), sig_a, sig_b).unwrap();

    assert_eq!(f.balance_of(f.b()), amt(START_BALANCE + 500));
    assert_eq!(f.resolve(2000), Err(ChannelError::ChannelNotFound));
}

#[test]
fn resolve_without_pending_dispute_fails() {
    let mut f = Fixture::new();
    f.open(1000);
    assert_eq!(f.resolve(10_000), Err(ChannelError::DisputePeriod));
    assert!(f.info().is_open);
    assert_eq!(f.engine.custody_balance(), amt(1000));
}

#[test]
fn resolve_unknown_channel() {
    let mut f = Fixture::new();
    assert_eq!(f.resolve(10), Err(ChannelError::ChannelNotFound));
}

#[test]
fn closed_channel_is_terminal() {
    let mut f = Fixture::new();
    f.open(1000);
    let sig_a = sign(&f.alice, ID, 600, 400);
    let sig_b = sign(&f.bob, ID, 600, 400);
    f.close((600, 400), sig_a, sig_b).unwrap();
    let closed = f.info();

    let (ctx, b) = (f.alice_at(6), f.b());
    assert_eq!(
        f.engine.fund_channel(ctx, ID, b, amt(10)),
        Err(ChannelError::ChannelClosed)
    );
    assert_eq!(
        f.close((600, 400), sig_a, sig_b),
        Err(ChannelError::ChannelClosed)
    );
    let sig = sign(&f.alice, ID, 0, 0);
    assert_eq!(
        f.initiate(7, (0, 0), sig),
        Err(ChannelError::ChannelClosed)
    );
    assert_eq!(f.resolve(5000), Err(ChannelError::ChannelNotFound));
    assert_eq!(
        f.engine.create_channel(ctx, ID, b, amt(10)),
        Err(ChannelError::ChannelExists)
    );

    assert_eq!(f.info(), closed);
    assert!(closed.is_conserved());
}

#[test]
fn self_dealing_rejected_everywhere() {
    let mut f = Fixture::new();
    f.open(1000);
    let (ctx, a) = (f.alice_at(5), f.a());
    let sig = sign(&f.alice, ID, 1000, 0);
    let self_dealing = Err(ChannelError::InvalidInput(InvalidInputReason::SelfDealing));

    assert_eq!(f.engine.fund_channel(ctx, ID, a, amt(1)), self_dealing);
    assert_eq!(
        f.engine
            .close_channel_cooperative(ctx, ID, a, amt(1000), amt(0), &sig.0, &sig.0),
        self_dealing
    );
    assert_eq!(
        f.engine
            .initiate_unilateral_close(ctx, ID, a, amt(1000), amt(0), &sig.0),
        self_dealing
    );
    assert_eq!(f.engine.resolve_unilateral_close(ctx, ID, a), self_dealing);
}

#[test]
fn custom_dispute_window() {
    let config = Config::new(OWNER).with_dispute_window(6).unwrap();
    let mut f = Fixture::with_config(config);
    f.open(1000);

    let sig = sign(&f.alice, ID, 400, 600);
    f.initiate(20, (400, 600), sig).unwrap();
    assert_eq!(f.info().dispute_deadline, 26);
    assert_eq!(f.resolve(25), Err(ChannelError::DisputePeriod));
    f.resolve(26).unwrap();
}

#[test]
fn deadline_overflow_is_rejected() {
    let mut f = Fixture::new();
    f.open(1000);
    let sig = sign(&f.alice, ID, 700, 300);
    assert_eq!(
        f.initiate(u64::MAX - 10, (700, 300), sig),
        Err(ChannelError::InvalidInput(InvalidInputReason::Overflow))
    );
    assert_eq!(f.info().phase(), ChannelPhase::Open);
}

#[test]
fn emergency_withdraw_is_owner_only() {
    let mut f = Fixture::new();
    f.open(1000);

    assert_eq!(
        f.engine.emergency_withdraw(f.alice_at(9)),
        Err(ChannelError::NotAuthorized)
    );
    assert_eq!(f.engine.custody_balance(), amt(1000));

    let swept = f
        .engine
        .emergency_withdraw(CallContext::new(OWNER, 9))
        .unwrap();
    assert_eq!(swept, amt(1000));
    assert_eq!(f.balance_of(OWNER), amt(1000));
    assert!(f.engine.custody_balance().is_zero());

    // Records are untouched, the channel is now uncollateralized.
    let record = f.info();
    assert!(record.is_open);
    assert_eq!(record.total_deposited, amt(1000));
}

#[test]
fn failed_payout_leaves_channel_open() {
    let mut f = Fixture::new();
    f.open(1000);
    f.engine
        .emergency_withdraw(CallContext::new(OWNER, 9))
        .unwrap();
    let before = f.info();

    let sig_a = sign(&f.alice, ID, 600, 400);
    let sig_b = sign(&f.bob, ID, 600, 400);
    assert!(matches!(
        f.close((600, 400), sig_a, sig_b),
        Err(ChannelError::Transfer(TransferError::InsufficientBalance { .. }))
    ));
    assert_eq!(f.info(), before);
    assert_eq!(f.balance_of(f.b()), amt(START_BALANCE));
}

#[test]
fn conservation_holds_through_lifecycle() {
    let mut f = Fixture::new();
    f.open(1000);
    f.assert_all_conserved();

    let (a, b) = (f.a(), f.b());
    f.engine.fund_channel(f.alice_at(2), ID, b, amt(500)).unwrap();
    f.engine
        .create_channel(f.bob_at(2), ID, a, amt(300))
        .unwrap();
    f.assert_all_conserved();

    let sig = sign(&f.alice, ID, 1200, 300);
    f.initiate(3, (1200, 300), sig).unwrap();
    f.assert_all_conserved();

    let sig_a = sign(&f.bob, ID, 100, 200);
    let sig_b = sign(&f.alice, ID, 100, 200);
    f.engine
        .close_channel_cooperative(f.bob_at(4), ID, a, amt(100), amt(200), &sig_a.0, &sig_b.0)
        .unwrap();
    f.assert_all_conserved();

    f.resolve(3 + 1008).unwrap();
    f.assert_all_conserved();
    assert!(f.engine.custody_balance().is_zero());
    assert_eq!(
        f.balance_of(a) + f.balance_of(b),
        amt(2 * START_BALANCE)
    );
}

// The record carries a nonce that no operation checks or increments, and the
// settlement message binds only the channel id and the split. Signatures from
// a settled channel therefore still verify for a channel with the same id and
// the roles swapped.
#[test]
fn settlement_signatures_replay_across_role_swapped_channels() {
    let mut f = Fixture::new();
    f.open(1000);
    let alice_sig = sign(&f.alice, ID, 600, 400);
    let bob_sig = sign(&f.bob, ID, 600, 400);
    f.close((600, 400), alice_sig, bob_sig).unwrap();

    let (a, b) = (f.a(), f.b());
    f.engine
        .create_channel(f.bob_at(10), ID, a, amt(1000))
        .unwrap();
    f.engine
        .close_channel_cooperative(
            f.bob_at(11),
            ID,
            a,
            amt(600),
            amt(400),
            &bob_sig.0,
            &alice_sig.0,
        )
        .unwrap();

    assert_eq!(f.engine.get_channel_info(ID, b, a).unwrap().nonce, 0);
    assert_eq!(f.info().nonce, 0);
}

struct RejectAll;

impl Verifier for RejectAll {
    fn verify(&self, _msg: Hash, _sig: &Signature, _signer: Address) -> bool {
        false
    }
}

#[test]
fn verifier_is_pluggable() {
    let mut rng = StdRng::seed_from_u64(0);
    let alice = Signer::new(&mut rng);
    let bob = Signer::new(&mut rng);
    let mut escrow = MemoryEscrow::new();
    escrow.mint(alice.address(), amt(1000)).unwrap();

    let mut engine = ChannelEngine::with_verifier(Config::new(OWNER), escrow, RejectAll);
    let ctx = CallContext::new(alice.address(), 1);
    engine
        .create_channel(ctx, ID, bob.address(), amt(1000))
        .unwrap();

    let sig_a = sign(&alice, ID, 600, 400);
    let sig_b = sign(&bob, ID, 600, 400);
    assert_eq!(
        engine.close_channel_cooperative(
            ctx,
            ID,
            bob.address(),
            amt(600),
            amt(400),
            &sig_a.0,
            &sig_b.0
        ),
        Err(ChannelError::InvalidSignature)
    );
    assert_eq!(engine.escrow().custody_balance(), amt(1000));
}

#[test]
fn error_codes_are_distinct() {
    let errors = [
        ChannelError::NotAuthorized,
        ChannelError::ChannelExists,
        ChannelError::ChannelNotFound,
        ChannelError::InsufficientFunds,
        ChannelError::InvalidSignature,
        ChannelError::ChannelClosed,
        ChannelError::DisputePeriod,
        ChannelError::InvalidInput(InvalidInputReason::ZeroAmount),
        ChannelError::Transfer(TransferError::ZeroAmount),
    ];
    let mut codes: Vec<u32> = errors.iter().map(ChannelError::code).collect();
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), errors.len());
}
