//! Walkthrough: Alice opens a channel to Bob, pays him off-chain a few times
//! and both settle cooperatively on the engine.
//!
//! Alice and Bob run as separate tokio tasks. The off-chain relay between them
//! is a pair of mpsc channels, the ledger is a shared [ChannelEngine] backed by
//! an in-memory escrow.

use std::sync::Arc;

use paychan::{
    channel::settlement_hash,
    escrow::MemoryEscrow,
    sig::{EcdsaVerifier, Signer, Verifier},
    Address, CallContext, ChannelEngine, ChannelId, Config, Signature, U256,
};
use tokio::sync::{mpsc, Mutex};

const CHANNEL_ID: &[u8] = b"alice-bob-1";
const DEPOSIT: u64 = 100;
const PAYMENTS: [u64; 3] = [10, 25, 5];

type Engine = Arc<Mutex<ChannelEngine<MemoryEscrow>>>;

/// Off-chain messages between the two parties.
#[derive(Debug)]
enum Message {
    /// Alice proposes a new split and signs it.
    Update {
        balance_a: U256,
        balance_b: U256,
        sig: Signature,
    },
    /// Bob countersigns the last split.
    Accepted { sig: Signature },
    Done,
}

fn sign_split(signer: &Signer, balance_a: U256, balance_b: U256) -> Signature {
    let id = ChannelId::try_from(CHANNEL_ID).expect("static id is valid");
    let hash = settlement_hash(id, balance_a, balance_b).expect("settlement is encodable");
    signer.sign_eth(hash).expect("signing never fails for a valid key")
}

async fn alice(
    signer: Signer,
    bob: Address,
    engine: Engine,
    tx: mpsc::Sender<Message>,
    mut rx: mpsc::Receiver<Message>,
) {
    let me = signer.address();
    engine
        .lock()
        .await
        .create_channel(CallContext::new(me, 1), CHANNEL_ID, bob, U256::from(DEPOSIT))
        .unwrap();
    println!("Alice: opened channel with {DEPOSIT}");

    let mut balance_a = U256::from(DEPOSIT);
    let mut balance_b = U256::zero();
    let mut last = None;
    for payment in PAYMENTS {
        balance_a -= U256::from(payment);
        balance_b += U256::from(payment);
        let sig = sign_split(&signer, balance_a, balance_b);
        tx.send(Message::Update {
            balance_a,
            balance_b,
            sig,
        })
        .await
        .unwrap();

        match rx.recv().await {
            Some(Message::Accepted { sig: bob_sig }) => {
                println!("Alice: Bob accepted {balance_a}/{balance_b}");
                last = Some((balance_a, balance_b, sig, bob_sig));
            }
            other => panic!("Unexpected message: {:?}", other),
        }
    }
    tx.send(Message::Done).await.unwrap();

    let (balance_a, balance_b, sig_a, sig_b) = last.expect("at least one payment");
    engine
        .lock()
        .await
        .close_channel_cooperative(
            CallContext::new(me, 2),
            CHANNEL_ID,
            bob,
            balance_a,
            balance_b,
            &sig_a.0,
            &sig_b.0,
        )
        .unwrap();
    println!("Alice: channel closed cooperatively");
}

async fn bob(
    signer: Signer,
    alice: Address,
    tx: mpsc::Sender<Message>,
    mut rx: mpsc::Receiver<Message>,
) {
    let id = ChannelId::try_from(CHANNEL_ID).expect("static id is valid");
    while let Some(msg) = rx.recv().await {
        match msg {
            Message::Update {
                balance_a,
                balance_b,
                sig,
            } => {
                // A real wallet would also check the split against its own
                // view of the channel before countersigning.
                let hash = settlement_hash(id, balance_a, balance_b).unwrap();
                if !EcdsaVerifier.verify(hash, &sig, alice) {
                    println!("Bob: rejecting update with invalid signature");
                    break;
                }
                let sig = sign_split(&signer, balance_a, balance_b);
                tx.send(Message::Accepted { sig }).await.unwrap();
            }
            Message::Done => break,
            other => panic!("Unexpected message: {:?}", other),
        }
    }
    println!("Bob done");
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "paychan=debug".into()),
        )
        .init();

    // Do not use that on any real device, this is just for the demo.
    let alice_signer = Signer::new(&mut rand::thread_rng());
    let bob_signer = Signer::new(&mut rand::thread_rng());
    let (alice_addr, bob_addr) = (alice_signer.address(), bob_signer.address());

    let mut escrow = MemoryEscrow::new();
    escrow.mint(alice_addr, U256::from(1_000u64)).unwrap();
    let owner: Address = rand::random();
    let engine: Engine = Arc::new(Mutex::new(ChannelEngine::new(Config::new(owner), escrow)));

    let (to_bob, bob_rx) = mpsc::channel(8);
    let (to_alice, alice_rx) = mpsc::channel(8);

    let a_handle = tokio::spawn(alice(
        alice_signer,
        bob_addr,
        engine.clone(),
        to_bob,
        alice_rx,
    ));
    let b_handle = tokio::spawn(bob(bob_signer, alice_addr, to_alice, bob_rx));

    a_handle.await.unwrap();
    b_handle.await.unwrap();

    let engine = engine.lock().await;
    println!(
        "Final balances: Alice {}, Bob {}",
        engine.escrow().balance_of(alice_addr),
        engine.escrow().balance_of(bob_addr)
    );
    println!(
        "Channel record: {:#?}",
        engine.get_channel_info(CHANNEL_ID, alice_addr, bob_addr)
    );
}
