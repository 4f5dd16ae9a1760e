//! Handles the creation and verification of (Ethereum style) signatures.
//!
//! The engine never trusts a caller's claim that a counterparty agreed to a
//! settlement. It recovers the signer from the 65 byte recoverable signature
//! and compares it with the participant's address.

use crate::types::{Address, Hash, Signature};
use sha3::{Digest, Keccak256};

mod k256;
pub use self::k256::{recover_signer, Error, Signer};


/// Add the `\x19Ethereum Signed Message\n<length>` prefix to hash.
///
/// Wallets apply this prefix before signing arbitrary data, so a settlement
/// signature can never double as a transaction signature.
fn hash_to_eth_signed_msg_hash(hash: Hash) -> Hash {
    // Packed encoding => We can't use the serializer
    let mut hasher = Keccak256::new();
    hasher.update(b"\x19Ethereum Signed Message:\n32");
    hasher.update(hash.0);
    Hash(hasher.finalize().into())
}

/// Decides whether a signature authorizes `signer`'s consent to `msg`.
///
/// Implementations must bind to the exact message: a signature over one
/// settlement hash must not verify for any other.
pub trait Verifier {
    fn verify(&self, msg: Hash, sig: &Signature, signer: Address) -> bool;
}

/// Verifies recoverable secp256k1 signatures by recovering the signing
/// address and comparing it with the claimed signer.
#[derive(Debug, Default, Clone, Copy)]
pub struct EcdsaVerifier;

impl Verifier for EcdsaVerifier {
    fn verify(&self, msg: Hash, sig: &Signature, signer: Address) -> bool {
        match recover_signer(msg, *sig) {
            Ok(recovered) => recovered == signer,
            Err(_) => false,
        }
    }
}
