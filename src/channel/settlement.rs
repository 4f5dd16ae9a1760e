//! The message both parties sign to agree on a final split.

use serde::Serialize;
use sha3::{Digest, Keccak256};

use crate::{
    encoding,
    types::{ChannelId, Hash, U256},
};

/// A balance hashed down to a fixed-width digest, so the variable-length
/// channel id is the only field without a fixed width in the message.
#[derive(Serialize, Debug, Clone, Copy)]
#[serde(transparent)]
struct BalanceDigest(Hash);

impl From<U256> for BalanceDigest {
    fn from(balance: U256) -> Self {
        Self(Hash(Keccak256::digest(balance.to_be_bytes32()).into()))
    }
}

#[derive(Serialize, Debug, Clone, Copy)]
struct Settlement {
    channel_id: ChannelId,
    balance_a: BalanceDigest,
    balance_b: BalanceDigest,
}

/// Hash of `channel_id || keccak(balance_a) || keccak(balance_b)`.
///
/// Wallets sign this with [Signer::sign_eth](crate::sig::Signer::sign_eth);
/// the engine recomputes it from the call arguments and checks both
/// signatures against it.
pub fn settlement_hash(
    channel_id: ChannelId,
    balance_a: U256,
    balance_b: U256,
) -> Result<Hash, encoding::Error> {
    encoding::to_hash(&Settlement {
        channel_id,
        balance_a: balance_a.into(),
        balance_b: balance_b.into(),
    })
}
