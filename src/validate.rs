//! Shape checks run before an operation touches any state.
//!
//! The predicates mirror the ledger's input rules; the `parse_*` helpers turn
//! raw caller input into the typed values the engine works with and report
//! which rule was violated.

use crate::{
    channel::{ChannelError, InvalidInputReason},
    types::{Address, ChannelId, Signature, U256, MAX_CHANNEL_ID_LEN},
};

/// Length of an authorization proof: `r || s || v`.
pub const SIGNATURE_LEN: usize = 65;

pub fn valid_channel_id(id: &[u8]) -> bool {
    (1..=MAX_CHANNEL_ID_LEN).contains(&id.len())
}

pub fn valid_deposit(amount: U256) -> bool {
    !amount.is_zero()
}

pub fn valid_signature(sig: &[u8]) -> bool {
    sig.len() == SIGNATURE_LEN
}

pub fn parse_channel_id(id: &[u8]) -> Result<ChannelId, ChannelError> {
    ChannelId::try_from(id)
        .map_err(|e| ChannelError::InvalidInput(InvalidInputReason::ChannelIdLength(e.0)))
}

pub fn parse_deposit(amount: U256) -> Result<U256, ChannelError> {
    if valid_deposit(amount) {
        Ok(amount)
    } else {
        Err(ChannelError::InvalidInput(InvalidInputReason::ZeroAmount))
    }
}

pub fn parse_signature(sig: &[u8]) -> Result<Signature, ChannelError> {
    let bytes: [u8; SIGNATURE_LEN] = sig
        .try_into()
        .map_err(|_| ChannelError::InvalidInput(InvalidInputReason::SignatureLength(sig.len())))?;
    Ok(Signature(bytes))
}

/// A participant may not open or settle a channel with themselves.
pub fn distinct_participants(caller: Address, participant_b: Address) -> Result<(), ChannelError> {
    if caller == participant_b {
        Err(ChannelError::InvalidInput(InvalidInputReason::SelfDealing))
    } else {
        Ok(())
    }
}
