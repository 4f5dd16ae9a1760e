use thiserror::Error;

use crate::escrow::TransferError;

/// Why an input was rejected before any state was read.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidInputReason {
    #[error("channel id must be 1 to 32 bytes, got {0}")]
    ChannelIdLength(usize),
    #[error("amount must be greater than zero")]
    ZeroAmount,
    #[error("signature must be 65 bytes, got {0}")]
    SignatureLength(usize),
    #[error("caller and counterparty must differ")]
    SelfDealing,
    #[error("amount overflows the channel total")]
    Overflow,
}

/// Outcome of a rejected channel operation.
///
/// Every variant means the operation had no effect: no record changed and no
/// funds moved.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelError {
    #[error("caller is not authorized")]
    NotAuthorized,
    #[error("channel already exists")]
    ChannelExists,
    #[error("channel not found")]
    ChannelNotFound,
    #[error("settlement does not match the channel's total deposit")]
    InsufficientFunds,
    #[error("invalid signature")]
    InvalidSignature,
    #[error("channel is closed")]
    ChannelClosed,
    #[error("dispute period has not elapsed")]
    DisputePeriod,
    #[error("invalid input: {0}")]
    InvalidInput(InvalidInputReason),
    #[error("escrow transfer failed: {0}")]
    Transfer(#[from] TransferError),
}

impl ChannelError {
    /// Stable numeric code, as reported by the hosting ledger.
    pub fn code(&self) -> u32 {
        match self {
            ChannelError::NotAuthorized => 100,
            ChannelError::ChannelExists => 101,
            ChannelError::ChannelNotFound => 102,
            ChannelError::InsufficientFunds => 103,
            ChannelError::InvalidSignature => 104,
            ChannelError::ChannelClosed => 105,
            ChannelError::DisputePeriod => 106,
            ChannelError::InvalidInput(_) => 107,
            ChannelError::Transfer(_) => 108,
        }
    }
}

impl From<InvalidInputReason> for ChannelError {
    fn from(reason: InvalidInputReason) -> Self {
        Self::InvalidInput(reason)
    }
}
