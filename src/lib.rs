//! Two-party payment channels with cooperative and time-locked unilateral
//! settlement.
//!
//! The [ChannelEngine] holds the channel ledger and drives every state
//! transition. Funds live with an [EscrowGateway](escrow::EscrowGateway);
//! settlements are authorized by recoverable secp256k1 signatures produced
//! with [sig::Signer] over [settlement_hash](channel::settlement_hash).

pub mod channel;
pub mod config;
pub mod encoding;
pub mod escrow;
pub mod sig;
pub mod types;
pub mod validate;

pub use channel::{CallContext, ChannelEngine, ChannelError};
pub use config::Config;
pub use types::{Address, ChannelId, Hash, Signature, U256};
