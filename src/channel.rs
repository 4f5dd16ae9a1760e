//! Two-party escrow channels settled on the hosting ledger.
//!
//! Party A opens a channel to party B and locks funds in custody. Off-chain
//! the parties exchange signed balance splits. On-chain the channel ends
//! either cooperatively, with both signatures over the final split, or
//! unilaterally: A posts a split signed by A alone, which only becomes
//! payable after the dispute window.

mod engine;
mod error;
mod ledger;
mod record;
mod recovery;
mod settlement;

pub use engine::{CallContext, ChannelEngine};
pub use error::{ChannelError, InvalidInputReason};
pub use ledger::ChannelLedger;
pub use record::{ChannelKey, ChannelPhase, ChannelRecord};
pub use settlement::settlement_hash;

#[cfg(test)]
mod tests;
