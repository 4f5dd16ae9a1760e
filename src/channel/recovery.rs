//! Last-resort escape hatch for the deploying authority.

use tracing::warn;

use super::{CallContext, ChannelEngine, ChannelError};
use crate::{escrow::EscrowGateway, sig::Verifier, types::U256};

impl<E: EscrowGateway, V: Verifier> ChannelEngine<E, V> {
    /// Sweep all funds in custody to the owner.
    ///
    /// Ignores per-channel accounting: channel records are left as they are,
    /// so open channels may end up without the funds backing their balances.
    /// Returns the amount swept.
    pub fn emergency_withdraw(&mut self, ctx: CallContext) -> Result<U256, ChannelError> {
        let owner = self.config.owner();
        if ctx.caller != owner {
            return Err(ChannelError::NotAuthorized);
        }

        let amount = self.escrow.sweep(owner)?;
        let open_channels = self.ledger.iter().filter(|(_, r)| r.is_open).count();
        warn!(
            %amount,
            open_channels,
            height = ctx.height,
            "emergency withdrawal swept custody"
        );
        Ok(amount)
    }
}
