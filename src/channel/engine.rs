//! Channel lifecycle: create, fund, cooperative close and the two halves of
//! a unilateral close.
//!
//! Every public operation checks all of its preconditions before it moves
//! funds or writes the ledger, in the order: input shape, channel existence
//! and state, signatures, fund conservation. A rejected operation has no
//! effect. Transfers run before the ledger write, so a failed transfer also
//! leaves the record untouched.

use tracing::{debug, info};

use super::{
    settlement_hash, ChannelError, ChannelKey, ChannelLedger, ChannelRecord, InvalidInputReason,
};
use crate::{
    config::Config,
    escrow::{EscrowGateway, Payout},
    sig::{EcdsaVerifier, Verifier},
    types::{Address, ChannelId, Hash, Signature, U256},
    validate,
};

/// Who is calling and at which block height, as supplied by the hosting
/// ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallContext {
    pub caller: Address,
    pub height: u64,
}

impl CallContext {
    pub fn new(caller: Address, height: u64) -> Self {
        Self { caller, height }
    }
}

/// Owns the channel ledger and is the only party allowed to move funds out of
/// custody.
#[derive(Debug)]
pub struct ChannelEngine<E: EscrowGateway, V: Verifier = EcdsaVerifier> {
    pub(super) config: Config,
    pub(super) ledger: ChannelLedger,
    pub(super) escrow: E,
    verifier: V,
}

impl<E: EscrowGateway> ChannelEngine<E> {
    pub fn new(config: Config, escrow: E) -> Self {
        Self::with_verifier(config, escrow, EcdsaVerifier)
    }
}

impl<E: EscrowGateway, V: Verifier> ChannelEngine<E, V> {
    pub fn with_verifier(config: Config, escrow: E, verifier: V) -> Self {
        Self {
            config,
            ledger: ChannelLedger::new(),
            escrow,
            verifier,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn ledger(&self) -> &ChannelLedger {
        &self.ledger
    }

    pub fn escrow(&self) -> &E {
        &self.escrow
    }

    pub fn custody_balance(&self) -> U256 {
        self.escrow.custody_balance()
    }

    /// Open a channel from the caller to `participant_b`, locking
    /// `initial_deposit` on the caller's side.
    pub fn create_channel(
        &mut self,
        ctx: CallContext,
        channel_id: &[u8],
        participant_b: Address,
        initial_deposit: U256,
    ) -> Result<(), ChannelError> {
        self.try_create_channel(ctx, channel_id, participant_b, initial_deposit)
            .map_err(|e| rejected("create-channel", &ctx, e))
    }

    fn try_create_channel(
        &mut self,
        ctx: CallContext,
        channel_id: &[u8],
        participant_b: Address,
        initial_deposit: U256,
    ) -> Result<(), ChannelError> {
        let key = channel_key(&ctx, channel_id, participant_b)?;
        let deposit = validate::parse_deposit(initial_deposit)?;

        if self.ledger.contains(&key) {
            return Err(ChannelError::ChannelExists);
        }

        self.escrow.deposit(ctx.caller, deposit)?;
        self.ledger.insert_new(key, ChannelRecord::opened(deposit))?;

        info!(
            channel = ?key.channel_id,
            participant_a = ?key.participant_a,
            participant_b = ?key.participant_b,
            %deposit,
            "channel created"
        );
        Ok(())
    }

    /// Lock more funds in an open channel. Funding always goes to the
    /// caller's (participant A's) side.
    pub fn fund_channel(
        &mut self,
        ctx: CallContext,
        channel_id: &[u8],
        participant_b: Address,
        additional_funds: U256,
    ) -> Result<(), ChannelError> {
        self.try_fund_channel(ctx, channel_id, participant_b, additional_funds)
            .map_err(|e| rejected("fund-channel", &ctx, e))
    }

    fn try_fund_channel(
        &mut self,
        ctx: CallContext,
        channel_id: &[u8],
        participant_b: Address,
        additional_funds: U256,
    ) -> Result<(), ChannelError> {
        let key = channel_key(&ctx, channel_id, participant_b)?;
        let amount = validate::parse_deposit(additional_funds)?;

        let mut record = *self.ledger.open_record(&key)?;
        record.total_deposited = record
            .total_deposited
            .checked_add(amount)
            .ok_or(InvalidInputReason::Overflow)?;
        record.balance_a = record
            .balance_a
            .checked_add(amount)
            .ok_or(InvalidInputReason::Overflow)?;

        self.escrow.deposit(ctx.caller, amount)?;
        self.ledger.commit(key, record);

        info!(
            channel = ?key.channel_id,
            %amount,
            total = %record.total_deposited,
            "channel funded"
        );
        Ok(())
    }

    /// Settle immediately on a split both parties signed.
    #[allow(clippy::too_many_arguments)]
    pub fn close_channel_cooperative(
        &mut self,
        ctx: CallContext,
        channel_id: &[u8],
        participant_b: Address,
        balance_a: U256,
        balance_b: U256,
        signature_a: &[u8],
        signature_b: &[u8],
    ) -> Result<(), ChannelError> {
        self.try_close_channel_cooperative(
            ctx,
            channel_id,
            participant_b,
            balance_a,
            balance_b,
            signature_a,
            signature_b,
        )
        .map_err(|e| rejected("close-channel-cooperative", &ctx, e))
    }

    #[allow(clippy::too_many_arguments)]
    fn try_close_channel_cooperative(
        &mut self,
        ctx: CallContext,
        channel_id: &[u8],
        participant_b: Address,
        balance_a: U256,
        balance_b: U256,
        signature_a: &[u8],
        signature_b: &[u8],
    ) -> Result<(), ChannelError> {
        let key = channel_key(&ctx, channel_id, participant_b)?;
        let sig_a = validate::parse_signature(signature_a)?;
        let sig_b = validate::parse_signature(signature_b)?;

        let mut record = *self.ledger.open_record(&key)?;

        let msg = message(key.channel_id, balance_a, balance_b)?;
        self.authorize(msg, &sig_a, key.participant_a)?;
        self.authorize(msg, &sig_b, key.participant_b)?;
        conserves(&record, balance_a, balance_b)?;

        self.pay_out(&key, balance_a, balance_b)?;
        record.close();
        self.ledger.commit(key, record);

        info!(
            channel = ?key.channel_id,
            %balance_a,
            %balance_b,
            "channel closed cooperatively"
        );
        Ok(())
    }

    /// Propose a final split signed by the caller alone. It can be resolved
    /// once the dispute window has passed. Proposing again while a dispute is
    /// pending replaces the proposal and restarts the window.
    pub fn initiate_unilateral_close(
        &mut self,
        ctx: CallContext,
        channel_id: &[u8],
        participant_b: Address,
        proposed_balance_a: U256,
        proposed_balance_b: U256,
        signature: &[u8],
    ) -> Result<(), ChannelError> {
        self.try_initiate_unilateral_close(
            ctx,
            channel_id,
            participant_b,
            proposed_balance_a,
            proposed_balance_b,
            signature,
        )
        .map_err(|e| rejected("initiate-unilateral-close", &ctx, e))
    }

    fn try_initiate_unilateral_close(
        &mut self,
        ctx: CallContext,
        channel_id: &[u8],
        participant_b: Address,
        proposed_balance_a: U256,
        proposed_balance_b: U256,
        signature: &[u8],
    ) -> Result<(), ChannelError> {
        let key = channel_key(&ctx, channel_id, participant_b)?;
        let sig = validate::parse_signature(signature)?;

        let mut record = *self.ledger.open_record(&key)?;

        let msg = message(key.channel_id, proposed_balance_a, proposed_balance_b)?;
        self.authorize(msg, &sig, key.participant_a)?;
        conserves(&record, proposed_balance_a, proposed_balance_b)?;

        let deadline = ctx
            .height
            .checked_add(self.config.dispute_window())
            .ok_or(InvalidInputReason::Overflow)?;
        record.dispute_deadline = deadline;
        record.balance_a = proposed_balance_a;
        record.balance_b = proposed_balance_b;
        self.ledger.commit(key, record);

        info!(
            channel = ?key.channel_id,
            balance_a = %proposed_balance_a,
            balance_b = %proposed_balance_b,
            deadline,
            "unilateral close initiated"
        );
        Ok(())
    }

    /// Pay out the pending unilateral proposal once its window has passed.
    pub fn resolve_unilateral_close(
        &mut self,
        ctx: CallContext,
        channel_id: &[u8],
        participant_b: Address,
    ) -> Result<(), ChannelError> {
        self.try_resolve_unilateral_close(ctx, channel_id, participant_b)
            .map_err(|e| rejected("resolve-unilateral-close", &ctx, e))
    }

    fn try_resolve_unilateral_close(
        &mut self,
        ctx: CallContext,
        channel_id: &[u8],
        participant_b: Address,
    ) -> Result<(), ChannelError> {
        let key = channel_key(&ctx, channel_id, participant_b)?;

        // A closed channel has nothing left to resolve.
        let mut record = match self.ledger.get(&key) {
            Some(record) if record.is_open => *record,
            _ => return Err(ChannelError::ChannelNotFound),
        };

        if record.dispute_deadline == 0 || ctx.height < record.dispute_deadline {
            return Err(ChannelError::DisputePeriod);
        }

        let (balance_a, balance_b) = (record.balance_a, record.balance_b);
        self.pay_out(&key, balance_a, balance_b)?;
        record.close();
        self.ledger.commit(key, record);

        info!(
            channel = ?key.channel_id,
            %balance_a,
            %balance_b,
            "unilateral close resolved"
        );
        Ok(())
    }

    /// Read a channel record. Invalid ids simply have no record.
    pub fn get_channel_info(
        &self,
        channel_id: &[u8],
        participant_a: Address,
        participant_b: Address,
    ) -> Option<ChannelRecord> {
        let channel_id = ChannelId::try_from(channel_id).ok()?;
        self.ledger
            .get(&ChannelKey::new(channel_id, participant_a, participant_b))
            .copied()
    }

    fn authorize(&self, msg: Hash, sig: &Signature, signer: Address) -> Result<(), ChannelError> {
        if self.verifier.verify(msg, sig, signer) {
            Ok(())
        } else {
            Err(ChannelError::InvalidSignature)
        }
    }

    /// Pay both sides from custody as a single unit. Zero shares are skipped.
    fn pay_out(
        &mut self,
        key: &ChannelKey,
        balance_a: U256,
        balance_b: U256,
    ) -> Result<(), ChannelError> {
        let payouts: Vec<Payout> = [
            Payout {
                to: key.participant_a,
                amount: balance_a,
            },
            Payout {
                to: key.participant_b,
                amount: balance_b,
            },
        ]
        .into_iter()
        .filter(|p| !p.amount.is_zero())
        .collect();

        if !payouts.is_empty() {
            self.escrow.payout_all(&payouts)?;
        }
        Ok(())
    }
}

fn channel_key(
    ctx: &CallContext,
    channel_id: &[u8],
    participant_b: Address,
) -> Result<ChannelKey, ChannelError> {
    let channel_id = validate::parse_channel_id(channel_id)?;
    validate::distinct_participants(ctx.caller, participant_b)?;
    Ok(ChannelKey::new(channel_id, ctx.caller, participant_b))
}

fn message(channel_id: ChannelId, balance_a: U256, balance_b: U256) -> Result<Hash, ChannelError> {
    // The settlement struct is always representable, but if encoding ever
    // fails there is nothing a signature could be checked against.
    settlement_hash(channel_id, balance_a, balance_b).map_err(|_| ChannelError::InvalidSignature)
}

fn conserves(record: &ChannelRecord, balance_a: U256, balance_b: U256) -> Result<(), ChannelError> {
    if balance_a.checked_add(balance_b) == Some(record.total_deposited) {
        Ok(())
    } else {
        Err(ChannelError::InsufficientFunds)
    }
}

fn rejected(op: &'static str, ctx: &CallContext, e: ChannelError) -> ChannelError {
    debug!(op, caller = ?ctx.caller, height = ctx.height, code = e.code(), error = %e, "rejected");
    e
}
