use serde::Serialize;

use crate::types::{Address, ChannelId, U256};

/// Identity of a channel.
///
/// The same two parties may hold several channels under different ids, and
/// swapping `participant_a` and `participant_b` names a different channel.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelKey {
    pub channel_id: ChannelId,
    /// The creator, who funds the channel and drives settlement.
    pub participant_a: Address,
    pub participant_b: Address,
}

impl ChannelKey {
    pub fn new(channel_id: ChannelId, participant_a: Address, participant_b: Address) -> Self {
        Self {
            channel_id,
            participant_a,
            participant_b,
        }
    }
}

/// Where a channel is in its lifecycle, derived from the stored fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelPhase {
    Open,
    /// A unilateral settlement was proposed and finalizes at `deadline`.
    Disputed { deadline: u64 },
    Closed,
}

/// Mutable state of a channel.
///
/// While open, `balance_a + balance_b == total_deposited`. Once closed all
/// three are zero and the record never changes again.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelRecord {
    pub total_deposited: U256,
    pub balance_a: U256,
    pub balance_b: U256,
    pub is_open: bool,
    /// Height at which a pending unilateral settlement may be resolved, 0 if
    /// none is pending.
    pub dispute_deadline: u64,
    /// Reserved for replay protection, currently never incremented.
    pub nonce: u64,
}

impl ChannelRecord {
    pub(super) fn opened(deposit: U256) -> Self {
        Self {
            total_deposited: deposit,
            balance_a: deposit,
            balance_b: U256::zero(),
            is_open: true,
            dispute_deadline: 0,
            nonce: 0,
        }
    }

    pub fn phase(&self) -> ChannelPhase {
        if !self.is_open {
            ChannelPhase::Closed
        } else if self.dispute_deadline != 0 {
            ChannelPhase::Disputed {
                deadline: self.dispute_deadline,
            }
        } else {
            ChannelPhase::Open
        }
    }

    /// Whether the fund conservation law holds for this record.
    pub fn is_conserved(&self) -> bool {
        if self.is_open {
            self.balance_a.checked_add(self.balance_b) == Some(self.total_deposited)
        } else {
            self.total_deposited.is_zero() && self.balance_a.is_zero() && self.balance_b.is_zero()
        }
    }

    pub(super) fn close(&mut self) {
        self.total_deposited = U256::zero();
        self.balance_a = U256::zero();
        self.balance_b = U256::zero();
        self.is_open = false;
    }
}
