use thiserror::Error;

use crate::types::Address;

/// Number of blocks a unilateral settlement stays open for challenge.
///
/// Roughly one week at a ten minute block cadence.
pub const DEFAULT_DISPUTE_WINDOW: u64 = 1008;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("dispute window must be at least one block")]
    ZeroDisputeWindow,
}

/// Deployment parameters of a [ChannelEngine](crate::ChannelEngine).
///
/// Fixed for the lifetime of the engine, there is no way to change the owner
/// or the window afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    owner: Address,
    dispute_window: u64,
}

impl Config {
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            dispute_window: DEFAULT_DISPUTE_WINDOW,
        }
    }

    pub fn with_dispute_window(mut self, blocks: u64) -> Result<Self, ConfigError> {
        if blocks == 0 {
            return Err(ConfigError::ZeroDisputeWindow);
        }
        self.dispute_window = blocks;
        Ok(self)
    }

    /// The deploying authority, the only caller allowed to use emergency
    /// recovery.
    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn dispute_window(&self) -> u64 {
        self.dispute_window
    }
}
