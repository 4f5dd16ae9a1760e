//! Interface to the ledger that actually holds the funds.
//!
//! The engine never moves value itself. It asks an [EscrowGateway] to pull
//! deposits into custody and to pay settlements out of it. Custody is owned by
//! the engine: nothing else may debit it.

use std::collections::HashMap;

use thiserror::Error;

use crate::types::{Address, U256};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferError {
    #[error("insufficient balance: {available} available, {requested} requested")]
    InsufficientBalance { available: U256, requested: U256 },
    #[error("transfer amount must be non-zero")]
    ZeroAmount,
    #[error("balance overflow")]
    Overflow,
}

/// A single transfer out of custody.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Payout {
    pub to: Address,
    pub amount: U256,
}

/// Value transfer primitive of the hosting ledger.
///
/// Every method is all-or-nothing: on error no balance has changed.
pub trait EscrowGateway {
    /// Move `amount` from `from` into custody.
    fn deposit(&mut self, from: Address, amount: U256) -> Result<(), TransferError>;

    /// Pay every entry of `payouts` from custody, or none of them.
    fn payout_all(&mut self, payouts: &[Payout]) -> Result<(), TransferError>;

    /// Move the whole custody balance to `to` and return the amount moved.
    fn sweep(&mut self, to: Address) -> Result<U256, TransferError>;

    fn custody_balance(&self) -> U256;
}

/// In-memory ledger of account balances plus the engine's custody account.
#[derive(Debug, Default, Clone)]
pub struct MemoryEscrow {
    accounts: HashMap<Address, U256>,
    custody: U256,
}

impl MemoryEscrow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit an account out of thin air. Stands in for the ledger's genesis
    /// allocation.
    pub fn mint(&mut self, to: Address, amount: U256) -> Result<(), TransferError> {
        let balance = self.balance_of(to);
        let balance = balance.checked_add(amount).ok_or(TransferError::Overflow)?;
        self.accounts.insert(to, balance);
        Ok(())
    }

    pub fn balance_of(&self, account: Address) -> U256 {
        self.accounts.get(&account).copied().unwrap_or_default()
    }
}

impl EscrowGateway for MemoryEscrow {
    fn deposit(&mut self, from: Address, amount: U256) -> Result<(), TransferError> {
        if amount.is_zero() {
            return Err(TransferError::ZeroAmount);
        }
        let available = self.balance_of(from);
        let remaining = available
            .checked_sub(amount)
            .ok_or(TransferError::InsufficientBalance {
                available,
                requested: amount,
            })?;
        let custody = self
            .custody
            .checked_add(amount)
            .ok_or(TransferError::Overflow)?;

        self.accounts.insert(from, remaining);
        self.custody = custody;
        Ok(())
    }

    fn payout_all(&mut self, payouts: &[Payout]) -> Result<(), TransferError> {
        // Compute every resulting balance before touching any of them, so a
        // failure halfway through the batch leaves nothing behind.
        let mut custody = self.custody;
        let mut credited: HashMap<Address, U256> = HashMap::new();
        for payout in payouts {
            if payout.amount.is_zero() {
                return Err(TransferError::ZeroAmount);
            }
            custody = custody
                .checked_sub(payout.amount)
                .ok_or(TransferError::InsufficientBalance {
                    available: custody,
                    requested: payout.amount,
                })?;
            let balance = match credited.get(&payout.to) {
                Some(balance) => *balance,
                None => self.balance_of(payout.to),
            };
            let balance = balance
                .checked_add(payout.amount)
                .ok_or(TransferError::Overflow)?;
            credited.insert(payout.to, balance);
        }

        self.custody = custody;
        self.accounts.extend(credited);
        Ok(())
    }

    fn sweep(&mut self, to: Address) -> Result<U256, TransferError> {
        let amount = self.custody;
        if amount.is_zero() {
            return Err(TransferError::ZeroAmount);
        }
        let balance = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(TransferError::Overflow)?;
        self.accounts.insert(to, balance);
        self.custody = U256::zero();
        Ok(amount)
    }

    fn custody_balance(&self) -> U256 {
        self.custody
    }
}
