//! The single-account ledger and its operations.
//!
//! Maintains the invariant: `balance >= 0` after every successful operation.

use crate::decimal::Decimal2;
use crate::error::{AtmError, Result};
use crate::history::TransactionHistory;
use crate::transaction::{Transaction, TxKind};
use log::debug;

/// Default starting balance for a fresh ledger.
const DEFAULT_BALANCE: i64 = 1000;

/// Default PIN for a fresh ledger.
const DEFAULT_PIN: &str = "1234";

/// The in-memory account state: balance, PIN, and recent transactions.
///
/// # Invariants
///
/// - `balance >= 0` after every successful operation; a withdrawal that
///   would overdraw is rejected before any state changes
/// - the history never holds more than its fixed capacity; the oldest
///   entry is evicted on overflow
///
/// Every mutating operation validates its inputs before touching state, so
/// a failed operation leaves the ledger exactly as it was. Persistence is
/// the caller's job: the ledger itself never touches the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledger {
    balance: Decimal2,
    pin: String,
    history: TransactionHistory,
}

impl Ledger {
    /// Reassembles a ledger from persisted parts.
    pub fn from_parts(balance: Decimal2, pin: String, history: TransactionHistory) -> Self {
        Ledger {
            balance,
            pin,
            history,
        }
    }

    /// Current balance.
    pub fn balance(&self) -> Decimal2 {
        self.balance
    }

    /// Stored PIN.
    pub fn pin(&self) -> &str {
        &self.pin
    }

    /// The retained transaction history, oldest first.
    pub fn history(&self) -> &TransactionHistory {
        &self.history
    }

    /// Compares a supplied PIN against the stored PIN.
    ///
    /// Pure comparison; attempt counting is the session driver's concern.
    pub fn authenticate(&self, attempt: &str) -> bool {
        attempt == self.pin
    }

    /// Adds funds to the balance and records a `Deposit` transaction.
    ///
    /// Rejects zero and negative amounts, and amounts that would overflow
    /// the balance, with [`AtmError::InvalidAmount`], leaving the ledger
    /// untouched.
    pub fn deposit(&mut self, amount: Decimal2) -> Result<()> {
        if !amount.is_positive() {
            return Err(AtmError::InvalidAmount(amount));
        }

        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(AtmError::InvalidAmount(amount))?;
        self.history.push(Transaction::new(TxKind::Deposit, amount));
        debug!("Deposited {}, balance now {}", amount, self.balance);
        Ok(())
    }

    /// Removes funds from the balance and records a `Withdraw` transaction.
    ///
    /// Rejects zero and negative amounts with [`AtmError::InvalidAmount`] and
    /// amounts above the current balance with [`AtmError::InsufficientFunds`].
    /// Withdrawing the exact balance is allowed and leaves it at zero.
    pub fn withdraw(&mut self, amount: Decimal2) -> Result<()> {
        if !amount.is_positive() {
            return Err(AtmError::InvalidAmount(amount));
        }

        if amount > self.balance {
            return Err(AtmError::InsufficientFunds {
                requested: amount,
                balance: self.balance,
            });
        }

        self.balance = self
            .balance
            .checked_sub(amount)
            .ok_or(AtmError::InvalidAmount(amount))?;
        self.history.push(Transaction::new(TxKind::Withdraw, amount));
        debug!("Withdrew {}, balance now {}", amount, self.balance);
        Ok(())
    }

    /// Replaces the stored PIN.
    ///
    /// Fails with [`AtmError::PinMismatch`] if `old` does not match the
    /// stored PIN, or [`AtmError::ConfirmationMismatch`] if `new` and
    /// `confirm` differ. The PIN is unchanged on any failure.
    pub fn change_pin(&mut self, old: &str, new: &str, confirm: &str) -> Result<()> {
        if old != self.pin {
            return Err(AtmError::PinMismatch);
        }

        if new != confirm {
            return Err(AtmError::ConfirmationMismatch);
        }

        self.pin = new.to_string();
        debug!("PIN changed");
        Ok(())
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Ledger {
            balance: Decimal2::from(DEFAULT_BALANCE),
            pin: DEFAULT_PIN.to_string(),
            history: TransactionHistory::new(),
        }
    }
}
