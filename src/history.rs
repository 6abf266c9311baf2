//! Bounded transaction history.
//!
//! Replaces the classic shift-on-overflow array with a FIFO deque: pushing
//! at capacity evicts the oldest entry, so the buffer always holds the most
//! recent transactions in chronological order.

use crate::transaction::Transaction;
use std::collections::VecDeque;

/// Maximum number of transactions retained for the mini-statement.
pub const HISTORY_CAPACITY: usize = 10;

/// A bounded, oldest-first buffer of the most recent transactions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionHistory {
    entries: VecDeque<Transaction>,
}

impl TransactionHistory {
    /// Creates an empty history.
    pub fn new() -> Self {
        TransactionHistory {
            entries: VecDeque::with_capacity(HISTORY_CAPACITY),
        }
    }

    /// Appends a transaction, evicting the oldest entry once at capacity.
    pub fn push(&mut self, tx: Transaction) {
        if self.entries.len() == HISTORY_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(tx);
    }

    /// Number of retained transactions, never more than [`HISTORY_CAPACITY`].
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no transactions have been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates the retained transactions, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.entries.iter()
    }
}

impl FromIterator<Transaction> for TransactionHistory {
    fn from_iter<I: IntoIterator<Item = Transaction>>(iter: I) -> Self {
        let mut history = TransactionHistory::new();
        for tx in iter {
            history.push(tx);
        }
        history
    }
}
