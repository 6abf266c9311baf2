//! Transaction model shared by the ledger and the store format.

use crate::decimal::Decimal2;
use std::fmt;
use std::str::FromStr;

/// Transaction kind.
///
/// The `Display`/`FromStr` forms are exactly the tokens used in the
/// persisted store (`Deposit` / `Withdraw`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxKind {
    /// Credit funds to the account.
    Deposit,

    /// Debit funds from the account.
    Withdraw,
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TxKind::Deposit => write!(f, "Deposit"),
            TxKind::Withdraw => write!(f, "Withdraw"),
        }
    }
}

impl FromStr for TxKind {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Deposit" => Ok(TxKind::Deposit),
            "Withdraw" => Ok(TxKind::Withdraw),
            _ => Err(()),
        }
    }
}

/// A single recorded transaction: a kind and a non-negative amount.
///
/// Immutable once created; the ledger only ever appends these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transaction {
    /// Whether funds were added or removed.
    pub kind: TxKind,

    /// Amount moved, always positive for recorded transactions.
    pub amount: Decimal2,
}

impl Transaction {
    /// Creates a new transaction record.
    pub fn new(kind: TxKind, amount: Decimal2) -> Self {
        Transaction { kind, amount }
    }
}
