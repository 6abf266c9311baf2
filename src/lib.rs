//! # ATM Ledger
//!
//! A single-account ATM simulator: PIN authentication, balance checks,
//! deposits, withdrawals, a bounded mini-statement, and PIN changes, with
//! the full ledger persisted to a flat text file after every mutation.
//!
//! ## Design Principles
//!
//! - **Fixed-point arithmetic**: Uses 2 decimal places via `rust_decimal`
//! - **Explicit ownership**: One `Ledger` value owned by the driver, no
//!   global state
//! - **Strict invariants**: balance never negative, history bounded at 10
//! - **Plain persistence**: the store is a whitespace-separated text file,
//!   fully rewritten after every mutation
//!
//! ## Example
//!
//! ```
//! use atm_ledger::Ledger;
//!
//! let mut ledger = Ledger::default();
//! assert!(ledger.authenticate("1234"));
//! ledger.deposit("250.00".parse().unwrap()).unwrap();
//! assert_eq!(ledger.balance().to_string(), "1250.00");
//! ```

pub mod decimal;
pub mod error;
pub mod history;
pub mod ledger;
pub mod session;
pub mod store;
pub mod transaction;

pub use decimal::Decimal2;
pub use error::{AtmError, Result};
pub use history::{TransactionHistory, HISTORY_CAPACITY};
pub use ledger::Ledger;
pub use session::Session;
pub use store::{Store, DEFAULT_STORE_PATH};
pub use transaction::{Transaction, TxKind};
