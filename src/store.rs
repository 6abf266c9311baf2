//! Flat-file persistence for the ledger.
//!
//! The store is a plain whitespace-separated text format:
//!
//! ```text
//! <balance:.2> <pin> <tx_count>
//! <kind> <amount:.2>     (one line per retained transaction, oldest first)
//! ```
//!
//! Loading is token-based: a malformed header means the whole store is
//! discarded in favor of defaults, while a malformed transaction row only
//! truncates the history at that point. That leniency is kept on purpose
//! for compatibility with existing store files.

use crate::decimal::Decimal2;
use crate::error::{AtmError, Result};
use crate::history::{TransactionHistory, HISTORY_CAPACITY};
use crate::ledger::Ledger;
use crate::transaction::{Transaction, TxKind};
use log::{debug, warn};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

/// Default store file name.
pub const DEFAULT_STORE_PATH: &str = "atm_data.txt";

/// Handle to the ledger's backing file.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    /// Creates a store handle for the given path. No I/O happens here.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Store { path: path.into() }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and parses the store file into a ledger.
    ///
    /// Fails if the file is missing or its header (balance, PIN, count)
    /// does not parse. Transaction rows after the header are read
    /// best-effort: the first malformed row ends the history there.
    pub fn load(&self) -> Result<Ledger> {
        let contents = fs::read_to_string(&self.path)?;
        let mut tokens = contents.split_whitespace();

        let balance: Decimal2 = tokens
            .next()
            .and_then(|t| t.parse().ok())
            .ok_or_else(|| malformed("missing or unparseable balance"))?;
        let pin = tokens
            .next()
            .ok_or_else(|| malformed("missing PIN"))?
            .to_string();
        let count: usize = tokens
            .next()
            .and_then(|t| t.parse().ok())
            .ok_or_else(|| malformed("missing or unparseable transaction count"))?;

        let mut history = TransactionHistory::new();
        for _ in 0..count.min(HISTORY_CAPACITY) {
            let (Some(kind_tok), Some(amount_tok)) = (tokens.next(), tokens.next()) else {
                debug!("Store ended early; keeping {} transaction(s)", history.len());
                break;
            };
            let (Ok(kind), Ok(amount)) = (kind_tok.parse::<TxKind>(), amount_tok.parse::<Decimal2>())
            else {
                debug!(
                    "Unparseable transaction row '{} {}'; keeping {} transaction(s)",
                    kind_tok,
                    amount_tok,
                    history.len()
                );
                break;
            };
            history.push(Transaction::new(kind, amount));
        }

        debug!(
            "Loaded store from {}: balance {}, {} transaction(s)",
            self.path.display(),
            balance,
            history.len()
        );
        Ok(Ledger::from_parts(balance, pin, history))
    }

    /// Loads the ledger, falling back to defaults when the store is missing
    /// or malformed.
    ///
    /// The fallback is saved immediately so a store file always exists
    /// after the first run. A failed fallback save is logged and ignored;
    /// the in-memory defaults are still returned.
    pub fn load_or_init(&self) -> Ledger {
        match self.load() {
            Ok(ledger) => ledger,
            Err(e) => {
                warn!(
                    "Could not load store from {} ({}); using defaults",
                    self.path.display(),
                    e
                );
                let ledger = Ledger::default();
                if let Err(e) = self.save(&ledger) {
                    warn!("Could not write default store: {}", e);
                }
                ledger
            }
        }
    }

    /// Serializes the full ledger state, overwriting the store file.
    pub fn save(&self, ledger: &Ledger) -> Result<()> {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{} {} {}",
            ledger.balance(),
            ledger.pin(),
            ledger.history().len()
        );
        for tx in ledger.history().iter() {
            let _ = writeln!(out, "{} {}", tx.kind, tx.amount);
        }

        fs::write(&self.path, out)?;
        debug!("Saved store to {}", self.path.display());
        Ok(())
    }
}

fn malformed(message: &str) -> AtmError {
    AtmError::MalformedStore {
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn store_in(dir: &tempfile::TempDir) -> Store {
        Store::new(dir.path().join(DEFAULT_STORE_PATH))
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        let mut ledger = Ledger::default();
        ledger.deposit("500.00".parse().unwrap()).unwrap();
        ledger.withdraw("250.00".parse().unwrap()).unwrap();
        store.save(&ledger).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, ledger);
    }

    #[test]
    fn test_save_writes_expected_format() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        let mut ledger = Ledger::default();
        ledger.deposit("500.00".parse().unwrap()).unwrap();
        ledger.withdraw("250.00".parse().unwrap()).unwrap();
        store.save(&ledger).unwrap();

        let contents = fs::read_to_string(store.path()).unwrap();
        assert_eq!(contents, "1250.00 1234 2\nDeposit 500.00\nWithdraw 250.00\n");
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        assert!(matches!(store.load(), Err(AtmError::Io(_))));
    }

    #[test]
    fn test_load_rejects_malformed_header() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        fs::write(store.path(), "not-a-number 1234 0\n").unwrap();
        assert!(matches!(
            store.load(),
            Err(AtmError::MalformedStore { .. })
        ));

        fs::write(store.path(), "1000.00\n").unwrap();
        assert!(matches!(
            store.load(),
            Err(AtmError::MalformedStore { .. })
        ));
    }

    #[test]
    fn test_load_truncates_history_at_malformed_row() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        fs::write(
            store.path(),
            "750.00 1234 3\nDeposit 100.00\nBogus x\nWithdraw 50.00\n",
        )
        .unwrap();

        let ledger = store.load().unwrap();
        assert_eq!(ledger.balance().to_string(), "750.00");
        assert_eq!(ledger.history().len(), 1);
        assert_eq!(
            ledger.history().iter().next().unwrap().amount.to_string(),
            "100.00"
        );
    }

    #[test]
    fn test_load_caps_history_at_capacity() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        let mut contents = String::from("100.00 1234 15\n");
        for i in 1..=15 {
            contents.push_str(&format!("Deposit {}.00\n", i));
        }
        fs::write(store.path(), contents).unwrap();

        let ledger = store.load().unwrap();
        assert_eq!(ledger.history().len(), HISTORY_CAPACITY);
        assert_eq!(
            ledger.history().iter().next().unwrap().amount.to_string(),
            "1.00"
        );
    }

    #[test]
    fn test_load_or_init_creates_default_store() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        let ledger = store.load_or_init();
        assert_eq!(ledger, Ledger::default());

        // The fallback must have been written out.
        let contents = fs::read_to_string(store.path()).unwrap();
        assert_eq!(contents, "1000.00 1234 0\n");
        assert_eq!(store.load().unwrap(), ledger);
    }

    #[test]
    fn test_load_or_init_replaces_corrupt_store() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        fs::write(store.path(), "garbage\n").unwrap();
        let ledger = store.load_or_init();
        assert_eq!(ledger, Ledger::default());

        let contents = fs::read_to_string(store.path()).unwrap();
        assert_eq!(contents, "1000.00 1234 0\n");
    }
}
