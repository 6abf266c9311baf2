//! The interactive ATM session: PIN gate plus the menu read-eval loop.
//!
//! Generic over its input and output streams so the whole dialogue can be
//! unit-tested with in-memory cursors; `main` wires it to locked
//! stdin/stdout.

use crate::decimal::Decimal2;
use crate::error::AtmError;
use crate::ledger::Ledger;
use crate::store::Store;
use log::warn;
use std::io::{self, BufRead, Write};

/// PIN attempts allowed before the session ends.
const MAX_PIN_ATTEMPTS: u32 = 3;

/// An interactive session over arbitrary I/O streams.
pub struct Session<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Creates a session over the given streams.
    pub fn new(input: R, output: W) -> Self {
        Session { input, output }
    }

    /// Runs the full dialogue: greeting, PIN verification, then the menu
    /// loop until exit.
    ///
    /// The ledger is mutated in place; every mutating command saves to the
    /// store before the next prompt. Returns `Err` only on I/O failures of
    /// the streams themselves.
    pub fn run(&mut self, ledger: &mut Ledger, store: &Store) -> io::Result<()> {
        writeln!(self.output, "Welcome to Simple ATM Simulation")?;

        if !self.verify_pin(ledger)? {
            writeln!(self.output, "Too many incorrect attempts. Exiting.")?;
            return Ok(());
        }

        loop {
            self.print_menu()?;
            let Some(line) = self.prompt("Enter choice: ")? else {
                // EOF reads like any other unparseable choice.
                writeln!(self.output, "Invalid input. Exiting.")?;
                break;
            };

            match line.trim().parse::<i32>() {
                Ok(1) => self.check_balance(ledger)?,
                Ok(2) => self.deposit(ledger, store)?,
                Ok(3) => self.withdraw(ledger, store)?,
                Ok(4) => self.mini_statement(ledger)?,
                Ok(5) => self.change_pin(ledger, store)?,
                Ok(6) => {
                    writeln!(self.output, "Thank you. Goodbye.")?;
                    break;
                }
                Ok(_) => writeln!(self.output, "Invalid choice. Try again.")?,
                Err(_) => {
                    writeln!(self.output, "Invalid input. Exiting.")?;
                    break;
                }
            }
        }

        Ok(())
    }

    /// Asks for the PIN, allowing [`MAX_PIN_ATTEMPTS`] tries.
    fn verify_pin(&mut self, ledger: &Ledger) -> io::Result<bool> {
        for remaining in (0..MAX_PIN_ATTEMPTS).rev() {
            let Some(attempt) = self.prompt("Enter PIN: ")? else {
                return Ok(false);
            };
            if ledger.authenticate(attempt.trim()) {
                return Ok(true);
            }
            writeln!(self.output, "Incorrect PIN. {} attempt(s) left.", remaining)?;
        }
        Ok(false)
    }

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n--- ATM Menu ---")?;
        writeln!(self.output, "1. Check Balance")?;
        writeln!(self.output, "2. Deposit")?;
        writeln!(self.output, "3. Withdraw")?;
        writeln!(self.output, "4. Mini Statement")?;
        writeln!(self.output, "5. Change PIN")?;
        writeln!(self.output, "6. Exit")
    }

    /// Writes a prompt (no newline), flushes, and reads one line.
    ///
    /// Returns `None` at end of input.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn check_balance(&mut self, ledger: &Ledger) -> io::Result<()> {
        writeln!(self.output, "Your current balance: {}", ledger.balance())
    }

    fn deposit(&mut self, ledger: &mut Ledger, store: &Store) -> io::Result<()> {
        let Some(line) = self.prompt("Enter amount to deposit: ")? else {
            return Ok(());
        };

        let Ok(amount) = line.trim().parse::<Decimal2>() else {
            return writeln!(self.output, "Invalid amount.");
        };

        match ledger.deposit(amount) {
            Ok(()) => {
                writeln!(self.output, "Deposited {} successfully.", amount)?;
                self.persist(ledger, store)
            }
            Err(_) => writeln!(self.output, "Invalid amount."),
        }
    }

    fn withdraw(&mut self, ledger: &mut Ledger, store: &Store) -> io::Result<()> {
        let Some(line) = self.prompt("Enter amount to withdraw: ")? else {
            return Ok(());
        };

        let Ok(amount) = line.trim().parse::<Decimal2>() else {
            return writeln!(self.output, "Invalid amount.");
        };

        match ledger.withdraw(amount) {
            Ok(()) => {
                writeln!(self.output, "Withdrawn {} successfully.", amount)?;
                self.persist(ledger, store)
            }
            Err(AtmError::InsufficientFunds { balance, .. }) => writeln!(
                self.output,
                "Insufficient funds. Current balance: {}",
                balance
            ),
            Err(_) => writeln!(self.output, "Invalid amount."),
        }
    }

    fn mini_statement(&mut self, ledger: &Ledger) -> io::Result<()> {
        writeln!(
            self.output,
            "----- Mini Statement (last {}) -----",
            ledger.history().len()
        )?;
        for (i, tx) in ledger.history().iter().enumerate() {
            writeln!(self.output, "{}. {} : {}", i + 1, tx.kind, tx.amount)?;
        }
        if ledger.history().is_empty() {
            writeln!(self.output, "No transactions yet.")?;
        }
        Ok(())
    }

    fn change_pin(&mut self, ledger: &mut Ledger, store: &Store) -> io::Result<()> {
        let Some(old) = self.prompt("Enter current PIN: ")? else {
            return Ok(());
        };
        if !ledger.authenticate(old.trim()) {
            return writeln!(self.output, "PIN does not match.");
        }

        let Some(new) = self.prompt("Enter new PIN: ")? else {
            return Ok(());
        };
        let Some(confirm) = self.prompt("Confirm new PIN: ")? else {
            return Ok(());
        };

        match ledger.change_pin(old.trim(), new.trim(), confirm.trim()) {
            Ok(()) => {
                self.persist(ledger, store)?;
                writeln!(self.output, "PIN changed successfully.")
            }
            Err(AtmError::ConfirmationMismatch) => {
                writeln!(self.output, "PINs do not match. Aborting.")
            }
            Err(_) => writeln!(self.output, "PIN does not match."),
        }
    }

    /// Saves the ledger, downgrading a failed save to a warning so the
    /// session can continue on in-memory state.
    fn persist(&mut self, ledger: &Ledger, store: &Store) -> io::Result<()> {
        if let Err(e) = store.save(ledger) {
            warn!("Save to {} failed: {}", store.path().display(), e);
            writeln!(self.output, "Warning: Could not save data.")?;
        }
        Ok(())
    }
}
