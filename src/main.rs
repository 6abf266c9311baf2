//! ATM Ledger CLI
//!
//! An interactive, menu-driven ATM session over stdin/stdout. State is
//! persisted to a flat text file between runs.
//!
//! # Usage
//!
//! ```bash
//! cargo run                 # uses ./atm_data.txt
//! cargo run -- my_store.txt # explicit store path
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use atm_ledger::{Session, Store, DEFAULT_STORE_PATH};
use std::env;
use std::io;
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> io::Result<()> {
    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_STORE_PATH.to_string());

    let store = Store::new(path);
    let mut ledger = store.load_or_init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(stdin.lock(), stdout.lock());
    session.run(&mut ledger, &store)
}
