//! # Dispensary CLI
//!
//! The binary is intentionally thin: the CLI lives in `cli/`, and this file
//! only invokes `cli::run()` and handles process termination.
//!
//! ```text
//! dispensary                       # list the whole catalog
//! dispensary list -s neuro         # search names and descriptions
//! dispensary list -t ноотроп -t рецептурное -c Ноотропы
//! dispensary show 1 2
//! dispensary shell                 # interactive session: filters, editor, deletes
//! ```
//!
//! The catalog is held in memory; changes made in `shell` last until it exits.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
