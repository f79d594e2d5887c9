//! # CLI Behavior
//!
//! This is **one possible UI client** for dispensary, not the application
//! itself. The CLI is the only place that knows about terminal I/O, exit
//! codes, and output formatting.
//!
//! ## Naked Execution (`dispensary`)
//!
//! Running `dispensary` with no arguments lists the whole catalog.
//!
//! ## One-shot vs. Shell
//!
//! One-shot commands (`list`, `show`, `tags`, `categories`) start from the
//! seed catalog every time. Changes only exist inside `dispensary shell`,
//! which keeps one session alive until `quit`.
//!
//! ## Seed Resolution
//!
//! 1. `--seed FILE`
//! 2. `seed_file` in `config.json` (relative paths resolve against the config dir)
//! 3. The built-in catalog
//!
//! The config dir is `$DISPENSARY_CONFIG_DIR` if set, otherwise the platform
//! config directory.

mod commands;
mod print;
mod setup;
mod shell;

pub use commands::run;
