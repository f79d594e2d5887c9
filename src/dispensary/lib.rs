//! # Dispensary Architecture
//!
//! Dispensary is a **UI-agnostic catalog library** for a storefront listing of
//! drugs: search, tag and category filtering, and create/update/delete of
//! entries through a validated form. The terminal front end in this crate is
//! one client of it; a web or desktop UI would drive the same API.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, runs the interactive shell, prints     │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs) + Session (session.rs)                  │
//! │  - Facade owning the store and the session state            │
//! │  - Filters, editor draft, pending delete confirmations      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs), query.rs, editor.rs         │
//! │  - Pure logic over Rust types                               │
//! │  - Returns `Result<CmdResult>`                              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - CatalogStore trait, InMemoryStore                        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O in the Core
//!
//! From `api.rs` inward nothing writes to stdout/stderr or exits the process.
//! The only file access is reading `config.json` and seed files, which
//! happens once at start-up. The catalog itself lives in memory for the
//! lifetime of the process and is never written back.
//!
//! ## Execution Model
//!
//! Single-threaded and synchronous. Each user action (a keystroke in the
//! search box, a tag toggle, a form submit) runs to completion before the
//! next one is handled, so no operation needs locking.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`session`]: Filter state, editor draft, two-step delete
//! - [`commands`]: Business logic for each operation
//! - [`query`]: The filter predicate and distinct-tag computation
//! - [`editor`]: Form ↔ entry conversion and the draft state machine
//! - [`store`]: Storage abstraction and the in-memory implementation
//! - [`model`]: Core data types (`Entry`, `NewEntry`, status enums)
//! - [`seed`]: Built-in and file-based seed catalogs
//! - [`config`]: Configuration management
//! - [`error`]: Error types
//! - `cli`: Argument parsing, printing and the interactive shell for the binary (not part of the lib API)

pub mod api;
pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod model;
pub mod query;
pub mod seed;
pub mod session;
pub mod store;
