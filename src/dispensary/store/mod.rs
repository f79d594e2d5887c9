//! # Storage Layer
//!
//! The [`CatalogStore`] trait is the authoritative holder of entries and
//! categories. It assigns entry ids and does nothing else: validation lives
//! in the editor, filtering in the query engine.
//!
//! ## Implementations
//!
//! - [`memory::InMemoryStore`]: process-lifetime storage, initialized from
//!   seed data. This is the only backend; nothing is ever written to disk.
//!
//! ## Identity
//!
//! Ids are assigned as one more than the highest id the store has ever
//! issued or holds, so removing the newest entry never frees its id for
//! reuse.
//!
//! ## Categories
//!
//! Categories are an append-only list of unique names. Entries reference a
//! category by name; the store does not check those references after save.

use crate::error::Result;
use crate::model::{Entry, EntryId, NewEntry};

pub mod memory;

/// Abstract interface for catalog storage.
pub trait CatalogStore {
    /// Assign the next id and append the entry.
    fn add_entry(&mut self, candidate: NewEntry) -> Entry;

    /// Replace every field of the entry with `id`, keeping the id.
    fn update_entry(&mut self, id: EntryId, patch: NewEntry) -> Result<Entry>;

    /// Remove the entry with `id`, returning it.
    fn remove_entry(&mut self, id: EntryId) -> Result<Entry>;

    fn get_entry(&self, id: EntryId) -> Result<Entry>;

    /// Append a category if it is non-empty and not already present.
    fn add_category(&mut self, name: &str) -> bool;

    fn list_entries(&self) -> Vec<Entry>;

    fn list_categories(&self) -> Vec<String>;

    fn has_category(&self, name: &str) -> bool {
        self.list_categories().iter().any(|c| c == name)
    }
}
