//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer, the editor and
//! the session. It is the single entry point for any front end.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Owns** the store, the session state, and the form defaults
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no printing and holds no business rules of its own: filtering is
//! in [`crate::query`], validation in [`crate::editor`], identity in
//! [`crate::store`].
//!
//! ## Generic Over CatalogStore
//!
//! `CatalogApi<S: CatalogStore>` is generic over the storage backend so the
//! facade can be driven by any implementation of the trait.

use crate::commands;
use crate::editor::{form_from_entry, EntryForm, FormDefaults, FormField};
use crate::error::Result;
use crate::model::{Entry, EntryId, NewEntry};
use crate::query::Query;
use crate::session::{ConfirmationToken, Session};
use crate::store::CatalogStore;

pub struct CatalogApi<S: CatalogStore> {
    store: S,
    session: Session,
    defaults: FormDefaults,
}

impl<S: CatalogStore> CatalogApi<S> {
    pub fn new(store: S, defaults: FormDefaults) -> Self {
        Self {
            store,
            session: Session::new(),
            defaults,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // --- Reads ---

    pub fn list_entries(&self) -> Vec<Entry> {
        self.store.list_entries()
    }

    pub fn list_categories(&self) -> commands::CmdResult {
        commands::categories::list(&self.store)
    }

    /// Entries visible under the given filters, ignoring the session's.
    pub fn filter(&self, query: &Query) -> commands::CmdResult {
        commands::list::run(&self.store, query)
    }

    /// Entries visible under the session's current filters.
    pub fn visible_entries(&self) -> commands::CmdResult {
        commands::list::run(&self.store, self.session.query())
    }

    pub fn tags(&self) -> commands::CmdResult {
        commands::tags::run(&self.store)
    }

    pub fn get_entries(&self, ids: &[EntryId]) -> Result<commands::CmdResult> {
        commands::get::run(&self.store, ids)
    }

    pub fn form_for(&self, id: EntryId) -> Result<EntryForm> {
        Ok(form_from_entry(&self.store.get_entry(id)?))
    }

    // --- Direct mutations (no editor) ---

    pub fn add_entry(&mut self, candidate: NewEntry) -> Result<commands::CmdResult> {
        commands::create::run(&mut self.store, candidate)
    }

    pub fn update_entry(&mut self, id: EntryId, patch: NewEntry) -> Result<commands::CmdResult> {
        commands::update::run(&mut self.store, id, patch)
    }

    pub fn add_category(&mut self, name: &str) -> (bool, commands::CmdResult) {
        commands::categories::add(&mut self.store, name)
    }

    // --- Filters ---

    pub fn set_search(&mut self, term: &str) {
        self.session.set_search(term);
    }

    pub fn toggle_tag(&mut self, tag: &str) -> bool {
        self.session.toggle_tag(tag)
    }

    pub fn select_category(&mut self, category: Option<&str>) {
        self.session.select_category(category);
    }

    pub fn clear_filters(&mut self) {
        self.session.clear_filters();
    }

    // --- Editor ---

    pub fn open_create(&mut self) {
        self.session.open_create(&self.defaults);
    }

    pub fn open_edit(&mut self, id: EntryId) -> Result<()> {
        self.session.open_edit(&self.store, id)
    }

    pub fn set_field(&mut self, field: FormField, value: &str) -> Result<()> {
        self.session.set_field(field, value)
    }

    pub fn submit(&mut self) -> Result<commands::CmdResult> {
        self.session.submit(&mut self.store, &self.defaults)
    }

    pub fn cancel_edit(&mut self) {
        self.session.cancel_edit();
    }

    // --- Deletion ---

    pub fn request_delete(&mut self, id: EntryId) -> Result<commands::CmdResult> {
        let token = self.session.request_delete(&self.store, id)?;
        let entry = self.store.get_entry(id)?;
        let mut result = commands::CmdResult::default().with_confirmation(token);
        result.add_message(commands::CmdMessage::warning(format!(
            "Delete entry ({}): {}? Confirm with token {}",
            entry.id, entry.name, token
        )));
        Ok(result)
    }

    pub fn confirm_delete(&mut self, token: ConfirmationToken) -> Result<commands::CmdResult> {
        self.session.confirm_delete(&mut self.store, token)
    }

    pub fn cancel_delete(&mut self, token: ConfirmationToken) -> bool {
        self.session.cancel_delete(token)
    }
}

pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::{entry, StoreFixture};
    use crate::store::memory::InMemoryStore;

    fn api() -> CatalogApi<InMemoryStore> {
        CatalogApi::new(
            StoreFixture::pharmacy().store,
            FormDefaults::new("/img/default.jpg"),
        )
    }

    #[test]
    fn visible_entries_follow_session_filters() {
        let mut api = api();
        api.set_search("neuro");
        let result = api.visible_entries();
        assert_eq!(result.listed_entries.len(), 1);
        assert_eq!(result.listed_entries[0].id, EntryId(2));

        api.clear_filters();
        assert_eq!(api.visible_entries().listed_entries.len(), 2);
    }

    #[test]
    fn filter_ignores_session_state() {
        let mut api = api();
        api.toggle_tag("ноотроп");
        let result = api.filter(&Query::new().tag("рецептурное"));
        assert_eq!(result.listed_entries[0].id, EntryId(1));
    }

    #[test]
    fn request_delete_returns_token_without_deleting() {
        let mut api = api();
        let result = api.request_delete(EntryId(2)).unwrap();
        let token = result.confirmation.unwrap();
        assert_eq!(api.list_entries().len(), 2);

        let deleted = api.confirm_delete(token).unwrap();
        assert_eq!(deleted.affected_entries[0].id, EntryId(2));
        assert_eq!(api.list_entries().len(), 1);
    }

    #[test]
    fn tags_reflect_new_entries() {
        let mut api = api();
        let mut candidate = entry("VITA-MAX", &["витамины"]);
        candidate.category = "Ноотропы".into();
        api.add_entry(candidate).unwrap();
        assert!(api.tags().tags.contains(&"витамины".to_string()));
    }

    #[test]
    fn form_for_prefills_editor_fields() {
        let api = api();
        let form = api.form_for(EntryId(1)).unwrap();
        assert_eq!(form.tags, "обезболивающее, рецептурное");
    }

    #[test]
    fn duplicate_category_returns_false() {
        let mut api = api();
        let (added, result) = api.add_category("Ноотропы");
        assert!(!added);
        assert_eq!(result.categories.len(), 2);
    }
}
