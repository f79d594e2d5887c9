//! # Session
//!
//! Everything a UI would otherwise keep as ambient mutable state lives here:
//! the current filters, the open editor draft, and deletions awaiting
//! confirmation. A session is driven synchronously by one user; each call
//! runs to completion before the next event.
//!
//! ## Two-step delete
//!
//! [`Session::request_delete`] hands out a [`ConfirmationToken`] and does not
//! touch the store. [`Session::confirm_delete`] redeems the token exactly
//! once. How the confirmation is obtained (prompt, dialog, flag) is up to the
//! front end.

use crate::commands::{self, CmdResult};
use crate::editor::{EditorMode, EditorState, FormDefaults, FormField, Submission};
use crate::error::{CatalogError, Result};
use crate::model::EntryId;
use crate::query::Query;
use crate::store::CatalogStore;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConfirmationToken(Uuid);

impl ConfirmationToken {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConfirmationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ConfirmationToken {
    type Err = CatalogError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(ConfirmationToken)
            .map_err(|_| CatalogError::UnknownConfirmation(s.trim().to_string()))
    }
}

#[derive(Debug, Default)]
pub struct Session {
    query: Query,
    editor: EditorState,
    // Oldest first; at most one token per entry.
    pending_deletes: Vec<(ConfirmationToken, EntryId)>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Filters ---

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn set_search(&mut self, term: &str) {
        self.query.search_term = term.to_string();
    }

    /// Select the tag if unselected, unselect it otherwise. Returns whether
    /// the tag is selected afterwards.
    pub fn toggle_tag(&mut self, tag: &str) -> bool {
        if let Some(pos) = self.query.selected_tags.iter().position(|t| t == tag) {
            self.query.selected_tags.remove(pos);
            false
        } else {
            self.query.selected_tags.push(tag.to_string());
            true
        }
    }

    pub fn select_category(&mut self, category: Option<&str>) {
        self.query.selected_category = category
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(String::from);
    }

    pub fn clear_filters(&mut self) {
        self.query = Query::default();
    }

    // --- Editor ---

    pub fn editor(&self) -> &EditorState {
        &self.editor
    }

    pub fn open_create(&mut self, defaults: &FormDefaults) {
        self.editor.open_create(defaults);
    }

    pub fn open_edit<S: CatalogStore>(&mut self, store: &S, id: EntryId) -> Result<()> {
        let entry = store.get_entry(id)?;
        self.editor.open_edit(&entry);
        Ok(())
    }

    pub fn set_field(&mut self, field: FormField, value: &str) -> Result<()> {
        self.editor.set_field(field, value)
    }

    pub fn cancel_edit(&mut self) {
        self.editor.cancel();
    }

    /// Validate the draft and commit it to the store. On any failure the
    /// draft stays open with the error attached and the store is unchanged.
    pub fn submit<S: CatalogStore>(
        &mut self,
        store: &mut S,
        defaults: &FormDefaults,
    ) -> Result<CmdResult> {
        let submission = match self.editor.submit(defaults) {
            Ok(submission) => submission,
            Err(err) => {
                warn!(error = %err, "submission rejected");
                return Err(err);
            }
        };

        let outcome = match submission {
            Submission::Create(candidate) => commands::create::run(store, candidate),
            Submission::Update(id, patch) => commands::update::run(store, id, patch),
        };

        match outcome {
            Ok(result) => {
                self.editor.commit();
                Ok(result)
            }
            Err(err) => {
                warn!(error = %err, "submission rejected by store");
                self.editor.reject(&err);
                Err(err)
            }
        }
    }

    // --- Deletion ---

    pub fn request_delete<S: CatalogStore>(
        &mut self,
        store: &S,
        id: EntryId,
    ) -> Result<ConfirmationToken> {
        store.get_entry(id)?;
        self.pending_deletes.retain(|(_, pending)| *pending != id);
        let token = ConfirmationToken::new();
        self.pending_deletes.push((token, id));
        debug!(id = %id, token = %token, "delete requested");
        Ok(token)
    }

    pub fn pending_delete(&self, token: ConfirmationToken) -> Option<EntryId> {
        self.pending_deletes
            .iter()
            .find(|(t, _)| *t == token)
            .map(|(_, id)| *id)
    }

    pub fn latest_pending_delete(&self) -> Option<(ConfirmationToken, EntryId)> {
        self.pending_deletes.last().copied()
    }

    pub fn cancel_delete(&mut self, token: ConfirmationToken) -> bool {
        let before = self.pending_deletes.len();
        self.pending_deletes.retain(|(t, _)| *t != token);
        before != self.pending_deletes.len()
    }

    pub fn confirm_delete<S: CatalogStore>(
        &mut self,
        store: &mut S,
        token: ConfirmationToken,
    ) -> Result<CmdResult> {
        let pos = self
            .pending_deletes
            .iter()
            .position(|(t, _)| *t == token)
            .ok_or_else(|| CatalogError::UnknownConfirmation(token.to_string()))?;
        let (_, id) = self.pending_deletes.remove(pos);

        let result = commands::delete::run(store, id)?;
        if self.editor.mode() == Some(EditorMode::Edit(id)) {
            self.editor.cancel();
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    fn defaults() -> FormDefaults {
        FormDefaults::new("/img/default.jpg")
    }

    fn fill(session: &mut Session, fields: &[(FormField, &str)]) {
        for (field, value) in fields {
            session.set_field(*field, value).unwrap();
        }
    }

    #[test]
    fn toggle_tag_selects_and_unselects() {
        let mut session = Session::new();
        assert!(session.toggle_tag("ноотроп"));
        assert_eq!(session.query().selected_tags, vec!["ноотроп"]);
        assert!(!session.toggle_tag("ноотроп"));
        assert!(session.query().selected_tags.is_empty());
    }

    #[test]
    fn blank_category_clears_selection() {
        let mut session = Session::new();
        session.select_category(Some("Ноотропы"));
        assert_eq!(session.query().selected_category.as_deref(), Some("Ноотропы"));
        session.select_category(Some("  "));
        assert!(session.query().selected_category.is_none());
    }

    #[test]
    fn clear_filters_resets_all_axes() {
        let mut session = Session::new();
        session.set_search("neuro");
        session.toggle_tag("ноотроп");
        session.select_category(Some("Ноотропы"));
        session.clear_filters();
        assert!(session.query().is_empty());
    }

    #[test]
    fn create_missing_price_does_not_mutate() {
        let mut store = StoreFixture::pharmacy().store;
        let mut session = Session::new();
        session.open_create(&defaults());
        fill(
            &mut session,
            &[
                (FormField::Name, "VIRUS-SHIELD"),
                (FormField::Description, "Противовирусное"),
                (FormField::Category, "Ноотропы"),
            ],
        );

        let err = session.submit(&mut store, &defaults()).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(store.list_entries().len(), 2);
        assert!(session.editor().is_open());
    }

    #[test]
    fn create_commits_and_closes() {
        let mut store = StoreFixture::pharmacy().store;
        let mut session = Session::new();
        session.open_create(&defaults());
        fill(
            &mut session,
            &[
                (FormField::Name, "VIRUS-SHIELD"),
                (FormField::Description, "Противовирусное"),
                (FormField::Price, "₽4,100"),
                (FormField::Category, "Ноотропы"),
                (FormField::Tags, "противовирусное, иммунитет"),
            ],
        );

        let result = session.submit(&mut store, &defaults()).unwrap();
        let created = &result.affected_entries[0];
        assert_eq!(created.id, EntryId(3));
        assert_eq!(created.image, "/img/default.jpg");
        assert!(!session.editor().is_open());
    }

    #[test]
    fn unknown_category_keeps_draft_open() {
        let mut store = StoreFixture::pharmacy().store;
        let mut session = Session::new();
        session.open_create(&defaults());
        fill(
            &mut session,
            &[
                (FormField::Name, "A"),
                (FormField::Description, "B"),
                (FormField::Price, "C"),
                (FormField::Category, "Нет такой"),
            ],
        );

        let err = session.submit(&mut store, &defaults()).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownCategory(_)));
        assert!(session.editor().error().unwrap().contains("Нет такой"));
        assert_eq!(store.list_entries().len(), 2);
    }

    #[test]
    fn edit_updates_same_id() {
        let mut store = StoreFixture::pharmacy().store;
        let mut session = Session::new();
        session.open_edit(&store, EntryId(2)).unwrap();
        session.set_field(FormField::Price, "₽3,500").unwrap();

        session.submit(&mut store, &defaults()).unwrap();
        let updated = store.get_entry(EntryId(2)).unwrap();
        assert_eq!(updated.price, "₽3,500");
        assert_eq!(updated.name, "NEURO-STIM");
    }

    #[test]
    fn submit_without_open_editor_fails() {
        let mut store = StoreFixture::pharmacy().store;
        let mut session = Session::new();
        assert!(matches!(
            session.submit(&mut store, &defaults()),
            Err(CatalogError::NoEntrySelected)
        ));
    }

    #[test]
    fn edit_of_unknown_entry_fails() {
        let store = StoreFixture::pharmacy().store;
        let mut session = Session::new();
        assert!(session.open_edit(&store, EntryId(9)).is_err());
        assert!(!session.editor().is_open());
    }

    #[test]
    fn delete_requires_confirmation() {
        let mut store = StoreFixture::pharmacy().store;
        let mut session = Session::new();

        let token = session.request_delete(&store, EntryId(2)).unwrap();
        assert_eq!(store.list_entries().len(), 2);
        assert_eq!(session.pending_delete(token), Some(EntryId(2)));

        session.confirm_delete(&mut store, token).unwrap();
        let ids: Vec<_> = store.list_entries().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![EntryId(1)]);
    }

    #[test]
    fn token_is_single_use() {
        let mut store = StoreFixture::pharmacy().store;
        let mut session = Session::new();
        let token = session.request_delete(&store, EntryId(1)).unwrap();
        session.confirm_delete(&mut store, token).unwrap();

        assert!(matches!(
            session.confirm_delete(&mut store, token),
            Err(CatalogError::UnknownConfirmation(_))
        ));
    }

    #[test]
    fn new_request_supersedes_old_token() {
        let store = StoreFixture::pharmacy().store;
        let mut session = Session::new();
        let first = session.request_delete(&store, EntryId(1)).unwrap();
        let second = session.request_delete(&store, EntryId(1)).unwrap();

        assert_eq!(session.pending_delete(first), None);
        assert_eq!(session.latest_pending_delete(), Some((second, EntryId(1))));
    }

    #[test]
    fn cancelled_delete_cannot_be_confirmed() {
        let mut store = StoreFixture::pharmacy().store;
        let mut session = Session::new();
        let token = session.request_delete(&store, EntryId(1)).unwrap();
        assert!(session.cancel_delete(token));
        assert!(session.confirm_delete(&mut store, token).is_err());
        assert_eq!(store.list_entries().len(), 2);
    }

    #[test]
    fn request_for_unknown_entry_fails() {
        let store = StoreFixture::pharmacy().store;
        let mut session = Session::new();
        assert!(matches!(
            session.request_delete(&store, EntryId(5)),
            Err(CatalogError::EntryNotFound(EntryId(5)))
        ));
    }

    #[test]
    fn deleting_the_edited_entry_closes_the_editor() {
        let mut store = StoreFixture::pharmacy().store;
        let mut session = Session::new();
        session.open_edit(&store, EntryId(1)).unwrap();
        let token = session.request_delete(&store, EntryId(1)).unwrap();
        session.confirm_delete(&mut store, token).unwrap();
        assert!(!session.editor().is_open());
    }

    #[test]
    fn token_parses_from_display() {
        let token = ConfirmationToken::new();
        assert_eq!(token.to_string().parse::<ConfirmationToken>().unwrap(), token);
        assert!("not-a-token".parse::<ConfirmationToken>().is_err());
    }
}
