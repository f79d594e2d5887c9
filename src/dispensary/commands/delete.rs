use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::EntryId;
use crate::store::CatalogStore;

/// Remove an entry. Callers are expected to have confirmed with the user.
pub fn run<S: CatalogStore>(store: &mut S, id: EntryId) -> Result<CmdResult> {
    let removed = store.remove_entry(id)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Entry deleted ({}): {}",
        removed.id, removed.name
    )));
    Ok(result.with_affected_entries(vec![removed]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogError;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn removes_without_renumbering() {
        let mut store = StoreFixture::pharmacy().store;
        run(&mut store, EntryId(2)).unwrap();

        let entries = store.list_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, EntryId(1));
    }

    #[test]
    fn unknown_id_fails() {
        let mut store = StoreFixture::pharmacy().store;
        assert!(matches!(
            run(&mut store, EntryId(3)),
            Err(CatalogError::EntryNotFound(EntryId(3)))
        ));
    }
}
