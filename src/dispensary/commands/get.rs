use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::EntryId;
use crate::store::CatalogStore;

pub fn run<S: CatalogStore>(store: &S, ids: &[EntryId]) -> Result<CmdResult> {
    let entries = ids
        .iter()
        .map(|id| store.get_entry(*id))
        .collect::<Result<Vec<_>>>()?;
    Ok(CmdResult::default().with_listed_entries(entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogError;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn returns_requested_entries_in_request_order() {
        let store = StoreFixture::pharmacy().store;
        let result = run(&store, &[EntryId(2), EntryId(1)]).unwrap();
        let names: Vec<_> = result.listed_entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["NEURO-STIM", "CYBERPAIN-X"]);
    }

    #[test]
    fn fails_on_unknown_id() {
        let store = StoreFixture::pharmacy().store;
        let err = run(&store, &[EntryId(1), EntryId(5)]).unwrap_err();
        assert!(matches!(err, CatalogError::EntryNotFound(EntryId(5))));
    }
}
