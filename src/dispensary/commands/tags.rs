use crate::commands::CmdResult;
use crate::query::distinct_tags;
use crate::store::CatalogStore;

/// Tags offered by the filter UI, recomputed from the current entries.
pub fn run<S: CatalogStore>(store: &S) -> CmdResult {
    CmdResult::default().with_tags(distinct_tags(&store.list_entries()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EntryId;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn lists_union_of_tags() {
        let store = StoreFixture::pharmacy().store;
        assert_eq!(
            run(&store).tags,
            vec!["обезболивающее", "рецептурное", "ноотроп"]
        );
    }

    #[test]
    fn follows_removals() {
        let mut store = StoreFixture::pharmacy().store;
        store.remove_entry(EntryId(1)).unwrap();
        assert_eq!(run(&store).tags, vec!["ноотроп"]);
    }
}
