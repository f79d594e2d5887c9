use crate::commands::{CmdMessage, CmdResult};
use crate::query::{filter, Query};
use crate::store::CatalogStore;

pub fn run<S: CatalogStore>(store: &S, query: &Query) -> CmdResult {
    let entries = store.list_entries();
    let listed = filter(&entries, query);

    let mut result = CmdResult::default();
    if listed.is_empty() && !entries.is_empty() {
        result.add_message(CmdMessage::info(
            "Try a different search term or filters.",
        ));
    }
    result.with_listed_entries(listed)
}
