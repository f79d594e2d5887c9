use crate::commands::create::ensure_known_category;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{EntryId, NewEntry};
use crate::store::CatalogStore;

pub fn run<S: CatalogStore>(store: &mut S, id: EntryId, patch: NewEntry) -> Result<CmdResult> {
    // Fail on a stale id before looking at the patch.
    store.get_entry(id)?;
    ensure_known_category(&*store, &patch.category)?;

    let entry = store.update_entry(id, patch)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Entry updated ({}): {}",
        entry.id, entry.name
    )));
    Ok(result.with_affected_entries(vec![entry]))
}
