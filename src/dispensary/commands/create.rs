use crate::commands::{CmdMessage, CmdResult};
use crate::error::{CatalogError, Result};
use crate::model::NewEntry;
use crate::store::CatalogStore;

pub fn run<S: CatalogStore>(store: &mut S, candidate: NewEntry) -> Result<CmdResult> {
    ensure_known_category(&*store, &candidate.category)?;

    let entry = store.add_entry(candidate);
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Entry created ({}): {}",
        entry.id, entry.name
    )));
    Ok(result.with_affected_entries(vec![entry]))
}

pub(crate) fn ensure_known_category<S: CatalogStore>(store: &S, category: &str) -> Result<()> {
    if store.has_category(category) {
        Ok(())
    } else {
        Err(CatalogError::UnknownCategory(category.to_string()))
    }
}
