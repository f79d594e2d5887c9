use crate::commands::{CmdMessage, CmdResult};
use crate::store::CatalogStore;

pub fn list<S: CatalogStore>(store: &S) -> CmdResult {
    CmdResult::default().with_categories(store.list_categories())
}

/// Append a category. A duplicate or blank name is reported, not failed.
pub fn add<S: CatalogStore>(store: &mut S, name: &str) -> (bool, CmdResult) {
    let added = store.add_category(name);
    let mut result = list(&*store);
    if added {
        result.add_message(CmdMessage::success(format!(
            "Category added: {}",
            name.trim()
        )));
    } else if name.trim().is_empty() {
        result.add_message(CmdMessage::error("Category name cannot be empty"));
    } else {
        result.add_message(CmdMessage::warning(format!(
            "Category already exists: {}",
            name.trim()
        )));
    }
    (added, result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn adds_new_category() {
        let mut store = StoreFixture::new().store;
        let (added, result) = add(&mut store, "Витамины");
        assert!(added);
        assert_eq!(result.categories, vec!["Витамины"]);
        assert_eq!(result.messages[0].level, MessageLevel::Success);
    }

    #[test]
    fn duplicate_is_a_noop() {
        let mut store = StoreFixture::new().with_category("Витамины").store;
        let (added, result) = add(&mut store, "Витамины");
        assert!(!added);
        assert_eq!(result.categories.len(), 1);
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
    }

    #[test]
    fn blank_name_is_reported_as_an_error() {
        let mut store = StoreFixture::new().store;
        let (added, result) = add(&mut store, "   ");
        assert!(!added);
        assert!(result.categories.is_empty());
        assert_eq!(result.messages[0].level, MessageLevel::Error);
        assert_eq!(result.messages[0].content, "Category name cannot be empty");
    }
}
