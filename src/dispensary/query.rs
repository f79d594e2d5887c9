//! # Query Engine
//!
//! Computes the visible subset of the catalog from three independent filter
//! axes:
//!
//! - **text**: case-insensitive substring of the name or the description
//! - **tags**: the entry carries at least one of the selected tags (OR)
//! - **category**: exact, case-sensitive match
//!
//! An entry is visible when all three axes match. Empty inputs on an axis
//! match everything. Filtering is stable: the result keeps store order.

use crate::model::Entry;
use std::collections::HashSet;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub search_term: String,
    pub selected_tags: Vec<String>,
    /// `None` or an empty string means all categories.
    pub selected_category: Option<String>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.selected_tags.push(tag.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.selected_category = Some(category.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.search_term.is_empty()
            && self.selected_tags.is_empty()
            && self.category_filter().is_none()
    }

    fn category_filter(&self) -> Option<&str> {
        self.selected_category.as_deref().filter(|c| !c.is_empty())
    }

    pub fn matches(&self, entry: &Entry) -> bool {
        self.matches_text(entry) && self.matches_tags(entry) && self.matches_category(entry)
    }

    fn matches_text(&self, entry: &Entry) -> bool {
        if self.search_term.is_empty() {
            return true;
        }
        let needle = self.search_term.to_lowercase();
        entry.name.to_lowercase().contains(&needle)
            || entry.description.to_lowercase().contains(&needle)
    }

    fn matches_tags(&self, entry: &Entry) -> bool {
        self.selected_tags.is_empty() || self.selected_tags.iter().any(|t| entry.has_tag(t))
    }

    fn matches_category(&self, entry: &Entry) -> bool {
        match self.category_filter() {
            None => true,
            Some(category) => entry.category == category,
        }
    }
}

pub fn filter(entries: &[Entry], query: &Query) -> Vec<Entry> {
    let visible: Vec<Entry> = entries
        .iter()
        .filter(|e| query.matches(e))
        .cloned()
        .collect();
    debug!(
        total = entries.len(),
        visible = visible.len(),
        term = %query.search_term,
        "filter evaluated"
    );
    visible
}

/// Union of all entries' tags, in first-seen order.
pub fn distinct_tags(entries: &[Entry]) -> Vec<String> {
    let mut seen = HashSet::new();
    entries
        .iter()
        .flat_map(|e| e.tags.iter())
        .filter(|t| seen.insert(t.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EntryId;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::CatalogStore;

    fn catalog() -> Vec<Entry> {
        StoreFixture::pharmacy().store.list_entries()
    }

    fn ids(entries: &[Entry]) -> Vec<u64> {
        entries.iter().map(|e| e.id.0).collect()
    }

    #[test]
    fn empty_query_returns_everything_in_order() {
        let entries = catalog();
        assert_eq!(filter(&entries, &Query::new()), entries);
    }

    #[test]
    fn search_is_case_insensitive_on_name() {
        let result = filter(&catalog(), &Query::new().search("neuro"));
        assert_eq!(ids(&result), vec![2]);
    }

    #[test]
    fn search_matches_description_in_cyrillic() {
        let result = filter(&catalog(), &Query::new().search("МОЗГОВОЙ"));
        assert_eq!(ids(&result), vec![2]);
    }

    #[test]
    fn search_without_match_is_empty() {
        assert!(filter(&catalog(), &Query::new().search("aspirin")).is_empty());
    }

    #[test]
    fn single_tag_selects_carriers() {
        let result = filter(&catalog(), &Query::new().tag("рецептурное"));
        assert_eq!(ids(&result), vec![1]);
    }

    #[test]
    fn tags_combine_with_or() {
        let query = Query::new().tag("рецептурное").tag("ноотроп");
        assert_eq!(ids(&filter(&catalog(), &query)), vec![1, 2]);
    }

    #[test]
    fn tag_match_is_exact() {
        assert!(filter(&catalog(), &Query::new().tag("НООТРОП")).is_empty());
    }

    #[test]
    fn category_is_exact_and_case_sensitive() {
        let entries = catalog();
        assert_eq!(
            ids(&filter(&entries, &Query::new().category("Ноотропы"))),
            vec![2]
        );
        assert!(filter(&entries, &Query::new().category("ноотропы")).is_empty());
    }

    #[test]
    fn empty_category_means_all() {
        let entries = catalog();
        assert_eq!(filter(&entries, &Query::new().category("")).len(), 2);
    }

    #[test]
    fn axes_combine_with_and() {
        let query = Query::new().search("x").tag("ноотроп");
        assert!(filter(&catalog(), &query).is_empty());

        let query = Query::new().search("x").tag("рецептурное").category("Обезболивающие");
        assert_eq!(ids(&filter(&catalog(), &query)), vec![1]);
    }

    #[test]
    fn distinct_tags_keep_first_seen_order() {
        let mut entries = catalog();
        let mut extra = entries[0].clone();
        extra.id = EntryId(3);
        extra.tags = vec!["ноотроп".into(), "новинка".into(), "новинка".into()];
        entries.push(extra);

        assert_eq!(
            distinct_tags(&entries),
            vec!["обезболивающее", "рецептурное", "ноотроп", "новинка"]
        );
    }

    #[test]
    fn distinct_tags_of_empty_catalog() {
        assert!(distinct_tags(&[]).is_empty());
    }

    #[test]
    fn is_empty_ignores_blank_category() {
        assert!(Query::new().category("").is_empty());
        assert!(!Query::new().search("a").is_empty());
    }
}
