use super::CatalogStore;
use crate::error::{CatalogError, Result};
use crate::model::{Entry, EntryId, NewEntry};
use tracing::info;

/// In-memory catalog. Entries keep insertion order.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: Vec<Entry>,
    categories: Vec<String>,
    // Highest id ever issued; guards against reuse after removals.
    last_id: u64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> EntryId {
        let max_held = self.entries.iter().map(|e| e.id.0).max().unwrap_or(0);
        self.last_id = self.last_id.max(max_held) + 1;
        EntryId(self.last_id)
    }

    fn position(&self, id: EntryId) -> Result<usize> {
        self.entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(CatalogError::EntryNotFound(id))
    }
}

impl CatalogStore for InMemoryStore {
    fn add_entry(&mut self, candidate: NewEntry) -> Entry {
        let id = self.next_id();
        let entry = Entry::new(id, candidate);
        self.entries.push(entry.clone());
        info!(id = %id, name = %entry.name, "entry added");
        entry
    }

    fn update_entry(&mut self, id: EntryId, patch: NewEntry) -> Result<Entry> {
        let pos = self.position(id)?;
        let entry = Entry::new(id, patch);
        self.entries[pos] = entry.clone();
        info!(id = %id, name = %entry.name, "entry updated");
        Ok(entry)
    }

    fn remove_entry(&mut self, id: EntryId) -> Result<Entry> {
        let pos = self.position(id)?;
        let removed = self.entries.remove(pos);
        info!(id = %id, name = %removed.name, "entry removed");
        Ok(removed)
    }

    fn get_entry(&self, id: EntryId) -> Result<Entry> {
        let pos = self.position(id)?;
        Ok(self.entries[pos].clone())
    }

    fn add_category(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.categories.iter().any(|c| c == name) {
            return false;
        }
        self.categories.push(name.to_string());
        info!(category = name, "category added");
        true
    }

    fn list_entries(&self) -> Vec<Entry> {
        self.entries.clone()
    }

    fn list_categories(&self) -> Vec<String> {
        self.categories.clone()
    }

    fn has_category(&self, name: &str) -> bool {
        self.categories.iter().any(|c| c == name)
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{ControlledStatus, PrescriptionStatus};

    pub fn entry(name: &str, tags: &[&str]) -> NewEntry {
        NewEntry {
            name: name.to_string(),
            description: format!("Description of {}", name),
            image: "/img/test.jpg".to_string(),
            prescription: PrescriptionStatus::RequiresPrescription,
            controlled: ControlledStatus::NotControlled,
            side_effects: vec!["Nausea".to_string()],
            tags: tags.iter().map(|t| t.to_string()).collect(),
            price: "₽100".to_string(),
            category: String::new(),
        }
    }

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_entry(mut self, name: &str, tags: &[&str]) -> Self {
            self.store.add_entry(entry(name, tags));
            self
        }

        pub fn with_categorized_entry(mut self, name: &str, category: &str) -> Self {
            let mut candidate = entry(name, &[]);
            candidate.category = category.to_string();
            self.store.add_entry(candidate);
            self
        }

        pub fn with_category(mut self, name: &str) -> Self {
            self.store.add_category(name);
            self
        }

        /// The two-entry catalog used throughout the query tests.
        pub fn pharmacy() -> Self {
            let mut fixture = Self::new()
                .with_category("Обезболивающие")
                .with_category("Ноотропы");

            let mut pain = entry("CYBERPAIN-X", &["обезболивающее", "рецептурное"]);
            pain.description = "Мощное обезболивающее нового поколения".to_string();
            pain.category = "Обезболивающие".to_string();
            fixture.store.add_entry(pain);

            let mut neuro = entry("NEURO-STIM", &["ноотроп"]);
            neuro.description = "Препарат для улучшения мозговой активности".to_string();
            neuro.category = "Ноотропы".to_string();
            fixture.store.add_entry(neuro);

            fixture
        }
    }
}
