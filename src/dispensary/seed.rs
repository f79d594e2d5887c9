//! Seed data used to initialize the store.
//!
//! The built-in catalog is the storefront's baseline. A JSON file with the
//! same shape can replace it:
//!
//! ```json
//! {
//!   "categories": ["Витамины"],
//!   "entries": [{ "name": "VITA-MAX", "category": "Витамины", "price": "₽500" }]
//! }
//! ```
//!
//! Entries in a seed never carry ids; the store assigns them in file order.

use crate::editor::{normalize, FormDefaults};
use crate::error::Result;
use crate::model::{ControlledStatus, NewEntry, PrescriptionStatus};
use crate::store::memory::InMemoryStore;
use crate::store::CatalogStore;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

pub const DEFAULT_IMAGES: [&str; 3] = [
    "/img/9112c8ff-5cc8-40a8-9278-17fbab3219d3.jpg",
    "/img/318d54b0-c6a9-44a8-99ac-cd408414aa7c.jpg",
    "/img/9cd02c7b-e52b-487a-ba23-03844c70036f.jpg",
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedCatalog {
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub entries: Vec<NewEntry>,
}

static BUILTIN: Lazy<SeedCatalog> = Lazy::new(|| SeedCatalog {
    categories: vec![
        "Обезболивающие".to_string(),
        "Ноотропы".to_string(),
        "Противовирусные".to_string(),
        "Витамины".to_string(),
    ],
    entries: vec![
        NewEntry {
            name: "CYBERPAIN-X".to_string(),
            description: "Мощное обезболивающее нового поколения с нанотехнологиями".to_string(),
            image: DEFAULT_IMAGES[0].to_string(),
            prescription: PrescriptionStatus::RequiresPrescription,
            controlled: ControlledStatus::NotControlled,
            side_effects: strings(&["Головокружение", "Сонливость", "Тошнота"]),
            tags: strings(&["обезболивающее", "рецептурное", "нанотех"]),
            price: "₽2,500".to_string(),
            category: "Обезболивающие".to_string(),
        },
        NewEntry {
            name: "NEURO-STIM".to_string(),
            description: "Препарат для улучшения мозговой активности и концентрации".to_string(),
            image: DEFAULT_IMAGES[1].to_string(),
            prescription: PrescriptionStatus::OverTheCounter,
            controlled: ControlledStatus::Controlled,
            side_effects: strings(&[
                "Бессонница",
                "Повышенная активность",
                "Учащенное сердцебиение",
            ]),
            tags: strings(&["ноотроп", "стимулятор", "концентрация"]),
            price: "₽3,200".to_string(),
            category: "Ноотропы".to_string(),
        },
        NewEntry {
            name: "VIRUS-SHIELD".to_string(),
            description: "Инновационная противовирусная терапия последнего поколения".to_string(),
            image: DEFAULT_IMAGES[2].to_string(),
            prescription: PrescriptionStatus::RequiresPrescription,
            controlled: ControlledStatus::NotControlled,
            side_effects: strings(&["Слабость", "Повышение температуры", "Головная боль"]),
            tags: strings(&["противовирусное", "иммунитет", "рецептурное"]),
            price: "₽4,100".to_string(),
            category: "Противовирусные".to_string(),
        },
    ],
});

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl SeedCatalog {
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let seed: SeedCatalog = serde_json::from_str(&content)?;
        debug!(
            path = %path.as_ref().display(),
            entries = seed.entries.len(),
            "seed loaded"
        );
        Ok(seed)
    }

    /// Build a store from the seed. Entries are normalized to the shape the
    /// editor produces. Seed entries are trusted configuration otherwise: a
    /// category referenced by an entry but not listed is kept on the entry
    /// and logged.
    pub fn into_store(self, defaults: &FormDefaults) -> InMemoryStore {
        let mut store = InMemoryStore::new();
        for category in &self.categories {
            if !store.add_category(category) {
                warn!(category = %category, "duplicate or blank seed category skipped");
            }
        }
        for entry in self.entries {
            let entry = normalize(entry, defaults);
            if !entry.category.is_empty() && !store.has_category(&entry.category) {
                warn!(
                    name = %entry.name,
                    category = %entry.category,
                    "seed entry references an unlisted category"
                );
            }
            store.add_entry(entry);
        }
        store
    }
}
