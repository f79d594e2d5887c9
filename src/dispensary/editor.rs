//! # Entry Editor
//!
//! Converts between the flat form a user fills in ([`EntryForm`]: plain
//! strings, comma-separated lists) and the structured [`NewEntry`].
//!
//! The editor also owns the per-session draft lifecycle:
//!
//! ```text
//! Closed ──open──▶ Open(prefilled | blank)
//!                    │ submit, valid   ──▶ Closed (committed)
//!                    │ submit, invalid ──▶ Open (error kept, nothing committed)
//!                    │ cancel          ──▶ Closed (discarded)
//! ```
//!
//! Only one draft exists at a time; opening a new one replaces the old.

use crate::error::{CatalogError, Result};
use crate::model::{ControlledStatus, Entry, EntryId, NewEntry, PrescriptionStatus};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

const LIST_SEPARATOR: char = ',';
const LIST_JOINER: &str = ", ";

/// Flat, user-facing representation of an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryForm {
    pub name: String,
    pub description: String,
    pub image: String,
    pub prescription: String,
    pub controlled: String,
    pub side_effects: String,
    pub tags: String,
    pub price: String,
    pub category: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Description,
    Image,
    Prescription,
    Controlled,
    SideEffects,
    Tags,
    Price,
    Category,
}

impl FormField {
    pub const ALL: [FormField; 9] = [
        FormField::Name,
        FormField::Description,
        FormField::Image,
        FormField::Prescription,
        FormField::Controlled,
        FormField::SideEffects,
        FormField::Tags,
        FormField::Price,
        FormField::Category,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Description => "description",
            FormField::Image => "image",
            FormField::Prescription => "prescription",
            FormField::Controlled => "controlled",
            FormField::SideEffects => "side_effects",
            FormField::Tags => "tags",
            FormField::Price => "price",
            FormField::Category => "category",
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(
            self,
            FormField::Name | FormField::Description | FormField::Price | FormField::Category
        )
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FormField {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace('-', "_");
        FormField::ALL
            .iter()
            .copied()
            .find(|f| f.key() == key)
            .ok_or_else(|| format!("unknown field '{}'", s.trim()))
    }
}

impl EntryForm {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Description => &self.description,
            FormField::Image => &self.image,
            FormField::Prescription => &self.prescription,
            FormField::Controlled => &self.controlled,
            FormField::SideEffects => &self.side_effects,
            FormField::Tags => &self.tags,
            FormField::Price => &self.price,
            FormField::Category => &self.category,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Name => self.name = value,
            FormField::Description => self.description = value,
            FormField::Image => self.image = value,
            FormField::Prescription => self.prescription = value,
            FormField::Controlled => self.controlled = value,
            FormField::SideEffects => self.side_effects = value,
            FormField::Tags => self.tags = value,
            FormField::Price => self.price = value,
            FormField::Category => self.category = value,
        }
    }

    /// Required fields that are empty after trimming, in declaration order.
    pub fn missing_fields(&self) -> Vec<FormField> {
        FormField::ALL
            .iter()
            .copied()
            .filter(|f| f.is_required() && self.get(*f).trim().is_empty())
            .collect()
    }
}

/// Values used for optional fields left blank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormDefaults {
    pub image: String,
}

impl FormDefaults {
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
        }
    }
}

/// Split a comma-separated list, trimming items and dropping empty ones.
/// Order and duplicates are kept.
pub fn split_list(input: &str) -> Vec<String> {
    input
        .split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

pub fn join_list(items: &[String]) -> String {
    items.join(LIST_JOINER)
}

pub fn entry_from_form(form: &EntryForm, defaults: &FormDefaults) -> Result<NewEntry> {
    let missing = form.missing_fields();
    if !missing.is_empty() {
        return Err(CatalogError::missing_fields(missing.iter().map(|f| f.key())));
    }

    let image = if form.image.trim().is_empty() {
        defaults.image.clone()
    } else {
        form.image.clone()
    };

    Ok(NewEntry {
        name: form.name.trim().to_string(),
        description: form.description.trim().to_string(),
        image,
        prescription: parse_or_default(FormField::Prescription, &form.prescription)?,
        controlled: parse_or_default::<ControlledStatus>(FormField::Controlled, &form.controlled)?,
        side_effects: split_list(&form.side_effects),
        tags: split_list(&form.tags),
        price: form.price.trim().to_string(),
        category: form.category.trim().to_string(),
    })
}

fn parse_or_default<T>(field: FormField, raw: &str) -> Result<T>
where
    T: FromStr + Default,
{
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(T::default());
    }
    raw.parse()
        .map_err(|_| CatalogError::invalid_field(field.key(), raw))
}

/// Bring an entry into the shape a form submission produces: text trimmed,
/// list items split on commas, blank image replaced by the default. Opening
/// a normalized entry in the editor and saving it unchanged is a no-op.
pub fn normalize(candidate: NewEntry, defaults: &FormDefaults) -> NewEntry {
    let image = if candidate.image.trim().is_empty() {
        defaults.image.clone()
    } else {
        candidate.image
    };
    NewEntry {
        name: candidate.name.trim().to_string(),
        description: candidate.description.trim().to_string(),
        image,
        prescription: candidate.prescription,
        controlled: candidate.controlled,
        side_effects: split_list(&join_list(&candidate.side_effects)),
        tags: split_list(&join_list(&candidate.tags)),
        price: candidate.price.trim().to_string(),
        category: candidate.category.trim().to_string(),
    }
}

pub fn form_from_entry(entry: &Entry) -> EntryForm {
    EntryForm {
        name: entry.name.clone(),
        description: entry.description.clone(),
        image: entry.image.clone(),
        prescription: entry.prescription.wire_name().to_string(),
        controlled: entry.controlled.wire_name().to_string(),
        side_effects: join_list(&entry.side_effects),
        tags: join_list(&entry.tags),
        price: entry.price.clone(),
        category: entry.category.clone(),
    }
}

/// A blank form with the enumerations pre-selected to their baseline.
pub fn blank_form(defaults: &FormDefaults) -> EntryForm {
    EntryForm {
        image: defaults.image.clone(),
        prescription: PrescriptionStatus::default().wire_name().to_string(),
        controlled: ControlledStatus::default().wire_name().to_string(),
        ..EntryForm::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit(EntryId),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditorState {
    #[default]
    Closed,
    Open {
        mode: EditorMode,
        form: EntryForm,
        error: Option<String>,
    },
}

/// What a successful submission asks the store to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Create(NewEntry),
    Update(EntryId, NewEntry),
}

impl EditorState {
    pub fn is_open(&self) -> bool {
        matches!(self, EditorState::Open { .. })
    }

    pub fn open_create(&mut self, defaults: &FormDefaults) {
        self.replace(EditorMode::Create, blank_form(defaults));
    }

    pub fn open_edit(&mut self, entry: &Entry) {
        self.replace(EditorMode::Edit(entry.id), form_from_entry(entry));
    }

    fn replace(&mut self, mode: EditorMode, form: EntryForm) {
        if self.is_open() {
            debug!("discarding unsaved draft");
        }
        debug!(?mode, "editor opened");
        *self = EditorState::Open {
            mode,
            form,
            error: None,
        };
    }

    pub fn mode(&self) -> Option<EditorMode> {
        match self {
            EditorState::Open { mode, .. } => Some(*mode),
            EditorState::Closed => None,
        }
    }

    pub fn form(&self) -> Option<&EntryForm> {
        match self {
            EditorState::Open { form, .. } => Some(form),
            EditorState::Closed => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            EditorState::Open { error, .. } => error.as_deref(),
            EditorState::Closed => None,
        }
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) -> Result<()> {
        match self {
            EditorState::Open { form, .. } => {
                form.set(field, value);
                Ok(())
            }
            EditorState::Closed => Err(CatalogError::NoEntrySelected),
        }
    }

    /// Validate the open draft. On success the editor stays open until
    /// [`EditorState::commit`]; on failure the error is recorded on the draft.
    pub fn submit(&mut self, defaults: &FormDefaults) -> Result<Submission> {
        let EditorState::Open { mode, form, error } = self else {
            return Err(CatalogError::NoEntrySelected);
        };

        match entry_from_form(form, defaults) {
            Ok(entry) => {
                *error = None;
                Ok(match mode {
                    EditorMode::Create => Submission::Create(entry),
                    EditorMode::Edit(id) => Submission::Update(*id, entry),
                })
            }
            Err(err) => {
                *error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Record a failure that happened after validation (e.g. at the store).
    pub fn reject(&mut self, err: &CatalogError) {
        if let EditorState::Open { error, .. } = self {
            *error = Some(err.to_string());
        }
    }

    pub fn commit(&mut self) {
        debug!("editor committed");
        *self = EditorState::Closed;
    }

    pub fn cancel(&mut self) {
        if self.is_open() {
            debug!("editor cancelled");
        }
        *self = EditorState::Closed;
    }
}
