use crate::model::EntryId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    /// Required form fields were empty (`missing`), or filled fields could
    /// not be parsed (`invalid`).
    #[error("{message}")]
    Validation {
        missing: Vec<String>,
        invalid: Vec<String>,
        message: String,
    },

    #[error("Entry not found: {0}")]
    EntryNotFound(EntryId),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("No entry is open for editing")]
    NoEntrySelected,

    #[error("Unknown or expired confirmation: {0}")]
    UnknownConfirmation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

pub const FILL_REQUIRED_FIELDS: &str = "fill in all required fields";

impl CatalogError {
    pub fn missing_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let missing: Vec<String> = fields.into_iter().map(Into::into).collect();
        Self::Validation {
            message: format!("{} ({})", FILL_REQUIRED_FIELDS, missing.join(", ")),
            missing,
            invalid: Vec::new(),
        }
    }

    pub fn invalid_field(field: &str, value: &str) -> Self {
        Self::Validation {
            missing: Vec::new(),
            invalid: vec![field.to_string()],
            message: format!("invalid value for {}: '{}'", field, value),
        }
    }

    /// Errors the user fixes by correcting the form: bad field values, or
    /// submitting with no draft open.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CatalogError::Validation { .. } | CatalogError::NoEntrySelected
        )
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_message_lists_fields() {
        let err = CatalogError::missing_fields(["price", "category"]);
        assert_eq!(
            err.to_string(),
            "fill in all required fields (price, category)"
        );
        assert!(err.is_validation());
    }

    #[test]
    fn unparseable_field_is_invalid_not_missing() {
        let err = CatalogError::invalid_field("controlled", "sometimes");
        let CatalogError::Validation { missing, invalid, .. } = &err else {
            panic!("expected validation error");
        };
        assert!(missing.is_empty());
        assert_eq!(invalid, &vec!["controlled".to_string()]);
        assert!(err.is_validation());
    }

    #[test]
    fn submitting_without_a_draft_is_a_validation_failure() {
        assert!(CatalogError::NoEntrySelected.is_validation());
    }

    #[test]
    fn not_found_displays_id() {
        let err = CatalogError::EntryNotFound(EntryId(7));
        assert_eq!(err.to_string(), "Entry not found: 7");
        assert!(!err.is_validation());
    }
}
