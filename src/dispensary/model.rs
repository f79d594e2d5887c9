use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Store-assigned entry identifier. Always positive, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntryId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().parse::<u64>() {
            Ok(n) if n > 0 => Ok(EntryId(n)),
            _ => Err(format!("'{}' is not a valid entry id", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrescriptionStatus {
    #[default]
    RequiresPrescription,
    OverTheCounter,
}

impl PrescriptionStatus {
    pub const ALL: [PrescriptionStatus; 2] = [
        PrescriptionStatus::RequiresPrescription,
        PrescriptionStatus::OverTheCounter,
    ];

    pub fn wire_name(&self) -> &'static str {
        match self {
            PrescriptionStatus::RequiresPrescription => "requires_prescription",
            PrescriptionStatus::OverTheCounter => "over_the_counter",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PrescriptionStatus::RequiresPrescription => "Requires prescription",
            PrescriptionStatus::OverTheCounter => "Over the counter",
        }
    }
}

impl fmt::Display for PrescriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PrescriptionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_status(s, &Self::ALL, |v| (v.wire_name(), v.label()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlledStatus {
    #[default]
    NotControlled,
    Controlled,
}

impl ControlledStatus {
    pub const ALL: [ControlledStatus; 2] =
        [ControlledStatus::NotControlled, ControlledStatus::Controlled];

    pub fn wire_name(&self) -> &'static str {
        match self {
            ControlledStatus::NotControlled => "not_controlled",
            ControlledStatus::Controlled => "controlled",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ControlledStatus::NotControlled => "No controlled substances",
            ControlledStatus::Controlled => "Contains controlled substances",
        }
    }
}

impl fmt::Display for ControlledStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ControlledStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_status(s, &Self::ALL, |v| (v.wire_name(), v.label()))
    }
}

// Accepts the wire name or the label, ignoring case and surrounding whitespace.
fn parse_status<T: Copy>(
    input: &str,
    all: &[T],
    names: impl Fn(&T) -> (&'static str, &'static str),
) -> Result<T, String> {
    let needle = input.trim().to_lowercase();
    all.iter()
        .copied()
        .find(|v| {
            let (wire, label) = names(v);
            wire == needle || label.to_lowercase() == needle
        })
        .ok_or_else(|| format!("unknown status '{}'", input.trim()))
}

/// An entry as submitted for creation or as the replacement fields of an
/// update. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEntry {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub prescription: PrescriptionStatus,
    #[serde(default)]
    pub controlled: ControlledStatus,
    #[serde(default)]
    pub side_effects: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    pub name: String,
    pub description: String,
    pub image: String,
    pub prescription: PrescriptionStatus,
    pub controlled: ControlledStatus,
    pub side_effects: Vec<String>,
    pub tags: Vec<String>,
    pub price: String,
    pub category: String,
}

impl Entry {
    pub fn new(id: EntryId, fields: NewEntry) -> Self {
        let NewEntry {
            name,
            description,
            image,
            prescription,
            controlled,
            side_effects,
            tags,
            price,
            category,
        } = fields;
        Self {
            id,
            name,
            description,
            image,
            prescription,
            controlled,
            side_effects,
            tags,
            price,
            category,
        }
    }

    /// The entry's fields without its id.
    pub fn fields(&self) -> NewEntry {
        NewEntry {
            name: self.name.clone(),
            description: self.description.clone(),
            image: self.image.clone(),
            prescription: self.prescription,
            controlled: self.controlled,
            side_effects: self.side_effects.clone(),
            tags: self.tags.clone(),
            price: self.price.clone(),
            category: self.category.clone(),
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_id_parses_positive_integers_only() {
        assert_eq!("3".parse::<EntryId>(), Ok(EntryId(3)));
        assert_eq!(" 12 ".parse::<EntryId>(), Ok(EntryId(12)));
        assert!("0".parse::<EntryId>().is_err());
        assert!("-1".parse::<EntryId>().is_err());
        assert!("abc".parse::<EntryId>().is_err());
    }

    #[test]
    fn statuses_parse_from_wire_name_and_label() {
        assert_eq!(
            "over_the_counter".parse::<PrescriptionStatus>(),
            Ok(PrescriptionStatus::OverTheCounter)
        );
        assert_eq!(
            "Requires Prescription".parse::<PrescriptionStatus>(),
            Ok(PrescriptionStatus::RequiresPrescription)
        );
        assert_eq!(
            "contains controlled substances".parse::<ControlledStatus>(),
            Ok(ControlledStatus::Controlled)
        );
        assert!("maybe".parse::<ControlledStatus>().is_err());
    }

    #[test]
    fn statuses_default_to_baseline() {
        assert_eq!(
            PrescriptionStatus::default(),
            PrescriptionStatus::RequiresPrescription
        );
        assert_eq!(ControlledStatus::default(), ControlledStatus::NotControlled);
    }

    #[test]
    fn new_entry_deserializes_with_defaults() {
        let json = r#"{"name": "ZEN-CALM", "tags": ["sedative"]}"#;
        let entry: NewEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.name, "ZEN-CALM");
        assert_eq!(entry.tags, vec!["sedative"]);
        assert_eq!(entry.prescription, PrescriptionStatus::RequiresPrescription);
        assert!(entry.side_effects.is_empty());
    }

    #[test]
    fn fields_drop_only_the_id() {
        let fields = NewEntry {
            name: "A".into(),
            description: "d".into(),
            image: "/img/a.jpg".into(),
            prescription: PrescriptionStatus::OverTheCounter,
            controlled: ControlledStatus::Controlled,
            side_effects: vec!["x".into()],
            tags: vec!["t".into(), "t".into()],
            price: "₽1".into(),
            category: "C".into(),
        };
        let entry = Entry::new(EntryId(4), fields.clone());
        assert_eq!(entry.fields(), fields);
        assert!(entry.has_tag("t"));
        assert!(!entry.has_tag("T"));
    }
}
