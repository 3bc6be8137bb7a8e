//! Student stop record

use buspro_types::{Error, Result};
use serde::{Deserialize, Serialize};

/// One student pickup/drop-off stop
///
/// Field names on disk follow the camelCase shape of the stored roster
/// (`parentName`, `parentContact`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stop {
    /// Opaque id, fixed at creation
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Free text; also the navigation destination
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub parent_name: String,
    /// Free-text phone number
    #[serde(default)]
    pub parent_contact: String,
    #[serde(default)]
    pub notes: String,
}

/// Editable fields of a stop, without an id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopDraft {
    pub name: String,
    pub address: String,
    pub parent_name: String,
    pub parent_contact: String,
    pub notes: String,
}

impl Stop {
    pub fn from_draft(id: impl Into<String>, draft: StopDraft) -> Self {
        Self {
            id: id.into(),
            name: draft.name,
            address: draft.address,
            parent_name: draft.parent_name,
            parent_contact: draft.parent_contact,
            notes: draft.notes,
        }
    }
}

impl StopDraft {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    pub fn with_parent(mut self, name: impl Into<String>, contact: impl Into<String>) -> Self {
        self.parent_name = name.into();
        self.parent_contact = contact.into();
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}

/// A stop cannot be committed without a non-blank name
pub fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::InvalidStop("student name is required".to_string()));
    }
    Ok(())
}
