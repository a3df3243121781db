//! Sheet and project models
//!
//! A [`SheetRef`] is the core's view of one host sheet: a stable id, the
//! user-facing number and name, and whatever attributes the host chose to
//! expose. [`ProjectInfo`] carries the project-scoped equivalents. Both are
//! immutable for the duration of a batch.

use super::ids::SheetId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Named attribute lookup
///
/// Used for both sheet-scoped and project-scoped token resolution. A
/// `Some("")` result means the attribute exists but is empty; it still
/// counts as a match.
pub trait AttributeProvider {
    /// Looks up an attribute by its display name
    fn lookup(&self, name: &str) -> Option<String>;
}

impl AttributeProvider for BTreeMap<String, String> {
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Handle to a host sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetRef {
    /// Host-assigned identifier
    pub id: SheetId,

    /// Sheet number as shown to users (not guaranteed unique mid-renumbering)
    pub number: String,

    /// Sheet name
    #[serde(default)]
    pub name: String,

    /// Host-provided attributes, already formatted for display
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl SheetRef {
    /// Creates a sheet with no extra attributes
    pub fn new(id: SheetId, number: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            number: number.into(),
            name: name.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Adds an attribute
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Short label for logs and status lines
    pub fn label(&self) -> &str {
        if self.number.is_empty() {
            self.id.as_str()
        } else {
            &self.number
        }
    }
}

impl AttributeProvider for SheetRef {
    fn lookup(&self, name: &str) -> Option<String> {
        self.attributes.lookup(name)
    }
}

/// Project-level information
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectInfo {
    /// Project number, if the host has one
    #[serde(default)]
    pub number: Option<String>,

    /// Project name, if the host has one
    #[serde(default)]
    pub name: Option<String>,

    /// Project-scoped attributes
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl ProjectInfo {
    /// Creates project info with number and name
    pub fn new(number: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            number: Some(number.into()),
            name: Some(name.into()),
            attributes: BTreeMap::new(),
        }
    }

    /// Adds an attribute
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }
}

impl AttributeProvider for ProjectInfo {
    fn lookup(&self, name: &str) -> Option<String> {
        self.attributes.lookup(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet() -> SheetRef {
        SheetRef::new(SheetId::new("1001").unwrap(), "A101", "Floor Plan")
    }

    #[test]
    fn test_sheet_lookup() {
        let sheet = sheet().with_attribute("Drawn By", "JD");
        assert_eq!(sheet.lookup("Drawn By"), Some("JD".to_string()));
        assert_eq!(sheet.lookup("Checked By"), None);
    }

    #[test]
    fn test_empty_attribute_still_matches() {
        let sheet = sheet().with_attribute("Revision", "");
        assert_eq!(sheet.lookup("Revision"), Some(String::new()));
    }

    #[test]
    fn test_sheet_label_falls_back_to_id() {
        let sheet = SheetRef::new(SheetId::new("1001").unwrap(), "", "Cover");
        assert_eq!(sheet.label(), "1001");
        assert_eq!(super::tests::sheet().label(), "A101");
    }

    #[test]
    fn test_project_lookup() {
        let project = ProjectInfo::new("P-204", "Harbour Tower").with_attribute("Client", "ACME");
        assert_eq!(project.lookup("Client"), Some("ACME".to_string()));
        assert_eq!(project.number.as_deref(), Some("P-204"));
    }
}
