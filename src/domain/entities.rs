//! Domain entities: hierarchy records as they appear in a document

use serde::{Deserialize, Deserializer};

use crate::domain::error::{DomainError, TreeResult};

/// One node of a hierarchy document, linked to its parent by id.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NodeRecord {
    /// Unique id; integers are accepted and kept as their decimal text
    #[serde(deserialize_with = "id_from_text_or_number")]
    pub id: String,
    /// Display label
    pub label: String,
    /// Parent id, None for roots
    #[serde(default, deserialize_with = "optional_id_from_text_or_number")]
    pub parent: Option<String>,
    /// Not yet persisted; such a mover may be placed anywhere
    #[serde(default, rename = "new")]
    pub is_new: bool,
}

impl NodeRecord {
    pub fn new(id: impl Into<String>, label: impl Into<String>, parent: Option<&str>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            parent: parent.map(str::to_string),
            is_new: false,
        }
    }
}

/// Hierarchy document: `[[node]]` tables in document order.
///
/// ```toml
/// [[node]]
/// id = "1"
/// label = "Electronics"
///
/// [[node]]
/// id = "2"
/// label = "Phones"
/// parent = "1"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct HierarchyDocument {
    #[serde(default, rename = "node")]
    pub nodes: Vec<NodeRecord>,
}

impl HierarchyDocument {
    /// Parse document content.
    pub fn parse(content: &str) -> TreeResult<Self> {
        toml::from_str(content).map_err(|e| DomainError::InvalidDocument {
            message: e.to_string(),
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

fn id_from_text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer).map(String::from)
}

fn optional_id_from_text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<RawId>::deserialize(deserializer).map(|raw| raw.map(String::from))
}

/// Expand environment variables in a path string.
///
/// Supports:
/// - `$VAR` syntax
/// - `${VAR}` syntax
/// - `~` for home directory
///
/// Uses shellexpand crate for robust expansion.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_numeric_ids_when_parsing_then_keeps_decimal_text() {
        let doc = HierarchyDocument::parse(
            r#"
[[node]]
id = 1
label = "Root"

[[node]]
id = 2
label = "Child"
parent = 1
new = true
"#,
        )
        .unwrap();

        assert_eq!(doc.nodes.len(), 2);
        assert_eq!(doc.nodes[0], NodeRecord::new("1", "Root", None));
        assert_eq!(doc.nodes[1].parent.as_deref(), Some("1"));
        assert!(doc.nodes[1].is_new);
    }

    #[test]
    fn given_empty_content_when_parsing_then_returns_empty_document() {
        let doc = HierarchyDocument::parse("").unwrap();
        assert!(doc.nodes.is_empty());
    }

    #[test]
    fn given_record_without_label_when_parsing_then_invalid_document() {
        let result = HierarchyDocument::parse("[[node]]\nid = \"1\"\n");
        assert!(matches!(result, Err(DomainError::InvalidDocument { .. })));
    }
}
