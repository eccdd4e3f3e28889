use super::model::Schema;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One uploaded node class as listed by the backend's palette endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryNode {
    #[serde(alias = "nodeType")]
    pub node_type: String,
    pub label: String,
    #[serde(alias = "fileId")]
    pub file_id: String,
    #[serde(alias = "className")]
    pub class_name: String,
    #[serde(alias = "fileName")]
    pub file_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub color: String,
    pub schema: Schema,
}

/// The side palette's collection of library nodes, keyed by file name.
///
/// These entries are the shared class-level defaults; placed canvas nodes
/// carry their own schema snapshots and are not affected by edits here.
#[derive(Debug, Clone, Default)]
pub struct SchemaLibrary {
    entries: IndexMap<String, LibraryNode>,
}

impl SchemaLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the palette wholesale from a fresh backend listing.
    pub fn replace_all(&mut self, nodes: Vec<LibraryNode>) {
        self.entries = nodes
            .into_iter()
            .map(|node| (node.file_name.clone(), node))
            .collect();
    }

    pub fn insert(&mut self, node: LibraryNode) {
        self.entries.insert(node.file_name.clone(), node);
    }

    pub fn get(&self, file_name: &str) -> Option<&LibraryNode> {
        self.entries.get(file_name)
    }

    pub fn schema_mut(&mut self, file_name: &str) -> Option<&mut Schema> {
        self.entries.get_mut(file_name).map(|node| &mut node.schema)
    }

    /// Overwrites one entry's schema with the server's canonical copy.
    pub fn replace_schema(&mut self, file_name: &str, schema: Schema) -> bool {
        match self.entries.get_mut(file_name) {
            Some(node) => {
                node.schema = schema;
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &LibraryNode> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
