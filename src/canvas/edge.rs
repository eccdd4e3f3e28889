use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of a node a handle sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Input,
    Output,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Input => "input",
            Direction::Output => "output",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A deterministic handle identifier.
///
/// Built from `(node_id, field, direction, port_type)` so it is unique per
/// node and collision-free across the canvas: node ids are unique, field
/// names are unique within a direction, and the direction disambiguates a
/// name shared between the input and output namespaces.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HandleId {
    pub node_id: String,
    pub field: String,
    pub direction: Direction,
    pub port_type: String,
}

impl HandleId {
    pub fn new(
        node_id: impl Into<String>,
        field: impl Into<String>,
        direction: Direction,
        port_type: impl Into<String>,
    ) -> Self {
        Self {
            node_id: node_id.into(),
            field: field.into(),
            direction,
            port_type: port_type.into(),
        }
    }

    /// The stable string form handed to the rendering layer.
    pub fn encode(&self) -> String {
        format!(
            "{}::{}::{}::{}",
            self.node_id, self.field, self.direction, self.port_type
        )
    }
}

impl fmt::Display for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

/// One directed connection between two node ports.
///
/// Invariant, enforced by [`CanvasStore::connect`](super::CanvasStore::connect):
/// the source handle belongs to an output (or method output) field and the
/// target handle to an input field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    #[serde(alias = "sourceHandle")]
    pub source_handle: HandleId,
    pub target: String,
    #[serde(alias = "targetHandle")]
    pub target_handle: HandleId,
}
