use crate::schema::Schema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A 2D canvas coordinate. Only direct user drags mutate it, through
/// [`CanvasStore::move_node`](super::CanvasStore::move_node).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Per-instance data of a placed node.
///
/// `label` is the class name from the schema; `instance_name` is user-editable
/// free text synchronized to the backend independently of parameter edits.
/// `schema` is a by-value snapshot taken at drop time, so later palette edits
/// never reach already-placed nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    pub label: String,
    #[serde(alias = "instanceName")]
    pub instance_name: String,
    pub schema: Schema,
    #[serde(alias = "fileName")]
    pub file_name: String,
    #[serde(alias = "nodeType")]
    pub node_type: String,
    #[serde(default)]
    pub color: String,
}

/// One placed instance of a schema on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub position: Position,
    pub data: NodeData,
}

impl GraphNode {
    /// Generates an opaque id, stable for the node's lifetime on the canvas.
    pub(crate) fn fresh_id() -> String {
        Uuid::new_v4().to_string()
    }
}
