use super::node::{GraphNode, NodeData, Position};
use crate::error::CanvasError;
use crate::schema::{LibraryNode, Schema};
use serde::{Deserialize, Serialize};

/// Drag-channel key carrying the bare node-type string.
pub const DRAG_MIME_NODE_TYPE: &str = "application/canvasflow-node-type";
/// Drag-channel key carrying the JSON-serialized full node descriptor.
pub const DRAG_MIME_PAYLOAD: &str = "application/canvasflow-node";

/// The snapshot serialized into the drag channel when a palette entry is
/// picked up. Deserialized on drop to seed a fresh [`GraphNode`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragPayload {
    #[serde(alias = "nodeType")]
    pub node_type: String,
    pub label: String,
    #[serde(alias = "fileId")]
    pub file_id: String,
    #[serde(alias = "className")]
    pub class_name: String,
    #[serde(alias = "fileName")]
    pub file_name: String,
    pub schema: Schema,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub color: String,
}

impl DragPayload {
    /// Parses the JSON side of the drag channel.
    ///
    /// Fails closed: a malformed or incomplete payload is rejected here,
    /// before any canvas mutation, so a bad drop never produces a partial
    /// node.
    pub fn from_json(raw: &str) -> Result<Self, CanvasError> {
        serde_json::from_str(raw).map_err(|e| CanvasError::MalformedPayload(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, CanvasError> {
        serde_json::to_string(self).map_err(|e| CanvasError::MalformedPayload(e.to_string()))
    }

    /// Creates a placed node at `position` with a freshly generated id.
    ///
    /// The schema is cloned by value: the new node's snapshot is isolated
    /// from later edits to the palette entry it came from. The instance name
    /// starts empty and is filled in by the user.
    pub fn instantiate(&self, position: Position) -> GraphNode {
        GraphNode {
            id: GraphNode::fresh_id(),
            position,
            data: NodeData {
                label: self.label.clone(),
                instance_name: String::new(),
                schema: self.schema.clone(),
                file_name: self.file_name.clone(),
                node_type: self.node_type.clone(),
                color: self.color.clone(),
            },
        }
    }
}

impl From<&LibraryNode> for DragPayload {
    fn from(node: &LibraryNode) -> Self {
        Self {
            node_type: node.node_type.clone(),
            label: node.label.clone(),
            file_id: node.file_id.clone(),
            class_name: node.class_name.clone(),
            file_name: node.file_name.clone(),
            schema: node.schema.clone(),
            description: node.description.clone(),
            color: node.color.clone(),
        }
    }
}
