use super::edge::{Direction, GraphEdge, HandleId};
use super::node::{GraphNode, Position};
use super::payload::DragPayload;
use crate::error::CanvasError;
use crate::schema::Schema;
use indexmap::IndexMap;
use uuid::Uuid;

/// The in-memory node/edge collection, bound to one project at a time.
///
/// The store is the exclusive owner of both collections; the detail panel and
/// palette request mutations through it rather than touching shared state.
/// This single-writer discipline is the editor's consistency mechanism.
#[derive(Debug, Default)]
pub struct CanvasStore {
    project_id: Option<String>,
    nodes: IndexMap<String, GraphNode>,
    edges: Vec<GraphEdge>,
}

impl CanvasStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The externally-persisted project this graph belongs to.
    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }

    /// Binds the store to `project_id` and replaces both collections
    /// wholesale. Switching projects is a fresh load, never a merge, so no
    /// state bleeds across projects.
    pub fn load_project(
        &mut self,
        project_id: impl Into<String>,
        nodes: Vec<GraphNode>,
        edges: Vec<GraphEdge>,
    ) {
        self.project_id = Some(project_id.into());
        self.nodes = nodes.into_iter().map(|n| (n.id.clone(), n)).collect();
        self.edges = edges;
    }

    /// Handles a palette drop: parses the drag payload and places a new node.
    ///
    /// Parsing happens before any mutation, so a malformed payload leaves the
    /// canvas untouched. Returns the id of the placed node.
    pub fn drop_payload(&mut self, raw: &str, position: Position) -> Result<String, CanvasError> {
        let payload = DragPayload::from_json(raw)?;
        Ok(self.insert_node(payload.instantiate(position)))
    }

    /// Inserts an already-built node (project loads, tests). Returns its id.
    pub fn insert_node(&mut self, node: GraphNode) -> String {
        let id = node.id.clone();
        self.nodes.insert(id.clone(), node);
        id
    }

    pub fn node(&self, node_id: &str) -> Option<&GraphNode> {
        self.nodes.get(node_id)
    }

    pub fn node_mut(&mut self, node_id: &str) -> Option<&mut GraphNode> {
        self.nodes.get_mut(node_id)
    }

    pub fn contains_node(&self, node_id: &str) -> bool {
        self.nodes.contains_key(node_id)
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.values()
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Moves a node. Position is only ever written here, by direct user drag.
    pub fn move_node(&mut self, node_id: &str, position: Position) -> Result<(), CanvasError> {
        let node = self
            .nodes
            .get_mut(node_id)
            .ok_or_else(|| CanvasError::NodeNotFound(node_id.to_string()))?;
        node.position = position;
        Ok(())
    }

    /// Removes a node and every edge incident to it. A deleted node is never
    /// resurrected; re-dropping the same palette entry creates a new id.
    pub fn remove_node(&mut self, node_id: &str) -> Result<GraphNode, CanvasError> {
        let node = self
            .nodes
            .shift_remove(node_id)
            .ok_or_else(|| CanvasError::NodeNotFound(node_id.to_string()))?;
        self.edges
            .retain(|e| e.source != node_id && e.target != node_id);
        Ok(node)
    }

    /// Connects an output handle to an input handle.
    ///
    /// Both endpoints must exist on the canvas, the handles must have the
    /// right directions, and each handle's field must resolve against its
    /// node's schema (plain port or method port). Returns the new edge's id.
    pub fn connect(
        &mut self,
        source_handle: HandleId,
        target_handle: HandleId,
    ) -> Result<String, CanvasError> {
        if source_handle.direction != Direction::Output {
            return Err(CanvasError::DirectionMismatch {
                handle: source_handle.encode(),
                actual: source_handle.direction.as_str(),
                expected: Direction::Output.as_str(),
            });
        }
        if target_handle.direction != Direction::Input {
            return Err(CanvasError::DirectionMismatch {
                handle: target_handle.encode(),
                actual: target_handle.direction.as_str(),
                expected: Direction::Input.as_str(),
            });
        }

        self.check_field(&source_handle)?;
        self.check_field(&target_handle)?;

        let edge = GraphEdge {
            id: Uuid::new_v4().to_string(),
            source: source_handle.node_id.clone(),
            target: target_handle.node_id.clone(),
            source_handle,
            target_handle,
        };
        let id = edge.id.clone();
        self.edges.push(edge);
        Ok(id)
    }

    pub fn disconnect(&mut self, edge_id: &str) -> Result<GraphEdge, CanvasError> {
        let idx = self
            .edges
            .iter()
            .position(|e| e.id == edge_id)
            .ok_or_else(|| CanvasError::EdgeNotFound(edge_id.to_string()))?;
        Ok(self.edges.remove(idx))
    }

    fn check_field(&self, handle: &HandleId) -> Result<(), CanvasError> {
        let node = self
            .nodes
            .get(&handle.node_id)
            .ok_or_else(|| CanvasError::NodeNotFound(handle.node_id.clone()))?;
        let schema = &node.data.schema;
        let known = match handle.direction {
            Direction::Output => Self::has_output_field(schema, &handle.field),
            Direction::Input => Self::has_input_field(schema, &handle.field),
        };
        if known {
            Ok(())
        } else {
            Err(CanvasError::UnknownPortField {
                node_id: handle.node_id.clone(),
                field: handle.field.clone(),
                direction: handle.direction.as_str(),
            })
        }
    }

    fn has_output_field(schema: &Schema, field: &str) -> bool {
        schema.outputs.contains_key(field)
            || schema
                .methods
                .values()
                .any(|m| m.outputs.iter().any(|o| o == field))
    }

    fn has_input_field(schema: &Schema, field: &str) -> bool {
        schema.inputs.contains_key(field)
            || schema
                .methods
                .values()
                .any(|m| m.inputs.iter().any(|i| i == field))
    }
}
