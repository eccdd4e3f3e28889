use super::backend::{NodeBackend, ParameterUpdate, RunOutcome};
use crate::canvas::CanvasStore;
use crate::error::SyncError;
use crate::schema::{ParameterField, SchemaLibrary, parse_lenient};
use ahash::AHashSet;

/// Which persisted entity a detail-panel edit targets.
///
/// A workflow node is a placed instance whose edits are per-instance
/// overrides; a library node is a palette entry whose edits mutate the shared
/// class-level default. The tag is carried explicitly so dispatch never
/// depends on the shape of an id string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeRef {
    Workflow { workflow_id: String, node_id: String },
    Library { file_name: String },
}

impl NodeRef {
    /// Resolves a node id against the canvas: membership decides the
    /// endpoint family. Ids not on the canvas are library entries and need
    /// the owning file name from the caller.
    pub fn resolve(
        store: &CanvasStore,
        node_id: &str,
        library_file: Option<&str>,
    ) -> Result<Self, SyncError> {
        if store.contains_node(node_id) {
            let workflow_id = store
                .project_id()
                .ok_or_else(|| SyncError::UnresolvedNode(node_id.to_string()))?;
            Ok(NodeRef::Workflow {
                workflow_id: workflow_id.to_string(),
                node_id: node_id.to_string(),
            })
        } else if let Some(file_name) = library_file {
            Ok(NodeRef::Library {
                file_name: file_name.to_string(),
            })
        } else {
            Err(SyncError::UnresolvedNode(node_id.to_string()))
        }
    }

    fn describe(&self) -> &str {
        match self {
            NodeRef::Workflow { node_id, .. } => node_id,
            NodeRef::Library { file_name } => file_name,
        }
    }
}

/// Per-entity in-flight bookkeeping.
///
/// A second edit for the same entity while one is pending would be a lost
/// update waiting to happen, so it is rejected rather than queued.
#[derive(Debug, Default)]
pub struct PendingEdits {
    entities: AHashSet<String>,
}

impl PendingEdits {
    /// Marks `entity` in flight. Returns `false` if it already was.
    pub fn try_begin(&mut self, entity: &str) -> bool {
        self.entities.insert(entity.to_string())
    }

    pub fn finish(&mut self, entity: &str) {
        self.entities.remove(entity);
    }

    pub fn contains(&self, entity: &str) -> bool {
        self.entities.contains(entity)
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// The raw text being edited in the detail panel before it is committed.
#[derive(Debug, Clone, PartialEq)]
pub struct EditBuffer {
    pub node: NodeRef,
    pub field: String,
    pub raw_text: String,
}

/// Reconciles detail-panel edits with the backend.
///
/// Updates are optimistic: the backend is asked first, and only an accepted
/// edit is applied to the in-memory schema copy, so a failed request leaves
/// local state untouched. Library-scoped edits additionally re-read the
/// canonical schema afterwards, since the shared default may have been
/// modified by another consumer; that refetch is best-effort.
pub struct DetailSynchronizer<B: NodeBackend> {
    backend: B,
    pending: PendingEdits,
    selected: Option<NodeRef>,
    edit_buffer: Option<EditBuffer>,
}

impl<B: NodeBackend> DetailSynchronizer<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            pending: PendingEdits::default(),
            selected: None,
            edit_buffer: None,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn pending(&self) -> &PendingEdits {
        &self.pending
    }

    /// Changes the detail panel's selection. A change of node identity drops
    /// the edit buffer so stale text never leaks across selections.
    pub fn select(&mut self, node: Option<NodeRef>) {
        if self.selected != node {
            self.edit_buffer = None;
        }
        self.selected = node;
    }

    pub fn selected(&self) -> Option<&NodeRef> {
        self.selected.as_ref()
    }

    /// Starts (or replaces) the edit buffer for the selected node.
    pub fn begin_edit(&mut self, field: &str, raw_text: &str) {
        if let Some(node) = &self.selected {
            self.edit_buffer = Some(EditBuffer {
                node: node.clone(),
                field: field.to_string(),
                raw_text: raw_text.to_string(),
            });
        }
    }

    pub fn edit_buffer(&self) -> Option<&EditBuffer> {
        self.edit_buffer.as_ref()
    }

    /// Marks a parameter edit in flight ahead of an asynchronous round-trip.
    ///
    /// The synchronous [`update_parameter`](Self::update_parameter) path
    /// begins and finishes its own guard entry; embedders that park the
    /// backend call on an event loop begin here when the request is issued
    /// and call [`finish_pending`](Self::finish_pending) from the response
    /// handler, so a second edit of the same `(node, parameter_key)` pair is
    /// rejected in between.
    pub fn begin_pending(&mut self, node: &NodeRef, parameter_key: &str) -> Result<(), SyncError> {
        let entity = Self::entity_key(node, parameter_key);
        if !self.pending.try_begin(&entity) {
            return Err(SyncError::EditInFlight { entity });
        }
        Ok(())
    }

    /// Clears an in-flight mark begun with [`begin_pending`](Self::begin_pending).
    pub fn finish_pending(&mut self, node: &NodeRef, parameter_key: &str) {
        let entity = Self::entity_key(node, parameter_key);
        self.pending.finish(&entity);
    }

    fn entity_key(node: &NodeRef, parameter_key: &str) -> String {
        format!("{}#{}", node.describe(), parameter_key)
    }

    /// Persists one parameter edit and applies it locally on success.
    ///
    /// `raw_value` is parsed leniently: structured JSON when it parses, the
    /// verbatim string otherwise. Returns the value that was stored.
    pub fn update_parameter(
        &mut self,
        store: &mut CanvasStore,
        library: &mut SchemaLibrary,
        node: &NodeRef,
        parameter_key: &str,
        field: ParameterField,
        raw_value: &str,
    ) -> Result<serde_json::Value, SyncError> {
        let entity = Self::entity_key(node, parameter_key);
        if !self.pending.try_begin(&entity) {
            return Err(SyncError::EditInFlight { entity });
        }
        let outcome = self.push_parameter(store, library, node, parameter_key, field, raw_value);
        self.pending.finish(&entity);
        outcome
    }

    fn push_parameter(
        &mut self,
        store: &mut CanvasStore,
        library: &mut SchemaLibrary,
        node: &NodeRef,
        parameter_key: &str,
        field: ParameterField,
        raw_value: &str,
    ) -> Result<serde_json::Value, SyncError> {
        let value = parse_lenient(raw_value);
        let update = ParameterUpdate {
            parameter_key: parameter_key.to_string(),
            parameter_field: field,
            parameter_value: value.clone(),
        };

        match node {
            NodeRef::Workflow {
                workflow_id,
                node_id,
            } => {
                // Fail fast if the parameter has no local home; the backend
                // would accept the write and the optimistic apply would then
                // have nowhere to land.
                let graph_node = store
                    .node(node_id)
                    .ok_or_else(|| SyncError::UnresolvedNode(node_id.clone()))?;
                graph_node.data.schema.parameter(parameter_key)?;

                self.backend
                    .update_workflow_parameter(workflow_id, node_id, &update)?;

                // The local copy is the per-instance override; once the
                // server accepts it, it is authoritative. No refetch.
                let graph_node = store
                    .node_mut(node_id)
                    .ok_or_else(|| SyncError::UnresolvedNode(node_id.clone()))?;
                graph_node
                    .data
                    .schema
                    .set_parameter_field(parameter_key, field, value.clone())?;
            }
            NodeRef::Library { file_name } => {
                let schema = library
                    .get(file_name)
                    .map(|entry| &entry.schema)
                    .ok_or_else(|| SyncError::UnresolvedNode(file_name.clone()))?;
                schema.parameter(parameter_key)?;

                self.backend.update_library_parameter(file_name, &update)?;

                let schema = library
                    .schema_mut(file_name)
                    .ok_or_else(|| SyncError::UnresolvedNode(file_name.clone()))?;
                schema.set_parameter_field(parameter_key, field, value.clone())?;

                // The shared default may have been changed by another
                // consumer; re-read it so the server's version wins. A failed
                // refetch keeps the optimistic value.
                match self.backend.fetch_schema(file_name) {
                    Ok(Some(server_schema)) => {
                        library.replace_schema(file_name, server_schema);
                    }
                    Ok(None) => {}
                    Err(err) => {
                        log::warn!("canonical schema refetch for '{file_name}' failed: {err}");
                    }
                }
            }
        }

        Ok(value)
    }

    /// Persists the user-editable instance name of a placed node.
    pub fn update_instance_name(
        &mut self,
        store: &mut CanvasStore,
        workflow_id: &str,
        node_id: &str,
        instance_name: &str,
    ) -> Result<(), SyncError> {
        if !store.contains_node(node_id) {
            return Err(SyncError::UnresolvedNode(node_id.to_string()));
        }
        let entity = format!("{node_id}#instance_name");
        if !self.pending.try_begin(&entity) {
            return Err(SyncError::EditInFlight { entity });
        }
        let outcome = self
            .backend
            .update_instance_name(workflow_id, node_id, instance_name);
        self.pending.finish(&entity);
        outcome?;
        if let Some(node) = store.node_mut(node_id) {
            node.data.instance_name = instance_name.to_string();
        }
        Ok(())
    }

    /// Triggers a backend run of the current project's workflow.
    pub fn run_workflow(&self, project_id: &str) -> Result<RunOutcome, SyncError> {
        log::debug!("running workflow for project '{project_id}'");
        self.backend.run_workflow(project_id)
    }
}
