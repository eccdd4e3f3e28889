use crate::error::SyncError;
use crate::schema::{LibraryNode, ParameterField, Schema};
use serde::{Deserialize, Serialize};

/// One parameter edit as sent to either parameter endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterUpdate {
    pub parameter_key: String,
    pub parameter_field: ParameterField,
    pub parameter_value: serde_json::Value,
}

/// Response of the palette listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedNodes {
    pub nodes: Vec<LibraryNode>,
    #[serde(default)]
    pub total_files: u64,
    #[serde(default)]
    pub total_nodes: u64,
}

/// Response of the workflow run endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunOutcome {
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub result: serde_json::Value,
}

/// The seam between the synchronizer and the transport.
///
/// The HTTP implementation lives in [`HttpBackend`](super::HttpBackend);
/// tests substitute in-memory implementations. Instances are constructed
/// explicitly and passed to whatever needs them, never shared through a
/// global.
pub trait NodeBackend {
    fn fetch_uploaded_nodes(&self) -> Result<UploadedNodes, SyncError>;

    fn update_library_parameter(
        &self,
        file_name: &str,
        update: &ParameterUpdate,
    ) -> Result<(), SyncError>;

    fn update_workflow_parameter(
        &self,
        workflow_id: &str,
        node_id: &str,
        update: &ParameterUpdate,
    ) -> Result<(), SyncError>;

    fn update_instance_name(
        &self,
        workflow_id: &str,
        node_id: &str,
        instance_name: &str,
    ) -> Result<(), SyncError>;

    fn run_workflow(&self, project_id: &str) -> Result<RunOutcome, SyncError>;

    fn upload_file(&self, file_name: &str, contents: &[u8]) -> Result<(), SyncError>;

    fn delete_file(&self, file_id: &str) -> Result<(), SyncError>;

    fn copy_file(&self, file_id: &str, new_name: &str) -> Result<(), SyncError>;

    fn sync_files(&self) -> Result<(), SyncError>;

    fn create_category(&self, name: &str) -> Result<(), SyncError>;

    /// Best-effort canonical schema lookup, used by the library refetch step.
    /// The backend exposes no single-schema read, so this re-reads the
    /// palette listing and picks the entry by file name.
    fn fetch_schema(&self, file_name: &str) -> Result<Option<Schema>, SyncError> {
        let listing = self.fetch_uploaded_nodes()?;
        Ok(listing
            .nodes
            .into_iter()
            .find(|n| n.file_name == file_name)
            .map(|n| n.schema))
    }
}

impl<T: NodeBackend + ?Sized> NodeBackend for &T {
    fn fetch_uploaded_nodes(&self) -> Result<UploadedNodes, SyncError> {
        (**self).fetch_uploaded_nodes()
    }

    fn update_library_parameter(
        &self,
        file_name: &str,
        update: &ParameterUpdate,
    ) -> Result<(), SyncError> {
        (**self).update_library_parameter(file_name, update)
    }

    fn update_workflow_parameter(
        &self,
        workflow_id: &str,
        node_id: &str,
        update: &ParameterUpdate,
    ) -> Result<(), SyncError> {
        (**self).update_workflow_parameter(workflow_id, node_id, update)
    }

    fn update_instance_name(
        &self,
        workflow_id: &str,
        node_id: &str,
        instance_name: &str,
    ) -> Result<(), SyncError> {
        (**self).update_instance_name(workflow_id, node_id, instance_name)
    }

    fn run_workflow(&self, project_id: &str) -> Result<RunOutcome, SyncError> {
        (**self).run_workflow(project_id)
    }

    fn upload_file(&self, file_name: &str, contents: &[u8]) -> Result<(), SyncError> {
        (**self).upload_file(file_name, contents)
    }

    fn delete_file(&self, file_id: &str) -> Result<(), SyncError> {
        (**self).delete_file(file_id)
    }

    fn copy_file(&self, file_id: &str, new_name: &str) -> Result<(), SyncError> {
        (**self).copy_file(file_id, new_name)
    }

    fn sync_files(&self) -> Result<(), SyncError> {
        (**self).sync_files()
    }

    fn create_category(&self, name: &str) -> Result<(), SyncError> {
        (**self).create_category(name)
    }

    fn fetch_schema(&self, file_name: &str) -> Result<Option<Schema>, SyncError> {
        (**self).fetch_schema(file_name)
    }
}
