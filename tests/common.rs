//! Common test utilities: schema builders and a recording mock backend.
use canvasflow::canvas::DragPayload;
use canvasflow::error::SyncError;
use canvasflow::schema::{LibraryNode, MethodSpec, ParameterSpec, PortSpec, Schema};
use canvasflow::sync::{NodeBackend, ParameterUpdate, RunOutcome, UploadedNodes};
use std::cell::{Cell, RefCell};

/// Creates a schema with one input, one output, one method, and a numeric
/// `threshold` parameter defaulting to 5.
#[allow(dead_code)]
pub fn sample_schema() -> Schema {
    let mut schema = Schema::default();
    schema.inputs.insert(
        "signal".to_string(),
        PortSpec {
            port_type: "ndarray".to_string(),
            description: Some("Input samples".to_string()),
            optional: false,
        },
    );
    schema.outputs.insert(
        "result".to_string(),
        PortSpec {
            port_type: "ndarray".to_string(),
            description: None,
            optional: false,
        },
    );
    schema.parameters.insert(
        "threshold".to_string(),
        ParameterSpec {
            param_type: Some("number".to_string()),
            description: Some("Detection threshold".to_string()),
            default_value: serde_json::json!(5),
            constraints: Some(serde_json::json!({"min": 0, "max": 100})),
            optional: None,
        },
    );
    schema.methods.insert(
        "fit".to_string(),
        MethodSpec {
            description: Some("Fits the filter to the input".to_string()),
            inputs: vec!["signal".to_string()],
            outputs: vec!["result".to_string()],
        },
    );
    schema
}

/// Creates a palette entry named `file_name` carrying [`sample_schema`].
#[allow(dead_code)]
pub fn sample_library_node(file_name: &str) -> LibraryNode {
    LibraryNode {
        node_type: "analysis".to_string(),
        label: "Foo".to_string(),
        file_id: format!("file-{file_name}"),
        class_name: "Foo".to_string(),
        file_name: file_name.to_string(),
        description: Some("Test analysis node".to_string()),
        color: "#3b82f6".to_string(),
        schema: sample_schema(),
    }
}

/// Serializes a valid drag payload for [`sample_library_node`].
#[allow(dead_code)]
pub fn sample_payload_json(file_name: &str) -> String {
    DragPayload::from(&sample_library_node(file_name))
        .to_json()
        .expect("payload serializes")
}

/// One recorded backend invocation.
#[derive(Debug, Clone, PartialEq)]
#[allow(dead_code)]
pub enum Call {
    FetchUploadedNodes,
    LibraryUpdate {
        file_name: String,
        update: ParameterUpdate,
    },
    WorkflowUpdate {
        workflow_id: String,
        node_id: String,
        update: ParameterUpdate,
    },
    InstanceName {
        node_id: String,
        name: String,
    },
    Run {
        project_id: String,
    },
    Upload {
        file_name: String,
    },
    Delete {
        file_id: String,
    },
    Copy {
        file_id: String,
        new_name: String,
    },
    Sync,
    CreateCategory {
        name: String,
    },
}

/// In-memory [`NodeBackend`] that records every call and can be switched
/// into failure modes per endpoint family.
#[derive(Default)]
#[allow(dead_code)]
pub struct MockBackend {
    pub calls: RefCell<Vec<Call>>,
    /// Entries served by `fetch_uploaded_nodes`.
    pub library: RefCell<Vec<LibraryNode>>,
    /// When set, every update endpoint answers HTTP 500.
    pub fail_updates: Cell<bool>,
    /// When set, the listing endpoint fails at the transport level.
    pub fail_listing: Cell<bool>,
}

#[allow(dead_code)]
impl MockBackend {
    pub fn with_library(nodes: Vec<LibraryNode>) -> Self {
        let backend = Self::default();
        *backend.library.borrow_mut() = nodes;
        backend
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn update_result(&self) -> Result<(), SyncError> {
        if self.fail_updates.get() {
            Err(SyncError::Http {
                status: 500,
                message: "internal error".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

impl NodeBackend for MockBackend {
    fn fetch_uploaded_nodes(&self) -> Result<UploadedNodes, SyncError> {
        self.record(Call::FetchUploadedNodes);
        if self.fail_listing.get() {
            return Err(SyncError::Transport("connection reset".to_string()));
        }
        let nodes = self.library.borrow().clone();
        Ok(UploadedNodes {
            total_files: nodes.len() as u64,
            total_nodes: nodes.len() as u64,
            nodes,
        })
    }

    fn update_library_parameter(
        &self,
        file_name: &str,
        update: &ParameterUpdate,
    ) -> Result<(), SyncError> {
        self.record(Call::LibraryUpdate {
            file_name: file_name.to_string(),
            update: update.clone(),
        });
        self.update_result()
    }

    fn update_workflow_parameter(
        &self,
        workflow_id: &str,
        node_id: &str,
        update: &ParameterUpdate,
    ) -> Result<(), SyncError> {
        self.record(Call::WorkflowUpdate {
            workflow_id: workflow_id.to_string(),
            node_id: node_id.to_string(),
            update: update.clone(),
        });
        self.update_result()
    }

    fn update_instance_name(
        &self,
        _workflow_id: &str,
        node_id: &str,
        instance_name: &str,
    ) -> Result<(), SyncError> {
        self.record(Call::InstanceName {
            node_id: node_id.to_string(),
            name: instance_name.to_string(),
        });
        self.update_result()
    }

    fn run_workflow(&self, project_id: &str) -> Result<RunOutcome, SyncError> {
        self.record(Call::Run {
            project_id: project_id.to_string(),
        });
        Ok(RunOutcome {
            status: "ok".to_string(),
            message: "workflow finished".to_string(),
            result: serde_json::json!({"outputs": 1}),
        })
    }

    fn upload_file(&self, file_name: &str, _contents: &[u8]) -> Result<(), SyncError> {
        self.record(Call::Upload {
            file_name: file_name.to_string(),
        });
        Ok(())
    }

    fn delete_file(&self, file_id: &str) -> Result<(), SyncError> {
        self.record(Call::Delete {
            file_id: file_id.to_string(),
        });
        self.update_result()
    }

    fn copy_file(&self, file_id: &str, new_name: &str) -> Result<(), SyncError> {
        self.record(Call::Copy {
            file_id: file_id.to_string(),
            new_name: new_name.to_string(),
        });
        Ok(())
    }

    fn sync_files(&self) -> Result<(), SyncError> {
        self.record(Call::Sync);
        Ok(())
    }

    fn create_category(&self, name: &str) -> Result<(), SyncError> {
        self.record(Call::CreateCategory {
            name: name.to_string(),
        });
        Ok(())
    }
}
