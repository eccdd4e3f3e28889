use std::fmt;

/// HTTP verb of a route. Kept local so the route table has no transport
/// dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Put,
    Post,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Put => "PUT",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        })
    }
}

/// The typed route table: every logical backend operation maps to one
/// concrete method and path here, so no endpoint is ever guessed at runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    /// Palette listing of uploaded node classes.
    UploadedNodes,
    /// Library-scoped parameter edit (shared class-level default).
    LibraryParameterUpdate,
    /// Workflow-scoped parameter edit (a placed instance's override).
    WorkflowParameterUpdate {
        workflow_id: String,
        node_id: String,
    },
    InstanceNameUpdate {
        workflow_id: String,
        node_id: String,
    },
    RunWorkflow {
        project_id: String,
    },
    UploadFile,
    DeleteFile {
        file_id: String,
    },
    CopyFile,
    SyncFiles,
    CreateCategory,
}

impl Route {
    pub fn method(&self) -> Method {
        match self {
            Route::UploadedNodes => Method::Get,
            Route::LibraryParameterUpdate
            | Route::WorkflowParameterUpdate { .. }
            | Route::InstanceNameUpdate { .. } => Method::Put,
            Route::RunWorkflow { .. }
            | Route::UploadFile
            | Route::CopyFile
            | Route::SyncFiles
            | Route::CreateCategory => Method::Post,
            Route::DeleteFile { .. } => Method::Delete,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::UploadedNodes => "/box/uploaded-nodes/".to_string(),
            Route::LibraryParameterUpdate => "/box/parameters/update/".to_string(),
            Route::WorkflowParameterUpdate {
                workflow_id,
                node_id,
            } => format!("/workflow/{workflow_id}/nodes/{node_id}/parameters/"),
            Route::InstanceNameUpdate {
                workflow_id,
                node_id,
            } => format!("/workflow/{workflow_id}/nodes/{node_id}/instance_name/"),
            Route::RunWorkflow { project_id } => format!("/workflow/{project_id}/run/"),
            Route::UploadFile => "/box/upload/".to_string(),
            Route::DeleteFile { file_id } => format!("/box/files/{file_id}/"),
            Route::CopyFile => "/box/copy/".to_string(),
            Route::SyncFiles => "/box/sync/".to_string(),
            Route::CreateCategory => "/box/categories/".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method(), self.path())
    }
}
