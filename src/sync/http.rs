use super::backend::{NodeBackend, ParameterUpdate, RunOutcome, UploadedNodes};
use super::routes::{Method, Route};
use crate::error::SyncError;
use reqwest::StatusCode;
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::CONTENT_TYPE;
use url::Url;

/// Header carrying the internal shared secret alongside the bearer token.
const SHARED_SECRET_HEADER: &str = "X-Internal-Secret";

/// Credentials attached to every backend request.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub bearer_token: String,
    pub shared_secret: String,
}

type SignOutHook = Box<dyn Fn() + Send + Sync>;

/// The HTTP implementation of [`NodeBackend`].
///
/// Constructed explicitly with its base URL and credentials and handed to the
/// components that need it; there is no shared singleton. A 401 from any
/// endpoint invokes the sign-out hook before the error is returned — the
/// embedding application owns the actual redirect.
pub struct HttpBackend {
    client: Client,
    base_url: Url,
    auth: AuthContext,
    on_unauthorized: Option<SignOutHook>,
}

impl HttpBackend {
    /// `base_url` is the backend origin, e.g. `https://api.example.com/`.
    pub fn new(base_url: Url, auth: AuthContext) -> Self {
        Self {
            client: Client::new(),
            base_url,
            auth,
            on_unauthorized: None,
        }
    }

    /// Registers the forced sign-out hook invoked on HTTP 401.
    pub fn with_sign_out_hook(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_unauthorized = Some(Box::new(hook));
        self
    }

    fn url_for(&self, route: &Route) -> Result<Url, SyncError> {
        self.base_url
            .join(&route.path())
            .map_err(|e| SyncError::Transport(e.to_string()))
    }

    fn request(&self, route: &Route) -> Result<RequestBuilder, SyncError> {
        let url = self.url_for(route)?;
        let method = match route.method() {
            Method::Get => reqwest::Method::GET,
            Method::Put => reqwest::Method::PUT,
            Method::Post => reqwest::Method::POST,
            Method::Delete => reqwest::Method::DELETE,
        };
        log::debug!("dispatching {route}");
        Ok(self
            .client
            .request(method, url)
            .bearer_auth(&self.auth.bearer_token)
            .header(SHARED_SECRET_HEADER, &self.auth.shared_secret))
    }

    fn execute(
        &self,
        route: &Route,
        body: Option<&serde_json::Value>,
    ) -> Result<Response, SyncError> {
        let mut request = self.request(route)?;
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request
            .send()
            .map_err(|e| SyncError::Transport(e.to_string()))?;
        self.check_status(route, response)
    }

    fn check_status(&self, route: &Route, response: Response) -> Result<Response, SyncError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::UNAUTHORIZED {
            if let Some(hook) = &self.on_unauthorized {
                hook();
            }
            return Err(SyncError::Unauthorized);
        }
        let message = error_message(response);
        if status == StatusCode::FORBIDDEN {
            log::warn!("{route} forbidden: {message}");
            return Err(SyncError::Forbidden(message));
        }
        Err(SyncError::Http {
            status: status.as_u16(),
            message,
        })
    }
}

/// Extracts a failure message from an error response: the structured
/// `{error}` field when the body is JSON, the raw text otherwise.
fn error_message(response: Response) -> String {
    let is_json = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("application/json"))
        .unwrap_or(false);
    let text = response.text().unwrap_or_default();
    if is_json
        && let Ok(value) = serde_json::from_str::<serde_json::Value>(&text)
        && let Some(message) = value.get("error").and_then(|e| e.as_str())
    {
        return message.to_string();
    }
    text
}

impl NodeBackend for HttpBackend {
    fn fetch_uploaded_nodes(&self) -> Result<UploadedNodes, SyncError> {
        let response = self.execute(&Route::UploadedNodes, None)?;
        response
            .json()
            .map_err(|e| SyncError::MalformedResponse(e.to_string()))
    }

    fn update_library_parameter(
        &self,
        file_name: &str,
        update: &ParameterUpdate,
    ) -> Result<(), SyncError> {
        let body = serde_json::json!({
            "parameter_key": update.parameter_key,
            "parameter_field": update.parameter_field,
            "parameter_value": update.parameter_value,
            "filename": file_name,
        });
        self.execute(&Route::LibraryParameterUpdate, Some(&body))
            .map(drop)
    }

    fn update_workflow_parameter(
        &self,
        workflow_id: &str,
        node_id: &str,
        update: &ParameterUpdate,
    ) -> Result<(), SyncError> {
        let route = Route::WorkflowParameterUpdate {
            workflow_id: workflow_id.to_string(),
            node_id: node_id.to_string(),
        };
        let body = serde_json::json!({
            "parameter_key": update.parameter_key,
            "parameter_field": update.parameter_field,
            "parameter_value": update.parameter_value,
        });
        self.execute(&route, Some(&body)).map(drop)
    }

    fn update_instance_name(
        &self,
        workflow_id: &str,
        node_id: &str,
        instance_name: &str,
    ) -> Result<(), SyncError> {
        let route = Route::InstanceNameUpdate {
            workflow_id: workflow_id.to_string(),
            node_id: node_id.to_string(),
        };
        let body = serde_json::json!({ "instance_name": instance_name });
        self.execute(&route, Some(&body)).map(drop)
    }

    fn run_workflow(&self, project_id: &str) -> Result<RunOutcome, SyncError> {
        let route = Route::RunWorkflow {
            project_id: project_id.to_string(),
        };
        let response = self.execute(&route, None)?;
        response
            .json()
            .map_err(|e| SyncError::MalformedResponse(e.to_string()))
    }

    fn upload_file(&self, file_name: &str, contents: &[u8]) -> Result<(), SyncError> {
        let route = Route::UploadFile;
        let form = Form::new().part(
            "file",
            Part::bytes(contents.to_vec()).file_name(file_name.to_string()),
        );
        let response = self
            .request(&route)?
            .multipart(form)
            .send()
            .map_err(|e| SyncError::Transport(e.to_string()))?;
        self.check_status(&route, response).map(drop)
    }

    fn delete_file(&self, file_id: &str) -> Result<(), SyncError> {
        let route = Route::DeleteFile {
            file_id: file_id.to_string(),
        };
        self.execute(&route, None).map(drop)
    }

    fn copy_file(&self, file_id: &str, new_name: &str) -> Result<(), SyncError> {
        let body = serde_json::json!({ "file_id": file_id, "new_name": new_name });
        self.execute(&Route::CopyFile, Some(&body)).map(drop)
    }

    fn sync_files(&self) -> Result<(), SyncError> {
        self.execute(&Route::SyncFiles, None).map(drop)
    }

    fn create_category(&self, name: &str) -> Result<(), SyncError> {
        let body = serde_json::json!({ "name": name });
        self.execute(&Route::CreateCategory, Some(&body)).map(drop)
    }
}
