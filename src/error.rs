use thiserror::Error;

/// Errors raised while validating or mutating a node schema.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("Port '{port}' in the '{mapping}' mapping has an empty type")]
    EmptyPortType { mapping: &'static str, port: String },

    #[error("Method '{method}' references '{port}' as an {direction} port, but no such port exists")]
    UnknownMethodPort {
        method: String,
        direction: &'static str,
        port: String,
    },

    #[error("Schema has no parameter named '{0}'")]
    UnknownParameter(String),
}

/// Errors raised by canvas mutations (node placement, connections, deletion).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CanvasError {
    #[error("Malformed drag payload: {0}")]
    MalformedPayload(String),

    #[error("Node '{0}' is not on the canvas")]
    NodeNotFound(String),

    #[error("Edge '{0}' is not on the canvas")]
    EdgeNotFound(String),

    #[error("Handle '{handle}' has direction '{actual}', expected '{expected}'")]
    DirectionMismatch {
        handle: String,
        actual: &'static str,
        expected: &'static str,
    },

    #[error("Node '{node_id}' has no {direction} field named '{field}'")]
    UnknownPortField {
        node_id: String,
        field: String,
        direction: &'static str,
    },
}

/// Errors raised by the tab registry and session URL construction.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error("Tab '{0}' does not exist")]
    UnknownTab(String),

    #[error("Cannot build a session URL from host '{0}'")]
    InvalidHost(String),
}

/// Errors raised while synchronizing edits with the backend.
///
/// Every failure is produced at the operation boundary; nothing in this crate
/// panics on a backend response. The HTTP taxonomy mirrors how the editor
/// treats each class: transport and plain HTTP errors are surfaced to the user,
/// 401 forces a sign-out, 403 is logged and non-fatal.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SyncError {
    #[error("Transport failure: {0}")]
    Transport(String),

    #[error("Backend returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Authentication expired (HTTP 401)")]
    Unauthorized,

    #[error("Operation forbidden (HTTP 403): {0}")]
    Forbidden(String),

    #[error("An operation for '{entity}' is already in flight")]
    EditInFlight { entity: String },

    #[error("Node '{0}' is neither on the canvas nor a known library entry")]
    UnresolvedNode(String),

    #[error("Unexpected response payload: {0}")]
    MalformedResponse(String),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}
