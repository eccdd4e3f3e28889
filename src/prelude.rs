//! Prelude module for convenient imports
//!
//! Re-exports the most commonly used types from the canvasflow crate so the
//! embedding application can pull in the core surface with one `use`.

// Canvas state
pub use crate::canvas::{
    CanvasStore, Direction, DragPayload, GraphEdge, GraphNode, HandleId, NodeData, Position,
};

// Schema model
pub use crate::schema::{
    LibraryNode, MethodSpec, ParameterField, ParameterSpec, PortSpec, Schema, SchemaLibrary,
    parse_lenient,
};

// Sessions and tabs
pub use crate::session::{Tab, TabKind, TabRegistry, WORKFLOW_TAB_ID, session_url};

// Backend synchronization
pub use crate::sync::{
    DetailSynchronizer, FileManager, NodeBackend, NodeRef, ParameterUpdate, Route, RunOutcome,
    UploadedNodes,
};

// Error types
pub use crate::error::{CanvasError, SchemaError, SessionError, SyncError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
