//! # Canvasflow - Workflow Editor Core
//!
//! **Canvasflow** is the headless core of a visual workflow editor for
//! composing Python-backed analysis nodes into pipelines. It owns the pieces
//! with real state and invariants — the schema model, the canvas node/edge
//! store, the tab/session registry, and the backend synchronization protocol —
//! and leaves rendering, styling, and routing to the embedding application.
//!
//! ## Core Workflow
//!
//! 1.  **Load the palette**: fetch the uploaded node classes into a
//!     [`SchemaLibrary`](schema::SchemaLibrary) via a
//!     [`NodeBackend`](sync::NodeBackend).
//! 2.  **Place nodes**: serialize a palette entry into a
//!     [`DragPayload`](canvas::DragPayload) and drop it on the
//!     [`CanvasStore`](canvas::CanvasStore); the schema is snapshotted by
//!     value at that moment.
//! 3.  **Connect**: build typed [`HandleId`](canvas::HandleId)s and let the
//!     store enforce the output-to-input direction invariant.
//! 4.  **Edit and synchronize**: route parameter edits through the
//!     [`DetailSynchronizer`](sync::DetailSynchronizer), which dispatches
//!     workflow-scoped vs library-scoped endpoints by
//!     [`NodeRef`](sync::NodeRef) and applies accepted edits optimistically.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use canvasflow::prelude::*;
//! use canvasflow::sync::{AuthContext, HttpBackend};
//! use url::Url;
//!
//! fn main() -> Result<()> {
//!     let backend = HttpBackend::new(
//!         Url::parse("https://api.example.com/")?,
//!         AuthContext {
//!             bearer_token: "token".to_string(),
//!             shared_secret: "secret".to_string(),
//!         },
//!     )
//!     .with_sign_out_hook(|| eprintln!("session expired, signing out"));
//!
//!     // Load the palette.
//!     let mut library = SchemaLibrary::new();
//!     let files = FileManager::new(&backend);
//!     files.refresh_library(&mut library)?;
//!
//!     // Bind the canvas to a project and place a node from the palette.
//!     let mut store = CanvasStore::new();
//!     store.load_project("project-1", vec![], vec![]);
//!     let payload = library.iter().next().map(DragPayload::from);
//!     if let Some(payload) = payload {
//!         let raw = payload.to_json()?;
//!         let node_id = store.drop_payload(&raw, Position::new(120.0, 80.0))?;
//!
//!         // Edit one parameter through the synchronizer.
//!         let mut sync = DetailSynchronizer::new(&backend);
//!         let node = NodeRef::resolve(&store, &node_id, None)?;
//!         sync.update_parameter(
//!             &mut store,
//!             &mut library,
//!             &node,
//!             "threshold",
//!             ParameterField::DefaultValue,
//!             "10",
//!         )?;
//!     }
//!
//!     // Open an embedded notebook session in its own tab.
//!     let mut tabs = TabRegistry::new();
//!     let url = session_url("https", "lab.example.com", "alice", "filters", "smooth.py")?;
//!     tabs.open("project-1", "smooth.py", url.as_str());
//!
//!     Ok(())
//! }
//! ```

pub mod canvas;
pub mod error;
pub mod prelude;
pub mod schema;
pub mod session;
pub mod sync;
