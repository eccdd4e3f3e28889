pub mod backend;
pub mod files;
pub mod http;
pub mod routes;
pub mod synchronizer;

pub use backend::*;
pub use files::*;
pub use http::*;
pub use routes::*;
pub use synchronizer::*;
