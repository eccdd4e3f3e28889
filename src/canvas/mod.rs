pub mod edge;
pub mod node;
pub mod payload;
pub mod store;

pub use edge::*;
pub use node::*;
pub use payload::*;
pub use store::*;
