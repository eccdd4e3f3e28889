pub mod library;
pub mod model;
pub mod value;

pub use library::*;
pub use model::*;
pub use value::*;
