pub mod lab_url;
pub mod tabs;

pub use lab_url::*;
pub use tabs::*;
