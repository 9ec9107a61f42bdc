pub mod error;
pub mod export;
pub mod math;
pub mod model;
pub mod scene;
pub mod symbols;
pub mod viewer;

pub use error::{FloorplanError, Result};
pub use viewer::Viewer;
