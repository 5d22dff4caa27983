//! I/O around the mesh model.
//!
//! This crate provides:
//! - **Mesh document** loading from disk
//! - **Control document** loading into the model's control tables
//! - **JSON summary** export of a loaded model

mod control;
pub mod error;
mod mesh;
mod summary;

pub use control::{load_control, load_control_into_model};
pub use error::{IoError, Result};
pub use mesh::load_mesh;
pub use summary::{MeshSummary, write_summary_json};
