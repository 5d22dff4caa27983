//! Reader layer for brace-delimited mesh documents.
//!
//! This crate provides:
//! - **Id-range codec** for compact `n`, `a-b`, `a-b:s` id lists
//! - **Section scanner**, a brace-depth state machine over document lines
//! - **Sources** that can be reopened for each streaming pass
//! - **Walkers** that drive a visitor over the whole document or one section

pub mod error;
pub mod range;
pub mod record;
pub mod scanner;
pub mod source;
pub mod walk;

pub use error::{MeshError, Result, StructureError};
pub use range::{EntityId, Expand, IdRange, RangeIter};
pub use scanner::{ScanEvent, ScanState, Section, SectionScanner, SetKind};
pub use source::{FileSource, MeshSource, TextSource};
pub use walk::{SectionVisitor, scan_document, scan_section};
