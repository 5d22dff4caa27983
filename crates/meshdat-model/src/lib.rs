//! In-memory mesh model with O(1) lookups and a node-to-elements index.

pub mod control;
mod entry;
pub mod element_table;
pub mod mesh;
pub mod model;
pub mod node_sets;
pub mod node_table;
pub mod registry;

pub use control::{ControlTable, ControlTables};
pub use element_table::{ElementTable, ElementTableBuilder};
pub use mesh::{Element, ElementType, MeshStatistics, Node, UNKNOWN_PART};
pub use model::{LoadState, MeshModel};
pub use node_sets::NodeSetExpander;
pub use node_table::NodeTableBuilder;
pub use registry::{PartRanges, SetRegistry};

pub use meshdat_inp::{EntityId, FileSource, IdRange, MeshError, MeshSource, TextSource};
