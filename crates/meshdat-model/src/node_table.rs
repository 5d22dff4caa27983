//! Node coordinate table, read from the top-level `Node` block.

use std::collections::HashMap;

use meshdat_inp::record::{bracketed, fields, numeric_id};
use meshdat_inp::{
    EntityId, MeshSource, Result, ScanState, Section, SectionScanner, SectionVisitor,
    StructureError, scan_section,
};

use crate::mesh::Node;

/// Builds the node table from `id [x, y, z]` records.
#[derive(Debug, Default)]
pub struct NodeTableBuilder {
    nodes: HashMap<EntityId, Node>,
    replaced: usize,
}

impl NodeTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build(source: &dyn MeshSource) -> Result<HashMap<EntityId, Node>> {
        let mut builder = Self::new();
        if !scan_section(source, Section::Node, &mut builder)? {
            tracing::warn!(source = %source.describe(), "document has no Node block");
        }
        tracing::info!(
            nodes = builder.nodes.len(),
            redefined = builder.replaced,
            "node table built"
        );
        Ok(builder.nodes)
    }

    /// Adds the node on `line` if it is a coordinate record.
    pub fn add_record(&mut self, line: &str) -> Option<EntityId> {
        let node = parse_node_record(line)?;
        let id = node.id;
        if self.nodes.insert(id, node).is_some() {
            self.replaced += 1;
            tracing::debug!(node = id, "node redefined, keeping the later coordinates");
        }
        Some(id)
    }
}

impl SectionVisitor for NodeTableBuilder {
    fn content(
        &mut self,
        scanner: &SectionScanner,
        raw: &str,
    ) -> std::result::Result<(), StructureError> {
        if *scanner.state() == ScanState::InNode && self.add_record(raw).is_none() {
            tracing::trace!(line = scanner.line(), "not a node record");
        }
        Ok(())
    }
}

/// Parses `id [x, y, z]`. The id must be all digits and directly followed
/// by whitespace or `[`. Missing coordinates are `0.0`, unparsable ones
/// are skipped and anything past the third is ignored.
pub fn parse_node_record(line: &str) -> Option<Node> {
    let parts = bracketed(line.trim_start())?;
    if !parts.closed {
        return None;
    }
    let id = numeric_id(parts.head)?;

    let mut coords = [0.0f64; 3];
    let values = fields(parts.body).filter_map(|field| field.parse::<f64>().ok());
    for (slot, value) in coords.iter_mut().zip(values) {
        *slot = value;
    }

    Some(Node::new(id, coords[0], coords[1], coords[2]))
}
