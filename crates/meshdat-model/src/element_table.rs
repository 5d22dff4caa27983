//! Element table and the node-to-elements reverse index.

use std::collections::HashMap;

use meshdat_inp::record::{bracketed, fields, numeric_id};
use meshdat_inp::{
    EntityId, MeshSource, Result, ScanState, Section, SectionScanner, SectionVisitor,
    StructureError, scan_section,
};

use crate::mesh::{Element, UNKNOWN_PART};

/// Elements by id plus, for every node, the elements that reference it in
/// parse order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementTable {
    pub elements: HashMap<EntityId, Element>,
    pub node_to_elements: HashMap<EntityId, Vec<EntityId>>,
}

impl ElementTable {
    /// Inserts `element` and indexes its connectivity. A previous element
    /// with the same id is replaced and its index entries are dropped.
    pub fn insert(&mut self, element: Element) -> Option<Element> {
        let previous = self.elements.remove(&element.id);
        if let Some(old) = &previous {
            self.unindex(old);
        }
        for &node in &element.nodes {
            self.node_to_elements.entry(node).or_default().push(element.id);
        }
        self.elements.insert(element.id, element);
        previous
    }

    fn unindex(&mut self, element: &Element) {
        for &node in &element.nodes {
            if let Some(list) = self.node_to_elements.get_mut(&node) {
                if let Some(pos) = list.iter().position(|&id| id == element.id) {
                    list.remove(pos);
                }
                if list.is_empty() {
                    self.node_to_elements.remove(&node);
                }
            }
        }
    }
}

/// Reads `Element { <Type> { id [n1, ..., nk] } }` blocks.
pub struct ElementTableBuilder<'a> {
    table: ElementTable,
    parts: &'a HashMap<EntityId, &'a str>,
    replaced: usize,
    mismatched: usize,
}

impl<'a> ElementTableBuilder<'a> {
    pub fn new(parts: &'a HashMap<EntityId, &'a str>) -> Self {
        Self {
            table: ElementTable::default(),
            parts,
            replaced: 0,
            mismatched: 0,
        }
    }

    pub fn build(
        source: &dyn MeshSource,
        parts: &'a HashMap<EntityId, &'a str>,
    ) -> Result<ElementTable> {
        let mut builder = Self::new(parts);
        if !scan_section(source, Section::Element, &mut builder)? {
            tracing::warn!(source = %source.describe(), "document has no Element block");
        }
        tracing::info!(
            elements = builder.table.elements.len(),
            referenced_nodes = builder.table.node_to_elements.len(),
            redefined = builder.replaced,
            label_mismatches = builder.mismatched,
            "element table built"
        );
        Ok(builder.table)
    }

    /// Adds the element on `raw` if it is a connectivity record.
    pub fn add_record(&mut self, declared_type: &str, raw: &str) -> Option<EntityId> {
        let (id, nodes) = parse_connectivity(raw)?;
        let part = self.parts.get(&id).copied().unwrap_or(UNKNOWN_PART);
        let element = Element::new(id, declared_type, nodes, part);

        if element.type_mismatch() {
            self.mismatched += 1;
            tracing::debug!(
                element = id,
                declared = declared_type,
                derived = %element.element_type,
                "subsection label differs from connectivity-derived type"
            );
        }
        if self.table.insert(element).is_some() {
            self.replaced += 1;
            tracing::debug!(element = id, "element redefined, keeping the later definition");
        }
        Some(id)
    }
}

impl SectionVisitor for ElementTableBuilder<'_> {
    fn content(
        &mut self,
        scanner: &SectionScanner,
        raw: &str,
    ) -> std::result::Result<(), StructureError> {
        if let ScanState::InElementType(label) = scanner.state()
            && self.add_record(label, raw).is_none()
        {
            tracing::trace!(line = scanner.line(), "not a connectivity record");
        }
        Ok(())
    }
}

/// Parses an indented `id [n1, ..., nk]` line. Node tokens that are not
/// plain digits are skipped; an empty bracket is not a record.
pub fn parse_connectivity(raw: &str) -> Option<(EntityId, Vec<EntityId>)> {
    if !raw.starts_with(char::is_whitespace) {
        return None;
    }
    let parts = bracketed(raw)?;
    if !parts.closed || parts.body.is_empty() {
        return None;
    }
    let id = numeric_id(parts.head)?;
    let nodes = fields(parts.body).filter_map(numeric_id).collect();
    Some((id, nodes))
}
