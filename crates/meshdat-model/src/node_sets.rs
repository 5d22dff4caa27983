//! Node sets from the first `Set { Node { name [ranges] } }` block,
//! expanded eagerly.

use std::collections::BTreeMap;

use meshdat_inp::range;
use meshdat_inp::{
    EntityId, MeshSource, Result, ScanState, Section, SectionScanner, SectionVisitor, SetKind,
    StructureError, scan_section,
};

use crate::entry::EntryReader;

#[derive(Debug, Default)]
pub struct NodeSetExpander {
    node_sets: BTreeMap<String, Vec<EntityId>>,
    entries: EntryReader,
}

impl NodeSetExpander {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build(source: &dyn MeshSource) -> Result<BTreeMap<String, Vec<EntityId>>> {
        let mut expander = Self::new();
        scan_section(source, Section::Set, &mut expander)?;
        tracing::info!(
            node_sets = expander.node_sets.len(),
            ids = expander.node_sets.values().map(Vec::len).sum::<usize>(),
            "node sets expanded"
        );
        Ok(expander.node_sets)
    }
}

fn in_node_subsection(state: &ScanState) -> bool {
    *state == ScanState::InSetSubsection(SetKind::Node)
}

impl SectionVisitor for NodeSetExpander {
    fn content(
        &mut self,
        scanner: &SectionScanner,
        raw: &str,
    ) -> std::result::Result<(), StructureError> {
        if !in_node_subsection(scanner.state()) {
            return Ok(());
        }
        if let Some(definition) = self.entries.feed(scanner, raw)? {
            let ids: Vec<EntityId> = range::expand(&range::parse(&definition.ranges)).collect();
            if self.node_sets.insert(definition.name.clone(), ids).is_some() {
                tracing::debug!(set = %definition.name, "node set redefined, keeping the later ids");
            }
        }
        Ok(())
    }

    fn exit(
        &mut self,
        scanner: &SectionScanner,
        left: &ScanState,
    ) -> std::result::Result<(), StructureError> {
        if in_node_subsection(left) {
            self.entries.close(scanner)?;
        }
        Ok(())
    }
}
