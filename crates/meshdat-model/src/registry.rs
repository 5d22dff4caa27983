//! Element sets, part ranges and surface names.
//!
//! Collected in one pass over the whole document from the first `Set`
//! block's `Element`, `Part` and `Surface` subsections and from the first
//! standalone top-level `Part` block. Later blocks of either kind are
//! checked for structure only.

use std::collections::{BTreeMap, HashMap};

use meshdat_inp::range::{self, EntityId, IdRange};
use meshdat_inp::{
    MeshSource, Result, ScanState, Section, SectionScanner, SectionVisitor, SetKind,
    StructureError, scan_document,
};

use crate::entry::{Definition, EntryReader};

/// Part ranges kept in the order each part was first defined.
///
/// Redefining a part replaces its ranges in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartRanges {
    parts: Vec<(String, Vec<IdRange>)>,
    positions: HashMap<String, usize>,
}

impl PartRanges {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the ranges that were replaced, if the part already existed.
    pub fn insert(&mut self, name: String, ranges: Vec<IdRange>) -> Option<Vec<IdRange>> {
        if let Some(&position) = self.positions.get(&name) {
            return Some(std::mem::replace(&mut self.parts[position].1, ranges));
        }
        self.positions.insert(name.clone(), self.parts.len());
        self.parts.push((name, ranges));
        None
    }

    pub fn get(&self, name: &str) -> Option<&Vec<IdRange>> {
        let &position = self.positions.get(name)?;
        Some(&self.parts[position].1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[IdRange])> {
        self.parts
            .iter()
            .map(|(name, ranges)| (name.as_str(), ranges.as_slice()))
    }
}

/// Named range maps and the surface list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetRegistry {
    pub element_sets: BTreeMap<String, Vec<IdRange>>,
    pub part_ranges: PartRanges,
    /// Surface names in document order; their ranges are not kept.
    pub surfaces: Vec<String>,
}

impl SetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scans the whole document.
    pub fn scan(source: &dyn MeshSource) -> Result<Self> {
        let mut visitor = RegistryVisitor::default();
        scan_document(source, &mut visitor)?;
        let registry = visitor.registry;
        tracing::info!(
            element_sets = registry.element_sets.len(),
            parts = registry.part_ranges.len(),
            surfaces = registry.surfaces.len(),
            "registered sets"
        );
        Ok(registry)
    }

    pub fn is_empty(&self) -> bool {
        self.element_sets.is_empty() && self.part_ranges.is_empty() && self.surfaces.is_empty()
    }

    /// Element id to owning part. Parts are applied in definition order, so
    /// an id claimed by several parts ends up with the last one defined.
    pub fn part_index(&self) -> HashMap<EntityId, &str> {
        let mut index = HashMap::new();
        for (name, ranges) in self.part_ranges.iter() {
            for id in range::expand(ranges) {
                index.insert(id, name);
            }
        }
        index
    }
}

#[derive(Debug, Default)]
struct RegistryVisitor {
    registry: SetRegistry,
    entries: EntryReader,
    /// Top-level sections already read.
    seen: Vec<Section>,
    /// Inside the first block of a registry section.
    active: bool,
}

impl RegistryVisitor {
    fn record(&mut self, target: Target, definition: Definition) {
        let Definition { name, ranges } = definition;
        match target {
            Target::ElementSet => {
                self.registry
                    .element_sets
                    .insert(name, range::parse(&ranges));
            }
            Target::Part => {
                let parsed = range::parse(&ranges);
                if self.registry.part_ranges.insert(name.clone(), parsed).is_some() {
                    tracing::debug!(part = %name, "part redefined, keeping the later ranges");
                }
            }
            Target::Surface => self.registry.surfaces.push(name),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Target {
    ElementSet,
    Part,
    Surface,
}

fn target_of(state: &ScanState) -> Option<Target> {
    match state {
        ScanState::InSetSubsection(SetKind::Element) => Some(Target::ElementSet),
        ScanState::InSetSubsection(SetKind::Part) | ScanState::InPart => Some(Target::Part),
        ScanState::InSetSubsection(SetKind::Surface) => Some(Target::Surface),
        _ => None,
    }
}

impl SectionVisitor for RegistryVisitor {
    fn enter(&mut self, scanner: &SectionScanner) -> std::result::Result<(), StructureError> {
        if scanner.depth() != 1 {
            return Ok(());
        }
        let Some(section @ (Section::Set | Section::Part)) = scanner.section() else {
            return Ok(());
        };
        if self.seen.contains(&section) {
            tracing::debug!(
                line = scanner.line(),
                section = ?section,
                "skipping repeated top-level block"
            );
        } else {
            self.seen.push(section);
            self.active = true;
        }
        Ok(())
    }

    fn content(
        &mut self,
        scanner: &SectionScanner,
        raw: &str,
    ) -> std::result::Result<(), StructureError> {
        if !self.active {
            return Ok(());
        }
        let Some(target) = target_of(scanner.state()) else {
            return Ok(());
        };
        if let Some(definition) = self.entries.feed(scanner, raw)? {
            self.record(target, definition);
        }
        Ok(())
    }

    fn exit(
        &mut self,
        scanner: &SectionScanner,
        left: &ScanState,
    ) -> std::result::Result<(), StructureError> {
        if self.active && target_of(left).is_some() {
            self.entries.close(scanner)?;
        }
        if scanner.depth() == 0 {
            self.active = false;
        }
        Ok(())
    }
}
