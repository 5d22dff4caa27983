//! The mesh model aggregate and its load sequence.
//!
//! `load` runs four streaming passes over the source: set registry (only
//! when not yet registered), nodes, elements and node sets. The tables are
//! staged and only published into the model once every pass succeeded.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use meshdat_inp::range::{self, IdRange};
use meshdat_inp::{EntityId, FileSource, MeshSource, Result};

use crate::control::ControlTables;
use crate::element_table::{ElementTable, ElementTableBuilder};
use crate::mesh::{Element, MeshStatistics, Node};
use crate::node_sets::NodeSetExpander;
use crate::node_table::NodeTableBuilder;
use crate::registry::SetRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Unloaded,
    Loading,
    Loaded,
}

/// Indexed mesh topology plus the control tables.
#[derive(Debug, Clone, Default)]
pub struct MeshModel {
    source_name: Option<String>,
    nodes: HashMap<EntityId, Node>,
    elements: ElementTable,
    registry: SetRegistry,
    node_sets: BTreeMap<String, Vec<EntityId>>,
    control: ControlTables,
    state: LoadState,
}

struct StagedTables {
    registry: Option<SetRegistry>,
    nodes: HashMap<EntityId, Node>,
    elements: ElementTable,
    node_sets: BTreeMap<String, Vec<EntityId>>,
}

impl MeshModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn is_loaded(&self) -> bool {
        self.state == LoadState::Loaded
    }

    /// Description of the source the model was loaded from.
    pub fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }

    /// Loads the mesh once. Further calls on a loaded model do nothing.
    ///
    /// On error the model is left `Unloaded` with its tables untouched.
    pub fn load(&mut self, source: &dyn MeshSource) -> Result<()> {
        if self.state == LoadState::Loaded {
            tracing::debug!(source = %source.describe(), "mesh already loaded");
            return Ok(());
        }

        let name = source.describe();
        tracing::info!(source = %name, "building in-memory mesh model");
        self.state = LoadState::Loading;

        match self.stage(source) {
            Ok(staged) => {
                if let Some(registry) = staged.registry {
                    self.registry = registry;
                }
                self.nodes = staged.nodes;
                self.elements = staged.elements;
                self.node_sets = staged.node_sets;
                self.source_name = Some(name);
                self.state = LoadState::Loaded;
                tracing::info!(
                    nodes = self.nodes.len(),
                    elements = self.elements.elements.len(),
                    adjacency_entries = self.elements.node_to_elements.len(),
                    "mesh model loaded"
                );
                Ok(())
            }
            Err(err) => {
                self.state = LoadState::Unloaded;
                tracing::error!(error = %err, "failed to build mesh model");
                Err(err)
            }
        }
    }

    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.load(&FileSource::new(path))
    }

    /// Registers element sets, parts and surfaces without loading the mesh.
    /// `load` reuses a registry populated this way.
    pub fn register_sets(&mut self, source: &dyn MeshSource) -> Result<()> {
        if self.is_loaded() || !self.registry.is_empty() {
            return Ok(());
        }
        self.registry = SetRegistry::scan(source)?;
        Ok(())
    }

    fn stage(&self, source: &dyn MeshSource) -> Result<StagedTables> {
        let scanned = if self.registry.is_empty() {
            Some(SetRegistry::scan(source)?)
        } else {
            None
        };
        let registry = scanned.as_ref().unwrap_or(&self.registry);
        let parts = registry.part_index();

        let nodes = NodeTableBuilder::build(source)?;
        let elements = ElementTableBuilder::build(source, &parts)?;
        let node_sets = NodeSetExpander::build(source)?;
        drop(parts);

        Ok(StagedTables {
            registry: scanned,
            nodes,
            elements,
            node_sets,
        })
    }

    pub fn node(&self, id: EntityId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn node_coords(&self, id: EntityId) -> Option<[f64; 3]> {
        self.nodes.get(&id).map(Node::coords)
    }

    pub fn element(&self, id: EntityId) -> Option<&Element> {
        self.elements.elements.get(&id)
    }

    /// Elements whose connectivity contains `node`, in parse order.
    pub fn elements_of_node(&self, node: EntityId) -> &[EntityId] {
        self.elements
            .node_to_elements
            .get(&node)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn nodes(&self) -> &HashMap<EntityId, Node> {
        &self.nodes
    }

    pub fn elements(&self) -> &HashMap<EntityId, Element> {
        &self.elements.elements
    }

    pub fn node_to_elements(&self) -> &HashMap<EntityId, Vec<EntityId>> {
        &self.elements.node_to_elements
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn element_count(&self) -> usize {
        self.elements.elements.len()
    }

    pub fn registry(&self) -> &SetRegistry {
        &self.registry
    }

    pub fn element_set(&self, name: &str) -> Option<&[IdRange]> {
        self.registry.element_sets.get(name).map(Vec::as_slice)
    }

    pub fn part_ranges(&self, name: &str) -> Option<&[IdRange]> {
        self.registry.part_ranges.get(name).map(Vec::as_slice)
    }

    pub fn surfaces(&self) -> &[String] {
        &self.registry.surfaces
    }

    pub fn node_set(&self, name: &str) -> Option<&[EntityId]> {
        self.node_sets.get(name).map(Vec::as_slice)
    }

    pub fn node_sets(&self) -> &BTreeMap<String, Vec<EntityId>> {
        &self.node_sets
    }

    /// Expanded ids of an element set.
    pub fn elements_of_set(&self, name: &str) -> Option<Vec<EntityId>> {
        self.element_set(name)
            .map(|ranges| range::expand(ranges).collect())
    }

    /// Expanded ids of a part's ranges.
    pub fn elements_of_part(&self, name: &str) -> Option<Vec<EntityId>> {
        self.part_ranges(name)
            .map(|ranges| range::expand(ranges).collect())
    }

    pub fn control(&self) -> &ControlTables {
        &self.control
    }

    pub fn set_control(&mut self, control: ControlTables) {
        self.control = control;
    }

    pub fn statistics(&self) -> MeshStatistics {
        let mut element_type_counts = HashMap::new();
        let mut part_counts = HashMap::new();
        for element in self.elements.elements.values() {
            *element_type_counts.entry(element.element_type).or_insert(0) += 1;
            *part_counts.entry(element.part_name.clone()).or_insert(0) += 1;
        }

        MeshStatistics {
            num_nodes: self.nodes.len(),
            num_elements: self.elements.elements.len(),
            element_type_counts,
            part_counts,
            adjacency_entries: self.elements.node_to_elements.len(),
            element_sets: self.registry.element_sets.len(),
            part_ranges: self.registry.part_ranges.len(),
            node_sets: self.node_sets.len(),
            surfaces: self.registry.surfaces.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshdat_inp::TextSource;

    #[test]
    fn new_model_is_empty_and_unloaded() {
        let model = MeshModel::new();
        assert_eq!(model.state(), LoadState::Unloaded);
        assert_eq!(model.node_count(), 0);
        assert_eq!(model.element_count(), 0);
        assert!(model.surfaces().is_empty());
        assert!(model.elements_of_node(0).is_empty());
        assert!(model.control().is_empty());
    }

    #[test]
    fn register_sets_is_reused_by_load() {
        let doc = "Set {\n  Part {\n    P1 [0-1]\n  }\n}\nElement {\n  Line2 {\n    1 [0,1]\n  }\n}\n";
        let mut model = MeshModel::new();
        model.register_sets(&TextSource::new(doc)).unwrap();
        assert_eq!(model.state(), LoadState::Unloaded);
        assert_eq!(model.elements_of_part("P1"), Some(vec![0, 1]));

        model.load(&TextSource::new(doc)).unwrap();
        assert_eq!(model.element(1).unwrap().part_name, "P1");
    }

    #[test]
    fn failed_load_leaves_model_untouched() {
        let mut model = MeshModel::new();
        let err = model
            .load(&TextSource::new("Node {\n  0 [0,0,0]\n"))
            .unwrap_err();
        assert_eq!(err.line(), Some(2));
        assert_eq!(model.state(), LoadState::Unloaded);
        assert_eq!(model.node_count(), 0);
        assert!(model.source_name().is_none());
    }
}
