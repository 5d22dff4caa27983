use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use meshdat_model::MeshModel;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Serializable overview of a loaded model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MeshSummary {
    pub schema_version: u32,
    pub source: Option<String>,
    pub nodes: usize,
    pub elements: usize,
    pub referenced_nodes: usize,
    pub element_types: BTreeMap<String, usize>,
    pub parts: BTreeMap<String, usize>,
    pub element_sets: Vec<String>,
    pub node_sets: BTreeMap<String, usize>,
    pub surfaces: Vec<String>,
    pub control_tables: BTreeMap<String, usize>,
}

impl MeshSummary {
    pub fn from_model(model: &MeshModel) -> Self {
        let stats = model.statistics();
        let control = model.control();
        let control_tables = [
            ("Material", control.materials.len()),
            ("CrossSection", control.cross_sections.len()),
            ("PartProperty", control.part_properties.len()),
            ("Contact", control.contacts.len()),
            ("Constraint", control.constraints.len()),
            ("Load", control.loads.len()),
            ("InitialCondition", control.initial_conditions.len()),
        ]
        .into_iter()
        .map(|(name, count)| (name.to_string(), count))
        .collect();

        Self {
            schema_version: 1,
            source: model.source_name().map(str::to_string),
            nodes: stats.num_nodes,
            elements: stats.num_elements,
            referenced_nodes: stats.adjacency_entries,
            element_types: stats
                .element_type_counts
                .iter()
                .map(|(kind, count)| (kind.to_string(), *count))
                .collect(),
            parts: stats.part_counts.into_iter().collect(),
            element_sets: model.registry().element_sets.keys().cloned().collect(),
            node_sets: model
                .node_sets()
                .iter()
                .map(|(name, ids)| (name.clone(), ids.len()))
                .collect(),
            surfaces: model.surfaces().to_vec(),
            control_tables,
        }
    }
}

pub fn write_summary_json(path: impl AsRef<Path>, model: &MeshModel) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let bytes = serde_json::to_vec_pretty(&MeshSummary::from_model(model))?;
    fs::write(path, bytes)?;
    tracing::info!(path = %path.display(), "summary written");
    Ok(())
}
