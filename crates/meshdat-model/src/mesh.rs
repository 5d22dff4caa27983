//! Mesh records: nodes, elements and connectivity-derived element types.

use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use meshdat_inp::EntityId;
use serde::Serialize;

/// Part name given to elements that fall in no part range.
pub const UNKNOWN_PART: &str = "Unknown";

/// A node in the finite element mesh
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub id: EntityId,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Node {
    pub fn new(id: EntityId, x: f64, y: f64, z: f64) -> Self {
        Self { id, x, y, z }
    }

    /// Get coordinates as an array
    pub fn coords(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

/// Element type, derived from the number of nodes in the connectivity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementType {
    /// 2-node line
    Line2,
    /// 3-node triangle
    Tri3,
    /// 4-node quadrilateral
    Quad4,
    /// 6-node quadratic triangle
    Tri6,
    /// 8-node brick
    Hex8,
    /// 9-node quadratic quadrilateral
    Quad9,
    /// 10-node quadratic tetrahedron
    Tet10,
    /// 20-node quadratic brick
    Hex20,
    /// Any other node count
    Unknown(usize),
}

impl ElementType {
    /// The connectivity length alone decides the type; a 4-node tetrahedron
    /// therefore reads as `Quad4`.
    pub fn from_node_count(count: usize) -> Self {
        match count {
            2 => ElementType::Line2,
            3 => ElementType::Tri3,
            4 => ElementType::Quad4,
            6 => ElementType::Tri6,
            8 => ElementType::Hex8,
            9 => ElementType::Quad9,
            10 => ElementType::Tet10,
            20 => ElementType::Hex20,
            other => ElementType::Unknown(other),
        }
    }

    pub fn num_nodes(&self) -> usize {
        match self {
            ElementType::Line2 => 2,
            ElementType::Tri3 => 3,
            ElementType::Quad4 => 4,
            ElementType::Tri6 => 6,
            ElementType::Hex8 => 8,
            ElementType::Quad9 => 9,
            ElementType::Tet10 => 10,
            ElementType::Hex20 => 20,
            ElementType::Unknown(count) => *count,
        }
    }
}

impl Display for ElementType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ElementType::Line2 => write!(f, "Line2"),
            ElementType::Tri3 => write!(f, "Tri3"),
            ElementType::Quad4 => write!(f, "Quad4"),
            ElementType::Tri6 => write!(f, "Tri6"),
            ElementType::Hex8 => write!(f, "Hex8"),
            ElementType::Quad9 => write!(f, "Quad9"),
            ElementType::Tet10 => write!(f, "Tet10"),
            ElementType::Hex20 => write!(f, "Hex20"),
            ElementType::Unknown(count) => write!(f, "Unknown_{count}_node"),
        }
    }
}

impl Serialize for ElementType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// An element in the finite element mesh
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    pub id: EntityId,
    pub element_type: ElementType,
    /// Label of the `Element` subsection the record was read from.
    pub declared_type: String,
    /// Node connectivity; order is the local numbering.
    pub nodes: Vec<EntityId>,
    pub part_name: String,
}

impl Element {
    pub fn new(
        id: EntityId,
        declared_type: impl Into<String>,
        nodes: Vec<EntityId>,
        part_name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            element_type: ElementType::from_node_count(nodes.len()),
            declared_type: declared_type.into(),
            nodes,
            part_name: part_name.into(),
        }
    }

    /// True when the subsection label disagrees with the derived type.
    pub fn type_mismatch(&self) -> bool {
        !self
            .declared_type
            .eq_ignore_ascii_case(&self.element_type.to_string())
    }
}

/// Mesh statistics for reporting
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeshStatistics {
    pub num_nodes: usize,
    pub num_elements: usize,
    pub element_type_counts: HashMap<ElementType, usize>,
    pub part_counts: HashMap<String, usize>,
    /// Nodes that at least one element references.
    pub adjacency_entries: usize,
    pub element_sets: usize,
    pub part_ranges: usize,
    pub node_sets: usize,
    pub surfaces: usize,
}

impl MeshStatistics {
    /// Format as a human-readable string
    pub fn format(&self) -> String {
        let mut lines = vec![
            format!("Nodes: {}", self.num_nodes),
            format!("Elements: {}", self.num_elements),
            format!("Referenced nodes: {}", self.adjacency_entries),
            format!(
                "Sets: {} element, {} node, {} part, {} surface",
                self.element_sets, self.node_sets, self.part_ranges, self.surfaces
            ),
        ];

        if !self.element_type_counts.is_empty() {
            lines.push("Element types:".to_string());
            let mut types: Vec<_> = self.element_type_counts.iter().collect();
            types.sort();
            for (elem_type, count) in types {
                lines.push(format!("  {elem_type}: {count}"));
            }
        }

        if !self.part_counts.is_empty() {
            lines.push("Parts:".to_string());
            let mut parts: Vec<_> = self.part_counts.iter().collect();
            parts.sort();
            for (part, count) in parts {
                lines.push(format!("  {part}: {count}"));
            }
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_creation() {
        let node = Node::new(1, 0.5, -1.0, 2.0);
        assert_eq!(node.id, 1);
        assert_eq!(node.coords(), [0.5, -1.0, 2.0]);
    }

    #[test]
    fn element_type_from_node_count() {
        let expected = [
            (2, "Line2"),
            (3, "Tri3"),
            (4, "Quad4"),
            (6, "Tri6"),
            (8, "Hex8"),
            (9, "Quad9"),
            (10, "Tet10"),
            (20, "Hex20"),
            (13, "Unknown_13_node"),
            (0, "Unknown_0_node"),
        ];
        for (count, label) in expected {
            let element_type = ElementType::from_node_count(count);
            assert_eq!(element_type.to_string(), label);
            assert_eq!(element_type.num_nodes(), count);
        }
    }

    #[test]
    fn element_type_comes_from_connectivity_not_label() {
        let elem = Element::new(7, "Tet4", vec![1, 2, 3, 4], UNKNOWN_PART);
        assert_eq!(elem.element_type, ElementType::Quad4);
        assert!(elem.type_mismatch());

        let elem = Element::new(8, "hex8", (0..8).collect(), "P1");
        assert_eq!(elem.element_type, ElementType::Hex8);
        assert!(!elem.type_mismatch());
    }

    #[test]
    fn element_type_serializes_as_label() {
        let json = serde_json::to_string(&ElementType::Unknown(5)).unwrap();
        assert_eq!(json, "\"Unknown_5_node\"");
    }

    #[test]
    fn statistics_format_lists_types_in_order() {
        let mut element_type_counts = HashMap::new();
        element_type_counts.insert(ElementType::Hex8, 2);
        element_type_counts.insert(ElementType::Line2, 1);
        let stats = MeshStatistics {
            num_nodes: 12,
            num_elements: 3,
            element_type_counts,
            part_counts: HashMap::new(),
            adjacency_entries: 12,
            element_sets: 1,
            part_ranges: 0,
            node_sets: 2,
            surfaces: 0,
        };
        let text = stats.format();
        assert!(text.contains("Nodes: 12"));
        let line2 = text.find("Line2: 1").unwrap();
        let hex8 = text.find("Hex8: 2").unwrap();
        assert!(line2 < hex8);
    }
}
