//! End-to-end loading of complete mesh documents.

use std::fs;

use approx::assert_relative_eq;
use meshdat_model::{
    ElementType, FileSource, LoadState, MeshError, MeshModel, MeshSource, TextSource, UNKNOWN_PART,
};

const CUBE: &str = "\
Set {
    Element {
        Eall [0-1]
    }
    Part {
        P1 [0-10]
    }
    Surface {
        Top [0]
    }
    Node {
        Set-2 [0,1,4,5]
        Bottom [0-3,
                8]
    }
}
Node {
    0 [1,1,1]
    1 [1,1,0]
    2 [1,0,1]
    3 [1,0,0]
    4 [0,1,1]
    5 [0,1,0]
    6 [0,0,1]
    7 [0,0,0]
    8 [2,0]
}
Element {
    Hex8 {
        0 [4,5,7,6,0,1,3,2]
    }
    Line2 {
        99 [3,8]
    }
}
";

fn load(doc: &str) -> MeshModel {
    let mut model = MeshModel::new();
    model
        .load(&TextSource::new(doc))
        .expect("mesh should load");
    model
}

#[test]
fn hex8_cube_builds_nodes_elements_and_adjacency() {
    let doc = "\
Node {
    0 [0,0,0]
    1 [1,0,0]
    2 [1,1,0]
    3 [0,1,0]
}
Element {
    Hex8 {
        0 [0,1,2,3,4,5,6,7]
    }
}
";
    let model = load(doc);
    assert!(model.is_loaded());
    assert_eq!(model.node_count(), 4);
    assert_eq!(model.element_count(), 1);
    assert_eq!(model.element(0).unwrap().element_type.to_string(), "Hex8");
    for node in 0..8 {
        assert_eq!(model.elements_of_node(node), &[0]);
    }
}

#[test]
fn full_document_populates_every_table() {
    let model = load(CUBE);

    assert_eq!(model.node_count(), 9);
    assert_eq!(model.node_coords(8), Some([2.0, 0.0, 0.0]));
    let node = model.node(2).unwrap();
    assert_relative_eq!(node.y, 0.0);
    assert_relative_eq!(node.z, 1.0);

    let hex = model.element(0).unwrap();
    assert_eq!(hex.element_type, ElementType::Hex8);
    assert_eq!(hex.nodes, vec![4, 5, 7, 6, 0, 1, 3, 2]);
    assert_eq!(hex.part_name, "P1");
    assert_eq!(model.element(99).unwrap().part_name, UNKNOWN_PART);

    assert_eq!(model.elements_of_node(3), &[0, 99]);
    assert_eq!(model.elements_of_node(8), &[99]);
    assert!(model.elements_of_node(42).is_empty());

    assert_eq!(model.elements_of_set("Eall"), Some(vec![0, 1]));
    assert_eq!(model.elements_of_part("P1").map(|ids| ids.len()), Some(11));
    assert_eq!(model.surfaces(), &["Top".to_string()]);
    assert_eq!(model.node_set("Set-2"), Some(&[0, 1, 4, 5][..]));
    assert_eq!(model.node_set("Bottom"), Some(&[0, 1, 2, 3, 8][..]));
    assert!(model.node_set("Missing").is_none());
}

#[test]
fn every_adjacency_entry_matches_a_connectivity_occurrence() {
    let model = load(CUBE);
    for (node, elements) in model.node_to_elements() {
        for element in elements {
            assert!(model.element(*element).unwrap().nodes.contains(node));
        }
    }
    let occurrences: usize = model.elements().values().map(|e| e.nodes.len()).sum();
    let indexed: usize = model.node_to_elements().values().map(Vec::len).sum();
    assert_eq!(occurrences, indexed);
}

#[test]
fn second_load_is_a_no_op() {
    let mut model = load(CUBE);
    let nodes = model.node_count();
    let elements = model.element_count();

    // A different, even broken, source is never read once loaded.
    model
        .load(&TextSource::new("Node {\n"))
        .expect("second load should be ignored");
    assert_eq!(model.state(), LoadState::Loaded);
    assert_eq!(model.node_count(), nodes);
    assert_eq!(model.element_count(), elements);
}

#[test]
fn duplicate_ids_keep_the_last_definition() {
    let doc = "\
Node {
    1 [0,0,0]
    1 [5,5,5]
}
Element {
    Line2 {
        4 [1,2]
    }
    Tri3 {
        4 [1,2,3]
    }
}
";
    let model = load(doc);
    assert_eq!(model.node_coords(1), Some([5.0, 5.0, 5.0]));
    assert_eq!(model.element(4).unwrap().element_type, ElementType::Tri3);
    assert_eq!(model.elements_of_node(3), &[4]);
    assert_eq!(model.elements_of_node(1), &[4]);
}

#[test]
fn element_in_overlapping_parts_belongs_to_the_last_defined_part() {
    let model = load(
        "\
Set {
    Part {
        Zeta [0-10]
        Alpha [5]
    }
}
Element {
    Line2 {
        5 [0,1]
        6 [1,2]
    }
}
",
    );
    assert_eq!(model.element(5).unwrap().part_name, "Alpha");
    assert_eq!(model.element(6).unwrap().part_name, "Zeta");
}

#[test]
fn truncated_document_is_reported_and_leaves_model_unloaded() {
    let doc = "Node {\n    0 [0,0,0]\nElement {\n    Hex8 {\n";
    let mut model = MeshModel::new();
    let err = model
        .load(&TextSource::named("broken.dat", doc))
        .expect_err("truncated document should fail");

    match &err {
        MeshError::Structure { line, section, .. } => {
            assert_eq!(*line, 4);
            assert_eq!(section, "Node/Element/Hex8");
        }
        other => panic!("expected structure error, got {other:?}"),
    }
    assert_eq!(model.state(), LoadState::Unloaded);
    assert_eq!(model.node_count(), 0);
    assert_eq!(model.element_count(), 0);
}

#[test]
fn stray_closing_brace_is_reported() {
    let mut model = MeshModel::new();
    let err = model
        .load(&TextSource::new("Node {\n}\n}\n"))
        .expect_err("unbalanced brace should fail");
    assert_eq!(err.line(), Some(3));
    assert!(!model.is_loaded());
}

#[test]
fn loads_from_file_and_reports_missing_file() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("mesh.dat");
    fs::write(&path, CUBE).expect("write mesh");

    let mut model = MeshModel::new();
    model.load_file(&path).expect("file should load");
    assert_eq!(model.element_count(), 2);
    assert_eq!(model.source_name(), Some(path.display().to_string().as_str()));

    let missing = FileSource::new(dir.path().join("absent.dat"));
    let mut empty = MeshModel::new();
    let err = empty.load(&missing).expect_err("missing file should fail");
    assert!(matches!(err, MeshError::Io { .. }));
    assert!(err.to_string().contains(&missing.describe()));
    assert_eq!(empty.state(), LoadState::Unloaded);
}

#[test]
fn statistics_summarize_the_loaded_mesh() {
    let stats = load(CUBE).statistics();
    assert_eq!(stats.num_nodes, 9);
    assert_eq!(stats.num_elements, 2);
    assert_eq!(stats.element_type_counts.get(&ElementType::Hex8), Some(&1));
    assert_eq!(stats.element_type_counts.get(&ElementType::Line2), Some(&1));
    assert_eq!(stats.part_counts.get("P1"), Some(&1));
    assert_eq!(stats.adjacency_entries, 9);
    assert_eq!(stats.node_sets, 2);
    assert!(stats.format().contains("Hex8: 1"));
}
