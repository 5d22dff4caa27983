use std::path::Path;

use meshdat_model::MeshModel;

use crate::error::{IoError, Result};

/// Loads a mesh document from disk into a fresh model.
pub fn load_mesh(path: impl AsRef<Path>) -> Result<MeshModel> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(IoError::FileNotFound(path.display().to_string()));
    }
    let mut model = MeshModel::new();
    model.load_file(path)?;
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn loads_mesh_from_disk() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("bar.dat");
        fs::write(&path, "Node {\n  0 [0,0,0]\n  1 [1,0,0]\n}\nElement {\n  Line2 {\n    0 [0,1]\n  }\n}\n")
            .expect("write mesh");

        let model = load_mesh(&path).expect("mesh should load");
        assert_eq!(model.node_count(), 2);
        assert_eq!(model.element_count(), 1);
    }

    #[test]
    fn missing_mesh_is_reported_by_name() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let err = load_mesh(dir.path().join("absent.dat")).expect_err("should fail");
        assert!(matches!(err, IoError::FileNotFound(ref name) if name.ends_with("absent.dat")));
    }

    #[test]
    fn structural_errors_surface_as_mesh_errors() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("open.dat");
        fs::write(&path, "Node {\n  0 [0,0,0]\n").expect("write mesh");

        let err = load_mesh(&path).expect_err("should fail");
        assert!(matches!(err, IoError::Mesh(_)));
        assert!(err.to_string().contains("open.dat"));
    }
}
