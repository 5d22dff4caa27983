use std::fs;
use std::io;
use std::path::Path;

use meshdat_model::{ControlTables, MeshModel};

use crate::error::{IoError, Result};

/// Reads a control document. Missing tables come back empty.
pub fn load_control(path: impl AsRef<Path>) -> Result<ControlTables> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => IoError::FileNotFound(path.display().to_string()),
        _ => IoError::Io(err),
    })?;
    let control = ControlTables::from_json_slice(&bytes)?;
    tracing::info!(
        path = %path.display(),
        materials = control.materials.len(),
        parts = control.part_properties.len(),
        loads = control.loads.len(),
        "control tables loaded"
    );
    Ok(control)
}

/// Reads a control document into `model`, replacing its control tables.
pub fn load_control_into_model(path: impl AsRef<Path>, model: &mut MeshModel) -> Result<()> {
    let control = load_control(path)?;
    model.set_control(control);
    Ok(())
}
