//! Error types for meshdat-inp

use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, MeshError>;

#[derive(Error, Debug)]
pub enum MeshError {
    #[error("failed to read {source_name}: {error}")]
    Io {
        source_name: String,
        #[source]
        error: io::Error,
    },

    #[error("{source_name}:{line}: {message} (in {section})")]
    Structure {
        source_name: String,
        line: usize,
        section: String,
        message: String,
    },
}

impl MeshError {
    pub fn io(source_name: impl Into<String>, error: io::Error) -> Self {
        MeshError::Io {
            source_name: source_name.into(),
            error,
        }
    }

    /// 1-based line of a structural error, `None` for I/O failures.
    pub fn line(&self) -> Option<usize> {
        match self {
            MeshError::Structure { line, .. } => Some(*line),
            MeshError::Io { .. } => None,
        }
    }
}

/// Structural failure located by the scanner, before the source name is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureError {
    pub line: usize,
    pub section: String,
    pub message: String,
}

impl StructureError {
    pub fn into_mesh_error(self, source_name: impl Into<String>) -> MeshError {
        MeshError::Structure {
            source_name: source_name.into(),
            line: self.line,
            section: self.section,
            message: self.message,
        }
    }
}
