//! Re-openable line sources. Every pass opens its own reader and streams
//! the document from the first line.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor};
use std::path::{Path, PathBuf};

pub trait MeshSource {
    fn open(&self) -> io::Result<Box<dyn BufRead + '_>>;

    /// Name used in error messages and logs.
    fn describe(&self) -> String;
}

/// Mesh document on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MeshSource for FileSource {
    fn open(&self) -> io::Result<Box<dyn BufRead + '_>> {
        let file = File::open(&self.path)?;
        Ok(Box::new(BufReader::new(file)))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Mesh document held in memory.
#[derive(Debug, Clone)]
pub struct TextSource<'a> {
    name: String,
    text: &'a str,
}

impl<'a> TextSource<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            name: "<memory>".to_string(),
            text,
        }
    }

    pub fn named(name: impl Into<String>, text: &'a str) -> Self {
        Self {
            name: name.into(),
            text,
        }
    }
}

impl MeshSource for TextSource<'_> {
    fn open(&self) -> io::Result<Box<dyn BufRead + '_>> {
        Ok(Box::new(Cursor::new(self.text.as_bytes())))
    }

    fn describe(&self) -> String {
        self.name.clone()
    }
}

impl<S: MeshSource + ?Sized> MeshSource for &S {
    fn open(&self) -> io::Result<Box<dyn BufRead + '_>> {
        (**self).open()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn read_all(source: &dyn MeshSource) -> Vec<String> {
        source
            .open()
            .expect("source should open")
            .lines()
            .collect::<io::Result<Vec<_>>>()
            .expect("lines should decode")
    }

    #[test]
    fn text_source_reopens_from_start() {
        let source = TextSource::named("inline", "Node {\n}\n");
        assert_eq!(read_all(&source), vec!["Node {", "}"]);
        assert_eq!(read_all(&source), vec!["Node {", "}"]);
        assert_eq!(source.describe(), "inline");
    }

    #[test]
    fn file_source_streams_file_contents() {
        let mut file = tempfile::NamedTempFile::new().expect("create temp file");
        writeln!(file, "Node {{\n  0 [0,0,0]\n}}").expect("write mesh");
        let source = FileSource::new(file.path());
        assert_eq!(read_all(&source).len(), 3);
        assert_eq!(read_all(&source)[1], "  0 [0,0,0]");
    }

    #[test]
    fn missing_file_fails_to_open() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let source = FileSource::new(dir.path().join("absent.dat"));
        let err = source.open().err().expect("open should fail");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
