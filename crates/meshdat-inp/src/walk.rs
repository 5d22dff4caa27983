//! Streaming passes over a [`MeshSource`].

use std::io::BufRead;

use crate::error::{MeshError, Result, StructureError};
use crate::scanner::{ScanEvent, ScanState, Section, SectionScanner};
use crate::source::MeshSource;

/// Receives the lines of a pass. The scanner is passed along so visitors
/// can read the current state and line number, and build located errors.
pub trait SectionVisitor {
    /// A block was opened; `scanner.state()` is the new state.
    fn enter(&mut self, _scanner: &SectionScanner) -> std::result::Result<(), StructureError> {
        Ok(())
    }

    /// A non-structural line. `raw` is untrimmed.
    fn content(
        &mut self,
        scanner: &SectionScanner,
        raw: &str,
    ) -> std::result::Result<(), StructureError>;

    /// `left` was closed; `scanner.state()` is its parent.
    fn exit(
        &mut self,
        _scanner: &SectionScanner,
        _left: &ScanState,
    ) -> std::result::Result<(), StructureError> {
        Ok(())
    }
}

/// Feeds every line of the document to `visitor`, then checks that all
/// blocks were closed.
pub fn scan_document<V>(source: &dyn MeshSource, visitor: &mut V) -> Result<()>
where
    V: SectionVisitor + ?Sized,
{
    let name = source.describe();
    let reader = source.open().map_err(|e| MeshError::io(&name, e))?;
    let mut scanner = SectionScanner::new();

    for line in reader.lines() {
        let line = line.map_err(|e| MeshError::io(&name, e))?;
        let event = scanner
            .advance(&line)
            .map_err(|e| e.into_mesh_error(&name))?;
        dispatch(&scanner, event, &line, visitor).map_err(|e| e.into_mesh_error(&name))?;
    }

    scanner.finish().map_err(|e| e.into_mesh_error(&name))
}

/// Feeds the first top-level `section` block to `visitor` and stops as
/// soon as it closes. Returns `false` when the document has no such block.
pub fn scan_section<V>(source: &dyn MeshSource, section: Section, visitor: &mut V) -> Result<bool>
where
    V: SectionVisitor + ?Sized,
{
    let name = source.describe();
    let reader = source.open().map_err(|e| MeshError::io(&name, e))?;
    let mut scanner = SectionScanner::new();
    let mut inside = false;

    for line in reader.lines() {
        let line = line.map_err(|e| MeshError::io(&name, e))?;
        let event = scanner
            .advance(&line)
            .map_err(|e| e.into_mesh_error(&name))?;

        if !inside {
            if let ScanEvent::Enter(state) = &event
                && scanner.depth() == 1
                && state.section() == Some(section)
            {
                inside = true;
                visitor
                    .enter(&scanner)
                    .map_err(|e| e.into_mesh_error(&name))?;
            }
            continue;
        }

        let closes_section = matches!(event, ScanEvent::Exit(_)) && scanner.depth() == 0;
        dispatch(&scanner, event, &line, visitor).map_err(|e| e.into_mesh_error(&name))?;
        if closes_section {
            tracing::trace!(?section, line = scanner.line(), "section scan complete");
            return Ok(true);
        }
    }

    scanner.finish().map_err(|e| e.into_mesh_error(&name))?;
    Ok(false)
}

fn dispatch<V>(
    scanner: &SectionScanner,
    event: ScanEvent,
    raw: &str,
    visitor: &mut V,
) -> std::result::Result<(), StructureError>
where
    V: SectionVisitor + ?Sized,
{
    match event {
        ScanEvent::Blank => Ok(()),
        ScanEvent::Enter(_) => visitor.enter(scanner),
        ScanEvent::Exit(left) => visitor.exit(scanner, &left),
        ScanEvent::Content => visitor.content(scanner, raw),
    }
}
