//! Accumulates `name [ranges]` definitions that may span several lines.

use meshdat_inp::record::{bracketed, continuation, set_name};
use meshdat_inp::{SectionScanner, StructureError};

#[derive(Debug)]
struct Pending {
    name: String,
    text: String,
    line: usize,
}

/// A finished `name [ranges]` definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Definition {
    pub name: String,
    pub ranges: String,
}

#[derive(Debug, Default)]
pub(crate) struct EntryReader {
    pending: Option<Pending>,
}

impl EntryReader {
    /// Feeds one content line; returns a definition once its bracket closes.
    pub fn feed(
        &mut self,
        scanner: &SectionScanner,
        raw: &str,
    ) -> Result<Option<Definition>, StructureError> {
        let line = raw.trim();

        if let Some(pending) = self.pending.as_mut() {
            if line.contains('[') {
                return Err(unterminated(scanner, pending));
            }
            let (text, closed) = continuation(line);
            pending.text.push(' ');
            pending.text.push_str(text);
            if closed {
                return Ok(self.pending.take().map(Pending::finish));
            }
            return Ok(None);
        }

        let Some(parts) = bracketed(line) else {
            tracing::debug!(line = scanner.line(), content = line, "ignoring line without '['");
            return Ok(None);
        };
        let Some(name) = set_name(parts.head) else {
            tracing::debug!(line = scanner.line(), head = parts.head, "ignoring definition without a name");
            return Ok(None);
        };

        let pending = Pending {
            name: name.to_string(),
            text: parts.body.to_string(),
            line: scanner.line(),
        };
        if parts.closed {
            Ok(Some(pending.finish()))
        } else {
            self.pending = Some(pending);
            Ok(None)
        }
    }

    /// Called when the enclosing block closes.
    pub fn close(&mut self, scanner: &SectionScanner) -> Result<(), StructureError> {
        match self.pending.take() {
            Some(pending) => Err(unterminated(scanner, &pending)),
            None => Ok(()),
        }
    }
}

impl Pending {
    fn finish(self) -> Definition {
        Definition {
            name: self.name,
            ranges: self.text,
        }
    }
}

fn unterminated(scanner: &SectionScanner, pending: &Pending) -> StructureError {
    scanner.error(&format!(
        "range list for `{}` opened on line {} is never closed",
        pending.name, pending.line
    ))
}
