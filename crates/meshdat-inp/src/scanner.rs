//! Brace-depth state machine over mesh document lines.
//!
//! The scanner is fed one physical line at a time. Lines ending in `{`
//! open a nested block whose meaning depends on the enclosing block and
//! the label in front of the brace; a line that is exactly `}` closes the
//! innermost block. Everything else is content of the current state.

use std::fmt::{Display, Formatter};

use crate::error::StructureError;

/// Subsections recognised inside a `Set` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetKind {
    Element,
    Part,
    Surface,
    Node,
}

impl SetKind {
    fn from_label(label: &str) -> Option<Self> {
        match label.to_ascii_lowercase().as_str() {
            "element" => Some(SetKind::Element),
            "part" => Some(SetKind::Part),
            "surface" => Some(SetKind::Surface),
            "node" => Some(SetKind::Node),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SetKind::Element => "Element",
            SetKind::Part => "Part",
            SetKind::Surface => "Surface",
            SetKind::Node => "Node",
        }
    }
}

/// Top-level sections of a mesh document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Set,
    Node,
    Element,
    Part,
}

impl Section {
    fn from_label(label: &str) -> Option<Self> {
        match label.to_ascii_lowercase().as_str() {
            "set" => Some(Section::Set),
            "node" => Some(Section::Node),
            "element" => Some(Section::Element),
            "part" => Some(Section::Part),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanState {
    Outside,
    InSet,
    InSetSubsection(SetKind),
    InElementRoot,
    InElementType(String),
    InNode,
    InPart,
    /// A block the format does not define; its content is skipped.
    Ignored(String),
}

impl ScanState {
    /// Top-level section this state belongs to, if any.
    pub fn section(&self) -> Option<Section> {
        match self {
            ScanState::InSet | ScanState::InSetSubsection(_) => Some(Section::Set),
            ScanState::InElementRoot | ScanState::InElementType(_) => Some(Section::Element),
            ScanState::InNode => Some(Section::Node),
            ScanState::InPart => Some(Section::Part),
            ScanState::Outside | ScanState::Ignored(_) => None,
        }
    }

    fn nested(&self, label: &str) -> ScanState {
        let ignored = || ScanState::Ignored(label.to_string());
        match self {
            ScanState::Outside => match Section::from_label(label) {
                Some(Section::Set) => ScanState::InSet,
                Some(Section::Node) => ScanState::InNode,
                Some(Section::Element) => ScanState::InElementRoot,
                Some(Section::Part) => ScanState::InPart,
                None => ignored(),
            },
            ScanState::InSet => SetKind::from_label(label)
                .map(ScanState::InSetSubsection)
                .unwrap_or_else(ignored),
            ScanState::InElementRoot => ScanState::InElementType(label.to_string()),
            _ => ignored(),
        }
    }

    fn label(&self) -> String {
        match self {
            ScanState::Outside => String::new(),
            ScanState::InSet => "Set".to_string(),
            ScanState::InSetSubsection(kind) => kind.label().to_string(),
            ScanState::InElementRoot => "Element".to_string(),
            ScanState::InElementType(label) | ScanState::Ignored(label) => label.clone(),
            ScanState::InNode => "Node".to_string(),
            ScanState::InPart => "Part".to_string(),
        }
    }
}

/// What a single line did to the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEvent {
    /// Blank line, no state change.
    Blank,
    /// A block was opened; carries the new state.
    Enter(ScanState),
    /// A block was closed; carries the state that was left.
    Exit(ScanState),
    /// Any other line, to be interpreted by the current state.
    Content,
}

/// Line-by-line section tracker. `depth()` is the number of open blocks.
#[derive(Debug, Clone)]
pub struct SectionScanner {
    stack: Vec<ScanState>,
    line: usize,
}

impl Default for SectionScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl SectionScanner {
    pub fn new() -> Self {
        Self {
            stack: Vec::new(),
            line: 0,
        }
    }

    pub fn state(&self) -> &ScanState {
        self.stack.last().unwrap_or(&ScanState::Outside)
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// 1-based number of the last line fed to [`SectionScanner::advance`].
    pub fn line(&self) -> usize {
        self.line
    }

    /// Top-level section currently open, if it is one the format defines.
    pub fn section(&self) -> Option<Section> {
        self.stack.first().and_then(ScanState::section)
    }

    /// Slash-separated labels of the open blocks, e.g. `Set/Node`.
    pub fn path(&self) -> String {
        if self.stack.is_empty() {
            return "document".to_string();
        }
        self.stack
            .iter()
            .map(ScanState::label)
            .collect::<Vec<_>>()
            .join("/")
    }

    pub fn advance(&mut self, raw: &str) -> Result<ScanEvent, StructureError> {
        self.line += 1;
        let line = raw.trim();

        if line.is_empty() {
            return Ok(ScanEvent::Blank);
        }

        if line == "}" {
            return match self.stack.pop() {
                Some(left) => Ok(ScanEvent::Exit(left)),
                None => Err(self.error("unbalanced closing brace")),
            };
        }

        if let Some(header) = line.strip_suffix('{') {
            let label = header.trim();
            let next = self.state().nested(label);
            self.stack.push(next.clone());
            return Ok(ScanEvent::Enter(next));
        }

        Ok(ScanEvent::Content)
    }

    /// Call at end of input; fails if any block is still open.
    pub fn finish(&self) -> Result<(), StructureError> {
        if self.stack.is_empty() {
            Ok(())
        } else {
            Err(self.error(&format!(
                "unexpected end of document with {} unclosed block(s)",
                self.stack.len()
            )))
        }
    }

    pub fn error(&self, message: &str) -> StructureError {
        StructureError {
            line: self.line,
            section: self.path(),
            message: message.to_string(),
        }
    }
}

impl Display for ScanState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanState::Outside => write!(f, "outside"),
            other => write!(f, "{}", other.label()),
        }
    }
}
