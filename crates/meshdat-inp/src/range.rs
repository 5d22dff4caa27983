//! Compact id-range codec.
//!
//! Id lists in mesh documents are written as comma/whitespace separated
//! tokens: `n`, `a-b` or `a-b:s` (the colon forms `a:b` and `a:b:s` are
//! accepted as well). Malformed tokens are skipped, never fatal.

use std::fmt::{Display, Formatter};

use crate::record::numeric_id;

/// Node and element identifiers.
pub type EntityId = u32;

/// Arithmetic progression `start, start + step, ...` bounded by `end`.
///
/// Constructed only through [`IdRange::new`] or [`parse`], so
/// `start <= end` and `step >= 1` always hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IdRange {
    start: EntityId,
    end: EntityId,
    step: EntityId,
}

impl IdRange {
    /// Returns `None` when `start > end`. A zero step is treated as 1.
    pub fn new(start: EntityId, end: EntityId, step: EntityId) -> Option<Self> {
        if start > end {
            return None;
        }
        Some(Self {
            start,
            end,
            step: step.max(1),
        })
    }

    pub fn single(id: EntityId) -> Self {
        Self {
            start: id,
            end: id,
            step: 1,
        }
    }

    pub fn start(&self) -> EntityId {
        self.start
    }

    pub fn end(&self) -> EntityId {
        self.end
    }

    pub fn step(&self) -> EntityId {
        self.step
    }

    /// Number of ids the range expands to.
    pub fn len(&self) -> usize {
        ((self.end - self.start) / self.step) as usize + 1
    }

    /// Never true; a range always holds at least `start`.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, id: EntityId) -> bool {
        id >= self.start && id <= self.end && (id - self.start) % self.step == 0
    }

    pub fn iter(&self) -> RangeIter {
        RangeIter {
            next: Some(self.start),
            end: self.end,
            step: self.step,
        }
    }

    pub fn as_tuple(&self) -> (EntityId, EntityId, EntityId) {
        (self.start, self.end, self.step)
    }
}

impl Display for IdRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match (self.start == self.end, self.step) {
            (true, _) => write!(f, "{}", self.start),
            (false, 1) => write!(f, "{}-{}", self.start, self.end),
            (false, step) => write!(f, "{}-{}:{}", self.start, self.end, step),
        }
    }
}

impl IntoIterator for &IdRange {
    type Item = EntityId;
    type IntoIter = RangeIter;

    fn into_iter(self) -> RangeIter {
        self.iter()
    }
}

/// Iterator over a single [`IdRange`].
#[derive(Debug, Clone)]
pub struct RangeIter {
    next: Option<EntityId>,
    end: EntityId,
    step: EntityId,
}

impl Iterator for RangeIter {
    type Item = EntityId;

    fn next(&mut self) -> Option<EntityId> {
        let current = self.next?;
        self.next = current
            .checked_add(self.step)
            .filter(|&candidate| candidate <= self.end);
        Some(current)
    }
}

/// Parses an id list into ranges, in token order.
pub fn parse(text: &str) -> Vec<IdRange> {
    let mut ranges = Vec::new();
    for token in tokens(text) {
        match parse_token(token) {
            Some(range) => ranges.push(range),
            None => tracing::debug!(token, "skipping malformed id-range token"),
        }
    }
    ranges
}

/// Lazily enumerates every id of `ranges` in order. Overlapping ranges
/// yield their ids again; nothing is deduplicated.
pub fn expand(ranges: &[IdRange]) -> Expand<'_> {
    Expand {
        ranges: ranges.iter(),
        current: None,
    }
}

/// Iterator returned by [`expand`]. Cloning restarts from the clone point.
#[derive(Debug, Clone)]
pub struct Expand<'a> {
    ranges: std::slice::Iter<'a, IdRange>,
    current: Option<RangeIter>,
}

impl Iterator for Expand<'_> {
    type Item = EntityId;

    fn next(&mut self) -> Option<EntityId> {
        loop {
            if let Some(id) = self.current.as_mut().and_then(Iterator::next) {
                return Some(id);
            }
            self.current = Some(self.ranges.next()?.iter());
        }
    }
}

fn tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| c == ',' || c == '[' || c == ']' || c.is_whitespace())
        .filter(|t| !t.is_empty())
}

fn parse_token(token: &str) -> Option<IdRange> {
    if let Some((start, rest)) = token.split_once('-') {
        let (end, step) = match rest.split_once(':') {
            Some((end, step)) => (end, Some(step)),
            None => (rest, None),
        };
        return build(start, end, step);
    }

    let mut fields = token.split(':');
    match (fields.next(), fields.next(), fields.next(), fields.next()) {
        (Some(id), None, None, None) => numeric_id(id).map(IdRange::single),
        (Some(start), Some(end), step, None) => build(start, end, step),
        _ => None,
    }
}

fn build(start: &str, end: &str, step: Option<&str>) -> Option<IdRange> {
    let start = numeric_id(start)?;
    let end = numeric_id(end)?;
    let step = match step {
        Some(step) => numeric_id(step)?,
        None => 1,
    };
    IdRange::new(start, end, step)
}
