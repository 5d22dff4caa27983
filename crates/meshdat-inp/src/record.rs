//! Helpers for `head [body]` data lines.

use crate::range::EntityId;

/// A data line split around its square brackets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bracketed<'a> {
    /// Text before `[`, trimmed.
    pub head: &'a str,
    /// Text after `[`, up to the last `]` when the bracket is closed.
    pub body: &'a str,
    pub closed: bool,
}

/// Splits `line` at its first `[`. Returns `None` when there is none.
pub fn bracketed(line: &str) -> Option<Bracketed<'_>> {
    let (head, rest) = line.split_once('[')?;
    let (body, closed) = match rest.rfind(']') {
        Some(end) => (&rest[..end], true),
        None => (rest, false),
    };
    Some(Bracketed {
        head: head.trim(),
        body,
        closed,
    })
}

/// Continuation of an open bracket: the text up to the last `]`, if any.
pub fn continuation(line: &str) -> (&str, bool) {
    match line.rfind(']') {
        Some(end) => (&line[..end], true),
        None => (line, false),
    }
}

/// Splits a bracket body into its non-empty comma/whitespace tokens.
pub fn fields(body: &str) -> impl Iterator<Item = &str> {
    body.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|f| !f.is_empty())
}

/// Parses an all-digit head such as `12`.
pub fn numeric_id(head: &str) -> Option<EntityId> {
    if head.is_empty() || !head.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    head.parse().ok()
}

/// A set name is a single token with no whitespace.
pub fn set_name(head: &str) -> Option<&str> {
    if head.is_empty() || head.contains(char::is_whitespace) {
        None
    } else {
        Some(head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_closed_bracket() {
        let b = bracketed("  Set-2 [0, 1, 4-5] ").unwrap();
        assert_eq!(b.head, "Set-2");
        assert_eq!(b.body, "0, 1, 4-5");
        assert!(b.closed);
    }

    #[test]
    fn reports_open_bracket() {
        let b = bracketed("Big [1-10,").unwrap();
        assert_eq!(b.head, "Big");
        assert_eq!(b.body, "1-10,");
        assert!(!b.closed);
        assert_eq!(continuation("  20-30]"), ("  20-30", true));
        assert_eq!(continuation("  11,12"), ("  11,12", false));
    }

    #[test]
    fn numeric_heads_only_contain_digits() {
        assert_eq!(numeric_id("42"), Some(42));
        assert_eq!(numeric_id("4 2"), None);
        assert_eq!(numeric_id("Set-2"), None);
        assert_eq!(numeric_id(""), None);
    }

    #[test]
    fn fields_skip_empty_tokens() {
        let tokens: Vec<_> = fields("1.0, ,2.5  3").collect();
        assert_eq!(tokens, vec!["1.0", "2.5", "3"]);
    }

    #[test]
    fn set_names_are_single_tokens() {
        assert_eq!(set_name("Fixed_1"), Some("Fixed_1"));
        assert_eq!(set_name("two words"), None);
    }
}
