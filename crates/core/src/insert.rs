//! Insertion planning: where a statement goes and where the cursor ends up

use crate::document::{leading_indent, line_at, line_ending, line_starts, Position};

/// A planned insertion into a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
    /// Full document text after the insertion
    pub text: String,
    /// Byte offset at which `inserted` was placed
    pub offset: usize,
    /// Exact text inserted, line breaks included
    pub inserted: String,
    /// First line occupied by the statement
    pub start_line: usize,
    /// End of the last inserted line
    pub cursor: Position,
}

/// Insert `statement` at the start of the line after `cursor_line`
///
/// Every statement line is indented like the cursor line and joined with the
/// document's own line break. When the cursor sits on the last line the
/// statement is appended after a fresh line break instead, with no trailing
/// break, so that removing it restores the original bytes.
pub fn plan_insertion(document: &str, cursor_line: usize, statement: &str) -> Insertion {
    let eol = line_ending(document);
    let starts = line_starts(document);
    let cursor_line = cursor_line.min(starts.len() - 1);
    let indent = line_at(document, cursor_line).map_or("", leading_indent);

    let lines: Vec<String> = statement
        .split('\n')
        .map(|line| format!("{indent}{line}"))
        .collect();
    let body = lines.join(eol);
    let last_len = lines.last().map_or(0, |line| line.chars().count());

    let (offset, inserted) = match starts.get(cursor_line + 1) {
        Some(&next) => (next, format!("{body}{eol}")),
        None => (document.len(), format!("{eol}{body}")),
    };

    let mut text = String::with_capacity(document.len() + inserted.len());
    text.push_str(&document[..offset]);
    text.push_str(&inserted);
    text.push_str(&document[offset..]);

    let start_line = cursor_line + 1;
    Insertion {
        text,
        offset,
        inserted,
        start_line,
        cursor: Position::new(start_line + lines.len() - 1, last_len),
    }
}
