//! Positions, selections and line arithmetic over plain document text
//!
//! Lines and characters are 0-based. A character is a Unicode scalar value.

use std::fmt;

/// Line/character position in a document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub line: usize,
    pub character: usize,
}

impl Position {
    pub const fn new(line: usize, character: usize) -> Self {
        Self { line, character }
    }
}

impl fmt::Display for Position {
    /// 1-based `line:column`, the way editors print it
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.character + 1)
    }
}

/// Selection between an anchor and the active (cursor) end
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub anchor: Position,
    pub active: Position,
}

impl Selection {
    pub const fn new(anchor: Position, active: Position) -> Self {
        Self { anchor, active }
    }

    /// Empty selection holding only a cursor
    pub const fn caret(position: Position) -> Self {
        Self {
            anchor: position,
            active: position,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.anchor == self.active
    }

    pub fn start(&self) -> Position {
        self.anchor.min(self.active)
    }

    pub fn end(&self) -> Position {
        self.anchor.max(self.active)
    }

    /// Text covered by the selection, clamped to the document
    pub fn text<'a>(&self, document: &'a str) -> &'a str {
        let start = offset_at(document, self.start());
        let end = offset_at(document, self.end());
        &document[start..end]
    }
}

/// Byte offsets at which each line starts
///
/// A document ending in a line break has a final empty line.
pub fn line_starts(text: &str) -> Vec<usize> {
    std::iter::once(0)
        .chain(text.match_indices('\n').map(|(idx, _)| idx + 1))
        .collect()
}

/// Content of line `line` without its line break, if the line exists
pub fn line_at(text: &str, line: usize) -> Option<&str> {
    let starts = line_starts(text);
    let start = *starts.get(line)?;
    let end = starts.get(line + 1).map_or(text.len(), |next| next - 1);
    Some(text[start..end].trim_end_matches('\r'))
}

/// Byte offset of `position`, clamped to the end of its line / the document
pub fn offset_at(text: &str, position: Position) -> usize {
    let starts = line_starts(text);
    let Some(&start) = starts.get(position.line) else {
        return text.len();
    };
    let line = line_at(text, position.line).unwrap_or_default();
    let within = line
        .char_indices()
        .nth(position.character)
        .map_or(line.len(), |(idx, _)| idx);
    start + within
}

/// Leading spaces and tabs of `line`
pub fn leading_indent(line: &str) -> &str {
    let trimmed = line.trim_start_matches([' ', '\t']);
    &line[..line.len() - trimmed.len()]
}

/// Line break used by the document: `\r\n` if it contains one, else `\n`
pub fn line_ending(text: &str) -> &'static str {
    if text.contains("\r\n") {
        "\r\n"
    } else {
        "\n"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_starts() {
        assert_eq!(line_starts(""), vec![0]);
        assert_eq!(line_starts("a\nbc\n"), vec![0, 2, 5]);
    }

    #[test]
    fn test_line_at() {
        let text = "one\r\n  two\nthree";
        assert_eq!(line_at(text, 0), Some("one"));
        assert_eq!(line_at(text, 1), Some("  two"));
        assert_eq!(line_at(text, 2), Some("three"));
        assert_eq!(line_at(text, 3), None);
    }

    #[test]
    fn test_offset_clamps() {
        let text = "ab\nc";
        assert_eq!(offset_at(text, Position::new(0, 1)), 1);
        assert_eq!(offset_at(text, Position::new(0, 10)), 2);
        assert_eq!(offset_at(text, Position::new(7, 0)), 4);
    }

    #[test]
    fn test_selection_text() {
        let text = "let a = 1, b = 2;\nfoo(a, b);\n";
        let selection = Selection::new(Position::new(1, 4), Position::new(1, 8));
        assert_eq!(selection.text(text), "a, b");

        let reversed = Selection::new(Position::new(1, 8), Position::new(1, 4));
        assert_eq!(reversed.text(text), "a, b");
        assert!(Selection::caret(Position::new(1, 2)).is_empty());
    }

    #[test]
    fn test_selection_counts_chars() {
        let text = "é = ü;";
        let selection = Selection::new(Position::new(0, 4), Position::new(0, 5));
        assert_eq!(selection.text(text), "ü");
    }

    #[test]
    fn test_leading_indent() {
        assert_eq!(leading_indent("\t  foo()"), "\t  ");
        assert_eq!(leading_indent("foo"), "");
    }

    #[test]
    fn test_line_ending() {
        assert_eq!(line_ending("a\r\nb"), "\r\n");
        assert_eq!(line_ending("a\nb"), "\n");
    }

    #[test]
    fn test_position_display_is_one_based() {
        assert_eq!(Position::new(0, 4).to_string(), "1:5");
    }
}
