//! Line/column to offset conversion
//!
//! External parsers report errors as a 1-indexed line and a 0-indexed column;
//! editor hosts want 0-indexed line/character pairs. Everything else in the
//! crate works with byte offsets into the document text.

use serde::{Deserialize, Serialize};

/// Convert a 1-indexed `line` and 0-indexed `column` to a byte offset.
///
/// The column counts characters on the target line. Columns past the end of
/// the line advance one byte each, matching the plain arithmetic of "preceding
/// line lengths plus column". A line of `0` or past the last line maps to `0`.
pub fn to_offset(text: &str, line: usize, column: usize) -> usize {
    if line == 0 {
        return 0;
    }

    let mut offset: usize = 0;
    for (index, content) in text.split('\n').enumerate() {
        if index + 1 == line {
            return offset.saturating_add(column_width(content, column));
        }
        offset += content.len() + 1;
    }

    log::trace!("line {} is past the end of the document", line);
    0
}

/// Byte width of the first `column` characters of `line`
fn column_width(line: &str, column: usize) -> usize {
    match line.char_indices().nth(column) {
        Some((byte, _)) => byte,
        None => line.len().saturating_add(column - line.chars().count()),
    }
}

/// 0-indexed line/character position
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LineCol {
    pub line: u32,
    pub character: u32,
}

impl LineCol {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// Precomputed line starts for repeated offset conversions on one text
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    text: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(text.match_indices('\n').map(|(i, _)| i + 1));
        Self { text, line_starts }
    }

    /// Number of lines (an empty text has one)
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Position of a byte offset; offsets past the end clamp to the end
    pub fn position(&self, offset: usize) -> LineCol {
        let mut offset = offset.min(self.text.len());
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }

        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let start = self.line_starts[line];
        let character = self.text[start..offset].chars().count();
        LineCol::new(line as u32, character as u32)
    }

    /// Byte offset of a position; characters past the line end clamp to it
    pub fn offset(&self, position: LineCol) -> Option<usize> {
        let line = position.line as usize;
        let start = *self.line_starts.get(line)?;
        let end = self
            .line_starts
            .get(line + 1)
            .map(|next| next - 1)
            .unwrap_or(self.text.len());
        let content = &self.text[start..end];
        let width = content
            .char_indices()
            .nth(position.character as usize)
            .map(|(byte, _)| byte)
            .unwrap_or(content.len());
        Some(start + width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "title Demo\nA -> B: hi\n\nC";

    #[test]
    fn test_to_offset_first_line() {
        assert_eq!(to_offset(DOC, 1, 0), 0);
        assert_eq!(to_offset(DOC, 1, 6), 6);
    }

    #[test]
    fn test_to_offset_later_lines() {
        assert_eq!(to_offset(DOC, 2, 0), 11);
        assert_eq!(to_offset(DOC, 2, 5), 16);
        assert_eq!(&DOC[16..17], "B");
        assert_eq!(to_offset(DOC, 3, 0), 22);
        assert_eq!(to_offset(DOC, 4, 0), 23);
    }

    #[test]
    fn test_to_offset_out_of_range_line() {
        assert_eq!(to_offset(DOC, 0, 3), 0);
        assert_eq!(to_offset(DOC, 5, 0), 0);
        assert_eq!(to_offset("", 2, 0), 0);
    }

    #[test]
    fn test_to_offset_column_past_line_end() {
        assert_eq!(to_offset("ab\ncd", 1, 4), 4);
        assert_eq!(to_offset("", 1, 0), 0);
    }

    #[test]
    fn test_to_offset_huge_column_saturates() {
        assert_eq!(to_offset("ab\ncd", 2, usize::MAX), usize::MAX);
        assert_eq!(to_offset("", 1, usize::MAX), usize::MAX);
    }

    #[test]
    fn test_to_offset_counts_characters() {
        // "é" is two bytes
        let text = "x\né -> B";
        assert_eq!(to_offset(text, 2, 1), 4);
        assert_eq!(&text[4..5], " ");
    }

    #[test]
    fn test_line_index_position() {
        let index = LineIndex::new(DOC);
        assert_eq!(index.line_count(), 4);
        assert_eq!(index.position(0), LineCol::new(0, 0));
        assert_eq!(index.position(10), LineCol::new(0, 10));
        assert_eq!(index.position(11), LineCol::new(1, 0));
        assert_eq!(index.position(16), LineCol::new(1, 5));
        assert_eq!(index.position(23), LineCol::new(3, 0));
        assert_eq!(index.position(999), LineCol::new(3, 1));
    }

    #[test]
    fn test_line_index_multibyte() {
        let text = "éé\nb";
        let index = LineIndex::new(text);
        assert_eq!(index.position(2), LineCol::new(0, 1));
        // Inside a character rounds down to its start
        assert_eq!(index.position(3), LineCol::new(0, 1));
        assert_eq!(index.position(5), LineCol::new(1, 0));
    }

    #[test]
    fn test_line_index_offset() {
        let index = LineIndex::new(DOC);
        assert_eq!(index.offset(LineCol::new(1, 5)), Some(16));
        assert_eq!(index.offset(LineCol::new(0, 99)), Some(10));
        assert_eq!(index.offset(LineCol::new(9, 0)), None);
        assert_eq!(
            index.offset(index.position(16)),
            Some(16),
            "position and offset are inverse"
        );
    }

    #[test]
    fn test_line_index_agrees_with_to_offset() {
        let index = LineIndex::new(DOC);
        for offset in [0, 6, 11, 16, 22, 23] {
            let pos = index.position(offset);
            assert_eq!(
                to_offset(DOC, pos.line as usize + 1, pos.character as usize),
                offset
            );
        }
    }
}
