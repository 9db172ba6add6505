//! Byte cursor over the template source
//!
//! All scanning is byte based. Every construct the parser stops on is ASCII, so slices taken
//! at those stops always fall on char boundaries.
//!
//! Line numbers come from a table of newline offsets built once per input, so looking up
//! the line of a node is a binary search rather than a rescan.

use std::rc::Rc;

/// Bytes that may continue a keyword; a keyword followed by one of these is a longer word.
pub fn is_identifier_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    input: &'a str,
    pos: usize,
    /// Byte offsets of every `\n`, ascending; shared by lookahead clones
    newlines: Rc<[usize]>,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str) -> Self {
        let newlines = input
            .bytes()
            .enumerate()
            .filter_map(|(offset, byte)| (byte == b'\n').then_some(offset))
            .collect();
        Self {
            input,
            pos: 0,
            newlines,
        }
    }

    pub fn input(&self) -> &'a str {
        self.input
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Move back (or forward) to a position previously obtained from [Cursor::position].
    pub fn reset(&mut self, pos: usize) {
        self.pos = pos.min(self.input.len());
    }

    pub fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Byte at the cursor, `None` at end of input
    pub fn current(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    /// Up to `n` bytes from the cursor
    pub fn peek(&self, n: usize) -> &'a [u8] {
        let bytes = self.input.as_bytes();
        let end = (self.pos + n).min(bytes.len());
        &bytes[self.pos..end]
    }

    pub fn rest(&self) -> &'a str {
        self.input.get(self.pos..).unwrap_or("")
    }

    pub fn starts_with(&self, prefix: &str) -> bool {
        self.input.as_bytes()[self.pos..].starts_with(prefix.as_bytes())
    }

    pub fn advance(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.input.len());
    }

    pub fn skip_whitespace(&mut self) {
        while matches!(self.current(), Some(b' ' | b'\t' | b'\r' | b'\n')) {
            self.pos += 1;
        }
    }

    /// Advance while `pred` holds for the current byte, returning the consumed span.
    pub fn take_while<F>(&mut self, mut pred: F) -> &'a str
    where
        F: FnMut(u8) -> bool,
    {
        let start = self.pos;
        while let Some(byte) = self.current() {
            if !pred(byte) {
                break;
            }
            self.pos += 1;
        }
        self.slice(start, self.pos)
    }

    /// Byte offset of the next occurrence of `needle` at or after the cursor
    pub fn find(&self, needle: &str) -> Option<usize> {
        let needle = needle.as_bytes();
        self.input.as_bytes()[self.pos..]
            .windows(needle.len())
            .position(|window| window == needle)
            .map(|offset| self.pos + offset)
    }

    /// Consume `keyword` if it is next and not followed by an identifier byte.
    pub fn eat_keyword(&mut self, keyword: &str) -> bool {
        if self.at_keyword(keyword) {
            self.pos += keyword.len();
            true
        } else {
            false
        }
    }

    pub fn at_keyword(&self, keyword: &str) -> bool {
        if !self.starts_with(keyword) {
            return false;
        }
        let next = self.input.as_bytes().get(self.pos + keyword.len()).copied();
        !next.is_some_and(is_identifier_byte)
    }

    /// Whether a `{% keyword` tag starts at the cursor (any whitespace after `{%`)
    pub fn at_tag_keyword(&self, keyword: &str) -> bool {
        if !self.starts_with("{%") {
            return false;
        }
        let mut lookahead = self.clone();
        lookahead.advance(2);
        lookahead.skip_whitespace();
        lookahead.at_keyword(keyword)
    }

    /// Source text between two byte offsets, empty when the span is not on char boundaries
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        self.input.get(start..end).unwrap_or("")
    }

    /// 1-based line of `pos`: newlines strictly before it, plus one
    pub fn line_at(&self, pos: usize) -> usize {
        self.newlines.partition_point(|&offset| offset < pos) + 1
    }

    /// Up to ten bytes of context either side of `pos`, widened to char boundaries
    pub fn snippet(&self, pos: usize) -> &'a str {
        let mut start = pos.saturating_sub(10);
        while !self.input.is_char_boundary(start) {
            start -= 1;
        }
        let mut end = (pos + 10).min(self.input.len());
        while !self.input.is_char_boundary(end) {
            end += 1;
        }
        self.slice(start, end)
    }

    /// The char at the cursor, for diagnostics
    pub fn current_char(&self) -> Option<char> {
        self.rest().chars().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_and_peek_clip_at_end() {
        let mut cursor = Cursor::new("abc");
        assert_eq!(cursor.current(), Some(b'a'));
        assert_eq!(cursor.peek(2), b"ab");
        cursor.advance(2);
        assert_eq!(cursor.peek(5), b"c");
        cursor.advance(5);
        assert!(cursor.is_eof());
        assert_eq!(cursor.current(), None);
        assert_eq!(cursor.peek(2), b"");
    }

    #[test]
    fn test_skip_whitespace() {
        let mut cursor = Cursor::new(" \t\r\n x");
        cursor.skip_whitespace();
        assert_eq!(cursor.current(), Some(b'x'));
    }

    #[test]
    fn test_line_at() {
        let cursor = Cursor::new("a\nb\n\nc");
        assert_eq!(cursor.line_at(0), 1);
        assert_eq!(cursor.line_at(1), 1);
        assert_eq!(cursor.line_at(2), 2);
        assert_eq!(cursor.line_at(5), 4);
    }

    #[test]
    fn test_line_at_newline_and_past_end() {
        let cursor = Cursor::new("a\nb\n");
        // The newline itself still belongs to the line it ends.
        assert_eq!(cursor.line_at(1), 1);
        assert_eq!(cursor.line_at(3), 2);
        assert_eq!(cursor.line_at(4), 3);
        assert_eq!(cursor.line_at(100), 3);
        assert_eq!(Cursor::new("").line_at(0), 1);
    }

    #[test]
    fn test_clones_share_line_table() {
        let mut cursor = Cursor::new("x\ny\nz");
        cursor.advance(4);
        let lookahead = cursor.clone();
        assert_eq!(lookahead.line_at(lookahead.position()), 3);
    }

    #[test]
    fn test_keyword_boundaries() {
        let cursor = Cursor::new("iframe");
        assert!(!cursor.at_keyword("if"));
        let cursor = Cursor::new("if a");
        assert!(cursor.at_keyword("if"));
        let cursor = Cursor::new("{%   endif %}");
        assert!(cursor.at_tag_keyword("endif"));
        assert!(!cursor.at_tag_keyword("end"));
    }

    #[test]
    fn test_snippet_respects_char_boundaries() {
        // Each `é` is two bytes, so byte 9 sits inside a char and byte 19 is `x`.
        let cursor = Cursor::new("ééééééééé>x");
        assert_eq!(cursor.snippet(9), "ééééééééé>");
        assert_eq!(cursor.snippet(20), "éééé>x");
    }

    #[test]
    fn test_take_while() {
        let mut cursor = Cursor::new("sw-field rest");
        let name = cursor.take_while(|b| b.is_ascii_alphanumeric() || b == b'-');
        assert_eq!(name, "sw-field");
        assert_eq!(cursor.current(), Some(b' '));
    }
}
