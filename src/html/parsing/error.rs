//! Parse errors
//!
//! Every error is fatal and carries the byte offset it was raised at plus the 1-based line of
//! that offset.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty tag name at pos {pos} (line {line})")]
    EmptyTagName { pos: usize, line: usize },

    #[error("unterminated comment starting at pos {pos} (line {line})")]
    UnterminatedComment { pos: usize, line: usize },

    #[error("unterminated template expression starting at pos {pos} (line {line})")]
    UnterminatedExpression { pos: usize, line: usize },

    #[error(
        "expected '>' at pos {pos} (line {line}), surrounding text: '{snippet}', current: {found:?}"
    )]
    ExpectedTagEnd {
        pos: usize,
        line: usize,
        snippet: String,
        found: Option<char>,
    },

    #[error("expected '>' after '/' at pos {pos} (line {line})")]
    ExpectedSelfCloseEnd { pos: usize, line: usize },

    #[error("expected '>' for closing tag at pos {pos} (line {line})")]
    ExpectedClosingTagEnd { pos: usize, line: usize },

    #[error("unclosed {construct} tag at pos {pos} (line {line})")]
    UnclosedTag {
        construct: &'static str,
        pos: usize,
        line: usize,
    },

    #[error("missing endblock at pos {pos} (line {line})")]
    MissingEndBlock { pos: usize, line: usize },

    #[error("missing endif at pos {pos} (line {line})")]
    MissingEndIf { pos: usize, line: usize },
}

impl ParseError {
    /// Byte offset the error was raised at
    pub fn position(&self) -> usize {
        match self {
            ParseError::EmptyTagName { pos, .. }
            | ParseError::UnterminatedComment { pos, .. }
            | ParseError::UnterminatedExpression { pos, .. }
            | ParseError::ExpectedTagEnd { pos, .. }
            | ParseError::ExpectedSelfCloseEnd { pos, .. }
            | ParseError::ExpectedClosingTagEnd { pos, .. }
            | ParseError::UnclosedTag { pos, .. }
            | ParseError::MissingEndBlock { pos, .. }
            | ParseError::MissingEndIf { pos, .. } => *pos,
        }
    }

    pub fn line(&self) -> usize {
        match self {
            ParseError::EmptyTagName { line, .. }
            | ParseError::UnterminatedComment { line, .. }
            | ParseError::UnterminatedExpression { line, .. }
            | ParseError::ExpectedTagEnd { line, .. }
            | ParseError::ExpectedSelfCloseEnd { line, .. }
            | ParseError::ExpectedClosingTagEnd { line, .. }
            | ParseError::UnclosedTag { line, .. }
            | ParseError::MissingEndBlock { line, .. }
            | ParseError::MissingEndIf { line, .. } => *line,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_position() {
        let error = ParseError::UnterminatedComment { pos: 0, line: 1 };
        assert_eq!(
            error.to_string(),
            "unterminated comment starting at pos 0 (line 1)"
        );
        assert_eq!(error.position(), 0);
    }

    #[test]
    fn test_display_expected_tag_end() {
        let error = ParseError::ExpectedTagEnd {
            pos: 4,
            line: 1,
            snippet: "<div =x>".to_string(),
            found: Some('='),
        };
        assert_eq!(
            error.to_string(),
            "expected '>' at pos 4 (line 1), surrounding text: '<div =x>', current: Some('=')"
        );
    }
}
