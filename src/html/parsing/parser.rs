//! Recursive-descent template parser
//!
//! One dispatcher, [Parser::parse_nodes], drives every context. What ends a node list is
//! described by [Stop]; everything else is shared, so element children, block bodies and
//! conditional branches accept the same constructs.
//!
//! Control tags (`{% ... %}`) are tried as alternatives in a fixed order: parent call, block,
//! conditional. Each alternative returns an [AttemptResult]; a `NoMatch` restores the cursor
//! and the next alternative runs. When none match, the `{%` is ordinary text.

use super::attempt::{Attempt, AttemptResult};
use super::cursor::Cursor;
use super::error::ParseError;
use crate::html::ast::{
    entities, is_void_element, Attribute, AttributeEntry, Block, Comment, Conditional, Element,
    ElseIf, Expression, Node, NodeList, ParentCall, RawText,
};
use tracing::{debug, trace, warn};

/// What ends the node list currently being parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stop<'t> {
    /// Document root and block bodies: stop before `{% endblock`
    EndBlock,
    /// Element children: stop before `</tag`
    Closing(&'t str),
    /// Conditional branches: stop before `{% elseif`, `{% else` or `{% endif`
    Branch,
}

impl Stop<'_> {
    /// Whether a raw span is worth a node in this context
    fn keeps_raw(&self, text: &str) -> bool {
        match self {
            Stop::EndBlock => !text.trim().is_empty(),
            Stop::Closing(_) | Stop::Branch => !text.is_empty(),
        }
    }
}

const BRANCH_KEYWORDS: [&str; 3] = ["elseif", "else", "endif"];

fn is_tag_name_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'-' || byte == b':' || !byte.is_ascii()
}

fn is_attribute_name_byte(byte: u8) -> bool {
    !matches!(byte, b' ' | b'\t' | b'\r' | b'\n' | b'=' | b'>' | b'/')
}

fn is_unquoted_value_byte(byte: u8) -> bool {
    !matches!(byte, b' ' | b'>' | b'\r' | b'\n')
}

pub struct Parser<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
        }
    }

    /// Parse the whole document.
    ///
    /// A stray `{% endblock %}` at the top level ends the document; whatever follows it is
    /// not parsed.
    pub fn parse_document(&mut self) -> Result<NodeList, ParseError> {
        debug!(bytes = self.cursor.input().len(), "parsing template");
        let nodes = self.parse_nodes(Stop::EndBlock)?;
        if !self.cursor.is_eof() {
            let pos = self.cursor.position();
            warn!(
                pos,
                line = self.cursor.line_at(pos),
                "stray endblock at top level, remaining input ignored"
            );
        }
        debug!(nodes = nodes.len(), "parsed template");
        Ok(nodes)
    }

    /// Run `alternative`, restoring the cursor if it declines.
    fn attempt<T, F>(&mut self, alternative: F) -> AttemptResult<T>
    where
        F: FnOnce(&mut Self) -> AttemptResult<T>,
    {
        let start = self.cursor.position();
        let outcome = alternative(self)?;
        if let Attempt::NoMatch = outcome {
            self.cursor.reset(start);
        }
        Ok(outcome)
    }

    pub fn parse_nodes(&mut self, stop: Stop<'_>) -> Result<NodeList, ParseError> {
        let mut nodes = NodeList::new();
        let mut raw_start = self.cursor.position();

        while !self.cursor.is_eof() {
            if self.at_stop(stop) {
                break;
            }
            let here = self.cursor.position();

            if self.cursor.starts_with("{%") {
                match self.parse_control_tag()? {
                    Some(node) => {
                        self.flush_raw(&mut nodes, raw_start, here, stop);
                        nodes.push(node);
                        raw_start = self.cursor.position();
                    }
                    None => self.cursor.advance(1),
                }
                continue;
            }

            if self.cursor.starts_with("{{") {
                self.flush_raw(&mut nodes, raw_start, here, stop);
                nodes.push(self.parse_expression()?.into());
                raw_start = self.cursor.position();
                continue;
            }

            if self.cursor.starts_with("<!--") {
                self.flush_raw(&mut nodes, raw_start, here, stop);
                nodes.push(self.parse_comment()?.into());
                raw_start = self.cursor.position();
                continue;
            }

            if self.cursor.starts_with("</") {
                let closing = self.peek_closing_name();
                if stop == Stop::Closing(closing) {
                    break;
                }
                debug!(
                    pos = here,
                    tag = closing,
                    "unmatched closing tag kept as text"
                );
                self.cursor.advance(1);
                continue;
            }

            if self.cursor.starts_with("<") {
                self.flush_raw(&mut nodes, raw_start, here, stop);
                nodes.push(self.parse_element()?.into());
                raw_start = self.cursor.position();
                continue;
            }

            self.cursor.advance(1);
        }

        let end = self.cursor.position();
        self.flush_raw(&mut nodes, raw_start, end, stop);
        Ok(nodes)
    }

    fn at_stop(&self, stop: Stop<'_>) -> bool {
        match stop {
            Stop::EndBlock => self.cursor.at_tag_keyword("endblock"),
            Stop::Branch => BRANCH_KEYWORDS
                .iter()
                .any(|keyword| self.cursor.at_tag_keyword(keyword)),
            Stop::Closing(_) => false,
        }
    }

    fn flush_raw(&self, nodes: &mut NodeList, start: usize, end: usize, stop: Stop<'_>) {
        if start >= end {
            return;
        }
        let text = self.cursor.slice(start, end);
        if stop.keeps_raw(text) {
            nodes.push(
                RawText {
                    text: text.to_string(),
                    line: self.cursor.line_at(start),
                }
                .into(),
            );
        }
    }

    /// Name of the closing tag at the cursor, without consuming anything
    fn peek_closing_name(&self) -> &'a str {
        let mut lookahead = self.cursor.clone();
        lookahead.advance(2);
        lookahead.skip_whitespace();
        lookahead.take_while(is_tag_name_byte)
    }

    fn parse_control_tag(&mut self) -> Result<Option<Node>, ParseError> {
        let pos = self.cursor.position();
        let mut outcome = self.attempt(Self::parse_directive)?.map(Node::from);
        if !outcome.is_parsed() {
            outcome = self.attempt(Self::parse_block)?.map(Node::from);
        }
        if !outcome.is_parsed() {
            outcome = self.attempt(Self::parse_conditional)?.map(Node::from);
        }
        if !outcome.is_parsed() {
            trace!(pos, "control tag not recognised, kept as text");
        }
        Ok(outcome.into_option())
    }

    /// Consume `{%`, whitespace, `keyword` and the whitespace after it.
    fn open_tag(&mut self, keyword: &str) {
        self.cursor.advance(2);
        self.cursor.skip_whitespace();
        self.cursor.eat_keyword(keyword);
        self.cursor.skip_whitespace();
    }

    /// Consume everything up to and including `%}`, returning the trimmed content.
    fn finish_tag(&mut self, construct: &'static str, tag_start: usize) -> Result<&'a str, ParseError> {
        let Some(end) = self.cursor.find("%}") else {
            return Err(ParseError::UnclosedTag {
                construct,
                pos: tag_start,
                line: self.cursor.line_at(tag_start),
            });
        };
        let content = self.cursor.slice(self.cursor.position(), end).trim();
        self.cursor.reset(end + 2);
        Ok(content)
    }

    /// `{% parent() %}` or `{% parent %}`
    fn parse_directive(&mut self) -> AttemptResult<ParentCall> {
        let start = self.cursor.position();
        self.cursor.advance(2);
        self.cursor.skip_whitespace();
        if self.cursor.starts_with("parent()") {
            self.cursor.advance("parent()".len());
        } else if !self.cursor.eat_keyword("parent") {
            return Ok(Attempt::NoMatch);
        }
        self.cursor.skip_whitespace();
        if !self.cursor.starts_with("%}") {
            trace!(pos = start, "parent call with extra content");
            return Ok(Attempt::NoMatch);
        }
        self.cursor.advance(2);
        Ok(Attempt::Parsed(ParentCall {
            line: self.cursor.line_at(start),
        }))
    }

    /// `{% block name %} ... {% endblock %}`
    fn parse_block(&mut self) -> AttemptResult<Block> {
        let start = self.cursor.position();
        if !self.cursor.at_tag_keyword("block") {
            return Ok(Attempt::NoMatch);
        }
        self.open_tag("block");
        let name = self
            .cursor
            .take_while(|byte| !matches!(byte, b'%' | b' ' | b'\t' | b'\r' | b'\n'))
            .to_string();
        self.finish_tag("block", start)?;

        let children = self.parse_nodes(Stop::EndBlock)?;

        self.cursor.skip_whitespace();
        let end_start = self.cursor.position();
        if !self.cursor.at_tag_keyword("endblock") {
            return Err(ParseError::MissingEndBlock {
                pos: end_start,
                line: self.cursor.line_at(end_start),
            });
        }
        self.open_tag("endblock");
        self.finish_tag("endblock", end_start)?;

        Ok(Attempt::Parsed(Block {
            name,
            children,
            line: self.cursor.line_at(start),
        }))
    }

    /// `{% if c %} ... {% elseif c %} ... {% else %} ... {% endif %}`
    fn parse_conditional(&mut self) -> AttemptResult<Conditional> {
        let start = self.cursor.position();
        if !self.cursor.at_tag_keyword("if") {
            return Ok(Attempt::NoMatch);
        }
        self.open_tag("if");
        let condition = self.finish_tag("if", start)?.to_string();
        let children = self.parse_nodes(Stop::Branch)?;

        let mut conditional = Conditional {
            line: self.cursor.line_at(start),
            ..Conditional::new(condition, children)
        };

        while self.cursor.at_tag_keyword("elseif") {
            let tag_start = self.cursor.position();
            self.open_tag("elseif");
            let condition = self.finish_tag("elseif", tag_start)?.to_string();
            let children = self.parse_nodes(Stop::Branch)?;
            conditional.else_ifs.push(ElseIf {
                condition,
                children,
            });
        }

        if self.cursor.at_tag_keyword("else") {
            let tag_start = self.cursor.position();
            self.open_tag("else");
            self.finish_tag("else", tag_start)?;
            conditional.else_children = Some(self.parse_nodes(Stop::Branch)?);
        }

        let end_start = self.cursor.position();
        if !self.cursor.at_tag_keyword("endif") {
            return Err(ParseError::MissingEndIf {
                pos: end_start,
                line: self.cursor.line_at(end_start),
            });
        }
        self.open_tag("endif");
        self.finish_tag("endif", end_start)?;

        Ok(Attempt::Parsed(conditional))
    }

    fn parse_expression(&mut self) -> Result<Expression, ParseError> {
        let start = self.cursor.position();
        self.cursor.advance(2);
        let Some(end) = self.cursor.find("}}") else {
            return Err(ParseError::UnterminatedExpression {
                pos: start,
                line: self.cursor.line_at(start),
            });
        };
        let expression = self.cursor.slice(self.cursor.position(), end).to_string();
        self.cursor.reset(end + 2);
        Ok(Expression {
            expression,
            line: self.cursor.line_at(start),
        })
    }

    fn parse_comment(&mut self) -> Result<Comment, ParseError> {
        let start = self.cursor.position();
        self.cursor.advance(4);
        let Some(end) = self.cursor.find("-->") else {
            return Err(ParseError::UnterminatedComment {
                pos: start,
                line: self.cursor.line_at(start),
            });
        };
        let text = self.cursor.slice(self.cursor.position(), end).trim().to_string();
        self.cursor.reset(end + 3);
        Ok(Comment {
            text,
            line: self.cursor.line_at(start),
        })
    }

    fn parse_element(&mut self) -> Result<Element, ParseError> {
        let start = self.cursor.position();
        self.cursor.advance(1);
        self.cursor.skip_whitespace();

        let tag = self.cursor.take_while(is_tag_name_byte);
        if tag.is_empty() {
            let pos = self.cursor.position();
            return Err(ParseError::EmptyTagName {
                pos,
                line: self.cursor.line_at(pos),
            });
        }

        let mut element = Element {
            line: self.cursor.line_at(start),
            attributes: self.parse_attributes()?,
            ..Element::new(tag)
        };

        match self.cursor.current() {
            Some(b'/') => {
                self.cursor.advance(1);
                if self.cursor.current() != Some(b'>') {
                    let pos = self.cursor.position();
                    return Err(ParseError::ExpectedSelfCloseEnd {
                        pos,
                        line: self.cursor.line_at(pos),
                    });
                }
                self.cursor.advance(1);
                element.self_closing = true;
                return Ok(element);
            }
            Some(b'>') => {
                self.cursor.advance(1);
                if is_void_element(tag) {
                    element.self_closing = true;
                    return Ok(element);
                }
            }
            _ => {
                let pos = self.cursor.position();
                return Err(ParseError::ExpectedTagEnd {
                    pos,
                    line: self.cursor.line_at(pos),
                    snippet: self.cursor.snippet(pos).to_string(),
                    found: self.cursor.current_char(),
                });
            }
        }

        element.children = self.parse_nodes(Stop::Closing(tag))?;
        self.parse_closing_tag(tag)?;
        trace!(
            tag,
            children = element.children.len(),
            line = element.line,
            "parsed element"
        );
        Ok(element)
    }

    /// Consume `</tag>` if present; an element still open at end of input is accepted.
    fn parse_closing_tag(&mut self, tag: &str) -> Result<(), ParseError> {
        if self.cursor.is_eof() {
            debug!(tag, "element left open at end of input");
            return Ok(());
        }
        self.cursor.advance(2);
        self.cursor.skip_whitespace();
        self.cursor.take_while(is_tag_name_byte);
        self.cursor.skip_whitespace();
        if self.cursor.current() != Some(b'>') {
            let pos = self.cursor.position();
            return Err(ParseError::ExpectedClosingTagEnd {
                pos,
                line: self.cursor.line_at(pos),
            });
        }
        self.cursor.advance(1);
        Ok(())
    }

    fn parse_attributes(&mut self) -> Result<Vec<AttributeEntry>, ParseError> {
        let mut attributes = Vec::new();

        while !self.cursor.is_eof() {
            self.cursor.skip_whitespace();

            if self.cursor.starts_with("{%") {
                if let Attempt::Parsed(conditional) = self.attempt(Self::parse_conditional)? {
                    attributes.push(AttributeEntry::Conditional(conditional));
                    continue;
                }
            }

            if self.cursor.current() == Some(b'>') || self.cursor.starts_with("/>") {
                break;
            }

            let key = self.cursor.take_while(is_attribute_name_byte);
            if key.is_empty() {
                break;
            }
            self.cursor.skip_whitespace();

            let value = if self.cursor.current() == Some(b'=') {
                self.cursor.advance(1);
                self.cursor.skip_whitespace();
                Some(self.parse_attribute_value())
            } else {
                None
            };

            attributes.push(AttributeEntry::Attribute(Attribute {
                key: key.to_string(),
                value,
            }));
        }

        Ok(attributes)
    }

    fn parse_attribute_value(&mut self) -> String {
        let raw = match self.cursor.current() {
            Some(quote @ (b'"' | b'\'')) => {
                let open = self.cursor.position();
                self.cursor.advance(1);
                let value = self.cursor.take_while(|byte| byte != quote);
                if self.cursor.current() == Some(quote) {
                    self.cursor.advance(1);
                } else {
                    warn!(
                        pos = open,
                        line = self.cursor.line_at(open),
                        "unterminated attribute value runs to end of input"
                    );
                }
                value
            }
            _ => self.cursor.take_while(is_unquoted_value_byte),
        };
        entities::decode(raw)
    }
}
