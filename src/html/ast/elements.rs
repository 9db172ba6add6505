//! Node variants of the template AST

use super::attribute::{Attribute, AttributeEntry};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// An ordered sequence of nodes, in source order
pub type NodeList = Vec<Node>;

static VOID_ELEMENTS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "area", "base", "br", "col", "embed", "hr", "img", "input", "keygen", "link", "meta",
        "param", "source", "track", "wbr",
    ]
    .into_iter()
    .collect()
});

/// Whether `tag` names an HTML void element (never has children or a closing tag)
pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.contains(tag.to_ascii_lowercase().as_str())
}

/// A node of the template AST
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Node {
    RawText(RawText),
    Comment(Comment),
    Expression(Expression),
    Element(Element),
    Block(Block),
    Conditional(Conditional),
    ParentCall(ParentCall),
}

impl Node {
    pub fn node_type(&self) -> &'static str {
        match self {
            Node::RawText(_) => "RawText",
            Node::Comment(_) => "Comment",
            Node::Expression(_) => "Expression",
            Node::Element(_) => "Element",
            Node::Block(_) => "Block",
            Node::Conditional(_) => "Conditional",
            Node::ParentCall(_) => "ParentCall",
        }
    }

    /// 1-based source line the node started on (0 for nodes built by hand)
    pub fn line(&self) -> usize {
        match self {
            Node::RawText(n) => n.line,
            Node::Comment(n) => n.line,
            Node::Expression(n) => n.line,
            Node::Element(n) => n.line,
            Node::Block(n) => n.line,
            Node::Conditional(n) => n.line,
            Node::ParentCall(n) => n.line,
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn is_comment(&self) -> bool {
        matches!(self, Node::Comment(_))
    }

    /// Raw text made of whitespace only
    pub fn is_blank_text(&self) -> bool {
        matches!(self, Node::RawText(raw) if raw.text.trim().is_empty())
    }

    /// An element whose tag is exactly `tag`
    pub fn is_element_named(&self, tag: &str) -> bool {
        matches!(self, Node::Element(element) if element.tag == tag)
    }

    /// Text, comments and expressions; the inline-capable children of an element
    pub fn is_inline_content(&self) -> bool {
        matches!(
            self,
            Node::RawText(_) | Node::Comment(_) | Node::Expression(_)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawText {
    pub text: String,
    pub line: usize,
}

impl RawText {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            line: 0,
        }
    }
}

/// `<!-- text -->`, text stored trimmed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub text: String,
    pub line: usize,
}

impl Comment {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            line: 0,
        }
    }
}

/// `{{ expression }}`, the interior is kept exactly as written (including its spaces)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expression {
    pub expression: String,
    pub line: usize,
}

impl Expression {
    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            line: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub tag: String,
    pub attributes: Vec<AttributeEntry>,
    pub children: NodeList,
    pub self_closing: bool,
    pub line: usize,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            self_closing: false,
            line: 0,
        }
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(AttributeEntry::Attribute(attribute));
        self
    }

    pub fn with_children(mut self, children: NodeList) -> Self {
        self.children.extend(children);
        self
    }

    pub fn self_closing(mut self) -> Self {
        self.self_closing = true;
        self
    }

    /// First plain attribute named `key`; conditional entries are not searched
    pub fn attribute(&self, key: &str) -> Option<&Attribute> {
        self.attributes.iter().find_map(|entry| match entry {
            AttributeEntry::Attribute(attribute) if attribute.key == key => Some(attribute),
            _ => None,
        })
    }

    pub fn has_attribute(&self, key: &str) -> bool {
        self.attribute(key).is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub name: String,
    pub children: NodeList,
    pub line: usize,
}

impl Block {
    pub fn new(name: impl Into<String>, children: NodeList) -> Self {
        Self {
            name: name.into(),
            children,
            line: 0,
        }
    }
}

/// `{% if %}` with its `elseif` and `else` branches, in textual order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conditional {
    pub condition: String,
    pub children: NodeList,
    pub else_ifs: Vec<ElseIf>,
    /// `Some` when an `{% else %}` clause was written, even if empty
    pub else_children: Option<NodeList>,
    pub line: usize,
}

impl Conditional {
    pub fn new(condition: impl Into<String>, children: NodeList) -> Self {
        Self {
            condition: condition.into(),
            children,
            else_ifs: Vec::new(),
            else_children: None,
            line: 0,
        }
    }

    pub fn with_else_if(mut self, condition: impl Into<String>, children: NodeList) -> Self {
        self.else_ifs.push(ElseIf {
            condition: condition.into(),
            children,
        });
        self
    }

    pub fn with_else(mut self, children: NodeList) -> Self {
        self.else_children = Some(children);
        self
    }

    /// Number of branches, counting if, every elseif and the else clause
    pub fn branch_count(&self) -> usize {
        1 + self.else_ifs.len() + usize::from(self.else_children.is_some())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElseIf {
    pub condition: String,
    pub children: NodeList,
}

/// `{% parent() %}` / `{% parent %}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParentCall {
    pub line: usize,
}

impl From<RawText> for Node {
    fn from(node: RawText) -> Self {
        Node::RawText(node)
    }
}

impl From<Comment> for Node {
    fn from(node: Comment) -> Self {
        Node::Comment(node)
    }
}

impl From<Expression> for Node {
    fn from(node: Expression) -> Self {
        Node::Expression(node)
    }
}

impl From<Element> for Node {
    fn from(node: Element) -> Self {
        Node::Element(node)
    }
}

impl From<Block> for Node {
    fn from(node: Block) -> Self {
        Node::Block(node)
    }
}

impl From<Conditional> for Node {
    fn from(node: Conditional) -> Self {
        Node::Conditional(node)
    }
}

impl From<ParentCall> for Node {
    fn from(node: ParentCall) -> Self {
        Node::ParentCall(node)
    }
}
