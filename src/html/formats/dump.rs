//! Canonical text serializer
//!
//! Renders nodes back into template source with stable layout, so that rule modules produce
//! minimal, deterministic diffs. Output is a pure function of the node, the indent depth and
//! the [FormattingRules] passed in.
//!
//! Layout decisions
//!
//! - A single attribute stays on the tag line when its indented rendering fits in
//!   [ATTRIBUTE_LINE_LIMIT] bytes; two or more attributes always go one per line.
//! - Elements whose children are only text, comments and expressions keep them inline,
//!   unless an expression is longer than [EXPRESSION_INLINE_LIMIT] or several expressions
//!   together exceed [COMBINED_EXPRESSION_LIMIT]. Any other child forces one child per line.
//! - Adjacent `template` elements are separated by a blank line.

use crate::html::ast::{entities, AttributeEntry, Block, Conditional, Element, Node};
use serde::{Deserialize, Serialize};
use tracing::trace;

pub const ATTRIBUTE_LINE_LIMIT: usize = 80;
pub const EXPRESSION_INLINE_LIMIT: usize = 30;
pub const COMBINED_EXPRESSION_LIMIT: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IndentStyle {
    Spaces,
    Tab,
}

/// Indentation settings for the serializer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattingRules {
    pub indent_style: IndentStyle,
    /// Width of one level when indenting with spaces; ignored for tabs
    pub indent_size: usize,
}

impl FormattingRules {
    pub fn spaces(size: usize) -> Self {
        Self {
            indent_style: IndentStyle::Spaces,
            indent_size: size,
        }
    }

    pub fn tabs() -> Self {
        Self {
            indent_style: IndentStyle::Tab,
            indent_size: 1,
        }
    }

    /// The text of one indentation level
    pub fn indent_unit(&self) -> String {
        match self.indent_style {
            IndentStyle::Spaces => " ".repeat(self.indent_size),
            IndentStyle::Tab => "\t".to_string(),
        }
    }
}

impl Default for FormattingRules {
    fn default() -> Self {
        Self::spaces(4)
    }
}

/// Render one node at `indent` levels.
pub fn dump(node: &Node, indent: usize, rules: &FormattingRules) -> String {
    Dumper::new(rules).node(node, indent)
}

/// Render a node list, one node per line.
pub fn dump_nodes(nodes: &[Node], indent: usize, rules: &FormattingRules) -> String {
    Dumper::new(rules).nodes(nodes, indent)
}

/// Render one attribute entry at `indent` levels.
pub fn dump_attribute(entry: &AttributeEntry, indent: usize, rules: &FormattingRules) -> String {
    Dumper::new(rules).attribute(entry, indent)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChildLayout {
    /// Children concatenated on the tag line
    Inline,
    /// Text, comments and expressions, one per line
    Stacked,
    /// Mixed content with elements or control tags, one per line
    Nested,
}

fn is_template(node: &Node) -> bool {
    node.is_element_named("template")
}

fn expression_text(expression: &str) -> String {
    format!("{{{{{expression}}}}}")
}

fn child_layout(children: &[Node]) -> ChildLayout {
    if !children.iter().all(Node::is_inline_content) {
        return ChildLayout::Nested;
    }
    let lengths: Vec<usize> = children
        .iter()
        .filter_map(|child| match child {
            Node::Expression(expression) => Some(expression_text(&expression.expression).len()),
            _ => None,
        })
        .collect();
    let has_long = lengths.iter().any(|&len| len > EXPRESSION_INLINE_LIMIT);
    let crowded = lengths.len() > 1 && lengths.iter().sum::<usize>() > COMBINED_EXPRESSION_LIMIT;
    if has_long || crowded {
        ChildLayout::Stacked
    } else {
        ChildLayout::Inline
    }
}

struct Dumper {
    unit: String,
}

impl Dumper {
    fn new(rules: &FormattingRules) -> Self {
        Self {
            unit: rules.indent_unit(),
        }
    }

    fn pad(&self, indent: usize) -> String {
        self.unit.repeat(indent)
    }

    fn node(&self, node: &Node, indent: usize) -> String {
        match node {
            Node::RawText(raw) => raw.text.clone(),
            Node::Comment(comment) => format!("{}<!-- {} -->", self.pad(indent), comment.text),
            Node::Expression(expression) => expression_text(&expression.expression),
            Node::Element(element) => self.element(element, indent),
            Node::Block(block) => self.block(block, indent),
            Node::Conditional(conditional) => self.conditional(conditional, indent),
            Node::ParentCall(_) => format!("{}{{% parent() %}}", self.pad(indent)),
        }
    }

    /// A node placed on its own line: text is trimmed, everything starts at `indent`.
    fn line(&self, node: &Node, indent: usize) -> String {
        match node {
            Node::Element(element) => self.element(element, indent),
            other => format!("{}{}", self.pad(indent), self.node(other, indent).trim()),
        }
    }

    fn nodes(&self, nodes: &[Node], indent: usize) -> String {
        let visible: Vec<&Node> = nodes.iter().filter(|node| !node.is_blank_text()).collect();
        let mut out = String::new();

        for (i, node) in visible.iter().enumerate() {
            if node.is_comment() {
                out.push_str(&self.line(node, indent));
                out.push('\n');
                continue;
            }
            if i > 0 && !visible[i - 1].is_comment() {
                out.push('\n');
                if is_template(node) && is_template(visible[i - 1]) {
                    out.push('\n');
                }
            }
            out.push_str(&self.line(node, indent));
        }

        if visible.is_empty() {
            return out;
        }
        let ended_with_newline = out.ends_with('\n');
        let mut result = out.trim_end_matches('\n').to_string();
        if ended_with_newline {
            result.push('\n');
        }
        result
    }

    fn attribute(&self, entry: &AttributeEntry, indent: usize) -> String {
        match entry {
            AttributeEntry::Attribute(attribute) => match &attribute.value {
                None => format!("{}{}", self.pad(indent), attribute.key),
                Some(value) => format!(
                    "{}{}=\"{}\"",
                    self.pad(indent),
                    attribute.key,
                    entities::encode(value)
                ),
            },
            AttributeEntry::Conditional(conditional) => self.conditional(conditional, indent),
        }
    }

    fn element(&self, element: &Element, indent: usize) -> String {
        let pad = self.pad(indent);
        let mut out = format!("{pad}<{}", element.tag);

        let attributes_on_own_lines = match element.attributes.as_slice() {
            [] => false,
            [single] => {
                let rendered = self.attribute(single, indent + 1);
                if single.is_conditional() || rendered.len() > ATTRIBUTE_LINE_LIMIT {
                    out.push('\n');
                    out.push_str(&rendered);
                    out.push('\n');
                    true
                } else {
                    out.push(' ');
                    out.push_str(&self.attribute(single, 0));
                    false
                }
            }
            many => {
                for entry in many {
                    out.push('\n');
                    out.push_str(&self.attribute(entry, indent + 1));
                }
                out.push('\n');
                true
            }
        };
        if attributes_on_own_lines {
            out.push_str(&pad);
        }

        if element.self_closing {
            out.push_str("/>");
            return out;
        }
        out.push('>');

        if !element.children.is_empty() {
            let layout = child_layout(&element.children);
            trace!(tag = %element.tag, ?layout, "element children layout");
            match layout {
                ChildLayout::Inline => self.inline_children(&mut out, element),
                ChildLayout::Stacked => self.stacked_children(&mut out, element, indent),
                ChildLayout::Nested => self.nested_children(&mut out, element, indent),
            }
        }

        out.push_str("</");
        out.push_str(&element.tag);
        out.push('>');
        out
    }

    fn inline_children(&self, out: &mut String, element: &Element) {
        for child in &element.children {
            out.push_str(&self.node(child, 0));
        }
    }

    fn stacked_children(&self, out: &mut String, element: &Element, indent: usize) {
        out.push('\n');
        for child in &element.children {
            if child.is_blank_text() {
                continue;
            }
            out.push_str(&self.line(child, indent + 1));
            out.push('\n');
        }
        out.push_str(&self.pad(indent));
    }

    fn nested_children(&self, out: &mut String, element: &Element, indent: usize) {
        let visible: Vec<&Node> = element
            .children
            .iter()
            .filter(|child| !child.is_blank_text())
            .collect();
        for (i, child) in visible.iter().enumerate() {
            out.push('\n');
            if i > 0 && is_template(child) && is_template(visible[i - 1]) {
                out.push('\n');
            }
            out.push_str(&self.line(child, indent + 1));
        }
        out.push('\n');
        out.push_str(&self.pad(indent));
    }

    fn block(&self, block: &Block, indent: usize) -> String {
        let pad = self.pad(indent);
        let mut out = format!("{pad}{{% block {} %}}", block.name);

        let visible: Vec<&Node> = block
            .children
            .iter()
            .filter(|child| !child.is_blank_text())
            .collect();
        if visible.is_empty() {
            out.push_str("{% endblock %}");
            return out;
        }

        out.push('\n');
        for (i, child) in visible.iter().enumerate() {
            out.push_str(&self.line(child, indent + 1));
            if i + 1 < visible.len() {
                out.push_str(if child.is_comment() { "\n" } else { "\n\n" });
            }
        }
        out.push('\n');
        out.push_str(&pad);
        out.push_str("{% endblock %}");
        out
    }

    fn conditional(&self, conditional: &Conditional, indent: usize) -> String {
        let mut out = format!("{}{{% if {} %}}", self.pad(indent), conditional.condition);
        self.branch(&mut out, &conditional.children, indent);

        for else_if in &conditional.else_ifs {
            self.control_tag(&mut out, &format!("{{% elseif {} %}}", else_if.condition), indent);
            self.branch(&mut out, &else_if.children, indent);
        }

        if let Some(else_children) = &conditional.else_children {
            self.control_tag(&mut out, "{% else %}", indent);
            self.branch(&mut out, else_children, indent);
        }

        self.control_tag(&mut out, "{% endif %}", indent);
        out
    }

    /// A tag that follows a branch: on its own line after content, directly after an empty one.
    fn control_tag(&self, out: &mut String, tag: &str, indent: usize) {
        if out.ends_with('\n') {
            out.push_str(&self.pad(indent));
        }
        out.push_str(tag);
    }

    fn branch(&self, out: &mut String, children: &[Node], indent: usize) {
        let lines: Vec<String> = children
            .iter()
            .filter(|child| !child.is_blank_text())
            .map(|child| self.line(child, indent + 1))
            .collect();
        if lines.is_empty() {
            return;
        }
        out.push('\n');
        out.push_str(&lines.join("\n"));
        out.push('\n');
    }
}
