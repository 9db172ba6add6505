//! Fluent assertions over parsed nodes
//!
//! Every assertion carries a context path (`nodes[0]:children[2]`) that prefixes its failure
//! message, so a failing check in a deep tree points at the node it was about.

use crate::html::ast::{AttributeEntry, Block, Conditional, Element, Node};

/// Start assertions over a node list.
pub fn assert_nodes(nodes: &[Node]) -> NodesAssertion<'_> {
    NodesAssertion {
        nodes,
        context: "nodes".to_string(),
    }
}

fn summarize(nodes: &[Node]) -> String {
    nodes
        .iter()
        .map(|node| match node {
            Node::Element(element) => format!("Element<{}>", element.tag),
            Node::Block(block) => format!("Block({})", block.name),
            other => other.node_type().to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

pub struct NodesAssertion<'a> {
    nodes: &'a [Node],
    context: String,
}

impl<'a> NodesAssertion<'a> {
    pub fn count(self, expected: usize) -> Self {
        assert_eq!(
            self.nodes.len(),
            expected,
            "{}: Expected {} nodes, found {}: [{}]",
            self.context,
            expected,
            self.nodes.len(),
            summarize(self.nodes)
        );
        self
    }

    pub fn item<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>),
    {
        assert!(
            index < self.nodes.len(),
            "{}: Node index {} out of bounds ({} nodes)",
            self.context,
            index,
            self.nodes.len()
        );
        assertion(NodeAssertion {
            node: &self.nodes[index],
            context: format!("{}[{}]", self.context, index),
        });
        self
    }

    /// Node types in order, e.g. `["Element", "RawText"]`
    pub fn types(self, expected: &[&str]) -> Self {
        let actual: Vec<&str> = self.nodes.iter().map(Node::node_type).collect();
        assert_eq!(
            actual, expected,
            "{}: Expected node types {:?}, found {:?}",
            self.context, expected, actual
        );
        self
    }
}

pub struct NodeAssertion<'a> {
    node: &'a Node,
    context: String,
}

impl<'a> NodeAssertion<'a> {
    pub fn line(self, expected: usize) -> Self {
        assert_eq!(
            self.node.line(),
            expected,
            "{}: Expected line {}, found {}",
            self.context,
            expected,
            self.node.line()
        );
        self
    }

    pub fn assert_element(self) -> ElementAssertion<'a> {
        match self.node {
            Node::Element(element) => ElementAssertion {
                element,
                context: self.context,
            },
            other => panic!(
                "{}: Expected Element, found {}",
                self.context,
                other.node_type()
            ),
        }
    }

    pub fn assert_block(self) -> BlockAssertion<'a> {
        match self.node {
            Node::Block(block) => BlockAssertion {
                block,
                context: self.context,
            },
            other => panic!("{}: Expected Block, found {}", self.context, other.node_type()),
        }
    }

    pub fn assert_conditional(self) -> ConditionalAssertion<'a> {
        match self.node {
            Node::Conditional(conditional) => ConditionalAssertion {
                conditional,
                context: self.context,
            },
            other => panic!(
                "{}: Expected Conditional, found {}",
                self.context,
                other.node_type()
            ),
        }
    }

    pub fn assert_text(self, expected: &str) -> Self {
        match self.node {
            Node::RawText(raw) => assert_eq!(
                raw.text, expected,
                "{}: Expected text {:?}, found {:?}",
                self.context, expected, raw.text
            ),
            other => panic!("{}: Expected RawText, found {}", self.context, other.node_type()),
        }
        self
    }

    pub fn assert_comment(self, expected: &str) -> Self {
        match self.node {
            Node::Comment(comment) => assert_eq!(
                comment.text, expected,
                "{}: Expected comment {:?}, found {:?}",
                self.context, expected, comment.text
            ),
            other => panic!("{}: Expected Comment, found {}", self.context, other.node_type()),
        }
        self
    }

    pub fn assert_expression(self, expected: &str) -> Self {
        match self.node {
            Node::Expression(expression) => assert_eq!(
                expression.expression, expected,
                "{}: Expected expression {:?}, found {:?}",
                self.context, expected, expression.expression
            ),
            other => panic!(
                "{}: Expected Expression, found {}",
                self.context,
                other.node_type()
            ),
        }
        self
    }

    pub fn assert_parent_call(self) -> Self {
        assert!(
            matches!(self.node, Node::ParentCall(_)),
            "{}: Expected ParentCall, found {}",
            self.context,
            self.node.node_type()
        );
        self
    }
}

pub struct ElementAssertion<'a> {
    element: &'a Element,
    context: String,
}

impl<'a> ElementAssertion<'a> {
    pub fn tag(self, expected: &str) -> Self {
        assert_eq!(
            self.element.tag, expected,
            "{}: Expected tag '{}', found '{}'",
            self.context, expected, self.element.tag
        );
        self
    }

    pub fn self_closing(self, expected: bool) -> Self {
        assert_eq!(
            self.element.self_closing, expected,
            "{}: Expected self_closing to be {}",
            self.context, expected
        );
        self
    }

    pub fn attribute_count(self, expected: usize) -> Self {
        assert_eq!(
            self.element.attributes.len(),
            expected,
            "{}: Expected {} attributes, found {}",
            self.context,
            expected,
            self.element.attributes.len()
        );
        self
    }

    /// Plain attribute `key` with value `expected`
    pub fn attribute(self, key: &str, expected: &str) -> Self {
        let attribute = self.element.attribute(key).unwrap_or_else(|| {
            panic!("{}: Expected attribute '{}' to be present", self.context, key)
        });
        assert_eq!(
            attribute.value.as_deref(),
            Some(expected),
            "{}: Expected attribute '{}' to be {:?}",
            self.context,
            key,
            expected
        );
        self
    }

    pub fn bare_attribute(self, key: &str) -> Self {
        let attribute = self.element.attribute(key).unwrap_or_else(|| {
            panic!("{}: Expected attribute '{}' to be present", self.context, key)
        });
        assert!(
            attribute.value.is_none(),
            "{}: Expected '{}' to be a bare attribute, found value {:?}",
            self.context,
            key,
            attribute.value
        );
        self
    }

    pub fn no_attribute(self, key: &str) -> Self {
        assert!(
            !self.element.has_attribute(key),
            "{}: Expected no attribute '{}'",
            self.context,
            key
        );
        self
    }

    /// Keys of plain attributes in order; conditional entries show as `{% if %}`
    pub fn attribute_keys(self, expected: &[&str]) -> Self {
        let actual: Vec<&str> = self
            .element
            .attributes
            .iter()
            .map(|entry| match entry {
                AttributeEntry::Attribute(attribute) => attribute.key.as_str(),
                AttributeEntry::Conditional(_) => "{% if %}",
            })
            .collect();
        assert_eq!(
            actual, expected,
            "{}: Expected attribute keys {:?}, found {:?}",
            self.context, expected, actual
        );
        self
    }

    pub fn child_count(self, expected: usize) -> Self {
        assert_eq!(
            self.element.children.len(),
            expected,
            "{}: Expected {} children, found {}: [{}]",
            self.context,
            expected,
            self.element.children.len(),
            summarize(&self.element.children)
        );
        self
    }

    pub fn child<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>),
    {
        let children = &self.element.children;
        assert!(
            index < children.len(),
            "{}: Child index {} out of bounds (element has {} children)",
            self.context,
            index,
            children.len()
        );
        assertion(NodeAssertion {
            node: &children[index],
            context: format!("{}:children[{}]", self.context, index),
        });
        self
    }

    pub fn children<F>(self, assertion: F) -> Self
    where
        F: FnOnce(NodesAssertion<'a>),
    {
        assertion(NodesAssertion {
            nodes: &self.element.children,
            context: format!("{}:children", self.context),
        });
        self
    }
}

pub struct BlockAssertion<'a> {
    block: &'a Block,
    context: String,
}

impl<'a> BlockAssertion<'a> {
    pub fn name(self, expected: &str) -> Self {
        assert_eq!(
            self.block.name, expected,
            "{}: Expected block name '{}', found '{}'",
            self.context, expected, self.block.name
        );
        self
    }

    pub fn children<F>(self, assertion: F) -> Self
    where
        F: FnOnce(NodesAssertion<'a>),
    {
        assertion(NodesAssertion {
            nodes: &self.block.children,
            context: format!("{}:children", self.context),
        });
        self
    }
}

pub struct ConditionalAssertion<'a> {
    conditional: &'a Conditional,
    context: String,
}

impl<'a> ConditionalAssertion<'a> {
    pub fn condition(self, expected: &str) -> Self {
        assert_eq!(
            self.conditional.condition, expected,
            "{}: Expected condition '{}', found '{}'",
            self.context, expected, self.conditional.condition
        );
        self
    }

    /// Conditions of the elseif branches, in order
    pub fn else_if_conditions(self, expected: &[&str]) -> Self {
        let actual: Vec<&str> = self
            .conditional
            .else_ifs
            .iter()
            .map(|else_if| else_if.condition.as_str())
            .collect();
        assert_eq!(
            actual, expected,
            "{}: Expected elseif conditions {:?}, found {:?}",
            self.context, expected, actual
        );
        self
    }

    pub fn has_else(self, expected: bool) -> Self {
        assert_eq!(
            self.conditional.else_children.is_some(),
            expected,
            "{}: Expected else clause presence to be {}",
            self.context,
            expected
        );
        self
    }

    pub fn children<F>(self, assertion: F) -> Self
    where
        F: FnOnce(NodesAssertion<'a>),
    {
        assertion(NodesAssertion {
            nodes: &self.conditional.children,
            context: format!("{}:if", self.context),
        });
        self
    }

    pub fn else_children<F>(self, assertion: F) -> Self
    where
        F: FnOnce(NodesAssertion<'a>),
    {
        let children = self.conditional.else_children.as_deref().unwrap_or_else(|| {
            panic!("{}: Expected an else clause", self.context)
        });
        assertion(NodesAssertion {
            nodes: children,
            context: format!("{}:else", self.context),
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::parsing::parse;

    #[test]
    fn test_fluent_chain() {
        let nodes = parse("<sw-card title=\"A\" disabled><!-- x --><b>{{ y }}</b></sw-card>").unwrap();
        assert_nodes(&nodes).count(1).item(0, |node| {
            node.line(1)
                .assert_element()
                .tag("sw-card")
                .attribute("title", "A")
                .bare_attribute("disabled")
                .attribute_keys(&["title", "disabled"])
                .children(|children| {
                    children
                        .types(&["Comment", "Element"])
                        .item(0, |c| {
                            c.assert_comment("x");
                        })
                        .item(1, |b| {
                            b.assert_element().child(0, |e| {
                                e.assert_expression(" y ");
                            });
                        });
                });
        });
    }

    #[test]
    #[should_panic(expected = "nodes[0]: Expected Block, found Element")]
    fn test_failure_names_context() {
        let nodes = parse("<div></div>").unwrap();
        assert_nodes(&nodes).item(0, |node| {
            node.assert_block();
        });
    }
}
