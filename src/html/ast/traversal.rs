//! Element traversal
//!
//! Rule modules walk the tree with [traverse], which hands every reachable [Element] to a
//! visitor closure in depth-first pre-order. The visitor may rewrite the element in place
//! (tag, attributes, children); descent continues into the children as they are after the
//! visit.
//!
//! Reachability: element children and block children are walked. Conditional branches and
//! expressions are not entered, so an element that only lives inside `{% if %}` is never
//! visited. Rules that need those elements have to descend into the branches themselves.
//!
//! Child filtering goes through [retain_children] with an explicit [ChildAction] per child.

use super::elements::{Element, Node, NodeList};

/// Per-child decision for [retain_children]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildAction {
    Keep,
    Drop,
}

/// Visit every reachable element, parents before children.
pub fn traverse<F>(nodes: &mut [Node], visit: &mut F)
where
    F: FnMut(&mut Element),
{
    for node in nodes.iter_mut() {
        match node {
            Node::Element(element) => {
                visit(element);
                traverse(&mut element.children, visit);
            }
            Node::Block(block) => traverse(&mut block.children, visit),
            Node::Conditional(_)
            | Node::Expression(_)
            | Node::RawText(_)
            | Node::Comment(_)
            | Node::ParentCall(_) => {}
        }
    }
}

/// Read-only counterpart of [traverse], with the same reachability.
pub fn visit_elements<F>(nodes: &[Node], visit: &mut F)
where
    F: FnMut(&Element),
{
    for node in nodes {
        match node {
            Node::Element(element) => {
                visit(element);
                visit_elements(&element.children, visit);
            }
            Node::Block(block) => visit_elements(&block.children, visit),
            _ => {}
        }
    }
}

/// Keep the children `classify` marks as [ChildAction::Keep], in their original order.
///
/// Returns the number of dropped children.
pub fn retain_children<F>(children: &mut NodeList, mut classify: F) -> usize
where
    F: FnMut(&Node) -> ChildAction,
{
    let before = children.len();
    children.retain(|child| classify(child) == ChildAction::Keep);
    before - children.len()
}
