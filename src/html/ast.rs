//! AST definitions and utilities for twig-html templates
//!
//!     This module provides the node model produced by the parser and consumed by the
//!     serializer and by rule modules.
//!
//! Node Model
//!
//!     A template is a [NodeList]: an ordered sequence of [Node]s in source order. The node
//!     set is closed:
//!
//!         - RawText: a verbatim text span, never reformatted internally
//!         - Comment: `<!-- ... -->`, text trimmed at parse time
//!         - Expression: `{{ ... }}`, interior kept opaque
//!         - Element: tag, attributes, children, self-closing flag
//!         - Block: `{% block name %} ... {% endblock %}`
//!         - Conditional: `{% if %}`, `{% elseif %}`*, `{% else %}`?, `{% endif %}`
//!         - ParentCall: `{% parent() %}`
//!
//!     Every node records the 1-based source line it started on. Rule modules use it for
//!     findings.
//!
//! Ownership
//!
//!     The tree is owned and never aliased: an element owns its attribute list and its
//!     children exclusively, so rule modules may replace either in place. Attribute lists
//!     hold [AttributeEntry] values, which mix plain attributes with embedded conditionals
//!     (conditionally present attributes).
//!
//! ## Modules
//!
//! - `elements` - Node variants and their constructors
//! - `attribute` - Attribute and attribute-list entry types
//! - `entities` - Attribute value entity decoding and encoding
//! - `traversal` - Depth-first element visitor and child classification

pub mod attribute;
pub mod elements;
pub mod entities;
pub mod traversal;

pub use attribute::{Attribute, AttributeEntry};
pub use elements::{
    is_void_element, Block, Comment, Conditional, Element, ElseIf, Expression, Node, NodeList,
    ParentCall, RawText,
};
pub use traversal::{retain_children, traverse, visit_elements, ChildAction};
