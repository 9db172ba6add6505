//! Attributes and attribute-list entries

use super::elements::Conditional;
use serde::{Deserialize, Serialize};

/// An HTML attribute. `value` is `None` for bare (boolean) attributes.
///
/// Values are held decoded; see [entities](super::entities) for the mapping applied when
/// parsing and serializing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub key: String,
    pub value: Option<String>,
}

impl Attribute {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: Some(value.into()),
        }
    }

    pub fn bare(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: None,
        }
    }
}

/// One entry of an element's attribute list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum AttributeEntry {
    Attribute(Attribute),
    /// `{% if %}` in attribute position, wrapping conditionally present attributes
    Conditional(Conditional),
}

impl AttributeEntry {
    pub fn as_attribute(&self) -> Option<&Attribute> {
        match self {
            AttributeEntry::Attribute(attribute) => Some(attribute),
            AttributeEntry::Conditional(_) => None,
        }
    }

    pub fn as_attribute_mut(&mut self) -> Option<&mut Attribute> {
        match self {
            AttributeEntry::Attribute(attribute) => Some(attribute),
            AttributeEntry::Conditional(_) => None,
        }
    }

    pub fn is_conditional(&self) -> bool {
        matches!(self, AttributeEntry::Conditional(_))
    }
}

impl From<Attribute> for AttributeEntry {
    fn from(attribute: Attribute) -> Self {
        AttributeEntry::Attribute(attribute)
    }
}

impl From<Conditional> for AttributeEntry {
    fn from(conditional: Conditional) -> Self {
        AttributeEntry::Conditional(conditional)
    }
}
