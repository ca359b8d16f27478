//! Header properties: `(key = value, other = $ref)`.

use crate::name::{Identifier, Reference};
use crate::value::Value;

/// Payload of a property: a literal or a reference, never both.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Literal(Value),
    Reference(Reference),
}

/// A key/value pair from a structure header.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub key: Identifier,
    pub value: PropertyValue,
}

impl Property {
    pub fn new(key: Identifier, value: PropertyValue) -> Self {
        Property { key, value }
    }

    /// The literal value, if this property holds one.
    #[inline]
    pub fn literal(&self) -> Option<&Value> {
        match &self.value {
            PropertyValue::Literal(v) => Some(v),
            PropertyValue::Reference(_) => None,
        }
    }

    /// The reference, if this property holds one.
    #[inline]
    pub fn reference(&self) -> Option<&Reference> {
        match &self.value {
            PropertyValue::Reference(r) => Some(r),
            PropertyValue::Literal(_) => None,
        }
    }
}
