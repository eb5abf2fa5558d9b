use aws_sdk_dynamodb::types::AttributeValue;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::fmt;

use super::value::{quote, render_attribute, ScalarValue};

/// A DynamoDB item: an ordered collection of named attributes.
///
/// Items assembled from operator input only ever hold string and number
/// attributes, with the partition key first. Items read back from a scan keep
/// whatever attribute types the store returned, ordered by attribute name.
///
/// Setting an attribute that is already present replaces its value but keeps
/// its original position.
///
/// # Example
///
/// ```ignore
/// let item = Item::new()
///     .set("id", ScalarValue::Int("1".into()))
///     .set("name", ScalarValue::Str("Alice".into()));
/// assert_eq!(item.to_string(), "{'id': 1, 'name': 'Alice'}");
/// ```
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Item {
    pub(crate) attributes: IndexMap<String, AttributeValue>,
}

impl Item {
    /// Creates a new empty `Item`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps the attribute map of a store response.
    pub fn from_attributes(attributes: HashMap<String, AttributeValue>) -> Self {
        let mut attributes: Vec<_> = attributes.into_iter().collect();
        attributes.sort_by(|(a, _), (b, _)| a.cmp(b));
        Self {
            attributes: attributes.into_iter().collect(),
        }
    }

    /// Sets a scalar attribute.
    pub fn set(mut self, name: impl Into<String>, value: ScalarValue) -> Self {
        self.insert(name, value);
        self
    }

    pub(crate) fn insert(&mut self, name: impl Into<String>, value: ScalarValue) {
        self.attributes
            .insert(name.into(), value.to_attribute_value());
    }

    /// Gets an attribute as a scalar.
    ///
    /// Returns `None` if the attribute doesn't exist or is not a string or a
    /// non-negative integer.
    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<ScalarValue> {
        self.attributes
            .get(name)
            .and_then(ScalarValue::from_attribute_value)
    }

    /// Raw access to an attribute as the store sees it.
    #[cfg(test)]
    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// The attribute map in the shape the SDK expects.
    pub fn to_attributes(&self) -> HashMap<String, AttributeValue> {
        self.attributes
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (name, value)) in self.attributes.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", quote(name), render_attribute(value))?;
        }
        f.write_str("}")
    }
}

/// The primary key addressing a single item: one partition key attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key {
    name: String,
    value: ScalarValue,
}

impl Key {
    pub fn new(name: impl Into<String>, value: ScalarValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    #[cfg(test)]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[cfg(test)]
    pub fn value(&self) -> &ScalarValue {
        &self.value
    }

    pub fn to_attributes(&self) -> HashMap<String, AttributeValue> {
        HashMap::from([(self.name.clone(), self.value.to_attribute_value())])
    }
}

/// Printed as `name=value`, the raw form used in delete confirmations.
impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}
