//! Turns operator-entered strings into typed request values.
//!
//! Everything here is pure. Invalid tokens come back as
//! [`ValidationError`]s so callers can abandon an operation before any
//! request is sent.

use crate::error::ValidationError;

use super::filter::{Comparison, FilterExpression};
use super::item::{Item, Key};
use super::table::{PartitionKeyType, TableSpec};
use super::value::ScalarValue;

/// Attribute name that ends attribute entry. Matched case-insensitively.
pub const ATTRIBUTE_TERMINATOR: &str = "q";

/// Builds a table definition from the operator's name, key name and `S`/`N`
/// type token.
pub fn build_table_spec(
    name: &str,
    partition_key: &str,
    key_type: &str,
) -> Result<TableSpec, ValidationError> {
    let key_type = PartitionKeyType::parse(key_type)?;
    Ok(TableSpec::new(name, partition_key, key_type))
}

/// Builds an item from the partition key and attribute pairs, stopping at the
/// first pair named by [`ATTRIBUTE_TERMINATOR`].
///
/// A repeated attribute name overwrites the earlier value, including the
/// partition key itself.
#[allow(dead_code)]
pub fn build_item<I, N, V>(partition_key: &str, partition_key_value: &str, attributes: I) -> Item
where
    I: IntoIterator<Item = (N, V)>,
    N: AsRef<str>,
    V: AsRef<str>,
{
    let mut builder = ItemBuilder::new(partition_key, partition_key_value);
    for (name, value) in attributes {
        if builder.accept(name.as_ref()) == Entry::Finished {
            break;
        }
        builder.accept(value.as_ref());
    }
    builder.finish()
}

/// Builds the key addressing a single item.
pub fn build_key(partition_key: &str, value: &str) -> Key {
    Key::new(partition_key, ScalarValue::coerce(value))
}

/// Maps the filter menu token (`"1"` to `"4"`, exact) to a comparison.
pub fn build_filter_expression(
    choice: &str,
    attribute: &str,
    value: &str,
) -> Result<FilterExpression, ValidationError> {
    let comparison = match choice {
        "1" => Comparison::Equals,
        "2" => Comparison::Contains,
        "3" => Comparison::GreaterThan,
        "4" => Comparison::LessThan,
        other => return Err(ValidationError::InvalidFilterChoice(other.to_string())),
    };
    Ok(FilterExpression::new(
        comparison,
        attribute,
        ScalarValue::coerce(value),
    ))
}

/// What an [`ItemBuilder`] expects next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// An attribute name, or the terminator.
    Name,
    /// The value for the named attribute.
    Value(String),
    /// Entry is over; further tokens are ignored.
    Finished,
}

/// Attribute entry as a small state machine, fed one token at a time.
///
/// Starts with the partition key already set and alternates between names
/// and values until the terminator arrives in place of a name.
#[derive(Debug, Clone)]
pub struct ItemBuilder {
    item: Item,
    state: Entry,
}

impl ItemBuilder {
    pub fn new(partition_key: &str, partition_key_value: &str) -> Self {
        Self {
            item: Item::new().set(partition_key, ScalarValue::coerce(partition_key_value)),
            state: Entry::Name,
        }
    }

    /// The token the builder is waiting for.
    pub fn expects(&self) -> &Entry {
        &self.state
    }

    /// Consumes one token and returns what is expected next.
    pub fn accept(&mut self, token: &str) -> Entry {
        self.state = match std::mem::replace(&mut self.state, Entry::Finished) {
            Entry::Name if token.eq_ignore_ascii_case(ATTRIBUTE_TERMINATOR) => Entry::Finished,
            Entry::Name => Entry::Value(token.to_string()),
            Entry::Value(name) => {
                self.item.insert(name, ScalarValue::coerce(token));
                Entry::Name
            }
            Entry::Finished => Entry::Finished,
        };
        self.state.clone()
    }

    /// Returns the item built so far. A name still waiting for its value is
    /// dropped.
    pub fn finish(self) -> Item {
        self.item
    }
}
