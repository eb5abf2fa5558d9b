//! In-process [`Store`] used by the tests.
//!
//! Follows the DynamoDB behaviour the console depends on: duplicate tables
//! and unknown tables are rejected, the partition key type is checked on
//! write, deletes of missing items succeed and filters compare by type.

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use indexmap::IndexMap;
use std::cmp::Ordering;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::StoreError;

use super::{
    Comparison, FilterExpression, Item, Key, PartitionKeyType, ScalarValue, Store, TableHandle,
    TableSpec,
};

const NOT_FOUND: &str = "Requested resource not found";

#[derive(Debug)]
struct MemoryTable {
    spec: TableSpec,
    items: IndexMap<String, Item>,
}

#[derive(Debug, Default)]
struct State {
    tables: IndexMap<String, MemoryTable>,
    scan_calls: usize,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of scan requests received, filtered or not.
    pub fn scan_calls(&self) -> usize {
        self.lock().scan_calls
    }

    pub fn has_table(&self, name: &str) -> bool {
        self.lock().tables.contains_key(name)
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn scan_table(
        &self,
        table_name: &str,
        filter: Option<&FilterExpression>,
    ) -> Result<Vec<Item>, StoreError> {
        let mut state = self.lock();
        state.scan_calls += 1;
        let table = state
            .tables
            .get(table_name)
            .ok_or_else(|| StoreError::Scan {
                message: NOT_FOUND.to_string(),
            })?;
        Ok(table
            .items
            .values()
            .filter(|item| filter.map_or(true, |filter| matches(filter, item)))
            .map(|item| Item::from_attributes(item.to_attributes()))
            .collect())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_table(&self, spec: &TableSpec) -> Result<(), StoreError> {
        let mut state = self.lock();
        if state.tables.contains_key(spec.name()) {
            return Err(StoreError::TableCreation {
                message: format!("Table already exists: {}", spec.name()),
            });
        }
        state.tables.insert(
            spec.name().to_string(),
            MemoryTable {
                spec: spec.clone(),
                items: IndexMap::new(),
            },
        );
        Ok(())
    }

    async fn wait_until_active(&self, table_name: &str) -> Result<TableHandle, StoreError> {
        if !self.has_table(table_name) {
            return Err(StoreError::TableCreation {
                message: NOT_FOUND.to_string(),
            });
        }
        Ok(TableHandle {
            name: table_name.to_string(),
            status: TableHandle::ACTIVE.to_string(),
        })
    }

    async fn put_item(&self, table_name: &str, item: &Item) -> Result<(), StoreError> {
        let write_error = |message: String| StoreError::Write { message };
        let mut state = self.lock();
        let table = state
            .tables
            .get_mut(table_name)
            .ok_or_else(|| write_error(NOT_FOUND.to_string()))?;
        let key = storage_key(&table.spec, item.attribute(table.spec.partition_key()))
            .map_err(write_error)?;
        table.items.insert(key, item.clone());
        Ok(())
    }

    async fn delete_item(&self, table_name: &str, key: &Key) -> Result<(), StoreError> {
        let delete_error = |message: String| StoreError::Delete { message };
        let mut state = self.lock();
        let table = state
            .tables
            .get_mut(table_name)
            .ok_or_else(|| delete_error(NOT_FOUND.to_string()))?;
        if key.name() != table.spec.partition_key() {
            return Err(delete_error(
                "The provided key element does not match the schema".to_string(),
            ));
        }
        let storage_key = storage_key(&table.spec, Some(&key.value().to_attribute_value()))
            .map_err(delete_error)?;
        table.items.shift_remove(&storage_key);
        Ok(())
    }

    async fn scan(&self, table_name: &str) -> Result<Vec<Item>, StoreError> {
        self.scan_table(table_name, None)
    }

    async fn scan_with_filter(
        &self,
        table_name: &str,
        filter: &FilterExpression,
    ) -> Result<Vec<Item>, StoreError> {
        self.scan_table(table_name, Some(filter))
    }
}

fn storage_key(spec: &TableSpec, value: Option<&AttributeValue>) -> Result<String, String> {
    let key = spec.partition_key();
    match (spec.partition_key_type(), value) {
        (PartitionKeyType::Number, Some(AttributeValue::N(n))) => Ok(format!("N:{n}")),
        (PartitionKeyType::String, Some(AttributeValue::S(s))) => Ok(format!("S:{s}")),
        (_, None) => Err(format!(
            "One or more parameter values were invalid: Missing the key {key} in the item"
        )),
        (expected, Some(_)) => Err(format!(
            "One or more parameter values were invalid: Type mismatch for key {key} expected: {}",
            expected.to_scalar().as_str()
        )),
    }
}

fn matches(filter: &FilterExpression, item: &Item) -> bool {
    let Some(actual) = item.attribute(&filter.attribute) else {
        return false;
    };
    match filter.comparison {
        Comparison::Equals => compare(actual, &filter.value) == Some(Ordering::Equal),
        Comparison::GreaterThan => compare(actual, &filter.value) == Some(Ordering::Greater),
        Comparison::LessThan => compare(actual, &filter.value) == Some(Ordering::Less),
        Comparison::Contains => match (actual, &filter.value) {
            (AttributeValue::S(s), ScalarValue::Str(needle)) => s.contains(needle.as_str()),
            (AttributeValue::Ss(set), ScalarValue::Str(needle)) => set.contains(needle),
            (AttributeValue::Ns(set), ScalarValue::Int(digits)) => set.contains(digits),
            (AttributeValue::L(list), value) => list.contains(&value.to_attribute_value()),
            _ => false,
        },
    }
}

/// Orders values of the same type; mixed types never compare.
fn compare(actual: &AttributeValue, expected: &ScalarValue) -> Option<Ordering> {
    match (actual, expected) {
        (AttributeValue::S(s), ScalarValue::Str(other)) => Some(s.as_str().cmp(other.as_str())),
        (AttributeValue::N(n), ScalarValue::Int(other)) => {
            let n: f64 = n.parse().ok()?;
            let other: f64 = other.parse().ok()?;
            n.partial_cmp(&other)
        }
        _ => None,
    }
}
