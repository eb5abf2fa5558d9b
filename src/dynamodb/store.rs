use async_trait::async_trait;

use crate::error::StoreError;

use super::{FilterExpression, Item, Key, TableHandle, TableSpec};

/// The remote operations the console needs. Creating a table takes two
/// calls: the request, then the wait.
///
/// Scans return a single page: when the store has more, the rest is not
/// fetched.
#[async_trait]
pub trait Store: Send + Sync {
    /// Sends the create request. Returns once the store has accepted it; the
    /// table is usually not usable yet.
    async fn create_table(&self, spec: &TableSpec) -> Result<(), StoreError>;

    /// Waits until a table created by [`Store::create_table`] reports active.
    async fn wait_until_active(&self, table_name: &str) -> Result<TableHandle, StoreError>;

    async fn put_item(&self, table_name: &str, item: &Item) -> Result<(), StoreError>;

    /// Deleting an item that does not exist succeeds.
    async fn delete_item(&self, table_name: &str, key: &Key) -> Result<(), StoreError>;

    async fn scan(&self, table_name: &str) -> Result<Vec<Item>, StoreError>;

    async fn scan_with_filter(
        &self,
        table_name: &str,
        filter: &FilterExpression,
    ) -> Result<Vec<Item>, StoreError>;
}
