//! # DynamoDB Module
//!
//! Typed requests and the store adapter behind the interactive console.
//!
//! ## Components
//!
//! - `request`: builds tables, items, keys and filters from operator input.
//! - `Store`: the remote operations the console issues.
//! - `DynamoDb`: the `Store` backed by the AWS SDK.
//! - `Item`, `Key`, `ScalarValue`: the values that travel between the two.
//!
//! ## Example
//!
//! ```ignore
//! let config = Config::from_env()?;
//! let credentials = Credentials::load(&config.credentials_path)?;
//! let ddb = DynamoDb::connect(&config, &credentials).await;
//!
//! let spec = request::build_table_spec("Users", "id", "N")?;
//! ddb.create_table(&spec).await?;
//! ddb.wait_until_active(spec.name()).await?;
//!
//! let item = request::build_item("id", "1", [("name", "Alice")]);
//! ddb.put_item("Users", &item).await?;
//!
//! let filter = request::build_filter_expression("2", "name", "Ali")?;
//! let items = ddb.scan_with_filter("Users", &filter).await?;
//! ```

mod client;
mod filter;
mod item;
#[cfg(test)]
mod memory;
pub mod request;
mod store;
mod table;
mod value;

pub use client::DynamoDb;
pub use filter::{Comparison, FilterExpression};
pub use item::{Item, Key};
#[cfg(test)]
pub use memory::MemoryStore;
pub use store::Store;
pub use table::{PartitionKeyType, TableHandle, TableSpec};
pub use value::ScalarValue;
