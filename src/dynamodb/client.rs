use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_dynamodb::{
    config::Credentials as StaticCredentials,
    error::{DisplayErrorContext, ProvideErrorMetadata, SdkError},
    operation::{describe_table::DescribeTableError, scan::ScanOutput},
    types::{
        AttributeDefinition, KeySchemaElement, KeyType, ProvisionedThroughput, TableStatus,
    },
    Client,
};
use tracing::{debug, info, warn};

use crate::config::{Config, TableWait};
use crate::credentials::Credentials;
use crate::error::StoreError;
use crate::utils::poll_until;

use super::{FilterExpression, Item, Key, Store, TableHandle, TableSpec};

const READ_CAPACITY_UNITS: i64 = 5;
const WRITE_CAPACITY_UNITS: i64 = 5;

/// DynamoDB client wrapper implementing [`Store`].
///
/// Each operation is a single SDK call; nothing is retried. Failures carry
/// the service's own error message when it sent one, and the full SDK error
/// context otherwise.
///
/// # Tables
///
/// Tables are created with a single HASH key and provisioned throughput of
/// five read and five write units. `wait_until_active` then polls
/// `DescribeTable` until the table reports `ACTIVE` or the configured
/// [`TableWait`] runs out.
///
/// # Scans
///
/// Both scan operations read one page. If DynamoDB reports a
/// `LastEvaluatedKey`, a warning is logged and the remaining pages are left
/// unread.
#[derive(Debug)]
pub struct DynamoDb {
    client: Client,
    table_wait: TableWait,
}

impl DynamoDb {
    /// Creates a new `DynamoDb` instance.
    pub fn new(sdk_config: &aws_config::SdkConfig, table_wait: TableWait) -> Self {
        Self {
            client: Client::new(sdk_config),
            table_wait,
        }
    }

    /// Builds a client from static file credentials, honouring the endpoint
    /// override in `config`.
    pub async fn connect(config: &Config, credentials: &Credentials) -> Self {
        let provider = StaticCredentials::new(
            credentials.access_key_id.clone(),
            credentials.secret_access_key.clone(),
            None,
            None,
            "credentials-file",
        );
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(credentials.region.clone()))
            .credentials_provider(provider);

        if let Some(url) = &config.endpoint_url {
            info!("Using DynamoDB endpoint {url}");
            loader = loader.endpoint_url(url);
        }

        let sdk_config = loader.load().await;
        Self::new(&sdk_config, config.table_wait)
    }

    /// Returns a handle once the table reports `ACTIVE`.
    async fn active_table(
        &self,
        table_name: &str,
    ) -> Result<Option<TableHandle>, SdkError<DescribeTableError>> {
        let result = self
            .client
            .describe_table()
            .table_name(table_name)
            .send()
            .await
            .map(|output| match output.table().and_then(|table| table.table_status()) {
                Some(TableStatus::Active) => Some(TableHandle {
                    name: table_name.to_string(),
                    status: TableStatus::Active.as_str().to_string(),
                }),
                _ => None,
            });
        not_found_as_pending(result)
    }
}

#[async_trait]
impl Store for DynamoDb {
    async fn create_table(&self, spec: &TableSpec) -> Result<(), StoreError> {
        let creation_error = |message: String| StoreError::TableCreation { message };

        let attribute_definition = AttributeDefinition::builder()
            .attribute_name(spec.partition_key())
            .attribute_type(spec.partition_key_type().to_scalar())
            .build()
            .map_err(|e| creation_error(e.to_string()))?;

        let key_schema = KeySchemaElement::builder()
            .attribute_name(spec.partition_key())
            .key_type(KeyType::Hash)
            .build()
            .map_err(|e| creation_error(e.to_string()))?;

        let throughput = ProvisionedThroughput::builder()
            .read_capacity_units(READ_CAPACITY_UNITS)
            .write_capacity_units(WRITE_CAPACITY_UNITS)
            .build()
            .map_err(|e| creation_error(e.to_string()))?;

        self.client
            .create_table()
            .table_name(spec.name())
            .attribute_definitions(attribute_definition)
            .key_schema(key_schema)
            .provisioned_throughput(throughput)
            .send()
            .await
            .map_err(|e| creation_error(remote_message(&e)))?;

        info!("Create request accepted for table '{}'", spec.name());
        Ok(())
    }

    async fn wait_until_active(&self, table_name: &str) -> Result<TableHandle, StoreError> {
        let creation_error = |message: String| StoreError::TableCreation { message };

        let handle = poll_until(
            || self.active_table(table_name),
            self.table_wait.interval,
            self.table_wait.max_attempts,
        )
        .await
        .map_err(|e| creation_error(remote_message(&e)))?;

        match handle {
            Some(handle) => {
                info!("Table '{table_name}' is active");
                Ok(handle)
            }
            None => Err(creation_error(format!(
                "Table {table_name} did not become active after {} checks",
                self.table_wait.max_attempts
            ))),
        }
    }

    async fn put_item(&self, table_name: &str, item: &Item) -> Result<(), StoreError> {
        self.client
            .put_item()
            .table_name(table_name)
            .set_item(Some(item.to_attributes()))
            .send()
            .await
            .map_err(|e| StoreError::Write {
                message: remote_message(&e),
            })?;

        info!("Item added to '{table_name}'");
        Ok(())
    }

    async fn delete_item(&self, table_name: &str, key: &Key) -> Result<(), StoreError> {
        self.client
            .delete_item()
            .table_name(table_name)
            .set_key(Some(key.to_attributes()))
            .send()
            .await
            .map_err(|e| StoreError::Delete {
                message: remote_message(&e),
            })?;

        info!("Item {key} deleted from '{table_name}'");
        Ok(())
    }

    async fn scan(&self, table_name: &str) -> Result<Vec<Item>, StoreError> {
        let output = self
            .client
            .scan()
            .table_name(table_name)
            .send()
            .await
            .map_err(|e| StoreError::Scan {
                message: remote_message(&e),
            })?;

        Ok(first_page(table_name, output))
    }

    async fn scan_with_filter(
        &self,
        table_name: &str,
        filter: &FilterExpression,
    ) -> Result<Vec<Item>, StoreError> {
        let rendered = filter.render();
        let output = self
            .client
            .scan()
            .table_name(table_name)
            .filter_expression(rendered.expression)
            .set_expression_attribute_names(Some(rendered.names))
            .set_expression_attribute_values(Some(rendered.values))
            .send()
            .await
            .map_err(|e| StoreError::Scan {
                message: remote_message(&e),
            })?;

        Ok(first_page(table_name, output))
    }
}

/// `DescribeTable` reads eventually consistent metadata and can miss a table
/// shortly after `CreateTable` succeeded. That counts as not active yet.
fn not_found_as_pending<T, R>(
    result: Result<Option<T>, SdkError<DescribeTableError, R>>,
) -> Result<Option<T>, SdkError<DescribeTableError, R>> {
    match result {
        Err(e)
            if e
                .as_service_error()
                .is_some_and(DescribeTableError::is_resource_not_found_exception) =>
        {
            debug!("Table not visible yet");
            Ok(None)
        }
        other => other,
    }
}

fn first_page(table_name: &str, output: ScanOutput) -> Vec<Item> {
    if output.last_evaluated_key.is_some() {
        warn!("Scan of '{table_name}' returned more than one page; only the first page is shown");
    }
    output
        .items
        .unwrap_or_default()
        .into_iter()
        .map(Item::from_attributes)
        .collect()
}

/// The service's error message, or the full error chain when there is none.
fn remote_message<E, R>(err: &SdkError<E, R>) -> String
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    match err.message() {
        Some(message) => message.to_string(),
        None => DisplayErrorContext(err).to_string(),
    }
}
