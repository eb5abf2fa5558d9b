use aws_sdk_dynamodb::types::ScalarAttributeType;

use crate::error::ValidationError;

/// Type of a table's partition key attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartitionKeyType {
    /// Keys are DynamoDB strings (`S`).
    String,
    /// Keys are DynamoDB numbers (`N`).
    Number,
}

impl PartitionKeyType {
    /// Parses the operator's `S`/`N` token, ignoring case.
    pub fn parse(token: &str) -> Result<Self, ValidationError> {
        if token.eq_ignore_ascii_case("s") {
            Ok(Self::String)
        } else if token.eq_ignore_ascii_case("n") {
            Ok(Self::Number)
        } else {
            Err(ValidationError::InvalidKeyType(token.to_string()))
        }
    }

    pub fn to_scalar(self) -> ScalarAttributeType {
        match self {
            Self::String => ScalarAttributeType::S,
            Self::Number => ScalarAttributeType::N,
        }
    }
}

/// DynamoDB table definition used by create-table.
///
/// Tables created by this tool have a simple primary key: a single partition
/// key attribute, no sort key and no secondary indexes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSpec {
    name: String,
    partition_key: String,
    partition_key_type: PartitionKeyType,
}

impl TableSpec {
    /// Creates a new `TableSpec`.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the DynamoDB table.
    /// * `partition_key` - The name of the partition key attribute.
    /// * `partition_key_type` - The scalar type of the partition key.
    pub fn new(
        name: impl Into<String>,
        partition_key: impl Into<String>,
        partition_key_type: PartitionKeyType,
    ) -> Self {
        Self {
            name: name.into(),
            partition_key: partition_key.into(),
            partition_key_type,
        }
    }

    /// Returns the name of the table.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the partition key of the table.
    pub fn partition_key(&self) -> &str {
        &self.partition_key
    }

    pub fn partition_key_type(&self) -> PartitionKeyType {
        self.partition_key_type
    }
}

/// A table that finished creating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableHandle {
    pub name: String,
    pub status: String,
}

#[cfg(test)]
impl TableHandle {
    pub const ACTIVE: &'static str = "ACTIVE";

    pub fn is_active(&self) -> bool {
        self.status == Self::ACTIVE
    }
}
