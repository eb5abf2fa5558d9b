use aws_sdk_dynamodb::types::AttributeValue;
use std::collections::HashMap;

use super::value::ScalarValue;

const NAME_PLACEHOLDER: &str = "#n0";
const VALUE_PLACEHOLDER: &str = ":v0";

/// The comparison applied by a scan filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Equals,
    Contains,
    GreaterThan,
    LessThan,
}

/// A single-predicate scan filter. There is no AND/OR composition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterExpression {
    pub comparison: Comparison,
    pub attribute: String,
    pub value: ScalarValue,
}

/// A filter in request form: expression text plus its placeholder maps.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedFilter {
    pub expression: String,
    pub names: HashMap<String, String>,
    pub values: HashMap<String, AttributeValue>,
}

impl FilterExpression {
    pub fn new(comparison: Comparison, attribute: impl Into<String>, value: ScalarValue) -> Self {
        Self {
            comparison,
            attribute: attribute.into(),
            value,
        }
    }

    /// Renders the filter with placeholders so attribute names that collide
    /// with reserved words still work.
    pub fn render(&self) -> RenderedFilter {
        let expression = match self.comparison {
            Comparison::Equals => format!("{NAME_PLACEHOLDER} = {VALUE_PLACEHOLDER}"),
            Comparison::Contains => format!("contains({NAME_PLACEHOLDER}, {VALUE_PLACEHOLDER})"),
            Comparison::GreaterThan => format!("{NAME_PLACEHOLDER} > {VALUE_PLACEHOLDER}"),
            Comparison::LessThan => format!("{NAME_PLACEHOLDER} < {VALUE_PLACEHOLDER}"),
        };
        RenderedFilter {
            expression,
            names: HashMap::from([(NAME_PLACEHOLDER.to_string(), self.attribute.clone())]),
            values: HashMap::from([(
                VALUE_PLACEHOLDER.to_string(),
                self.value.to_attribute_value(),
            )]),
        }
    }
}
