use aws_sdk_dynamodb::types::AttributeValue;
use std::fmt;

/// A scalar attribute value as written by this tool.
///
/// Operator input becomes an `Int` only when it is made entirely of ASCII
/// digits; everything else, including signed or decimal numbers, stays a
/// `Str`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ScalarValue {
    /// Non-negative integer, stored as a DynamoDB number (`N`). Holds the
    /// digits without leading zeros, so any length is kept exactly.
    Int(String),
    /// Text, stored as a DynamoDB string (`S`).
    Str(String),
}

impl ScalarValue {
    /// Applies the digit-only coercion rule to raw operator input.
    ///
    /// Leading zeros are dropped (`"007"` becomes `7`). There is no length
    /// limit; DynamoDB rejects numbers it cannot hold.
    pub fn coerce(raw: &str) -> Self {
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Self::Str(raw.to_string());
        }
        match raw.trim_start_matches('0') {
            "" => Self::Int("0".to_string()),
            digits => Self::Int(digits.to_string()),
        }
    }

    pub fn to_attribute_value(&self) -> AttributeValue {
        match self {
            Self::Int(digits) => AttributeValue::N(digits.clone()),
            Self::Str(s) => AttributeValue::S(s.clone()),
        }
    }

    /// Reads back a value this tool could have written. Numbers that are not
    /// plain non-negative integers, and non-scalar types, yield `None`.
    #[cfg(test)]
    pub fn from_attribute_value(value: &AttributeValue) -> Option<Self> {
        match value {
            AttributeValue::S(s) => Some(Self::Str(s.clone())),
            AttributeValue::N(n) => match Self::coerce(n) {
                int @ Self::Int(_) => Some(int),
                Self::Str(_) => None,
            },
            _ => None,
        }
    }
}

/// The raw form, as the operator typed it (minus leading zeros on numbers).
impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(digits) => f.write_str(digits),
            Self::Str(s) => f.write_str(s),
        }
    }
}

/// Quotes text the way Python's `repr` does: single quotes unless the text
/// holds a single quote and no double quote.
pub(crate) fn quote(s: &str) -> String {
    let delimiter = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push(delimiter);
    for c in s.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c if c == delimiter => {
                quoted.push('\\');
                quoted.push(c);
            }
            _ => quoted.push(c),
        }
    }
    quoted.push(delimiter);
    quoted
}

/// Renders any attribute value read from the store. Strings are quoted with
/// [`quote`]; numbers print as stored; documents and sets fall back to JSON.
pub(crate) fn render_attribute(value: &AttributeValue) -> String {
    match value {
        AttributeValue::S(s) => quote(s),
        AttributeValue::N(n) => n.clone(),
        AttributeValue::Bool(b) => if *b { "True" } else { "False" }.to_string(),
        AttributeValue::Null(_) => "None".to_string(),
        other => {
            let json: Result<serde_json::Value, _> =
                serde_dynamo::from_attribute_value(other.clone());
            json.map(|json| json.to_string())
                .unwrap_or_else(|_| format!("{other:?}"))
        }
    }
}
