//! Purpose: Declare the record shapes decoded from the quote and greeting services.
//! Exports: `Shape`, `Quote`, `QuoteValue`, `Greeting`.
//! Role: Fixed field-name/type mappings consulted by `json::parse::decode`.
//! Invariants: Every shape tolerates unknown keys and defaults absent or null keys.
//! Invariants: Display renders `TypeName{field=value, ...}`; records are never mutated.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::json::parse::null_as_default;

/// A record type that can be decoded from a response body and logged.
pub trait Shape: DeserializeOwned + Serialize + fmt::Display {
    /// Name used in log lines and error context.
    const NAME: &'static str;
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Quote {
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub value: QuoteValue,
}

/// The `value` object nested in a [`Quote`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteValue {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub quote: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Greeting {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub content: String,
}

impl Shape for Quote {
    const NAME: &'static str = "Quote";
}

impl Shape for QuoteValue {
    const NAME: &'static str = "Value";
}

impl Shape for Greeting {
    const NAME: &'static str = "Greeting";
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{{type='{}', value={}}}", Self::NAME, self.kind, self.value)
    }
}

impl fmt::Display for QuoteValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{{id={}, quote='{}'}}", Self::NAME, self.id, self.quote)
    }
}

impl fmt::Display for Greeting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{{id={}, content='{}'}}", Self::NAME, self.id, self.content)
    }
}
