use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::Value;

use crate::model::de::unexpected;

/// Product, EVSE, session, or supplier price identifier.
///
/// The API is not consistent about sending strings or numbers, so numbers are kept in their
/// textual form.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, derive_more::Display)]
#[serde(transparent)]
pub struct Identifier(pub String);

impl From<&str> for Identifier {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(text) => Ok(Self(text)),
            Value::Number(number) => Ok(Self(number.to_string())),
            other => Err(de::Error::invalid_type(unexpected(&other), &"a string or a number")),
        }
    }
}
