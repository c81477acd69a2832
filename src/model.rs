mod de;
mod identifier;
mod tariff;
mod transaction;

use serde::Deserialize;
use serde_json::{Map, Value};

pub use self::{
    identifier::Identifier,
    tariff::{EvseScope, IntervalMode, Tariff, TimeSlice},
    transaction::Transaction,
};

/// JSON object as received from the billing API, with arbitrary key casing.
pub type RawRecord = Map<String, Value>;

/// Billing API response body.
#[derive(Debug, Default, Deserialize)]
pub struct RawDocument {
    #[serde(default)]
    pub supplier_prices: Vec<RawRecord>,

    #[serde(default)]
    pub transactions: Vec<RawRecord>,
}

/// Typed records ready for matching.
#[must_use]
pub struct NormalizedData {
    pub tariffs: Vec<Tariff>,
    pub transactions: Vec<Transaction>,
}
