//! Raw billing records cleanup: key casing, textual sentinels, and decimal-comma numbers.

use serde::de::DeserializeOwned;
use serde_json::{Number, Value};

use crate::{
    error::{BillingError, FormatError, RecordKind},
    model::{NormalizedData, RawDocument, RawRecord, Tariff, TimeSlice, Transaction},
    prelude::*,
};

/// Textual booleans which suppliers send instead of `false`; they are replaced with `0`.
pub const TEXTUAL_FALSE: [&str; 2] = ["false", "False"];

/// Supplier price fields which may hold decimal-comma text.
pub const SUPPLIER_DECIMAL_FIELDS: [&str; 6] = [
    "kwh_price",
    "max_session_fee",
    "min_billing_amount",
    "min_cosumed_energy",
    "session_fee",
    "min_consumption",
];

/// Transaction fields which may hold decimal-comma text.
pub const TRANSACTION_DECIMAL_FIELDS: [&str; 2] = ["meter_value_start", "meter_value_end"];

/// Lower-case the key and replace spaces with underscores.
#[must_use]
pub fn normalize_key(key: &str) -> String {
    key.to_lowercase().replace(' ', "_")
}

/// Parse a decimal number which uses comma as the fractional separator.
pub fn parse_decimal_comma(field: &str, text: &str) -> Result<f64, FormatError> {
    text.trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| FormatError::Decimal { field: field.to_owned(), value: text.to_owned() })
}

fn decimal_comma_value(field: &str, text: &str) -> Result<Value, FormatError> {
    let value = parse_decimal_comma(field, text)?;
    Number::from_f64(value)
        .map(Value::Number)
        .ok_or_else(|| FormatError::Decimal { field: field.to_owned(), value: text.to_owned() })
}

/// Apply the [`TEXTUAL_FALSE`] rule table.
fn substitute_textual_false(value: Value) -> Value {
    match value {
        Value::String(text) if TEXTUAL_FALSE.contains(&text.as_str()) => Value::from(0),
        value => value,
    }
}

/// Coerce a supplier price value under its normalized key.
pub fn coerce_supplier_value(key: &str, value: Value) -> Result<Value, FormatError> {
    match value {
        Value::String(text) if SUPPLIER_DECIMAL_FIELDS.contains(&key) => {
            decimal_comma_value(key, &text)
        }
        Value::Array(items) if key == "time_price" => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::Object(entry) => normalize_supplier_record(entry).map(Value::Object),
                _ => Err(FormatError::TimePriceEntry { index }),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        value => Ok(value),
    }
}

/// Coerce a transaction value under its normalized key.
pub fn coerce_transaction_value(key: &str, value: Value) -> Result<Value, FormatError> {
    match value {
        Value::String(text) if TRANSACTION_DECIMAL_FIELDS.contains(&key) => {
            decimal_comma_value(key, &text)
        }
        value => Ok(value),
    }
}

/// Normalize a supplier price or one of its nested `time_price` entries.
pub fn normalize_supplier_record(record: RawRecord) -> Result<RawRecord, FormatError> {
    record
        .into_iter()
        .map(|(key, value)| {
            let key = normalize_key(&key);
            let value = coerce_supplier_value(&key, substitute_textual_false(value))?;
            Ok((key, value))
        })
        .collect()
}

pub fn normalize_transaction_record(record: RawRecord) -> Result<RawRecord, FormatError> {
    record
        .into_iter()
        .map(|(key, value)| {
            let key = normalize_key(&key);
            let value = coerce_transaction_value(&key, value)?;
            Ok((key, value))
        })
        .collect()
}

/// Normalize the whole response and validate it into typed records.
#[instrument(skip_all)]
pub fn normalize_document(document: RawDocument) -> Result<NormalizedData, BillingError> {
    let tariffs = document
        .supplier_prices
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            let tariff: Tariff =
                into_typed(RecordKind::SupplierPrice, index, normalize_supplier_record(record)?)?;
            validate_tariff(index, &tariff)?;
            Ok(tariff)
        })
        .collect::<Result<Vec<_>, FormatError>>()?;
    let transactions = document
        .transactions
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            into_typed(RecordKind::Transaction, index, normalize_transaction_record(record)?)
        })
        .collect::<Result<Vec<Transaction>, FormatError>>()?;
    info!(n_tariffs = tariffs.len(), n_transactions = transactions.len(), "normalized");
    Ok(NormalizedData { tariffs, transactions })
}

fn into_typed<T: DeserializeOwned>(
    kind: RecordKind,
    index: usize,
    record: RawRecord,
) -> Result<T, FormatError> {
    serde_json::from_value(Value::Object(record))
        .map_err(|source| FormatError::Record { kind, index, source })
}

/// Only complex minute prices read the time slices.
fn validate_tariff(index: usize, tariff: &Tariff) -> Result<(), FormatError> {
    if !tariff.has_complex_minute_price {
        return Ok(());
    }
    for (slice_index, slice) in tariff.time_price.iter().enumerate() {
        if let Some(hour) = [slice.hour_from, slice.hour_to]
            .into_iter()
            .find(|hour| !TimeSlice::HOURS.contains(hour))
        {
            return Err(FormatError::Hour { index, hour });
        }
        let Some(timeframe) = slice.billing_each_timeframe else {
            return Err(FormatError::SliceField {
                index,
                slice: slice_index,
                field: "billing_each_timeframe",
            });
        };
        if timeframe <= 0.0 {
            return Err(FormatError::Timeframe { index, timeframe });
        }
        if slice.minute_price.is_none() {
            return Err(FormatError::SliceField {
                index,
                slice: slice_index,
                field: "minute_price",
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use serde_json::json;

    use super::*;
    use crate::{model::EvseScope, quantity::Cost};

    fn record(value: Value) -> Result<RawRecord> {
        match value {
            Value::Object(record) => Ok(record),
            _ => bail!("not an object"),
        }
    }

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("Has Session Fee"), "has_session_fee");
        assert_eq!(normalize_key("EVSEID"), "evseid");
    }

    #[test]
    fn test_normalize_key_idempotent() {
        for key in ["Min Billing Amount", "time_price", "Partner Product ID", "a  b"] {
            let once = normalize_key(key);
            assert_eq!(normalize_key(&once), once);
        }
    }

    #[test]
    fn test_parse_decimal_comma() -> Result {
        for (text, expected) in [("1,50", 1.5), ("0,35", 0.35), ("12", 12.0), ("3.25", 3.25)] {
            assert_abs_diff_eq!(parse_decimal_comma("session_fee", text)?, expected);
        }
        Ok(())
    }

    #[test]
    fn test_parse_decimal_comma_fails() {
        assert!(matches!(
            parse_decimal_comma("session_fee", "a lot"),
            Err(FormatError::Decimal { field, .. }) if field == "session_fee",
        ));
        assert!(parse_decimal_comma("session_fee", "1,000,50").is_err());
        assert!(parse_decimal_comma("session_fee", "inf").is_err());
    }

    #[test]
    fn test_normalize_supplier_record() -> Result {
        let normalized = normalize_supplier_record(record(json!({
            "Identifier": "SP-1",
            "Session Fee": "1,50",
            "Max Session Fee": "10,00",
            "EVSE ID": "false",
            "Has Max Session Fee": "False",
            "Interval": "start",
            "Time Price": [
                {"Hour From": "8", "Hour To": 20, "Billing Each Timeframe": 1, "Minute Price": 0.2, "Session Fee": "0,5"},
            ],
        }))?)?;
        assert_eq!(normalized["identifier"], "SP-1");
        assert_eq!(normalized["session_fee"], 1.5);
        assert_eq!(normalized["max_session_fee"], 10.0);
        assert_eq!(normalized["evse_id"], 0);
        assert_eq!(normalized["has_max_session_fee"], 0);
        assert_eq!(normalized["interval"], "start");
        let slice = &normalized["time_price"][0];
        assert_eq!(slice["hour_from"], "8");
        assert_eq!(slice["minute_price"], 0.2);
        assert_eq!(slice["session_fee"], 0.5);
        Ok(())
    }

    #[test]
    fn test_normalize_supplier_record_nested_textual_false() -> Result {
        let normalized = normalize_supplier_record(record(json!({
            "Time Price": [{"Hour From": 8, "Minute Price": "false", "Billing Each Timeframe": "False"}],
        }))?)?;
        let slice = &normalized["time_price"][0];
        assert_eq!(slice["minute_price"], 0);
        assert_eq!(slice["billing_each_timeframe"], 0);
        assert_eq!(slice["hour_from"], 8);
        Ok(())
    }

    #[test]
    fn test_normalize_supplier_record_later_key_wins() -> Result {
        let normalized =
            normalize_supplier_record(record(json!({ "session_fee": 2.0, "Session Fee": "1,50" }))?)?;
        assert_eq!(normalized["session_fee"], 1.5);
        let normalized =
            normalize_supplier_record(record(json!({ "Session Fee": "1,50", "session_fee": 2.0 }))?)?;
        assert_eq!(normalized["session_fee"], 2.0);
        assert_eq!(normalized.len(), 1);
        Ok(())
    }

    #[test]
    fn test_normalize_supplier_record_keeps_normalized() -> Result {
        let original = record(json!({
            "identifier": "SP-1",
            "session_fee": 1.5,
            "has_session_fee": true,
            "time_price": [{"hour_from": 8, "hour_to": 20, "billing_each_timeframe": 1, "minute_price": 0.2}],
        }))?;
        assert_eq!(normalize_supplier_record(original.clone())?, original);
        Ok(())
    }

    #[test]
    fn test_normalize_supplier_record_bad_time_price_entry() -> Result {
        let result = normalize_supplier_record(record(json!({ "Time Price": [{}, 42] }))?);
        assert!(matches!(result, Err(FormatError::TimePriceEntry { index: 1 })));
        Ok(())
    }

    #[test]
    fn test_normalize_transaction_record() -> Result {
        let normalized = normalize_transaction_record(record(json!({
            "Session ID": "S-1",
            "Meter Value Start": "12,5",
            "Meter Value End": 20,
            "EVSEID": "false",
        }))?)?;
        assert_eq!(normalized["session_id"], "S-1");
        assert_eq!(normalized["meter_value_start"], 12.5);
        assert_eq!(normalized["meter_value_end"], 20);
        assert_eq!(normalized["evseid"], "false", "transactions keep textual booleans");
        Ok(())
    }

    #[test]
    fn test_normalize_transaction_record_bad_meter_value() -> Result {
        let result = normalize_transaction_record(record(json!({ "Meter Value End": "n/a" }))?);
        assert!(matches!(result, Err(FormatError::Decimal { .. })));
        Ok(())
    }

    #[test]
    fn test_normalize_document_ok() -> Result {
        let document = serde_json::from_value::<RawDocument>(json!({
            "supplier_prices": [
                {"Identifier": "SP-1", "Product ID": "P-1", "EVSE ID": "false", "Session Fee": "1,50", "Has Session Fee": true},
            ],
            "transactions": [
                {"Session ID": "S-1", "Partner Product ID": "P-1", "EVSEID": "E-1", "Charging Start": "2020-01-01T10:00:00"},
            ],
        }))?;
        let data = normalize_document(document)?;
        assert_eq!(data.tariffs.len(), 1);
        assert_eq!(data.tariffs[0].evse_id, EvseScope::Any);
        assert_eq!(data.tariffs[0].session_fee, Some(Cost(1.5)));
        assert_eq!(data.transactions.len(), 1);
        assert!(data.transactions[0].charging_start.is_some());
        Ok(())
    }

    #[test]
    fn test_normalize_document_bad_timestamp() -> Result {
        let document = serde_json::from_value::<RawDocument>(json!({
            "transactions": [{}, {"Charging End": "yesterday"}],
        }))?;
        let result = normalize_document(document);
        assert!(matches!(
            result,
            Err(BillingError::Format(FormatError::Record {
                kind: RecordKind::Transaction,
                index: 1,
                ..
            })),
        ));
        Ok(())
    }

    #[test]
    fn test_normalize_document_zero_timeframe() -> Result {
        let document = serde_json::from_value::<RawDocument>(json!({
            "supplier_prices": [{
                "Has Complex Minute Price": true,
                "Time Price": [{"Hour From": 8, "Hour To": 20, "Billing Each Timeframe": 0, "Minute Price": 0.2}],
            }],
        }))?;
        assert!(matches!(
            normalize_document(document),
            Err(BillingError::Format(FormatError::Timeframe { index: 0, .. })),
        ));
        Ok(())
    }

    #[test]
    fn test_normalize_document_hour_out_of_range() -> Result {
        let document = serde_json::from_value::<RawDocument>(json!({
            "supplier_prices": [
                {"Has Complex Minute Price": false, "Time Price": [{"Hour To": 200_000_000_000_000_000_i64}]},
                {
                    "Has Complex Minute Price": true,
                    "Time Price": [{"Hour From": 8, "Hour To": 200_000_000_000_000_000_i64, "Billing Each Timeframe": 1, "Minute Price": 0.2}],
                },
            ],
        }))?;
        assert!(matches!(
            normalize_document(document),
            Err(BillingError::Format(FormatError::Hour {
                index: 1,
                hour: 200_000_000_000_000_000,
            })),
        ));
        Ok(())
    }

    #[test]
    fn test_normalize_document_complex_slice_without_minute_price() -> Result {
        let document = serde_json::from_value::<RawDocument>(json!({
            "supplier_prices": [{
                "Has Complex Minute Price": true,
                "Time Price": [
                    {"Hour From": 8, "Hour To": 20, "Billing Each Timeframe": 1, "Minute Price": "0,2"},
                    {"Hour From": 20, "Hour To": 8, "Billing Each Timeframe": 1},
                ],
            }],
        }))?;
        assert!(matches!(
            normalize_document(document),
            Err(BillingError::Format(FormatError::SliceField {
                index: 0,
                slice: 1,
                field: "minute_price",
            })),
        ));
        Ok(())
    }

    #[test]
    fn test_normalize_document_simple_ignores_partial_slices() -> Result {
        let document = serde_json::from_value::<RawDocument>(json!({
            "supplier_prices": [{
                "Simple Minute Price": 0.1,
                "Time Price": [{"Hour From": 8, "Hour To": 20}, {"Minute Price": "0,2"}],
            }],
        }))?;
        let data = normalize_document(document)?;
        assert_eq!(data.tariffs[0].time_price.len(), 2);
        Ok(())
    }
}
