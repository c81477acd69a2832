use std::ops::RangeInclusive;

use bon::Builder;
use serde::{Deserialize, Deserializer, de};
use serde_json::Value;
use serde_with::{DisplayFromStr, PickFirst, serde_as};

use crate::{
    model::{
        Identifier,
        Transaction,
        de::{flag, lenient_number, list_or_empty, unexpected},
    },
    quantity::{Cost, MinuteRate},
};

/// Normalized supplier price.
#[must_use]
#[serde_as]
#[derive(Clone, Debug, Deserialize, Builder)]
pub struct Tariff {
    #[builder(into)]
    pub identifier: Option<Identifier>,

    #[builder(into)]
    pub product_id: Option<Identifier>,

    #[serde(default)]
    #[builder(default)]
    pub evse_id: EvseScope,

    pub session_fee: Option<Cost>,
    pub min_billing_amount: Option<Cost>,
    pub max_session_fee: Option<Cost>,

    /// Not used in the calculation yet.
    #[allow(dead_code)]
    pub kwh_price: Option<Cost>,

    #[allow(dead_code)]
    pub min_cosumed_energy: Option<f64>,

    #[allow(dead_code)]
    pub min_consumption: Option<f64>,

    #[serde(default, deserialize_with = "flag")]
    #[builder(default)]
    pub has_session_fee: bool,

    #[serde(default, deserialize_with = "flag")]
    #[builder(default)]
    pub has_minimum_billing_threshold: bool,

    #[serde(default, deserialize_with = "flag")]
    #[builder(default)]
    pub has_max_session_fee: bool,

    #[serde(default, deserialize_with = "flag")]
    #[builder(default)]
    pub has_complex_minute_price: bool,

    /// Minimal billed duration in minutes.
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub min_duration: Option<f64>,

    #[serde(default)]
    #[builder(default)]
    pub interval: IntervalMode,

    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub simple_minute_price: Option<MinuteRate>,

    #[serde(default, deserialize_with = "list_or_empty")]
    #[builder(default)]
    pub time_price: Vec<TimeSlice>,
}

impl Tariff {
    /// Check whether the supplier price is applicable to the transaction.
    pub fn applies_to(&self, transaction: &Transaction) -> bool {
        match &self.evse_id {
            EvseScope::Any => {
                self.product_id.is_some() && self.product_id == transaction.partner_product_id
            }
            EvseScope::Exact(evse_id) => transaction.evseid.as_ref() == Some(evse_id),
        }
    }

    /// Minimal billed duration, if enabled.
    pub fn min_duration(&self) -> Option<f64> {
        self.min_duration.filter(|minutes| *minutes != 0.0)
    }
}

/// Which EVSEs a supplier price applies to.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum EvseScope {
    /// Any EVSE of the supplier price product.
    #[default]
    Any,

    Exact(Identifier),
}

impl From<&str> for EvseScope {
    fn from(evse_id: &str) -> Self {
        Self::Exact(evse_id.into())
    }
}

impl<'de> Deserialize<'de> for EvseScope {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Null | Value::Bool(false) => Ok(Self::Any),
            Value::Number(number) if number.as_f64() == Some(0.0) => Ok(Self::Any),
            Value::Number(number) => Ok(Self::Exact(Identifier(number.to_string()))),
            Value::String(evse_id) => Ok(Self::Exact(Identifier(evse_id))),
            other => Err(de::Error::invalid_type(unexpected(&other), &"an EVSE ID or `false`")),
        }
    }
}

/// Where the complex minute price rounds the billed duration to.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum IntervalMode {
    /// Round up to the started timeframe.
    Start,

    /// Anything else the supplier may send.
    #[default]
    End,
}

impl<'de> Deserialize<'de> for IntervalMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(mode) if mode == "start" => Ok(Self::Start),
            _ => Ok(Self::End),
        }
    }
}

/// Hour-of-day band of a complex minute price.
///
/// Simple minute prices never read the bands, so the amounts are only required for complex ones.
#[must_use]
#[serde_as]
#[derive(Clone, Debug, Deserialize, Builder)]
pub struct TimeSlice {
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[serde(default)]
    #[builder(default)]
    pub hour_from: i64,

    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[serde(default)]
    #[builder(default)]
    pub hour_to: i64,

    /// Billing granularity in hours.
    #[serde(default, deserialize_with = "lenient_number")]
    pub billing_each_timeframe: Option<f64>,

    #[serde(default, deserialize_with = "lenient_number")]
    pub minute_price: Option<MinuteRate>,
}

impl TimeSlice {
    /// Valid hours of day, including the midnight at the end.
    pub const HOURS: RangeInclusive<i64> = 0..=24;
}
