use bon::Builder;
use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::model::{Identifier, de::optional_timestamp};

/// Normalized charging session.
#[must_use]
#[derive(Clone, Debug, Deserialize, Builder)]
pub struct Transaction {
    #[builder(into)]
    pub session_id: Option<Identifier>,

    #[builder(into)]
    pub partner_product_id: Option<Identifier>,

    #[builder(into)]
    pub evseid: Option<Identifier>,

    #[serde(default, deserialize_with = "optional_timestamp")]
    pub charging_start: Option<NaiveDateTime>,

    #[serde(default, deserialize_with = "optional_timestamp")]
    pub charging_end: Option<NaiveDateTime>,

    /// Meter reading in kilowatt-hours, not billed yet.
    #[allow(dead_code)]
    pub meter_value_start: Option<f64>,

    #[allow(dead_code)]
    pub meter_value_end: Option<f64>,
}

impl Transaction {
    /// Charging duration in minutes, when both timestamps are known.
    #[expect(clippy::cast_precision_loss)]
    pub fn duration_minutes(&self) -> Option<f64> {
        let (Some(start), Some(end)) = (self.charging_start, self.charging_end) else {
            return None;
        };
        Some((end - start).num_milliseconds() as f64 / 60_000.0)
    }
}
