use crate::{
    model::{IntervalMode, Tariff, TimeSlice, Transaction},
    prelude::*,
    quantity::Cost,
};

/// Charging time price, either simple per-minute or banded by hour of day.
pub fn time_price(tariff: &Tariff, transaction: &Transaction) -> Cost {
    if tariff.time_price.is_empty() {
        Cost::ZERO
    } else if tariff.has_complex_minute_price {
        complex_time_price(tariff)
    } else {
        simple_time_price(tariff, transaction)
    }
}

fn simple_time_price(tariff: &Tariff, transaction: &Transaction) -> Cost {
    let Some(mut minutes) = transaction.duration_minutes() else {
        warn!(
            session_id = ?transaction.session_id,
            "no charging timestamps, time price is not billed"
        );
        return Cost::ZERO;
    };
    if let Some(min_duration) = tariff.min_duration()
        && minutes < min_duration
    {
        debug!(minutes, min_duration, "clamping to the minimal duration");
        minutes = min_duration;
    }
    tariff.simple_minute_price.unwrap_or_default() * minutes
}

fn complex_time_price(tariff: &Tariff) -> Cost {
    tariff
        .time_price
        .iter()
        .filter_map(|slice| Some(slice.minute_price? * slice.billed_minutes(tariff.interval)?))
        .sum()
}

impl TimeSlice {
    /// Billing timeframe in minutes.
    pub fn timeframe_minutes(&self) -> Option<f64> {
        self.billing_each_timeframe.map(|hours| hours * 60.0)
    }

    /// Raw slice length in minutes.
    ///
    /// Not clamped: the arithmetic goes negative for some wrapping slices.
    #[expect(clippy::cast_precision_loss)]
    pub fn duration_minutes(&self) -> f64 {
        let (hour_from, hour_to) = (self.hour_from as f64, self.hour_to as f64);
        let hours =
            if hour_from > hour_to { hour_to - hour_from } else { hour_to - (24.0 - hour_from) };
        hours * 60.0
    }

    /// Duration rounded to the billing timeframe.
    pub fn billed_minutes(&self, interval: IntervalMode) -> Option<f64> {
        let timeframe = self.timeframe_minutes()?;
        let duration = self.duration_minutes();
        let remainder = duration.rem_euclid(timeframe);
        Some(match interval {
            IntervalMode::Start => duration + remainder,
            IntervalMode::End => duration - (timeframe - remainder),
        })
    }
}
