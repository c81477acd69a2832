use std::{
    fmt::{Debug, Display, Formatter},
    ops::Mul,
};

use serde::{Deserialize, Serialize};

/// Money amount in the supplier currency.
#[derive(
    Clone,
    Copy,
    Default,
    Deserialize,
    PartialEq,
    PartialOrd,
    Serialize,
    derive_more::Add,
    derive_more::AddAssign,
    derive_more::From,
    derive_more::FromStr,
    derive_more::Sub,
    derive_more::Sum,
)]
#[serde(transparent)]
pub struct Cost(pub f64);

impl Cost {
    pub const ZERO: Self = Self(0.0);
}

impl Display for Cost {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Debug for Cost {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}

/// Price of one charging minute.
#[derive(
    Clone,
    Copy,
    Default,
    Deserialize,
    PartialEq,
    PartialOrd,
    Serialize,
    derive_more::From,
    derive_more::FromStr,
)]
#[serde(transparent)]
pub struct MinuteRate(pub f64);

impl Display for MinuteRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}/min", self.0)
    }
}

impl Debug for MinuteRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

/// Rate times minutes.
impl Mul<f64> for MinuteRate {
    type Output = Cost;

    fn mul(self, minutes: f64) -> Self::Output {
        Cost(self.0 * minutes)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_minute_rate_mul() {
        assert_abs_diff_eq!((MinuteRate(0.1) * 30.0).0, 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_cost_sum() {
        let total: Cost = [Cost(1.5), Cost(2.25), Cost::ZERO].into_iter().sum();
        assert_abs_diff_eq!(total.0, 3.75, epsilon = 1e-9);
    }

    #[test]
    fn test_cost_display() {
        assert_eq!(Cost(3.0).to_string(), "3.00");
    }

    #[test]
    fn test_cost_transparent_serde() -> crate::prelude::Result {
        assert_eq!(serde_json::to_string(&Cost(2.5))?, "2.5");
        assert_abs_diff_eq!(serde_json::from_str::<Cost>("1.25")?.0, 1.25, epsilon = 1e-9);
        Ok(())
    }
}
