use crate::{model::Tariff, quantity::Cost};

/// Session fee, bounded by the minimal billing amount and the maximal session fee.
///
/// A session fee exactly equal to one of the thresholds is not billed: none of the comparisons
/// hold. This is how suppliers have been billed so far and is kept until the thresholds get
/// clarified.
pub fn fee_price(tariff: &Tariff) -> Cost {
    let session_fee = tariff.session_fee.unwrap_or_default();
    let min_billing_amount = tariff.min_billing_amount.unwrap_or_default();
    let max_session_fee = tariff.max_session_fee.unwrap_or_default();

    if tariff.has_session_fee && tariff.has_minimum_billing_threshold && tariff.has_max_session_fee
    {
        if min_billing_amount > session_fee {
            min_billing_amount
        } else if min_billing_amount < session_fee && session_fee < max_session_fee {
            session_fee
        } else if session_fee > max_session_fee {
            max_session_fee
        } else {
            Cost::ZERO
        }
    } else if tariff.has_session_fee && tariff.has_minimum_billing_threshold {
        if min_billing_amount > session_fee {
            min_billing_amount
        } else if session_fee > min_billing_amount {
            session_fee
        } else {
            Cost::ZERO
        }
    } else {
        Cost::ZERO
    }
}
