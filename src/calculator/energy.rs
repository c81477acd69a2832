use crate::{
    model::{Tariff, Transaction},
    quantity::Cost,
};

/// Consumed energy price.
///
/// Energy is not billed yet: the meter values and `kwh_price` are parsed but not used.
#[expect(clippy::missing_const_for_fn)]
pub fn kwh_price(_tariff: &Tariff, _transaction: &Transaction) -> Cost {
    Cost::ZERO
}
