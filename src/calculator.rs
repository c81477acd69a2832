mod energy;
mod fee;
mod time;

use serde::Serialize;

pub use self::{energy::kwh_price, fee::fee_price, time::time_price};
use crate::{
    error::BillingError,
    matcher::{MatchedPair, match_pairs},
    model::{Identifier, RawDocument},
    normalize::normalize_document,
    prelude::*,
    quantity::Cost,
};

/// Price of one transaction under one supplier price.
#[must_use]
#[derive(Clone, Debug, Serialize)]
pub struct PriceResult {
    pub fee_price: Cost,
    pub time_price: Cost,
    pub kwh_price: Cost,
    pub total_price: Cost,
    pub session_id: Option<Identifier>,
    pub supplier_price_id: Option<Identifier>,
}

impl PriceResult {
    pub fn new(pair: MatchedPair<'_>) -> Self {
        let MatchedPair { tariff, transaction } = pair;
        let fee_price = fee_price(tariff);
        let time_price = time_price(tariff, transaction);
        let kwh_price = kwh_price(tariff, transaction);
        let this = Self {
            fee_price,
            time_price,
            kwh_price,
            total_price: fee_price + time_price + kwh_price,
            session_id: transaction.session_id.clone(),
            supplier_price_id: tariff.identifier.clone(),
        };
        debug!(
            session_id = ?this.session_id,
            supplier_price_id = ?this.supplier_price_id,
            total_price = %this.total_price,
            "priced"
        );
        this
    }
}

pub fn calculate_prices(pairs: &[MatchedPair<'_>]) -> Vec<PriceResult> {
    pairs.iter().copied().map(PriceResult::new).collect()
}

/// Normalize the billing data, join the transactions with their supplier prices, and price them.
#[instrument(skip_all)]
pub fn get_transaction_prices(document: RawDocument) -> Result<Vec<PriceResult>, BillingError> {
    let data = normalize_document(document)?;
    let pairs = match_pairs(&data.tariffs, &data.transactions);
    let prices = calculate_prices(&pairs);
    info!(n_prices = prices.len(), "calculated");
    Ok(prices)
}
