//! Charging sessions billing API client.

use std::time::Duration;

use reqwest::{
    Url,
    blocking::{Client, Response},
};

use crate::{error::BillingError, model::RawDocument, prelude::*};

/// HTTP Basic credentials.
pub struct Credentials {
    pub username: String,
    pub password: String,
}

pub struct Api {
    client: Client,
    url: Url,
    credentials: Credentials,
}

impl Api {
    #[instrument(skip_all, fields(url = %url))]
    pub fn new(
        url: Url,
        credentials: Credentials,
        timeout: Duration,
    ) -> Result<Self, BillingError> {
        let client = Client::builder().timeout(timeout).build().map_err(BillingError::Transport)?;
        Ok(Self { client, url, credentials })
    }

    /// Fetch the supplier prices and transactions.
    #[instrument(skip_all, fields(url = %self.url))]
    pub fn get_billing_data(&self) -> Result<RawDocument, BillingError> {
        info!("fetching…");
        let body = self
            .client
            .get(self.url.clone())
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
            .send()
            .and_then(Response::error_for_status)
            .and_then(Response::bytes)
            .map_err(BillingError::Transport)?;
        let document = parse_billing_data(&body)?;
        info!(
            n_supplier_prices = document.supplier_prices.len(),
            n_transactions = document.transactions.len(),
            "fetched"
        );
        Ok(document)
    }
}

fn parse_billing_data(body: &[u8]) -> Result<RawDocument, BillingError> {
    serde_json::from_slice(body).map_err(BillingError::Parse)
}
