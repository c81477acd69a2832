use std::time::Duration;

use clap::{Parser, ValueEnum};
use reqwest::Url;

use crate::{
    api::{BillingApi, Credentials},
    error::BillingError,
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[clap(flatten)]
    pub api: BillingApiArgs,

    /// How to render the calculated prices.
    #[clap(long = "view-mode", env = "VIEW_MODE", value_enum, default_value = "preview")]
    pub view_mode: ViewMode,
}

#[derive(Parser)]
pub struct BillingApiArgs {
    /// Billing data URL.
    #[clap(long = "url", env = "EVSE_API_URL")]
    pub url: Url,

    #[clap(long = "username", env = "EVSE_API_USERNAME")]
    pub username: String,

    #[clap(long = "password", env = "EVSE_API_PASSWORD", hide_env_values = true)]
    pub password: String,

    #[clap(long = "timeout-secs", default_value = "10", env = "EVSE_API_TIMEOUT_SECS")]
    pub timeout_secs: u64,
}

impl BillingApiArgs {
    pub fn new_client(&self) -> Result<BillingApi, BillingError> {
        let credentials =
            Credentials { username: self.username.clone(), password: self.password.clone() };
        BillingApi::new(self.url.clone(), credentials, Duration::from_secs(self.timeout_secs))
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum ViewMode {
    /// Human-readable table.
    #[default]
    Preview,

    /// Pretty-printed JSON array.
    Json,
}
