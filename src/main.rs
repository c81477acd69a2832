#![allow(clippy::doc_markdown)]
#![doc = include_str!("../README.md")]

mod api;
mod calculator;
mod cli;
mod error;
mod matcher;
mod model;
mod normalize;
mod prelude;
mod quantity;
mod tables;

use clap::{Parser, crate_version};

use crate::{
    calculator::get_transaction_prices,
    cli::{Args, ViewMode},
    prelude::*,
    tables::build_prices_table,
};

fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().with_writer(std::io::stderr).init();
    info!(version = crate_version!(), "starting…");

    let args = Args::parse();
    let document = args
        .api
        .new_client()?
        .get_billing_data()
        .with_context(|| format!("failed to import the billing data from `{}`", args.api.url))?;
    let prices = get_transaction_prices(document).context("failed to calculate the prices")?;

    match args.view_mode {
        ViewMode::Preview => println!("{}", build_prices_table(&prices)),
        ViewMode::Json => println!("{}", serde_json::to_string_pretty(&prices)?),
    }

    info!("done!");
    Ok(())
}
