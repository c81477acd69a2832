use derive_more::Display;

/// Everything that aborts a pricing run.
#[derive(Debug, thiserror::Error)]
pub enum BillingError {
    #[error("failed to fetch the billing data")]
    Transport(#[source] reqwest::Error),

    #[error("failed to parse the billing data")]
    Parse(#[source] serde_json::Error),

    #[error(transparent)]
    Format(#[from] FormatError),
}

#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("`{field}` is not a decimal number: `{value}`")]
    Decimal { field: String, value: String },

    #[error("`time_price` entry #{index} is not an object")]
    TimePriceEntry { index: usize },

    #[error("malformed {kind} #{index}")]
    Record {
        kind: RecordKind,
        index: usize,

        #[source]
        source: serde_json::Error,
    },

    #[error("supplier price #{index}: `billing_each_timeframe` must be positive, got {timeframe}")]
    Timeframe { index: usize, timeframe: f64 },

    #[error("supplier price #{index}: hour of day must be within 0..=24, got {hour}")]
    Hour { index: usize, hour: i64 },

    #[error("supplier price #{index}: `time_price` entry #{slice} has no numeric `{field}`")]
    SliceField { index: usize, slice: usize, field: &'static str },
}

#[derive(Copy, Clone, Debug, Display, Eq, PartialEq)]
pub enum RecordKind {
    #[display("supplier price")]
    SupplierPrice,

    #[display("transaction")]
    Transaction,
}
