mod billing;

pub use self::billing::{Api as BillingApi, Credentials};
