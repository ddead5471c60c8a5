pub mod billing_service;

pub use billing_service::{build_bill, BillingService};
