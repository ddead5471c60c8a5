// Billing module

pub mod controllers;
pub mod models;
pub mod services;

pub use models::{VendorBill, VendorBillLine, VendorBillRequest};
pub use services::BillingService;
