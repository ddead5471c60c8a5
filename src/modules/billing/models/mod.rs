pub mod vendor_bill;

pub use vendor_bill::{VendorBill, VendorBillLine, VendorBillRequest};
