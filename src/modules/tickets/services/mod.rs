pub mod fare_ledger;
pub mod ticket_service;

pub use fare_ledger::FareLedgerCalculator;
pub use ticket_service::TicketService;
