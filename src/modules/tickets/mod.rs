// Tickets module

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{LedgerDerived, LedgerForm, LedgerInputs, LedgerRules, TaxBreakdown, TaxCode, Ticket, TicketForm, TicketStatus};
pub use repositories::TicketRepository;
pub use services::{FareLedgerCalculator, TicketService};
