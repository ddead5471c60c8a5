pub mod ledger;
pub mod ticket;

pub use ledger::{LedgerDerived, LedgerForm, LedgerInputs, LedgerRules, TaxBreakdown, TaxCode};
pub use ticket::{Ticket, TicketForm, TicketStatus};
