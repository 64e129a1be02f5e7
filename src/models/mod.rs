//! Core data models for the arqueo engine.
//!
//! This module contains all the domain models used throughout the engine.

mod shift_record;
mod stored;
mod totals;

pub use shift_record::{
    CreditInvoice, FactContado, InvoiceKind, InvoiceRange, NonCashEntry, ShiftRecord,
    DENOMINATIONS,
};
pub use stored::{ArqueoSummary, StoredArqueo};
pub use totals::{Outcome, TotalsSummary};
