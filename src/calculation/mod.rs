//! Calculation logic for the arqueo engine.
//!
//! This module contains the reconciliation arithmetic: defensive numeric
//! coercion for form input, the cash total over denomination counts, the
//! non-cash aggregation policies, the dual-shape point-of-sale invoice
//! total, the credit invoice total, and the final totals assembly.

mod amount;
mod cash_total;
mod invoice_total;
mod noncash_total;
mod reconcile;

pub use amount::{lenient_amount, parse_amount, parse_quantity};
pub use cash_total::calculate_cash_total;
pub use invoice_total::{calculate_contado_total, calculate_credito_total};
pub use noncash_total::{
    calculate_noncash_totals, NonCashPolicy, NonCashTotals, LEGACY_NONCASH_CATEGORIES,
};
pub use reconcile::compute_totals;
