//! The reconciliation calculator.
//!
//! Pure function from a submitted [`ShiftRecord`] to its [`TotalsSummary`].
//! No state, no side effects, no I/O: this is the one part of the system
//! that carries real arithmetic, and it is kept separable from persistence
//! and rendering so it can be tested on its own.

use crate::models::{ShiftRecord, TotalsSummary};

use super::cash_total::calculate_cash_total;
use super::invoice_total::{calculate_contado_total, calculate_credito_total};
use super::noncash_total::{calculate_noncash_totals, NonCashPolicy};

/// Computes the totals summary for a submitted shift record.
///
/// The four category sums (cash, non-cash, point-of-sale invoiced, credit
/// invoiced) are computed first; the derived fields follow from them, so
/// `balance_general == cash_total + total_no_efectivo` and
/// `diferencia == balance_general - total_facturado_al_contado` hold by
/// construction for every summary this function returns.
///
/// # Example
///
/// ```
/// use arqueo_engine::calculation::{compute_totals, NonCashPolicy};
/// use arqueo_engine::models::ShiftRecord;
/// use rust_decimal::Decimal;
///
/// let record: ShiftRecord = serde_json::from_str(r#"{
///     "date": "2026-03-01",
///     "cashier": "maria",
///     "shift": "mañana",
///     "counts": {"2000": 2, "100": 1}
/// }"#).unwrap();
///
/// let totals = compute_totals(&record, NonCashPolicy::AllKeys);
/// assert_eq!(totals.cash_total, Decimal::from(4100));
/// assert_eq!(totals.balance_general, Decimal::from(4100));
/// ```
pub fn compute_totals(record: &ShiftRecord, policy: NonCashPolicy) -> TotalsSummary {
    let cash_total = calculate_cash_total(&record.counts);
    let noncash = calculate_noncash_totals(&record.noncash, policy);
    let total_facturado_al_contado = calculate_contado_total(&record.fact_contado);
    let credito_total = calculate_credito_total(&record.fact_credito);

    let total_no_efectivo = noncash.total;
    let balance_general = cash_total + total_no_efectivo;
    let diferencia = balance_general - total_facturado_al_contado;

    TotalsSummary {
        cash_total,
        noncash_totals: noncash.by_category,
        total_no_efectivo,
        balance_general,
        total_facturado_al_contado,
        diferencia,
        credito_total,
    }
}
