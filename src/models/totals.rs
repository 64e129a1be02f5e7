//! Totals summary model for a reconciliation.
//!
//! This module contains the [`TotalsSummary`] type produced by the
//! reconciliation calculator and the [`Outcome`] classification of its
//! `diferencia` field.

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The three possible reconciliation outcomes.
///
/// # Example
///
/// ```
/// use arqueo_engine::models::Outcome;
///
/// assert_eq!(Outcome::Sobra.to_string(), "SOBRA");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Cash on hand exceeds invoiced sales (surplus).
    Sobra,
    /// Cash on hand falls short of invoiced sales.
    Falta,
    /// Cash on hand matches invoiced sales exactly.
    Cuadrado,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Outcome::Sobra => "SOBRA",
            Outcome::Falta => "FALTA",
            Outcome::Cuadrado => "CUADRADO",
        };
        write!(f, "{}", label)
    }
}

/// The totals derived from one [`crate::models::ShiftRecord`].
///
/// A summary is computed once at submission time and stored alongside its
/// source record; it is never recomputed on read.
///
/// Invariants, by construction:
/// - `balance_general == cash_total + total_no_efectivo`
/// - `diferencia == balance_general - total_facturado_al_contado`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalsSummary {
    /// Sum over `counts` of denomination x quantity.
    pub cash_total: Decimal,
    /// Per-category non-cash totals. Which categories appear depends on the
    /// configured [`crate::calculation::NonCashPolicy`].
    pub noncash_totals: BTreeMap<String, Decimal>,
    /// Sum of all non-cash category totals.
    pub total_no_efectivo: Decimal,
    /// Cash plus non-cash.
    pub balance_general: Decimal,
    /// Total invoiced at the point of sale.
    pub total_facturado_al_contado: Decimal,
    /// Signed difference: balance minus invoiced. Positive means surplus.
    pub diferencia: Decimal,
    /// Sum over the credit invoice list.
    pub credito_total: Decimal,
}

impl TotalsSummary {
    /// Classifies `diferencia` as surplus, shortfall, or balanced.
    ///
    /// # Example
    ///
    /// ```
    /// use arqueo_engine::models::{Outcome, TotalsSummary};
    /// use rust_decimal::Decimal;
    /// use std::collections::BTreeMap;
    ///
    /// let totals = TotalsSummary {
    ///     cash_total: Decimal::ZERO,
    ///     noncash_totals: BTreeMap::new(),
    ///     total_no_efectivo: Decimal::ZERO,
    ///     balance_general: Decimal::ZERO,
    ///     total_facturado_al_contado: Decimal::ZERO,
    ///     diferencia: Decimal::ZERO,
    ///     credito_total: Decimal::ZERO,
    /// };
    /// assert_eq!(totals.outcome(), Outcome::Cuadrado);
    /// ```
    pub fn outcome(&self) -> Outcome {
        if self.diferencia > Decimal::ZERO {
            Outcome::Sobra
        } else if self.diferencia < Decimal::ZERO {
            Outcome::Falta
        } else {
            Outcome::Cuadrado
        }
    }
}
