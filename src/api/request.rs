//! Request types for the arqueo engine API.
//!
//! This module defines the JSON request structure for the `/save` and
//! `/report` endpoints and its conversion into the domain record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::calculation::parse_amount;
use crate::models::{CreditInvoice, FactContado, NonCashEntry, ShiftRecord};

/// Request body for the `/save` and `/report` endpoints.
///
/// Everything beyond the three identifying fields is optional, and the
/// numeric fields are loosely typed: a bad amount coerces to zero during
/// conversion instead of rejecting the submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArqueoRequest {
    /// Calendar date of the shift.
    pub date: String,
    /// Cashier identifier.
    pub cashier: String,
    /// Shift label.
    pub shift: String,
    /// Opening cash float.
    #[serde(default)]
    pub starting_fund: Value,
    /// Denomination counts, face value to quantity.
    #[serde(default)]
    pub counts: BTreeMap<String, Value>,
    /// Non-cash aggregates, category to amount.
    #[serde(default)]
    pub noncash: BTreeMap<String, Value>,
    /// Itemized non-cash entries.
    #[serde(default)]
    pub noncash_list: Vec<NonCashEntry>,
    /// Point-of-sale invoicing data, in either historical shape.
    #[serde(default)]
    pub fact_contado: Value,
    /// Credit invoices issued during the shift.
    #[serde(default)]
    pub fact_credito: Vec<CreditInvoice>,
}

impl From<ArqueoRequest> for ShiftRecord {
    fn from(req: ArqueoRequest) -> Self {
        ShiftRecord {
            date: req.date,
            cashier: req.cashier,
            shift: req.shift,
            starting_fund: parse_amount(&req.starting_fund),
            counts: req.counts,
            noncash: req.noncash,
            noncash_list: req.noncash_list,
            fact_contado: FactContado::from_value(&req.fact_contado),
            fact_credito: req.fact_credito,
        }
    }
}
