//! Persisted arqueo models.
//!
//! A [`StoredArqueo`] is what comes back from the store: the submitted
//! record, the totals computed at save time, and the identity the store
//! assigned. [`ArqueoSummary`] is the lightweight row used by listings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ShiftRecord, TotalsSummary};

/// A reconciliation record as persisted, with its computed totals.
///
/// Rows are immutable: the engine never updates or deletes an arqueo, and
/// the stored totals are returned as-is on every read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredArqueo {
    /// Server-assigned identity, monotonically increasing.
    pub id: i64,
    /// The submitted shift record.
    #[serde(flatten)]
    pub record: ShiftRecord,
    /// The totals computed when the record was saved.
    pub totals: TotalsSummary,
    /// When the record was saved.
    pub created_at: DateTime<Utc>,
}

/// One row of the most-recent-first arqueo listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArqueoSummary {
    /// Server-assigned identity.
    pub id: i64,
    /// Calendar date of the shift, as entered.
    pub date: String,
    /// Cashier identifier.
    pub cashier: String,
    /// Shift label.
    pub shift: String,
    /// When the record was saved.
    pub created_at: DateTime<Utc>,
}
