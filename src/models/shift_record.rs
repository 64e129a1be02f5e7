//! Shift record model and related types.
//!
//! This module defines the [`ShiftRecord`] submitted at the end of a cash
//! register shift, together with the invoice types attached to it. Count and
//! amount fields arrive as loosely-structured JSON and are kept loosely typed
//! here; the calculation module applies the defensive coercion rules.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::calculation::parse_amount;

/// The recognized cash denominations, largest first.
///
/// Form clients render one count field per denomination. The calculator
/// itself accepts any numeric key, so records submitted by older clients
/// with unusual denominations still total correctly.
pub const DENOMINATIONS: [u32; 10] = [2000, 1000, 500, 200, 100, 50, 25, 10, 5, 1];

/// One itemized non-cash entry (a single cheque, card slip, voucher, ...).
///
/// The per-category sum of these entries usually matches the corresponding
/// `noncash` aggregate, but the engine does not enforce that: the list is
/// detail for the printed report, not an input to the totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NonCashEntry {
    /// The category of the entry (e.g. "cheques", "tarjetas").
    pub tipo: String,
    /// The amount of the entry. Unparseable input deserializes to zero.
    #[serde(default, deserialize_with = "crate::calculation::lenient_amount")]
    pub monto: Decimal,
    /// Optional free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
}

/// One credit invoice issued during the shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditInvoice {
    /// The invoice type label.
    #[serde(default)]
    pub tipo: String,
    /// The invoice number.
    #[serde(default)]
    pub numero: String,
    /// The invoice amount. Unparseable input deserializes to zero.
    #[serde(default, deserialize_with = "crate::calculation::lenient_amount")]
    pub monto: Decimal,
}

/// A range of point-of-sale invoice numbers and its total amount.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InvoiceRange {
    /// First invoice number in the range.
    #[serde(default)]
    pub desde: String,
    /// Last invoice number in the range.
    #[serde(default)]
    pub hasta: String,
    /// Total amount invoiced over the range.
    #[serde(default, deserialize_with = "crate::calculation::lenient_amount")]
    pub monto: Decimal,
}

/// The recognized point-of-sale invoice kinds in the current record shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceKind {
    /// Final-consumer invoices.
    ConsumidorFinal,
    /// Fiscal-consumer invoices.
    ConsumidorFiscal,
    /// Receipts.
    Recibos,
}

impl InvoiceKind {
    /// All kinds, in the order they appear on the form and the report.
    pub const ALL: [InvoiceKind; 3] = [
        InvoiceKind::ConsumidorFinal,
        InvoiceKind::ConsumidorFiscal,
        InvoiceKind::Recibos,
    ];

    /// The JSON key for this kind.
    pub fn key(&self) -> &'static str {
        match self {
            InvoiceKind::ConsumidorFinal => "consumidor_final",
            InvoiceKind::ConsumidorFiscal => "consumidor_fiscal",
            InvoiceKind::Recibos => "recibos",
        }
    }

    /// Human-readable label used on the printed report.
    pub fn label(&self) -> &'static str {
        match self {
            InvoiceKind::ConsumidorFinal => "Consumidor Final",
            InvoiceKind::ConsumidorFiscal => "Consumidor Fiscal",
            InvoiceKind::Recibos => "Recibos",
        }
    }
}

/// Point-of-sale invoicing data in either of its two historical shapes.
///
/// Records saved before the per-kind breakdown was introduced carry a single
/// `{desde, hasta, monto}` object. Current records carry one range per
/// [`InvoiceKind`]. Old persisted records are never migrated, so both shapes
/// are accepted indefinitely.
///
/// Parse precedence: if any recognized kind key is present the record is
/// [`FactContado::Typed`] and a stray legacy `monto` key is ignored; a legacy
/// `monto` key only wins when none of the kind keys exist.
///
/// Serde goes through the loose wire format in both directions: a `Typed`
/// value serializes as `{"consumidor_final": {...}, ...}`, a `Legacy` value
/// as a bare `{desde, hasta, monto}` object, and `Absent` as null, so stored
/// documents look exactly like submissions.
#[derive(Debug, Clone, PartialEq)]
pub enum FactContado {
    /// Current shape: one invoice range per kind that was used in the shift.
    Typed {
        /// The ranges, keyed by invoice kind.
        ranges: BTreeMap<InvoiceKind, InvoiceRange>,
    },
    /// Legacy shape: a single invoice range for the whole shift.
    Legacy {
        /// The single range.
        range: InvoiceRange,
    },
    /// No point-of-sale invoicing data was submitted.
    Absent,
}

impl FactContado {
    /// Parses the loosely-structured `fact_contado` field of a submission.
    ///
    /// Anything that is not a JSON object (null, arrays, scalars) parses as
    /// [`FactContado::Absent`]; a malformed field must not abort the
    /// reconciliation.
    ///
    /// # Example
    ///
    /// ```
    /// use arqueo_engine::models::FactContado;
    /// use serde_json::json;
    ///
    /// let legacy = FactContado::from_value(&json!({
    ///     "desde": "1", "hasta": "50", "monto": 500.0
    /// }));
    /// assert!(matches!(legacy, FactContado::Legacy { .. }));
    /// ```
    pub fn from_value(value: &Value) -> Self {
        let map = match value.as_object() {
            Some(map) => map,
            None => return FactContado::Absent,
        };

        let mut ranges = BTreeMap::new();
        for kind in InvoiceKind::ALL {
            if let Some(entry) = map.get(kind.key()) {
                ranges.insert(kind, parse_range(entry));
            }
        }
        if !ranges.is_empty() {
            return FactContado::Typed { ranges };
        }

        if map.contains_key("monto") {
            return FactContado::Legacy {
                range: parse_range(value),
            };
        }

        FactContado::Absent
    }
}

impl Serialize for FactContado {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            FactContado::Typed { ranges } => {
                let mut map = serializer.serialize_map(Some(ranges.len()))?;
                for (kind, range) in ranges {
                    map.serialize_entry(kind.key(), range)?;
                }
                map.end()
            }
            FactContado::Legacy { range } => range.serialize(serializer),
            FactContado::Absent => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for FactContado {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(FactContado::from_value(&value))
    }
}

/// Parses a `{desde, hasta, monto}` object, coercing missing or malformed
/// pieces to their defaults.
fn parse_range(value: &Value) -> InvoiceRange {
    let map = match value.as_object() {
        Some(map) => map,
        None => return InvoiceRange::default(),
    };
    InvoiceRange {
        desde: string_field(map.get("desde")),
        hasta: string_field(map.get("hasta")),
        monto: map.get("monto").map(parse_amount).unwrap_or(Decimal::ZERO),
    }
}

fn string_field(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// A submitted end-of-shift reconciliation record.
///
/// The count and aggregate maps stay loosely typed (`serde_json::Value`)
/// because submissions arrive as hand-filled form data: a single bad field
/// must not abort the whole reconciliation. The calculation module applies
/// the per-entry coercion rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftRecord {
    /// Calendar date of the shift, as entered.
    pub date: String,
    /// Cashier identifier, free text.
    pub cashier: String,
    /// Shift label, free text.
    pub shift: String,
    /// Opening cash float.
    #[serde(default, deserialize_with = "crate::calculation::lenient_amount")]
    pub starting_fund: Decimal,
    /// Denomination counts: face-value key to quantity.
    #[serde(default)]
    pub counts: BTreeMap<String, Value>,
    /// Non-cash aggregates: category name to amount. The key set is open;
    /// see [`crate::calculation::NonCashPolicy`] for how it is summed.
    #[serde(default)]
    pub noncash: BTreeMap<String, Value>,
    /// Itemized non-cash entries, in submission order.
    #[serde(default)]
    pub noncash_list: Vec<NonCashEntry>,
    /// Point-of-sale invoicing data.
    #[serde(default = "absent")]
    pub fact_contado: FactContado,
    /// Credit invoices issued during the shift, in submission order.
    #[serde(default)]
    pub fact_credito: Vec<CreditInvoice>,
}

fn absent() -> FactContado {
    FactContado::Absent
}
