//! Invoice total calculation.
//!
//! Covers both sides of the invoicing data: the point-of-sale total from
//! the dual-shape `fact_contado` field, and the credit invoice total from
//! the `fact_credito` list.

use rust_decimal::Decimal;

use crate::models::{CreditInvoice, FactContado};

/// Calculates the total invoiced at the point of sale.
///
/// The typed shape sums the `monto` of every kind present; the legacy shape
/// uses its single amount directly; absent data contributes zero.
///
/// # Example
///
/// ```
/// use arqueo_engine::calculation::calculate_contado_total;
/// use arqueo_engine::models::FactContado;
/// use rust_decimal::Decimal;
/// use serde_json::json;
///
/// let legacy = FactContado::from_value(&json!({"desde": "1", "hasta": "50", "monto": 500.0}));
/// assert_eq!(calculate_contado_total(&legacy), Decimal::from(500));
/// ```
pub fn calculate_contado_total(fact_contado: &FactContado) -> Decimal {
    match fact_contado {
        FactContado::Typed { ranges } => ranges.values().map(|r| r.monto).sum(),
        FactContado::Legacy { range } => range.monto,
        FactContado::Absent => Decimal::ZERO,
    }
}

/// Calculates the total of the credit invoice list.
///
/// Entries with unparseable amounts already deserialized to zero, so they
/// are summed without any further handling.
pub fn calculate_credito_total(fact_credito: &[CreditInvoice]) -> Decimal {
    fact_credito.iter().map(|invoice| invoice.monto).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_typed_shape_sums_present_kinds() {
        let fc = FactContado::from_value(&json!({
            "consumidor_final": {"desde": "1", "hasta": "40", "monto": 350.0},
            "consumidor_fiscal": {"desde": "41", "hasta": "45", "monto": 120.0},
            "recibos": {"desde": "900", "hasta": "905", "monto": 30.0}
        }));
        assert_eq!(calculate_contado_total(&fc), dec("500"));
    }

    #[test]
    fn test_legacy_and_typed_shapes_agree_on_same_amount() {
        let legacy = FactContado::from_value(&json!({
            "desde": "1", "hasta": "50", "monto": 500.0
        }));
        let typed = FactContado::from_value(&json!({
            "consumidor_final": {"desde": "1", "hasta": "50", "monto": 500.0}
        }));

        assert_eq!(calculate_contado_total(&legacy), dec("500"));
        assert_eq!(calculate_contado_total(&typed), dec("500"));
    }

    #[test]
    fn test_absent_contributes_zero() {
        assert_eq!(calculate_contado_total(&FactContado::Absent), Decimal::ZERO);
    }

    #[test]
    fn test_typed_shape_with_missing_kinds_sums_the_rest() {
        let fc = FactContado::from_value(&json!({
            "recibos": {"desde": "1", "hasta": "3", "monto": 45.5}
        }));
        assert_eq!(calculate_contado_total(&fc), dec("45.5"));
    }

    #[test]
    fn test_credito_total_sums_entries() {
        let invoices = vec![
            CreditInvoice {
                tipo: "fiscal".to_string(),
                numero: "A-1".to_string(),
                monto: dec("100"),
            },
            CreditInvoice {
                tipo: "final".to_string(),
                numero: "A-2".to_string(),
                monto: dec("50.25"),
            },
        ];
        assert_eq!(calculate_credito_total(&invoices), dec("150.25"));
    }

    #[test]
    fn test_credito_total_of_empty_list_is_zero() {
        assert_eq!(calculate_credito_total(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_credito_entry_with_bad_monto_contributes_zero() {
        // Coercion happens at deserialization; the bad entry lands as zero
        // and does not disturb its neighbours.
        let invoices: Vec<CreditInvoice> = serde_json::from_value(json!([
            {"tipo": "fiscal", "numero": "A-1", "monto": "oops"},
            {"tipo": "final", "numero": "A-2", "monto": 80}
        ]))
        .unwrap();
        assert_eq!(calculate_credito_total(&invoices), dec("80"));
    }
}
