//! Cash total calculation.
//!
//! Sums denomination x quantity over the submitted count map. Failure is
//! swallowed per pair: an entry contributes only when both the denomination
//! key and the quantity parse, and a bad pair never affects its neighbours.

use std::collections::BTreeMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;

use super::amount::parse_quantity;

/// Calculates the total cash counted, from a denomination-to-quantity map.
///
/// The map keys are denomination face values ("2000", "25", ...); the values
/// are loosely-typed quantities. Pairs where either side fails to parse are
/// skipped and contribute zero.
///
/// # Example
///
/// ```
/// use arqueo_engine::calculation::calculate_cash_total;
/// use rust_decimal::Decimal;
/// use serde_json::json;
/// use std::collections::BTreeMap;
///
/// let counts: BTreeMap<String, serde_json::Value> = [
///     ("2000".to_string(), json!(2)),
///     ("100".to_string(), json!(1)),
/// ]
/// .into_iter()
/// .collect();
///
/// assert_eq!(calculate_cash_total(&counts), Decimal::from(4100));
/// ```
pub fn calculate_cash_total(counts: &BTreeMap<String, Value>) -> Decimal {
    let mut cash_total = Decimal::ZERO;
    for (denomination, quantity) in counts {
        let denomination = match Decimal::from_str(denomination.trim()) {
            Ok(d) => d,
            Err(_) => continue,
        };
        let quantity = match parse_quantity(quantity) {
            Some(q) => q,
            None => continue,
        };
        cash_total += denomination * Decimal::from(quantity);
    }
    cash_total
}
