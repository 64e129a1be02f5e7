//! Non-cash total calculation.
//!
//! Two aggregation policies exist in the lineage of this system: the
//! original summed a fixed list of five categories and silently dropped
//! anything else, while a later variant sums every key present. Which one
//! applies changes `total_no_efectivo` (and therefore the balance and the
//! diferencia) for records using non-legacy category names, so the choice
//! is an explicit configuration value rather than a guess.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::amount::parse_amount;

/// The five legacy non-cash categories.
pub const LEGACY_NONCASH_CATEGORIES: [&str; 5] =
    ["cheques", "tarjetas", "vales", "transferencias", "recibos"];

/// How the `noncash` aggregate map is summed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NonCashPolicy {
    /// Sum every key present in the map. The recommended target behavior:
    /// it accommodates categories such as `depositos` and `otros` that the
    /// fixed list drops.
    #[default]
    AllKeys,
    /// Sum only the five legacy categories, reporting each of them (as zero
    /// when missing) and ignoring any other key.
    FixedCategories,
}

/// The per-category totals and their sum.
#[derive(Debug, Clone, PartialEq)]
pub struct NonCashTotals {
    /// Amount per category. Under [`NonCashPolicy::AllKeys`] the keys mirror
    /// the submission; under [`NonCashPolicy::FixedCategories`] they are
    /// exactly the five legacy names.
    pub by_category: BTreeMap<String, Decimal>,
    /// Sum of all category amounts.
    pub total: Decimal,
}

/// Calculates the non-cash totals under the given policy.
///
/// Amounts that fail to parse contribute zero for their category; no entry
/// aborts the calculation.
///
/// # Example
///
/// ```
/// use arqueo_engine::calculation::{calculate_noncash_totals, NonCashPolicy};
/// use rust_decimal::Decimal;
/// use serde_json::json;
/// use std::collections::BTreeMap;
///
/// let noncash: BTreeMap<String, serde_json::Value> = [
///     ("cheques".to_string(), json!(100)),
///     ("otros".to_string(), json!(25)),
/// ]
/// .into_iter()
/// .collect();
///
/// let totals = calculate_noncash_totals(&noncash, NonCashPolicy::AllKeys);
/// assert_eq!(totals.total, Decimal::from(125));
/// ```
pub fn calculate_noncash_totals(
    noncash: &BTreeMap<String, Value>,
    policy: NonCashPolicy,
) -> NonCashTotals {
    let mut by_category = BTreeMap::new();

    match policy {
        NonCashPolicy::AllKeys => {
            for (category, amount) in noncash {
                by_category.insert(category.clone(), parse_amount(amount));
            }
        }
        NonCashPolicy::FixedCategories => {
            for category in LEGACY_NONCASH_CATEGORIES {
                let amount = noncash
                    .get(category)
                    .map(parse_amount)
                    .unwrap_or(Decimal::ZERO);
                by_category.insert(category.to_string(), amount);
            }
        }
    }

    let total = by_category.values().copied().sum();
    NonCashTotals { by_category, total }
}
