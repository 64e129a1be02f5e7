//! Defensive numeric coercion for form input.
//!
//! Submissions arrive as hand-filled JSON: quantities may be numbers,
//! numeric strings, blanks, or garbage. The engine's resilience policy is
//! that a field which cannot be parsed contributes zero to its total and
//! never aborts the reconciliation. This module is the single typed home of
//! that policy; nothing else in the crate does ad-hoc numeric coercion.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::str::FromStr;

/// Coerces a loosely-typed JSON value into a monetary amount.
///
/// Numbers and numeric strings (trimmed) parse; null, booleans, arrays,
/// objects, and non-numeric strings yield zero. Never errors.
///
/// # Example
///
/// ```
/// use arqueo_engine::calculation::parse_amount;
/// use rust_decimal::Decimal;
/// use serde_json::json;
/// use std::str::FromStr;
///
/// assert_eq!(parse_amount(&json!(12.5)), Decimal::from_str("12.5").unwrap());
/// assert_eq!(parse_amount(&json!("12.5")), Decimal::from_str("12.5").unwrap());
/// assert_eq!(parse_amount(&json!("garbage")), Decimal::ZERO);
/// assert_eq!(parse_amount(&json!(null)), Decimal::ZERO);
/// ```
pub fn parse_amount(value: &Value) -> Decimal {
    match value {
        Value::Number(n) => Decimal::from_str(&n.to_string()).unwrap_or(Decimal::ZERO),
        Value::String(s) => Decimal::from_str(s.trim()).unwrap_or(Decimal::ZERO),
        _ => Decimal::ZERO,
    }
}

/// Coerces a loosely-typed JSON value into an integer quantity.
///
/// Integers parse directly; floats truncate toward zero; strings parse only
/// as whole numbers. Anything else is `None`, which callers treat as "skip
/// this entry" rather than as an error.
pub fn parse_quantity(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => i64::from_str(s.trim()).ok(),
        _ => None,
    }
}

/// Serde adapter applying [`parse_amount`] during deserialization.
///
/// Used on structured amount fields (`monto`, `starting_fund`) so a bad
/// value deserializes to zero instead of rejecting the whole submission.
pub fn lenient_amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(parse_amount(&value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_amount_accepts_integers_and_floats() {
        assert_eq!(parse_amount(&json!(100)), dec("100"));
        assert_eq!(parse_amount(&json!(12.75)), dec("12.75"));
        assert_eq!(parse_amount(&json!(-3.5)), dec("-3.5"));
    }

    #[test]
    fn test_parse_amount_accepts_numeric_strings() {
        assert_eq!(parse_amount(&json!("100")), dec("100"));
        assert_eq!(parse_amount(&json!("  12.75 ")), dec("12.75"));
    }

    #[test]
    fn test_parse_amount_defaults_to_zero() {
        assert_eq!(parse_amount(&json!("garbage")), Decimal::ZERO);
        assert_eq!(parse_amount(&json!("")), Decimal::ZERO);
        assert_eq!(parse_amount(&json!(null)), Decimal::ZERO);
        assert_eq!(parse_amount(&json!(true)), Decimal::ZERO);
        assert_eq!(parse_amount(&json!([1])), Decimal::ZERO);
        assert_eq!(parse_amount(&json!({"monto": 1})), Decimal::ZERO);
    }

    #[test]
    fn test_parse_quantity_accepts_integers() {
        assert_eq!(parse_quantity(&json!(3)), Some(3));
        assert_eq!(parse_quantity(&json!(0)), Some(0));
        assert_eq!(parse_quantity(&json!(-2)), Some(-2));
    }

    #[test]
    fn test_parse_quantity_truncates_floats() {
        assert_eq!(parse_quantity(&json!(3.9)), Some(3));
        assert_eq!(parse_quantity(&json!(-1.5)), Some(-1));
    }

    #[test]
    fn test_parse_quantity_accepts_whole_number_strings_only() {
        assert_eq!(parse_quantity(&json!("4")), Some(4));
        assert_eq!(parse_quantity(&json!(" 4 ")), Some(4));
        // "3.5" would not survive an integer parse; the entry is skipped.
        assert_eq!(parse_quantity(&json!("3.5")), None);
        assert_eq!(parse_quantity(&json!("x")), None);
    }

    #[test]
    fn test_parse_quantity_rejects_non_numbers() {
        assert_eq!(parse_quantity(&json!(null)), None);
        assert_eq!(parse_quantity(&json!(true)), None);
        assert_eq!(parse_quantity(&json!({})), None);
    }

    #[test]
    fn test_lenient_amount_in_struct() {
        #[derive(Deserialize)]
        struct Wrapper {
            #[serde(default, deserialize_with = "lenient_amount")]
            monto: Decimal,
        }

        let good: Wrapper = serde_json::from_str(r#"{"monto": "7.25"}"#).unwrap();
        assert_eq!(good.monto, dec("7.25"));

        let bad: Wrapper = serde_json::from_str(r#"{"monto": "oops"}"#).unwrap();
        assert_eq!(bad.monto, Decimal::ZERO);

        let missing: Wrapper = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(missing.monto, Decimal::ZERO);
    }
}
