use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Deserializer};
use std::str::FromStr;

use super::ValidationError;

/// Largest single amount the ledger accepts. Far below `Decimal::MAX`, so a
/// total over billions of maximal entries still fits.
pub const MAX_AMOUNT: Decimal = dec!(1000000000000000000);

/// Format an amount with exactly two decimals, rounding half away from zero.
/// Stored and summed values keep full precision; only display rounds.
/// Example: 50 -> "50.00", 10.125 -> "10.13", -12.3 -> "-12.30"
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    // -0.001 rounds to a negative zero
    let rounded = if rounded.is_zero() { Decimal::ZERO } else { rounded };
    format!("{rounded:.2}")
}

/// Parse a non-negative decimal amount.
/// Accepts plain ("50", "12.5", ".75") and scientific ("1e16", "2.5E-3") notation.
pub fn parse_amount(input: &str) -> Result<Decimal, ValidationError> {
    let input = input.trim();
    let invalid = || ValidationError::InvalidAmount(input.to_string());

    if input.is_empty() || input == "." {
        return Err(invalid());
    }

    let parsed = if input.contains(['e', 'E']) {
        Decimal::from_scientific(input)
    } else {
        Decimal::from_str(input)
    };

    match parsed {
        Ok(value) => check_amount(value, input),
        // Numeric, but outside what a Decimal can hold
        Err(_) => match input.parse::<f64>() {
            Ok(f) if f.is_finite() && f < 0.0 => Err(ValidationError::NegativeAmount),
            Ok(f) if f.is_finite() && f >= 1.0 => {
                Err(ValidationError::AmountTooLarge(input.to_string()))
            }
            // Smaller than the finest Decimal scale
            Ok(f) if f.is_finite() => Ok(Decimal::ZERO),
            _ => Err(invalid()),
        },
    }
}

/// Coerce a loosely-typed JSON amount (number or numeric string).
pub fn amount_from_json(value: &serde_json::Value) -> Result<Decimal, ValidationError> {
    match value {
        serde_json::Value::Number(n) => match (n.as_u64(), n.as_i64()) {
            (Some(u), _) => check_amount(Decimal::from(u), &n.to_string()),
            (None, Some(_)) => Err(ValidationError::NegativeAmount),
            // Floats print in their shortest round-trip form, so the decimal
            // parse recovers exactly the digits the client sent
            (None, None) => parse_amount(&n.to_string()),
        },
        serde_json::Value::String(s) => parse_amount(s),
        other => Err(ValidationError::InvalidAmount(other.to_string())),
    }
}

fn check_amount(value: Decimal, input: &str) -> Result<Decimal, ValidationError> {
    if value.is_zero() {
        return Ok(Decimal::ZERO);
    }
    if value.is_sign_negative() {
        return Err(ValidationError::NegativeAmount);
    }
    if value > MAX_AMOUNT {
        return Err(ValidationError::AmountTooLarge(input.to_string()));
    }
    Ok(value)
}

pub fn deserialize_amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    amount_from_json(&value).map_err(serde::de::Error::custom)
}
