//! Exact scalar values
//!
//! Every value flowing through the attribution models is an arbitrary
//! precision rational. Factorial weights overflow fixed-width integers after
//! twenty touchpoints and floating point sums drift across millions of
//! coalitions, so nothing here ever rounds.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_rational::{BigRational, ParseRatioError};
use num_traits::{ToPrimitive, Zero};

use crate::error::{CoreError, Result};

/// Scalar value of a conversion event or an attribution result
pub type Value = BigRational;

/// Largest decimal exponent accepted by [`parse_value`]
pub const MAX_DECIMAL_EXPONENT: i64 = 4096;

/// The additive identity
pub fn zero() -> Value {
    Value::zero()
}

/// Exact value of an integer
pub fn from_integer(n: i64) -> Value {
    Value::from_integer(BigInt::from(n))
}

/// Exact value of `numer / denom`
pub fn from_ratio(numer: i64, denom: i64) -> Result<Value> {
    if denom == 0 {
        return Err(CoreError::ZeroDenominator(format!("{numer}/{denom}")));
    }
    Ok(Value::new(BigInt::from(numer), BigInt::from(denom)))
}

/// Convert a float through its shortest decimal representation
///
/// `0.1` becomes exactly `1/10`, not the nearest binary fraction.
pub fn from_f64(x: f64) -> Result<Value> {
    if !x.is_finite() {
        return Err(CoreError::NonFinite(x));
    }
    parse_value(&x.to_string())
}

/// Approximate a value as a float, for display and tolerance checks only
pub fn to_f64(value: &Value) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

/// Parse a value from text
///
/// Accepts integers (`"350"`), ratios (`"7/2"`), and decimals with an optional
/// exponent (`"-12.5"`, `"1.5e3"`).
pub fn parse_value(text: &str) -> Result<Value> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(invalid(text, "empty input"));
    }

    match Value::from_str(trimmed) {
        Ok(value) => Ok(value),
        Err(e) if trimmed.contains('/') => Err(ratio_error(text, trimmed, e)),
        Err(_) => parse_decimal(text, trimmed),
    }
}

fn ratio_error(input: &str, trimmed: &str, error: ParseRatioError) -> CoreError {
    let zero_denominator = trimmed
        .split_once('/')
        .and_then(|(_, denom)| denom.parse::<BigInt>().ok())
        .is_some_and(|denom| denom.is_zero());
    if zero_denominator {
        CoreError::ZeroDenominator(input.to_string())
    } else {
        invalid(input, &error.to_string())
    }
}

fn parse_decimal(input: &str, trimmed: &str) -> Result<Value> {
    let decimal = BigDecimal::from_str(trimmed).map_err(|e| invalid(input, &e.to_string()))?;
    let (digits, scale) = decimal.into_bigint_and_exponent();
    if scale.unsigned_abs() > MAX_DECIMAL_EXPONENT.unsigned_abs() {
        return Err(invalid(input, "exponent out of range"));
    }

    let ten = BigInt::from(10u32);
    let power = num_traits::pow(ten, scale.unsigned_abs() as usize);
    Ok(if scale >= 0 {
        Value::new(digits, power)
    } else {
        Value::from_integer(digits * power)
    })
}

fn invalid(input: &str, reason: &str) -> CoreError {
    CoreError::InvalidValue {
        input: input.to_string(),
        reason: reason.to_string(),
    }
}

/// Serde adapter storing a [`Value`] as its exact string form
///
/// Serializes as `"350"` or `"7/2"`. Deserializes from integers, floats,
/// decimal strings and ratio strings. JSON numbers are read from their
/// source text, so integers beyond 64 bits and long decimals stay exact.
///
/// ```
/// use mta_core::Value;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Row {
///     #[serde(with = "mta_core::value::serde_value")]
///     value: Value,
/// }
/// ```
pub mod serde_value {
    use std::fmt;

    use num_bigint::BigInt;
    use serde::de::value::MapAccessDeserializer;
    use serde::de::{self, MapAccess, Visitor};
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{Value, from_f64, from_integer, parse_value};

    pub fn serialize<S: Serializer>(value: &Value, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Value, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }

    struct ValueVisitor;

    impl<'de> Visitor<'de> for ValueVisitor {
        type Value = Value;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a number or a numeric string")
        }

        fn visit_i64<E: de::Error>(self, n: i64) -> Result<Value, E> {
            Ok(from_integer(n))
        }

        fn visit_u64<E: de::Error>(self, n: u64) -> Result<Value, E> {
            Ok(Value::from_integer(BigInt::from(n)))
        }

        fn visit_i128<E: de::Error>(self, n: i128) -> Result<Value, E> {
            Ok(Value::from_integer(BigInt::from(n)))
        }

        fn visit_u128<E: de::Error>(self, n: u128) -> Result<Value, E> {
            Ok(Value::from_integer(BigInt::from(n)))
        }

        fn visit_f64<E: de::Error>(self, x: f64) -> Result<Value, E> {
            from_f64(x).map_err(E::custom)
        }

        fn visit_str<E: de::Error>(self, text: &str) -> Result<Value, E> {
            parse_value(text).map_err(E::custom)
        }

        // serde_json hands numbers outside i64/u64 over as a one-entry map
        // holding their source text
        fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Value, A::Error> {
            let number = serde_json::Number::deserialize(MapAccessDeserializer::new(map))?;
            parse_value(&number.to_string()).map_err(de::Error::custom)
        }
    }
}
