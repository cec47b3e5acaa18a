use bigdecimal::BigDecimal;
use serde::de::{self, Deserializer, Visitor};
use std::fmt;
use std::str::FromStr;

/// Deserializer for arbitrary-precision integers
/// Accepts a string of decimal digits or an integral JSON number
///
/// Event sources serialize sequence numbers as strings because they outgrow
/// the exact range of a double. Numbers that only exist as an `f64`
/// approximation are rejected instead of silently rounded.
///
/// # Example
/// ```
/// use bigdecimal::BigDecimal;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct MyStruct {
///     #[serde(deserialize_with = "sg_be::utils::serde::bigint")]
///     pub sequence_number: BigDecimal,
/// }
/// ```
pub fn bigint<'de, D>(deserializer: D) -> Result<BigDecimal, D::Error>
where
    D: Deserializer<'de>,
{
    struct BigIntVisitor;

    impl<'de> Visitor<'de> for BigIntVisitor {
        type Value = BigDecimal;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            write!(formatter, "an integer or a string of decimal digits")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(BigDecimal::from(v))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(BigDecimal::from(v))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            if v.fract() != 0.0 {
                return Err(E::custom("expected an integral number"));
            }
            // f64 only represents integers exactly below 2^53
            if v.abs() >= 9_007_199_254_740_992.0 {
                return Err(E::custom(
                    "integer too large for exact representation, send it as a string",
                ));
            }
            Ok(BigDecimal::from(v as i64))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            let digits = v.strip_prefix('-').unwrap_or(v);
            if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
                return Err(E::custom(format!(
                    "expected a string of decimal digits, got '{}'",
                    v
                )));
            }
            BigDecimal::from_str(v).map_err(E::custom)
        }
    }

    deserializer.deserialize_any(BigIntVisitor)
}

#[cfg(test)]
mod tests {
    use bigdecimal::BigDecimal;
    use serde::Deserialize;
    use std::str::FromStr;

    #[derive(Deserialize)]
    struct Wrapper {
        #[serde(deserialize_with = "super::bigint")]
        value: BigDecimal,
    }

    fn parse(json: &str) -> Result<BigDecimal, serde_json::Error> {
        serde_json::from_str::<Wrapper>(json).map(|w| w.value)
    }

    #[test]
    fn test_large_string_is_exact() {
        let value = parse(r#"{"value": "10000000000000000000000001"}"#).unwrap();
        assert_eq!(
            value,
            BigDecimal::from_str("10000000000000000000000001").unwrap()
        );
    }

    #[test]
    fn test_plain_numbers_are_accepted() {
        assert_eq!(parse(r#"{"value": 42}"#).unwrap(), BigDecimal::from(42));
        assert_eq!(parse(r#"{"value": -7}"#).unwrap(), BigDecimal::from(-7));
    }

    #[test]
    fn test_fractional_number_is_rejected() {
        assert!(parse(r#"{"value": 12.5}"#).is_err());
    }

    #[test]
    fn test_oversized_number_literal_is_rejected() {
        // Beyond 2^53 the JSON number only arrives as an approximation
        assert!(parse(r#"{"value": 10000000000000000000000001}"#).is_err());
    }

    #[test]
    fn test_non_digit_string_is_rejected() {
        assert!(parse(r#"{"value": "12a"}"#).is_err());
        assert!(parse(r#"{"value": ""}"#).is_err());
        assert!(parse(r#"{"value": "1.5"}"#).is_err());
    }
}
