//! Field deserializers for request DTOs.

use std::fmt;

use serde::de::{self, Deserializer, Visitor};

/// Accepts a JSON number or a string holding one, e.g. `2`, `2.5` or `"2.5"`.
///
/// Use with `#[serde(deserialize_with = "service_kit::de::lax_f64")]`.
pub fn lax_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(LaxF64Visitor)
}

struct LaxF64Visitor;

impl<'de> Visitor<'de> for LaxF64Visitor {
    type Value = f64;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a number or a string containing a number")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
        Ok(v)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
        Ok(v as f64)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
        Ok(v as f64)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
        v.trim()
            .parse()
            .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Value {
        #[serde(deserialize_with = "lax_f64")]
        v: f64,
    }

    fn parse(json: &str) -> Result<f64, serde_json::Error> {
        serde_json::from_str::<Value>(json).map(|value| value.v)
    }

    #[test]
    fn test_numbers_and_numeric_strings_are_accepted() {
        assert_eq!(parse(r#"{"v": 2}"#).unwrap(), 2.0);
        assert_eq!(parse(r#"{"v": -3}"#).unwrap(), -3.0);
        assert_eq!(parse(r#"{"v": 2.5}"#).unwrap(), 2.5);
        assert_eq!(parse(r#"{"v": "2"}"#).unwrap(), 2.0);
        assert_eq!(parse(r#"{"v": " 0.5 "}"#).unwrap(), 0.5);
    }

    #[test]
    fn test_other_inputs_are_rejected() {
        assert!(parse(r#"{"v": "x"}"#).is_err());
        assert!(parse(r#"{"v": true}"#).is_err());
        assert!(parse(r#"{"v": null}"#).is_err());
        assert!(parse(r#"{"v": [1]}"#).is_err());
    }
}
