//! Lenient deserializers for the platform's loosely typed JSON

use serde::de::{self, Visitor};
use serde::Deserializer;
use std::fmt;

/// Identifiers arrive either as strings or as integers; keep them as strings.
pub fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct IdVisitor;

    impl<'de> Visitor<'de> for IdVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or integer identifier")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }
    }

    deserializer.deserialize_any(IdVisitor)
}

/// Prices are numbers, strings, or null depending on the endpoint.
pub fn deserialize_price<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct PriceVisitor;

    impl<'de> Visitor<'de> for PriceVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a number, a string or null")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(String::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(String::new())
        }
    }

    deserializer.deserialize_any(PriceVisitor)
}

/// Numeric identifiers that sometimes arrive quoted, e.g. taxonomy ids.
pub fn deserialize_numeric_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    struct NumericIdVisitor;

    impl<'de> Visitor<'de> for NumericIdVisitor {
        type Value = i64;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an integer or a string holding one")
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value)
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            i64::try_from(value).map_err(|_| E::custom(format!("id {} out of range", value)))
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            value
                .trim()
                .parse()
                .map_err(|_| E::invalid_value(de::Unexpected::Str(value), &self))
        }
    }

    deserializer.deserialize_any(NumericIdVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(deserialize_with = "deserialize_id")]
        id: String,
        #[serde(default, deserialize_with = "deserialize_price")]
        price: String,
    }

    #[test]
    fn test_id_and_price_accept_numbers_and_strings() {
        let p: Probe = serde_json::from_str(r#"{"id": 42, "price": 19.5}"#).unwrap();
        assert_eq!(p.id, "42");
        assert_eq!(p.price, "19.5");

        let p: Probe = serde_json::from_str(r#"{"id": "abc", "price": "$10.00"}"#).unwrap();
        assert_eq!(p.id, "abc");
        assert_eq!(p.price, "$10.00");

        let p: Probe = serde_json::from_str(r#"{"id": 7, "price": null}"#).unwrap();
        assert_eq!(p.price, "");

        let p: Probe = serde_json::from_str(r#"{"id": 7}"#).unwrap();
        assert_eq!(p.price, "");
    }

    #[derive(Deserialize)]
    struct NumericProbe {
        #[serde(deserialize_with = "deserialize_numeric_id")]
        id: i64,
    }

    #[test]
    fn test_numeric_id_accepts_quoted_integers() {
        let n: NumericProbe = serde_json::from_str(r#"{"id": 12}"#).unwrap();
        assert_eq!(n.id, 12);

        let n: NumericProbe = serde_json::from_str(r#"{"id": "12"}"#).unwrap();
        assert_eq!(n.id, 12);

        assert!(serde_json::from_str::<NumericProbe>(r#"{"id": "shoes"}"#).is_err());
    }
}
