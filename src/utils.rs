use serde::de::{self, Visitor};
use serde::Deserializer;
use std::fmt;

/// Deserializes an AQI reading that the API sends either as a number or as a
/// string (`"57"`, or `"-"` when the station has no current reading).
///
/// Anything that is not a non-negative integer-like value becomes `None`.
pub fn deserialize_aqi<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    struct AqiVisitor;

    impl<'de> Visitor<'de> for AqiVisitor {
        type Value = Option<u32>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an AQI number, a numeric string, or \"-\"")
        }

        fn visit_u64<E>(self, value: u64) -> Result<Option<u32>, E>
        where
            E: de::Error,
        {
            Ok(u32::try_from(value).ok())
        }

        fn visit_i64<E>(self, value: i64) -> Result<Option<u32>, E>
        where
            E: de::Error,
        {
            Ok(u32::try_from(value).ok())
        }

        fn visit_f64<E>(self, value: f64) -> Result<Option<u32>, E>
        where
            E: de::Error,
        {
            if value.is_finite() && value >= 0.0 && value <= u32::MAX as f64 {
                Ok(Some(value.round() as u32))
            } else {
                Ok(None)
            }
        }

        fn visit_str<E>(self, value: &str) -> Result<Option<u32>, E>
        where
            E: de::Error,
        {
            let trimmed = value.trim();
            if let Ok(n) = trimmed.parse::<u32>() {
                return Ok(Some(n));
            }
            match trimmed.parse::<f64>() {
                Ok(f) => self.visit_f64(f),
                Err(_) => Ok(None),
            }
        }

        fn visit_none<E>(self) -> Result<Option<u32>, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Option<u32>, E>
        where
            E: de::Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(AqiVisitor)
}
