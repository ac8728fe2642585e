//! Tolerant deserialization of optional document attributes.
//!
//! Documents are edited by a separate subsystem, so an attribute may be
//! stored as `null`, or hold a value of an unexpected shape. Such attributes
//! are read as missing instead of failing the whole document.

use serde::{de::IgnoredAny, Deserialize, Deserializer};

/// Stored representation of an attribute.
#[derive(Deserialize)]
#[serde(untagged)]
enum Repr<T> {
    /// Value of the expected shape.
    Known(T),

    /// Value of any other shape.
    Unknown(IgnoredAny),
}

/// Deserializes an attribute, reading `null` or a value of an unexpected
/// shape as [`None`].
pub(crate) fn known<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match Option::<Repr<T>>::deserialize(deserializer)? {
        Some(Repr::Known(v)) => Some(v),
        Some(Repr::Unknown(_)) | None => None,
    })
}

/// Deserializes an attribute, reading `null` or a value of an unexpected
/// shape as the [`Default`] one.
pub(crate) fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    known(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod spec {
    use serde::Deserialize;
    use serde_json::json;

    use crate::domain::listing::FuelType;

    #[derive(Debug, Deserialize)]
    struct Doc {
        #[serde(default, deserialize_with = "super::or_default")]
        flag: bool,

        #[serde(default, deserialize_with = "super::known")]
        fuel: Option<FuelType>,
    }

    fn doc(value: serde_json::Value) -> Doc {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn reads_expected_values() {
        let d = doc(json!({"flag": true, "fuel": "diesel"}));

        assert!(d.flag);
        assert_eq!(d.fuel, Some(FuelType::Diesel));
    }

    #[test]
    fn reads_nulls_as_missing() {
        let d = doc(json!({"flag": null, "fuel": null}));

        assert!(!d.flag);
        assert_eq!(d.fuel, None);

        let d = doc(json!({}));

        assert!(!d.flag);
        assert_eq!(d.fuel, None);
    }

    #[test]
    fn reads_unexpected_shapes_as_missing() {
        let d = doc(json!({"flag": "yes", "fuel": "gasoline"}));

        assert!(!d.flag);
        assert_eq!(d.fuel, None);

        let d = doc(json!({"flag": [1], "fuel": {"name": "petrol"}}));

        assert!(!d.flag);
        assert_eq!(d.fuel, None);
    }
}
