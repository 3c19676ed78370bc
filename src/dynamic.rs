//! Shape-checked conversions from untyped [`serde_json::Value`]s.
//!
//! Typed code builds [`Slice`] and [`Mapping`] directly; these conversions are
//! only meant for data that arrives without a static type, such as a decoded
//! request body.

use std::hash::{BuildHasher, Hash};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{Error, Kind, Mapping, Result, Slice};

impl Kind {
    /// Classifies an untyped value.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use sugared::Kind;
    ///
    /// assert_eq!(Kind::of(&json!([1, 2])), Kind::Sequence);
    /// assert_eq!(Kind::of(&json!({"a": 1})), Kind::Mapping);
    /// ```
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Number(_) => Kind::Number,
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Sequence,
            Value::Object(_) => Kind::Mapping,
        }
    }
}

fn expect_kind(value: &Value, expected: Kind) -> Result<()> {
    let actual = Kind::of(value);
    if actual == expected {
        Ok(())
    } else {
        Err(Error::InvalidInputKind { expected, actual })
    }
}

impl<T: DeserializeOwned> Slice<T> {
    /// Builds a sequence from an untyped array.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidInputKind`] if `value` is not an array.
    /// - [`Error::Decode`] if an element cannot be deserialized into `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use sugared::{Error, Kind, Slice};
    ///
    /// let nums = Slice::<u8>::from_value(json!([1, 2, 3]))?;
    /// assert_eq!(nums, [1, 2, 3]);
    ///
    /// assert!(matches!(
    ///     Slice::<u8>::from_value(json!({"a": 1})),
    ///     Err(Error::InvalidInputKind { expected: Kind::Sequence, actual: Kind::Mapping }),
    /// ));
    /// # Ok::<_, Error>(())
    /// ```
    pub fn from_value(value: Value) -> Result<Self> {
        expect_kind(&value, Kind::Sequence)?;
        let elements: Vec<T> = serde_json::from_value(value)?;
        Ok(Self::from(elements))
    }
}

impl<T: DeserializeOwned> TryFrom<Value> for Slice<T> {
    type Error = Error;

    #[inline]
    fn try_from(value: Value) -> Result<Self> {
        Self::from_value(value)
    }
}

impl<K, V, S> Mapping<K, V, S>
where
    K: DeserializeOwned + Eq + Hash,
    V: DeserializeOwned,
    S: BuildHasher + Default,
{
    /// Builds a mapping from an untyped object.
    ///
    /// Keys are decoded from the object's string keys, so numeric key types work too.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidInputKind`] if `value` is not an object.
    /// - [`Error::Decode`] if a key or value cannot be deserialized.
    pub fn from_value(value: Value) -> Result<Self> {
        expect_kind(&value, Kind::Mapping)?;
        let map: std::collections::HashMap<K, V, S> = serde_json::from_value(value)?;
        Ok(Self::from(map))
    }
}

impl<K, V, S> TryFrom<Value> for Mapping<K, V, S>
where
    K: DeserializeOwned + Eq + Hash,
    V: DeserializeOwned,
    S: BuildHasher + Default,
{
    type Error = Error;

    #[inline]
    fn try_from(value: Value) -> Result<Self> {
        Self::from_value(value)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn kinds() {
        assert_eq!(Kind::of(&json!(null)), Kind::Null);
        assert_eq!(Kind::of(&json!(true)), Kind::Bool);
        assert_eq!(Kind::of(&json!(1.5)), Kind::Number);
        assert_eq!(Kind::of(&json!("x")), Kind::String);
    }

    #[test]
    fn slice_from_array() {
        let slice = Slice::<String>::try_from(json!(["a", "b"])).ok();
        assert_eq!(slice, Some(Slice::from(["a".to_string(), "b".to_string()])));
    }

    #[test]
    fn slice_rejects_other_kinds() {
        for (value, actual) in [
            (json!({"a": 1}), Kind::Mapping),
            (json!("abc"), Kind::String),
            (json!(null), Kind::Null),
        ] {
            assert!(matches!(
                Slice::<i32>::from_value(value),
                Err(Error::InvalidInputKind { expected: Kind::Sequence, actual: got }) if got == actual
            ));
        }
    }

    #[test]
    fn slice_element_mismatch_is_decode_error() {
        assert!(matches!(
            Slice::<i32>::from_value(json!([1, "two"])),
            Err(Error::Decode(_))
        ));
    }

    #[test]
    fn mapping_from_object() {
        let mapping = match Mapping::<u32, String>::from_value(json!({"1": "one", "2": "two"})) {
            Ok(mapping) => mapping,
            Err(e) => panic!("conversion failed: {e}"),
        };
        assert_eq!(mapping.get(&1).map(String::as_str), Some("one"));
        assert_eq!(mapping.len(), 2);
    }

    #[test]
    fn mapping_rejects_arrays() {
        assert!(matches!(
            Mapping::<String, i32>::try_from(json!([1, 2])),
            Err(Error::InvalidInputKind {
                expected: Kind::Mapping,
                actual: Kind::Sequence
            })
        ));
    }
}
