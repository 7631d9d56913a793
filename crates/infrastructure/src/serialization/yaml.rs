//! YAML deserialization helpers.

use serde::de::DeserializeOwned;

/// Error type for serialization operations.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    /// YAML deserialization failed.
    #[error("YAML deserialization failed: {0}")]
    Deserialize(#[from] serde_yaml::Error),
}

/// Deserializes a value from YAML bytes.
///
/// A leading UTF-8 BOM is ignored.
///
/// # Errors
///
/// Returns an error if the bytes are not valid YAML for `T`.
pub fn from_yaml_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, SerializationError> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    Ok(serde_yaml::from_slice(bytes)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    #[test]
    fn test_from_yaml_bytes_skips_bom() {
        let map: BTreeMap<String, String> = from_yaml_bytes(b"\xEF\xBB\xBFkey: value\n").unwrap();
        assert_eq!(map.get("key").map(String::as_str), Some("value"));
    }

    #[test]
    fn test_from_yaml_bytes_rejects_wrong_shape() {
        let result: Result<BTreeMap<String, String>, _> = from_yaml_bytes(b"- a\n- b\n");
        assert!(matches!(result, Err(SerializationError::Deserialize(_))));
    }
}
