//! Unknown-key detection for JSON documents.
//!
//! Uses `serde_ignored` while deserializing the merged document into the
//! target type, capturing every key the type doesn't consume. The caller
//! decides whether those keys are an error or a warning.

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Deserialize `value` into `T`, collecting the dotted paths of ignored keys.
pub fn deserialize_tracking_unknown<T: DeserializeOwned>(
    value: Value,
) -> Result<(T, Vec<String>), serde_json::Error> {
    let mut unknown_keys: Vec<String> = Vec::new();
    let parsed: T = serde_ignored::deserialize(value, |ignored_path| {
        unknown_keys.push(ignored_path.to_string());
    })?;
    Ok((parsed, unknown_keys))
}
