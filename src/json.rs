//! Merge a raw JSON document onto an existing value.
//!
//! The target is serialized to a JSON object, the document is deep-merged over
//! it, and the result is deserialized back into the target. Keys the document
//! leaves out keep their current values, so the document can be as sparse as
//! the caller likes. Keys use the target's own serde names.
//!
//! The target has to survive a trip through JSON on its own: a value that
//! serializes to something it can't deserialize from (a non-finite float
//! becomes `null`) is rejected as [`Error::InvalidTarget`] before anything
//! is merged. Fields with `#[serde(skip)]` never reach the JSON form, so
//! they come back holding their `Default` after any non-empty merge.

use serde::Serialize;
use serde::de::{DeserializeOwned, Error as _};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::Error;
use crate::merge::deep_merge;
use crate::validate::deserialize_tracking_unknown;

/// Merge the JSON object in `raw` onto `target`.
///
/// An empty `raw` is a no-op. `origin` names where the document came from
/// (e.g. `--config`) and is carried into errors. With `strict`, keys the
/// target doesn't know fail with [`Error::UnknownKeys`]; otherwise they are
/// logged and ignored.
///
/// On error, `target` is left unchanged.
pub fn merge_json<T>(raw: &str, origin: &str, target: &mut T, strict: bool) -> Result<(), Error>
where
    T: Serialize + DeserializeOwned,
{
    if raw.is_empty() {
        return Ok(());
    }

    let overlay = match serde_json::from_str::<Value>(raw).map_err(|e| Error::malformed(origin, e))? {
        Value::Object(map) => map,
        other => {
            let found = match other {
                Value::Null => "null",
                Value::Bool(_) => "a boolean",
                Value::Number(_) => "a number",
                Value::String(_) => "a string",
                Value::Array(_) => "an array",
                Value::Object(_) => "an object",
            };
            return Err(Error::malformed(
                origin,
                serde_json::Error::custom(format!("expected a JSON object, found {found}")),
            ));
        }
    };

    let base = match serde_json::to_value(&*target).map_err(|e| Error::InvalidTarget(e.to_string()))? {
        Value::Object(map) => map,
        _ => {
            return Err(Error::InvalidTarget(
                "target does not serialize to a JSON object".into(),
            ));
        }
    };

    serde_json::from_value::<T>(Value::Object(base.clone())).map_err(|e| {
        Error::InvalidTarget(format!("target does not round-trip through JSON: {e}"))
    })?;

    let merged = Value::Object(deep_merge(base, overlay));
    let (parsed, unknown_keys) =
        deserialize_tracking_unknown::<T>(merged).map_err(|e| Error::malformed(origin, e))?;

    if !unknown_keys.is_empty() {
        if strict {
            return Err(Error::UnknownKeys {
                origin: origin.to_string(),
                keys: unknown_keys,
            });
        }
        for key in &unknown_keys {
            warn!(origin, key = %key, "ignoring unknown config key");
        }
    }

    *target = parsed;
    debug!(origin, "merged JSON config");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::fixtures::test::ServiceConfig;
    use serde::Deserialize;

    #[derive(Serialize, Deserialize, Debug, Default)]
    struct WithRuntimeState {
        port: u16,
        #[serde(skip)]
        session_token: String,
    }

    #[derive(Serialize, Deserialize, Debug, Default)]
    struct WithLimit {
        port: u16,
        limit: f64,
    }

    #[test]
    fn empty_input_is_noop() {
        let mut config = ServiceConfig::default();
        merge_json("", "--config", &mut config, true).unwrap();
        assert_eq!(config, ServiceConfig::default());
    }

    #[test]
    fn sparse_document_keeps_other_fields() {
        let mut config = ServiceConfig::default();
        merge_json(r#"{"port": 3000}"#, "--config", &mut config, false).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.name, "service");
    }

    #[test]
    fn nested_object_merges_field_by_field() {
        let mut config = ServiceConfig::default();
        merge_json(
            r#"{"database": {"url": "pg://db"}}"#,
            "--config",
            &mut config,
            false,
        )
        .unwrap();
        assert_eq!(config.database.url.as_deref(), Some("pg://db"));
        assert_eq!(config.database.pool_size, 5);
    }

    #[test]
    fn later_document_overrides_earlier() {
        let mut config = ServiceConfig::default();
        merge_json(r#"{"port": 1000, "name": "a"}"#, "$CONFIG", &mut config, false).unwrap();
        merge_json(r#"{"port": 2000}"#, "--config", &mut config, false).unwrap();
        assert_eq!(config.port, 2000);
        assert_eq!(config.name, "a");
    }

    #[test]
    fn malformed_json_fails() {
        let mut config = ServiceConfig::default();
        let err = merge_json("{", "--config", &mut config, false).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedConfig);
        assert!(err.to_string().contains("--config"));
        assert_eq!(config, ServiceConfig::default());
    }

    #[test]
    fn non_object_document_fails() {
        let mut config = ServiceConfig::default();
        let err = merge_json("[1, 2]", "--config", &mut config, false).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedConfig);
        assert!(err.to_string().contains("an array"));
    }

    #[test]
    fn type_mismatch_fails_and_leaves_target() {
        let mut config = ServiceConfig::default();
        let err = merge_json(r#"{"port": "high"}"#, "--config", &mut config, false).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedConfig);
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn unknown_key_ignored_when_lenient() {
        let mut config = ServiceConfig::default();
        merge_json(r#"{"typo": 1, "port": 3000}"#, "--config", &mut config, false).unwrap();
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn unknown_key_rejected_when_strict() {
        let mut config = ServiceConfig::default();
        let err = merge_json(r#"{"typo": 1, "port": 3000}"#, "--config", &mut config, true)
            .unwrap_err();
        match err {
            Error::UnknownKeys { origin, keys } => {
                assert_eq!(origin, "--config");
                assert_eq!(keys, vec!["typo"]);
            }
            other => panic!("expected UnknownKeys, got {other:?}"),
        }
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn scalar_target_is_invalid() {
        let mut n: i64 = 3;
        let err = merge_json(r#"{"a": 1}"#, "--config", &mut n, false).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidTarget);
        assert_eq!(n, 3);
    }

    #[test]
    fn string_list_replaced_wholesale() {
        let mut config = ServiceConfig {
            tags: vec!["old".into(), "older".into()],
            ..ServiceConfig::default()
        };
        merge_json(r#"{"tags": ["new"]}"#, "--config", &mut config, false).unwrap();
        assert_eq!(config.tags, vec!["new"]);
    }

    #[test]
    fn serde_skipped_field_comes_back_as_default() {
        let mut state = WithRuntimeState {
            port: 1,
            session_token: "abc123".into(),
        };
        merge_json(r#"{"port": 2}"#, "--config", &mut state, false).unwrap();
        assert_eq!(state.port, 2);
        assert_eq!(state.session_token, "");
    }

    #[test]
    fn serde_skipped_field_untouched_by_empty_document() {
        let mut state = WithRuntimeState {
            port: 1,
            session_token: "abc123".into(),
        };
        merge_json("", "--config", &mut state, false).unwrap();
        assert_eq!(state.session_token, "abc123");
    }

    #[test]
    fn non_finite_float_in_target_is_invalid_target() {
        let mut config = WithLimit {
            port: 1,
            limit: f64::INFINITY,
        };
        let err = merge_json(r#"{"port": 2}"#, "--config", &mut config, false).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidTarget);
        assert!(err.to_string().contains("round-trip"));
        assert_eq!(config.port, 1);
        assert!(config.limit.is_infinite());
    }
}
