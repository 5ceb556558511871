//! The capability every value source provides: look up a key, hand back a
//! typed value or say why it can't.

use crate::error::Error;
use crate::types::{FieldKind, FieldValue};

/// A source of configuration values reachable by key.
///
/// Only [`get_string`](Source::get_string) is required. The typed getters
/// parse its result strictly, so a present-but-malformed value surfaces as
/// [`Error::ParseError`], never as [`Error::NotFound`].
pub trait Source {
    /// Human-readable name used in errors and logs.
    fn name(&self) -> &'static str;

    fn get_string(&self, key: &str) -> Result<String, Error>;

    fn get_int(&self, key: &str) -> Result<i64, Error> {
        parse_int(key, &self.get_string(key)?)
    }

    fn get_float(&self, key: &str) -> Result<f64, Error> {
        parse_float(key, &self.get_string(key)?)
    }

    fn get_bool(&self, key: &str) -> Result<bool, Error> {
        parse_bool(key, &self.get_string(key)?)
    }

    /// Comma-delimited split of the string form.
    fn get_string_list(&self, key: &str) -> Result<Vec<String>, Error> {
        Ok(split_list(&self.get_string(key)?))
    }
}

/// Fetch `key` from `source` with the getter matching `kind`.
///
/// Returns `None` for [`FieldKind::Unsupported`]; there is nothing to fetch.
pub fn fetch(source: &dyn Source, kind: FieldKind, key: &str) -> Option<Result<FieldValue, Error>> {
    let value = match kind {
        FieldKind::String => source.get_string(key).map(FieldValue::String),
        FieldKind::Int => source.get_int(key).map(FieldValue::Int),
        FieldKind::Float => source.get_float(key).map(FieldValue::Float),
        FieldKind::Bool => source.get_bool(key).map(FieldValue::Bool),
        FieldKind::StringList => source.get_string_list(key).map(FieldValue::StringList),
        FieldKind::Unsupported(_) => return None,
    };
    Some(value)
}

pub fn parse_int(key: &str, raw: &str) -> Result<i64, Error> {
    raw.parse::<i64>()
        .map_err(|_| Error::parse(key, raw, "a 64-bit integer"))
}

pub fn parse_float(key: &str, raw: &str) -> Result<f64, Error> {
    raw.parse::<f64>()
        .map_err(|_| Error::parse(key, raw, "a 64-bit float"))
}

/// Accepts `1 t T TRUE true True` and `0 f F FALSE false False`, nothing else.
pub fn parse_bool(key: &str, raw: &str) -> Result<bool, Error> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(Error::parse(key, raw, "a boolean")),
    }
}

pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',').map(str::to_string).collect()
}
