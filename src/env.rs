use std::collections::HashMap;

use tracing::warn;

use crate::error::Error;
use crate::source::Source;

/// Reads values from environment variables, keyed by exact variable name.
///
/// Lookups are case-sensitive. A variable set to `""` is found with an empty
/// value; only an unset variable is [`Error::NotFound`].
///
/// [`EnvSource::from_vars`] takes synthetic pairs so tests don't have to touch
/// the process environment.
#[derive(Debug, Clone, Default)]
pub struct EnvSource {
    vars: Option<HashMap<String, String>>,
}

impl EnvSource {
    /// Read from the live process environment.
    pub fn new() -> Self {
        Self { vars: None }
    }

    /// Read from a fixed set of variables instead of the process environment.
    pub fn from_vars(vars: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            vars: Some(vars.into_iter().collect()),
        }
    }

    fn not_found(&self, key: &str) -> Error {
        Error::NotFound {
            origin: self.name(),
            key: key.to_string(),
        }
    }
}

impl Source for EnvSource {
    fn name(&self) -> &'static str {
        "environment"
    }

    fn get_string(&self, key: &str) -> Result<String, Error> {
        if key != key.to_uppercase() {
            warn!(key, "environment variable name is not upper case");
        }

        match &self.vars {
            Some(vars) => vars.get(key).cloned().ok_or_else(|| self.not_found(key)),
            None => match std::env::var(key) {
                Ok(value) => Ok(value),
                Err(std::env::VarError::NotPresent) => Err(self.not_found(key)),
                Err(std::env::VarError::NotUnicode(raw)) => Err(Error::parse(
                    key,
                    &raw.to_string_lossy(),
                    "a UTF-8 string",
                )),
            },
        }
    }
}
