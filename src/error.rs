use thiserror::Error;

#[cfg(feature = "rich-errors")]
use miette::Diagnostic;

#[derive(Debug, Error)]
#[cfg_attr(feature = "rich-errors", derive(Diagnostic))]
pub enum Error {
    #[error("Invalid target: {0}")]
    #[cfg_attr(
        feature = "rich-errors",
        diagnostic(
            code(bindfig::invalid_target),
            help("the target must serialize to a JSON object (a struct with named fields)")
        )
    )]
    InvalidTarget(String),

    #[error("{origin} key not found: {key}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(bindfig::not_found)))]
    NotFound { origin: &'static str, key: String },

    #[error("Invalid value {value:?} for '{key}': expected {expected}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(bindfig::parse_error)))]
    ParseError {
        key: String,
        value: String,
        expected: String,
    },

    #[error("Flag source used without parsed arguments; call .matches() on the builder")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(bindfig::no_execution_context)))]
    NoExecutionContext,

    #[error("Malformed config in {origin}: {source}")]
    #[cfg_attr(
        feature = "rich-errors",
        diagnostic(code(bindfig::malformed_config), help("expected a JSON object"))
    )]
    MalformedConfig {
        origin: String,
        source: serde_json::Error,
    },

    #[error("Unknown keys in {origin}: {}", .keys.join(", "))]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(bindfig::unknown_keys)))]
    UnknownKeys { origin: String, keys: Vec<String> },

    #[error("Duplicate tag '{0}' in source registry")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(bindfig::duplicate_tag)))]
    DuplicateTag(String),
}

/// Fieldless mirror of [`Error`], for matching on what went wrong without
/// caring about the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidTarget,
    NotFound,
    ParseError,
    NoExecutionContext,
    MalformedConfig,
    UnknownKeys,
    DuplicateTag,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidTarget(_) => ErrorKind::InvalidTarget,
            Error::NotFound { .. } => ErrorKind::NotFound,
            Error::ParseError { .. } => ErrorKind::ParseError,
            Error::NoExecutionContext => ErrorKind::NoExecutionContext,
            Error::MalformedConfig { .. } => ErrorKind::MalformedConfig,
            Error::UnknownKeys { .. } => ErrorKind::UnknownKeys,
            Error::DuplicateTag(_) => ErrorKind::DuplicateTag,
        }
    }

    /// `true` when a source simply had nothing for the key.
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    pub(crate) fn parse(key: &str, value: &str, expected: impl Into<String>) -> Self {
        Error::ParseError {
            key: key.to_string(),
            value: value.to_string(),
            expected: expected.into(),
        }
    }

    pub(crate) fn malformed(origin: &str, source: serde_json::Error) -> Self {
        Error::MalformedConfig {
            origin: origin.to_string(),
            source,
        }
    }
}
