use std::fmt;

/// Tag name that routes a field to the environment source.
pub const ENV_TAG: &str = "env";

/// Tag name that routes a field to the command-line flag source.
pub const FLAG_TAG: &str = "flag";

/// Tag value that opts a field out of a source.
pub const SKIP_TAG: &str = "-";

/// Per-field tags as `(tag name, lookup key)` pairs, e.g.
/// `&[("env", "PORT"), ("flag", "port")]`.
pub type Tags<'a> = &'a [(&'a str, &'a str)];

/// The closed set of field shapes the binder knows how to fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Int,
    Float,
    Bool,
    StringList,
    /// A type with no coercion path. Tagged fields of this kind are left untouched.
    Unsupported(&'static str),
}

/// A value fetched from a source and coerced to the field's kind.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    StringList(Vec<String>),
}

impl FieldValue {
    /// `true` for `""`, `0`, `0.0`, `false`, and the empty list.
    pub fn is_zero(&self) -> bool {
        match self {
            FieldValue::String(s) => s.is_empty(),
            FieldValue::Int(i) => *i == 0,
            FieldValue::Float(f) => *f == 0.0,
            FieldValue::Bool(b) => !b,
            FieldValue::StringList(items) => items.is_empty(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{s}"),
            FieldValue::Int(i) => write!(f, "{i}"),
            FieldValue::Float(v) => write!(f, "{v}"),
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::StringList(items) => write!(f, "{}", items.join(",")),
        }
    }
}

/// What to do when a source successfully returns a zero-equivalent value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ZeroPolicy {
    /// Assign every successfully fetched value, zero or not.
    #[default]
    Always,
    /// Keep the field's prior value when the fetched value is zero-equivalent.
    /// Legacy compatibility mode: `false` and `0` can never be set from a source.
    SkipZero,
}

/// Knobs for a single binder pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BindOptions {
    /// Abort on the first retrieval or coercion error instead of skipping the field.
    pub fail_fast: bool,
    pub zero_policy: ZeroPolicy,
}

impl BindOptions {
    pub fn lenient() -> Self {
        Self::default()
    }

    pub fn fail_fast() -> Self {
        Self {
            fail_fast: true,
            ..Self::default()
        }
    }

    pub fn with_zero_policy(mut self, policy: ZeroPolicy) -> Self {
        self.zero_policy = policy;
        self
    }
}

/// Find the lookup key a field declares for `tag_name`.
///
/// Empty values and [`SKIP_TAG`] mean the field is not bound by that source.
pub fn tag_value<'a>(tags: Tags<'a>, tag_name: &str) -> Option<&'a str> {
    tags.iter()
        .find(|(name, _)| *name == tag_name)
        .map(|(_, key)| *key)
        .filter(|key| !key.is_empty() && *key != SKIP_TAG)
}
