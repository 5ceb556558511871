use std::fmt;

use crate::env::EnvSource;
use crate::error::Error;
use crate::flag::FlagSource;
use crate::source::Source;
use crate::types::{ENV_TAG, FLAG_TAG};

/// Ordered mapping from tag name to the source that serves it.
///
/// The binder consults sources in registration order; when several succeed
/// for one field, the last one wins. Tag names are unique.
#[derive(Default)]
pub struct Registry<'a> {
    entries: Vec<(&'a str, &'a dyn Source)>,
}

impl<'a> Registry<'a> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Register `source` under `tag`. Fails if the tag is already taken.
    pub fn with(mut self, tag: &'a str, source: &'a dyn Source) -> Result<Self, Error> {
        if self.entries.iter().any(|(name, _)| *name == tag) {
            return Err(Error::DuplicateTag(tag.to_string()));
        }
        self.entries.push((tag, source));
        Ok(self)
    }

    /// A registry with only the environment source under `env`.
    pub fn env(env: &'a EnvSource) -> Self {
        Self {
            entries: vec![(ENV_TAG, env)],
        }
    }

    /// A registry with only the flag source under `flag`.
    pub fn flags(flags: &'a FlagSource<'a>) -> Self {
        Self {
            entries: vec![(FLAG_TAG, flags)],
        }
    }

    /// `env` then `flag`, so an explicitly set flag beats the environment.
    pub fn standard(env: &'a EnvSource, flags: &'a FlagSource<'a>) -> Self {
        Self {
            entries: vec![(ENV_TAG, env), (FLAG_TAG, flags)],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a dyn Source)> + '_ {
        self.entries.iter().copied()
    }

    pub fn tags(&self) -> Vec<&'a str> {
        self.entries.iter().map(|(tag, _)| *tag).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Registry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(tag, source)| (tag, source.name())))
            .finish()
    }
}
