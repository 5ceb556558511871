//! The struct binder: walk a record's fields and fill the tagged ones from
//! the sources in a [`Registry`].
//!
//! Records describe themselves by implementing [`Bind`], visiting each field
//! in declaration order. Scalar fields go through [`Visitor::field`] with their
//! tags; nested records go through [`Visitor::nested`] and are always walked,
//! whatever tags the parent carries. Tags on a nested record's fields belong
//! to that record alone.
//!
//! Per field, every registered source whose tag the field carries is tried in
//! registry order. A successful fetch replaces the field's value outright.
//! A failed one either aborts the walk (`fail_fast`) or is skipped.

use tracing::{debug, trace, warn};

use crate::error::Error;
use crate::field::Field;
use crate::registry::Registry;
use crate::source::fetch;
use crate::types::{BindOptions, FieldKind, Tags, ZeroPolicy, tag_value};

/// A record whose fields can be bound from tagged sources.
///
/// Usually generated with [`bind!`](crate::bind!):
///
/// ```ignore
/// bindfig::bind! {
///     ServerConfig {
///         host => [env = "HOST", flag = "host"],
///         port => [env = "PORT"],
///         database => nested,
///     }
/// }
/// ```
pub trait Bind {
    fn visit(&mut self, visitor: &mut Visitor<'_>) -> Result<(), Error>;
}

/// Walks one record on behalf of [`bind`].
#[derive(Debug)]
pub struct Visitor<'a> {
    registry: &'a Registry<'a>,
    options: BindOptions,
    path: Vec<&'static str>,
}

impl<'a> Visitor<'a> {
    fn new(registry: &'a Registry<'a>, options: BindOptions) -> Self {
        Self {
            registry,
            options,
            path: Vec::new(),
        }
    }

    /// Dotted path of `name` under the record currently being walked.
    fn path_of(&self, name: &str) -> String {
        let mut path = self.path.join(".");
        if !path.is_empty() {
            path.push('.');
        }
        path.push_str(name);
        path
    }

    /// Bind one scalar field from every source its tags name.
    pub fn field<F: Field>(
        &mut self,
        name: &'static str,
        tags: Tags<'_>,
        target: &mut F,
    ) -> Result<(), Error> {
        for (tag, source) in self.registry.iter() {
            let Some(key) = tag_value(tags, tag) else {
                continue;
            };

            let Some(fetched) = fetch(source, F::KIND, key) else {
                if let FieldKind::Unsupported(ty) = F::KIND {
                    warn!(field = %self.path_of(name), ty, "unsupported field type, leaving it untouched");
                }
                continue;
            };

            let result = fetched.and_then(|value| {
                if self.options.zero_policy == ZeroPolicy::SkipZero && value.is_zero() {
                    trace!(field = %self.path_of(name), tag, key, "skipping zero value");
                    return Ok(());
                }
                let raw = value.to_string();
                target
                    .assign(value)
                    .map_err(|expected| Error::parse(key, &raw, expected))
            });

            match result {
                Ok(()) => {}
                Err(err) if self.options.fail_fast => return Err(err),
                Err(err) => {
                    debug!(field = %self.path_of(name), tag, key, error = %err, "source skipped");
                }
            }
        }
        Ok(())
    }

    /// Walk a nested record. Errors from inside it propagate unchanged.
    pub fn nested<B: Bind + ?Sized>(&mut self, name: &'static str, target: &mut B) -> Result<(), Error> {
        self.path.push(name);
        let result = target.visit(self);
        self.path.pop();
        result
    }
}

/// Bind `target`'s tagged fields from the sources in `registry`.
///
/// In lenient mode (`fail_fast == false`) the only way this fails is an error
/// a nested record raises on its own; retrieval failures leave the field at its
/// prior value.
pub fn bind<T: Bind + ?Sized>(
    registry: &Registry<'_>,
    target: &mut T,
    options: BindOptions,
) -> Result<(), Error> {
    let mut visitor = Visitor::new(registry, options);
    target.visit(&mut visitor)
}
