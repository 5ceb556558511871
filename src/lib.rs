//! Fill a struct from a JSON blob, environment variables, and command-line
//! flags, with per-field tags naming the key each source uses.
//!
//! ```ignore
//! #[derive(Serialize, Deserialize, Default)]
//! struct AppConfig {
//!     host: String,
//!     port: u16,
//!     database: DbConfig,
//! }
//!
//! bindfig::bind! {
//!     AppConfig {
//!         host => [env = "APP_HOST", flag = "host"],
//!         port => [env = "APP_PORT", flag = "port"],
//!         database => nested,
//!     }
//! }
//!
//! let matches = bindfig::register(Command::new("app")).get_matches();
//! let mut config = AppConfig::default();
//! bindfig::load(&matches, &mut config)?;
//! ```
//!
//! # Layer precedence
//!
//! ```text
//! Caller's initial value   whatever the struct held before loading
//!        ↑ overridden by
//! JSON                      $CONFIG, then --config (object merged onto the struct)
//!        ↑ overridden by
//! Environment vars          fields tagged env = "NAME"
//!        ↑ overridden by
//! Flags                     fields tagged flag = "id", only when typed by the user
//! ```
//!
//! Every layer is sparse. A JSON document only touches the keys it contains;
//! an unset environment variable or an untyped flag leaves the field alone.
//! Flags left at a clap default do not count as set, so a default can never
//! clobber a value from a lower layer.
//!
//! # Tags
//!
//! Each field lists `(tag, key)` pairs. `env` routes to [`EnvSource`], `flag`
//! to [`FlagSource`]. A key of `"-"` or `""` opts the field out of that
//! source. A field can carry both tags; sources are tried in registry order
//! and the last successful one wins.
//!
//! Supported field types are `String`, `PathBuf`, the primitive integers,
//! `f32`/`f64`, `bool`, `Vec<String>` (comma-separated), and `Option` of any
//! of those. Nested records are declared `nested` and are always walked.
//! A `Vec` of anything else is logged as unsupported and left untouched.
//!
//! # Errors and strictness
//!
//! Loading is lenient: a missing or malformed value for one source is logged
//! at debug level and the field keeps its value. Use [`bind`] with
//! [`BindOptions::fail_fast`] to surface the first such error instead.
//! Malformed JSON always fails the load, before any source runs.
//!
//! [`must_load`] and [`LoaderBuilder::must_load`] exit the process on failure.
//!
//! # Zero values
//!
//! By default a fetched `""`, `0`, `0.0` or `false` is assigned like any other
//! value. [`ZeroPolicy::SkipZero`] restores the legacy behaviour of keeping
//! the field's prior value instead.

pub mod error;
pub mod types;

mod bind;
mod builder;
mod cli;
mod env;
mod field;
mod flag;
mod json;
pub(crate) mod merge;
mod registry;
mod resolve;
mod source;
mod validate;

#[cfg(test)]
mod fixtures;

pub use bind::{Bind, Visitor, bind};
pub use builder::{Bindfig, LoaderBuilder, load, must_load};
pub use cli::{CONFIG_FLAG, ConfigArgs, config_arg, register};
pub use env::EnvSource;
pub use error::{Error, ErrorKind};
pub use field::Field;
pub use flag::FlagSource;
pub use json::merge_json;
pub use registry::Registry;
pub use resolve::{ResolveInput, resolve};
pub use source::Source;
pub use types::{
    BindOptions, ENV_TAG, FLAG_TAG, FieldKind, FieldValue, SKIP_TAG, Tags, ZeroPolicy,
};

/// Implement [`Bind`] for a struct from a list of its fields.
///
/// Each entry is either `field => [tag = "key", ...]` for a value field or
/// `field => nested` for a field that itself implements [`Bind`]. Fields are
/// visited in the order listed; fields left out are never touched.
///
/// ```ignore
/// bindfig::bind! {
///     Server {
///         host => [env = "HOST", flag = "host"],
///         port => [env = "PORT"],
///         internal => [env = "-"],
///         tls => nested,
///     }
/// }
/// ```
#[macro_export]
macro_rules! bind {
    ($ty:ty { $($field:ident => $spec:tt),* $(,)? }) => {
        impl $crate::Bind for $ty {
            fn visit(
                &mut self,
                visitor: &mut $crate::Visitor<'_>,
            ) -> ::std::result::Result<(), $crate::Error> {
                $( $crate::__bind_field!(self, visitor, $field, $spec); )*
                ::std::result::Result::Ok(())
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __bind_field {
    ($this:ident, $visitor:ident, $field:ident, nested) => {
        $visitor.nested(::std::stringify!($field), &mut $this.$field)?;
    };
    ($this:ident, $visitor:ident, $field:ident, [$($tag:ident = $key:literal),* $(,)?]) => {
        $visitor.field(
            ::std::stringify!($field),
            &[$((::std::stringify!($tag), $key)),*],
            &mut $this.$field,
        )?;
    };
}
