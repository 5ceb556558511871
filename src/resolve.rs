//! Core load pipeline: apply every layer to a target, lowest precedence first.
//!
//! Operates on pre-collected inputs (`ResolveInput`) so the full pipeline is
//! testable with synthetic data. Steps:
//!
//! 1. Merge each JSON document in order (later overrides earlier)
//! 2. Bind `env`-tagged fields from the environment
//! 3. Bind `flag`-tagged fields from explicitly set flags
//!
//! The binder passes are lenient: a field a source can't supply keeps whatever
//! the previous step left. JSON problems abort the load before any binder runs.
//! Nothing is rolled back; a failure leaves the target as the completed steps
//! left it.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::bind::{Bind, bind};
use crate::env::EnvSource;
use crate::error::Error;
use crate::flag::FlagSource;
use crate::json::merge_json;
use crate::registry::Registry;
use crate::types::{BindOptions, ZeroPolicy};

/// Everything a load needs, collected up front.
#[derive(Debug)]
pub struct ResolveInput<'a> {
    /// JSON documents as `(origin, raw)` in precedence order: first = lowest.
    pub json: Vec<(String, String)>,
    /// Environment source. `None` skips the environment pass.
    pub env: Option<EnvSource>,
    /// Flag source for the flag pass.
    pub flags: FlagSource<'a>,
    pub zero_policy: ZeroPolicy,
    /// Reject JSON keys the target doesn't know.
    pub strict: bool,
}

/// Apply JSON, then environment, then flags to `target`.
pub fn resolve<T>(input: ResolveInput<'_>, target: &mut T) -> Result<(), Error>
where
    T: Bind + Serialize + DeserializeOwned,
{
    // 1: JSON documents
    for (origin, raw) in &input.json {
        merge_json(raw, origin, target, input.strict)?;
    }

    let options = BindOptions::lenient().with_zero_policy(input.zero_policy);

    // 2: Environment
    if let Some(env) = &input.env {
        debug!("binding environment");
        bind(&Registry::env(env), target, options)?;
    }

    // 3: Flags (highest priority)
    debug!("binding flags");
    bind(&Registry::flags(&input.flags), target, options)?;

    Ok(())
}
