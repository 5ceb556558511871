use std::io::{self, Write};

use clap::ArgMatches;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::bind::Bind;
use crate::cli::CONFIG_FLAG;
use crate::env::EnvSource;
use crate::error::Error;
use crate::flag::FlagSource;
use crate::resolve::{self, ResolveInput};
use crate::types::ZeroPolicy;

/// Entry point for building a bindfig loader.
pub struct Bindfig;

impl Bindfig {
    pub fn builder<'a>() -> LoaderBuilder<'a> {
        LoaderBuilder::new()
    }
}

/// Builder for loading a struct from JSON, environment, and flags.
///
/// All I/O (reading the process environment, pulling `--config` out of the
/// matches) happens in [`load`](Self::load); the builder itself only records
/// choices.
#[derive(Debug, Clone)]
pub struct LoaderBuilder<'a> {
    matches: Option<&'a ArgMatches>,
    config_flag: String,
    config_env: Option<String>,
    env_enabled: bool,
    env_vars: Option<Vec<(String, String)>>,
    zero_policy: ZeroPolicy,
    strict: bool,
}

impl<'a> LoaderBuilder<'a> {
    fn new() -> Self {
        Self {
            matches: None,
            config_flag: CONFIG_FLAG.to_string(),
            config_env: None,
            env_enabled: true,
            env_vars: None,
            zero_policy: ZeroPolicy::default(),
            strict: false,
        }
    }

    /// The parsed arguments of the active command. Without them, `flag`-tagged
    /// fields and `--config` are skipped.
    pub fn matches(mut self, matches: &'a ArgMatches) -> Self {
        self.matches = Some(matches);
        self
    }

    /// Argument id holding the JSON config (default: `"config"`).
    pub fn config_flag(mut self, id: &str) -> Self {
        self.config_flag = id.to_string();
        self
    }

    /// Environment variable holding JSON config (default: the config flag id
    /// uppercased, i.e. `CONFIG`).
    pub fn config_env(mut self, name: &str) -> Self {
        self.config_env = Some(name.to_string());
        self
    }

    /// Disable the environment entirely: no JSON from the environment and no
    /// `env`-tagged fields.
    pub fn no_env(mut self) -> Self {
        self.env_enabled = false;
        self
    }

    /// Read these variables instead of the process environment.
    pub fn env_vars(mut self, vars: impl IntoIterator<Item = (String, String)>) -> Self {
        self.env_vars = Some(vars.into_iter().collect());
        self
    }

    /// What to do with successfully fetched zero values (default:
    /// [`ZeroPolicy::Always`]).
    pub fn zero_policy(mut self, policy: ZeroPolicy) -> Self {
        self.zero_policy = policy;
        self
    }

    /// Enable or disable strict mode (default: `false`).
    /// In strict mode, unknown keys in JSON config produce errors.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Resolve the effective JSON env var name (None if env disabled).
    fn effective_config_env(&self) -> Option<String> {
        if !self.env_enabled {
            return None;
        }
        Some(
            self.config_env
                .clone()
                .unwrap_or_else(|| self.config_flag.to_uppercase()),
        )
    }

    fn effective_env(&self) -> Option<EnvSource> {
        if !self.env_enabled {
            return None;
        }
        Some(match &self.env_vars {
            Some(vars) => EnvSource::from_vars(vars.iter().cloned()),
            None => EnvSource::new(),
        })
    }

    /// JSON documents in precedence order: environment first, then the flag.
    fn collect_json(&self, env: Option<&EnvSource>) -> Result<Vec<(String, String)>, Error> {
        use crate::source::Source;

        let mut docs = Vec::new();

        if let (Some(name), Some(env)) = (self.effective_config_env(), env) {
            match env.get_string(&name) {
                Ok(raw) => docs.push((format!("${name}"), raw)),
                Err(e) if e.is_not_found() => {}
                Err(e) => return Err(e),
            }
        }

        if let Some(matches) = self.matches {
            match matches.try_get_one::<String>(&self.config_flag) {
                Ok(Some(raw)) => docs.push((format!("--{}", self.config_flag), raw.clone())),
                Ok(None) => {}
                // Not registered on this command at all.
                Err(clap::parser::MatchesError::UnknownArgument { .. }) => {}
                Err(e) => {
                    warn!(flag = %self.config_flag, error = %e, "config flag is not a string argument, skipping it");
                }
            }
        }

        Ok(docs)
    }

    /// Build the `ResolveInput` from current builder state.
    fn build_input(&self) -> Result<ResolveInput<'a>, Error> {
        let env = self.effective_env();
        let json = self.collect_json(env.as_ref())?;
        Ok(ResolveInput {
            json,
            env,
            flags: FlagSource::from_option(self.matches),
            zero_policy: self.zero_policy,
            strict: self.strict,
        })
    }

    /// Load every layer onto `target`.
    pub fn load<T>(self, target: &mut T) -> Result<(), Error>
    where
        T: Bind + Serialize + DeserializeOwned,
    {
        let input = self.build_input()?;
        resolve::resolve(input, target)
    }

    /// Like [`load`](Self::load), but print the error and exit the process
    /// with status 1 on failure.
    pub fn must_load<T>(self, target: &mut T)
    where
        T: Bind + Serialize + DeserializeOwned,
    {
        if let Err(err) = self.load(target) {
            report(&err, &mut io::stderr().lock());
            std::process::exit(1);
        }
    }
}

/// Print a load failure for the user. Written once, straight to `out`.
fn report(err: &Error, out: &mut impl Write) {
    let _ = writeln!(out, "error: {err}");
}

/// Load `target` from `$CONFIG`, `--config`, the environment, and flags.
pub fn load<T>(matches: &ArgMatches, target: &mut T) -> Result<(), Error>
where
    T: Bind + Serialize + DeserializeOwned,
{
    Bindfig::builder().matches(matches).load(target)
}

/// Like [`load`], but exit the process with status 1 on failure.
pub fn must_load<T>(matches: &ArgMatches, target: &mut T)
where
    T: Bind + Serialize + DeserializeOwned,
{
    Bindfig::builder().matches(matches).must_load(target)
}
