//! The one flag bindfig owns: `--config <JSON>`.
//!
//! Everything else on the command line belongs to the application and is read
//! generically through [`FlagSource`](crate::FlagSource). Register the config
//! flag either with the builder API ([`register`] / [`config_arg`]) or by
//! flattening [`ConfigArgs`] into a derive-based parser.

use clap::{Arg, Args, Command};

/// Argument id and long name of the JSON config flag.
pub const CONFIG_FLAG: &str = "config";

/// The `--config <JSON>` argument, global so subcommands see it too.
pub fn config_arg() -> Arg {
    Arg::new(CONFIG_FLAG)
        .long(CONFIG_FLAG)
        .value_name("JSON")
        .global(true)
        .help("Set the config data as a JSON object")
}

/// Add the `--config` flag to `cmd`.
pub fn register(cmd: Command) -> Command {
    cmd.arg(config_arg())
}

/// Clap-derived args carrying the JSON config flag.
///
/// Embed into your app's parser:
/// ```ignore
/// #[derive(Parser)]
/// struct Cli {
///     #[command(flatten)]
///     config: ConfigArgs,
/// }
/// ```
///
/// The argument id is `config`, so the loader finds it without extra setup.
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigArgs {
    /// Set the config data as a JSON object.
    #[arg(long, value_name = "JSON", global = true)]
    pub config: Option<String>,
}
