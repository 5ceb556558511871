//! # bindfig demo application
//!
//! A sample CLI tool that shows how to wire bindfig into a clap app. It
//! exists purely to demonstrate and manually verify the layering.
//!
//! ## Running
//!
//! ```sh
//! cargo run --example bindfig_demo -- echo
//! ```
//!
//! ## Features demonstrated
//!
//! | Feature                 | How to exercise it                                                          |
//! |-------------------------|-----------------------------------------------------------------------------|
//! | Initial values          | `cargo run --example bindfig_demo -- echo`                                  |
//! | JSON via env var        | `CONFIG='{"display":{"format":"plain"}}' cargo run --example bindfig_demo -- echo` |
//! | JSON via flag           | `cargo run --example bindfig_demo -- --config '{"server":{"port":1}}' echo`  |
//! | Env var override        | `DEMO_PORT=9999 cargo run --example bindfig_demo -- echo`                   |
//! | Flag override           | `DEMO_PORT=9999 cargo run --example bindfig_demo -- --port 8080 echo`       |
//! | Flag default ignored    | `--port` defaults to 3000 in clap but never overrides `DEMO_PORT`           |
//! | String lists            | `DEMO_ORIGINS=a.example,b.example cargo run --example bindfig_demo -- echo` |
//! | Strict JSON             | `cargo run --example bindfig_demo -- --strict --config '{"typo":1}' echo`   |
//! | Legacy zero handling    | `DEMO_MAX_CONNS=0 cargo run --example bindfig_demo -- --skip-zero echo`     |
//! | Logging                 | `RUST_LOG=bindfig=debug cargo run --example bindfig_demo -- echo`           |

mod config;

use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use tracing_subscriber::EnvFilter;

use bindfig::{Bindfig, ZeroPolicy};

use config::DemoConfig;

// ---------------------------------------------------------------------------
// CLI definitions
// ---------------------------------------------------------------------------

fn cli() -> Command {
    bindfig::register(Command::new("bindfig-demo"))
        .about("bindfig demo: a sample CLI app for showcasing bindfig integration")
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Enable verbose output"),
        )
        .arg(
            Arg::new("color")
                .long("color")
                .global(true)
                .help("Override the display color (red, green, yellow, blue, magenta, cyan)"),
        )
        .arg(
            Arg::new("host")
                .long("host")
                .global(true)
                .help("Override the server host"),
        )
        .arg(
            Arg::new("port")
                .long("port")
                .global(true)
                .value_parser(value_parser!(u16))
                .default_value("3000")
                .help("Override the server port"),
        )
        .arg(
            Arg::new("origin")
                .long("origin")
                .global(true)
                .action(ArgAction::Append)
                .help("Allowed origin; repeat or comma-separate"),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Reject unknown keys in JSON config"),
        )
        .arg(
            Arg::new("skip-zero")
                .long("skip-zero")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Keep prior values when a source supplies 0, false or \"\""),
        )
        .subcommand(
            Command::new("echo")
                .about("Print resolved configuration values (colored by display.color)")
                .arg(
                    Arg::new("key")
                        .long("key")
                        .help("Print only this dotted key instead of all values"),
                ),
        )
}

// ---------------------------------------------------------------------------
// ANSI color helpers
// ---------------------------------------------------------------------------

fn ansi_color_code(name: &str) -> &str {
    match name {
        "red" => "\x1b[31m",
        "green" => "\x1b[32m",
        "yellow" => "\x1b[33m",
        "blue" => "\x1b[34m",
        "magenta" => "\x1b[35m",
        "cyan" => "\x1b[36m",
        "white" => "\x1b[37m",
        _ => "\x1b[0m",
    }
}

const RESET: &str = "\x1b[0m";

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn entries(config: &DemoConfig) -> Vec<(&'static str, String)> {
    vec![
        ("name", config.name.clone()),
        ("verbose", config.verbose.to_string()),
        ("server.host", config.server.host.clone()),
        ("server.port", config.server.port.to_string()),
        (
            "server.max_connections",
            config.server.max_connections.to_string(),
        ),
        (
            "server.allowed_origins",
            config.server.allowed_origins.join(","),
        ),
        ("display.color", config.display.color.clone()),
        ("display.format", config.display.format.clone()),
    ]
}

fn echo_all(config: &DemoConfig) {
    let color = ansi_color_code(&config.display.color);

    if config.verbose {
        println!(
            "{color}[verbose] Resolved configuration for {:?}{RESET}",
            config.name
        );
        println!();
    }

    let entries = entries(config);

    if config.display.format == "plain" {
        for (key, value) in &entries {
            println!("{key}={value}");
        }
    } else {
        let max_key_len = entries.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
        for (key, value) in &entries {
            println!("{color}{key:<max_key_len$}{RESET}  {value}");
        }
    }
}

fn echo_key(config: &DemoConfig, key: &str) {
    let color = ansi_color_code(&config.display.color);
    match entries(config).into_iter().find(|(k, _)| *k == key) {
        Some((key, value)) => println!("{color}{key}{RESET}  {value}"),
        None => {
            eprintln!("Unknown key: {key}");
            std::process::exit(1);
        }
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn load(matches: &ArgMatches) -> DemoConfig {
    let zero_policy = if matches.get_flag("skip-zero") {
        ZeroPolicy::SkipZero
    } else {
        ZeroPolicy::Always
    };

    let mut config = DemoConfig::default();
    Bindfig::builder()
        .matches(matches)
        .strict(matches.get_flag("strict"))
        .zero_policy(zero_policy)
        .must_load(&mut config);
    config
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let matches = cli().get_matches();

    if let Some(("echo", sub)) = matches.subcommand() {
        let config = load(sub);
        match sub.get_one::<String>("key") {
            Some(k) => echo_key(&config, k),
            None => echo_all(&config),
        }
    }
}
