//! Configuration structs for the bindfig demo application.
//!
//! [`DemoConfig`] holds two nested records, [`ServerConfig`] and
//! [`DisplayConfig`]. Defaults come from `Default`; every other layer is
//! sparse and only touches what it names.
//!
//! # Sources
//!
//! | Field                    | Env var           | Flag              |
//! |--------------------------|-------------------|-------------------|
//! | `name`                   | `DEMO_NAME`       |                   |
//! | `verbose`                |                   | `--verbose`       |
//! | `server.host`            | `DEMO_HOST`       | `--host`          |
//! | `server.port`            | `DEMO_PORT`       | `--port`          |
//! | `server.max_connections` | `DEMO_MAX_CONNS`  |                   |
//! | `server.allowed_origins` | `DEMO_ORIGINS`    | `--origin`        |
//! | `display.color`          | `DEMO_COLOR`      | `--color`         |
//! | `display.format`         |                   |                   |
//!
//! Any field, including `display.format`, can also be set through JSON in
//! `$CONFIG` or `--config`.

use serde::{Deserialize, Serialize};

/// Root configuration for the demo application.
#[derive(Serialize, Deserialize, Debug)]
pub struct DemoConfig {
    /// Application name shown in the echo banner.
    pub name: String,

    /// Enable verbose output.
    pub verbose: bool,

    pub server: ServerConfig,

    pub display: DisplayConfig,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            name: "bindfig-demo".into(),
            verbose: false,
            server: ServerConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

bindfig::bind! {
    DemoConfig {
        name => [env = "DEMO_NAME"],
        verbose => [flag = "verbose"],
        server => nested,
        display => nested,
    }
}

/// Server-related configuration.
#[derive(Serialize, Deserialize, Debug)]
pub struct ServerConfig {
    /// Hostname to bind to.
    pub host: String,

    /// Port number.
    pub port: u16,

    /// Maximum number of allowed connections.
    pub max_connections: u32,

    /// Origins accepted by the server, comma-separated in env vars.
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 3000,
            max_connections: 100,
            allowed_origins: Vec::new(),
        }
    }
}

bindfig::bind! {
    ServerConfig {
        host => [env = "DEMO_HOST", flag = "host"],
        port => [env = "DEMO_PORT", flag = "port"],
        max_connections => [env = "DEMO_MAX_CONNS"],
        allowed_origins => [env = "DEMO_ORIGINS", flag = "origin"],
    }
}

/// Display and output formatting configuration.
#[derive(Serialize, Deserialize, Debug)]
pub struct DisplayConfig {
    /// Terminal color for the echo command output.
    ///
    /// Supported values: red, green, yellow, blue, magenta, cyan, white.
    pub color: String,

    /// Output format (pretty or plain). JSON only.
    pub format: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: "yellow".into(),
            format: "pretty".into(),
        }
    }
}

bindfig::bind! {
    DisplayConfig {
        color => [env = "DEMO_COLOR", flag = "color"],
        format => [],
    }
}
