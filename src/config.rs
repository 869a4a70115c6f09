//! Configuration loaded from `config.json`
//!
//! Every field has a default, so a missing file or a partial file is fine:
//!
//! ```json
//! { "osc": { "host": "127.0.0.1", "port": 9000 }, "debug": false }
//! ```

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// OSC destination
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OscConfig {
    pub host: String,
    pub port: u16,
}

impl Default for OscConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 9000,
        }
    }
}

impl OscConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self { host: host.into(), port }
    }

    /// `host:port`, bracketing IPv6 literals
    pub fn target_addr(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub osc: OscConfig,
    /// Verbose `[OSC]`/`[GRID]` prints
    pub debug: bool,
}

impl AppConfig {
    /// Load from a JSON file. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path).map_err(|e| Error::ConfigFile {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;
        serde_json::from_str(&raw).map_err(|e| Error::ConfigFile {
            path: path.to_path_buf(),
            source: Box::new(e),
        })
    }
}

/// Parse config path from command line arguments.
///
/// Supports `webcam-osc <path>`, `--config <path>` and `-c <path>`.
/// Defaults to `config.json` in the working directory.
pub fn parse_config_path(args: &[String]) -> String {
    for i in 1..args.len() {
        if (args[i] == "--config" || args[i] == "-c") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }

    if args.len() > 1 && !args[1].starts_with('-') {
        return args[1].clone();
    }

    DEFAULT_CONFIG_PATH.to_string()
}
