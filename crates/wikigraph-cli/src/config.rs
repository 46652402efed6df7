//! CLI configuration.

use anyhow::{bail, Result};

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Log filter used when `RUST_LOG` is unset
    pub log_filter: String,

    /// Pretty-print JSON output
    pub pretty: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_filter: "warn".to_string(),
            pretty: false,
        }
    }
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `WIKIGRAPH_LOG`: Default log filter (e.g. `debug`)
    /// - `WIKIGRAPH_PRETTY`: `1`/`true` to pretty-print output
    ///
    /// # Errors
    ///
    /// Returns error if a boolean variable has an unrecognized value.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(filter) = lookup("WIKIGRAPH_LOG") {
            config.log_filter = filter;
        }

        if let Some(pretty) = lookup("WIKIGRAPH_PRETTY") {
            config.pretty = parse_flag("WIKIGRAPH_PRETTY", &pretty)?;
        }

        Ok(config)
    }
}

fn parse_flag(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("Invalid {name}: expected a boolean, got {other:?}"),
    }
}
