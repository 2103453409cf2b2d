//! Configuration for a terminal game session.
//!
//! Only player names and a few driver knobs are configurable; board size and
//! wall counts are fixed by the rules. Unknown top-level sections are ignored
//! so one YAML file can be shared with other tooling.
//!
//! This module is only available behind the `binary` feature flag.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Top-level config.
#[derive(Debug, Deserialize)]
pub struct SessionConfig {
    pub players: PlayersConfig,

    /// flexi_logger spec, e.g. `info` or `quoridor_rules=debug`.
    #[serde(default)]
    pub log_level: Option<String>,

    /// Stop after this many accepted commands.
    #[serde(default)]
    pub max_turns: Option<usize>,
}

/// Display names for the two seats.
#[derive(Debug, Deserialize)]
pub struct PlayersConfig {
    /// Starts at the bottom, moves up.
    pub a: String,
    /// Starts at the top, moves down.
    pub b: String,
}

/// Load a `SessionConfig` from a YAML file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SessionConfig> {
    let contents = fs::read_to_string(path.as_ref())
        .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;
    let config: SessionConfig = serde_yaml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
    Ok(config)
}
