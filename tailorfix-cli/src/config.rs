//! Configuration file loading for tailorfix.
//!
//! Discovers and loads `tailorfix.toml` from the working directory.
//! Merges config file settings with CLI arguments (CLI takes precedence).

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use serde::Deserialize;
use tailorfix_session::SectionPolicy;
use tailorfix_types::suggestion::Section;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "tailorfix.toml";

/// Top-level configuration from tailorfix.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TailorfixConfig {
    /// Policy settings (allow/deny section lists).
    pub policy: PolicyConfig,

    /// Default output directory for apply artifacts.
    pub out_dir: Option<Utf8PathBuf>,
}

/// Policy section of the config.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Sections eligible for apply. Empty means all sections.
    pub allow: Vec<String>,

    /// Sections never applied.
    pub deny: Vec<String>,
}

/// Discover the tailorfix.toml config file in `dir`.
pub fn discover_config(dir: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse a tailorfix.toml config file.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<TailorfixConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

/// Parse a config file from a string.
pub fn parse_config(contents: &str) -> anyhow::Result<TailorfixConfig> {
    let config: TailorfixConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load config from `dir`, or return default if not found.
pub fn load_or_default(dir: &Utf8Path) -> anyhow::Result<TailorfixConfig> {
    match discover_config(dir) {
        Some(path) => load_config(&path),
        None => Ok(TailorfixConfig::default()),
    }
}

/// Merge config-file policy with CLI section flags. CLI flags extend the
/// config lists rather than replacing them.
pub fn merge_policy(
    config: &TailorfixConfig,
    cli_allow: &[String],
    cli_deny: &[String],
) -> anyhow::Result<SectionPolicy> {
    let mut allow = parse_sections(&config.policy.allow).context("policy.allow in config")?;
    allow.extend(parse_sections(cli_allow).context("--allow")?);
    let mut deny = parse_sections(&config.policy.deny).context("policy.deny in config")?;
    deny.extend(parse_sections(cli_deny).context("--deny")?);

    Ok(SectionPolicy { allow, deny })
}

fn parse_sections(tags: &[String]) -> anyhow::Result<Vec<Section>> {
    tags.iter()
        .map(|tag| {
            Section::parse(tag).ok_or_else(|| anyhow::anyhow!("unknown section tag {tag:?}"))
        })
        .collect()
}
