//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.wirewalk/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct WirewalkConfig {
    #[serde(default)]
    pub tour: TourConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TourConfig {
    /// URL pre-filled in the address bar.
    pub start_url: Option<String>,
    /// Stage to open on (0-based). Out-of-range values fall back to 0.
    pub start_stage: Option<usize>,
    /// Cosmetic delay before the simulated HTTP response appears.
    /// 0 answers immediately.
    pub latency_ms: Option<u64>,
    /// Whether the companion guide bubble starts visible.
    pub show_companion: Option<bool>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_LATENCY_MS: u64 = 800;
pub const DEFAULT_SHOW_COMPANION: bool = true;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub start_url: Option<String>,
    pub start_stage: usize,
    pub latency_ms: u64,
    pub show_companion: bool,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.wirewalk/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".wirewalk").join("config.toml"))
}

/// Load config from `~/.wirewalk/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `WirewalkConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<WirewalkConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(WirewalkConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(WirewalkConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: WirewalkConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# Wirewalk Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [tour]
# start_url = "google.com"   # Pre-fill the address bar
# start_stage = 0            # 0 = Browser Input ... 7 = Browser Rendering
# latency_ms = 800           # Simulated HTTP response delay (0 = immediate)
# show_companion = true      # Companion guide bubble visible at launch
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// CLI flag values, all optional (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub url: Option<String>,
    pub stage: Option<usize>,
    pub latency_ms: Option<u64>,
}

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &WirewalkConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Start URL: CLI → env → config
    let start_url = cli
        .url
        .clone()
        .or_else(|| std::env::var("WIREWALK_START_URL").ok())
        .or_else(|| config.tour.start_url.clone());

    // Start stage: CLI → env → config → 0
    let start_stage = cli
        .stage
        .or_else(|| env_parse("WIREWALK_START_STAGE"))
        .or(config.tour.start_stage)
        .unwrap_or(0);

    // Latency: CLI → env → config → default
    let latency_ms = cli
        .latency_ms
        .or_else(|| env_parse("WIREWALK_LATENCY_MS"))
        .or(config.tour.latency_ms)
        .unwrap_or(DEFAULT_LATENCY_MS);

    let show_companion = config.tour.show_companion.unwrap_or(DEFAULT_SHOW_COMPANION);

    ResolvedConfig {
        start_url,
        start_stage,
        latency_ms,
        show_companion,
    }
}

/// Parse an env var, warning (rather than failing) on malformed values.
fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!("Ignoring malformed {name}={raw}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = WirewalkConfig::default();
        assert!(config.tour.start_url.is_none());
        assert!(config.tour.latency_ms.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = WirewalkConfig::default();
        let resolved = resolve(&config, &CliOverrides::default());
        assert_eq!(resolved.start_stage, 0);
        assert_eq!(resolved.latency_ms, DEFAULT_LATENCY_MS);
        assert!(resolved.show_companion);
        assert!(resolved.start_url.is_none());
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = WirewalkConfig {
            tour: TourConfig {
                start_url: Some("example.com".to_string()),
                start_stage: Some(3),
                latency_ms: Some(0),
                show_companion: Some(false),
            },
        };
        let resolved = resolve(&config, &CliOverrides::default());
        assert_eq!(resolved.start_url.as_deref(), Some("example.com"));
        assert_eq!(resolved.start_stage, 3);
        assert_eq!(resolved.latency_ms, 0);
        assert!(!resolved.show_companion);
    }

    #[test]
    fn test_resolve_cli_wins_over_config() {
        let config = WirewalkConfig {
            tour: TourConfig {
                start_url: Some("config.example".to_string()),
                start_stage: Some(2),
                latency_ms: Some(500),
                show_companion: None,
            },
        };
        let cli = CliOverrides {
            url: Some("cli.example".to_string()),
            stage: Some(5),
            latency_ms: Some(0),
        };
        let resolved = resolve(&config, &cli);
        assert_eq!(resolved.start_url.as_deref(), Some("cli.example"));
        assert_eq!(resolved.start_stage, 5);
        assert_eq!(resolved.latency_ms, 0);
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[tour]
start_url = "google.com"
start_stage = 4
latency_ms = 250
show_companion = false
"#;
        let config: WirewalkConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.tour.start_url.as_deref(), Some("google.com"));
        assert_eq!(config.tour.start_stage, Some(4));
        assert_eq!(config.tour.latency_ms, Some(250));
        assert_eq!(config.tour.show_companion, Some(false));
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing — everything else stays default
        let toml_str = r#"
[tour]
latency_ms = 0
"#;
        let config: WirewalkConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.tour.latency_ms, Some(0));
        assert!(config.tour.start_url.is_none());
        assert!(config.tour.start_stage.is_none());
    }
}
