// Configuration loading and parsing (config/janken.toml).
//
// Every key has a default, so the file is optional. When present it may set
// any subset of the keys.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

/// Environment variable that overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "JANKEN_CONFIG";

/// Config file location relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config/janken.toml";

/// Longest accepted cooldown: one day.
pub const MAX_COOLDOWN_SECS: f64 = 86_400.0;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub model: ModelConfig,
    pub round: RoundConfig,
    pub capture: CaptureConfig,
    pub setup: SetupConfig,
}

/// `[model]`: where the classifier assets live.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ModelConfig {
    /// Directory or http(s) URL holding `model.json` and `metadata.json`.
    pub base_path: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig {
            base_path: "./my_model/".into(),
        }
    }
}

/// `[round]`: detection gate and pacing.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RoundConfig {
    pub cooldown_secs: f64,
    pub confidence_threshold: f32,
}

impl Default for RoundConfig {
    fn default() -> Self {
        RoundConfig {
            cooldown_secs: 3.0,
            confidence_threshold: 0.95,
        }
    }
}

impl RoundConfig {
    /// The cooldown, clamped to `[0, MAX_COOLDOWN_SECS]`.
    pub fn cooldown(&self) -> Duration {
        let max = Duration::from_secs(MAX_COOLDOWN_SECS as u64);
        match Duration::try_from_secs_f64(self.cooldown_secs) {
            Ok(cooldown) => cooldown.min(max),
            Err(_) if self.cooldown_secs > 0.0 => max,
            Err(_) => Duration::ZERO,
        }
    }
}

/// `[capture]`: capture region and polling cadence.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CaptureConfig {
    /// Width and height of the square capture region, in pixels.
    pub frame_size: u32,
    /// Mirror the capture horizontally.
    pub flip: bool,
    pub tick_rate_hz: u32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        CaptureConfig {
            frame_size: 300,
            flip: true,
            tick_rate_hz: 60,
        }
    }
}

impl CaptureConfig {
    pub fn tick_period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.tick_rate_hz.max(1)))
    }
}

/// `[setup]`: bounds on waiting for the model runtime.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SetupConfig {
    pub runtime_timeout_ms: u64,
    pub runtime_poll_ms: u64,
}

impl Default for SetupConfig {
    fn default() -> Self {
        SetupConfig {
            runtime_timeout_ms: 10_000,
            runtime_poll_ms: 100,
        }
    }
}

impl SetupConfig {
    pub fn runtime_timeout(&self) -> Duration {
        Duration::from_millis(self.runtime_timeout_ms)
    }

    pub fn runtime_poll(&self) -> Duration {
        Duration::from_millis(self.runtime_poll_ms)
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Parse and validate config from TOML text. `path` is only used in errors.
pub fn parse_config(text: &str, path: &Path) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    validate(&config)?;
    Ok(config)
}

/// Load and validate config from an explicit file. The file must exist.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })?;
    parse_config(&text, path)
}

/// Convenience wrapper: loads `$JANKEN_CONFIG` if set, otherwise
/// `config/janken.toml` under the working directory, falling back to
/// defaults when that file does not exist.
pub fn load_config() -> Result<Config, ConfigError> {
    if let Ok(explicit) = std::env::var(CONFIG_PATH_ENV) {
        return load_config_from(Path::new(&explicit));
    }

    let path = PathBuf::from(DEFAULT_CONFIG_PATH);
    if path.exists() {
        load_config_from(&path)
    } else {
        info!("No config file at {}, using defaults", path.display());
        let config = Config::default();
        validate(&config)?;
        Ok(config)
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.model.base_path.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "model.base_path".into(),
            message: "must not be empty".into(),
        });
    }

    let threshold = config.round.confidence_threshold;
    if !(0.0..=1.0).contains(&threshold) {
        return Err(ConfigError::ValidationError {
            field: "round.confidence_threshold".into(),
            message: format!("must be between 0.0 and 1.0 inclusive, got {threshold}"),
        });
    }

    let cooldown = config.round.cooldown_secs;
    if !cooldown.is_finite() || !(0.0..=MAX_COOLDOWN_SECS).contains(&cooldown) {
        return Err(ConfigError::ValidationError {
            field: "round.cooldown_secs".into(),
            message: format!("must be between 0 and {MAX_COOLDOWN_SECS}, got {cooldown}"),
        });
    }

    let positive_fields: &[(&str, u64)] = &[
        ("capture.frame_size", u64::from(config.capture.frame_size)),
        ("capture.tick_rate_hz", u64::from(config.capture.tick_rate_hz)),
        ("setup.runtime_poll_ms", config.setup.runtime_poll_ms),
    ];
    for (name, val) in positive_fields {
        if *val == 0 {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: "must be > 0".into(),
            });
        }
    }

    if config.setup.runtime_poll_ms > config.setup.runtime_timeout_ms {
        return Err(ConfigError::ValidationError {
            field: "setup.runtime_poll_ms".into(),
            message: format!(
                "must not exceed setup.runtime_timeout_ms ({})",
                config.setup.runtime_timeout_ms
            ),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
