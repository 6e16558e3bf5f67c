//! CLI configuration management
//!
//! Handles loading configuration from TOML files, environment variables and
//! command line flags.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use volsurf_batch::BatchConfig;
use volsurf_core::market_data::surfaces::SurfaceInterpolation;
use volsurf_core::types::{Date, DayCountConvention};
use volsurf_models::implied::ImpliedVolConfig;
use volsurf_models::lattice::DEFAULT_STEPS;

/// Environment variable overriding `log_level`.
pub const ENV_LOG_LEVEL: &str = "VOLSURF_LOG_LEVEL";

/// Environment variable overriding `lattice.steps`.
pub const ENV_STEPS: &str = "VOLSURF_STEPS";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Unknown log level name.
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// Zero or unparsable lattice step count.
    #[error("Invalid lattice steps: {0}. Must be a positive integer")]
    InvalidSteps(String),

    /// Setting outside its valid range.
    #[error("Invalid setting: {0}")]
    InvalidSetting(String),

    /// Config file could not be read or parsed.
    #[error("Configuration file error: {0}")]
    FileError(String),
}

/// Log levels accepted by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Per-quote solver traces
    Trace,
    /// Per-quote failures and builder diagnostics
    Debug,
    /// Batch summaries
    #[default]
    Info,
    /// Skipped inputs
    Warn,
    /// Errors only
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// `[lattice]` section
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct LatticeSettings {
    /// Time steps per lattice valuation
    pub steps: usize,
}

impl Default for LatticeSettings {
    fn default() -> Self {
        Self {
            steps: DEFAULT_STEPS,
        }
    }
}

/// `[batch]` section
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct BatchSettings {
    /// Minimum quote count before inverting in parallel
    pub parallel_threshold: usize,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            parallel_threshold: BatchConfig::default().parallel_threshold,
        }
    }
}

/// `[surface]` section
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SurfaceSettings {
    /// Grid interpolation scheme
    pub interpolation: SurfaceInterpolation,
    /// Day count for the expiry axis
    pub day_count: DayCountConvention,
    /// Default number of sampled strikes
    pub num_strikes: usize,
    /// Default number of sampled times
    pub num_times: usize,
}

impl Default for SurfaceSettings {
    fn default() -> Self {
        Self {
            interpolation: SurfaceInterpolation::default(),
            day_count: DayCountConvention::default(),
            num_strikes: 25,
            num_times: 25,
        }
    }
}

/// Full CLI configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct VolsurfConfig {
    /// Log level
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    /// Valuation anchor; today when unset
    pub valuation_date: Option<Date>,
    /// Lattice settings
    pub lattice: LatticeSettings,
    /// Implied volatility search settings
    pub solver: ImpliedVolConfig,
    /// Batch settings
    pub batch: BatchSettings,
    /// Surface settings
    pub surface: SurfaceSettings,
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

impl Default for VolsurfConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            valuation_date: None,
            lattice: LatticeSettings::default(),
            solver: ImpliedVolConfig::default(),
            batch: BatchSettings::default(),
            surface: SurfaceSettings::default(),
        }
    }
}

impl VolsurfConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: VolsurfConfig = toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Apply overrides from a variable lookup (the process environment in
    /// [`build_config`]).
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = LogLevel::from_str(&level)?;
        }
        if let Some(steps) = lookup(ENV_STEPS) {
            self.lattice.steps = parse_steps(&steps)?;
        }
        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        if let Some(level) = &cli.log_level {
            self.log_level = LogLevel::from_str(level)?;
        }
        if let Some(steps) = cli.steps {
            self.lattice.steps = steps;
        }
        if let Some(date) = cli.valuation_date {
            self.valuation_date = Some(date);
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lattice.steps == 0 {
            return Err(ConfigError::InvalidSteps("0".to_string()));
        }
        self.solver
            .validate()
            .map_err(|e| ConfigError::InvalidSetting(e.to_string()))?;
        if self.surface.num_strikes == 0 || self.surface.num_times == 0 {
            return Err(ConfigError::InvalidSetting(
                "surface.num_strikes and surface.num_times must be > 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Valuation anchor, defaulting to today.
    pub fn valuation_date_or_today(&self) -> Date {
        self.valuation_date.unwrap_or_else(Date::today)
    }

    /// Batch inverter settings derived from the lattice, solver and batch sections.
    pub fn batch_config(&self) -> BatchConfig {
        BatchConfig {
            steps: self.lattice.steps,
            parallel_threshold: self.batch.parallel_threshold,
            solver: self.solver,
        }
    }
}

fn parse_steps(s: &str) -> Result<usize, ConfigError> {
    match s.trim().parse::<usize>() {
        Ok(steps) if steps > 0 => Ok(steps),
        _ => Err(ConfigError::InvalidSteps(s.to_string())),
    }
}

/// Global CLI flags that affect configuration
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Log level override
    pub log_level: Option<String>,
    /// Lattice steps override
    pub steps: Option<usize>,
    /// Valuation date override
    pub valuation_date: Option<Date>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<VolsurfConfig, ConfigError> {
    let mut config = match &cli.config_file {
        Some(path) => VolsurfConfig::from_file(path)?,
        None => VolsurfConfig::default(),
    };

    config.apply_env(|key| std::env::var(key).ok())?;
    config.merge_with_cli(cli)?;
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = VolsurfConfig::default();
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.lattice.steps, 200);
        assert_eq!(config.batch.parallel_threshold, 64);
        assert_eq!(config.surface.interpolation, SurfaceInterpolation::Bicubic);
        assert!(config.valuation_date.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("warn").unwrap(), LogLevel::Warn);
        assert!(LogLevel::from_str("verbose").is_err());
    }

    #[test]
    fn test_toml_deserialization() {
        let config = VolsurfConfig::from_toml_str(
            r#"
            log_level = "Debug"
            valuation_date = "2025-01-02"

            [lattice]
            steps = 400

            [solver]
            tolerance = 1e-8
            max_volatility = 3.0

            [batch]
            parallel_threshold = 16

            [surface]
            interpolation = "bilinear"
            day_count = "ACT/360"
            num_strikes = 10
            "#,
        )
        .unwrap();

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.valuation_date, Some(Date::from_ymd(2025, 1, 2).unwrap()));
        assert_eq!(config.lattice.steps, 400);
        assert_eq!(config.solver.tolerance, 1e-8);
        assert_eq!(config.solver.max_iterations, 100);
        assert_eq!(config.surface.interpolation, SurfaceInterpolation::Bilinear);
        assert_eq!(config.surface.day_count, DayCountConvention::Actual360);
        assert_eq!(config.surface.num_times, 25);

        let batch = config.batch_config();
        assert_eq!(batch.steps, 400);
        assert_eq!(batch.parallel_threshold, 16);
        assert_eq!(batch.solver.max_volatility, 3.0);
    }

    #[test]
    fn test_zero_steps_rejected() {
        let result = VolsurfConfig::from_toml_str("[lattice]\nsteps = 0");
        assert!(matches!(result, Err(ConfigError::InvalidSteps(_))));
    }

    #[test]
    fn test_invalid_solver_range_rejected() {
        let result = VolsurfConfig::from_toml_str("[solver]\nmin_volatility = 5.0");
        match result.unwrap_err() {
            ConfigError::InvalidSetting(msg) => assert!(msg.contains("volatility range")),
            other => panic!("Expected InvalidSetting, got {:?}", other),
        }
    }

    #[test]
    fn test_env_overrides() {
        let mut config = VolsurfConfig::default();
        config
            .apply_env(|key| match key {
                ENV_LOG_LEVEL => Some("trace".to_string()),
                ENV_STEPS => Some("150".to_string()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.log_level, LogLevel::Trace);
        assert_eq!(config.lattice.steps, 150);

        let result = config.apply_env(|key| (key == ENV_STEPS).then(|| "many".to_string()));
        assert!(matches!(result, Err(ConfigError::InvalidSteps(_))));
    }

    #[test]
    fn test_cli_args_take_precedence() {
        let mut config = VolsurfConfig::default();
        config
            .apply_env(|key| (key == ENV_STEPS).then(|| "150".to_string()))
            .unwrap();

        let cli = CliArgs {
            log_level: Some("error".to_string()),
            steps: Some(50),
            valuation_date: Some(Date::from_ymd(2024, 6, 3).unwrap()),
            config_file: None,
        };
        config.merge_with_cli(&cli).unwrap();

        assert_eq!(config.log_level, LogLevel::Error);
        assert_eq!(config.lattice.steps, 50);
        assert_eq!(
            config.valuation_date_or_today(),
            Date::from_ymd(2024, 6, 3).unwrap()
        );
    }

    #[test]
    fn test_missing_file() {
        let result = VolsurfConfig::from_file(Path::new("/nonexistent/volsurf.toml"));
        assert!(matches!(result, Err(ConfigError::FileError(_))));
    }
}
