//! Engine tunables.
//!
//! Everything empirically tuned lives here so it can be changed without
//! touching code: the Monte Carlo iteration budget, the bounty payout
//! constants, and which policy ladder to play. Loaded from TOML.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::policy::Policy;

/// Named bounty payout constants.
///
/// These differ slightly across tuning generations and are treated as
/// configuration, not invariants.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct BountyConstants {
    /// Flat chip bonus paid on top of a bounty-awarded pot.
    pub flat_bonus: f64,
    /// Strength credit for winning with the own bounty visible (and the
    /// penalty for losing to a visible opponent bounty).
    pub win_rate: f64,
    /// Strength credit shift on ties where exactly one bounty is visible.
    pub tie_rate: f64,
}

impl Default for BountyConstants {
    fn default() -> Self {
        Self {
            flat_bonus: 10.0,
            win_rate: 0.25,
            tie_rate: 0.125,
        }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Monte Carlo samples per postflop strength query. The knob that
    /// trades accuracy for latency under the match clock.
    pub iterations: u32,
    /// Weight of bounty adjustments inside the strength score.
    pub bounty_weight: f64,
    /// Which policy ladder to play.
    pub policy: Policy,
    /// Bounty payout constants.
    pub bounty: BountyConstants,
    /// Fixed RNG seed; omit for entropy-seeded play.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            iterations: 2000,
            bounty_weight: 0.0,
            policy: Policy::Balanced,
            bounty: BountyConstants::default(),
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or fails validation.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.iterations == 0 {
            return Err(ConfigError::InvalidIterations);
        }
        if self.bounty_weight < 0.0 {
            return Err(ConfigError::InvalidRate("bounty_weight", self.bounty_weight));
        }
        if self.bounty.flat_bonus < 0.0 {
            return Err(ConfigError::InvalidRate("flat_bonus", self.bounty.flat_bonus));
        }
        if self.bounty.win_rate < 0.0 {
            return Err(ConfigError::InvalidRate("win_rate", self.bounty.win_rate));
        }
        if self.bounty.tie_rate < 0.0 {
            return Err(ConfigError::InvalidRate("tie_rate", self.bounty.tie_rate));
        }
        Ok(())
    }
}

/// Errors from loading or validating the engine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading the config file.
    #[error("failed to read config file {0}: {1}")]
    Io(std::path::PathBuf, #[source] std::io::Error),

    /// TOML parsing error.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// Iteration budget must be positive.
    #[error("iterations must be at least 1")]
    InvalidIterations,

    /// A rate constant was negative.
    #[error("invalid {0}: {1} (must be >= 0)")]
    InvalidRate(&'static str, f64),
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_macros::timed_test;

    #[timed_test]
    fn defaults_are_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.iterations, 2000);
        assert_eq!(config.policy, Policy::Balanced);
    }

    #[timed_test]
    fn parse_full_config() {
        let toml = r#"
iterations = 500
bounty_weight = 1.0
policy = "aggressive"
seed = 42

[bounty]
flat_bonus = 10.0
win_rate = 0.25
tie_rate = 0.125
"#;
        let config = EngineConfig::from_toml(toml).unwrap();
        assert_eq!(config.iterations, 500);
        assert_eq!(config.policy, Policy::Aggressive);
        assert_eq!(config.seed, Some(42));
        assert!((config.bounty_weight - 1.0).abs() < 1e-12);
    }

    #[timed_test]
    fn partial_config_fills_defaults() {
        let config = EngineConfig::from_toml("iterations = 100").unwrap();
        assert_eq!(config.iterations, 100);
        assert_eq!(config.policy, Policy::Balanced);
        assert!((config.bounty.flat_bonus - 10.0).abs() < 1e-12);
    }

    #[timed_test]
    fn zero_iterations_rejected() {
        let result = EngineConfig::from_toml("iterations = 0");
        assert!(matches!(result, Err(ConfigError::InvalidIterations)));
    }

    #[timed_test]
    fn negative_rate_rejected() {
        let result = EngineConfig::from_toml("[bounty]\nwin_rate = -0.5");
        assert!(matches!(result, Err(ConfigError::InvalidRate("win_rate", _))));
    }

    #[timed_test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.toml");
        std::fs::write(&path, "iterations = 64\npolicy = \"conservative\"").unwrap();

        let config = EngineConfig::load(&path).unwrap();
        assert_eq!(config.iterations, 64);
        assert_eq!(config.policy, Policy::Conservative);
    }

    #[timed_test]
    fn load_missing_file_errors() {
        let result = EngineConfig::load("/tmp/no_such_engine_config.toml");
        assert!(matches!(result, Err(ConfigError::Io(_, _))));
    }
}
