//! Engine configuration.
//!
//! Provides the tunable policies of the bracket engine with environment
//! overrides for deployments.

use serde::{Deserialize, Serialize};
use std::{env, fmt, str::FromStr};
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// How first-round slots without an opponent are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ByePolicy {
    /// Allowed at start; the organizer advances the entrant with a walkover
    Walkover,
    /// Starting with an empty first-round slot fails
    Reject,
}

impl fmt::Display for ByePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ByePolicy::Walkover => write!(f, "walkover"),
            ByePolicy::Reject => write!(f, "reject"),
        }
    }
}

impl FromStr for ByePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "walkover" => Ok(ByePolicy::Walkover),
            "reject" => Ok(ByePolicy::Reject),
            _ => Err(ConfigError::InvalidValue {
                key: "BRACKET_BYE_POLICY",
                value: s.to_string(),
            }),
        }
    }
}

/// Bracket engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketConfig {
    /// Minimum seeded entrants required to start
    pub min_entrants: usize,

    /// Policy for empty first-round slots
    pub bye_policy: ByePolicy,
}

impl BracketConfig {
    /// Create configuration from environment variables
    ///
    /// Expected environment variables:
    /// - `BRACKET_MIN_ENTRANTS`: Minimum entrants to start (default: 2, at least 2)
    /// - `BRACKET_BYE_POLICY`: `walkover` or `reject` (default: walkover)
    ///
    /// Unset variables fall back to the development defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::development();

        let min_entrants = match env::var("BRACKET_MIN_ENTRANTS") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n >= 2)
                .ok_or(ConfigError::InvalidValue {
                    key: "BRACKET_MIN_ENTRANTS",
                    value: raw,
                })?,
            Err(_) => defaults.min_entrants,
        };

        let bye_policy = match env::var("BRACKET_BYE_POLICY") {
            Ok(raw) => raw.parse()?,
            Err(_) => defaults.bye_policy,
        };

        Ok(Self {
            min_entrants,
            bye_policy,
        })
    }

    /// Create a default configuration for development
    pub fn development() -> Self {
        Self {
            min_entrants: 2,
            bye_policy: ByePolicy::Walkover,
        }
    }

    pub fn with_bye_policy(mut self, bye_policy: ByePolicy) -> Self {
        self.bye_policy = bye_policy;
        self
    }
}

impl Default for BracketConfig {
    fn default() -> Self {
        Self::development()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        // SAFETY: tests touching the environment are serialized
        unsafe {
            env::remove_var("BRACKET_MIN_ENTRANTS");
            env::remove_var("BRACKET_BYE_POLICY");
        }
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        assert_eq!(BracketConfig::from_env().unwrap(), BracketConfig::default());
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        unsafe {
            env::set_var("BRACKET_MIN_ENTRANTS", "4");
            env::set_var("BRACKET_BYE_POLICY", "Reject");
        }

        let config = BracketConfig::from_env().unwrap();
        assert_eq!(config.min_entrants, 4);
        assert_eq!(config.bye_policy, ByePolicy::Reject);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_invalid_values() {
        clear_env();
        unsafe {
            env::set_var("BRACKET_MIN_ENTRANTS", "1");
        }
        assert_eq!(
            BracketConfig::from_env(),
            Err(ConfigError::InvalidValue {
                key: "BRACKET_MIN_ENTRANTS",
                value: "1".to_string()
            })
        );

        clear_env();
        unsafe {
            env::set_var("BRACKET_BYE_POLICY", "auto");
        }
        assert!(BracketConfig::from_env().is_err());
        clear_env();
    }

    #[test]
    fn test_bye_policy_round_trips_through_str() {
        assert_eq!("walkover".parse::<ByePolicy>().unwrap(), ByePolicy::Walkover);
        assert_eq!(ByePolicy::Reject.to_string(), "reject");
    }
}
