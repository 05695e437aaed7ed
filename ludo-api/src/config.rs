//! Server configuration from environment variables.

use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_ORACLE_TIMEOUT_MS: u64 = 8000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}: invalid socket address {value:?}")]
    InvalidAddr { var: &'static str, value: String },
    #[error("{var}: expected milliseconds, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
}

/// Delays that give observers a perceptible pace. Only their ordering
/// matters for correctness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// Dice in the air before the value is revealed.
    pub roll: Duration,
    /// Pause before passing the turn after a roll with no legal moves.
    pub empty_roll_advance: Duration,
    /// Pause before passing the turn after a move.
    pub move_advance: Duration,
    /// Pause before a policy player rolls or moves.
    pub policy: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            roll: Duration::from_millis(700),
            empty_roll_advance: Duration::from_millis(1000),
            move_advance: Duration::from_millis(500),
            policy: Duration::from_millis(1000),
        }
    }
}

impl Pacing {
    /// No delays at all.
    #[cfg(test)]
    pub fn immediate() -> Self {
        Self {
            roll: Duration::ZERO,
            empty_roll_advance: Duration::ZERO,
            move_advance: Duration::ZERO,
            policy: Duration::ZERO,
        }
    }
}

/// Where to reach the advisory oracle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// `None` runs fully offline.
    pub oracle: Option<OracleConfig>,
    pub pacing: Pacing,
}

impl ServerConfig {
    /// Read `LUDO_*` environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from any variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind = lookup("LUDO_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind.parse().map_err(|_| ConfigError::InvalidAddr {
            var: "LUDO_BIND_ADDR",
            value: bind.clone(),
        })?;

        let millis = |var: &'static str, default: Duration| -> Result<Duration, ConfigError> {
            match lookup(var) {
                None => Ok(default),
                Some(value) => value
                    .trim()
                    .parse::<u64>()
                    .map(Duration::from_millis)
                    .map_err(|_| ConfigError::InvalidNumber { var, value }),
            }
        };

        let defaults = Pacing::default();
        let pacing = Pacing {
            roll: millis("LUDO_ROLL_DELAY_MS", defaults.roll)?,
            empty_roll_advance: millis("LUDO_ADVANCE_DELAY_MS", defaults.empty_roll_advance)?,
            move_advance: millis("LUDO_MOVE_ADVANCE_DELAY_MS", defaults.move_advance)?,
            policy: millis("LUDO_POLICY_DELAY_MS", defaults.policy)?,
        };

        let oracle = match lookup("LUDO_ORACLE_URL").filter(|url| !url.trim().is_empty()) {
            None => None,
            Some(url) => Some(OracleConfig {
                base_url: url.trim().trim_end_matches('/').to_string(),
                api_key: lookup("LUDO_ORACLE_API_KEY").filter(|key| !key.is_empty()),
                timeout: millis(
                    "LUDO_ORACLE_TIMEOUT_MS",
                    Duration::from_millis(DEFAULT_ORACLE_TIMEOUT_MS),
                )?,
            }),
        };

        Ok(Self {
            bind_addr,
            oracle,
            pacing,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:8000".parse().unwrap());
        assert_eq!(config.oracle, None);
        assert_eq!(config.pacing, Pacing::default());
    }

    #[test]
    fn test_oracle_settings() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("LUDO_ORACLE_URL", "http://localhost:9000/"),
            ("LUDO_ORACLE_API_KEY", "secret"),
            ("LUDO_ORACLE_TIMEOUT_MS", "250"),
        ]))
        .unwrap();
        let oracle = config.oracle.unwrap();
        assert_eq!(oracle.base_url, "http://localhost:9000");
        assert_eq!(oracle.api_key.as_deref(), Some("secret"));
        assert_eq!(oracle.timeout, Duration::from_millis(250));
    }

    #[test]
    fn test_pacing_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("LUDO_ROLL_DELAY_MS", "0"),
            ("LUDO_POLICY_DELAY_MS", " 20 "),
        ]))
        .unwrap();
        assert_eq!(config.pacing.roll, Duration::ZERO);
        assert_eq!(config.pacing.policy, Duration::from_millis(20));
        assert_eq!(config.pacing.move_advance, Duration::from_millis(500));
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            ServerConfig::from_lookup(lookup(&[("LUDO_ROLL_DELAY_MS", "soon")])),
            Err(ConfigError::InvalidNumber {
                var: "LUDO_ROLL_DELAY_MS",
                value: "soon".to_string()
            })
        );
        assert!(matches!(
            ServerConfig::from_lookup(lookup(&[("LUDO_BIND_ADDR", "localhost")])),
            Err(ConfigError::InvalidAddr { .. })
        ));
    }
}
