//! Host configuration read from the environment.

use std::env;

use crate::core::{GameConfig, PrimaryBounds};
use crate::types::{SPAWN_ATTEMPTS, TICK_MS};

/// Settings for the terminal host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    /// Period between ticks.
    pub tick_ms: u32,
    /// RNG seed; `None` seeds from the clock at startup.
    pub seed: Option<u32>,
    pub bounds: PrimaryBounds,
    pub spawn_attempts: u8,
    /// JSON-lines event log; disabled when unset.
    pub log_path: Option<String>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            tick_ms: TICK_MS,
            seed: None,
            bounds: PrimaryBounds::Floor,
            spawn_attempts: SPAWN_ATTEMPTS,
            log_path: None,
        }
    }
}

impl HostConfig {
    /// Create from `POLYDROP_*` environment variables.
    ///
    /// Unset or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`HostConfig::from_env`] with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let var = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let tick_ms = var("POLYDROP_TICK_MS")
            .and_then(|s| s.parse().ok())
            .filter(|&ms: &u32| ms > 0)
            .unwrap_or(defaults.tick_ms);

        let seed = var("POLYDROP_SEED").and_then(|s| s.parse().ok());

        let bounds = var("POLYDROP_PRIMARY_BOUNDS")
            .and_then(|s| PrimaryBounds::from_str(&s))
            .unwrap_or(defaults.bounds);

        let spawn_attempts = var("POLYDROP_SPAWN_ATTEMPTS")
            .and_then(|s| s.parse().ok())
            .filter(|&n: &u8| n > 0)
            .unwrap_or(defaults.spawn_attempts);

        let log_path = var("POLYDROP_LOG_PATH");

        Self {
            tick_ms,
            seed,
            bounds,
            spawn_attempts,
            log_path,
        }
    }

    /// Rules handed to the core.
    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            bounds: self.bounds,
            spawn_attempts: self.spawn_attempts,
        }
    }

    /// The configured seed, or one derived from the current time.
    pub fn resolve_seed(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
                .unwrap_or(1)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = HostConfig::from_lookup(|_| None);
        assert_eq!(config, HostConfig::default());
        assert_eq!(config.tick_ms, 500);
        assert_eq!(config.game_config(), GameConfig::default());
    }

    #[test]
    fn test_reads_every_variable() {
        let config = HostConfig::from_lookup(lookup(&[
            ("POLYDROP_TICK_MS", "250"),
            ("POLYDROP_SEED", "42"),
            ("POLYDROP_PRIMARY_BOUNDS", "Wrap"),
            ("POLYDROP_SPAWN_ATTEMPTS", "1"),
            ("POLYDROP_LOG_PATH", " /tmp/polydrop.jsonl "),
        ]));
        assert_eq!(config.tick_ms, 250);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.resolve_seed(), 42);
        assert_eq!(config.bounds, PrimaryBounds::Wrap);
        assert_eq!(config.spawn_attempts, 1);
        assert_eq!(config.log_path.as_deref(), Some("/tmp/polydrop.jsonl"));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = HostConfig::from_lookup(lookup(&[
            ("POLYDROP_TICK_MS", "0"),
            ("POLYDROP_SEED", "soon"),
            ("POLYDROP_PRIMARY_BOUNDS", "sideways"),
            ("POLYDROP_SPAWN_ATTEMPTS", "900"),
            ("POLYDROP_LOG_PATH", "   "),
        ]));
        assert_eq!(config, HostConfig::default());
    }
}
