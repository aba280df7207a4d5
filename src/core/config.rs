//! Session configuration.
//!
//! Hosts configure the engine at construction time with a `GameConfig`,
//! either through the `with_*` builders or by deserializing JSON:
//!
//! ```
//! use klondike_engine::core::GameConfig;
//!
//! let config = GameConfig::from_json(r#"{ "draw_count": 1, "seed": 7 }"#).unwrap();
//! assert_eq!(config.draw_count, 1);
//! assert_eq!(config.undo_capacity, 10);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected configuration values.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("draw count must be at least 1")]
    ZeroDrawCount,

    #[error("undo capacity must be at least 1")]
    ZeroUndoCapacity,

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Engine configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Cards moved from stock to waste per draw (default: 3).
    pub draw_count: usize,

    /// Moves kept in the undo history (default: 10).
    /// The oldest record is evicted when full.
    pub undo_capacity: usize,

    /// Seed for deals and recycles.
    /// Same seed produces the same sequence of games.
    pub seed: u64,

    /// Debug only: empty tableau columns accept any card, not just Kings.
    /// Scores and wins reached in this mode carry no guarantees.
    pub relaxed_tableau: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            draw_count: 3,
            undo_capacity: 10,
            seed: 42,
            relaxed_tableau: false,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON configuration. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.draw_count == 0 {
            return Err(ConfigError::ZeroDrawCount);
        }
        if self.undo_capacity == 0 {
            return Err(ConfigError::ZeroUndoCapacity);
        }
        Ok(())
    }

    #[must_use]
    pub fn with_draw_count(mut self, count: usize) -> Self {
        self.draw_count = count;
        self
    }

    #[must_use]
    pub fn with_undo_capacity(mut self, capacity: usize) -> Self {
        self.undo_capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Enable the debug-only relaxed tableau rule.
    #[must_use]
    pub fn with_relaxed_tableau(mut self, relaxed: bool) -> Self {
        self.relaxed_tableau = relaxed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.draw_count, 3);
        assert_eq!(config.undo_capacity, 10);
        assert!(!config.relaxed_tableau);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = GameConfig::default()
            .with_draw_count(1)
            .with_undo_capacity(5)
            .with_seed(99)
            .with_relaxed_tableau(true);

        assert_eq!(config.draw_count, 1);
        assert_eq!(config.undo_capacity, 5);
        assert_eq!(config.seed, 99);
        assert!(config.relaxed_tableau);
    }

    #[test]
    fn test_validate_rejects_zero() {
        let config = GameConfig::default().with_draw_count(0);
        assert!(matches!(config.validate(), Err(ConfigError::ZeroDrawCount)));

        let config = GameConfig::default().with_undo_capacity(0);
        assert!(matches!(config.validate(), Err(ConfigError::ZeroUndoCapacity)));
    }

    #[test]
    fn test_from_json_partial() {
        let config = GameConfig::from_json(r#"{ "relaxed_tableau": true }"#).unwrap();
        assert!(config.relaxed_tableau);
        assert_eq!(config.draw_count, 3);
    }

    #[test]
    fn test_from_json_errors() {
        assert!(matches!(
            GameConfig::from_json("not json"),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{ "draw_count": 0 }"#),
            Err(ConfigError::ZeroDrawCount)
        ));
    }
}
