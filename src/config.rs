use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{
    SkillKind, DEFAULT_BASE_PUZZLE_COINS, DEFAULT_BASE_PUZZLE_XP, DEFAULT_BOARD_HEIGHT,
    DEFAULT_BOARD_WIDTH, DEFAULT_COMBO_REWARD_MULTIPLIER, DEFAULT_CROSS_COOLDOWN_SECS,
    DEFAULT_LINE_COOLDOWN_SECS, DEFAULT_PIECE_TYPES, DEFAULT_SESSION_SECS, MIN_PIECE_TYPES,
};

/// Session balance configuration, loadable from JSON.
///
/// Every field has a default, so a balance file only needs to name the values
/// it overrides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PuzzleConfig {
    pub board_width: usize,
    pub board_height: usize,
    pub piece_types: usize,
    /// Session length in seconds
    pub duration_secs: f32,
    /// Extra score fraction added per cascade depth beyond the first
    pub combo_reward_multiplier: f32,
    pub base_puzzle_xp: u32,
    pub base_puzzle_coins: u32,
    pub cross_cooldown_secs: f32,
    pub line_cooldown_secs: f32,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        PuzzleConfig {
            board_width: DEFAULT_BOARD_WIDTH,
            board_height: DEFAULT_BOARD_HEIGHT,
            piece_types: DEFAULT_PIECE_TYPES,
            duration_secs: DEFAULT_SESSION_SECS,
            combo_reward_multiplier: DEFAULT_COMBO_REWARD_MULTIPLIER,
            base_puzzle_xp: DEFAULT_BASE_PUZZLE_XP,
            base_puzzle_coins: DEFAULT_BASE_PUZZLE_COINS,
            cross_cooldown_secs: DEFAULT_CROSS_COOLDOWN_SECS,
            line_cooldown_secs: DEFAULT_LINE_COOLDOWN_SECS,
        }
    }
}

impl PuzzleConfig {
    /// Load configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: PuzzleConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file, falling back to defaults if the
    /// file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_width == 0 || self.board_height == 0 {
            return Err(ConfigError::Validation(
                "board dimensions must be positive".into(),
            ));
        }
        if self.piece_types < MIN_PIECE_TYPES {
            return Err(ConfigError::Validation(format!(
                "piece_types must be at least {}",
                MIN_PIECE_TYPES
            )));
        }
        if self.piece_types > u8::MAX as usize {
            return Err(ConfigError::Validation(
                "piece_types must fit in a byte".into(),
            ));
        }
        if self.duration_secs <= 0.0 {
            return Err(ConfigError::Validation("duration_secs must be > 0".into()));
        }
        if self.combo_reward_multiplier < 0.0 {
            return Err(ConfigError::Validation(
                "combo_reward_multiplier must be >= 0".into(),
            ));
        }
        if self.cross_cooldown_secs < 0.0 || self.line_cooldown_secs < 0.0 {
            return Err(ConfigError::Validation("cooldowns must be >= 0".into()));
        }
        Ok(())
    }

    /// Base cooldown for a skill, before any reduction
    pub fn base_cooldown(&self, kind: SkillKind) -> f32 {
        match kind {
            SkillKind::Cross => self.cross_cooldown_secs,
            SkillKind::Line => self.line_cooldown_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PuzzleConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.board_width, 6);
        assert_eq!(config.board_height, 6);
        assert_eq!(config.piece_types, 6);
        assert_eq!(config.duration_secs, 60.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: PuzzleConfig =
            serde_json::from_str(r#"{"duration_secs": 90.0, "piece_types": 4}"#).unwrap();
        assert_eq!(config.duration_secs, 90.0);
        assert_eq!(config.piece_types, 4);
        assert_eq!(config.board_width, DEFAULT_BOARD_WIDTH);
        assert_eq!(config.base_puzzle_xp, DEFAULT_BASE_PUZZLE_XP);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = PuzzleConfig::default();
        config.board_width = 0;
        assert!(config.validate().is_err());

        let mut config = PuzzleConfig::default();
        config.piece_types = 2;
        assert!(config.validate().is_err());

        let mut config = PuzzleConfig::default();
        config.piece_types = 300;
        assert!(config.validate().is_err());

        let mut config = PuzzleConfig::default();
        config.duration_secs = 0.0;
        assert!(config.validate().is_err());

        let mut config = PuzzleConfig::default();
        config.combo_reward_multiplier = -0.1;
        assert!(config.validate().is_err());

        let mut config = PuzzleConfig::default();
        config.line_cooldown_secs = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_base_cooldown_lookup() {
        let config = PuzzleConfig::default();
        assert_eq!(config.base_cooldown(SkillKind::Cross), 20.0);
        assert_eq!(config.base_cooldown(SkillKind::Line), 25.0);
    }

    #[test]
    fn test_json_round_trip() {
        let config = PuzzleConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: PuzzleConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
