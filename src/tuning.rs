//! Data-driven game balance
//!
//! All gameplay numbers live here so the sim never hard-codes them. Speeds are
//! pixels per tick at `consts::SIM_HZ`. Positions use a top-left origin with y
//! growing downward, matching the canvas the game is drawn into.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::settings::Settings;

/// Errors produced while reading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config parse failed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

/// Longest accepted countdown
pub const MAX_COUNTDOWN_SECS: u32 = 60;
/// Most enemies a session may keep alive
pub const MAX_ENEMY_COUNT: usize = 256;

/// Gameplay tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Play area width in logical pixels
    pub play_width: f32,
    /// Play area height in logical pixels
    pub play_height: f32,

    pub player_width: f32,
    pub player_height: f32,
    /// Horizontal pixels per tick while a direction is held
    pub player_speed: f32,
    /// Distance from the bottom edge to the player's top edge
    pub player_bottom_offset: f32,

    pub bullet_width: f32,
    pub bullet_height: f32,
    /// Upward pixels per tick
    pub bullet_speed: f32,

    pub enemy_width: f32,
    pub enemy_height: f32,
    /// Downward pixels per tick
    pub enemy_speed: f32,
    /// Enemies alive at any time
    pub enemy_count: usize,

    /// An enemy whose y exceeds `play_height - loss_margin` ends the session
    pub loss_margin: f32,
    pub score_per_hit: u32,
    /// Countdown before play starts (0 skips the countdown)
    pub countdown_secs: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            play_width: 480.0,
            play_height: 640.0,

            player_width: 40.0,
            player_height: 60.0,
            player_speed: 4.0,
            player_bottom_offset: 100.0,

            bullet_width: 6.0,
            bullet_height: 15.0,
            bullet_speed: 5.0,

            enemy_width: 50.0,
            enemy_height: 50.0,
            enemy_speed: 1.0,
            enemy_count: 7,

            loss_margin: 100.0,
            score_per_hit: 10,
            countdown_secs: 3,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validated()
    }

    /// Return self if valid, otherwise every problem found
    pub fn validated(self) -> Result<Self, ConfigError> {
        let problems = self.validate();
        if problems.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Invalid(problems))
        }
    }

    /// List configuration problems (empty when usable)
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();

        let positive = [
            ("play_width", self.play_width),
            ("play_height", self.play_height),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("player_speed", self.player_speed),
            ("bullet_width", self.bullet_width),
            ("bullet_height", self.bullet_height),
            ("bullet_speed", self.bullet_speed),
            ("enemy_width", self.enemy_width),
            ("enemy_height", self.enemy_height),
            ("enemy_speed", self.enemy_speed),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                problems.push(format!("{name} must be > 0 (got {value})"));
            }
        }

        if self.player_width > self.play_width {
            problems.push("player_width exceeds play_width".to_string());
        }
        if self.enemy_width > self.play_width {
            problems.push("enemy_width exceeds play_width".to_string());
        }
        if self.player_bottom_offset < 0.0 || self.player_bottom_offset > self.play_height {
            problems.push(format!(
                "player_bottom_offset must be within 0..={} (got {})",
                self.play_height, self.player_bottom_offset
            ));
        }
        if self.loss_margin < 0.0 || self.loss_margin >= self.play_height {
            problems.push(format!(
                "loss_margin must be within 0..{} (got {})",
                self.play_height, self.loss_margin
            ));
        }
        if self.enemy_count == 0 || self.enemy_count > MAX_ENEMY_COUNT {
            problems.push(format!(
                "enemy_count must be within 1..={MAX_ENEMY_COUNT} (got {})",
                self.enemy_count
            ));
        }
        if self.countdown_secs > MAX_COUNTDOWN_SECS {
            problems.push(format!(
                "countdown_secs must be at most {MAX_COUNTDOWN_SECS} (got {})",
                self.countdown_secs
            ));
        }

        problems
    }

    /// Countdown length in ticks
    pub fn countdown_ticks(&self) -> u32 {
        self.countdown_secs.saturating_mul(crate::consts::SIM_HZ)
    }

    /// Largest x the player may occupy
    pub fn player_max_x(&self) -> f32 {
        (self.play_width - self.player_width).max(0.0)
    }

    /// y beyond which an enemy counts as a breach
    pub fn breach_line(&self) -> f32 {
        self.play_height - self.loss_margin
    }
}

/// Combined page/CLI configuration document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub tuning: Tuning,
    pub settings: Settings,
}

impl GameConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        let tuning = config.tuning.validated()?;
        Ok(Self {
            tuning,
            settings: config.settings.sanitized(),
        })
    }

    /// Parse `json`, falling back to defaults (with a warning) on any error
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(config) => {
                log::info!("Loaded game config");
                config
            }
            Err(e) => {
                log::warn!("{e}; using default config");
                Self::default()
            }
        }
    }
}
