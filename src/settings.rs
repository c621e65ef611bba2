//! Player preferences
//!
//! Read from the page's embedded config (or a file on native). Nothing is
//! written back: every session starts from the configured values.

use serde::{Deserialize, Serialize};

use crate::tuning::ConfigError;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Background loop volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Silence all cues
    pub muted: bool,

    // === Session ===
    /// Pause automatically when the tab is hidden or the window loses focus
    pub pause_on_blur: bool,

    // === HUD ===
    /// Log FPS once per second
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
            pause_on_blur: true,
            show_fps: false,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    /// Clamp volumes into range (NaN becomes silent)
    pub fn sanitized(mut self) -> Self {
        for vol in [
            &mut self.master_volume,
            &mut self.sfx_volume,
            &mut self.music_volume,
        ] {
            *vol = if vol.is_nan() { 0.0 } else { vol.clamp(0.0, 1.0) };
        }
        self
    }

    /// Effective volume for sound effects
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Effective volume for the background loop
    pub fn effective_music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitized_clamps_volumes() {
        let settings = Settings {
            master_volume: 1.5,
            sfx_volume: -0.2,
            music_volume: f32::NAN,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(settings.master_volume, 1.0);
        assert_eq!(settings.sfx_volume, 0.0);
        assert_eq!(settings.music_volume, 0.0);
    }

    #[test]
    fn test_from_json_partial() {
        let settings = Settings::from_json(r#"{"muted": true, "sfx_volume": 3.0}"#).unwrap();
        assert!(settings.muted);
        assert_eq!(settings.sfx_volume, 1.0);
        assert!(settings.pause_on_blur);
        assert!(Settings::from_json("{").is_err());
    }

    #[test]
    fn test_mute_silences_everything() {
        let settings = Settings {
            muted: true,
            ..Default::default()
        };
        assert_eq!(settings.effective_sfx_volume(), 0.0);
        assert_eq!(settings.effective_music_volume(), 0.0);

        let settings = Settings::default();
        assert!((settings.effective_sfx_volume() - 0.8).abs() < 1e-6);
        assert!((settings.effective_music_volume() - 0.56).abs() < 1e-6);
    }
}
