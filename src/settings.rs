//! Player preferences
//!
//! Key bindings for the four lanes and the mash key. Persisted separately from
//! tuning so players can rebind without touching game balance.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::MAX_FRAME_DT;
use crate::error::{Result, RhythmError};
use crate::sim::{Direction, PerDirection};

/// Keys a host can report as held
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Space,
    Enter,
    Char(char),
}

impl Key {
    pub fn label(&self) -> String {
        match self {
            Key::ArrowUp => "ArrowUp".to_string(),
            Key::ArrowDown => "ArrowDown".to_string(),
            Key::ArrowLeft => "ArrowLeft".to_string(),
            Key::ArrowRight => "ArrowRight".to_string(),
            Key::Space => "Space".to_string(),
            Key::Enter => "Enter".to_string(),
            Key::Char(c) => c.to_string(),
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "arrowup" | "up" => Some(Key::ArrowUp),
            "arrowdown" | "down" => Some(Key::ArrowDown),
            "arrowleft" | "left" => Some(Key::ArrowLeft),
            "arrowright" | "right" => Some(Key::ArrowRight),
            "space" | " " => Some(Key::Space),
            "enter" | "return" => Some(Key::Enter),
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(Key::Char(c)),
                    _ => None,
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub lanes: PerDirection<Key>,
    pub mash: Key,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            lanes: PerDirection {
                up: Key::ArrowUp,
                down: Key::ArrowDown,
                left: Key::ArrowLeft,
                right: Key::ArrowRight,
            },
            mash: Key::Space,
        }
    }
}

impl KeyBindings {
    /// Lane bound to `key`, if any
    pub fn direction_for(&self, key: Key) -> Option<Direction> {
        self.lanes
            .iter()
            .find(|(_, bound)| **bound == key)
            .map(|(dir, _)| dir)
    }

    /// Bind `key` to a lane, unbinding it from any lane it was on
    pub fn rebind(&mut self, direction: Direction, key: Key) {
        if let Some(previous) = self.direction_for(key) {
            self.lanes[previous] = self.lanes[direction];
        }
        self.lanes[direction] = key;
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub key_bindings: KeyBindings,
    /// Clamp for host frame deltas (seconds)
    pub max_frame_dt: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            key_bindings: KeyBindings::default(),
            max_frame_dt: MAX_FRAME_DT,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        // Also rejects NaN
        if !(self.max_frame_dt > 0.0) {
            return Err(RhythmError::InvalidSettings(format!(
                "max_frame_dt must be positive (got {})",
                self.max_frame_dt
            )));
        }
        Ok(())
    }

    /// Load settings, falling back to defaults when the file does not exist
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("Using default settings");
            return Ok(Self::default());
        }
        let settings = Self::from_json(&std::fs::read_to_string(path)?)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Frame delta the engine should see for a raw host delta.
    ///
    /// An unusable limit (settings built by hand) falls back to the default.
    pub fn clamp_frame_dt(&self, dt: f32) -> f32 {
        let max = if self.max_frame_dt > 0.0 {
            self.max_frame_dt
        } else {
            MAX_FRAME_DT
        };
        dt.max(0.0).min(max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_from_str() {
        assert_eq!(Key::from_str("Up"), Some(Key::ArrowUp));
        assert_eq!(Key::from_str("SPACE"), Some(Key::Space));
        assert_eq!(Key::from_str("w"), Some(Key::Char('w')));
        assert_eq!(Key::from_str("ww"), None);
        assert_eq!(Key::from_str(&Key::ArrowLeft.label()), Some(Key::ArrowLeft));
    }

    #[test]
    fn test_default_bindings() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.direction_for(Key::ArrowRight), Some(Direction::Right));
        assert_eq!(bindings.direction_for(Key::Space), None);
        assert_eq!(bindings.mash, Key::Space);
    }

    #[test]
    fn test_rebind_swaps_lanes() {
        let mut bindings = KeyBindings::default();
        bindings.rebind(Direction::Up, Key::ArrowDown);
        assert_eq!(bindings.lanes.up, Key::ArrowDown);
        assert_eq!(bindings.lanes.down, Key::ArrowUp);

        bindings.rebind(Direction::Left, Key::Char('a'));
        assert_eq!(bindings.direction_for(Key::Char('a')), Some(Direction::Left));
        assert_eq!(bindings.direction_for(Key::ArrowLeft), None);
    }

    #[test]
    fn test_partial_settings_json() {
        let settings = Settings::from_json(r#"{"max_frame_dt": 0.05}"#).unwrap();
        assert_eq!(settings.max_frame_dt, 0.05);
        assert_eq!(settings.key_bindings, KeyBindings::default());
        assert_eq!(settings.clamp_frame_dt(0.5), 0.05);
        assert_eq!(settings.clamp_frame_dt(0.01), 0.01);
    }

    #[test]
    fn test_rejects_bad_frame_clamp() {
        for json in [r#"{"max_frame_dt": -1.0}"#, r#"{"max_frame_dt": 0.0}"#] {
            assert!(matches!(
                Settings::from_json(json),
                Err(RhythmError::InvalidSettings(_))
            ));
        }

        let path = std::env::temp_dir().join("vintage_rhythm_bad_settings_test.json");
        std::fs::write(&path, r#"{"max_frame_dt": -1.0}"#).unwrap();
        assert!(Settings::load(&path).is_err());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_clamp_survives_unvalidated_limit() {
        let mut settings = Settings::default();
        settings.max_frame_dt = -1.0;
        assert_eq!(settings.clamp_frame_dt(1.0 / 60.0), 1.0 / 60.0);
        assert_eq!(settings.clamp_frame_dt(0.5), MAX_FRAME_DT);

        settings.max_frame_dt = f32::NAN;
        assert_eq!(settings.clamp_frame_dt(0.5), MAX_FRAME_DT);
        assert_eq!(settings.clamp_frame_dt(-0.2), 0.0);
    }
}
