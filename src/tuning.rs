//! Data-driven game balance
//!
//! Every number the engine consults lives in [`Tuning`]. Defaults reproduce
//! the stock game; a JSON file can override any subset of fields.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Result, RhythmError};
use crate::sim::{Direction, HitZone, PerDirection};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Arrow travel ===
    /// Starting scroll speed (units/sec)
    pub initial_arrow_speed: f32,
    /// Scroll speed gained per second outside gold rush
    pub speed_increase_rate: f32,
    /// Seconds between spawns outside gold rush
    pub spawn_interval: f32,

    // === Health ===
    pub max_health: f32,
    pub health_loss_per_miss: f32,

    // === Combo ===
    /// Consecutive hits needed for a combo point
    pub combo_length: u32,
    /// Seconds the combo banner stays visible
    pub combo_text_duration: f32,

    // === Mash phase ===
    /// Mash phase triggers on every multiple of this many points
    pub points_to_mash_phase: u32,
    pub mash_target_count: u32,
    /// Meter scale gained per mash press
    pub mash_grow_amount: f32,
    /// Pause before the mash meter appears
    pub mash_pause_duration: f32,

    // === Gold rush ===
    pub gold_rush_start_points: u32,
    pub gold_rush_duration: f32,
    /// Seconds between spawns during gold rush
    pub gold_rush_spawn_rate: f32,

    // === Layout ===
    pub hit_zone: HitZone,
    /// Entry point per direction; `None` is a configuration defect
    pub spawn_points: PerDirection<Option<Vec2>>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            initial_arrow_speed: INITIAL_ARROW_SPEED,
            speed_increase_rate: SPEED_INCREASE_RATE,
            spawn_interval: SPAWN_INTERVAL,

            max_health: MAX_HEALTH,
            health_loss_per_miss: HEALTH_LOSS_PER_MISS,

            combo_length: COMBO_LENGTH,
            combo_text_duration: COMBO_TEXT_DURATION,

            points_to_mash_phase: POINTS_TO_MASH_PHASE,
            mash_target_count: MASH_TARGET_COUNT,
            mash_grow_amount: MASH_GROW_AMOUNT,
            mash_pause_duration: MASH_PAUSE_DURATION,

            gold_rush_start_points: GOLD_RUSH_START_POINTS,
            gold_rush_duration: GOLD_RUSH_DURATION,
            gold_rush_spawn_rate: GOLD_RUSH_SPAWN_RATE,

            hit_zone: HitZone::default(),
            spawn_points: default_spawn_points(),
        }
    }
}

/// Four lanes side by side below the hit zone (Left, Down, Up, Right)
fn default_spawn_points() -> PerDirection<Option<Vec2>> {
    PerDirection::from_fn(|dir| {
        let lane = match dir {
            Direction::Left => -1.5,
            Direction::Down => -0.5,
            Direction::Up => 0.5,
            Direction::Right => 1.5,
        };
        Some(Vec2::new(lane * LANE_SPACING, SPAWN_Y))
    })
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values the engine cannot run with.
    ///
    /// Missing spawn points are not rejected here; the engine reports them
    /// per spawn and keeps running.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("spawn_interval", self.spawn_interval),
            ("gold_rush_spawn_rate", self.gold_rush_spawn_rate),
            ("max_health", self.max_health),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(RhythmError::InvalidTuning(format!(
                    "{name} must be positive (got {value})"
                )));
            }
        }

        let non_negative = [
            ("initial_arrow_speed", self.initial_arrow_speed),
            ("speed_increase_rate", self.speed_increase_rate),
            ("health_loss_per_miss", self.health_loss_per_miss),
            ("combo_text_duration", self.combo_text_duration),
            ("mash_grow_amount", self.mash_grow_amount),
            ("mash_pause_duration", self.mash_pause_duration),
            ("gold_rush_duration", self.gold_rush_duration),
        ];
        for (name, value) in non_negative {
            if !(value >= 0.0) {
                return Err(RhythmError::InvalidTuning(format!(
                    "{name} must not be negative (got {value})"
                )));
            }
        }

        if self.combo_length == 0 {
            return Err(RhythmError::InvalidTuning(
                "combo_length must be at least 1".to_string(),
            ));
        }
        if self.points_to_mash_phase == 0 {
            return Err(RhythmError::InvalidTuning(
                "points_to_mash_phase must be at least 1".to_string(),
            ));
        }
        if self.mash_target_count == 0 {
            return Err(RhythmError::InvalidTuning(
                "mash_target_count must be at least 1".to_string(),
            ));
        }

        // Re-check in case the struct was built by hand rather than deserialized
        HitZone::new(self.hit_zone.bottom(), self.hit_zone.top())?;

        Ok(())
    }

    /// Directions with no configured entry point
    pub fn missing_spawn_points(&self) -> Vec<Direction> {
        self.spawn_points
            .iter()
            .filter(|(_, point)| point.is_none())
            .map(|(dir, _)| dir)
            .collect()
    }
}
