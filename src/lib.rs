//! Vintage Rhythm - an arrow-matching rhythm mini-game engine
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (spawning, hit detection, combo/mash/gold rush phases)
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences (key bindings)
//! - `platform`: Host input adaptation (edge-triggered key presses)
//! - `presenter`: Host presentation contract for engine effects
//! - `highscores`: Leaderboard of finished runs

pub mod error;
pub mod highscores;
pub mod platform;
pub mod presenter;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{Result, RhythmError};
pub use highscores::HighScores;
pub use presenter::{LogPresenter, Presenter, present};
pub use settings::{Key, KeyBindings, Settings};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed frame step used by the headless demo (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;
    /// Largest frame delta the host loop should hand to `advance`
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Arrow travel defaults (units per second)
    pub const INITIAL_ARROW_SPEED: f32 = 200.0;
    pub const SPEED_INCREASE_RATE: f32 = 10.0;
    pub const SPAWN_INTERVAL: f32 = 1.0;

    /// Health defaults
    pub const MAX_HEALTH: f32 = 100.0;
    pub const HEALTH_LOSS_PER_MISS: f32 = 10.0;

    /// Hits needed for one combo point
    pub const COMBO_LENGTH: u32 = 4;
    /// Seconds the combo banner stays up
    pub const COMBO_TEXT_DURATION: f32 = 1.0;

    /// Mash phase defaults
    pub const POINTS_TO_MASH_PHASE: u32 = 8;
    pub const MASH_TARGET_COUNT: u32 = 20;
    pub const MASH_GROW_AMOUNT: f32 = 10.0;
    pub const MASH_PAUSE_DURATION: f32 = 1.0;

    /// Gold rush defaults
    pub const GOLD_RUSH_START_POINTS: u32 = 10;
    pub const GOLD_RUSH_DURATION: f32 = 10.0;
    pub const GOLD_RUSH_SPAWN_RATE: f32 = 0.1;

    /// Layout: arrows rise from below toward a hit zone centred on y = 0
    pub const HIT_ZONE_CENTER: f32 = 0.0;
    pub const HIT_ZONE_HEIGHT: f32 = 100.0;
    pub const SPAWN_Y: f32 = -600.0;
    pub const LANE_SPACING: f32 = 100.0;

    pub const COMBO_TEXT: &str = "COMBO!";
    pub const GOLD_RUSH_TEXT: &str = "GOLD RUSH!";
}
