//! Side effects emitted by `advance` for the presentation layer

use glam::Vec2;

use super::state::Direction;

/// Why an arrow left the field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestroyCause {
    Hit,
    Miss,
    /// Field cleared when gold rush ended
    GoldRushEnd,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    SpawnArrow {
        id: u32,
        direction: Direction,
        position: Vec2,
    },
    /// No spawn point configured for this direction; spawn skipped
    SpawnSkipped { direction: Direction },
    DestroyArrow { id: u32, cause: DestroyCause },
    Missed { direction: Direction },
    HealthChanged(f32),
    ScoreChanged(u32),
    ShowCombo(&'static str),
    HideCombo,
    /// Spawning paused; mash meter appears after the lead-in
    MashStarted,
    ShowMashMeter,
    MashScale(f32),
    HideMashMeter,
    MashEnded { double_points: bool },
    GoldRushStarted { duration: f32 },
    GoldRushEnded,
    GameOver { points: u32 },
}
