//! Frame-stepped rhythm simulation
//!
//! All gameplay logic lives here. This module must stay host-agnostic:
//! - Time only advances through `advance(dt)`
//! - Seeded RNG only
//! - Side effects are returned, never performed

pub mod effect;
pub mod state;
pub mod tick;

pub use effect::{DestroyCause, Effect};
pub use state::{
    Arrow, Direction, HitZone, MashState, PerDirection, Phase, PhaseKind, RhythmState,
    RunStats,
};
pub use tick::{FrameInput, add_points, advance, register_hit};
