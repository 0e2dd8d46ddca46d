//! Game state and core simulation types
//!
//! Everything the engine mutates between frames lives here, including the
//! timers that replace suspended coroutines (mash lead-in, gold rush,
//! combo banner).

use std::ops::{Index, IndexMut};

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::error::RhythmError;
use crate::tuning::Tuning;

/// Arrow / lane direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Fixed order used for uniform random selection
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "Up",
            Direction::Down => "Down",
            Direction::Left => "Left",
            Direction::Right => "Right",
        }
    }
}

/// Lookup table keyed by direction (prefabs, spawn points, bindings, presses)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PerDirection<T> {
    pub up: T,
    pub down: T,
    pub left: T,
    pub right: T,
}

impl<T> PerDirection<T> {
    pub fn from_fn(mut f: impl FnMut(Direction) -> T) -> Self {
        Self {
            up: f(Direction::Up),
            down: f(Direction::Down),
            left: f(Direction::Left),
            right: f(Direction::Right),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Direction, &T)> {
        Direction::ALL.into_iter().map(move |dir| (dir, &self[dir]))
    }
}

impl<T> Index<Direction> for PerDirection<T> {
    type Output = T;

    fn index(&self, dir: Direction) -> &T {
        match dir {
            Direction::Up => &self.up,
            Direction::Down => &self.down,
            Direction::Left => &self.left,
            Direction::Right => &self.right,
        }
    }
}

impl<T> IndexMut<Direction> for PerDirection<T> {
    fn index_mut(&mut self, dir: Direction) -> &mut T {
        match dir {
            Direction::Up => &mut self.up,
            Direction::Down => &mut self.down,
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
        }
    }
}

/// Interval on the travel axis where a matching press counts as a hit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "HitZoneBounds")]
pub struct HitZone {
    bottom: f32,
    top: f32,
}

#[derive(Deserialize)]
struct HitZoneBounds {
    bottom: f32,
    top: f32,
}

impl TryFrom<HitZoneBounds> for HitZone {
    type Error = RhythmError;

    fn try_from(bounds: HitZoneBounds) -> Result<Self, Self::Error> {
        HitZone::new(bounds.bottom, bounds.top)
    }
}

impl Default for HitZone {
    fn default() -> Self {
        use crate::consts::{HIT_ZONE_CENTER, HIT_ZONE_HEIGHT};
        Self {
            bottom: HIT_ZONE_CENTER - HIT_ZONE_HEIGHT / 2.0,
            top: HIT_ZONE_CENTER + HIT_ZONE_HEIGHT / 2.0,
        }
    }
}

impl HitZone {
    pub fn new(bottom: f32, top: f32) -> Result<Self, RhythmError> {
        // Also rejects NaN bounds
        if !(bottom < top) {
            return Err(RhythmError::InvalidHitZone { bottom, top });
        }
        Ok(Self { bottom, top })
    }

    /// Zone of `height` centred on `center` (how a UI rect describes it)
    pub fn centered(center: f32, height: f32) -> Result<Self, RhythmError> {
        Self::new(center - height / 2.0, center + height / 2.0)
    }

    pub fn bottom(&self) -> f32 {
        self.bottom
    }

    pub fn top(&self) -> f32 {
        self.top
    }

    /// Inclusive on both edges
    pub fn contains(&self, y: f32) -> bool {
        y >= self.bottom && y <= self.top
    }

    /// Arrow has travelled beyond the far edge
    pub fn is_past(&self, y: f32) -> bool {
        y > self.top
    }
}

/// An arrow travelling toward the hit zone
#[derive(Debug, Clone, PartialEq)]
pub struct Arrow {
    pub id: u32,
    pub direction: Direction,
    pub pos: Vec2,
    pub speed: f32,
}

impl Arrow {
    pub fn new(id: u32, direction: Direction, pos: Vec2, speed: f32) -> Self {
        Self {
            id,
            direction,
            pos,
            speed,
        }
    }

    /// Move along the travel axis at the shared scroll speed
    pub fn advance(&mut self, speed: f32, dt: f32) {
        self.speed = speed;
        self.pos.y += speed * dt;
    }
}

/// Button-mash interlude progress
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MashState {
    /// Seconds left before the mash meter is shown
    pub lead_in_remaining: f32,
    pub presses: u32,
    /// Visual scale of the mash meter (1.0 at start)
    pub scale: f32,
}

impl MashState {
    pub fn new(lead_in: f32) -> Self {
        Self {
            lead_in_remaining: lead_in,
            presses: 0,
            scale: 1.0,
        }
    }

    pub fn meter_visible(&self) -> bool {
        self.lead_in_remaining <= 0.0
    }
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    /// Arrows spawn and scroll, combos score
    Normal,
    /// Spawning and scrolling suspended until the mash target is reached
    Mash(MashState),
    /// Fast spawns, every hit scores
    GoldRush { remaining: f32 },
    /// Health ran out
    GameOver,
}

/// Which phase is active, without its timers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhaseKind {
    Normal,
    Mash,
    GoldRush,
    GameOver,
}

impl Phase {
    pub fn kind(&self) -> PhaseKind {
        match self {
            Phase::Normal => PhaseKind::Normal,
            Phase::Mash(_) => PhaseKind::Mash,
            Phase::GoldRush { .. } => PhaseKind::GoldRush,
            Phase::GameOver => PhaseKind::GameOver,
        }
    }

    pub fn is_gold_rush(&self) -> bool {
        matches!(self, Phase::GoldRush { .. })
    }

    pub fn is_mash(&self) -> bool {
        matches!(self, Phase::Mash(_))
    }
}

/// Per-run counters (for the leaderboard and the demo summary)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub hits: u32,
    pub misses: u32,
    pub combos: u32,
    pub gold_rushes: u32,
    pub mash_phases: u32,
}

/// Complete engine state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct RhythmState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Balance parameters this run was started with
    pub tuning: Tuning,
    /// Shared scroll speed of every arrow
    pub arrow_speed: f32,
    pub health: f32,
    pub points: u32,
    pub consecutive_hits: u32,
    pub phase: Phase,
    pub double_points_active: bool,
    /// Elapsed seconds, accumulated from frame deltas
    pub clock: f64,
    pub next_spawn_time: f64,
    /// Seconds until the combo banner auto-hides (None = no pending hide)
    pub banner_remaining: Option<f32>,
    pub stats: RunStats,
    /// Active arrows in insertion order
    pub arrows: Vec<Arrow>,
    rng: Pcg32,
    next_id: u32,
}

impl RhythmState {
    /// Create a new run with the given tuning and seed
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        Self {
            seed,
            arrow_speed: tuning.initial_arrow_speed,
            health: tuning.max_health,
            points: 0,
            consecutive_hits: 0,
            phase: Phase::Normal,
            double_points_active: false,
            clock: 0.0,
            next_spawn_time: 0.0,
            banner_remaining: None,
            stats: RunStats::default(),
            arrows: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            tuning,
        }
    }

    /// Allocate a new arrow ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add an arrow at `pos` moving at the current scroll speed
    pub fn insert_arrow(&mut self, direction: Direction, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.arrows
            .push(Arrow::new(id, direction, pos, self.arrow_speed));
        id
    }

    /// Uniformly random direction from the run RNG
    pub fn random_direction(&mut self) -> Direction {
        Direction::ALL[self.rng.random_range(0..Direction::ALL.len())]
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_zone_rejects_inverted_bounds() {
        assert!(HitZone::new(10.0, 10.0).is_err());
        assert!(HitZone::new(20.0, 10.0).is_err());
        assert!(HitZone::new(f32::NAN, 10.0).is_err());

        let zone = HitZone::centered(0.0, 100.0).unwrap();
        assert_eq!(zone.bottom(), -50.0);
        assert_eq!(zone.top(), 50.0);
    }

    #[test]
    fn test_hit_zone_edges() {
        let zone = HitZone::new(-50.0, 50.0).unwrap();
        assert!(zone.contains(-50.0));
        assert!(zone.contains(50.0));
        assert!(!zone.contains(-50.1));
        assert!(!zone.is_past(50.0));
        assert!(zone.is_past(50.1));
    }

    #[test]
    fn test_hit_zone_deserialize_validates() {
        let ok: HitZone = serde_json::from_str(r#"{"bottom": -10.0, "top": 10.0}"#).unwrap();
        assert_eq!(ok.top(), 10.0);

        let bad = serde_json::from_str::<HitZone>(r#"{"bottom": 10.0, "top": -10.0}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_per_direction_lookup() {
        let mut table = PerDirection::from_fn(|dir| dir.as_str().len());
        assert_eq!(table[Direction::Up], 2);
        assert_eq!(table[Direction::Right], 5);

        table[Direction::Left] = 0;
        assert_eq!(table.left, 0);
        assert_eq!(table.iter().count(), 4);
    }

    #[test]
    fn test_phase_kind() {
        assert_eq!(Phase::Mash(MashState::new(1.0)).kind(), PhaseKind::Mash);
        assert_eq!(Phase::GoldRush { remaining: 2.0 }.kind(), PhaseKind::GoldRush);
        assert_eq!(Phase::GameOver.kind(), PhaseKind::GameOver);
    }

    #[test]
    fn test_entity_ids_unique() {
        let mut state = RhythmState::new(Tuning::default(), 1);
        let a = state.insert_arrow(Direction::Up, Vec2::ZERO);
        let b = state.insert_arrow(Direction::Down, Vec2::ZERO);
        assert_ne!(a, b);
        assert_eq!(state.arrows.len(), 2);
        assert_eq!(state.arrows[1].speed, state.tuning.initial_arrow_speed);
    }

    #[test]
    fn test_random_direction_deterministic() {
        let mut s1 = RhythmState::new(Tuning::default(), 42);
        let mut s2 = RhythmState::new(Tuning::default(), 42);
        for _ in 0..32 {
            assert_eq!(s1.random_direction(), s2.random_direction());
        }
    }
}
