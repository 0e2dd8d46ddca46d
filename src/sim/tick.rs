//! Per-frame simulation step
//!
//! Core game loop that advances the rhythm engine by one host frame and
//! reports what changed as a list of [`Effect`]s.

use super::effect::{DestroyCause, Effect};
use super::state::{Direction, MashState, PerDirection, Phase, RhythmState};
use crate::consts::{COMBO_TEXT, GOLD_RUSH_TEXT};

/// Input for a single frame (edge-triggered presses)
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Direction keys that went down this frame
    pub pressed: PerDirection<bool>,
    /// Mash key went down this frame
    pub mash: bool,
    /// Demo mode - the engine plays itself
    pub autoplay: bool,
}

impl FrameInput {
    pub fn press(direction: Direction) -> Self {
        let mut input = Self::default();
        input.pressed[direction] = true;
        input
    }

    pub fn mash() -> Self {
        Self {
            mash: true,
            ..Default::default()
        }
    }

    pub fn autoplay() -> Self {
        Self {
            autoplay: true,
            ..Default::default()
        }
    }
}

/// Advance the engine by one frame of `dt` seconds
pub fn advance(state: &mut RhythmState, input: &FrameInput, dt: f32) -> Vec<Effect> {
    let mut effects = Vec::new();

    if state.is_game_over() {
        return effects;
    }

    state.clock += dt as f64;

    // Combo banner auto-hide
    if let Some(remaining) = state.banner_remaining.as_mut() {
        *remaining -= dt;
        if *remaining <= 0.0 {
            state.banner_remaining = None;
            effects.push(Effect::HideCombo);
        }
    }

    let mut input = input.clone();
    if input.autoplay {
        autoplay_presses(state, &mut input, dt);
    }
    let input = &input;

    if let Phase::Mash(mash) = state.phase {
        advance_mash(state, mash, input, dt, &mut effects);
        return effects;
    }

    // Gold rush timer
    if let Phase::GoldRush { remaining } = state.phase {
        let remaining = remaining - dt;
        if remaining <= 0.0 {
            end_gold_rush(state, &mut effects);
        } else {
            state.phase = Phase::GoldRush { remaining };
        }
    }

    let gold_rush = state.phase.is_gold_rush();

    // Scroll speed ramps up outside gold rush
    if !gold_rush {
        state.arrow_speed += state.tuning.speed_increase_rate * dt;
    }

    if state.clock >= state.next_spawn_time {
        spawn_random_arrow(state, &mut effects);
        let interval = if gold_rush {
            state.tuning.gold_rush_spawn_rate
        } else {
            state.tuning.spawn_interval
        };
        state.next_spawn_time = state.clock + interval as f64;
    }

    // Reverse insertion order so removal during iteration is safe
    let speed = state.arrow_speed;
    let zone = state.tuning.hit_zone;
    let mut i = state.arrows.len();
    while i > 0 {
        i -= 1;
        state.arrows[i].advance(speed, dt);
        let y = state.arrows[i].pos.y;
        let direction = state.arrows[i].direction;

        if zone.is_past(y) {
            let arrow = state.arrows.remove(i);
            effects.push(Effect::DestroyArrow {
                id: arrow.id,
                cause: DestroyCause::Miss,
            });
            register_miss(state, direction, &mut effects);
            if state.is_game_over() {
                break;
            }
        } else if zone.contains(y) && input.pressed[direction] {
            let arrow = state.arrows.remove(i);
            effects.push(Effect::DestroyArrow {
                id: arrow.id,
                cause: DestroyCause::Hit,
            });
            register_hit(state, &mut effects);
            if state.phase.is_mash() {
                break;
            }
        }
    }

    effects
}

/// Count mash presses; spawning and scrolling stay suspended
fn advance_mash(
    state: &mut RhythmState,
    mut mash: MashState,
    input: &FrameInput,
    dt: f32,
    effects: &mut Vec<Effect>,
) {
    if !mash.meter_visible() {
        mash.lead_in_remaining -= dt;
        if mash.meter_visible() {
            // The meter appears at its base size whatever was pressed before
            mash.scale = 1.0;
            effects.push(Effect::ShowMashMeter);
            effects.push(Effect::MashScale(mash.scale));
        }
    }

    if input.mash {
        mash.presses += 1;
        mash.scale += state.tuning.mash_grow_amount;
        effects.push(Effect::MashScale(mash.scale));

        if mash.presses >= state.tuning.mash_target_count {
            state.double_points_active = true;
            state.phase = Phase::Normal;
            effects.push(Effect::HideMashMeter);
            effects.push(Effect::MashEnded {
                double_points: true,
            });
            log::info!(
                "Mash phase complete after {} presses - double points active",
                mash.presses
            );
            return;
        }
    }

    state.phase = Phase::Mash(mash);
}

/// Spawn one arrow with a random direction at its entry point
fn spawn_random_arrow(state: &mut RhythmState, effects: &mut Vec<Effect>) {
    let direction = state.random_direction();
    match state.tuning.spawn_points[direction] {
        Some(position) => {
            let id = state.insert_arrow(direction, position);
            log::debug!("Spawned {} arrow {} at {:?}", direction.as_str(), id, position);
            effects.push(Effect::SpawnArrow {
                id,
                direction,
                position,
            });
        }
        None => {
            log::warn!(
                "Spawn point not assigned for direction: {}",
                direction.as_str()
            );
            effects.push(Effect::SpawnSkipped { direction });
        }
    }
}

fn register_miss(state: &mut RhythmState, direction: Direction, effects: &mut Vec<Effect>) {
    state.stats.misses += 1;
    state.health = (state.health - state.tuning.health_loss_per_miss).max(0.0);
    effects.push(Effect::Missed { direction });
    effects.push(Effect::HealthChanged(state.health));
    reset_combo(state, effects);

    if state.health <= 0.0 {
        state.phase = Phase::GameOver;
        log::info!("Game over with {} points", state.points);
        effects.push(Effect::GameOver {
            points: state.points,
        });
    }
}

fn reset_combo(state: &mut RhythmState, effects: &mut Vec<Effect>) {
    state.consecutive_hits = 0;
    state.banner_remaining = None;
    effects.push(Effect::HideCombo);
}

/// Score a successful hit
pub fn register_hit(state: &mut RhythmState, effects: &mut Vec<Effect>) {
    state.stats.hits += 1;
    state.consecutive_hits += 1;

    if state.phase.is_gold_rush() {
        // Every hit scores during gold rush
        add_points(state, 1, effects);
    } else if state.consecutive_hits % state.tuning.combo_length == 0 {
        state.stats.combos += 1;
        effects.push(Effect::ShowCombo(COMBO_TEXT));
        state.banner_remaining = Some(state.tuning.combo_text_duration);
        let amount = if state.double_points_active { 2 } else { 1 };
        add_points(state, amount, effects);
    }
}

/// Award points and check the phase milestones.
///
/// Gold rush wins when both milestones are reached by the same award.
pub fn add_points(state: &mut RhythmState, amount: u32, effects: &mut Vec<Effect>) {
    state.points += amount;
    effects.push(Effect::ScoreChanged(state.points));

    if state.phase.is_gold_rush() {
        return;
    }

    if state.points >= state.tuning.gold_rush_start_points {
        start_gold_rush(state, effects);
    } else if state.points > 0 && state.points % state.tuning.points_to_mash_phase == 0 {
        start_mash_phase(state, effects);
    }
}

fn start_mash_phase(state: &mut RhythmState, effects: &mut Vec<Effect>) {
    state.double_points_active = false;
    state.phase = Phase::Mash(MashState::new(state.tuning.mash_pause_duration));
    state.stats.mash_phases += 1;
    log::info!("Mash phase at {} points", state.points);
    effects.push(Effect::MashStarted);
}

fn start_gold_rush(state: &mut RhythmState, effects: &mut Vec<Effect>) {
    let duration = state.tuning.gold_rush_duration;
    state.phase = Phase::GoldRush {
        remaining: duration,
    };
    state.stats.gold_rushes += 1;
    state.banner_remaining = None;
    log::info!("Gold rush at {} points for {}s", state.points, duration);
    effects.push(Effect::GoldRushStarted { duration });
    effects.push(Effect::ShowCombo(GOLD_RUSH_TEXT));
}

fn end_gold_rush(state: &mut RhythmState, effects: &mut Vec<Effect>) {
    state.phase = Phase::Normal;
    effects.push(Effect::HideCombo);

    for arrow in state.arrows.drain(..) {
        effects.push(Effect::DestroyArrow {
            id: arrow.id,
            cause: DestroyCause::GoldRushEnd,
        });
    }
    state.consecutive_hits = 0;

    log::info!("Gold rush over at {} points", state.points);
    effects.push(Effect::GoldRushEnded);
}

/// Demo player: press whatever will be in the zone after this frame's move
fn autoplay_presses(state: &RhythmState, input: &mut FrameInput, dt: f32) {
    match state.phase {
        Phase::Mash(_) => input.mash = true,
        Phase::Normal | Phase::GoldRush { .. } => {
            let ramp = if state.phase.is_gold_rush() {
                0.0
            } else {
                state.tuning.speed_increase_rate * dt
            };
            let travel = (state.arrow_speed + ramp) * dt;
            let zone = state.tuning.hit_zone;
            for arrow in &state.arrows {
                if zone.contains(arrow.pos.y + travel) {
                    input.pressed[arrow.direction] = true;
                }
            }
        }
        Phase::GameOver => {}
    }
}
