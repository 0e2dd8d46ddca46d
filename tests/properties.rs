use std::collections::HashSet;

use proptest::prelude::*;

use vintage_rhythm::Tuning;
use vintage_rhythm::sim::{Direction, Effect, FrameInput, PerDirection, RhythmState, advance};

#[derive(Debug, Clone)]
struct Frame {
    dt: f32,
    input: FrameInput,
}

fn frame_strategy() -> impl Strategy<Value = Frame> {
    (
        0.001f32..0.05,
        any::<[bool; 4]>(),
        any::<bool>(),
        prop::bool::weighted(0.05),
    )
        .prop_map(|(dt, keys, mash, autoplay)| Frame {
            dt,
            input: FrameInput {
                pressed: PerDirection::from_fn(|dir| {
                    let idx = Direction::ALL.iter().position(|d| *d == dir).unwrap_or(0);
                    keys[idx]
                }),
                mash,
                autoplay,
            },
        })
}

fn fast_tuning() -> Tuning {
    let mut tuning = Tuning::default();
    tuning.spawn_interval = 0.2;
    tuning.initial_arrow_speed = 600.0;
    tuning.points_to_mash_phase = 3;
    tuning.mash_target_count = 4;
    tuning.gold_rush_start_points = 5;
    tuning.gold_rush_duration = 2.0;
    tuning
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn health_stays_in_bounds(
        seed in any::<u64>(),
        frames in prop::collection::vec(frame_strategy(), 1..400),
    ) {
        let mut state = RhythmState::new(fast_tuning(), seed);
        let max = state.tuning.max_health;
        for frame in &frames {
            advance(&mut state, &frame.input, frame.dt);
            prop_assert!(state.health >= 0.0 && state.health <= max);
            if state.health == 0.0 {
                prop_assert!(state.is_game_over());
            }
        }
    }

    #[test]
    fn points_never_decrease(
        seed in any::<u64>(),
        frames in prop::collection::vec(frame_strategy(), 1..400),
    ) {
        let mut state = RhythmState::new(fast_tuning(), seed);
        let mut last = 0;
        for frame in &frames {
            advance(&mut state, &frame.input, frame.dt);
            prop_assert!(state.points >= last);
            last = state.points;
        }
    }

    #[test]
    fn every_arrow_destroyed_at_most_once(
        seed in any::<u64>(),
        frames in prop::collection::vec(frame_strategy(), 1..400),
    ) {
        let mut state = RhythmState::new(fast_tuning(), seed);
        let mut live: HashSet<u32> = HashSet::new();
        let mut gone: HashSet<u32> = HashSet::new();

        for frame in &frames {
            for effect in advance(&mut state, &frame.input, frame.dt) {
                match effect {
                    Effect::SpawnArrow { id, .. } => {
                        prop_assert!(live.insert(id));
                        prop_assert!(!gone.contains(&id));
                    }
                    Effect::DestroyArrow { id, .. } => {
                        prop_assert!(live.remove(&id));
                        prop_assert!(gone.insert(id));
                    }
                    _ => {}
                }
            }
            let active: HashSet<u32> = state.arrows.iter().map(|a| a.id).collect();
            prop_assert_eq!(&active, &live);
        }
    }
}
