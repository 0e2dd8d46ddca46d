//! Vintage Rhythm entry point
//!
//! Headless native demo: runs a seeded auto-play session at a fixed frame
//! rate, logs what a presentation layer would show, and records the run.
//!
//! Usage: `vintage-rhythm [tuning.json] [seed] [seconds]`

use std::time::{SystemTime, UNIX_EPOCH};

use vintage_rhythm::consts::FRAME_DT;
use vintage_rhythm::highscores::HighScoreEntry;
use vintage_rhythm::sim::{FrameInput, RhythmState, advance};
use vintage_rhythm::{HighScores, LogPresenter, Settings, Tuning, present};

const SETTINGS_PATH: &str = "vintage_rhythm_settings.json";
const HIGH_SCORES_PATH: &str = "vintage_rhythm_highscores.json";
const DEFAULT_DEMO_SECONDS: f32 = 60.0;

fn main() {
    env_logger::init();
    log::info!("Vintage Rhythm (headless) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();

    let tuning = match args.first().filter(|a| a.as_str() != "-") {
        Some(path) => match Tuning::load(path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("Failed to load tuning from {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => Tuning::default(),
    };
    for direction in tuning.missing_spawn_points() {
        log::warn!("No spawn point for {} - those spawns will be skipped", direction.as_str());
    }

    let seed = args
        .get(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(now_ms);
    let seconds = args
        .get(2)
        .and_then(|s| s.parse::<f32>().ok())
        .unwrap_or(DEFAULT_DEMO_SECONDS);

    let settings = Settings::load(SETTINGS_PATH).unwrap_or_else(|e| {
        log::warn!("Ignoring unreadable settings: {}", e);
        Settings::default()
    });

    log::info!("Game initialized with seed: {}", seed);
    let mut state = RhythmState::new(tuning, seed);
    let mut presenter = LogPresenter::default();
    let input = FrameInput::autoplay();
    let dt = settings.clamp_frame_dt(FRAME_DT).max(1e-3);

    let frames = (seconds / dt).ceil() as u64;
    for _ in 0..frames {
        let effects = advance(&mut state, &input, dt);
        present(&effects, &mut presenter);
        if state.is_game_over() {
            break;
        }
    }

    let entry = HighScoreEntry::from_run(&state, now_ms());
    log::info!(
        "Run finished: {} points, {} hits, {} misses ({:.0}% accuracy), {:.1}s, \
         {} gold rushes, {} mash phases",
        entry.points,
        entry.hits,
        entry.misses,
        entry.accuracy() * 100.0,
        entry.survived_secs,
        state.stats.gold_rushes,
        state.stats.mash_phases,
    );

    let mut scores = HighScores::load(HIGH_SCORES_PATH).unwrap_or_else(|e| {
        log::warn!("Ignoring unreadable high scores: {}", e);
        HighScores::new()
    });
    if let Some(rank) = scores.add_score(entry) {
        log::info!("New high score! Rank #{}", rank);
        if let Err(e) = scores.save(HIGH_SCORES_PATH) {
            log::warn!("Could not save high scores: {}", e);
        }
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
