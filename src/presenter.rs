//! Presentation contract between the engine and its host
//!
//! The engine never draws anything. It returns [`Effect`]s and the host
//! applies them through a [`Presenter`].

use glam::Vec2;

use crate::sim::{DestroyCause, Direction, Effect, PhaseKind};

/// Host-side collaborator that shows the game.
///
/// Only the arrow and HUD calls are required; the rest default to no-ops so a
/// minimal host can ignore mash meters and banners.
pub trait Presenter {
    fn spawn_arrow(&mut self, id: u32, direction: Direction, position: Vec2);
    fn destroy_arrow(&mut self, id: u32, cause: DestroyCause);
    fn set_health_display(&mut self, health: f32);
    fn set_score_display(&mut self, points: u32);

    fn show_combo(&mut self, _text: &str) {}
    fn hide_combo(&mut self) {}
    fn show_mash_meter(&mut self) {}
    fn set_mash_visual_scale(&mut self, _scale: f32) {}
    fn hide_mash_meter(&mut self) {}
    fn phase_changed(&mut self, _phase: PhaseKind) {}
    fn game_over(&mut self, _points: u32) {}
    /// Setup problem worth surfacing in the host UI (already logged by the engine)
    fn config_warning(&mut self, _message: &str) {}
}

/// Apply a frame's effects in order
pub fn present<P: Presenter + ?Sized>(effects: &[Effect], presenter: &mut P) {
    for effect in effects {
        match *effect {
            Effect::SpawnArrow {
                id,
                direction,
                position,
            } => presenter.spawn_arrow(id, direction, position),
            Effect::SpawnSkipped { direction } => presenter.config_warning(&format!(
                "Spawn point not assigned for direction: {}",
                direction.as_str()
            )),
            Effect::DestroyArrow { id, cause } => presenter.destroy_arrow(id, cause),
            Effect::Missed { .. } => {}
            Effect::HealthChanged(health) => presenter.set_health_display(health),
            Effect::ScoreChanged(points) => presenter.set_score_display(points),
            Effect::ShowCombo(text) => presenter.show_combo(text),
            Effect::HideCombo => presenter.hide_combo(),
            Effect::MashStarted => presenter.phase_changed(PhaseKind::Mash),
            Effect::ShowMashMeter => presenter.show_mash_meter(),
            Effect::MashScale(scale) => presenter.set_mash_visual_scale(scale),
            Effect::HideMashMeter => presenter.hide_mash_meter(),
            Effect::MashEnded { .. } => presenter.phase_changed(PhaseKind::Normal),
            Effect::GoldRushStarted { .. } => presenter.phase_changed(PhaseKind::GoldRush),
            Effect::GoldRushEnded => presenter.phase_changed(PhaseKind::Normal),
            Effect::GameOver { points } => {
                presenter.phase_changed(PhaseKind::GameOver);
                presenter.game_over(points);
            }
        }
    }
}

/// Presenter for headless runs: everything goes to the log
#[derive(Debug, Default)]
pub struct LogPresenter {
    pub arrows_on_screen: usize,
}

impl Presenter for LogPresenter {
    fn spawn_arrow(&mut self, id: u32, direction: Direction, position: Vec2) {
        self.arrows_on_screen += 1;
        log::trace!("spawn #{} {} at {:?}", id, direction.as_str(), position);
    }

    fn destroy_arrow(&mut self, id: u32, cause: DestroyCause) {
        self.arrows_on_screen = self.arrows_on_screen.saturating_sub(1);
        log::trace!("destroy #{} ({:?})", id, cause);
    }

    fn set_health_display(&mut self, health: f32) {
        log::debug!("Health: {}", health);
    }

    fn set_score_display(&mut self, points: u32) {
        log::debug!("Points: {}", points);
    }

    fn show_combo(&mut self, text: &str) {
        log::debug!("{}", text);
    }

    fn set_mash_visual_scale(&mut self, scale: f32) {
        log::trace!("Mash meter scale {}", scale);
    }

    fn phase_changed(&mut self, phase: PhaseKind) {
        log::info!("Phase -> {:?}", phase);
    }

    fn game_over(&mut self, points: u32) {
        log::info!("Game Over! {} points", points);
    }
}
