//! Edge-triggered key input
//!
//! Hosts report which keys are held each frame; the engine only wants the
//! frames where a key goes from up to down.

use std::collections::HashSet;

use crate::settings::{Key, KeyBindings};
use crate::sim::FrameInput;

#[derive(Debug, Clone, Default)]
pub struct KeyTracker {
    held: HashSet<Key>,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build this frame's input from the keys currently held
    pub fn frame_input(&mut self, held_now: &[Key], bindings: &KeyBindings) -> FrameInput {
        let now: HashSet<Key> = held_now.iter().copied().collect();
        let mut input = FrameInput::default();

        for key in now.difference(&self.held) {
            if let Some(direction) = bindings.direction_for(*key) {
                input.pressed[direction] = true;
            }
            if *key == bindings.mash {
                input.mash = true;
            }
        }

        self.held = now;
        input
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Forget held keys (focus loss); the next frame treats everything as fresh
    pub fn release_all(&mut self) {
        self.held.clear();
    }
}
