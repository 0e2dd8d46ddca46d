//! Platform abstraction layer
//!
//! Adapts raw host input to what the simulation consumes.

pub mod input;

pub use input::KeyTracker;
