//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Elapsed time is passed in, never sampled
//! - Injected RNG only
//! - No rendering, audio or platform dependencies

pub mod distance;
pub mod penguin;
pub mod state;
pub mod tick;
pub mod warmth;
pub mod wind;

pub use distance::{apply_distance, distance_delta};
pub use penguin::{Penguin, Pose};
pub use state::{GameEvent, GameState};
pub use tick::{Snapshot, Trek};
pub use warmth::{apply_warmth, warmth_delta};
pub use wind::{WindController, WindPhase, WindTransition};
