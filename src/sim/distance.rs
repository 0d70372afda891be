//! Distance (score) accumulation

use super::state::GameState;
use crate::sanitize_elapsed;

/// Pixels of forward progress for one tick, if any.
///
/// Huddled penguins make no progress. Only net forward motion counts, so a
/// gust that pushes the penguin backward yields `None`.
pub fn distance_delta(velocity_x: f32, dt: f32, is_huddling: bool) -> Option<f32> {
    let dt = sanitize_elapsed(dt);
    if is_huddling || velocity_x <= 0.0 || dt == 0.0 {
        return None;
    }
    Some(velocity_x * dt)
}

/// Apply one tick of progress to the state.
///
/// Returns true if a delta was fed to the score.
pub fn apply_distance(state: &mut GameState, velocity_x: f32, dt: f32) -> bool {
    match distance_delta(velocity_x, dt, state.is_huddling) {
        Some(pixels) => {
            state.update_distance(pixels);
            true
        }
        None => false,
    }
}
