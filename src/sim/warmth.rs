//! Warmth drain and regeneration

use super::state::GameState;
use crate::sanitize_elapsed;
use crate::tuning::Tuning;

/// Warmth change for one tick of `dt` seconds.
///
/// Huddling always regenerates, even mid-gust. Walking drains, three times
/// faster (by default) while windy.
pub fn warmth_delta(is_huddling: bool, is_windy: bool, dt: f32, tuning: &Tuning) -> f32 {
    let dt = sanitize_elapsed(dt);
    if is_huddling {
        return tuning.huddle_regen_rate * dt;
    }

    let mut drain = tuning.energy_drain_rate;
    if is_windy {
        drain *= tuning.wind_drain_multiplier;
    }
    -drain * dt
}

/// Apply one tick of warmth change to the state
pub fn apply_warmth(state: &mut GameState, dt: f32, tuning: &Tuning) {
    let delta = warmth_delta(state.is_huddling, state.is_windy, dt, tuning);
    state.update_warmth(delta);
}
