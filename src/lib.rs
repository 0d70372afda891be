//! Penguin Trek - a side-scrolling survival trek across a snowfield
//!
//! Core modules:
//! - `sim`: Deterministic simulation (warmth, wind, distance, penguin)
//! - `tuning`: Data-driven game balance
//! - `settings`: Persisted player preferences
//! - `report`: Score relay to an external leaderboard SDK
//! - `audio`: Web Audio sound layer (wasm only)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod report;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Warmth ceiling (and starting value)
    pub const MAX_WARMTH: f32 = 100.0;
    /// Warmth lost per second while walking
    pub const ENERGY_DRAIN_RATE: f32 = 5.0;
    /// Warmth regained per second while huddling
    pub const HUDDLE_REGEN_RATE: f32 = 10.0;
    /// Extra drain during wind if not huddling
    pub const WIND_DRAIN_MULTIPLIER: f32 = 3.0;

    /// Penguin walking speed (design pixels/s)
    pub const WALK_SPEED: f32 = 100.0;
    /// Speed while huddled with no wind
    pub const HUDDLE_SPEED: f32 = 0.0;
    /// Wind push, negative = back toward the left edge
    pub const WIND_FORCE: f32 = -200.0;
    /// Fraction of the wind push a huddled penguin still feels
    pub const HUDDLE_WIND_DAMPING: f32 = 0.2;

    /// Calm period between gusts (ms, inclusive range)
    pub const WIND_INTERVAL_MIN: u32 = 3000;
    pub const WIND_INTERVAL_MAX: u32 = 8000;
    /// Gust length (ms, inclusive range)
    pub const WIND_DURATION_MIN: u32 = 1000;
    pub const WIND_DURATION_MAX: u32 = 3000;

    /// Raw pixels per point of score
    pub const PIXELS_PER_SCORE: f32 = 10.0;

    /// Walk cycle frame length (ms)
    pub const WALK_FRAME_MS: f32 = 200.0;
}

/// Clamp an elapsed-time value to something the simulation can use.
///
/// Negative and non-finite values become zero.
#[inline]
pub fn sanitize_elapsed(delta: f32) -> f32 {
    if delta.is_finite() && delta > 0.0 {
        delta
    } else {
        if delta != 0.0 {
            log::warn!("Rejected elapsed time {delta}, using 0");
        }
        0.0
    }
}

/// Convert a frame delta in milliseconds to seconds
#[inline]
pub fn ms_to_secs(delta_ms: f32) -> f32 {
    delta_ms / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_elapsed() {
        assert_eq!(sanitize_elapsed(16.0), 16.0);
        assert_eq!(sanitize_elapsed(0.0), 0.0);
        assert_eq!(sanitize_elapsed(-5.0), 0.0);
        assert_eq!(sanitize_elapsed(f32::NAN), 0.0);
        assert_eq!(sanitize_elapsed(f32::INFINITY), 0.0);
    }
}
