//! Data-driven game balance
//!
//! Defaults come from [`crate::consts`]. A JSON document may override any
//! subset of fields; missing fields keep their default.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Balance knobs for one trek
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Warmth ===
    /// Warmth lost per second while walking
    pub energy_drain_rate: f32,
    /// Warmth regained per second while huddling
    pub huddle_regen_rate: f32,
    /// Drain multiplier during a gust (walking only)
    pub wind_drain_multiplier: f32,

    // === Movement ===
    /// Walking speed (pixels/s)
    pub walk_speed: f32,
    /// Wind push applied every gusting tick (pixels/s, negative = backward)
    pub wind_force: f32,
    /// Share of the wind push felt while huddled
    pub huddle_wind_damping: f32,
    /// Walk cycle frame length (ms)
    pub walk_frame_ms: f32,

    // === Wind schedule (ms, inclusive) ===
    pub wind_interval_min_ms: u32,
    pub wind_interval_max_ms: u32,
    pub wind_duration_min_ms: u32,
    pub wind_duration_max_ms: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            energy_drain_rate: ENERGY_DRAIN_RATE,
            huddle_regen_rate: HUDDLE_REGEN_RATE,
            wind_drain_multiplier: WIND_DRAIN_MULTIPLIER,

            walk_speed: WALK_SPEED,
            wind_force: WIND_FORCE,
            huddle_wind_damping: HUDDLE_WIND_DAMPING,
            walk_frame_ms: WALK_FRAME_MS,

            wind_interval_min_ms: WIND_INTERVAL_MIN,
            wind_interval_max_ms: WIND_INTERVAL_MAX,
            wind_duration_min_ms: WIND_DURATION_MIN,
            wind_duration_max_ms: WIND_DURATION_MAX,
        }
    }
}

impl Tuning {
    /// Parse a JSON override document and sanitize the result
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    /// Clamp rates to non-negative and put ranges in ascending order
    pub fn sanitized(mut self) -> Self {
        fn non_negative(value: f32, fallback: f32) -> f32 {
            if value.is_finite() { value.max(0.0) } else { fallback }
        }

        self.energy_drain_rate = non_negative(self.energy_drain_rate, ENERGY_DRAIN_RATE);
        self.huddle_regen_rate = non_negative(self.huddle_regen_rate, HUDDLE_REGEN_RATE);
        self.wind_drain_multiplier =
            non_negative(self.wind_drain_multiplier, WIND_DRAIN_MULTIPLIER);
        self.walk_speed = non_negative(self.walk_speed, WALK_SPEED);
        self.huddle_wind_damping =
            non_negative(self.huddle_wind_damping, HUDDLE_WIND_DAMPING).min(1.0);
        // Frames shorter than 1ms would step every tick
        self.walk_frame_ms = non_negative(self.walk_frame_ms, WALK_FRAME_MS).max(1.0);
        if !self.wind_force.is_finite() {
            self.wind_force = WIND_FORCE;
        }

        if self.wind_interval_min_ms > self.wind_interval_max_ms {
            std::mem::swap(&mut self.wind_interval_min_ms, &mut self.wind_interval_max_ms);
        }
        if self.wind_duration_min_ms > self.wind_duration_max_ms {
            std::mem::swap(&mut self.wind_duration_min_ms, &mut self.wind_duration_max_ms);
        }
        self
    }
}
