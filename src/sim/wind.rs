//! Wind gust scheduler
//!
//! Two-state machine: calm for a random interval, then gusting for a random
//! duration. Both lengths are drawn from the injected RNG at the moment the
//! previous phase ends.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::penguin::Penguin;
use super::state::{GameEvent, GameState};
use crate::sanitize_elapsed;
use crate::tuning::Tuning;

/// Current wind phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindPhase {
    /// No wind; a gust starts once the timer passes `next_gust_ms`
    Calm { next_gust_ms: u32 },
    /// Gusting; calm returns once the timer passes `duration_ms`
    Gusting { duration_ms: u32 },
}

/// A phase change that happened during `WindController::update`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindTransition {
    Started { duration_ms: u32 },
    Stopped { next_gust_ms: u32 },
}

impl From<WindTransition> for GameEvent {
    fn from(transition: WindTransition) -> Self {
        match transition {
            WindTransition::Started { duration_ms } => GameEvent::WindStarted { duration_ms },
            WindTransition::Stopped { next_gust_ms } => GameEvent::WindStopped { next_gust_ms },
        }
    }
}

/// Per-trek wind state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindController {
    pub phase: WindPhase,
    /// Time spent in the current phase (ms)
    pub timer_ms: f32,
}

impl WindController {
    /// Start calm, with the first gust interval drawn from `rng`
    pub fn new<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning) -> Self {
        Self::calm_for(sample_interval(rng, tuning))
    }

    /// Start calm with a fixed time until the first gust
    pub fn calm_for(next_gust_ms: u32) -> Self {
        Self {
            phase: WindPhase::Calm { next_gust_ms },
            timer_ms: 0.0,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.phase, WindPhase::Gusting { .. })
    }

    /// Advance the schedule by `delta_ms` and push the penguin.
    ///
    /// At most one transition is evaluated per call: a gust that ends this
    /// tick never starts a new one in the same tick. While gusting (including
    /// the tick a gust starts) the wind force is applied to the penguin;
    /// while calm a penguin that is not huddling walks at full speed, and a
    /// huddled one is left at rest once the gust ends.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        delta_ms: f32,
        state: &mut GameState,
        penguin: &mut Penguin,
        rng: &mut R,
        tuning: &Tuning,
    ) -> Option<WindTransition> {
        self.timer_ms += sanitize_elapsed(delta_ms);

        let transition = match self.phase {
            WindPhase::Calm { next_gust_ms } if self.timer_ms > next_gust_ms as f32 => {
                let duration_ms = sample_duration(rng, tuning);
                self.phase = WindPhase::Gusting { duration_ms };
                self.timer_ms = 0.0;
                state.set_windy(true);
                log::debug!("Gust started ({duration_ms} ms)");
                Some(WindTransition::Started { duration_ms })
            }
            WindPhase::Gusting { duration_ms } if self.timer_ms > duration_ms as f32 => {
                let next_gust_ms = sample_interval(rng, tuning);
                self.phase = WindPhase::Calm { next_gust_ms };
                self.timer_ms = 0.0;
                state.set_windy(false);
                if state.is_huddling {
                    penguin.settle();
                } else {
                    penguin.walk();
                }
                log::debug!("Gust ended, next in {next_gust_ms} ms");
                Some(WindTransition::Stopped { next_gust_ms })
            }
            _ => None,
        };

        if self.is_active() {
            penguin.apply_wind(tuning.wind_force);
        } else if !state.is_huddling {
            penguin.walk();
        }

        transition
    }
}

fn sample_interval<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning) -> u32 {
    rng.random_range(tuning.wind_interval_min_ms..=tuning.wind_interval_max_ms)
}

fn sample_duration<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning) -> u32 {
    rng.random_range(tuning.wind_duration_min_ms..=tuning.wind_duration_max_ms)
}
