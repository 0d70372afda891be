//! The penguin: horizontal velocity, huddle posture and walk cycle

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Which sprite the presentation layer should show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pose {
    Walk1,
    Walk2,
    Huddle,
}

/// Player-controlled penguin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Penguin {
    /// Horizontal velocity (pixels/s, positive = forward)
    pub velocity_x: f32,
    pub is_huddling: bool,
    /// Speed restored by `walk`
    pub walk_speed: f32,
    /// Share of the wind push felt while huddled
    pub wind_damping: f32,
    /// Walk cycle frame length (ms)
    frame_ms: f32,
    /// Time accumulated in the current walk frame (ms)
    anim_timer: f32,
    /// 0 or 1
    anim_frame: u8,
}

impl Default for Penguin {
    fn default() -> Self {
        Self::new(&Tuning::default())
    }
}

impl Penguin {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            velocity_x: 0.0,
            is_huddling: false,
            walk_speed: tuning.walk_speed,
            wind_damping: tuning.huddle_wind_damping,
            frame_ms: tuning.walk_frame_ms,
            anim_timer: 0.0,
            anim_frame: 0,
        }
    }

    /// Resume walking speed. Ignored while huddled.
    pub fn walk(&mut self) {
        if self.is_huddling {
            return;
        }
        self.velocity_x = self.walk_speed;
    }

    /// Hunker down: stop moving
    pub fn huddle(&mut self) {
        self.is_huddling = true;
        self.velocity_x = 0.0;
    }

    /// Stand back up and walk on the same tick
    pub fn stop_huddle(&mut self) {
        self.is_huddling = false;
        self.walk();
    }

    /// Apply a horizontal wind push for this tick.
    ///
    /// Walking: the push is added to walk speed, so a strong gust can drive
    /// the penguin backward. Huddled: only a damped share of the push.
    pub fn apply_wind(&mut self, force_x: f32) {
        if self.is_huddling {
            self.velocity_x = force_x * self.wind_damping;
        } else {
            self.velocity_x = self.walk_speed + force_x;
        }
    }

    /// Drop any leftover wind drift while huddled
    pub fn settle(&mut self) {
        if self.is_huddling {
            self.velocity_x = 0.0;
        }
    }

    /// Stop dead (game over)
    pub fn halt(&mut self) {
        self.velocity_x = 0.0;
    }

    /// Advance the walk cycle. Returns true when the frame flips (a step).
    ///
    /// The cycle is frozen while huddling.
    pub fn animate(&mut self, delta_ms: f32) -> bool {
        if self.is_huddling {
            return false;
        }
        self.anim_timer += delta_ms;
        if self.anim_timer > self.frame_ms {
            self.anim_timer = 0.0;
            self.anim_frame = 1 - self.anim_frame;
            return true;
        }
        false
    }

    pub fn pose(&self) -> Pose {
        if self.is_huddling {
            Pose::Huddle
        } else if self.anim_frame == 0 {
            Pose::Walk1
        } else {
            Pose::Walk2
        }
    }
}
