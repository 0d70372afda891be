//! Game state and outbound notifications
//!
//! `GameState` is the one long-lived record every other part of the
//! simulation reads and writes. It is owned by the driver and passed in
//! explicitly; there is no global instance.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Discrete notifications produced by the simulation.
///
/// Queued during a tick and drained by the driver afterwards, so the core
/// never calls into audio or telemetry directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new trek began
    GameStart,
    /// Warmth ran out; carries the floored final score
    GameOver { score: u64 },
    /// Walk cycle advanced a frame (foot hits the snow)
    Step,
    /// Player started huddling
    HuddleStart,
    /// Player stopped huddling
    HuddleStop,
    /// Floored score went up by `delta` to `score`
    ScoreChanged { score: u64, delta: u64 },
    /// A gust began and will last `duration_ms`
    WindStarted { duration_ms: u32 },
    /// The gust ended; next one in `next_gust_ms`
    WindStopped { next_gust_ms: u32 },
}

/// Score, warmth and posture flags for the current trek
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Accumulated distance
    pub score: f32,
    /// Highest score seen this process (survives `reset`)
    pub best_score: f32,
    pub started: bool,
    pub game_over: bool,
    /// Health resource, always within [0, MAX_WARMTH]
    pub warmth: f32,
    pub is_huddling: bool,
    pub is_windy: bool,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        Self {
            score: 0.0,
            best_score: 0.0,
            started: false,
            game_over: false,
            warmth: MAX_WARMTH,
            is_huddling: false,
            is_windy: false,
        }
    }

    /// Start a fresh trek. Keeps `best_score`.
    pub fn reset(&mut self) {
        self.score = 0.0;
        self.started = false;
        self.game_over = false;
        self.warmth = MAX_WARMTH;
        self.is_huddling = false;
        self.is_windy = false;
    }

    pub fn set_huddling(&mut self, huddling: bool) {
        self.is_huddling = huddling;
    }

    pub fn set_windy(&mut self, windy: bool) {
        self.is_windy = windy;
    }

    /// True while score and warmth updates are accepted
    pub fn is_active(&self) -> bool {
        self.started && !self.game_over
    }

    /// Score as shown to the player
    pub fn floored_score(&self) -> u64 {
        self.score.floor() as u64
    }

    /// Accumulate a raw pixel displacement into the score.
    ///
    /// The sign is ignored: backward displacement still counts as progress.
    pub fn update_distance(&mut self, pixels: f32) {
        if !self.is_active() {
            return;
        }
        if !pixels.is_finite() {
            log::warn!("Ignoring non-finite distance delta {pixels}");
            return;
        }
        self.score += (pixels / PIXELS_PER_SCORE).abs();
        if self.score > self.best_score {
            self.best_score = self.score;
        }
    }

    /// Add a signed warmth change, clamped to [0, MAX_WARMTH].
    ///
    /// Reaching zero ends the game. This is the only way `game_over` is set.
    pub fn update_warmth(&mut self, amount: f32) {
        if self.game_over {
            return;
        }
        if !amount.is_finite() {
            log::warn!("Ignoring non-finite warmth delta {amount}");
            return;
        }
        self.warmth = (self.warmth + amount).min(MAX_WARMTH);
        if self.warmth <= 0.0 {
            self.warmth = 0.0;
            self.game_over = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn started() -> GameState {
        let mut state = GameState::new();
        state.started = true;
        state
    }

    #[test]
    fn test_reset_keeps_best_score() {
        let mut state = started();
        state.update_distance(500.0);
        state.update_warmth(-40.0);
        state.set_windy(true);
        state.set_huddling(true);
        assert_eq!(state.best_score, 50.0);

        state.reset();
        assert_eq!(state.score, 0.0);
        assert_eq!(state.best_score, 50.0);
        assert_eq!(state.warmth, MAX_WARMTH);
        assert!(!state.started);
        assert!(!state.game_over);
        assert!(!state.is_huddling);
        assert!(!state.is_windy);

        // Idempotent
        state.reset();
        assert_eq!(state.best_score, 50.0);
    }

    #[test]
    fn test_distance_requires_started() {
        let mut state = GameState::new();
        state.update_distance(100.0);
        assert_eq!(state.score, 0.0);

        state.started = true;
        state.update_distance(100.0);
        assert_eq!(state.score, 10.0);
    }

    #[test]
    fn test_distance_ignores_sign() {
        let mut state = started();
        state.update_distance(-30.0);
        assert_eq!(state.score, 3.0);
    }

    #[test]
    fn test_warmth_caps_at_max() {
        let mut state = started();
        state.update_warmth(25.0);
        assert_eq!(state.warmth, MAX_WARMTH);
        assert!(!state.game_over);
    }

    #[test]
    fn test_warmth_zero_ends_game() {
        let mut state = started();
        state.warmth = 3.0;
        state.update_warmth(-5.0);
        assert_eq!(state.warmth, 0.0);
        assert!(state.game_over);
    }

    #[test]
    fn test_game_over_freezes_state() {
        let mut state = started();
        state.update_distance(200.0);
        state.update_warmth(-150.0);
        assert!(state.game_over);

        state.update_warmth(50.0);
        state.update_distance(200.0);
        assert_eq!(state.warmth, 0.0);
        assert_eq!(state.score, 20.0);
        assert!(state.game_over);
    }

    #[test]
    fn test_non_finite_inputs_ignored() {
        let mut state = started();
        state.update_warmth(f32::NAN);
        state.update_distance(f32::INFINITY);
        assert_eq!(state.warmth, MAX_WARMTH);
        assert_eq!(state.score, 0.0);
    }

    proptest! {
        #[test]
        fn prop_warmth_stays_clamped(deltas in prop::collection::vec(-60.0f32..60.0, 0..64)) {
            let mut state = started();
            let mut was_over = false;
            for delta in deltas {
                state.update_warmth(delta);
                prop_assert!(state.warmth >= 0.0 && state.warmth <= MAX_WARMTH);
                if was_over {
                    prop_assert!(state.game_over);
                    prop_assert_eq!(state.warmth, 0.0);
                }
                if state.warmth == 0.0 {
                    prop_assert!(state.game_over);
                }
                was_over = state.game_over;
            }
        }

        #[test]
        fn prop_best_score_never_drops(moves in prop::collection::vec(0.0f32..500.0, 0..32), resets in 0usize..4) {
            let mut state = started();
            let mut best = state.best_score;
            for (i, pixels) in moves.iter().enumerate() {
                let before = state.score;
                state.update_distance(*pixels);
                prop_assert!(state.score >= before);
                prop_assert!(state.best_score >= best);
                best = state.best_score;
                if resets > 0 && i % (resets + 1) == 0 {
                    state.reset();
                    state.started = true;
                    prop_assert!(state.best_score >= best);
                }
            }
        }
    }
}
