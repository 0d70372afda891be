//! Frame-driven simulation tick
//!
//! `Trek` is the driver for one trek: it owns the game state, the wind
//! schedule, the penguin and the RNG, and queues `GameEvent`s for the
//! presentation layer to drain after each tick.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::distance::apply_distance;
use super::penguin::{Penguin, Pose};
use super::state::{GameEvent, GameState};
use super::warmth::apply_warmth;
use super::wind::WindController;
use crate::tuning::Tuning;
use crate::{ms_to_secs, sanitize_elapsed};

/// Read-only view of a trek for the HUD and renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub warmth: f32,
    pub score: f32,
    pub best_score: f32,
    pub is_windy: bool,
    pub is_huddling: bool,
    pub velocity_x: f32,
    pub pose: Pose,
    pub game_over: bool,
}

/// One trek across the snowfield
#[derive(Debug, Clone)]
pub struct Trek<R = Pcg32> {
    pub state: GameState,
    pub wind: WindController,
    pub penguin: Penguin,
    pub tuning: Tuning,
    rng: R,
    events: Vec<GameEvent>,
}

impl Trek<Pcg32> {
    /// Create a trek with default tuning and a seeded RNG
    pub fn new(seed: u64) -> Self {
        Self::with_rng(Pcg32::seed_from_u64(seed), Tuning::default())
    }
}

impl<R: Rng> Trek<R> {
    /// Create a trek with a caller-supplied random source.
    ///
    /// The trek is idle until [`Trek::start`] is called.
    pub fn with_rng(mut rng: R, tuning: Tuning) -> Self {
        let tuning = tuning.sanitized();
        let wind = WindController::new(&mut rng, &tuning);
        let penguin = Penguin::new(&tuning);
        Self {
            state: GameState::new(),
            wind,
            penguin,
            tuning,
            rng,
            events: Vec::new(),
        }
    }

    /// Begin a new trek. Best score carries over.
    pub fn start(&mut self) {
        self.state.reset();
        self.state.started = true;
        self.wind = WindController::new(&mut self.rng, &self.tuning);
        self.penguin = Penguin::new(&self.tuning);
        self.penguin.walk();
        self.events.push(GameEvent::GameStart);
        log::info!(
            "Trek started (best so far: {})",
            self.state.best_score.floor() as u64
        );
    }

    /// Pointer down: hunker down against the cold
    pub fn huddle_start(&mut self) {
        if self.state.game_over {
            return;
        }
        self.penguin.huddle();
        self.state.set_huddling(true);
        self.events.push(GameEvent::HuddleStart);
    }

    /// Pointer up: get walking again
    pub fn huddle_end(&mut self) {
        if self.state.game_over {
            return;
        }
        self.penguin.stop_huddle();
        self.state.set_huddling(false);
        self.events.push(GameEvent::HuddleStop);
    }

    /// Advance the trek by `delta_ms` milliseconds.
    ///
    /// Does nothing before `start` or after game over. Negative or
    /// non-finite deltas are treated as zero.
    pub fn tick(&mut self, delta_ms: f32) {
        if !self.state.is_active() {
            return;
        }
        let delta_ms = sanitize_elapsed(delta_ms);
        let dt = ms_to_secs(delta_ms);

        if let Some(transition) = self.wind.update(
            delta_ms,
            &mut self.state,
            &mut self.penguin,
            &mut self.rng,
            &self.tuning,
        ) {
            self.events.push(transition.into());
        }

        if self.penguin.animate(delta_ms) {
            self.events.push(GameEvent::Step);
        }

        apply_warmth(&mut self.state, dt, &self.tuning);

        let before = self.state.floored_score();
        if apply_distance(&mut self.state, self.penguin.velocity_x, dt) {
            let after = self.state.floored_score();
            if after > before {
                self.events.push(GameEvent::ScoreChanged {
                    score: after,
                    delta: after - before,
                });
            }
        }

        if self.state.game_over {
            self.penguin.halt();
            let score = self.state.floored_score();
            self.events.push(GameEvent::GameOver { score });
            log::info!("Trek over: froze after {score}m");
        }
    }

    /// Take all events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            warmth: self.state.warmth,
            score: self.state.score,
            best_score: self.state.best_score,
            is_windy: self.state.is_windy,
            is_huddling: self.state.is_huddling,
            velocity_x: self.penguin.velocity_x,
            pose: self.penguin.pose(),
            game_over: self.state.game_over,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::WindPhase;

    fn started(seed: u64) -> Trek {
        let mut trek = Trek::new(seed);
        trek.start();
        trek.drain_events();
        trek
    }

    #[test]
    fn test_tick_before_start_is_noop() {
        let mut trek = Trek::new(1);
        trek.tick(1000.0);
        assert_eq!(trek.state.warmth, MAX_WARMTH);
        assert!(trek.drain_events().is_empty());
    }

    #[test]
    fn test_start_emits_game_start() {
        let mut trek = Trek::new(1);
        trek.start();
        assert_eq!(trek.drain_events(), vec![GameEvent::GameStart]);
        assert!(trek.state.started);
        assert_eq!(trek.penguin.velocity_x, WALK_SPEED);
    }

    #[test]
    fn test_calm_walk_scenario() {
        let mut trek = started(42);

        for _ in 0..10 {
            trek.tick(100.0);
        }

        assert_eq!(trek.state.score, 10.0);
        assert_eq!(trek.state.warmth, 95.0);
        assert!(!trek.state.game_over);

        let events = trek.drain_events();
        let score_changes = events
            .iter()
            .filter(|e| matches!(e, GameEvent::ScoreChanged { delta: 1, .. }))
            .count();
        assert_eq!(score_changes, 10);
        let steps = events.iter().filter(|e| **e == GameEvent::Step).count();
        assert_eq!(steps, 3);
        assert!(events.contains(&GameEvent::ScoreChanged { score: 10, delta: 1 }));
    }

    #[test]
    fn test_freeze_scenario() {
        let mut trek = started(42);
        trek.state.warmth = 3.0;

        trek.tick(1000.0);

        assert_eq!(trek.state.warmth, 0.0);
        assert!(trek.state.game_over);
        assert_eq!(trek.penguin.velocity_x, 0.0);
        assert!(trek.drain_events().contains(&GameEvent::GameOver { score: 0 }));

        // Frozen from here on
        trek.tick(1000.0);
        trek.huddle_start();
        assert_eq!(trek.state.warmth, 0.0);
        assert!(!trek.state.is_huddling);
        assert!(trek.drain_events().is_empty());
    }

    #[test]
    fn test_huddle_in_gust() {
        let mut trek = started(3);
        trek.wind = WindController::calm_for(0);
        trek.state.warmth = 50.0;
        trek.huddle_start();

        trek.tick(1.0);
        assert!(trek.state.is_windy);
        let score = trek.state.score;
        let warmth = trek.state.warmth;

        trek.tick(500.0);
        assert_eq!(trek.state.score, score);
        assert!(trek.state.warmth > warmth);
        assert!(trek.penguin.velocity_x < 0.0);
        assert_eq!(trek.snapshot().pose, Pose::Huddle);

        let events = trek.drain_events();
        assert_eq!(events[0], GameEvent::HuddleStart);
        assert!(matches!(events[1], GameEvent::WindStarted { .. }));
        assert!(!events.contains(&GameEvent::Step));
    }

    #[test]
    fn test_gust_pushes_walker_back_without_scoring() {
        let mut trek = started(9);
        trek.wind = WindController::calm_for(0);

        trek.tick(1.0);
        let score = trek.state.score;
        trek.tick(100.0);
        assert!(trek.penguin.velocity_x < 0.0);
        assert_eq!(trek.state.score, score);
        // 3x drain during the gust
        let expected = MAX_WARMTH - 15.0 * 0.101;
        assert!((trek.state.warmth - expected).abs() < 1e-3);
    }

    #[test]
    fn test_release_huddle_resumes_walk() {
        let mut trek = started(5);
        trek.huddle_start();
        trek.tick(100.0);
        assert_eq!(trek.penguin.velocity_x, 0.0);

        trek.huddle_end();
        assert_eq!(trek.penguin.velocity_x, WALK_SPEED);
        assert!(!trek.state.is_huddling);
        assert_eq!(
            trek.drain_events(),
            vec![GameEvent::HuddleStart, GameEvent::HuddleStop]
        );
    }

    #[test]
    fn test_restart_keeps_best_score() {
        let mut trek = started(11);
        for _ in 0..20 {
            trek.tick(100.0);
        }
        let best = trek.state.best_score;
        assert!(best > 0.0);

        trek.start();
        assert_eq!(trek.state.score, 0.0);
        assert_eq!(trek.state.best_score, best);
        assert_eq!(trek.state.warmth, MAX_WARMTH);
    }

    #[test]
    fn test_wind_alternates_over_long_run() {
        let mut trek = started(2024);
        let mut last = None;
        // Huddle the whole way so warmth never runs out
        trek.huddle_start();
        for _ in 0..60_000 / 16 {
            trek.tick(16.0);
            for event in trek.drain_events() {
                match event {
                    GameEvent::WindStarted { duration_ms } => {
                        assert_ne!(last, Some(true));
                        assert!((WIND_DURATION_MIN..=WIND_DURATION_MAX).contains(&duration_ms));
                        last = Some(true);
                    }
                    GameEvent::WindStopped { next_gust_ms } => {
                        assert_eq!(last, Some(true));
                        assert!((WIND_INTERVAL_MIN..=WIND_INTERVAL_MAX).contains(&next_gust_ms));
                        last = Some(false);
                    }
                    _ => {}
                }
            }
        }
        assert!(last.is_some(), "a minute should see at least one gust");
        assert_eq!(trek.state.is_windy, trek.wind.is_active());
        assert!(!trek.state.game_over);
    }

    #[test]
    fn test_determinism() {
        let mut a = started(99999);
        let mut b = started(99999);

        for i in 0..2000 {
            if i % 300 == 0 {
                a.huddle_start();
                b.huddle_start();
            }
            if i % 300 == 120 {
                a.huddle_end();
                b.huddle_end();
            }
            a.tick(16.0);
            b.tick(16.0);
        }

        assert_eq!(a.snapshot(), b.snapshot());
        assert_eq!(a.drain_events(), b.drain_events());
        assert_eq!(a.wind.phase, b.wind.phase);
    }

    #[test]
    fn test_negative_delta_is_zero_length_tick() {
        let mut trek = started(8);
        trek.tick(-250.0);
        trek.tick(f32::NAN);
        assert_eq!(trek.state.warmth, MAX_WARMTH);
        assert_eq!(trek.state.score, 0.0);
        assert!(matches!(trek.wind.phase, WindPhase::Calm { .. }));
        assert_eq!(trek.wind.timer_ms, 0.0);
    }

    #[test]
    fn test_snapshot_serializes() {
        let trek = started(1);
        let json = serde_json::to_string(&trek.snapshot()).unwrap();
        assert!(json.contains("\"warmth\":100.0"));
        assert!(json.contains("\"pose\":\"Walk1\""));
    }
}
