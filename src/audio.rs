//! Audio system using Web Audio API
//!
//! Procedurally generated sounds driven by `GameEvent`s. Audio is optional:
//! if the context cannot be created every call is a silent no-op.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::sim::GameEvent;

/// Ambient drone gain (kept low under the step clicks)
const DRONE_GAIN: f32 = 0.08;
/// C2
const DRONE_FREQ: f32 = 65.41;

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    /// Set on the first user gesture; browsers block audio before that
    initialized: bool,
    muted: bool,
    /// Trek in progress (drone should be playing)
    trek_running: bool,
    drone: Option<(OscillatorNode, GainNode)>,
}

impl AudioManager {
    pub fn new(muted: bool) -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            initialized: false,
            muted,
            trek_running: false,
            drone: None,
        }
    }

    /// First user gesture: resume the context and start ambience
    pub fn init(&mut self) {
        if self.initialized {
            return;
        }
        let Some(ctx) = &self.ctx else { return };
        let _ = ctx.resume();
        self.initialized = true;
        log::info!("Audio initialized");
        if self.trek_running {
            self.start_drone();
        }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if muted {
            self.stop_drone();
        } else if self.trek_running {
            self.start_drone();
        }
    }

    /// React to one simulation event
    pub fn handle(&mut self, event: GameEvent) {
        match event {
            GameEvent::GameStart => {
                self.trek_running = true;
                self.start_drone();
            }
            GameEvent::GameOver { .. } => {
                self.trek_running = false;
                self.stop_drone();
                self.play_freeze();
            }
            GameEvent::Step => self.play_step(),
            GameEvent::HuddleStart => self.play_huddle(),
            GameEvent::WindStarted { .. } => self.play_gust(),
            GameEvent::HuddleStop
            | GameEvent::ScoreChanged { .. }
            | GameEvent::WindStopped { .. } => {}
        }
    }

    /// Context ready for a one-shot sound
    fn live_ctx(&self) -> Option<&AudioContext> {
        if self.muted || !self.initialized {
            return None;
        }
        let ctx = self.ctx.as_ref()?;
        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }
        Some(ctx)
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
    fn create_osc(
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    fn start_drone(&mut self) {
        if self.drone.is_some() {
            return;
        }
        let Some(ctx) = self.live_ctx() else { return };
        let Some((osc, gain)) = Self::create_osc(ctx, DRONE_FREQ, OscillatorType::Sawtooth)
        else {
            return;
        };
        let t = ctx.current_time();
        gain.gain().set_value_at_time(0.0, t).ok();
        gain.gain()
            .linear_ramp_to_value_at_time(DRONE_GAIN, t + 2.0)
            .ok();
        osc.start().ok();
        self.drone = Some((osc, gain));
    }

    fn stop_drone(&mut self) {
        let Some((osc, gain)) = self.drone.take() else {
            return;
        };
        let Some(ctx) = &self.ctx else { return };
        let t = ctx.current_time();
        gain.gain().set_value_at_time(DRONE_GAIN, t).ok();
        gain.gain().linear_ramp_to_value_at_time(0.0, t + 0.5).ok();
        osc.stop_with_when(t + 0.6).ok();
    }

    /// Footstep - short crunch in the snow
    fn play_step(&self) {
        let Some(ctx) = self.live_ctx() else { return };
        let Some((osc, gain)) = Self::create_osc(ctx, 1800.0, OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(0.05, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.001, t + 0.05)
            .ok();
        osc.frequency().set_value_at_time(1800.0, t).ok();
        osc.frequency().set_value_at_time(2600.0, t + 0.01).ok();
        osc.frequency().set_value_at_time(1200.0, t + 0.02).ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.06).ok();
    }

    /// Huddle - soft low breath
    fn play_huddle(&self) {
        let Some(ctx) = self.live_ctx() else { return };
        let Some((osc, gain)) = Self::create_osc(ctx, 220.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(0.12, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.3)
            .ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(160.0, t + 0.3)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.35).ok();
    }

    /// Gust - rising then falling whoosh
    fn play_gust(&self) {
        let Some(ctx) = self.live_ctx() else { return };
        let Some((osc, gain)) = Self::create_osc(ctx, 200.0, OscillatorType::Sawtooth) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(0.01, t).ok();
        gain.gain().linear_ramp_to_value_at_time(0.06, t + 0.4).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.001, t + 1.2)
            .ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(400.0, t + 0.4)
            .ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(150.0, t + 1.2)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 1.25).ok();
    }

    /// Game over - slow descending tone
    fn play_freeze(&self) {
        let Some(ctx) = self.live_ctx() else { return };
        let Some((osc, gain)) = Self::create_osc(ctx, 440.0, OscillatorType::Triangle) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(0.2, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 1.0)
            .ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(110.0, t + 1.0)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 1.05).ok();
    }
}
