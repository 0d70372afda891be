//! Score relay to an external leaderboard
//!
//! The simulation only queues `GameEvent`s. This module turns score and
//! game-over events into reporter calls. A reporter may be missing or fail;
//! the game carries on either way.

use crate::sim::GameEvent;

/// Sink for score telemetry
pub trait ScoreReporter {
    /// Score went up by `delta` points
    fn add_points(&mut self, delta: u64);
    /// Trek ended with a final floored score
    fn submit_final(&mut self, score: u64);
}

/// Forward the score-related events of one drain to `reporter`
pub fn relay_events(reporter: &mut dyn ScoreReporter, events: &[GameEvent]) {
    for event in events {
        match *event {
            GameEvent::ScoreChanged { delta, .. } if delta > 0 => reporter.add_points(delta),
            GameEvent::GameOver { score } => reporter.submit_final(score),
            _ => {}
        }
    }
}

/// Play.fun SDK bridge (looks up `window.playFunSDK` on every call)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct PlayFunReporter;

#[cfg(target_arch = "wasm32")]
impl PlayFunReporter {
    pub fn new() -> Self {
        Self
    }

    /// `window.playFunSDK`, falling back to `window.PlayFun.instance`
    fn sdk() -> Option<wasm_bindgen::JsValue> {
        use js_sys::Reflect;
        use wasm_bindgen::JsValue;

        let window: JsValue = web_sys::window()?.into();
        let direct = Reflect::get(&window, &JsValue::from_str("playFunSDK")).ok()?;
        if !direct.is_undefined() && !direct.is_null() {
            return Some(direct);
        }
        let global = Reflect::get(&window, &JsValue::from_str("PlayFun")).ok()?;
        if global.is_undefined() || global.is_null() {
            return None;
        }
        let instance = Reflect::get(&global, &JsValue::from_str("instance")).ok()?;
        (!instance.is_undefined() && !instance.is_null()).then_some(instance)
    }

    /// Call the first method in `names` that exists on the SDK.
    ///
    /// Returns false if no SDK or no such method was found.
    fn call_first(names: &[&str], arg: Option<f64>) -> bool {
        use js_sys::{Function, Reflect};
        use wasm_bindgen::{JsCast, JsValue};

        let Some(sdk) = Self::sdk() else {
            return false;
        };
        for name in names {
            let Ok(method) = Reflect::get(&sdk, &JsValue::from_str(name)) else {
                continue;
            };
            let Ok(method) = method.dyn_into::<Function>() else {
                continue;
            };
            let result = match arg {
                Some(value) => method.call1(&sdk, &JsValue::from_f64(value)),
                None => method.call0(&sdk),
            };
            if let Err(err) = result {
                log::warn!("Play.fun {name} failed: {err:?}");
            }
            return true;
        }
        false
    }
}

#[cfg(target_arch = "wasm32")]
impl ScoreReporter for PlayFunReporter {
    fn add_points(&mut self, delta: u64) {
        Self::call_first(&["addPoints", "trackPoints"], Some(delta as f64));
    }

    fn submit_final(&mut self, score: u64) {
        if !Self::call_first(&["savePoints", "saveSession"], None) {
            Self::call_first(&["submitScore"], Some(score as f64));
        }
    }
}
