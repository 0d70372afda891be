//! Player preferences
//!
//! Persisted in LocalStorage. The mute flag is stored on its own under the
//! `muted` key as a bare JSON boolean.

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Silence all audio
    pub muted: bool,
}

impl Settings {
    /// LocalStorage key for the mute flag
    #[allow(dead_code)]
    const MUTED_KEY: &'static str = "muted";

    /// Flip the mute flag, returning the new value
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    /// Build settings from the stored mute value (missing or garbage = unmuted)
    pub fn from_stored(muted: Option<&str>) -> Self {
        let muted = muted
            .and_then(|raw| serde_json::from_str::<bool>(raw).ok())
            .unwrap_or(false);
        Self { muted }
    }

    /// Value written under the mute key
    pub fn stored_muted(&self) -> String {
        self.muted.to_string()
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        let stored = storage.and_then(|s| s.get_item(Self::MUTED_KEY).ok().flatten());
        let settings = Self::from_stored(stored.as_deref());
        log::info!("Loaded settings (muted: {})", settings.muted);
        settings
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            let _ = storage.set_item(Self::MUTED_KEY, &self.stored_muted());
            log::info!("Settings saved");
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_stored() {
        assert!(Settings::from_stored(Some("true")).muted);
        assert!(!Settings::from_stored(Some("false")).muted);
        assert!(!Settings::from_stored(None).muted);
        assert!(!Settings::from_stored(Some("yes please")).muted);
    }

    #[test]
    fn test_toggle_round_trips_through_storage_value() {
        let mut settings = Settings::default();
        assert!(settings.toggle_mute());
        assert_eq!(settings.stored_muted(), "true");
        assert_eq!(Settings::from_stored(Some(&settings.stored_muted())), settings);
        assert!(!settings.toggle_mute());
    }
}
