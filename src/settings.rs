//! Game settings and preferences
//!
//! Persisted separately from high scores in LocalStorage.

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Visual effects ===
    /// Parallax starfield backdrop
    pub starfield: bool,
    /// Sparkle trails and explosion fragments
    pub particles: bool,
    /// Neon glow (canvas shadow blur) on the orb and enemies
    pub glow: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Mute when the window loses focus
    pub mute_on_blur: bool,

    /// Preferred music track index (remembered across sessions)
    pub music_track: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            starfield: true,
            particles: true,
            glow: true,
            master_volume: 0.8,
            music_volume: 0.7,
            sfx_volume: 1.0,
            mute_on_blur: true,
            music_track: 0,
        }
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "neon_sling_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
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
    fn test_defaults_are_full_experience() {
        let settings = Settings::default();
        assert!(settings.starfield);
        assert!(settings.particles);
        assert!(settings.glow);
        assert_eq!(settings.music_track, 0);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"glow": false}"#).unwrap();
        assert!(!settings.glow);
        assert!(settings.starfield);
        assert_eq!(settings.master_volume, 0.8);
    }

    #[test]
    fn test_round_trip() {
        let mut settings = Settings::default();
        settings.music_track = 2;
        settings.sfx_volume = 0.25;
        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back.music_track, 2);
        assert_eq!(back.sfx_volume, 0.25);
    }
}
