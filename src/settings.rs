//! Game settings and preferences
//!
//! Persisted separately from the player record in LocalStorage. The page
//! query string can override them (`?quality=low&particles=off`).

use serde::{Deserialize, Serialize};

use crate::consts::{SETTINGS_KEY, SPAWN_INTERVAL_MS};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum live particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 100,
            QualityPreset::Medium => 500,
            QualityPreset::High => 2000,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Hit particle bursts
    pub particles: bool,
    /// Milliseconds between enemy spawns
    pub spawn_interval_ms: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            particles: true,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
        }
    }
}

impl Settings {
    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Apply `key=value` overrides from a URL query string.
    ///
    /// Unknown keys and unparseable values are ignored.
    pub fn apply_query(&mut self, query: &str) {
        let query = query.trim_start_matches('?');
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                "quality" => {
                    if let Some(preset) = QualityPreset::parse(value) {
                        self.quality = preset;
                    }
                }
                "particles" => match value {
                    "on" | "1" | "true" => self.particles = true,
                    "off" | "0" | "false" => self.particles = false,
                    _ => {}
                },
                "spawn" => {
                    if let Ok(ms) = value.parse::<u32>() {
                        if ms > 0 {
                            self.spawn_interval_ms = ms;
                        }
                    }
                }
                _ => log::debug!("Ignoring query parameter {:?}", key),
            }
        }
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(SETTINGS_KEY) {
                match serde_json::from_str(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
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
                let _ = storage.set_item(SETTINGS_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native: settings come from `PING_GAME_SETTINGS` (JSON) if set
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let var = SETTINGS_KEY.to_uppercase();
        match std::env::var(&var) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                log::warn!("Ignoring {}: {}", var, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }
}
