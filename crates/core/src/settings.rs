//! User settings - speed, sound toggles, colour theme
//!
//! Persisted as JSON under [`SETTINGS_KEY`]. Missing fields take their
//! defaults, so older or hand-edited files still load.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::store::KeyValueStore;
use crate::types::{
    clamp_tick_rate, speed_tier, Hsv, HueField, Rgb, DEFAULT_TICKS_PER_SECOND, TICK_RATE_STEP,
};

/// Store key for the settings blob
pub const SETTINGS_KEY: &str = "settings.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub use_beep: bool,
    pub use_music: bool,
    pub ticks_per_second: f32,
    pub primary_hue: Hsv,
    pub secondary_hue: Hsv,
    pub fruit_hue: Hsv,
    pub grid_hue: Hsv,
    pub background_hue: Hsv,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            use_beep: true,
            use_music: true,
            ticks_per_second: DEFAULT_TICKS_PER_SECOND,
            primary_hue: Hsv::new(120.0 / 360.0, 1.0, 1.0),
            secondary_hue: Hsv::new(60.0 / 360.0, 1.0, 1.0),
            fruit_hue: Hsv::new(0.0, 1.0, 1.0),
            grid_hue: Hsv::new(0.0, 0.0, 0.0),
            background_hue: Hsv::new(0.0, 0.0, 0.6),
        }
    }
}

impl Settings {
    pub fn tier(&self) -> u32 {
        speed_tier(self.ticks_per_second)
    }

    pub fn set_tick_rate(&mut self, ticks_per_second: f32) {
        self.ticks_per_second = clamp_tick_rate(ticks_per_second);
    }

    pub fn increment_tick_rate(&mut self) {
        self.set_tick_rate(self.ticks_per_second + TICK_RATE_STEP);
    }

    pub fn decrement_tick_rate(&mut self) {
        self.set_tick_rate(self.ticks_per_second - TICK_RATE_STEP);
    }

    pub fn hue(&self, field: HueField) -> Hsv {
        match field {
            HueField::Primary => self.primary_hue,
            HueField::Secondary => self.secondary_hue,
            HueField::Fruit => self.fruit_hue,
            HueField::Grid => self.grid_hue,
            HueField::Background => self.background_hue,
        }
    }

    /// Replace one hue; components are clamped to `[0, 1]`
    pub fn set_hue(&mut self, field: HueField, hue: Hsv) {
        let hue = Hsv::new(
            hue.h.clamp(0.0, 1.0),
            hue.s.clamp(0.0, 1.0),
            hue.v.clamp(0.0, 1.0),
        );
        let slot = match field {
            HueField::Primary => &mut self.primary_hue,
            HueField::Secondary => &mut self.secondary_hue,
            HueField::Fruit => &mut self.fruit_hue,
            HueField::Grid => &mut self.grid_hue,
            HueField::Background => &mut self.background_hue,
        };
        *slot = hue;
    }

    pub fn color(&self, field: HueField) -> Rgb {
        self.hue(field).to_rgb()
    }

    pub fn to_blob(&self) -> Result<Vec<u8>, StoreError> {
        Ok(serde_json::to_vec_pretty(self)?)
    }

    pub fn from_blob(blob: &[u8]) -> Result<Self, StoreError> {
        let mut settings: Settings = serde_json::from_slice(blob)?;
        settings.ticks_per_second = clamp_tick_rate(settings.ticks_per_second);
        Ok(settings)
    }

    /// Load from `store`, falling back to defaults on any failure.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        match store.load(SETTINGS_KEY) {
            Ok(Some(blob)) => match Self::from_blob(&blob) {
                Ok(settings) => {
                    info!(ticks_per_second = settings.ticks_per_second, "settings loaded");
                    settings
                }
                Err(err) => {
                    warn!("settings unreadable, using defaults: {err}");
                    Self::default()
                }
            },
            Ok(None) => Self::default(),
            Err(err) => {
                warn!("settings store unavailable, using defaults: {err}");
                Self::default()
            }
        }
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<(), StoreError> {
        store.save(SETTINGS_KEY, &self.to_blob()?)?;
        debug!("settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::types::{MAX_TICKS_PER_SECOND, MIN_TICKS_PER_SECOND};

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.use_beep);
        assert!(settings.use_music);
        assert_eq!(settings.ticks_per_second, 10.0);
        assert_eq!(settings.tier(), 10);
        assert_eq!(settings.color(HueField::Primary), Rgb::new(0, 255, 0));
        assert_eq!(settings.color(HueField::Fruit), Rgb::new(255, 0, 0));
    }

    #[test]
    fn test_tick_rate_stepper_is_bounded() {
        let mut settings = Settings::default();
        settings.set_tick_rate(MAX_TICKS_PER_SECOND);
        settings.increment_tick_rate();
        assert_eq!(settings.ticks_per_second, MAX_TICKS_PER_SECOND);

        settings.set_tick_rate(MIN_TICKS_PER_SECOND);
        settings.decrement_tick_rate();
        assert_eq!(settings.ticks_per_second, MIN_TICKS_PER_SECOND);
    }

    #[test]
    fn test_set_hue_clamps() {
        let mut settings = Settings::default();
        settings.set_hue(HueField::Grid, Hsv::new(2.0, -1.0, 0.5));
        assert_eq!(settings.hue(HueField::Grid), Hsv::new(1.0, 0.0, 0.5));
    }

    #[test]
    fn test_partial_blob_uses_defaults() {
        let settings = Settings::from_blob(br#"{"ticks_per_second": 99.0, "use_beep": false}"#).unwrap();
        assert!(!settings.use_beep);
        assert!(settings.use_music);
        assert_eq!(settings.ticks_per_second, MAX_TICKS_PER_SECOND);
    }

    #[test]
    fn test_save_and_load() {
        let mut store = MemoryStore::new();
        let mut settings = Settings::default();
        settings.use_music = false;
        settings.set_tick_rate(14.0);
        settings.save(&mut store).unwrap();

        assert_eq!(Settings::load(&store), settings);
    }

    #[test]
    fn test_garbage_falls_back_to_defaults() {
        let mut store = MemoryStore::new();
        store.insert(SETTINGS_KEY, "]]");
        assert_eq!(Settings::load(&store), Settings::default());
    }
}
