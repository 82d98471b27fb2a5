//! Colour theme derived from [`Settings`] hues.

use crate::core::Settings;
use crate::types::{HueField, Rgb, TAIL_ALPHA};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub primary: Rgb,
    pub secondary: Rgb,
    pub fruit: Rgb,
    pub grid: Rgb,
    pub background: Rgb,
}

impl Theme {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            primary: settings.color(HueField::Primary),
            secondary: settings.color(HueField::Secondary),
            fruit: settings.color(HueField::Fruit),
            grid: settings.color(HueField::Grid),
            background: settings.color(HueField::Background),
        }
    }

    /// Colour and opacity of snake segment `index` (0 = head) in a body of `len`.
    ///
    /// Even segments take the primary colour, odd ones the secondary. Opacity
    /// falls linearly from 1.0 at the head toward `TAIL_ALPHA` one segment past
    /// the tail, so the last segment stays slightly above it.
    pub fn segment(&self, index: usize, len: usize) -> (Rgb, f32) {
        let color = if index % 2 == 0 {
            self.primary
        } else {
            self.secondary
        };
        if len == 0 {
            return (color, 1.0);
        }
        let t = index.min(len - 1) as f32 / len as f32;
        (color, 1.0 + (TAIL_ALPHA - 1.0) * t)
    }

    /// `color` at `alpha` over the background, then dimmed by the board alpha.
    pub fn shade(&self, color: Rgb, alpha: f32, board_alpha: f32) -> Rgb {
        color
            .blend_over(self.background, alpha)
            .blend_over(Rgb::new(0, 0, 0), board_alpha)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}
