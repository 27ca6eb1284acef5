//! Structured colors for the field.
//!
//! Every entity carries an [`Rgba`] whose alpha channel is kept separate from
//! the RGB triple, so fading an entity is plain arithmetic on `a` instead of
//! rewriting a color string.
//!
//! # Example
//!
//! ```ignore
//! use cosmic_field::color::{Palette, Rgba};
//!
//! let violet = Rgba::from_rgb8(139, 92, 246);
//! let faded = violet.with_alpha(0.25);
//! let palette = Palette::cosmic();
//! ```

use glam::Vec4;
use serde::{Deserialize, Serialize};

/// Straight (non-premultiplied) RGBA color, each channel in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);
    /// Opaque white.
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }

    /// Same RGB, alpha replaced (clamped to the unit interval).
    #[inline]
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            a: alpha.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Same RGB, alpha multiplied by `factor`.
    #[inline]
    pub fn fade(self, factor: f32) -> Self {
        self.with_alpha(self.a * factor)
    }

    /// Component-wise interpolation, `t` clamped to `0.0..=1.0`.
    pub fn lerp(self, other: Rgba, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Premultiplied representation used by the raster.
    #[inline]
    pub fn premultiplied(self) -> Vec4 {
        let a = self.a.clamp(0.0, 1.0);
        Vec4::new(self.r * a, self.g * a, self.b * a, a)
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

/// A color stop along a gradient. `offset` is in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Rgba,
}

impl ColorStop {
    pub fn new(offset: f32, color: Rgba) -> Self {
        Self {
            offset: offset.clamp(0.0, 1.0),
            color,
        }
    }
}

/// Ordered color sequence entities draw their tint from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette {
    colors: Vec<Rgba>,
}

impl Palette {
    /// Build a palette from an ordered list of colors.
    pub fn new(colors: Vec<Rgba>) -> Self {
        Self { colors }
    }

    /// Violet, indigo, cyan and magenta - the default agency look.
    pub fn cosmic() -> Self {
        Self::new(vec![
            Rgba::from_rgb8(139, 92, 246), // Violet
            Rgba::from_rgb8(99, 102, 241), // Indigo
            Rgba::from_rgb8(34, 211, 238), // Cyan
            Rgba::from_rgb8(236, 72, 153), // Magenta
            Rgba::from_rgb8(59, 130, 246), // Blue
        ])
    }

    /// Greens and teals.
    pub fn aurora() -> Self {
        Self::new(vec![
            Rgba::new(0.2, 0.9, 0.6, 1.0),
            Rgba::new(0.1, 0.7, 0.8, 1.0),
            Rgba::new(0.4, 1.0, 0.5, 1.0),
            Rgba::new(0.5, 0.3, 0.9, 1.0),
        ])
    }

    /// Warm oranges and reds.
    pub fn ember() -> Self {
        Self::new(vec![
            Rgba::new(1.0, 0.3, 0.0, 1.0),
            Rgba::new(1.0, 0.7, 0.0, 1.0),
            Rgba::new(0.8, 0.1, 0.2, 1.0),
            Rgba::new(1.0, 0.9, 0.6, 1.0),
        ])
    }

    /// Look up a preset by name.
    pub fn named(name: &str) -> Option<Self> {
        match name {
            "cosmic" => Some(Self::cosmic()),
            "aurora" => Some(Self::aurora()),
            "ember" => Some(Self::ember()),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color at `index`, cycling through the sequence. White for an empty palette.
    pub fn get(&self, index: usize) -> Rgba {
        if self.colors.is_empty() {
            return Rgba::WHITE;
        }
        self.colors[index % self.colors.len()]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::cosmic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_alpha_clamps() {
        let c = Rgba::WHITE.with_alpha(1.7);
        assert_eq!(c.a, 1.0);
        let c = Rgba::WHITE.with_alpha(-0.3);
        assert_eq!(c.a, 0.0);
    }

    #[test]
    fn test_fade_scales_alpha_only() {
        let c = Rgba::new(0.2, 0.4, 0.6, 0.8).fade(0.5);
        assert!((c.a - 0.4).abs() < 1e-6);
        assert_eq!((c.r, c.g, c.b), (0.2, 0.4, 0.6));
    }

    #[test]
    fn test_premultiplied() {
        let p = Rgba::new(1.0, 0.5, 0.0, 0.5).premultiplied();
        assert!((p.x - 0.5).abs() < 1e-6);
        assert!((p.y - 0.25).abs() < 1e-6);
        assert_eq!(p.z, 0.0);
        assert_eq!(p.w, 0.5);
    }

    #[test]
    fn test_palette_cycles() {
        let palette = Palette::cosmic();
        assert_eq!(palette.get(0), palette.get(palette.len()));
        assert_eq!(Palette::new(Vec::new()).get(3), Rgba::WHITE);
    }

    #[test]
    fn test_named_palettes() {
        assert_eq!(Palette::named("ember"), Some(Palette::ember()));
        assert_eq!(Palette::named("cosmic"), Some(Palette::default()));
        assert!(Palette::named("Ember").is_none());
    }

    #[test]
    fn test_palette_json_is_plain_array() {
        let palette = Palette::new(vec![Rgba::new(1.0, 0.0, 0.0, 1.0)]);
        let json = serde_json::to_string(&palette).unwrap();
        assert!(json.starts_with('['));
        let back: Palette = serde_json::from_str(&json).unwrap();
        assert_eq!(back, palette);
    }
}
