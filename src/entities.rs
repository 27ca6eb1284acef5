//! Entity records for the field.
//!
//! Plain data: every record is owned by the pool (a `Vec`) that holds it and
//! is replaced in place on respawn. Behavior lives in [`crate::simulation`],
//! seeding in [`crate::spawn`], drawing in [`crate::compositor`].
//!
//! | Entity | Pool | Lifetime |
//! |--------|------|----------|
//! | [`Star`] | fixed size | stationary, twinkles forever |
//! | [`EnergyWave`] | fixed size | respawns in place when spent |
//! | [`CosmicParticle`] | grows and shrinks | removed once expired or off-screen |
//! | [`NebulaCloud`] | fixed size | wraps around its band |

use crate::color::Rgba;
use glam::Vec2;

/// Which edge of the canvas an entity is emitted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Horizontal direction pointing away from this edge, into the canvas.
    #[inline]
    pub fn inward(self) -> f32 {
        match self {
            Side::Left => 1.0,
            Side::Right => -1.0,
        }
    }

    /// Horizontal direction pointing toward this edge.
    #[inline]
    pub fn outward(self) -> f32 {
        -self.inward()
    }

    /// X coordinate of this edge on a canvas of the given width.
    #[inline]
    pub fn edge_x(self, width: f32) -> f32 {
        match self {
            Side::Left => 0.0,
            Side::Right => width,
        }
    }
}

/// A stationary twinkling star.
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub position: Vec2,
    /// Core radius in pixels, always > 0.
    pub radius: f32,
    pub base_opacity: f32,
    /// Phase advance per tick, in radians.
    pub twinkle_speed: f32,
    /// Phase accumulator, starts at a random offset.
    pub phase: f32,
    pub brightness: f32,
    pub color: Rgba,
}

impl Star {
    /// Twinkle factor, oscillating in `0.4..=1.0` so a star never goes fully dark.
    #[inline]
    pub fn twinkle(&self) -> f32 {
        0.7 + 0.3 * self.phase.sin()
    }

    /// Opacity the compositor draws this frame.
    #[inline]
    pub fn rendered_opacity(&self) -> f32 {
        (self.base_opacity * self.brightness * self.twinkle()).clamp(0.0, 1.0)
    }
}

/// An expanding ring emitted from one side of the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyWave {
    pub origin: Vec2,
    pub radius: f32,
    pub max_radius: f32,
    pub opacity: f32,
    /// Radius growth per tick.
    pub speed: f32,
    pub color: Rgba,
    pub side: Side,
}

impl EnergyWave {
    /// A wave is spent once it reached its max radius or faded out.
    #[inline]
    pub fn is_spent(&self) -> bool {
        self.radius >= self.max_radius || self.opacity <= 0.0
    }

    #[inline]
    pub fn rendered_opacity(&self) -> f32 {
        self.opacity.clamp(0.0, 1.0)
    }
}

/// A short-lived particle drifting in from a canvas edge.
#[derive(Debug, Clone, PartialEq)]
pub struct CosmicParticle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: f32,
    /// Opacity at spawn; the current opacity fades linearly from here to 0.
    pub initial_opacity: f32,
    pub opacity: f32,
    pub color: Rgba,
    /// Age in ticks.
    pub age: u32,
    pub max_age: u32,
    pub side: Side,
}

impl CosmicParticle {
    /// Fraction of life remaining, `1.0` at spawn and `0.0` at `max_age`.
    #[inline]
    pub fn life_remaining(&self) -> f32 {
        if self.max_age == 0 {
            return 0.0;
        }
        (1.0 - self.age as f32 / self.max_age as f32).clamp(0.0, 1.0)
    }

    #[inline]
    pub fn is_expired(&self) -> bool {
        self.age >= self.max_age
    }

    #[inline]
    pub fn rendered_opacity(&self) -> f32 {
        self.opacity.clamp(0.0, 1.0)
    }
}

/// A large, slowly rotating gas cloud.
#[derive(Debug, Clone, PartialEq)]
pub struct NebulaCloud {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Radius of the cloud's gradient; also its wrap margin.
    pub size: f32,
    pub opacity: f32,
    pub color: Rgba,
    pub side: Side,
    /// Rotation in radians.
    pub rotation: f32,
    pub rotation_speed: f32,
}

impl NebulaCloud {
    #[inline]
    pub fn margin(&self) -> f32 {
        self.size
    }

    #[inline]
    pub fn rendered_opacity(&self) -> f32 {
        self.opacity.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn star(phase: f32) -> Star {
        Star {
            position: Vec2::ZERO,
            radius: 1.0,
            base_opacity: 1.0,
            twinkle_speed: 0.01,
            phase,
            brightness: 1.0,
            color: Rgba::WHITE,
        }
    }

    #[test]
    fn test_twinkle_never_dark() {
        let trough = star(-FRAC_PI_2);
        assert!((trough.rendered_opacity() - 0.4).abs() < 1e-6);
        let peak = star(FRAC_PI_2);
        assert!((peak.rendered_opacity() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_side_directions() {
        assert_eq!(Side::Left.inward(), 1.0);
        assert_eq!(Side::Right.inward(), -1.0);
        assert_eq!(Side::Right.outward(), 1.0);
        assert_eq!(Side::Right.edge_x(800.0), 800.0);
    }

    #[test]
    fn test_particle_life_remaining() {
        let mut p = CosmicParticle {
            position: Vec2::ZERO,
            velocity: Vec2::X,
            size: 2.0,
            initial_opacity: 0.8,
            opacity: 0.8,
            color: Rgba::WHITE,
            age: 0,
            max_age: 4,
            side: Side::Left,
        };
        assert_eq!(p.life_remaining(), 1.0);
        p.age = 2;
        assert_eq!(p.life_remaining(), 0.5);
        p.age = 4;
        assert_eq!(p.life_remaining(), 0.0);
        assert!(p.is_expired());
    }
}
