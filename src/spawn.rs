//! Seeding and spawning.
//!
//! [`Seeder`] wraps the field's RNG and knows how to draw a fresh record of
//! every entity kind. All draws are bounded, so seeding never fails. With a
//! fixed seed two seeders produce identical pools, which is what golden-frame
//! tests rely on.
//!
//! ```ignore
//! let mut seeder = Seeder::from_seed(42);
//! let stars = seed_stars(&mut seeder, bounds, 100, &config);
//! let particle = seeder.particle(bounds, &config);
//! ```

use crate::color::{Palette, Rgba};
use crate::config::FieldConfig;
use crate::entities::{CosmicParticle, EnergyWave, NebulaCloud, Side, Star};
use crate::field::Bounds;
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

const STAR_RADIUS: (f32, f32) = (0.3, 1.6);
const STAR_OPACITY: (f32, f32) = (0.3, 1.0);
const STAR_BRIGHTNESS: (f32, f32) = (0.5, 1.0);
/// How far star color leans from white toward a palette tint.
const STAR_TINT: f32 = 0.15;

const WAVE_MAX_RADIUS: (f32, f32) = (180.0, 420.0);
const WAVE_OPACITY: (f32, f32) = (0.15, 0.4);
const WAVE_SPEED: (f32, f32) = (0.6, 1.6);

const CLOUD_SIZE: (f32, f32) = (140.0, 320.0);
const CLOUD_OPACITY: (f32, f32) = (0.04, 0.12);
const CLOUD_DRIFT: (f32, f32) = (0.05, 0.25);
const CLOUD_VERTICAL_DRIFT: f32 = 0.08;
const CLOUD_SPIN: f32 = 0.0015;

const PARTICLE_SPEED: (f32, f32) = (0.3, 1.2);
const PARTICLE_VERTICAL_DRIFT: f32 = 0.25;
const PARTICLE_SIZE: (f32, f32) = (0.8, 2.6);
const PARTICLE_OPACITY: (f32, f32) = (0.45, 0.95);

/// Source of every random draw in the field.
#[derive(Debug, Clone)]
pub struct Seeder {
    rng: SmallRng,
}

impl Seeder {
    /// Deterministic seeder.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Fixed seed if given, otherwise seeded from the system clock so every
    /// mount looks different.
    pub fn from_config(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(42)
        });
        Self::from_seed(seed)
    }

    // ========== Random primitives ==========

    /// Random f32 in `min..max`. Returns `min` for an empty range.
    #[inline]
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..max)
    }

    /// Random u32 in `min..=max`. Returns `min` for an empty range.
    #[inline]
    pub fn random_uint(&mut self, min: u32, max: u32) -> u32 {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..=max)
    }

    /// Random f32 in `-magnitude..magnitude`.
    #[inline]
    pub fn random_signed(&mut self, magnitude: f32) -> f32 {
        self.random_range(-magnitude, magnitude)
    }

    /// Left or right with equal probability.
    #[inline]
    pub fn random_side(&mut self) -> Side {
        if self.rng.gen_bool(0.5) {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// A color picked from the palette.
    pub fn random_color(&mut self, palette: &Palette) -> Rgba {
        let index = self.rng.gen_range(0..palette.len().max(1));
        palette.get(index)
    }

    #[inline]
    fn pick(&mut self, range: (f32, f32)) -> f32 {
        self.random_range(range.0, range.1)
    }

    // ========== Entities ==========

    /// A star anywhere inside the bounds.
    pub fn star(&mut self, bounds: Bounds, config: &FieldConfig) -> Star {
        let tint = self.random_color(&config.palette);
        Star {
            position: Vec2::new(
                self.random_range(0.0, bounds.width),
                self.random_range(0.0, bounds.height),
            ),
            radius: self.pick(STAR_RADIUS),
            base_opacity: self.pick(STAR_OPACITY),
            twinkle_speed: self.pick(config.twinkle_speed),
            phase: self.random_range(0.0, TAU),
            brightness: self.pick(STAR_BRIGHTNESS),
            color: Rgba::WHITE.lerp(tint.with_alpha(1.0), STAR_TINT),
        }
    }

    /// A wave emitted from `side`, caught somewhere in its first half so the
    /// pool does not pulse in lockstep.
    pub fn wave(&mut self, bounds: Bounds, side: Side, config: &FieldConfig) -> EnergyWave {
        let max_radius = self.pick(WAVE_MAX_RADIUS);
        EnergyWave {
            origin: Vec2::new(side.edge_x(bounds.width), self.random_range(0.0, bounds.height)),
            radius: self.random_range(0.0, max_radius * 0.5),
            max_radius,
            opacity: self.pick(WAVE_OPACITY),
            speed: self.pick(WAVE_SPEED),
            color: self.random_color(&config.palette),
            side,
        }
    }

    /// Restart a spent wave: radius back to 0, new origin height, max radius
    /// and opacity. Side, speed and color are kept.
    pub fn respawn_wave(&mut self, wave: &mut EnergyWave, bounds: Bounds) {
        wave.origin = Vec2::new(wave.side.edge_x(bounds.width), self.random_range(0.0, bounds.height));
        wave.radius = 0.0;
        wave.max_radius = self.pick(WAVE_MAX_RADIUS);
        wave.opacity = self.pick(WAVE_OPACITY);
    }

    /// A cloud inside the band owned by `side`, drifting toward that edge.
    pub fn cloud(&mut self, bounds: Bounds, side: Side, config: &FieldConfig) -> NebulaCloud {
        let half = bounds.width * 0.5;
        let x = match side {
            Side::Left => self.random_range(0.0, half),
            Side::Right => self.random_range(half, bounds.width),
        };
        NebulaCloud {
            position: Vec2::new(x, self.random_range(0.0, bounds.height)),
            velocity: Vec2::new(
                side.outward() * self.pick(CLOUD_DRIFT),
                self.random_signed(CLOUD_VERTICAL_DRIFT),
            ),
            size: self.pick(CLOUD_SIZE),
            opacity: self.pick(CLOUD_OPACITY),
            color: self.random_color(&config.palette),
            side,
            rotation: self.random_range(0.0, TAU),
            rotation_speed: self.random_signed(CLOUD_SPIN),
        }
    }

    /// A new particle on a random edge, heading into the canvas.
    pub fn particle(&mut self, bounds: Bounds, config: &FieldConfig) -> CosmicParticle {
        let side = self.random_side();
        let opacity = self.pick(PARTICLE_OPACITY);
        let (min_age, max_age) = config.particle_max_age;
        CosmicParticle {
            position: Vec2::new(side.edge_x(bounds.width), self.random_range(0.0, bounds.height)),
            velocity: Vec2::new(
                side.inward() * self.pick(PARTICLE_SPEED),
                self.random_signed(PARTICLE_VERTICAL_DRIFT),
            ),
            size: self.pick(PARTICLE_SIZE),
            initial_opacity: opacity,
            opacity,
            color: self.random_color(&config.palette),
            age: 0,
            max_age: self.random_uint(min_age.max(1), max_age.max(1)),
            side,
        }
    }

    /// Seconds until the next particle spawn.
    pub fn spawn_delay(&mut self, config: &FieldConfig) -> f32 {
        self.pick(config.particle_spawn_interval)
    }
}

/// A full star pool.
pub fn seed_stars(seeder: &mut Seeder, bounds: Bounds, count: usize, config: &FieldConfig) -> Vec<Star> {
    (0..count).map(|_| seeder.star(bounds, config)).collect()
}

/// A full wave pool, sides alternating.
pub fn seed_waves(seeder: &mut Seeder, bounds: Bounds, count: usize, config: &FieldConfig) -> Vec<EnergyWave> {
    (0..count)
        .map(|i| seeder.wave(bounds, alternate(i), config))
        .collect()
}

/// A full cloud pool, sides alternating.
pub fn seed_clouds(seeder: &mut Seeder, bounds: Bounds, count: usize, config: &FieldConfig) -> Vec<NebulaCloud> {
    (0..count)
        .map(|i| seeder.cloud(bounds, alternate(i), config))
        .collect()
}

#[inline]
fn alternate(index: usize) -> Side {
    if index % 2 == 0 {
        Side::Left
    } else {
        Side::Right
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> Bounds {
        Bounds::new(1000.0, 800.0)
    }

    #[test]
    fn test_stars_inside_bounds() {
        let config = FieldConfig::default();
        let mut seeder = Seeder::from_seed(1);
        for star in seed_stars(&mut seeder, bounds(), 500, &config) {
            assert!(star.position.x >= 0.0 && star.position.x <= 1000.0);
            assert!(star.position.y >= 0.0 && star.position.y <= 800.0);
            assert!(star.radius > 0.0);
            assert!(star.rendered_opacity() >= 0.0 && star.rendered_opacity() <= 1.0);
        }
    }

    #[test]
    fn test_same_seed_same_pools() {
        let config = FieldConfig::default();
        let mut a = Seeder::from_seed(99);
        let mut b = Seeder::from_seed(99);
        assert_eq!(seed_stars(&mut a, bounds(), 50, &config), seed_stars(&mut b, bounds(), 50, &config));
        assert_eq!(seed_waves(&mut a, bounds(), 6, &config), seed_waves(&mut b, bounds(), 6, &config));
        assert_eq!(seed_clouds(&mut a, bounds(), 8, &config), seed_clouds(&mut b, bounds(), 8, &config));
    }

    #[test]
    fn test_particle_heads_inward() {
        let config = FieldConfig::default();
        let mut seeder = Seeder::from_seed(5);
        for _ in 0..200 {
            let p = seeder.particle(bounds(), &config);
            assert_eq!(p.position.x, p.side.edge_x(1000.0));
            assert!(p.velocity.x * p.side.inward() > 0.0);
            assert!(p.opacity > 0.0);
            assert!(p.max_age >= config.particle_max_age.0 && p.max_age <= config.particle_max_age.1);
        }
    }

    #[test]
    fn test_clouds_stay_in_their_band() {
        let config = FieldConfig::default();
        let mut seeder = Seeder::from_seed(8);
        for cloud in seed_clouds(&mut seeder, bounds(), 40, &config) {
            match cloud.side {
                Side::Left => assert!(cloud.position.x <= 500.0 && cloud.velocity.x < 0.0),
                Side::Right => assert!(cloud.position.x >= 500.0 && cloud.velocity.x > 0.0),
            }
        }
    }

    #[test]
    fn test_respawn_wave_resets_radius() {
        let config = FieldConfig::default();
        let mut seeder = Seeder::from_seed(3);
        let mut wave = seeder.wave(bounds(), Side::Right, &config);
        wave.radius = wave.max_radius + 10.0;
        seeder.respawn_wave(&mut wave, bounds());
        assert_eq!(wave.radius, 0.0);
        assert_eq!(wave.origin.x, 1000.0);
        assert!(wave.opacity > 0.0);
    }

    #[test]
    fn test_empty_ranges_do_not_panic() {
        let mut seeder = Seeder::from_seed(0);
        assert_eq!(seeder.random_range(2.0, 2.0), 2.0);
        assert_eq!(seeder.random_uint(9, 3), 9);
        let config = FieldConfig::default();
        let star = seeder.star(Bounds::new(0.0, 0.0), &config);
        assert_eq!(star.position, Vec2::ZERO);
    }
}
