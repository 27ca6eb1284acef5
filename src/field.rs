//! Field state.
//!
//! [`FieldState`] owns every entity pool, the canvas bounds, the particle
//! spawn gate and the RNG. The lifecycle controller owns exactly one of these
//! and lends it to [`crate::simulation::step`] and
//! [`crate::compositor::composite`]; nothing else holds field state.

use crate::config::{FieldConfig, PoolCounts};
use crate::entities::{CosmicParticle, EnergyWave, NebulaCloud, Star};
use crate::spawn::{seed_clouds, seed_stars, seed_waves, Seeder};
use log::debug;

/// Canvas extent in pixels. `height` is the full content height, which may
/// exceed the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }
}

/// All mutable state of one running field.
#[derive(Debug, Clone)]
pub struct FieldState {
    pub stars: Vec<Star>,
    pub waves: Vec<EnergyWave>,
    pub particles: Vec<CosmicParticle>,
    pub clouds: Vec<NebulaCloud>,
    pub(crate) config: FieldConfig,
    pub(crate) seeder: Seeder,
    bounds: Bounds,
    compact: bool,
    /// Simulated seconds since seeding.
    pub(crate) elapsed: f32,
    /// Simulated time at which the next particle spawns.
    pub(crate) next_spawn_at: f32,
    pub(crate) frame: u64,
}

impl FieldState {
    /// Seed a field, using the configured seed (or the clock when unset).
    pub fn new(config: &FieldConfig, bounds: Bounds, compact: bool) -> Self {
        Self::with_seeder(config, bounds, compact, Seeder::from_config(config.seed))
    }

    /// Seed a field from an explicit seeder.
    ///
    /// Stars, waves and clouds are filled to their configured counts; the
    /// particle pool starts empty.
    pub fn with_seeder(config: &FieldConfig, bounds: Bounds, compact: bool, mut seeder: Seeder) -> Self {
        let counts = config.pool_counts(compact);
        let stars = seed_stars(&mut seeder, bounds, counts.stars, config);
        let waves = seed_waves(&mut seeder, bounds, counts.waves, config);
        let clouds = seed_clouds(&mut seeder, bounds, counts.clouds, config);
        let next_spawn_at = seeder.spawn_delay(config);

        debug!(
            "Seeded field {}x{} (compact: {}): {} stars, {} waves, {} clouds",
            bounds.width, bounds.height, compact, counts.stars, counts.waves, counts.clouds
        );

        Self {
            stars,
            waves,
            particles: Vec::new(),
            clouds,
            config: config.clone(),
            seeder,
            bounds,
            compact,
            elapsed: 0.0,
            next_spawn_at,
            frame: 0,
        }
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    #[inline]
    pub fn is_compact(&self) -> bool {
        self.compact
    }

    #[inline]
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Pool sizes this field was configured for.
    pub fn counts(&self) -> PoolCounts {
        self.config.pool_counts(self.compact)
    }

    /// Ticks stepped since seeding.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Simulated seconds since seeding.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Simulated time of the next particle spawn.
    #[inline]
    pub fn next_spawn_at(&self) -> f32 {
        self.next_spawn_at
    }

    /// Adopt new bounds. Waves, clouds and particles keep their state and
    /// heal through respawn and wrap-around.
    pub fn set_bounds(&mut self, bounds: Bounds, compact: bool) {
        self.bounds = bounds;
        self.compact = compact;
    }

    /// Replace the star pool with a fresh one filling the current bounds.
    pub fn reseed_stars(&mut self) {
        let count = self.counts().stars;
        self.stars = seed_stars(&mut self.seeder, self.bounds, count, &self.config);
        debug!(
            "Reseeded {} stars for {}x{}",
            count, self.bounds.width, self.bounds.height
        );
    }

    /// Replace all fixed-size pools (stars, waves, clouds) at the current
    /// pool counts. Particles and the spawn gate are kept.
    pub fn reseed_pools(&mut self) {
        let counts = self.counts();
        self.stars = seed_stars(&mut self.seeder, self.bounds, counts.stars, &self.config);
        self.waves = seed_waves(&mut self.seeder, self.bounds, counts.waves, &self.config);
        self.clouds = seed_clouds(&mut self.seeder, self.bounds, counts.clouds, &self.config);
        debug!(
            "Reseeded pools for {}x{} (compact: {})",
            self.bounds.width, self.bounds.height, self.compact
        );
    }
}
