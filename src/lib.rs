//! # Cosmic Field
//!
//! An animated background of twinkling stars, expanding energy waves,
//! drifting particles and rotating nebula clouds, composited every frame onto
//! a 2D raster surface.
//!
//! The crate is split so that every piece can run without a window:
//! the simulation and compositor work on a plain [`FieldState`] and any
//! [`Surface`]; the [`FieldController`] drives them from a [`TickSource`];
//! the [`host`] module puts the result in a real window.
//!
//! ## Quick Start
//!
//! ```ignore
//! use cosmic_field::prelude::*;
//!
//! let config = FieldConfig::new().with_star_count(300).with_seed(7);
//! let mut controller = FieldController::new(config, ManualTicker::new());
//! controller.mount(Some(Raster::new(0, 0)), Viewport::new(1280.0, 720.0));
//! controller.run_frames(120, 1.0 / 60.0);
//! export::save_png(controller.surface().unwrap(), "field.png")?;
//! ```
//!
//! Or open a window behind everything else:
//!
//! ```ignore
//! cosmic_field::host::run(FieldConfig::new(), HostOptions::background_layer())?;
//! ```
//!
//! ## Entities
//!
//! | Entity | Pool | Behavior per tick |
//! |--------|------|-------------------|
//! | [`Star`] | fixed | phase advances; opacity twinkles |
//! | [`EnergyWave`] | fixed | radius grows, opacity decays, respawns when spent |
//! | [`CosmicParticle`] | grows/shrinks | drifts inward, fades with age, removed off-screen or expired |
//! | [`NebulaCloud`] | fixed | drifts outward and rotates, wraps within its half |
//!
//! ## Frame Order
//!
//! Each tick runs [`simulation::step`] then [`compositor::composite`], which
//! paints background, clouds, waves, particles and stars in that order.

pub mod clock;
pub mod color;
pub mod compositor;
pub mod config;
pub mod controller;
pub mod entities;
pub mod error;
pub mod export;
pub mod field;
pub mod gradient;
pub mod host;
pub mod raster;
pub mod simulation;
pub mod spawn;
pub mod ticker;

pub use clock::FrameClock;
pub use color::{ColorStop, Palette, Rgba};
pub use config::{FieldConfig, PoolCounts};
pub use controller::{ControllerState, FieldController, Viewport};
pub use entities::{CosmicParticle, EnergyWave, NebulaCloud, Side, Star};
pub use error::{ConfigError, ExportError, FieldError, HostError};
pub use field::{Bounds, FieldState};
pub use glam::{Vec2, Vec4};
pub use gradient::{LinearGradient, RadialGradient};
pub use host::HostOptions;
pub use raster::{BlendMode, Raster, Surface};
pub use spawn::Seeder;
pub use ticker::{ManualTicker, TickHandle, TickSource};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use cosmic_field::prelude::*;
/// ```
pub mod prelude {
    pub use crate::clock::FrameClock;
    pub use crate::color::{ColorStop, Palette, Rgba};
    pub use crate::config::FieldConfig;
    pub use crate::controller::{ControllerState, FieldController, Viewport};
    pub use crate::export;
    pub use crate::field::{Bounds, FieldState};
    pub use crate::host::HostOptions;
    pub use crate::raster::{BlendMode, Raster, Surface};
    pub use crate::ticker::{ManualTicker, TickHandle, TickSource};
    pub use crate::{Vec2, Vec4};
}
