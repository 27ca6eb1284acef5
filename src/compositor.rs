//! Frame compositor.
//!
//! Repaints the whole surface every frame, back to front:
//!
//! 1. background wash (vertical gradient)
//! 2. nebula clouds (rotated elliptical gradients)
//! 3. energy waves (concentric rings, fading outward)
//! 4. cosmic particles (additive glow halo + solid core)
//! 5. stars (additive glow halo + solid core)
//!
//! Gradients are built per entity per frame from the entity's own position,
//! size, opacity and color; nothing is cached between frames.

use crate::color::{ColorStop, Rgba};
use crate::entities::{CosmicParticle, EnergyWave, NebulaCloud, Star};
use crate::field::FieldState;
use crate::gradient::{LinearGradient, RadialGradient};
use crate::raster::{BlendMode, Surface};
use glam::Vec2;

/// Rings drawn per energy wave.
pub const WAVE_RINGS: usize = 3;
/// Gap between consecutive rings of a wave, as a fraction of its radius.
const RING_SPACING: f32 = 0.18;
/// Half-thickness of a ring in pixels.
const RING_HALF_WIDTH: f32 = 4.0;
/// Ellipse axes of a nebula cloud.
const CLOUD_ASPECT: Vec2 = Vec2::new(1.0, 0.6);
const PARTICLE_HALO: f32 = 4.0;
const STAR_HALO: f32 = 3.0;

/// Paint the full frame for `state` onto `surface`.
pub fn composite<S: Surface + ?Sized>(state: &FieldState, surface: &mut S) {
    surface.clear();
    paint_background(&state.config().background, surface);
    for cloud in &state.clouds {
        paint_cloud(cloud, surface);
    }
    for wave in &state.waves {
        paint_wave(wave, surface);
    }
    for particle in &state.particles {
        paint_particle(particle, surface);
    }
    for star in &state.stars {
        paint_star(star, surface);
    }
}

pub fn paint_background<S: Surface + ?Sized>(stops: &[ColorStop], surface: &mut S) {
    if stops.is_empty() {
        return;
    }
    let gradient = LinearGradient::vertical(0.0, surface.height() as f32).with_stops(stops);
    surface.fill_linear(&gradient);
}

pub fn paint_cloud<S: Surface + ?Sized>(cloud: &NebulaCloud, surface: &mut S) {
    let opacity = cloud.rendered_opacity();
    if opacity <= 0.0 {
        return;
    }
    let gradient = RadialGradient::new(cloud.position, cloud.size)
        .with_ellipse(CLOUD_ASPECT, cloud.rotation)
        .with_stop(0.0, cloud.color.with_alpha(opacity))
        .with_stop(0.5, cloud.color.with_alpha(opacity * 0.5))
        .with_stop(1.0, cloud.color.with_alpha(0.0));
    surface.fill_radial(&gradient, BlendMode::Alpha);
}

/// Each ring is an annulus: transparent inside, peak alpha on the ring
/// radius, transparent again just outside. Inner rings are fainter.
pub fn paint_wave<S: Surface + ?Sized>(wave: &EnergyWave, surface: &mut S) {
    let opacity = wave.rendered_opacity();
    if opacity <= 0.0 || wave.radius <= 0.0 {
        return;
    }
    for ring in 0..WAVE_RINGS {
        let ring_radius = wave.radius * (1.0 - ring as f32 * RING_SPACING);
        if ring_radius <= RING_HALF_WIDTH {
            continue;
        }
        let alpha = opacity * (1.0 - ring as f32 / WAVE_RINGS as f32);
        let outer = ring_radius + RING_HALF_WIDTH;
        let gradient = RadialGradient::new(wave.origin, outer)
            .with_stop(0.0, wave.color.with_alpha(0.0))
            .with_stop((ring_radius - RING_HALF_WIDTH) / outer, wave.color.with_alpha(0.0))
            .with_stop(ring_radius / outer, wave.color.with_alpha(alpha))
            .with_stop(1.0, wave.color.with_alpha(0.0));
        surface.fill_radial(&gradient, BlendMode::Alpha);
    }
}

pub fn paint_particle<S: Surface + ?Sized>(particle: &CosmicParticle, surface: &mut S) {
    let opacity = particle.rendered_opacity();
    if opacity <= 0.0 {
        return;
    }
    paint_glow(particle.position, particle.size, PARTICLE_HALO, particle.color, opacity, surface);
}

pub fn paint_star<S: Surface + ?Sized>(star: &Star, surface: &mut S) {
    let opacity = star.rendered_opacity();
    if opacity <= 0.0 {
        return;
    }
    paint_glow(star.position, star.radius, STAR_HALO, star.color, opacity, surface);
}

fn paint_glow<S: Surface + ?Sized>(
    center: Vec2,
    radius: f32,
    halo: f32,
    color: Rgba,
    opacity: f32,
    surface: &mut S,
) {
    let glow = RadialGradient::new(center, radius * halo)
        .with_stop(0.0, color.with_alpha(opacity * 0.6))
        .with_stop(1.0, color.with_alpha(0.0));
    surface.fill_radial(&glow, BlendMode::Additive);
    surface.fill_circle(center, radius, color.with_alpha(opacity), BlendMode::Alpha);
}
