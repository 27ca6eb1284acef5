//! Per-tick simulation step.
//!
//! Advances every pool of a [`FieldState`] in place. Kinematics are in
//! pixels (or radians) per tick; only the particle spawn gate consumes
//! elapsed seconds.
//!
//! | Entity | Per tick |
//! |--------|----------|
//! | Star | phase += twinkle speed |
//! | EnergyWave | radius += speed, opacity -= decay, respawn once spent |
//! | NebulaCloud | position += velocity, rotation += spin, wrap in its band |
//! | CosmicParticle | drop if expired/off-screen, else age, move and fade |

use crate::entities::{CosmicParticle, EnergyWave, NebulaCloud, Side, Star};
use crate::field::{Bounds, FieldState};
use crate::spawn::Seeder;
use log::trace;

/// Advance the whole field by one tick. `dt` is the simulated time in
/// seconds since the previous tick.
pub fn step(state: &mut FieldState, dt: f32) {
    let bounds = state.bounds();
    let decay = state.config.wave_decay;
    let margin = state.config.particle_margin;

    for star in &mut state.stars {
        step_star(star);
    }
    for wave in &mut state.waves {
        step_wave(wave, bounds, decay, &mut state.seeder);
    }
    for cloud in &mut state.clouds {
        step_cloud(cloud, bounds);
    }
    step_particles(&mut state.particles, bounds, margin);

    state.elapsed += dt.max(0.0);
    if state.elapsed >= state.next_spawn_at {
        let particle = state.seeder.particle(bounds, &state.config);
        trace!(
            "Spawned particle on {:?} edge at y={:.1}, max age {}",
            particle.side, particle.position.y, particle.max_age
        );
        state.particles.push(particle);
        state.next_spawn_at = state.elapsed + state.seeder.spawn_delay(&state.config);
    }

    state.frame += 1;
}

/// Stars never move; only the twinkle phase advances.
#[inline]
pub fn step_star(star: &mut Star) {
    star.phase += star.twinkle_speed;
}

/// A spent wave (from the previous tick) is restarted in place; otherwise it
/// grows and fades. The pool never shrinks.
pub fn step_wave(wave: &mut EnergyWave, bounds: Bounds, decay: f32, seeder: &mut Seeder) {
    if wave.is_spent() {
        seeder.respawn_wave(wave, bounds);
        return;
    }
    wave.radius += wave.speed;
    wave.opacity = (wave.opacity - decay).max(0.0);
}

/// Drift and spin a cloud, wrapping it inside the band of its side.
///
/// Crossing the outer margin re-enters the cloud at the canvas center (the
/// inner extreme of its band); every other attribute is left untouched.
/// Vertically the cloud wraps within `[-margin, height + margin]`.
pub fn step_cloud(cloud: &mut NebulaCloud, bounds: Bounds) {
    cloud.position += cloud.velocity;
    cloud.rotation += cloud.rotation_speed;

    let margin = cloud.margin();
    let center = bounds.width * 0.5;
    match cloud.side {
        Side::Left if cloud.position.x < -margin => cloud.position.x = center,
        Side::Right if cloud.position.x > bounds.width + margin => cloud.position.x = center,
        _ => {}
    }

    if cloud.position.y < -margin {
        cloud.position.y = bounds.height + margin;
    } else if cloud.position.y > bounds.height + margin {
        cloud.position.y = -margin;
    }
}

/// Drop expired and off-screen particles, then advance the survivors.
///
/// A particle is drawn with opacity exactly 0 on the tick its age reaches
/// `max_age`, and is gone on the tick after.
pub fn step_particles(particles: &mut Vec<CosmicParticle>, bounds: Bounds, margin: f32) {
    particles.retain(|p| {
        !p.is_expired() && p.position.x >= -margin && p.position.x <= bounds.width + margin
    });

    for particle in particles.iter_mut() {
        particle.age += 1;
        particle.position += particle.velocity;
        particle.opacity = particle.initial_opacity * particle.life_remaining();
    }
}
