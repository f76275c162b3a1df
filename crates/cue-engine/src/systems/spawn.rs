use glam::Vec2;
use rand::{Rng, RngCore};

use crate::components::table::TABLE_SIZE;

/// Uniform random point in the playable area for a ball of `radius`.
pub fn random_position<R: RngCore + ?Sized>(margin: f32, radius: f32, rng: &mut R) -> Vec2 {
    let lo = margin + radius;
    let span = (TABLE_SIZE - 2.0 * lo).max(0.0);
    Vec2::new(lo + rng.gen::<f32>() * span, lo + rng.gen::<f32>() * span)
}

/// Velocity of magnitude `speed` in a uniformly random direction.
pub fn random_velocity<R: RngCore + ?Sized>(speed: f32, rng: &mut R) -> Vec2 {
    let angle = rng.gen::<f32>() * std::f32::consts::TAU;
    Vec2::new(angle.cos(), angle.sin()) * speed
}
