//! Pairwise ball-ball resolution: elastic impulse plus overlap separation.
//!
//! Unit mass and unit restitution throughout, so an approaching pair swaps
//! the normal component of their relative velocity.

use crate::components::ball::Ball;

/// Resolve every unordered pair of balls once, in index order.
///
/// * Velocity response when `d < 2r * threshold_ratio` and the pair is
///   approaching. Racked balls involved in a response wake up.
/// * Overlap correction when `d < 2r` and neither ball is racked: each ball
///   moves `(2r - d) / 2` away from the other along the line of centers.
///
/// Pairs where both balls are racked, and pairs with coincident centers,
/// are skipped.
pub fn resolve_ball_collisions(balls: &[Ball], radius: f32, threshold_ratio: f32) -> Vec<Ball> {
    let mut out = balls.to_vec();
    let min_dist = radius * 2.0;
    let response_dist = min_dist * threshold_ratio;

    for i in 0..out.len() {
        for j in (i + 1)..out.len() {
            if out[i].racked && out[j].racked {
                continue;
            }

            let delta = out[j].pos - out[i].pos;
            let dist = delta.length();
            if dist == 0.0 || dist >= min_dist {
                continue;
            }
            let normal = delta / dist;
            // A ball knocked out of the rack by this pair is not pushed this tick.
            let either_racked = out[i].racked || out[j].racked;

            if dist < response_dist {
                let rel_vel = (out[j].vel - out[i].vel).dot(normal);
                if rel_vel < 0.0 {
                    let impulse = normal * -rel_vel;
                    out[i].vel -= impulse;
                    out[j].vel += impulse;
                    out[i].racked = false;
                    out[j].racked = false;
                }
            }

            if !either_racked {
                let separation = normal * ((min_dist - dist) * 0.5);
                out[i].pos -= separation;
                out[j].pos += separation;
            }
        }
    }

    out
}
