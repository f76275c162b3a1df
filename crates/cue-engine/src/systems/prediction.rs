//! Shot prediction: a read-only, closed-form walk along an aimed shot that
//! reports the chain of cushion and ball contacts it would produce.
//!
//! Each leg is a straight line. The earliest event on the leg (cushion or
//! ball) ends it; a cushion reflects the same ball onward, a ball contact
//! hands the chain to the struck ball. The chain is bounded by the
//! configured depth, and every ball joins a visited set the first time it
//! moves so two balls can never ping-pong forever.

use std::collections::HashSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::config::PhysicsConfig;
use crate::api::types::BallId;
use crate::components::ball::Ball;
use crate::components::table::TABLE_SIZE;

/// Length of a rendered deflection segment at full incoming speed.
pub const DEFLECTION_LENGTH: f32 = 20.0;

/// Smallest forward time counted as a new cushion contact. Keeps a leg that
/// starts on a cushion from hitting that same cushion again at t = 0.
const TIME_EPSILON: f32 = 1e-5;

/// Slack on the cushion-range test for impact points landing in a corner.
const RANGE_EPSILON: f32 = 1e-3;

/// Physical constants the predictor needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionParams {
    pub radius: f32,
    pub margin: f32,
    pub max_depth: usize,
}

impl PredictionParams {
    pub fn from_config(config: &PhysicsConfig) -> Self {
        Self {
            radius: config.ball_radius,
            margin: config.table_margin,
            max_depth: config.prediction_depth,
        }
    }
}

/// A straight line for the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Vec2,
    pub end: Vec2,
}

impl Segment {
    pub fn direction(&self) -> Vec2 {
        (self.end - self.start).normalize_or_zero()
    }

    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }
}

/// What a predicted leg ran into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Struck {
    /// A cushion, with its normal pointing back into the table.
    Wall { normal: Vec2 },
    Ball { id: BallId },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictedCollision {
    /// Center of the moving ball at the moment of contact.
    pub point: Vec2,
    /// Distance the moving ball covered on this leg.
    pub distance: f32,
    /// Ball travelling along this leg.
    pub mover: BallId,
    pub struck: Struck,
    /// Where the chain heads next: the reflected path after a cushion, or
    /// the struck ball's departure after a ball contact.
    pub deflection: Segment,
}

impl PredictedCollision {
    pub fn is_wall(&self) -> bool {
        matches!(self.struck, Struck::Wall { .. })
    }

    /// The struck ball, or `None` for a cushion.
    pub fn struck_ball(&self) -> Option<BallId> {
        match self.struck {
            Struck::Ball { id } => Some(id),
            Struck::Wall { .. } => None,
        }
    }
}

/// The straight aim guide drawn from a ball before any prediction.
pub fn aim_line(origin: Vec2, angle_degrees: f32, length: f32) -> Segment {
    let rad = angle_degrees.to_radians();
    Segment {
        start: origin,
        end: origin + Vec2::new(rad.cos(), rad.sin()) * length,
    }
}

#[derive(Debug, Clone, Copy)]
struct WallHit {
    time: f32,
    point: Vec2,
    normal: Vec2,
}

/// Earliest forward cushion contact for a ball centered at `pos` moving at `vel`.
/// `lo`/`hi` are the legal center coordinates on both axes.
fn earliest_wall_hit(pos: Vec2, vel: Vec2, lo: f32, hi: f32) -> Option<WallHit> {
    let mut best: Option<WallHit> = None;

    // (axis, bound, inward normal)
    let boundaries = [
        (0usize, lo, Vec2::X),
        (0, hi, Vec2::NEG_X),
        (1, lo, Vec2::Y),
        (1, hi, Vec2::NEG_Y),
    ];

    for (axis, bound, normal) in boundaries {
        let (p, v, p_other, v_other) = if axis == 0 {
            (pos.x, vel.x, pos.y, vel.y)
        } else {
            (pos.y, vel.y, pos.x, vel.x)
        };
        if v == 0.0 {
            continue;
        }
        let time = (bound - p) / v;
        // A ball already on this cushion line only hits it if pressing into it.
        let pressing = time.abs() <= TIME_EPSILON && vel.dot(normal) < 0.0;
        if time <= TIME_EPSILON && !pressing {
            continue;
        }
        let time = time.max(0.0);
        let other = p_other + v_other * time;
        if other < lo - RANGE_EPSILON || other > hi + RANGE_EPSILON {
            continue;
        }
        if best.map_or(false, |b| b.time <= time) {
            continue;
        }
        let other = other.clamp(lo, hi);
        let point = if axis == 0 {
            Vec2::new(bound, other)
        } else {
            Vec2::new(other, bound)
        };
        best = Some(WallHit { time, point, normal });
    }

    best
}

/// Time at which a ball leaving `pos` at `vel` first comes within `contact`
/// of a stationary center at `target`, if it ever does going forward.
fn ball_hit_time(pos: Vec2, vel: Vec2, target: Vec2, contact: f32) -> Option<f32> {
    let delta = target - pos;
    let along = vel.dot(delta);
    if along <= 0.0 {
        return None;
    }

    let speed_sq = vel.length_squared();
    let miss = vel.perp_dot(delta).abs() / speed_sq.sqrt();
    if miss > contact {
        return None;
    }

    // |pos + vel t - target|^2 = contact^2
    let a = speed_sq;
    let b = -2.0 * along;
    let c = delta.length_squared() - contact * contact;
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let t = (-b - discriminant.sqrt()) / (2.0 * a);
    (t >= 0.0).then_some(t)
}

/// Predict the contact chain for `origin` shot at `angle_degrees` and `speed`.
///
/// `balls` is a snapshot of the table; it is only read. The origin is
/// excluded from its own candidate list. Returns at most
/// `params.max_depth` events, nearest first. A zero or non-finite speed
/// yields an empty list.
pub fn predict_collisions(
    origin: &Ball,
    balls: &[Ball],
    angle_degrees: f32,
    speed: f32,
    params: &PredictionParams,
) -> Vec<PredictedCollision> {
    if !(speed > 0.0) || !speed.is_finite() || !angle_degrees.is_finite() {
        return Vec::new();
    }

    let lo = params.margin + params.radius;
    let hi = TABLE_SIZE - params.margin - params.radius;
    let contact = params.radius * 2.0;

    let rad = angle_degrees.to_radians();
    let mut mover = origin.id;
    let mut pos = origin.pos;
    let mut vel = Vec2::new(rad.cos(), rad.sin()) * speed;

    let mut visited: HashSet<BallId> = HashSet::new();
    let mut events = Vec::with_capacity(params.max_depth);

    while events.len() < params.max_depth {
        visited.insert(mover);

        let leg_speed = vel.length();
        if leg_speed == 0.0 {
            break;
        }

        let wall = earliest_wall_hit(pos, vel, lo, hi);
        let wall_distance = wall.map(|w| w.time * leg_speed);

        let mut nearest: Option<(f32, f32, &Ball)> = None;
        for other in balls.iter().filter(|b| !visited.contains(&b.id)) {
            let Some(t) = ball_hit_time(pos, vel, other.pos, contact) else {
                continue;
            };
            let distance = t * leg_speed;
            if wall_distance.map_or(false, |wd| distance > wd) {
                continue;
            }
            if nearest.map_or(true, |(best, _, _)| distance < best) {
                nearest = Some((distance, t, other));
            }
        }

        let ball_first = match (nearest, wall_distance) {
            (Some((d, _, _)), Some(wd)) => d < wd,
            (Some(_), None) => true,
            (None, _) => false,
        };

        if let (true, Some((distance, t, struck))) = (ball_first, nearest) {
            let point = pos + vel * t;
            let normal = (point - struck.pos) / contact;
            let transferred = normal * vel.dot(normal);
            events.push(PredictedCollision {
                point,
                distance,
                mover,
                struck: Struck::Ball { id: struck.id },
                deflection: Segment {
                    start: struck.pos,
                    end: struck.pos + transferred * (DEFLECTION_LENGTH / leg_speed),
                },
            });
            mover = struck.id;
            pos = struck.pos;
            vel = transferred;
        } else if let Some(hit) = wall {
            let reflected = vel - 2.0 * vel.dot(hit.normal) * hit.normal;
            events.push(PredictedCollision {
                point: hit.point,
                distance: hit.time * leg_speed,
                mover,
                struck: Struck::Wall { normal: hit.normal },
                deflection: Segment {
                    start: hit.point,
                    end: hit.point + reflected * (DEFLECTION_LENGTH / leg_speed),
                },
            });
            pos = hit.point;
            vel = reflected;
        } else {
            break;
        }
    }

    log::debug!("Predicted {} collision(s) for ball {}", events.len(), origin.id);
    events
}
