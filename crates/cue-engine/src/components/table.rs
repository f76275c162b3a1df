//! Table geometry: the normalized play square and its pockets.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Side length of the normalized table. Both axes run 0..TABLE_SIZE.
pub const TABLE_SIZE: f32 = 100.0;

/// Capture radius for the four corner pockets.
pub const CORNER_POCKET_RADIUS: f32 = 6.0;
/// Capture radius for the two side (middle) pockets.
pub const SIDE_POCKET_RADIUS: f32 = 4.5;

/// Head spot: where the cue ball is placed at rack time and after a scratch.
pub const HEAD_SPOT: Vec2 = Vec2::new(25.0, 50.0);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pocket {
    pub id: u32,
    pub pos: Vec2,
    pub capture_radius: f32,
}

impl Pocket {
    pub const fn new(id: u32, x: f32, y: f32, capture_radius: f32) -> Self {
        Self { id, pos: Vec2::new(x, y), capture_radius }
    }

    /// Whether a ball center lies strictly inside the capture radius.
    pub fn captures(&self, center: Vec2) -> bool {
        center.distance_squared(self.pos) < self.capture_radius * self.capture_radius
    }
}

/// Standard six-pocket layout: corners plus the middle of the long rails.
pub const STANDARD_POCKETS: [Pocket; 6] = [
    Pocket::new(1, 0.0, 0.0, CORNER_POCKET_RADIUS),
    Pocket::new(2, 50.0, 0.0, SIDE_POCKET_RADIUS),
    Pocket::new(3, 100.0, 0.0, CORNER_POCKET_RADIUS),
    Pocket::new(4, 0.0, 100.0, CORNER_POCKET_RADIUS),
    Pocket::new(5, 50.0, 100.0, SIDE_POCKET_RADIUS),
    Pocket::new(6, 100.0, 100.0, CORNER_POCKET_RADIUS),
];

/// Pocket layout for a table. The margin comes from the physics config.
/// Pockets sit on the cushion lines so they stay reachable for any margin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub pockets: Vec<Pocket>,
}

impl Table {
    pub fn new(pockets: Vec<Pocket>) -> Self {
        Self { pockets }
    }

    /// Standard six pockets with their centers moved in by `margin`.
    pub fn with_margin(margin: f32) -> Self {
        let far = TABLE_SIZE - margin;
        let mid = TABLE_SIZE / 2.0;
        Self::new(
            STANDARD_POCKETS
                .iter()
                .map(|p| {
                    let inset = |c: f32| if c <= 0.0 { margin } else if c >= TABLE_SIZE { far } else { mid };
                    Pocket { pos: Vec2::new(inset(p.pos.x), inset(p.pos.y)), ..*p }
                })
                .collect(),
        )
    }

    /// The pocket closest to `point`, if the table has any.
    pub fn nearest_pocket(&self, point: Vec2) -> Option<&Pocket> {
        nearest_pocket(&self.pockets, point)
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::with_margin(0.0)
    }
}

pub fn nearest_pocket(pockets: &[Pocket], point: Vec2) -> Option<&Pocket> {
    pockets.iter().min_by(|a, b| {
        a.pos
            .distance_squared(point)
            .total_cmp(&b.pos.distance_squared(point))
    })
}
