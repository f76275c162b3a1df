//! Standard 15-ball triangle rack.
//!
//! Slots are numbered apex-first, row by row, top to bottom within a row:
//! ```text
//!            10
//!         6
//!      3     11
//!   1     7
//! 0     4     12
//!   2     8
//!      5     13
//!         9
//!            14
//! ```
//! The apex points left toward the head spot; rows grow toward the foot rail.

use glam::Vec2;
use rand::seq::SliceRandom;
use rand::RngCore;

use crate::api::types::BallId;
use crate::components::ball::{Ball, CUE_NUMBER};
use crate::components::table::{HEAD_SPOT, TABLE_SIZE};

pub const RACK_SIZE: usize = 15;
/// Slot holding the 8 ball: middle of the third row.
pub const EIGHT_BALL_SLOT: usize = 4;
/// Apex anchor as a fraction of table length.
pub const RACK_APEX: Vec2 = Vec2::new(75.0, 50.0);
/// Spacing between neighbouring slots, in multiples of the ball radius.
pub const RACK_SPACING_RATIO: f32 = 1.25;

const ROW_HEIGHT: f32 = 0.866; // sqrt(3)/2

/// Distance from the rack's center line to the outermost back-row centers.
pub fn rack_half_height(radius: f32) -> f32 {
    4.0 * (radius * RACK_SPACING_RATIO) * ROW_HEIGHT
}

/// Slot positions for a rack with the given margin and radius.
/// The triangle only fits vertically while `rack_half_height(radius)` stays
/// within the cushion lines; `PhysicsConfig::validate` rejects larger radii.
///
/// The apex sits at [`RACK_APEX`] unless the back row would cross the foot
/// cushion, in which case the whole triangle slides toward the head.
pub fn rack_positions(margin: f32, radius: f32) -> [Vec2; RACK_SIZE] {
    let spacing = radius * RACK_SPACING_RATIO;
    let max_x = TABLE_SIZE - margin - radius;
    let apex_x = RACK_APEX.x.min(max_x - 4.0 * spacing);

    let mut positions = [Vec2::ZERO; RACK_SIZE];
    let mut slot = 0;
    for row in 0..5 {
        let x = (apex_x + row as f32 * spacing).min(max_x);
        for k in 0..=row {
            // Offsets in half-slots: -row, -row+2, ..., +row
            let half_slots = (2 * k) as f32 - row as f32;
            let y = RACK_APEX.y + half_slots * spacing * ROW_HEIGHT;
            positions[slot] = Vec2::new(x, y);
            slot += 1;
        }
    }
    positions
}

/// Ball numbers for each slot: 1-7 and 9-15 shuffled, 8 fixed at
/// [`EIGHT_BALL_SLOT`].
pub fn rack_numbers<R: RngCore + ?Sized>(rng: &mut R) -> [u8; RACK_SIZE] {
    let mut others: Vec<u8> = (1..=15).filter(|&n| n != 8).collect();
    others.shuffle(rng);
    others.insert(EIGHT_BALL_SLOT, 8);

    let mut numbers = [0u8; RACK_SIZE];
    numbers.copy_from_slice(&others);
    numbers
}

/// Slot positions plus the number assigned to each slot.
#[derive(Debug, Clone, PartialEq)]
pub struct RackLayout {
    pub positions: [Vec2; RACK_SIZE],
    pub numbers: [u8; RACK_SIZE],
}

impl RackLayout {
    pub fn generate<R: RngCore + ?Sized>(margin: f32, radius: f32, rng: &mut R) -> Self {
        Self {
            positions: rack_positions(margin, radius),
            numbers: rack_numbers(rng),
        }
    }

    /// Cue ball (id 0) at the head spot plus 15 racked balls with ids 1..=15.
    pub fn into_balls(self) -> Vec<Ball> {
        let mut balls = Vec::with_capacity(RACK_SIZE + 1);
        balls.push(Ball::new(BallId(0), CUE_NUMBER).with_pos(HEAD_SPOT));
        for (slot, (pos, number)) in self.positions.into_iter().zip(self.numbers).enumerate() {
            balls.push(
                Ball::new(BallId(slot as u32 + 1), number)
                    .with_pos(pos)
                    .racked(true),
            );
        }
        balls
    }
}

/// Fresh table: cue ball plus a full rack.
pub fn build_rack<R: RngCore + ?Sized>(margin: f32, radius: f32, rng: &mut R) -> Vec<Ball> {
    let layout = RackLayout::generate(margin, radius, rng);
    log::info!("Rack built: {:?}", layout.numbers);
    layout.into_balls()
}
