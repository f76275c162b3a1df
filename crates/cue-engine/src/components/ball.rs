//! Ball state and cosmetic data: categories, colors, standard palette.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::error::EngineError;
use crate::api::types::BallId;

/// Number reserved for the cue ball.
pub const CUE_NUMBER: u8 = 0;

/// Ball category. Cosmetic only; physics treats every ball the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BallType {
    Cue,
    Solid,
    Striped,
}

impl BallType {
    /// Standard category for a ball number: 0 cue, 1-8 solid, 9+ striped.
    pub fn for_number(number: u8) -> Self {
        match number {
            CUE_NUMBER => BallType::Cue,
            1..=8 => BallType::Solid,
            _ => BallType::Striped,
        }
    }

    /// Value written into the float buffers (0 cue, 1 solid, 2 striped).
    pub fn as_f32(self) -> f32 {
        match self {
            BallType::Cue => 0.0,
            BallType::Solid => 1.0,
            BallType::Striped => 2.0,
        }
    }
}

/// Linear RGB color in 0..1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl BallColor {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Result<Self, EngineError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(EngineError::InvalidColor(hex.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map(|v| v as f32 / 255.0)
                .map_err(|_| EngineError::InvalidColor(hex.to_string()))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Standard color for a ball number. Unknown numbers fall back to white.
    pub fn for_number(number: u8) -> Self {
        BALL_PALETTE
            .get(number as usize)
            .copied()
            .unwrap_or(BALL_PALETTE[0])
    }
}

/// Standard set colors, indexed by ball number (0 = cue).
pub const BALL_PALETTE: [BallColor; 16] = [
    BallColor::new(1.0, 1.0, 1.0),     // Cue
    BallColor::new(1.0, 1.0, 0.0),     // 1 Yellow
    BallColor::new(0.0, 0.0, 1.0),     // 2 Blue
    BallColor::new(1.0, 0.0, 0.0),     // 3 Red
    BallColor::new(0.5, 0.0, 0.5),     // 4 Purple
    BallColor::new(1.0, 0.65, 0.0),    // 5 Orange
    BallColor::new(0.0, 0.5, 0.0),     // 6 Green
    BallColor::new(0.55, 0.27, 0.07),  // 7 Brown
    BallColor::new(0.0, 0.0, 0.0),     // 8 Black
    BallColor::new(1.0, 1.0, 0.5),     // 9 Yellow stripe
    BallColor::new(0.25, 0.25, 1.0),   // 10 Blue stripe
    BallColor::new(1.0, 0.25, 0.25),   // 11 Red stripe
    BallColor::new(0.75, 0.5, 0.75),   // 12 Purple stripe
    BallColor::new(1.0, 0.75, 0.25),   // 13 Orange stripe
    BallColor::new(0.25, 0.75, 0.25),  // 14 Green stripe
    BallColor::new(0.75, 0.5, 0.25),   // 15 Brown stripe
];

/// A ball on the table. The radius is shared by all balls and lives in
/// [`PhysicsConfig`](crate::PhysicsConfig), not here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub id: BallId,
    pub number: u8,
    pub ball_type: BallType,
    pub color: BallColor,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Part of an undisturbed rack; racked pairs ignore each other.
    pub racked: bool,
}

impl Ball {
    /// A resting ball with the standard category and color for `number`.
    pub fn new(id: BallId, number: u8) -> Self {
        Self {
            id,
            number,
            ball_type: BallType::for_number(number),
            color: BallColor::for_number(number),
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            racked: false,
        }
    }

    pub fn with_pos(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_vel(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    pub fn with_color(mut self, color: BallColor) -> Self {
        self.color = color;
        self
    }

    pub fn racked(mut self, racked: bool) -> Self {
        self.racked = racked;
        self
    }

    pub fn is_cue(&self) -> bool {
        self.number == CUE_NUMBER
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_follow_numbers() {
        assert_eq!(BallType::for_number(0), BallType::Cue);
        assert_eq!(BallType::for_number(8), BallType::Solid);
        assert_eq!(BallType::for_number(9), BallType::Striped);
        assert_eq!(BallType::for_number(15), BallType::Striped);
    }

    #[test]
    fn new_ball_uses_palette() {
        let ball = Ball::new(BallId(4), 8);
        assert_eq!(ball.color, BallColor::new(0.0, 0.0, 0.0));
        assert!(!ball.racked);
        assert!(!ball.is_cue());
    }

    #[test]
    fn parse_hex_color() {
        let c = BallColor::from_hex("#FF8000").unwrap();
        assert_eq!(c.r, 1.0);
        assert!((c.g - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.b, 0.0);
        assert!(BallColor::from_hex("ff8000").is_ok());
    }

    #[test]
    fn reject_bad_hex_color() {
        assert!(matches!(BallColor::from_hex("#FFF"), Err(EngineError::InvalidColor(_))));
        assert!(matches!(BallColor::from_hex("#GG0000"), Err(EngineError::InvalidColor(_))));
        assert!(matches!(BallColor::from_hex("#+F+F+F"), Err(EngineError::InvalidColor(_))));
    }

    #[test]
    fn unknown_number_color_falls_back_to_white() {
        assert_eq!(BallColor::for_number(42), BALL_PALETTE[0]);
    }
}
