use serde::{Deserialize, Serialize};

use crate::api::error::EngineError;
use crate::systems::rack::rack_half_height;

/// Ratio applied to exact contact distance before two balls exchange velocity.
/// Slightly under 1.0 so balls merely touching do not trigger a response.
pub const COLLISION_THRESHOLD: f32 = 0.99;

/// Physical constants for one simulation epoch.
/// Every stage of the tick takes the values it needs from here explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PhysicsConfig {
    /// Velocity retained per tick, in (0, 1).
    pub friction_coefficient: f32,
    /// Shared ball radius in table units (default: 3.2).
    pub ball_radius: f32,
    /// Distance from the table edge to the cushion line.
    pub table_margin: f32,
    /// Speed given to randomly spawned balls.
    pub default_ball_speed: f32,
    /// Fraction of `2 * ball_radius` below which balls exchange velocity.
    pub collision_threshold_ratio: f32,
    /// Maximum number of chained events the predictor reports.
    pub prediction_depth: usize,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            friction_coefficient: 0.991,
            ball_radius: 3.2,
            table_margin: 0.0,
            default_ball_speed: 2.0,
            collision_threshold_ratio: COLLISION_THRESHOLD,
            prediction_depth: 3,
        }
    }
}

impl PhysicsConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        let invalid = |field, reason: &str| {
            Err(EngineError::InvalidConfig { field, reason: reason.to_string() })
        };

        if !(self.friction_coefficient > 0.0 && self.friction_coefficient < 1.0) {
            return invalid("frictionCoefficient", "must lie strictly between 0 and 1");
        }
        if !(self.ball_radius > 0.0) || !self.ball_radius.is_finite() {
            return invalid("ballRadius", "must be a positive number");
        }
        if !(self.table_margin >= 0.0) {
            return invalid("tableMargin", "must not be negative");
        }
        if self.table_margin + self.ball_radius >= 50.0 {
            return invalid("tableMargin", "margin plus radius leaves no playable area");
        }
        if 50.0 - rack_half_height(self.ball_radius) < self.table_margin + self.ball_radius {
            return invalid("ballRadius", "rack does not fit between the cushions");
        }
        if !(self.default_ball_speed >= 0.0) || !self.default_ball_speed.is_finite() {
            return invalid("defaultBallSpeed", "must be a finite non-negative number");
        }
        if !(self.collision_threshold_ratio > 0.0 && self.collision_threshold_ratio <= 1.0) {
            return invalid("collisionThresholdRatio", "must lie in (0, 1]");
        }
        if self.prediction_depth == 0 {
            return invalid("predictionDepth", "must be at least 1");
        }
        Ok(())
    }

    /// Lowest legal center coordinate on either axis.
    pub fn min_coord(&self) -> f32 {
        self.table_margin + self.ball_radius
    }

    /// Highest legal center coordinate on either axis.
    pub fn max_coord(&self) -> f32 {
        crate::components::table::TABLE_SIZE - self.table_margin - self.ball_radius
    }
}
