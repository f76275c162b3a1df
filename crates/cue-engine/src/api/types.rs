use serde::{Deserialize, Serialize};

/// Stable identifier for a ball on the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BallId(pub u32);

impl std::fmt::Display for BallId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A candidate aim: which ball, which direction (degrees), how fast.
/// Angles follow screen convention: 0° points toward +x, 90° toward +y.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shot {
    pub ball_id: BallId,
    pub angle_degrees: f32,
    pub speed: f32,
}

impl Shot {
    pub fn new(ball_id: BallId, angle_degrees: f32, speed: f32) -> Self {
        Self { ball_id, angle_degrees, speed }
    }

    /// Velocity the ball receives when this shot is launched.
    pub fn velocity(&self) -> glam::Vec2 {
        let rad = self.angle_degrees.to_radians();
        glam::Vec2::new(rad.cos(), rad.sin()) * self.speed
    }
}

/// Emitted when a ball drops into a pocket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureEvent {
    pub ball_id: BallId,
    pub pocket_id: u32,
    pub was_cue_ball: bool,
}
