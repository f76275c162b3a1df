//! Flat f32 records the front end reads straight out of WASM memory.
//! Must stay in sync with the TypeScript reader.
//!
//! ```text
//! BallInstance:     id, number, kind, x, y, vx, vy, racked, r, g, b, radius
//! CaptureRecord:    ball_id, pocket_id, was_cue, pad
//! PredictionRecord: x, y, distance, struck_ball (-1 = cushion), x1, y1, x2, y2
//! ```

use bytemuck::{Pod, Zeroable};

use crate::api::types::CaptureEvent;
use crate::components::ball::Ball;
use crate::systems::prediction::{PredictedCollision, Segment};

/// One ball, 12 floats.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct BallInstance {
    pub id: f32,
    pub number: f32,
    /// 0 cue, 1 solid, 2 striped.
    pub kind: f32,
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// 1.0 while part of an undisturbed rack.
    pub racked: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub radius: f32,
}

impl BallInstance {
    pub const FLOATS: usize = 12;

    pub fn from_ball(ball: &Ball, radius: f32) -> Self {
        Self {
            id: ball.id.0 as f32,
            number: ball.number as f32,
            kind: ball.ball_type.as_f32(),
            x: ball.pos.x,
            y: ball.pos.y,
            vx: ball.vel.x,
            vy: ball.vel.y,
            racked: if ball.racked { 1.0 } else { 0.0 },
            r: ball.color.r,
            g: ball.color.g,
            b: ball.color.b,
            radius,
        }
    }
}

/// One pocket capture, 4 floats.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct CaptureRecord {
    pub ball_id: f32,
    pub pocket_id: f32,
    pub was_cue: f32,
    pub _pad: f32,
}

impl CaptureRecord {
    pub const FLOATS: usize = 4;
}

impl From<&CaptureEvent> for CaptureRecord {
    fn from(event: &CaptureEvent) -> Self {
        Self {
            ball_id: event.ball_id.0 as f32,
            pocket_id: event.pocket_id as f32,
            was_cue: if event.was_cue_ball { 1.0 } else { 0.0 },
            _pad: 0.0,
        }
    }
}

/// One predicted contact plus its deflection segment, 8 floats.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct PredictionRecord {
    pub x: f32,
    pub y: f32,
    pub distance: f32,
    pub struck_ball: f32,
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl PredictionRecord {
    pub const FLOATS: usize = 8;
}

impl From<&PredictedCollision> for PredictionRecord {
    fn from(hit: &PredictedCollision) -> Self {
        let Segment { start, end } = hit.deflection;
        Self {
            x: hit.point.x,
            y: hit.point.y,
            distance: hit.distance,
            struck_ball: hit.struck_ball().map_or(-1.0, |id| id.0 as f32),
            x1: start.x,
            y1: start.y,
            x2: end.x,
            y2: end.y,
        }
    }
}

/// Per-frame output buffers, rebuilt after each batch of ticks.
#[derive(Debug, Default)]
pub struct FrameBuffers {
    pub balls: Vec<BallInstance>,
    /// Captures accumulate across the ticks of one frame.
    pub captures: Vec<CaptureRecord>,
    pub predictions: Vec<PredictionRecord>,
}

impl FrameBuffers {
    pub fn new() -> Self {
        Self {
            balls: Vec::with_capacity(16),
            captures: Vec::with_capacity(16),
            predictions: Vec::with_capacity(4),
        }
    }

    pub fn write_balls(&mut self, balls: &[Ball], radius: f32) {
        self.balls.clear();
        self.balls.extend(balls.iter().map(|b| BallInstance::from_ball(b, radius)));
    }

    pub fn push_captures(&mut self, events: &[CaptureEvent]) {
        self.captures.extend(events.iter().map(CaptureRecord::from));
    }

    pub fn write_predictions(&mut self, predictions: &[PredictedCollision]) {
        self.predictions.clear();
        self.predictions.extend(predictions.iter().map(PredictionRecord::from));
    }

    /// Drop per-frame capture records once the front end has read them.
    pub fn clear_captures(&mut self) {
        self.captures.clear();
    }

    pub fn balls_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.balls[..])
    }

    pub fn captures_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.captures[..])
    }

    pub fn predictions_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.predictions[..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::BallId;
    use crate::systems::prediction::Struck;
    use glam::Vec2;

    #[test]
    fn record_sizes_match_protocol() {
        assert_eq!(std::mem::size_of::<BallInstance>(), BallInstance::FLOATS * 4);
        assert_eq!(std::mem::size_of::<CaptureRecord>(), CaptureRecord::FLOATS * 4);
        assert_eq!(std::mem::size_of::<PredictionRecord>(), PredictionRecord::FLOATS * 4);
    }

    #[test]
    fn ball_instance_layout() {
        let ball = Ball::new(BallId(7), 11)
            .with_pos(Vec2::new(10.0, 20.0))
            .with_vel(Vec2::new(0.5, -0.5))
            .racked(true);
        let mut buffers = FrameBuffers::new();
        buffers.write_balls(&[ball], 3.2);
        let floats = buffers.balls_floats();
        assert_eq!(floats.len(), 12);
        assert_eq!(&floats[..8], &[7.0, 11.0, 2.0, 10.0, 20.0, 0.5, -0.5, 1.0]);
        assert_eq!(floats[11], 3.2);
    }

    #[test]
    fn wall_prediction_marks_no_ball() {
        let hit = PredictedCollision {
            point: Vec2::new(96.8, 50.0),
            distance: 46.8,
            mover: BallId(0),
            struck: Struck::Wall { normal: Vec2::NEG_X },
            deflection: Segment { start: Vec2::new(96.8, 50.0), end: Vec2::new(76.8, 50.0) },
        };
        let record = PredictionRecord::from(&hit);
        assert_eq!(record.struck_ball, -1.0);
        assert_eq!(record.x2, 76.8);
    }

    #[test]
    fn captures_accumulate_until_cleared() {
        let mut buffers = FrameBuffers::new();
        let event = CaptureEvent { ball_id: BallId(2), pocket_id: 6, was_cue_ball: false };
        buffers.push_captures(&[event]);
        buffers.push_captures(&[event]);
        assert_eq!(buffers.captures_floats().len(), 8);
        buffers.clear_captures();
        assert!(buffers.captures_floats().is_empty());
    }
}
