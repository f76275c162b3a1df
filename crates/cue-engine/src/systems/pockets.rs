use glam::Vec2;

use crate::api::types::CaptureEvent;
use crate::components::ball::Ball;
use crate::components::table::{nearest_pocket, Pocket, HEAD_SPOT};

/// Result of one capture pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaptureOutcome {
    pub balls: Vec<Ball>,
    pub events: Vec<CaptureEvent>,
}

/// Drop balls whose center lies inside their nearest pocket's capture radius.
///
/// Object balls leave the list. The cue ball stays in its slot but is reset
/// to the head spot, at rest and unracked.
pub fn capture_pockets(balls: &[Ball], pockets: &[Pocket]) -> CaptureOutcome {
    let mut outcome = CaptureOutcome {
        balls: Vec::with_capacity(balls.len()),
        events: Vec::new(),
    };

    for ball in balls {
        let pocket = match nearest_pocket(pockets, ball.pos) {
            Some(p) if p.captures(ball.pos) => p,
            _ => {
                outcome.balls.push(*ball);
                continue;
            }
        };

        outcome.events.push(CaptureEvent {
            ball_id: ball.id,
            pocket_id: pocket.id,
            was_cue_ball: ball.is_cue(),
        });

        if ball.is_cue() {
            log::info!("Cue ball pocketed in pocket {} - respawning", pocket.id);
            let mut cue = *ball;
            cue.pos = HEAD_SPOT;
            cue.vel = Vec2::ZERO;
            cue.racked = false;
            outcome.balls.push(cue);
        } else {
            log::info!("Ball {} pocketed into pocket {}", ball.number, pocket.id);
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::BallId;
    use crate::components::table::STANDARD_POCKETS;

    #[test]
    fn object_ball_in_corner_is_removed() {
        let balls = [
            Ball::new(BallId(0), 0).with_pos(Vec2::new(50.0, 50.0)),
            Ball::new(BallId(5), 5).with_pos(Vec2::new(3.3, 3.3)).with_vel(Vec2::new(-1.0, -1.0)),
        ];
        let out = capture_pockets(&balls, &STANDARD_POCKETS);
        assert_eq!(out.balls.len(), 1);
        assert_eq!(out.balls[0].id, BallId(0));
        assert_eq!(
            out.events,
            vec![CaptureEvent { ball_id: BallId(5), pocket_id: 1, was_cue_ball: false }]
        );
    }

    #[test]
    fn cue_ball_scratch_respawns_at_head_spot() {
        let cue = Ball::new(BallId(0), 0)
            .with_pos(Vec2::new(50.0, 96.8))
            .with_vel(Vec2::new(0.2, 1.0));
        let out = capture_pockets(&[cue], &STANDARD_POCKETS);
        assert_eq!(out.balls.len(), 1);
        assert_eq!(out.balls[0].pos, Vec2::new(25.0, 50.0));
        assert_eq!(out.balls[0].vel, Vec2::ZERO);
        assert_eq!(out.balls[0].id, BallId(0));
        assert!(out.events[0].was_cue_ball);
        assert_eq!(out.events[0].pocket_id, 5);
    }

    #[test]
    fn ball_near_rail_but_outside_radius_stays() {
        let ball = Ball::new(BallId(3), 3).with_pos(Vec2::new(30.0, 3.2));
        let out = capture_pockets(&[ball], &STANDARD_POCKETS);
        assert_eq!(out.balls, vec![ball]);
        assert!(out.events.is_empty());
    }

    #[test]
    fn order_of_survivors_is_preserved() {
        let balls = [
            Ball::new(BallId(1), 1).with_pos(Vec2::new(20.0, 20.0)),
            Ball::new(BallId(2), 2).with_pos(Vec2::new(97.0, 97.0)),
            Ball::new(BallId(3), 3).with_pos(Vec2::new(60.0, 40.0)),
        ];
        let out = capture_pockets(&balls, &STANDARD_POCKETS);
        let ids: Vec<_> = out.balls.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![BallId(1), BallId(3)]);
    }
}
