use crate::components::ball::Ball;

/// Speed above which a racked ball counts as disturbed.
pub const RACK_WAKE_SPEED: f32 = 1e-3;

/// Advance every ball by one tick: move by the current velocity, then scale
/// the velocity by `friction`. Velocity decays geometrically and is never
/// snapped to zero.
pub fn integrate(balls: &[Ball], friction: f32) -> Vec<Ball> {
    balls
        .iter()
        .map(|ball| {
            let mut next = *ball;
            next.pos += ball.vel;
            next.vel = ball.vel * friction;
            if next.racked && next.speed() > RACK_WAKE_SPEED {
                next.racked = false;
            }
            next
        })
        .collect()
}
