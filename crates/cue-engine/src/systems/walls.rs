use crate::components::ball::Ball;
use crate::components::table::TABLE_SIZE;

/// Bounce balls off the cushions.
///
/// Each axis is tested on its own against `[margin + radius, TABLE_SIZE - margin - radius]`.
/// A ball past a boundary has that velocity component negated and the
/// coordinate clamped back into range. A ball in a corner gets both
/// components flipped; there is no combined-normal corner bounce.
pub fn resolve_walls(balls: &[Ball], margin: f32, radius: f32) -> Vec<Ball> {
    let lo = margin + radius;
    let hi = TABLE_SIZE - margin - radius;

    balls
        .iter()
        .map(|ball| {
            let mut next = *ball;
            if ball.pos.x < lo || ball.pos.x > hi {
                next.vel.x = -ball.vel.x;
                next.pos.x = ball.pos.x.clamp(lo, hi);
            }
            if ball.pos.y < lo || ball.pos.y > hi {
                next.vel.y = -ball.vel.y;
                next.pos.y = ball.pos.y.clamp(lo, hi);
            }
            next
        })
        .collect()
}
