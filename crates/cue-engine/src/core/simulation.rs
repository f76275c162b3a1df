//! Table driver: owns the authoritative ball list and runs the per-tick
//! pipeline over it.
//!
//! The pipeline itself ([`step`]) is a pure function over a snapshot; the
//! [`Simulation`] wrapper adds ids, randomness, shots and golf scoring.

use glam::Vec2;
use rand::RngCore;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::api::config::PhysicsConfig;
use crate::api::error::EngineError;
use crate::api::types::{BallId, CaptureEvent, Shot};
use crate::components::ball::{Ball, BallColor};
use crate::components::table::Table;
use crate::core::session::{GameMode, GolfSession};
use crate::systems::collisions::resolve_ball_collisions;
use crate::systems::integrator::integrate;
use crate::systems::pockets::{capture_pockets, CaptureOutcome};
use crate::systems::prediction::{predict_collisions, PredictedCollision, PredictionParams};
use crate::systems::rack::build_rack;
use crate::systems::spawn::{random_position, random_velocity};
use crate::systems::walls::resolve_walls;

/// Balls and pocket events produced by one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutcome {
    pub balls: Vec<Ball>,
    pub captures: Vec<CaptureEvent>,
}

/// One tick: integrate, cushions, pockets, then ball-ball contacts.
/// Pocketed balls take no part in the same tick's contact pass.
pub fn step(balls: &[Ball], config: &PhysicsConfig, table: &Table) -> TickOutcome {
    let moved = integrate(balls, config.friction_coefficient);
    let bounced = resolve_walls(&moved, config.table_margin, config.ball_radius);
    let CaptureOutcome { balls, events } = capture_pockets(&bounced, &table.pockets);
    let mut balls = resolve_ball_collisions(&balls, config.ball_radius, config.collision_threshold_ratio);

    // Overlap separation can nudge a ball past a cushion line; pull it back
    // so every tick ends in bounds. Velocity is left for the next wall pass.
    let (lo, hi) = (config.min_coord(), config.max_coord());
    for ball in &mut balls {
        ball.pos = ball.pos.clamp(Vec2::splat(lo), Vec2::splat(hi));
    }

    TickOutcome { balls, captures: events }
}

pub struct Simulation<R: RngCore = ChaCha8Rng> {
    config: PhysicsConfig,
    table: Table,
    balls: Vec<Ball>,
    next_id: u32,
    rng: R,
    tick: u64,
    mode: GameMode,
    golf: GolfSession,
}

impl Simulation<ChaCha8Rng> {
    /// Empty standard table with a seeded generator.
    pub fn new(config: PhysicsConfig, seed: u64) -> Result<Self, EngineError> {
        Self::with_rng(config, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: RngCore> Simulation<R> {
    /// Empty standard table drawing randomness from `rng`.
    pub fn with_rng(config: PhysicsConfig, rng: R) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            config,
            table: Table::with_margin(config.table_margin),
            balls: Vec::with_capacity(16),
            next_id: 0,
            rng,
            tick: 0,
            mode: GameMode::Normal,
            golf: GolfSession::default(),
        })
    }

    /// Replace the pocket layout.
    pub fn with_table(mut self, table: Table) -> Self {
        self.table = table;
        self
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    pub fn ball(&self, id: BallId) -> Option<&Ball> {
        self.balls.iter().find(|b| b.id == id)
    }

    /// Ticks run so far.
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn golf(&self) -> &GolfSession {
        &self.golf
    }

    /// Apply a new config. Balls are pulled inside the new cushion lines and a
    /// margin change moves the pockets with them.
    pub fn set_config(&mut self, config: PhysicsConfig) -> Result<(), EngineError> {
        config.validate()?;
        if config.table_margin != self.config.table_margin {
            self.table = Table::with_margin(config.table_margin);
        }
        self.config = config;
        let (lo, hi) = (config.min_coord(), config.max_coord());
        for ball in &mut self.balls {
            ball.pos = ball.pos.clamp(Vec2::splat(lo), Vec2::splat(hi));
        }
        log::info!(
            "Config applied: radius={} friction={} margin={}",
            config.ball_radius, config.friction_coefficient, config.table_margin
        );
        Ok(())
    }

    /// Clear the table and set up a fresh rack with the cue ball on the head spot.
    pub fn rack(&mut self) -> &[Ball] {
        self.balls = build_rack(self.config.table_margin, self.config.ball_radius, &mut self.rng);
        self.next_id = self.balls.iter().map(|b| b.id.0 + 1).max().unwrap_or(0);
        &self.balls
    }

    /// Switch modes. Golf racks the table and starts a new round.
    pub fn set_mode(&mut self, mode: GameMode) {
        self.mode = mode;
        match mode {
            GameMode::Golf => {
                self.rack();
                self.golf = GolfSession::start(self.tick);
                log::info!("Golf round started at tick {}", self.tick);
            }
            GameMode::Normal => self.golf = GolfSession::default(),
        }
    }

    /// Run one tick and return the pocket events it produced.
    pub fn tick(&mut self) -> Vec<CaptureEvent> {
        let TickOutcome { balls, captures } = step(&self.balls, &self.config, &self.table);
        self.balls = balls;
        self.tick += 1;

        if self.mode == GameMode::Golf {
            let object_balls = self.balls.iter().filter(|b| !b.is_cue()).count();
            self.golf.update(self.tick, object_balls);
        }
        captures
    }

    /// Set the shot ball's velocity from the shot's angle and speed.
    pub fn launch(&mut self, shot: Shot) -> Result<(), EngineError> {
        let ball = self
            .balls
            .iter_mut()
            .find(|b| b.id == shot.ball_id)
            .ok_or(EngineError::UnknownBall(shot.ball_id))?;
        ball.vel = shot.velocity();
        log::info!("Launched ball {} at {}° speed {}", ball.number, shot.angle_degrees, shot.speed);
        if self.mode == GameMode::Golf {
            self.golf.record_shot();
        }
        Ok(())
    }

    /// Predicted contact chain for `shot`. Empty when the ball is not on the table.
    pub fn predict(&self, shot: &Shot) -> Vec<PredictedCollision> {
        match self.ball(shot.ball_id) {
            Some(origin) => predict_collisions(
                origin,
                &self.balls,
                shot.angle_degrees,
                shot.speed,
                &PredictionParams::from_config(&self.config),
            ),
            None => Vec::new(),
        }
    }

    /// Place a resting ball. `color` defaults to the standard color for `number`;
    /// `pos` is clamped into the playable area.
    pub fn add_ball(&mut self, number: u8, color: Option<BallColor>, pos: Vec2) -> BallId {
        let id = self.alloc_id();
        let pos = self.clamp_to_table(pos);
        let mut ball = Ball::new(id, number).with_pos(pos);
        if let Some(color) = color {
            ball = ball.with_color(color);
        }
        self.balls.push(ball);
        log::info!("Added ball {} at {:?}", number, pos);
        id
    }

    /// Place a ball at a random spot, moving at the default speed in a random direction.
    pub fn add_random_ball(&mut self, number: u8, color: Option<BallColor>) -> BallId {
        let pos = random_position(self.config.table_margin, self.config.ball_radius, &mut self.rng);
        let vel = random_velocity(self.config.default_ball_speed, &mut self.rng);
        let id = self.add_ball(number, color, pos);
        if let Some(ball) = self.balls.iter_mut().find(|b| b.id == id) {
            ball.vel = vel;
        }
        id
    }

    /// Move a ball by hand. It comes to rest and leaves any rack.
    pub fn place_ball(&mut self, id: BallId, pos: Vec2) -> Result<(), EngineError> {
        let pos = self.clamp_to_table(pos);
        let ball = self
            .balls
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(EngineError::UnknownBall(id))?;
        ball.pos = pos;
        ball.vel = Vec2::ZERO;
        ball.racked = false;
        Ok(())
    }

    pub fn remove_ball(&mut self, id: BallId) -> Result<Ball, EngineError> {
        let idx = self
            .balls
            .iter()
            .position(|b| b.id == id)
            .ok_or(EngineError::UnknownBall(id))?;
        Ok(self.balls.remove(idx))
    }

    /// Whether every ball is slower than `threshold`.
    pub fn is_settled(&self, threshold: f32) -> bool {
        self.balls.iter().all(|b| b.speed() < threshold)
    }

    fn alloc_id(&mut self) -> BallId {
        let id = BallId(self.next_id);
        self.next_id += 1;
        id
    }

    fn clamp_to_table(&self, pos: Vec2) -> Vec2 {
        pos.clamp(Vec2::splat(self.config.min_coord()), Vec2::splat(self.config.max_coord()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::table::HEAD_SPOT;

    fn sim() -> Simulation {
        Simulation::new(PhysicsConfig::default(), 42).unwrap()
    }

    #[test]
    fn rejects_invalid_config() {
        let config = PhysicsConfig { friction_coefficient: 1.5, ..Default::default() };
        assert!(Simulation::new(config, 1).is_err());
        let mut s = sim();
        assert!(s.set_config(config).is_err());
        assert_eq!(s.config().friction_coefficient, 0.991);
    }

    #[test]
    fn rack_gives_sixteen_balls_and_fresh_ids() {
        let mut s = sim();
        assert_eq!(s.rack().len(), 16);
        let id = s.add_ball(3, None, Vec2::new(10.0, 10.0));
        assert_eq!(id, BallId(16));
    }

    #[test]
    fn racked_table_stays_still() {
        let mut s = sim();
        s.rack();
        let before = s.balls().to_vec();
        for _ in 0..10 {
            assert!(s.tick().is_empty());
        }
        assert_eq!(s.balls(), &before[..]);
    }

    #[test]
    fn break_shot_wakes_the_rack() {
        let mut s = sim();
        s.rack();
        s.launch(Shot::new(BallId(0), 0.0, 2.0)).unwrap();
        for _ in 0..120 {
            s.tick();
        }
        let woken = s.balls().iter().filter(|b| !b.is_cue() && !b.racked).count();
        assert!(woken > 0);
    }

    #[test]
    fn every_tick_ends_in_bounds() {
        let mut s = sim();
        s.rack();
        s.launch(Shot::new(BallId(0), 3.0, 2.0)).unwrap();
        let (lo, hi) = (s.config().min_coord(), s.config().max_coord());
        for _ in 0..600 {
            s.tick();
            for b in s.balls() {
                assert!(b.pos.x >= lo && b.pos.x <= hi && b.pos.y >= lo && b.pos.y <= hi);
            }
        }
    }

    #[test]
    fn same_seed_same_game() {
        let run = || {
            let mut s = sim();
            s.rack();
            s.add_random_ball(9, None);
            s.launch(Shot::new(BallId(0), 10.0, 2.0)).unwrap();
            for _ in 0..300 {
                s.tick();
            }
            s.balls().to_vec()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn pocketed_object_ball_is_gone_next_tick() {
        let mut s = sim();
        let id = s.add_ball(5, None, Vec2::new(4.0, 4.0));
        let events = s.tick();
        assert!(s.ball(id).is_none());
        assert_eq!(events, vec![CaptureEvent { ball_id: id, pocket_id: 1, was_cue_ball: false }]);
    }

    #[test]
    fn pocketed_ball_skips_same_tick_contacts() {
        let config = PhysicsConfig::default();
        let sinking = Ball::new(BallId(1), 5).with_pos(Vec2::new(4.0, 4.0));
        let incoming = Ball::new(BallId(2), 6)
            .with_pos(Vec2::new(9.9, 4.0))
            .with_vel(Vec2::new(-1.0, 0.0));
        let out = step(&[sinking, incoming], &config, &Table::default());

        assert_eq!(out.captures, vec![CaptureEvent { ball_id: BallId(1), pocket_id: 1, was_cue_ball: false }]);
        assert_eq!(out.balls.len(), 1);
        assert_eq!(out.balls[0].id, BallId(2));
        assert_eq!(out.balls[0].vel, Vec2::new(-1.0, 0.0) * config.friction_coefficient);
    }

    #[test]
    fn pockets_follow_the_cushion_margin() {
        let config = PhysicsConfig { table_margin: 2.0, ..Default::default() };
        let mut s = Simulation::new(config, 3).unwrap();
        let id = s.add_ball(5, None, Vec2::new(10.0, 10.0));
        s.launch(Shot::new(id, 225.0, 2.0)).unwrap();
        let events: Vec<_> = (0..10).flat_map(|_| s.tick()).collect();
        assert_eq!(events, vec![CaptureEvent { ball_id: id, pocket_id: 1, was_cue_ball: false }]);
        assert!(s.ball(id).is_none());
    }

    #[test]
    fn margin_change_rebuilds_pockets() {
        let mut s = sim();
        assert_eq!(s.table().pockets[0].pos, Vec2::ZERO);
        s.set_config(PhysicsConfig { table_margin: 3.0, ..Default::default() }).unwrap();
        assert_eq!(s.table().pockets[0].pos, Vec2::new(3.0, 3.0));
        assert_eq!(s.table().pockets[5].pos, Vec2::new(97.0, 97.0));
    }

    #[test]
    fn scratch_puts_cue_on_head_spot() {
        let mut s = sim();
        let cue = s.add_ball(0, None, Vec2::new(96.0, 96.0));
        s.launch(Shot::new(cue, 45.0, 1.0)).unwrap();
        let events = s.tick();
        let ball = s.ball(cue).unwrap();
        assert_eq!(ball.pos, HEAD_SPOT);
        assert_eq!(ball.vel, Vec2::ZERO);
        assert!(events[0].was_cue_ball);
    }

    #[test]
    fn launch_unknown_ball_fails() {
        let mut s = sim();
        let err = s.launch(Shot::new(BallId(99), 0.0, 1.0)).unwrap_err();
        assert!(matches!(err, EngineError::UnknownBall(BallId(99))));
    }

    #[test]
    fn prediction_does_not_touch_live_state() {
        let mut s = sim();
        s.rack();
        let before = s.balls().to_vec();
        let events = s.predict(&Shot::new(BallId(0), 0.0, 2.0));
        assert_eq!(events.first().and_then(|e| e.struck_ball()), Some(BallId(1)));
        assert_eq!(s.balls(), &before[..]);
        assert!(s.predict(&Shot::new(BallId(77), 0.0, 2.0)).is_empty());
    }

    #[test]
    fn added_ball_is_clamped_and_at_rest() {
        let mut s = sim();
        let id = s.add_ball(4, None, Vec2::new(-10.0, 150.0));
        let ball = s.ball(id).unwrap();
        assert!((ball.pos - Vec2::new(3.2, 96.8)).length() < 1e-4);
        assert_eq!(ball.vel, Vec2::ZERO);
    }

    #[test]
    fn random_ball_moves_at_default_speed() {
        let mut s = sim();
        let id = s.add_random_ball(12, Some(BallColor::new(0.1, 0.2, 0.3)));
        let ball = s.ball(id).unwrap();
        assert!((ball.speed() - 2.0).abs() < 1e-5);
        assert_eq!(ball.color, BallColor::new(0.1, 0.2, 0.3));
    }

    #[test]
    fn placing_and_removing_balls() {
        let mut s = sim();
        s.rack();
        s.place_ball(BallId(3), Vec2::new(40.0, 40.0)).unwrap();
        let ball = s.ball(BallId(3)).unwrap();
        assert_eq!(ball.pos, Vec2::new(40.0, 40.0));
        assert!(!ball.racked);
        assert_eq!(s.remove_ball(BallId(3)).unwrap().id, BallId(3));
        assert!(s.remove_ball(BallId(3)).is_err());
        assert_eq!(s.balls().len(), 15);
    }

    #[test]
    fn friction_eventually_settles_the_table() {
        let mut s = sim();
        s.add_ball(0, None, Vec2::new(50.0, 50.0));
        // Straight along the centre line, well clear of every pocket.
        s.launch(Shot::new(BallId(0), 0.0, 2.0)).unwrap();
        assert!(!s.is_settled(0.01));
        for _ in 0..2000 {
            s.tick();
        }
        assert!(s.is_settled(0.01));
        // Still nominally moving: nothing clamps to rest.
        assert!(s.balls()[0].speed() > 0.0);
    }

    #[test]
    fn golf_round_counts_shots_and_completes_when_cleared() {
        let mut s = sim();
        s.set_mode(GameMode::Golf);
        assert!(s.golf().active);
        s.launch(Shot::new(BallId(0), 0.0, 1.0)).unwrap();
        assert_eq!(s.golf().shots, 1);

        let object_ids: Vec<_> = s.balls().iter().filter(|b| !b.is_cue()).map(|b| b.id).collect();
        for id in object_ids {
            s.remove_ball(id).unwrap();
        }
        s.tick();
        assert!(s.golf().complete);
        assert_eq!(s.golf().end_tick, Some(1));

        s.set_mode(GameMode::Normal);
        assert!(!s.golf().active);
    }

    #[test]
    fn smaller_table_config_pulls_balls_inside() {
        let mut s = sim();
        let id = s.add_ball(2, None, Vec2::new(96.0, 50.0));
        s.set_config(PhysicsConfig { table_margin: 5.0, ..Default::default() }).unwrap();
        assert!((s.ball(id).unwrap().pos.x - 91.8).abs() < 1e-4);
    }
}
