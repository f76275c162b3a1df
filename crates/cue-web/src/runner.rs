use cue_engine::{
    BallColor, BallId, EngineError, FrameBuffers, GameMode, PhysicsConfig, Shot, Simulation,
    TickClock,
};
use glam::Vec2;

/// Wires the simulation to the browser frame loop.
///
/// The front end calls `tick(dt)` once per animation frame, then reads the
/// flat buffers. While a shot is being aimed the prediction overlay is
/// recomputed after every batch of ticks.
pub struct SimulationRunner {
    sim: Simulation,
    clock: TickClock,
    buffers: FrameBuffers,
    aim: Option<Shot>,
}

impl SimulationRunner {
    pub fn new(seed: u64) -> Result<Self, EngineError> {
        let mut sim = Simulation::new(PhysicsConfig::default(), seed)?;
        sim.rack();
        let mut runner = Self {
            sim,
            clock: TickClock::default(),
            buffers: FrameBuffers::new(),
            aim: None,
        };
        runner.refresh();
        Ok(runner)
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    /// Run as many ticks as `dt` seconds cover and rebuild the buffers.
    pub fn tick(&mut self, dt: f32) {
        self.buffers.clear_captures();
        let ticks = self.clock.advance(dt);
        for _ in 0..ticks {
            let captures = self.sim.tick();
            if self.aim.is_some_and(|shot| captures.iter().any(|c| c.ball_id == shot.ball_id && !c.was_cue_ball)) {
                self.aim = None;
            }
            self.buffers.push_captures(&captures);
        }
        self.refresh();
    }

    pub fn set_aim(&mut self, ball_id: u32, angle_degrees: f32, speed: f32) {
        self.aim = Some(Shot::new(BallId(ball_id), angle_degrees, speed));
        self.refresh();
    }

    pub fn clear_aim(&mut self) {
        self.aim = None;
        self.refresh();
    }

    /// Launch the currently aimed shot. The aim is consumed.
    pub fn launch(&mut self) -> Result<(), EngineError> {
        let Some(shot) = self.aim.take() else {
            log::warn!("Launch requested with no ball selected");
            return Ok(());
        };
        self.sim.launch(shot)?;
        self.refresh();
        Ok(())
    }

    pub fn rack(&mut self) {
        self.aim = None;
        self.sim.rack();
        self.refresh();
    }

    pub fn start_golf(&mut self) {
        self.aim = None;
        self.sim.set_mode(GameMode::Golf);
        self.refresh();
    }

    pub fn stop_golf(&mut self) {
        self.sim.set_mode(GameMode::Normal);
    }

    pub fn add_ball(&mut self, number: u8, color_hex: Option<&str>, x: f32, y: f32) -> Result<u32, EngineError> {
        let color = color_hex.map(BallColor::from_hex).transpose()?;
        let id = self.sim.add_ball(number, color, Vec2::new(x, y));
        self.refresh();
        Ok(id.0)
    }

    pub fn add_random_ball(&mut self, number: u8, color_hex: Option<&str>) -> Result<u32, EngineError> {
        let color = color_hex.map(BallColor::from_hex).transpose()?;
        let id = self.sim.add_random_ball(number, color);
        self.refresh();
        Ok(id.0)
    }

    pub fn place_ball(&mut self, ball_id: u32, x: f32, y: f32) -> Result<(), EngineError> {
        self.sim.place_ball(BallId(ball_id), Vec2::new(x, y))?;
        self.refresh();
        Ok(())
    }

    pub fn set_config_json(&mut self, json: &str) -> Result<(), EngineError> {
        let config = PhysicsConfig::from_json(json)?;
        self.sim.set_config(config)?;
        self.refresh();
        Ok(())
    }

    pub fn predictions_json(&self) -> Result<String, EngineError> {
        let predictions = match &self.aim {
            Some(shot) => self.sim.predict(shot),
            None => Vec::new(),
        };
        Ok(serde_json::to_string(&predictions)?)
    }

    fn refresh(&mut self) {
        let radius = self.sim.config().ball_radius;
        self.buffers.write_balls(self.sim.balls(), radius);
        let predictions = match &self.aim {
            Some(shot) => self.sim.predict(shot),
            None => Vec::new(),
        };
        self.buffers.write_predictions(&predictions);
    }

    // ---- Pointer accessors for direct memory reads ----

    pub fn balls_ptr(&self) -> *const f32 {
        self.buffers.balls_floats().as_ptr()
    }

    pub fn ball_count(&self) -> u32 {
        self.buffers.balls.len() as u32
    }

    pub fn captures_ptr(&self) -> *const f32 {
        self.buffers.captures_floats().as_ptr()
    }

    pub fn capture_count(&self) -> u32 {
        self.buffers.captures.len() as u32
    }

    pub fn predictions_ptr(&self) -> *const f32 {
        self.buffers.predictions_floats().as_ptr()
    }

    pub fn prediction_count(&self) -> u32 {
        self.buffers.predictions.len() as u32
    }

    pub fn golf_shots(&self) -> u32 {
        self.sim.golf().shots
    }

    pub fn golf_complete(&self) -> bool {
        self.sim.golf().complete
    }

    pub fn golf_elapsed_ticks(&self) -> u32 {
        self.sim.golf().elapsed_ticks(self.sim.tick_count()) as u32
    }
}
