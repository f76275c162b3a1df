/// Converts variable frame time into whole simulation ticks.
/// Every physics stage assumes one unit time step per tick, so the driver
/// needs an integer tick count per rendered frame.
pub struct TickClock {
    /// Wall-clock seconds per simulation tick.
    tick_interval: f32,
    /// Frame time not yet spent on a tick.
    pending: f32,
    /// Ticks produced since creation.
    ticks: u64,
}

/// Upper bound on ticks run for a single frame, so a stalled tab does not
/// fast-forward the table when it resumes.
pub const MAX_TICKS_PER_FRAME: u32 = 10;

impl TickClock {
    pub fn new(tick_interval: f32) -> Self {
        Self {
            tick_interval,
            pending: 0.0,
            ticks: 0,
        }
    }

    /// Feed one frame's elapsed time; returns how many ticks to run now.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        if !(frame_dt > 0.0) {
            return 0;
        }
        self.pending = (self.pending + frame_dt).min(self.tick_interval * MAX_TICKS_PER_FRAME as f32);
        let ticks = (self.pending / self.tick_interval) as u32;
        self.pending -= ticks as f32 * self.tick_interval;
        self.ticks += ticks as u64;
        ticks
    }

    /// Total ticks handed out so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn tick_interval(&self) -> f32 {
        self.tick_interval
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new(1.0 / 60.0)
    }
}
