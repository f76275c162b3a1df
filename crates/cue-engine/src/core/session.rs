use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Free play: no counters, no end condition.
    #[default]
    Normal,
    /// Clear the table in as few shots (and ticks) as possible.
    Golf,
}

/// Score keeping for golf mode. Times are simulation tick numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GolfSession {
    pub active: bool,
    pub start_tick: Option<u64>,
    pub end_tick: Option<u64>,
    pub shots: u32,
    pub complete: bool,
}

impl GolfSession {
    /// A fresh round starting at `now`.
    pub fn start(now: u64) -> Self {
        Self {
            active: true,
            start_tick: Some(now),
            ..Self::default()
        }
    }

    /// Count a launched shot. Ignored outside an active, unfinished round.
    pub fn record_shot(&mut self) {
        if self.active && !self.complete {
            self.shots += 1;
        }
    }

    /// Finish the round once no object balls remain.
    pub fn update(&mut self, now: u64, object_balls_left: usize) {
        if !self.active || self.complete || object_balls_left > 0 {
            return;
        }
        self.complete = true;
        self.end_tick = Some(now);
        log::info!("Golf round complete: {} shots, {} ticks", self.shots, self.elapsed_ticks(now));
    }

    /// Ticks since the round started, frozen once it completes.
    pub fn elapsed_ticks(&self, now: u64) -> u64 {
        match (self.start_tick, self.end_tick) {
            (Some(start), Some(end)) => end.saturating_sub(start),
            (Some(start), None) => now.saturating_sub(start),
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_shots_until_complete() {
        let mut golf = GolfSession::start(10);
        golf.record_shot();
        golf.record_shot();
        golf.update(50, 3);
        assert!(!golf.complete);
        golf.update(70, 0);
        assert!(golf.complete);
        golf.record_shot();
        assert_eq!(golf.shots, 2);
        assert_eq!(golf.end_tick, Some(70));
    }

    #[test]
    fn elapsed_freezes_at_completion() {
        let mut golf = GolfSession::start(100);
        assert_eq!(golf.elapsed_ticks(160), 60);
        golf.update(200, 0);
        assert_eq!(golf.elapsed_ticks(1000), 100);
    }

    #[test]
    fn inactive_session_ignores_everything() {
        let mut golf = GolfSession::default();
        golf.record_shot();
        golf.update(5, 0);
        assert!(!golf.complete);
        assert_eq!(golf.shots, 0);
        assert_eq!(golf.elapsed_ticks(5), 0);
    }

    #[test]
    fn completes_only_once() {
        let mut golf = GolfSession::start(0);
        golf.update(1, 0);
        golf.update(2, 0);
        assert!(golf.complete);
        assert_eq!(golf.end_tick, Some(1));
    }
}
