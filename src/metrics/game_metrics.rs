use std::time::{Duration, Instant};

/// Wall-clock bookkeeping for the header; not part of the simulation
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    /// Set once the game ends; freezes the clock
    pub final_score: Option<u32>,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            final_score: None,
        }
    }

    pub fn update(&mut self) {
        if self.final_score.is_none() {
            self.elapsed_time = self.start_time.elapsed();
        }
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.update();
        self.final_score = Some(final_score);
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
