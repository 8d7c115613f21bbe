//! Demo speed control. Attempts to limit progression to the 60 tics per
//! second the handheld ran its vblank at.

use std::thread::sleep;
use std::time::{Duration, Instant};

const MS_PER_UPDATE: f32 = 16.666;

#[derive(Debug)]
pub struct TimeStep {
    last_time: Instant,
    lag: f32,
}

impl TimeStep {
    pub fn new() -> TimeStep {
        TimeStep {
            last_time: Instant::now(),
            lag: 0.0,
        }
    }

    fn delta(&mut self) -> f32 {
        let current_time = Instant::now();
        let delta = current_time.duration_since(self.last_time).as_micros() as f32 * 0.001;
        self.last_time = current_time;
        delta
    }

    /// Sleep off whatever is left of the current tic
    pub fn sync(&mut self) {
        self.lag += self.delta();
        while self.lag < MS_PER_UPDATE {
            sleep(Duration::from_micros(500));
            self.lag += self.delta();
        }
        self.lag -= MS_PER_UPDATE;
    }
}
