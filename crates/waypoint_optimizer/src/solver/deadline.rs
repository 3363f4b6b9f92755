use std::time::{Duration, Instant};

/// Point in time after which the local search must hand back its current best
/// path. Shared by copy with every worker of a request.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    start: Instant,
    max_duration: Duration,
}

impl Deadline {
    pub fn start(max_duration: Duration) -> Self {
        Self {
            start: Instant::now(),
            max_duration,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.start.elapsed() >= self.max_duration
    }

    pub fn remaining(&self) -> Duration {
        self.max_duration.saturating_sub(self.start.elapsed())
    }
}
