//! Fixed pacing between service calls
//!
//! A simple minimum-interval gate, not adaptive backoff: failed calls are not
//! retried, so a fixed delay between successive calls is all the service's
//! rate limit needs.

use std::time::{Duration, Instant};

/// Enforces a minimum interval between successive calls
#[derive(Debug)]
pub struct Pacer {
    min_interval: Duration,
    last_call: Option<Instant>,
}

impl Pacer {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_call: None,
        }
    }

    /// Block until at least `min_interval` has passed since the previous call,
    /// then mark the current call. The first call never waits.
    pub fn wait(&mut self) {
        if let Some(last) = self.last_call {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                std::thread::sleep(self.min_interval - elapsed);
            }
        }
        self.last_call = Some(Instant::now());
    }
}
