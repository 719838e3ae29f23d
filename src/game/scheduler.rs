//! Movement cadence gate
//!
//! Each applied command opens a cool-down window. While it is open no other
//! command may be applied, however full the queue is.

use crate::consts::TICK_INTERVAL_MS;

#[derive(Debug, Clone)]
pub struct TickScheduler {
    interval_ms: f64,
    busy_until: Option<f64>,
}

impl TickScheduler {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms: interval_ms as f64,
            busy_until: None,
        }
    }

    /// Whether a command may be applied at `now_ms`
    pub fn ready(&self, now_ms: f64) -> bool {
        self.busy_until.is_none_or(|until| now_ms >= until)
    }

    /// A command was applied at `now_ms`: start the cool-down
    pub fn begin(&mut self, now_ms: f64) {
        self.busy_until = Some(now_ms + self.interval_ms);
    }

    /// Claim the tick slot at `now_ms`, starting the cool-down if free
    pub fn try_begin(&mut self, now_ms: f64) -> bool {
        if self.ready(now_ms) {
            self.begin(now_ms);
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.busy_until = None;
    }
}

impl Default for TickScheduler {
    fn default() -> Self {
        Self::new(TICK_INTERVAL_MS)
    }
}
