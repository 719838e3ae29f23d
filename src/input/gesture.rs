//! Drag gesture to command translation
//!
//! A drag is measured from a reference point. The dominant axis of the
//! cumulative delta picks the command; the reference then moves half of
//! the way toward the pointer, so holding a swipe keeps producing commands
//! without a fresh full-length swipe each time.

use glam::Vec2;

use crate::consts::GESTURE_INTERVAL_MS;
use crate::sim::Command;

/// Map a drag delta to a command. Equal magnitudes (including no motion)
/// are ambiguous and produce nothing.
pub fn translate_drag(delta: Vec2) -> Option<Command> {
    let (ax, ay) = (delta.x.abs(), delta.y.abs());
    if ax > ay {
        Some(if delta.x < 0.0 {
            Command::Left
        } else {
            Command::Right
        })
    } else if ay > ax {
        Some(if delta.y < 0.0 {
            Command::Up
        } else {
            Command::Down
        })
    } else {
        None
    }
}

/// Tracks one pointer drag and throttles its translation
#[derive(Debug, Clone)]
pub struct GestureTracker {
    reference: Option<Vec2>,
    last_sample_ms: Option<f64>,
    interval_ms: f64,
}

impl GestureTracker {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            reference: None,
            last_sample_ms: None,
            interval_ms: interval_ms as f64,
        }
    }

    /// Pointer went down: record the origin
    pub fn start(&mut self, pos: Vec2) {
        self.reference = Some(pos);
    }

    /// Pointer moved. Samples inside the throttle window are dropped.
    pub fn sample(&mut self, pos: Vec2, now_ms: f64) -> Option<Command> {
        let reference = self.reference?;
        if let Some(last) = self.last_sample_ms {
            if now_ms - last < self.interval_ms {
                return None;
            }
        }
        self.last_sample_ms = Some(now_ms);

        let delta = pos - reference;
        let command = translate_drag(delta)?;
        self.reference = Some(reference + delta * 0.5);
        Some(command)
    }

    /// Pointer released: forget the drag
    pub fn end(&mut self) {
        self.reference = None;
    }

    pub fn reference(&self) -> Option<Vec2> {
        self.reference
    }
}

impl Default for GestureTracker {
    fn default() -> Self {
        Self::new(GESTURE_INTERVAL_MS)
    }
}
