//! Input translation and buffering
//!
//! Key presses and pointer drags both end up as [`Command`]s in the
//! [`InputQueue`]. Nothing here touches round state.

pub mod gesture;
pub mod queue;

pub use gesture::{GestureTracker, translate_drag};
pub use queue::InputQueue;

use crate::sim::Command;

/// Map a key identifier to a command; unknown keys are ignored
pub fn translate_key(key: &str) -> Option<Command> {
    Command::from_key(key)
}
