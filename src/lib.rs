//! Apple Courier - carry apples across a grid to the box
//!
//! Core modules:
//! - `sim`: Deterministic simulation (placement, movement rules, round state)
//! - `input`: Command translation (keys, drag gestures) and the buffered input queue
//! - `game`: Event loop tying input, tick scheduling and the round together
//! - `present`: Grid to visual coordinate mapping for adapters
//! - `settings`: Configuration with validation

pub mod error;
pub mod game;
pub mod input;
pub mod present;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use game::{Game, InputEvent};
pub use settings::Settings;

/// A grid coordinate. One unit is one cell; `y` grows downward.
pub type Point = glam::IVec2;

/// Game configuration defaults
pub mod consts {
    /// Grid width in cells
    pub const GRID_WIDTH: u32 = 5;
    /// Grid height in cells
    pub const GRID_HEIGHT: u32 = 10;
    /// Buffered commands kept while a move is in flight
    pub const INPUT_QUEUE_CAPACITY: usize = 3;
    /// Movement cadence (one applied command per interval)
    pub const TICK_INTERVAL_MS: u32 = 200;
    /// Minimum spacing between translated drag samples
    pub const GESTURE_INTERVAL_MS: u32 = 200;
    /// Deliveries needed to finish a round
    pub const TARGET_DELIVERIES: u32 = 4;
    /// Default rendered cell edge in pixels
    pub const CELL_SIZE_PX: f32 = 32.0;
    /// Player start cell
    pub const PLAYER_START: crate::Point = crate::Point::ZERO;
}
