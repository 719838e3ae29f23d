//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One command per tick, no wall-clock time
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod command;
pub mod placement;
pub mod state;
pub mod tick;

pub use command::Command;
pub use placement::{Grid, place};
pub use state::{Apple, AppleBox, GameEvent, Player, Round, RoundState, Rules};
pub use tick::advance;
