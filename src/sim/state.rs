//! Round state and core simulation types
//!
//! `RoundState` is the single source of truth for a round. Only
//! [`super::tick::advance`] mutates it.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::command::Command;
use super::placement::Grid;
use super::tick::advance;
use crate::Point;
use crate::consts::PLAYER_START;
use crate::error::ConfigError;
use crate::settings::Settings;

/// The player token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Point,
    pub has_apple: bool,
}

/// The collectible apple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Apple {
    pub pos: Point,
}

/// The delivery target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppleBox {
    pub pos: Point,
    pub delivered: u32,
}

/// Complete round state (read-only snapshot for adapters)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    pub player: Player,
    pub apple: Apple,
    pub apple_box: AppleBox,
    /// Terminal: no command changes anything once set
    pub done: bool,
}

/// Rule outcomes reported by a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player moved onto a new cell
    Moved { to: Point },
    /// Move rejected at the negative boundary; nothing changed
    Blocked { attempted: Command },
    /// Apple collected
    PickedUp { at: Point },
    /// Apple dropped in the box and a new one placed
    Delivered { count: u32, next_apple: Point },
    /// Target reached, round over
    Won { deliveries: u32 },
}

/// Fixed parameters of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rules {
    pub grid: Grid,
    pub target_deliveries: u32,
}

impl Rules {
    pub fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self {
            grid: settings.grid()?,
            target_deliveries: settings.target_deliveries,
        })
    }
}

/// A round: state plus the seeded RNG stream and rules that drive it
#[derive(Debug, Clone)]
pub struct Round {
    /// Seed for reproducibility
    pub seed: u64,
    rules: Rules,
    rng: Pcg32,
    state: RoundState,
}

impl Round {
    /// Start a round: player at the origin, box and apple on distinct random cells
    pub fn new(settings: &Settings, seed: u64) -> Result<Self, ConfigError> {
        let rules = Rules::from_settings(settings)?;
        let mut rng = Pcg32::seed_from_u64(seed);

        let player = PLAYER_START;
        let box_pos = rules.grid.place(&mut rng, &[player]);
        let apple_pos = rules.grid.place(&mut rng, &[player, box_pos]);

        log::info!(
            "Round start (seed {}): box at {}, apple at {}, target {}",
            seed,
            box_pos,
            apple_pos,
            rules.target_deliveries
        );

        Ok(Self {
            seed,
            rules,
            rng,
            state: RoundState {
                player: Player {
                    pos: player,
                    has_apple: false,
                },
                apple: Apple { pos: apple_pos },
                apple_box: AppleBox {
                    pos: box_pos,
                    delivered: 0,
                },
                done: false,
            },
        })
    }

    /// Apply one command
    pub fn advance(&mut self, command: Command, events: &mut Vec<GameEvent>) {
        advance(&mut self.state, command, &self.rules, &mut self.rng, events);
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn is_done(&self) -> bool {
        self.state.done
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_start_layout() {
        for seed in 0..200 {
            let round = Round::new(&Settings::default(), seed).unwrap();
            let state = round.state();
            let grid = round.rules().grid;
            assert_eq!(state.player.pos, Point::ZERO);
            assert!(!state.player.has_apple);
            assert_eq!(state.apple_box.delivered, 0);
            assert!(!state.done);
            assert!(grid.contains(state.apple.pos));
            assert!(grid.contains(state.apple_box.pos));
            assert_ne!(state.apple.pos, state.apple_box.pos);
            assert_ne!(state.apple.pos, state.player.pos);
            assert_ne!(state.apple_box.pos, state.player.pos);
        }
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = Round::new(&Settings::default(), 777).unwrap();
        let b = Round::new(&Settings::default(), 777).unwrap();
        assert_eq!(a.state(), b.state());
    }

    #[test]
    fn test_degenerate_grid_fails_at_round_start() {
        let settings = Settings {
            grid_width: 2,
            grid_height: 1,
            ..Default::default()
        };
        assert!(matches!(
            Round::new(&settings, 1),
            Err(ConfigError::GridTooSmall { .. })
        ));
    }
}
