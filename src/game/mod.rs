//! Game loop
//!
//! Every external event (an input, or a frame/timer callback) triggers one
//! pass: translate input, buffer it, then apply at most one queued command
//! if the cool-down allows. `Game` is the only owner of the round, so it is
//! the single mutator.

pub mod scheduler;

use glam::Vec2;

pub use scheduler::TickScheduler;

use crate::error::ConfigError;
use crate::input::{GestureTracker, InputQueue, translate_key};
use crate::settings::Settings;
use crate::sim::{Command, GameEvent, Round, RoundState};

/// Raw input delivered by the platform layer
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Key pressed (identifier as reported by the platform, e.g. "w")
    KeyDown { key: String },
    /// Any key released
    KeyUp,
    /// Touch/pointer began
    PointerDown { pos: Vec2 },
    /// Touch/pointer moved
    PointerMove { pos: Vec2 },
    /// Touch/pointer ended
    PointerUp,
}

/// Undrained rule events kept; older ones are dropped first
pub const MAX_PENDING_EVENTS: usize = 64;

pub struct Game {
    settings: Settings,
    round: Round,
    queue: InputQueue,
    gesture: GestureTracker,
    scheduler: TickScheduler,
    /// Drained by [`Game::take_events`], capped at [`MAX_PENDING_EVENTS`]
    events: Vec<GameEvent>,
}

impl Game {
    /// Start a game. `settings.seed` wins over `fallback_seed` when set.
    pub fn new(settings: Settings, fallback_seed: u64) -> Result<Self, ConfigError> {
        let seed = settings.seed.unwrap_or(fallback_seed);
        let round = Round::new(&settings, seed)?;
        Ok(Self {
            queue: InputQueue::new(settings.input_queue_capacity),
            gesture: GestureTracker::new(settings.gesture_interval_ms),
            scheduler: TickScheduler::new(settings.tick_interval_ms),
            events: Vec::new(),
            settings,
            round,
        })
    }

    /// Feed one input event. Returns true if a command was applied.
    pub fn handle(&mut self, event: InputEvent, now_ms: f64) -> bool {
        match event {
            InputEvent::KeyDown { key } => {
                if let Some(command) = translate_key(&key) {
                    self.push(command);
                }
            }
            // Releasing the controls discards buffered intent; an in-flight
            // cool-down keeps running.
            InputEvent::KeyUp => self.queue.clear(),
            InputEvent::PointerDown { pos } => self.gesture.start(pos),
            InputEvent::PointerMove { pos } => {
                if let Some(command) = self.gesture.sample(pos, now_ms) {
                    self.push(command);
                }
            }
            InputEvent::PointerUp => {
                self.queue.clear();
                self.gesture.end();
            }
        }
        self.pump(now_ms)
    }

    /// Frame/timer callback. Returns true if a command was applied.
    pub fn update(&mut self, now_ms: f64) -> bool {
        self.pump(now_ms)
    }

    /// Buffer a command directly
    pub fn push(&mut self, command: Command) {
        self.queue.push(command);
    }

    fn pump(&mut self, now_ms: f64) -> bool {
        if self.round.is_done() || self.queue.is_empty() || !self.scheduler.try_begin(now_ms) {
            return false;
        }
        let Some(command) = self.queue.pop_front() else {
            return false;
        };
        self.round.advance(command, &mut self.events);
        if self.events.len() > MAX_PENDING_EVENTS {
            let excess = self.events.len() - MAX_PENDING_EVENTS;
            self.events.drain(..excess);
        }
        true
    }

    /// Start a new round with the same settings
    pub fn restart(&mut self, seed: u64) -> Result<(), ConfigError> {
        self.round = Round::new(&self.settings, seed)?;
        self.queue.clear();
        self.gesture.end();
        self.scheduler.reset();
        self.events.clear();
        log::info!("Round restarted with seed: {}", seed);
        Ok(())
    }

    /// Read-only view of the round
    pub fn snapshot(&self) -> &RoundState {
        self.round.state()
    }

    /// Rule outcomes since the last call
    ///
    /// Callers should drain this every frame. Events not taken are kept up
    /// to [`MAX_PENDING_EVENTS`], newest last.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_done(&self) -> bool {
        self.round.is_done()
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn queue(&self) -> &InputQueue {
        &self.queue
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Point;

    fn game() -> Game {
        Game::new(Settings::default(), 4242).unwrap()
    }

    fn key(k: &str) -> InputEvent {
        InputEvent::KeyDown { key: k.to_string() }
    }

    #[test]
    fn test_first_key_applies_immediately() {
        let mut game = game();
        assert!(game.handle(key("d"), 0.0));
        assert_eq!(game.snapshot().player.pos, Point::new(1, 0));
        assert!(game.queue().is_empty());
    }

    #[test]
    fn test_burst_is_paced() {
        let mut game = game();
        assert!(game.handle(key("s"), 0.0));
        assert!(!game.handle(key("s"), 10.0));
        assert!(!game.handle(key("s"), 20.0));
        assert_eq!(game.queue().len(), 2);
        assert_eq!(game.snapshot().player.pos.y, 1);

        assert!(!game.update(199.0));
        assert!(game.update(200.0));
        assert_eq!(game.snapshot().player.pos.y, 2);
        assert!(!game.update(300.0));
        assert!(game.update(400.0));
        assert_eq!(game.snapshot().player.pos.y, 3);
        assert!(!game.update(600.0));
    }

    #[test]
    fn test_key_up_clears_queue_not_cooldown() {
        let mut game = game();
        game.handle(key("s"), 0.0);
        game.handle(key("s"), 10.0);
        game.handle(InputEvent::KeyUp, 20.0);
        assert!(game.queue().is_empty());

        // Cool-down still running
        assert!(!game.handle(key("d"), 100.0));
        assert!(game.update(200.0));
        assert_eq!(game.snapshot().player.pos, Point::new(1, 1));
    }

    #[test]
    fn test_pointer_up_clears_pending_commands() {
        let mut game = game();
        assert!(game.handle(key("s"), 0.0));
        assert!(!game.handle(key("s"), 1.0));
        assert!(!game.handle(key("d"), 2.0));
        assert_eq!(game.queue().len(), 2);

        game.handle(InputEvent::PointerUp, 3.0);
        assert!(game.queue().is_empty());

        // Nothing left to apply once the cool-down ends
        assert!(!game.update(200.0));
        assert!(!game.update(400.0));
        assert_eq!(game.snapshot().player.pos, Point::new(0, 1));
    }

    #[test]
    fn test_undrained_events_are_capped() {
        let mut game = game();
        let mut now = 0.0;
        // Walk into the left wall: one Blocked event per tick, never done
        for _ in 0..(MAX_PENDING_EVENTS + 10) {
            assert!(game.handle(key("a"), now));
            now += 200.0;
        }
        let events = game.take_events();
        assert_eq!(events.len(), MAX_PENDING_EVENTS);
        assert!(
            events
                .iter()
                .all(|e| *e == GameEvent::Blocked { attempted: Command::Left })
        );
        assert!(game.take_events().is_empty());
    }

    #[test]
    fn test_unknown_key_ignored() {
        let mut game = game();
        assert!(!game.handle(key("x"), 0.0));
        assert!(game.queue().is_empty());
        assert_eq!(game.snapshot().player.pos, Point::ZERO);
    }

    #[test]
    fn test_drag_drives_commands() {
        let mut game = game();
        game.handle(InputEvent::PointerDown { pos: Vec2::new(100.0, 100.0) }, 0.0);
        assert!(game.handle(InputEvent::PointerMove { pos: Vec2::new(100.0, 140.0) }, 10.0));
        assert_eq!(game.snapshot().player.pos, Point::new(0, 1));

        // Throttled sample
        assert!(!game.handle(InputEvent::PointerMove { pos: Vec2::new(100.0, 180.0) }, 50.0));
        assert!(game.queue().is_empty());

        game.handle(InputEvent::PointerUp, 60.0);
        assert!(!game.handle(InputEvent::PointerMove { pos: Vec2::new(100.0, 300.0) }, 500.0));
    }

    #[test]
    fn test_blocked_move_still_uses_tick() {
        let mut game = game();
        assert!(game.handle(key("a"), 0.0));
        assert_eq!(game.snapshot().player.pos, Point::ZERO);
        assert_eq!(
            game.take_events(),
            vec![GameEvent::Blocked { attempted: Command::Left }]
        );
        assert!(!game.handle(key("d"), 50.0));
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut game = game();
        game.handle(key("s"), 0.0);
        game.handle(key("s"), 1.0);
        game.restart(99).unwrap();
        assert!(game.queue().is_empty());
        assert_eq!(game.snapshot().player.pos, Point::ZERO);
        assert_eq!(game.round().seed, 99);
        assert!(game.take_events().is_empty());
        assert!(game.handle(key("s"), 2.0));
    }

    #[test]
    fn test_settings_seed_wins() {
        let settings = Settings {
            seed: Some(5),
            ..Default::default()
        };
        let game = Game::new(settings, 1).unwrap();
        assert_eq!(game.round().seed, 5);
    }
}
