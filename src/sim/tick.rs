//! Single-command simulation tick
//!
//! Rule order per command: boundary, move, pickup, carry, delivery, win.
//! A tick either applies fully or leaves the state untouched.

use rand::Rng;

use super::command::Command;
use super::state::{GameEvent, Rules, RoundState};
use crate::Point;

/// Advance the round by one command
pub fn advance<R: Rng + ?Sized>(
    state: &mut RoundState,
    command: Command,
    rules: &Rules,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) {
    if state.done {
        return;
    }

    // Negative coordinates (and overflow) void the whole tick. There is no
    // upper bound: the player may walk past the placement area.
    let delta = command.delta();
    let candidate = match (
        state.player.pos.x.checked_add(delta.x),
        state.player.pos.y.checked_add(delta.y),
    ) {
        (Some(x), Some(y)) if x >= 0 && y >= 0 => Point::new(x, y),
        _ => {
            log::debug!("{:?} from {} blocked", command, state.player.pos);
            events.push(GameEvent::Blocked { attempted: command });
            return;
        }
    };

    state.player.pos = candidate;
    log::debug!("{:?} -> {}", command, candidate);
    events.push(GameEvent::Moved { to: candidate });

    // Pickup is sticky until delivered
    if !state.player.has_apple && state.player.pos == state.apple.pos {
        state.player.has_apple = true;
        log::debug!("Picked up apple at {}", candidate);
        events.push(GameEvent::PickedUp { at: candidate });
    }

    if state.player.has_apple {
        state.apple.pos = state.player.pos;
    }

    if state.player.has_apple && state.player.pos == state.apple_box.pos {
        state.player.has_apple = false;
        state.apple_box.delivered += 1;
        state.apple.pos = rules.grid.place(rng, &[state.apple_box.pos]);
        log::info!(
            "Delivered apple {}/{}, next apple at {}",
            state.apple_box.delivered,
            rules.target_deliveries,
            state.apple.pos
        );
        events.push(GameEvent::Delivered {
            count: state.apple_box.delivered,
            next_apple: state.apple.pos,
        });
    }

    if state.apple_box.delivered >= rules.target_deliveries {
        state.player.has_apple = false;
        // Step off the box
        state.player.pos.y = state.player.pos.y.saturating_add(1);
        state.done = true;
        log::info!("Round complete after {} deliveries", state.apple_box.delivered);
        events.push(GameEvent::Won {
            deliveries: state.apple_box.delivered,
        });
    }
}
