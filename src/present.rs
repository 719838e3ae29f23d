//! Presentation helpers
//!
//! Read-only mapping from a round snapshot to what an adapter draws. The
//! web page gets both the cell (`--x`, `--y`) and the pixel offset
//! (`--left`, `--top`) as CSS custom properties.

use glam::Vec2;

use crate::Point;
use crate::sim::RoundState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteKind {
    AppleBox,
    Player,
    Apple,
}

impl SpriteKind {
    /// CSS class / element id used by the page
    pub fn as_str(&self) -> &'static str {
        match self {
            SpriteKind::AppleBox => "box",
            SpriteKind::Player => "player",
            SpriteKind::Apple => "apple",
        }
    }
}

/// One drawable entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub kind: SpriteKind,
    pub cell: Point,
    /// Top-left corner in pixels
    pub pos: Vec2,
    /// Player carrying / apple being carried
    pub carried: bool,
}

/// Top-left pixel of a grid cell
#[inline]
pub fn cell_to_visual(cell: Point, cell_size: f32) -> Vec2 {
    cell.as_vec2() * cell_size
}

/// Entities in draw order (box below player below apple)
pub fn sprites(state: &RoundState, cell_size: f32) -> [Sprite; 3] {
    let carried = state.player.has_apple;
    let sprite = |kind, cell, carried| Sprite {
        kind,
        cell,
        pos: cell_to_visual(cell, cell_size),
        carried,
    };
    [
        sprite(SpriteKind::AppleBox, state.apple_box.pos, false),
        sprite(SpriteKind::Player, state.player.pos, carried),
        sprite(SpriteKind::Apple, state.apple.pos, carried),
    ]
}

/// Inline style placing an element on a cell
pub fn position_style(cell: Point) -> String {
    format!("--x: {}; --y: {};", cell.x, cell.y)
}

/// Player style; `--speed` lets the stylesheet animate at the tick cadence
pub fn player_style(cell: Point, tick_interval_ms: u32) -> String {
    format!("{} --speed: {};", position_style(cell), tick_interval_ms)
}

/// Full inline style for a sprite: cell, pixel offset, and player speed
pub fn sprite_style(sprite: &Sprite, tick_interval_ms: u32) -> String {
    let cell = match sprite.kind {
        SpriteKind::Player => player_style(sprite.cell, tick_interval_ms),
        _ => position_style(sprite.cell),
    };
    format!("{} --left: {}px; --top: {}px;", cell, sprite.pos.x, sprite.pos.y)
}

/// Delivery counter text, e.g. "2 / 4"
pub fn delivery_label(state: &RoundState, target: u32) -> String {
    format!("{} / {}", state.apple_box.delivered, target)
}
