//! Bounded command buffer
//!
//! Keeps the most recent commands while a move is in flight. Overflow drops
//! the oldest entry; a full release drops everything.

use std::collections::VecDeque;

use crate::consts::INPUT_QUEUE_CAPACITY;
use crate::sim::Command;

#[derive(Debug, Clone)]
pub struct InputQueue {
    commands: VecDeque<Command>,
    capacity: usize,
}

impl InputQueue {
    /// Queue holding at most `capacity` commands (at least one)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            commands: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Append, evicting the oldest commands past capacity
    pub fn push(&mut self, command: Command) {
        self.commands.push_back(command);
        while self.commands.len() > self.capacity {
            self.commands.pop_front();
        }
    }

    /// Take the oldest pending command
    pub fn pop_front(&mut self) -> Option<Command> {
        self.commands.pop_front()
    }

    /// Drop all buffered intent
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Pending commands, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new(INPUT_QUEUE_CAPACITY)
    }
}
