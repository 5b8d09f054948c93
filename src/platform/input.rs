//! Keyboard and button input
//!
//! Raw key codes are reduced to the two events the game understands. Each
//! physical press yields at most one event: auto-repeat and keys that are
//! already held are ignored until released.

use std::collections::HashSet;

use crate::sim::TickInput;

/// Keys the game binds
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Key {
    Space,
    Up,
    P,
}

impl Key {
    /// Map a DOM `KeyboardEvent.code`
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "Space" => Some(Key::Space),
            "ArrowUp" => Some(Key::Up),
            "KeyP" => Some(Key::P),
            _ => None,
        }
    }

    pub fn event(&self) -> InputEvent {
        match self {
            Key::Space | Key::Up => InputEvent::Jump,
            Key::P => InputEvent::Pause,
        }
    }
}

/// Semantic game input
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum InputEvent {
    Jump,
    Pause,
}

/// Collects edge-triggered events between frames
#[derive(Debug, Clone, Default)]
pub struct InputMapper {
    held: HashSet<Key>,
    pending: TickInput,
}

impl InputMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key pressed. Returns the event it produced, if any; the caller should
    /// suppress the browser default when it did.
    pub fn key_down(&mut self, code: &str, repeat: bool) -> Option<InputEvent> {
        let key = Key::from_code(code)?;
        if repeat || !self.held.insert(key) {
            return None;
        }
        let event = key.event();
        self.push(event);
        Some(event)
    }

    pub fn key_up(&mut self, code: &str) {
        if let Some(key) = Key::from_code(code) {
            self.held.remove(&key);
        }
    }

    /// On-screen button or other already edge-triggered source
    pub fn push(&mut self, event: InputEvent) {
        match event {
            InputEvent::Jump => self.pending.jump = true,
            InputEvent::Pause => self.pending.pause = !self.pending.pause,
        }
    }

    /// Release every held key (window lost focus)
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    /// Hand over everything collected since the last call
    pub fn take(&mut self) -> TickInput {
        std::mem::take(&mut self.pending)
    }
}
