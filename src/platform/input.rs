//! Keyboard latching
//!
//! Browsers (and most windowing layers) deliver key-down / key-up events
//! between frames. `InputLatch` turns them into the per-tick view the
//! simulation wants: continuous held state for the pedals, one-shot flags for
//! the horn and quit.

use crate::sim::TickInput;

/// Keys the simulation cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Accelerate,
    Decelerate,
    Horn,
    Quit,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" | "w" | "W" => Some(Key::Accelerate),
            "ArrowDown" | "s" | "S" => Some(Key::Decelerate),
            "h" | "H" => Some(Key::Horn),
            "Escape" | "q" | "Q" => Some(Key::Quit),
            _ => None,
        }
    }
}

/// Held keys plus pending one-shot presses
#[derive(Debug, Clone, Default)]
pub struct InputLatch {
    accelerate: bool,
    decelerate: bool,
    horn_pending: bool,
    quit: bool,
}

impl InputLatch {
    pub fn key_down(&mut self, key: Key) {
        match key {
            Key::Accelerate => self.accelerate = true,
            Key::Decelerate => self.decelerate = true,
            Key::Horn => self.horn_pending = true,
            Key::Quit => self.quit = true,
        }
    }

    pub fn key_up(&mut self, key: Key) {
        match key {
            Key::Accelerate => self.accelerate = false,
            Key::Decelerate => self.decelerate = false,
            Key::Horn | Key::Quit => {}
        }
    }

    /// Input for the next tick; one-shot presses are consumed
    pub fn take(&mut self, now_ms: u64) -> TickInput {
        let horn = std::mem::take(&mut self.horn_pending);
        TickInput {
            accelerate: self.accelerate,
            decelerate: self.decelerate,
            horn,
            now_ms,
        }
    }

    /// Quit requested (stays set)
    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Release everything (focus lost)
    pub fn release_all(&mut self) {
        self.accelerate = false;
        self.decelerate = false;
    }
}
