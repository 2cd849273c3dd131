//! Input state tracking
//!
//! Translates raw key-down/key-up events into what the simulation wants:
//! a de-duplicated "currently held" set for movement and edge-triggered
//! one-shot latches for fire and the debug toggle. OS auto-repeat delivers
//! endless key-down events for a held key; the latches only arm on the
//! first one. Unrecognized key codes are ignored.

use crate::sim::TickInput;

/// Keys the simulation cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Fire,
    Debug,
}

impl Key {
    /// Map a DOM-style key code; anything else is `None`
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowUp" => Some(Key::Up),
            "ArrowDown" => Some(Key::Down),
            " " => Some(Key::Fire),
            "d" => Some(Key::Debug),
            _ => None,
        }
    }
}

/// Mutable input state fed by the embedder's event loop
#[derive(Debug, Clone, Default)]
pub struct InputState {
    up_held: bool,
    down_held: bool,
    fire_held: bool,
    debug_held: bool,
    fire_pending: bool,
    debug_pending: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Repeats while held do not re-arm one-shots.
    pub fn key_down(&mut self, key: Key) {
        match key {
            Key::Up => self.up_held = true,
            Key::Down => self.down_held = true,
            Key::Fire => {
                if !self.fire_held {
                    self.fire_held = true;
                    self.fire_pending = true;
                }
            }
            Key::Debug => {
                if !self.debug_held {
                    self.debug_held = true;
                    self.debug_pending = true;
                }
            }
        }
    }

    /// Record a key release
    pub fn key_up(&mut self, key: Key) {
        match key {
            Key::Up => self.up_held = false,
            Key::Down => self.down_held = false,
            Key::Fire => self.fire_held = false,
            Key::Debug => self.debug_held = false,
        }
    }

    /// Record a raw key code press; unknown codes are silently dropped
    pub fn code_down(&mut self, code: &str) {
        if let Some(key) = Key::from_code(code) {
            self.key_down(key);
        }
    }

    /// Record a raw key code release; unknown codes are silently dropped
    pub fn code_up(&mut self, code: &str) {
        if let Some(key) = Key::from_code(code) {
            self.key_up(key);
        }
    }

    /// Build the input for one tick, consuming the one-shot latches
    pub fn take_tick_input(&mut self) -> TickInput {
        TickInput {
            up: self.up_held,
            down: self.down_held,
            fire: std::mem::take(&mut self.fire_pending),
            toggle_debug: std::mem::take(&mut self.debug_pending),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_keys_persist_across_ticks() {
        let mut input = InputState::new();
        input.key_down(Key::Up);
        assert!(input.take_tick_input().up);
        assert!(input.take_tick_input().up);
        input.key_up(Key::Up);
        assert!(!input.take_tick_input().up);
    }

    #[test]
    fn test_fire_is_edge_triggered() {
        let mut input = InputState::new();
        input.key_down(Key::Fire);
        // Auto-repeat delivers more key-downs while held
        input.key_down(Key::Fire);
        input.key_down(Key::Fire);
        assert!(input.take_tick_input().fire);
        assert!(!input.take_tick_input().fire);

        // Release and press again: fires once more
        input.key_up(Key::Fire);
        input.key_down(Key::Fire);
        assert!(input.take_tick_input().fire);
    }

    #[test]
    fn test_unknown_codes_are_ignored() {
        let mut input = InputState::new();
        input.code_down("PageUp");
        input.code_down("x");
        let tick = input.take_tick_input();
        assert!(!tick.up && !tick.down && !tick.fire && !tick.toggle_debug);
    }

    #[test]
    fn test_code_mapping() {
        assert_eq!(Key::from_code("ArrowUp"), Some(Key::Up));
        assert_eq!(Key::from_code("ArrowDown"), Some(Key::Down));
        assert_eq!(Key::from_code(" "), Some(Key::Fire));
        assert_eq!(Key::from_code("d"), Some(Key::Debug));
        assert_eq!(Key::from_code("Escape"), None);
    }
}
