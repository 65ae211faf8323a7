//! Keyboard-style input queries
//!
//! The run controller distinguishes level-triggered queries (`is_down`, used
//! for paddle movement and restart) from edge-triggered ones (`just_pressed`,
//! used for the pause toggle).

use serde::{Deserialize, Serialize};

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Left,
    Right,
    Pause,
    Restart,
}

impl Key {
    fn index(self) -> usize {
        match self {
            Key::Left => 0,
            Key::Right => 1,
            Key::Pause => 2,
            Key::Restart => 3,
        }
    }
}

/// Input as seen by one tick
pub trait InputState {
    /// Key is held this tick (level-triggered)
    fn is_down(&self, key: Key) -> bool;
    /// Key went from released to held since the previous tick (edge-triggered)
    fn just_pressed(&self, key: Key) -> bool;
}

/// Held-key tracker that derives press edges between frames
#[derive(Debug, Clone, Default)]
pub struct Keyboard {
    held: [bool; 4],
    previous: [bool; 4],
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new frame with exactly `keys` held
    pub fn set_held(&mut self, keys: &[Key]) {
        self.previous = self.held;
        self.held = [false; 4];
        for key in keys {
            self.held[key.index()] = true;
        }
    }
}

impl InputState for Keyboard {
    fn is_down(&self, key: Key) -> bool {
        self.held[key.index()]
    }

    fn just_pressed(&self, key: Key) -> bool {
        self.held[key.index()] && !self.previous[key.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_fires_once_while_held() {
        let mut keys = Keyboard::new();
        let mut edges = 0;
        for _ in 0..10 {
            keys.set_held(&[Key::Pause]);
            if keys.just_pressed(Key::Pause) {
                edges += 1;
            }
            assert!(keys.is_down(Key::Pause));
        }
        assert_eq!(edges, 1);
    }

    #[test]
    fn test_release_rearms_edge() {
        let mut keys = Keyboard::new();
        keys.set_held(&[Key::Pause]);
        assert!(keys.just_pressed(Key::Pause));
        keys.set_held(&[]);
        assert!(!keys.is_down(Key::Pause));
        assert!(!keys.just_pressed(Key::Pause));
        keys.set_held(&[Key::Pause]);
        assert!(keys.just_pressed(Key::Pause));
    }

    #[test]
    fn test_keys_are_independent() {
        let mut keys = Keyboard::new();
        keys.set_held(&[Key::Left, Key::Restart]);
        assert!(keys.is_down(Key::Left));
        assert!(keys.is_down(Key::Restart));
        assert!(!keys.is_down(Key::Right));
        assert!(!keys.is_down(Key::Pause));
    }
}
