//! Platform abstraction layer
//!
//! Browser callbacks (pointer, keyboard, restart button) can fire between
//! frames. They only enqueue commands here; the frame callback drains the
//! queue once per frame so every mutation of the session happens on the
//! frame path, in arrival order.

use std::collections::VecDeque;

use crate::sim::{InputEvent, TickInput};

/// What a key press means to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Command(InputEvent),
    ToggleAutopilot,
}

/// Map a `KeyboardEvent.code` to a game action
pub fn map_key(code: &str) -> Option<KeyAction> {
    match code {
        "Space" => Some(KeyAction::Command(InputEvent::Activate)),
        "KeyA" => Some(KeyAction::ToggleAutopilot),
        _ => None,
    }
}

/// FIFO of commands waiting for the next frame
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    pending: VecDeque<InputEvent>,
    autopilot: bool,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.pending.push_back(event);
    }

    /// Apply a key press. Returns true if the key was consumed by the game.
    pub fn push_key(&mut self, code: &str) -> bool {
        match map_key(code) {
            Some(KeyAction::Command(event)) => {
                self.push(event);
                true
            }
            Some(KeyAction::ToggleAutopilot) => {
                self.autopilot = !self.autopilot;
                log::info!("Autopilot: {}", self.autopilot);
                true
            }
            None => false,
        }
    }

    pub fn set_autopilot(&mut self, on: bool) {
        self.autopilot = on;
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drain everything queued since the last frame into one tick's input
    pub fn take_tick_input(&mut self) -> TickInput {
        TickInput {
            events: self.pending.drain(..).collect(),
            autopilot: self.autopilot,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(
            map_key("Space"),
            Some(KeyAction::Command(InputEvent::Activate))
        );
        assert_eq!(map_key("KeyA"), Some(KeyAction::ToggleAutopilot));
        assert_eq!(map_key("Enter"), None);
        assert_eq!(map_key("KeyR"), None);
    }

    #[test]
    fn test_drain_preserves_order() {
        let mut queue = InputQueue::new();
        queue.push(InputEvent::Activate);
        queue.push(InputEvent::Restart);
        queue.push(InputEvent::Activate);

        let input = queue.take_tick_input();
        assert_eq!(
            input.events,
            vec![
                InputEvent::Activate,
                InputEvent::Restart,
                InputEvent::Activate
            ]
        );
        assert!(queue.is_empty());
        assert!(queue.take_tick_input().events.is_empty());
    }

    #[test]
    fn test_autopilot_toggle_persists_across_frames() {
        let mut queue = InputQueue::new();
        assert!(queue.push_key("KeyA"));
        assert!(queue.is_empty());
        assert!(queue.take_tick_input().autopilot);
        assert!(queue.take_tick_input().autopilot);
        queue.push_key("KeyA");
        assert!(!queue.take_tick_input().autopilot);
    }

    #[test]
    fn test_unmapped_keys_ignored() {
        let mut queue = InputQueue::new();
        assert!(!queue.push_key("Escape"));
        assert_eq!(queue.len(), 0);
        assert!(queue.push_key("Space"));
        assert_eq!(queue.len(), 1);
    }
}
