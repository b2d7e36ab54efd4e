use std::collections::HashSet;

use super::frame::InputFrame;
use super::snapshot::InputSnapshot;
use super::types::{InputEvent, Key, KeyState};

/// Live keyboard state for one window.
///
/// Holds which keys are down right now; per-frame transitions go to `InputFrame`.
#[derive(Debug, Default)]
pub struct InputState {
    /// Whether the window has keyboard focus.
    pub focused: bool,

    /// Keys currently held.
    pub keys_down: HashSet<Key>,
}

impl InputState {
    /// Applies an event to the live state and records transitions into `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Release events are never delivered to an unfocused window.
                    for key in self.keys_down.drain() {
                        frame.keys_released.insert(key);
                    }
                }
            }

            InputEvent::Key { key, state, .. } => match state {
                KeyState::Pressed => {
                    if self.keys_down.insert(*key) {
                        frame.keys_pressed.insert(*key);
                    }
                }
                KeyState::Released => {
                    if self.keys_down.remove(key) {
                        frame.keys_released.insert(*key);
                    }
                }
            },
        }

        frame.push_event(ev);
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    /// Freezes the current state and this frame's transitions.
    pub fn snapshot(&self, frame: &InputFrame) -> InputSnapshot {
        InputSnapshot::new(
            self.focused,
            self.keys_down.clone(),
            frame.keys_pressed.clone(),
            frame.keys_released.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(key: Key, state: KeyState) -> InputEvent {
        InputEvent::Key { key, state, repeat: false }
    }

    #[test]
    fn press_then_release_records_both_transitions() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, key(Key::ArrowLeft, KeyState::Pressed));
        assert!(state.key_down(Key::ArrowLeft));
        assert!(frame.keys_pressed.contains(&Key::ArrowLeft));

        state.apply_event(&mut frame, key(Key::ArrowLeft, KeyState::Released));
        assert!(!state.key_down(Key::ArrowLeft));
        assert!(frame.keys_released.contains(&Key::ArrowLeft));
        assert_eq!(frame.events.len(), 2);
    }

    #[test]
    fn repeat_press_is_not_a_new_transition() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, key(Key::W, KeyState::Pressed));
        frame.clear();
        state.apply_event(
            &mut frame,
            InputEvent::Key { key: Key::W, state: KeyState::Pressed, repeat: true },
        );

        assert!(state.key_down(Key::W));
        assert!(frame.keys_pressed.is_empty());
    }

    #[test]
    fn focus_loss_releases_held_keys() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, InputEvent::Focused(true));
        state.apply_event(&mut frame, key(Key::ArrowUp, KeyState::Pressed));
        frame.clear();

        state.apply_event(&mut frame, InputEvent::Focused(false));

        assert!(!state.focused);
        assert!(state.keys_down.is_empty());
        assert!(frame.keys_released.contains(&Key::ArrowUp));
    }
}
