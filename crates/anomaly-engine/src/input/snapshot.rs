use std::collections::HashSet;

use super::types::Key;

/// Immutable view of the keyboard for one frame.
///
/// Captured once by the runtime before the app's frame callback and passed
/// down to update code, so every system in a frame sees the same input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    focused: bool,
    held: HashSet<Key>,
    pressed: HashSet<Key>,
    released: HashSet<Key>,
}

impl InputSnapshot {
    pub fn new(
        focused: bool,
        held: HashSet<Key>,
        pressed: HashSet<Key>,
        released: HashSet<Key>,
    ) -> Self {
        Self { focused, held, pressed, released }
    }

    /// Snapshot with the given keys held and nothing else.
    pub fn with_held(keys: impl IntoIterator<Item = Key>) -> Self {
        Self {
            focused: true,
            held: keys.into_iter().collect(),
            ..Self::default()
        }
    }

    #[inline]
    pub fn focused(&self) -> bool {
        self.focused
    }

    /// Key is held at the time of the snapshot.
    #[inline]
    pub fn is_down(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Key went down during this frame.
    #[inline]
    pub fn just_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    /// Key went up during this frame.
    #[inline]
    pub fn just_released(&self, key: Key) -> bool {
        self.released.contains(&key)
    }

    /// True when any of `keys` is held.
    pub fn any_down(&self, keys: &[Key]) -> bool {
        keys.iter().any(|k| self.is_down(*k))
    }

    /// Digital axis: -1 when only `negative` is held, +1 when `positive` is
    /// held (positive wins when both are), 0 otherwise.
    pub fn axis(&self, negative: &[Key], positive: &[Key]) -> f32 {
        if self.any_down(positive) {
            1.0
        } else if self.any_down(negative) {
            -1.0
        } else {
            0.0
        }
    }
}
