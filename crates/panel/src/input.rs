//! Keyboard input as seen by the panel

use std::collections::HashSet;

use stancecore::{Key, ToggleChord};

/// Per-frame key state supplied by the host
pub trait KeyboardState {
    fn is_key_down(&self, key: Key) -> bool;
}

impl KeyboardState for [Key] {
    fn is_key_down(&self, key: Key) -> bool {
        self.contains(&key)
    }
}

impl KeyboardState for HashSet<Key> {
    fn is_key_down(&self, key: Key) -> bool {
        self.contains(&key)
    }
}

/// Fires once when the trigger key goes down while both modifiers are held.
///
/// Holding the chord does not repeat; the trigger must be released first.
#[derive(Debug, Clone)]
pub struct ChordDetector {
    chord: ToggleChord,
    trigger_was_down: bool,
}

impl ChordDetector {
    pub fn new(chord: ToggleChord) -> Self {
        ChordDetector { chord, trigger_was_down: false }
    }

    pub fn chord(&self) -> ToggleChord {
        self.chord
    }

    /// Feed one frame of key state; returns true on the frame the chord fires
    pub fn update<K: KeyboardState + ?Sized>(&mut self, keys: &K) -> bool {
        let [a, b] = self.chord.modifiers;
        let held = keys.is_key_down(a) && keys.is_key_down(b);
        let trigger = keys.is_key_down(self.chord.trigger);

        let fired = held && trigger && !self.trigger_was_down;
        self.trigger_was_down = trigger;
        fired
    }
}

impl Default for ChordDetector {
    fn default() -> Self {
        Self::new(ToggleChord::default())
    }
}
