//! Keyboard input mapping.

use crate::state::CarouselInput;

/// Keys the carousel reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Space,
}

/// Result of mapping a key press.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyOutcome<T> {
    /// Input to feed to the state machine.
    pub input: CarouselInput<T>,
    /// Whether the host must suppress the key's default behavior (Space
    /// would otherwise scroll the page).
    pub suppress_default: bool,
}

/// Maps a key press to a carousel input.
pub fn map_key<T>(key: Key) -> KeyOutcome<T> {
    match key {
        Key::ArrowRight => KeyOutcome {
            input: CarouselInput::Next,
            suppress_default: false,
        },
        Key::ArrowLeft => KeyOutcome {
            input: CarouselInput::Prev,
            suppress_default: false,
        },
        Key::Space => KeyOutcome {
            input: CarouselInput::TogglePause,
            suppress_default: true,
        },
    }
}
