//! Keypad decoding.
//!
//! Three small pieces the controller composes:
//!
//! - [`DebounceGate`] drops short presses that arrive too soon after the last
//!   accepted one.
//! - [`KeyAction`] maps a raw [`KeyEvent`] to what the controller should do.
//! - [`InputAccumulator`] builds a track number from a run of digits.

use embassy_time::{Duration, Instant};
use platform::{Key, KeyEvent, Note, Press};

/// What a key event asks the controller to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyAction {
    /// Append a digit to the track number being typed.
    Digit(u8),
    /// Play the previous track.
    Previous,
    /// Play the next track.
    Next,
    /// Play the next track of the shuffle.
    Random,
    /// One step louder.
    VolumeUp,
    /// One step quieter.
    VolumeDown,
    /// Flip repeat.
    ToggleRepeat,
    /// Pause or resume.
    TogglePause,
    /// Advance the equaliser preset (long press of `0`).
    CycleEq,
}

impl KeyAction {
    /// Decode a key event. Unwired keys and long presses of keys other than
    /// `0` decode to `None`.
    pub fn decode(event: KeyEvent) -> Option<Self> {
        let key = event.key()?;
        match event.press {
            Press::Long => (key == Key::Digit(0)).then_some(Self::CycleEq),
            Press::Short => Some(match key {
                Key::Digit(d) => Self::Digit(d),
                Key::Previous => Self::Previous,
                Key::Next => Self::Next,
                Key::Random => Self::Random,
                Key::VolumeUp => Self::VolumeUp,
                Key::VolumeDown => Self::VolumeDown,
                Key::Repeat => Self::ToggleRepeat,
                Key::Pause => Self::TogglePause,
            }),
        }
    }
}

/// Buzzer note for a short press of `key`, if it has one.
///
/// Digits 1-9 climb a chromatic scale from C4; `0` sits above them on A#4,
/// with `*` and `#` on A4 and B4.
pub fn key_tone(key: Key) -> Option<Note> {
    let note = match key {
        Key::Digit(1) => Note::C4,
        Key::Digit(2) => Note::Cs4,
        Key::Digit(3) => Note::D4,
        Key::Digit(4) => Note::Ds4,
        Key::Digit(5) => Note::E4,
        Key::Digit(6) => Note::F4,
        Key::Digit(7) => Note::Fs4,
        Key::Digit(8) => Note::G4,
        Key::Digit(9) => Note::Gs4,
        Key::Digit(0) => Note::As4,
        Key::Previous => Note::A4,
        Key::Next => Note::B4,
        _ => return None,
    };
    Some(note)
}

/// Note sounded for every long press.
pub const LONG_PRESS_TONE: Note = Note::C3;

// ── Debounce ─────────────────────────────────────────────────────────────────

/// Minimum spacing between accepted presses.
///
/// A press closer than `window` to the last *accepted* press is dropped;
/// dropped presses do not extend the window.
#[derive(Debug, Clone, Copy)]
pub struct DebounceGate {
    window: Duration,
    last: Option<Instant>,
}

impl DebounceGate {
    /// A gate that has accepted nothing yet.
    pub const fn new(window: Duration) -> Self {
        Self { window, last: None }
    }

    /// Accept or drop a press arriving at `now`.
    pub fn accept(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last {
            if now.saturating_duration_since(last) < self.window {
                return false;
            }
        }
        self.last = Some(now);
        true
    }
}

// ── Digit entry ──────────────────────────────────────────────────────────────

/// Digits typed so far, as a number.
///
/// Accumulation saturates at `u32::MAX`; such a value is never a valid track.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputAccumulator {
    value: u32,
}

impl InputAccumulator {
    /// An empty prompt.
    pub const fn new() -> Self {
        Self { value: 0 }
    }

    /// `value * 10 + digit`; returns the new value.
    pub fn push_digit(&mut self, digit: u8) -> u32 {
        self.value = self
            .value
            .saturating_mul(10)
            .saturating_add(u32::from(digit));
        self.value
    }

    /// Current prompt value.
    pub fn value(&self) -> u32 {
        self.value
    }

    /// Forget the typed digits.
    pub fn clear(&mut self) {
        self.value = 0;
    }
}
