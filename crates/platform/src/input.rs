//! Keypad and button input abstraction
//!
//! The keypad matrix driver scans and debounces the telephone keypad and
//! delivers [`KeyEvent`]s tagged short or long. The separate play button and
//! the battery monitor deliver their own events through the same
//! [`InputEvent`] stream.

/// Input device trait for the keypad, play button, and battery monitor
pub trait InputDevice {
    /// Wait for next input event (async, power-efficient)
    fn wait_for_event(&mut self) -> impl core::future::Future<Output = InputEvent>;

    /// Poll for event (non-blocking)
    fn poll_event(&mut self) -> Option<InputEvent>;
}

/// Events delivered to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    /// Keypad matrix key pressed (short) or held (long)
    Key(KeyEvent),
    /// Dedicated play button pressed (releases are not reported)
    PlayButton,
    /// Battery monitor crossed its low-voltage threshold
    BatteryLow {
        /// Measured battery voltage in millivolts
        millivolts: u16,
    },
}

/// How long a key was held
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Press {
    /// Released before the long-press threshold
    Short,
    /// Held past the long-press threshold
    Long,
}

/// A raw keypad event: matrix index plus press length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyEvent {
    /// Matrix index, `row * columns + column` on the 5 × 4 keypad
    pub code: u8,
    /// Short or long press
    pub press: Press,
}

impl KeyEvent {
    /// A short press of `code`.
    #[must_use]
    pub const fn short(code: u8) -> Self {
        Self {
            code,
            press: Press::Short,
        }
    }

    /// A long press of `code`.
    #[must_use]
    pub const fn long(code: u8) -> Self {
        Self {
            code,
            press: Press::Long,
        }
    }

    /// The logical key this matrix index is wired to.
    #[must_use]
    pub fn key(self) -> Option<Key> {
        Key::from_code(self.code)
    }
}

/// Logical keys of the telephone keypad
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Key {
    /// Digit 0–9
    Digit(u8),
    /// `*` — previous track
    Previous,
    /// `#` — next track
    Next,
    /// Random (shuffle) track
    Random,
    /// Volume up
    VolumeUp,
    /// Volume down
    VolumeDown,
    /// Toggle repeat of the current track
    Repeat,
    /// Toggle pause/resume
    Pause,
}

impl Key {
    /// Matrix index of the `0` digit key; its long press cycles the EQ.
    pub const EQ_KEY_CODE: u8 = 13;

    /// Map a keypad matrix index to its logical key.
    ///
    /// The layout is irregular because the handset's keypad traces were
    /// routed around the hook switch; unwired indices return `None`.
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        let key = match code {
            0 => Self::Digit(1),
            1 => Self::Digit(2),
            2 => Self::Digit(3),
            4 => Self::Digit(4),
            5 => Self::Digit(5),
            6 => Self::Digit(6),
            8 => Self::Digit(7),
            9 => Self::Digit(8),
            10 => Self::Digit(9),
            13 => Self::Digit(0),
            12 => Self::Previous,
            14 => Self::Next,
            3 => Self::Random,
            16 => Self::VolumeDown,
            11 => Self::VolumeUp,
            7 => Self::Repeat,
            15 => Self::Pause,
            _ => return None,
        };
        Some(key)
    }

    /// Matrix index wired to this key; inverse of [`Key::from_code`].
    ///
    /// Returns `None` for a `Digit` above 9.
    #[must_use]
    pub fn code(self) -> Option<u8> {
        let code = match self {
            Self::Digit(1) => 0,
            Self::Digit(2) => 1,
            Self::Digit(3) => 2,
            Self::Digit(4) => 4,
            Self::Digit(5) => 5,
            Self::Digit(6) => 6,
            Self::Digit(7) => 8,
            Self::Digit(8) => 9,
            Self::Digit(9) => 10,
            Self::Digit(0) => 13,
            Self::Digit(_) => return None,
            Self::Previous => 12,
            Self::Next => 14,
            Self::Random => 3,
            Self::VolumeDown => 16,
            Self::VolumeUp => 11,
            Self::Repeat => 7,
            Self::Pause => 15,
        };
        Some(code)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn every_wired_code_round_trips() {
        for code in 0..20u8 {
            if let Some(key) = Key::from_code(code) {
                assert_eq!(key.code(), Some(code), "code {code}");
            }
        }
    }

    #[test]
    fn ten_digits_are_wired() {
        let digits = (0..20u8)
            .filter_map(Key::from_code)
            .filter(|k| matches!(k, Key::Digit(_)))
            .count();
        assert_eq!(digits, 10);
    }

    #[test]
    fn unwired_codes_map_to_none() {
        assert_eq!(Key::from_code(17), None);
        assert_eq!(Key::from_code(19), None);
        assert_eq!(Key::from_code(200), None);
    }

    #[test]
    fn eq_key_is_digit_zero() {
        assert_eq!(Key::from_code(Key::EQ_KEY_CODE), Some(Key::Digit(0)));
    }
}
