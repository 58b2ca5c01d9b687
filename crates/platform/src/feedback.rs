//! LED and buzzer feedback abstraction
//!
//! Feedback is best-effort: none of these calls can fail from the caller's
//! point of view, and none of them block. The buzzer driver plays tones and
//! melodies from its own PWM timer.

use embassy_time::Duration;

/// Feedback sink: the keypad LED, the power-on LED, and the piezo buzzer.
pub trait Feedback {
    /// Switch the feedback LED.
    fn set_led(&mut self, on: bool);

    /// Switch the power-on indicator LED.
    fn set_power_led(&mut self, on: bool);

    /// Sound a single note for `duration`.
    fn tone(&mut self, note: Note, duration: Duration);

    /// Play a short melody.
    fn melody(&mut self, cue: Melody);
}

/// Buzzer pitches used for key feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(missing_docs)]
pub enum Note {
    /// Silence
    Rest,
    C3,
    C4,
    Cs4,
    D4,
    Ds4,
    E4,
    F4,
    Fs4,
    G4,
    Gs4,
    A4,
    As4,
    B4,
    C5,
    D5,
}

impl Note {
    /// Frequency in hertz, rounded to the nearest integer. `Rest` is 0.
    #[must_use]
    pub fn frequency_hz(self) -> u16 {
        match self {
            Self::Rest => 0,
            Self::C3 => 131,
            Self::C4 => 262,
            Self::Cs4 => 277,
            Self::D4 => 294,
            Self::Ds4 => 311,
            Self::E4 => 330,
            Self::F4 => 349,
            Self::Fs4 => 370,
            Self::G4 => 392,
            Self::Gs4 => 415,
            Self::A4 => 440,
            Self::As4 => 466,
            Self::B4 => 494,
            Self::C5 => 523,
            Self::D5 => 587,
        }
    }
}

/// One step of a melody: a pitch and its length as a fraction of a whole
/// note (4 = quarter, 8 = eighth, 16 = sixteenth).
pub type Step = (Note, u8);

/// Melodic cues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Melody {
    /// Rising three-note figure: something was switched on.
    Positive,
    /// Falling three-note figure: something was switched off.
    Negative,
    /// Fanfare for the hidden code.
    Victory,
}

const POSITIVE: &[Step] = &[(Note::C4, 16), (Note::As4, 16), (Note::C5, 16), (Note::Rest, 8)];
const NEGATIVE: &[Step] = &[(Note::C5, 16), (Note::As4, 16), (Note::C4, 16), (Note::Rest, 8)];
const VICTORY: &[Step] = &[
    (Note::G4, 8),
    (Note::G4, 16),
    (Note::G4, 16),
    (Note::D5, 4),
    (Note::Rest, 8),
];

impl Melody {
    /// The notes of this cue, in order.
    #[must_use]
    pub fn steps(self) -> &'static [Step] {
        match self {
            Self::Positive => POSITIVE,
            Self::Negative => NEGATIVE,
            Self::Victory => VICTORY,
        }
    }

    /// Short label for log lines.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Victory => "victory",
        }
    }
}
