//! Audio-module domain newtypes for compile-time safety.
//!
//! These zero-cost wrappers keep raw integers away from the command surface:
//! - `TrackId`: 1-based track number, never zero
//! - `EqPreset`: equaliser preset 0–5, wraps when cycled
//! - `Volume`: audio-module volume level 0–30

// ── Error type ───────────────────────────────────────────────────────────────

/// Error returned when a value is out of the valid range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutOfRangeError {
    /// The value that was out of range.
    pub value: u32,
    /// The inclusive minimum allowed value.
    pub min: u32,
    /// The inclusive maximum allowed value.
    pub max: u32,
}

// ── TrackId ──────────────────────────────────────────────────────────────────

/// A track number on the audio module's storage, counted from 1.
///
/// The upper bound depends on how many tracks are loaded, so it is checked
/// against the configured track count with [`TrackId::in_range`] rather than
/// by the type itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct TrackId(u16);

impl TrackId {
    /// The first track.
    pub const FIRST: Self = Self(1);

    /// Create a `TrackId`, returning an error if `value` is zero.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError`] if `value == 0`.
    pub fn new(value: u16) -> Result<Self, OutOfRangeError> {
        if value == 0 {
            Err(OutOfRangeError {
                value: 0,
                min: 1,
                max: u32::from(u16::MAX),
            })
        } else {
            Ok(Self(value))
        }
    }

    /// Create a `TrackId` that must also be `<= track_count`.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError`] if `value` is zero or above `track_count`.
    pub fn in_range(value: u32, track_count: u16) -> Result<Self, OutOfRangeError> {
        match u16::try_from(value) {
            Ok(v) if v >= 1 && v <= track_count => Ok(Self(v)),
            _ => Err(OutOfRangeError {
                value,
                min: 1,
                max: u32::from(track_count),
            }),
        }
    }

    /// Return the raw track number.
    #[must_use]
    pub fn get(self) -> u16 {
        self.0
    }

    /// The following track, or `None` past `track_count`.
    #[must_use]
    pub fn succ(self, track_count: u16) -> Option<Self> {
        self.0
            .checked_add(1)
            .filter(|&n| n <= track_count)
            .map(Self)
    }

    /// The preceding track, or `None` before track 1.
    #[must_use]
    pub fn pred(self) -> Option<Self> {
        self.0.checked_sub(1).filter(|&n| n >= 1).map(Self)
    }
}

impl Default for TrackId {
    fn default() -> Self {
        Self::FIRST
    }
}

// ── EqPreset ─────────────────────────────────────────────────────────────────

/// Equaliser preset understood by the audio module.
///
/// | value | preset  |
/// |-------|---------|
/// | 0     | Normal  |
/// | 1     | Pop     |
/// | 2     | Rock    |
/// | 3     | Jazz    |
/// | 4     | Classic |
/// | 5     | Bass    |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct EqPreset(u8);

impl EqPreset {
    /// Highest preset number.
    pub const MAX: u8 = 5;

    /// Number of presets in the cycle.
    pub const COUNT: u8 = Self::MAX + 1;

    /// Create an `EqPreset`, returning an error if `value > 5`.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError`] if `value > 5`.
    pub fn try_new(value: u8) -> Result<Self, OutOfRangeError> {
        if value > Self::MAX {
            Err(OutOfRangeError {
                value: u32::from(value),
                min: 0,
                max: u32::from(Self::MAX),
            })
        } else {
            Ok(Self(value))
        }
    }

    /// The next preset in the cycle; `5` wraps to `0`.
    #[must_use]
    pub fn next(self) -> Self {
        match self.0.checked_add(1) {
            Some(n) if n <= Self::MAX => Self(n),
            _ => Self(0),
        }
    }

    /// Return the preset number written to the module.
    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }

    /// Human-readable preset name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self.0 {
            0 => "Normal",
            1 => "Pop",
            2 => "Rock",
            3 => "Jazz",
            4 => "Classic",
            _ => "Bass",
        }
    }
}

// ── Volume ───────────────────────────────────────────────────────────────────

/// Audio-module output volume, 0 (silent) to 30 (loudest).
///
/// Careful with the top of the range: it is dangerously loud on a handset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct Volume(u8);

impl Volume {
    /// Loudest accepted level.
    pub const MAX: u8 = 30;

    /// Create a `Volume`, clamping values above 30 to 30.
    #[must_use]
    pub fn new(value: u8) -> Self {
        Self(value.min(Self::MAX))
    }

    /// Create a `Volume`, returning an error if `value > 30`.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError`] if `value > 30`.
    pub fn try_new(value: u8) -> Result<Self, OutOfRangeError> {
        if value > Self::MAX {
            Err(OutOfRangeError {
                value: u32::from(value),
                min: 0,
                max: u32::from(Self::MAX),
            })
        } else {
            Ok(Self(value))
        }
    }

    /// Return the inner volume level (0–30).
    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }
}
