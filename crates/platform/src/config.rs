//! Application configuration and constants
//!
//! This module defines central configuration values used across the application.
//! All timing, naming, and capacity values should reference these constants
//! rather than hardcoding values. [`JukeboxConfig`] carries the run-time copy
//! that the controller validates once at construction.

use embassy_time::Duration;
use thiserror_no_std::Error;

use crate::audio_types::Volume;

/// The application name
pub const APP_NAME: &str = "Jukephone";

/// One-line description shown in the start-up banner
pub const APP_DESCRIPTION: &str = "Repurposing a landline telephone into a jukebox";

/// Application version (synchronized with Cargo.toml)
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// ── Storage card ──────────────────────────────────────────────────────────────

/// Number of tracks on the module's storage card
pub const NUM_TRACKS: u16 = 999;

/// Capacity of the shuffle permutation; no card may hold more tracks
pub const MAX_TRACKS: usize = 3000;

/// Entering this number plays the victory fanfare instead of a track
pub const CELEBRATION_CODE: u32 = 7777;

// ── Timers and delays ────────────────────────────────────────────────────────

/// Unsubmitted digit entry is discarded after this much keypad silence
pub const INPUT_TIMEOUT_MS: u64 = 1000;

/// Command tick period; must stay above [`MIN_COMMAND_INTERVAL_MS`]
pub const PLAYER_POLL_MS: u64 = 350;

/// The audio module drops commands that arrive closer together than this
pub const MIN_COMMAND_INTERVAL_MS: u64 = 200;

/// Short presses closer together than this are dropped
pub const KEYPAD_DEBOUNCE_MS: u64 = 250;

/// Feedback LED on-time per key press
pub const BLINK_DURATION_MS: u64 = 100;

/// Buzzer on-time per key press
pub const BEEP_DURATION_MS: u64 = 50;

/// Power-on indicator on-time after boot
pub const POWER_ON_LED_MS: u64 = 500;

/// LED toggle period once the battery is low
pub const LOW_BATTERY_PULSE_MS: u64 = 200;

/// Volume set once at start-up; 30 is dangerously loud on a handset
pub const INITIAL_VOLUME: u8 = 1;

// ── Errors ───────────────────────────────────────────────────────────────────

/// Reasons a [`JukeboxConfig`] is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Track count is zero or exceeds [`MAX_TRACKS`].
    #[error("track count {0} outside 1..={max}", max = MAX_TRACKS)]
    TrackCount(u16),
    /// A timeout or period that must be positive is zero.
    #[error("{0} must be non-zero")]
    ZeroDuration(&'static str),
    /// The command tick would outrun the audio module.
    #[error("command tick {tick_ms} ms does not exceed module latency {min_ms} ms")]
    TickTooFast {
        /// Configured tick period
        tick_ms: u64,
        /// Minimum module inter-command interval
        min_ms: u64,
    },
}

// ── JukeboxConfig ────────────────────────────────────────────────────────────

/// Run-time configuration for the jukebox controller.
///
/// Defaults come from the constants above; override with the fluent setters.
///
/// ```
/// use platform::config::JukeboxConfig;
///
/// let config = JukeboxConfig::default().track_count(120).input_timeout_ms(1500);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct JukeboxConfig {
    /// Number of tracks, N
    pub track_count: u16,
    /// Digit-entry timeout
    pub input_timeout: Duration,
    /// Command tick period
    pub command_tick: Duration,
    /// Minimum interval between accepted short presses
    pub debounce: Duration,
    /// Feedback LED on-time
    pub blink: Duration,
    /// Key tone length
    pub beep: Duration,
    /// Power-on indicator on-time
    pub power_on_indicator: Duration,
    /// Low-battery LED toggle period
    pub low_battery_pulse: Duration,
    /// Volume applied at start-up
    pub initial_volume: Volume,
    /// Digit code that triggers the victory fanfare
    pub celebration_code: u32,
}

impl Default for JukeboxConfig {
    fn default() -> Self {
        Self {
            track_count: NUM_TRACKS,
            input_timeout: Duration::from_millis(INPUT_TIMEOUT_MS),
            command_tick: Duration::from_millis(PLAYER_POLL_MS),
            debounce: Duration::from_millis(KEYPAD_DEBOUNCE_MS),
            blink: Duration::from_millis(BLINK_DURATION_MS),
            beep: Duration::from_millis(BEEP_DURATION_MS),
            power_on_indicator: Duration::from_millis(POWER_ON_LED_MS),
            low_battery_pulse: Duration::from_millis(LOW_BATTERY_PULSE_MS),
            initial_volume: Volume::new(INITIAL_VOLUME),
            celebration_code: CELEBRATION_CODE,
        }
    }
}

impl JukeboxConfig {
    /// Set the number of tracks on the card.
    #[must_use]
    pub fn track_count(mut self, n: u16) -> Self {
        self.track_count = n;
        self
    }

    /// Set the digit-entry timeout in milliseconds.
    #[must_use]
    pub fn input_timeout_ms(mut self, ms: u64) -> Self {
        self.input_timeout = Duration::from_millis(ms);
        self
    }

    /// Set the command tick period in milliseconds.
    #[must_use]
    pub fn command_tick_ms(mut self, ms: u64) -> Self {
        self.command_tick = Duration::from_millis(ms);
        self
    }

    /// Set the keypad debounce interval in milliseconds.
    #[must_use]
    pub fn debounce_ms(mut self, ms: u64) -> Self {
        self.debounce = Duration::from_millis(ms);
        self
    }

    /// Set the feedback LED on-time in milliseconds.
    #[must_use]
    pub fn blink_ms(mut self, ms: u64) -> Self {
        self.blink = Duration::from_millis(ms);
        self
    }

    /// Set the start-up volume.
    #[must_use]
    pub fn initial_volume(mut self, volume: Volume) -> Self {
        self.initial_volume = volume;
        self
    }

    /// Check the configuration against the module's limits.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.track_count == 0 || usize::from(self.track_count) > MAX_TRACKS {
            return Err(ConfigError::TrackCount(self.track_count));
        }
        let positive = [
            (self.input_timeout, "input timeout"),
            (self.command_tick, "command tick"),
            (self.blink, "blink duration"),
            (self.power_on_indicator, "power-on indicator"),
            (self.low_battery_pulse, "low-battery pulse"),
        ];
        if let Some((_, name)) = positive.iter().find(|(d, _)| d.as_ticks() == 0) {
            return Err(ConfigError::ZeroDuration(name));
        }
        if self.command_tick.as_millis() <= MIN_COMMAND_INTERVAL_MS {
            return Err(ConfigError::TickTooFast {
                tick_ms: self.command_tick.as_millis(),
                min_ms: MIN_COMMAND_INTERVAL_MS,
            });
        }
        Ok(())
    }
}
