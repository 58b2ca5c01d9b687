//! Serial audio-module abstraction
//!
//! The module is an opaque command sink: frames go out, nothing is
//! acknowledged. Implementations own the UART framing and checksum.

use crate::audio_types::{EqPreset, TrackId, Volume};

/// Audio module trait
///
/// Every command is fire-and-forget. An `Err` means the command could not be
/// handed to the transport; it never means the module rejected it, because
/// the module does not say.
pub trait AudioModule {
    /// Error type
    type Error: core::fmt::Debug;

    /// Start playing `track` from the beginning.
    fn play(&mut self, track: TrackId) -> Result<(), Self::Error>;

    /// Pause the current track.
    fn pause(&mut self) -> Result<(), Self::Error>;

    /// Resume a paused track.
    fn resume(&mut self) -> Result<(), Self::Error>;

    /// Step the output volume up by one level.
    fn volume_up(&mut self) -> Result<(), Self::Error>;

    /// Step the output volume down by one level.
    fn volume_down(&mut self) -> Result<(), Self::Error>;

    /// Set an absolute output volume.
    fn set_volume(&mut self, volume: Volume) -> Result<(), Self::Error>;

    /// Select an equaliser preset.
    fn set_eq(&mut self, preset: EqPreset) -> Result<(), Self::Error>;

    /// Query whether the module is currently playing.
    ///
    /// Some module clones answer this unreliably; an `Err` here is treated as
    /// "no observation" by the caller.
    fn status(&mut self) -> Result<PlayerStatus, Self::Error>;
}

/// Playback status reported by the module.
///
/// The module cannot tell "paused" from "finished": both read as `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlayerStatus {
    /// Paused, stopped, or never started.
    #[default]
    Idle,
    /// A track is playing.
    Playing,
}

impl PlayerStatus {
    /// Short label for log lines.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Playing => "playing",
        }
    }
}
