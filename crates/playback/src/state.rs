//! Playback state.
//!
//! `PlaybackState` is the controller's view of what the audio module should be
//! doing. It is pure data with no I/O: the transitions here only report what
//! changed, and the controller turns that into module commands.

use platform::{EqPreset, TrackId};

/// Current track, pause, repeat, and equaliser settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PlaybackState {
    track_count: u16,
    current_track: TrackId,
    is_paused: bool,
    repeat: bool,
    eq_preset: EqPreset,
}

impl PlaybackState {
    /// Power-on state: track 1, not paused, no repeat, preset 0.
    ///
    /// `track_count` is the validated number of tracks, N.
    pub fn new(track_count: u16) -> Self {
        Self {
            track_count,
            current_track: TrackId::FIRST,
            is_paused: false,
            repeat: false,
            eq_preset: EqPreset::default(),
        }
    }

    /// Number of tracks, N.
    pub fn track_count(&self) -> u16 {
        self.track_count
    }

    /// The track PLAY requests refer to.
    pub fn current_track(&self) -> TrackId {
        self.current_track
    }

    /// Whether the user paused playback.
    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    /// Whether a finished track restarts instead of advancing.
    pub fn repeat(&self) -> bool {
        self.repeat
    }

    /// Active equaliser preset.
    pub fn eq_preset(&self) -> EqPreset {
        self.eq_preset
    }

    /// Make `track` current.
    pub fn set_current_track(&mut self, track: TrackId) {
        self.current_track = track;
    }

    /// Step forward one track, clamped at N.
    ///
    /// Returns the new track if it moved; moving clears `repeat`. At the last
    /// track nothing changes and `None` is returned.
    pub fn step_next(&mut self) -> Option<TrackId> {
        let next = self.current_track.succ(self.track_count)?;
        self.current_track = next;
        self.repeat = false;
        Some(next)
    }

    /// Step back one track, clamped at 1. Same contract as [`Self::step_next`].
    pub fn step_previous(&mut self) -> Option<TrackId> {
        let prev = self.current_track.pred()?;
        self.current_track = prev;
        self.repeat = false;
        Some(prev)
    }

    /// Flip `repeat` and return the new value.
    pub fn toggle_repeat(&mut self) -> bool {
        self.repeat = !self.repeat;
        self.repeat
    }

    /// Flip `is_paused` and return the new value.
    pub fn toggle_pause(&mut self) -> bool {
        self.is_paused = !self.is_paused;
        self.is_paused
    }

    /// Advance to the next equaliser preset (5 wraps to 0) and return it.
    pub fn cycle_eq(&mut self) -> EqPreset {
        self.eq_preset = self.eq_preset.next();
        self.eq_preset
    }
}
