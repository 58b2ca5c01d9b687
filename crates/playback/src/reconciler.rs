//! Status reconciler.
//!
//! The audio module never reports "track finished". The reconciler infers it
//! from consecutive status polls: a `Playing` → `Idle` edge while the user has
//! not paused means the track ran out.

use platform::PlayerStatus;

use crate::command::PlayerCommand;
use crate::state::PlaybackState;

/// Outcome of one status observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Observation {
    /// Same status as last time.
    Steady,
    /// Status changed without completing a track.
    Changed(PlayerStatus),
    /// The current track played to its end.
    TrackCompleted,
}

/// Edge detector over polled module status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusReconciler {
    last: PlayerStatus,
}

impl StatusReconciler {
    /// Starts out assuming the module is idle.
    pub const fn new() -> Self {
        Self {
            last: PlayerStatus::Idle,
        }
    }

    /// Status seen at the previous poll.
    pub fn last_observed(&self) -> PlayerStatus {
        self.last
    }

    /// Record a fresh poll and classify the transition.
    ///
    /// An explicit pause suppresses completion even though the module then
    /// reports idle.
    pub fn observe(&mut self, status: PlayerStatus, is_paused: bool) -> Observation {
        let previous = core::mem::replace(&mut self.last, status);
        match (previous, status) {
            (a, b) if a == b => Observation::Steady,
            (PlayerStatus::Playing, PlayerStatus::Idle) if !is_paused => {
                Observation::TrackCompleted
            }
            _ => Observation::Changed(status),
        }
    }
}

/// What to play after the current track completes.
///
/// With repeat on, the same track again. Otherwise advance one track; at the
/// last track playback simply stops and `None` is returned.
pub fn after_completion(state: &mut PlaybackState) -> Option<PlayerCommand> {
    if state.repeat() {
        Some(PlayerCommand::Play(state.current_track()))
    } else {
        state.step_next().map(PlayerCommand::Play)
    }
}
