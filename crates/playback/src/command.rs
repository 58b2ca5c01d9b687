//! Command slot and dispatcher.
//!
//! The audio module accepts one command at a time and never acknowledges, so
//! the controller keeps a single mailbox: the latest request wins, and each
//! command tick drains at most one command. A tick that finds the slot empty
//! polls the module's status instead.

use platform::{AudioModule, EqPreset, TrackId};

/// A command for the audio module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlayerCommand {
    /// Start `TrackId` from the beginning.
    Play(TrackId),
    /// Pause the current track.
    Pause,
    /// Resume after a pause.
    Resume,
    /// One volume step up.
    VolumeUp,
    /// One volume step down.
    VolumeDown,
    /// Select an equaliser preset.
    SetEq(EqPreset),
}

impl PlayerCommand {
    /// Send this command to `module`.
    pub fn send<M: AudioModule>(self, module: &mut M) -> Result<(), M::Error> {
        match self {
            Self::Play(track) => module.play(track),
            Self::Pause => module.pause(),
            Self::Resume => module.resume(),
            Self::VolumeUp => module.volume_up(),
            Self::VolumeDown => module.volume_down(),
            Self::SetEq(preset) => module.set_eq(preset),
        }
    }

    /// Command name for log lines.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Play(_) => "play",
            Self::Pause => "pause",
            Self::Resume => "resume",
            Self::VolumeUp => "volume-up",
            Self::VolumeDown => "volume-down",
            Self::SetEq(_) => "set-eq",
        }
    }
}

/// What one command tick does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Dispatch {
    /// Send the pending command.
    Command(PlayerCommand),
    /// Nothing pending: ask the module for its status.
    PollStatus,
}

/// Single-capacity, last-write-wins command mailbox.
///
/// ```
/// use platform::TrackId;
/// use playback::command::{CommandSlot, Dispatch, PlayerCommand};
///
/// let mut slot = CommandSlot::new();
/// slot.request(PlayerCommand::VolumeUp);
/// slot.request(PlayerCommand::Play(TrackId::FIRST));
///
/// assert_eq!(slot.drain(), Dispatch::Command(PlayerCommand::Play(TrackId::FIRST)));
/// assert_eq!(slot.drain(), Dispatch::PollStatus);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CommandSlot {
    pending: Option<PlayerCommand>,
}

impl CommandSlot {
    /// An empty slot.
    pub const fn new() -> Self {
        Self { pending: None }
    }

    /// Store `command`, returning any unconsumed command it replaced.
    pub fn request(&mut self, command: PlayerCommand) -> Option<PlayerCommand> {
        self.pending.replace(command)
    }

    /// The command the next tick will send, if any.
    pub fn pending(&self) -> Option<PlayerCommand> {
        self.pending
    }

    /// Take the pending command for this tick, leaving the slot empty.
    pub fn drain(&mut self) -> Dispatch {
        self.pending
            .take()
            .map_or(Dispatch::PollStatus, Dispatch::Command)
    }
}
