//! Mock implementations for testing
//!
//! This module provides recording implementations of the platform traits
//! for use in unit and integration tests.

#![cfg(any(test, feature = "std"))]

use embassy_time::Duration;

use crate::*;

/// Capacity of each mock's call log; later calls are dropped.
pub const LOG_CAPACITY: usize = 256;

/// A call received by [`MockAudioModule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleCall {
    /// `play(track)`
    Play(TrackId),
    /// `pause()`
    Pause,
    /// `resume()`
    Resume,
    /// `volume_up()`
    VolumeUp,
    /// `volume_down()`
    VolumeDown,
    /// `set_volume(volume)`
    SetVolume(Volume),
    /// `set_eq(preset)`
    SetEq(EqPreset),
}

/// Error produced by the mock module when told to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockModuleError;

/// Mock audio module
///
/// Records every command; status polls are only counted. `status()` answers
/// from a script queued with [`MockAudioModule::push_status`], falling back
/// to a sticky default.
pub struct MockAudioModule {
    calls: heapless::Vec<ModuleCall, LOG_CAPACITY>,
    status_polls: usize,
    script: heapless::Deque<Result<PlayerStatus, MockModuleError>, 16>,
    default_status: PlayerStatus,
    fail_commands: bool,
}

impl MockAudioModule {
    /// Create new mock module reporting `Idle`
    pub fn new() -> Self {
        Self {
            calls: heapless::Vec::new(),
            status_polls: 0,
            script: heapless::Deque::new(),
            default_status: PlayerStatus::Idle,
            fail_commands: false,
        }
    }

    /// Queue one answer for the next `status()` call
    pub fn push_status(
        &mut self,
        status: Result<PlayerStatus, MockModuleError>,
    ) -> Result<(), Result<PlayerStatus, MockModuleError>> {
        self.script.push_back(status)
    }

    /// Answer every unscripted `status()` call with `status`
    pub fn set_default_status(&mut self, status: PlayerStatus) {
        self.default_status = status;
    }

    /// Make every command (not `status`) return an error
    pub fn fail_commands(&mut self, fail: bool) {
        self.fail_commands = fail;
    }

    /// All commands received so far
    pub fn calls(&self) -> &[ModuleCall] {
        &self.calls
    }

    /// Number of `status()` calls received so far
    pub fn status_polls(&self) -> usize {
        self.status_polls
    }

    /// Tracks passed to `play()`, in order
    pub fn played(&self) -> impl Iterator<Item = u16> + '_ {
        self.calls.iter().filter_map(|c| match c {
            ModuleCall::Play(t) => Some(t.get()),
            _ => None,
        })
    }

    /// Forget recorded calls and polls
    pub fn clear(&mut self) {
        self.calls.clear();
        self.status_polls = 0;
    }

    fn record(&mut self, call: ModuleCall) -> Result<(), MockModuleError> {
        let _ = self.calls.push(call);
        if self.fail_commands {
            Err(MockModuleError)
        } else {
            Ok(())
        }
    }
}

impl Default for MockAudioModule {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioModule for MockAudioModule {
    type Error = MockModuleError;

    fn play(&mut self, track: TrackId) -> Result<(), Self::Error> {
        self.record(ModuleCall::Play(track))
    }

    fn pause(&mut self) -> Result<(), Self::Error> {
        self.record(ModuleCall::Pause)
    }

    fn resume(&mut self) -> Result<(), Self::Error> {
        self.record(ModuleCall::Resume)
    }

    fn volume_up(&mut self) -> Result<(), Self::Error> {
        self.record(ModuleCall::VolumeUp)
    }

    fn volume_down(&mut self) -> Result<(), Self::Error> {
        self.record(ModuleCall::VolumeDown)
    }

    fn set_volume(&mut self, volume: Volume) -> Result<(), Self::Error> {
        self.record(ModuleCall::SetVolume(volume))
    }

    fn set_eq(&mut self, preset: EqPreset) -> Result<(), Self::Error> {
        self.record(ModuleCall::SetEq(preset))
    }

    fn status(&mut self) -> Result<PlayerStatus, Self::Error> {
        self.status_polls = self.status_polls.saturating_add(1);
        self.script.pop_front().unwrap_or(Ok(self.default_status))
    }
}

/// A call received by [`MockFeedback`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackCall {
    /// `set_led(on)`
    Led(bool),
    /// `set_power_led(on)`
    PowerLed(bool),
    /// `tone(note, duration)`
    Tone(Note, Duration),
    /// `melody(cue)`
    Melody(Melody),
}

/// Mock feedback sink
pub struct MockFeedback {
    calls: heapless::Vec<FeedbackCall, LOG_CAPACITY>,
    led: bool,
    power_led: bool,
}

impl MockFeedback {
    /// Create new mock feedback sink with both LEDs off
    pub fn new() -> Self {
        Self {
            calls: heapless::Vec::new(),
            led: false,
            power_led: false,
        }
    }

    /// Current feedback LED level
    pub fn led(&self) -> bool {
        self.led
    }

    /// Current power LED level
    pub fn power_led(&self) -> bool {
        self.power_led
    }

    /// All calls received so far
    pub fn calls(&self) -> &[FeedbackCall] {
        &self.calls
    }

    /// Melodies played, in order
    pub fn melodies(&self) -> impl Iterator<Item = Melody> + '_ {
        self.calls.iter().filter_map(|c| match c {
            FeedbackCall::Melody(m) => Some(*m),
            _ => None,
        })
    }

    /// Notes sounded with `tone()`, in order
    pub fn tones(&self) -> impl Iterator<Item = Note> + '_ {
        self.calls.iter().filter_map(|c| match c {
            FeedbackCall::Tone(n, _) => Some(*n),
            _ => None,
        })
    }

    /// Forget recorded calls
    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl Default for MockFeedback {
    fn default() -> Self {
        Self::new()
    }
}

impl Feedback for MockFeedback {
    fn set_led(&mut self, on: bool) {
        self.led = on;
        let _ = self.calls.push(FeedbackCall::Led(on));
    }

    fn set_power_led(&mut self, on: bool) {
        self.power_led = on;
        let _ = self.calls.push(FeedbackCall::PowerLed(on));
    }

    fn tone(&mut self, note: Note, duration: Duration) {
        let _ = self.calls.push(FeedbackCall::Tone(note, duration));
    }

    fn melody(&mut self, cue: Melody) {
        let _ = self.calls.push(FeedbackCall::Melody(cue));
    }
}
