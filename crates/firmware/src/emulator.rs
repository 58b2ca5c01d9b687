//! Desktop stand-ins for the audio module and the feedback hardware.
//!
//! [`SimulatedPlayer`] pretends every track lasts a fixed time, so the status
//! reconciler sees tracks finish and auto-advance works on a laptop.
//! [`ConsoleFeedback`] logs LED and buzzer cues through `tracing`.
//! [`map_char`] turns terminal keys into keypad events.

use core::convert::Infallible;

use embassy_time::{Duration, Instant};
use platform::{
    AudioModule, EqPreset, Feedback, InputEvent, Key, KeyEvent, Melody, Note, PlayerStatus,
    TrackId, Volume,
};

/// Battery reading reported by the `L` key.
pub const SIMULATED_LOW_BATTERY_MV: u16 = 3300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transport {
    Idle,
    Playing { track: TrackId, ends: Instant },
    Paused { track: TrackId, left: Duration },
}

/// Audio module simulation with a fixed track length.
pub struct SimulatedPlayer {
    track_length: Duration,
    transport: Transport,
    volume: Volume,
    eq: EqPreset,
    clock: fn() -> Instant,
}

impl SimulatedPlayer {
    /// Every track plays for `track_length`, timed by the system clock.
    pub fn new(track_length: Duration) -> Self {
        Self::with_clock(track_length, Instant::now)
    }

    /// Like [`new`](Self::new) but reads time from `clock`.
    pub fn with_clock(track_length: Duration, clock: fn() -> Instant) -> Self {
        Self {
            track_length,
            transport: Transport::Idle,
            volume: Volume::new(0),
            eq: EqPreset::default(),
            clock,
        }
    }

    /// Track currently loaded, playing or paused.
    pub fn track(&self) -> Option<TrackId> {
        match self.transport {
            Transport::Idle => None,
            Transport::Playing { track, .. } | Transport::Paused { track, .. } => Some(track),
        }
    }

    /// Current volume.
    pub fn volume(&self) -> Volume {
        self.volume
    }

    /// Current equaliser preset.
    pub fn eq(&self) -> EqPreset {
        self.eq
    }

    fn settle(&mut self) {
        if let Transport::Playing { ends, .. } = self.transport {
            if (self.clock)() >= ends {
                self.transport = Transport::Idle;
            }
        }
    }
}

impl AudioModule for SimulatedPlayer {
    type Error = Infallible;

    fn play(&mut self, track: TrackId) -> Result<(), Self::Error> {
        let now = (self.clock)();
        tracing::info!(track = track.get(), "module: play");
        self.transport = Transport::Playing {
            track,
            ends: now.checked_add(self.track_length).unwrap_or(Instant::MAX),
        };
        Ok(())
    }

    fn pause(&mut self) -> Result<(), Self::Error> {
        self.settle();
        if let Transport::Playing { track, ends } = self.transport {
            let left = ends.saturating_duration_since((self.clock)());
            self.transport = Transport::Paused { track, left };
        }
        tracing::info!("module: pause");
        Ok(())
    }

    fn resume(&mut self) -> Result<(), Self::Error> {
        if let Transport::Paused { track, left } = self.transport {
            let ends = (self.clock)().checked_add(left).unwrap_or(Instant::MAX);
            self.transport = Transport::Playing { track, ends };
        }
        tracing::info!("module: resume");
        Ok(())
    }

    fn volume_up(&mut self) -> Result<(), Self::Error> {
        self.volume = Volume::new(self.volume.get().saturating_add(1));
        tracing::info!(volume = self.volume.get(), "module: volume up");
        Ok(())
    }

    fn volume_down(&mut self) -> Result<(), Self::Error> {
        self.volume = Volume::new(self.volume.get().saturating_sub(1));
        tracing::info!(volume = self.volume.get(), "module: volume down");
        Ok(())
    }

    fn set_volume(&mut self, volume: Volume) -> Result<(), Self::Error> {
        self.volume = volume;
        tracing::info!(volume = volume.get(), "module: set volume");
        Ok(())
    }

    fn set_eq(&mut self, preset: EqPreset) -> Result<(), Self::Error> {
        self.eq = preset;
        tracing::info!(preset = preset.name(), "module: set eq");
        Ok(())
    }

    fn status(&mut self) -> Result<PlayerStatus, Self::Error> {
        self.settle();
        Ok(match self.transport {
            Transport::Playing { .. } => PlayerStatus::Playing,
            Transport::Idle | Transport::Paused { .. } => PlayerStatus::Idle,
        })
    }
}

/// Feedback sink that logs every cue.
#[derive(Debug, Default)]
pub struct ConsoleFeedback {
    led: bool,
    power_led: bool,
}

impl ConsoleFeedback {
    /// Both LEDs off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feedback LED level.
    pub fn led(&self) -> bool {
        self.led
    }

    /// Power LED level.
    pub fn power_led(&self) -> bool {
        self.power_led
    }
}

impl Feedback for ConsoleFeedback {
    fn set_led(&mut self, on: bool) {
        self.led = on;
        tracing::trace!(on, "led");
    }

    fn set_power_led(&mut self, on: bool) {
        self.power_led = on;
        tracing::debug!(on, "power led");
    }

    fn tone(&mut self, note: Note, duration: Duration) {
        tracing::debug!(
            hz = note.frequency_hz(),
            ms = duration.as_millis(),
            "beep"
        );
    }

    fn melody(&mut self, cue: Melody) {
        tracing::info!(cue = cue.as_str(), "melody");
    }
}

/// Map a terminal character to an input event.
///
/// | char    | event                       |
/// |---------|-----------------------------|
/// | `0`-`9` | digit key                   |
/// | `*`     | previous track              |
/// | `#`     | next track                  |
/// | `r`     | random track                |
/// | `+`/`-` | volume up / down            |
/// | `R`     | toggle repeat               |
/// | `p`     | toggle pause                |
/// | `e`     | long press of `0` (EQ)      |
/// | `b`     | play button                 |
/// | `L`     | battery low                 |
pub fn map_char(c: char) -> Option<InputEvent> {
    let short = |key: Key| key.code().map(|code| InputEvent::Key(KeyEvent::short(code)));
    match c {
        '0'..='9' => c
            .to_digit(10)
            .and_then(|d| u8::try_from(d).ok())
            .and_then(|d| short(Key::Digit(d))),
        '*' => short(Key::Previous),
        '#' => short(Key::Next),
        'r' => short(Key::Random),
        '+' => short(Key::VolumeUp),
        '-' => short(Key::VolumeDown),
        'R' => short(Key::Repeat),
        'p' => short(Key::Pause),
        'e' => Some(InputEvent::Key(KeyEvent::long(Key::EQ_KEY_CODE))),
        'b' => Some(InputEvent::PlayButton),
        'L' => Some(InputEvent::BatteryLow {
            millivolts: SIMULATED_LOW_BATTERY_MV,
        }),
        _ => None,
    }
}
