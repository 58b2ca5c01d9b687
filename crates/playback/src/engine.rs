//! Jukebox controller.
//!
//! `Jukebox` owns every piece of decision state (playback state, digit
//! prompt, shuffle playlist, command slot, status reconciler, deferred-action
//! table, debounce gate) together with the audio module and feedback sinks.
//!
//! It never reads a clock and never blocks. Callers hand it the current
//! [`Instant`] with every input event and wake it at [`Jukebox::next_deadline`]
//! to fire deferred actions; each call runs to completion before the next.
//! That makes the whole controller deterministic on the host: tests drive it
//! with `Instant::from_millis` and inspect the mock sinks afterwards.

use embassy_time::Instant;
use platform::{
    AudioModule, ConfigError, Feedback, InputEvent, JukeboxConfig, KeyEvent, Melody,
    PlayerStatus, Press, TrackId,
};

use crate::command::{CommandSlot, Dispatch, PlayerCommand};
use crate::keypad::{key_tone, DebounceGate, InputAccumulator, KeyAction, LONG_PRESS_TONE};
use crate::queue::EventQueue;
use crate::reconciler::{after_completion, Observation, StatusReconciler};
use crate::scheduler::{DeferredScheduler, TimerKind};
use crate::shuffle::ShufflePlaylist;
use crate::state::PlaybackState;

/// The keypad jukebox controller.
pub struct Jukebox<M, F> {
    config: JukeboxConfig,
    player: M,
    feedback: F,
    state: PlaybackState,
    prompt: InputAccumulator,
    shuffle: Option<ShufflePlaylist>,
    slot: CommandSlot,
    reconciler: StatusReconciler,
    timers: DeferredScheduler,
    debounce: DebounceGate,
    led_on: bool,
}

impl<M: AudioModule, F: Feedback> Jukebox<M, F> {
    /// Create a controller in its power-on state.
    ///
    /// Nothing is sent to the sinks until [`start`](Self::start).
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] from [`JukeboxConfig::validate`].
    pub fn new(config: JukeboxConfig, player: M, feedback: F) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            state: PlaybackState::new(config.track_count),
            debounce: DebounceGate::new(config.debounce),
            config,
            player,
            feedback,
            prompt: InputAccumulator::new(),
            shuffle: None,
            slot: CommandSlot::new(),
            reconciler: StatusReconciler::new(),
            timers: DeferredScheduler::new(),
            led_on: false,
        })
    }

    /// Power-on sequence.
    ///
    /// Lights the power indicator for its configured time, applies the
    /// initial volume, blinks once, and starts the command tick.
    pub fn start(&mut self, now: Instant) {
        info!(
            "jukebox starting: {} tracks, tick {} ms",
            self.config.track_count,
            self.config.command_tick.as_millis()
        );
        self.feedback.set_power_led(true);
        self.timers
            .schedule_once(TimerKind::PowerLedOff, now, self.config.power_on_indicator);

        if self.player.set_volume(self.config.initial_volume).is_err() {
            warn!("module rejected initial volume");
        }

        self.blink(now);
        self.timers
            .schedule_repeating(TimerKind::CommandTick, now, self.config.command_tick);
    }

    // ── Event intake ────────────────────────────────────────────────────────

    /// Process one input event received at `now`.
    pub fn handle(&mut self, event: InputEvent, now: Instant) {
        match event {
            InputEvent::Key(key) => self.handle_key(key, now),
            InputEvent::PlayButton => {
                debug!("play button");
                self.blink(now);
                self.play_current();
            }
            InputEvent::BatteryLow { millivolts } => {
                warn!("battery low: {} mV", millivolts);
                self.timers.schedule_repeating(
                    TimerKind::LowBatteryPulse,
                    now,
                    self.config.low_battery_pulse,
                );
            }
        }
    }

    fn handle_key(&mut self, event: KeyEvent, now: Instant) {
        match event.press {
            Press::Short => {
                if !self.debounce.accept(now) {
                    trace!("key {} bounced", event.code);
                    return;
                }
                self.blink(now);
                if let Some(note) = event.key().and_then(key_tone) {
                    self.feedback.tone(note, self.config.beep);
                }
            }
            Press::Long => {
                self.blink(now);
                self.feedback.tone(LONG_PRESS_TONE, self.config.beep);
            }
        }

        match KeyAction::decode(event) {
            Some(action) => self.apply(action, now),
            None => trace!("key {} has no action", event.code),
        }
    }

    fn apply(&mut self, action: KeyAction, now: Instant) {
        match action {
            KeyAction::Digit(digit) => self.type_digit(digit, now),
            KeyAction::Previous => self.prev_track(),
            KeyAction::Next => self.next_track(),
            KeyAction::Random => self.random_track(now),
            KeyAction::VolumeUp => self.request(PlayerCommand::VolumeUp),
            KeyAction::VolumeDown => self.request(PlayerCommand::VolumeDown),
            KeyAction::ToggleRepeat => self.toggle_repeat(),
            KeyAction::TogglePause => self.toggle_pause(),
            KeyAction::CycleEq => self.next_eq_preset(),
        }
    }

    /// Fire due deferred actions, then drain `queue` in arrival order.
    pub fn step(&mut self, queue: &mut EventQueue, now: Instant) {
        self.poll(now);
        while let Some(event) = queue.pop() {
            self.handle(event, now);
        }
    }

    // ── Digit entry ─────────────────────────────────────────────────────────

    /// Append `digit` to the track number being typed.
    ///
    /// Every digit pushes the abandon deadline out by a full input timeout.
    /// A prompt that names a valid track becomes current at once, and its
    /// PLAY is deferred until the keypad has been quiet for the same timeout;
    /// later valid digits replace that pending PLAY.
    pub fn type_digit(&mut self, digit: u8, now: Instant) {
        let timeout = self.config.input_timeout;
        self.timers
            .schedule_once(TimerKind::AbandonEntry, now, timeout);

        let value = self.prompt.push_digit(digit);
        debug!("prompt {}", value);

        if value == self.config.celebration_code {
            self.feedback.melody(Melody::Victory);
        }

        if let Ok(track) = TrackId::in_range(value, self.config.track_count) {
            self.state.set_current_track(track);
            self.timers.schedule_once(TimerKind::CommitPlay, now, timeout);
        }
    }

    // ── Playback advancement ────────────────────────────────────────────────

    /// Request PLAY of the current track.
    pub fn play_current(&mut self) {
        self.request(PlayerCommand::Play(self.state.current_track()));
    }

    /// Move to the next track and play it. No-op at the last track.
    pub fn next_track(&mut self) {
        match self.state.step_next() {
            Some(track) => self.request(PlayerCommand::Play(track)),
            None => debug!("already at last track"),
        }
    }

    /// Move to the previous track and play it. No-op at track 1.
    pub fn prev_track(&mut self) {
        match self.state.step_previous() {
            Some(track) => self.request(PlayerCommand::Play(track)),
            None => debug!("already at first track"),
        }
    }

    /// Play the next track of the shuffle.
    ///
    /// The playlist is built on first use, seeded from `now`.
    pub fn random_track(&mut self, now: Instant) {
        let track_count = self.config.track_count;
        let playlist = self
            .shuffle
            .get_or_insert_with(|| ShufflePlaylist::new(track_count, now.as_micros()));
        if let Some(track) = playlist.draw() {
            debug!("random track {}, cursor {}", track.get(), playlist.cursor());
            self.state.set_current_track(track);
            self.request(PlayerCommand::Play(track));
        }
    }

    /// Flip repeat; the cue rises when it turns on and falls when it turns off.
    pub fn toggle_repeat(&mut self) {
        let repeat = self.state.toggle_repeat();
        info!("repeat {}", repeat);
        self.feedback
            .melody(if repeat { Melody::Positive } else { Melody::Negative });
    }

    /// Request PAUSE or RESUME, whichever undoes the current pause flag.
    pub fn toggle_pause(&mut self) {
        let command = if self.state.toggle_pause() {
            PlayerCommand::Pause
        } else {
            PlayerCommand::Resume
        };
        self.request(command);
    }

    /// Advance the equaliser preset and request it.
    pub fn next_eq_preset(&mut self) {
        let preset = self.state.cycle_eq();
        info!("eq preset {}", preset.name());
        self.request(PlayerCommand::SetEq(preset));
    }

    /// Put `command` in the slot, replacing anything not yet sent.
    pub fn request(&mut self, command: PlayerCommand) {
        if let Some(replaced) = self.slot.request(command) {
            debug!("{} replaced unsent {}", command.as_str(), replaced.as_str());
        }
    }

    // ── Deferred actions ────────────────────────────────────────────────────

    /// Fire every deferred action due at `now`, earliest first.
    pub fn poll(&mut self, now: Instant) {
        while let Some(kind) = self.timers.pop_due(now) {
            trace!("timer {}", kind.as_str());
            self.fire(kind);
        }
    }

    fn fire(&mut self, kind: TimerKind) {
        match kind {
            TimerKind::AbandonEntry => self.prompt.clear(),
            TimerKind::CommitPlay => self.play_current(),
            TimerKind::BlinkOff => self.set_led(false),
            TimerKind::PowerLedOff => self.feedback.set_power_led(false),
            TimerKind::CommandTick => self.command_tick(),
            TimerKind::LowBatteryPulse => self.set_led(!self.led_on),
        }
    }

    fn command_tick(&mut self) {
        match self.slot.drain() {
            Dispatch::Command(command) => {
                if let PlayerCommand::Play(track) = command {
                    info!("playing track {}", track.get());
                }
                if command.send(&mut self.player).is_err() {
                    warn!("module rejected {}", command.as_str());
                }
            }
            Dispatch::PollStatus => match self.player.status() {
                Ok(status) => self.reconcile(status),
                Err(_) => warn!("module status unreadable"),
            },
        }
    }

    fn reconcile(&mut self, status: PlayerStatus) {
        match self.reconciler.observe(status, self.state.is_paused()) {
            Observation::Steady => {}
            Observation::Changed(status) => debug!("module {}", status.as_str()),
            Observation::TrackCompleted => {
                info!("track {} completed", self.state.current_track().get());
                match after_completion(&mut self.state) {
                    Some(command) => self.request(command),
                    None => info!("end of tracks"),
                }
            }
        }
    }

    fn blink(&mut self, now: Instant) {
        self.set_led(true);
        self.timers
            .schedule_once(TimerKind::BlinkOff, now, self.config.blink);
    }

    fn set_led(&mut self, on: bool) {
        self.led_on = on;
        self.feedback.set_led(on);
    }

    // ── Accessors ───────────────────────────────────────────────────────────

    /// Earliest deadline among armed deferred actions; sleep until then.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Playback state.
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Digits typed so far.
    pub fn prompt_value(&self) -> u32 {
        self.prompt.value()
    }

    /// Command the next tick will send.
    pub fn pending_command(&self) -> Option<PlayerCommand> {
        self.slot.pending()
    }

    /// Shuffle playlist, once a random track has been requested.
    pub fn shuffle(&self) -> Option<&ShufflePlaylist> {
        self.shuffle.as_ref()
    }

    /// Status seen at the last successful poll.
    pub fn last_observed_status(&self) -> PlayerStatus {
        self.reconciler.last_observed()
    }

    /// Deferred-action table.
    pub fn timers(&self) -> &DeferredScheduler {
        &self.timers
    }

    /// Validated configuration.
    pub fn config(&self) -> &JukeboxConfig {
        &self.config
    }

    /// The audio module.
    pub fn player(&self) -> &M {
        &self.player
    }

    /// The audio module, mutably.
    pub fn player_mut(&mut self) -> &mut M {
        &mut self.player
    }

    /// The feedback sink.
    pub fn feedback(&self) -> &F {
        &self.feedback
    }

    /// The feedback sink, mutably.
    pub fn feedback_mut(&mut self) -> &mut F {
        &mut self.feedback
    }
}
