//! End-to-end keypad scenarios on a fake clock.
//!
//! Each test feeds key events and status replies into a `Jukebox` wired to the
//! recording mocks, advances time by hand, and checks exactly which commands
//! reached the audio module.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects, clippy::indexing_slicing)]

use embassy_time::Instant;
use platform::mocks::{MockAudioModule, MockFeedback, ModuleCall};
use platform::{EqPreset, InputEvent, JukeboxConfig, Key, KeyEvent, PlayerStatus, TrackId};
use playback::{EventQueue, Jukebox, PlayerCommand};

type TestJukebox = Jukebox<MockAudioModule, MockFeedback>;

const TICK_MS: u64 = 350;

/// A started jukebox whose start-up volume command has been cleared.
fn started(config: JukeboxConfig) -> TestJukebox {
    let mut jb = Jukebox::new(config, MockAudioModule::new(), MockFeedback::new())
        .expect("test config is valid");
    jb.start(Instant::from_millis(0));
    jb.player_mut().clear();
    jb
}

fn press(jb: &mut TestJukebox, key: Key, ms: u64) {
    let code = key.code().expect("wired key");
    jb.handle(InputEvent::Key(KeyEvent::short(code)), Instant::from_millis(ms));
}

fn long_press(jb: &mut TestJukebox, key: Key, ms: u64) {
    let code = key.code().expect("wired key");
    jb.handle(InputEvent::Key(KeyEvent::long(code)), Instant::from_millis(ms));
}

/// Fire every deferred action up to and including `until_ms`, one
/// millisecond at a time so each timer fires at its own deadline.
fn run_until(jb: &mut TestJukebox, from_ms: u64, until_ms: u64) {
    for ms in from_ms..=until_ms {
        jb.poll(Instant::from_millis(ms));
    }
}

fn played(jb: &TestJukebox) -> Vec<u16> {
    jb.player().played().collect()
}

fn track(n: u16) -> TrackId {
    TrackId::new(n).unwrap()
}

#[test]
fn single_digit_plays_after_full_timeout() {
    let mut jb = started(JukeboxConfig::default());
    press(&mut jb, Key::Digit(5), 10);

    // Commit fires at 1010; the tick at 1050 sends it.
    run_until(&mut jb, 10, 1049);
    assert!(played(&jb).is_empty());
    assert_eq!(jb.pending_command(), Some(PlayerCommand::Play(track(5))));

    run_until(&mut jb, 1050, 3000);
    assert_eq!(jb.state().current_track(), track(5));
    assert_eq!(played(&jb), [5]);
}

#[test]
fn two_digits_play_once_for_final_value() {
    let mut jb = started(JukeboxConfig::default());
    press(&mut jb, Key::Digit(5), 10);
    run_until(&mut jb, 10, 600);
    press(&mut jb, Key::Digit(0), 600);
    run_until(&mut jb, 600, 4000);

    assert_eq!(jb.state().current_track(), track(50));
    assert_eq!(played(&jb), [50], "no PLAY(5) may escape");
}

#[test]
fn digit_gap_longer_than_timeout_starts_new_entry() {
    let mut jb = started(JukeboxConfig::default());
    press(&mut jb, Key::Digit(3), 10);
    run_until(&mut jb, 10, 1500);
    press(&mut jb, Key::Digit(4), 1500);
    run_until(&mut jb, 1500, 4000);

    assert_eq!(played(&jb), [3, 4]);
}

#[test]
fn prompt_beyond_track_count_keeps_last_valid_commit() {
    let mut jb = started(JukeboxConfig::default().debounce_ms(0));
    for (i, digit) in [5, 0, 0, 0].into_iter().enumerate() {
        press(&mut jb, Key::Digit(digit), 10 + i as u64 * 100);
    }
    assert_eq!(jb.prompt_value(), 5000);
    run_until(&mut jb, 10, 4000);

    assert_eq!(jb.state().current_track(), track(500));
    assert_eq!(played(&jb), [500]);
    assert_eq!(jb.prompt_value(), 0);
}

#[test]
fn eq_long_press_cycles_presets() {
    let mut jb = started(JukeboxConfig::default());
    let mut seen = Vec::new();
    for i in 0..7 {
        let now = 10 + i * 1000;
        long_press(&mut jb, Key::Digit(0), now);
        seen.push(jb.state().eq_preset().get());
        run_until(&mut jb, now, now + 999);
    }
    assert_eq!(seen, [1, 2, 3, 4, 5, 0, 1]);

    let sent: Vec<u8> = jb
        .player()
        .calls()
        .iter()
        .filter_map(|c| match c {
            ModuleCall::SetEq(p) => Some(p.get()),
            _ => None,
        })
        .collect();
    assert_eq!(sent, [1, 2, 3, 4, 5, 0, 1]);
}

#[test]
fn completion_advances_to_next_track() {
    let mut jb = started(JukeboxConfig::default());
    press(&mut jb, Key::Digit(1), 10);
    run_until(&mut jb, 10, 100);
    press(&mut jb, Key::Digit(0), 300);
    run_until(&mut jb, 100, 1400);
    assert_eq!(played(&jb), [10]);

    jb.player_mut().set_default_status(PlayerStatus::Playing);
    run_until(&mut jb, 1401, 1750);
    jb.player_mut().set_default_status(PlayerStatus::Idle);
    run_until(&mut jb, 1751, 2100);

    assert_eq!(jb.state().current_track(), track(11));
    assert_eq!(jb.pending_command(), Some(PlayerCommand::Play(track(11))));
    run_until(&mut jb, 2101, 2450);
    assert_eq!(played(&jb), [10, 11]);
}

#[test]
fn completion_with_repeat_replays_same_track() {
    let mut jb = started(JukeboxConfig::default());
    press(&mut jb, Key::Digit(7), 10);
    run_until(&mut jb, 10, 1400);
    press(&mut jb, Key::Repeat, 1400);
    assert!(jb.state().repeat());

    jb.player_mut().set_default_status(PlayerStatus::Playing);
    run_until(&mut jb, 1400, 1750);
    jb.player_mut().set_default_status(PlayerStatus::Idle);
    run_until(&mut jb, 1751, 2450);

    assert_eq!(played(&jb), [7, 7]);
    assert_eq!(jb.state().current_track(), track(7));
}

#[test]
fn completion_at_last_track_stops() {
    let mut jb = started(JukeboxConfig::default().track_count(3));
    press(&mut jb, Key::Digit(3), 10);
    run_until(&mut jb, 10, 1400);

    jb.player_mut().set_default_status(PlayerStatus::Playing);
    run_until(&mut jb, 1401, 1750);
    jb.player_mut().set_default_status(PlayerStatus::Idle);
    run_until(&mut jb, 1751, 3000);

    assert_eq!(played(&jb), [3]);
    assert_eq!(jb.state().current_track(), track(3));
}

#[test]
fn pause_suppresses_completion() {
    let mut jb = started(JukeboxConfig::default());
    jb.player_mut().set_default_status(PlayerStatus::Playing);
    run_until(&mut jb, 1, TICK_MS);

    press(&mut jb, Key::Pause, 400);
    run_until(&mut jb, 400, 700);
    assert_eq!(jb.player().calls(), &[ModuleCall::Pause]);

    jb.player_mut().set_default_status(PlayerStatus::Idle);
    run_until(&mut jb, 701, 2000);
    assert!(played(&jb).is_empty());
    assert_eq!(jb.pending_command(), None);
}

#[test]
fn previous_and_next_clamp_and_clear_repeat() {
    let mut jb = started(JukeboxConfig::default().track_count(2));
    press(&mut jb, Key::Previous, 10);
    assert_eq!(jb.pending_command(), None, "no movement below track 1");

    press(&mut jb, Key::Repeat, 300);
    press(&mut jb, Key::Next, 600);
    assert_eq!(jb.state().current_track(), track(2));
    assert!(!jb.state().repeat());

    run_until(&mut jb, 10, 1000);
    press(&mut jb, Key::Next, 1000);
    assert_eq!(jb.pending_command(), None, "no movement past the last track");
    assert_eq!(played(&jb), [2]);
}

#[test]
fn last_request_wins_within_one_tick() {
    let mut jb = started(JukeboxConfig::default().debounce_ms(0));
    press(&mut jb, Key::VolumeUp, 10);
    press(&mut jb, Key::VolumeDown, 20);
    press(&mut jb, Key::VolumeDown, 30);
    run_until(&mut jb, 10, TICK_MS);

    assert_eq!(jb.player().calls(), &[ModuleCall::VolumeDown]);
}

#[test]
fn random_track_walks_a_permutation() {
    let n = 12u16;
    let mut jb = started(JukeboxConfig::default().track_count(n));
    let mut drawn = Vec::new();
    for i in 0..u64::from(n) {
        jb.random_track(Instant::from_millis(10 + i));
        drawn.push(jb.state().current_track().get());
    }
    drawn.sort_unstable();
    assert_eq!(drawn, (1..=n).collect::<Vec<_>>());
    assert_eq!(jb.shuffle().map(|s| s.cursor()), Some(1));
}

#[test]
fn queued_events_are_handled_in_order() {
    let mut jb = started(JukeboxConfig::default().debounce_ms(0));
    let mut queue = EventQueue::new();
    for digit in [4, 2] {
        let code = Key::Digit(digit).code().unwrap();
        queue.push(InputEvent::Key(KeyEvent::short(code))).unwrap();
    }
    jb.step(&mut queue, Instant::from_millis(10));
    assert!(queue.is_empty());
    assert_eq!(jb.prompt_value(), 42);

    run_until(&mut jb, 11, 1400);
    assert_eq!(played(&jb), [42]);
    assert_eq!(jb.state().eq_preset(), EqPreset::default());
}
