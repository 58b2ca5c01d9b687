//! Property-based tests for the controller's timing and clamping guarantees.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects, clippy::indexing_slicing)]

use embassy_time::Instant;
use platform::mocks::{MockAudioModule, MockFeedback};
use platform::{JukeboxConfig, TrackId};
use playback::shuffle::ShufflePlaylist;
use playback::Jukebox;
use proptest::prelude::*;

type TestJukebox = Jukebox<MockAudioModule, MockFeedback>;

fn started(config: JukeboxConfig) -> TestJukebox {
    let mut jb = Jukebox::new(config, MockAudioModule::new(), MockFeedback::new()).unwrap();
    jb.start(Instant::from_millis(0));
    jb.player_mut().clear();
    jb
}

proptest! {
    /// A run of digits with every gap inside the timeout produces exactly one
    /// PLAY, for the last in-range prompt value, no earlier than one timeout
    /// after the digit that set it.
    #[test]
    fn digit_run_plays_once(
        digits in proptest::collection::vec(0u8..=9, 1..6),
        gaps in proptest::collection::vec(0u64..999, 6),
    ) {
        let mut jb = started(JukeboxConfig::default().debounce_ms(0));
        let mut now = 10u64;
        let mut value = 0u32;
        let mut expected: Option<(u16, u64)> = None;
        for (digit, gap) in digits.iter().zip(&gaps) {
            jb.type_digit(*digit, Instant::from_millis(now));
            value = value * 10 + u32::from(*digit);
            if (1..=999).contains(&value) {
                expected = Some((value as u16, now + 1000));
            }
            now += gap;
        }

        let mut commit_seen_at = None;
        for ms in 10..now + 3000 {
            jb.poll(Instant::from_millis(ms));
            let committed = jb.pending_command().is_some() || jb.player().played().next().is_some();
            if commit_seen_at.is_none() && committed {
                commit_seen_at = Some(ms);
            }
        }

        let played: Vec<u16> = jb.player().played().collect();
        match expected {
            Some((track, due)) => {
                prop_assert_eq!(played, vec![track]);
                prop_assert_eq!(commit_seen_at, Some(due));
            }
            None => prop_assert!(played.is_empty()),
        }
    }

    /// Any number of next/previous steps keeps the current track in 1..=N.
    #[test]
    fn next_prev_stay_in_range(
        n in 1u16..50,
        steps in proptest::collection::vec(any::<bool>(), 0..120),
    ) {
        let mut jb = started(JukeboxConfig::default().track_count(n));
        for forward in steps {
            let before = jb.state().current_track().get();
            if forward { jb.next_track() } else { jb.prev_track() }
            let after = jb.state().current_track().get();
            prop_assert!((1..=n).contains(&after));
            prop_assert!(after.abs_diff(before) <= 1);
        }
    }

    /// N draws from a fresh playlist visit every track exactly once.
    #[test]
    fn shuffle_round_is_permutation(n in 1u16..400, seed in any::<u64>()) {
        let mut playlist = ShufflePlaylist::new(n, seed);
        let mut drawn: Vec<u16> = (0..n)
            .map(|_| playlist.draw().map(TrackId::get).unwrap())
            .collect();
        drawn.sort_unstable();
        prop_assert_eq!(drawn, (1..=n).collect::<Vec<_>>());
    }
}
