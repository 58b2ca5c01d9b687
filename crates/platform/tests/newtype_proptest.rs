//! Property-based tests for the audio-module newtypes.
//! Verifies invariants hold for ALL inputs, not just fixed examples.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects, clippy::indexing_slicing)]

use platform::audio_types::{EqPreset, TrackId, Volume};

proptest::proptest! {
    /// Volume::new never panics for any u8 input (clamps to 30).
    #[test]
    fn volume_new_never_exceeds_max(level in 0u8..=255u8) {
        let v = Volume::new(level);
        assert!(v.get() <= Volume::MAX);
    }

    /// TrackId::in_range accepts exactly 1..=track_count.
    #[test]
    fn track_id_in_range_matches_bounds(value in 0u32..=70_000u32, count in 1u16..=3000u16) {
        let ok = TrackId::in_range(value, count).is_ok();
        assert_eq!(ok, value >= 1 && value <= u32::from(count),
            "value {} count {}", value, count);
    }

    /// succ and pred are inverse wherever both are defined.
    #[test]
    fn track_id_succ_pred_inverse(n in 1u16..=2999u16, count in 1u16..=3000u16) {
        let id = TrackId::new(n).unwrap();
        if let Some(next) = id.succ(count) {
            assert_eq!(next.pred(), Some(id));
            assert!(next.get() <= count);
        }
    }

    /// Six steps of EqPreset::next always return to the start.
    #[test]
    fn eq_preset_cycle_length_is_six(start in 0u8..=5u8) {
        let first = EqPreset::try_new(start).unwrap();
        let mut p = first;
        for _ in 0..EqPreset::COUNT {
            p = p.next();
            assert!(p.get() <= EqPreset::MAX);
        }
        assert_eq!(p, first);
    }
}
