//! Shuffle playlist.
//!
//! A permutation of every track id plus a cursor. Each draw takes the id under
//! the cursor; once the cursor passes the last id the permutation is
//! reshuffled and the cursor starts over. Over any N consecutive draws that do
//! not straddle a reshuffle every track plays exactly once.
//!
//! Consecutive permutations are independent, so the last track of one round
//! may open the next.

use heapless::Vec;
use platform::config::MAX_TRACKS;
use platform::TrackId;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Randomised play order with a cursor.
#[derive(Debug, Clone)]
pub struct ShufflePlaylist {
    order: Vec<u16, MAX_TRACKS>,
    /// Index of the next id to draw.
    next: usize,
    rng: SmallRng,
}

impl ShufflePlaylist {
    /// Build a shuffled order of `1..=track_count` from `seed`.
    ///
    /// Ids beyond [`MAX_TRACKS`] are not representable and are left out.
    pub fn new(track_count: u16, seed: u64) -> Self {
        let mut order = Vec::new();
        for id in 1..=track_count {
            if order.push(id).is_err() {
                break;
            }
        }
        let mut playlist = Self {
            order,
            next: 0,
            rng: SmallRng::seed_from_u64(seed),
        };
        playlist.reshuffle();
        playlist
    }

    /// Draw the id under the cursor and advance, reshuffling after the last.
    ///
    /// Returns `None` only for an empty playlist.
    pub fn draw(&mut self) -> Option<TrackId> {
        let id = self
            .order
            .get(self.next)
            .copied()
            .and_then(|n| TrackId::new(n).ok())?;
        self.next = self.next.saturating_add(1);
        if self.next >= self.order.len() {
            self.reshuffle();
        }
        Some(id)
    }

    /// 1-based position of the next draw in the current permutation.
    pub fn cursor(&self) -> usize {
        self.next.saturating_add(1)
    }

    /// The current permutation.
    pub fn order(&self) -> &[u16] {
        &self.order
    }

    /// Number of ids in the permutation.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the playlist holds no ids.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn reshuffle(&mut self) {
        self.order.shuffle(&mut self.rng);
        self.next = 0;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn is_permutation(order: &[u16], n: u16) -> bool {
        let mut sorted: Vec<u16, MAX_TRACKS> = Vec::new();
        for &id in order {
            if sorted.push(id).is_err() {
                return false;
            }
        }
        sorted.sort_unstable();
        sorted.iter().copied().eq(1..=n)
    }

    #[test]
    fn test_new_is_permutation() {
        let playlist = ShufflePlaylist::new(999, 42);
        assert_eq!(playlist.len(), 999);
        assert!(is_permutation(playlist.order(), 999));
        assert_eq!(playlist.cursor(), 1);
    }

    #[test]
    fn test_full_round_visits_every_track_once() {
        let mut playlist = ShufflePlaylist::new(50, 7);
        let mut seen = [false; 51];
        for _ in 0..50 {
            let id = playlist.draw().unwrap().get();
            let slot = &mut seen[usize::from(id)];
            assert!(!*slot, "track {id} drawn twice in one round");
            *slot = true;
        }
        assert!(seen[1..].iter().all(|&s| s));
    }

    #[test]
    fn test_cursor_resets_after_last_draw() {
        let mut playlist = ShufflePlaylist::new(3, 1);
        playlist.draw();
        assert_eq!(playlist.cursor(), 2);
        playlist.draw();
        playlist.draw();
        assert_eq!(playlist.cursor(), 1);
        assert!(is_permutation(playlist.order(), 3));
    }

    #[test]
    fn test_draws_follow_order() {
        let mut playlist = ShufflePlaylist::new(20, 99);
        let first = playlist.order()[0];
        let second = playlist.order()[1];
        assert_eq!(playlist.draw().map(TrackId::get), Some(first));
        assert_eq!(playlist.draw().map(TrackId::get), Some(second));
    }

    #[test]
    fn test_same_seed_same_order() {
        let a = ShufflePlaylist::new(100, 1234);
        let b = ShufflePlaylist::new(100, 1234);
        assert_eq!(a.order(), b.order());
    }

    #[test]
    fn test_single_track_always_draws_it() {
        let mut playlist = ShufflePlaylist::new(1, 0);
        for _ in 0..3 {
            assert_eq!(playlist.draw(), Some(TrackId::FIRST));
        }
    }

    #[test]
    fn test_empty_playlist_draws_nothing() {
        let mut playlist = ShufflePlaylist::new(0, 0);
        assert!(playlist.is_empty());
        assert_eq!(playlist.draw(), None);
    }
}
