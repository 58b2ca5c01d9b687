//! Deferred-action scheduler.
//!
//! A fixed table with one slot per [`TimerKind`]. Arming a kind always
//! replaces whatever instance of that kind was pending, so a logical timer can
//! never fire twice or overlap itself. The scheduler never reads the clock:
//! every operation takes `now`, which lets tests drive it with hand-built
//! [`Instant`]s.
//!
//! ```
//! use embassy_time::{Duration, Instant};
//! use playback::scheduler::{DeferredScheduler, TimerKind};
//!
//! let mut timers = DeferredScheduler::new();
//! let t0 = Instant::from_millis(0);
//! timers.schedule_once(TimerKind::CommitPlay, t0, Duration::from_millis(1000));
//! timers.schedule_once(TimerKind::CommitPlay, t0, Duration::from_millis(1500));
//!
//! assert_eq!(timers.pop_due(Instant::from_millis(1200)), None);
//! assert_eq!(timers.pop_due(Instant::from_millis(1500)), Some(TimerKind::CommitPlay));
//! assert_eq!(timers.pop_due(Instant::from_millis(9000)), None);
//! ```

use embassy_time::{Duration, Instant};

/// Shortest period a repeating timer may have.
const MIN_PERIOD: Duration = Duration::from_ticks(1);

/// Every deferred action the controller can arm.
///
/// Declaration order breaks ties between actions due at the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerKind {
    /// Clear the digit accumulator after keypad silence.
    AbandonEntry,
    /// Request PLAY of the provisionally accepted track.
    CommitPlay,
    /// Switch the feedback LED off after a blink.
    BlinkOff,
    /// Switch the power-on indicator off.
    PowerLedOff,
    /// Drain the command slot or poll status (periodic).
    CommandTick,
    /// Toggle the feedback LED while the battery is low (periodic).
    LowBatteryPulse,
}

impl TimerKind {
    /// Number of kinds; size of the scheduler table.
    pub const COUNT: usize = 6;

    /// All kinds in tie-break order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::AbandonEntry,
        Self::CommitPlay,
        Self::BlinkOff,
        Self::PowerLedOff,
        Self::CommandTick,
        Self::LowBatteryPulse,
    ];

    fn index(self) -> usize {
        match self {
            Self::AbandonEntry => 0,
            Self::CommitPlay => 1,
            Self::BlinkOff => 2,
            Self::PowerLedOff => 3,
            Self::CommandTick => 4,
            Self::LowBatteryPulse => 5,
        }
    }

    /// Short label for log lines.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AbandonEntry => "abandon-entry",
            Self::CommitPlay => "commit-play",
            Self::BlinkOff => "blink-off",
            Self::PowerLedOff => "power-led-off",
            Self::CommandTick => "command-tick",
            Self::LowBatteryPulse => "low-battery-pulse",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Armed {
    deadline: Instant,
    /// `Some` for periodic timers.
    period: Option<Duration>,
}

/// Cancellable one-shot and periodic timers, one instance per kind.
#[derive(Debug, Clone, Default)]
pub struct DeferredScheduler {
    slots: [Option<Armed>; TimerKind::COUNT],
}

impl DeferredScheduler {
    /// An empty scheduler with nothing armed.
    pub const fn new() -> Self {
        Self {
            slots: [None; TimerKind::COUNT],
        }
    }

    /// Arm `kind` to fire once, `delay` after `now`.
    ///
    /// Any pending instance of `kind` is cancelled first.
    pub fn schedule_once(&mut self, kind: TimerKind, now: Instant, delay: Duration) {
        self.arm(kind, deadline_after(now, delay), None);
    }

    /// Arm `kind` to fire every `period`, first at `now + period`.
    ///
    /// Any pending instance of `kind` is cancelled first. A period shorter
    /// than one time-driver tick is raised to one tick.
    pub fn schedule_repeating(&mut self, kind: TimerKind, now: Instant, period: Duration) {
        let period = period.max(MIN_PERIOD);
        self.arm(kind, deadline_after(now, period), Some(period));
    }

    /// Disarm `kind`. Cancelling a kind that is not armed is a no-op.
    pub fn cancel(&mut self, kind: TimerKind) {
        if let Some(slot) = self.slots.get_mut(kind.index()) {
            *slot = None;
        }
    }

    /// Whether `kind` is pending.
    pub fn is_armed(&self, kind: TimerKind) -> bool {
        self.deadline(kind).is_some()
    }

    /// When `kind` will next fire, if armed.
    pub fn deadline(&self, kind: TimerKind) -> Option<Instant> {
        self.slots
            .get(kind.index())
            .copied()
            .flatten()
            .map(|armed| armed.deadline)
    }

    /// The earliest pending deadline across all kinds.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.slots.iter().flatten().map(|a| a.deadline).min()
    }

    /// Take the earliest kind due at or before `now`.
    ///
    /// A one-shot is disarmed. A periodic timer is re-armed one period after
    /// its previous deadline; if that is still not in the future the missed
    /// periods are skipped and it is re-armed one period after `now`.
    /// Call repeatedly until it returns `None` to fire everything due.
    pub fn pop_due(&mut self, now: Instant) -> Option<TimerKind> {
        let kind = TimerKind::ALL
            .iter()
            .copied()
            .filter_map(|k| self.deadline(k).map(|d| (d, k)))
            .filter(|(deadline, _)| *deadline <= now)
            // min_by_key keeps the first of equal keys: declaration order.
            .min_by_key(|(deadline, _)| *deadline)
            .map(|(_, k)| k)?;

        let slot = self.slots.get_mut(kind.index())?;
        *slot = slot.and_then(|armed| {
            let period = armed.period?;
            let mut next = deadline_after(armed.deadline, period);
            if next <= now {
                next = deadline_after(now, period);
            }
            // Saturated at the end of time: nothing left to re-arm for.
            (next > now).then_some(Armed {
                deadline: next,
                period: Some(period),
            })
        });
        Some(kind)
    }

    fn arm(&mut self, kind: TimerKind, deadline: Instant, period: Option<Duration>) {
        if let Some(slot) = self.slots.get_mut(kind.index()) {
            *slot = Some(Armed { deadline, period });
        }
    }
}

/// `now + delay`, saturating at the end of time instead of overflowing.
fn deadline_after(now: Instant, delay: Duration) -> Instant {
    now.checked_add(delay).unwrap_or(Instant::MAX)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Instant {
        Instant::from_millis(v)
    }

    fn d(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_nothing_armed_initially() {
        let timers = DeferredScheduler::new();
        assert_eq!(timers.next_deadline(), None);
        for kind in TimerKind::ALL {
            assert!(!timers.is_armed(kind));
        }
    }

    #[test]
    fn test_once_fires_exactly_once() {
        let mut timers = DeferredScheduler::new();
        timers.schedule_once(TimerKind::BlinkOff, ms(0), d(100));

        assert_eq!(timers.pop_due(ms(99)), None);
        assert_eq!(timers.pop_due(ms(100)), Some(TimerKind::BlinkOff));
        assert_eq!(timers.pop_due(ms(100)), None);
        assert!(!timers.is_armed(TimerKind::BlinkOff));
    }

    #[test]
    fn test_rearm_replaces_pending_instance() {
        let mut timers = DeferredScheduler::new();
        timers.schedule_once(TimerKind::AbandonEntry, ms(0), d(1000));
        timers.schedule_once(TimerKind::AbandonEntry, ms(600), d(1000));

        assert_eq!(timers.deadline(TimerKind::AbandonEntry), Some(ms(1600)));
        assert_eq!(timers.pop_due(ms(1000)), None, "first instance was cancelled");
        assert_eq!(timers.pop_due(ms(1600)), Some(TimerKind::AbandonEntry));
    }

    #[test]
    fn test_cancel_disarms() {
        let mut timers = DeferredScheduler::new();
        timers.schedule_once(TimerKind::CommitPlay, ms(0), d(10));
        timers.cancel(TimerKind::CommitPlay);
        timers.cancel(TimerKind::CommitPlay);
        assert_eq!(timers.pop_due(ms(50)), None);
    }

    #[test]
    fn test_kinds_are_independent() {
        let mut timers = DeferredScheduler::new();
        timers.schedule_once(TimerKind::AbandonEntry, ms(0), d(1000));
        timers.schedule_once(TimerKind::CommitPlay, ms(0), d(1000));
        timers.cancel(TimerKind::AbandonEntry);
        assert!(timers.is_armed(TimerKind::CommitPlay));
    }

    #[test]
    fn test_due_timers_fire_in_deadline_order() {
        let mut timers = DeferredScheduler::new();
        timers.schedule_once(TimerKind::PowerLedOff, ms(0), d(500));
        timers.schedule_once(TimerKind::BlinkOff, ms(0), d(100));
        timers.schedule_once(TimerKind::AbandonEntry, ms(0), d(300));

        assert_eq!(timers.pop_due(ms(1000)), Some(TimerKind::BlinkOff));
        assert_eq!(timers.pop_due(ms(1000)), Some(TimerKind::AbandonEntry));
        assert_eq!(timers.pop_due(ms(1000)), Some(TimerKind::PowerLedOff));
        assert_eq!(timers.pop_due(ms(1000)), None);
    }

    #[test]
    fn test_equal_deadlines_fire_in_declaration_order() {
        let mut timers = DeferredScheduler::new();
        timers.schedule_once(TimerKind::CommitPlay, ms(0), d(1000));
        timers.schedule_once(TimerKind::AbandonEntry, ms(0), d(1000));

        assert_eq!(timers.pop_due(ms(1000)), Some(TimerKind::AbandonEntry));
        assert_eq!(timers.pop_due(ms(1000)), Some(TimerKind::CommitPlay));
    }

    #[test]
    fn test_repeating_rearms_from_previous_deadline() {
        let mut timers = DeferredScheduler::new();
        timers.schedule_repeating(TimerKind::CommandTick, ms(0), d(350));

        assert_eq!(timers.pop_due(ms(360)), Some(TimerKind::CommandTick));
        assert_eq!(timers.deadline(TimerKind::CommandTick), Some(ms(700)));
        assert_eq!(timers.pop_due(ms(700)), Some(TimerKind::CommandTick));
        assert_eq!(timers.deadline(TimerKind::CommandTick), Some(ms(1050)));
    }

    #[test]
    fn test_repeating_skips_missed_periods() {
        let mut timers = DeferredScheduler::new();
        timers.schedule_repeating(TimerKind::CommandTick, ms(0), d(350));

        // Woken far too late: one firing, then back on a fresh period.
        assert_eq!(timers.pop_due(ms(2000)), Some(TimerKind::CommandTick));
        assert_eq!(timers.pop_due(ms(2000)), None);
        assert_eq!(timers.deadline(TimerKind::CommandTick), Some(ms(2350)));
    }

    #[test]
    fn test_zero_period_fires_once_per_tick() {
        let mut timers = DeferredScheduler::new();
        timers.schedule_repeating(TimerKind::LowBatteryPulse, ms(5), Duration::from_ticks(0));

        let now = Instant::from_ticks(ms(5).as_ticks() + 1);
        assert_eq!(timers.pop_due(now), Some(TimerKind::LowBatteryPulse));
        assert_eq!(timers.pop_due(now), None, "drain loop must terminate");
        assert!(timers.deadline(TimerKind::LowBatteryPulse).unwrap() > now);
    }

    #[test]
    fn test_repeating_at_end_of_time_disarms() {
        let mut timers = DeferredScheduler::new();
        timers.schedule_repeating(TimerKind::CommandTick, Instant::MAX, d(350));
        assert_eq!(timers.pop_due(Instant::MAX), Some(TimerKind::CommandTick));
        assert_eq!(timers.pop_due(Instant::MAX), None);
    }

    #[test]
    fn test_next_deadline_is_minimum() {
        let mut timers = DeferredScheduler::new();
        timers.schedule_repeating(TimerKind::CommandTick, ms(0), d(350));
        timers.schedule_once(TimerKind::BlinkOff, ms(0), d(100));
        assert_eq!(timers.next_deadline(), Some(ms(100)));
    }

    #[test]
    fn test_deadline_saturates_instead_of_overflowing() {
        let mut timers = DeferredScheduler::new();
        timers.schedule_once(TimerKind::BlinkOff, Instant::MAX, d(100));
        assert_eq!(timers.deadline(TimerKind::BlinkOff), Some(Instant::MAX));
    }
}
