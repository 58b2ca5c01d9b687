//! Controller event loop.
//!
//! One task owns the [`Jukebox`]. Each turn it fires the deferred actions that
//! are due, then sleeps until either the next input event arrives or the next
//! deadline passes, whichever comes first. Woken events go through
//! [`Jukebox::step`], so timers that expired while the task slept fire before
//! the input that woke it. Nothing else touches the controller, so no locking
//! is needed around it.

use embassy_futures::select::{select, Either};
use embassy_time::{Instant, Timer};
use platform::{AudioModule, Feedback, InputDevice, InputEvent};
use playback::queue::EVENT_QUEUE_CAPACITY;
use playback::{EventQueue, Jukebox};

/// Run the controller until `until` has passed.
///
/// The caller is expected to have called [`Jukebox::start`].
pub async fn serve<M, F, I>(jukebox: &mut Jukebox<M, F>, input: &mut I, until: Instant)
where
    M: AudioModule,
    F: Feedback,
    I: InputDevice,
{
    loop {
        let now = Instant::now();
        if now >= until {
            return;
        }
        turn(jukebox, input, now, Some(until)).await;
    }
}

/// Run the controller forever.
pub async fn run<M, F, I>(jukebox: &mut Jukebox<M, F>, input: &mut I) -> !
where
    M: AudioModule,
    F: Feedback,
    I: InputDevice,
{
    loop {
        turn(jukebox, input, Instant::now(), None).await;
    }
}

async fn turn<M, F, I>(
    jukebox: &mut Jukebox<M, F>,
    input: &mut I,
    now: Instant,
    until: Option<Instant>,
) where
    M: AudioModule,
    F: Feedback,
    I: InputDevice,
{
    jukebox.poll(now);

    let wake = match (jukebox.next_deadline(), until) {
        (Some(deadline), Some(until)) => Some(deadline.min(until)),
        (deadline, until) => deadline.or(until),
    };

    let event = match wake {
        Some(at) => match select(input.wait_for_event(), Timer::at(at)).await {
            Either::First(event) => Some(event),
            Either::Second(()) => None,
        },
        None => Some(input.wait_for_event().await),
    };

    let Some(first) = event else {
        return;
    };

    // Batch whatever else is already waiting behind the event that woke us.
    // Anything past the queue's capacity stays in the input for the next turn.
    let mut queue = EventQueue::new();
    let mut next = Some(first);
    while let Some(event) = next {
        log_event(event);
        if queue.push(event).is_err() {
            break;
        }
        next = if queue.len() < EVENT_QUEUE_CAPACITY {
            input.poll_event()
        } else {
            None
        };
    }
    jukebox.step(&mut queue, Instant::now());
}

#[allow(unused_variables)]
fn log_event(event: InputEvent) {
    #[cfg(feature = "defmt")]
    defmt::debug!("input {}", event);
    #[cfg(feature = "tracing")]
    tracing::debug!(?event, "input");
}
