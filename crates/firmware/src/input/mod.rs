//! Input event channel.
//!
//! Producers (the keypad matrix scan task, the play-button edge interrupt,
//! the battery monitor, or the emulator's stdin reader) push [`InputEvent`]s
//! into an [`InputChannel`]. The controller loop owns a [`ChannelInput`]
//! wrapping the receiving end, which implements [`platform::InputDevice`].
//!
//! # Overflow handling
//!
//! [`try_send_event`] never blocks. If the controller stalls and the channel
//! reaches [`CHANNEL_DEPTH`], new events are dropped and a warning is logged.
//!
//! # Example
//!
//! ```
//! use firmware::input::{try_send_event, ChannelInput, InputChannel};
//! use platform::{InputDevice, InputEvent};
//!
//! let channel = InputChannel::new();
//! assert!(try_send_event(&channel.sender(), InputEvent::PlayButton));
//!
//! let mut input = ChannelInput::new(&channel);
//! assert_eq!(input.poll_event(), Some(InputEvent::PlayButton));
//! assert_eq!(input.poll_event(), None);
//! ```

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};

pub use platform::{InputDevice, InputEvent};

/// Depth of the event channel.
pub const CHANNEL_DEPTH: usize = 16;

/// Channel carrying input events to the controller.
///
/// `CriticalSectionRawMutex` because producers may run in interrupt context.
pub type InputChannel = Channel<CriticalSectionRawMutex, InputEvent, CHANNEL_DEPTH>;

/// Sending half of an [`InputChannel`].
pub type InputSender<'a> = Sender<'a, CriticalSectionRawMutex, InputEvent, CHANNEL_DEPTH>;

/// Global event channel shared between the input producers and the controller.
pub static INPUT_CHANNEL: InputChannel = Channel::new();

/// Input device backed by an [`InputChannel`].
pub struct ChannelInput<'a> {
    rx: Receiver<'a, CriticalSectionRawMutex, InputEvent, CHANNEL_DEPTH>,
}

impl<'a> ChannelInput<'a> {
    /// Receive from `channel`.
    pub fn new(channel: &'a InputChannel) -> Self {
        Self {
            rx: channel.receiver(),
        }
    }
}

impl ChannelInput<'static> {
    /// Receive from [`INPUT_CHANNEL`].
    pub fn global() -> Self {
        Self::new(&INPUT_CHANNEL)
    }
}

impl InputDevice for ChannelInput<'_> {
    async fn wait_for_event(&mut self) -> InputEvent {
        self.rx.receive().await
    }

    fn poll_event(&mut self) -> Option<InputEvent> {
        self.rx.try_receive().ok() // ok: Empty is the only error; the channel never closes
    }
}

/// Enqueue `event` without blocking.
///
/// Returns `false` if the channel was full and the event was dropped.
pub fn try_send_event(tx: &InputSender<'_>, event: InputEvent) -> bool {
    match tx.try_send(event) {
        Ok(()) => true,
        Err(_) => {
            #[cfg(feature = "defmt")]
            defmt::warn!("input channel full, dropped {}", event);
            #[cfg(feature = "tracing")]
            tracing::warn!(?event, "input channel full, dropped event");
            false
        }
    }
}
