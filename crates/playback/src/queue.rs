//! Fixed-capacity input event queue.
//!
//! Interrupt-side producers (keypad scan, button edge, battery monitor) push;
//! the controller drains in FIFO order from its single loop. There is no
//! backpressure: an event pushed into a full queue is dropped.

use heapless::Deque;
use platform::InputEvent;

/// How many events the queue holds before dropping.
pub const EVENT_QUEUE_CAPACITY: usize = 16;

/// FIFO of pending input events.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    events: Deque<InputEvent, EVENT_QUEUE_CAPACITY>,
}

impl EventQueue {
    /// An empty queue.
    pub const fn new() -> Self {
        Self {
            events: Deque::new(),
        }
    }

    /// Append `event`.
    ///
    /// # Errors
    ///
    /// Hands `event` back if the queue is full; it has been dropped.
    pub fn push(&mut self, event: InputEvent) -> Result<(), InputEvent> {
        self.events.push_back(event).map_err(|dropped| {
            warn!("event queue full, dropping input");
            dropped
        })
    }

    /// Oldest pending event.
    pub fn pop(&mut self) -> Option<InputEvent> {
        self.events.pop_front()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
