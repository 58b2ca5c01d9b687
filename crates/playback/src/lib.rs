//! Jukebox decision layer: keypad decoding, deferred actions, command slot,
//! shuffle playback, and status reconciliation.
#![cfg_attr(not(test), no_std)]
#![deny(clippy::unwrap_used)]

#[macro_use]
mod fmt;

pub mod command;
pub mod engine;
pub mod keypad;
pub mod queue;
pub mod reconciler;
pub mod scheduler;
pub mod shuffle;
pub mod state;

pub use command::{CommandSlot, Dispatch, PlayerCommand};
pub use engine::Jukebox;
pub use queue::EventQueue;
pub use scheduler::{DeferredScheduler, TimerKind};
