//! Jukephone firmware
//!
//! Application glue around the `playback` decision layer: the input event
//! channel, the controller event loop, and a desktop emulator.
//!
//! # Architecture
//!
//! This firmware follows a layered architecture:
//!
//! ```text
//! Application Layer (this crate: runtime loop, input channel, emulator)
//!         ↓
//! Decision Layer (playback: Jukebox controller)
//!         ↓
//! Platform HAL (platform: AudioModule, Feedback, InputDevice traits)
//! ```
//!
//! # Features
//!
//! - `hardware` - Build for the handset target (defmt logging)
//! - `emulator` - Build for desktop testing (tokio, tracing, std time driver)
//! - `std` - Enable standard library (for emulator and testing)
//!
//! # Emulator
//!
//! ```bash
//! cargo run -p firmware --example jukebox_emulator --features emulator
//! ```

#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
// Upgrade relevant warns to deny; keep pedantic as warn (too noisy for firmware)
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Critical correctness: deny these
#![deny(clippy::await_holding_lock)] // holding a blocking Mutex across .await is a bug
#![deny(unsafe_op_in_unsafe_fn)]
// Logging discipline (allow println in tests via clippy.toml)
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
#![warn(clippy::dbg_macro)] // dbg! should not be left in committed code
// Intentional allows for this codebase:
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]

pub mod input;
pub mod runtime;

#[cfg(feature = "emulator")]
pub mod emulator;

pub use input::{try_send_event, ChannelInput, InputChannel, INPUT_CHANNEL};
pub use runtime::{run, serve};

#[cfg(feature = "emulator")]
pub use emulator::{map_char, ConsoleFeedback, SimulatedPlayer};
