//! Hardware Abstraction Layer (HAL) for the Jukephone
//!
//! This crate provides trait-based abstractions for every peripheral the
//! jukebox controller talks to, enabling development and testing without
//! physical hardware.
//!
//! # Architecture Layers
//!
//! ```text
//! Application Layer (firmware crate: runtime loop, emulator)
//!         ↓
//! Decision Layer (playback crate: keypad decoding, command slot, reconciler)
//!         ↓
//! Platform HAL (this crate - trait abstractions)
//!         ↓
//! Hardware Layer (UART audio module, keypad matrix, LEDs, buzzer)
//! ```
//!
//! # Abstractions
//!
//! - [`AudioModule`] - Serial MP3 module, treated as an opaque command sink
//! - [`Feedback`] - Feedback LED, power LED, and piezo buzzer
//! - [`InputDevice`] - Keypad matrix, play button, and battery monitor
//!
//! # Features
//!
//! - `std`: Enable the recording mocks in [`mocks`]
//! - `defmt`: Enable defmt logging derives
//!
//! # Example
//!
//! ```
//! use platform::{AudioModule, EqPreset, PlayerStatus, TrackId, Volume};
//!
//! fn start<M: AudioModule>(module: &mut M) -> Result<PlayerStatus, M::Error> {
//!     module.set_volume(Volume::new(1))?;
//!     module.set_eq(EqPreset::default().next())?;
//!     module.play(TrackId::FIRST)?;
//!     module.status()
//! }
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(clippy::unreachable)] // no unreachable!() that isn't documented
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)] // unsafe fn body is not implicitly unsafe block
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
// Pedantic lints suppressed for this hardware HAL crate:
#![allow(clippy::doc_markdown)]
#![allow(clippy::must_use_candidate)] // hardware accessors — callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(async_fn_in_trait)] // Embassy no_std: single-threaded, Send bounds not needed

pub mod audio;
pub mod audio_types;
pub mod config;
pub mod feedback;
pub mod input;
pub mod mocks;

// Re-export main high-level traits
pub use audio::{AudioModule, PlayerStatus};
pub use feedback::{Feedback, Melody, Note};
pub use input::{InputDevice, InputEvent, Key, KeyEvent, Press};

// Re-export domain newtypes
pub use audio_types::{EqPreset, OutOfRangeError, TrackId, Volume};
pub use config::{ConfigError, JukeboxConfig};
