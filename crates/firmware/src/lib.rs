//! I2S Sample Player Firmware
//!
//! Button-triggered playback of a 16-bit PCM sample over a double-buffered
//! I2S transfer.
//!
//! # Architecture
//!
//! ```text
//! Application Layer (app: trigger loop, fault policy)
//!         ↓
//! Playback (playback::Player, refill protocol)
//!         ↓
//! Platform HAL (platform::I2sTransmitter, platform::InputPin)
//!         ↓
//! Board driver / emulator (audio::sim)
//! ```
//!
//! # Features
//!
//! - `hardware` - defmt logging, 32 768 Hz embassy-time tick
//! - `emulator` - Build for desktop testing (tokio, simulated I2S, WAV capture)
//! - `std` - Enable standard library (for emulator and testing)
//!
//! # Examples
//!
//! ## Emulator Target
//!
//! ```bash
//! cargo run -p firmware --example playback_emulator --features emulator
//! ```

#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
// Upgrade relevant warns to deny; keep pedantic as warn (too noisy for firmware)
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Critical correctness: deny these
#![deny(clippy::await_holding_lock)] // holding a blocking Mutex across .await is a bug
#![deny(unsafe_op_in_unsafe_fn)]
// Logging discipline
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
#![warn(clippy::dbg_macro)]
// Intentional allows for this codebase:
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]

pub mod app;
pub mod audio;
pub mod fault;
pub mod trigger;

pub use app::{poll_once, run, TriggerError};
pub use trigger::PlayButton;

#[cfg(feature = "emulator")]
pub use audio::sim::{SimClock, SimI2s, SimTap};
