//! Hardware Abstraction Layer (HAL) for the I2S sample player
//!
//! This crate provides trait-based abstractions for the two pieces of hardware
//! playback touches, enabling development and testing without a board.
//!
//! # Architecture Layers
//!
//! ```text
//! Application Layer (firmware crate: trigger loop, fault policy)
//!         ↓
//! Playback (refill protocol, player)
//!         ↓
//! Platform HAL (this crate - trait abstractions)
//!         ↓
//! Board glue (I2S driver, GPIO)
//! ```
//!
//! # Abstractions
//!
//! - [`I2sTransmitter`] - double-buffered I2S transmit driver
//! - [`Notification`] - "next buffer needed" events from that driver
//! - [`BufferPair`] - fixed-capacity DMA word blocks
//! - [`InputPin`] - level-sensed trigger input
//!
//! # Features
//!
//! - `std`: host mocks in [`mocks`]
//! - `defmt`: `defmt::Format` derives on every value type

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::must_use_candidate)] // hardware accessors — callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod audio;
pub mod audio_config;
pub mod audio_types;
pub mod config;
pub mod dma;
pub mod gpio;
pub mod mocks;

pub use audio::{HardwareFault, I2sTransmitter, Notification};
pub use audio_config::{I2sConfig, I2S_DATA_BLOCK_WORDS, WAV_HEADER_BYTES};
pub use audio_types::{BufferSlot, StartFlags, TxStatus};
pub use dma::BufferPair;
pub use gpio::{HalInput, InputPin, PinState};
