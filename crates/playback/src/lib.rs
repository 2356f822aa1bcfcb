//! Sample playback core — WAV asset → double-buffered I2S transfer
//!
//! - [`SampleSource`]: the sample region of a WAV image in flash
//! - [`encoder`]: sample → bus word conversion with silence padding
//! - [`RefillProtocol`]: the "next buffer needed" state machine
//! - [`Player`]: starts a session, sleeps until it drains, stops the bus
#![cfg_attr(not(test), no_std)]
#![deny(clippy::unwrap_used)]

pub mod encoder;
pub mod error;
pub mod player;
pub mod refill;
pub mod source;

pub use error::PlaybackError;
pub use player::Player;
pub use refill::{PlaybackReport, RefillOutcome, RefillProtocol, RefillState};
pub use source::SampleSource;
