//! Application configuration and constants
//!
//! Central values shared by the firmware and the desktop emulator.

/// The application name
pub const APP_NAME: &str = "I2S Sample Player";

/// Application version (synchronized with Cargo.toml)
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Interval between trigger button polls, in milliseconds.
///
/// The button is level-sensed; this only bounds how long a press can go
/// unnoticed between two playbacks.
pub const TRIGGER_POLL_MS: u64 = 10;

/// Development mode banner
pub const fn dev_banner() -> &'static str {
    "I2S Sample Player - Emulator"
}
