//! Playback error type.

use platform::HardwareFault;
use thiserror::Error;

/// Errors returned by [`Player::play`](crate::Player::play) and
/// [`SampleSource::new`](crate::SampleSource::new).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlaybackError {
    /// The asset is shorter than the 44-byte header.
    #[error("asset of {len} bytes is shorter than the WAV header")]
    AssetTooShort {
        /// Asset length in bytes.
        len: usize,
    },
    /// `play` was called while another session was still active.
    #[error("a playback session is already active")]
    Busy,
    /// The bus driver failed to start or to accept a block.
    #[error("hardware fault: {0}")]
    Hardware(#[from] HardwareFault),
}
