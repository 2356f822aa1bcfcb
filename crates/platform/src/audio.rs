//! I2S transmit driver abstraction
//!
//! The bus driver is an external collaborator: it owns pins, clocks and the
//! EasyDMA/DMA engine, and reports progress through an interrupt-context
//! callback. Playback code only ever sees this trait and the
//! [`Notification`] values the board glue forwards from that callback.

use thiserror::Error;

use crate::audio_types::{BufferSlot, StartFlags, TxStatus};

/// Failure reported by the bus driver.
///
/// There is no recovery path for any of these: a block that cannot be
/// committed in time is an audible glitch, and the application halts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HardwareFault {
    /// `start` rejected the configuration or the first buffer.
    #[error("I2S start rejected")]
    StartRejected,
    /// `set_next_buffer` was refused (called outside a notification, or the
    /// driver already holds a pending buffer).
    #[error("I2S next buffer rejected")]
    CommitRejected,
}

/// Asynchronous "buffer consumed" event from the driver.
///
/// `released` is the block the hardware just finished reading. It is `None`
/// for the first request after `start`, when the driver asks for the backup
/// block before anything has been released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Notification {
    /// Block returned to software ownership, if any.
    pub released: Option<BufferSlot>,
    /// Raw status bits.
    pub status: TxStatus,
}

impl Notification {
    /// A "next buffers needed" request releasing `released`.
    #[must_use]
    pub const fn next_needed(released: Option<BufferSlot>) -> Self {
        Self {
            released,
            status: TxStatus::NEXT_BUFFERS_NEEDED,
        }
    }
}

/// I2S transmit driver.
///
/// # Buffer lifetime
///
/// Hardware implementations hand the slice address to DMA and keep reading
/// after the call returns. Callers must keep both blocks alive and unmodified
/// until the block is released by a later [`Notification`] or the transfer is
/// stopped. `playback::Player` satisfies this by owning the buffer pair for its
/// whole lifetime and always calling [`stop`](I2sTransmitter::stop) before a
/// session ends.
pub trait I2sTransmitter {
    /// Start a continuous transfer on `words`; the block size is `words.len()`.
    fn start(
        &mut self,
        slot: BufferSlot,
        words: &[u32],
        flags: StartFlags,
    ) -> Result<(), HardwareFault>;

    /// Commit the block to transmit after the current one.
    ///
    /// Only valid from the notification path.
    fn set_next_buffer(&mut self, slot: BufferSlot, words: &[u32]) -> Result<(), HardwareFault>;

    /// Stop the transfer. Idempotent.
    fn stop(&mut self);
}
