//! Fatal-error policy.
//!
//! There is no recovery path mid-stream: a driver that refuses a block, or a
//! trigger pin that cannot be read, stops the system. The release and dev
//! profiles use `panic = "abort"`, so the panic below is the halt.

use playback::PlaybackError;

use crate::app::TriggerError;

/// Log `err` and halt.
#[allow(clippy::panic)] // Safety: the one sanctioned panic; the abort profile turns it into a halt
pub fn halt<E: core::fmt::Debug>(err: &TriggerError<E>) -> ! {
    #[cfg(feature = "defmt")]
    match err {
        TriggerError::Pin(_) => defmt::error!("fatal: trigger pin read failed"),
        TriggerError::Playback(playback) => defmt::error!("fatal: {:?}", playback),
    }
    #[cfg(feature = "tracing")]
    tracing::error!("fatal: {}", err);
    panic!("{}", err)
}

/// Log a playback error raised outside the trigger loop and halt.
#[allow(clippy::panic)] // Safety: see `halt`
pub fn halt_playback(err: &PlaybackError) -> ! {
    #[cfg(feature = "defmt")]
    defmt::error!("fatal: {:?}", err);
    #[cfg(feature = "tracing")]
    tracing::error!("fatal: {:?}", err);
    panic!("{}", err)
}
