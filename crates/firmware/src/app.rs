//! Trigger loop — wait for the button, play the sample, repeat.
//!
//! ```rust,ignore
//! static PLAYER: Player<'static, BoardI2s, I2S_DATA_BLOCK_WORDS> = Player::new(BoardI2s::new());
//!
//! #[embassy_executor::main]
//! async fn main(_spawner: Spawner) -> ! {
//!     let source = SampleSource::new(AUDIO16).unwrap_or_else(|e| fault::halt_playback(&e));
//!     firmware::run(PlayButton::new(button_pin), &PLAYER, source).await
//! }
//! ```

use embassy_time::Timer;
use platform::config::{self, TRIGGER_POLL_MS};
use platform::{I2sTransmitter, InputPin};
use playback::{PlaybackError, PlaybackReport, Player, SampleSource};
use thiserror::Error;

use crate::fault;
use crate::trigger::PlayButton;

/// Errors that end the trigger loop.
#[derive(Debug, Error)]
pub enum TriggerError<E> {
    /// The button pin could not be read.
    #[error("trigger pin read failed: {0:?}")]
    Pin(E),
    /// Playback failed; see [`PlaybackError`].
    #[error("playback failed: {0}")]
    Playback(#[from] PlaybackError),
}

/// Sample the button once and, if it is pressed, play `source` to the end.
///
/// Returns `Ok(None)` when the button was released.
pub async fn poll_once<'a, P, D, const N: usize>(
    button: &mut PlayButton<P>,
    player: &Player<'a, D, N>,
    source: SampleSource<'a>,
) -> Result<Option<PlaybackReport>, TriggerError<P::Error>>
where
    P: InputPin,
    D: I2sTransmitter,
{
    if !button.is_pressed().map_err(TriggerError::Pin)? {
        return Ok(None);
    }
    #[cfg(feature = "defmt")]
    defmt::debug!("play button pressed");
    #[cfg(feature = "tracing")]
    tracing::debug!("play button pressed");
    let report = player.play(source).await?;
    Ok(Some(report))
}

/// Poll the button forever, playing `source` on every press.
///
/// A pin or playback error is fatal and halts the system.
pub async fn run<'a, P, D, const N: usize>(
    mut button: PlayButton<P>,
    player: &Player<'a, D, N>,
    source: SampleSource<'a>,
) -> !
where
    P: InputPin,
    P::Error: core::fmt::Debug,
    D: I2sTransmitter,
{
    #[cfg(feature = "defmt")]
    defmt::info!("{} v{} ready", config::APP_NAME, config::APP_VERSION);
    #[cfg(feature = "tracing")]
    tracing::info!("{} v{} ready", config::APP_NAME, config::APP_VERSION);
    loop {
        if let Err(err) = poll_once(&mut button, player, source).await {
            fault::halt(&err);
        }
        Timer::after_millis(TRIGGER_POLL_MS).await;
    }
}
