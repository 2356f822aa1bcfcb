//! Playback controller.
//!
//! [`Player`] ties the refill protocol to a concrete [`I2sTransmitter`] and
//! to the two execution contexts that touch it:
//!
//! - the main context calls [`Player::play`], which starts the transfer and
//!   then sleeps until the session ends;
//! - the driver's interrupt callback calls [`Player::on_notification`] for
//!   every "next buffer needed" event.
//!
//! # Shared state
//!
//! The protocol and the driver sit in one
//! `Mutex<CriticalSectionRawMutex, RefCell<_>>`. During a session only the
//! notification path mutates the cursor, the buffers and the completion flag;
//! the main context only reads them after each wake-up. The critical section
//! covers one block encode (2048 words ≈ a few µs on a Cortex-M4) against a
//! 131 ms block period at 15.6 kHz.
//!
//! # Waiting
//!
//! Completion is signalled through an [`embassy_sync::signal::Signal`]. The
//! main context sleeps on it, and on every wake re-checks the protocol before
//! leaving, so a stale or early signal never ends a session. Under the
//! Embassy executor an idle task means `WFE`, which is the low-power wait the
//! hardware expects. There is no timeout: once started, a session runs until
//! the protocol finishes.
//!
//! # Re-entrancy
//!
//! One session at a time. A `play` issued while another is in progress
//! returns [`PlaybackError::Busy`] without touching the transfer.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::signal::Signal;
use platform::{I2sTransmitter, Notification};

use crate::error::PlaybackError;
use crate::refill::{PlaybackReport, RefillOutcome, RefillProtocol, RefillState};
use crate::source::SampleSource;

struct Session<'a, D, const N: usize> {
    protocol: RefillProtocol<'a, N>,
    driver: D,
}

/// Button-to-speaker playback of one sample asset at a time.
///
/// `N` is the block size in words. Both blocks live inside the player, so a
/// hardware build declares it as a `static` and never moves it.
///
/// ```rust,ignore
/// static PLAYER: Player<'static, BoardI2s, I2S_DATA_BLOCK_WORDS> = Player::new(BoardI2s::new());
///
/// // I2S interrupt callback:
/// PLAYER.on_notification(Notification { released, status });
///
/// // Main task:
/// PLAYER.play(SampleSource::new(AUDIO16)?).await?;
/// ```
pub struct Player<'a, D, const N: usize> {
    session: Mutex<CriticalSectionRawMutex, RefCell<Session<'a, D, N>>>,
    wake: Signal<CriticalSectionRawMutex, ()>,
}

impl<'a, D: I2sTransmitter, const N: usize> Player<'a, D, N> {
    /// Create an idle player that owns `driver`.
    pub const fn new(driver: D) -> Self {
        Self {
            session: Mutex::new(RefCell::new(Session {
                protocol: RefillProtocol::new(),
                driver,
            })),
            wake: Signal::new(),
        }
    }

    /// Play `source` to the end.
    ///
    /// Pre-fills both blocks, starts the transfer, sleeps until the protocol
    /// reports completion, then stops the transfer.
    ///
    /// # Errors
    ///
    /// - [`PlaybackError::Busy`] if a session is already active.
    /// - [`PlaybackError::Hardware`] if the driver rejected `start` or a later
    ///   block. The transfer is stopped before returning; callers are expected
    ///   to treat this as fatal.
    pub async fn play(&self, source: SampleSource<'a>) -> Result<PlaybackReport, PlaybackError> {
        self.session.lock(|cell| {
            let mut guard = cell.borrow_mut();
            let session = &mut *guard;
            if session.protocol.is_active() {
                return Err(PlaybackError::Busy);
            }
            // A stale signal from the previous session must not end this one.
            self.wake.reset();
            session.protocol.start(source, &mut session.driver)?;
            Ok(())
        })?;
        #[cfg(feature = "defmt")]
        defmt::info!("playback started: {} samples, {} words per block", source.sample_count(), N);
        #[cfg(feature = "tracing")]
        tracing::info!("playback started: {} samples, {} words per block", source.sample_count(), N);

        loop {
            self.wake.wait().await;
            if self.session.lock(|cell| cell.borrow().protocol.is_finished()) {
                break;
            }
        }

        let result = self.session.lock(|cell| {
            let mut guard = cell.borrow_mut();
            let session = &mut *guard;
            session.driver.stop();
            session.protocol.finish()
        });
        match result {
            Ok(report) => {
                #[cfg(feature = "defmt")]
                defmt::info!("playback finished: {} samples in {} blocks", report.samples, report.blocks);
                #[cfg(feature = "tracing")]
                tracing::info!("playback finished: {} samples in {} blocks", report.samples, report.blocks);
                Ok(report)
            }
            Err(fault) => {
                #[cfg(feature = "defmt")]
                defmt::error!("playback aborted: {:?}", fault);
                #[cfg(feature = "tracing")]
                tracing::error!("playback aborted: {:?}", fault);
                Err(PlaybackError::Hardware(fault))
            }
        }
    }

    /// Feed one driver callback into the refill protocol.
    ///
    /// Call from the I2S interrupt. Never blocks beyond the critical section;
    /// wakes the waiting `play` when the session ends.
    pub fn on_notification(&self, notification: Notification) -> RefillOutcome {
        let outcome = self.session.lock(|cell| {
            let mut guard = cell.borrow_mut();
            let session = &mut *guard;
            #[cfg(any(feature = "defmt", feature = "tracing"))]
            if let (Some(released), RefillState::Streaming) =
                (notification.released, session.protocol.state())
            {
                if released != session.protocol.current_slot().other() {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("driver released {:?} out of turn", released);
                    #[cfg(feature = "tracing")]
                    tracing::warn!("driver released {:?} out of turn", released);
                }
            }
            session.protocol.on_notification(notification, &mut session.driver)
        });

        match outcome {
            RefillOutcome::DrainStarted => {
                #[cfg(feature = "defmt")]
                defmt::debug!("sample exhausted, draining last block");
                #[cfg(feature = "tracing")]
                tracing::debug!("sample exhausted, draining last block");
            }
            RefillOutcome::Completed => {
                #[cfg(feature = "defmt")]
                defmt::debug!("drain complete");
                #[cfg(feature = "tracing")]
                tracing::debug!("drain complete");
                self.wake.signal(());
            }
            // `play` reports the fault once it wakes.
            RefillOutcome::Faulted(_) => self.wake.signal(()),
            RefillOutcome::Ignored | RefillOutcome::Handoff { .. } => {}
        }
        outcome
    }

    /// Current protocol state.
    pub fn state(&self) -> RefillState {
        self.session.lock(|cell| cell.borrow().protocol.state())
    }

    /// The completion flag of the current (or last) session.
    pub fn is_complete(&self) -> bool {
        self.session.lock(|cell| cell.borrow().protocol.is_complete())
    }

    /// Samples encoded so far in the current (or last) session.
    pub fn cursor(&self) -> usize {
        self.session.lock(|cell| cell.borrow().protocol.cursor())
    }

    /// Consume the player and return its driver.
    pub fn into_driver(self) -> D {
        self.session.into_inner().into_inner().driver
    }
}
