//! Double-buffer refill protocol.
//!
//! `RefillProtocol` is the state machine behind every "next buffer needed"
//! notification. It owns the buffer pair, the playback cursor and the
//! completion flag. It performs no waiting and no logging, so it runs
//! unchanged inside an interrupt handler and in a plain `#[test]`.
//!
//! ```text
//!          start()
//!   Idle ──────────▶ Streaming ──(data exhausted)──▶ Draining ──▶ Done
//!    ▲                                                               │
//!    └─────────────────────────── finish() ◀─────────────────────────┘
//! ```
//!
//! # Ownership
//!
//! At any moment one block is owned by the transmitter and the other by
//! software. Blocks are handed over strictly alternately, A, B, A, B…, and a
//! block is only written after the driver has moved on to the other one.
//!
//! # Drain
//!
//! The driver asks for the next block while it starts transmitting the
//! current one. When a request arrives with no data left, the block in flight
//! still holds the tail of the asset. That request is absorbed without a
//! handoff, and completion is declared on the following request, once the
//! tail has actually been clocked out.

use platform::{BufferPair, BufferSlot, HardwareFault, I2sTransmitter, Notification, StartFlags};

use crate::encoder::encode_block;
use crate::source::SampleSource;

/// Protocol state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RefillState {
    /// No session; notifications are ignored.
    Idle,
    /// Samples remain to be encoded or handed over.
    Streaming,
    /// All samples handed over; one more request is owed before completion.
    Draining,
    /// Session ended (completed or faulted); waiting for `finish`.
    Done,
}

/// What a single notification did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RefillOutcome {
    /// Not a buffer request, or no session in progress.
    Ignored,
    /// `slot` was committed as the next block, carrying `samples` real samples.
    Handoff {
        /// Block committed.
        slot: BufferSlot,
        /// Real (non-padding) samples in it.
        samples: usize,
    },
    /// Data exhausted; the request was absorbed without a handoff.
    DrainStarted,
    /// The final block has been transmitted; the completion flag is set.
    Completed,
    /// The driver refused the next block. The session is over.
    Faulted(HardwareFault),
}

/// Counters for one finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PlaybackReport {
    /// Samples streamed (final cursor position).
    pub samples: usize,
    /// Blocks handed to the driver, including the one passed to `start`.
    pub blocks: usize,
    /// Buffer requests observed during the session.
    pub notifications: usize,
}

/// Double-buffer refill state machine with `N`-word blocks.
pub struct RefillProtocol<'a, const N: usize> {
    state: RefillState,
    source: SampleSource<'a>,
    cursor: usize,
    buffers: BufferPair<N>,
    /// Block most recently handed to the driver.
    current: BufferSlot,
    /// Real samples pre-encoded into the backup block and not yet handed over.
    staged: usize,
    completed: bool,
    fault: Option<HardwareFault>,
    blocks: usize,
    notifications: usize,
}

impl<const N: usize> Default for RefillProtocol<'_, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, const N: usize> RefillProtocol<'a, N> {
    const BLOCK_NOT_EMPTY: () = assert!(N > 0, "block size must be at least one word");

    /// An idle protocol with silent buffers.
    pub const fn new() -> Self {
        let () = Self::BLOCK_NOT_EMPTY;
        Self {
            state: RefillState::Idle,
            source: SampleSource::from_pcm(&[]),
            cursor: 0,
            buffers: BufferPair::new(),
            current: BufferSlot::A,
            staged: 0,
            completed: false,
            fault: None,
            blocks: 0,
            notifications: 0,
        }
    }

    /// Begin a session: reset the cursor, pre-fill both blocks and start the
    /// transfer on block A.
    ///
    /// On failure the protocol returns to [`RefillState::Idle`].
    pub fn start<T: I2sTransmitter>(
        &mut self,
        source: SampleSource<'a>,
        driver: &mut T,
    ) -> Result<(), HardwareFault> {
        self.source = source;
        self.cursor = 0;
        self.completed = false;
        self.fault = None;
        self.notifications = 0;

        encode_block(&self.source, self.buffers.block_mut(BufferSlot::A), &mut self.cursor);
        self.staged = encode_block(
            &self.source,
            self.buffers.block_mut(BufferSlot::B),
            &mut self.cursor,
        );
        self.current = BufferSlot::A;
        self.state = RefillState::Streaming;

        match driver.start(BufferSlot::A, self.buffers.block(BufferSlot::A), StartFlags::NONE) {
            Ok(()) => {
                self.blocks = 1;
                Ok(())
            }
            Err(fault) => {
                self.state = RefillState::Idle;
                self.blocks = 0;
                Err(fault)
            }
        }
    }

    /// Handle one driver notification.
    ///
    /// Only the "next buffers needed" status bit is acted on; everything else,
    /// and any request outside a session, is [`RefillOutcome::Ignored`].
    ///
    /// Samples pre-encoded into block B by `start` are handed over before the
    /// exhaustion check, so a source that fits in the two primed blocks still
    /// plays B in full before draining.
    #[allow(clippy::arithmetic_side_effects)] // Safety: counters bounded by session length; cursor < sample_count() checked before encoding
    pub fn on_notification<T: I2sTransmitter>(
        &mut self,
        notification: Notification,
        driver: &mut T,
    ) -> RefillOutcome {
        if !notification.status.next_buffers_needed() {
            return RefillOutcome::Ignored;
        }
        match self.state {
            RefillState::Idle | RefillState::Done => RefillOutcome::Ignored,
            RefillState::Draining => {
                self.notifications += 1;
                self.state = RefillState::Done;
                self.completed = true;
                RefillOutcome::Completed
            }
            RefillState::Streaming => {
                self.notifications += 1;
                let next = self.current.other();
                let samples = if self.staged > 0 {
                    // The backup block was filled before `start`; hand it over as is.
                    core::mem::take(&mut self.staged)
                } else if self.cursor < self.source.sample_count() {
                    encode_block(&self.source, self.buffers.block_mut(next), &mut self.cursor)
                } else {
                    self.state = RefillState::Draining;
                    return RefillOutcome::DrainStarted;
                };

                match driver.set_next_buffer(next, self.buffers.block(next)) {
                    Ok(()) => {
                        self.current = next;
                        self.blocks += 1;
                        RefillOutcome::Handoff {
                            slot: next,
                            samples,
                        }
                    }
                    Err(fault) => {
                        self.fault = Some(fault);
                        self.state = RefillState::Done;
                        RefillOutcome::Faulted(fault)
                    }
                }
            }
        }
    }

    /// Close the session and return to [`RefillState::Idle`].
    ///
    /// The completion flag keeps its value until the next `start`.
    pub fn finish(&mut self) -> Result<PlaybackReport, HardwareFault> {
        self.state = RefillState::Idle;
        match self.fault.take() {
            Some(fault) => Err(fault),
            None => Ok(self.report()),
        }
    }

    /// Counters so far.
    pub fn report(&self) -> PlaybackReport {
        PlaybackReport {
            samples: self.cursor,
            blocks: self.blocks,
            notifications: self.notifications,
        }
    }

    /// Current state.
    pub fn state(&self) -> RefillState {
        self.state
    }

    /// `true` from `start` until `finish`.
    pub fn is_active(&self) -> bool {
        self.state != RefillState::Idle
    }

    /// `true` once the session can be closed (completed or faulted).
    pub fn is_finished(&self) -> bool {
        self.state == RefillState::Done
    }

    /// The completion flag.
    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// Samples encoded so far in this session.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Block most recently handed to the driver.
    pub fn current_slot(&self) -> BufferSlot {
        self.current
    }

    /// Read access to a block.
    pub fn block(&self, slot: BufferSlot) -> &[u32; N] {
        self.buffers.block(slot)
    }
}
