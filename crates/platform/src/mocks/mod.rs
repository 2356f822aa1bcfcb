//! Mock implementations for testing
//!
//! This module provides mock implementations of the platform traits for use
//! in unit and integration tests.

#![cfg(any(test, feature = "std"))]

extern crate std;

use std::vec::Vec;

use crate::*;

/// One block handed to the mock transmitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handoff {
    /// Slot the block was taken from.
    pub slot: BufferSlot,
    /// Copy of the words at the time of the call.
    pub words: Vec<u32>,
}

/// Mock I2S transmitter — records every call for assertions.
///
/// Hardware would keep reading the caller's block after the call returns;
/// the mock snapshots it instead so tests can check exactly what was
/// committed at each step.
#[derive(Debug, Default)]
pub struct MockI2s {
    handoffs: Vec<Handoff>,
    start_count: usize,
    stop_count: usize,
    running: bool,
    last_flags: Option<StartFlags>,
    fail_start: bool,
    fail_commit_at: Option<usize>,
    commits: usize,
}

impl MockI2s {
    /// Create a mock that accepts every call.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `start` fail with [`HardwareFault::StartRejected`].
    pub fn fail_start(mut self) -> Self {
        self.fail_start = true;
        self
    }

    /// Make the `n`-th `set_next_buffer` call (0-based) fail with
    /// [`HardwareFault::CommitRejected`].
    pub fn fail_commit_at(mut self, n: usize) -> Self {
        self.fail_commit_at = Some(n);
        self
    }

    /// Every block handed over, including the one passed to `start`.
    pub fn handoffs(&self) -> &[Handoff] {
        &self.handoffs
    }

    /// Slots in handoff order.
    pub fn slots(&self) -> Vec<BufferSlot> {
        self.handoffs.iter().map(|h| h.slot).collect()
    }

    /// All handed-over words, concatenated in transmit order.
    pub fn stream(&self) -> Vec<u32> {
        self.handoffs
            .iter()
            .flat_map(|h| h.words.iter().copied())
            .collect()
    }

    /// Number of `start` calls that succeeded.
    pub fn start_count(&self) -> usize {
        self.start_count
    }

    /// Number of `stop` calls.
    pub fn stop_count(&self) -> usize {
        self.stop_count
    }

    /// `true` between a successful `start` and the next `stop`.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Flags passed to the last `start`.
    pub fn last_flags(&self) -> Option<StartFlags> {
        self.last_flags
    }
}

impl I2sTransmitter for MockI2s {
    fn start(
        &mut self,
        slot: BufferSlot,
        words: &[u32],
        flags: StartFlags,
    ) -> Result<(), HardwareFault> {
        if self.fail_start {
            return Err(HardwareFault::StartRejected);
        }
        self.start_count = self.start_count.saturating_add(1);
        self.running = true;
        self.last_flags = Some(flags);
        self.handoffs.push(Handoff {
            slot,
            words: words.to_vec(),
        });
        Ok(())
    }

    fn set_next_buffer(&mut self, slot: BufferSlot, words: &[u32]) -> Result<(), HardwareFault> {
        let n = self.commits;
        self.commits = self.commits.saturating_add(1);
        if !self.running || self.fail_commit_at == Some(n) {
            return Err(HardwareFault::CommitRejected);
        }
        self.handoffs.push(Handoff {
            slot,
            words: words.to_vec(),
        });
        Ok(())
    }

    fn stop(&mut self) {
        self.stop_count = self.stop_count.saturating_add(1);
        self.running = false;
    }
}

/// Mock input pin driven by a script of levels.
///
/// Each read pops the next level; once the script is exhausted the pin reads
/// its idle level (high, i.e. released for an active-low button).
pub struct MockPin {
    levels: heapless::Deque<PinState, 32>,
    idle: PinState,
    reads: usize,
}

impl MockPin {
    /// Create a pin that idles high.
    pub fn new() -> Self {
        Self {
            levels: heapless::Deque::new(),
            idle: PinState::High,
            reads: 0,
        }
    }

    /// Queue a level for a future read.
    pub fn push(&mut self, level: PinState) -> Result<(), PinState> {
        self.levels.push_back(level)
    }

    /// Number of reads performed.
    pub fn reads(&self) -> usize {
        self.reads
    }
}

impl Default for MockPin {
    fn default() -> Self {
        Self::new()
    }
}

impl InputPin for MockPin {
    type Error = core::convert::Infallible;

    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.reads = self.reads.saturating_add(1);
        let level = self.levels.pop_front().unwrap_or(self.idle);
        Ok(level.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_i2s_records_start_and_commits() {
        let mut i2s = MockI2s::new();
        i2s.start(BufferSlot::A, &[1, 2], StartFlags::NONE).unwrap();
        i2s.set_next_buffer(BufferSlot::B, &[3, 4]).unwrap();

        assert!(i2s.is_running());
        assert_eq!(i2s.slots(), [BufferSlot::A, BufferSlot::B]);
        assert_eq!(i2s.stream(), [1, 2, 3, 4]);
        assert_eq!(i2s.last_flags(), Some(StartFlags::NONE));

        i2s.stop();
        assert!(!i2s.is_running());
        assert_eq!(i2s.stop_count(), 1);
    }

    #[test]
    fn test_mock_i2s_rejects_commit_when_stopped() {
        let mut i2s = MockI2s::new();
        assert_eq!(
            i2s.set_next_buffer(BufferSlot::B, &[0]),
            Err(HardwareFault::CommitRejected)
        );
    }

    #[test]
    fn test_mock_i2s_scripted_failures() {
        let mut i2s = MockI2s::new().fail_start();
        assert_eq!(
            i2s.start(BufferSlot::A, &[0], StartFlags::NONE),
            Err(HardwareFault::StartRejected)
        );
        assert_eq!(i2s.start_count(), 0);

        let mut i2s = MockI2s::new().fail_commit_at(1);
        i2s.start(BufferSlot::A, &[0], StartFlags::NONE).unwrap();
        assert!(i2s.set_next_buffer(BufferSlot::B, &[0]).is_ok());
        assert_eq!(
            i2s.set_next_buffer(BufferSlot::A, &[0]),
            Err(HardwareFault::CommitRejected)
        );
    }

    #[test]
    fn test_mock_pin_script_then_idle() {
        let mut pin = MockPin::new();
        pin.push(PinState::Low).unwrap();

        assert!(pin.is_low().unwrap());
        assert!(pin.is_high().unwrap());
        assert_eq!(pin.reads(), 2);
    }
}
