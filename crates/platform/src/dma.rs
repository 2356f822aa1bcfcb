//! DMA double-buffer storage
//!
//! Provides the fixed-capacity word blocks the I2S driver reads from.

use crate::audio_types::BufferSlot;

/// Two `N`-word blocks, addressed by [`BufferSlot`].
///
/// Capacity is set at compile time and never changes, so the refill handler
/// never allocates. Ownership (which block hardware is reading) is tracked by
/// the caller; this type only stores words.
pub struct BufferPair<const N: usize> {
    blocks: [[u32; N]; 2],
}

impl<const N: usize> Default for BufferPair<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> BufferPair<N> {
    /// Both blocks zeroed (silence).
    ///
    /// `const` so a pair can sit in a `static` without a runtime initialiser.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            blocks: [[0; N]; 2],
        }
    }

    /// Words per block.
    #[must_use]
    pub const fn block_words(&self) -> usize {
        N
    }

    /// Read access to one block.
    #[must_use]
    pub fn block(&self, slot: BufferSlot) -> &[u32; N] {
        let [a, b] = &self.blocks;
        match slot {
            BufferSlot::A => a,
            BufferSlot::B => b,
        }
    }

    /// Write access to one block.
    pub fn block_mut(&mut self, slot: BufferSlot) -> &mut [u32; N] {
        let [a, b] = &mut self.blocks;
        match slot {
            BufferSlot::A => a,
            BufferSlot::B => b,
        }
    }

    /// Zero both blocks.
    pub fn clear(&mut self) {
        for block in &mut self.blocks {
            block.fill(0);
        }
    }
}
