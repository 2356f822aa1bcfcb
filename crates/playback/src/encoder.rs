//! PCM sample → I2S bus word encoding.
//!
//! In 16-bit mode the transmitter takes one 32-bit word per frame and sends
//! the low half on the active channel. Each sample is therefore zero-extended
//! into a word; slots past the end of the asset are filled with silence.

use crate::source::SampleSource;

/// Bus word carrying one sample: the little-endian 16-bit value in the low
/// half, zero in the high half.
#[inline]
pub const fn frame_word(sample: u16) -> u32 {
    sample as u32
}

/// Fill `block` from `source`, starting at `*cursor`.
///
/// Every slot gets either the next sample (advancing the cursor by one) or,
/// once the cursor has reached [`SampleSource::sample_count`], zero. Returns
/// the number of real samples written.
///
/// Runs inside the notification handler: no allocation, no error path, and
/// the cursor never moves backwards.
#[allow(clippy::arithmetic_side_effects)] // Safety: cursor only advances while < sample_count(); written <= block.len()
pub fn encode_block(source: &SampleSource<'_>, block: &mut [u32], cursor: &mut usize) -> usize {
    let mut written = 0;
    for slot in block.iter_mut() {
        match source.sample(*cursor) {
            Some(sample) => {
                *slot = frame_word(sample);
                *cursor += 1;
                written += 1;
            }
            None => *slot = 0,
        }
    }
    written
}
