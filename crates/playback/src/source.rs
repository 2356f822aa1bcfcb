//! Read-only PCM sample asset.
//!
//! The asset is a WAV image linked into flash: a 44-byte header that is
//! skipped without inspection, followed by little-endian 16-bit mono samples.

use platform::WAV_HEADER_BYTES;

use crate::error::PlaybackError;

/// Borrowed view of the sample region of a WAV asset.
///
/// Cheap to copy; it only holds the slice after the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleSource<'a> {
    pcm: &'a [u8],
}

impl<'a> SampleSource<'a> {
    /// Wrap a complete asset, header included.
    ///
    /// The header is not validated; only its length is required.
    ///
    /// # Errors
    ///
    /// [`PlaybackError::AssetTooShort`] if `asset` is shorter than the header.
    pub fn new(asset: &'a [u8]) -> Result<Self, PlaybackError> {
        match asset.get(WAV_HEADER_BYTES..) {
            Some(pcm) => Ok(Self { pcm }),
            None => Err(PlaybackError::AssetTooShort { len: asset.len() }),
        }
    }

    /// Wrap raw PCM bytes with no header in front.
    pub const fn from_pcm(pcm: &'a [u8]) -> Self {
        Self { pcm }
    }

    /// Number of whole 16-bit samples. A trailing odd byte is ignored.
    pub const fn sample_count(&self) -> usize {
        self.pcm.len() / 2
    }

    /// `true` when the asset holds no complete sample.
    pub const fn is_empty(&self) -> bool {
        self.sample_count() == 0
    }

    /// Sample `index` as its raw little-endian 16-bit value.
    #[allow(clippy::arithmetic_side_effects)] // Safety: index < sample_count() <= usize::MAX / 2, so 2 * index + 1 cannot overflow
    pub fn sample(&self, index: usize) -> Option<u16> {
        if index >= self.sample_count() {
            return None;
        }
        let low = *self.pcm.get(2 * index)?;
        let high = *self.pcm.get(2 * index + 1)?;
        Some(u16::from_le_bytes([low, high]))
    }
}
