//! I2S peripheral configuration.
//!
//! Peripheral bring-up belongs to the board glue; this module only describes
//! the wire format so the rest of the system can reason about timing.
//!
//! # Clock chain
//!
//! ```text
//! 32 MHz core clock
//!   → MCK = 32 MHz / mck_divider
//!   → LRCK (sample rate) = MCK / ratio
//! ```
//!
//! The reference board runs MCK = 32 MHz / 16 = 2 MHz with ratio 128, giving
//! 15 625 Hz mono on the left channel.

/// Words per DMA block (one 16-bit sample per 32-bit word).
pub const I2S_DATA_BLOCK_WORDS: usize = 2048;

/// Bytes of WAV header skipped before the first sample.
pub const WAV_HEADER_BYTES: usize = 44;

/// Core clock feeding the I2S master clock divider.
pub const CORE_CLOCK_HZ: u32 = 32_000_000;

/// Channels driven by the transmitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelMode {
    /// Left channel only; one word per frame.
    Left,
    /// Right channel only; one word per frame.
    Right,
    /// Both channels.
    Stereo,
}

/// Sample width on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SampleWidth {
    /// 8 bits per sample.
    Bits8,
    /// 16 bits per sample.
    Bits16,
    /// 24 bits per sample.
    Bits24,
}

impl SampleWidth {
    /// Bits per sample.
    pub const fn bits(self) -> u32 {
        match self {
            Self::Bits8 => 8,
            Self::Bits16 => 16,
            Self::Bits24 => 24,
        }
    }
}

/// Reason an [`I2sConfig`] cannot drive the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// MCK divider or ratio is zero.
    #[error("clock divider must be non-zero")]
    ZeroDivider,
    /// LRCK/MCK ratio leaves fewer SCK cycles than two samples need.
    #[error("ratio {ratio} too small for {width}-bit stereo frame")]
    RatioTooSmall {
        /// Configured ratio.
        ratio: u16,
        /// Sample width in bits.
        width: u32,
    },
    /// Block size of zero words.
    #[error("block size must be non-zero")]
    EmptyBlock,
}

/// I2S transmitter format and clocking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2sConfig {
    /// Core clock divider producing MCK.
    pub mck_divider: u16,
    /// MCK / LRCK ratio.
    pub ratio: u16,
    /// Sample width.
    pub sample_width: SampleWidth,
    /// Channels driven.
    pub channels: ChannelMode,
    /// Words per DMA block.
    pub block_words: usize,
}

impl Default for I2sConfig {
    fn default() -> Self {
        Self::mono_16bit()
    }
}

impl I2sConfig {
    /// Reference board: 16-bit left-only, MCK = 32 MHz / 16, ratio 128.
    pub const fn mono_16bit() -> Self {
        Self {
            mck_divider: 16,
            ratio: 128,
            sample_width: SampleWidth::Bits16,
            channels: ChannelMode::Left,
            block_words: I2S_DATA_BLOCK_WORDS,
        }
    }

    /// Check the configuration before handing it to a driver.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mck_divider == 0 || self.ratio == 0 {
            return Err(ConfigError::ZeroDivider);
        }
        if self.block_words == 0 {
            return Err(ConfigError::EmptyBlock);
        }
        let width = self.sample_width.bits();
        // A frame always clocks both channel slots, even in mono mode.
        if u32::from(self.ratio) < width.saturating_mul(2) {
            return Err(ConfigError::RatioTooSmall {
                ratio: self.ratio,
                width,
            });
        }
        Ok(())
    }

    /// Master clock in Hz; 0 for a zero divider.
    pub const fn mck_hz(&self) -> u32 {
        match CORE_CLOCK_HZ.checked_div(self.mck_divider as u32) {
            Some(hz) => hz,
            None => 0,
        }
    }

    /// Sample (LRCK) rate in Hz; 0 for a zero ratio.
    pub const fn sample_rate_hz(&self) -> u32 {
        match self.mck_hz().checked_div(self.ratio as u32) {
            Some(hz) => hz,
            None => 0,
        }
    }

    /// Time the hardware spends transmitting one block, in microseconds.
    ///
    /// This is the deadline for refilling a released block.
    pub fn block_period_us(&self) -> u64 {
        let rate = u64::from(self.sample_rate_hz());
        let words = u64::try_from(self.block_words).unwrap_or(u64::MAX);
        words.saturating_mul(1_000_000).checked_div(rate).unwrap_or(0)
    }
}
