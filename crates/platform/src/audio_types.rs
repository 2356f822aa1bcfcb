//! I2S transfer newtypes for compile-time safety.
//!
//! These zero-cost wrappers keep raw driver words from leaking into the
//! refill protocol:
//! - `BufferSlot`: which half of the double buffer a word block lives in
//! - `TxStatus`: status bits delivered with every driver notification
//! - `StartFlags`: flags forwarded verbatim to the driver's `start`

// ── BufferSlot ───────────────────────────────────────────────────────────────

/// One of the two blocks of a double buffer.
///
/// Alternation is the only arithmetic defined on a slot: [`BufferSlot::other`]
/// is `(index + 1) mod 2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BufferSlot {
    /// Slot 0, the block the transfer starts on.
    A,
    /// Slot 1, the backup block.
    B,
}

impl BufferSlot {
    /// The opposite slot.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }

    /// Numeric index (0 or 1).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
        }
    }

    /// Slot for a numeric index; anything other than 0 or 1 is `None`.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::A),
            1 => Some(Self::B),
            _ => None,
        }
    }
}

// ── TxStatus ─────────────────────────────────────────────────────────────────

/// Status word passed to the notification callback.
///
/// Bit positions follow the nRF I2S driver (`NRFX_I2S_STATUS_*`). Only
/// [`TxStatus::NEXT_BUFFERS_NEEDED`] drives playback; all other bits are
/// carried for logging and otherwise ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct TxStatus(u32);

impl TxStatus {
    /// No bits set.
    pub const EMPTY: Self = Self(0);

    /// The driver latched the pending buffer and needs the next one.
    pub const NEXT_BUFFERS_NEEDED: Self = Self(1 << 0);

    /// The transfer has been stopped.
    pub const TRANSFER_STOPPED: Self = Self(1 << 1);

    /// Wrap a raw status word from the driver.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Raw status word.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// `true` if every bit of `other` is set in `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// `true` if the driver is asking for the next buffer.
    #[must_use]
    pub const fn next_buffers_needed(self) -> bool {
        self.contains(Self::NEXT_BUFFERS_NEEDED)
    }
}

impl core::ops::BitOr for TxStatus {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

// ── StartFlags ───────────────────────────────────────────────────────────────

/// Flags forwarded to [`I2sTransmitter::start`](crate::I2sTransmitter::start).
///
/// Playback always starts with [`StartFlags::NONE`]. The raw word is the
/// value a board driver hands to the peripheral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct StartFlags(pub u32);

impl StartFlags {
    /// No flags.
    pub const NONE: Self = Self(0);
}
