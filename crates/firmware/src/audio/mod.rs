//! Audio output back-ends.
//!
//! Application code targets the [`platform::I2sTransmitter`] trait.
//! Concrete types are injected at the call site:
//!
//! ```rust,ignore
//! // Board:
//! static PLAYER: Player<'static, BoardI2s, I2S_DATA_BLOCK_WORDS> = Player::new(BoardI2s::new());
//! // Desktop:
//! let (i2s, clock) = SimI2s::new(period);
//! let player = Player::<'_, SimI2s, I2S_DATA_BLOCK_WORDS>::new(i2s);
//! // Tests:
//! let player = Player::<'_, MockI2s, 16>::new(MockI2s::new());
//! ```

#[cfg(feature = "emulator")]
pub mod sim;
