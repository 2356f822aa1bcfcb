//! GPIO input abstraction
//!
//! The play trigger is a level-sensed input. Board code either implements
//! [`InputPin`] directly or wraps any `embedded-hal` 1.0 input in
//! [`HalInput`].

/// Input pin operations
pub trait InputPin {
    /// Error type
    type Error;

    /// Read pin state
    fn is_high(&mut self) -> Result<bool, Self::Error>;

    /// Read pin state (inverted)
    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|v| !v)
    }

    /// Read the level as a [`PinState`]
    fn state(&mut self) -> Result<PinState, Self::Error> {
        self.is_high().map(PinState::from)
    }
}

/// Pin state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinState {
    /// High (logic 1)
    High,
    /// Low (logic 0)
    Low,
}

impl From<bool> for PinState {
    fn from(value: bool) -> Self {
        if value {
            Self::High
        } else {
            Self::Low
        }
    }
}

impl From<PinState> for bool {
    fn from(value: PinState) -> Self {
        matches!(value, PinState::High)
    }
}

/// Adapter from an `embedded-hal` digital input to [`InputPin`].
pub struct HalInput<P> {
    pin: P,
}

impl<P> HalInput<P> {
    /// Wrap a HAL pin.
    pub const fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Unwrap the HAL pin.
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: embedded_hal::digital::InputPin> InputPin for HalInput<P> {
    type Error = P::Error;

    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.pin.is_high()
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.pin.is_low()
    }
}
