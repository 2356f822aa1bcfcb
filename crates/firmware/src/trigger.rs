//! Play trigger — an active-low push button.
//!
//! The button pulls the pin to ground when pressed; the pin idles high on
//! its pull-up. Debouncing is not needed: a press only starts a session, and
//! the next read happens after the whole sample has played.

use platform::{InputPin, PinState};

/// Level that means "pressed".
pub const PRESSED_LEVEL: PinState = PinState::Low;

/// Push button wired to an input with a pull-up.
pub struct PlayButton<P> {
    pin: P,
}

impl<P: InputPin> PlayButton<P> {
    /// Wrap a pin already configured as input with pull-up.
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Sample the pin once.
    pub fn is_pressed(&mut self) -> Result<bool, P::Error> {
        Ok(self.pin.state()? == PRESSED_LEVEL)
    }

    /// Give the pin back.
    pub fn into_inner(self) -> P {
        self.pin
    }
}
