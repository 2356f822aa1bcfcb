//! Trigger loop tests — button sampling and playback dispatch.
// Integration test file: expect/unwrap/panic are intentional test mechanisms.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::cast_possible_truncation,
    clippy::arithmetic_side_effects,
    clippy::indexing_slicing,
)]
//!
//! Run with: cargo test -p firmware --test trigger_loop

use embassy_futures::join::join;
use embassy_futures::yield_now;
use firmware::{poll_once, PlayButton, TriggerError};
use platform::mocks::{MockI2s, MockPin};
use platform::{BufferSlot, HardwareFault, I2sTransmitter, InputPin, Notification, PinState};
use playback::{PlaybackError, Player, RefillOutcome, SampleSource};

fn wav_asset(samples: usize) -> Vec<u8> {
    let mut asset = vec![0u8; 44];
    for i in 0..samples {
        asset.extend_from_slice(&((i + 1) as u16).to_le_bytes());
    }
    asset
}

fn pressed_pin() -> MockPin {
    let mut pin = MockPin::new();
    pin.push(PinState::Low).unwrap();
    pin
}

/// Stand-in for the I2S interrupt: one request per scheduler turn.
async fn interrupt<D: I2sTransmitter, const N: usize>(player: &Player<'_, D, N>) {
    for _ in 0..64 {
        yield_now().await;
        let outcome = player.on_notification(Notification::next_needed(None));
        if matches!(outcome, RefillOutcome::Completed | RefillOutcome::Faulted(_)) {
            return;
        }
    }
}

/// Pin whose reads always fail.
struct BrokenPin;

impl InputPin for BrokenPin {
    type Error = &'static str;

    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Err("gpio bank not clocked")
    }
}

#[test]
fn test_button_is_active_low() {
    let mut pin = MockPin::new();
    pin.push(PinState::Low).unwrap();
    pin.push(PinState::High).unwrap();
    let mut button = PlayButton::new(pin);

    assert!(button.is_pressed().unwrap());
    assert!(!button.is_pressed().unwrap());
    // Script exhausted: the pull-up keeps the line high.
    assert!(!button.is_pressed().unwrap());
    assert_eq!(button.into_inner().reads(), 3);
}

#[tokio::test]
async fn test_released_button_does_not_start_playback() {
    let asset = wav_asset(100);
    let source = SampleSource::new(&asset).unwrap();
    let player: Player<'_, MockI2s, 32> = Player::new(MockI2s::new());
    let mut button = PlayButton::new(MockPin::new());

    let result = poll_once(&mut button, &player, source).await.unwrap();

    assert!(result.is_none());
    assert_eq!(player.into_driver().start_count(), 0);
}

#[tokio::test]
async fn test_press_plays_whole_sample() {
    let asset = wav_asset(100);
    let source = SampleSource::new(&asset).unwrap();
    let player: Player<'_, MockI2s, 32> = Player::new(MockI2s::new());
    let mut button = PlayButton::new(pressed_pin());

    let (result, ()) = join(poll_once(&mut button, &player, source), interrupt(&player)).await;
    let report = result.unwrap().expect("pressed button should play");

    assert_eq!(report.samples, 100);
    assert_eq!(report.blocks, 4);
    assert!(player.is_complete());

    let i2s = player.into_driver();
    assert_eq!(
        i2s.slots(),
        [BufferSlot::A, BufferSlot::B, BufferSlot::A, BufferSlot::B]
    );
    assert_eq!(i2s.stop_count(), 1);
}

#[tokio::test]
async fn test_each_press_plays_once() {
    let asset = wav_asset(10);
    let source = SampleSource::new(&asset).unwrap();
    let player: Player<'_, MockI2s, 32> = Player::new(MockI2s::new());
    let mut pin = MockPin::new();
    for level in [PinState::Low, PinState::High, PinState::Low] {
        pin.push(level).unwrap();
    }
    let mut button = PlayButton::new(pin);

    let mut played = 0;
    for _ in 0..4 {
        let (result, ()) =
            join(poll_once(&mut button, &player, source), interrupt(&player)).await;
        if result.unwrap().is_some() {
            played += 1;
        }
    }

    assert_eq!(played, 2);
    assert_eq!(player.into_driver().start_count(), 2);
}

#[tokio::test]
async fn test_pin_error_is_reported() {
    let asset = wav_asset(10);
    let source = SampleSource::new(&asset).unwrap();
    let player: Player<'_, MockI2s, 32> = Player::new(MockI2s::new());
    let mut button = PlayButton::new(BrokenPin);

    let err = poll_once(&mut button, &player, source).await.unwrap_err();

    assert!(matches!(err, TriggerError::Pin("gpio bank not clocked")));
}

#[tokio::test]
async fn test_hardware_fault_is_reported() {
    let asset = wav_asset(10);
    let source = SampleSource::new(&asset).unwrap();
    let player: Player<'_, MockI2s, 32> = Player::new(MockI2s::new().fail_start());
    let mut button = PlayButton::new(pressed_pin());

    let err = poll_once(&mut button, &player, source).await.unwrap_err();

    assert!(matches!(
        err,
        TriggerError::Playback(PlaybackError::Hardware(HardwareFault::StartRejected))
    ));
    assert_eq!(
        err.to_string(),
        "playback failed: hardware fault: I2S start rejected"
    );
}
