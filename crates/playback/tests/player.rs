//! Player integration tests: `play` driven against the mock transmitter,
//! with a second future standing in for the I2S interrupt.

#![allow(clippy::unwrap_used, clippy::expect_used)]
#![allow(clippy::indexing_slicing, clippy::arithmetic_side_effects)]
#![allow(clippy::cast_possible_truncation)]

use embassy_futures::join::{join, join3};
use embassy_futures::yield_now;
use platform::mocks::MockI2s;
use platform::{BufferSlot, HardwareFault, I2sTransmitter, Notification};
use playback::{PlaybackError, Player, RefillOutcome, RefillState, SampleSource};

const MAX_NOTIFICATIONS: usize = 64;

/// WAV image: 44 header bytes followed by `samples` samples valued 1, 2, 3…
fn wav_asset(samples: usize) -> Vec<u8> {
    let mut asset = vec![0xA5u8; 44];
    for i in 0..samples {
        asset.extend_from_slice(&((i + 1) as u16).to_le_bytes());
    }
    asset
}

/// Play the interrupt: one buffer request per scheduler turn until the
/// session ends.
async fn feed<D: I2sTransmitter, const N: usize>(player: &Player<'_, D, N>) -> Vec<RefillOutcome> {
    let mut outcomes = Vec::new();
    for _ in 0..MAX_NOTIFICATIONS {
        yield_now().await;
        let outcome = player.on_notification(Notification::next_needed(None));
        outcomes.push(outcome);
        if matches!(outcome, RefillOutcome::Completed | RefillOutcome::Faulted(_)) {
            break;
        }
    }
    outcomes
}

#[tokio::test]
async fn plays_5000_samples_in_three_blocks() {
    let asset = wav_asset(5000);
    let source = SampleSource::new(&asset).unwrap();
    let player: Player<'_, MockI2s, 2048> = Player::new(MockI2s::new());

    let (result, outcomes) = join(player.play(source), feed(&player)).await;
    let report = result.expect("playback should complete");

    assert_eq!(
        outcomes,
        [
            RefillOutcome::Handoff {
                slot: BufferSlot::B,
                samples: 2048
            },
            RefillOutcome::Handoff {
                slot: BufferSlot::A,
                samples: 904
            },
            RefillOutcome::DrainStarted,
            RefillOutcome::Completed,
        ]
    );
    assert_eq!(report.samples, 5000);
    assert_eq!(report.blocks, 3);
    assert_eq!(report.notifications, 4);
    assert!(player.is_complete());
    assert_eq!(player.state(), RefillState::Idle);

    let i2s = player.into_driver();
    assert_eq!(i2s.slots(), [BufferSlot::A, BufferSlot::B, BufferSlot::A]);
    assert_eq!(i2s.stop_count(), 1);
    assert!(!i2s.is_running());

    let stream = i2s.stream();
    assert_eq!(stream.len(), 3 * 2048);
    for (i, word) in stream.iter().take(5000).enumerate() {
        assert_eq!(*word, (i + 1) as u32, "word {i}");
    }
    assert!(stream[5000..].iter().all(|&w| w == 0), "tail must be silence");
}

#[tokio::test]
async fn header_only_asset_completes_on_second_request() {
    let asset = wav_asset(0);
    let source = SampleSource::new(&asset).unwrap();
    let player: Player<'_, MockI2s, 16> = Player::new(MockI2s::new());

    let (result, outcomes) = join(player.play(source), feed(&player)).await;
    let report = result.unwrap();

    assert_eq!(outcomes, [RefillOutcome::DrainStarted, RefillOutcome::Completed]);
    assert_eq!(report.samples, 0);
    assert_eq!(report.blocks, 1);

    let i2s = player.into_driver();
    assert_eq!(i2s.slots(), [BufferSlot::A]);
    assert!(i2s.stream().iter().all(|&w| w == 0));
}

#[tokio::test]
async fn second_play_restarts_from_the_first_sample() {
    let asset = wav_asset(40);
    let source = SampleSource::new(&asset).unwrap();
    let player: Player<'_, MockI2s, 16> = Player::new(MockI2s::new());

    let (first, _) = join(player.play(source), feed(&player)).await;
    assert_eq!(first.unwrap().samples, 40);
    assert!(player.is_complete());

    let observer = async {
        yield_now().await;
        assert!(!player.is_complete(), "completion flag is cleared by start");
        assert_eq!(player.state(), RefillState::Streaming);
        feed(&player).await
    };
    let (second, _) = join(player.play(source), observer).await;
    assert_eq!(second.unwrap().samples, 40);
    assert!(player.is_complete());

    let i2s = player.into_driver();
    assert_eq!(i2s.start_count(), 2);
    assert_eq!(i2s.stop_count(), 2);
    // Both sessions open on block A with sample 1.
    let starts: Vec<_> = i2s
        .handoffs()
        .iter()
        .filter(|h| h.words.first() == Some(&1))
        .collect();
    assert_eq!(starts.len(), 2);
    assert!(starts.iter().all(|h| h.slot == BufferSlot::A));
}

#[tokio::test]
async fn overlapping_play_is_rejected_as_busy() {
    let asset = wav_asset(100);
    let source = SampleSource::new(&asset).unwrap();
    let player: Player<'_, MockI2s, 32> = Player::new(MockI2s::new());

    let (first, second, _) = join3(player.play(source), player.play(source), feed(&player)).await;

    assert_eq!(first.unwrap().samples, 100);
    assert_eq!(second, Err(PlaybackError::Busy));
    assert_eq!(player.into_driver().start_count(), 1);
}

#[tokio::test]
async fn start_rejection_is_reported_and_leaves_player_idle() {
    let asset = wav_asset(10);
    let source = SampleSource::new(&asset).unwrap();
    let player: Player<'_, MockI2s, 16> = Player::new(MockI2s::new().fail_start());

    let result = player.play(source).await;

    assert_eq!(
        result,
        Err(PlaybackError::Hardware(HardwareFault::StartRejected))
    );
    assert_eq!(player.state(), RefillState::Idle);
    assert!(!player.is_complete());
}

#[tokio::test]
async fn rejected_block_aborts_and_stops_transfer() {
    let asset = wav_asset(5000);
    let source = SampleSource::new(&asset).unwrap();
    let player: Player<'_, MockI2s, 2048> = Player::new(MockI2s::new().fail_commit_at(0));

    let (result, outcomes) = join(player.play(source), feed(&player)).await;

    assert_eq!(
        result,
        Err(PlaybackError::Hardware(HardwareFault::CommitRejected))
    );
    assert_eq!(
        outcomes,
        [RefillOutcome::Faulted(HardwareFault::CommitRejected)]
    );
    assert!(!player.is_complete());
    assert_eq!(player.state(), RefillState::Idle);

    let i2s = player.into_driver();
    assert_eq!(i2s.stop_count(), 1);
    assert!(!i2s.is_running());
}

#[test]
fn notifications_without_session_are_ignored() {
    let player: Player<'_, MockI2s, 16> = Player::new(MockI2s::new());
    assert_eq!(
        player.on_notification(Notification::next_needed(Some(BufferSlot::A))),
        RefillOutcome::Ignored
    );
    assert_eq!(player.state(), RefillState::Idle);
    assert!(player.into_driver().handoffs().is_empty());
}

#[test]
fn short_asset_is_rejected_before_playback() {
    let asset = [0u8; 20];
    assert_eq!(
        SampleSource::new(&asset),
        Err(PlaybackError::AssetTooShort { len: 20 })
    );
}
