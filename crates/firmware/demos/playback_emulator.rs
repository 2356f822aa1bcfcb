//! I2S Sample Player Emulator
//!
//! Plays a generated tone through the simulated I2S peripheral at the real
//! block rate, pressing the button twice, and writes what the bus clocked out
//! to a WAV file.
//!
//! Run with: cargo run -p firmware --example playback_emulator --features emulator [-- out.wav]

#![allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]

use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

use firmware::{poll_once, PlayButton, SimI2s};
use platform::config::{self, TRIGGER_POLL_MS};
use platform::mocks::MockPin;
use platform::{I2sConfig, PinState, I2S_DATA_BLOCK_WORDS};
use playback::{Player, SampleSource};
use tracing_subscriber::EnvFilter;

/// Tone length in samples (~0.6 s at 15 625 Hz, three blocks and a bit).
const TONE_SAMPLES: usize = 9_500;
const TONE_HZ: f32 = 440.0;

/// Build a WAV image the way the linker would embed it: header, then PCM.
fn tone_asset(sample_rate: u32) -> Result<Vec<u8>, hound::Error> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut image = Vec::new();
    let mut writer = hound::WavWriter::new(Cursor::new(&mut image), spec)?;
    for n in 0..TONE_SAMPLES {
        let t = n as f32 / sample_rate as f32;
        let value = (t * TONE_HZ * std::f32::consts::TAU).sin() * 0.4 * f32::from(i16::MAX);
        writer.write_sample(value as i16)?;
    }
    writer.finalize()?;
    Ok(image)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("{}", config::dev_banner());

    let out = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "playback_emulator.wav".to_string());

    let i2s_config = I2sConfig::mono_16bit();
    i2s_config.validate()?;
    println!(
        "I2S: {} Hz, {}-bit, {} words per block ({} µs)\n",
        i2s_config.sample_rate_hz(),
        i2s_config.sample_width.bits(),
        i2s_config.block_words,
        i2s_config.block_period_us()
    );

    let asset: &'static [u8] = Box::leak(tone_asset(i2s_config.sample_rate_hz())?.into_boxed_slice());
    let source = SampleSource::new(asset)?;

    let (i2s, clock) = SimI2s::new(Duration::from_micros(i2s_config.block_period_us()));
    let tap = i2s.tap();
    let player: Arc<Player<'static, SimI2s, I2S_DATA_BLOCK_WORDS>> = Arc::new(Player::new(i2s));

    let irq_player = Arc::clone(&player);
    tokio::spawn(async move { clock.run(&*irq_player).await });

    // Two presses separated by a release.
    let mut pin = MockPin::new();
    for level in [PinState::Low, PinState::High, PinState::Low] {
        pin.push(level).map_err(|_| "button script too long")?;
    }
    let mut button = PlayButton::new(pin);

    for _ in 0..3 {
        match poll_once(&mut button, &*player, source).await? {
            Some(report) => println!(
                "✓ played {} samples in {} blocks ({} notifications)",
                report.samples, report.blocks, report.notifications
            ),
            None => println!("  button released"),
        }
        tokio::time::sleep(Duration::from_millis(TRIGGER_POLL_MS)).await;
    }

    let written = tap.write_wav(&out, &i2s_config)?;
    println!("\nWrote {written} samples to {out} ({} block replays)", tap.replays());
    Ok(())
}
