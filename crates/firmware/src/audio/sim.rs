//! Simulated I2S peripheral for the desktop emulator.
//!
//! [`SimI2s`] is the driver half handed to the [`Player`]; [`SimClock`] is
//! the peripheral half that clocks blocks out in real time and raises the
//! "next buffer needed" notifications. Both share one bus state behind a
//! `std::sync::Mutex`.
//!
//! # Timing
//!
//! Like the nRF52 I2S block, the peripheral asks for the next buffer as soon
//! as a transfer starts, and again each time it switches to a new block. A
//! block lasts [`I2sConfig::block_period_us`]. If no next buffer was
//! committed when a block ends, the current one is transmitted again.
//!
//! # Lock order
//!
//! The driver half is only called from inside the player's critical section
//! and takes the bus lock second. The clock releases the bus lock before it
//! calls [`Player::on_notification`], so the two never nest the other way.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use std::vec::Vec;

use platform::{BufferSlot, HardwareFault, I2sConfig, I2sTransmitter, Notification, StartFlags};
use playback::Player;

/// Granularity at which [`SimClock::run`] checks for block boundaries.
const POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Peripheral state shared by the driver and clock halves.
#[derive(Debug, Default)]
struct SimBus {
    running: bool,
    current: Option<BufferSlot>,
    current_words: Vec<u32>,
    next: Option<(BufferSlot, Vec<u32>)>,
    request_pending: bool,
    block_started: Option<Instant>,
    captured: Vec<u32>,
    replays: usize,
}

impl SimBus {
    fn poll(&mut self, now: Instant, period: Duration) -> Option<Notification> {
        if !self.running {
            return None;
        }
        if self.request_pending {
            self.request_pending = false;
            return Some(Notification::next_needed(None));
        }
        let started = self.block_started?;
        if now.saturating_duration_since(started) < period {
            return None;
        }
        self.block_started = Some(started.checked_add(period).unwrap_or(now));
        self.captured.extend_from_slice(&self.current_words);

        let released = self.current;
        match self.next.take() {
            Some((slot, words)) => {
                self.current = Some(slot);
                self.current_words = words;
            }
            None => self.replays = self.replays.saturating_add(1),
        }
        Some(Notification::next_needed(released))
    }
}

fn lock(bus: &Mutex<SimBus>) -> MutexGuard<'_, SimBus> {
    bus.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Driver half of the simulated peripheral.
#[derive(Debug)]
pub struct SimI2s {
    bus: Arc<Mutex<SimBus>>,
}

impl SimI2s {
    /// Create a stopped peripheral whose blocks last `period` each.
    pub fn new(period: Duration) -> (Self, SimClock) {
        let bus = Arc::new(Mutex::new(SimBus::default()));
        let clock = SimClock {
            bus: Arc::clone(&bus),
            period,
        };
        (Self { bus }, clock)
    }

    /// Handle onto the captured output.
    pub fn tap(&self) -> SimTap {
        SimTap {
            bus: Arc::clone(&self.bus),
        }
    }
}

impl I2sTransmitter for SimI2s {
    fn start(
        &mut self,
        slot: BufferSlot,
        words: &[u32],
        _flags: StartFlags,
    ) -> Result<(), HardwareFault> {
        let mut bus = lock(&self.bus);
        if bus.running {
            return Err(HardwareFault::StartRejected);
        }
        bus.running = true;
        bus.current = Some(slot);
        bus.current_words = words.to_vec();
        bus.next = None;
        bus.request_pending = true;
        bus.block_started = Some(Instant::now());
        Ok(())
    }

    fn set_next_buffer(&mut self, slot: BufferSlot, words: &[u32]) -> Result<(), HardwareFault> {
        let mut bus = lock(&self.bus);
        if !bus.running || bus.next.is_some() {
            return Err(HardwareFault::CommitRejected);
        }
        bus.next = Some((slot, words.to_vec()));
        Ok(())
    }

    fn stop(&mut self) {
        let mut bus = lock(&self.bus);
        bus.running = false;
        bus.next = None;
        bus.request_pending = false;
        bus.block_started = None;
    }
}

/// Peripheral half: turns elapsed time into notifications.
#[derive(Debug)]
pub struct SimClock {
    bus: Arc<Mutex<SimBus>>,
    period: Duration,
}

impl SimClock {
    /// Duration of one block.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Advance the peripheral to `now` and return the notification due, if
    /// any. At most one block boundary is consumed per call.
    pub fn poll(&self, now: Instant) -> Option<Notification> {
        lock(&self.bus).poll(now, self.period)
    }

    /// Handle onto the captured output.
    pub fn tap(&self) -> SimTap {
        SimTap {
            bus: Arc::clone(&self.bus),
        }
    }

    /// Deliver notifications to `player` forever, as the interrupt would.
    pub async fn run<D: I2sTransmitter, const N: usize>(self, player: &Player<'_, D, N>) -> ! {
        let mut ticker = tokio::time::interval(POLL_INTERVAL);
        loop {
            ticker.tick().await;
            while let Some(notification) = self.poll(Instant::now()) {
                tracing::trace!(?notification, "i2s interrupt");
                player.on_notification(notification);
            }
        }
    }
}

/// Read access to everything the simulated bus has clocked out.
#[derive(Debug, Clone)]
pub struct SimTap {
    bus: Arc<Mutex<SimBus>>,
}

impl SimTap {
    /// Every word transmitted so far, in order.
    pub fn captured(&self) -> Vec<u32> {
        lock(&self.bus).captured.clone()
    }

    /// Blocks transmitted twice because no next buffer was ready.
    pub fn replays(&self) -> usize {
        lock(&self.bus).replays
    }

    /// `true` while a transfer is running.
    pub fn is_running(&self) -> bool {
        lock(&self.bus).running
    }

    /// Write the captured stream as a mono 16-bit WAV at the sample rate of
    /// `config`. Returns the number of samples written.
    pub fn write_wav(&self, path: impl AsRef<Path>, config: &I2sConfig) -> Result<usize, hound::Error> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: config.sample_rate_hz(),
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let captured = self.captured();
        let mut writer = hound::WavWriter::create(path, spec)?;
        for &word in &captured {
            writer.write_sample(pcm_sample(word))?;
        }
        writer.finalize()?;
        Ok(captured.len())
    }
}

/// The sample carried in the low half of a bus word.
fn pcm_sample(word: u32) -> i16 {
    let [low, high, _, _] = word.to_le_bytes();
    i16::from_le_bytes([low, high])
}
