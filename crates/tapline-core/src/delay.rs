//! Fixed integer-sample multichannel delay line.
//!
//! Stores incoming blocks in a per-channel ring and emits them a configured
//! number of samples later, sample-accurately, with no interpolation, no
//! feedback, and no coloration. Non-positive delay times switch the unit into
//! a true bypass that never touches the ring.
//!
//! The ring is sized `max_block_size + delay_samples` per channel, so a full
//! block can always be written without lapping the still-unread tail of the
//! delay. That sizing is what lets a single call write its whole input before
//! reading its whole output, even in place.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::vec;
use alloc::vec::Vec;

use crate::block::BlockProcessor;
use crate::ring::{RegionSplit, RingCursor};
use crate::stream::StreamSpec;
use libm::roundf;

/// Operating mode. Bypass is a distinct state, not a zero-length delay:
/// a bypassed unit reports zero latency and never reads or writes the ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Bypassed,
    Active { delay_samples: usize },
}

/// Integer-sample multichannel delay with a true bypass mode.
///
/// The delay time is set in seconds and converted to samples on
/// [`prepare`](BlockProcessor::prepare) by rounding half away from zero, so
/// `delay_seconds * sample_rate` of 47.5 becomes 48 samples. The sample count
/// is frozen until the next prepare.
///
/// Reconfiguring (either [`set_delay_seconds`](Self::set_delay_seconds) or
/// `prepare`) reallocates and silences the ring: in-flight delayed audio is
/// discarded. That discontinuity is the contract, not a bug — the caller
/// serializes reconfiguration against the audio thread.
///
/// # Example
///
/// ```rust
/// use tapline_core::{BlockProcessor, FixedDelay, StreamSpec};
///
/// let mut delay = FixedDelay::new();
/// delay.set_delay_seconds(0.25);
/// delay.prepare(StreamSpec { sample_rate: 44100.0, num_channels: 2, max_block_size: 512 });
/// assert_eq!(delay.delay_samples(), 11025);
/// ```
#[derive(Debug, Clone)]
pub struct FixedDelay {
    delay_seconds: f32,
    mode: Mode,
    spec: StreamSpec,
    cursor: RingCursor,
    /// Planar ring storage, one row per channel, each `cursor.len()` samples.
    buffer: Vec<Vec<f32>>,
}

impl Default for FixedDelay {
    fn default() -> Self {
        Self::new()
    }
}

impl FixedDelay {
    /// Create a bypassed delay. Call
    /// [`set_delay_seconds`](Self::set_delay_seconds) and
    /// [`prepare`](BlockProcessor::prepare) before processing.
    pub fn new() -> Self {
        let spec = StreamSpec::default();
        Self {
            delay_seconds: 0.0,
            mode: Mode::Bypassed,
            spec,
            cursor: RingCursor::new(spec.max_block_size),
            buffer: Vec::new(),
        }
    }

    /// Set the delay time and rebuild the ring for the held stream format.
    ///
    /// Values `<= 0.0` engage bypass: zero reported latency, identity
    /// pass-through, ring untouched. Positive values re-derive the sample
    /// count from the current sample rate. Either way the ring content is
    /// discarded, so this must not race a `process` call.
    pub fn set_delay_seconds(&mut self, seconds: f32) {
        if seconds <= 0.0 {
            self.delay_seconds = 0.0;
            self.mode = Mode::Bypassed;
        } else {
            self.delay_seconds = seconds;
            self.mode = Mode::Active { delay_samples: 0 };
        }
        self.prepare(self.spec);
    }

    /// Configured delay time in seconds (0.0 when bypassed).
    pub fn delay_seconds(&self) -> f32 {
        self.delay_seconds
    }

    /// Active delay in samples, or 0 when bypassed.
    pub fn delay_samples(&self) -> usize {
        match self.mode {
            Mode::Bypassed => 0,
            Mode::Active { delay_samples } => delay_samples,
        }
    }

    /// Whether the unit is in bypass.
    pub fn is_bypassed(&self) -> bool {
        self.mode == Mode::Bypassed
    }

    /// Block length for this call, clamped to the prepared maximum.
    /// Oversized blocks are a caller contract violation; never write past
    /// what the ring was sized for.
    fn span_for(&self, block_len: usize) -> usize {
        debug_assert!(
            block_len <= self.spec.max_block_size,
            "block length {} exceeds prepared maximum {}",
            block_len,
            self.spec.max_block_size
        );
        block_len.min(self.spec.max_block_size)
    }
}

/// Copy `split.first_len + split.second_len` samples from `src` into the ring.
#[inline]
fn copy_into_ring(ring: &mut [f32], split: RegionSplit, src: &[f32]) {
    ring[split.start..split.start + split.first_len].copy_from_slice(&src[..split.first_len]);
    if split.second_len > 0 {
        ring[..split.second_len]
            .copy_from_slice(&src[split.first_len..split.first_len + split.second_len]);
    }
}

/// Copy `split.first_len + split.second_len` samples from the ring into `dst`.
#[inline]
fn copy_from_ring(ring: &[f32], split: RegionSplit, dst: &mut [f32]) {
    dst[..split.first_len].copy_from_slice(&ring[split.start..split.start + split.first_len]);
    if split.second_len > 0 {
        dst[split.first_len..split.first_len + split.second_len]
            .copy_from_slice(&ring[..split.second_len]);
    }
}

impl BlockProcessor for FixedDelay {
    /// Adopt `spec` and rebuild the ring.
    ///
    /// Derives `delay_samples = round(delay_seconds * sample_rate)` (half
    /// away from zero), allocates `num_channels` rows of
    /// `max_block_size + delay_samples` samples, zero-fills them, and rewinds
    /// the write cursor. Runs off the audio thread; this is the only place
    /// the unit allocates.
    fn prepare(&mut self, spec: StreamSpec) {
        spec.debug_validate();
        self.spec = spec;

        let delay_samples = match self.mode {
            Mode::Bypassed => 0,
            Mode::Active { .. } => {
                let samples = roundf(self.delay_seconds * spec.sample_rate).max(0.0) as usize;
                self.mode = Mode::Active {
                    delay_samples: samples,
                };
                samples
            }
        };

        let len = spec.max_block_size + delay_samples;
        self.cursor = RingCursor::new(len);
        self.buffer = vec![vec![0.0; len]; spec.num_channels];

        #[cfg(feature = "tracing")]
        tracing::debug!(
            delay_samples,
            ring_len = len,
            channels = spec.num_channels,
            "delay prepared"
        );
    }

    fn process(&mut self, input: &[&[f32]], output: &mut [&mut [f32]]) {
        let Mode::Active { delay_samples } = self.mode else {
            for (inp, out) in input.iter().zip(output.iter_mut()) {
                out.copy_from_slice(inp);
            }
            return;
        };

        let block_len = input.first().map_or(0, |ch| ch.len());
        let span = self.span_for(block_len);
        // Extra channels from adjacent stages are tolerated and ignored.
        let channels = self
            .buffer
            .len()
            .min(input.len())
            .min(output.len());

        let write = self.cursor.write_regions(span);
        for ch in 0..channels {
            copy_into_ring(&mut self.buffer[ch], write, input[ch]);
        }

        let read = self.cursor.read_regions(delay_samples, span);
        for ch in 0..channels {
            copy_from_ring(&self.buffer[ch], read, output[ch]);
        }

        self.cursor.advance(span);
    }

    /// In-place variant. The write phase runs for every channel before any
    /// read: with `delay_samples > 0` the two region sets cannot overlap
    /// (the ring is `max_block_size + delay_samples` long), and at exactly 0
    /// the read returns the samples just written, which is the correct
    /// identity output.
    fn process_in_place(&mut self, block: &mut [&mut [f32]]) {
        let Mode::Active { delay_samples } = self.mode else {
            return;
        };

        let block_len = block.first().map_or(0, |ch| ch.len());
        let span = self.span_for(block_len);
        let channels = self.buffer.len().min(block.len());

        let write = self.cursor.write_regions(span);
        for ch in 0..channels {
            copy_into_ring(&mut self.buffer[ch], write, block[ch]);
        }

        let read = self.cursor.read_regions(delay_samples, span);
        for ch in 0..channels {
            copy_from_ring(&self.buffer[ch], read, block[ch]);
        }

        self.cursor.advance(span);
    }

    /// Silence the ring and rewind the cursor, keeping the delay time and
    /// geometry. Real-time safe.
    fn reset(&mut self) {
        for ch in &mut self.buffer {
            ch.fill(0.0);
        }
        self.cursor.rewind();
    }

    fn latency_samples(&self) -> usize {
        self.delay_samples()
    }
}
