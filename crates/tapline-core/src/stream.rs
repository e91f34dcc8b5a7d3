//! Processing format description shared between host and processors.

/// Processing format: sample rate, channel count, and the largest block the
/// host will ever hand to [`process`](crate::BlockProcessor::process).
///
/// Handed to [`BlockProcessor::prepare`](crate::BlockProcessor::prepare)
/// whenever the host (re)configures the stream. Processors size their internal
/// state from it and must then accept any block length up to `max_block_size`.
///
/// Invalid values (non-positive sample rate, zero channels, zero block size)
/// are caller contract violations: they trip [`debug_assert`]s in development
/// builds and produce unspecified sizing in release builds. Callers validate
/// before preparing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreamSpec {
    /// Sample rate in Hz (e.g. 44100.0, 48000.0).
    pub sample_rate: f32,
    /// Number of audio channels.
    pub num_channels: usize,
    /// Largest block length, in samples per channel, a single `process` call
    /// may carry.
    pub max_block_size: usize,
}

impl Default for StreamSpec {
    fn default() -> Self {
        Self {
            sample_rate: 48000.0,
            num_channels: 2,
            max_block_size: 512,
        }
    }
}

impl StreamSpec {
    /// Assert the spec is usable. Development-build guard only; release
    /// builds trust the caller.
    pub fn debug_validate(&self) {
        debug_assert!(
            self.sample_rate > 0.0,
            "sample rate must be positive, got {}",
            self.sample_rate
        );
        debug_assert!(self.num_channels > 0, "channel count must be non-zero");
        debug_assert!(self.max_block_size > 0, "max block size must be non-zero");
    }
}
