//! WAV file reading and writing, planar at the API surface.

use crate::{Error, Result};
use hound::{SampleFormat, WavReader, WavWriter};
use std::path::Path;
use tracing::debug;

/// WAV audio encoding format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavFormat {
    /// Linear PCM (integer samples).
    Pcm,
    /// IEEE 754 floating-point samples.
    IeeeFloat,
}

/// WAV file metadata extracted without loading sample data.
#[derive(Debug, Clone)]
pub struct WavInfo {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample.
    pub bits_per_sample: u16,
    /// Total number of sample frames (samples per channel).
    pub num_frames: u64,
    /// Duration in seconds.
    pub duration_secs: f64,
    /// Audio encoding format.
    pub format: WavFormat,
}

/// Read WAV metadata without loading sample data.
///
/// Much faster than [`read_wav_planar`] when only format details and
/// duration are needed.
pub fn read_wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let total_samples = reader.len() as u64; // total across all channels
    let num_frames = total_samples / spec.channels as u64;
    let duration_secs = num_frames as f64 / spec.sample_rate as f64;

    let format = match spec.sample_format {
        SampleFormat::Float => WavFormat::IeeeFloat,
        SampleFormat::Int => WavFormat::Pcm,
    };

    Ok(WavInfo {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        num_frames,
        duration_secs,
        format,
    })
}

/// WAV file specification.
#[derive(Debug, Clone, Copy)]
pub struct WavSpec {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz (e.g., 44100, 48000).
    pub sample_rate: u32,
    /// Bit depth per sample (e.g., 16, 24, 32).
    pub bits_per_sample: u16,
}

impl Default for WavSpec {
    fn default() -> Self {
        Self {
            channels: 2,
            sample_rate: 48000,
            bits_per_sample: 32,
        }
    }
}

impl From<hound::WavSpec> for WavSpec {
    fn from(spec: hound::WavSpec) -> Self {
        Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
        }
    }
}

impl From<WavSpec> for hound::WavSpec {
    fn from(spec: WavSpec) -> Self {
        hound::WavSpec {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            sample_format: if spec.bits_per_sample == 32 {
                SampleFormat::Float
            } else {
                SampleFormat::Int
            },
        }
    }
}

/// Read a WAV file into planar f32 channels.
///
/// Integer PCM is normalized to `[-1.0, 1.0]`; 32-bit float passes through
/// untouched. Channels are deinterleaved, so `channels[0]` is the full left
/// channel of a stereo file.
pub fn read_wav_planar<P: AsRef<Path>>(path: P) -> Result<(Vec<Vec<f32>>, WavSpec)> {
    let path = path.as_ref();
    let reader = WavReader::open(path)?;
    let spec = WavSpec::from(reader.spec());
    let num_channels = spec.channels as usize;

    let interleaved: Vec<f32> = match reader.spec().sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let bits = spec.bits_per_sample;
            // Widen before shifting: 1i32 << 31 would wrap to i32::MIN and
            // flip the polarity of 32-bit PCM files.
            let max_val = (1u64 << (bits - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    let num_frames = interleaved.len() / num_channels;
    let mut channels = vec![Vec::with_capacity(num_frames); num_channels];
    for frame in interleaved.chunks_exact(num_channels) {
        for (ch, &sample) in frame.iter().enumerate() {
            channels[ch].push(sample);
        }
    }

    debug!(
        path = %path.display(),
        channels = num_channels,
        frames = num_frames,
        sample_rate = spec.sample_rate,
        "read WAV"
    );

    Ok((channels, spec))
}

/// Write planar f32 channels to a WAV file.
///
/// All channels must have the same length. `spec.channels` is overridden by
/// the actual channel count. 32-bit output is written as IEEE float;
/// 16- and 24-bit output is scaled and clamped to the integer range.
pub fn write_wav_planar<P: AsRef<Path>>(
    path: P,
    channels: &[Vec<f32>],
    spec: WavSpec,
) -> Result<()> {
    let path = path.as_ref();
    let first = channels.first().ok_or(Error::NoChannels)?;
    let num_frames = first.len();
    for (i, ch) in channels.iter().enumerate() {
        if ch.len() != num_frames {
            return Err(Error::ChannelLengthMismatch {
                channel: i,
                got: ch.len(),
                expected: num_frames,
            });
        }
    }

    let out_spec = WavSpec {
        channels: channels.len() as u16,
        ..spec
    };
    let mut writer = WavWriter::create(path, hound::WavSpec::from(out_spec))?;

    if out_spec.bits_per_sample == 32 {
        for frame in 0..num_frames {
            for ch in channels {
                writer.write_sample(ch[frame])?;
            }
        }
    } else {
        let bits = out_spec.bits_per_sample;
        let max_val = (1i32 << (bits - 1)) - 1;
        let scale = max_val as f32;
        for frame in 0..num_frames {
            for ch in channels {
                let scaled = (ch[frame] * scale).clamp(-scale, scale) as i32;
                writer.write_sample(scaled)?;
            }
        }
    }

    writer.finalize()?;

    debug!(
        path = %path.display(),
        channels = channels.len(),
        frames = num_frames,
        bits = out_spec.bits_per_sample,
        "wrote WAV"
    );

    Ok(())
}
