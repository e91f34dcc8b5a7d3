//! Audio file I/O for tapline.
//!
//! The core processes planar multichannel blocks, so this crate reads and
//! writes WAV files in the same shape: one `Vec<f32>` per channel.
//! Interleaving exists only at the file boundary.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tapline_io::{read_wav_planar, write_wav_planar, WavSpec};
//!
//! let (channels, spec) = read_wav_planar("input.wav")?;
//! // ... run a BlockProcessor over the channels, block by block ...
//! write_wav_planar("output.wav", &channels, spec)?;
//! ```

mod render;
mod wav;

pub use render::render_through;
pub use wav::{
    WavFormat, WavInfo, WavSpec, read_wav_info, read_wav_planar, write_wav_planar,
};

/// Error types for audio file I/O.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Channel vectors with mismatched lengths were passed for writing.
    #[error("channel length mismatch: channel {channel} has {got} samples, expected {expected}")]
    ChannelLengthMismatch {
        /// Index of the offending channel.
        channel: usize,
        /// Its sample count.
        got: usize,
        /// Sample count of channel 0.
        expected: usize,
    },

    /// Zero channels were passed for writing.
    #[error("cannot write a WAV file with no channels")]
    NoChannels,

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for audio file I/O.
pub type Result<T> = std::result::Result<T, Error>;
