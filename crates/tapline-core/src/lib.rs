//! Tapline Core - sample-accurate multichannel delay primitives
//!
//! This crate provides a fixed-latency delay line for block-based multichannel
//! audio, designed for real-time processing with zero allocation in the audio
//! path once prepared.
//!
//! # Core Abstractions
//!
//! - [`BlockProcessor`] - Object-safe trait for block-based, planar
//!   multichannel effects (prepare / process / reset)
//! - [`StreamSpec`] - Processing format: sample rate, channel count, maximum
//!   block size
//! - [`RingCursor`] / [`RegionSplit`] - Circular-buffer index arithmetic,
//!   isolated so the wraparound logic can be tested on its own
//! - [`FixedDelay`] - Integer-sample multichannel delay with a true bypass
//!   mode
//! - [`BlockGain`] - Stateless scalar gain, the smallest useful
//!   [`BlockProcessor`]
//!
//! # Example
//!
//! ```rust
//! use tapline_core::{BlockProcessor, FixedDelay, StreamSpec};
//!
//! let spec = StreamSpec { sample_rate: 48000.0, num_channels: 2, max_block_size: 256 };
//! let mut delay = FixedDelay::new();
//! delay.set_delay_seconds(0.001); // 48 samples at 48 kHz
//! delay.prepare(spec);
//! assert_eq!(delay.delay_samples(), 48);
//!
//! let input = vec![vec![0.0f32; 256]; 2];
//! let mut output = vec![vec![0.0f32; 256]; 2];
//! let in_refs: Vec<&[f32]> = input.iter().map(Vec::as_slice).collect();
//! let mut out_refs: Vec<&mut [f32]> = output.iter_mut().map(Vec::as_mut_slice).collect();
//! delay.process(&in_refs, &mut out_refs);
//! ```
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible (with `alloc`) for embedded audio
//! applications. Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! tapline-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: `process` and `reset` never allocate, lock, or
//!   perform I/O; all allocation is confined to `prepare`
//! - **Caller-serialized reconfiguration**: `prepare` replaces the ring
//!   buffer, so the caller must not run it concurrently with `process` on the
//!   same instance
//! - **Planar blocks**: one slice per channel, arbitrary block lengths up to
//!   the prepared maximum, wraparound handled by at most two contiguous copies

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod block;
pub mod delay;
pub mod gain;
pub mod ring;
pub mod stream;

// Re-export main types at crate root
pub use block::BlockProcessor;
pub use delay::FixedDelay;
pub use gain::BlockGain;
pub use ring::{RegionSplit, RingCursor};
pub use stream::StreamSpec;
