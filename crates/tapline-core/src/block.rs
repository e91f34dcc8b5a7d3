//! Core block-processing trait.
//!
//! [`BlockProcessor`] is the seam between a host (audio callback, file
//! renderer, test harness) and any effect in this crate. Audio moves in
//! planar blocks: one `f32` slice per channel, all the same length, at most
//! [`StreamSpec::max_block_size`] samples each.
//!
//! ## Design Decisions
//!
//! - **Block-based**: the delay line must see whole blocks to split them
//!   across the ring's wraparound with two bulk copies instead of per-sample
//!   modulo arithmetic.
//!
//! - **Object-safe**: `dyn BlockProcessor` works, so a host can hold a
//!   heterogeneous chain as `Vec<Box<dyn BlockProcessor>>` and run each stage
//!   in place.
//!
//! - **No allocations after prepare**: `process`, `process_in_place`, and
//!   `reset` are safe to call from a real-time thread. Everything that sizes
//!   state happens in `prepare`, which the caller must serialize against
//!   in-flight processing.

use crate::stream::StreamSpec;

/// Trait for block-based, planar multichannel audio processors.
///
/// Lifecycle: the host calls [`prepare`](Self::prepare) with the stream
/// format before any processing and again whenever the format changes, then
/// [`process`](Self::process) once per block on the audio thread.
/// [`reset`](Self::reset) clears internal state without touching parameters
/// or geometry.
///
/// # Example
///
/// ```rust
/// use tapline_core::{BlockProcessor, StreamSpec};
///
/// struct Invert;
///
/// impl BlockProcessor for Invert {
///     fn prepare(&mut self, _spec: StreamSpec) {}
///
///     fn process(&mut self, input: &[&[f32]], output: &mut [&mut [f32]]) {
///         for (inp, out) in input.iter().zip(output.iter_mut()) {
///             for (x, y) in inp.iter().zip(out.iter_mut()) {
///                 *y = -x;
///             }
///         }
///     }
///
///     fn process_in_place(&mut self, block: &mut [&mut [f32]]) {
///         for ch in block.iter_mut() {
///             for x in ch.iter_mut() {
///                 *x = -*x;
///             }
///         }
///     }
///
///     fn reset(&mut self) {}
/// }
/// ```
pub trait BlockProcessor {
    /// Adopt a new processing format and size internal state for it.
    ///
    /// Runs on a non-real-time thread and may allocate. Any in-flight signal
    /// state is discarded. Must not run concurrently with `process` on the
    /// same instance.
    fn prepare(&mut self, spec: StreamSpec);

    /// Process one block, reading `input` and writing `output`.
    ///
    /// Both are planar: `input[ch]` and `output[ch]` hold the same number of
    /// samples, no longer than the prepared maximum block size. Channels
    /// beyond what the processor was prepared for are passed through or
    /// ignored per implementor; a shorter `output` simply bounds how many
    /// channels are produced.
    fn process(&mut self, input: &[&[f32]], output: &mut [&mut [f32]]);

    /// Process one block in place.
    ///
    /// Semantically identical to [`process`](Self::process) with `output`
    /// aliasing `input`, which Rust's borrow rules cannot express as two
    /// arguments.
    fn process_in_place(&mut self, block: &mut [&mut [f32]]);

    /// Clear internal signal state (ring contents, histories) without
    /// changing parameters or prepared geometry. Real-time safe.
    fn reset(&mut self);

    /// Latency this processor adds, in samples, for host compensation.
    ///
    /// Default returns 0 (no added latency).
    fn latency_samples(&self) -> usize {
        0
    }
}
