//! Stateless scalar gain, the smallest useful [`BlockProcessor`].

use crate::block::BlockProcessor;
use crate::stream::StreamSpec;
use libm::powf;

/// Applies a constant linear gain to every channel of a block.
///
/// Mostly a make-weight for chains and tests: it has no state, no latency,
/// and nothing to prepare, which makes it a convenient second implementor of
/// [`BlockProcessor`] next to the delay.
#[derive(Debug, Clone, Copy)]
pub struct BlockGain {
    gain: f32,
}

impl BlockGain {
    /// Create a gain stage with the given linear gain.
    pub fn new(gain: f32) -> Self {
        Self { gain }
    }

    /// Create a gain stage from a decibel value.
    pub fn from_db(db: f32) -> Self {
        Self::new(powf(10.0, db / 20.0))
    }

    /// Current linear gain.
    pub fn gain(&self) -> f32 {
        self.gain
    }

    /// Set the linear gain.
    pub fn set_gain(&mut self, gain: f32) {
        self.gain = gain;
    }
}

impl BlockProcessor for BlockGain {
    fn prepare(&mut self, spec: StreamSpec) {
        spec.debug_validate();
    }

    fn process(&mut self, input: &[&[f32]], output: &mut [&mut [f32]]) {
        for (inp, out) in input.iter().zip(output.iter_mut()) {
            for (x, y) in inp.iter().zip(out.iter_mut()) {
                *y = x * self.gain;
            }
        }
    }

    fn process_in_place(&mut self, block: &mut [&mut [f32]]) {
        for ch in block.iter_mut() {
            for x in ch.iter_mut() {
                *x *= self.gain;
            }
        }
    }

    fn reset(&mut self) {}
}
