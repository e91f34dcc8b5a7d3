//! Offline rendering: run a [`BlockProcessor`] over whole planar buffers.

use tapline_core::{BlockProcessor, StreamSpec};
use tracing::debug;

/// Run `processor` over `channels` in place, block by block.
///
/// Prepares the processor for the given sample rate and block size, appends
/// `tail_samples` of silence per channel (so e.g. a delay's buffered audio is
/// flushed instead of truncated), then processes the whole buffer in
/// `block_size` chunks. The final chunk may be shorter, which every
/// [`BlockProcessor`] must accept.
///
/// `on_progress` is called after each block with the number of frames
/// processed so far; pass `|_| {}` when no reporting is wanted.
pub fn render_through(
    processor: &mut dyn BlockProcessor,
    channels: &mut [Vec<f32>],
    sample_rate: f32,
    block_size: usize,
    tail_samples: usize,
    mut on_progress: impl FnMut(usize),
) {
    let Some(first) = channels.first() else {
        return;
    };
    let num_frames = first.len() + tail_samples;

    for ch in channels.iter_mut() {
        ch.resize(num_frames, 0.0);
    }

    processor.prepare(StreamSpec {
        sample_rate,
        num_channels: channels.len(),
        max_block_size: block_size,
    });

    debug!(
        frames = num_frames,
        channels = channels.len(),
        block_size,
        tail_samples,
        "rendering"
    );

    let mut done = 0usize;
    while done < num_frames {
        let len = block_size.min(num_frames - done);
        let mut block: Vec<&mut [f32]> = channels
            .iter_mut()
            .map(|ch| &mut ch[done..done + len])
            .collect();
        processor.process_in_place(&mut block);
        done += len;
        on_progress(done);
    }
}
