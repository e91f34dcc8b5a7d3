//! Property-based tests for the ring mapper and the delay unit.
//!
//! The region split is exercised in isolation first (it is the bug-prone
//! part), then the delay's end-to-end timing is checked against the one
//! number that defines the unit: an impulse must resurface exactly
//! `round(seconds * sample_rate)` samples after injection, regardless of how
//! the stream is chopped into blocks.

use proptest::prelude::*;
use tapline_core::{BlockProcessor, FixedDelay, RingCursor, StreamSpec};

const SAMPLE_RATE: f32 = 48000.0;

fn run_block(delay: &mut FixedDelay, input: &[Vec<f32>]) -> Vec<Vec<f32>> {
    let mut output: Vec<Vec<f32>> = input.iter().map(|ch| vec![0.0; ch.len()]).collect();
    let in_refs: Vec<&[f32]> = input.iter().map(Vec::as_slice).collect();
    let mut out_refs: Vec<&mut [f32]> = output.iter_mut().map(Vec::as_mut_slice).collect();
    delay.process(&in_refs, &mut out_refs);
    output
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    /// For any ring length, cursor position, and span up to the ring length,
    /// the two regions cover exactly the span, start inside the ring, and
    /// never run past its end.
    #[test]
    fn region_split_covers_span(
        len in 1usize..4096,
        advance in 0usize..8192,
        span_frac in 0.0f64..=1.0,
        delay_frac in 0.0f64..=1.0,
    ) {
        let mut cursor = RingCursor::new(len);
        cursor.advance(advance);
        let span = (span_frac * len as f64) as usize;
        let delay = (delay_frac * len as f64) as usize;

        for split in [cursor.write_regions(span), cursor.read_regions(delay, span)] {
            prop_assert!(split.start < len);
            prop_assert_eq!(split.first_len + split.second_len, span);
            prop_assert!(split.start + split.first_len <= len);
            prop_assert!(split.second_len <= len);
            if span > 0 && split.start + span <= len {
                prop_assert_eq!(split.second_len, 0, "spurious wrap");
            }
        }
    }

    /// Filling the ring exactly to its end produces no second region;
    /// one sample more wraps by exactly one.
    #[test]
    fn region_split_boundary(len in 2usize..1024, advance in 0usize..2048) {
        let mut cursor = RingCursor::new(len);
        cursor.advance(advance);
        let to_end = len - cursor.write_pos();

        let exact = cursor.write_regions(to_end);
        prop_assert_eq!(exact.second_len, 0);

        if to_end + 1 <= len {
            let over = cursor.write_regions(to_end + 1);
            prop_assert_eq!(over.second_len, 1);
        }
    }

    /// An impulse fed into an active delay resurfaces exactly
    /// `delay_samples` later, same channel, same magnitude, and nowhere else.
    #[test]
    fn impulse_resurfaces_exactly(
        delay_samples in 1usize..200,
        block_size in 1usize..128,
        impulse_at in 0usize..64,
        channel in 0usize..2,
    ) {
        let seconds = delay_samples as f32 / SAMPLE_RATE;
        let mut delay = FixedDelay::new();
        delay.set_delay_seconds(seconds);
        delay.prepare(StreamSpec {
            sample_rate: SAMPLE_RATE,
            num_channels: 2,
            max_block_size: block_size,
        });
        prop_assert_eq!(delay.delay_samples(), delay_samples);

        let total = impulse_at + delay_samples + 2 * block_size;
        let mut produced = vec![Vec::new(), Vec::new()];
        let mut fed = 0usize;
        while fed < total {
            let len = block_size.min(total - fed);
            let mut block = vec![vec![0.0; len]; 2];
            if fed <= impulse_at && impulse_at < fed + len {
                block[channel][impulse_at - fed] = 0.75;
            }
            fed += len;
            let out = run_block(&mut delay, &block);
            produced[0].extend_from_slice(&out[0]);
            produced[1].extend_from_slice(&out[1]);
        }

        let expect_at = impulse_at + delay_samples;
        for ch in 0..2 {
            for (i, &s) in produced[ch].iter().enumerate() {
                let expected = if ch == channel && i == expect_at { 0.75 } else { 0.0 };
                prop_assert_eq!(s, expected, "channel {} sample {}", ch, i);
            }
        }
    }

    /// Bypass is a bit-exact identity for any input, and reports zero
    /// latency.
    #[test]
    fn bypass_is_identity(
        seconds in -2.0f32..=0.0,
        audio in prop::collection::vec(-1.0f32..=1.0, 1..256),
    ) {
        let mut delay = FixedDelay::new();
        delay.set_delay_seconds(seconds);
        delay.prepare(StreamSpec {
            sample_rate: SAMPLE_RATE,
            num_channels: 1,
            max_block_size: audio.len(),
        });

        prop_assert!(delay.is_bypassed());
        prop_assert_eq!(delay.delay_samples(), 0);
        let output = run_block(&mut delay, &[audio.clone()]);
        prop_assert_eq!(&output[0], &audio);
    }

    /// Preparing twice with identical arguments is idempotent on geometry
    /// and leaves a silent ring both times.
    #[test]
    fn prepare_is_geometry_stable(
        delay_samples in 1usize..500,
        block_size in 1usize..256,
        channels in 1usize..4,
    ) {
        let spec = StreamSpec {
            sample_rate: SAMPLE_RATE,
            num_channels: channels,
            max_block_size: block_size,
        };
        let mut delay = FixedDelay::new();
        delay.set_delay_seconds(delay_samples as f32 / SAMPLE_RATE);
        delay.prepare(spec);
        let first = delay.delay_samples();
        delay.prepare(spec);
        prop_assert_eq!(delay.delay_samples(), first);
        prop_assert_eq!(first, delay_samples);

        // Silent ring: processing silence yields silence.
        let silence = vec![vec![0.0; block_size]; channels];
        let out = run_block(&mut delay, &silence);
        prop_assert!(out.iter().all(|ch| ch.iter().all(|&s| s == 0.0)));
    }

    /// Random audio through a delay comes back intact, shifted by exactly
    /// the configured sample count.
    #[test]
    fn audio_round_trips_shifted(
        audio in prop::collection::vec(-1.0f32..=1.0, 64..512),
        delay_samples in 1usize..128,
        block_size in 1usize..96,
    ) {
        let mut delay = FixedDelay::new();
        delay.set_delay_seconds(delay_samples as f32 / SAMPLE_RATE);
        delay.prepare(StreamSpec {
            sample_rate: SAMPLE_RATE,
            num_channels: 1,
            max_block_size: block_size,
        });

        let mut padded = audio.clone();
        padded.extend(std::iter::repeat_n(0.0, delay_samples + block_size));

        let mut produced = Vec::new();
        for chunk in padded.chunks(block_size) {
            produced.extend_from_slice(&run_block(&mut delay, &[chunk.to_vec()])[0]);
        }

        for (i, &s) in produced.iter().enumerate() {
            let expected = if i >= delay_samples && i - delay_samples < audio.len() {
                audio[i - delay_samples]
            } else {
                0.0
            };
            prop_assert_eq!(s, expected, "sample {}", i);
        }
    }
}

/// Concrete numbers, end to end: 48 kHz, 1 ms -> 48 samples, 64-sample
/// blocks, ring of 112 per channel.
#[test]
fn concrete_48k_one_ms_scenario() {
    let mut delay = FixedDelay::new();
    delay.set_delay_seconds(0.001);
    delay.prepare(StreamSpec {
        sample_rate: 48000.0,
        num_channels: 1,
        max_block_size: 64,
    });
    assert_eq!(delay.delay_samples(), 48);

    let mut input = vec![vec![0.0; 64]];
    input[0][0] = 1.0;
    let out = run_block(&mut delay, &input);
    assert_eq!(out[0][48], 1.0);
}
