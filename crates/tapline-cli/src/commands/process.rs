//! File-based delay processing command.

use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tapline_core::{BlockGain, BlockProcessor, FixedDelay};
use tapline_io::{WavSpec, read_wav_planar, render_through, write_wav_planar};

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Delay time in milliseconds (0 or negative bypasses)
    #[arg(short, long)]
    delay_ms: f32,

    /// Output gain in dB, applied after the delay
    #[arg(short, long, allow_negative_numbers = true)]
    gain_db: Option<f32>,

    /// Processing block size
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32")]
    bit_depth: u16,

    /// Truncate instead of appending the delayed tail
    #[arg(long)]
    no_tail: bool,
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.block_size > 0, "block size must be non-zero");
    anyhow::ensure!(
        matches!(args.bit_depth, 16 | 24 | 32),
        "bit depth must be 16, 24, or 32"
    );

    println!("Reading {}...", args.input.display());
    let (mut channels, spec) = read_wav_planar(&args.input)?;
    let sample_rate = spec.sample_rate as f32;
    let num_frames = channels.first().map_or(0, Vec::len);

    println!(
        "  {} channel(s), {} frames, {} Hz, {:.2}s",
        channels.len(),
        num_frames,
        spec.sample_rate,
        num_frames as f32 / sample_rate
    );

    let mut delay = FixedDelay::new();
    delay.set_delay_seconds(args.delay_ms / 1000.0);
    if delay.is_bypassed() {
        println!("Delay <= 0 ms: bypassing (output equals input)");
    }

    // Geometry is known before rendering: prepare derives the sample count
    // from the requested time, render_through prepares again identically.
    delay.prepare(tapline_core::StreamSpec {
        sample_rate,
        num_channels: channels.len().max(1),
        max_block_size: args.block_size,
    });
    let tail = if args.no_tail { 0 } else { delay.delay_samples() };
    println!(
        "Delaying by {} sample(s) ({} ms tail {})",
        delay.delay_samples(),
        args.delay_ms,
        if tail > 0 { "appended" } else { "off" }
    );

    let total = (num_frames + tail) as u64;
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );

    render_through(
        &mut delay,
        &mut channels,
        sample_rate,
        args.block_size,
        tail,
        |done| pb.set_position(done as u64),
    );
    pb.finish_and_clear();

    if let Some(db) = args.gain_db {
        println!("Applying {} dB gain", db);
        let mut gain = BlockGain::from_db(db);
        render_through(
            &mut gain,
            &mut channels,
            sample_rate,
            args.block_size,
            0,
            |_| {},
        );
    }

    let out_spec = WavSpec {
        bits_per_sample: args.bit_depth,
        ..spec
    };
    write_wav_planar(&args.output, &channels, out_spec)?;
    println!("Wrote {}", args.output.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: ProcessArgs,
    }

    #[test]
    fn test_gain_flag_parses() {
        let h = Harness::parse_from([
            "tapline", "in.wav", "out.wav", "--delay-ms", "10", "--gain-db", "-6",
        ]);
        assert_eq!(h.args.gain_db, Some(-6.0));

        let h = Harness::parse_from(["tapline", "in.wav", "out.wav", "--delay-ms", "10"]);
        assert_eq!(h.args.gain_db, None);
    }

    #[test]
    fn test_process_applies_delay_and_gain() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.wav");
        let output = dir.path().join("out.wav");

        let mut mono = vec![0.0f32; 10];
        mono[0] = 1.0;
        write_wav_planar(&input, &[mono], WavSpec { channels: 1, ..WavSpec::default() }).unwrap();

        run(ProcessArgs {
            input,
            output: output.clone(),
            delay_ms: 1.0, // 48 samples at 48 kHz
            gain_db: Some(-6.0),
            block_size: 16,
            bit_depth: 32,
            no_tail: false,
        })
        .unwrap();

        let (channels, _) = read_wav_planar(&output).unwrap();
        assert_eq!(channels[0].len(), 58); // 10 frames + 48-sample tail
        let expected = 10.0f32.powf(-6.0 / 20.0);
        assert!((channels[0][48] - expected).abs() < 1e-6, "got {}", channels[0][48]);
        assert_eq!(channels[0].iter().filter(|&&s| s != 0.0).count(), 1);
    }
}
