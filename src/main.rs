use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::Parser;

use pdm192::stats::{compute_rms_mean, to_unit};
use pdm192::{BitOrder, DecimatorConfig, DecimatorError, PdmStream, save_wav};

#[derive(Parser, Debug)]
#[command(name = "pdm192")]
#[command(about = "Decimate a raw PDM microphone capture to 192 kHz PCM")]
struct Args {
    /// Raw capture: interleaved little-endian 32-bit PDM words, one per channel
    input: PathBuf,

    /// Output WAV file (32-bit float)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of interleaved microphone channels
    #[arg(short, long)]
    mics: Option<usize>,

    /// Sample order within each captured word
    #[arg(short, long, value_enum)]
    bit_order: Option<BitOrder>,

    /// PDM bit clock in Hz
    #[arg(long)]
    pdm_clock: Option<u32>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let mut config = match &args.config {
        Some(path) => DecimatorConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => DecimatorConfig::default(),
    };
    if let Some(mics) = args.mics {
        config.mic_count = mics;
    }
    if let Some(bit_order) = args.bit_order {
        config.bit_order = bit_order;
    }
    if let Some(pdm_clock) = args.pdm_clock {
        config.pdm_clock_hz = pdm_clock;
    }
    if args.output.is_some() {
        config.output = args.output.clone();
    }
    config.validate()?;

    println!("=== pdm192 - PDM decimator ===");
    println!("Input: {}", args.input.display());
    println!("Channels: {}", config.mic_count);
    println!(
        "PDM clock: {} Hz -> output {} Hz",
        config.pdm_clock_hz,
        config.output_sample_rate()
    );
    println!("Bit order: {}", config.bit_order);
    println!();

    let samples = match config.mic_count {
        1 => decimate_file::<1>(&args.input, &config),
        2 => decimate_file::<2>(&args.input, &config),
        3 => decimate_file::<3>(&args.input, &config),
        4 => decimate_file::<4>(&args.input, &config),
        5 => decimate_file::<5>(&args.input, &config),
        6 => decimate_file::<6>(&args.input, &config),
        7 => decimate_file::<7>(&args.input, &config),
        8 => decimate_file::<8>(&args.input, &config),
        other => Err(DecimatorError::UnsupportedChannelCount(other).into()),
    }?;

    report_levels(&samples, config.mic_count);

    if let Some(output) = &config.output {
        save_wav(
            output,
            &samples,
            config.mic_count as u16,
            config.output_sample_rate(),
        )
        .with_context(|| format!("Failed to write {}", output.display()))?;
        println!("Wrote {}", output.display());
    }

    Ok(())
}

/// Run a whole capture through the decimator, returning interleaved output
fn decimate_file<const MIC_COUNT: usize>(
    path: &Path,
    config: &DecimatorConfig,
) -> anyhow::Result<Vec<i32>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let mut reader = BufReader::new(file);

    let mut stream = PdmStream::<MIC_COUNT>::new(config.bit_order);
    let mut chunk = vec![0u8; config.chunk_size];
    let mut samples = Vec::new();
    let started = Instant::now();

    loop {
        let n = reader
            .read(&mut chunk)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if n == 0 {
            break;
        }
        let frames = stream.push(&chunk[..n], |out| {
            for phase in out {
                samples.extend_from_slice(phase);
            }
        });
        log::debug!("Read {} bytes, {} frames", n, frames);
    }

    if stream.pending_bytes() > 0 {
        log::warn!(
            "Ignoring {} trailing bytes (incomplete frame of {} bytes)",
            stream.pending_bytes(),
            config.frame_bytes()
        );
    }

    let elapsed = started.elapsed().as_secs_f64();
    let audio_secs = stream.samples_produced() as f64 / config.output_sample_rate() as f64;
    log::info!(
        "Decimated {} blocks ({:.3} s of audio) in {:.3} s",
        stream.blocks_processed(),
        audio_secs,
        elapsed
    );

    Ok(samples)
}

fn report_levels(samples: &[i32], mic_count: usize) {
    for mic in 0..mic_count {
        let channel: Vec<f32> = samples
            .iter()
            .skip(mic)
            .step_by(mic_count)
            .map(|&s| to_unit(s))
            .collect();
        let (db_fs, mean) = compute_rms_mean(&channel);
        println!(
            "Channel {}: {} samples, level {:>7.2} dBFS, DC offset {:+.4}",
            mic,
            channel.len(),
            db_fs,
            mean
        );
    }
}
