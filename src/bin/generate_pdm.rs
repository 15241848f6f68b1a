use anyhow::{Context, Result};
use clap::Parser;
use pdm192::BitOrder;
use pdm192::constants::DEFAULT_PDM_CLOCK_HZ;
use pdm192::simulation::{generate_pdm, interleave};
use std::f64::consts::PI;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "generate_pdm")]
#[command(about = "Generate a synthetic multi-channel PDM capture of sine tones")]
struct Args {
    /// Output capture file
    output: PathBuf,

    /// Tone frequency per channel in Hz: comma-separated (e.g., "1000,2500")
    #[arg(short, long, default_value = "1000")]
    freqs: String,

    /// Tone amplitude relative to PDM full scale
    #[arg(short, long, default_value_t = 0.5)]
    amplitude: f64,

    /// Capture duration in seconds
    #[arg(short, long, default_value_t = 1.0)]
    duration: f64,

    /// PDM bit clock in Hz
    #[arg(long, default_value_t = DEFAULT_PDM_CLOCK_HZ)]
    pdm_clock: u32,

    /// Sample order within each written word
    #[arg(short, long, value_enum, default_value_t = BitOrder::LsbFirst)]
    bit_order: BitOrder,

    /// Peak amplitude of triangular dither added before modulation
    #[arg(long)]
    dither: Option<f64>,

    /// Base seed for reproducible dither
    #[arg(short, long)]
    seed: Option<u64>,
}

fn parse_freqs(s: &str) -> Result<Vec<f64>> {
    let freqs = s
        .split(',')
        .map(|p| p.trim().parse::<f64>().context("Invalid frequency value"))
        .collect::<Result<Vec<_>>>()?;
    if freqs.is_empty() || freqs.iter().any(|&f| f < 0.0) {
        anyhow::bail!("Frequencies must be non-negative");
    }
    Ok(freqs)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let freqs = parse_freqs(&args.freqs)?;
    if !(0.0..=0.7).contains(&args.amplitude) {
        anyhow::bail!("Amplitude {} outside the modulator's stable range 0..=0.7", args.amplitude);
    }

    let num_words = (args.duration * args.pdm_clock as f64 / 32.0) as usize;
    let channels: Vec<Vec<u32>> = freqs
        .iter()
        .enumerate()
        .map(|(ch, &freq)| {
            let seed = args.seed.map(|s| s + ch as u64);
            let amplitude = args.amplitude;
            log::debug!("Channel {}: {} Hz, seed {:?}", ch, freq, seed);
            generate_pdm(
                move |t| amplitude * (2.0 * PI * freq * t).sin(),
                args.pdm_clock,
                num_words,
                args.dither,
                seed,
            )
        })
        .collect();

    let bytes: Vec<u8> = interleave(&channels)
        .into_iter()
        .map(|word| match args.bit_order {
            BitOrder::LsbFirst => word,
            BitOrder::MsbFirst => word.reverse_bits(),
        })
        .flat_map(u32::to_le_bytes)
        .collect();

    fs::write(&args.output, &bytes).context("Failed to write capture file")?;

    eprintln!(
        "Wrote {} channels x {} words ({} bytes) to {}",
        channels.len(),
        num_words,
        bytes.len(),
        args.output.display()
    );
    Ok(())
}
