use rand::RngExt;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use pdm192::Decimator192;
use pdm192::stats::{compute_rms_mean, to_unit};

/// Output of either phase once the window holds only `0x0000_0000` blocks
pub const DC_ALL_ZERO: i32 = -4_964_256;

/// Reproducible random PDM words
pub fn random_words(seed: u64, n: usize) -> Vec<u32> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n).map(|_| rng.random::<u32>()).collect()
}

/// Run single-channel words through a fresh decimator; output in time order
pub fn decimate_words(words: &[u32]) -> Vec<i32> {
    let mut decimator = Decimator192::<1>::new().init();
    let mut out = [[0; 1]; 2];
    let mut samples = Vec::with_capacity(words.len() * 2);
    for &word in words {
        decimator.process_block(&mut out, &[word]);
        samples.push(out[0][0]);
        samples.push(out[1][0]);
    }
    samples
}

/// Split interleaved samples into per-channel vectors
pub fn deinterleave(samples: &[i32], channels: usize) -> Vec<Vec<i32>> {
    (0..channels)
        .map(|ch| samples.iter().skip(ch).step_by(channels).copied().collect())
        .collect()
}

/// Level in dBFS and mean of decimated output, skipping the first `settle`
/// samples
pub fn steady_state_level(samples: &[i32], settle: usize) -> (f32, f32) {
    let unit: Vec<f32> = samples.iter().skip(settle).map(|&s| to_unit(s)).collect();
    compute_rms_mean(&unit)
}
