//! Fixed configuration of the single-stage decimator.
//!
//! None of these are runtime tunable. They are tied to the quantization of
//! the compiled-in coefficient tables and changing any of them means
//! redesigning the filter.

/// Number of taps in each stage 1 filter (240 significant + 16 padding)
pub const TAP_COUNT: usize = 256;

/// Number of non-padding taps in the prototype low-pass filter
pub const SIGNIFICANT_TAPS: usize = 240;

/// PDM samples carried by one input block
pub const BLOCK_BITS: usize = 32;

/// 32-bit words of PDM history per channel (256 bits)
pub const HISTORY_WORDS: usize = TAP_COUNT / BLOCK_BITS;

/// PDM samples per output sample
pub const DECIMATION_FACTOR: usize = 16;

/// Output samples produced per input block
pub const OUTPUTS_PER_BLOCK: usize = BLOCK_BITS / DECIMATION_FACTOR;

/// Offset between the phase A and phase B filters, in PDM samples
pub const PHASE_OFFSET: usize = DECIMATION_FACTOR;

/// Number of bit-planes in a packed coefficient set (int16 coefficients)
pub const COEF_PLANES: usize = 16;

/// Length of a packed coefficient set in 32-bit words
pub const COEF_WORDS: usize = COEF_PLANES * HISTORY_WORDS;

/// Left shift applied to every bit-serial convolution result.
///
/// The packed coefficients are int16 values scaled to a peak of 32767 and
/// the convolution yields half the bipolar inner product, so the largest
/// magnitude a stage 1 result can take is `FULL_SCALE_RAW`. Shifting by 3
/// places that in the upper part of the Q31 range the downstream stages
/// expect.
pub const OUTPUT_GAIN_SHIFT: u32 = 3;

/// Alternating bit pattern used to seed PDM history.
///
/// Every window made only of this pattern convolves to exactly zero with
/// both coefficient sets, so start-up output is mid-scale silence.
pub const HISTORY_SEED: u32 = 0x5555_5555;

/// Largest possible magnitude of a raw (unshifted) convolution result
pub const FULL_SCALE_RAW: i32 = 1_038_354;

/// Largest possible magnitude of a decimator output sample
pub const FULL_SCALE_OUTPUT: i32 = FULL_SCALE_RAW << OUTPUT_GAIN_SHIFT;

/// Nominal PDM clock for 192 kHz output
pub const DEFAULT_PDM_CLOCK_HZ: u32 = 3_072_000;

/// Largest channel count the command-line front end dispatches to
pub const MAX_MIC_COUNT: usize = 8;
