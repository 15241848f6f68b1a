//! Bit-serial primitives used by the stage 1 decimator.
//!
//! These operate directly on packed PDM words. A PDM bit of 1 stands for
//! +1 and a bit of 0 for -1; coefficient planes use the opposite sense
//! (see [`coefficients`](super::coefficients)), so the bipolar product of a
//! sample and a coefficient bit is +1 exactly when the two bits differ.

use crate::constants::{COEF_PLANES, HISTORY_WORDS, TAP_COUNT};

use super::coefficients::CoefficientSet;

/// Half the number of bits in a window, the popcount of an uncorrelated plane
const HALF_WINDOW: i32 = (TAP_COUNT / 2) as i32;

/// 256-tap FIR over a 1-bit signal and 16-bit coefficients.
///
/// `window` is the PDM history, newest word first. The result is
///
/// ```text
/// sum_k 2^k * (popcount(window ^ plane_k) - 128)
/// ```
///
/// which is exactly half the inner product of the bipolar samples with the
/// decoded (odd-valued) taps. Its magnitude never exceeds
/// [`FULL_SCALE_RAW`](crate::constants::FULL_SCALE_RAW).
#[inline]
pub fn fir_1x16_bit(window: &[u32; HISTORY_WORDS], coefs: &CoefficientSet) -> i32 {
    debug_assert_eq!(coefs.planes().count(), COEF_PLANES);

    coefs.planes().enumerate().fold(0i32, |acc, (k, plane)| {
        let differing: u32 = window
            .iter()
            .zip(plane)
            .map(|(&s, &c)| (s ^ c).count_ones())
            .sum();
        acc + ((differing as i32 - HALF_WINDOW) << k)
    })
}

/// Advance a history buffer by one block.
///
/// Drops the last (oldest) word and moves every other word one slot towards
/// the end, leaving slot 0 free for the next incoming block. Bit order
/// within words is untouched.
#[inline]
pub fn shift_buffer<const N: usize>(buffer: &mut [u32; N]) {
    if N > 1 {
        buffer.copy_within(0..N - 1, 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimator::coefficients::{PHASE_A, PHASE_B};

    fn naive(window: &[u32; HISTORY_WORDS], coefs: &CoefficientSet) -> i64 {
        let taps = coefs.taps();
        let mut acc = 0i64;
        for (n, &tap) in taps.iter().enumerate() {
            let word = window[HISTORY_WORDS - 1 - n / 32];
            let sample = if (word >> (n % 32)) & 1 != 0 { 1 } else { -1 };
            acc += sample * tap as i64;
        }
        acc / 2
    }

    #[test]
    fn test_constant_windows() {
        assert_eq!(fir_1x16_bit(&[0; 8], &PHASE_A), -620_532);
        assert_eq!(fir_1x16_bit(&[u32::MAX; 8], &PHASE_A), 620_532);
        assert_eq!(fir_1x16_bit(&[0x5555_5555; 8], &PHASE_A), 0);
        assert_eq!(fir_1x16_bit(&[0x5555_5555; 8], &PHASE_B), 0);
    }

    #[test]
    fn test_matches_tap_by_tap_product() {
        let mut state = 0x1234_5678u32;
        for _ in 0..64 {
            let window: [u32; HISTORY_WORDS] = core::array::from_fn(|_| {
                // xorshift32
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                state
            });
            for coefs in [&PHASE_A, &PHASE_B] {
                assert_eq!(fir_1x16_bit(&window, coefs) as i64, naive(&window, coefs));
            }
        }
    }

    #[test]
    fn test_single_sample_contributes_its_tap() {
        let base = fir_1x16_bit(&[0; 8], &PHASE_A);
        // Oldest sample of the window: word 7, bit 0
        let mut window = [0u32; 8];
        window[7] = 1;
        assert_eq!(fir_1x16_bit(&window, &PHASE_A) - base, PHASE_A.tap(0));
        // Newest sample: word 0, bit 31 (padding in phase A)
        let mut window = [0u32; 8];
        window[0] = 1 << 31;
        assert_eq!(fir_1x16_bit(&window, &PHASE_A) - base, 1);
    }

    #[test]
    fn test_shift_buffer() {
        let mut buf = [1, 2, 3, 4, 5, 6, 7, 8, 9];
        shift_buffer(&mut buf);
        assert_eq!(buf, [1, 1, 2, 3, 4, 5, 6, 7, 8]);

        let mut single = [42u32];
        shift_buffer(&mut single);
        assert_eq!(single, [42]);
    }
}
