//! Straightforward model of the stage 1 decimator.
//!
//! Works sample by sample on a bipolar delay line with the decoded integer
//! taps, the textbook way. It allocates and is far slower than
//! [`Decimator192`](crate::decimator::Decimator192), but produces the same
//! numbers bit for bit, which makes it the yardstick for the packed path.

use std::collections::VecDeque;

use crate::constants::{
    BLOCK_BITS, HISTORY_SEED, HISTORY_WORDS, OUTPUT_GAIN_SHIFT, OUTPUTS_PER_BLOCK, TAP_COUNT,
};
use crate::decimator::{PHASE_A, PHASE_B};

/// Unpack PDM words into samples, earliest first (bit 0 of each word first)
pub fn unpack_bits(words: &[u32]) -> impl Iterator<Item = bool> + '_ {
    words
        .iter()
        .flat_map(|&word| (0..BLOCK_BITS).map(move |bit| (word >> bit) & 1 != 0))
}

/// Pack samples into PDM words, earliest sample in bit 0.
///
/// A trailing partial word is dropped.
pub fn pack_bits(bits: &[bool]) -> Vec<u32> {
    bits.chunks_exact(BLOCK_BITS)
        .map(|chunk| {
            chunk
                .iter()
                .enumerate()
                .fold(0u32, |word, (bit, &set)| word | ((set as u32) << bit))
        })
        .collect()
}

/// Single-channel tap-by-tap decimator
pub struct ReferenceDecimator {
    taps: [[i32; TAP_COUNT]; OUTPUTS_PER_BLOCK],
    /// Bipolar samples, oldest first
    delay_line: VecDeque<i8>,
    /// Samples received since the last block boundary
    pos: usize,
}

impl ReferenceDecimator {
    pub fn new() -> Self {
        let seed = [HISTORY_SEED; HISTORY_WORDS];
        let delay_line = unpack_bits(&seed)
            .map(|bit| if bit { 1 } else { -1 })
            .collect();

        Self {
            taps: [PHASE_A.taps(), PHASE_B.taps()],
            delay_line,
            pos: 0,
        }
    }

    /// Push one PDM sample, returning an output pair at every block boundary
    pub fn push_sample(&mut self, bit: bool) -> Option<[i32; OUTPUTS_PER_BLOCK]> {
        self.delay_line.pop_front();
        self.delay_line.push_back(if bit { 1 } else { -1 });

        self.pos += 1;
        if self.pos < BLOCK_BITS {
            return None;
        }
        self.pos = 0;

        Some(core::array::from_fn(|phase| self.evaluate(phase)))
    }

    /// Push a run of samples, collecting every output pair
    pub fn process_bits<I>(&mut self, bits: I) -> Vec<[i32; OUTPUTS_PER_BLOCK]>
    where
        I: IntoIterator<Item = bool>,
    {
        bits.into_iter()
            .filter_map(|bit| self.push_sample(bit))
            .collect()
    }

    fn evaluate(&self, phase: usize) -> i32 {
        let sum: i64 = self
            .delay_line
            .iter()
            .zip(self.taps[phase].iter())
            .map(|(&s, &t)| s as i64 * t as i64)
            .sum();
        ((sum / 2) as i32) << OUTPUT_GAIN_SHIFT
    }
}

impl Default for ReferenceDecimator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unpack_lsb_first() {
        let bits: Vec<bool> = unpack_bits(&[0b1011]).take(5).collect();
        assert_eq!(bits, [true, true, false, true, false]);
    }

    #[test]
    fn test_pack_inverts_unpack() {
        let words = [0xDEAD_BEEF, 0x0123_4567];
        let bits: Vec<bool> = unpack_bits(&words).collect();
        assert_eq!(pack_bits(&bits), words);
        assert_eq!(pack_bits(&bits[..40]), [0xDEAD_BEEF]);
    }

    #[test]
    fn test_seed_window_is_silent() {
        let mut reference = ReferenceDecimator::new();
        let outputs = reference.process_bits(unpack_bits(&[HISTORY_SEED; 4]));
        assert_eq!(outputs, vec![[0, 0]; 4]);
    }

    #[test]
    fn test_outputs_only_on_block_boundaries() {
        let mut reference = ReferenceDecimator::new();
        for _ in 0..BLOCK_BITS - 1 {
            assert!(reference.push_sample(false).is_none());
        }
        assert_eq!(reference.push_sample(false), Some([14_944, 11_920]));
    }
}
