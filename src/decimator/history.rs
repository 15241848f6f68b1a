use crate::constants::{HISTORY_SEED, HISTORY_WORDS};

use super::bit_fir::shift_buffer;

/// Rolling PDM history of one channel.
///
/// Holds one word more than the 256-bit filter window. Slot 0 receives the
/// incoming block, slots `0..8` are what the filters see and slots `1..9`
/// are the retained history: the last eight blocks, newest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PdmHistory {
    words: [u32; HISTORY_WORDS + 1],
}

impl PdmHistory {
    /// History seeded with the alternating pattern
    pub const SEEDED: Self = Self {
        words: [HISTORY_SEED; HISTORY_WORDS + 1],
    };

    pub const fn new() -> Self {
        Self::SEEDED
    }

    /// Place a new block in front of the retained history
    #[inline]
    pub fn insert(&mut self, block: u32) {
        self.words[0] = block;
    }

    /// The 256-bit filter window, newest word first
    #[inline]
    pub fn window(&self) -> [u32; HISTORY_WORDS] {
        core::array::from_fn(|i| self.words[i])
    }

    /// Drop the oldest word so the last inserted block becomes history
    #[inline]
    pub fn shift(&mut self) {
        shift_buffer(&mut self.words);
    }

    /// The last eight blocks fed to this channel, newest first
    pub fn retained(&self) -> [u32; HISTORY_WORDS] {
        core::array::from_fn(|i| self.words[i + 1])
    }
}

impl Default for PdmHistory {
    fn default() -> Self {
        Self::SEEDED
    }
}
