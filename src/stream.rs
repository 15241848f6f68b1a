use crate::config::BitOrder;
use crate::constants::OUTPUTS_PER_BLOCK;
use crate::decimator::{Decimator192, Ready};

const WORD_BYTES: usize = std::mem::size_of::<u32>();

/// Byte-oriented front end for [`Decimator192`].
///
/// Takes a raw capture in arrival order: frames of `MIC_COUNT` little-endian
/// 32-bit words, word `mic` of each frame belonging to microphone `mic`.
/// Bytes may be pushed in pieces of any size; an incomplete frame is held
/// until the rest arrives, so output does not depend on how the capture is
/// split up.
pub struct PdmStream<const MIC_COUNT: usize> {
    decimator: Decimator192<MIC_COUNT, Ready>,
    bit_order: BitOrder,
    partial: [[u8; WORD_BYTES]; MIC_COUNT],
    fill: usize,
    sample_out: [[i32; MIC_COUNT]; OUTPUTS_PER_BLOCK],
    blocks: u64,
}

impl<const MIC_COUNT: usize> PdmStream<MIC_COUNT> {
    const FRAME_BYTES: usize = MIC_COUNT * WORD_BYTES;

    pub fn new(bit_order: BitOrder) -> Self {
        Self::with_decimator(Decimator192::new().init(), bit_order)
    }

    pub fn with_decimator(decimator: Decimator192<MIC_COUNT, Ready>, bit_order: BitOrder) -> Self {
        Self {
            decimator,
            bit_order,
            partial: [[0; WORD_BYTES]; MIC_COUNT],
            fill: 0,
            sample_out: [[0; MIC_COUNT]; OUTPUTS_PER_BLOCK],
            blocks: 0,
        }
    }

    /// Feed capture bytes, calling `output` once per completed frame.
    ///
    /// Returns the number of frames completed by this call.
    pub fn push<F>(&mut self, mut bytes: &[u8], mut output: F) -> usize
    where
        F: FnMut(&[[i32; MIC_COUNT]; OUTPUTS_PER_BLOCK]),
    {
        let mut frames = 0usize;

        // Finish a frame left over from the previous call
        while self.fill > 0 {
            let Some((&byte, rest)) = bytes.split_first() else {
                return frames;
            };
            self.partial[self.fill / WORD_BYTES][self.fill % WORD_BYTES] = byte;
            self.fill += 1;
            bytes = rest;
            if self.fill == Self::FRAME_BYTES {
                self.fill = 0;
                let block = self.partial.map(u32::from_le_bytes);
                self.run_block(&block, &mut output);
                frames += 1;
            }
        }

        let mut chunks = bytes.chunks_exact(Self::FRAME_BYTES);
        for frame in &mut chunks {
            let block: [u32; MIC_COUNT] = core::array::from_fn(|mic| {
                let at = mic * WORD_BYTES;
                u32::from_le_bytes([frame[at], frame[at + 1], frame[at + 2], frame[at + 3]])
            });
            self.run_block(&block, &mut output);
            frames += 1;
        }

        for &byte in chunks.remainder() {
            self.partial[self.fill / WORD_BYTES][self.fill % WORD_BYTES] = byte;
            self.fill += 1;
        }

        frames
    }

    fn run_block<F>(&mut self, block: &[u32; MIC_COUNT], output: &mut F)
    where
        F: FnMut(&[[i32; MIC_COUNT]; OUTPUTS_PER_BLOCK]),
    {
        let bit_order = self.bit_order;
        let block = block.map(|word| bit_order.to_native(word));
        self.decimator.process_block(&mut self.sample_out, &block);
        self.blocks += 1;
        output(&self.sample_out);
    }

    /// Bytes of an incomplete frame waiting for more input
    pub fn pending_bytes(&self) -> usize {
        self.fill
    }

    /// Frames processed since construction
    pub fn blocks_processed(&self) -> u64 {
        self.blocks
    }

    /// Output samples produced per channel since construction
    pub fn samples_produced(&self) -> u64 {
        self.blocks * OUTPUTS_PER_BLOCK as u64
    }

    pub fn bit_order(&self) -> BitOrder {
        self.bit_order
    }
}
