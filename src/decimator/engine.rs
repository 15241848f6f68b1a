use crate::constants::{OUTPUT_GAIN_SHIFT, OUTPUTS_PER_BLOCK};

use super::bit_fir::fir_1x16_bit;
use super::coefficients::{CoefficientSet, PHASE_A, PHASE_B};
use super::history::PdmHistory;

/// Decimator state before [`Decimator192::init`]: no coefficients bound
#[derive(Clone, Copy, Debug, Default)]
pub struct Uninitialized;

/// Decimator state after [`Decimator192::init`]
#[derive(Clone, Copy, Debug)]
pub struct Ready {
    filter_coef: [&'static CoefficientSet; OUTPUTS_PER_BLOCK],
}

/// Single-stage PDM decimator producing 192 kHz from a 3.072 MHz PDM clock.
///
/// Every call to [`process_block`](Decimator192::process_block) consumes one
/// 32-sample PDM word per microphone and emits two output samples per
/// microphone. The same 256-bit window is filtered twice, by two copies of
/// the prototype low-pass offset by 16 samples, which yields both output
/// instants of the block without iterating over individual bits.
///
/// Construction only lays out seeded history and is `const`, so an instance
/// can live in a `static`. Coefficients are bound by the separate
/// [`init`](Decimator192::init) step, and only the resulting `Ready` state
/// can process blocks.
///
/// # Example
/// ```
/// use pdm192::decimator::Decimator192;
///
/// let mut decimator = Decimator192::<2>::new().init();
/// let mut out = [[0i32; 2]; 2];
/// decimator.process_block(&mut out, &[0x5555_5555, 0x5555_5555]);
/// assert_eq!(out, [[0, 0], [0, 0]]);
/// ```
#[derive(Clone, Debug)]
pub struct Decimator192<const MIC_COUNT: usize, S = Uninitialized> {
    pdm_history: [PdmHistory; MIC_COUNT],
    state: S,
}

impl<const MIC_COUNT: usize> Decimator192<MIC_COUNT, Uninitialized> {
    pub const fn new() -> Self {
        Self {
            pdm_history: [PdmHistory::SEEDED; MIC_COUNT],
            state: Uninitialized,
        }
    }

    /// Bind the phase A and phase B coefficient sets
    pub fn init(self) -> Decimator192<MIC_COUNT, Ready> {
        Decimator192 {
            pdm_history: self.pdm_history,
            state: Ready {
                filter_coef: [&PHASE_A, &PHASE_B],
            },
        }
    }
}

impl<const MIC_COUNT: usize> Default for Decimator192<MIC_COUNT, Uninitialized> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const MIC_COUNT: usize> Decimator192<MIC_COUNT, Ready> {
    /// Process one block of PDM data.
    ///
    /// `pdm_block[mic]` holds 32 PDM samples for microphone `mic`, earliest
    /// sample in bit 0. `sample_out[0][mic]` and `sample_out[1][mic]` receive
    /// the two decimated samples in chronological order, each scaled by
    /// `1 << OUTPUT_GAIN_SHIFT`.
    pub fn process_block(
        &mut self,
        sample_out: &mut [[i32; MIC_COUNT]; OUTPUTS_PER_BLOCK],
        pdm_block: &[u32; MIC_COUNT],
    ) {
        let [coef_first, coef_second] = self.state.filter_coef;

        for (mic, (hist, &block)) in self.pdm_history.iter_mut().zip(pdm_block).enumerate() {
            hist.insert(block);
            let window = hist.window();
            sample_out[0][mic] = fir_1x16_bit(&window, coef_first) << OUTPUT_GAIN_SHIFT;
            sample_out[1][mic] = fir_1x16_bit(&window, coef_second) << OUTPUT_GAIN_SHIFT;
            hist.shift();
        }
    }

    /// Coefficient sets backing the first and second output of each block
    pub fn filter_coefficients(&self) -> [&'static CoefficientSet; OUTPUTS_PER_BLOCK] {
        self.state.filter_coef
    }
}
