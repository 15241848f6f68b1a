/// Second-order sigma-delta modulator
///
/// * Input is a unipolar-scaled sample in `-1.0..=1.0`; stays stable up to
///   roughly +/-0.7.
/// * Output bit `true` stands for +1, `false` for -1.
/// * Given constant input `x0`, the density of ones tends to `(1 + x0) / 2`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SigmaDelta {
    integrators: [f64; 2],
    feedback: f64,
}

impl SigmaDelta {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest one sample, emit one PDM bit
    pub fn process(&mut self, x: f64) -> bool {
        self.integrators[0] += x - self.feedback;
        self.integrators[1] += self.integrators[0] - self.feedback;
        let bit = self.integrators[1] >= 0.0;
        self.feedback = if bit { 1.0 } else { -1.0 };
        bit
    }

    /// Modulate samples into packed words, earliest bit in bit 0.
    ///
    /// `samples` is consumed 32 at a time; a trailing partial word is dropped.
    pub fn modulate_words<I>(&mut self, samples: I) -> Vec<u32>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut words = Vec::new();
        let mut word = 0u32;
        let mut bit = 0;
        for x in samples {
            if self.process(x) {
                word |= 1 << bit;
            }
            bit += 1;
            if bit == 32 {
                words.push(word);
                word = 0;
                bit = 0;
            }
        }
        words
    }
}
