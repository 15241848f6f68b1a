//! Synthetic PDM sources for tests and the `generate_pdm` tool.

mod modulator;
mod signal;

pub use modulator::SigmaDelta;
pub use signal::{generate_pdm, generate_sine_pdm, interleave};
