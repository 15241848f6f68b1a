//! Single-stage PDM decimator: 32 PDM samples in, two output samples out.

pub mod bit_fir;
pub mod coefficients;
pub mod engine;
pub mod history;

pub use coefficients::{CoefficientSet, PHASE_A, PHASE_B};
pub use engine::{Decimator192, Ready, Uninitialized};
pub use history::PdmHistory;
