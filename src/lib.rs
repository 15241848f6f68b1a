pub mod config;
pub mod constants;
pub mod decimator;
pub mod error;
pub mod reference;
pub mod stats;
pub mod stream;
pub mod wav;

#[cfg(feature = "simulation")]
pub mod simulation;

pub use config::{BitOrder, DecimatorConfig};
pub use decimator::Decimator192;
pub use error::{DecimatorError, Result};
pub use stream::PdmStream;
pub use wav::save_wav;
