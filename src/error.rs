use thiserror::Error;

/// Errors raised around the decimator: configuration, capture I/O and output.
///
/// Block processing itself cannot fail.
#[derive(Error, Debug)]
pub enum DecimatorError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unsupported channel count {0} (expected 1..=8)")]
    UnsupportedChannelCount(usize),
}

pub type Result<T> = std::result::Result<T, DecimatorError>;
