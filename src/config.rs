//! Configuration for the PDM capture front end.
//!
//! The decimator core itself has no runtime configuration; everything here
//! describes how raw capture files are laid out and where output goes.
//!
//! A configuration file is TOML with any subset of the fields:
//!
//! ```toml
//! pdm_clock_hz = 3072000
//! mic_count = 4
//! bit_order = "msb-first"
//! chunk_size = 8192
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::constants::{DECIMATION_FACTOR, DEFAULT_PDM_CLOCK_HZ, MAX_MIC_COUNT};
use crate::error::{DecimatorError, Result};

/// Order in which a capture word holds its PDM samples
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum BitOrder {
    /// Earliest sample in bit 0 (the decimator's native order)
    #[default]
    LsbFirst,
    /// Earliest sample in bit 31
    MsbFirst,
}

impl BitOrder {
    /// Convert a captured word to the decimator's native order
    #[inline]
    pub fn to_native(self, word: u32) -> u32 {
        match self {
            BitOrder::LsbFirst => word,
            BitOrder::MsbFirst => word.reverse_bits(),
        }
    }
}

impl fmt::Display for BitOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BitOrder::LsbFirst => write!(f, "lsb-first"),
            BitOrder::MsbFirst => write!(f, "msb-first"),
        }
    }
}

/// Capture and output configuration
///
/// # Example
/// ```
/// use pdm192::config::DecimatorConfig;
///
/// let config = DecimatorConfig::from_toml_str("mic_count = 2").unwrap();
/// assert_eq!(config.mic_count, 2);
/// assert_eq!(config.output_sample_rate(), 192_000);
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DecimatorConfig {
    /// PDM bit clock in Hz
    pub pdm_clock_hz: u32,
    /// Number of interleaved microphone channels in the capture
    pub mic_count: usize,
    /// Sample order within each captured 32-bit word
    pub bit_order: BitOrder,
    /// Bytes read from the capture per processing step
    pub chunk_size: usize,
    /// Destination WAV file
    pub output: Option<PathBuf>,
}

impl Default for DecimatorConfig {
    fn default() -> Self {
        Self {
            pdm_clock_hz: DEFAULT_PDM_CLOCK_HZ,
            mic_count: 1,
            bit_order: BitOrder::LsbFirst,
            chunk_size: 4096,
            output: None,
        }
    }
}

impl DecimatorConfig {
    /// Parse a TOML document; missing fields take their defaults
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| DecimatorError::Config(e.to_string()))
    }

    /// Read and parse a TOML configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&text)?;
        log::debug!("Loaded configuration from {}", path.as_ref().display());
        Ok(config)
    }

    /// Check the values the front end relies on
    pub fn validate(&self) -> Result<()> {
        if self.mic_count == 0 || self.mic_count > MAX_MIC_COUNT {
            return Err(DecimatorError::UnsupportedChannelCount(self.mic_count));
        }
        if self.pdm_clock_hz == 0 || self.pdm_clock_hz % DECIMATION_FACTOR as u32 != 0 {
            return Err(DecimatorError::Config(format!(
                "PDM clock {} Hz is not a positive multiple of {}",
                self.pdm_clock_hz, DECIMATION_FACTOR
            )));
        }
        if self.chunk_size == 0 {
            return Err(DecimatorError::Config("chunk_size must be positive".to_string()));
        }
        Ok(())
    }

    /// Decimated sample rate in Hz
    pub fn output_sample_rate(&self) -> u32 {
        self.pdm_clock_hz / DECIMATION_FACTOR as u32
    }

    /// Bytes in one capture frame (one word per channel)
    pub fn frame_bytes(&self) -> usize {
        self.mic_count * std::mem::size_of::<u32>()
    }
}
