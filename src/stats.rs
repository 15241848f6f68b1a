//! Level measurements on decimated output.

use crate::constants::FULL_SCALE_OUTPUT;

/// Scale a decimator output sample so full scale is +/-1.0
#[inline]
pub fn to_unit(sample: i32) -> f32 {
    sample as f32 / FULL_SCALE_OUTPUT as f32
}

pub fn compute_mean(buf: &[f32]) -> f32 {
    if buf.is_empty() {
        return 0.0;
    }
    buf.iter().sum::<f32>() / buf.len() as f32
}

/// Return RMS of signal in dBFS, and the calculated DC offset
///
/// The mean is removed before measuring. A sine with +/-1.0 amplitude
/// reads 0 dBFS.
pub fn compute_rms_mean(buf: &[f32]) -> (f32, f32) {
    let mean = compute_mean(buf);
    if buf.is_empty() {
        return (f32::NEG_INFINITY, mean);
    }
    let power = buf.iter().map(|&s| (s - mean) * (s - mean)).sum::<f32>() / buf.len() as f32;
    // 20 * log10(rms * sqrt(2)); 20 * log10(sqrt(2)) ~= 3.0103
    let db_fs = 20.0 * power.sqrt().log10() + 3.0103;
    (db_fs, mean)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f32::consts::PI;

    #[test]
    fn test_to_unit() {
        assert_eq!(to_unit(FULL_SCALE_OUTPUT), 1.0);
        assert_eq!(to_unit(-FULL_SCALE_OUTPUT), -1.0);
        assert_eq!(to_unit(0), 0.0);
    }

    #[test]
    fn test_full_scale_sine_is_zero_dbfs() {
        let sine: Vec<f32> = (0..4800)
            .map(|i| (2.0 * PI * 1000.0 * i as f32 / 48_000.0).sin() + 0.25)
            .collect();
        let (db_fs, mean) = compute_rms_mean(&sine);
        assert_abs_diff_eq!(db_fs, 0.0, epsilon = 0.01);
        assert_abs_diff_eq!(mean, 0.25, epsilon = 1e-4);
    }

    #[test]
    fn test_empty() {
        assert_eq!(compute_mean(&[]), 0.0);
        assert_eq!(compute_rms_mean(&[]).0, f32::NEG_INFINITY);
    }
}
