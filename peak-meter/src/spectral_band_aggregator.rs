use alloc::vec::Vec;

#[allow(unused_imports)]
use micromath::F32Ext;

use crate::error::ConfigError;

/// How FFT bins are distributed over the meter's bands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BandSpread {
    /// Equal-width bands; the last one absorbs any remainder.
    Even,
    /// Bands widen towards high frequencies. Larger factors give more
    /// resolution to the bass end.
    Exponential { exp_factor: f32 },
}

/// Splits `bins_in` FFT bins into `bands_out` half-open `(start, end)` ranges.
///
/// Ranges are contiguous, start at 0 and end at `bins_in`. With the
/// exponential spread, low bands may be empty when bins are scarce.
pub fn band_ranges(
    bins_in: usize,
    bands_out: usize,
    spread: BandSpread,
) -> Result<Vec<(usize, usize)>, ConfigError> {
    if bands_out == 0 {
        return Err(ConfigError::NoBands);
    }
    if bins_in < bands_out {
        return Err(ConfigError::TooManyBands {
            bands_in: bins_in,
            bands_out,
        });
    }

    match spread {
        BandSpread::Even => Ok(even_ranges(bins_in, bands_out)),
        BandSpread::Exponential { exp_factor } => {
            if !(exp_factor > 0.0) {
                return Err(ConfigError::InvalidExpFactor(exp_factor));
            }
            // A factor of exactly 1 degenerates to 0/0.
            if (exp_factor - 1.0).abs() < f32::EPSILON {
                return Ok(even_ranges(bins_in, bands_out));
            }
            Ok(exponential_ranges(bins_in, bands_out, exp_factor))
        }
    }
}

fn even_ranges(bins_in: usize, bands_out: usize) -> Vec<(usize, usize)> {
    let band_size = bins_in / bands_out;
    (0..bands_out)
        .map(|i| {
            let start = i * band_size;
            let end = if i == bands_out - 1 {
                bins_in
            } else {
                start + band_size
            };
            (start, end)
        })
        .collect()
}

fn exponential_ranges(bins_in: usize, bands_out: usize, exp_factor: f32) -> Vec<(usize, usize)> {
    let boundary = |i: usize| -> usize {
        if i == 0 {
            return 0;
        }
        if i == bands_out {
            return bins_in;
        }
        let fraction = i as f32 / bands_out as f32;
        let position = (exp_factor.powf(fraction) - 1.0) / (exp_factor - 1.0) * bins_in as f32;
        (position.max(0.0) as usize).min(bins_in)
    };

    let mut ranges = Vec::with_capacity(bands_out);
    let mut start = 0;
    for i in 0..bands_out {
        // Keep ranges monotonic even if the float maths wobbles.
        let end = boundary(i + 1).max(start);
        ranges.push((start, end));
        start = end;
    }
    ranges
}
