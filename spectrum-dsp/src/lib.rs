#![no_std]

use microdsp::common::{apply_window_function, real_fft, WindowFunctionType::Hann};
use microfft::Complex32;
#[allow(unused_imports)]
use micromath::F32Ext;
use thiserror::Error;

/// Samples per analysis frame.
pub const FFT_SIZE: usize = 1024;
/// Magnitude bins produced per frame (one per positive frequency).
pub const NUM_BINS: usize = FFT_SIZE / 2;

/// Sum of a Hann window over `FFT_SIZE` samples, halved for the one-sided spectrum.
/// Dividing by this reads a full-scale sine as ~1.0.
const FULL_SCALE_MAGNITUDE: f32 = FFT_SIZE as f32 / 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DspError {
    #[error("input must contain exactly {expected} samples, got {actual}")]
    SampleCount { expected: usize, actual: usize },
    #[error("FFT output must contain exactly {expected} complex numbers, got {actual}")]
    SpectrumLength { expected: usize, actual: usize },
}

/// Normalize a single sample from i16 to f32.
pub fn normalize_sample(sample: i16) -> f32 {
    sample as f32 / i16::MAX as f32
}

/// Normalize a slice of i16 samples into a slice of f32 samples.
/// Extra slots on either side are left untouched.
pub fn normalize_samples(samples: &[i16], normalized_samples: &mut [f32]) {
    for (out, &sample) in normalized_samples.iter_mut().zip(samples) {
        *out = normalize_sample(sample);
    }
}

/// Apply a Hann window to a slice of f32 samples.
pub fn apply_hann_window(samples: &mut [f32]) {
    apply_window_function(Hann, samples);
}

/// Compute the real FFT of one frame in place.
pub fn compute_fft(samples: &mut [f32; FFT_SIZE]) -> &mut [Complex32] {
    real_fft(samples)
}

/// Compute the magnitude of each FFT output bin.
pub fn compute_magnitude(fft_output: &[Complex32]) -> Result<[f32; NUM_BINS], DspError> {
    if fft_output.len() != NUM_BINS {
        return Err(DspError::SpectrumLength {
            expected: NUM_BINS,
            actual: fft_output.len(),
        });
    }
    let mut magnitude = [0.0; NUM_BINS];
    for (out, component) in magnitude.iter_mut().zip(fft_output) {
        *out = (component.re * component.re + component.im * component.im).sqrt();
    }
    Ok(magnitude)
}

/// Scale raw FFT magnitudes so that a full-scale windowed sine reads ~1.0.
pub fn normalize_magnitudes(magnitudes: &mut [f32]) {
    for m in magnitudes.iter_mut() {
        *m /= FULL_SCALE_MAGNITUDE;
    }
}

/// Process a frame of i16 samples and return the normalized magnitude spectrum.
pub fn process_frame(samples: &[i16]) -> Result<[f32; NUM_BINS], DspError> {
    if samples.len() != FFT_SIZE {
        return Err(DspError::SampleCount {
            expected: FFT_SIZE,
            actual: samples.len(),
        });
    }

    let mut normalized_samples = [0.0; FFT_SIZE];
    normalize_samples(samples, &mut normalized_samples);

    apply_hann_window(&mut normalized_samples);

    let fft_output = compute_fft(&mut normalized_samples);

    let mut magnitude = compute_magnitude(fft_output)?;
    normalize_magnitudes(&mut magnitude);

    Ok(magnitude)
}
