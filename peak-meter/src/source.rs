use alloc::vec::Vec;

use crate::bin_summary_strategy::BinSummary;
use crate::error::ConfigError;
use crate::spectral_band_aggregator::{band_ranges, BandSpread};

/// Producer of per-bin magnitudes, one frame at a time.
pub trait MagnitudeSource {
    /// True once per completed analysis frame. Never blocks.
    fn available(&mut self) -> bool;

    /// Magnitude of `bin` in the latest frame. May be called repeatedly
    /// within a frame; bins past the end read as 0.0.
    fn read(&self, bin: usize) -> f32;
}

/// Source that reduces a full FFT frame to a fixed number of bands.
///
/// The audio side hands over frames with [`BandedSource::push_frame`]; the
/// meter sees each pushed frame exactly once through `available()`.
pub struct BandedSource {
    ranges: Vec<(usize, usize)>,
    summary: BinSummary,
    frame: Vec<f32>,
    fresh: bool,
    frames_pushed: u32,
}

impl BandedSource {
    pub fn new(
        bins_in: usize,
        bands_out: usize,
        spread: BandSpread,
        summary: BinSummary,
    ) -> Result<Self, ConfigError> {
        let ranges = band_ranges(bins_in, bands_out, spread)?;
        info!(
            "BandedSource::new: {} bins into {} bands",
            bins_in, bands_out
        );
        Ok(Self {
            ranges,
            summary,
            frame: Vec::with_capacity(bins_in),
            fresh: false,
            frames_pushed: 0,
        })
    }

    /// Bin `i` of the input becomes band `i`.
    pub fn direct(num_bins: usize) -> Result<Self, ConfigError> {
        Self::new(num_bins, num_bins, BandSpread::Even, BinSummary::Max)
    }

    /// Replaces the latest frame. Shorter frames leave the missing bins silent.
    pub fn push_frame(&mut self, magnitudes: &[f32]) {
        self.frame.clear();
        self.frame.extend_from_slice(magnitudes);
        self.fresh = true;
        self.frames_pushed = self.frames_pushed.wrapping_add(1);
    }

    pub fn band_count(&self) -> usize {
        self.ranges.len()
    }

    pub fn band_ranges(&self) -> &[(usize, usize)] {
        &self.ranges
    }

    pub fn frames_pushed(&self) -> u32 {
        self.frames_pushed
    }
}

impl MagnitudeSource for BandedSource {
    fn available(&mut self) -> bool {
        core::mem::take(&mut self.fresh)
    }

    fn read(&self, bin: usize) -> f32 {
        let Some(&(start, end)) = self.ranges.get(bin) else {
            return 0.0;
        };
        let end = end.min(self.frame.len());
        let start = start.min(end);
        self.summary.calculate(&self.frame[start..end])
    }
}
