use thiserror::Error;

/// Rejected meter or source configuration.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    #[error("bin count must be greater than 0")]
    NoBins,
    #[error("decibel range is empty: min {min} must be below max {max}")]
    EmptyRange { min: f32, max: f32 },
    #[error("magnitude floor must be positive, got {0}")]
    NonPositiveFloor(f32),
    #[error("fall rate must be finite and non-negative, got {0}")]
    InvalidFallRate(f32),
    #[error("colour thresholds out of order: hot {hot} must be above mid {mid}")]
    ThresholdOrder { hot: f32, mid: f32 },
    #[error("bars and surface must be at least one pixel in each direction")]
    ZeroSizedLayout,
    #[error("{bars} bars need {needed} px but the surface is {available} px wide")]
    LayoutTooNarrow {
        bars: usize,
        needed: u32,
        available: u32,
    },
    #[error("number of bands out must be greater than 0")]
    NoBands,
    #[error("{bands_in} input bins cannot be split into {bands_out} bands")]
    TooManyBands { bands_in: usize, bands_out: usize },
    #[error("exponential factor must be greater than 0, got {0}")]
    InvalidExpFactor(f32),
}
