//! Peak-hold spectrum meter.
//!
//! Each frame, per-bin FFT magnitudes are mapped onto a clamped decibel
//! scale and drawn as bars; every bar carries a marker that jumps to new
//! peaks instantly, holds, then falls a fixed step per frame.
//!
//! Audio capture and the pixel surface stay outside the crate behind
//! [`MagnitudeSource`] and [`Renderer`], so the meter runs the same on a
//! panel, in a simulator window or in tests.
#![no_std]
extern crate alloc;

#[cfg(feature = "logging")]
use defmt_rtt as _;

#[macro_use]
mod fmt;

pub mod bin_summary_strategy;
pub mod color_strategy;
pub mod config;
pub mod decibel;
pub mod error;
pub mod layout;
pub mod peak_tracker;
pub mod renderer;
pub mod source;
pub mod spectral_band_aggregator;
pub mod spectrum_meter;

pub use bin_summary_strategy::BinSummary;
pub use color_strategy::{
    ColorContext, ColorStrategy, PaletteColor, SolidColor, SpectrumColor, ThresholdColor,
};
pub use config::MeterConfig;
pub use decibel::DecibelMapper;
pub use error::ConfigError;
pub use layout::BarLayout;
pub use peak_tracker::{PeakState, PeakTracker};
pub use renderer::{DrawTargetRenderer, Palette, Renderer};
pub use source::{BandedSource, MagnitudeSource};
pub use spectral_band_aggregator::{band_ranges, BandSpread};
pub use spectrum_meter::{FrameOutcome, SpectrumMeter};
