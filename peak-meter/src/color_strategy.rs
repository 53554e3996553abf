use crate::config::{HOT_ABOVE_DB, MID_ABOVE_DB};

/// Logical colours of the meter. The renderer maps them onto real pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub enum PaletteColor {
    Background,
    Hot,
    Mid,
    Cool,
    Marker,
}

pub struct ColorContext {
    pub bin: usize,
    pub num_bins: usize,
    pub db: f32,
}

pub trait ColorStrategy {
    fn color_for(&self, context: &ColorContext) -> PaletteColor;
}

/// Hot above `hot_above_db`, mid above `mid_above_db`, cool otherwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdColor {
    pub hot_above_db: f32,
    pub mid_above_db: f32,
}

impl Default for ThresholdColor {
    fn default() -> Self {
        Self {
            hot_above_db: HOT_ABOVE_DB,
            mid_above_db: MID_ABOVE_DB,
        }
    }
}

impl ColorStrategy for ThresholdColor {
    fn color_for(&self, context: &ColorContext) -> PaletteColor {
        if context.db > self.hot_above_db {
            PaletteColor::Hot
        } else if context.db > self.mid_above_db {
            PaletteColor::Mid
        } else {
            PaletteColor::Cool
        }
    }
}

/// Every bar in one colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolidColor(pub PaletteColor);

impl ColorStrategy for SolidColor {
    fn color_for(&self, _context: &ColorContext) -> PaletteColor {
        self.0
    }
}

/// Colour by position across the spectrum: the lowest third of the bins is
/// hot, the middle third mid, the top third cool. Level is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpectrumColor;

impl ColorStrategy for SpectrumColor {
    fn color_for(&self, context: &ColorContext) -> PaletteColor {
        if context.num_bins == 0 {
            return PaletteColor::Cool;
        }
        match context.bin * 3 / context.num_bins {
            0 => PaletteColor::Hot,
            1 => PaletteColor::Mid,
            _ => PaletteColor::Cool,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(db: f32) -> ColorContext {
        ColorContext {
            bin: 0,
            num_bins: 32,
            db,
        }
    }

    #[test]
    fn test_threshold_bands() {
        let strategy = ThresholdColor::default();
        assert_eq!(strategy.color_for(&ctx(0.0)), PaletteColor::Hot);
        assert_eq!(strategy.color_for(&ctx(-9.9)), PaletteColor::Hot);
        assert_eq!(strategy.color_for(&ctx(-10.0)), PaletteColor::Mid);
        assert_eq!(strategy.color_for(&ctx(-29.9)), PaletteColor::Mid);
        assert_eq!(strategy.color_for(&ctx(-30.0)), PaletteColor::Cool);
        assert_eq!(strategy.color_for(&ctx(-60.0)), PaletteColor::Cool);
    }

    #[test]
    fn test_solid_color_ignores_level() {
        let strategy = SolidColor(PaletteColor::Cool);
        assert_eq!(strategy.color_for(&ctx(0.0)), PaletteColor::Cool);
        assert_eq!(strategy.color_for(&ctx(-60.0)), PaletteColor::Cool);
    }

    #[test]
    fn test_spectrum_color_splits_bins_in_thirds() {
        let color = |bin, num_bins| {
            SpectrumColor.color_for(&ColorContext {
                bin,
                num_bins,
                db: -60.0,
            })
        };
        assert_eq!(color(0, 32), PaletteColor::Hot);
        assert_eq!(color(10, 32), PaletteColor::Hot);
        assert_eq!(color(11, 32), PaletteColor::Mid);
        assert_eq!(color(21, 32), PaletteColor::Mid);
        assert_eq!(color(22, 32), PaletteColor::Cool);
        assert_eq!(color(31, 32), PaletteColor::Cool);
        assert_eq!(color(0, 1), PaletteColor::Hot);
        assert_eq!(color(0, 0), PaletteColor::Cool);
    }
}
