#[allow(unused_imports)]
use micromath::F32Ext;

use crate::config::{DEFAULT_BAR_SPACING, DEFAULT_BAR_WIDTH, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::error::ConfigError;

/// Pixel geometry of the bar graph.
///
/// The region starts at `origin` (top-left) and bars grow upwards from its
/// bottom edge. Bar `i` starts `i * (bar_width + bar_spacing)` pixels right
/// of the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarLayout {
    pub origin_x: i32,
    pub origin_y: i32,
    pub width: u32,
    pub height: u32,
    pub bar_width: u32,
    pub bar_spacing: u32,
}

impl Default for BarLayout {
    fn default() -> Self {
        Self {
            origin_x: 0,
            origin_y: 0,
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            bar_width: DEFAULT_BAR_WIDTH,
            bar_spacing: DEFAULT_BAR_SPACING,
        }
    }
}

impl BarLayout {
    /// Width in pixels taken by `num_bars` bars, without trailing spacing.
    pub fn span(&self, num_bars: usize) -> u32 {
        if num_bars == 0 {
            return 0;
        }
        let n = num_bars as u32;
        n * self.bar_width + (n - 1) * self.bar_spacing
    }

    pub fn validate(&self, num_bars: usize) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 || self.bar_width == 0 {
            return Err(ConfigError::ZeroSizedLayout);
        }
        let needed = self.span(num_bars);
        if needed > self.width {
            return Err(ConfigError::LayoutTooNarrow {
                bars: num_bars,
                needed,
                available: self.width,
            });
        }
        Ok(())
    }

    /// Left edge of bar `index`.
    pub fn bar_x(&self, index: usize) -> i32 {
        self.origin_x + (index as u32 * (self.bar_width + self.bar_spacing)) as i32
    }

    /// Maps a `[0, 1]` level to a bar height in pixels.
    pub fn level_height(&self, level: f32) -> u32 {
        let level = level.max(0.0).min(1.0);
        ((level * self.height as f32).round() as u32).min(self.height)
    }

    /// Top row of a bar `height` pixels tall.
    pub fn bar_top(&self, height: u32) -> i32 {
        self.origin_y + self.height.saturating_sub(height) as i32
    }

    /// Row of the one-pixel peak marker for a level `height` pixels tall.
    /// The floor level sits on the bottom row, full scale on the top row.
    pub fn marker_y(&self, height: u32) -> i32 {
        self.origin_y + self.height.saturating_sub(height.max(1)) as i32
    }
}
