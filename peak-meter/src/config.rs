use crate::error::ConfigError;
use crate::layout::BarLayout;

// --- Display Config ---
pub const SCREEN_WIDTH: u32 = 160; // ST7735 in landscape
pub const SCREEN_HEIGHT: u32 = 128;
pub const DEFAULT_BAR_WIDTH: u32 = 4;
pub const DEFAULT_BAR_SPACING: u32 = 1;

// --- Meter Config ---
pub const NUM_BINS: usize = 32; // Number of bars
pub const DB_MIN: f32 = -60.0;
pub const DB_MAX: f32 = 0.0;
pub const MAGNITUDE_FLOOR: f32 = 1e-5; // Keeps log10 away from zero
pub const HOT_ABOVE_DB: f32 = -10.0;
pub const MID_ABOVE_DB: f32 = -30.0;

// --- Peak Hold Config ---
pub const HOLD_DURATION_MS: u64 = 300;
pub const FALL_DB_PER_FRAME: f32 = 0.5;

// --- Task Timing ---
pub const FRAME_DELAY_MS: u64 = 20; // Pause after each drawn frame

/// Tunables for one meter instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeterConfig {
    pub bin_count: usize,
    pub db_min: f32,
    pub db_max: f32,
    pub magnitude_floor: f32,
    pub hold_ms: u64,
    pub fall_db: f32,
    pub hot_above_db: f32,
    pub mid_above_db: f32,
    pub frame_delay_ms: u64,
    pub layout: BarLayout,
}

impl Default for MeterConfig {
    fn default() -> Self {
        Self {
            bin_count: NUM_BINS,
            db_min: DB_MIN,
            db_max: DB_MAX,
            magnitude_floor: MAGNITUDE_FLOOR,
            hold_ms: HOLD_DURATION_MS,
            fall_db: FALL_DB_PER_FRAME,
            hot_above_db: HOT_ABOVE_DB,
            mid_above_db: MID_ABOVE_DB,
            frame_delay_ms: FRAME_DELAY_MS,
            layout: BarLayout::default(),
        }
    }
}

impl MeterConfig {
    pub fn with_bin_count(mut self, bin_count: usize) -> Self {
        self.bin_count = bin_count;
        self
    }

    pub fn with_db_range(mut self, db_min: f32, db_max: f32) -> Self {
        self.db_min = db_min;
        self.db_max = db_max;
        self
    }

    pub fn with_magnitude_floor(mut self, floor: f32) -> Self {
        self.magnitude_floor = floor;
        self
    }

    pub fn with_hold_ms(mut self, hold_ms: u64) -> Self {
        self.hold_ms = hold_ms;
        self
    }

    pub fn with_fall_db(mut self, fall_db: f32) -> Self {
        self.fall_db = fall_db;
        self
    }

    pub fn with_thresholds(mut self, hot_above_db: f32, mid_above_db: f32) -> Self {
        self.hot_above_db = hot_above_db;
        self.mid_above_db = mid_above_db;
        self
    }

    pub fn with_frame_delay_ms(mut self, frame_delay_ms: u64) -> Self {
        self.frame_delay_ms = frame_delay_ms;
        self
    }

    pub fn with_layout(mut self, layout: BarLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bin_count == 0 {
            return Err(ConfigError::NoBins);
        }
        // Written as a negation so NaN bounds are rejected too.
        if !(self.db_min < self.db_max) {
            return Err(ConfigError::EmptyRange {
                min: self.db_min,
                max: self.db_max,
            });
        }
        if !(self.magnitude_floor > 0.0) {
            return Err(ConfigError::NonPositiveFloor(self.magnitude_floor));
        }
        if !self.fall_db.is_finite() || self.fall_db < 0.0 {
            return Err(ConfigError::InvalidFallRate(self.fall_db));
        }
        if !(self.hot_above_db >= self.mid_above_db) {
            return Err(ConfigError::ThresholdOrder {
                hot: self.hot_above_db,
                mid: self.mid_above_db,
            });
        }
        self.layout.validate(self.bin_count)
    }
}
