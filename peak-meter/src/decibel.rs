use crate::config::{DB_MAX, DB_MIN, MAGNITUDE_FLOOR};

/// Maps linear FFT magnitudes onto a clamped decibel scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecibelMapper {
    db_min: f32,
    db_max: f32,
    floor: f32,
}

impl Default for DecibelMapper {
    fn default() -> Self {
        Self::new(DB_MIN, DB_MAX, MAGNITUDE_FLOOR)
    }
}

impl DecibelMapper {
    /// Callers are expected to have validated `db_min < db_max` and `floor > 0`
    /// (see [`crate::MeterConfig::validate`]).
    pub const fn new(db_min: f32, db_max: f32, floor: f32) -> Self {
        Self {
            db_min,
            db_max,
            floor,
        }
    }

    pub fn db_min(&self) -> f32 {
        self.db_min
    }

    pub fn db_max(&self) -> f32 {
        self.db_max
    }

    /// `20 * log10(magnitude)`, clamped to the display range.
    ///
    /// Zero, negative and NaN magnitudes are floored first, so this never
    /// takes the log of zero and always returns a value inside the range.
    pub fn to_db(&self, magnitude: f32) -> f32 {
        let magnitude = magnitude.max(self.floor);
        // Must stay monotonic in magnitude, which micromath's log approximation is not.
        let db = 20.0 * libm::log10f(magnitude);
        self.clamp(db)
    }

    pub fn clamp(&self, db: f32) -> f32 {
        if db.is_nan() {
            return self.db_min;
        }
        db.max(self.db_min).min(self.db_max)
    }

    /// Position of `db` within the range, 0.0 at the floor and 1.0 at full scale.
    pub fn normalize(&self, db: f32) -> f32 {
        ((self.clamp(db) - self.db_min) / (self.db_max - self.db_min))
            .max(0.0)
            .min(1.0)
    }
}
