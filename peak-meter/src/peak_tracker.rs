use alloc::{vec, vec::Vec};

use crate::config::MeterConfig;
use crate::decibel::DecibelMapper;

/// Peak-hold state of a single bin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakState {
    /// Held level in dB, always inside the tracker's range.
    pub held_db: f32,
    /// Timestamp (ms) of the last update that raised `held_db`.
    pub last_rise_ms: u64,
}

/// Per-bin peak-hold tracker.
///
/// A new level above the held one is taken instantly. Once a bin has not
/// risen for longer than the hold window, every further update lowers the
/// held level by a fixed step until it reaches the bottom of the range.
/// The decay is therefore per update, not per unit of time, and its speed
/// follows the caller's frame rate.
///
/// The bin count is fixed when the tracker is built.
#[derive(Debug, Clone)]
pub struct PeakTracker {
    states: Vec<PeakState>,
    mapper: DecibelMapper,
    hold_ms: u64,
    fall_db: f32,
}

impl PeakTracker {
    /// Creates a tracker with every bin held at the bottom of the range.
    pub fn new(num_bins: usize, mapper: DecibelMapper, hold_ms: u64, fall_db: f32) -> Self {
        let floor = PeakState {
            held_db: mapper.db_min(),
            last_rise_ms: 0,
        };
        Self {
            states: vec![floor; num_bins],
            mapper,
            hold_ms,
            fall_db,
        }
    }

    pub fn from_config(config: &MeterConfig) -> Self {
        Self::new(
            config.bin_count,
            DecibelMapper::new(config.db_min, config.db_max, config.magnitude_floor),
            config.hold_ms,
            config.fall_db,
        )
    }

    /// Feeds one frame's level for `bin` and returns the new held level.
    ///
    /// `now_ms` must not go backwards between calls; if it does, the bin is
    /// treated as still inside its hold window. An out-of-range `bin` leaves
    /// all state untouched and reads as the bottom of the range.
    pub fn update(&mut self, bin: usize, current_db: f32, now_ms: u64) -> f32 {
        let db_min = self.mapper.db_min();
        let current_db = self.mapper.clamp(current_db);
        if bin >= self.states.len() {
            warn!("peak tracker: bin {} out of range ({} bins)", bin, self.states.len());
            return db_min;
        }
        let state = &mut self.states[bin];

        if current_db > state.held_db {
            state.held_db = current_db;
            state.last_rise_ms = now_ms;
        } else if now_ms.saturating_sub(state.last_rise_ms) > self.hold_ms {
            state.held_db = (state.held_db - self.fall_db).max(db_min);
        }
        state.held_db
    }

    pub fn held_db(&self, bin: usize) -> Option<f32> {
        self.states.get(bin).map(|s| s.held_db)
    }

    pub fn state(&self, bin: usize) -> Option<&PeakState> {
        self.states.get(bin)
    }

    /// Held levels of all bins, in bin order.
    pub fn held_levels(&self) -> impl Iterator<Item = f32> + '_ {
        self.states.iter().map(|s| s.held_db)
    }

    pub fn bin_count(&self) -> usize {
        self.states.len()
    }
}
