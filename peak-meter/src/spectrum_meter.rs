use alloc::{vec, vec::Vec};

use crate::color_strategy::{ColorContext, ColorStrategy, PaletteColor, ThresholdColor};
use crate::config::MeterConfig;
use crate::decibel::DecibelMapper;
use crate::error::ConfigError;
use crate::peak_tracker::PeakTracker;
use crate::renderer::Renderer;
use crate::source::MagnitudeSource;

/// Frames between periodic status logs.
const LOG_INTERVAL_FRAMES: u32 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub enum FrameOutcome {
    /// A new frame was drawn.
    Rendered,
    /// The source had nothing new; nothing was drawn.
    Skipped,
}

/// Bar graph with peak-hold markers, driven one frame at a time.
pub struct SpectrumMeter<C = ThresholdColor> {
    config: MeterConfig,
    mapper: DecibelMapper,
    tracker: PeakTracker,
    colors: C,
    levels: Vec<f32>,
    frames_rendered: u32,
    log_counter: u32,
}

impl SpectrumMeter<ThresholdColor> {
    pub fn new(config: MeterConfig) -> Result<Self, ConfigError> {
        let colors = ThresholdColor {
            hot_above_db: config.hot_above_db,
            mid_above_db: config.mid_above_db,
        };
        Self::with_color_strategy(config, colors)
    }
}

impl<C: ColorStrategy> SpectrumMeter<C> {
    pub fn with_color_strategy(config: MeterConfig, colors: C) -> Result<Self, ConfigError> {
        config.validate()?;
        info!(
            "SpectrumMeter::new: {} bins, {} to {} dB, hold {} ms, fall {} dB/frame",
            config.bin_count, config.db_min, config.db_max, config.hold_ms, config.fall_db
        );
        let mapper = DecibelMapper::new(config.db_min, config.db_max, config.magnitude_floor);
        Ok(Self {
            config,
            mapper,
            tracker: PeakTracker::from_config(&config),
            colors,
            levels: vec![config.db_min; config.bin_count],
            frames_rendered: 0,
            log_counter: 0,
        })
    }

    /// Draws one frame if `source` has one ready.
    ///
    /// Clears the meter area, then for each bin draws its bar in the colour
    /// picked by the strategy, updates the bin's peak hold and draws the
    /// one-pixel marker. When the source has nothing new this returns
    /// [`FrameOutcome::Skipped`] without touching the renderer or the peaks.
    ///
    /// Pacing is the caller's job (see [`MeterConfig::frame_delay_ms`]).
    /// A renderer error aborts the frame part-way; bins already processed
    /// keep their updated peaks.
    pub fn run_frame<M, R>(
        &mut self,
        source: &mut M,
        renderer: &mut R,
        now_ms: u64,
    ) -> Result<FrameOutcome, R::Error>
    where
        M: MagnitudeSource + ?Sized,
        R: Renderer + ?Sized,
    {
        if !source.available() {
            trace!("run_frame: no frame available at {} ms", now_ms);
            return Ok(FrameOutcome::Skipped);
        }

        let layout = self.config.layout;
        renderer.clear_region(
            layout.origin_x,
            layout.origin_y,
            layout.width,
            layout.height,
            PaletteColor::Background,
        )?;

        let num_bins = self.tracker.bin_count();
        for bin in 0..num_bins {
            let db = self.mapper.to_db(source.read(bin));
            self.levels[bin] = db;

            let x = layout.bar_x(bin);
            let color = self.colors.color_for(&ColorContext { bin, num_bins, db });
            let bar_height = layout.level_height(self.mapper.normalize(db));
            if bar_height > 0 {
                renderer.fill_rect(
                    x,
                    layout.bar_top(bar_height),
                    layout.bar_width,
                    bar_height,
                    color,
                )?;
            }

            let held_db = self.tracker.update(bin, db, now_ms);
            let peak_height = layout.level_height(self.mapper.normalize(held_db));
            renderer.draw_horizontal_line(
                x,
                layout.marker_y(peak_height),
                layout.bar_width,
                PaletteColor::Marker,
            )?;
        }

        self.frames_rendered = self.frames_rendered.wrapping_add(1);
        self.log_counter += 1;
        if self.log_counter >= LOG_INTERVAL_FRAMES {
            info!(
                "run_frame: {} frames rendered, bin 0 at {} dB (peak {} dB)",
                self.frames_rendered,
                self.levels[0],
                self.tracker.held_db(0).unwrap_or(self.config.db_min)
            );
            self.log_counter = 0;
        }
        Ok(FrameOutcome::Rendered)
    }

    /// Levels (dB) drawn in the latest rendered frame, in bin order.
    pub fn levels(&self) -> &[f32] {
        &self.levels
    }

    pub fn tracker(&self) -> &PeakTracker {
        &self.tracker
    }

    pub fn mapper(&self) -> &DecibelMapper {
        &self.mapper
    }

    pub fn config(&self) -> &MeterConfig {
        &self.config
    }

    pub fn frame_delay_ms(&self) -> u64 {
        self.config.frame_delay_ms
    }

    pub fn frames_rendered(&self) -> u32 {
        self.frames_rendered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color_strategy::{SolidColor, SpectrumColor};
    use crate::layout::BarLayout;
    use alloc::{vec, vec::Vec};
    use approx::assert_abs_diff_eq;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Command {
        Clear(i32, i32, u32, u32, PaletteColor),
        Rect(i32, i32, u32, u32, PaletteColor),
        HLine(i32, i32, u32, PaletteColor),
    }

    #[derive(Default)]
    struct RecordingRenderer {
        commands: Vec<Command>,
        fail_after: Option<usize>,
    }

    impl Renderer for RecordingRenderer {
        type Error = &'static str;

        fn clear_region(
            &mut self,
            x: i32,
            y: i32,
            width: u32,
            height: u32,
            color: PaletteColor,
        ) -> Result<(), Self::Error> {
            self.record(Command::Clear(x, y, width, height, color))
        }

        fn fill_rect(
            &mut self,
            x: i32,
            y: i32,
            width: u32,
            height: u32,
            color: PaletteColor,
        ) -> Result<(), Self::Error> {
            self.record(Command::Rect(x, y, width, height, color))
        }

        fn draw_horizontal_line(
            &mut self,
            x: i32,
            y: i32,
            width: u32,
            color: PaletteColor,
        ) -> Result<(), Self::Error> {
            self.record(Command::HLine(x, y, width, color))
        }
    }

    impl RecordingRenderer {
        fn record(&mut self, command: Command) -> Result<(), &'static str> {
            if self.fail_after == Some(self.commands.len()) {
                return Err("bus error");
            }
            self.commands.push(command);
            Ok(())
        }
    }

    /// Hands out a fixed list of frames, one per `available()` poll.
    struct ScriptedSource {
        frames: Vec<Vec<f32>>,
        next: usize,
        current: Vec<f32>,
    }

    impl ScriptedSource {
        fn new(frames: Vec<Vec<f32>>) -> Self {
            Self {
                frames,
                next: 0,
                current: Vec::new(),
            }
        }
    }

    impl MagnitudeSource for ScriptedSource {
        fn available(&mut self) -> bool {
            match self.frames.get(self.next) {
                Some(frame) => {
                    self.current = frame.clone();
                    self.next += 1;
                    true
                }
                None => false,
            }
        }

        fn read(&self, bin: usize) -> f32 {
            self.current.get(bin).copied().unwrap_or(0.0)
        }
    }

    fn small_config() -> MeterConfig {
        MeterConfig::default().with_bin_count(2).with_layout(BarLayout {
            origin_x: 0,
            origin_y: 0,
            width: 10,
            height: 60,
            bar_width: 4,
            bar_spacing: 1,
        })
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        assert!(matches!(
            SpectrumMeter::new(MeterConfig::default().with_bin_count(0)),
            Err(ConfigError::NoBins)
        ));
    }

    #[test]
    fn test_skips_without_drawing_when_nothing_available() {
        let mut meter = SpectrumMeter::new(small_config()).unwrap();
        let mut source = ScriptedSource::new(vec![]);
        let mut renderer = RecordingRenderer::default();

        let outcome = meter.run_frame(&mut source, &mut renderer, 0).unwrap();
        assert_eq!(outcome, FrameOutcome::Skipped);
        assert!(renderer.commands.is_empty());
        assert_eq!(meter.frames_rendered(), 0);
    }

    #[test]
    fn test_frame_draw_commands() {
        let mut meter = SpectrumMeter::new(small_config()).unwrap();
        // bin 0 at -20 dB (mid), bin 1 at the floor
        let mut source = ScriptedSource::new(vec![vec![0.1, 0.0]]);
        let mut renderer = RecordingRenderer::default();

        let outcome = meter.run_frame(&mut source, &mut renderer, 0).unwrap();
        assert_eq!(outcome, FrameOutcome::Rendered);
        assert_eq!(
            renderer.commands,
            [
                Command::Clear(0, 0, 10, 60, PaletteColor::Background),
                Command::Rect(0, 20, 4, 40, PaletteColor::Mid),
                Command::HLine(0, 20, 4, PaletteColor::Marker),
                Command::HLine(5, 59, 4, PaletteColor::Marker),
            ]
        );
    }

    #[test]
    fn test_bar_colors_follow_thresholds() {
        let mut meter = SpectrumMeter::new(
            MeterConfig::default().with_bin_count(3),
        )
        .unwrap();
        let mut source = ScriptedSource::new(vec![vec![1.0, 0.1, 0.01]]);
        let mut renderer = RecordingRenderer::default();
        meter.run_frame(&mut source, &mut renderer, 0).unwrap();

        let colors: Vec<PaletteColor> = renderer
            .commands
            .iter()
            .filter_map(|c| match c {
                Command::Rect(_, _, _, _, color) => Some(*color),
                _ => None,
            })
            .collect();
        assert_eq!(
            colors,
            [PaletteColor::Hot, PaletteColor::Mid, PaletteColor::Cool]
        );
    }

    #[test]
    fn test_solid_color_strategy() {
        let mut meter =
            SpectrumMeter::with_color_strategy(small_config(), SolidColor(PaletteColor::Cool))
                .unwrap();
        let mut source = ScriptedSource::new(vec![vec![1.0, 1.0]]);
        let mut renderer = RecordingRenderer::default();
        meter.run_frame(&mut source, &mut renderer, 0).unwrap();
        assert!(renderer.commands.iter().all(|c| !matches!(
            c,
            Command::Rect(_, _, _, _, color) if *color != PaletteColor::Cool
        )));
    }

    #[test]
    fn test_spectrum_color_gets_bin_position() {
        let config = MeterConfig::default().with_bin_count(6);
        let mut meter = SpectrumMeter::with_color_strategy(config, SpectrumColor).unwrap();
        let mut source = ScriptedSource::new(vec![vec![1.0; 6]]);
        let mut renderer = RecordingRenderer::default();
        meter.run_frame(&mut source, &mut renderer, 0).unwrap();

        let colors: Vec<PaletteColor> = renderer
            .commands
            .iter()
            .filter_map(|c| match c {
                Command::Rect(_, _, _, _, color) => Some(*color),
                _ => None,
            })
            .collect();
        assert_eq!(
            colors,
            [
                PaletteColor::Hot,
                PaletteColor::Hot,
                PaletteColor::Mid,
                PaletteColor::Mid,
                PaletteColor::Cool,
                PaletteColor::Cool,
            ]
        );
    }

    #[test]
    fn test_meter_carries_its_config() {
        let config = small_config()
            .with_db_range(-48.0, 6.0)
            .with_hold_ms(0)
            .with_frame_delay_ms(33);
        let meter = SpectrumMeter::new(config).unwrap();
        assert_eq!(meter.config(), &config);
        assert_eq!(meter.frame_delay_ms(), 33);
        assert_eq!(meter.mapper().db_min(), -48.0);
        assert_eq!(meter.mapper().db_max(), 6.0);
        assert_eq!(meter.levels(), [-48.0, -48.0]);
    }

    #[test]
    fn test_zero_hold_falls_on_next_frame() {
        let mut meter = SpectrumMeter::new(small_config().with_hold_ms(0)).unwrap();
        let mut source = ScriptedSource::new(vec![vec![1.0, 0.0], vec![0.0, 0.0]]);
        let mut renderer = RecordingRenderer::default();

        meter.run_frame(&mut source, &mut renderer, 100).unwrap();
        assert_eq!(meter.tracker().held_db(0), Some(0.0));
        meter.run_frame(&mut source, &mut renderer, 101).unwrap();
        assert_eq!(meter.tracker().held_db(0), Some(-0.5));
    }

    #[test]
    fn test_end_to_end_levels_and_peaks() {
        let mut meter = SpectrumMeter::new(MeterConfig::default()).unwrap();
        let mut source = ScriptedSource::new(vec![vec![1e-6], vec![1.0], vec![1000.0]]);
        let mut renderer = RecordingRenderer::default();

        let mut dbs = Vec::new();
        let mut held = Vec::new();
        for _ in 0..3 {
            meter.run_frame(&mut source, &mut renderer, 0).unwrap();
            dbs.push(meter.levels()[0]);
            held.push(meter.tracker().held_db(0).unwrap());
        }

        for (got, want) in dbs.iter().zip([-60.0, 0.0, 0.0]) {
            assert_abs_diff_eq!(*got, want, epsilon = 1e-4);
        }
        for (got, want) in held.iter().zip([-60.0, 0.0, 0.0]) {
            assert_abs_diff_eq!(*got, want, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_marker_holds_then_falls() {
        let config = small_config();
        let mut meter = SpectrumMeter::new(config).unwrap();
        let mut frames = vec![vec![1.0, 0.0]];
        frames.extend((0..20).map(|_| vec![0.0, 0.0]));
        let mut source = ScriptedSource::new(frames);
        let mut renderer = RecordingRenderer::default();

        let mut now = 0;
        meter.run_frame(&mut source, &mut renderer, now).unwrap();
        // Inside the 300 ms hold window: marker stays on the top row.
        while now < 300 {
            now += 20;
            renderer.commands.clear();
            meter.run_frame(&mut source, &mut renderer, now).unwrap();
            assert_eq!(meter.tracker().held_db(0), Some(0.0));
            assert!(renderer
                .commands
                .contains(&Command::HLine(0, 0, 4, PaletteColor::Marker)));
        }
        // First frame past the window drops one step.
        now += 20;
        meter.run_frame(&mut source, &mut renderer, now).unwrap();
        assert_eq!(meter.tracker().held_db(0), Some(-0.5));
        // The bar itself follows the live level immediately.
        assert_eq!(meter.levels()[0], -60.0);
    }

    #[test]
    fn test_renderer_error_propagates() {
        let mut meter = SpectrumMeter::new(small_config()).unwrap();
        let mut source = ScriptedSource::new(vec![vec![1.0, 1.0]]);
        let mut renderer = RecordingRenderer {
            fail_after: Some(0),
            ..RecordingRenderer::default()
        };
        assert_eq!(
            meter.run_frame(&mut source, &mut renderer, 0),
            Err("bus error")
        );
        assert_eq!(meter.frames_rendered(), 0);
    }
}
