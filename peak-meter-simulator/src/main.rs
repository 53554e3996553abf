use std::{
    f32::consts::PI,
    thread,
    time::{Duration, Instant},
};

use anyhow::Context;
use embedded_graphics::{pixelcolor::Rgb888, prelude::*};
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use log::{debug, info};
use peak_meter::{
    config::{SCREEN_HEIGHT, SCREEN_WIDTH},
    BandSpread, BandedSource, BinSummary, DrawTargetRenderer, FrameOutcome, MeterConfig, Palette,
    SpectrumMeter,
};
use rand::Rng;
use spectrum_dsp::{process_frame, FFT_SIZE, NUM_BINS};

pub const SAMPLE_RATE_HZ: u32 = 44_100;
pub const WINDOW_SCALE: u32 = 4;
/// Sleep between polls while no frame is ready.
const IDLE_POLL: Duration = Duration::from_millis(1);
/// Period of the bass "kick" envelope.
const BEAT_PERIOD_S: f32 = 0.6;
/// Duration of one low-to-high sweep.
const SWEEP_PERIOD_S: f32 = 4.0;

/// Stand-in for the analog microphone: a pulsing bass note, a sweeping tone
/// and a little noise.
struct SyntheticMicrophone {
    sample_index: u64,
    sweep_phase: f32,
    rng: rand::rngs::ThreadRng,
}

impl SyntheticMicrophone {
    fn new() -> Self {
        Self {
            sample_index: 0,
            sweep_phase: 0.0,
            rng: rand::rng(),
        }
    }

    fn next_frame(&mut self) -> [i16; FFT_SIZE] {
        let mut samples = [0i16; FFT_SIZE];
        for sample in samples.iter_mut() {
            let t = self.sample_index as f32 / SAMPLE_RATE_HZ as f32;

            let beat = 1.0 - (t % BEAT_PERIOD_S) / BEAT_PERIOD_S;
            let bass = (2.0 * PI * 110.0 * t).sin() * 0.6 * beat * beat;

            // Exponential sweep 200 Hz -> 8 kHz, integrated so the phase stays continuous.
            let position = (t % SWEEP_PERIOD_S) / SWEEP_PERIOD_S;
            let freq = 200.0 * 40.0f32.powf(position);
            self.sweep_phase = (self.sweep_phase + 2.0 * PI * freq / SAMPLE_RATE_HZ as f32) % (2.0 * PI);
            let sweep = self.sweep_phase.sin() * 0.25;

            let noise: f32 = self.rng.random_range(-0.01..0.01);

            let value = (bass + sweep + noise).clamp(-1.0, 1.0);
            *sample = (value * i16::MAX as f32) as i16;
            self.sample_index += 1;
        }
        samples
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = MeterConfig::default();
    let mut meter = SpectrumMeter::new(config).context("invalid meter configuration")?;
    let mut source = BandedSource::new(
        NUM_BINS,
        config.bin_count,
        BandSpread::Exponential { exp_factor: 7.0 },
        BinSummary::Max,
    )
    .context("invalid band split")?;

    let mut display: SimulatorDisplay<Rgb888> =
        SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
    let mut window = Window::new(
        "Peak Meter Simulator",
        &OutputSettingsBuilder::new().scale(WINDOW_SCALE).build(),
    );
    let palette = Palette::default();
    let mut microphone = SyntheticMicrophone::new();

    let audio_frame = Duration::from_secs_f32(FFT_SIZE as f32 / SAMPLE_RATE_HZ as f32);
    let frame_delay = Duration::from_millis(meter.frame_delay_ms());
    info!(
        "simulator: {}x{} px, {} bands, audio frame every {:?}",
        SCREEN_WIDTH, SCREEN_HEIGHT, config.bin_count, audio_frame
    );

    let start = Instant::now();
    let mut next_audio_frame = start;
    'running: loop {
        // The "hardware" finishes an FFT whenever a frame's worth of audio has elapsed.
        if Instant::now() >= next_audio_frame {
            let magnitudes = process_frame(&microphone.next_frame())?;
            source.push_frame(&magnitudes);
            next_audio_frame += audio_frame;
        }

        let now_ms = start.elapsed().as_millis() as u64;
        let outcome = {
            let mut renderer = DrawTargetRenderer::new(&mut display, palette);
            meter.run_frame(&mut source, &mut renderer, now_ms)?
        };

        match outcome {
            FrameOutcome::Rendered => {
                window.update(&display);
                for event in window.events() {
                    if let SimulatorEvent::Quit = event {
                        break 'running;
                    }
                }
                thread::sleep(frame_delay);
            }
            FrameOutcome::Skipped => thread::sleep(IDLE_POLL),
        }
    }

    debug!(
        "simulator: {} frames rendered from {} audio frames",
        meter.frames_rendered(),
        source.frames_pushed()
    );
    Ok(())
}
