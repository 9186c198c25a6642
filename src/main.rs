//! Drift Rocks headless runner
//!
//! Drives a session through the fixed-step clock with a scripted pilot and
//! logs what happens. Usage: `drift-rocks [config.json]`.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use drift_rocks::render::{RenderSurface, draw_session};
    use drift_rocks::sim::{Session, SessionEvent};
    use drift_rocks::{Action, HeldActions, SimConfig, SimulationClock};
    use glam::Vec2;

    /// Simulated display refresh (ms between frame callbacks)
    const FRAME_MS: f64 = 1000.0 / 60.0;
    const RUN_FRAMES: u32 = 60 * 30;

    /// Counts primitives instead of drawing them
    #[derive(Debug, Default)]
    struct StrokeCounter {
        polygons: usize,
        lines: usize,
        circles: usize,
        text: usize,
    }

    impl RenderSurface for StrokeCounter {
        fn stroke_polygon(&mut self, _points: &[Vec2], _alpha: f32) {
            self.polygons += 1;
        }
        fn stroke_polyline(&mut self, _points: &[Vec2], _alpha: f32) {
            self.lines += 1;
        }
        fn stroke_segment(&mut self, _start: Vec2, _end: Vec2, _alpha: f32) {
            self.lines += 1;
        }
        fn stroke_circle(&mut self, _center: Vec2, _radius: f32, _alpha: f32) {
            self.circles += 1;
        }
        fn draw_text(&mut self, _pos: Vec2, _text: &str) {
            self.text += 1;
        }
    }

    /// Spin in place firing, with short thrust bursts every few seconds
    fn pilot(input: &mut HeldActions, frame: u32) {
        input.press(Action::RotateLeft);
        input.press(Action::Fire);
        input.set(Action::Thrust, frame % 180 < 20);
    }

    fn load_config() -> SimConfig {
        let Some(path) = std::env::args().nth(1) else {
            return SimConfig::default();
        };
        match SimConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Failed to load {}: {}", path, e);
                std::process::exit(1);
            }
        }
    }

    pub fn run() {
        let config = load_config();
        log::info!(
            "Drift Rocks starting: {}x{} arena, seed {:#x}",
            config.width,
            config.height,
            config.seed
        );

        let mut clock = SimulationClock::from_config(&config);
        let mut session = Session::new(config);
        let mut input = HeldActions::new();
        let mut surface = StrokeCounter::default();

        let mut timestamp = 0.0;
        for frame in 0..RUN_FRAMES {
            pilot(&mut input, frame);
            clock.frame(timestamp, &mut session, &input);
            timestamp += FRAME_MS;

            for event in session.drain_events() {
                match event {
                    SessionEvent::AsteroidDestroyed { size, score, .. } => {
                        log::debug!("Destroyed {} asteroid, score {}", size.as_str(), score);
                    }
                    other => log::info!("{:?}", other),
                }
            }
            draw_session(&mut surface, &session);
        }

        log::info!(
            "Finished {} ticks: level {}, score {}, {} asteroids left",
            clock.ticks(),
            session.level(),
            session.score(),
            session.asteroids().len()
        );
        log::info!("Drew {:?}", surface);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Hosts embed the library directly on wasm
}
