//! Fixed-step simulation driver
//!
//! The host calls [`SimulationClock::frame`] once per display callback with a
//! monotonically increasing timestamp. Each call runs at most one tick; any
//! extra elapsed time stays in the accumulator for later frames and is never
//! dropped.

use crate::config::SimConfig;
use crate::input::InputSource;
use crate::sim::Session;

#[derive(Debug, Clone)]
pub struct SimulationClock {
    /// Length of one tick (ms)
    tick_ms: f32,
    /// Elapsed time not yet simulated (ms)
    accumulator: f64,
    /// Previous frame timestamp, `None` until the first frame after start/resume
    last_timestamp: Option<f64>,
    paused: bool,
    ticks: u64,
}

impl SimulationClock {
    pub fn new(tick_ms: f32) -> Self {
        Self {
            tick_ms,
            accumulator: 0.0,
            last_timestamp: None,
            paused: false,
            ticks: 0,
        }
    }

    pub fn from_config(config: &SimConfig) -> Self {
        Self::new(config.tick_ms())
    }

    /// Feed one frame. Returns `true` if a tick ran.
    ///
    /// The first frame after construction or [`resume`](Self::resume) only
    /// records the timestamp. Timestamps that go backwards add no time.
    pub fn frame<I: InputSource + ?Sized>(&mut self, timestamp: f64, session: &mut Session, input: &I) -> bool {
        if self.paused {
            return false;
        }

        let Some(last) = self.last_timestamp.replace(timestamp) else {
            return false;
        };
        self.accumulator += (timestamp - last).max(0.0);

        let tick = f64::from(self.tick_ms);
        if self.accumulator < tick {
            return false;
        }
        self.accumulator -= tick;
        session.update(self.tick_ms, input);
        self.ticks += 1;
        true
    }

    /// Stop ticking (host lost focus)
    pub fn pause(&mut self) {
        if !self.paused {
            log::debug!("Clock paused after {} ticks", self.ticks);
        }
        self.paused = true;
    }

    /// Resume ticking. The gap spent paused is never reported as elapsed time.
    pub fn resume(&mut self) {
        if self.paused {
            log::debug!("Clock resumed");
        }
        self.paused = false;
        self.last_timestamp = None;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Carried time not yet simulated (ms)
    pub fn backlog(&self) -> f64 {
        self.accumulator
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn tick_ms(&self) -> f32 {
        self.tick_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::HeldActions;

    fn setup() -> (SimulationClock, Session, HeldActions) {
        let config = SimConfig::default();
        (SimulationClock::from_config(&config), Session::new(config), HeldActions::new())
    }

    #[test]
    fn test_first_frame_sets_baseline() {
        let (mut clock, mut session, input) = setup();
        assert!(!clock.frame(1234.0, &mut session, &input));
        assert_eq!(clock.ticks(), 0);
        assert_eq!(session.time_ms, 0.0);
    }

    #[test]
    fn test_one_tick_per_frame_with_carry() {
        let (mut clock, mut session, input) = setup();
        clock.frame(0.0, &mut session, &input);

        // 40ms is more than two ticks but only one runs
        assert!(clock.frame(40.0, &mut session, &input));
        assert_eq!(clock.ticks(), 1);
        assert!((clock.backlog() - (40.0 - f64::from(clock.tick_ms()))).abs() < 1e-3);

        // Carried time pays for the next frame with no new elapsed time
        assert!(clock.frame(40.0, &mut session, &input));
        assert!(!clock.frame(40.0, &mut session, &input));
        assert_eq!(clock.ticks(), 2);
        assert!((session.time_ms - 2.0 * f64::from(clock.tick_ms())).abs() < 1e-3);
    }

    #[test]
    fn test_short_frames_accumulate() {
        let (mut clock, mut session, input) = setup();
        clock.frame(0.0, &mut session, &input);
        assert!(!clock.frame(10.0, &mut session, &input));
        assert!(clock.frame(20.0, &mut session, &input));
        assert_eq!(clock.ticks(), 1);
    }

    #[test]
    fn test_long_frame_keeps_remainder() {
        let (mut clock, mut session, input) = setup();
        clock.frame(0.0, &mut session, &input);
        assert!(clock.frame(5000.0, &mut session, &input));
        assert_eq!(clock.ticks(), 1);
        assert!((session.time_ms + clock.backlog() - 5000.0).abs() < 1e-3);
    }

    #[test]
    fn test_slow_host_loses_no_time() {
        // 30 Hz callbacks against a 60 Hz tick: the sim falls behind but
        // every millisecond stays either simulated or carried
        let (mut clock, mut session, input) = setup();
        let frame_ms = 1000.0 / 30.0;
        for i in 0..=120 {
            clock.frame(f64::from(i) * frame_ms, &mut session, &input);
        }
        let elapsed = 120.0 * frame_ms;
        assert_eq!(clock.ticks(), 120);
        assert!((session.time_ms + clock.backlog() - elapsed).abs() < 1e-3);
        assert!(clock.backlog() > 1000.0);
    }

    #[test]
    fn test_backlog_drains_one_tick_per_frame() {
        let (mut clock, mut session, input) = setup();
        clock.frame(0.0, &mut session, &input);
        clock.frame(100.0, &mut session, &input);
        // 100ms covers six ticks; five remain after the first frame
        let mut extra = 0;
        while clock.frame(100.0, &mut session, &input) {
            extra += 1;
        }
        assert_eq!(extra, 5);
        assert!(clock.backlog() < f64::from(clock.tick_ms()));
        assert!((session.time_ms + clock.backlog() - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_backwards_timestamp_adds_nothing() {
        let (mut clock, mut session, input) = setup();
        clock.frame(100.0, &mut session, &input);
        assert!(!clock.frame(50.0, &mut session, &input));
        assert_eq!(clock.backlog(), 0.0);
    }

    #[test]
    fn test_pause_and_resume_drop_gap() {
        let (mut clock, mut session, input) = setup();
        clock.frame(0.0, &mut session, &input);
        clock.frame(20.0, &mut session, &input);
        let ticks = clock.ticks();

        clock.pause();
        assert!(clock.is_paused());
        assert!(!clock.frame(60_000.0, &mut session, &input));
        assert_eq!(clock.ticks(), ticks);

        clock.resume();
        // Re-baseline, then a normal frame
        assert!(!clock.frame(120_000.0, &mut session, &input));
        clock.frame(120_017.0, &mut session, &input);
        assert_eq!(clock.ticks(), ticks + 1);
        assert!(clock.backlog() < f64::from(clock.tick_ms()));
    }
}
