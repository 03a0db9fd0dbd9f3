//! Stoppable animation loop.
//!
//! The browser calls back once per display refresh; whoever owns the loop
//! asks [`FrameLoop::tick`] what to do and only reschedules while it answers
//! something other than [`Tick::Stopped`]. [`SyntheticClock`] drives the
//! same loop from tests with made-up timestamps.

use crate::display::Frame;
use crate::driver::FrameDriver;

/// Outcome of a single callback.
#[derive(Debug, Clone, PartialEq)]
pub enum Tick {
    /// Loop is stopped; do not reschedule.
    Stopped,
    /// Baseline established, nothing to paint; reschedule.
    Baseline,
    /// Paint this frame, then reschedule.
    Frame(Frame),
}

impl Tick {
    pub fn should_reschedule(&self) -> bool {
        !matches!(self, Tick::Stopped)
    }
}

#[derive(Debug, Clone)]
pub struct FrameLoop {
    driver: FrameDriver,
    running: bool,
    frames: u64,
}

impl FrameLoop {
    /// A loop that is not yet running.
    pub fn new(driver: FrameDriver) -> Self {
        Self {
            driver,
            running: false,
            frames: 0,
        }
    }

    /// Start (or resume) the loop. Returns `false` if it was already running.
    ///
    /// Resuming drops the old baseline so the paused time is not recorded as
    /// one long frame.
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.driver.reset_baseline();
        self.running = true;
        log::info!("frame loop started");
        true
    }

    /// Stop the loop. Returns `false` if it was not running.
    pub fn stop(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;
        log::info!("frame loop stopped after {} frames", self.frames);
        true
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Frames painted since creation.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn tick(&mut self, timestamp: f64) -> Tick {
        if !self.running {
            return Tick::Stopped;
        }
        match self.driver.update(timestamp) {
            Some(frame) => {
                self.frames += 1;
                Tick::Frame(frame)
            }
            None => Tick::Baseline,
        }
    }

    /// Feed timestamps until the loop stops or the source runs dry.
    /// Returns the painted frames.
    pub fn run<I>(&mut self, timestamps: I) -> Vec<Frame>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut painted = Vec::new();
        for ts in timestamps {
            match self.tick(ts) {
                Tick::Stopped => break,
                Tick::Baseline => {}
                Tick::Frame(frame) => painted.push(frame),
            }
        }
        painted
    }

    pub fn driver(&self) -> &FrameDriver {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut FrameDriver {
        &mut self.driver
    }
}

/// Deterministic timestamp source: a fixed interval with scripted hitches.
#[derive(Debug, Clone)]
pub struct SyntheticClock {
    now: f64,
    interval: f64,
    index: usize,
    hitches: Vec<(usize, f64)>,
}

impl SyntheticClock {
    pub fn new(start: f64, interval: f64) -> Self {
        Self {
            now: start,
            interval,
            index: 0,
            hitches: Vec::new(),
        }
    }

    /// Make the interval leading up to the `index`-th timestamp `duration`
    /// long instead of the regular interval.
    pub fn with_hitch(mut self, index: usize, duration: f64) -> Self {
        self.hitches.push((index, duration));
        self
    }
}

impl Iterator for SyntheticClock {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.index > 0 {
            let step = self
                .hitches
                .iter()
                .find(|(i, _)| *i == self.index)
                .map_or(self.interval, |(_, d)| *d);
            self.now += step;
        }
        self.index += 1;
        Some(self.now)
    }
}
