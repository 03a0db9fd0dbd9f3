//! Sliding window of frame-duration samples.
//!
//! Samples arrive in timestamp order and are evicted from the front once they
//! fall more than `window` behind the newest timestamp. Each sample is pushed
//! and popped at most once, so maintenance is amortized O(1).

use serde::Serialize;
use std::collections::VecDeque;

/// One rendered interval: callback timestamp and time since the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    pub timestamp: f64,
    pub duration: f64,
}

/// Summary of the samples currently in the window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct HistoryStats {
    /// Duration of the newest sample, 0 when empty.
    pub latest: f64,
    /// Largest duration in the window, 0 when empty.
    pub worst: f64,
    /// Mean duration, 0 when empty.
    pub mean: f64,
    /// Frames per second derived from the mean duration.
    pub fps: f64,
    pub count: usize,
}

#[derive(Debug, Clone)]
pub struct FrameHistory {
    window: f64,
    samples: VecDeque<Sample>,
}

impl FrameHistory {
    pub fn new(window: f64) -> Self {
        Self {
            window,
            samples: VecDeque::new(),
        }
    }

    pub fn window(&self) -> f64 {
        self.window
    }

    /// Append a sample and evict everything that fell out of the window.
    pub fn record(&mut self, timestamp: f64, duration: f64) {
        debug_assert!(
            self.samples
                .back()
                .is_none_or(|last| last.timestamp <= timestamp),
            "samples must arrive in timestamp order"
        );
        self.samples.push_back(Sample {
            timestamp,
            duration,
        });
        self.evict(timestamp);
    }

    /// Drop samples older than `now - window`. Returns how many were removed.
    pub fn evict(&mut self, now: f64) -> usize {
        let cutoff = now - self.window;
        let mut evicted = 0;
        while let Some(front) = self.samples.front() {
            if front.timestamp >= cutoff {
                break;
            }
            self.samples.pop_front();
            evicted += 1;
        }
        if evicted > 0 {
            log::trace!("evicted {evicted} samples older than {cutoff:.1}");
        }
        evicted
    }

    /// Samples oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    pub fn latest(&self) -> Option<&Sample> {
        self.samples.back()
    }

    /// Largest duration in the window, 0 when empty.
    pub fn worst(&self) -> f64 {
        self.samples.iter().map(|s| s.duration).fold(0.0, f64::max)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn stats(&self) -> HistoryStats {
        let count = self.samples.len();
        if count == 0 {
            return HistoryStats::default();
        }
        let total: f64 = self.samples.iter().map(|s| s.duration).sum();
        let mean = total / count as f64;
        HistoryStats {
            latest: self.latest().map_or(0.0, |s| s.duration),
            worst: self.worst(),
            mean,
            fps: if mean > 0.0 { 1000.0 / mean } else { 0.0 },
            count,
        }
    }
}
