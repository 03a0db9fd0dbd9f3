//! Per-callback animation state.
//!
//! Owns everything the animation needs between display refreshes: the
//! timestamp baseline, the frame history and the graph's adaptive scale.

use crate::config::DemoConfig;
use crate::display::{DrawCmd, Frame};
use crate::graph::GraphRenderer;
use crate::history::{FrameHistory, HistoryStats};
use crate::sweep::Sweep;

#[derive(Debug, Clone)]
pub struct FrameDriver {
    config: DemoConfig,
    history: FrameHistory,
    graph: GraphRenderer,
    last_timestamp: Option<f64>,
    width: f64,
    height: f64,
}

impl FrameDriver {
    pub fn new(config: DemoConfig, width: f64, height: f64) -> Self {
        let history = FrameHistory::new(config.history_duration);
        let graph = GraphRenderer::new(config.initial_scale);
        Self {
            config,
            history,
            graph,
            last_timestamp: None,
            width,
            height,
        }
    }

    /// Update the surface size. History and baseline are untouched.
    pub fn resize(&mut self, width: f64, height: f64) {
        log::debug!("surface resized to {width}x{height}");
        self.width = width;
        self.height = height;
    }

    /// Forget the previous timestamp so the next callback only re-establishes
    /// a baseline.
    pub fn reset_baseline(&mut self) {
        self.last_timestamp = None;
    }

    /// Handle one display-refresh callback.
    ///
    /// Returns `None` for the baseline callback, otherwise the frame to paint.
    pub fn update(&mut self, timestamp: f64) -> Option<Frame> {
        let Some(last) = self.last_timestamp.replace(timestamp) else {
            log::debug!("baseline timestamp {timestamp:.1}");
            return None;
        };

        self.history.record(timestamp, timestamp - last);

        let mut frame = Frame::new();
        frame.push(DrawCmd::Clear {
            width: self.width,
            height: self.height,
        });

        for (rect, color) in
            self.sweep()
                .bands(timestamp, self.config.sweep_color, &self.config.band_alphas)
        {
            frame.push(DrawCmd::FillRect { rect, color });
        }

        self.graph
            .render(&self.history, timestamp, &self.config, &mut frame);
        Some(frame)
    }

    pub fn sweep(&self) -> Sweep {
        Sweep {
            surface_width: self.width,
            surface_height: self.height,
            rect_width: self.config.sweep_width,
            period: self.config.sweep_period,
        }
    }

    pub fn history(&self) -> &FrameHistory {
        &self.history
    }

    pub fn stats(&self) -> HistoryStats {
        self.history.stats()
    }

    /// Scale the next frame's graph is normalized against.
    pub fn scale(&self) -> f64 {
        self.graph.scale()
    }

    pub fn last_timestamp(&self) -> Option<f64> {
        self.last_timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::Color;
    use kurbo::Rect;
    use pretty_assertions::assert_eq;

    fn driver() -> FrameDriver {
        FrameDriver::new(DemoConfig::default(), 1000.0, 800.0)
    }

    #[test]
    fn first_callback_is_baseline_only() {
        let mut d = driver();
        assert!(d.update(500.0).is_none());
        assert!(d.history().is_empty());
        assert_eq!(d.last_timestamp(), Some(500.0));
        assert_eq!(d.scale(), 60.0);
    }

    #[test]
    fn second_callback_records_duration_and_paints() {
        let mut d = driver();
        d.update(500.0);
        let frame = d.update(516.5).expect("frame");
        assert_eq!(d.history().latest().unwrap().duration, 16.5);
        assert_eq!(
            frame.commands[0],
            DrawCmd::Clear {
                width: 1000.0,
                height: 800.0
            }
        );

        let rects: Vec<(Rect, Color)> = frame.fill_rects().map(|(r, c)| (*r, *c)).collect();
        // four bands + graph background
        assert_eq!(rects.len(), 5);
        let x = d.sweep().x_at(516.5);
        assert_eq!(rects[0].0, Rect::new(x, 0.0, x + 200.0, 200.0));
        assert_eq!(rects[4].0, Rect::new(10.0, 10.0, 310.0, 110.0));

        let texts: Vec<&str> = frame.texts().collect();
        assert_eq!(texts[0], "Frame: 16.50ms");
        assert_eq!(d.scale(), 49.5);
    }

    #[test]
    fn resize_keeps_history() {
        let mut d = driver();
        d.update(0.0);
        d.update(16.0);
        d.update(32.0);
        d.resize(2000.0, 400.0);
        let frame = d.update(48.0).unwrap();
        assert_eq!(d.history().len(), 3);
        assert_eq!(d.history().latest().unwrap().duration, 16.0);
        assert_eq!(
            frame.commands[0],
            DrawCmd::Clear {
                width: 2000.0,
                height: 400.0
            }
        );
        assert_eq!(d.sweep().speed(), 1.0);
    }

    #[test]
    fn reset_baseline_skips_gap() {
        let mut d = driver();
        d.update(0.0);
        d.update(16.0);
        d.reset_baseline();
        assert!(d.update(10_000.0).is_none());
        d.update(10_016.0);
        assert_eq!(d.history().worst(), 16.0);
    }
}
