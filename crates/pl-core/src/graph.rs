//! Rolling frame-time graph.
//!
//! Maps each sample's age onto the horizontal axis (newest at the right edge)
//! and its duration onto the vertical axis, normalized by an adaptive scale
//! that is recomputed after every pass as `scale_factor × worst`.

use crate::config::DemoConfig;
use crate::display::{DrawCmd, Frame};
use crate::history::FrameHistory;
use kurbo::{Line, Point, Rect};

/// Horizontal position of a sample of the given age inside `graph`.
///
/// Age 0 lands on the right edge, age == `window` on the left edge.
pub fn bar_x(graph: Rect, age: f64, window: f64) -> f64 {
    graph.x1 - (age / window) * graph.width()
}

/// Fraction of the graph height a duration fills under `scale`, in `0..=1`.
///
/// A non-positive scale only happens after an all-zero window; any positive
/// duration then fills the graph.
pub fn height_fraction(duration: f64, scale: f64) -> f64 {
    if scale <= 0.0 {
        return if duration > 0.0 { 1.0 } else { 0.0 };
    }
    (duration / scale).clamp(0.0, 1.0)
}

/// Graph renderer state: just the scale carried to the next frame.
#[derive(Debug, Clone)]
pub struct GraphRenderer {
    scale: f64,
}

impl GraphRenderer {
    pub fn new(initial_scale: f64) -> Self {
        Self {
            scale: initial_scale,
        }
    }

    /// Scale that the next [`render`](Self::render) will normalize against.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// The vertical segment for each retained sample, oldest first.
    pub fn layout(&self, history: &FrameHistory, now: f64, graph: Rect) -> Vec<Line> {
        history
            .iter()
            .map(|sample| {
                let x = bar_x(graph, now - sample.timestamp, history.window());
                let height = height_fraction(sample.duration, self.scale) * graph.height();
                Line::new(Point::new(x, graph.y1), Point::new(x, graph.y1 - height))
            })
            .collect()
    }

    /// Paint background, bars and text overlay, then update the scale.
    ///
    /// Returns the worst duration seen in this pass.
    pub fn render(
        &mut self,
        history: &FrameHistory,
        now: f64,
        config: &DemoConfig,
        frame: &mut Frame,
    ) -> f64 {
        let graph = config.graph_rect();

        frame.push(DrawCmd::FillRect {
            rect: graph,
            color: config.graph_background,
        });
        frame.push(DrawCmd::StrokeSegments {
            segments: self.layout(history, now, graph),
            color: config.graph_bar_color,
            line_width: config.graph_line_width,
        });

        let worst = history.worst();
        self.scale = worst * config.scale_factor;

        let latest = history.latest().map_or(0.0, |s| s.duration);
        let window_secs = history.window() / 1000.0;
        let lines = [
            format!("Frame: {latest:.2}ms"),
            format!("Worst (in {window_secs}s window): {worst:.2}ms"),
        ];
        for (i, text) in lines.into_iter().enumerate() {
            frame.push(DrawCmd::FillText {
                text,
                origin: Point::new(graph.x0 + 5.0, graph.y0 + 15.0 * (i + 1) as f64),
                color: config.text_color,
                font: config.font.clone(),
            });
        }

        worst
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn graph() -> Rect {
        DemoConfig::default().graph_rect()
    }

    #[test]
    fn age_maps_right_to_left() {
        let g = graph();
        assert_eq!(bar_x(g, 0.0, 5000.0), 310.0);
        assert_eq!(bar_x(g, 5000.0, 5000.0), 10.0);
        assert_eq!(bar_x(g, 2500.0, 5000.0), 160.0);
    }

    #[test]
    fn height_clamps_at_full() {
        assert_eq!(height_fraction(40.0, 40.0), 1.0);
        assert_eq!(height_fraction(120.0, 40.0), 1.0);
        assert_eq!(height_fraction(40.0, 120.0), 1.0 / 3.0);
        assert_eq!(height_fraction(0.0, 0.0), 0.0);
        assert_eq!(height_fraction(5.0, 0.0), 1.0);
    }

    #[test]
    fn scale_becomes_three_times_worst() {
        let config = DemoConfig::default();
        let mut history = FrameHistory::new(config.history_duration);
        for (i, d) in [10.0, 16.0, 40.0, 12.0].into_iter().enumerate() {
            history.record(1000.0 + 20.0 * i as f64, d);
        }
        let mut renderer = GraphRenderer::new(config.initial_scale);
        let mut frame = Frame::new();
        let worst = renderer.render(&history, 1060.0, &config, &mut frame);
        assert_eq!(worst, 40.0);
        assert_eq!(renderer.scale(), 120.0);
    }

    #[test]
    fn empty_window_scale_is_zero() {
        let config = DemoConfig::default();
        let history = FrameHistory::new(config.history_duration);
        let mut renderer = GraphRenderer::new(config.initial_scale);
        let mut frame = Frame::new();
        renderer.render(&history, 0.0, &config, &mut frame);
        assert_eq!(renderer.scale(), 0.0);
        let texts: Vec<&str> = frame.texts().collect();
        assert_eq!(
            texts,
            vec!["Frame: 0.00ms", "Worst (in 5s window): 0.00ms"]
        );
    }

    #[test]
    fn bars_use_previous_scale() {
        let config = DemoConfig::default();
        let mut history = FrameHistory::new(config.history_duration);
        history.record(100.0, 30.0);
        let renderer = GraphRenderer::new(60.0);
        let bars = renderer.layout(&history, 100.0, config.graph_rect());
        assert_eq!(bars.len(), 1);
        // baseline at y1 = 110, half height = 50
        assert_eq!(bars[0].p0, Point::new(310.0, 110.0));
        assert_eq!(bars[0].p1, Point::new(310.0, 60.0));
    }
}
