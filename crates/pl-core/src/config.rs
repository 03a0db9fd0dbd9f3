//! Tunables for the animation demo.
//!
//! Every field has a default, so a partial JSON override from the page
//! (`{"sweep_width": 120}`) is enough to change one knob.

use crate::display::Color;
use crate::error::ConfigError;
use kurbo::Rect;
use serde::{Deserialize, Serialize};

/// Trailing window of frame samples, in milliseconds.
pub const HISTORY_DURATION: f64 = 5000.0;

/// Configuration for [`crate::driver::FrameDriver`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Samples older than this (ms) are evicted.
    pub history_duration: f64,
    /// Time (ms) the sweep takes to travel one surface width.
    pub sweep_period: f64,
    /// Width of the sweeping rectangle, px.
    pub sweep_width: f64,
    /// Alpha of each stacked band, top to bottom.
    pub band_alphas: Vec<f32>,
    pub sweep_color: Color,
    /// Next-frame scale = factor × worst duration in the window.
    pub scale_factor: f64,
    /// Scale (ms) used before the first render pass.
    pub initial_scale: f64,
    pub graph_x: f64,
    pub graph_y: f64,
    pub graph_width: f64,
    pub graph_height: f64,
    pub graph_background: Color,
    pub graph_bar_color: Color,
    pub graph_line_width: f64,
    pub text_color: Color,
    pub font: String,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            history_duration: HISTORY_DURATION,
            sweep_period: 2000.0,
            sweep_width: 200.0,
            band_alphas: vec![1.0, 0.5, 0.25, 0.0],
            sweep_color: Color::WHITE,
            scale_factor: 3.0,
            initial_scale: 60.0,
            graph_x: 10.0,
            graph_y: 10.0,
            graph_width: 300.0,
            graph_height: 100.0,
            graph_background: Color::BLACK.with_alpha(0.5),
            graph_bar_color: Color::rgba(0.0, 1.0, 0.0, 1.0),
            graph_line_width: 1.0,
            text_color: Color::WHITE,
            font: "12px monospace".to_string(),
        }
    }
}

impl DemoConfig {
    /// Parse a JSON override. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would turn the sweep or graph geometry into NaN.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("history_duration", self.history_duration),
            ("sweep_period", self.sweep_period),
            ("sweep_width", self.sweep_width),
            ("scale_factor", self.scale_factor),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::OutOfRange { field, value });
            }
        }
        if !(self.initial_scale.is_finite() && self.initial_scale >= 0.0) {
            return Err(ConfigError::OutOfRange {
                field: "initial_scale",
                value: self.initial_scale,
            });
        }
        Ok(())
    }

    /// The graph's screen rectangle.
    pub fn graph_rect(&self) -> Rect {
        Rect::new(
            self.graph_x,
            self.graph_y,
            self.graph_x + self.graph_width,
            self.graph_y + self.graph_height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn partial_override_keeps_defaults() {
        let config = DemoConfig::from_json(r#"{"sweep_width": 120, "graph_height": 50}"#).unwrap();
        assert_eq!(config.sweep_width, 120.0);
        assert_eq!(config.graph_height, 50.0);
        assert_eq!(config.history_duration, HISTORY_DURATION);
        assert_eq!(config.band_alphas, vec![1.0, 0.5, 0.25, 0.0]);
    }

    #[test]
    fn rejects_bad_json() {
        assert!(matches!(
            DemoConfig::from_json("{not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn default_is_valid() {
        assert_eq!(DemoConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_degenerate_geometry() {
        for (json, field) in [
            (r#"{"history_duration": 0}"#, "history_duration"),
            (r#"{"sweep_period": 0}"#, "sweep_period"),
            (r#"{"sweep_period": -2000}"#, "sweep_period"),
            (r#"{"sweep_width": 0}"#, "sweep_width"),
            (r#"{"scale_factor": 0}"#, "scale_factor"),
            (r#"{"initial_scale": -1}"#, "initial_scale"),
        ] {
            match DemoConfig::from_json(json) {
                Err(ConfigError::OutOfRange { field: got, .. }) => assert_eq!(got, field),
                other => panic!("{json}: expected OutOfRange, got {other:?}"),
            }
        }
    }

    #[test]
    fn rejects_non_finite_values() {
        let config = DemoConfig {
            history_duration: f64::INFINITY,
            ..DemoConfig::default()
        };
        assert!(config.validate().is_err());
        let config = DemoConfig {
            sweep_period: f64::NAN,
            ..DemoConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn valid_override_draws_finite_bars() {
        use crate::driver::FrameDriver;
        use crate::display::DrawCmd;

        let config = DemoConfig::from_json(r#"{"history_duration": 1000}"#).unwrap();
        let mut driver = FrameDriver::new(config, 0.0, 0.0);
        driver.update(0.0);
        let frame = driver.update(16.0).unwrap();
        let bars = frame
            .commands
            .iter()
            .find_map(|cmd| match cmd {
                DrawCmd::StrokeSegments { segments, .. } => Some(segments.clone()),
                _ => None,
            })
            .unwrap();
        assert!(bars.iter().all(|l| l.p0.x.is_finite() && l.p1.y.is_finite()));
        let (rect, _) = frame.fill_rects().next().unwrap();
        assert!(rect.x0.is_finite());
    }

    #[test]
    fn graph_rect_matches_fields() {
        let r = DemoConfig::default().graph_rect();
        assert_eq!((r.x0, r.y0, r.x1, r.y1), (10.0, 10.0, 310.0, 110.0));
    }
}
