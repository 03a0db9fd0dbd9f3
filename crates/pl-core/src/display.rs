//! Renderer-agnostic display list.
//!
//! The animation driver emits one [`Frame`] per display refresh. The WASM
//! bridge replays it onto a `CanvasRenderingContext2d`; tests inspect it
//! directly.

use kurbo::{Line, Point, Rect};
use serde::{Deserialize, Serialize};

/// RGBA color, components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a different alpha.
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// CSS `rgba(...)` string for Canvas2D fill/stroke styles.
    pub fn to_css(&self) -> String {
        let r = (self.r.clamp(0.0, 1.0) * 255.0).round() as u8;
        let g = (self.g.clamp(0.0, 1.0) * 255.0).round() as u8;
        let b = (self.b.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("rgba({r}, {g}, {b}, {})", self.a)
    }
}

/// A single drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Clear the whole surface to transparent.
    Clear { width: f64, height: f64 },
    FillRect { rect: Rect, color: Color },
    /// Stroke all segments as one path.
    StrokeSegments {
        segments: Vec<Line>,
        color: Color,
        line_width: f64,
    },
    FillText {
        text: String,
        origin: Point,
        color: Color,
        font: String,
    },
}

/// The ordered draw commands for one animation callback.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub commands: Vec<DrawCmd>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, cmd: DrawCmd) {
        self.commands.push(cmd);
    }

    /// All `FillRect` commands, in paint order.
    pub fn fill_rects(&self) -> impl Iterator<Item = (&Rect, &Color)> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCmd::FillRect { rect, color } => Some((rect, color)),
            _ => None,
        })
    }

    /// All text runs, in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCmd::FillText { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_string() {
        assert_eq!(Color::WHITE.with_alpha(0.25).to_css(), "rgba(255, 255, 255, 0.25)");
        assert_eq!(Color::BLACK.with_alpha(0.5).to_css(), "rgba(0, 0, 0, 0.5)");
        assert_eq!(Color::WHITE.with_alpha(0.0).to_css(), "rgba(255, 255, 255, 0)");
    }
}
