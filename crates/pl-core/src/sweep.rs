//! Sweeping bar geometry.
//!
//! The bar travels one surface width per `period` ms and wraps once it has
//! fully left the right edge, re-entering from just off the left edge.

use crate::display::Color;
use kurbo::Rect;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sweep {
    pub surface_width: f64,
    pub surface_height: f64,
    pub rect_width: f64,
    pub period: f64,
}

impl Sweep {
    /// Pixels per ms.
    pub fn speed(&self) -> f64 {
        self.surface_width / self.period
    }

    /// Time (ms) for the bar to return to the same position.
    pub fn cycle(&self) -> f64 {
        (self.surface_width + self.rect_width) / self.speed()
    }

    /// Left edge of the bar at `timestamp`.
    pub fn x_at(&self, timestamp: f64) -> f64 {
        (timestamp * self.speed()).rem_euclid(self.surface_width + self.rect_width) - self.rect_width
    }

    /// One band per alpha, stacked top to bottom, each a quarter of the
    /// surface height when there are four.
    pub fn bands(&self, timestamp: f64, base: Color, alphas: &[f32]) -> Vec<(Rect, Color)> {
        if alphas.is_empty() {
            return Vec::new();
        }
        let x = self.x_at(timestamp);
        let band_height = self.surface_height / alphas.len() as f64;
        alphas
            .iter()
            .enumerate()
            .map(|(i, &alpha)| {
                let y = i as f64 * band_height;
                (
                    Rect::new(x, y, x + self.rect_width, y + band_height),
                    base.with_alpha(alpha),
                )
            })
            .collect()
    }
}
