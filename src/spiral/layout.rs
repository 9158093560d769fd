//! Order and layout stages: stable time ordering plus the deterministic
//! polar placement that gives the spiral view its shape.
//!
//! Layout is a pure geometric function of a point's index in the ordered
//! sequence and its gravity score. Identical ordered input always yields
//! identical positions. A high enough score produces a *negative* radius,
//! which mirrors the point's angle by 180° — that mirroring is load-bearing
//! for the spiral's visual semantics and is deliberately not clamped.

use serde::{Deserialize, Serialize};

use crate::point::MemoryPoint;

/// Geometry constants for the spiral. Defaults are the canonical portal
/// values; the CLI and TUI never override them, but tests and embedders may.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Angular advance per point, in radians.
    pub angle_step: f64,
    /// Radial advance per point.
    pub radius_step: f64,
    /// Base radius offset before the score adjustment.
    pub base_offset: f64,
    /// How strongly the gravity score pulls a point inward.
    pub score_scale: f64,
    /// Square canvas edge length; the spiral is centered on it.
    pub canvas_size: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            angle_step: 0.5,
            radius_step: 20.0,
            base_offset: 60.0,
            score_scale: 10.0,
            canvas_size: 300.0,
        }
    }
}

impl LayoutConfig {
    /// Canvas center coordinate (both axes).
    pub fn center(&self) -> f64 {
        self.canvas_size / 2.0
    }

    /// Radius for the point at `index` with the given gravity score.
    pub fn radius(&self, index: usize, gravity_score: f64) -> f64 {
        index as f64 * self.radius_step + (self.base_offset - gravity_score * self.score_scale)
    }

    /// Angle for the point at `index`, in radians.
    pub fn angle(&self, index: usize) -> f64 {
        index as f64 * self.angle_step
    }
}

/// A memory point with its computed canvas position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedPoint {
    pub point: MemoryPoint,
    pub x: f64,
    pub y: f64,
    /// Polar coordinates kept alongside the cartesian pair; the TUI uses
    /// them for marker sizing and tests assert on them directly.
    pub angle: f64,
    pub radius: f64,
}

/// Sort ascending by timestamp. The sort is stable: points with equal
/// timestamps keep their relative input order, which makes the layout
/// deterministic and reproducible.
pub fn order(mut points: Vec<MemoryPoint>) -> Vec<MemoryPoint> {
    points.sort_by_key(|p| p.timestamp);
    points
}

/// Assign each ordered point its polar position on the canvas.
pub fn layout(ordered: &[MemoryPoint], config: &LayoutConfig) -> Vec<PositionedPoint> {
    let center = config.center();
    ordered
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let angle = config.angle(i);
            let radius = config.radius(i, p.gravity_score);
            PositionedPoint {
                point: p.clone(),
                x: center + radius * angle.cos(),
                y: center + radius * angle.sin(),
                angle,
                radius,
            }
        })
        .collect()
}
