//! 2-D embedding of first-link networks.
//!
//! - `radial`: fans out the component that reaches the dominant node,
//!   giving each predecessor an angular slice ("pie") of its parent's slice.
//! - `components`: repeats the radial layout for every disconnected
//!   component, moving the center between them.
//! - `scene`: render-ready node and edge records.

use serde::Serialize;

pub mod components;
pub mod radial;
pub mod scene;

/// A position in the plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The point `distance` away from `self` in direction `angle` (radians).
    #[must_use]
    pub fn offset(self, angle: f64, distance: f64) -> Self {
        Self {
            x: distance.mul_add(angle.cos(), self.x),
            y: distance.mul_add(angle.sin(), self.y),
        }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn offset_moves_along_angle() {
        let p = Point::new(1.0, 1.0).offset(FRAC_PI_2, 2.0);
        assert!((p.x - 1.0).abs() < 1e-12);
        assert!((p.y - 3.0).abs() < 1e-12);

        let q = Point::ORIGIN.offset(PI, 1.0);
        assert!((q.x + 1.0).abs() < 1e-12);
        assert!(q.y.abs() < 1e-12);
    }

    #[test]
    fn distance_is_euclidean() {
        let d = Point::new(0.0, 0.0).distance(Point::new(3.0, 4.0));
        assert!((d - 5.0).abs() < 1e-12);
    }
}
