//! # Lane detector interface
//!
//! The detection model itself is an external collaborator. It is consumed as
//! a trait which, for each frame, produces an annotated copy of the frame,
//! up to four lane boundary point sets and a per-boundary detection flag.
//!
//! Boundary index convention: 0 = far left, 1 = left adjacent, 2 = right
//! adjacent, 3 = far right. Only the two adjacent boundaries gate control.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::Point2;

// Internal
use super::{EqptError, Frame};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Number of lane boundaries reported by the detector.
pub const NUM_LANE_BOUNDARIES: usize = 4;

/// Index of the boundary immediately left of the vehicle.
pub const LEFT_ADJACENT_IDX: usize = 1;

/// Index of the boundary immediately right of the vehicle.
pub const RIGHT_ADJACENT_IDX: usize = 2;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// One detected lane marking, as an ordered sequence of pixel points.
///
/// Points are ordered from near (bottom of the frame) to far (top of the
/// frame). Pixel y increases downwards. A boundary is immutable once produced,
/// the detector builds a fresh set each cycle.
#[derive(Debug, Clone, Default)]
pub struct LaneBoundary {
    points: Vec<Point2<f64>>
}

/// Output of one detector pass.
#[derive(Debug, Clone)]
pub struct DetectorOutput {
    /// Copy of the input frame with the detections drawn on
    pub annotated: Frame,

    /// The four boundary point sets. Undetected boundaries are empty.
    pub boundaries: [LaneBoundary; NUM_LANE_BOUNDARIES],

    /// Detection flags for each boundary
    pub detected: [bool; NUM_LANE_BOUNDARIES]
}

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// The lane detection model, run once per cycle on the acquired frame.
pub trait LaneDetector {
    fn detect(&mut self, frame: &Frame) -> Result<DetectorOutput, EqptError>;
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl LaneBoundary {
    /// Create a boundary from a near-to-far ordered point sequence.
    pub fn new(points: Vec<Point2<f64>>) -> Self {
        Self { points }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn points(&self) -> &[Point2<f64>] {
        &self.points
    }

    /// The nearest point of the boundary (bottom of the frame).
    pub fn near(&self) -> Option<Point2<f64>> {
        self.points.first().copied()
    }

    /// The farthest point of the boundary (top of the frame).
    pub fn far(&self) -> Option<Point2<f64>> {
        self.points.last().copied()
    }

    /// The middle point of the boundary by index.
    pub fn mid(&self) -> Option<Point2<f64>> {
        self.points.get(self.points.len() / 2).copied()
    }

    /// The point of the boundary closest to the given y coordinate.
    pub fn nearest_to_y(&self, y: f64) -> Option<Point2<f64>> {
        let mut best: Option<Point2<f64>> = None;
        let mut best_dist = std::f64::INFINITY;

        for point in &self.points {
            let dist = (point.y - y).abs();
            if dist < best_dist {
                best_dist = dist;
                best = Some(*point);
            }
        }

        best
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    fn boundary(points: &[(f64, f64)]) -> LaneBoundary {
        LaneBoundary::new(points.iter().map(|&(x, y)| Point2::new(x, y)).collect())
    }

    #[test]
    fn test_nearest_to_y() {
        let b = boundary(&[(100.0, 600.0), (110.0, 400.0), (120.0, 200.0)]);

        assert_eq!(b.nearest_to_y(590.0), Some(Point2::new(100.0, 600.0)));
        assert_eq!(b.nearest_to_y(310.0), Some(Point2::new(110.0, 400.0)));
        assert_eq!(b.nearest_to_y(0.0), Some(Point2::new(120.0, 200.0)));

        assert_eq!(LaneBoundary::default().nearest_to_y(100.0), None);
    }

    #[test]
    fn test_near_far_mid() {
        let b = boundary(&[(100.0, 600.0), (110.0, 400.0), (120.0, 200.0)]);

        assert_eq!(b.near(), Some(Point2::new(100.0, 600.0)));
        assert_eq!(b.far(), Some(Point2::new(120.0, 200.0)));
        assert_eq!(b.mid(), Some(Point2::new(110.0, 400.0)));

        // Two point boundaries take the second point as the middle
        let b = boundary(&[(100.0, 600.0), (110.0, 300.0)]);
        assert_eq!(b.mid(), Some(Point2::new(110.0, 300.0)));
    }
}
