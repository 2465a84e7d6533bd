//! Midpoint based error law calculations
//!
//! Both laws here reference the lane midpoint: the average of the point on
//! each adjacent boundary closest to the lane's vertical middle.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::{Point2, Vector3};

// Internal
use super::state::{ErrorReport, RefPrimitive};
use super::{geom, VisTask, VisTaskError};
use crate::eqpt::detector::LaneBoundary;

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl VisTask {
    /// Perform the point to point calculation.
    ///
    /// The error is the raw pixel offset between the lane midpoint and the
    /// centre of the frame at the same height.
    pub(crate) fn calc_point_to_point(
        &self,
        left: &LaneBoundary,
        right: &LaneBoundary,
        frame_width: f64
    ) -> Result<ErrorReport, VisTaskError> {

        let mid = self.lane_midpoint(left, right)?;

        let error = mid.x - frame_width / 2.0;

        Ok(ErrorReport {
            error,
            lane_ref: RefPrimitive::Point([mid.x, mid.y]),
            vehicle_ref: RefPrimitive::Point([frame_width / 2.0, mid.y])
        })
    }

    /// Perform the point to line calculation.
    ///
    /// The error is the projective incidence of the lane midpoint with the
    /// vehicle reference line, divided by the point/line scale. Unlike point
    /// to point this is sensitive to where along the reference line the
    /// midpoint sits.
    pub(crate) fn calc_point_to_line(
        &self,
        left: &LaneBoundary,
        right: &LaneBoundary,
        frame_width: f64
    ) -> Result<ErrorReport, VisTaskError> {

        let mid = self.lane_midpoint(left, right)?;
        let ref_line = self.vehicle_ref_line(frame_width);

        let error = geom::point_line_dist_scaled(
            &geom::hom(&mid),
            &ref_line,
            self.params.point_line_scale
        );

        Ok(ErrorReport {
            error,
            lane_ref: RefPrimitive::Point([mid.x, mid.y]),
            vehicle_ref: self.vehicle_ref_segment(frame_width)
        })
    }

    /// Find the lane midpoint.
    ///
    /// The midpoint y is the average of the middle (by index) point of each
    /// boundary; the midpoint x averages the point on each boundary closest
    /// to that height. Using nearest-by-y keeps the two x samples at the same
    /// height even when the detector reports the boundaries over slightly
    /// different row ranges.
    fn lane_midpoint(
        &self,
        left: &LaneBoundary,
        right: &LaneBoundary
    ) -> Result<Point2<f64>, VisTaskError> {

        let left_mid = left.mid()
            .ok_or(VisTaskError::EmptyBoundary("left"))?;
        let right_mid = right.mid()
            .ok_or(VisTaskError::EmptyBoundary("right"))?;

        let middle_y = (left_mid.y + right_mid.y) / 2.0;

        let left_point = left.nearest_to_y(middle_y)
            .ok_or(VisTaskError::EmptyBoundary("left"))?;
        let right_point = right.nearest_to_y(middle_y)
            .ok_or(VisTaskError::EmptyBoundary("right"))?;

        Ok(Point2::new((left_point.x + right_point.x) / 2.0, middle_y))
    }

    /// The vehicle path reference line, vertical at the centre of the frame.
    pub(crate) fn vehicle_ref_line(&self, frame_width: f64) -> Vector3<f64> {
        let near = Vector3::new(frame_width / 2.0, self.params.ref_line_near_y, 1.0);
        let far = Vector3::new(frame_width / 2.0, self.params.ref_line_far_y, 1.0);

        geom::line_through(&near, &far)
    }

    /// The vehicle reference line as a drawable segment.
    pub(crate) fn vehicle_ref_segment(&self, frame_width: f64) -> RefPrimitive {
        RefPrimitive::Segment(
            [frame_width / 2.0, self.params.ref_line_near_y],
            [frame_width / 2.0, self.params.ref_line_far_y]
        )
    }
}
