//! Line based error law calculations
//!
//! Both laws here build the lane direction line through the near and far
//! midpoints of the lane pair and compare it against the frame's vertical
//! centre line over the same row range. They respond mostly to heading and
//! curvature misalignment rather than pure lateral offset.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::Vector3;

// Internal
use super::state::{ErrorReport, RefPrimitive};
use super::{geom, VisTask, VisTaskError};
use crate::eqpt::detector::LaneBoundary;

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl VisTask {
    /// Perform the parallel lines calculation.
    ///
    /// The cross product of the two homogeneous lines is their intersection
    /// point. For perfectly parallel lines that point is at infinity, and its
    /// magnitude measures how far from parallel the lane is. The sign is
    /// taken from the intersection's y component so the error keeps the left
    /// negative, right positive convention.
    pub(crate) fn calc_parallel_lines(
        &self,
        left: &LaneBoundary,
        right: &LaneBoundary,
        frame_width: f64
    ) -> Result<ErrorReport, VisTaskError> {

        let (near, far) = lane_extent(left, right)?;

        let centre_near = Vector3::new(frame_width / 2.0, near.y, 1.0);
        let centre_far = Vector3::new(frame_width / 2.0, far.y, 1.0);

        let lane_line = geom::line_through(&far, &near);
        let centre_line = geom::line_through(&centre_far, &centre_near);

        let isect = centre_line.cross(&lane_line);

        let error = geom::sign(isect.y) * isect.norm() / self.params.par_lines_scale;

        Ok(ErrorReport {
            error,
            lane_ref: RefPrimitive::Segment([near.x, near.y], [far.x, far.y]),
            vehicle_ref: RefPrimitive::Segment(
                [centre_near.x, centre_near.y],
                [centre_far.x, centre_far.y]
            )
        })
    }

    /// Perform the line to line calculation.
    ///
    /// The error sums the projective incidence of the centre line's two
    /// endpoints with the lane direction line, a symmetric measure combining
    /// angular and lateral deviation in one scalar.
    pub(crate) fn calc_line_to_line(
        &self,
        left: &LaneBoundary,
        right: &LaneBoundary,
        frame_width: f64
    ) -> Result<ErrorReport, VisTaskError> {

        let (near, far) = lane_extent(left, right)?;

        let centre_near = Vector3::new(frame_width / 2.0, near.y, 1.0);
        let centre_far = Vector3::new(frame_width / 2.0, far.y, 1.0);

        let lane_line = geom::line_through(&far, &near);

        let error = (centre_far.dot(&lane_line) + centre_near.dot(&lane_line))
            / self.params.line_line_scale;

        Ok(ErrorReport {
            error,
            lane_ref: RefPrimitive::Segment([near.x, near.y], [far.x, far.y]),
            vehicle_ref: RefPrimitive::Segment(
                [centre_near.x, centre_near.y],
                [centre_far.x, centre_far.y]
            )
        })
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Near and far midpoints of the lane pair in homogeneous form.
///
/// The y coordinates follow the left boundary, the detector reports both
/// boundaries over the same row range.
fn lane_extent(
    left: &LaneBoundary,
    right: &LaneBoundary
) -> Result<(Vector3<f64>, Vector3<f64>), VisTaskError> {

    let left_near = left.near().ok_or(VisTaskError::EmptyBoundary("left"))?;
    let left_far = left.far().ok_or(VisTaskError::EmptyBoundary("left"))?;
    let right_near = right.near().ok_or(VisTaskError::EmptyBoundary("right"))?;
    let right_far = right.far().ok_or(VisTaskError::EmptyBoundary("right"))?;

    let near = Vector3::new((left_near.x + right_near.x) / 2.0, left_near.y, 1.0);
    let far = Vector3::new((left_far.x + right_far.x) / 2.0, left_far.y, 1.0);

    Ok((near, far))
}
