//! Centroid based error law calculations
//!
//! Variants of the point laws which use the area weighted centroid of the
//! lane polygon instead of the lane midpoint. The centroid integrates the
//! whole visible lane extent so it is less sensitive to detector noise on
//! any single row.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
use super::state::{ErrorReport, RefPrimitive};
use super::{geom, VisTask, VisTaskError};
use crate::eqpt::detector::LaneBoundary;

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl VisTask {
    /// Perform the centroid to point calculation.
    ///
    /// The error is the raw pixel offset between the lane polygon centroid
    /// and the centre of the frame.
    pub(crate) fn calc_centroid_to_point(
        &self,
        left: &LaneBoundary,
        right: &LaneBoundary,
        frame_width: f64
    ) -> Result<ErrorReport, VisTaskError> {

        let cent = geom::polygon_centroid(left.points(), right.points())?;

        let error = cent.x - frame_width / 2.0;

        Ok(ErrorReport {
            error,
            lane_ref: RefPrimitive::Point([cent.x, cent.y]),
            vehicle_ref: RefPrimitive::Point([frame_width / 2.0, cent.y])
        })
    }

    /// Perform the centroid to line calculation.
    ///
    /// The error is the projective incidence of the lane polygon centroid
    /// with the vehicle reference line, divided by the point/line scale.
    pub(crate) fn calc_centroid_to_line(
        &self,
        left: &LaneBoundary,
        right: &LaneBoundary,
        frame_width: f64
    ) -> Result<ErrorReport, VisTaskError> {

        let cent = geom::polygon_centroid(left.points(), right.points())?;
        let ref_line = self.vehicle_ref_line(frame_width);

        let error = geom::point_line_dist_scaled(
            &geom::hom(&cent),
            &ref_line,
            self.params.point_line_scale
        );

        Ok(ErrorReport {
            error,
            lane_ref: RefPrimitive::Point([cent.x, cent.y]),
            vehicle_ref: self.vehicle_ref_segment(frame_width)
        })
    }
}
