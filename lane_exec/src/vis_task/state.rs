//! Implementations for the VisTask state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::trace;
use serde::Serialize;

// Internal
use super::{Params, TaskMode, VisTaskError};
use crate::eqpt::detector::{
    LaneBoundary, LEFT_ADJACENT_IDX, NUM_LANE_BOUNDARIES, RIGHT_ADJACENT_IDX
};
use util::{
    archive::{Archived, Archiver},
    module::State,
    params,
    session::Session
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Visual task module state
#[derive(Default)]
pub struct VisTask {
    pub(crate) params: Params,

    report: StatusReport,
    arch_report: Archiver
}

/// Input data to the visual task.
pub struct InputData {
    /// The four boundary point sets produced by the detector this cycle
    pub boundaries: [LaneBoundary; NUM_LANE_BOUNDARIES],

    /// Detection flags for each boundary
    pub detected: [bool; NUM_LANE_BOUNDARIES],

    /// Width of the frame in pixels
    pub frame_width: f64,

    /// The law to apply this cycle
    pub mode: TaskMode
}

/// A geometric primitive referenced by a law, for overlay rendering.
#[derive(Clone, Copy, Debug, Serialize)]
pub enum RefPrimitive {
    Point([f64; 2]),
    Segment([f64; 2], [f64; 2])
}

/// A valid error produced by one of the laws.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct ErrorReport {
    /// Signed scalar error. Negative when the lane reference is left of the
    /// vehicle reference, positive when right. Magnitude semantics depend on
    /// the active law.
    pub error: f64,

    /// Primitive marking the lane reference
    pub lane_ref: RefPrimitive,

    /// Primitive marking the vehicle reference
    pub vehicle_ref: RefPrimitive
}

/// Output of VisTask processing.
///
/// `None` means no error is available this cycle (adjacency gate failed).
/// This is distinct from a zero error, the controller must skip its update.
pub type OutputData = Option<ErrorReport>;

/// Status report for VisTask processing.
#[derive(Clone, Copy, Default, Debug, Serialize)]
pub struct StatusReport {
    /// True if both adjacent boundaries were detected this cycle
    pub adjacent_detected: bool,

    /// The error produced this cycle, if any
    pub error: Option<f64>
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl State for VisTask {
    type InitData = &'static str;
    type InitError = VisTaskError;

    type InputData = InputData;
    type OutputData = OutputData;
    type StatusReport = StatusReport;
    type ProcError = VisTaskError;

    /// Initialise the VisTask module.
    ///
    /// Expected init data is the path to the parameter file.
    fn init(&mut self, init_data: Self::InitData, session: &Session)
        -> Result<(), Self::InitError>
    {
        // Load the parameters
        self.params = params::load(init_data)?;

        // Create the arch folder for vis_task
        let mut arch_path = session.arch_root.clone();
        arch_path.push("vis_task");
        std::fs::create_dir_all(arch_path)
            .map_err(|e| VisTaskError::ArchiveError(e.to_string()))?;

        // Initialise the archiver
        self.arch_report = Archiver::from_path(session, "vis_task/status_report.csv")
            .map_err(|e| VisTaskError::ArchiveError(e.to_string()))?;

        Ok(())
    }

    /// Process the visual task for this cycle.
    ///
    /// Applies the selected law to the adjacent lane pair and produces the
    /// signed error, or `None` if the adjacency gate failed.
    fn proc(&mut self, input: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError>
    {
        self.report = StatusReport::default();

        // Adjacency gate: both boundaries either side of the vehicle must have
        // been detected for the error to mean anything
        if !(input.detected[LEFT_ADJACENT_IDX] && input.detected[RIGHT_ADJACENT_IDX]) {
            trace!("Adjacent lane boundaries not detected, no error this cycle");
            return Ok((None, self.report));
        }

        self.report.adjacent_detected = true;

        let left = &input.boundaries[LEFT_ADJACENT_IDX];
        let right = &input.boundaries[RIGHT_ADJACENT_IDX];

        if left.is_empty() {
            return Err(VisTaskError::EmptyBoundary("left"));
        }
        if right.is_empty() {
            return Err(VisTaskError::EmptyBoundary("right"));
        }

        // Dispatch to the active law
        let error_report = match input.mode {
            TaskMode::PointToPoint =>
                self.calc_point_to_point(left, right, input.frame_width)?,
            TaskMode::PointToLine =>
                self.calc_point_to_line(left, right, input.frame_width)?,
            TaskMode::CentroidToPoint =>
                self.calc_centroid_to_point(left, right, input.frame_width)?,
            TaskMode::CentroidToLine =>
                self.calc_centroid_to_line(left, right, input.frame_width)?,
            TaskMode::ParallelLines =>
                self.calc_parallel_lines(left, right, input.frame_width)?,
            TaskMode::LineToLine =>
                self.calc_line_to_line(left, right, input.frame_width)?
        };

        self.report.error = Some(error_report.error);

        Ok((Some(error_report), self.report))
    }
}

impl Archived for VisTask {
    fn write(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.arch_report.serialise(self.report)
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::eqpt::detector::LaneBoundary;
    use nalgebra::Point2;

    const FRAME_WIDTH: f64 = 640.0;

    fn boundary(points: &[(f64, f64)]) -> LaneBoundary {
        LaneBoundary::new(points.iter().map(|&(x, y)| Point2::new(x, y)).collect())
    }

    fn input(
        left: LaneBoundary,
        right: LaneBoundary,
        mode: TaskMode
    ) -> InputData {
        let mut boundaries: [LaneBoundary; NUM_LANE_BOUNDARIES] = Default::default();
        boundaries[LEFT_ADJACENT_IDX] = left;
        boundaries[RIGHT_ADJACENT_IDX] = right;

        let mut detected = [false; NUM_LANE_BOUNDARIES];
        detected[LEFT_ADJACENT_IDX] = true;
        detected[RIGHT_ADJACENT_IDX] = true;

        InputData {
            boundaries,
            detected,
            frame_width: FRAME_WIDTH,
            mode
        }
    }

    /// Get the error for a lane pair in a given mode, panicking if unavailable
    fn error_for(
        left: &LaneBoundary,
        right: &LaneBoundary,
        mode: TaskMode
    ) -> f64 {
        let mut vt = VisTask::default();
        let (output, report) = vt
            .proc(&input(left.clone(), right.clone(), mode))
            .unwrap();

        assert!(report.adjacent_detected);
        output.unwrap().error
    }

    #[test]
    fn test_symmetric_boundaries_give_zero_error() {
        // Mirror image boundaries about the frame centre line (x = 320)
        let left = boundary(&[(260.0, 600.0), (250.0, 400.0), (240.0, 200.0)]);
        let right = boundary(&[(380.0, 600.0), (390.0, 400.0), (400.0, 200.0)]);

        for i in 0..super::super::NUM_TASK_MODES {
            let mode = TaskMode::from_index(i).unwrap();
            let error = error_for(&left, &right, mode);

            assert!(
                error.abs() < 1e-9,
                "mode {} gave error {} for symmetric boundaries",
                mode,
                error
            );
        }
    }

    #[test]
    fn test_point_to_point_known_scenario() {
        let left = boundary(&[(100.0, 600.0), (110.0, 300.0)]);
        let right = boundary(&[(300.0, 600.0), (290.0, 300.0)]);

        // Lane midpoint is at x = 200, frame centre at 320
        let error = error_for(&left, &right, TaskMode::PointToPoint);
        assert_eq!(error, -120.0);
    }

    #[test]
    fn test_point_to_line_known_scenario() {
        let left = boundary(&[(100.0, 600.0), (110.0, 300.0)]);
        let right = boundary(&[(300.0, 600.0), (290.0, 300.0)]);

        // The reference line spans y 500 to 0, so the incidence product is
        // 500 * (mid_x - width / 2), divided by the 1000 scale
        let error = error_for(&left, &right, TaskMode::PointToLine);
        assert!((error - (-60.0)).abs() < 1e-9);
    }

    #[test]
    fn test_offset_laws_are_linear_in_translation() {
        let left = boundary(&[(100.0, 600.0), (110.0, 300.0)]);
        let right = boundary(&[(300.0, 600.0), (290.0, 300.0)]);

        let delta = 50.0;
        let left_shift = boundary(&[(150.0, 600.0), (160.0, 300.0)]);
        let right_shift = boundary(&[(350.0, 600.0), (340.0, 300.0)]);

        for &mode in &[TaskMode::PointToPoint, TaskMode::CentroidToPoint] {
            let base = error_for(&left, &right, mode);
            let shifted = error_for(&left_shift, &right_shift, mode);

            assert!(
                (shifted - base - delta).abs() < 1e-9,
                "mode {} is not linear in lateral translation",
                mode
            );
        }
    }

    #[test]
    fn test_detection_gate() {
        let left = boundary(&[(100.0, 600.0), (110.0, 300.0)]);
        let right = boundary(&[(300.0, 600.0), (290.0, 300.0)]);

        let mut in_data = input(left, right, TaskMode::PointToPoint);

        // Left adjacent missing, other three present
        in_data.detected = [true, false, true, true];

        let mut vt = VisTask::default();
        let (output, report) = vt.proc(&in_data).unwrap();

        assert!(output.is_none());
        assert!(!report.adjacent_detected);
        assert_eq!(report.error, None);
    }

    #[test]
    fn test_empty_boundary_fails() {
        let left = LaneBoundary::default();
        let right = boundary(&[(300.0, 600.0), (290.0, 300.0)]);

        let mut vt = VisTask::default();
        let result = vt.proc(&input(left, right, TaskMode::PointToPoint));

        assert!(matches!(result, Err(VisTaskError::EmptyBoundary("left"))));
    }

    #[test]
    fn test_degenerate_polygon_fails() {
        // Single point boundaries cannot form a lane polygon
        let left = boundary(&[(100.0, 600.0)]);
        let right = boundary(&[(300.0, 600.0)]);

        let mut vt = VisTask::default();
        let result = vt.proc(&input(left, right, TaskMode::CentroidToPoint));

        assert!(matches!(result, Err(VisTaskError::DegenerateGeometry(_))));
    }

    #[test]
    fn test_heading_laws_sign() {
        // Lane yawed to the right: near midpoint at centre, far midpoint right
        // of centre. Both heading dominant laws must agree the lane reference
        // is to the right (positive error).
        let left = boundary(&[(220.0, 600.0), (270.0, 200.0)]);
        let right = boundary(&[(420.0, 600.0), (470.0, 200.0)]);

        let parlines = error_for(&left, &right, TaskMode::ParallelLines);
        let line2line = error_for(&left, &right, TaskMode::LineToLine);

        assert!(parlines > 0.0, "parlines gave {}", parlines);
        assert!(line2line > 0.0, "line2line gave {}", line2line);
    }
}
