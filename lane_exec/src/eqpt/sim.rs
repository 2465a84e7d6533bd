//! # Simulation equipment
//!
//! Stand-ins for the external collaborators so that the executable can be run
//! without a detection model, a screen grabber or a virtual device attached.
//! The detector synthesises a straight lane pair which drifts slowly from side
//! to side, which is enough to exercise the full control loop.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::trace;
use nalgebra::Point2;

// Internal
use super::detector::{
    DetectorOutput, LaneBoundary, LaneDetector,
    LEFT_ADJACENT_IDX, NUM_LANE_BOUNDARIES, RIGHT_ADJACENT_IDX
};
use super::joystick::JoyDevice;
use super::{EqptError, Frame, FrameSource};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Half the width of the synthetic lane in pixels.
const LANE_HALF_WIDTH_PX: f64 = 100.0;

/// Amplitude of the synthetic lateral drift in pixels.
const LANE_DRIFT_AMPLITUDE_PX: f64 = 40.0;

/// Drift phase advance per cycle in radians.
const LANE_DRIFT_RATE_RAD: f64 = 0.01;

/// Number of points in each synthetic boundary.
const NUM_SIM_POINTS: usize = 10;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Frame source producing blank frames of a fixed size.
pub struct SimFrameSource {
    frame: Frame
}

/// Detector producing a synthetic straight lane pair with lateral drift.
#[derive(Default)]
pub struct SimLaneDetector {
    /// Cycle counter driving the drift phase
    cycle: u64
}

/// Virtual device which just logs the demands it is sent.
#[derive(Default)]
pub struct SimJoyDevice;

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl SimFrameSource {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            frame: Frame::new(width, height)
        }
    }
}

impl FrameSource for SimFrameSource {
    fn next_frame(&mut self) -> Result<Frame, EqptError> {
        Ok(self.frame.clone())
    }
}

impl SimLaneDetector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LaneDetector for SimLaneDetector {
    fn detect(&mut self, frame: &Frame) -> Result<DetectorOutput, EqptError> {
        let width = frame.width() as f64;
        let height = frame.height() as f64;

        // Advance the lateral drift
        let drift = LANE_DRIFT_AMPLITUDE_PX
            * (self.cycle as f64 * LANE_DRIFT_RATE_RAD).sin();
        self.cycle += 1;

        // Build the boundary pair, near (bottom) to far (top), covering the
        // lower half of the frame like a real detection would
        let mut left = Vec::with_capacity(NUM_SIM_POINTS);
        let mut right = Vec::with_capacity(NUM_SIM_POINTS);

        for i in 0..NUM_SIM_POINTS {
            let y = height * 0.9
                - (i as f64) * height * 0.5 / (NUM_SIM_POINTS as f64 - 1.0);

            left.push(Point2::new(width / 2.0 - LANE_HALF_WIDTH_PX + drift, y));
            right.push(Point2::new(width / 2.0 + LANE_HALF_WIDTH_PX + drift, y));
        }

        let mut boundaries: [LaneBoundary; NUM_LANE_BOUNDARIES] = Default::default();
        boundaries[LEFT_ADJACENT_IDX] = LaneBoundary::new(left);
        boundaries[RIGHT_ADJACENT_IDX] = LaneBoundary::new(right);

        let mut detected = [false; NUM_LANE_BOUNDARIES];
        detected[LEFT_ADJACENT_IDX] = true;
        detected[RIGHT_ADJACENT_IDX] = true;

        Ok(DetectorOutput {
            annotated: frame.clone(),
            boundaries,
            detected
        })
    }
}

impl JoyDevice for SimJoyDevice {
    fn set_axes(&mut self, steer_raw: u16, throttle_raw: u16) -> Result<(), EqptError> {
        trace!("Axis demands: steer {} throttle {}", steer_raw, throttle_raw);
        Ok(())
    }
}
