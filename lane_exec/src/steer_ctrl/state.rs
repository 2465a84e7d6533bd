//! Implementations for the SteerCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::trace;
use serde::Serialize;

// Internal
use super::{Gains, SteerCtrlError};
use util::{
    archive::{Archived, Archiver},
    maths::clamp,
    module::State,
    session::Session
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Steering control module state
#[derive(Default)]
pub struct SteerCtrl {
    /// Executing mode
    mode: SteerCtrlMode,

    /// Negated error from the previous update, the derivative reference
    last_error: f64,

    /// Current turn rate demand, a signed fraction of half the axis range
    turn_rate: f64,

    /// Current shaped speed demand, 0 to 1
    final_speed: f64,

    report: StatusReport,
    arch_report: Archiver
}

/// Input data to SteerCtrl.
pub struct InputData {
    /// The error from the visual task, or `None` if no error is available
    /// this cycle
    pub error: Option<f64>,

    /// The gains snapshot for this cycle
    pub gains: Gains
}

/// Axis demands output by SteerCtrl.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct AxisDems {
    /// Steering axis demand as a fraction of the full device range, 0.5 is
    /// centred.
    ///
    /// Deliberately not clamped into [0, 1] here: the tuning this controller
    /// was calibrated against relies on small gains keeping the turn rate
    /// within half the range, and the device conversion clamps anyway. See
    /// `eqpt::joystick::frac_to_raw`.
    pub steer_frac: f64,

    /// Throttle axis demand as a fraction of the full device range, already
    /// clamped to [0, 1]
    pub throttle_frac: f64
}

/// Status report for SteerCtrl processing.
#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct StatusReport {
    /// Executing mode at the end of the cycle
    pub mode: SteerCtrlMode,

    /// True when no error was available and the update was skipped
    pub skipped: bool,

    /// Signed turn rate as a percentage of full lock, negative left
    pub turn_pct: f64,

    /// Shaped speed as a percentage of full throttle
    pub speed_pct: f64
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The possible modes of execution of SteerCtrl.
///
/// The controller starts `Idle` and switches to `Tracking` on the first valid
/// error. There is no transition back: cycles without an error retain all
/// state so the device holds its last demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SteerCtrlMode {
    Idle,
    Tracking
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for SteerCtrlMode {
    fn default() -> Self {
        SteerCtrlMode::Idle
    }
}

impl Default for AxisDems {
    fn default() -> Self {
        AxisDems {
            steer_frac: 0.5,
            throttle_frac: 0.0
        }
    }
}

impl State for SteerCtrl {
    type InitData = ();
    type InitError = SteerCtrlError;

    type InputData = InputData;
    type OutputData = AxisDems;
    type StatusReport = StatusReport;
    type ProcError = SteerCtrlError;

    /// Initialise the SteerCtrl module.
    fn init(&mut self, _init_data: Self::InitData, session: &Session)
        -> Result<(), Self::InitError>
    {
        // Create the arch folder for steer_ctrl
        let mut arch_path = session.arch_root.clone();
        arch_path.push("steer_ctrl");
        std::fs::create_dir_all(arch_path)
            .map_err(|e| SteerCtrlError::ArchiveError(e.to_string()))?;

        // Initialise the archiver
        self.arch_report = Archiver::from_path(session, "steer_ctrl/status_report.csv")
            .map_err(|e| SteerCtrlError::ArchiveError(e.to_string()))?;

        Ok(())
    }

    /// Process steering control for this cycle.
    ///
    /// Runs the PD update if an error is available, otherwise retains the
    /// previous state, and emits the axis demands either way.
    fn proc(&mut self, input: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError>
    {
        let skipped = match input.error {
            Some(error) => {
                self.update(error, &input.gains);
                false
            }
            None => true
        };

        self.report = StatusReport {
            mode: self.mode,
            skipped,
            turn_pct: self.turn_rate / 0.5 * 100.0,
            speed_pct: self.final_speed * 100.0
        };

        let output = AxisDems {
            steer_frac: 0.5 + self.turn_rate,
            throttle_frac: self.final_speed
        };

        Ok((output, self.report))
    }
}

impl SteerCtrl {
    /// Run one PD update for a valid error.
    fn update(&mut self, error: f64, gains: &Gains) {
        if self.mode == SteerCtrlMode::Idle {
            trace!("First valid error recieved, switching to Tracking");
            self.mode = SteerCtrlMode::Tracking;
        }

        // Derivative of the negated error against the previous cycle
        let derivative = -error - self.last_error;
        self.last_error = -error;

        self.turn_rate = error * gains.turn_kp - derivative * gains.turn_kd;

        self.final_speed = shape_speed(self.turn_rate, gains);
    }

    pub fn mode(&self) -> SteerCtrlMode {
        self.mode
    }

    pub fn turn_rate(&self) -> f64 {
        self.turn_rate
    }

    pub fn last_error(&self) -> f64 {
        self.last_error
    }
}

impl Archived for SteerCtrl {
    fn write(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.arch_report.serialise(self.report)
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Shape the speed demand down as the turn rate grows.
///
/// The setpoint is reduced in proportion to the absolute turn rate and the
/// result clamped into [0, 1], it can never go negative however hard the
/// vehicle is turning.
pub fn shape_speed(turn_rate: f64, gains: &Gains) -> f64 {
    clamp(
        &(gains.speed_set - gains.speed_kp * turn_rate.abs()),
        &0f64,
        &1f64
    )
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    fn gains() -> Gains {
        Gains {
            turn_kp: 0.01,
            turn_kd: 0.02,
            speed_kp: 0.5,
            speed_set: 1.0
        }
    }

    fn proc(ctrl: &mut SteerCtrl, error: Option<f64>) -> (AxisDems, StatusReport) {
        ctrl.proc(&InputData {
            error,
            gains: gains()
        })
        .unwrap()
    }

    #[test]
    fn test_zero_error_fixed_point() {
        let mut ctrl = SteerCtrl::default();

        for _ in 0..5 {
            let (output, _) = proc(&mut ctrl, Some(0.0));
            assert_eq!(ctrl.turn_rate(), 0.0);
            assert_eq!(ctrl.last_error(), 0.0);
            assert_eq!(output.steer_frac, 0.5);
        }
    }

    #[test]
    fn test_constant_error_zero_derivative() {
        let mut ctrl = SteerCtrl::default();

        // First update sees a derivative step from the zero initial state
        proc(&mut ctrl, Some(5.0));
        let expected_first = 5.0 * 0.01 + 5.0 * 0.02;
        assert!((ctrl.turn_rate() - expected_first).abs() < 1e-12);

        // Second update with the same error has zero derivative contribution
        proc(&mut ctrl, Some(5.0));
        assert!((ctrl.turn_rate() - 5.0 * 0.01).abs() < 1e-12);
        assert_eq!(ctrl.last_error(), -5.0);
    }

    #[test]
    fn test_speed_shaping() {
        let g = gains();

        assert!((shape_speed(0.4, &g) - 0.8).abs() < 1e-12);

        // Hard turns clamp the speed to zero, never negative
        assert_eq!(shape_speed(3.0, &g), 0.0);
        assert_eq!(shape_speed(-3.0, &g), 0.0);
    }

    #[test]
    fn test_missing_error_retains_state() {
        let mut ctrl = SteerCtrl::default();

        proc(&mut ctrl, Some(5.0));
        let (output_before, _) = proc(&mut ctrl, Some(5.0));
        let turn_rate = ctrl.turn_rate();
        let last_error = ctrl.last_error();

        // A cycle with no error must not touch the controller state and must
        // re-emit the same demands
        let (output, report) = proc(&mut ctrl, None);

        assert!(report.skipped);
        assert_eq!(ctrl.turn_rate(), turn_rate);
        assert_eq!(ctrl.last_error(), last_error);
        assert_eq!(output.steer_frac, output_before.steer_frac);
        assert_eq!(output.throttle_frac, output_before.throttle_frac);
        assert_eq!(report.mode, SteerCtrlMode::Tracking);
    }

    #[test]
    fn test_idle_until_first_error() {
        let mut ctrl = SteerCtrl::default();
        assert_eq!(ctrl.mode(), SteerCtrlMode::Idle);

        // Cycles without an error do not start tracking
        let (output, report) = proc(&mut ctrl, None);
        assert_eq!(ctrl.mode(), SteerCtrlMode::Idle);
        assert!(report.skipped);
        assert_eq!(output.steer_frac, 0.5);
        assert_eq!(output.throttle_frac, 0.0);

        proc(&mut ctrl, Some(1.0));
        assert_eq!(ctrl.mode(), SteerCtrlMode::Tracking);
    }

    #[test]
    fn test_steer_frac_unclamped() {
        let mut ctrl = SteerCtrl::default();

        // A large error with the derivative kick can push the demand past the
        // normalised range; the raw conversion clamps, this output must not
        let (output, _) = proc(&mut ctrl, Some(40_000.0));
        assert!(output.steer_frac > 1.0);
    }
}
