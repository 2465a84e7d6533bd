//! Controller gains and their raw slider scalings

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Serialize;

// Internal
use crate::eqpt::tune::RawTuning;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Scale factor from the raw turn_kp slider to the proportional gain.
pub const TURN_KP_SCALE: f64 = 1.0 / 10_000.0;

/// Scale factor from the raw turn_kd slider to the derivative gain.
pub const TURN_KD_SCALE: f64 = 1.0 / 5_000.0;

/// Scale factor from the raw s_kp slider to the speed shaping gain.
pub const SPEED_KP_SCALE: f64 = 0.2;

/// Scale factor from the raw speed slider to the speed setpoint.
pub const SPEED_SET_SCALE: f64 = 0.1;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Controller gains, derived fresh each cycle from the raw tuning snapshot.
///
/// The scale factors above are empirical calibration constants matching the
/// slider ranges to the useful gain range. They were tuned together with the
/// error law scale divisors in `vis_task` and must not be changed
/// independently of them.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct Gains {
    /// Turn rate proportional gain
    pub turn_kp: f64,

    /// Turn rate derivative gain
    pub turn_kd: f64,

    /// Speed shaping proportional gain
    pub speed_kp: f64,

    /// Speed setpoint, 0 to 1
    pub speed_set: f64
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Gains {
    /// Derive the gains from a raw tuning snapshot.
    pub fn from_raw(raw: &RawTuning) -> Self {
        Self {
            turn_kp: TURN_KP_SCALE * raw.turn_kp as f64,
            turn_kd: TURN_KD_SCALE * raw.turn_kd as f64,
            speed_kp: SPEED_KP_SCALE * raw.s_kp as f64,
            speed_set: SPEED_SET_SCALE * raw.speed as f64
        }
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_from_raw_scaling() {
        let raw = RawTuning {
            turn_kp: 100,
            turn_kd: 100,
            s_kp: 100,
            speed: 10,
            mode: 0
        };

        let gains = Gains::from_raw(&raw);

        assert!((gains.turn_kp - 0.01).abs() < 1e-12);
        assert!((gains.turn_kd - 0.02).abs() < 1e-12);
        assert!((gains.speed_kp - 20.0).abs() < 1e-12);
        assert!((gains.speed_set - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_from_raw_zero() {
        let gains = Gains::from_raw(&RawTuning::default());

        assert_eq!(gains.turn_kp, 0.0);
        assert_eq!(gains.turn_kd, 0.0);
        assert_eq!(gains.speed_kp, 0.0);
        assert_eq!(gains.speed_set, 0.0);
    }
}
