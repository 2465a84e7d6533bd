//! # Virtual joystick interface
//!
//! The virtual input device consumes two raw axis values per cycle, one for
//! steering and one for throttle. The device is external, this module defines
//! the trait it is consumed through and the conversion from the controller's
//! normalised axis fractions into the device's raw integer range.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use util::maths::{clamp, lin_map};

// Internal
use super::EqptError;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Maximum raw axis value accepted by the virtual device.
pub const AXIS_MAX: u16 = 32767;

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// Sink for the steering and throttle axis demands.
pub trait JoyDevice {
    fn set_axes(&mut self, steer_raw: u16, throttle_raw: u16) -> Result<(), EqptError>;
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Convert a normalised axis fraction into the device's raw range.
///
/// The fraction is clamped into [0, 1] before scaling. The device must never
/// be sent a demand outside its representable range, whatever the upstream
/// controller produced.
pub fn frac_to_raw(frac: f64) -> u16 {
    let clamped = clamp(&frac, &0f64, &1f64);
    lin_map((0f64, 1f64), (0f64, AXIS_MAX as f64), clamped).round() as u16
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_frac_to_raw() {
        assert_eq!(frac_to_raw(0.0), 0);
        assert_eq!(frac_to_raw(1.0), AXIS_MAX);
        assert_eq!(frac_to_raw(0.5), 16384);
    }

    #[test]
    fn test_frac_to_raw_clamps_out_of_range() {
        // An unclamped steering fraction must never reach the device raw range
        assert_eq!(frac_to_raw(1.7), AXIS_MAX);
        assert_eq!(frac_to_raw(-0.3), 0);
    }
}
