//! # Lane control library.
//!
//! This library exposes the lane control modules so that the executable and
//! the test suites can share them.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Global data store for the executable
pub mod data_store;

/// Equipment interfaces - frame source, lane detector, virtual joystick and tuning panel
pub mod eqpt;

/// Steering control module - converts the visual task error into axis demands for the
/// virtual input device
pub mod steer_ctrl;

/// Visual task module - converts detected lane boundaries into a scalar steering error
pub mod vis_task;
