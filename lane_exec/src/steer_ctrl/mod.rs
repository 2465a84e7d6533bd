//! # Steering control module
//!
//! Steering control is a PD controller which converts the visual task error
//! into a turn rate, shapes the speed setpoint down as the turn tightens,
//! and emits the pair as normalised axis demands for the virtual input
//! device.
//!
//! The error is negated going into the derivative chain: a positive error
//! (lane reference right of the vehicle reference) must produce a left
//! correcting, negative, turn demand.
//!
//! On cycles without a valid error the update is skipped entirely and the
//! previous demands are re-emitted, so the device simply holds its last
//! value until detection returns.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod gains;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use gains::*;
pub use state::*;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during SteerCtrl operation.
#[derive(Debug, thiserror::Error)]
pub enum SteerCtrlError {
    #[error("Could not create archive: {0}")]
    ArchiveError(String)
}
