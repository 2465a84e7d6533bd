//! # Equipment interfaces
//!
//! The external collaborators of the control loop: the frame source, the lane
//! detector, the virtual input device and the operator's tuning panel. Each is
//! consumed through a trait so that the executable can run against either real
//! equipment or the simulation stand-ins provided in [`sim`].

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod detector;
pub mod joystick;
pub mod sim;
pub mod tune;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A single video frame, in the detector's pixel coordinate frame.
pub type Frame = image::RgbImage;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors raised by equipment.
#[derive(Debug, thiserror::Error)]
pub enum EqptError {
    #[error("Frame acquisition failed: {0}")]
    FrameAcquisition(String),

    #[error("Lane detector failure: {0}")]
    Detector(String),

    #[error("Could not send axis demands to the device: {0}")]
    AxisSend(String)
}

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// A source of frames, polled once per control cycle.
///
/// The call is treated as synchronous by the control loop, implementations
/// must return in bounded time.
pub trait FrameSource {
    fn next_frame(&mut self) -> Result<Frame, EqptError>;
}
