//! # Visual task module
//!
//! The visual task module converts the lane boundaries reported by the
//! detector into a single signed steering error. Six interchangeable error
//! laws are provided, selectable at runtime through the tuning panel:
//!
//! - `point2point` and `cent2point` are purely lateral offset measures,
//!   insensitive to the lane heading.
//! - `point2line` and `cent2line` add directional sensitivity by projecting
//!   the lane reference onto the vehicle reference line.
//! - `parlines` and `line2line` are heading dominant and react to lane
//!   curvature and yaw misalignment.
//!
//! All laws share the same sign convention: a negative error means the lane
//! reference is to the left of the vehicle reference, positive to the right.
//! Coordinates are pixels with y increasing downwards.
//!
//! The module only computes an error when both adjacent boundaries were
//! detected this cycle. Otherwise the output is `None`, a distinct
//! "unavailable" state, not a zero error, and the controller skips its update.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod calc_centroid;
mod calc_line;
mod calc_point;
pub mod geom;
mod mode;
mod params;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use mode::*;
pub use params::Params;
pub use state::*;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during VisTask operation.
#[derive(Debug, thiserror::Error)]
pub enum VisTaskError {
    #[error("Could not load parameters: {0}")]
    ParamLoadError(#[from] util::params::LoadError),

    #[error("Could not create archive: {0}")]
    ArchiveError(String),

    /// The gate passed but a boundary has no points to work with.
    #[error("The {0} adjacent lane boundary is empty")]
    EmptyBoundary(&'static str),

    /// A law would produce a non-finite result, for example the centroid of a
    /// zero area lane polygon. The cycle's control update is skipped rather
    /// than feeding the controller a NaN.
    #[error("Degenerate lane geometry: {0}")]
    DegenerateGeometry(String)
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_param_load_error_conversion() {
        // Parameter loading failures must convert into the module error so
        // that `init` can propagate them with `?`
        let error: VisTaskError = util::params::LoadError::SwRootNotSet.into();

        assert!(matches!(error, VisTaskError::ParamLoadError(_)));
        assert!(error.to_string().starts_with("Could not load parameters"));
    }
}
