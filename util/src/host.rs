//! Host environment utility functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::path::PathBuf;
use thiserror::Error;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Name of the environment variable giving the software root directory.
///
/// The root holds the `params` directory and the session directories.
pub const ROOT_ENV_VAR: &str = "LANE_SW_ROOT";

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors which can occur when resolving the software root.
#[derive(Debug, Error)]
pub enum RootError {
    #[error("The software root environment variable (LANE_SW_ROOT) is not set")]
    NotSet
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Get the root directory of the lane control software.
pub fn get_lane_sw_root() -> Result<PathBuf, RootError> {
    match std::env::var(ROOT_ENV_VAR) {
        Ok(p) => Ok(PathBuf::from(p)),
        Err(_) => Err(RootError::NotSet)
    }
}
