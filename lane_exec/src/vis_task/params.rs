//! Visual task parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the visual task module.
///
/// The scale divisors are empirical calibration constants tuned against the
/// steering gain slider range. They have no physical derivation and must be
/// kept as they are for the gain sliders to keep their meaning across modes.
#[derive(Deserialize, Debug, Clone)]
pub struct Params {

    /// Near y coordinate of the vehicle reference line segment
    ///
    /// Units: pixels, y increasing downwards
    pub ref_line_near_y: f64,

    /// Far y coordinate of the vehicle reference line segment
    ///
    /// Units: pixels, y increasing downwards
    pub ref_line_far_y: f64,

    /// Scale divisor for the point to line and centroid to line laws
    pub point_line_scale: f64,

    /// Scale divisor for the parallel lines law
    pub par_lines_scale: f64,

    /// Scale divisor for the line to line law
    pub line_line_scale: f64
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Self {
            ref_line_near_y: 500.0,
            ref_line_far_y: 0.0,
            point_line_scale: 1000.0,
            par_lines_scale: 1_000_000.0,
            line_line_scale: 1000.0
        }
    }
}
