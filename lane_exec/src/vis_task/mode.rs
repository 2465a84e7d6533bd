//! Task mode enumeration and dispatch

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Number of selectable task modes.
pub const NUM_TASK_MODES: usize = 6;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The selectable error laws.
///
/// The panel selects a mode by raw index, `from_index` maps that onto the
/// enum and rejects out of range values, so an invalid index can never
/// silently select a law.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskMode {
    /// Lateral offset between the lane midpoint and the frame centre point
    PointToPoint,

    /// Projective distance from the lane midpoint to the vehicle reference line
    PointToLine,

    /// Lateral offset between the lane polygon centroid and the frame centre point
    CentroidToPoint,

    /// Projective distance from the lane polygon centroid to the vehicle reference line
    CentroidToLine,

    /// Non-parallelism between the lane direction line and the vehicle reference line
    ParallelLines,

    /// Summed projective distance of the vehicle reference endpoints to the lane
    /// direction line
    LineToLine
}

/// Raised when parsing an unrecognised task mode name.
#[derive(Debug, thiserror::Error)]
#[error(
    "Unknown task mode \"{0}\", expected one of: point2point, point2line, \
     cent2point, cent2line, parlines, line2line"
)]
pub struct UnknownTaskMode(String);

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl TaskMode {
    /// Map a raw panel index onto a mode.
    ///
    /// Returns `None` for indices outside 0 to 5.
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(TaskMode::PointToPoint),
            1 => Some(TaskMode::PointToLine),
            2 => Some(TaskMode::CentroidToPoint),
            3 => Some(TaskMode::CentroidToLine),
            4 => Some(TaskMode::ParallelLines),
            5 => Some(TaskMode::LineToLine),
            _ => None
        }
    }

    /// The raw panel index of this mode.
    pub fn index(&self) -> usize {
        match self {
            TaskMode::PointToPoint => 0,
            TaskMode::PointToLine => 1,
            TaskMode::CentroidToPoint => 2,
            TaskMode::CentroidToLine => 3,
            TaskMode::ParallelLines => 4,
            TaskMode::LineToLine => 5
        }
    }

    /// The short name of this mode, as shown on the panel.
    pub fn name(&self) -> &'static str {
        match self {
            TaskMode::PointToPoint => "point2point",
            TaskMode::PointToLine => "point2line",
            TaskMode::CentroidToPoint => "cent2point",
            TaskMode::CentroidToLine => "cent2line",
            TaskMode::ParallelLines => "parlines",
            TaskMode::LineToLine => "line2line"
        }
    }
}

impl Default for TaskMode {
    fn default() -> Self {
        TaskMode::PointToPoint
    }
}

impl fmt::Display for TaskMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for TaskMode {
    type Err = UnknownTaskMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "point2point" => Ok(TaskMode::PointToPoint),
            "point2line" => Ok(TaskMode::PointToLine),
            "cent2point" => Ok(TaskMode::CentroidToPoint),
            "cent2line" => Ok(TaskMode::CentroidToLine),
            "parlines" => Ok(TaskMode::ParallelLines),
            "line2line" => Ok(TaskMode::LineToLine),
            _ => Err(UnknownTaskMode(s.into()))
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
    fn test_from_index() {
        for i in 0..NUM_TASK_MODES {
            let mode = TaskMode::from_index(i).unwrap();
            assert_eq!(mode.index(), i);
        }

        assert_eq!(TaskMode::from_index(6), None);
        assert_eq!(TaskMode::from_index(100), None);
    }

    #[test]
    fn test_name_round_trip() {
        for i in 0..NUM_TASK_MODES {
            let mode = TaskMode::from_index(i).unwrap();
            assert_eq!(mode.name().parse::<TaskMode>().unwrap(), mode);
        }

        assert!("pnt2pnt".parse::<TaskMode>().is_err());
    }
}
