//! # Data Store

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use crate::{eqpt::tune::RawTuning, steer_ctrl, vis_task};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Global data store for the executable.
#[derive(Default)]
pub struct DataStore {
    // Cycle management
    /// Number of cycles already executed
    pub num_cycles: u128,

    /// True if this cycle falls on a 1Hz boundary
    pub is_1_hz_cycle: bool,

    /// Cycle rate measured over the last 1Hz block, a diagnostic only, the
    /// loop period is never adapted to it
    pub meas_cycle_rate_hz: f64,

    /// Number of consecutive cycle overruns
    pub num_consec_cycle_overruns: u64,

    // Tuning
    /// Raw tuning snapshot taken this cycle
    pub tuning: RawTuning,

    /// The active task mode. Kept at its previous value when the panel
    /// reports an out of range index.
    pub task_mode: vis_task::TaskMode,

    // VisTask
    pub vis_task: vis_task::VisTask,
    pub vis_task_output: vis_task::OutputData,
    pub vis_task_status_rpt: vis_task::StatusReport,

    // SteerCtrl
    pub steer_ctrl: steer_ctrl::SteerCtrl,
    pub steer_ctrl_output: steer_ctrl::AxisDems,
    pub steer_ctrl_status_rpt: steer_ctrl::StatusReport,
}

// ---------------------------------------------------------------------------
// IMPLS
// ---------------------------------------------------------------------------

impl DataStore {
    /// Clear items that need wiping at the start of a cycle and update the
    /// cycle counters.
    pub fn cycle_start(&mut self, cycle_frequency_hz: f64) {
        self.num_cycles += 1;
        self.is_1_hz_cycle = self.num_cycles % (cycle_frequency_hz as u128) == 0;

        self.vis_task_output = None;
    }
}
