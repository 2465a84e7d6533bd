//! # Tuning panel interface
//!
//! The operator's panel adjusts the controller gains, the speed setpoint and
//! the active task mode at runtime. The panel rendering is external, this
//! module owns the shared raw values and hands the control loop a read copy
//! once per cycle (last writer wins). Raw values are in slider units, the
//! conversion to physical gains lives in `steer_ctrl::Gains`.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Raw tuning readings, in slider units.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RawTuning {
    /// Turn proportional gain slider, 0 to 100
    pub turn_kp: u32,

    /// Turn derivative gain slider, 0 to 100
    pub turn_kd: u32,

    /// Speed shaping gain slider, 0 to 100
    pub s_kp: u32,

    /// Speed setpoint slider, 0 to 10
    pub speed: u32,

    /// Task mode index, 0 to 5
    pub mode: u32
}

/// Shared handle through which the operator-facing panel writes new values.
pub type TuneHandle = Arc<Mutex<RawTuning>>;

/// The tuning panel state owned by the control loop.
pub struct TunePanel {
    shared: TuneHandle
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl TunePanel {
    /// Create a new panel with the given initial raw values.
    pub fn new(initial: RawTuning) -> Self {
        Self {
            shared: Arc::new(Mutex::new(initial))
        }
    }

    /// Get a handle for an external writer (the operator panel) to adjust the
    /// values through.
    pub fn handle(&self) -> TuneHandle {
        self.shared.clone()
    }

    /// Read a fresh copy of the current raw values.
    ///
    /// The copy is taken once per cycle so the controller sees a consistent
    /// snapshot even if the panel writes mid-cycle.
    pub fn snapshot(&self) -> RawTuning {
        match self.shared.lock() {
            Ok(guard) => *guard,
            // A poisoned lock still holds the last written values
            Err(poisoned) => *poisoned.into_inner()
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
    fn test_snapshot_sees_last_write() {
        let panel = TunePanel::new(RawTuning::default());
        let handle = panel.handle();

        {
            let mut raw = handle.lock().unwrap();
            raw.turn_kp = 40;
            raw.mode = 3;
        }

        let snap = panel.snapshot();
        assert_eq!(snap.turn_kp, 40);
        assert_eq!(snap.mode, 3);
    }
}
