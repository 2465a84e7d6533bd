//! Main lane control executable entry point.
//!
//! # Architecture
//!
//! The executable runs a fixed period control cycle:
//!
//!     - Frame acquisition
//!     - Lane detection
//!     - Tuning snapshot (gains, speed setpoint, task mode)
//!     - Visual task error computation
//!     - Steering control processing
//!     - Axis demands sent to the virtual device
//!     - Archive writes and diagnostics
//!
//! The external collaborators (detector, frame source, device, panel
//! rendering) are consumed through the traits in `lane_lib::eqpt`; this
//! executable wires in the simulation stand-ins so the loop can be run and
//! tuned without real equipment attached.
//!
//! An optional single CLI argument selects the startup task mode by name
//! (e.g. `lane_exec point2point`), overriding the mode index in `tune.toml`.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{
    eyre::{eyre, WrapErr},
    Report
};
use log::{info, warn};
use std::env;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

// Internal
use lane_lib::{
    data_store::DataStore,
    eqpt::{
        detector::LaneDetector,
        joystick::{frac_to_raw, JoyDevice},
        sim::{SimFrameSource, SimJoyDevice, SimLaneDetector},
        tune::{RawTuning, TunePanel},
        FrameSource
    },
    steer_ctrl::{self, Gains},
    vis_task::{self, TaskMode}
};
use util::{
    archive::Archived,
    logger::{logger_init, LevelFilter},
    module::State,
    session::Session
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Target period of one cycle.
const CYCLE_PERIOD_S: f64 = 0.025;

/// Number of cycles per second
const CYCLE_FREQUENCY_HZ: f64 = 1.0 / CYCLE_PERIOD_S;

/// Dimensions of the frames produced by the simulation frame source.
const SIM_FRAME_WIDTH: u32 = 640;
const SIM_FRAME_HEIGHT: u32 = 480;

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new(
        "lane_exec",
        "sessions"
    ).wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Trace, &session)
        .wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Lane Control Executable\n");
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD PARAMETERS ----

    let mut initial_tuning: RawTuning = util::params::load(
        "tune.toml"
    ).wrap_err("Could not load initial tuning values")?;

    info!("Exec parameters loaded");

    // ---- STARTUP MODE SELECTION ----

    // Collect all arguments
    let args: Vec<String> = env::args().collect();

    // If we have a single argument use it as the startup task mode name
    if args.len() == 2 {
        let mode: TaskMode = args[1].parse().map_err(|e| eyre!("{}", e))?;
        initial_tuning.mode = mode.index() as u32;
        info!("Startup task mode from CLI: {}", mode);
    }
    else if args.len() > 2 {
        return Err(eyre!(
            "Expected either zero or one argument, found {}", args.len() - 1)
        );
    }

    // Reject an out of range mode index in the tuning file outright, an
    // arbitrary law must never be selected silently
    let startup_mode = TaskMode::from_index(initial_tuning.mode as usize)
        .ok_or_else(|| eyre!(
            "Invalid task mode index {} in initial tuning", initial_tuning.mode
        ))?;

    info!("Startup task mode: {}", startup_mode);

    // ---- INITIALISE TUNING PANEL ----

    let panel = TunePanel::new(initial_tuning);

    // The operator-facing panel writes through this handle. With the sim
    // stand-ins wired in there is no writer, the values stay at the initial
    // tuning.
    let _tune_handle = panel.handle();

    // ---- INITIALISE DATASTORE ----

    info!("Initialising modules...");

    let mut ds = DataStore::default();
    ds.task_mode = startup_mode;

    // ---- INITIALISE MODULES ----

    ds.vis_task.init("vis_task.toml", &session)
        .wrap_err("Failed to initialise VisTask")?;
    info!("VisTask init complete");

    ds.steer_ctrl.init((), &session)
        .wrap_err("Failed to initialise SteerCtrl")?;
    info!("SteerCtrl init complete");

    info!("Module initialisation complete\n");

    // ---- INITIALISE EQUIPMENT ----

    let mut frame_source = SimFrameSource::new(SIM_FRAME_WIDTH, SIM_FRAME_HEIGHT);
    let mut detector = SimLaneDetector::new();
    let mut joy = SimJoyDevice::default();

    info!("Equipment initialised (simulation stand-ins)");

    // ---- STOP SIGNAL ----

    let running = Arc::new(AtomicBool::new(true));
    {
        let r = running.clone();
        ctrlc::set_handler(move || r.store(false, Ordering::SeqCst))
            .wrap_err("Failed to set the stop signal handler")?;
    }

    // ---- MAIN LOOP ----

    info!("Begining main loop\n");

    let mut block_start = Instant::now();

    loop {
        // Check the stop signal once per cycle and exit cleanly
        if !running.load(Ordering::SeqCst) {
            info!("Stop signal received, exiting");
            break;
        }

        // Get cycle start time
        let cycle_start_instant = Instant::now();

        // Clear items that need wiping at the start of the cycle
        ds.cycle_start(CYCLE_FREQUENCY_HZ);

        // ---- DATA INPUT & CONTROL PROCESSING ----

        match frame_source.next_frame() {
            Ok(frame) => match detector.detect(&frame) {
                Ok(detection) => {
                    // Tuning snapshot for this cycle (read copy, last writer
                    // wins)
                    ds.tuning = panel.snapshot();

                    match TaskMode::from_index(ds.tuning.mode as usize) {
                        Some(m) => ds.task_mode = m,
                        None => warn!(
                            "Panel reported invalid task mode index {}, keeping {}",
                            ds.tuning.mode,
                            ds.task_mode
                        )
                    }

                    let gains = Gains::from_raw(&ds.tuning);

                    // VisTask processing
                    let vis_input = vis_task::InputData {
                        boundaries: detection.boundaries,
                        detected: detection.detected,
                        frame_width: frame.width() as f64,
                        mode: ds.task_mode
                    };

                    match ds.vis_task.proc(&vis_input) {
                        Ok((o, r)) => {
                            ds.vis_task_output = o;
                            ds.vis_task_status_rpt = r;
                        }
                        Err(e) => {
                            // Degenerate geometry skips this cycle's control
                            // update, same external behaviour as a missed
                            // detection
                            warn!(
                                "Error during VisTask processing, no control \
                                 update this cycle: {}",
                                e
                            );
                            ds.vis_task_output = None;
                        }
                    }

                    // SteerCtrl processing
                    let steer_input = steer_ctrl::InputData {
                        error: ds.vis_task_output.map(|o| o.error),
                        gains
                    };

                    match ds.steer_ctrl.proc(&steer_input) {
                        Ok((o, r)) => {
                            ds.steer_ctrl_output = o;
                            ds.steer_ctrl_status_rpt = r;
                        }
                        Err(e) => warn!("Error during SteerCtrl processing: {}", e)
                    }

                    // Send demands to the virtual device
                    let steer_raw = frac_to_raw(ds.steer_ctrl_output.steer_frac);
                    let throttle_raw = frac_to_raw(ds.steer_ctrl_output.throttle_frac);

                    if let Err(e) = joy.set_axes(steer_raw, throttle_raw) {
                        warn!("Could not send axis demands: {}", e);
                    }
                }
                Err(e) => warn!("Detector failure, skipping cycle: {}", e)
            },
            Err(e) => warn!("Frame acquisition failed, skipping cycle: {}", e)
        }

        // ---- WRITE ARCHIVES ----

        if let Err(e) = ds.vis_task.write() {
            warn!("Could not write VisTask archive: {}", e);
        }
        if let Err(e) = ds.steer_ctrl.write() {
            warn!("Could not write SteerCtrl archive: {}", e);
        }

        // ---- DIAGNOSTICS ----

        if ds.is_1_hz_cycle {
            // One 1Hz block is CYCLE_FREQUENCY_HZ cycles, so the measured
            // rate is that count over the block's wall clock duration
            let elapsed_s = block_start.elapsed().as_secs_f64();
            if elapsed_s > 0.0 {
                ds.meas_cycle_rate_hz = CYCLE_FREQUENCY_HZ / elapsed_s;
            }
            block_start = Instant::now();

            let rpt = &ds.steer_ctrl_status_rpt;
            let side = if rpt.turn_pct < 0.0 { "L" } else { "R" };

            info!(
                "{:6.1} Hz | {}: {:5.1}% | S: {:5.1}% | Mode: {}",
                ds.meas_cycle_rate_hz,
                side,
                rpt.turn_pct.abs(),
                rpt.speed_pct,
                ds.task_mode
            );
        }

        // ---- CYCLE MANAGEMENT ----

        let cycle_dur = Instant::now() - cycle_start_instant;

        // Get sleep duration
        match Duration::from_secs_f64(CYCLE_PERIOD_S)
            .checked_sub(cycle_dur)
        {
            Some(d) => {
                ds.num_consec_cycle_overruns = 0;
                thread::sleep(d);
            },
            None => {
                warn!(
                    "Cycle overran by {:.06} s",
                    cycle_dur.as_secs_f64() - CYCLE_PERIOD_S
                );
                ds.num_consec_cycle_overruns += 1;
            }
        }
    }

    info!("Main loop exited cleanly");

    Ok(())
}
