//! Gait sequencer
//!
//! Plays gait cycles out through the servo controller, one phase at a time.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, info};
use std::{collections::HashMap, thread, time::Duration};

// Internal
use super::{GaitCycle, GaitError, GaitKind};
use crate::servo_ctrl::{ServoCtrl, ServoDriver};

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// Waits out the settling period at the end of a phase.
pub trait Settle {
    fn settle(&mut self, period: Duration);
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Blocks the calling thread for the settling period.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSettle;

/// Executes gait cycles.
///
/// Phases are strictly sequential: every command of a phase is issued and the settling period
/// elapses before the next phase starts. A failed command aborts the rest of the cycle.
pub struct GaitSequencer<D: ServoDriver, S: Settle> {
    servo_ctrl: ServoCtrl<D>,

    settle: S,

    settle_period: Duration,

    cycles: HashMap<GaitKind, GaitCycle>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Settle for ThreadSettle {
    fn settle(&mut self, period: Duration) {
        thread::sleep(period);
    }
}

impl<D: ServoDriver, S: Settle> GaitSequencer<D, S> {
    /// Create a sequencer owning the standard tripod cycles.
    pub fn new(
        servo_ctrl: ServoCtrl<D>,
        settle: S,
        settle_period: Duration,
    ) -> Result<Self, GaitError> {
        let cycles = GaitKind::ALL
            .iter()
            .map(|k| GaitCycle::tripod(*k).map(|c| (*k, c)))
            .collect::<Result<HashMap<_, _>, _>>()?;

        Ok(Self {
            servo_ctrl,
            settle,
            settle_period,
            cycles,
        })
    }

    /// Check every demand of every cycle resolves in the position table.
    ///
    /// Run at startup so that a bad table is reported before the robot moves.
    pub fn validate(&self) -> Result<(), GaitError> {
        for kind in GaitKind::ALL.iter() {
            for (i, phase) in self.cycle(*kind).phases().iter().enumerate() {
                for a in phase.assignments() {
                    self.servo_ctrl
                        .table()
                        .resolve(a.position, a.act_id)
                        .map_err(|e| GaitError::Servo {
                            kind: *kind,
                            phase: i + 1,
                            act_id: a.act_id,
                            source: e.into(),
                        })?;
                }
            }
        }

        Ok(())
    }

    /// Run one full cycle of the given gait.
    pub fn run(&mut self, kind: GaitKind) -> Result<(), GaitError> {
        info!("{}", kind);

        // Borrow the cycle separately from the controller
        let Self {
            servo_ctrl,
            settle,
            settle_period,
            cycles,
        } = self;

        let cycle = &cycles[&kind];

        for (i, phase) in cycle.phases().iter().enumerate() {
            debug!("{:?} phase {}", kind, i + 1);

            for a in phase.assignments() {
                servo_ctrl
                    .command(a.act_id, a.position)
                    .map_err(|e| GaitError::Servo {
                        kind,
                        phase: i + 1,
                        act_id: a.act_id,
                        source: e,
                    })?;
            }

            settle.settle(*settle_period);
        }

        Ok(())
    }

    /// The cycle played for the given gait.
    pub fn cycle(&self, kind: GaitKind) -> &GaitCycle {
        &self.cycles[&kind]
    }

    /// Consume the sequencer, returning the servo controller.
    pub fn into_servo_ctrl(self) -> ServoCtrl<D> {
        self.servo_ctrl
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
