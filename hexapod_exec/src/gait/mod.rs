//! Gait control module
//!
//! Converts a locomotion demand into the timed sequence of joint positions which walks or turns
//! the hexapod. Every gait is a tripod gait: one group of three legs is lifted while the other
//! supports the body, then the groups swap.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod cycles;
mod sequencer;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use comms_if::eqpt::hexapod::ActId;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{position_table::Position, servo_ctrl::ServoError};

// Internal
pub use cycles::*;
pub use sequencer::*;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// The number of phases in every gait cycle.
pub const NUM_PHASES: usize = 4;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The locomotion cycles the hexapod can perform.
#[derive(Serialize, Deserialize, Debug, Hash, Eq, PartialEq, Copy, Clone)]
pub enum GaitKind {
    /// Take one step forwards
    Forward,
    /// Take one step backwards
    Backward,
    /// Turn clockwise on the spot
    SpinRight,
    /// Turn anticlockwise on the spot
    SpinLeft,
}

/// Possible errors that can occur during gait execution.
#[derive(Debug, thiserror::Error)]
pub enum GaitError {
    #[error("Phase {phase} commands {act_id} more than once")]
    ConflictingAssignment { phase: usize, act_id: ActId },

    #[error("The {0:?} cycle has no phases")]
    EmptyCycle(GaitKind),

    #[error("{kind:?} cycle aborted in phase {phase} commanding {act_id}: {source}")]
    Servo {
        kind: GaitKind,
        phase: usize,
        act_id: ActId,
        source: ServoError,
    },
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A single demand within a phase.
#[derive(Serialize, Deserialize, Debug, Eq, PartialEq, Copy, Clone)]
pub struct Assignment {
    pub act_id: ActId,
    pub position: Position,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl GaitKind {
    pub const ALL: [GaitKind; 4] = [
        GaitKind::Forward,
        GaitKind::Backward,
        GaitKind::SpinRight,
        GaitKind::SpinLeft,
    ];
}

impl fmt::Display for GaitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GaitKind::Forward => "Step forwards",
            GaitKind::Backward => "Step backwards",
            GaitKind::SpinRight => "Spin right",
            GaitKind::SpinLeft => "Spin left",
        })
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
