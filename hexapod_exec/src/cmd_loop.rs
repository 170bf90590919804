//! # Command Loop
//!
//! Reads directional intents from the operator and plays the matching gait cycle for each one.
//! Each cycle runs to completion before the next intent is read, intents which arrive while a
//! cycle is running are discarded by the source.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::{debug, info};

use crate::{
    gait::{GaitError, GaitKind, GaitSequencer, Settle},
    servo_ctrl::ServoDriver,
};

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// A source of operator intents, such as the keyboard.
pub trait IntentSource {
    /// Discard any stale intents and block until the next one arrives.
    fn next_intent(&mut self) -> Result<Intent, IntentError>;
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// A directional demand from the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Up,
    Down,
    Left,
    Right,
    /// Anything else, which ends the loop
    Other,
}

#[derive(thiserror::Error, Debug)]
pub enum IntentError {
    #[error("Could not read from the input device: {0}")]
    Io(std::io::Error),
}

#[derive(thiserror::Error, Debug)]
pub enum CmdLoopError {
    #[error("Could not read the next intent: {0}")]
    Intent(IntentError),

    #[error("Gait cycle failed: {0}")]
    Gait(GaitError),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Intent {
    /// The gait cycle this intent demands, or `None` if it ends the loop.
    pub fn gait(self) -> Option<GaitKind> {
        match self {
            Intent::Up => Some(GaitKind::Forward),
            Intent::Down => Some(GaitKind::Backward),
            Intent::Right => Some(GaitKind::SpinRight),
            Intent::Left => Some(GaitKind::SpinLeft),
            Intent::Other => None,
        }
    }
}

impl From<IntentError> for CmdLoopError {
    fn from(e: IntentError) -> Self {
        CmdLoopError::Intent(e)
    }
}

impl From<GaitError> for CmdLoopError {
    fn from(e: GaitError) -> Self {
        CmdLoopError::Gait(e)
    }
}

// ------------------------------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Run gait cycles until the operator gives an intent with no gait.
///
/// Returns the number of cycles completed. Any error ends the loop immediately.
pub fn run<I, D, S>(
    source: &mut I,
    sequencer: &mut GaitSequencer<D, S>,
) -> Result<usize, CmdLoopError>
where
    I: IntentSource,
    D: ServoDriver,
    S: Settle,
{
    let mut num_cycles = 0;

    loop {
        let intent = source.next_intent()?;

        debug!("Intent: {:?}", intent);

        match intent.gait() {
            Some(kind) => {
                sequencer.run(kind)?;
                num_cycles += 1;
            }
            None => break,
        }
    }

    info!("Command loop exited after {} cycles", num_cycles);

    Ok(num_cycles)
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
