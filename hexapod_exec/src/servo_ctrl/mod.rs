//! # Servo Controller Module
//!
//! This module provides a unified servo control interface which can abstract over different types
//! of servo driver boards, and the controller which commands the hexapod's joints into named
//! positions through such a board.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// [`ServoDriver`] implementation for servo boards addressed with OSC messages over UDP.
pub mod osc;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::{eqpt::hexapod::ActId, net::NetError};
use log::trace;

use crate::position_table::{Position, PositionError, PositionTable};

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// Trait to provide a unified API for accessing servo driver boards.
pub trait ServoDriver {
    /// Set the duty cycle of a channel.
    ///
    /// ## Arguments
    /// - `channel` - The output channel to set the duty cycle for, starting at 1
    /// - `duty_percent` - The duty cycle to set. Must be a percentage between 0.0 and 100.0.
    ///   Values outside this range will be rejected.
    fn set_duty_cycle(&mut self, channel: u8, duty_percent: f32) -> Result<(), ServoError>;
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Commands the joints of the hexapod into named positions.
///
/// Each command is resolved into a duty cycle through the [`PositionTable`] and sent as a single
/// message on the actuator's channel. Sends are never retried, a lost command is superseded by
/// the next phase of the gait.
pub struct ServoCtrl<D: ServoDriver> {
    driver: D,

    table: PositionTable,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(thiserror::Error, Debug)]
pub enum ServoError {
    #[error("Could not send the demand to the servo board: {0}")]
    Transport(NetError),

    #[error("Duty cycle must be between 0.0 and 100.0, found {0}")]
    InvalidDutyCycle(f32),

    #[error("Invalid position demand: {0}")]
    Position(PositionError),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl<D: ServoDriver> ServoCtrl<D> {
    /// Create a new servo controller.
    ///
    /// ## Arguments
    /// - `driver` - An initialised [`ServoDriver`] board
    /// - `table` - The duty cycles of each joint's named positions
    pub fn new(driver: D, table: PositionTable) -> Self {
        Self { driver, table }
    }

    /// Move an actuator into a named position.
    pub fn command(&mut self, act_id: ActId, position: Position) -> Result<(), ServoError> {
        let duty = self.table.resolve(position, act_id)?;

        trace!("{} -> {:?} ({:.2} %)", act_id, position, duty);

        self.driver.set_duty_cycle(act_id.channel(), duty)
    }

    /// The position table used by this controller.
    pub fn table(&self) -> &PositionTable {
        &self.table
    }

    /// Consume the controller, returning the underlying driver.
    pub fn into_driver(self) -> D {
        self.driver
    }
}

impl From<NetError> for ServoError {
    fn from(e: NetError) -> Self {
        ServoError::Transport(e)
    }
}

impl From<PositionError> for ServoError {
    fn from(e: PositionError) -> Self {
        ServoError::Position(e)
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
