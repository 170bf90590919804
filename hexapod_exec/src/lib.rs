//! # Hexapod library.
//!
//! Gait control for the six legged robot: the position table, servo control, gait sequencing and
//! the operator command loop. Used by the `hexapod_exec` binary.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Command loop - maps operator intents onto gait cycles
pub mod cmd_loop;

/// Gait control - the phased joint demands of each locomotion cycle
pub mod gait;

/// Keyboard input - arrow keys as operator intents
pub mod keyboard;

/// Parameters for the hexapod executable
pub mod params;

/// Position table - duty cycles of each joint's named positions
pub mod position_table;

/// Servo control - sends joint demands to the servo board
pub mod servo_ctrl;

#[cfg(test)]
mod mock;
