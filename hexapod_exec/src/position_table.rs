//! # Position Table
//!
//! Maps the discrete named positions of a joint onto the PWM duty cycle which drives that joint's
//! servo there. Hip servos only have `Forward`/`Backward` positions and knee servos only have
//! `Up`/`Down`, every other cell of the table is unreachable.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::eqpt::hexapod::{ActId, JointKind, NUM_ACTUATORS};
use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Number of named positions.
pub const NUM_POSITIONS: usize = 4;

// Shorthands for building the default table
const U: Cell = Cell::Unreachable;
const fn d(duty_percent: f32) -> Cell {
    Cell::Duty(duty_percent)
}

/// Duty cycles (as percentages) for the servos of the hexapod, indexed by `[Position][ActId]`.
const DEFAULT_CELLS: [[Cell; NUM_ACTUATORS]; NUM_POSITIONS] = [
    [d(3.0), U, d(6.5), U, d(4.0),  U, d(9.0), U, d(8.5), U, d(9.0), U], // Hip forward
    [d(9.0), U, d(8.0), U, d(10.0), U, d(3.0), U, d(7.0), U, d(4.5), U], // Hip backward
    [U, d(4.5), U, d(5.0), U, d(4.5), U, d(4.5), U, d(4.5), U, d(4.5)], // Knee up
    [U, d(8.5), U, d(8.5), U, d(8.5), U, d(8.5), U, d(8.5), U, d(8.5)], // Knee down
];

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Lookup table from `(Position, ActId)` to the duty cycle of the servo.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionTable {
    cells: [[Cell; NUM_ACTUATORS]; NUM_POSITIONS],
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Discrete position of a servo.
#[derive(Serialize, Deserialize, Debug, Hash, Eq, PartialEq, Copy, Clone)]
pub enum Position {
    Forward,
    Backward,
    Up,
    Down,
}

/// A single cell of the table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell {
    /// The duty cycle, as a percentage, which puts the servo in the position
    Duty(f32),

    /// The position is not valid for the joint and must never be commanded
    Unreachable,
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum PositionError {
    #[error("{position:?} is not a valid position for {act_id} (a {kind:?} joint)")]
    Unreachable {
        position: Position,
        act_id: ActId,
        kind: JointKind,
    },

    #[error("Duty cycle for {position:?} of {act_id} is {duty}, which is not a percentage")]
    InvalidDuty {
        position: Position,
        act_id: ActId,
        duty: f32,
    },
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl PositionTable {
    /// Create a table from explicit cells, indexed by `[Position][ActId]`.
    pub fn new(cells: [[Cell; NUM_ACTUATORS]; NUM_POSITIONS]) -> Self {
        Self { cells }
    }

    /// The cells of the table, indexed by `[Position][ActId]`.
    pub fn cells(&self) -> &[[Cell; NUM_ACTUATORS]; NUM_POSITIONS] {
        &self.cells
    }

    /// Resolve the duty cycle which puts the given actuator into the given position.
    ///
    /// Returns an error if the position is not valid for the actuator's joint kind. This is a
    /// configuration error: correctly built gait cycles never request such a position.
    pub fn resolve(&self, position: Position, act_id: ActId) -> Result<f32, PositionError> {
        match self.cells[position.ordinal()][act_id.ordinal()] {
            Cell::Duty(duty) if duty.is_finite() && (0.0..=100.0).contains(&duty) => Ok(duty),
            Cell::Duty(duty) => Err(PositionError::InvalidDuty {
                position,
                act_id,
                duty,
            }),
            Cell::Unreachable => Err(PositionError::Unreachable {
                position,
                act_id,
                kind: act_id.kind(),
            }),
        }
    }
}

impl Default for PositionTable {
    fn default() -> Self {
        Self::new(DEFAULT_CELLS)
    }
}

impl Position {
    pub const ALL: [Position; NUM_POSITIONS] = [
        Position::Forward,
        Position::Backward,
        Position::Up,
        Position::Down,
    ];

    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// The joint kind this position applies to.
    pub fn joint_kind(self) -> JointKind {
        match self {
            Position::Forward | Position::Backward => JointKind::Hip,
            Position::Up | Position::Down => JointKind::Knee,
        }
    }

    /// The opposite position of the same joint kind.
    pub fn inverse(self) -> Self {
        match self {
            Position::Forward => Position::Backward,
            Position::Backward => Position::Forward,
            Position::Up => Position::Down,
            Position::Down => Position::Up,
        }
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_valid_cells_resolve() {
        let table = PositionTable::default();

        for act_id in ActId::ALL.iter() {
            for position in Position::ALL.iter() {
                let result = table.resolve(*position, *act_id);

                if position.joint_kind() == act_id.kind() {
                    let duty = result.expect("valid cell should resolve");
                    assert!(duty.is_finite());
                    assert!(duty >= 0.0 && duty <= 100.0);
                } else {
                    assert_eq!(
                        result,
                        Err(PositionError::Unreachable {
                            position: *position,
                            act_id: *act_id,
                            kind: act_id.kind()
                        })
                    );
                }
            }
        }
    }

    #[test]
    fn test_known_values() -> Result<(), PositionError> {
        let table = PositionTable::default();

        assert_eq!(table.resolve(Position::Forward, ActId::LeftFrontHip)?, 3.0);
        assert_eq!(table.resolve(Position::Up, ActId::LeftFrontKnee)?, 4.5);
        assert_eq!(table.resolve(Position::Up, ActId::LeftMiddleKnee)?, 5.0);
        assert_eq!(table.resolve(Position::Backward, ActId::LeftBackHip)?, 10.0);
        assert_eq!(table.resolve(Position::Backward, ActId::RightBackHip)?, 4.5);
        assert_eq!(table.resolve(Position::Down, ActId::RightBackKnee)?, 8.5);

        Ok(())
    }

    #[test]
    fn test_inconsistent_lookup_rejected() {
        let table = PositionTable::default();

        assert!(table.resolve(Position::Up, ActId::LeftFrontHip).is_err());
        assert!(table.resolve(Position::Forward, ActId::RightBackKnee).is_err());
    }

    #[test]
    fn test_non_percentage_rejected() {
        let mut cells = DEFAULT_CELLS;
        cells[Position::Forward.ordinal()][ActId::LeftFrontHip.ordinal()] =
            Cell::Duty(std::f32::NAN);
        cells[Position::Down.ordinal()][ActId::LeftFrontKnee.ordinal()] = Cell::Duty(101.0);
        let table = PositionTable::new(cells);

        assert!(matches!(
            table.resolve(Position::Forward, ActId::LeftFrontHip),
            Err(PositionError::InvalidDuty { .. })
        ));
        assert!(matches!(
            table.resolve(Position::Down, ActId::LeftFrontKnee),
            Err(PositionError::InvalidDuty { .. })
        ));
    }

    #[test]
    fn test_inverse() {
        for position in Position::ALL.iter() {
            assert_eq!(position.inverse().inverse(), *position);
            assert_eq!(position.inverse().joint_kind(), position.joint_kind());
            assert_ne!(position.inverse(), *position);
        }
    }
}
