//! Gait cycle definitions
//!
//! Every cycle has the same four phases:
//!
//! 1. Lift tripod A, lower tripod B
//! 2. Stroke the hips
//! 3. Lower tripod A, lift tripod B
//! 4. Stroke the hips back the other way
//!
//! so a cycle is fully described by the hip stroke of each leg in phase 2.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use comms_if::eqpt::hexapod::{Leg, Tripod, NUM_LEGS};
use std::collections::HashSet;

use super::{Assignment, GaitError, GaitKind, NUM_PHASES};
use crate::position_table::Position::{self, Backward as B, Forward as F};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Phase 2 hip strokes in `Leg::ALL` order (LF, LM, LB, RF, RM, RB).
///
/// The hip servos are mirrored between the sides, so `Forward` on both sides of a tripod moves
/// the body one way. The spin cycles take the left side of one translation and the right side of
/// the other, turning the body on the spot.
const FORWARD_STROKE: [Position; NUM_LEGS] = [F, B, F, B, F, B];
const BACKWARD_STROKE: [Position; NUM_LEGS] = [B, F, B, F, B, F];
const SPIN_RIGHT_STROKE: [Position; NUM_LEGS] = [B, F, B, B, F, B];
const SPIN_LEFT_STROKE: [Position; NUM_LEGS] = [F, B, F, F, B, F];

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A batch of demands issued together, followed by the settling period.
#[derive(Debug, Clone, PartialEq)]
pub struct Phase {
    assignments: Vec<Assignment>,
}

/// An ordered sequence of phases producing one unit of locomotion.
#[derive(Debug, Clone, PartialEq)]
pub struct GaitCycle {
    pub kind: GaitKind,

    phases: Vec<Phase>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Phase {
    /// Create a new phase, checking no actuator is assigned twice.
    pub fn new(index: usize, assignments: Vec<Assignment>) -> Result<Self, GaitError> {
        let mut seen = HashSet::new();

        for a in assignments.iter() {
            if !seen.insert(a.act_id) {
                return Err(GaitError::ConflictingAssignment {
                    phase: index,
                    act_id: a.act_id,
                });
            }
        }

        Ok(Self { assignments })
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }
}

impl GaitCycle {
    /// Create a cycle from explicit phases.
    pub fn new(kind: GaitKind, phases: Vec<Phase>) -> Result<Self, GaitError> {
        if phases.is_empty() {
            return Err(GaitError::EmptyCycle(kind));
        }

        Ok(Self { kind, phases })
    }

    /// Build the standard tripod cycle for the given gait.
    pub fn tripod(kind: GaitKind) -> Result<Self, GaitError> {
        let stroke = kind.hip_stroke();

        let knees = |lift: Position| -> Vec<Assignment> {
            Leg::ALL
                .iter()
                .map(|leg| Assignment {
                    act_id: leg.knee(),
                    position: match leg.tripod() {
                        Tripod::A => lift,
                        Tripod::B => lift.inverse(),
                    },
                })
                .collect()
        };

        let hips = |invert: bool| -> Vec<Assignment> {
            Leg::ALL
                .iter()
                .zip(stroke.iter())
                .map(|(leg, pos)| Assignment {
                    act_id: leg.hip(),
                    position: if invert { pos.inverse() } else { *pos },
                })
                .collect()
        };

        let phases = vec![
            knees(Position::Up),
            hips(false),
            knees(Position::Down),
            hips(true),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, assignments)| Phase::new(i + 1, assignments))
        .collect::<Result<Vec<Phase>, GaitError>>()?;

        debug_assert_eq!(phases.len(), NUM_PHASES);

        Self::new(kind, phases)
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }
}

impl GaitKind {
    /// The phase 2 hip stroke of each leg, in `Leg::ALL` order.
    pub fn hip_stroke(self) -> [Position; NUM_LEGS] {
        match self {
            GaitKind::Forward => FORWARD_STROKE,
            GaitKind::Backward => BACKWARD_STROKE,
            GaitKind::SpinRight => SPIN_RIGHT_STROKE,
            GaitKind::SpinLeft => SPIN_LEFT_STROKE,
        }
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use comms_if::eqpt::hexapod::{ActId, JointKind};
    use std::collections::HashMap;

    fn tripod(kind: GaitKind) -> GaitCycle {
        GaitCycle::tripod(kind).expect("tripod cycles must build")
    }

    /// Positions demanded of the hips in the given phase, keyed by leg.
    fn hip_positions(cycle: &GaitCycle, phase: usize) -> HashMap<Leg, Position> {
        cycle.phases()[phase]
            .assignments()
            .iter()
            .filter(|a| a.act_id.kind() == JointKind::Hip)
            .map(|a| (a.act_id.leg(), a.position))
            .collect()
    }

    #[test]
    fn test_cycle_shape() {
        for kind in GaitKind::ALL.iter() {
            let cycle = tripod(*kind);

            assert_eq!(cycle.kind, *kind);
            assert_eq!(cycle.phases().len(), NUM_PHASES);

            for (i, phase) in cycle.phases().iter().enumerate() {
                // Knees move in phases 1 and 3, hips in 2 and 4
                let expected = if i % 2 == 0 { JointKind::Knee } else { JointKind::Hip };

                assert_eq!(phase.assignments().len(), NUM_LEGS);
                for a in phase.assignments() {
                    assert_eq!(a.act_id.kind(), expected);
                    assert_eq!(a.position.joint_kind(), expected);
                }

                // Rebuilding through the checked constructor must accept it
                assert!(Phase::new(i, phase.assignments().to_vec()).is_ok());
            }
        }
    }

    #[test]
    fn test_forward_matches_tripod_gait() {
        let cycle = tripod(GaitKind::Forward);

        let phase_1 = cycle.phases()[0].assignments();
        let knee = |act_id, position| Assignment { act_id, position };
        assert_eq!(phase_1[0], knee(ActId::LeftFrontKnee, Position::Up));
        assert_eq!(phase_1[1], knee(ActId::LeftMiddleKnee, Position::Down));
        assert_eq!(phase_1[4], knee(ActId::RightMiddleKnee, Position::Up));

        let phase_2 = hip_positions(&cycle, 1);
        assert_eq!(phase_2[&Leg::LeftFront], Position::Forward);
        assert_eq!(phase_2[&Leg::LeftMiddle], Position::Backward);
        assert_eq!(phase_2[&Leg::RightFront], Position::Backward);
        assert_eq!(phase_2[&Leg::RightMiddle], Position::Forward);

        // Tripod A legs always share a knee position, opposite to tripod B
        for phase in [0usize, 2].iter() {
            for a in cycle.phases()[*phase].assignments() {
                let other = cycle.phases()[*phase]
                    .assignments()
                    .iter()
                    .find(|b| b.act_id.leg().tripod() != a.act_id.leg().tripod())
                    .map(|b| b.position);
                assert_eq!(other, Some(a.position.inverse()));
            }
        }
    }

    #[test]
    fn test_phases_invert() {
        for kind in GaitKind::ALL.iter() {
            let cycle = tripod(*kind);

            for (lift, lower) in [(0usize, 2usize), (1, 3)].iter() {
                let a = cycle.phases()[*lift].assignments();
                let b = cycle.phases()[*lower].assignments();

                for (x, y) in a.iter().zip(b.iter()) {
                    assert_eq!(x.act_id, y.act_id);
                    assert_eq!(x.position.inverse(), y.position);
                }
            }
        }
    }

    #[test]
    fn test_backward_undoes_forward() {
        let forward = tripod(GaitKind::Forward);
        let backward = tripod(GaitKind::Backward);

        // Backward strokes each hip the opposite way to forward...
        let fwd_2 = hip_positions(&forward, 1);
        let bwd_2 = hip_positions(&backward, 1);
        for leg in Leg::ALL.iter() {
            assert_eq!(fwd_2[leg].inverse(), bwd_2[leg]);
        }

        // ...so forward's final hip positions are where backward starts stroking from, and
        // backward finishes where forward's first stroke went.
        assert_eq!(hip_positions(&forward, 3), bwd_2);
        assert_eq!(hip_positions(&backward, 3), fwd_2);
    }

    #[test]
    fn test_spins_mirror_sides() {
        let forward = hip_positions(&tripod(GaitKind::Forward), 1);
        let backward = hip_positions(&tripod(GaitKind::Backward), 1);
        let right = hip_positions(&tripod(GaitKind::SpinRight), 1);
        let left = hip_positions(&tripod(GaitKind::SpinLeft), 1);

        for leg in Leg::ALL.iter() {
            // Spin right walks the left side backwards and the right side forwards
            if leg.is_left() {
                assert_eq!(right[leg], backward[leg]);
                assert_eq!(left[leg], forward[leg]);
            } else {
                assert_eq!(right[leg], forward[leg]);
                assert_eq!(left[leg], backward[leg]);
            }

            assert_eq!(right[leg].inverse(), left[leg]);
        }

        // Knee lifts are shared with the translation cycles
        for kind in [GaitKind::SpinRight, GaitKind::SpinLeft].iter() {
            let spin = tripod(*kind);
            let fwd = tripod(GaitKind::Forward);
            assert_eq!(spin.phases()[0], fwd.phases()[0]);
            assert_eq!(spin.phases()[2], fwd.phases()[2]);
        }
    }

    #[test]
    fn test_conflicting_assignment_rejected() {
        let r = Phase::new(
            2,
            vec![
                Assignment { act_id: ActId::LeftFrontKnee, position: Position::Up },
                Assignment { act_id: ActId::LeftFrontKnee, position: Position::Down },
            ],
        );

        assert!(matches!(
            r,
            Err(GaitError::ConflictingAssignment { phase: 2, act_id: ActId::LeftFrontKnee })
        ));
        assert!(matches!(
            GaitCycle::new(GaitKind::Forward, vec![]),
            Err(GaitError::EmptyCycle(GaitKind::Forward))
        ));
    }
}
