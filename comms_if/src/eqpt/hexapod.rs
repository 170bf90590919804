//! # Hexapod Equipment Identifiers
//!
//! Channel assignment of the servos on the hexapod (underside view). Each leg carries a hip servo
//! which strokes the leg forwards/backwards and a knee servo which lifts/lowers the foot.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use std::fmt;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Number of legs on the hexapod.
pub const NUM_LEGS: usize = 6;

/// Number of servo actuators on the hexapod.
pub const NUM_ACTUATORS: usize = 2 * NUM_LEGS;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// IDs of all servo actuators on the hexapod, in output channel order.
///
/// The output channel of an actuator is its ordinal plus one, so `LeftFrontHip` is driven on
/// channel 1 and `RightBackKnee` on channel 12.
#[derive(Serialize, Deserialize, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Copy, Clone)]
pub enum ActId {
    LeftFrontHip,
    LeftFrontKnee,
    LeftMiddleHip,
    LeftMiddleKnee,
    LeftBackHip,
    LeftBackKnee,
    RightFrontHip,
    RightFrontKnee,
    RightMiddleHip,
    RightMiddleKnee,
    RightBackHip,
    RightBackKnee,
}

/// The legs of the hexapod.
#[derive(Serialize, Deserialize, Debug, Hash, Eq, PartialEq, Copy, Clone)]
pub enum Leg {
    LeftFront,
    LeftMiddle,
    LeftBack,
    RightFront,
    RightMiddle,
    RightBack,
}

/// The kind of joint an actuator drives.
#[derive(Serialize, Deserialize, Debug, Eq, PartialEq, Copy, Clone)]
pub enum JointKind {
    /// Strokes the leg forwards or backwards
    Hip,

    /// Lifts or lowers the foot
    Knee,
}

/// The two alternating groups of three legs used by a tripod gait.
#[derive(Serialize, Deserialize, Debug, Eq, PartialEq, Copy, Clone)]
pub enum Tripod {
    /// `LeftFront`, `LeftBack` and `RightMiddle`
    A,

    /// `RightFront`, `RightBack` and `LeftMiddle`
    B,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl ActId {
    /// All actuators in channel order.
    pub const ALL: [ActId; NUM_ACTUATORS] = [
        ActId::LeftFrontHip,
        ActId::LeftFrontKnee,
        ActId::LeftMiddleHip,
        ActId::LeftMiddleKnee,
        ActId::LeftBackHip,
        ActId::LeftBackKnee,
        ActId::RightFrontHip,
        ActId::RightFrontKnee,
        ActId::RightMiddleHip,
        ActId::RightMiddleKnee,
        ActId::RightBackHip,
        ActId::RightBackKnee,
    ];

    /// Zero based index of the actuator.
    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// The output channel number of this actuator, in the range 1 to 12.
    pub fn channel(self) -> u8 {
        self as u8 + 1
    }

    /// Even ordinals are hips, odd ordinals are knees.
    pub fn kind(self) -> JointKind {
        match self.ordinal() % 2 {
            0 => JointKind::Hip,
            _ => JointKind::Knee,
        }
    }

    /// The leg this actuator belongs to.
    pub fn leg(self) -> Leg {
        Leg::ALL[self.ordinal() / 2]
    }
}

impl Leg {
    /// All legs, left side first, front to back.
    pub const ALL: [Leg; NUM_LEGS] = [
        Leg::LeftFront,
        Leg::LeftMiddle,
        Leg::LeftBack,
        Leg::RightFront,
        Leg::RightMiddle,
        Leg::RightBack,
    ];

    pub fn ordinal(self) -> usize {
        self as usize
    }

    pub fn hip(self) -> ActId {
        ActId::ALL[self.ordinal() * 2]
    }

    pub fn knee(self) -> ActId {
        ActId::ALL[self.ordinal() * 2 + 1]
    }

    pub fn is_left(self) -> bool {
        self.ordinal() < 3
    }

    /// The tripod group this leg walks with.
    pub fn tripod(self) -> Tripod {
        match self {
            Leg::LeftFront | Leg::LeftBack | Leg::RightMiddle => Tripod::A,
            Leg::RightFront | Leg::RightBack | Leg::LeftMiddle => Tripod::B,
        }
    }
}

impl fmt::Display for ActId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} (ch {})", self, self.channel())
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
