//! # Communications interface crate.
//!
//! Provides all common communications interfaces for the hexapod software.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Identifiers for equipment driven over the network (like the hexapod's joint servos)
pub mod eqpt;

/// Open Sound Control message codec
pub mod osc;

/// Network module
pub mod net;
