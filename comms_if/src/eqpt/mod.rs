//! # Equipment Interface
//!
//! This module defines the identifiers of equipment which is addressed by the servers/clients.

// -----------------------------------------------------------------------------------------------
// MODULES
// -----------------------------------------------------------------------------------------------

pub mod hexapod;
