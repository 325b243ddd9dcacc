// SPDX-License-Identifier: CC0-1.0

//! Consensus.
//!
//! This module defines structures, functions, and traits that are needed to
//! conform to the consensus rules of the Stredle chains.
//!

pub mod encode;
pub mod params;

pub use self::encode::{serialize, Encodable, VarInt};
pub use self::params::Params;
