// SPDX-License-Identifier: CC0-1.0

//! Blockdata.
//!
//! This module defines structures and functions for storing the blocks and
//! transactions which make up the Stredle chains.
//!

pub mod block;
pub mod constants;
pub mod opcodes;
pub mod script;
pub mod transaction;
