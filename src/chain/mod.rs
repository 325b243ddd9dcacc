// SPDX-License-Identifier: CC0-1.0

//! Chain selection.
//!
//! Everything that depends on which Stredle network a node runs on: the
//! per-network parameter sets, the registry that installs one of them for
//! the life of the process, and the checkpoint guard built on top.
//!

pub mod checkpoints;
pub mod params;
pub mod registry;
