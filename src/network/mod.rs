// SPDX-License-Identifier: CC0-1.0

//! Network Support
//!
//! This module defines the identities of the Stredle networks as seen by
//! peers: the network names and the magic bytes prefixed to every message.
//!

pub mod constants;
