// SPDX-License-Identifier: CC0-1.0

//! # Stredle Chain Parameters
//!
//! This is a library which defines the network identities of the Stredle
//! chains: the consensus rules, the genesis block each network starts from,
//! wire magic and address prefixes, and the checkpoint data used to guard
//! against deep reorganisations and to estimate sync progress.
//!
//! A node selects exactly one network at startup through a
//! [`ParameterRegistry`] and passes the resulting [`ChainParams`] by
//! reference to everything that needs it.
//!
//! ```rust
//! use stredle::{CheckpointConfig, CheckpointGuard, ParameterRegistry};
//!
//! let registry = ParameterRegistry::new();
//! let params = registry.select_network("main").unwrap();
//! assert_eq!(params.default_port(), 1253);
//!
//! let guard = CheckpointGuard::new(params, CheckpointConfig::default());
//! assert_eq!(guard.last_checkpoint_height(), Some(160_000));
//! ```
//!

// Experimental features we need
#![cfg_attr(all(test, feature = "unstable"), feature(test))]
// Coding conventions
#![forbid(unsafe_code)]
#![deny(non_upper_case_globals)]
#![deny(non_camel_case_types)]
#![deny(non_snake_case)]
#![deny(unused_mut)]
#![warn(missing_docs)]

// Re-exported dependencies.
pub extern crate bitcoin_hashes as hashes;

#[cfg(feature = "serde")]
#[macro_use]
extern crate serde;

#[cfg(target_pointer_width = "16")]
compile_error!("stredle cannot be used on 16-bit architectures");

#[cfg(test)]
mod test_helpers;
#[macro_use]
mod internal_macros;
pub mod blockdata;
pub mod chain;
pub mod consensus;
mod error;
pub mod hash_types;
pub mod network;

pub use crate::blockdata::block::{Block, BlockHeader};
pub use crate::blockdata::constants::GenesisBuilder;
pub use crate::blockdata::script::Script;
pub use crate::blockdata::transaction::{OutPoint, Transaction, TxIn, TxOut};
pub use crate::chain::checkpoints::{
    BlockIndex, BlockRef, CheckpointConfig, CheckpointGuard, CheckpointTable,
};
pub use crate::chain::params::{Base58Type, ChainParams, ChainTxData};
pub use crate::chain::registry::ParameterRegistry;
pub use crate::consensus::params::{Deployment, DeploymentWindow, Params, StartTime, Timeout};
pub use crate::error::{Error, Result};
pub use crate::hash_types::*;
pub use crate::network::constants::{Magic, Network, ParseNetworkError};
