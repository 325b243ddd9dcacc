// SPDX-License-Identifier: CC0-1.0

//! Error types for chain parameter operations.

use crate::consensus::params::Deployment;
use crate::hash_types::{BlockHash, TxMerkleNode};
use crate::network::constants::{Network, ParseNetworkError};

/// A general error code, other errors should implement conversions to/from this
/// if appropriate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The network identifier is not one of `main`, `test` or `regtest`.
    #[error(transparent)]
    UnknownNetwork(#[from] ParseNetworkError),

    /// Parameters for a different network have already been installed.
    #[error("chain parameters for {active} are already active, cannot select {requested}")]
    AlreadySelected {
        /// Network whose parameters are installed.
        active: Network,
        /// Network the caller asked for.
        requested: Network,
    },

    /// The genesis coinbase message does not fit in a single script push.
    #[error("genesis message is {0} bytes, above the 520 byte push limit")]
    GenesisMessageTooLong(usize),

    /// The genesis coinbase script is outside the 2..=100 byte consensus range.
    #[error("coinbase script is {0} bytes, outside the 2..=100 byte range")]
    CoinbaseScriptSize(usize),

    /// The computed genesis block does not match the pinned constants.
    #[error(
        "genesis mismatch: computed hash {hash} merkle root {merkle_root}, \
         expected hash {expected_hash} merkle root {expected_merkle_root}"
    )]
    GenesisMismatch {
        /// Hash of the block that was built.
        hash: BlockHash,
        /// Merkle root of the block that was built.
        merkle_root: TxMerkleNode,
        /// Pinned genesis hash.
        expected_hash: BlockHash,
        /// Pinned genesis merkle root.
        expected_merkle_root: TxMerkleNode,
    },

    /// A deployment window would start after it times out.
    #[error("deployment window for {0} starts after its timeout")]
    InvalidDeploymentWindow(Deployment),
}

/// Result type for chain parameter operations.
pub type Result<T> = std::result::Result<T, Error>;
