// SPDX-License-Identifier: CC0-1.0

//! Checkpoints
//!
//! Pinned block hashes veto competing chains at their heights and anchor
//! the sync progress estimate. A height without a checkpoint carries no
//! opinion: the guard can reject a block, never approve one.
//!

use std::collections::{BTreeMap, HashMap};
use std::iter::FromIterator;

use tracing::{debug, warn};

use crate::chain::params::ChainParams;
use crate::hash_types::BlockHash;

const SECONDS_PER_DAY: f64 = 24.0 * 60.0 * 60.0;

/// Block hashes pinned by height, ordered from lowest to highest.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CheckpointTable(BTreeMap<u32, BlockHash>);

impl CheckpointTable {
    /// The hash pinned at `height`, if any.
    pub fn get(&self, height: u32) -> Option<&BlockHash> { self.0.get(&height) }

    /// The highest checkpoint.
    pub fn last(&self) -> Option<(u32, &BlockHash)> {
        self.0.iter().next_back().map(|(height, hash)| (*height, hash))
    }

    /// Iterates over the checkpoints by increasing height.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (u32, &BlockHash)> + '_ {
        self.0.iter().map(|(height, hash)| (*height, hash))
    }

    /// Number of checkpoints.
    pub fn len(&self) -> usize { self.0.len() }

    /// Whether the table has no checkpoints.
    pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

impl FromIterator<(u32, BlockHash)> for CheckpointTable {
    fn from_iter<I: IntoIterator<Item = (u32, BlockHash)>>(iter: I) -> Self {
        CheckpointTable(iter.into_iter().collect())
    }
}

/// Node configuration for checkpoint handling.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CheckpointConfig {
    /// Whether checkpoints are enforced at all.
    pub enabled: bool,
    /// Cost of verifying one transaction after the last checkpoint,
    /// relative to one before it.
    pub sigcheck_verification_factor: f64,
}

impl CheckpointConfig {
    /// Checkpoints ignored entirely.
    pub fn disabled() -> CheckpointConfig { CheckpointConfig { enabled: false, ..Default::default() } }
}

impl Default for CheckpointConfig {
    fn default() -> Self { CheckpointConfig { enabled: true, sigcheck_verification_factor: 5.0 } }
}

/// What the block index knows about one block.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BlockRef {
    /// Hash of the block.
    pub hash: BlockHash,
    /// Height of the block.
    pub height: u32,
    /// Total number of transactions from genesis up to and including this block.
    pub chain_tx: u64,
    /// Block timestamp.
    pub time: u32,
}

/// Read access to the node's block index.
pub trait BlockIndex {
    /// Looks up a block by hash.
    fn lookup(&self, hash: &BlockHash) -> Option<&BlockRef>;
}

impl BlockIndex for HashMap<BlockHash, BlockRef> {
    fn lookup(&self, hash: &BlockHash) -> Option<&BlockRef> { self.get(hash) }
}

impl BlockIndex for BTreeMap<BlockHash, BlockRef> {
    fn lookup(&self, hash: &BlockHash) -> Option<&BlockRef> { self.get(hash) }
}

/// Checkpoint queries over one parameter set.
#[derive(Copy, Clone, Debug)]
pub struct CheckpointGuard<'a> {
    params: &'a ChainParams,
    config: CheckpointConfig,
}

impl<'a> CheckpointGuard<'a> {
    /// Creates a guard over the checkpoints of `params`.
    pub fn new(params: &'a ChainParams, config: CheckpointConfig) -> CheckpointGuard<'a> {
        CheckpointGuard { params, config }
    }

    /// Returns false only if a checkpoint pins a different hash at `height`.
    pub fn is_allowed(&self, height: u32, hash: &BlockHash) -> bool {
        if !self.config.enabled {
            return true;
        }
        match self.params.checkpoints().get(height) {
            None => true,
            Some(pinned) if pinned == hash => true,
            Some(pinned) => {
                warn!(network = %self.params.network(), height, %hash, %pinned, "block conflicts with checkpoint");
                false
            }
        }
    }

    /// Height of the highest checkpoint, a rough lower bound on chain length.
    pub fn last_checkpoint_height(&self) -> Option<u32> {
        if !self.config.enabled {
            return None;
        }
        self.params.checkpoints().last().map(|(height, _)| height)
    }

    /// The highest checkpoint block the index already knows about.
    pub fn resolve_last_checkpoint_block<'i, I>(&self, index: &'i I) -> Option<&'i BlockRef>
    where
        I: BlockIndex + ?Sized,
    {
        if !self.config.enabled {
            return None;
        }
        let found = self.params.checkpoints().iter().rev().find_map(|(_, hash)| index.lookup(hash));
        match found {
            Some(block) => debug!(height = block.height, hash = %block.hash, "resolved last checkpoint"),
            None => debug!("no checkpoint found in block index"),
        }
        found
    }

    /// Guesses how far verification has come, as a fraction in `[0, 1]`.
    ///
    /// Transactions up to the last known chain statistics count one unit
    /// each, later ones `sigcheck_verification_factor` units. The remaining
    /// work is extrapolated from the statistics' daily rate up to `now`.
    /// This is for display only.
    pub fn estimate_verification_progress(&self, block: Option<&BlockRef>, now: i64) -> f64 {
        let block = match block {
            Some(block) => block,
            None => return 0.0,
        };
        let data = self.params.chain_tx_data();
        let factor = self.config.sigcheck_verification_factor;
        let tx_count = data.tx_count as f64;
        let chain_tx = block.chain_tx as f64;

        let (before, after) = if block.chain_tx <= data.tx_count {
            let days = (now as f64 - data.time as f64) / SECONDS_PER_DAY;
            (chain_tx, (tx_count - chain_tx) + factor * days * data.tx_rate)
        } else {
            let days = (now as f64 - f64::from(block.time)) / SECONDS_PER_DAY;
            (tx_count + factor * (chain_tx - tx_count), factor * days * data.tx_rate)
        };

        let progress = before / (before + after);
        if progress.is_nan() {
            return 0.0;
        }
        progress.clamp(0.0, 1.0)
    }

    /// [`estimate_verification_progress`](Self::estimate_verification_progress)
    /// against the current system time.
    pub fn estimate_verification_progress_now(&self, block: Option<&BlockRef>) -> f64 {
        self.estimate_verification_progress(block, chrono::Utc::now().timestamp())
    }
}
