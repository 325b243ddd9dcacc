// SPDX-License-Identifier: CC0-1.0

//! Stredle blocks.
//!
//! A block is a bundle of transactions with a proof-of-work attached,
//! which commits to an earlier block to form the blockchain. This
//! module describes structures and functions needed to describe
//! these blocks and the blockchain.
//!

use std::{fmt, io};

use hashes::{sha256d, Hash};

use crate::blockdata::transaction::Transaction;
use crate::consensus::encode::{serialize, Encodable};
use crate::hash_types::{BlockHash, TxMerkleNode};

/// Stredle block header.
///
/// Contains all the block's information except the actual transactions, but
/// including a root of a merkle tree commiting to all transactions in the block.
#[derive(PartialEq, Eq, Clone, Copy, PartialOrd, Ord, Hash)]
pub struct BlockHeader {
    /// Block version, now repurposed for soft fork signalling.
    pub version: Version,
    /// Reference to the previous block in the chain.
    pub prev_blockhash: BlockHash,
    /// The root hash of the merkle tree of transactions in the block.
    pub merkle_root: TxMerkleNode,
    /// The timestamp of the block, as claimed by the miner.
    pub time: u32,
    /// The target value below which the blockhash must lie, encoded as a
    /// a float (with well-defined rounding, of course).
    pub bits: u32,
    /// The nonce, selected to obtain a low enough blockhash.
    pub nonce: u32,
}
impl_consensus_encoding!(BlockHeader, version, prev_blockhash, merkle_root, time, bits, nonce);

impl BlockHeader {
    /// The number of bytes that the block header contributes to the size of a block.
    // Serialized length of fields (version, prev_blockhash, merkle_root, time, bits, nonce)
    pub const SIZE: usize = 4 + 32 + 32 + 4 + 4 + 4; // 80

    /// Returns the block hash.
    pub fn block_hash(&self) -> BlockHash { BlockHash::hash(&serialize(self)) }
}

impl fmt::Debug for BlockHeader {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("BlockHeader")
            .field("block_hash", &self.block_hash())
            .field("version", &self.version)
            .field("prev_blockhash", &self.prev_blockhash)
            .field("merkle_root", &self.merkle_root)
            .field("time", &self.time)
            .field("bits", &format_args!("{:#010x}", self.bits))
            .field("nonce", &self.nonce)
            .finish()
    }
}

/// Stredle block version number.
///
/// Originally used as a protocol version, but repurposed for soft-fork signaling.
///
/// If version bits is being used the top three bits must be 001, this gives us a
/// useful range of [0x20000000...0x3FFFFFFF].
///
/// > When a block nVersion does not have top bits 001, it is treated as if all bits are 0 for the purposes of deployments.
#[derive(Copy, PartialEq, Eq, Clone, Debug, PartialOrd, Ord, Hash)]
pub struct Version(i32);

impl Version {
    /// The original Block v1.
    pub const ONE: Self = Self(1);

    /// BIP-34 Block v2.
    pub const TWO: Self = Self(2);

    /// BIP-9 compatible version number that does not signal for any softforks.
    pub const NO_SOFT_FORK_SIGNALLING: Self = Self(Self::USE_VERSION_BITS as i32);

    /// BIP-9 soft fork signal bits mask.
    const VERSION_BITS_MASK: u32 = 0x1FFF_FFFF;

    /// 32bit value starting with `001` to use version bits.
    const USE_VERSION_BITS: u32 = 0x2000_0000;

    /// Creates a [`Version`] from a signed 32 bit integer value.
    pub const fn from_consensus(v: i32) -> Self { Version(v) }

    /// Returns the inner `i32` value.
    pub const fn to_consensus(self) -> i32 { self.0 }

    /// Checks whether the version number is signalling a soft fork at the given bit.
    ///
    /// A block is signalling for a soft fork under BIP-9 if the first 3 bits are `001` and
    /// the version bit for the specific soft fork is toggled on.
    pub fn is_signalling_soft_fork(&self, bit: u8) -> bool {
        // Only bits [0, 28] inclusive are used for signalling.
        if bit > 28 {
            return false;
        }

        // To signal using version bits, the first three bits must be `001`.
        if (self.0 as u32) & !Self::VERSION_BITS_MASK != Self::USE_VERSION_BITS {
            return false;
        }

        // The bit is set if signalling a soft fork.
        (self.0 as u32 & Self::VERSION_BITS_MASK) & (1 << bit) > 0
    }
}

impl Default for Version {
    fn default() -> Version { Self::NO_SOFT_FORK_SIGNALLING }
}

impl Encodable for Version {
    fn consensus_encode<W: io::Write + ?Sized>(&self, w: &mut W) -> Result<usize, io::Error> {
        self.0.consensus_encode(w)
    }
}

/// A Stredle block, which is a collection of transactions with an attached
/// proof of work.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Block {
    /// The block header
    pub header: BlockHeader,
    /// List of transactions contained in the block
    pub txdata: Vec<Transaction>,
}
impl_consensus_encoding!(Block, header, txdata);

impl Block {
    /// Returns the block hash.
    pub fn block_hash(&self) -> BlockHash { self.header.block_hash() }

    /// Checks if merkle root of header matches merkle root of the transaction list.
    pub fn check_merkle_root(&self) -> bool {
        match self.compute_merkle_root() {
            Some(merkle_root) => self.header.merkle_root == merkle_root,
            None => false,
        }
    }

    /// Computes the transaction merkle root.
    ///
    /// Returns `None` for a block without transactions.
    pub fn compute_merkle_root(&self) -> Option<TxMerkleNode> {
        let hashes = self.txdata.iter().map(|tx| tx.txid().to_raw_hash());
        calculate_root(hashes).map(TxMerkleNode::from_raw_hash)
    }

    /// Returns the coinbase transaction, if one is present.
    pub fn coinbase(&self) -> Option<&Transaction> { self.txdata.first() }
}

/// Calculates the merkle root of an iterator of hashes.
///
/// An odd element at any level is paired with itself.
fn calculate_root<I>(hashes: I) -> Option<sha256d::Hash>
where
    I: Iterator<Item = sha256d::Hash>,
{
    let mut layer: Vec<sha256d::Hash> = hashes.collect();
    if layer.is_empty() {
        return None;
    }

    while layer.len() > 1 {
        layer = layer
            .chunks(2)
            .map(|pair| {
                let left = pair[0];
                let right = pair.get(1).copied().unwrap_or(left);
                let mut buf = Vec::with_capacity(64);
                buf.extend_from_slice(left.as_byte_array());
                buf.extend_from_slice(right.as_byte_array());
                sha256d::Hash::hash(&buf)
            })
            .collect();
    }
    layer.pop()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::sample_tx;

    #[test]
    fn header_size() {
        let header = BlockHeader {
            version: Version::ONE,
            prev_blockhash: BlockHash::all_zeros(),
            merkle_root: TxMerkleNode::all_zeros(),
            time: 0,
            bits: 0x207fffff,
            nonce: 0,
        };
        assert_eq!(serialize(&header).len(), BlockHeader::SIZE);
    }

    #[test]
    fn merkle_root_single_tx_is_txid() {
        let tx = sample_tx(1);
        let root = calculate_root(vec![tx.txid().to_raw_hash()].into_iter()).unwrap();
        assert_eq!(root, tx.txid().to_raw_hash());
        assert_eq!(calculate_root(Vec::new().into_iter()), None);
    }

    #[test]
    fn merkle_root_odd_count_duplicates_last() {
        let a = sample_tx(1).txid().to_raw_hash();
        let b = sample_tx(2).txid().to_raw_hash();
        let c = sample_tx(3).txid().to_raw_hash();

        let three = calculate_root(vec![a, b, c].into_iter()).unwrap();
        let four = calculate_root(vec![a, b, c, c].into_iter()).unwrap();
        assert_eq!(three, four);
        assert_ne!(three, calculate_root(vec![a, b].into_iter()).unwrap());
    }

    #[test]
    fn check_merkle_root() {
        let txdata = vec![sample_tx(7), sample_tx(8)];
        let mut block = Block {
            header: BlockHeader {
                version: Version::ONE,
                prev_blockhash: BlockHash::all_zeros(),
                merkle_root: TxMerkleNode::all_zeros(),
                time: 1,
                bits: 0x207fffff,
                nonce: 0,
            },
            txdata,
        };
        assert!(!block.check_merkle_root());
        block.header.merkle_root = block.compute_merkle_root().unwrap();
        assert!(block.check_merkle_root());

        block.txdata.clear();
        assert!(!block.check_merkle_root());
    }

    #[test]
    fn soft_fork_signalling() {
        for i in 0..31 {
            let version_int = (0x20000000u32 ^ 1 << i) as i32;
            let version = Version::from_consensus(version_int);
            if i < 29 {
                assert!(version.is_signalling_soft_fork(i));
            } else {
                assert!(!version.is_signalling_soft_fork(i));
            }
        }

        let segwit_signal = Version::from_consensus(0x20000000 ^ 1 << 1);
        assert!(!segwit_signal.is_signalling_soft_fork(0));
        assert!(segwit_signal.is_signalling_soft_fork(1));
        assert!(!segwit_signal.is_signalling_soft_fork(2));

        assert!(!Version::ONE.is_signalling_soft_fork(0));
        assert_eq!(Version::default(), Version::NO_SOFT_FORK_SIGNALLING);
    }
}
