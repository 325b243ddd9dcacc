// SPDX-License-Identifier: CC0-1.0

//! File defines types for hashes used throughout the library.
//!
//! These types are needed in order to avoid mixing data of the same hash
//! format (e.g. `SHA256d`) but of different meaning (such as transaction id,
//! block hash).
//!

use hashes::{hash_newtype, sha256d};

hash_newtype! {
    /// A stredle transaction hash/transaction ID.
    pub struct Txid(sha256d::Hash);

    /// A stredle block hash.
    pub struct BlockHash(sha256d::Hash);

    /// A hash of the Merkle tree branch or root for transactions.
    pub struct TxMerkleNode(sha256d::Hash);
}

impl_hashencode!(Txid);
impl_hashencode!(BlockHash);
impl_hashencode!(TxMerkleNode);

impl From<Txid> for TxMerkleNode {
    fn from(txid: Txid) -> Self { Self::from_raw_hash(txid.to_raw_hash()) }
}
