// SPDX-License-Identifier: CC0-1.0

//! Internal helper functions for unit tests
//!
//!

use std::str::FromStr;

use hashes::Hash;

use crate::blockdata::script::Builder;
use crate::blockdata::transaction::{OutPoint, Transaction, TxIn, TxOut, MAX_SEQUENCE};
use crate::chain::checkpoints::BlockRef;
use crate::hash_types::BlockHash;

/// A coinbase-shaped transaction distinguished by `n`.
pub fn sample_tx(n: i64) -> Transaction {
    Transaction {
        version: 1,
        input: vec![TxIn {
            previous_output: OutPoint::null(),
            script_sig: Builder::new().push_int(n).into_script(),
            sequence: MAX_SEQUENCE,
        }],
        output: vec![TxOut { value: 50, script_pubkey: Builder::new().into_script() }],
        lock_time: 0,
    }
}

pub fn decode_hash(hash_hex: &str) -> BlockHash { BlockHash::from_str(hash_hex).unwrap() }

/// A block hash that no network pins, distinguished by `n`.
pub fn fake_hash(n: u8) -> BlockHash { BlockHash::hash(&[0xfe, n]) }

pub fn block_ref(hash: BlockHash, height: u32, chain_tx: u64, time: u32) -> BlockRef {
    BlockRef { hash, height, chain_tx, time }
}
