// SPDX-License-Identifier: CC0-1.0

//! Stredle transactions.
//!
//! A transaction describes a transfer of money. It consumes previously-unspent
//! transaction outputs and produces new ones, satisfying the condition to spend
//! the old outputs (typically a digital signature with a specific key must be
//! provided) and defining the condition to spend the new ones.
//!
//! The types here carry just enough structure to build and identify a
//! coinbase transaction; witness data is not modelled.
//!

use hashes::Hash;

use crate::blockdata::script::Script;
use crate::consensus::encode::serialize;
use crate::hash_types::Txid;

/// The maximum allowable sequence number.
pub const MAX_SEQUENCE: u32 = 0xFFFFFFFF;

/// A reference to a transaction output.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct OutPoint {
    /// The referenced transaction's txid.
    pub txid: Txid,
    /// The index of the referenced output in its transaction's vout.
    pub vout: u32,
}
impl_consensus_encoding!(OutPoint, txid, vout);

impl OutPoint {
    /// Creates a new [`OutPoint`].
    #[inline]
    pub fn new(txid: Txid, vout: u32) -> OutPoint { OutPoint { txid, vout } }

    /// Creates a "null" `OutPoint`.
    ///
    /// This value is used for coinbase transactions because they don't have any previous outputs.
    #[inline]
    pub fn null() -> OutPoint { OutPoint { txid: Hash::all_zeros(), vout: u32::MAX } }

    /// Checks if an `OutPoint` is "null".
    #[inline]
    pub fn is_null(&self) -> bool { *self == OutPoint::null() }
}

impl Default for OutPoint {
    fn default() -> Self { OutPoint::null() }
}

/// A transaction input, which defines old coins to be consumed
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub struct TxIn {
    /// The reference to the previous output that is being used an an input.
    pub previous_output: OutPoint,
    /// The script which pushes values on the stack which will cause
    /// the referenced output's script to be accepted.
    pub script_sig: Script,
    /// The sequence number, which suggests to miners which of two
    /// conflicting transactions should be preferred, or 0xFFFFFFFF
    /// to ignore this feature. This is generally never used since
    /// the miner behaviour cannot be enforced.
    pub sequence: u32,
}
impl_consensus_encoding!(TxIn, previous_output, script_sig, sequence);

/// A transaction output, which defines new coins to be created from old ones.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub struct TxOut {
    /// The value of the output, in satoshis.
    pub value: u64,
    /// The script which must be satisfied for the output to be spent.
    pub script_pubkey: Script,
}
impl_consensus_encoding!(TxOut, value, script_pubkey);

/// A Stredle transaction, which describes an authenticated movement of coins.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub struct Transaction {
    /// The protocol version, is currently expected to be 1 or 2 (BIP 68).
    pub version: i32,
    /// List of transaction inputs.
    pub input: Vec<TxIn>,
    /// List of transaction outputs.
    pub output: Vec<TxOut>,
    /// Block number before which this transaction is valid, or 0 for valid immediately.
    pub lock_time: u32,
}
impl_consensus_encoding!(Transaction, version, input, output, lock_time);

impl Transaction {
    /// Computes the txid, the double SHA256 of the serialized transaction.
    pub fn txid(&self) -> Txid { Txid::hash(&serialize(self)) }

    /// Is this a coin base transaction?
    ///
    /// A coinbase has exactly one input, and that input spends the null outpoint.
    pub fn is_coin_base(&self) -> bool {
        self.input.len() == 1 && self.input[0].previous_output.is_null()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockdata::script::Builder;

    #[test]
    fn outpoint_null() {
        let null = OutPoint::null();
        assert!(null.is_null());
        assert_eq!(null.vout, u32::MAX);
        assert_eq!(null.txid, Txid::all_zeros());
        assert_eq!(OutPoint::default(), null);
        assert!(!OutPoint::new(Txid::all_zeros(), 0).is_null());
        assert_eq!(serialize(&null).len(), 36);
    }

    #[test]
    fn coinbase_detection() {
        let mut tx = Transaction {
            version: 1,
            input: vec![TxIn {
                previous_output: OutPoint::null(),
                script_sig: Builder::new().push_int(42).into_script(),
                sequence: MAX_SEQUENCE,
            }],
            output: vec![],
            lock_time: 0,
        };
        assert!(tx.is_coin_base());

        tx.input[0].previous_output.vout = 0;
        assert!(!tx.is_coin_base());
    }

    #[test]
    fn txid_depends_on_content() {
        let tx = Transaction { version: 1, input: vec![], output: vec![], lock_time: 0 };
        let mut other = tx.clone();
        other.lock_time = 1;
        assert_eq!(serialize(&tx), vec![1, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert_ne!(tx.txid(), other.txid());
        assert_eq!(tx.txid(), tx.clone().txid());
    }
}
