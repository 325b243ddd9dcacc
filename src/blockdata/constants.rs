// SPDX-License-Identifier: CC0-1.0

//! Blockdata constants
//!
//! This module provides various constants relating to the blockchain and
//! consensus code. In particular, it defines the genesis block and its
//! single transaction.
//!

use hashes::Hash;
use hex_lit::hex;

use crate::blockdata::block::{Block, BlockHeader, Version};
use crate::blockdata::opcodes::all::OP_CHECKSIG;
use crate::blockdata::script::{self, Script, MAX_SCRIPT_ELEMENT_SIZE};
use crate::blockdata::transaction::{OutPoint, Transaction, TxIn, TxOut, MAX_SEQUENCE};
use crate::error::Error;
use crate::hash_types::{BlockHash, TxMerkleNode};

/// How many satoshis are in "one coin".
pub const COIN_VALUE: u64 = 100_000_000;
/// The message embedded in every Stredle genesis coinbase.
pub const GENESIS_MESSAGE: &str = "Stredle Embedded Message";
/// Consensus bounds on the size of a coinbase input script.
pub const COINBASE_SCRIPT_SIZE: std::ops::RangeInclusive<usize> = 2..=100;

/// The output script of every Stredle genesis coinbase.
pub fn genesis_output_script() -> Script {
    let key = hex!("4d267621c4944bbe03686c82023d22f8399179a7790baaa6166b1b19cb900e6a58a8066a074da15eab8b0eb5f1b94859b921884fdffcff1e431151dae3a7d0a762");
    script::Builder::new().push_slice(&key).push_opcode(OP_CHECKSIG).into_script()
}

/// Inputs to the construction of a genesis block.
///
/// The block has exactly one coinbase transaction whose input script
/// carries `message` and whose single output pays `reward` to
/// `output_script`. That output was never in the UTXO set and cannot be
/// spent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenesisBuilder {
    /// Text embedded in the coinbase input script.
    pub message: Vec<u8>,
    /// Script the coinbase output pays to.
    pub output_script: Script,
    /// Block timestamp.
    pub time: u32,
    /// Block nonce.
    pub nonce: u32,
    /// Compact difficulty target.
    pub bits: u32,
    /// Block version.
    pub version: i32,
    /// Coinbase output value in satoshis.
    pub reward: u64,
}

impl GenesisBuilder {
    /// A builder using the Stredle genesis message and output script.
    pub fn new(time: u32, nonce: u32, bits: u32, version: i32, reward: u64) -> GenesisBuilder {
        GenesisBuilder {
            message: GENESIS_MESSAGE.as_bytes().to_vec(),
            output_script: genesis_output_script(),
            time,
            nonce,
            bits,
            version,
            reward,
        }
    }

    /// Constructs the coinbase (and only) transaction of the genesis block.
    pub fn coinbase(&self) -> Result<Transaction, Error> {
        if self.message.len() > MAX_SCRIPT_ELEMENT_SIZE {
            return Err(Error::GenesisMessageTooLong(self.message.len()));
        }

        let in_script = script::Builder::new()
            .push_scriptint(486604799)
            .push_scriptint(4)
            .push_slice(&self.message)
            .into_script();
        if !COINBASE_SCRIPT_SIZE.contains(&in_script.len()) {
            return Err(Error::CoinbaseScriptSize(in_script.len()));
        }

        Ok(Transaction {
            version: 1,
            input: vec![TxIn {
                previous_output: OutPoint::null(),
                script_sig: in_script,
                sequence: MAX_SEQUENCE,
            }],
            output: vec![TxOut { value: self.reward, script_pubkey: self.output_script.clone() }],
            lock_time: 0,
        })
    }

    /// Constructs the genesis block.
    pub fn build(&self) -> Result<Block, Error> {
        let txdata = vec![self.coinbase()?];
        let merkle_root = txdata[0].txid().into();
        Ok(Block {
            header: BlockHeader {
                version: Version::from_consensus(self.version),
                prev_blockhash: BlockHash::all_zeros(),
                merkle_root,
                time: self.time,
                bits: self.bits,
                nonce: self.nonce,
            },
            txdata,
        })
    }
}

/// Checks a constructed genesis block against its pinned hash and merkle root.
pub fn verify_genesis(
    genesis: &Block,
    expected_hash: BlockHash,
    expected_merkle_root: TxMerkleNode,
) -> Result<(), Error> {
    let hash = genesis.block_hash();
    let merkle_root = genesis.header.merkle_root;
    if hash != expected_hash || merkle_root != expected_merkle_root {
        return Err(Error::GenesisMismatch {
            hash,
            merkle_root,
            expected_hash,
            expected_merkle_root,
        });
    }
    Ok(())
}
