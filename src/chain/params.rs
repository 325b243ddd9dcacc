// SPDX-License-Identifier: CC0-1.0

//! Chain parameters
//!
//! One [`ChainParams`] bundles everything that makes a Stredle network
//! distinct: consensus rules, genesis block, wire magic, address prefixes,
//! seeds and checkpoints. The three networks are literal tables; building
//! one also rebuilds its genesis block and checks it against the pinned
//! hash and merkle root.
//!
//! What makes a good checkpoint block?
//! + Is surrounded by blocks with reasonable timestamps
//!   (no blocks before with a timestamp after, none after with
//!    timestamp before)
//! + Contains no strange transactions
//!

use std::str::FromStr;

use crate::blockdata::block::Block;
use crate::blockdata::constants::{verify_genesis, GenesisBuilder, COIN_VALUE};
use crate::chain::checkpoints::CheckpointTable;
use crate::consensus::params::Params;
use crate::hash_types::{BlockHash, TxMerkleNode};
use crate::network::constants::{Magic, Network};

/// Kinds of base58 encoded data, each with its own version prefix.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Base58Type {
    /// Pay to public key hash address.
    PubkeyAddress,
    /// Pay to script hash address.
    ScriptAddress,
    /// Pay to script hash address, alternative prefix.
    ScriptAddress2,
    /// WIF private key.
    SecretKey,
    /// BIP32 extended public key.
    ExtPublicKey,
    /// BIP32 extended private key.
    ExtSecretKey,
}

impl Base58Type {
    const fn index(self) -> usize {
        match self {
            Base58Type::PubkeyAddress => 0,
            Base58Type::ScriptAddress => 1,
            Base58Type::ScriptAddress2 => 2,
            Base58Type::SecretKey => 3,
            Base58Type::ExtPublicKey => 4,
            Base58Type::ExtSecretKey => 5,
        }
    }
}

/// Chain activity statistics used to estimate sync progress.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ChainTxData {
    /// UNIX timestamp of the last known block.
    pub time: i64,
    /// Total number of transactions between genesis and that block.
    pub tx_count: u64,
    /// Estimated number of transactions per day after that block.
    pub tx_rate: f64,
}

/// The complete, immutable parameter set of one Stredle network.
#[derive(Debug, Clone)]
pub struct ChainParams {
    network: Network,
    consensus: Params,
    magic: Magic,
    default_port: u16,
    prune_after_height: u32,
    genesis: Block,
    dns_seeds: &'static [&'static str],
    base58_prefixes: [&'static [u8]; 6],
    bech32_hrp: &'static str,
    checkpoints: CheckpointTable,
    chain_tx_data: ChainTxData,
    require_standard: bool,
    mine_blocks_on_demand: bool,
    default_consistency_checks: bool,
    fallback_fee_enabled: bool,
}

const MAIN_CHECKPOINTS: &[(u32, &str)] = &[
    (0, "ff3c710bf19a8d7d00b4436a8923016c542c58f5ab339cd612cbf00d52470561"),
    (10000, "1af15516a9c3a05fb439cc54adbd9904bf11497f4da7507dbd19f62d824d91e2"),
    (20000, "fb1edd2ee6f4e9b3c68d72e46df458f2ff862a5ff9714c7a3b08b1607a8ac6ba"),
    (30000, "6e342b9052bb076210ad81733c1720f1e0f25c82cbc22648cffc54325070a51b"),
    (40000, "e026e1f816cb07f9bca463c5db37ea246cab45e15d533aa60fd5f7a9dd77f6dc"),
    (50000, "a88881f495a0c2970b5abd5655616ba71c371698d8b1943f16ea5872065ad4bd"),
    (60000, "f2702ae7497ad9b5df93d1b9ade6560d56c9451b69bc07510c4861c3b2ad89d7"),
    (70000, "52a50c666199eeae9de4220ca1411e9a8c3d7463058b210b30d73ac605089508"),
    (80000, "9a17868b6e65c6454d7356119fbc675af63e9dca7e679075fc6c99e68bf0e2a9"),
    (90000, "c75a95644eeaca1b6233e91af4527b841ce80173b3a5b454e9abfdb91cae222b"),
    (100000, "95714bb047abc4349658e7ac55a2ec34fc22aa453f0eb1a8a7d970beb30a76cd"),
    (110000, "4bbfeee9d804f8eb2c3eeebdf0188f34defb97ba9b3f8f9cd384ba8792937815"),
    (120000, "c4b474c1682e5e4aff2fa07a3091229d07e59a0da28bad8ecffa9e147e21d8d1"),
    (130000, "86a6fa8debba33f448a5ed0222fb00e85e19cda442258d79326270897f0e4802"),
    (140000, "0bee08e5a78147129989cd859fc6fc01ddfe0b581782bb5c8eb709df99d3408b"),
    (150000, "92f686c632887470fa8a40b598f24654bc7926a6ab6911e8091378098bf59c28"),
    (160000, "27b7c5fc141dd464568546ed770c13ed8e8d2184d63d29a937a57126a19c552d"),
];

const TEST_CHECKPOINTS: &[(u32, &str)] =
    &[(2056, "17748a31ba97afdc9a4f86837a39d287e3e7c7290a08a1d816c5969c78a83289")];

const REGTEST_CHECKPOINTS: &[(u32, &str)] =
    &[(0, "d24dc405370f05b804693cd177c66627bfbfde0509971f722fa1460e37b6998e")];

impl ChainParams {
    /// Builds the parameter set for `network`.
    ///
    /// # Panics
    ///
    /// If the rebuilt genesis block does not match the pinned hash and merkle
    /// root, or the literal tables break their own invariants. Either means
    /// the compiled-in data is corrupt and no node should start with it.
    pub fn new(network: Network) -> ChainParams {
        let params = match network {
            Network::Main => ChainParams::main(),
            Network::Test => ChainParams::test(),
            Network::Regtest => ChainParams::regtest(),
        };
        params.check_invariants();
        params
    }

    fn main() -> ChainParams {
        let genesis = verified_genesis(
            Network::Main,
            GenesisBuilder::new(1521658424, 2084537496, 0x1f0640e5, 1, 65 * COIN_VALUE),
            "ff3c710bf19a8d7d00b4436a8923016c542c58f5ab339cd612cbf00d52470561",
            "05a545be21d52037236b2ef2e0aef2801054295601f8f16fbd2f1ecac73b440d",
        );
        let mut consensus = Params::new(Network::Main);
        consensus.hash_genesis_block = genesis.block_hash();

        ChainParams {
            network: Network::Main,
            consensus,
            magic: Magic::MAIN,
            default_port: 1253,
            prune_after_height: 100_000,
            genesis,
            dns_seeds: &["37.59.67.139"],
            base58_prefixes: [
                &[63],
                &[5],
                &[50],
                &[176],
                &[0x04, 0x88, 0xB2, 0x1E],
                &[0x04, 0x88, 0xAD, 0xE4],
            ],
            bech32_hrp: "ste",
            checkpoints: checkpoint_table(MAIN_CHECKPOINTS),
            chain_tx_data: ChainTxData { time: 1554480946, tx_count: 160017, tx_rate: 1.0 },
            require_standard: true,
            mine_blocks_on_demand: false,
            default_consistency_checks: false,
            fallback_fee_enabled: false,
        }
    }

    fn test() -> ChainParams {
        let genesis = verified_genesis(
            Network::Test,
            GenesisBuilder::new(1521658424, 385297657, 0x1f0640e5, 1, 65 * COIN_VALUE),
            "c9b7c4559b9f02d04ddcaf6f80b9df35e600734e66930d9c041e4823527d78ee",
            "05a545be21d52037236b2ef2e0aef2801054295601f8f16fbd2f1ecac73b440d",
        );
        let mut consensus = Params::new(Network::Test);
        consensus.hash_genesis_block = genesis.block_hash();

        ChainParams {
            network: Network::Test,
            consensus,
            magic: Magic::TEST,
            default_port: 25361,
            prune_after_height: 1000,
            genesis,
            dns_seeds: &[],
            base58_prefixes: [
                &[111],
                &[196],
                &[58],
                &[239],
                &[0x04, 0x35, 0x87, 0xCF],
                &[0x04, 0x35, 0x83, 0x94],
            ],
            bech32_hrp: "tltc",
            checkpoints: checkpoint_table(TEST_CHECKPOINTS),
            chain_tx_data: ChainTxData { time: 1538637952, tx_count: 1845705, tx_rate: 1.907 },
            require_standard: false,
            mine_blocks_on_demand: false,
            default_consistency_checks: false,
            fallback_fee_enabled: true,
        }
    }

    fn regtest() -> ChainParams {
        let genesis = verified_genesis(
            Network::Regtest,
            GenesisBuilder::new(1296688602, 0, 0x207fffff, 1, 50 * COIN_VALUE),
            "d24dc405370f05b804693cd177c66627bfbfde0509971f722fa1460e37b6998e",
            "0c03fd109b8b90227ae4a574c86790bb1926d2be386ac46010d2e68b23538e0a",
        );
        let mut consensus = Params::new(Network::Regtest);
        consensus.hash_genesis_block = genesis.block_hash();

        ChainParams {
            network: Network::Regtest,
            consensus,
            magic: Magic::REGTEST,
            default_port: 19444,
            prune_after_height: 1000,
            genesis,
            // Regtest mode doesn't have any DNS seeds.
            dns_seeds: &[],
            base58_prefixes: [
                &[111],
                &[196],
                &[58],
                &[239],
                &[0x04, 0x35, 0x87, 0xCF],
                &[0x04, 0x35, 0x83, 0x94],
            ],
            bech32_hrp: "rltc",
            checkpoints: checkpoint_table(REGTEST_CHECKPOINTS),
            chain_tx_data: ChainTxData { time: 0, tx_count: 0, tx_rate: 0.0 },
            require_standard: false,
            mine_blocks_on_demand: true,
            default_consistency_checks: true,
            fallback_fee_enabled: true,
        }
    }

    fn check_invariants(&self) {
        if let Some(deployment) = self.consensus.find_invalid_deployment() {
            panic!("{} deployment table is invalid at {}", self.network, deployment);
        }
        if let Some(hash) = self.checkpoints.get(0) {
            assert_eq!(
                *hash,
                self.genesis_hash(),
                "{} checkpoint at height 0 is not the genesis block",
                self.network
            );
        }
    }

    /// The network these parameters describe.
    pub fn network(&self) -> Network { self.network }

    /// Consensus rules of the network.
    pub fn consensus(&self) -> &Params { &self.consensus }

    #[cfg(any(test, feature = "test-harness"))]
    pub(crate) fn consensus_mut(&mut self) -> &mut Params { &mut self.consensus }

    /// Magic bytes prefixed to every wire message.
    pub fn magic(&self) -> Magic { self.magic }

    /// Default P2P listening port.
    pub fn default_port(&self) -> u16 { self.default_port }

    /// Blocks below this height are never pruned.
    pub fn prune_after_height(&self) -> u32 { self.prune_after_height }

    /// The genesis block.
    pub fn genesis_block(&self) -> &Block { &self.genesis }

    /// Hash of the genesis block.
    pub fn genesis_hash(&self) -> BlockHash { self.consensus.hash_genesis_block }

    /// Seed endpoints to bootstrap peer discovery.
    pub fn dns_seeds(&self) -> &[&'static str] { self.dns_seeds }

    /// Version prefix for base58 encoded data of the given kind.
    pub fn base58_prefix(&self, kind: Base58Type) -> &[u8] { self.base58_prefixes[kind.index()] }

    /// Human readable part of bech32 addresses.
    pub fn bech32_hrp(&self) -> &str { self.bech32_hrp }

    /// Pinned block hashes by height.
    pub fn checkpoints(&self) -> &CheckpointTable { &self.checkpoints }

    /// Chain activity statistics for progress estimation.
    pub fn chain_tx_data(&self) -> &ChainTxData { &self.chain_tx_data }

    /// Whether non-standard transactions are rejected by default.
    pub fn require_standard(&self) -> bool { self.require_standard }

    /// Whether blocks may be mined on demand.
    pub fn mine_blocks_on_demand(&self) -> bool { self.mine_blocks_on_demand }

    /// Whether expensive consistency checks run by default.
    pub fn default_consistency_checks(&self) -> bool { self.default_consistency_checks }

    /// Whether the fallback fee is enabled by default.
    pub fn fallback_fee_enabled(&self) -> bool { self.fallback_fee_enabled }
}

/// Builds a genesis block and checks it against its pins.
///
/// # Panics
///
/// On any mismatch: the pins and the builder inputs are compiled in together.
fn verified_genesis(
    network: Network,
    builder: GenesisBuilder,
    hash_hex: &str,
    merkle_root_hex: &str,
) -> Block {
    let genesis = match builder.build() {
        Ok(genesis) => genesis,
        Err(e) => panic!("{} genesis block cannot be built: {}", network, e),
    };
    let expected_hash = BlockHash::from_str(hash_hex).expect("hash literals are valid hex");
    let expected_merkle_root =
        TxMerkleNode::from_str(merkle_root_hex).expect("hash literals are valid hex");
    if let Err(e) = verify_genesis(&genesis, expected_hash, expected_merkle_root) {
        panic!("{} chain parameters are corrupt: {}", network, e);
    }
    genesis
}

fn checkpoint_table(entries: &[(u32, &str)]) -> CheckpointTable {
    entries
        .iter()
        .map(|(height, hash_hex)| {
            (*height, BlockHash::from_str(hash_hex).expect("hash literals are valid hex"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consensus::params::Deployment;

    #[test]
    fn main_params() {
        let params = ChainParams::new(Network::Main);
        assert_eq!(params.network(), Network::Main);
        assert_eq!(params.magic().to_bytes(), [0xa0, 0xcf, 0xc5, 0xc0]);
        assert_eq!(params.default_port(), 1253);
        assert_eq!(params.prune_after_height(), 100_000);
        assert_eq!(params.bech32_hrp(), "ste");
        assert_eq!(params.dns_seeds(), &["37.59.67.139"]);
        assert_eq!(params.base58_prefix(Base58Type::PubkeyAddress), &[63]);
        assert_eq!(params.base58_prefix(Base58Type::SecretKey), &[176]);
        assert_eq!(params.base58_prefix(Base58Type::ExtPublicKey), &[0x04, 0x88, 0xB2, 0x1E]);
        assert_eq!(params.consensus().subsidy_halving_interval, 580_000);
        assert_eq!(params.consensus().bip34_height, 160_035);
        assert!(params.require_standard());
        assert!(!params.mine_blocks_on_demand());
        assert!(!params.default_consistency_checks());
        assert!(!params.fallback_fee_enabled());
        assert_eq!(params.checkpoints().len(), 17);
        assert_eq!(params.chain_tx_data().tx_count, 160017);
    }

    #[test]
    fn test_params() {
        let params = ChainParams::new(Network::Test);
        assert_eq!(params.magic(), Magic::TEST);
        assert_eq!(params.default_port(), 25361);
        assert_eq!(params.bech32_hrp(), "tltc");
        assert!(params.dns_seeds().is_empty());
        assert_eq!(params.base58_prefix(Base58Type::ScriptAddress), &[196]);
        assert!(params.consensus().allow_min_difficulty_blocks);
        assert!(!params.require_standard());
        assert!(params.fallback_fee_enabled());
        assert_eq!(params.checkpoints().last().map(|(height, _)| height), Some(2056));
        assert_eq!(params.checkpoints().get(0), None);
    }

    #[test]
    fn regtest_params() {
        let params = ChainParams::new(Network::Regtest);
        assert_eq!(params.magic(), Magic::REGTEST);
        assert_eq!(params.default_port(), 19444);
        assert_eq!(params.bech32_hrp(), "rltc");
        assert_eq!(params.consensus().subsidy_halving_interval, 150);
        assert!(params.consensus().no_pow_retargeting);
        assert!(params.mine_blocks_on_demand());
        assert!(params.default_consistency_checks());
        assert!(params.consensus().deployment(Deployment::Segwit).is_always_active());
        assert_eq!(params.chain_tx_data().tx_rate, 0.0);
    }

    #[test]
    fn genesis_matches_pins_on_every_network() {
        let pins = [
            (Network::Main, "ff3c710bf19a8d7d00b4436a8923016c542c58f5ab339cd612cbf00d52470561"),
            (Network::Test, "c9b7c4559b9f02d04ddcaf6f80b9df35e600734e66930d9c041e4823527d78ee"),
            (Network::Regtest, "d24dc405370f05b804693cd177c66627bfbfde0509971f722fa1460e37b6998e"),
        ];
        for (network, hash) in pins.iter() {
            let first = ChainParams::new(*network);
            let second = ChainParams::new(*network);
            assert_eq!(first.genesis_hash().to_string(), *hash);
            assert_eq!(first.genesis_block().block_hash(), second.genesis_block().block_hash());
            assert_eq!(first.genesis_block(), second.genesis_block());
            assert!(first.genesis_block().check_merkle_root());
            assert_eq!(first.consensus().hash_genesis_block, first.genesis_block().block_hash());
        }
    }

    #[test]
    fn genesis_checkpoint_is_genesis_hash() {
        for network in Network::ALL.iter() {
            let params = ChainParams::new(*network);
            if let Some(hash) = params.checkpoints().get(0) {
                assert_eq!(*hash, params.genesis_hash());
            }
        }
    }

    #[test]
    fn networks_are_distinct() {
        let main = ChainParams::new(Network::Main);
        let test = ChainParams::new(Network::Test);
        let regtest = ChainParams::new(Network::Regtest);
        assert_ne!(main.magic(), test.magic());
        assert_ne!(test.magic(), regtest.magic());
        assert_ne!(main.genesis_hash(), test.genesis_hash());
        // main and test share a coinbase, only the nonce differs
        assert_eq!(main.genesis_block().header.merkle_root, test.genesis_block().header.merkle_root);
    }

    #[test]
    #[should_panic(expected = "chain parameters are corrupt")]
    fn corrupt_genesis_pin_aborts() {
        verified_genesis(
            Network::Main,
            GenesisBuilder::new(1521658424, 2084537497, 0x1f0640e5, 1, 65 * COIN_VALUE),
            "ff3c710bf19a8d7d00b4436a8923016c542c58f5ab339cd612cbf00d52470561",
            "05a545be21d52037236b2ef2e0aef2801054295601f8f16fbd2f1ecac73b440d",
        );
    }
}
