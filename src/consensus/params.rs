// SPDX-License-Identifier: CC0-1.0

//! Consensus parameters
//!
//! This module provides predefined set of parameters for different chains,
//! together with the BIP9 deployment windows that decide when a soft fork
//! may start signalling and when it gives up.
//!

use std::fmt;

use hex_lit::hex;

use crate::hash_types::BlockHash;
use crate::network::constants::Network;

/// A soft fork deployed through version bits.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Deployment {
    /// Dummy deployment used to exercise the version bits machinery.
    TestDummy,
    /// Deployment of BIP68, BIP112, and BIP113.
    Csv,
    /// Deployment of SegWit (BIP141, BIP143, and BIP147).
    Segwit,
}

impl Deployment {
    /// Every deployment, in table order.
    pub const ALL: [Deployment; 3] = [Deployment::TestDummy, Deployment::Csv, Deployment::Segwit];

    /// Position of this deployment in [`Params::deployments`].
    pub const fn index(self) -> usize {
        match self {
            Deployment::TestDummy => 0,
            Deployment::Csv => 1,
            Deployment::Segwit => 2,
        }
    }
}

impl fmt::Display for Deployment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match *self {
            Deployment::TestDummy => "testdummy",
            Deployment::Csv => "csv",
            Deployment::Segwit => "segwit",
        };
        f.write_str(s)
    }
}

/// When a deployment may begin signalling.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StartTime {
    /// The deployment is active from genesis, no signalling required.
    AlwaysActive,
    /// Signalling starts at this median time past (inclusive).
    At(i64),
}

/// When an unactivated deployment gives up.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Timeout {
    /// The deployment never times out.
    Never,
    /// The deployment fails once median time past reaches this value.
    At(i64),
}

/// Version bits parameters for one deployment.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DeploymentWindow {
    /// Bit position to select the particular bit in nVersion.
    pub bit: u8,
    /// Start of the signalling period.
    pub start: StartTime,
    /// End of the signalling period.
    pub timeout: Timeout,
}

impl DeploymentWindow {
    /// Highest bit usable for signalling.
    pub const MAX_BIT: u8 = 28;

    /// The version bits mask of this deployment.
    pub fn mask(&self) -> u32 { 1u32 << self.bit }

    /// Whether the deployment bypasses signalling entirely.
    pub fn is_always_active(&self) -> bool { self.start == StartTime::AlwaysActive }

    /// Whether signalling has begun at the given median time past.
    pub fn has_started(&self, median_time: i64) -> bool {
        match self.start {
            StartTime::AlwaysActive => true,
            StartTime::At(start) => median_time >= start,
        }
    }

    /// Whether the window has expired at the given median time past.
    pub fn has_timed_out(&self, median_time: i64) -> bool {
        match self.timeout {
            Timeout::Never => false,
            Timeout::At(timeout) => median_time >= timeout,
        }
    }

    /// Checks the bit range and that the start does not come after the timeout.
    pub fn is_well_formed(&self) -> bool {
        if self.bit > Self::MAX_BIT {
            return false;
        }
        match (self.start, self.timeout) {
            (StartTime::At(start), Timeout::At(timeout)) => start <= timeout,
            _ => true,
        }
    }
}

/// A 256-bit unsigned integer stored big-endian, used for work and target values.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Uint256([u8; 32]);

impl Uint256 {
    /// The zero value.
    pub const ZERO: Uint256 = Uint256([0; 32]);

    /// Creates a value from big-endian bytes.
    pub const fn from_be_bytes(bytes: [u8; 32]) -> Uint256 { Uint256(bytes) }

    /// Returns the big-endian bytes.
    pub const fn to_be_bytes(self) -> [u8; 32] { self.0 }

    /// Whether the value is zero.
    pub fn is_zero(&self) -> bool { self.0 == [0; 32] }

    /// Expands a compact `nBits` encoding into the full target.
    ///
    /// The top byte is a base-256 exponent and the low 23 bits the mantissa.
    /// Negative or overflowing encodings yield `None`.
    pub fn from_compact(bits: u32) -> Option<Uint256> {
        let exponent = (bits >> 24) as usize;
        let mantissa = bits & 0x007f_ffff;
        if bits & 0x0080_0000 != 0 && mantissa != 0 {
            return None;
        }

        let mut out = [0u8; 32];
        if exponent <= 3 {
            let value = mantissa >> (8 * (3 - exponent));
            out[28..].copy_from_slice(&value.to_be_bytes());
            return Some(Uint256(out));
        }
        // The three mantissa bytes land at positions 32 - exponent onwards;
        // any nonzero byte pushed above the top is an overflow.
        for (i, byte) in mantissa.to_be_bytes()[1..].iter().enumerate() {
            let pos = 32 + i as isize - exponent as isize;
            if pos < 0 {
                if *byte != 0 {
                    return None;
                }
                continue;
            }
            out[pos as usize] = *byte;
        }
        Some(Uint256(out))
    }
}

impl fmt::Debug for Uint256 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "Uint256({})", self) }
}

impl fmt::Display for Uint256 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for byte in self.0.iter() {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

/// Parameters that influence chain consensus.
#[derive(Debug, Clone)]
pub struct Params {
    /// Network for which parameters are valid.
    pub network: Network,
    /// Hash of the genesis block, filled in once the genesis block is verified.
    pub hash_genesis_block: BlockHash,
    /// Number of blocks between block subsidy halvings.
    pub subsidy_halving_interval: u32,
    /// Block height at which BIP16 becomes active.
    pub bip16_height: u32,
    /// Block height at which BIP34 becomes active.
    pub bip34_height: u32,
    /// Hash of the block at `bip34_height`, if known.
    pub bip34_hash: Option<BlockHash>,
    /// Block height at which BIP65 becomes active.
    pub bip65_height: u32,
    /// Block height at which BIP66 becomes active.
    pub bip66_height: u32,
    /// Proof of work limit value. It contains the lowest possible difficulty.
    pub pow_limit: Uint256,
    /// Difficulty recalculation interval, in seconds.
    pub pow_target_timespan: u64,
    /// Expected amount of time to mine one block, in seconds.
    pub pow_target_spacing: u64,
    /// Determines whether minimal difficulty may be used for blocks or not.
    pub allow_min_difficulty_blocks: bool,
    /// Determines whether retargeting is disabled for this network or not.
    pub no_pow_retargeting: bool,
    /// Minimum blocks including miner confirmation of the total of
    /// `miner_confirmation_window` blocks, which is also used for BIP9 deployments.
    pub rule_change_activation_threshold: u32,
    /// Number of blocks with the same set of rules.
    pub miner_confirmation_window: u32,
    /// Version bits deployments, indexed by [`Deployment::index`].
    pub deployments: [DeploymentWindow; 3],
    /// The best chain should have at least this much work.
    pub minimum_chain_work: Uint256,
    /// Signatures in ancestors of this block are assumed valid.
    pub default_assume_valid: Option<BlockHash>,
}

impl Params {
    /// Creates parameters set for the given network.
    ///
    /// `hash_genesis_block` is left zeroed; chain parameter construction
    /// fills it in after building and verifying the genesis block.
    pub fn new(network: Network) -> Self {
        use hashes::Hash;

        match network {
            Network::Main => Params {
                network: Network::Main,
                hash_genesis_block: BlockHash::all_zeros(),
                subsidy_halving_interval: 580_000,
                bip16_height: 160_035,
                bip34_height: 160_035,
                bip34_hash: Some(block_hash(
                    "7024416fe1b029ea7aaf5a90600a537c160da050d9cf3e07cd8e39afb9608b83",
                )),
                bip65_height: 160_035,
                bip66_height: 160_035,
                pow_limit: Uint256(hex!(
                    "00000fffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"
                )),
                pow_target_timespan: 14 * 24 * 60 * 60, // 2 weeks
                pow_target_spacing: 60,
                allow_min_difficulty_blocks: false,
                no_pow_retargeting: false,
                rule_change_activation_threshold: 3780, // 75%
                miner_confirmation_window: 5040,
                deployments: [
                    window(28, StartTime::At(1554977586), Timeout::At(1554977586)),
                    window(0, StartTime::At(1554977586), Timeout::At(1554977586)),
                    window(1, StartTime::At(1554977586), Timeout::At(1554977586)),
                ],
                minimum_chain_work: Uint256(hex!(
                    "0000000000000000000000000000000000000000000000000000000100010001"
                )),
                // 160035
                default_assume_valid: Some(block_hash(
                    "7024416fe1b029ea7aaf5a90600a537c160da050d9cf3e07cd8e39afb9608b83",
                )),
            },
            Network::Test => Params {
                network: Network::Test,
                hash_genesis_block: BlockHash::all_zeros(),
                subsidy_halving_interval: 580_000,
                bip16_height: 0,
                bip34_height: 0,
                bip34_hash: Some(block_hash(
                    "c9b7c4559b9f02d04ddcaf6f80b9df35e600734e66930d9c041e4823527d78ee",
                )),
                bip65_height: 0,
                bip66_height: 0,
                pow_limit: Uint256(hex!(
                    "00000fffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"
                )),
                pow_target_timespan: 14 * 24 * 60 * 60, // 2 weeks
                pow_target_spacing: 60,
                allow_min_difficulty_blocks: true,
                no_pow_retargeting: false,
                rule_change_activation_threshold: 15120, // 75% for testchains
                miner_confirmation_window: 20160,        // timespan / spacing
                deployments: [
                    window(28, StartTime::At(1521658424), Timeout::At(1521658424)),
                    window(0, StartTime::At(1521658424), Timeout::At(1521658424)),
                    window(1, StartTime::At(1521658424), Timeout::At(1521658424)),
                ],
                minimum_chain_work: Uint256(hex!(
                    "00000000000000000000000000000000000000000000000000203cafcb7de493"
                )),
                default_assume_valid: Some(block_hash(
                    "c9b7c4559b9f02d04ddcaf6f80b9df35e600734e66930d9c041e4823527d78ee",
                )),
            },
            Network::Regtest => Params {
                network: Network::Regtest,
                hash_genesis_block: BlockHash::all_zeros(),
                subsidy_halving_interval: 150,
                bip16_height: 0, // always enforce P2SH on regtest
                // Far in the future so v1 blocks are not rejected in tests.
                bip34_height: 100_000_000,
                bip34_hash: None,
                bip65_height: 0,
                bip66_height: 0,
                pow_limit: Uint256(hex!(
                    "7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"
                )),
                pow_target_timespan: 302_400, // 3.5 days
                pow_target_spacing: 150,
                allow_min_difficulty_blocks: true,
                no_pow_retargeting: true,
                rule_change_activation_threshold: 108, // 75% for testchains
                miner_confirmation_window: 144,
                deployments: [
                    window(28, StartTime::At(0), Timeout::Never),
                    window(0, StartTime::At(0), Timeout::Never),
                    window(1, StartTime::AlwaysActive, Timeout::Never),
                ],
                minimum_chain_work: Uint256::ZERO,
                default_assume_valid: None,
            },
        }
    }

    /// Number of blocks between difficulty retargets.
    pub fn difficulty_adjustment_interval(&self) -> u64 {
        self.pow_target_timespan / self.pow_target_spacing
    }

    /// The window of one deployment.
    pub fn deployment(&self, deployment: Deployment) -> &DeploymentWindow {
        &self.deployments[deployment.index()]
    }

    pub(crate) fn deployment_mut(&mut self, deployment: Deployment) -> &mut DeploymentWindow {
        &mut self.deployments[deployment.index()]
    }

    /// Returns the first deployment that is ill-formed or reuses another's bit.
    pub fn find_invalid_deployment(&self) -> Option<Deployment> {
        Deployment::ALL.iter().copied().find(|&deployment| {
            let this = self.deployment(deployment);
            let bit_reused = Deployment::ALL[..deployment.index()]
                .iter()
                .any(|&earlier| self.deployment(earlier).bit == this.bit);
            !this.is_well_formed() || bit_reused
        })
    }
}

const fn window(bit: u8, start: StartTime, timeout: Timeout) -> DeploymentWindow {
    DeploymentWindow { bit, start, timeout }
}

fn block_hash(hash_hex: &str) -> BlockHash {
    use std::str::FromStr;
    BlockHash::from_str(hash_hex).expect("hash literals are valid hex")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deployment_tables_are_consistent() {
        for network in Network::ALL.iter() {
            let params = Params::new(*network);
            assert_eq!(params.network, *network);
            assert_eq!(params.find_invalid_deployment(), None, "{}", network);
            for deployment in Deployment::ALL.iter() {
                assert!(params.deployment(*deployment).mask().is_power_of_two());
            }
        }
    }

    #[test]
    fn invalid_deployments_are_found() {
        let mut params = Params::new(Network::Regtest);
        params.deployment_mut(Deployment::Csv).bit = 28;
        assert_eq!(params.find_invalid_deployment(), Some(Deployment::Csv));

        let mut params = Params::new(Network::Regtest);
        params.deployment_mut(Deployment::Segwit).start = StartTime::At(10);
        params.deployment_mut(Deployment::Segwit).timeout = Timeout::At(5);
        assert_eq!(params.find_invalid_deployment(), Some(Deployment::Segwit));

        let mut params = Params::new(Network::Regtest);
        params.deployment_mut(Deployment::TestDummy).bit = 29;
        assert_eq!(params.find_invalid_deployment(), Some(Deployment::TestDummy));
    }

    #[test]
    fn deployment_window_bounds() {
        let w = window(0, StartTime::At(100), Timeout::At(200));
        assert!(!w.has_started(99));
        assert!(w.has_started(100));
        assert!(!w.has_timed_out(199));
        assert!(w.has_timed_out(200));
        assert!(!w.is_always_active());
        assert_eq!(w.mask(), 1);

        let always = window(1, StartTime::AlwaysActive, Timeout::Never);
        assert!(always.is_always_active());
        assert!(always.has_started(i64::MIN));
        assert!(!always.has_timed_out(i64::MAX));
        assert!(always.is_well_formed());
        assert_eq!(always.mask(), 2);

        assert!(window(0, StartTime::At(5), Timeout::At(5)).is_well_formed());
        assert!(!window(0, StartTime::At(6), Timeout::At(5)).is_well_formed());
        assert!(window(0, StartTime::At(i64::MAX), Timeout::Never).is_well_formed());
    }

    #[test]
    fn regtest_segwit_always_active() {
        let params = Params::new(Network::Regtest);
        assert!(params.deployment(Deployment::Segwit).is_always_active());
        assert!(!params.deployment(Deployment::Csv).is_always_active());
        assert_eq!(params.deployment(Deployment::TestDummy).bit, 28);
    }

    #[test]
    fn difficulty_adjustment_interval() {
        assert_eq!(Params::new(Network::Main).difficulty_adjustment_interval(), 20160);
        assert_eq!(Params::new(Network::Test).difficulty_adjustment_interval(), 20160);
        assert_eq!(Params::new(Network::Regtest).difficulty_adjustment_interval(), 2016);
    }

    #[test]
    fn compact_targets() {
        // regtest genesis bits
        let target = Uint256::from_compact(0x207fffff).unwrap();
        assert_eq!(
            target.to_string(),
            "7fffff0000000000000000000000000000000000000000000000000000000000"
        );
        assert!(target <= Params::new(Network::Regtest).pow_limit);

        let target = Uint256::from_compact(0x1d00ffff).unwrap();
        assert_eq!(
            target.to_string(),
            "00000000ffff0000000000000000000000000000000000000000000000000000"
        );

        let target = Uint256::from_compact(0x1f0640e5).unwrap();
        assert_eq!(
            target.to_string(),
            "000640e500000000000000000000000000000000000000000000000000000000"
        );

        assert_eq!(Uint256::from_compact(0x03123456).unwrap().to_be_bytes()[29..], [0x12, 0x34, 0x56]);
        assert_eq!(Uint256::from_compact(0x02123456).unwrap().to_be_bytes()[30..], [0x12, 0x34]);
        assert_eq!(Uint256::from_compact(0x01003456).unwrap(), Uint256::ZERO);
        assert_eq!(Uint256::from_compact(0x04923456), None);
        assert_eq!(Uint256::from_compact(0xff123456), None);
        assert_eq!(Uint256::from_compact(0x23000001), None);
        assert!(Uint256::from_compact(0x22000001).is_some());
        assert_eq!(Uint256::from_compact(0x21000001).unwrap().to_be_bytes()[1], 0x01);
    }

    #[test]
    fn chain_work_values() {
        assert!(Params::new(Network::Regtest).minimum_chain_work.is_zero());
        assert!(!Params::new(Network::Main).minimum_chain_work.is_zero());
        assert!(Params::new(Network::Main).pow_limit < Params::new(Network::Regtest).pow_limit);
    }
}
