// SPDX-License-Identifier: CC0-1.0

//! Network constants
//!
//! This module provides various constants relating to the Stredle network
//! protocol, such as the network names and magic header bytes.
//!
//! # Example: looking up a network by its magic bytes
//!
//! ```rust
//! use stredle::network::constants::{Magic, Network};
//!
//! let magic = Magic::from_bytes([0xa0, 0xcf, 0xc5, 0xc0]);
//! assert_eq!(Network::from_magic(magic), Some(Network::Main));
//! assert_eq!(Network::Main.magic().to_string(), "a0cfc5c0");
//! ```

use std::fmt;
use std::str::FromStr;

/// The Stredle network to act on.
#[derive(Copy, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Network {
    /// Production chain
    Main,
    /// Public test chain
    Test,
    /// Private regression test chain
    Regtest,
}

impl Network {
    /// Every network, in the order nodes list them.
    pub const ALL: [Network; 3] = [Network::Main, Network::Test, Network::Regtest];

    /// Converts a `Network` to its `-chain` argument name.
    pub fn to_core_arg(self) -> &'static str {
        match self {
            Network::Main => "main",
            Network::Test => "test",
            Network::Regtest => "regtest",
        }
    }

    /// Converts a `-chain` argument name to its equivalent `Network`.
    pub fn from_core_arg(core_arg: &str) -> Result<Self, ParseNetworkError> {
        use Network::*;

        let network = match core_arg {
            "main" => Main,
            "test" => Test,
            "regtest" => Regtest,
            _ => return Err(ParseNetworkError(core_arg.to_owned())),
        };
        Ok(network)
    }

    /// Return the network magic bytes, which should be placed at the start
    /// of every message.
    pub fn magic(self) -> Magic {
        match self {
            Network::Main => Magic::MAIN,
            Network::Test => Magic::TEST,
            Network::Regtest => Magic::REGTEST,
        }
    }

    /// Looks up the network whose messages start with `magic`.
    pub fn from_magic(magic: Magic) -> Option<Network> {
        Network::ALL.iter().copied().find(|network| network.magic() == magic)
    }
}

/// An error in parsing network string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown network: {0}")]
pub struct ParseNetworkError(pub String);

impl FromStr for Network {
    type Err = ParseNetworkError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> { Network::from_core_arg(s) }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { f.write_str(self.to_core_arg()) }
}

/// Network magic bytes to identify the network a message is meant for.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Magic([u8; 4]);

impl Magic {
    /// Stredle mainnet network magic bytes.
    pub const MAIN: Self = Self([0xa0, 0xcf, 0xc5, 0xc0]);
    /// Stredle testnet network magic bytes.
    pub const TEST: Self = Self([0x1c, 0x22, 0x10, 0x18]);
    /// Stredle regtest network magic bytes.
    pub const REGTEST: Self = Self([0xfa, 0xbf, 0xb5, 0xda]);

    /// Create network magic from bytes.
    pub const fn from_bytes(bytes: [u8; 4]) -> Magic { Magic(bytes) }

    /// Get network magic bytes.
    pub const fn to_bytes(self) -> [u8; 4] { self.0 }
}

impl fmt::Display for Magic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for byte in self.0.iter() {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Magic, Network};

    #[test]
    fn string_test() {
        assert_eq!(Network::Main.to_string(), "main");
        assert_eq!(Network::Test.to_string(), "test");
        assert_eq!(Network::Regtest.to_string(), "regtest");

        assert_eq!("main".parse::<Network>().unwrap(), Network::Main);
        assert_eq!("test".parse::<Network>().unwrap(), Network::Test);
        assert_eq!("regtest".parse::<Network>().unwrap(), Network::Regtest);
        assert!("fakenet".parse::<Network>().is_err());
        assert!("Main".parse::<Network>().is_err());
        assert!("".parse::<Network>().is_err());

        let err = "signet".parse::<Network>().unwrap_err();
        assert_eq!(err.to_string(), "unknown network: signet");
    }

    #[test]
    fn from_to_core_arg() {
        let expected_pairs =
            [(Network::Main, "main"), (Network::Test, "test"), (Network::Regtest, "regtest")];

        for (net, core_arg) in &expected_pairs {
            assert_eq!(Network::from_core_arg(core_arg), Ok(*net));
            assert_eq!(net.to_core_arg(), *core_arg);
        }
    }

    #[test]
    fn magic_test() {
        assert_eq!(Network::Main.magic().to_bytes(), [0xa0, 0xcf, 0xc5, 0xc0]);
        assert_eq!(Network::Test.magic().to_bytes(), [0x1c, 0x22, 0x10, 0x18]);
        assert_eq!(Network::Regtest.magic().to_bytes(), [0xfa, 0xbf, 0xb5, 0xda]);
        assert_eq!(Magic::REGTEST.to_string(), "fabfb5da");

        for network in Network::ALL.iter() {
            assert_eq!(Network::from_magic(network.magic()), Some(*network));
        }
        assert_eq!(Network::from_magic(Magic::from_bytes([0xf9, 0xbe, 0xb4, 0xd9])), None);
    }

    #[test]
    #[cfg(feature = "serde")]
    fn serde_roundtrip() {
        use Network::*;
        let tests = vec![(Main, "main"), (Test, "test"), (Regtest, "regtest")];

        for tc in tests {
            let network = tc.0;

            let want = format!("\"{}\"", tc.1);
            let got = serde_json::to_string(&tc.0).expect("failed to serialize network");
            assert_eq!(got, want);

            let back: Network = serde_json::from_str(&got).expect("failed to deserialize network");
            assert_eq!(back, network);
        }
    }
}
