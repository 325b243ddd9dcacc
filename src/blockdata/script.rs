// SPDX-License-Identifier: CC0-1.0

//! Stredle scripts.
//!
//! Scripts define Stredle's digital signature scheme: a signature is formed
//! from a script (the second half of which is defined by a coin to be spent,
//! and the first half provided by the spending transaction), and is valid iff
//! the script leaves `TRUE` on the stack after being evaluated.
//!
//! This module only *builds* scripts, which is all the genesis construction
//! needs. It never interprets them.
//!

use std::{fmt, io};

use crate::blockdata::opcodes::{self, all::*};
use crate::consensus::encode::Encodable;

/// Maximum number of bytes a single script push may carry.
pub const MAX_SCRIPT_ELEMENT_SIZE: usize = 520;

/// A Stredle script.
#[derive(Clone, Default, PartialOrd, Ord, PartialEq, Eq, Hash)]
pub struct Script(Vec<u8>);

impl Script {
    /// Creates a new empty script.
    pub fn new() -> Script { Script(vec![]) }

    /// The length in bytes of the script.
    pub fn len(&self) -> usize { self.0.len() }

    /// Whether the script is the empty script.
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Returns the script data.
    pub fn as_bytes(&self) -> &[u8] { &self.0 }

    /// Converts the script into a byte vector.
    pub fn into_bytes(self) -> Vec<u8> { self.0 }
}

impl From<Vec<u8>> for Script {
    fn from(v: Vec<u8>) -> Script { Script(v) }
}

impl fmt::Debug for Script {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("Script(")?;
        fmt::LowerHex::fmt(self, f)?;
        f.write_str(")")
    }
}

impl fmt::LowerHex for Script {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for ch in self.0.iter() {
            write!(f, "{:02x}", ch)?;
        }
        Ok(())
    }
}

impl Encodable for Script {
    #[inline]
    fn consensus_encode<W: io::Write + ?Sized>(&self, w: &mut W) -> Result<usize, io::Error> {
        self.0[..].consensus_encode(w)
    }
}

/// Helper to encode an integer in script format.
///
/// Script numbers are little-endian sign-magnitude: the most significant
/// bit of the last byte carries the sign, so a value whose top byte already
/// uses that bit gets an extra padding byte.
pub fn build_scriptint(n: i64) -> Vec<u8> {
    if n == 0 {
        return vec![];
    }

    let neg = n < 0;

    let mut abs = n.unsigned_abs();
    let mut v = vec![];
    while abs > 0xFF {
        v.push((abs & 0xFF) as u8);
        abs >>= 8;
    }
    // If the number's value causes the sign bit to be set, we need an extra
    // byte to get the correct value and correct sign bit
    if abs & 0x80 != 0 {
        v.push(abs as u8);
        v.push(if neg { 0x80u8 } else { 0u8 });
    }
    // Otherwise we just set the sign bit ourselves
    else {
        abs |= if neg { 0x80 } else { 0 };
        v.push(abs as u8);
    }
    v
}

/// An object which can be used to construct a script piece by piece.
#[derive(PartialEq, Eq, Debug, Clone, Default)]
pub struct Builder(Vec<u8>);

impl Builder {
    /// Creates a new empty script.
    pub fn new() -> Self { Builder(vec![]) }

    /// The length in bytes of the script.
    pub fn len(&self) -> usize { self.0.len() }

    /// Whether the script is the empty script.
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Adds instructions to push an integer onto the stack.
    ///
    /// Integers are encoded as little-endian signed-magnitude numbers, but there are
    /// dedicated opcodes to push some small integers.
    pub fn push_int(self, data: i64) -> Builder {
        // We can special-case -1, 1-16
        if data == -1 || (1..=16).contains(&data) {
            let opcode = opcodes::Opcode::from((data - 1 + OP_PUSHNUM_1.to_u8() as i64) as u8);
            self.push_opcode(opcode)
        }
        // We can also special-case zero
        else if data == 0 {
            self.push_opcode(OP_PUSHBYTES_0)
        }
        // Otherwise encode it as data
        else {
            self.push_scriptint(data)
        }
    }

    /// Adds instructions to push an integer onto the stack, using the explicit
    /// encoding regardless of the availability of dedicated opcodes.
    pub fn push_scriptint(self, data: i64) -> Builder { self.push_slice(&build_scriptint(data)) }

    /// Adds instructions to push some arbitrary data onto the stack.
    pub fn push_slice(mut self, data: &[u8]) -> Builder {
        // Start with a PUSH opcode
        match data.len() as u64 {
            n if n < OP_PUSHDATA1.to_u8() as u64 => {
                self.0.push(n as u8);
            }
            n if n < 0x100 => {
                self.0.push(OP_PUSHDATA1.to_u8());
                self.0.push(n as u8);
            }
            n if n < 0x10000 => {
                self.0.push(OP_PUSHDATA2.to_u8());
                self.0.extend_from_slice(&(n as u16).to_le_bytes());
            }
            n if n < 0x100000000 => {
                self.0.push(OP_PUSHDATA4.to_u8());
                self.0.extend_from_slice(&(n as u32).to_le_bytes());
            }
            _ => panic!("tried to put a 4bn+ sized object into a script!"),
        }
        // Then push the raw bytes
        self.0.extend_from_slice(data);
        self
    }

    /// Adds a single opcode to the script.
    pub fn push_opcode(mut self, data: opcodes::Opcode) -> Builder {
        self.0.push(data.to_u8());
        self
    }

    /// Converts the `Builder` into an unmodifiable `Script`.
    pub fn into_script(self) -> Script { Script(self.0) }
}

#[cfg(test)]
mod tests {
    use hex::decode as hex_decode;

    use super::*;
    use crate::consensus::encode::serialize;

    #[test]
    fn scriptint_round_values() {
        assert_eq!(build_scriptint(0), Vec::<u8>::new());
        assert_eq!(build_scriptint(4), vec![0x04]);
        assert_eq!(build_scriptint(-1), vec![0x81]);
        assert_eq!(build_scriptint(127), vec![0x7f]);
        assert_eq!(build_scriptint(128), vec![0x80, 0x00]);
        assert_eq!(build_scriptint(-128), vec![0x80, 0x80]);
        assert_eq!(build_scriptint(486604799), vec![0xff, 0xff, 0x00, 0x1d]);
    }

    #[test]
    fn script_builder() {
        // small ints
        let script = Builder::new().push_int(1).push_int(0).push_int(-1).push_int(16).into_script();
        assert_eq!(script.as_bytes(), &[0x51, 0x00, 0x4f, 0x60]);

        // explicit encoding keeps small values as data pushes
        let script = Builder::new().push_scriptint(4).into_script();
        assert_eq!(script.as_bytes(), &[0x01, 0x04]);

        // data
        let script = Builder::new().push_slice(b"abc").push_opcode(OP_CHECKSIG).into_script();
        assert_eq!(format!("{:x}", script), "03616263ac");

        // large pushes switch to PUSHDATA opcodes
        let script = Builder::new().push_slice(&[0u8; 80]).into_script();
        assert_eq!(&script.as_bytes()[..2], &[0x4c, 80]);
        let script = Builder::new().push_slice(&[0u8; 300]).into_script();
        assert_eq!(&script.as_bytes()[..3], &[0x4d, 0x2c, 0x01]);
    }

    #[test]
    fn script_serialize() {
        let script = Builder::new().push_scriptint(486604799).push_scriptint(4).into_script();
        assert_eq!(serialize(&script), hex_decode("0704ffff001d0104").unwrap());
        assert_eq!(serialize(&Script::new()), vec![0u8]);
    }
}
