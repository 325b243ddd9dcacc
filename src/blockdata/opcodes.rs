// SPDX-License-Identifier: CC0-1.0

//! Stredle script opcodes.
//!
//! Only the opcodes the library emits itself are named here; script
//! execution is left to the validation layer.
//!

use std::fmt;

/// A script Opcode.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Opcode {
    code: u8,
}

impl Opcode {
    /// Encodes [`Opcode`] as a byte.
    #[inline]
    pub const fn to_u8(self) -> u8 { self.code }
}

impl From<u8> for Opcode {
    #[inline]
    fn from(code: u8) -> Opcode { Opcode { code } }
}

impl fmt::Debug for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.code {
            0x00 => f.write_str("OP_0"),
            0x4c => f.write_str("OP_PUSHDATA1"),
            0x4d => f.write_str("OP_PUSHDATA2"),
            0x4e => f.write_str("OP_PUSHDATA4"),
            0x4f => f.write_str("OP_PUSHNUM_NEG1"),
            0x51..=0x60 => write!(f, "OP_PUSHNUM_{}", self.code - 0x50),
            0xac => f.write_str("OP_CHECKSIG"),
            x => write!(f, "OP_UNKNOWN_{:#04x}", x),
        }
    }
}

/// The named opcodes.
pub mod all {
    use super::Opcode;

    /// Push an empty array onto the stack.
    pub const OP_PUSHBYTES_0: Opcode = Opcode { code: 0x00 };
    /// Read the next byte as N; push the next N bytes as an array onto the stack.
    pub const OP_PUSHDATA1: Opcode = Opcode { code: 0x4c };
    /// Read the next 2 bytes as N; push the next N bytes as an array onto the stack.
    pub const OP_PUSHDATA2: Opcode = Opcode { code: 0x4d };
    /// Read the next 4 bytes as N; push the next N bytes as an array onto the stack.
    pub const OP_PUSHDATA4: Opcode = Opcode { code: 0x4e };
    /// Push the array `0x81` onto the stack.
    pub const OP_PUSHNUM_NEG1: Opcode = Opcode { code: 0x4f };
    /// Push the array `0x01` onto the stack.
    pub const OP_PUSHNUM_1: Opcode = Opcode { code: 0x51 };
    /// Pop a public key and a signature and push 1 if the signature is valid for it.
    pub const OP_CHECKSIG: Opcode = Opcode { code: 0xac };
}

#[cfg(test)]
mod tests {
    use super::all::*;
    use super::Opcode;

    #[test]
    fn debug_names() {
        assert_eq!(format!("{:?}", OP_CHECKSIG), "OP_CHECKSIG");
        assert_eq!(format!("{:?}", OP_PUSHDATA2), "OP_PUSHDATA2");
        assert_eq!(format!("{:?}", Opcode::from(0x54)), "OP_PUSHNUM_4");
        assert_eq!(format!("{:?}", Opcode::from(0xfe)), "OP_UNKNOWN_0xfe");
    }
}
