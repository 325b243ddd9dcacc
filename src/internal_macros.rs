// SPDX-License-Identifier: CC0-1.0

//! Internal macros.
//!
//! Macros meant to be used inside the library only.
//!

/// Implements `Encodable` for a struct by encoding each listed field in order.
macro_rules! impl_consensus_encoding {
    ($thing:ident, $($field:ident),+) => (
        impl $crate::consensus::encode::Encodable for $thing {
            #[inline]
            fn consensus_encode<W: ::std::io::Write + ?Sized>(
                &self,
                w: &mut W,
            ) -> Result<usize, ::std::io::Error> {
                let mut len = 0;
                $(len += $crate::consensus::encode::Encodable::consensus_encode(&self.$field, w)?;)+
                Ok(len)
            }
        }
    );
}

/// Implements `Encodable` for a hash newtype by writing its raw bytes.
macro_rules! impl_hashencode {
    ($hashtype:ident) => {
        impl $crate::consensus::encode::Encodable for $hashtype {
            #[inline]
            fn consensus_encode<W: ::std::io::Write + ?Sized>(
                &self,
                w: &mut W,
            ) -> Result<usize, ::std::io::Error> {
                use $crate::hashes::Hash;
                $crate::consensus::encode::Encodable::consensus_encode(self.as_byte_array(), w)
            }
        }
    };
}
