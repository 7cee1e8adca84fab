//! Conversions between a [`Guid`] and the representations other platforms use for it.
//!
//! Numeric conversions take a [`ByteOrder`]: the selected 16 bytes are read as a big-endian
//! unsigned magnitude, so byte 15 is the least significant one and the result is never negative.
//! With [`ByteOrder::Compliant`] the number equals the integer value Python's `uuid.UUID.int` or
//! the `uuid` crate's `as_u128()` report for the same identifier.

use crate::layout::{self, ByteOrder, COMPLIANT_FROM_NATIVE};
use crate::{Error, Guid};

impl Guid {
    /// Creates a GUID from bytes in compliant (text) order.
    pub const fn from_compliant_bytes(bytes: [u8; 16]) -> Self {
        Self::from_native_bytes(layout::to_native(&bytes))
    }

    /// Returns the bytes in compliant (text) order, as Java, Python and RFC 9562 lay them out.
    pub const fn to_compliant_bytes(&self) -> [u8; 16] {
        layout::to_compliant(self.as_bytes())
    }

    /// Creates a GUID from a slice of bytes in native order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLength`] unless `bytes` contains exactly 16 bytes.
    pub fn from_native_slice(bytes: &[u8]) -> Result<Self, Error> {
        sixteen(bytes).map(Self::from_native_bytes)
    }

    /// Creates a GUID from a slice of bytes in compliant order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLength`] unless `bytes` contains exactly 16 bytes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use seqguid::{Error, Guid};
    ///
    /// let bytes = [0x6f, 0x96, 0x19, 0xff, 0x8b, 0x86, 0xd0, 0x11, 0xb4, 0x2d, 0x00, 0xc0, 0x4f, 0xc9, 0x64, 0xff];
    /// let g = Guid::from_compliant_slice(&bytes)?;
    /// assert_eq!(g.to_string(), "6f9619ff-8b86-d011-b42d-00c04fc964ff");
    /// assert_eq!(g.as_bytes()[..4], [0xff, 0x19, 0x96, 0x6f]);
    ///
    /// assert!(matches!(
    ///     Guid::from_compliant_slice(&bytes[1..]),
    ///     Err(Error::InvalidLength { expected: 16, actual: 15 })
    /// ));
    /// # Ok::<(), Error>(())
    /// ```
    pub fn from_compliant_slice(bytes: &[u8]) -> Result<Self, Error> {
        sixteen(bytes).map(Self::from_compliant_bytes)
    }

    /// Returns the 128-bit unsigned integer the bytes in `order` spell out in big-endian.
    pub const fn to_u128(&self, order: ByteOrder) -> u128 {
        match order {
            ByteOrder::Native => u128::from_be_bytes(*self.as_bytes()),
            ByteOrder::Compliant => u128::from_be_bytes(self.to_compliant_bytes()),
        }
    }

    /// Creates a GUID from a 128-bit unsigned integer; the inverse of [`Guid::to_u128`].
    pub const fn from_u128(value: u128, order: ByteOrder) -> Self {
        match order {
            ByteOrder::Native => Self::from_native_bytes(value.to_be_bytes()),
            ByteOrder::Compliant => Self::from_compliant_bytes(value.to_be_bytes()),
        }
    }

    /// Splits the native bytes into two little-endian signed 64-bit integers, the pair some
    /// languages without a 128-bit type (e.g. JavaScript) store GUIDs as.
    ///
    /// The split is a bit-for-bit reinterpretation and [`Guid::from_i64_pair`] restores every GUID,
    /// but the halves are signed: a GUID above `ffffffff-ffff-7fff-ffff-ffffffffff7f` yields a
    /// negative half, and the pair does not sort like the GUID. Callers that need a non-negative
    /// numeric value must use [`Guid::to_u128`] or the big integer conversion instead.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use seqguid::Guid;
    ///
    /// let g: Guid = "ffffffff-ffff-7fff-ffff-ffffffffff7f".parse()?;
    /// assert_eq!(g.to_i64_pair(), (i64::MAX, i64::MAX));
    /// assert_eq!(Guid::MAX.to_i64_pair(), (-1, -1));
    /// # Ok::<(), seqguid::ParseError>(())
    /// ```
    pub fn to_i64_pair(&self) -> (i64, i64) {
        let bytes = self.as_bytes();
        let mut first = [0u8; 8];
        let mut second = [0u8; 8];
        first.copy_from_slice(&bytes[..8]);
        second.copy_from_slice(&bytes[8..]);
        (i64::from_le_bytes(first), i64::from_le_bytes(second))
    }

    /// Creates a GUID from the pair [`Guid::to_i64_pair`] produces.
    pub fn from_i64_pair(first: i64, second: i64) -> Self {
        let mut bytes = [0u8; 16];
        bytes[..8].copy_from_slice(&first.to_le_bytes());
        bytes[8..].copy_from_slice(&second.to_le_bytes());
        Self::from_native_bytes(bytes)
    }

    /// Returns the byte at the native `position` (0..=15) without copying the array.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `position` is greater than 15.
    pub fn byte_at(&self, position: usize) -> Result<u8, Error> {
        self.as_bytes()
            .get(position)
            .copied()
            .ok_or(Error::OutOfRange { position, max: 15 })
    }

    /// Returns the lowercase hexadecimal digit at `position` (0..=31) of the 32-digit text form,
    /// without rendering the string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `position` is greater than 31.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use seqguid::Guid;
    ///
    /// let g: Guid = "6f9619ff-8b86-d011-b42d-00c04fc964ff".parse()?;
    /// assert_eq!(g.hex_char_at(0)?, '6');
    /// assert_eq!(g.hex_char_at(12)?, 'd');
    /// assert!(g.hex_char_at(32).is_err());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn hex_char_at(&self, position: usize) -> Result<char, Error> {
        const DIGITS: &[u8; 16] = b"0123456789abcdef";

        if position > 31 {
            return Err(Error::OutOfRange { position, max: 31 });
        }

        // two text digits per byte; the first three groups are stored swapped
        let byte = self.as_bytes()[COMPLIANT_FROM_NATIVE[position >> 1]];
        let nibble = if position % 2 == 0 {
            byte >> 4
        } else {
            byte & 0x0f
        };
        Ok(DIGITS[nibble as usize] as char)
    }
}

fn sixteen(bytes: &[u8]) -> Result<[u8; 16], Error> {
    <[u8; 16]>::try_from(bytes).map_err(|_| Error::InvalidLength {
        expected: 16,
        actual: bytes.len(),
    })
}

impl From<Guid> for [u8; 16] {
    /// Returns the bytes in native order.
    fn from(src: Guid) -> Self {
        *src.as_bytes()
    }
}

impl From<[u8; 16]> for Guid {
    /// Takes the bytes in native order.
    fn from(src: [u8; 16]) -> Self {
        Self::from_native_bytes(src)
    }
}

impl From<Guid> for u128 {
    /// Returns the integer value in compliant order.
    fn from(src: Guid) -> Self {
        src.to_u128(ByteOrder::Compliant)
    }
}

impl From<u128> for Guid {
    /// Takes the integer value in compliant order.
    fn from(src: u128) -> Self {
        Self::from_u128(src, ByteOrder::Compliant)
    }
}

#[cfg(feature = "bigint")]
#[cfg_attr(docsrs, doc(cfg(feature = "bigint")))]
mod bigint_support {
    use num_bigint::{BigInt, Sign};

    use crate::layout::ByteOrder;
    use crate::Guid;

    impl Guid {
        /// Converts the GUID to an arbitrary-precision integer by reading the bytes in `order` as a
        /// big-endian magnitude. The result is always in `0..2^128`.
        ///
        /// # Examples
        ///
        /// ```rust
        /// use num_bigint::BigInt;
        /// use seqguid::{layout::ByteOrder, Guid};
        ///
        /// let mut bytes = [0u8; 16];
        /// bytes[15] = 1;
        /// let g = Guid::from_native_bytes(bytes);
        /// assert_eq!(g.to_big_integer(ByteOrder::Native), BigInt::from(1));
        /// assert_eq!(Guid::from_big_integer(&BigInt::from(1), ByteOrder::Native), g);
        /// ```
        pub fn to_big_integer(&self, order: ByteOrder) -> BigInt {
            BigInt::from(self.to_u128(order))
        }

        /// Creates a GUID from an arbitrary-precision integer, the inverse of
        /// [`Guid::to_big_integer`].
        ///
        /// Values outside `0..2^128` wrap around modulo 2^128 rather than fail: `2^128` becomes
        /// [`Guid::NIL`] and `-1` becomes [`Guid::MAX`]. Callers that need to detect overflow must
        /// check [`BigInt::bits`] beforehand.
        pub fn from_big_integer(value: &BigInt, order: ByteOrder) -> Self {
            let (sign, magnitude) = value.to_bytes_be();
            let tail = &magnitude[magnitude.len().saturating_sub(16)..];
            let mut bytes = [0u8; 16];
            bytes[16 - tail.len()..].copy_from_slice(tail);

            let low = u128::from_be_bytes(bytes);
            let wrapped = if sign == Sign::Minus {
                low.wrapping_neg()
            } else {
                low
            };
            Self::from_u128(wrapped, order)
        }
    }

}
