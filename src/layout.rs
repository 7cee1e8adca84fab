//! Byte orderings of a 128-bit identifier.
//!
//! A [`Guid`](crate::Guid) keeps its 16 bytes in *native* order: the first three groups of the
//! 8-4-4-4-12 text form (4, 2 and 2 bytes) are stored little-endian while the last two groups are
//! stored as they read. This is the in-memory layout of a Windows/.NET GUID and the order of
//! `Guid.ToByteArray()`.
//!
//! The *compliant* order is the one Java, Python, PostgreSQL and RFC 9562 use: the 16 bytes appear
//! in the same order as the hex digits of the text form.
//!
//! ```text
//! text:       01020304-0506-0708-090a-0b0c0d0e0f10
//! native:     04 03 02 01 06 05 08 07 09 0a 0b 0c 0d 0e 0f 10
//! compliant:  01 02 03 04 05 06 07 08 09 0a 0b 0c 0d 0e 0f 10
//! ```

/// Selects the byte order in which an identifier is interpreted as a number.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum ByteOrder {
    /// Windows/.NET in-memory order.
    Native,

    /// Cross-language order that follows the canonical text form.
    #[default]
    Compliant,
}

/// `COMPLIANT_FROM_NATIVE[i]` is the native index of the byte found at compliant index `i`.
///
/// The permutation only swaps bytes within the first three groups, so it is its own inverse and
/// also maps compliant indexes back to native ones.
pub(crate) const COMPLIANT_FROM_NATIVE: [usize; 16] =
    [3, 2, 1, 0, 5, 4, 7, 6, 8, 9, 10, 11, 12, 13, 14, 15];

/// Reorders native bytes into compliant order.
pub const fn to_compliant(native: &[u8; 16]) -> [u8; 16] {
    permute(native)
}

/// Reorders compliant bytes into native order.
pub const fn to_native(compliant: &[u8; 16]) -> [u8; 16] {
    permute(compliant)
}

const fn permute(src: &[u8; 16]) -> [u8; 16] {
    let mut dst = [0u8; 16];
    let mut i = 0;
    while i < 16 {
        dst[i] = src[COMPLIANT_FROM_NATIVE[i]];
        i += 1;
    }
    dst
}

#[cfg(test)]
mod tests {
    use super::{to_compliant, to_native, COMPLIANT_FROM_NATIVE};

    const NATIVE: [u8; 16] = [
        0x04, 0x03, 0x02, 0x01, 0x06, 0x05, 0x08, 0x07, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e, 0x0f,
        0x10,
    ];
    const COMPLIANT: [u8; 16] = [
        0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e, 0x0f,
        0x10,
    ];

    /// Converts the documented example in both directions
    #[test]
    fn converts_the_documented_example_in_both_directions() {
        assert_eq!(to_compliant(&NATIVE), COMPLIANT);
        assert_eq!(to_native(&COMPLIANT), NATIVE);
    }

    /// Is a total permutation of sixteen indexes
    #[test]
    fn is_a_total_permutation_of_sixteen_indexes() {
        let mut seen = [false; 16];
        for i in COMPLIANT_FROM_NATIVE {
            assert!(!seen[i]);
            seen[i] = true;
        }
        assert!(seen.iter().all(|e| *e));
    }

    /// Round-trips random byte arrays
    #[test]
    fn round_trips_random_byte_arrays() {
        for _ in 0..10_000 {
            let bytes: [u8; 16] = rand::random();
            assert_eq!(to_native(&to_compliant(&bytes)), bytes);
            assert_eq!(to_compliant(&to_native(&bytes)), bytes);
        }
    }

    /// Agrees with the mixed-endian convention of the uuid crate
    #[test]
    fn agrees_with_the_mixed_endian_convention_of_the_uuid_crate() {
        for _ in 0..1_000 {
            let native: [u8; 16] = rand::random();
            let other = uuid::Uuid::from_bytes_le(native);
            assert_eq!(other.as_bytes(), &to_compliant(&native));
            assert_eq!(other.to_bytes_le(), native);
        }
    }
}
