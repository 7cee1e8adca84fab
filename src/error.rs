use std::fmt;

/// Error returned by fallible conversions and generator operations.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[non_exhaustive]
pub enum Error {
    /// An argument was rejected, e.g. a zero step or a malformed seed.
    InvalidArgument(&'static str),

    /// A byte sequence did not have the required length.
    InvalidLength {
        /// Required number of bytes.
        expected: usize,
        /// Number of bytes received.
        actual: usize,
    },

    /// A position fell outside of `0..=max`.
    OutOfRange {
        /// Position received.
        position: usize,
        /// Largest valid position.
        max: usize,
    },

    /// A sequential generator has exhausted its 128-bit value space.
    ///
    /// This is terminal for the generator instance that reported it.
    Overflow,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument(message) => write!(f, "invalid argument: {}", message),
            Self::InvalidLength { expected, actual } => {
                write!(f, "byte array must contain {} bytes, got {}", expected, actual)
            }
            Self::OutOfRange { position, max } => {
                write!(f, "position must be between 0 and {}, got {}", max, position)
            }
            Self::Overflow => write!(f, "cannot increase the GUID anymore: maximum value reached"),
        }
    }
}

impl std::error::Error for Error {}

/// Error parsing an invalid string representation of GUID.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ParseError {}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid string representation")
    }
}

impl std::error::Error for ParseError {}

impl From<ParseError> for Error {
    fn from(_: ParseError) -> Self {
        Self::InvalidArgument("invalid string representation")
    }
}
