//! COMB generator and related types.

use crate::{Error, Guid};

pub mod with_rand08;

/// Default divisor that turns milliseconds since midnight into COMB time ticks.
///
/// SQL Server `datetime` values are accurate to 1/300 of a second, so dividing by `3.333333`
/// yields the same tick resolution and lets COMB GUIDs sort the way SQL Server compares
/// `uniqueidentifier` columns.
pub const COMB_TICK_DIVISOR: f64 = 3.333333;

const MS_PER_DAY: u64 = 86_400_000;

/// Days from 1900-01-01 to the Unix epoch.
const DAYS_FROM_1900_TO_UNIX_EPOCH: u64 = 25_567;

/// A trait that defines the minimum random number generator interface for [`CombGenerator`].
pub trait RandSource {
    /// Fills `dest` with random data.
    fn fill_bytes(&mut self, dest: &mut [u8]);
}

/// Represents a COMB ("combined") GUID generator that embeds a coarse timestamp into the last six
/// bytes of a random version 4 GUID.
///
/// The layout of a generated GUID in text form is:
///
/// ```text
/// rrrrrrrr-rrrr-4rrr-vrrr-ddddtttttttt
/// ```
///
/// where `r` is random, `4` and `v` are the version and variant fields, `dddd` holds the low 16
/// bits of the days since 1900-01-01 and `tttttttt` the low 32 bits of the milliseconds since
/// midnight (UTC) divided by the tick divisor, both big-endian. GUIDs generated close together in
/// time share their trailing bytes, which reduces index fragmentation when they are used as
/// clustered primary keys. Uniqueness relies on the 74 random bits only; the generator does not
/// order GUIDs created within the same tick.
///
/// # Examples
///
/// ```rust
/// use seqguid::CombGenerator;
///
/// let mut g = CombGenerator::with_rand08(rand::thread_rng());
/// let x = g.generate();
/// let y = g.generate();
/// assert_ne!(x, y);
/// assert_eq!(x.version(), Some(4));
/// ```
#[derive(Clone, PartialEq, Debug)]
pub struct CombGenerator<R> {
    tick_divisor: f64,

    /// The random number generator used by the generator.
    rng: R,
}

impl<R: Default> Default for CombGenerator<R> {
    fn default() -> Self {
        Self {
            tick_divisor: COMB_TICK_DIVISOR,
            rng: Default::default(),
        }
    }
}

impl<R: RandSource> CombGenerator<R> {
    /// Creates a generator instance with the default [`COMB_TICK_DIVISOR`].
    pub const fn new(rng: R) -> Self {
        Self {
            tick_divisor: COMB_TICK_DIVISOR,
            rng,
        }
    }

    /// Replaces the divisor applied to the milliseconds since midnight.
    ///
    /// Use `1.0` for millisecond resolution when the GUIDs are not compared by SQL Server.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] unless `divisor` is a finite positive number.
    pub fn with_tick_divisor(mut self, divisor: f64) -> Result<Self, Error> {
        if !(divisor.is_finite() && divisor > 0.0) {
            return Err(Error::InvalidArgument(
                "tick divisor must be a finite positive number",
            ));
        }
        self.tick_divisor = divisor;
        Ok(self)
    }

    /// Returns the divisor applied to the milliseconds since midnight.
    pub const fn tick_divisor(&self) -> f64 {
        self.tick_divisor
    }

    /// Generates a new COMB GUID from the current time.
    pub fn generate(&mut self) -> Guid {
        use std::time;
        self.generate_core(
            time::SystemTime::now()
                .duration_since(time::UNIX_EPOCH)
                .map_or(0, |d| d.as_millis() as u64),
        )
    }

    /// Generates a new COMB GUID from the `unix_ts_ms` passed.
    pub fn generate_core(&mut self, unix_ts_ms: u64) -> Guid {
        let mut bytes = *self.generate_v4().as_bytes();

        let days = unix_ts_ms / MS_PER_DAY + DAYS_FROM_1900_TO_UNIX_EPOCH;
        let ticks = ((unix_ts_ms % MS_PER_DAY) as f64 / self.tick_divisor) as u64;
        bytes[10..12].copy_from_slice(&(days as u16).to_be_bytes());
        bytes[12..16].copy_from_slice(&(ticks as u32).to_be_bytes());

        Guid::from_native_bytes(bytes)
    }

    /// Generates a new version 4 GUID utilizing the random number generator inside.
    pub(crate) fn generate_v4(&mut self) -> Guid {
        let mut bytes = [0u8; 16];
        self.rng.fill_bytes(&mut bytes);
        Guid::from_random_bytes(bytes)
    }
}

/// Supports operations as an infinite iterator that produces a new COMB GUID for each call of
/// `next()`.
///
/// # Examples
///
/// ```rust
/// use seqguid::CombGenerator;
///
/// CombGenerator::with_rand08(rand::thread_rng())
///     .enumerate()
///     .skip(4)
///     .take(4)
///     .for_each(|(i, e)| println!("[{}] {}", i, e));
/// ```
impl<R: RandSource> Iterator for CombGenerator<R> {
    type Item = Guid;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.generate())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl<R: RandSource> std::iter::FusedIterator for CombGenerator<R> {}
