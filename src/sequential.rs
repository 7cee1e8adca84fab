//! Thread-safe sequential GUID generator.

use std::sync::{Mutex, PoisonError};

use crate::{Error, Guid};

/// Represents a generator that produces a strictly increasing sequence of GUIDs from a seed.
///
/// The native bytes of the current value form a 128-bit counter with byte 15 as the least
/// significant digit; every call of [`generate`](Self::generate) adds the fixed step to it. The
/// counter lives behind a mutex, so a generator can be shared by reference across threads and no
/// caller ever sees a partially updated value. Values are ordered by [`Guid`]'s `Ord`, i.e. by
/// native bytes.
///
/// Once the counter cannot be increased without wrapping past `ffffffff-ffff-ffff-ffff-ffffffffffff`
/// the generator is exhausted and every further call returns [`Error::Overflow`].
///
/// # Examples
///
/// ```rust
/// use std::{sync, thread};
/// use seqguid::{Guid, SequentialGenerator};
///
/// let g = sync::Arc::new(SequentialGenerator::with_seed(Guid::NIL, 1)?);
/// thread::scope(|s| {
///     for i in 0..4 {
///         let g = sync::Arc::clone(&g);
///         s.spawn(move || {
///             for _ in 0..8 {
///                 println!("{} by thread {}", g.generate().unwrap(), i);
///                 thread::yield_now();
///             }
///         });
///     }
/// });
/// assert_eq!(g.current().to_string(), "00000000-0000-0000-0000-000000000020");
/// # Ok::<(), seqguid::Error>(())
/// ```
#[derive(Debug)]
pub struct SequentialGenerator {
    original: Guid,
    step: u8,
    state: Mutex<State>,
}

#[derive(Debug)]
struct State {
    current: [u8; 16],
    exhausted: bool,
}

impl SequentialGenerator {
    /// Creates a generator seeded with a random version 4 GUID.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `step` is zero.
    #[cfg(feature = "global_gen")]
    #[cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]
    pub fn new(step: u8) -> Result<Self, Error> {
        Self::with_seed(crate::new_guid(), step)
    }

    /// Creates a generator that starts counting from `seed`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `step` is zero.
    pub fn with_seed(seed: Guid, step: u8) -> Result<Self, Error> {
        if step == 0 {
            return Err(Error::InvalidArgument("step cannot be 0"));
        }

        log::debug!("created sequential generator with step {}", step);
        Ok(Self {
            original: seed,
            step,
            state: Mutex::new(State {
                current: *seed.as_bytes(),
                exhausted: false,
            }),
        })
    }

    /// Creates a generator that starts counting from the GUID written in `seed`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `seed` is not a valid GUID string or `step` is zero.
    pub fn with_seed_str(seed: &str, step: u8) -> Result<Self, Error> {
        Self::with_seed(seed.parse()?, step)
    }

    /// Returns the seed, i.e. the value the sequence started from.
    pub const fn original(&self) -> Guid {
        self.original
    }

    /// Returns the amount added to the counter per call.
    pub const fn step(&self) -> u8 {
        self.step
    }

    /// Returns the current value without advancing the generator.
    pub fn current(&self) -> Guid {
        Guid::from_native_bytes(self.lock().current)
    }

    /// Returns `true` if the generator has run out of values.
    pub fn is_exhausted(&self) -> bool {
        self.lock().exhausted
    }

    /// Advances the generator by the step and returns the new value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Overflow`] if the counter would wrap around. The current value is left
    /// unchanged and the generator stays exhausted.
    pub fn generate(&self) -> Result<Guid, Error> {
        let mut state = self.lock();
        if state.exhausted {
            return Err(Error::Overflow);
        }

        let mut next = state.current;
        if !step_bytes(&mut next, self.step) {
            state.exhausted = true;
            log::warn!(
                "sequential generator exhausted at {}",
                Guid::from_native_bytes(state.current)
            );
            return Err(Error::Overflow);
        }

        state.current = next;
        Ok(Guid::from_native_bytes(next))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        // the state is valid at every point a panic could unwind through
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Adds `step` to the last byte and carries leftward, returning `false` if the carry leaves
/// byte 0.
fn step_bytes(bytes: &mut [u8; 16], step: u8) -> bool {
    let mut carry = step;
    for e in bytes.iter_mut().rev() {
        let (sum, overflowed) = e.overflowing_add(carry);
        *e = sum;
        if !overflowed {
            return true;
        }
        carry = 1;
    }
    false
}

/// Supports operations as an iterator that produces the next value for each call of `next()`
/// and ends when the generator is exhausted.
///
/// # Examples
///
/// ```rust
/// use seqguid::{Guid, SequentialGenerator};
///
/// let g = SequentialGenerator::with_seed(Guid::NIL, 16)?;
/// let v: Vec<String> = g.iter().take(2).map(String::from).collect();
/// assert_eq!(v, ["00000000-0000-0000-0000-000000000010", "00000000-0000-0000-0000-000000000020"]);
/// # Ok::<(), seqguid::Error>(())
/// ```
impl Iterator for &SequentialGenerator {
    type Item = Guid;

    fn next(&mut self) -> Option<Self::Item> {
        self.generate().ok()
    }
}

impl std::iter::FusedIterator for &SequentialGenerator {}

impl SequentialGenerator {
    /// Returns an iterator over the upcoming values of this generator.
    pub fn iter(&self) -> &Self {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::SequentialGenerator;
    use crate::{layout::ByteOrder, Error, Guid};

    /// Rejects zero step
    #[test]
    fn rejects_zero_step() {
        assert!(matches!(
            SequentialGenerator::with_seed(Guid::NIL, 0),
            Err(Error::InvalidArgument(_))
        ));
        #[cfg(feature = "global_gen")]
        assert!(matches!(
            SequentialGenerator::new(0),
            Err(Error::InvalidArgument(_))
        ));
    }

    /// Rejects malformed seed
    #[test]
    fn rejects_malformed_seed() {
        for seed in ["", "not a guid", "00000000-0000-0000-0000-00000000000g"] {
            assert!(matches!(
                SequentialGenerator::with_seed_str(seed, 1),
                Err(Error::InvalidArgument(_))
            ));
        }
    }

    /// Keeps current and original until advanced
    #[test]
    fn keeps_current_and_original_until_advanced() {
        let seed: Guid = "6f9619ff-8b86-d011-b42d-00c04fc964ff".parse().unwrap();
        let g = SequentialGenerator::with_seed(seed, 3).unwrap();
        assert_eq!(g.step(), 3);
        assert_eq!(g.current(), seed);
        assert_eq!(g.current(), seed);

        let next = g.generate().unwrap();
        assert_eq!(g.current(), next);
        assert_eq!(g.original(), seed);
        assert!(seed < next);
    }

    /// Adds step to the last byte and carries leftward
    #[test]
    fn adds_step_to_the_last_byte_and_carries_leftward() {
        let cases = [
            (
                "00000000-0000-0000-0000-0000000000fe",
                1,
                "00000000-0000-0000-0000-0000000000ff",
            ),
            (
                "00000000-0000-0000-0000-0000000000ff",
                1,
                "00000000-0000-0000-0000-000000000100",
            ),
            (
                "00000000-0000-0000-0000-000000000002",
                255,
                "00000000-0000-0000-0000-000000000101",
            ),
            (
                "00000000-0000-0000-00ff-ffffffffffff",
                1,
                "00000000-0000-0000-0100-000000000000",
            ),
            (
                "00000000-0000-0000-ffff-ffffffffffff",
                1,
                "00000000-0000-0100-0000-000000000000",
            ),
            (
                "00000000-ff00-ffff-ffff-ffffffffffff",
                1,
                "00000000-0001-0000-0000-000000000000",
            ),
            (
                "ffffff00-ffff-ffff-ffff-ffffffffffff",
                1,
                "00000001-0000-0000-0000-000000000000",
            ),
        ];

        for (seed, step, expected) in cases {
            let g = SequentialGenerator::with_seed_str(seed, step).unwrap();
            assert_eq!(g.generate().unwrap().to_string(), expected, "{}", seed);
        }
    }

    /// Counts like a big-endian integer over native bytes
    #[test]
    fn counts_like_a_big_endian_integer_over_native_bytes() {
        for step in [1u8, 2, 7, 128, 255] {
            let seed = Guid::from_native_bytes(rand::random());
            let g = SequentialGenerator::with_seed(seed, step).unwrap();
            let mut expected = seed.to_u128(ByteOrder::Native);
            for _ in 0..1_000 {
                let Some(n) = expected.checked_add(step as u128) else {
                    break;
                };
                expected = n;
                assert_eq!(g.generate().unwrap().to_u128(ByteOrder::Native), expected);
            }
        }
    }

    /// Returns overflow error at max value
    #[test]
    fn returns_overflow_error_at_max_value() {
        let g = SequentialGenerator::with_seed(Guid::MAX, 1).unwrap();
        assert_eq!(g.generate(), Err(Error::Overflow));
        assert!(g.is_exhausted());
        assert_eq!(g.current(), Guid::MAX);
        assert_eq!(g.generate(), Err(Error::Overflow));
    }

    /// Stays exhausted after reaching max value
    #[test]
    fn stays_exhausted_after_reaching_max_value() {
        let seed = Guid::from_u128(u128::MAX - 20, ByteOrder::Native);
        let g = SequentialGenerator::with_seed(seed, 10).unwrap();
        assert!(g.generate().is_ok());
        assert_eq!(g.generate(), Ok(Guid::MAX));
        assert!(!g.is_exhausted());
        assert_eq!(g.generate(), Err(Error::Overflow));
        assert_eq!(g.current(), Guid::MAX);
        assert_eq!(g.iter().count(), 0);
    }

    /// Ends iteration when exhausted
    #[test]
    fn ends_iteration_when_exhausted() {
        let seed = Guid::from_u128(u128::MAX - 5, ByteOrder::Native);
        let g = SequentialGenerator::with_seed(seed, 2).unwrap();
        let v: Vec<Guid> = g.iter().collect();
        assert_eq!(v.len(), 2);
        assert_eq!(v[1], Guid::from_u128(u128::MAX - 1, ByteOrder::Native));
        assert_eq!(g.iter().next(), None);
    }

    /// Seeds random generators differently
    #[cfg(feature = "global_gen")]
    #[test]
    fn seeds_random_generators_differently() {
        let x = SequentialGenerator::new(1).unwrap();
        let y = SequentialGenerator::new(1).unwrap();
        assert_ne!(x.original(), y.original());
        assert_eq!(x.original().version(), Some(4));
    }

    /// Generates no duplicates and no gaps under multithreading
    #[test]
    fn generates_no_duplicates_and_no_gaps_under_multithreading() {
        use std::{sync::mpsc, thread};

        const N_THREADS: usize = 8;
        const N_PER_THREAD: usize = 125;

        let seed: Guid = "01020304-0506-0708-090a-0b0c0d0e0f10".parse().unwrap();
        let g = SequentialGenerator::with_seed(seed, 1).unwrap();
        let (tx, rx) = mpsc::channel();
        thread::scope(|s| {
            for _ in 0..N_THREADS {
                let tx = tx.clone();
                let g = &g;
                s.spawn(move || {
                    let mut prev = Guid::NIL;
                    for _ in 0..N_PER_THREAD {
                        let e = g.generate().unwrap();
                        // each thread observes an increasing subsequence
                        assert!(prev < e);
                        prev = e;
                        tx.send(e).unwrap();
                    }
                });
            }
        });
        drop(tx);

        let mut v: Vec<Guid> = rx.iter().collect();
        v.sort();
        assert_eq!(v.len(), N_THREADS * N_PER_THREAD);

        let base = seed.to_u128(ByteOrder::Native);
        for (i, e) in v.iter().enumerate() {
            assert_eq!(e.to_u128(ByteOrder::Native), base + i as u128 + 1);
        }
        assert_eq!(g.current(), v[v.len() - 1]);
    }
}
