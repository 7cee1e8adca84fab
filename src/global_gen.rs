//! Default generator and entry point functions.

#![cfg(feature = "global_gen")]
#![cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]

use std::sync;

use crate::Guid;
use inner::GlobalGenInner;

/// Returns the lock handle of process-wide global generator, creating one if none exists.
fn lock_global_gen() -> sync::MutexGuard<'static, GlobalGenInner> {
    static G: sync::OnceLock<sync::Mutex<GlobalGenInner>> = sync::OnceLock::new();
    G.get_or_init(Default::default)
        .lock()
        .expect("seqguid: could not lock global generator")
}

/// Generates a COMB GUID.
///
/// This function employs a global generator with the default
/// [`COMB_TICK_DIVISOR`](crate::COMB_TICK_DIVISOR). On Unix, this function reseeds the generator
/// when the process ID changes (i.e., upon process forks) to prevent collisions across processes.
///
/// # Examples
///
/// ```rust
/// let guid = seqguid::comb();
/// println!("{}", guid); // e.g., "2ca4b2ce-6c13-40d4-bccf-b0ea00c5c101"
/// println!("{:?}", guid.as_bytes()); // as 16-byte native-order array
/// ```
pub fn comb() -> Guid {
    lock_global_gen().get_mut().generate()
}

/// Generates a random version 4 GUID.
///
/// # Examples
///
/// ```rust
/// let guid = seqguid::new_guid();
/// println!("{}", guid); // e.g., "2ca4b2ce-6c13-40d4-bccf-37d222820f6f"
/// assert_eq!(guid.version(), Some(4));
/// ```
pub fn new_guid() -> Guid {
    lock_global_gen().get_mut().generate_v4()
}

mod inner {
    use rand::rngs::{adapter::ReseedingRng, OsRng};
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Core;

    use crate::comb::{CombGenerator, RandSource};

    /// The random number generator of the global generator.
    ///
    /// The global generator currently employs [`ChaCha12Core`] with [`ReseedingRng`] wrapper to
    /// emulate the strategy used by [`rand::rngs::ThreadRng`].
    #[derive(Debug)]
    pub struct GlobalGenRng(ReseedingRng<ChaCha12Core, OsRng>);

    impl RandSource for GlobalGenRng {
        fn fill_bytes(&mut self, dest: &mut [u8]) {
            rand::RngCore::fill_bytes(&mut self.0, dest)
        }
    }

    /// A thin wrapper to reset the state when the process ID changes (i.e., upon Unix forks).
    #[derive(Debug)]
    pub struct GlobalGenInner {
        #[cfg(unix)]
        pid: u32,
        generator: CombGenerator<GlobalGenRng>,
    }

    impl Default for GlobalGenInner {
        fn default() -> Self {
            let core = ChaCha12Core::from_rng(OsRng)
                .expect("seqguid: could not initialize global generator");
            Self {
                #[cfg(unix)]
                pid: std::process::id(),
                generator: CombGenerator::new(GlobalGenRng(ReseedingRng::new(
                    core,
                    1024 * 64,
                    OsRng,
                ))),
            }
        }
    }

    impl GlobalGenInner {
        /// Returns a mutable reference to the inner [`CombGenerator`] instance, reseeding the
        /// generator on Unix if the process ID has changed.
        pub fn get_mut(&mut self) -> &mut CombGenerator<GlobalGenRng> {
            #[cfg(unix)]
            if self.pid != std::process::id() {
                log::trace!("process ID changed; reseeding global generator");
                *self = Default::default();
            }
            &mut self.generator
        }
    }
}


#[cfg(test)]
mod tests_v4 {
    use super::new_guid;

    const N_SAMPLES: usize = 100_000;
    thread_local!(static SAMPLES: Vec<String> = (0..N_SAMPLES).map(|_| new_guid().into()).collect());

    /// Generates canonical string
    #[test]
    fn generates_canonical_string() {
        let pattern = r"^[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$";
        let re = regex::Regex::new(pattern).unwrap();
        SAMPLES.with(|samples| {
            for e in samples {
                assert!(re.is_match(e));
            }
        });
    }

    /// Generates 100k identifiers without collision
    #[test]
    fn generates_100k_identifiers_without_collision() {
        use std::collections::HashSet;
        SAMPLES.with(|samples| {
            let s: HashSet<&String> = samples.iter().collect();
            assert_eq!(s.len(), N_SAMPLES);
        });
    }

    /// Sets correct version bits
    #[test]
    fn sets_correct_version_bits() {
        for _ in 0..1_000 {
            assert_eq!(new_guid().version(), Some(4));
        }
    }
}
