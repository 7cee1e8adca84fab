//! Sequential and COMB GUID generators with lossless byte-order conversions
//!
//! ```rust
//! use seqguid::{comb, SequentialGenerator};
//!
//! let guid = comb();
//! println!("{}", guid); // e.g. "2ca4b2ce-6c13-40d4-bccf-b0ea00c5c101"
//!
//! let g = SequentialGenerator::with_seed_str("6f9619ff-8b86-d011-b42d-00c04fc964ff", 1)?;
//! assert_eq!(g.generate()?.to_string(), "6f9619ff-8b86-d011-b42d-00c04fc96500");
//! # Ok::<(), seqguid::Error>(())
//! ```
//!
//! # Byte orders
//!
//! A [`Guid`] stores its bytes in the Windows/.NET *native* order, in which the first three groups
//! of the text form are little-endian. Conversions to the *compliant* order that Java, Python,
//! PostgreSQL and the `uuid` crate use are provided by [`layout`] and by the methods on [`Guid`]:
//!
//! ```rust
//! use seqguid::{layout::ByteOrder, Guid};
//!
//! let g: Guid = "01020304-0506-0708-090a-0b0c0d0e0f10".parse()?;
//! assert_eq!(g.as_bytes(), &[4, 3, 2, 1, 6, 5, 8, 7, 9, 10, 11, 12, 13, 14, 15, 16]);
//! assert_eq!(g.to_compliant_bytes(), [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16]);
//! assert_eq!(g.to_u128(ByteOrder::Compliant), 0x0102_0304_0506_0708_090a_0b0c_0d0e_0f10);
//! assert_eq!(g.hex_char_at(7)?, '4');
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Generators
//!
//! - [`SequentialGenerator`] adds a fixed step (1 to 255) to a seed on every call and guarantees
//!   a strictly increasing sequence across threads until the 128-bit space is exhausted.
//! - [`CombGenerator`] and [`comb()`] embed the SQL Server day and 1/300-second tick into the last
//!   six bytes of a random GUID, so that GUIDs created close in time cluster in an index.
//!
//! # Crate features
//!
//! - `global_gen` (default): [`comb()`], [`new_guid()`] and [`SequentialGenerator::new`] backed by
//!   a process-wide random number generator.
//! - `bigint` (default): conversions from and to [`num_bigint::BigInt`].
//! - `serde`: serialization of [`Guid`].
//! - `uuid`: conversions from and to [`uuid::Uuid`].

#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
pub use error::{Error, ParseError};

mod id;
pub use id::Guid;

pub mod layout;

mod codec;

pub mod comb;
pub use comb::{CombGenerator, COMB_TICK_DIVISOR};

mod sequential;
pub use sequential::SequentialGenerator;

mod global_gen;
#[cfg(feature = "global_gen")]
pub use global_gen::{comb, new_guid};
