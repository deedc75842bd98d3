//! Provides a word-backed buffer for bit level serialization and
//! deserialization of data.
//!
//! Many binary formats and network protocols pack their fields
//! without regard for byte boundaries. [`BitStream`] places and
//! extracts such fields of 1 to 32 bits at an arbitrary bit cursor,
//! on top of a fixed block of [`Word`]s that is either owned by the
//! stream or borrowed from the caller.
//!
//! # Layout
//!
//! Bits are addressed starting at the LSB of the first word, working
//! towards the MSB. The low bits of a field value map to the low
//! bits of its position in the buffer. A field never spans more than
//! two adjacent words.
//!
//! No endianness normalization is performed: words are stored in
//! native byte order.

#![deny(rust_2018_idioms, rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod fault;
pub use fault::Fault;

mod mask;
pub use mask::{mask, MASKS};

mod mode;
pub use mode::Mode;

mod storage;

mod stream;
pub use stream::BitStream;

/// The unit of storage in a [`BitStream`].
pub type Word = u32;

/// The width of a single [`Word`] in bits.
pub const WORD_BITS: u32 = Word::BITS;

/// The maximum number of bits transferred by a single field
/// operation.
pub const MAX_FIELD_BITS: u32 = u32::BITS;
