use thiserror::Error;

/// Faults which invalidate a [`BitStream`][crate::BitStream].
///
/// Once recorded, a fault sticks to the stream until it is
/// [`reset`][crate::BitStream::reset].
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Hash)]
pub enum Fault {
    /// Attempted to bind the I/O mode or the storage of a stream
    /// which already had one.
    #[error("mode or storage of the stream is already bound")]
    AlreadyBound,

    /// The size of the storage cannot be represented by the
    /// 32-bit bit counter of the stream.
    #[error("buffer size overflows the bit counter")]
    SizeOverflow,
}
