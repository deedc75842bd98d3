use std::mem::size_of;

use crate::{storage::Storage, Fault, Mode, Word};

mod field;

const WORD_BYTES: usize = size_of::<Word>();

// Converts a byte size into the number of bits it spans.
//
// The size is rejected when `nbytes * 8 + 1` does not fit into
// the 32-bit counter we use for bookkeeping.
#[inline]
fn bit_length(nbytes: usize) -> Result<u32, Fault> {
    u32::try_from(nbytes)
        .ok()
        .and_then(|n| n.checked_mul(u8::BITS))
        .filter(|&bits| bits < u32::MAX)
        .ok_or(Fault::SizeOverflow)
}

#[inline]
fn words_bit_length(nwords: usize) -> Result<u32, Fault> {
    nwords
        .checked_mul(WORD_BYTES)
        .ok_or(Fault::SizeOverflow)
        .and_then(bit_length)
}

/// A buffer which enables reading and writing of bit fields at
/// arbitrary bit offsets.
///
/// A stream is either a reader or a writer, which is decided once at
/// construction or through [`Self::bind_mode`]. Its storage is a fixed
/// block of [`Word`]s which is either owned by the stream or borrowed
/// from the caller, and never grows.
///
/// Faults during construction or binding are recorded in the stream
/// rather than returned as errors from constructors. Check
/// [`Self::valid`] or [`Self::status`] before driving the stream;
/// field operations on an invalid stream panic.
#[derive(Debug, Default)]
pub struct BitStream<'a> {
    // The memory that fields are placed into.
    storage: Storage<'a>,

    // The I/O mode, assigned at most once.
    mode: Mode,

    // A sticky fault which invalidates the stream.
    fault: Option<Fault>,

    // The capacity of the stream in bits.
    len_bits: u32,

    // The current cursor in bits.
    pos: u32,
}

impl<'a> BitStream<'a> {
    /// Creates an empty [`BitStream`] without mode and storage.
    ///
    /// Both must be bound with [`Self::bind_mode`] and [`Self::attach`]
    /// before the stream can be used.
    pub const fn new() -> Self {
        Self {
            storage: Storage::empty(),
            mode: Mode::Unset,
            fault: None,
            len_bits: 0,
            pos: 0,
        }
    }

    const fn faulted(mode: Mode, fault: Fault) -> Self {
        Self {
            storage: Storage::empty(),
            mode,
            fault: Some(fault),
            len_bits: 0,
            pos: 0,
        }
    }

    /// Creates a [`BitStream`] in the given `mode` over caller-owned
    /// storage.
    ///
    /// The stream records [`Fault::SizeOverflow`] and drops the
    /// reference when the storage is too large to be addressed.
    pub fn from_storage(words: &'a mut [Word], mode: Mode) -> Self {
        match words_bit_length(words.len()) {
            Ok(len_bits) => Self {
                storage: Storage::borrowed_mut(words),
                mode,
                fault: None,
                len_bits,
                pos: 0,
            },

            Err(fault) => {
                log::debug!("Rejecting {} words of borrowed storage: {fault}", words.len());
                Self::faulted(mode, fault)
            }
        }
    }

    /// Creates a reading [`BitStream`] over caller-owned, read-only
    /// storage.
    pub fn from_words(words: &'a [Word]) -> Self {
        match words_bit_length(words.len()) {
            Ok(len_bits) => Self {
                storage: Storage::borrowed(words),
                mode: Mode::Reader,
                fault: None,
                len_bits,
                pos: 0,
            },

            Err(fault) => {
                log::debug!("Rejecting {} words of borrowed storage: {fault}", words.len());
                Self::faulted(Mode::Reader, fault)
            }
        }
    }

    /// Creates a reading [`BitStream`] over an owned copy of `data`.
    ///
    /// The capacity of the stream is exactly the bits in `data`.
    pub fn from_bytes(data: &[u8]) -> Self {
        let len_bits = match bit_length(data.len()) {
            Ok(len_bits) => len_bits,
            Err(fault) => {
                log::debug!("Rejecting {} bytes of input data: {fault}", data.len());
                return Self::faulted(Mode::Reader, fault);
            }
        };

        // Reserve a spare word past the data so the trailing word
        // of a two-word field always exists.
        let mut storage = Storage::zeroed(data.len().div_ceil(WORD_BYTES) + 1);
        storage.bytes_mut()[..data.len()].copy_from_slice(data);

        Self {
            storage,
            mode: Mode::Reader,
            fault: None,
            len_bits,
            pos: 0,
        }
    }

    /// Creates a writing [`BitStream`] with owned, zeroed storage for
    /// `nbytes` bytes.
    ///
    /// Nothing is allocated when the size is rejected.
    pub fn with_capacity(nbytes: usize) -> Self {
        let len_bits = match bit_length(nbytes) {
            Ok(len_bits) => len_bits,
            Err(fault) => {
                log::debug!("Rejecting writer capacity of {nbytes} bytes: {fault}");
                return Self::faulted(Mode::Writer, fault);
            }
        };

        Self {
            storage: Storage::zeroed(nbytes.div_ceil(WORD_BYTES)),
            mode: Mode::Writer,
            fault: None,
            len_bits,
            pos: 0,
        }
    }

    /// Releases owned storage and returns the stream to the state
    /// of [`Self::new`].
    ///
    /// Borrowed storage is handed back untouched.
    pub fn reset(&mut self) {
        log::trace!(
            "Resetting bit stream (owned storage: {})",
            self.storage.is_owned()
        );
        *self = Self::new();
    }

    fn record(&mut self, fault: Fault) -> Fault {
        log::debug!("Bit stream faulted: {fault}");
        self.fault = Some(fault);
        fault
    }

    /// Whether the stream is bound to a mode and has no fault.
    #[inline]
    pub fn valid(&self) -> bool {
        self.fault.is_none() && self.mode.is_bound()
    }

    /// Gets the fault recorded on this stream, if any.
    #[inline]
    pub fn fault(&self) -> Option<Fault> {
        self.fault
    }

    /// Converts the recorded fault into a [`Result`].
    #[inline]
    pub fn status(&self) -> Result<(), Fault> {
        self.fault.map_or(Ok(()), Err)
    }

    /// Gets the current I/O mode.
    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Whether the stream is in reading mode.
    #[inline]
    pub fn is_reader(&self) -> bool {
        self.mode == Mode::Reader
    }

    /// Whether the stream is in writing mode.
    #[inline]
    pub fn is_writer(&self) -> bool {
        self.mode == Mode::Writer
    }

    /// Assigns the I/O mode of a stream which has none yet.
    ///
    /// Once a mode is bound, any further attempt records and returns
    /// [`Fault::AlreadyBound`] and keeps the current mode.
    ///
    /// `mode` must be [`Mode::Reader`] or [`Mode::Writer`]. Binding
    /// [`Mode::Unset`] is a no-op in release builds and panics when
    /// debug assertions are enabled.
    pub fn bind_mode(&mut self, mode: Mode) -> Result<(), Fault> {
        debug_assert!(mode.is_bound(), "cannot bind a stream to the unset mode");

        if self.mode.is_bound() {
            return Err(self.record(Fault::AlreadyBound));
        }

        self.mode = mode;
        Ok(())
    }

    /// Attaches caller-owned storage to a stream which has none yet.
    ///
    /// Records and returns [`Fault::AlreadyBound`] when storage is
    /// already present, or [`Fault::SizeOverflow`] when it is too
    /// large to be addressed. On success, the cursor starts over at
    /// the first bit.
    pub fn attach(&mut self, words: &'a mut [Word]) -> Result<(), Fault> {
        if self.storage.is_bound() {
            return Err(self.record(Fault::AlreadyBound));
        }

        let len_bits = words_bit_length(words.len()).map_err(|f| self.record(f))?;

        self.storage = Storage::borrowed_mut(words);
        self.len_bits = len_bits;
        self.pos = 0;

        Ok(())
    }

    /// Gets the capacity of the stream in bits.
    #[inline]
    pub fn size_bits(&self) -> u32 {
        self.len_bits
    }

    /// Gets the capacity of the stream in bytes.
    #[inline]
    pub fn size_bytes(&self) -> u32 {
        self.len_bits >> 3
    }

    /// Gets the current cursor position in bits.
    #[inline]
    pub fn position(&self) -> u32 {
        self.pos
    }

    /// Gets the number of bits between the cursor and the end of the
    /// stream.
    #[inline]
    pub fn remaining(&self) -> u32 {
        self.len_bits - self.pos
    }

    /// Moves the cursor to bit `pos`.
    ///
    /// # Panics
    ///
    /// Panics when the stream is invalid or `pos` is not less than
    /// [`Self::size_bits`].
    pub fn seek(&mut self, pos: u32) {
        assert!(self.valid(), "seek on an invalid bit stream");
        assert!(
            pos < self.len_bits,
            "seek to bit {pos} out of bounds for stream of {} bits",
            self.len_bits
        );

        self.pos = pos;
    }

    /// Advances the cursor to the next byte boundary.
    ///
    /// Bits skipped over are left untouched.
    pub fn align_to_byte(&mut self) {
        assert!(self.valid(), "alignment of an invalid bit stream");

        // Capacities are always whole bytes, so this stays in bounds.
        self.pos = self.pos.next_multiple_of(u8::BITS);
        debug_assert!(self.pos <= self.len_bits);
    }

    /// Gets the raw words backing the stream.
    #[inline]
    pub fn words(&self) -> &[Word] {
        self.storage.words()
    }

    /// Gets the storage as bytes, limited to [`Self::size_bytes`].
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.storage.bytes()[..self.size_bytes() as usize]
    }

    /// Gets the bytes covered by the cursor so far, including a
    /// trailing partial byte.
    ///
    /// For writers, this is the encoded output.
    #[inline]
    pub fn view(&self) -> &[u8] {
        &self.storage.bytes()[..self.pos.div_ceil(u8::BITS) as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_length_bounds() {
        assert_eq!(bit_length(0), Ok(0));
        assert_eq!(bit_length(4), Ok(32));

        // The largest size where `bits + 1` still fits.
        assert_eq!(bit_length(0x1FFF_FFFF), Ok(0xFFFF_FFF8));
        assert_eq!(bit_length(0x2000_0000), Err(Fault::SizeOverflow));
        assert_eq!(bit_length(usize::MAX), Err(Fault::SizeOverflow));
    }

    #[test]
    fn words_bit_length_bounds() {
        assert_eq!(words_bit_length(2), Ok(64));
        assert_eq!(words_bit_length(0x0800_0000), Err(Fault::SizeOverflow));
        assert_eq!(words_bit_length(usize::MAX), Err(Fault::SizeOverflow));
    }
}
