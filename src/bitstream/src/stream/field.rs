use super::BitStream;
use crate::{mask, Mode, Word, MAX_FIELD_BITS, WORD_BITS};

// Whether the byte view of storage places bits in the same order as
// field operations do. Only then can byte spans be block copied.
const BYTE_VIEW_MATCHES: bool = cfg!(target_endian = "little");

// Word indices and shift amount for a field of `bits` bits at `pos`.
//
// `start == end` when the field fits into a single word. Otherwise
// it spans exactly `start` and `end == start + 1`.
#[inline(always)]
fn locate(pos: u32, bits: u32) -> (usize, usize, u32) {
    let start = pos / WORD_BITS;
    let end = (pos + bits - 1) / WORD_BITS;
    let shift = pos % WORD_BITS;

    (start as usize, end as usize, shift)
}

impl BitStream<'_> {
    #[inline]
    fn check_field(&self, mode: Mode, bits: u32) {
        assert!(self.fault.is_none(), "field access on a faulted bit stream");
        assert_eq!(self.mode, mode, "field access does not match stream mode");
        assert!(
            (1..=MAX_FIELD_BITS).contains(&bits),
            "field width must be within 1..={MAX_FIELD_BITS} bits, got {bits}"
        );
        assert!(
            bits <= self.remaining(),
            "field of {bits} bits at bit {} overruns stream of {} bits",
            self.pos,
            self.len_bits
        );
    }

    #[inline]
    fn check_span(&self, mode: Mode, nbytes: usize) {
        assert!(self.fault.is_none(), "byte access on a faulted bit stream");
        assert_eq!(self.mode, mode, "byte access does not match stream mode");
        assert!(
            nbytes as u64 * u8::BITS as u64 <= self.remaining() as u64,
            "span of {nbytes} bytes at bit {} overruns stream of {} bits",
            self.pos,
            self.len_bits
        );
    }

    /// Writes the low `bits` bits of `value` at the cursor and advances
    /// it accordingly.
    ///
    /// Higher bits of `value` are discarded. Bits of the storage outside
    /// the field are preserved.
    ///
    /// # Panics
    ///
    /// Panics when the stream is not a valid writer, when `bits` is not
    /// in `1..=32` or when the field does not fit into the remaining
    /// capacity.
    pub fn write(&mut self, bits: u32, value: u32) {
        self.check_field(Mode::Writer, bits);

        let value = value as u64 & mask(bits);
        let (start, end, shift) = locate(self.pos, bits);
        let words = self.storage.words_mut();

        if start == end {
            let field = mask(bits) << shift;
            words[start] = ((words[start] as u64 & !field) | (value << shift)) as Word;
        } else {
            // The low part of the value fills the top of the start word,
            // the rest goes into the bottom of the end word.
            let low = WORD_BITS - shift;
            let high = bits - low;

            let kept = words[start] as u64 & mask(shift);
            words[start] = (kept | ((value & mask(low)) << shift)) as Word;

            let kept = words[end] as u64 & !mask(high);
            words[end] = (kept | (value >> low)) as Word;
        }

        self.pos += bits;
    }

    /// Returns the next `bits` bits at the cursor without advancing it.
    ///
    /// # Panics
    ///
    /// Panics when the stream is not a valid reader, when `bits` is not
    /// in `1..=32` or when the field does not fit into the remaining
    /// capacity.
    pub fn peek(&self, bits: u32) -> u32 {
        self.check_field(Mode::Reader, bits);

        let (start, end, shift) = locate(self.pos, bits);
        let words = self.storage.words();

        let value = if start == end {
            words[start] as u64 >> shift
        } else {
            (words[start] as u64 >> shift) | ((words[end] as u64) << (WORD_BITS - shift))
        };

        (value & mask(bits)) as u32
    }

    /// Reads `bits` bits at the cursor and advances it accordingly.
    ///
    /// # Panics
    ///
    /// See [`Self::peek`].
    pub fn read(&mut self, bits: u32) -> u32 {
        let value = self.peek(bits);
        self.pos += bits;
        value
    }

    /// Writes whole bytes from `data` at the cursor.
    ///
    /// Byte-aligned cursors copy the span directly into storage, others
    /// fall back to a write per byte.
    ///
    /// # Panics
    ///
    /// Panics when the stream is not a valid writer or when the span
    /// does not fit into the remaining capacity.
    pub fn write_bytes(&mut self, data: &[u8]) {
        self.check_span(Mode::Writer, data.len());

        if BYTE_VIEW_MATCHES && self.pos % u8::BITS == 0 {
            let start = (self.pos >> 3) as usize;
            self.storage.bytes_mut()[start..start + data.len()].copy_from_slice(data);

            // The bounds check makes sure this does not overflow.
            self.pos += data.len() as u32 * u8::BITS;
        } else {
            for &byte in data {
                self.write(u8::BITS, byte as u32);
            }
        }
    }

    /// Fills `dest` with whole bytes read at the cursor.
    ///
    /// Byte-aligned cursors copy the span directly out of storage,
    /// others fall back to a read per byte.
    ///
    /// # Panics
    ///
    /// Panics when the stream is not a valid reader or when the span
    /// does not fit into the remaining capacity.
    pub fn read_bytes(&mut self, dest: &mut [u8]) {
        self.check_span(Mode::Reader, dest.len());

        if BYTE_VIEW_MATCHES && self.pos % u8::BITS == 0 {
            let start = (self.pos >> 3) as usize;
            dest.copy_from_slice(&self.storage.bytes()[start..start + dest.len()]);

            self.pos += dest.len() as u32 * u8::BITS;
        } else {
            for byte in dest.iter_mut() {
                *byte = self.read(u8::BITS) as u8;
            }
        }
    }
}
