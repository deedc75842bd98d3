use crate::Word;

#[derive(Debug, Default)]
enum StorageInner<'a> {
    #[default]
    Empty,
    Owned(Box<[Word]>),
    Borrowed(&'a [Word]),
    BorrowedMut(&'a mut [Word]),
}

/// The backing memory of a bit stream.
///
/// Storage comes in different flavors, it can be allocated and
/// owned by the stream or borrowed from the caller. Owned memory
/// is released when the storage is dropped; borrowed memory is
/// never touched beyond the lifetime `'a`.
#[derive(Debug, Default)]
pub(crate) struct Storage<'a>(StorageInner<'a>);

impl<'a> Storage<'a> {
    /// Creates storage without any memory attached.
    #[inline]
    pub const fn empty() -> Self {
        Self(StorageInner::Empty)
    }

    /// Allocates `words` zeroed words of owned storage.
    #[inline]
    pub fn zeroed(words: usize) -> Self {
        log::trace!("Allocating {words} words of owned storage");
        Self(StorageInner::Owned(vec![0; words].into_boxed_slice()))
    }

    /// Creates storage over a read-only borrowed slice.
    #[inline]
    pub const fn borrowed(words: &'a [Word]) -> Self {
        Self(StorageInner::Borrowed(words))
    }

    /// Creates storage over a mutable borrowed slice.
    #[inline]
    pub fn borrowed_mut(words: &'a mut [Word]) -> Self {
        Self(StorageInner::BorrowedMut(words))
    }

    /// Whether memory is attached to this storage.
    #[inline]
    pub fn is_bound(&self) -> bool {
        !matches!(self.0, StorageInner::Empty)
    }

    /// Whether the memory is owned by this storage.
    #[inline]
    pub fn is_owned(&self) -> bool {
        matches!(self.0, StorageInner::Owned(..))
    }

    /// Gets a view of the words in storage.
    pub fn words(&self) -> &[Word] {
        match &self.0 {
            StorageInner::Empty => &[],
            StorageInner::Owned(words) => words,
            StorageInner::Borrowed(words) => words,
            StorageInner::BorrowedMut(words) => words,
        }
    }

    /// Gets a mutable view of the words in storage.
    ///
    /// # Panics
    ///
    /// Panics when the storage was borrowed immutably.
    pub fn words_mut(&mut self) -> &mut [Word] {
        match &mut self.0 {
            StorageInner::Empty => &mut [],
            StorageInner::Owned(words) => words,
            StorageInner::BorrowedMut(words) => words,
            StorageInner::Borrowed(..) => panic!("cannot write to read-only storage"),
        }
    }

    /// Gets a view of the storage as a byte slice.
    #[inline]
    pub fn bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.words())
    }

    /// Gets a mutable view of the storage as a byte slice.
    #[inline]
    pub fn bytes_mut(&mut self) -> &mut [u8] {
        bytemuck::cast_slice_mut(self.words_mut())
    }
}
