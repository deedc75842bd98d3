/// The I/O mode a [`BitStream`][crate::BitStream] operates in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// No mode has been assigned yet.
    ///
    /// Streams in this mode must be bound with
    /// [`bind_mode`][crate::BitStream::bind_mode] before use.
    #[default]
    Unset,
    /// The stream decodes fields from its storage.
    Reader,
    /// The stream encodes fields into its storage.
    Writer,
}

impl Mode {
    /// Whether the mode was already assigned.
    #[inline]
    pub const fn is_bound(self) -> bool {
        !matches!(self, Self::Unset)
    }
}
