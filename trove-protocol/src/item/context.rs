use trove_registry::{MappingTable, IDENTIFICATIONS, SHINIES};

/// How a decoder treats data newer than its own mapping tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeMode {
    /// Anything unknown aborts the decode. The right mode whenever the
    /// consumer acts on item contents.
    Strict,
    /// Unknown identification entries are skipped, unknown shiny
    /// trackers become placeholders, and unknown variants are kept as
    /// opaque blobs. The forward-compatibility path for readers older
    /// than the producer.
    Lenient,
}

/// The mapping tables in effect for one decode, plus an account of
/// everything lenient mode had to gloss over.
pub struct DecodeContext<'a> {
    mode: DecodeMode,
    identifications: &'a MappingTable,
    shinies: &'a MappingTable,
    /// Total bytes of unknown identification entries skipped, entry
    /// framing included.
    pub skipped_identification_bytes: usize,
    /// Shiny trackers decoded as placeholders because their id was
    /// outside the known range.
    pub unknown_shiny_keys: u32,
    /// Envelopes preserved opaquely because of an unknown variant tag.
    pub opaque_items: u32,
}

impl DecodeContext<'static> {
    /// Strict decoding against the bundled mapping tables.
    pub fn strict() -> Self {
        Self::with_tables(DecodeMode::Strict, &IDENTIFICATIONS, &SHINIES)
    }

    /// Lenient decoding against the bundled mapping tables.
    pub fn lenient() -> Self {
        Self::with_tables(DecodeMode::Lenient, &IDENTIFICATIONS, &SHINIES)
    }
}

impl<'a> DecodeContext<'a> {
    /// Decoding against caller-supplied tables, for consumers that load
    /// mapping documents newer than the bundled snapshot.
    pub fn with_tables(
        mode: DecodeMode,
        identifications: &'a MappingTable,
        shinies: &'a MappingTable,
    ) -> Self {
        Self {
            mode,
            identifications,
            shinies,
            skipped_identification_bytes: 0,
            unknown_shiny_keys: 0,
            opaque_items: 0,
        }
    }

    pub fn mode(&self) -> DecodeMode {
        self.mode
    }

    pub fn is_lenient(&self) -> bool {
        self.mode == DecodeMode::Lenient
    }

    pub fn identifications(&self) -> &MappingTable {
        self.identifications
    }

    pub fn shinies(&self) -> &MappingTable {
        self.shinies
    }

    /// Whether lenient decoding had to skip or preserve anything.
    pub fn skipped_anything(&self) -> bool {
        self.skipped_identification_bytes > 0 || self.unknown_shiny_keys > 0 || self.opaque_items > 0
    }
}
