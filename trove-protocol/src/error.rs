use thiserror::Error;

use crate::item::kind::ItemKind;

/// Everything that can go wrong while reading item bytes.
///
/// Strict decoding surfaces all of these. Lenient decoding downgrades
/// the three `Unknown*` variants to skip-or-preserve behavior; the rest
/// always abort the decode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("input ended while reading {0}")]
    TruncatedInput(&'static str),
    #[error("varint for {0} never terminated within the maximum size")]
    MalformedVarint(&'static str),
    #[error("unknown identification stat id {0}")]
    UnknownStatKey(u64),
    #[error("unknown shiny tracker id {0}")]
    UnknownShinyKey(u64),
    #[error("unknown item variant tag {0}")]
    UnknownVariant(u64),
    #[error("schema violation: {0}")]
    SchemaViolation(&'static str),
    #[error("unsupported schema version {0}")]
    UnsupportedVersion(u8),
}

/// Invariant violations caught when building an item in memory. These
/// are producer bugs: encoding itself never fails, because nothing that
/// passes construction can produce invalid bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItemError {
    #[error("duplicate identification stat id {0}")]
    DuplicateStat(u64),
    #[error("roll percentile {0} is outside 0..=100")]
    QualityOutOfRange(u8),
    #[error("{0:?} does not carry identifications")]
    IdentificationNotSupported(ItemKind),
    #[error("{0:?} cannot be shiny")]
    ShinyNotSupported(ItemKind),
    #[error("named items require a name template reference")]
    TemplateNameRequired,
    #[error("template name is {0} bytes, longer than the maximum of {1}")]
    TemplateNameTooLong(usize, usize),
}
