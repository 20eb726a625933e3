use bytes::{Buf, BufMut};
use itertools::Itertools;
use log::warn;

use crate::bytebuf::{ByteBuf, ByteBufMut};
use crate::codec::{var_int::VarInt, var_uint::VarUint, Codec};
use crate::error::{DecodeError, ItemError};

use super::context::DecodeContext;

/// Where one rolled value sits within its template's roll range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollQuality {
    /// Percentile of the possible range, `0..=100`.
    Percent(u8),
    /// The template defines this stat as a fixed value; it never rolls.
    Fixed,
    /// The item has not been identified yet. Distinct from an absent
    /// identification block: the stat exists, its roll is unrevealed.
    Unrevealed,
}

const QUALITY_FIXED: u8 = 254;
const QUALITY_UNREVEALED: u8 = 255;

impl RollQuality {
    pub(crate) const fn to_byte(self) -> u8 {
        match self {
            Self::Percent(percentile) => percentile,
            Self::Fixed => QUALITY_FIXED,
            Self::Unrevealed => QUALITY_UNREVEALED,
        }
    }

    pub(crate) fn from_byte(byte: u8) -> Result<Self, DecodeError> {
        match byte {
            0..=100 => Ok(Self::Percent(byte)),
            QUALITY_FIXED => Ok(Self::Fixed),
            QUALITY_UNREVEALED => Ok(Self::Unrevealed),
            _ => Err(DecodeError::SchemaViolation(
                "roll quality byte outside 0..=100 and the sentinels",
            )),
        }
    }
}

/// One rolled stat: the mapping-table id, the value that was rolled,
/// and how good the roll was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentificationEntry {
    pub stat: u64,
    pub value: i64,
    pub quality: RollQuality,
}

impl IdentificationEntry {
    pub fn new(stat: u64, value: i64, quality: RollQuality) -> Self {
        Self {
            stat,
            value,
            quality,
        }
    }

    /// Wire size of the entry body (value + quality byte), which is
    /// what the entry's length prefix declares.
    fn body_size(&self) -> usize {
        VarInt(self.value).written_size() + 1
    }
}

/// The full set of rolled stats on one item instance, canonicalized:
/// entries are held sorted by ascending stat id and ids are unique, so
/// equal identifications always encode to identical bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identification {
    entries: Vec<IdentificationEntry>,
}

impl Identification {
    /// Builds a canonical identification. Input order does not matter;
    /// duplicate stat ids and out-of-range percentiles are rejected.
    pub fn new(mut entries: Vec<IdentificationEntry>) -> Result<Self, ItemError> {
        for entry in &entries {
            if let RollQuality::Percent(percentile) = entry.quality {
                if percentile > 100 {
                    return Err(ItemError::QualityOutOfRange(percentile));
                }
            }
        }

        entries.sort_by_key(|entry| entry.stat);
        if let Some(duplicate) = entries.iter().duplicates_by(|entry| entry.stat).next() {
            return Err(ItemError::DuplicateStat(duplicate.stat));
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[IdentificationEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, stat: u64) -> Option<&IdentificationEntry> {
        self.entries
            .binary_search_by_key(&stat, |entry| entry.stat)
            .ok()
            .map(|index| &self.entries[index])
    }

    /// Wire layout: entry count, then per entry the stat id, a length
    /// prefix for the body, and the body itself (zig-zag value, quality
    /// byte). The length prefix is what lets a reader skip entries
    /// whose stat id postdates its mapping table.
    pub(crate) fn write(&self, buf: &mut impl BufMut) {
        buf.put_var_uint(&self.entries.len().into());
        for entry in &self.entries {
            buf.put_var_uint(&VarUint(entry.stat));
            buf.put_var_uint(&entry.body_size().into());
            buf.put_var_int(&VarInt(entry.value));
            buf.put_u8(entry.quality.to_byte());
        }
    }

    pub(crate) fn read(
        buf: &mut impl Buf,
        ctx: &mut DecodeContext<'_>,
    ) -> Result<Self, DecodeError> {
        let count = buf.try_get_var_uint("identification count")?.0;
        // Each entry occupies at least three bytes, so a count larger
        // than the remaining input is corrupt, not just big.
        if count > buf.remaining() as u64 {
            return Err(DecodeError::TruncatedInput("identification entries"));
        }

        let mut entries = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let stat = buf.try_get_var_uint("identification stat id")?;
            let body_len = buf.try_get_var_uint("identification body length")?.0;
            let mut body = buf.try_copy_to_bytes(body_len as usize, "identification body")?;

            if !ctx.identifications().is_known(stat.0) {
                if !ctx.is_lenient() {
                    return Err(DecodeError::UnknownStatKey(stat.0));
                }
                let framing = stat.written_size() + VarUint(body_len).written_size();
                ctx.skipped_identification_bytes += framing + body_len as usize;
                warn!(
                    "skipping unknown identification stat id {} ({} bytes)",
                    stat.0, body_len
                );
                continue;
            }

            let value = body.try_get_var_int("identification value")?;
            let quality = RollQuality::from_byte(body.try_get_u8("roll quality")?)?;
            if body.has_remaining() {
                // A newer writer extended the body of a stat we know.
                if !ctx.is_lenient() {
                    return Err(DecodeError::SchemaViolation(
                        "identification body longer than the known layout",
                    ));
                }
                ctx.skipped_identification_bytes += body.remaining();
            }

            entries.push(IdentificationEntry::new(stat.0, value.0, quality));
        }

        Self::new(entries).map_err(|error| match error {
            ItemError::DuplicateStat(_) => {
                DecodeError::SchemaViolation("duplicate identification stat id")
            }
            _ => DecodeError::SchemaViolation("invalid identification entry"),
        })
    }
}
