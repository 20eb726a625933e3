//! The identification and shiny mapping tables: human-maintained,
//! append-only enumerations published as companion JSON documents and
//! consumed by the codec as lookup tables.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::Deserialize;
use thiserror::Error;

/// The identification mapping bundled with this build.
pub static IDENTIFICATIONS: LazyLock<MappingTable> = LazyLock::new(|| {
    MappingTable::from_json("identification", include_str!("../assets/identification.json"))
        .expect("Could not parse the bundled identification mapping.")
});

/// The shiny tracker mapping bundled with this build.
pub static SHINIES: LazyLock<MappingTable> = LazyLock::new(|| {
    MappingTable::from_json("shiny", include_str!("../assets/shiny.json"))
        .expect("Could not parse the bundled shiny mapping.")
});

#[derive(Debug, Error)]
pub enum MappingError {
    #[error("failed to parse mapping JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("mapping '{table}' contains no entries")]
    Empty { table: String },
    #[error("mapping '{table}' entry '{key}' has id {found}, expected {expected}")]
    NonContiguousId {
        table: String,
        key: String,
        expected: u64,
        found: u64,
    },
    #[error("mapping '{table}' contains duplicate key '{key}'")]
    DuplicateKey { table: String, key: String },
}

/// One row of a mapping document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MappingEntry {
    pub id: u64,
    pub key: String,
    #[serde(rename = "displayName", default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
}

#[derive(Deserialize)]
struct MappingFile {
    #[serde(rename = "lastUpdated", default)]
    last_updated: Option<String>,
    data: Vec<MappingEntry>,
}

/// An ordered, append-only mapping from wire index to stat key.
///
/// Ids are assigned by the mapping generator in file order starting at
/// zero; existing entries keep their id forever. A document whose ids
/// are not exactly `0..n` has been edited by hand and is rejected.
#[derive(Debug)]
pub struct MappingTable {
    name: String,
    last_updated: Option<String>,
    entries: Vec<MappingEntry>,
    by_key: HashMap<String, usize>,
}

impl MappingTable {
    pub fn from_json(name: &str, json: &str) -> Result<Self, MappingError> {
        let file: MappingFile = serde_json::from_str(json)?;
        Self::from_entries(name, file.last_updated, file.data)
    }

    pub fn from_entries(
        name: &str,
        last_updated: Option<String>,
        entries: Vec<MappingEntry>,
    ) -> Result<Self, MappingError> {
        if entries.is_empty() {
            return Err(MappingError::Empty {
                table: name.to_string(),
            });
        }

        let mut by_key = HashMap::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            if entry.id != index as u64 {
                return Err(MappingError::NonContiguousId {
                    table: name.to_string(),
                    key: entry.key.clone(),
                    expected: index as u64,
                    found: entry.id,
                });
            }
            if by_key.insert(entry.key.clone(), index).is_some() {
                return Err(MappingError::DuplicateKey {
                    table: name.to_string(),
                    key: entry.key.clone(),
                });
            }
        }

        Ok(Self {
            name: name.to_string(),
            last_updated,
            entries,
            by_key,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn last_updated(&self) -> Option<&str> {
        self.last_updated.as_deref()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `id` is inside the currently known enumeration range.
    pub fn is_known(&self, id: u64) -> bool {
        id < self.entries.len() as u64
    }

    pub fn by_id(&self, id: u64) -> Option<&MappingEntry> {
        self.entries.get(usize::try_from(id).ok()?)
    }

    pub fn by_key(&self, key: &str) -> Option<&MappingEntry> {
        self.by_key.get(key).map(|&index| &self.entries[index])
    }

    /// The wire index of `key`, the form the codec wants.
    pub fn id_of(&self, key: &str) -> Option<u64> {
        self.by_key.get(key).map(|&index| index as u64)
    }

    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }
}
