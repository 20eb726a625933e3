//! Binary wire format for in-game item instances: one versioned
//! envelope over every item variant, plus the identification-roll and
//! shiny-overlay codecs. Purely functional over byte buffers; transport
//! and item definitions live elsewhere.

pub mod bytebuf;
pub mod codec;
pub mod error;
pub mod item;

pub use codec::var_int::VarInt;
pub use codec::var_uint::VarUint;
pub use error::{DecodeError, ItemError};
pub use item::context::{DecodeContext, DecodeMode};
pub use item::identification::{Identification, IdentificationEntry, RollQuality};
pub use item::kind::{GearType, ItemKind};
pub use item::payload::ItemPayload;
pub use item::shiny::ShinyStat;
pub use item::{
    decode_item, decode_item_with, encode_item, DecodedItem, ItemEnvelope, OpaqueItem,
    TemplateRef, MAX_TEMPLATE_NAME_LEN, SCHEMA_VERSION,
};
