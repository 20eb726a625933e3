use bytes::{Buf, BufMut, Bytes, BytesMut};
use log::warn;

use crate::bytebuf::{ByteBuf, ByteBufMut};
use crate::codec::{var_uint::VarUint, Codec};
use crate::error::{DecodeError, ItemError};

pub mod context;
pub mod identification;
pub mod kind;
pub mod payload;
pub mod shiny;

use context::DecodeContext;
use identification::Identification;
use kind::ItemKind;
use payload::ItemPayload;
use shiny::ShinyStat;

/// Version byte every encoded item starts with. Bump it when the
/// header layout changes; decoders keep one decode path per historical
/// version so old bytes stay readable.
pub const SCHEMA_VERSION: u8 = 1;

/// Longest accepted name in a [`TemplateRef::Name`].
pub const MAX_TEMPLATE_NAME_LEN: usize = 128;

const TEMPLATE_REF_ID: u8 = 0;
const TEMPLATE_REF_NAME: u8 = 1;

/// Foreign key into the externally-maintained item definition catalog.
/// The codec carries it untouched; it never resolves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateRef {
    Id(u64),
    Name(String),
}

impl TemplateRef {
    fn write(&self, buf: &mut impl BufMut) {
        match self {
            Self::Id(id) => {
                buf.put_u8(TEMPLATE_REF_ID);
                buf.put_var_uint(&VarUint(*id));
            }
            Self::Name(name) => {
                buf.put_u8(TEMPLATE_REF_NAME);
                buf.put_string(name);
            }
        }
    }

    fn read(buf: &mut impl Buf) -> Result<Self, DecodeError> {
        match buf.try_get_u8("template reference kind")? {
            TEMPLATE_REF_ID => Ok(Self::Id(buf.try_get_var_uint("template id")?.0)),
            TEMPLATE_REF_NAME => Ok(Self::Name(
                buf.try_get_string("template name", MAX_TEMPLATE_NAME_LEN)?,
            )),
            _ => Err(DecodeError::SchemaViolation(
                "unknown template reference kind",
            )),
        }
    }
}

/// One encodable item instance: the common header plus exactly one
/// variant payload. Constructors enforce what the wire format cannot
/// express, so [`ItemEnvelope::encode`] is infallible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemEnvelope {
    template: TemplateRef,
    identification: Option<Identification>,
    shiny: Option<ShinyStat>,
    payload: ItemPayload,
}

impl ItemEnvelope {
    pub fn new(
        template: TemplateRef,
        payload: ItemPayload,
        identification: Option<Identification>,
        shiny: Option<ShinyStat>,
    ) -> Result<Self, ItemError> {
        let kind = payload.kind();
        if identification.is_some() && !kind.supports_identification() {
            return Err(ItemError::IdentificationNotSupported(kind));
        }
        if shiny.is_some() && !kind.supports_shiny() {
            return Err(ItemError::ShinyNotSupported(kind));
        }
        match &template {
            TemplateRef::Name(name) => {
                if name.len() > MAX_TEMPLATE_NAME_LEN {
                    return Err(ItemError::TemplateNameTooLong(
                        name.len(),
                        MAX_TEMPLATE_NAME_LEN,
                    ));
                }
            }
            TemplateRef::Id(_) => {
                if kind == ItemKind::NamedItem {
                    return Err(ItemError::TemplateNameRequired);
                }
            }
        }

        Ok(Self {
            template,
            identification,
            shiny,
            payload,
        })
    }

    /// An envelope with no identification and no shiny.
    pub fn plain(template: TemplateRef, payload: ItemPayload) -> Result<Self, ItemError> {
        Self::new(template, payload, None, None)
    }

    pub fn kind(&self) -> ItemKind {
        self.payload.kind()
    }

    pub fn template(&self) -> &TemplateRef {
        &self.template
    }

    pub fn identification(&self) -> Option<&Identification> {
        self.identification.as_ref()
    }

    pub fn shiny(&self) -> Option<&ShinyStat> {
        self.shiny.as_ref()
    }

    pub fn payload(&self) -> &ItemPayload {
        &self.payload
    }

    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::new();
        self.write(&mut buf);
        buf.freeze()
    }

    fn write(&self, buf: &mut impl BufMut) {
        buf.put_u8(SCHEMA_VERSION);
        buf.put_var_uint(&VarUint(self.kind().tag()));
        self.template.write(buf);
        // Both presence bytes are written for every variant, so a
        // decoder can always police them against the capability table.
        buf.put_option(&self.identification, |buf, identification| {
            identification.write(buf)
        });
        buf.put_option(&self.shiny, |buf, shiny| shiny.write(buf));
        self.payload.write(buf);
    }

    fn read(buf: &mut impl Buf, ctx: &mut DecodeContext<'_>) -> Result<DecodedItem, DecodeError> {
        let version = buf.try_get_u8("schema version")?;
        match version {
            SCHEMA_VERSION => Self::read_v1(buf, ctx),
            other => Err(DecodeError::UnsupportedVersion(other)),
        }
    }

    fn read_v1(buf: &mut impl Buf, ctx: &mut DecodeContext<'_>) -> Result<DecodedItem, DecodeError> {
        let tag = buf.try_get_var_uint("variant tag")?.0;
        let Some(kind) = ItemKind::from_tag(tag) else {
            if !ctx.is_lenient() {
                return Err(DecodeError::UnknownVariant(tag));
            }
            ctx.opaque_items += 1;
            warn!("preserving item with unknown variant tag {tag} opaquely");
            let body = buf.copy_to_bytes(buf.remaining());
            return Ok(DecodedItem::Opaque(OpaqueItem {
                version: SCHEMA_VERSION,
                tag,
                body,
            }));
        };

        let template = TemplateRef::read(buf)?;

        let identification = match buf.try_get_u8("identification presence")? {
            0 => None,
            1 => {
                // Reject before touching the block: a variant outside
                // the capability table must not have one at all.
                if !kind.supports_identification() {
                    return Err(DecodeError::SchemaViolation(
                        "identification block on a variant that does not carry identifications",
                    ));
                }
                Some(Identification::read(buf, ctx)?)
            }
            _ => return Err(DecodeError::SchemaViolation("invalid presence byte")),
        };

        let shiny = match buf.try_get_u8("shiny presence")? {
            0 => None,
            1 => {
                if !kind.supports_shiny() {
                    return Err(DecodeError::SchemaViolation(
                        "shiny block on a variant that cannot be shiny",
                    ));
                }
                Some(ShinyStat::read(buf, ctx)?)
            }
            _ => return Err(DecodeError::SchemaViolation("invalid presence byte")),
        };

        let payload = ItemPayload::read(kind, buf)?;

        Ok(DecodedItem::Item(Self {
            template,
            identification,
            shiny,
            payload,
        }))
    }
}

/// An envelope whose variant tag postdates this reader, kept verbatim
/// so a relay can forward bytes it cannot interpret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpaqueItem {
    pub version: u8,
    pub tag: u64,
    /// Everything after the variant tag, exactly as received.
    pub body: Bytes,
}

impl OpaqueItem {
    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.body.len() + VarUint::MAX_SIZE.get() + 1);
        buf.put_u8(self.version);
        buf.put_var_uint(&VarUint(self.tag));
        buf.put_slice(&self.body);
        buf.freeze()
    }
}

/// What lenient decoding hands back: either a fully interpreted item
/// or an opaque passthrough envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedItem {
    Item(ItemEnvelope),
    Opaque(OpaqueItem),
}

impl DecodedItem {
    pub fn encode(&self) -> Bytes {
        match self {
            Self::Item(item) => item.encode(),
            Self::Opaque(opaque) => opaque.encode(),
        }
    }
}

/// Encodes one item to its wire bytes.
pub fn encode_item(item: &ItemEnvelope) -> Bytes {
    item.encode()
}

/// Strict decode against the bundled mapping tables: anything unknown
/// or structurally off is an error.
pub fn decode_item(bytes: &[u8]) -> Result<ItemEnvelope, DecodeError> {
    let mut ctx = DecodeContext::strict();
    match decode_item_with(bytes, &mut ctx)? {
        DecodedItem::Item(item) => Ok(item),
        // Strict mode errors on unknown variants instead of preserving.
        DecodedItem::Opaque(_) => unreachable!("strict decode never yields opaque items"),
    }
}

/// Decode under a caller-supplied context; the context's mode decides
/// how unknown data is handled and its counters say what was skipped.
pub fn decode_item_with(
    bytes: &[u8],
    ctx: &mut DecodeContext<'_>,
) -> Result<DecodedItem, DecodeError> {
    let mut buf = bytes;
    ItemEnvelope::read(&mut buf, ctx)
}
