use bytes::{Buf, BufMut};

use crate::bytebuf::{ByteBuf, ByteBufMut};
use crate::codec::var_uint::VarUint;
use crate::error::DecodeError;

use super::kind::{GearType, ItemKind};

/// The variant-specific tail of an item envelope. Each payload is a
/// flat record; the envelope header owns everything shared between
/// variants (template reference, identifications, shiny).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemPayload {
    Gear(GearPayload),
    Potion(ConsumablePayload),
    Food(ConsumablePayload),
    Scroll(ConsumablePayload),
    FixedConsumable(ConsumablePayload),
    Material(MaterialPayload),
    Ingredient(IngredientPayload),
    Tome,
    Charm,
    Aspect(AspectPayload),
    Rune,
    DungeonKey(DungeonKeyPayload),
    CrafterBag,
    Trinket,
    Mount,
    TeleportScroll(TeleportScrollPayload),
    CorkianAmplifier(AmplifierPayload),
    CorkianSimulator,
    CorkianInsulator,
    Emerald(CurrencyPayload),
    EmeraldBlock(CurrencyPayload),
    LiquidEmerald(CurrencyPayload),
    EmeraldPouch(EmeraldPouchPayload),
    NamedItem,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GearPayload {
    pub gear_type: GearType,
    /// Remaining durability for crafted gear; `u16::MAX` on the wire
    /// means the template's full durability.
    pub durability: u16,
    pub powder_slots: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsumablePayload {
    pub uses_left: u8,
    pub max_uses: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialPayload {
    pub tier: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientPayload {
    pub star_tier: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AspectPayload {
    pub tier: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DungeonKeyPayload {
    pub corrupted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeleportScrollPayload {
    pub charges: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmplifierPayload {
    pub tier: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyPayload {
    pub quantity: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmeraldPouchPayload {
    pub capacity_tier: u8,
    pub held: u64,
}

impl ItemPayload {
    pub const fn kind(&self) -> ItemKind {
        match self {
            Self::Gear(_) => ItemKind::Gear,
            Self::Potion(_) => ItemKind::Potion,
            Self::Food(_) => ItemKind::Food,
            Self::Scroll(_) => ItemKind::Scroll,
            Self::FixedConsumable(_) => ItemKind::FixedConsumable,
            Self::Material(_) => ItemKind::Material,
            Self::Ingredient(_) => ItemKind::Ingredient,
            Self::Tome => ItemKind::Tome,
            Self::Charm => ItemKind::Charm,
            Self::Aspect(_) => ItemKind::Aspect,
            Self::Rune => ItemKind::Rune,
            Self::DungeonKey(_) => ItemKind::DungeonKey,
            Self::CrafterBag => ItemKind::CrafterBag,
            Self::Trinket => ItemKind::Trinket,
            Self::Mount => ItemKind::Mount,
            Self::TeleportScroll(_) => ItemKind::TeleportScroll,
            Self::CorkianAmplifier(_) => ItemKind::CorkianAmplifier,
            Self::CorkianSimulator => ItemKind::CorkianSimulator,
            Self::CorkianInsulator => ItemKind::CorkianInsulator,
            Self::Emerald(_) => ItemKind::Emerald,
            Self::EmeraldBlock(_) => ItemKind::EmeraldBlock,
            Self::LiquidEmerald(_) => ItemKind::LiquidEmerald,
            Self::EmeraldPouch(_) => ItemKind::EmeraldPouch,
            Self::NamedItem => ItemKind::NamedItem,
        }
    }

    pub(crate) fn write(&self, buf: &mut impl BufMut) {
        match self {
            Self::Gear(gear) => {
                buf.put_u8(gear.gear_type as u8);
                buf.put_u16(gear.durability);
                buf.put_u8(gear.powder_slots);
            }
            Self::Potion(consumable)
            | Self::Food(consumable)
            | Self::Scroll(consumable)
            | Self::FixedConsumable(consumable) => {
                buf.put_u8(consumable.uses_left);
                buf.put_u8(consumable.max_uses);
            }
            Self::Material(material) => buf.put_u8(material.tier),
            Self::Ingredient(ingredient) => buf.put_u8(ingredient.star_tier),
            Self::Aspect(aspect) => buf.put_u8(aspect.tier),
            Self::DungeonKey(key) => buf.put_bool(key.corrupted),
            Self::TeleportScroll(scroll) => buf.put_u8(scroll.charges),
            Self::CorkianAmplifier(amplifier) => buf.put_u8(amplifier.tier),
            Self::Emerald(currency) | Self::EmeraldBlock(currency) | Self::LiquidEmerald(currency) => {
                buf.put_var_uint(&VarUint(currency.quantity));
            }
            Self::EmeraldPouch(pouch) => {
                buf.put_u8(pouch.capacity_tier);
                buf.put_var_uint(&VarUint(pouch.held));
            }
            Self::Tome
            | Self::Charm
            | Self::Rune
            | Self::CrafterBag
            | Self::Trinket
            | Self::Mount
            | Self::CorkianSimulator
            | Self::CorkianInsulator
            | Self::NamedItem => {}
        }
    }

    pub(crate) fn read(kind: ItemKind, buf: &mut impl Buf) -> Result<Self, DecodeError> {
        Ok(match kind {
            ItemKind::Gear => {
                let type_byte = buf.try_get_u8("gear type")?;
                let gear_type = GearType::from_byte(type_byte)
                    .ok_or(DecodeError::SchemaViolation("unknown gear type"))?;
                Self::Gear(GearPayload {
                    gear_type,
                    durability: buf.try_get_u16("durability")?,
                    powder_slots: buf.try_get_u8("powder slots")?,
                })
            }
            ItemKind::Potion => Self::Potion(ConsumablePayload::read(buf)?),
            ItemKind::Food => Self::Food(ConsumablePayload::read(buf)?),
            ItemKind::Scroll => Self::Scroll(ConsumablePayload::read(buf)?),
            ItemKind::FixedConsumable => Self::FixedConsumable(ConsumablePayload::read(buf)?),
            ItemKind::Material => Self::Material(MaterialPayload {
                tier: buf.try_get_u8("material tier")?,
            }),
            ItemKind::Ingredient => Self::Ingredient(IngredientPayload {
                star_tier: buf.try_get_u8("ingredient stars")?,
            }),
            ItemKind::Tome => Self::Tome,
            ItemKind::Charm => Self::Charm,
            ItemKind::Aspect => Self::Aspect(AspectPayload {
                tier: buf.try_get_u8("aspect tier")?,
            }),
            ItemKind::Rune => Self::Rune,
            ItemKind::DungeonKey => Self::DungeonKey(DungeonKeyPayload {
                corrupted: buf.try_get_bool("dungeon key state")?,
            }),
            ItemKind::CrafterBag => Self::CrafterBag,
            ItemKind::Trinket => Self::Trinket,
            ItemKind::Mount => Self::Mount,
            ItemKind::TeleportScroll => Self::TeleportScroll(TeleportScrollPayload {
                charges: buf.try_get_u8("teleport charges")?,
            }),
            ItemKind::CorkianAmplifier => Self::CorkianAmplifier(AmplifierPayload {
                tier: buf.try_get_u8("amplifier tier")?,
            }),
            ItemKind::CorkianSimulator => Self::CorkianSimulator,
            ItemKind::CorkianInsulator => Self::CorkianInsulator,
            ItemKind::Emerald => Self::Emerald(CurrencyPayload::read(buf)?),
            ItemKind::EmeraldBlock => Self::EmeraldBlock(CurrencyPayload::read(buf)?),
            ItemKind::LiquidEmerald => Self::LiquidEmerald(CurrencyPayload::read(buf)?),
            ItemKind::EmeraldPouch => Self::EmeraldPouch(EmeraldPouchPayload {
                capacity_tier: buf.try_get_u8("pouch capacity")?,
                held: buf.try_get_var_uint("pouch contents")?.0,
            }),
            ItemKind::NamedItem => Self::NamedItem,
        })
    }
}

impl ConsumablePayload {
    fn read(buf: &mut impl Buf) -> Result<Self, DecodeError> {
        Ok(Self {
            uses_left: buf.try_get_u8("uses left")?,
            max_uses: buf.try_get_u8("max uses")?,
        })
    }
}

impl CurrencyPayload {
    fn read(buf: &mut impl Buf) -> Result<Self, DecodeError> {
        Ok(Self {
            quantity: buf.try_get_var_uint("currency quantity")?.0,
        })
    }
}
