use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

/// Every item variant the current schema knows, with its stable wire
/// tag. Tags are append-only: new variants get the next free value and
/// existing values never move, so old readers keep working.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive)]
pub enum ItemKind {
    Gear = 0,
    Potion = 1,
    Food = 2,
    Scroll = 3,
    FixedConsumable = 4,
    Material = 5,
    Ingredient = 6,
    Tome = 7,
    Charm = 8,
    Aspect = 9,
    Rune = 10,
    DungeonKey = 11,
    CrafterBag = 12,
    Trinket = 13,
    Mount = 14,
    TeleportScroll = 15,
    CorkianAmplifier = 16,
    CorkianSimulator = 17,
    CorkianInsulator = 18,
    Emerald = 19,
    EmeraldBlock = 20,
    LiquidEmerald = 21,
    EmeraldPouch = 22,
    NamedItem = 23,
}

impl ItemKind {
    pub const fn tag(self) -> u64 {
        self as u64
    }

    pub fn from_tag(tag: u64) -> Option<Self> {
        Self::from_u64(tag)
    }

    /// Whether this variant carries rolled identifications. A decoder
    /// seeing an identification block on any other variant must treat
    /// it as a schema violation, not skip it.
    pub const fn supports_identification(self) -> bool {
        matches!(self, Self::Gear | Self::Tome | Self::Charm)
    }

    /// Shiny trackers only ever attach to gear.
    pub const fn supports_shiny(self) -> bool {
        matches!(self, Self::Gear)
    }
}

/// The gear slot a [`ItemKind::Gear`] item occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive)]
pub enum GearType {
    Helmet = 0,
    Chestplate = 1,
    Leggings = 2,
    Boots = 3,
    Ring = 4,
    Bracelet = 5,
    Necklace = 6,
    Spear = 7,
    Wand = 8,
    Bow = 9,
    Dagger = 10,
    Relik = 11,
}

impl GearType {
    pub fn from_byte(byte: u8) -> Option<Self> {
        Self::from_u8(byte)
    }
}
