//! Whole-envelope properties: round trips across every variant,
//! truncation safety, capability enforcement, and the lenient
//! forward-compatibility paths.

use trove_protocol::item::payload::{
    AmplifierPayload, AspectPayload, ConsumablePayload, CurrencyPayload, DungeonKeyPayload,
    EmeraldPouchPayload, GearPayload, IngredientPayload, MaterialPayload, TeleportScrollPayload,
};
use trove_protocol::{
    decode_item, decode_item_with, encode_item, DecodeContext, DecodeError, DecodedItem, GearType,
    Identification, IdentificationEntry, ItemEnvelope, ItemError, ItemPayload, RollQuality,
    ShinyStat, TemplateRef, SCHEMA_VERSION,
};

fn gear_payload() -> ItemPayload {
    ItemPayload::Gear(GearPayload {
        gear_type: GearType::Wand,
        durability: u16::MAX,
        powder_slots: 2,
    })
}

fn identification(entries: Vec<(u64, i64, RollQuality)>) -> Identification {
    Identification::new(
        entries
            .into_iter()
            .map(|(stat, value, quality)| IdentificationEntry::new(stat, value, quality))
            .collect(),
    )
    .unwrap()
}

fn assert_roundtrip(item: &ItemEnvelope) {
    let bytes = encode_item(item);
    let decoded = decode_item(&bytes).unwrap();
    assert_eq!(&decoded, item);
}

#[test]
fn every_variant_roundtrips() {
    let plain = |payload: ItemPayload| ItemEnvelope::plain(TemplateRef::Id(7), payload).unwrap();

    assert_roundtrip(&plain(ItemPayload::Potion(ConsumablePayload {
        uses_left: 1,
        max_uses: 3,
    })));
    assert_roundtrip(&plain(ItemPayload::Food(ConsumablePayload {
        uses_left: 5,
        max_uses: 5,
    })));
    assert_roundtrip(&plain(ItemPayload::Scroll(ConsumablePayload {
        uses_left: 0,
        max_uses: 1,
    })));
    assert_roundtrip(&plain(ItemPayload::FixedConsumable(ConsumablePayload {
        uses_left: 9,
        max_uses: 9,
    })));
    assert_roundtrip(&plain(ItemPayload::Material(MaterialPayload { tier: 3 })));
    assert_roundtrip(&plain(ItemPayload::Ingredient(IngredientPayload {
        star_tier: 1,
    })));
    assert_roundtrip(&plain(ItemPayload::Tome));
    assert_roundtrip(&plain(ItemPayload::Charm));
    assert_roundtrip(&plain(ItemPayload::Aspect(AspectPayload { tier: 4 })));
    assert_roundtrip(&plain(ItemPayload::Rune));
    assert_roundtrip(&plain(ItemPayload::DungeonKey(DungeonKeyPayload {
        corrupted: false,
    })));
    assert_roundtrip(&plain(ItemPayload::CrafterBag));
    assert_roundtrip(&plain(ItemPayload::Trinket));
    assert_roundtrip(&plain(ItemPayload::Mount));
    assert_roundtrip(&plain(ItemPayload::TeleportScroll(TeleportScrollPayload {
        charges: 3,
    })));
    assert_roundtrip(&plain(ItemPayload::CorkianAmplifier(AmplifierPayload {
        tier: 2,
    })));
    assert_roundtrip(&plain(ItemPayload::CorkianSimulator));
    assert_roundtrip(&plain(ItemPayload::CorkianInsulator));
    assert_roundtrip(&plain(ItemPayload::Emerald(CurrencyPayload { quantity: 64 })));
    assert_roundtrip(&plain(ItemPayload::EmeraldBlock(CurrencyPayload {
        quantity: 8,
    })));
    assert_roundtrip(&plain(ItemPayload::LiquidEmerald(CurrencyPayload {
        quantity: 2,
    })));
    assert_roundtrip(&plain(ItemPayload::EmeraldPouch(EmeraldPouchPayload {
        capacity_tier: 9,
        held: 500_000,
    })));
    assert_roundtrip(
        &ItemEnvelope::plain(
            TemplateRef::Name("Bob's Mythic Lute".to_string()),
            ItemPayload::NamedItem,
        )
        .unwrap(),
    );
}

#[test]
fn identified_shiny_gear_roundtrips() {
    let item = ItemEnvelope::new(
        TemplateRef::Name("Quicksilver".to_string()),
        gear_payload(),
        Some(identification(vec![
            (0, 475, RollQuality::Percent(71)),
            (6, 18, RollQuality::Percent(100)),
            (10, -12, RollQuality::Fixed),
        ])),
        Some(ShinyStat::new(0, 1_234_567)),
    )
    .unwrap();

    assert_roundtrip(&item);
}

#[test]
fn tome_with_identification_roundtrips() {
    let item = ItemEnvelope::new(
        TemplateRef::Id(311),
        ItemPayload::Tome,
        Some(identification(vec![(13, 6, RollQuality::Percent(44))])),
        None,
    )
    .unwrap();

    assert_roundtrip(&item);
}

// The concrete scenario from the format's acceptance checklist: gear
// referencing template 42 with one revealed and one unrevealed roll.
#[test]
fn gear_scenario_with_field_independence() {
    let item = ItemEnvelope::new(
        TemplateRef::Id(42),
        gear_payload(),
        Some(identification(vec![
            (0, 120, RollQuality::Percent(87)),
            (6, 15, RollQuality::Unrevealed),
        ])),
        None,
    )
    .unwrap();

    let bytes = encode_item(&item);
    let decoded = decode_item(&bytes).unwrap();
    assert_eq!(decoded, item);

    // The second stat's quality byte sits just before the shiny
    // presence byte and the four payload bytes.
    let quality_index = bytes.len() - 6;
    assert_eq!(bytes[quality_index], 255);

    let mut flipped = bytes.to_vec();
    flipped[quality_index] = 100;
    let decoded = decode_item(&flipped).unwrap();
    let entry = decoded.identification().unwrap().get(6).unwrap();

    // Corrupting the quality must not bleed into its neighbors.
    assert_eq!(entry.stat, 6);
    assert_eq!(entry.value, 15);
    assert_eq!(entry.quality, RollQuality::Percent(100));
}

#[test]
fn truncation_never_panics_and_always_errors() {
    let item = ItemEnvelope::new(
        TemplateRef::Name("Warp".to_string()),
        gear_payload(),
        Some(identification(vec![
            (0, 120, RollQuality::Percent(87)),
            (6, -3, RollQuality::Unrevealed),
        ])),
        Some(ShinyStat::new(2, 900_000)),
    )
    .unwrap();

    let bytes = encode_item(&item);
    for cut in 0..bytes.len() {
        let result = decode_item(&bytes[..cut]);
        assert!(
            matches!(
                result,
                Err(DecodeError::TruncatedInput(_)) | Err(DecodeError::MalformedVarint(_))
            ),
            "cut at {cut} produced {result:?}"
        );
    }
}

#[test]
fn lenient_decode_skips_unknown_stats_and_reports_them() {
    // A producer with a newer identification mapping wrote a stat this
    // reader's table does not contain.
    let item = ItemEnvelope::new(
        TemplateRef::Id(42),
        gear_payload(),
        Some(identification(vec![
            (0, 120, RollQuality::Percent(87)),
            (6, 15, RollQuality::Percent(40)),
            (40_000, 77, RollQuality::Percent(1)),
        ])),
        None,
    )
    .unwrap();
    let bytes = encode_item(&item);

    assert_eq!(decode_item(&bytes), Err(DecodeError::UnknownStatKey(40_000)));

    let mut ctx = DecodeContext::lenient();
    let DecodedItem::Item(decoded) = decode_item_with(&bytes, &mut ctx).unwrap() else {
        panic!("known variant must decode fully");
    };

    let identification = decoded.identification().unwrap();
    assert_eq!(identification.len(), 2);
    assert_eq!(identification.get(0).unwrap().value, 120);
    assert_eq!(identification.get(6).unwrap().value, 15);
    // Three-byte stat id, one-byte length prefix, two-byte value,
    // one-byte quality.
    assert_eq!(ctx.skipped_identification_bytes, 7);
    assert!(ctx.skipped_anything());
}

#[test]
fn emerald_never_reads_identification_even_with_trailing_garbage() {
    let item = ItemEnvelope::plain(
        TemplateRef::Id(1),
        ItemPayload::Emerald(CurrencyPayload { quantity: 64 }),
    )
    .unwrap();

    let mut bytes = encode_item(&item).to_vec();
    bytes.extend_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]);
    assert_eq!(decode_item(&bytes).unwrap(), item);
}

#[test]
fn identification_block_on_emerald_is_a_schema_violation() {
    let item = ItemEnvelope::plain(
        TemplateRef::Id(1),
        ItemPayload::Emerald(CurrencyPayload { quantity: 64 }),
    )
    .unwrap();
    let bytes = encode_item(&item);

    // version · tag · template(2 bytes) · identification presence
    let mut corrupted = bytes.to_vec();
    assert_eq!(corrupted[4], 0);
    corrupted[4] = 1;

    assert_eq!(
        decode_item(&corrupted),
        Err(DecodeError::SchemaViolation(
            "identification block on a variant that does not carry identifications"
        ))
    );
}

#[test]
fn shiny_block_on_tome_is_a_schema_violation() {
    let item = ItemEnvelope::plain(TemplateRef::Id(9), ItemPayload::Tome).unwrap();
    let bytes = encode_item(&item);

    // version · tag · template(2) · identification presence · shiny presence
    let mut corrupted = bytes.to_vec();
    assert_eq!(corrupted[5], 0);
    corrupted[5] = 1;

    assert!(matches!(
        decode_item(&corrupted),
        Err(DecodeError::SchemaViolation(_))
    ));
}

#[test]
fn unknown_variant_is_strict_error_and_lenient_passthrough() {
    let mut bytes = vec![SCHEMA_VERSION];
    bytes.push(99); // tag far beyond the registry
    bytes.extend_from_slice(&[0x00, 0x2A, 0x01, 0x02, 0x03]); // opaque tail

    assert_eq!(decode_item(&bytes), Err(DecodeError::UnknownVariant(99)));

    let mut ctx = DecodeContext::lenient();
    let decoded = decode_item_with(&bytes, &mut ctx).unwrap();
    let DecodedItem::Opaque(opaque) = &decoded else {
        panic!("unknown variant must be preserved opaquely");
    };
    assert_eq!(opaque.tag, 99);
    assert_eq!(ctx.opaque_items, 1);

    // Relay re-encode is byte-identical.
    assert_eq!(&decoded.encode()[..], &bytes[..]);
}

#[test]
fn future_schema_version_is_rejected() {
    let bytes = [SCHEMA_VERSION + 1, 0, 0, 42, 0, 0];
    assert_eq!(
        decode_item(&bytes),
        Err(DecodeError::UnsupportedVersion(SCHEMA_VERSION + 1))
    );
}

#[test]
fn construction_rejects_capability_violations() {
    let identification = identification(vec![(0, 1, RollQuality::Percent(1))]);

    let result = ItemEnvelope::new(
        TemplateRef::Id(1),
        ItemPayload::Emerald(CurrencyPayload { quantity: 1 }),
        Some(identification),
        None,
    );
    assert!(matches!(
        result,
        Err(ItemError::IdentificationNotSupported(_))
    ));

    let result = ItemEnvelope::new(
        TemplateRef::Id(2),
        ItemPayload::Tome,
        None,
        Some(ShinyStat::new(0, 1)),
    );
    assert!(matches!(result, Err(ItemError::ShinyNotSupported(_))));

    let result = ItemEnvelope::plain(TemplateRef::Id(3), ItemPayload::NamedItem);
    assert!(matches!(result, Err(ItemError::TemplateNameRequired)));
}

#[test]
fn canonical_identification_makes_equal_items_byte_identical() {
    let build = |entries: Vec<(u64, i64, RollQuality)>| {
        ItemEnvelope::new(
            TemplateRef::Id(42),
            gear_payload(),
            Some(identification(entries)),
            None,
        )
        .unwrap()
    };

    let forward = build(vec![
        (0, 120, RollQuality::Percent(87)),
        (6, 15, RollQuality::Percent(40)),
    ]);
    let reversed = build(vec![
        (6, 15, RollQuality::Percent(40)),
        (0, 120, RollQuality::Percent(87)),
    ]);

    assert_eq!(encode_item(&forward), encode_item(&reversed));
}
