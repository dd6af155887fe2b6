//! Equipment catalog. Each piece is pure data; the `effects` module is the
//! only interpreter of the effect records.

use crate::shared::*;

fn def(
    id: &str,
    name: &str,
    description: &str,
    category: EquipmentCategory,
    price: u32,
    effects: Vec<EquipmentEffect>,
) -> EquipmentDef {
    EquipmentDef {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        category,
        price,
        effects,
    }
}

pub fn populate_equipment(registry: &mut EquipmentRegistry) {
    use EquipmentCategory::*;
    use EquipmentEffect::*;

    let equipment = [
        // Cauldrons — the one exclusive slot.
        def(
            "cauldron_twin_still",
            "Twin Still",
            "On a successful brew, sometimes yields a second copy with slightly drifted quality.",
            Cauldron,
            800,
            vec![CraftDuplicate { chance: 0.3, quality_variance: 10 }],
        ),
        def(
            "cauldron_spirit",
            "Spirit Cauldron",
            "Raises the quality ceiling to 150, but revolts against shoddy materials.",
            Cauldron,
            1000,
            vec![CraftQualityCap { cap: 150, fail_below_quality: Some(50) }],
        ),
        def(
            "cauldron_reflux",
            "Reflux Crucible",
            "Failed brews return their materials, and each failure steeps the next attempt.",
            Cauldron,
            900,
            vec![
                CraftFailSave { chance: 1.0 },
                CraftFailAccumulate { rate: 0.10 },
            ],
        ),
        def(
            "cauldron_chain",
            "Chain Cauldron",
            "Consecutive successes build a rhythm that sharpens quality. A failure breaks it.",
            Cauldron,
            850,
            vec![CraftCombo { bonus_per_combo: 5.0, max_combo: Some(10) }],
        ),
        // Time
        def(
            "hourglass",
            "Tidewalker Hourglass",
            "Halves every brewing duration, rounded up.",
            Time,
            1200,
            vec![CraftDaysHalve],
        ),
        def(
            "lectern",
            "Sage's Lectern",
            "Recipe study completes the same day, for books within your depth.",
            Time,
            700,
            vec![StudyInstant { max_level: Some(10) }],
        ),
        def(
            "scribes_quill",
            "Scribe's Quill",
            "Annotated margins shave days off any study.",
            Time,
            400,
            vec![StudyDaysReduce { value: 2 }],
        ),
        // Material
        def(
            "universal_scale",
            "Universal Scale",
            "Perfect measurement: every recipe needs one fewer ingredient (never below one).",
            Material,
            1100,
            vec![MaterialCountReduce { value: 1, min_original_count: Some(2) }],
        ),
        def(
            "refinement_flask",
            "Refinement Flask",
            "Materials below quality 50 are raised to 50 as they enter the brew.",
            Material,
            600,
            vec![MaterialQualityFloor { value: 50 }],
        ),
        def(
            "fine_mortar",
            "Fine Mortar",
            "Thorough grinding draws a little more out of every material.",
            Material,
            500,
            vec![MaterialQualityBonus { value: 5 }],
        ),
        def(
            "abundant_jar",
            "Jar of Plenty",
            "Expeditions return with twice the haul and rare finds come easier.",
            Material,
            900,
            vec![
                ExpeditionDropsMult { value: 2.0, material_category: None },
                ExpeditionRareBonus { value: 0.15 },
            ],
        ),
        // Economy
        def(
            "golden_athanor",
            "Golden Athanor",
            "Crafted products fetch double at the counter.",
            Economy,
            1000,
            vec![SellPriceMult { value: 2.0, min_quality: None, item_category: Some(ItemCategory::Product) }],
        ),
        def(
            "appraisal_monocle",
            "Appraisal Monocle",
            "Quest patrons pay half again as much, and fine work earns extra standing.",
            Economy,
            800,
            vec![
                QuestMoneyMult { value: 1.5 },
                QuestReputationBonus { value: 2 },
                QuestQualityBonus { quality_threshold: 70, money_bonus: 0, reputation_bonus: 1 },
            ],
        ),
        def(
            "merchants_ledger",
            "Merchant's Ledger",
            "Sharper bargaining on purchases; selling in volume earns a same-day premium.",
            Economy,
            700,
            vec![
                BuyPriceMult { value: 0.8 },
                SellSameDayBonus { min_count: 3, value: 1.2 },
            ],
        ),
        // Special
        def(
            "lucky_charm",
            "Lucky Charm",
            "Every roll of chance leans slightly in your favor.",
            Special,
            750,
            vec![AllProbabilityBonus { value: 0.05 }],
        ),
        def(
            "expanded_satchel",
            "Expanded Satchel",
            "More room for everything.",
            Special,
            650,
            vec![InventoryExpand { value: 10 }],
        ),
        def(
            "steady_gloves",
            "Steady Gloves",
            "Less wasted effort and a surer hand at the stir.",
            Special,
            850,
            vec![
                CraftStaminaMult { value: 0.7 },
                CraftQualityVarianceMult { value: 0.5 },
            ],
        ),
        def(
            "guild_banner",
            "Guild Banner",
            "A mark of good standing that steadies the work and softens failures.",
            Special,
            950,
            vec![
                CraftSuccessBonus { value: 0.05 },
                CraftFailRecover { count: 1 },
            ],
        ),
        def(
            "patient_press",
            "Patient Press",
            "Long brews mature faster under steady pressure.",
            Time,
            600,
            vec![CraftDaysReduce { value: 1, min_original_days: Some(2) }],
        ),
    ];
    for item in equipment {
        registry.equipment.insert(item.id.clone(), item);
    }
}
