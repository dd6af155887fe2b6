//! Item catalog: raw materials and crafted products.

use crate::shared::*;

fn def(id: &str, name: &str, category: ItemCategory, base_price: u32, description: &str) -> ItemDef {
    ItemDef {
        id: id.to_string(),
        name: name.to_string(),
        category,
        base_price,
        description: description.to_string(),
    }
}

pub fn populate_items(registry: &mut ItemRegistry) {
    let items = [
        // Materials: herbs
        def("herb_01", "Medicinal Herb", ItemCategory::Herb, 10, "A common herb that grows almost anywhere."),
        def("herb_02", "Bitterleaf", ItemCategory::Herb, 20, "A pungent leaf with purgative properties."),
        // Materials: ores
        def("ore_01", "Iron Ore", ItemCategory::Ore, 30, "Unremarkable raw iron."),
        def("ore_02", "Silver Ore", ItemCategory::Ore, 100, "Raw silver with a soft sheen."),
        // Materials: waters
        def("water_01", "Spring Water", ItemCategory::Water, 5, "Clear water from the village spring."),
        def("water_02", "Blessed Water", ItemCategory::Water, 200, "Water consecrated at the old shrine."),
        // Materials: flora
        def("plant_01", "Sunleaf", ItemCategory::Plant, 15, "A broad leaf that turns toward the light."),
        def("wood_01", "Ironwood Branch", ItemCategory::Wood, 40, "Dense wood, hard as its name."),
        // Materials: crystals
        def("crystal_01", "Mana Crystal", ItemCategory::Crystal, 250, "A shard humming with residual magic."),
        // Materials: misc
        def("misc_01", "Beast Hide", ItemCategory::Misc, 25, "A sturdy hide from a forest animal."),
        def("misc_02", "Fiend Fang", ItemCategory::Misc, 150, "A fang still tingling with dark energy."),
        def("precision_tools", "Precision Tools", ItemCategory::Misc, 150, "Fine instruments that aid delicate work while kept in good repair."),
        // Products
        def("potion_01", "Healing Draught", ItemCategory::Product, 50, "A basic restorative."),
        def("potion_02", "Greater Draught", ItemCategory::Product, 200, "A potent restorative for serious wounds."),
        def("antidote", "Antidote", ItemCategory::Product, 60, "Neutralizes most common poisons."),
        def("bomb_01", "Blast Charge", ItemCategory::Product, 100, "An unstable alchemical explosive."),
        def("ingot_01", "Iron Ingot", ItemCategory::Product, 120, "Smelted and ready for the forge."),
        def("ingot_02", "Silver Ingot", ItemCategory::Product, 400, "Refined silver of trade quality."),
        def("elixir", "Elixir", ItemCategory::Product, 1000, "The legendary cure-all."),
    ];
    for item in items {
        registry.items.insert(item.id.clone(), item);
    }
}
