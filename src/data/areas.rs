//! Expedition area catalog with weighted drop tables.

use crate::shared::*;

fn drop(item_id: &str, weight: u32, quality_min: u32, quality_max: u32) -> DropEntry {
    DropEntry {
        item_id: item_id.to_string(),
        weight,
        quality_min,
        quality_max,
    }
}

pub fn populate_areas(registry: &mut AreaRegistry) {
    let areas = [
        AreaDef {
            id: "forest".to_string(),
            name: "Green Forest".to_string(),
            description: "Herb-rich woodland a short walk from the village.".to_string(),
            cost_per_day: 50,
            required_level: 1,
            drops: vec![
                drop("herb_01", 40, 20, 60),
                drop("herb_02", 25, 20, 50),
                drop("plant_01", 15, 25, 55),
                drop("misc_01", 20, 30, 60),
            ],
            rare_drops: vec![drop("wood_01", 100, 40, 75)],
            rare_chance: 0.08,
        },
        AreaDef {
            id: "mountain".to_string(),
            name: "Craggy Peaks".to_string(),
            description: "Exposed ore veins, and worse things higher up.".to_string(),
            cost_per_day: 100,
            required_level: 3,
            drops: vec![drop("ore_01", 70, 30, 70), drop("misc_01", 30, 30, 60)],
            rare_drops: vec![
                drop("ore_02", 50, 40, 80),
                drop("misc_02", 30, 50, 90),
                drop("crystal_01", 20, 50, 85),
            ],
            rare_chance: 0.15,
        },
        AreaDef {
            id: "lake".to_string(),
            name: "Still Lake".to_string(),
            description: "Calm waters said to border the shrine grounds.".to_string(),
            cost_per_day: 30,
            required_level: 1,
            drops: vec![drop("water_01", 100, 30, 70)],
            rare_drops: vec![drop("water_02", 100, 60, 95)],
            rare_chance: 0.1,
        },
    ];
    for area in areas {
        registry.areas.insert(area.id.clone(), area);
    }
}
