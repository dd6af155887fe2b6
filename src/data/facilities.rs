//! Workshop facility catalog. Permanent facilities unlock through
//! achievements; inventory facilities piggyback on a held item.

use crate::shared::*;

fn effect(kind: FacilityEffectKind, value: f64, scope: FacilityScope) -> FacilityEffect {
    FacilityEffect { kind, value, scope }
}

pub fn populate_facilities(registry: &mut FacilityRegistry) {
    use FacilityEffectKind::*;
    use FacilityScope::*;

    let facilities = [
        FacilityDef {
            id: "furnace".to_string(),
            name: "Smelting Furnace".to_string(),
            description: "Required for metalwork; steadies ore-based brews.".to_string(),
            kind: FacilityKind::Permanent,
            effects: vec![effect(SuccessRate, 0.05, Category(ItemCategory::Ore))],
        },
        FacilityDef {
            id: "distiller".to_string(),
            name: "Distiller".to_string(),
            description: "Purifies and concentrates liquids for advanced medicine.".to_string(),
            kind: FacilityKind::Permanent,
            effects: vec![effect(Quality, 3.0, Category(ItemCategory::Water))],
        },
        FacilityDef {
            id: "magic_circle".to_string(),
            name: "Magic Circle".to_string(),
            description: "A ritual array for work that ordinary tools cannot hold.".to_string(),
            kind: FacilityKind::Permanent,
            effects: vec![],
        },
        FacilityDef {
            id: "improved_cauldron".to_string(),
            name: "Improved Cauldron".to_string(),
            description: "Your mentor's refinements, finally installed.".to_string(),
            kind: FacilityKind::Permanent,
            effects: vec![effect(SuccessRate, 0.03, All)],
        },
        FacilityDef {
            id: "advanced_workbench".to_string(),
            name: "Advanced Workbench".to_string(),
            description: "A proper surface for precise work.".to_string(),
            kind: FacilityKind::Permanent,
            effects: vec![effect(Quality, 5.0, All)],
        },
        FacilityDef {
            id: "precision_tools_facility".to_string(),
            name: "Precision Tools".to_string(),
            description: "Helps while a well-kept set is on hand.".to_string(),
            kind: FacilityKind::Inventory { item_id: "precision_tools".to_string() },
            effects: vec![effect(Quality, 3.0, All)],
        },
    ];
    for facility in facilities {
        registry.facilities.insert(facility.id.clone(), facility);
    }
}
