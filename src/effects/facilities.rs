//! Facility activation and scoped crafting bonuses.

use crate::shared::*;

/// Permanent facilities count once unlocked; inventory facilities count
/// while a bound item of sufficient quality is held.
pub fn is_facility_active(state: &GameState, facilities: &FacilityRegistry, id: &str) -> bool {
    let Some(facility) = facilities.get(id) else {
        return false;
    };
    match &facility.kind {
        FacilityKind::Permanent => state.facilities.contains(id),
        FacilityKind::Inventory { item_id } => state.inventory.iter().any(|item| {
            item.item_id == *item_id && item.quality >= balance::FACILITY_INVENTORY_QUALITY_MIN
        }),
    }
}

pub fn has_required_facilities(
    state: &GameState,
    facilities: &FacilityRegistry,
    recipe: &RecipeDef,
) -> bool {
    recipe
        .required_facilities
        .iter()
        .all(|id| is_facility_active(state, facilities, id))
}

pub fn missing_facilities(
    state: &GameState,
    facilities: &FacilityRegistry,
    recipe: &RecipeDef,
) -> Vec<String> {
    recipe
        .required_facilities
        .iter()
        .filter(|id| !is_facility_active(state, facilities, id))
        .cloned()
        .collect()
}

/// Categories a recipe touches: declared category slots plus the category
/// of every exact-item slot.
fn recipe_categories(recipe: &RecipeDef, items: &ItemRegistry) -> Vec<ItemCategory> {
    let mut categories = Vec::new();
    for ingredient in &recipe.ingredients {
        if let Some(category) = ingredient.category {
            if !categories.contains(&category) {
                categories.push(category);
            }
        }
        if let Some(id) = &ingredient.item_id {
            if let Some(category) = items.category_of(id) {
                if !categories.contains(&category) {
                    categories.push(category);
                }
            }
        }
    }
    categories
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FacilityBonuses {
    pub success_rate: f64,
    pub quality: f64,
}

/// Sums success-rate and quality contributions from every active facility
/// whose scope matches the recipe's ingredient categories.
pub fn facility_bonuses(
    state: &GameState,
    facilities: &FacilityRegistry,
    items: &ItemRegistry,
    recipe: &RecipeDef,
) -> FacilityBonuses {
    let categories = recipe_categories(recipe, items);
    let mut bonuses = FacilityBonuses::default();
    for facility in facilities.facilities.values() {
        if !is_facility_active(state, facilities, &facility.id) {
            continue;
        }
        for effect in &facility.effects {
            let applies = match effect.scope {
                FacilityScope::All => true,
                FacilityScope::Category(category) => categories.contains(&category),
            };
            if !applies {
                continue;
            }
            match effect.kind {
                FacilityEffectKind::SuccessRate => bonuses.success_rate += effect.value,
                FacilityEffectKind::Quality => bonuses.quality += effect.value,
            }
        }
    }
    bonuses
}
