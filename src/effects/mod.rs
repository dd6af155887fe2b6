//! Modifier aggregator — the only interpreter of equipment effect records.
//!
//! Responsibilities:
//! - Decide which equipment is active (everything owned, except cauldrons
//!   where only the slotted one counts).
//! - Expose one pure query per concern, each documenting its combination
//!   rule (sum / max / product / 1 + Σ(v−1)).
//! - Track the transient counters (combo, per-recipe fail accumulation,
//!   daily sell count) that some effects read. These never persist.
//!
//! Facility activation and scoped facility bonuses live in `facilities`.

pub mod facilities;

use crate::shared::*;
use rand::Rng;

/// Effects currently in force: all owned non-cauldron equipment plus the
/// slotted cauldron, if any.
pub fn active_effects<'a>(
    state: &GameState,
    equipment: &'a EquipmentRegistry,
) -> Vec<&'a EquipmentEffect> {
    let mut effects = Vec::new();
    for id in &state.owned_equipment {
        let Some(def) = equipment.get(id) else { continue };
        if def.category == EquipmentCategory::Cauldron
            && state.active_cauldron.as_deref() != Some(id.as_str())
        {
            continue;
        }
        effects.extend(def.effects.iter());
    }
    effects
}

// ─── Probability & success ─────────────────────────────────────────────

/// Flat bonus applied to every chance roll in the game. Sum.
pub fn all_probability_bonus(state: &GameState, equipment: &EquipmentRegistry) -> f64 {
    active_effects(state, equipment)
        .iter()
        .filter_map(|e| match e {
            EquipmentEffect::AllProbabilityBonus { value } => Some(*value),
            _ => None,
        })
        .sum()
}

/// Craft success-rate bonus. Sum.
pub fn craft_success_bonus(state: &GameState, equipment: &EquipmentRegistry) -> f64 {
    active_effects(state, equipment)
        .iter()
        .filter_map(|e| match e {
            EquipmentEffect::CraftSuccessBonus { value } => Some(*value),
            _ => None,
        })
        .sum()
}

/// Accumulated success bonus for a recipe that has failed repeatedly:
/// failures recorded × Σ(rate) across accumulate-granting sources.
pub fn fail_accumulation_bonus(
    state: &GameState,
    equipment: &EquipmentRegistry,
    mods: &ModifierState,
    recipe_id: &str,
) -> f64 {
    let failures = mods.fail_accumulation.get(recipe_id).copied().unwrap_or(0);
    if failures == 0 {
        return 0.0;
    }
    let rate: f64 = active_effects(state, equipment)
        .iter()
        .filter_map(|e| match e {
            EquipmentEffect::CraftFailAccumulate { rate } => Some(*rate),
            _ => None,
        })
        .sum();
    failures as f64 * rate
}

// ─── Quality ───────────────────────────────────────────────────────────

/// Flat quality bonus. Sum.
pub fn craft_quality_bonus(state: &GameState, equipment: &EquipmentRegistry) -> f64 {
    active_effects(state, equipment)
        .iter()
        .filter_map(|e| match e {
            EquipmentEffect::CraftQualityBonus { value } => Some(*value),
            _ => None,
        })
        .sum()
}

/// Quality ceiling. Max across granted caps, never below the default 100.
pub fn quality_cap(state: &GameState, equipment: &EquipmentRegistry) -> u32 {
    active_effects(state, equipment)
        .iter()
        .filter_map(|e| match e {
            EquipmentEffect::CraftQualityCap { cap, .. } => Some(*cap),
            _ => None,
        })
        .fold(balance::QUALITY_MAX, u32::max)
}

/// The strictest (highest) forced-failure material threshold, if any cap
/// source carries one.
pub fn fail_below_threshold(state: &GameState, equipment: &EquipmentRegistry) -> Option<u32> {
    active_effects(state, equipment)
        .iter()
        .filter_map(|e| match e {
            EquipmentEffect::CraftQualityCap {
                fail_below_quality: Some(threshold),
                ..
            } => Some(*threshold),
            _ => None,
        })
        .max()
}

/// Scales the uniform quality noise. Product.
pub fn quality_variance_mult(state: &GameState, equipment: &EquipmentRegistry) -> f64 {
    active_effects(state, equipment)
        .iter()
        .filter_map(|e| match e {
            EquipmentEffect::CraftQualityVarianceMult { value } => Some(*value),
            _ => None,
        })
        .product()
}

/// Quality bonus from the running success combo, honoring each source's
/// own combo ceiling.
pub fn combo_quality_bonus(
    state: &GameState,
    equipment: &EquipmentRegistry,
    mods: &ModifierState,
) -> f64 {
    active_effects(state, equipment)
        .iter()
        .filter_map(|e| match e {
            EquipmentEffect::CraftCombo {
                bonus_per_combo,
                max_combo,
            } => {
                let effective = match max_combo {
                    Some(max) => mods.craft_combo.min(*max),
                    None => mods.craft_combo,
                };
                Some(bonus_per_combo * effective as f64)
            }
            _ => None,
        })
        .sum()
}

// ─── Materials ─────────────────────────────────────────────────────────

/// Minimum effective material quality. Max across floors, 0 when none.
pub fn material_quality_floor(state: &GameState, equipment: &EquipmentRegistry) -> u32 {
    active_effects(state, equipment)
        .iter()
        .filter_map(|e| match e {
            EquipmentEffect::MaterialQualityFloor { value } => Some(*value),
            _ => None,
        })
        .max()
        .unwrap_or(0)
}

/// Flat bonus added to every material's quality. Sum.
pub fn material_quality_bonus(state: &GameState, equipment: &EquipmentRegistry) -> u32 {
    active_effects(state, equipment)
        .iter()
        .filter_map(|e| match e {
            EquipmentEffect::MaterialQualityBonus { value } => Some(*value),
            _ => None,
        })
        .sum()
}

/// Floor-then-bonus transform applied to a material before averaging.
pub fn effective_material_quality(
    state: &GameState,
    equipment: &EquipmentRegistry,
    quality: u32,
) -> u32 {
    quality.max(material_quality_floor(state, equipment))
        + material_quality_bonus(state, equipment)
}

/// Ingredient quantity after count-reduction effects. Reductions only
/// apply above each source's original-count gate, and never below 1.
pub fn effective_ingredient_count(
    state: &GameState,
    equipment: &EquipmentRegistry,
    original: u32,
) -> u32 {
    let mut count = original;
    for effect in active_effects(state, equipment) {
        if let EquipmentEffect::MaterialCountReduce {
            value,
            min_original_count,
        } = effect
        {
            if original >= min_original_count.unwrap_or(0) {
                count = count.saturating_sub(*value);
            }
        }
    }
    count.max(1)
}

// ─── Stamina & time ────────────────────────────────────────────────────

/// Craft stamina-cost multiplier: `max(0.1, 1 + Σ(value − 1))`.
pub fn stamina_cost_mult(state: &GameState, equipment: &EquipmentRegistry) -> f64 {
    let delta: f64 = active_effects(state, equipment)
        .iter()
        .filter_map(|e| match e {
            EquipmentEffect::CraftStaminaMult { value } => Some(value - 1.0),
            _ => None,
        })
        .sum();
    (1.0 + delta).max(0.1)
}

/// Craft duration after halving and flat reductions, never below one day.
/// Flat reductions gate on the recipe's original duration.
pub fn effective_craft_days(
    state: &GameState,
    equipment: &EquipmentRegistry,
    recipe: &RecipeDef,
) -> u32 {
    let original = recipe.days_required;
    let mut days = original;
    let effects = active_effects(state, equipment);
    if effects
        .iter()
        .any(|e| matches!(e, EquipmentEffect::CraftDaysHalve))
    {
        days = days.div_ceil(2);
    }
    for effect in &effects {
        if let EquipmentEffect::CraftDaysReduce {
            value,
            min_original_days,
        } = effect
        {
            if original >= min_original_days.unwrap_or(0) {
                days = days.saturating_sub(*value);
            }
        }
    }
    days.max(1)
}

/// Study duration for a book, given the highest required level among its
/// recipes (instant-study sources may be capped by recipe depth).
pub fn effective_study_days(
    state: &GameState,
    equipment: &EquipmentRegistry,
    book: &RecipeBookDef,
    max_recipe_level: u32,
) -> u32 {
    let effects = active_effects(state, equipment);
    let instant = effects.iter().any(|e| match e {
        EquipmentEffect::StudyInstant { max_level } => {
            max_level.map_or(true, |cap| max_recipe_level <= cap)
        }
        _ => false,
    });
    if instant {
        return 0;
    }
    let reduction: u32 = effects
        .iter()
        .filter_map(|e| match e {
            EquipmentEffect::StudyDaysReduce { value } => Some(*value),
            _ => None,
        })
        .sum();
    book.study_days.saturating_sub(reduction).max(1)
}

// ─── Failure salvage ───────────────────────────────────────────────────

/// How many consumed materials come back on an unsaved failure. Sum.
pub fn fail_recover_count(state: &GameState, equipment: &EquipmentRegistry) -> u32 {
    active_effects(state, equipment)
        .iter()
        .filter_map(|e| match e {
            EquipmentEffect::CraftFailRecover { count } => Some(*count),
            _ => None,
        })
        .sum()
}

/// Independent Bernoulli per fail-save source at (chance + probability
/// bonus); first success wins. Pure predicate, the caller restores.
pub fn should_save_materials(
    state: &GameState,
    equipment: &EquipmentRegistry,
    rng: &mut impl Rng,
) -> bool {
    let bonus = all_probability_bonus(state, equipment);
    for effect in active_effects(state, equipment) {
        if let EquipmentEffect::CraftFailSave { chance } = effect {
            if rng.gen_bool((chance + bonus).clamp(0.0, 1.0)) {
                return true;
            }
        }
    }
    false
}

/// Independent Bernoulli per duplicate source; on the first success adds a
/// copy of `item` with quality drifted by ±variance (clamped to the cap)
/// and returns it.
pub fn try_duplicate(
    state: &mut GameState,
    equipment: &EquipmentRegistry,
    item: &OwnedItem,
    rng: &mut impl Rng,
) -> Option<OwnedItem> {
    let bonus = all_probability_bonus(state, equipment);
    let cap = quality_cap(state, equipment);
    let sources: Vec<(f64, u32)> = active_effects(state, equipment)
        .iter()
        .filter_map(|e| match e {
            EquipmentEffect::CraftDuplicate {
                chance,
                quality_variance,
            } => Some((*chance, *quality_variance)),
            _ => None,
        })
        .collect();
    for (chance, variance) in sources {
        if !rng.gen_bool((chance + bonus).clamp(0.0, 1.0)) {
            continue;
        }
        let offset = rng.gen_range(-(variance as i32)..=variance as i32);
        let quality = (item.quality as i32 + offset).clamp(balance::QUALITY_MIN as i32, cap as i32);
        let duplicate = OwnedItem {
            item_id: item.item_id.clone(),
            quality: quality as u32,
            origin: item.origin.clone(),
        };
        state.add_item(duplicate.clone());
        return Some(duplicate);
    }
    None
}

// ─── Expeditions ───────────────────────────────────────────────────────

/// Drop-count multiplier: `1 + Σ(value − 1)` across sources matching the
/// category (a source without a category matches everything).
pub fn expedition_drops_mult(
    state: &GameState,
    equipment: &EquipmentRegistry,
    category: Option<ItemCategory>,
) -> f64 {
    let delta: f64 = active_effects(state, equipment)
        .iter()
        .filter_map(|e| match e {
            EquipmentEffect::ExpeditionDropsMult {
                value,
                material_category,
            } => match (material_category, category) {
                (None, _) => Some(value - 1.0),
                (Some(wanted), Some(actual)) if *wanted == actual => Some(value - 1.0),
                _ => None,
            },
            _ => None,
        })
        .sum();
    1.0 + delta
}

/// Additive rare-drop chance: Σ(value) plus the global probability bonus.
pub fn expedition_rare_bonus(state: &GameState, equipment: &EquipmentRegistry) -> f64 {
    let base: f64 = active_effects(state, equipment)
        .iter()
        .filter_map(|e| match e {
            EquipmentEffect::ExpeditionRareBonus { value } => Some(*value),
            _ => None,
        })
        .sum();
    base + all_probability_bonus(state, equipment)
}

// ─── Economy ───────────────────────────────────────────────────────────

/// Sell-price multiplier for a specific item on a specific day. Matching
/// sources multiply together; the same-day bonus joins once its sale count
/// for the day is reached.
pub fn sell_price_mult(
    state: &GameState,
    equipment: &EquipmentRegistry,
    mods: &ModifierState,
    item: &ItemDef,
    quality: u32,
    day: u32,
) -> f64 {
    let mut mult = 1.0;
    for effect in active_effects(state, equipment) {
        match effect {
            EquipmentEffect::SellPriceMult {
                value,
                min_quality,
                item_category,
            } => {
                if min_quality.map_or(true, |min| quality >= min)
                    && item_category.map_or(true, |cat| item.category == cat)
                {
                    mult *= value;
                }
            }
            EquipmentEffect::SellSameDayBonus { min_count, value } => {
                if daily_sell_count(mods, day) >= *min_count {
                    mult *= value;
                }
            }
            _ => {}
        }
    }
    mult
}

/// Buy-price multiplier: `max(0.5, 1 − Σ(1 − value))`.
pub fn buy_price_mult(state: &GameState, equipment: &EquipmentRegistry) -> f64 {
    let discount: f64 = active_effects(state, equipment)
        .iter()
        .filter_map(|e| match e {
            EquipmentEffect::BuyPriceMult { value } => Some(1.0 - value),
            _ => None,
        })
        .sum();
    (1.0 - discount).max(0.5)
}

/// Quest money multiplier: `1 + Σ(value − 1)`.
pub fn quest_money_mult(state: &GameState, equipment: &EquipmentRegistry) -> f64 {
    let delta: f64 = active_effects(state, equipment)
        .iter()
        .filter_map(|e| match e {
            EquipmentEffect::QuestMoneyMult { value } => Some(value - 1.0),
            _ => None,
        })
        .sum();
    1.0 + delta
}

/// Flat reputation bonus on every delivery. Sum.
pub fn quest_reputation_bonus(state: &GameState, equipment: &EquipmentRegistry) -> u32 {
    active_effects(state, equipment)
        .iter()
        .filter_map(|e| match e {
            EquipmentEffect::QuestReputationBonus { value } => Some(*value),
            _ => None,
        })
        .sum()
}

/// Extra (money, reputation) for deliveries whose average quality clears
/// each source's threshold. Sums across qualifying sources.
pub fn quest_quality_bonus(
    state: &GameState,
    equipment: &EquipmentRegistry,
    average_quality: u32,
) -> (u32, u32) {
    let mut money = 0;
    let mut reputation = 0;
    for effect in active_effects(state, equipment) {
        if let EquipmentEffect::QuestQualityBonus {
            quality_threshold,
            money_bonus,
            reputation_bonus,
        } = effect
        {
            if average_quality >= *quality_threshold {
                money += money_bonus;
                reputation += reputation_bonus;
            }
        }
    }
    (money, reputation)
}

/// Extra inventory capacity. Sum.
pub fn inventory_expansion(state: &GameState, equipment: &EquipmentRegistry) -> u32 {
    active_effects(state, equipment)
        .iter()
        .filter_map(|e| match e {
            EquipmentEffect::InventoryExpand { value } => Some(*value),
            _ => None,
        })
        .sum()
}

// ─── Transient counters ────────────────────────────────────────────────

/// Records a failed craft. The per-recipe accumulation only advances when
/// an accumulate-granting source is active.
pub fn record_failure(
    state: &GameState,
    equipment: &EquipmentRegistry,
    mods: &mut ModifierState,
    recipe_id: &str,
) {
    let owns_accumulator = active_effects(state, equipment)
        .iter()
        .any(|e| matches!(e, EquipmentEffect::CraftFailAccumulate { .. }));
    if owns_accumulator {
        *mods.fail_accumulation.entry(recipe_id.to_string()).or_insert(0) += 1;
    }
}

/// Records a successful craft: advances the combo (only when a combo
/// source is active) and always clears the recipe's fail accumulation.
pub fn record_success(
    state: &GameState,
    equipment: &EquipmentRegistry,
    mods: &mut ModifierState,
    recipe_id: &str,
) {
    let owns_combo = active_effects(state, equipment)
        .iter()
        .any(|e| matches!(e, EquipmentEffect::CraftCombo { .. }));
    if owns_combo {
        mods.craft_combo += 1;
    }
    mods.fail_accumulation.remove(recipe_id);
}

pub fn reset_combo(mods: &mut ModifierState) {
    mods.craft_combo = 0;
}

pub fn record_sell(mods: &mut ModifierState, day: u32) {
    match &mut mods.daily_sell {
        Some(entry) if entry.day == day => entry.count += 1,
        _ => mods.daily_sell = Some(DailySell { day, count: 1 }),
    }
}

pub fn daily_sell_count(mods: &ModifierState, day: u32) -> u32 {
    match &mods.daily_sell {
        Some(entry) if entry.day == day => entry.count,
        _ => 0,
    }
}

// ═══════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn registry_with(defs: Vec<EquipmentDef>) -> EquipmentRegistry {
        let mut registry = EquipmentRegistry::default();
        for def in defs {
            registry.equipment.insert(def.id.clone(), def);
        }
        registry
    }

    fn equip(id: &str, category: EquipmentCategory, effects: Vec<EquipmentEffect>) -> EquipmentDef {
        EquipmentDef {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            category,
            price: 0,
            effects,
        }
    }

    fn own(state: &mut GameState, id: &str) {
        state.owned_equipment.insert(id.to_string());
    }

    #[test]
    fn owned_cauldron_is_inert_until_slotted() {
        let registry = registry_with(vec![equip(
            "pot",
            EquipmentCategory::Cauldron,
            vec![EquipmentEffect::CraftSuccessBonus { value: 0.1 }],
        )]);
        let mut state = GameState::new_game("t");
        own(&mut state, "pot");

        assert_eq!(craft_success_bonus(&state, &registry), 0.0);
        state.active_cauldron = Some("pot".to_string());
        assert!((craft_success_bonus(&state, &registry) - 0.1).abs() < 1e-9);
    }

    #[test]
    fn success_bonuses_sum_across_sources() {
        let registry = registry_with(vec![
            equip(
                "a",
                EquipmentCategory::Special,
                vec![EquipmentEffect::CraftSuccessBonus { value: 0.05 }],
            ),
            equip(
                "b",
                EquipmentCategory::Special,
                vec![EquipmentEffect::CraftSuccessBonus { value: 0.03 }],
            ),
        ]);
        let mut state = GameState::new_game("t");
        own(&mut state, "a");
        own(&mut state, "b");
        assert!((craft_success_bonus(&state, &registry) - 0.08).abs() < 1e-9);
    }

    #[test]
    fn quality_cap_takes_max_and_never_drops_below_default() {
        let registry = registry_with(vec![equip(
            "weak_cap",
            EquipmentCategory::Special,
            vec![EquipmentEffect::CraftQualityCap { cap: 80, fail_below_quality: None }],
        )]);
        let mut state = GameState::new_game("t");
        assert_eq!(quality_cap(&state, &registry), 100);
        own(&mut state, "weak_cap");
        // A granted cap below the default never lowers the ceiling.
        assert_eq!(quality_cap(&state, &registry), 100);
    }

    #[test]
    fn stamina_mult_combines_additively_with_floor() {
        let registry = registry_with(vec![
            equip(
                "a",
                EquipmentCategory::Special,
                vec![EquipmentEffect::CraftStaminaMult { value: 0.5 }],
            ),
            equip(
                "b",
                EquipmentCategory::Special,
                vec![EquipmentEffect::CraftStaminaMult { value: 0.4 }],
            ),
        ]);
        let mut state = GameState::new_game("t");
        own(&mut state, "a");
        own(&mut state, "b");
        // 1 + (0.5-1) + (0.4-1) = -0.1, floored at 0.1.
        assert!((stamina_cost_mult(&state, &registry) - 0.1).abs() < 1e-9);
    }

    #[test]
    fn ingredient_reduction_respects_gate_and_floor() {
        let registry = registry_with(vec![equip(
            "scale",
            EquipmentCategory::Material,
            vec![EquipmentEffect::MaterialCountReduce { value: 1, min_original_count: Some(2) }],
        )]);
        let mut state = GameState::new_game("t");
        own(&mut state, "scale");
        assert_eq!(effective_ingredient_count(&state, &registry, 3), 2);
        assert_eq!(effective_ingredient_count(&state, &registry, 2), 1);
        // Below the gate: untouched; and never below 1 regardless.
        assert_eq!(effective_ingredient_count(&state, &registry, 1), 1);
    }

    #[test]
    fn craft_days_halve_rounds_up_then_reduces() {
        let registry = registry_with(vec![
            equip("hourglass", EquipmentCategory::Time, vec![EquipmentEffect::CraftDaysHalve]),
            equip(
                "press",
                EquipmentCategory::Time,
                vec![EquipmentEffect::CraftDaysReduce { value: 1, min_original_days: Some(2) }],
            ),
        ]);
        let mut state = GameState::new_game("t");
        own(&mut state, "hourglass");
        own(&mut state, "press");
        let recipe = RecipeDef {
            id: "r".to_string(),
            name: "r".to_string(),
            result_item_id: "potion_01".to_string(),
            ingredients: vec![],
            required_level: 1,
            days_required: 5,
            difficulty: 1,
            exp_reward: 0,
            required_facilities: vec![],
        };
        // ceil(5/2) = 3, minus 1 = 2.
        assert_eq!(effective_craft_days(&state, &registry, &recipe), 2);
    }

    #[test]
    fn material_transform_applies_floor_then_bonus() {
        let registry = registry_with(vec![
            equip(
                "flask",
                EquipmentCategory::Material,
                vec![EquipmentEffect::MaterialQualityFloor { value: 50 }],
            ),
            equip(
                "mortar",
                EquipmentCategory::Material,
                vec![EquipmentEffect::MaterialQualityBonus { value: 5 }],
            ),
        ]);
        let mut state = GameState::new_game("t");
        own(&mut state, "flask");
        own(&mut state, "mortar");
        assert_eq!(effective_material_quality(&state, &registry, 30), 55);
        assert_eq!(effective_material_quality(&state, &registry, 70), 75);
    }

    #[test]
    fn buy_mult_floors_at_half() {
        let registry = registry_with(vec![
            equip("a", EquipmentCategory::Economy, vec![EquipmentEffect::BuyPriceMult { value: 0.6 }]),
            equip("b", EquipmentCategory::Economy, vec![EquipmentEffect::BuyPriceMult { value: 0.7 }]),
        ]);
        let mut state = GameState::new_game("t");
        own(&mut state, "a");
        own(&mut state, "b");
        // 1 − (0.4 + 0.3) = 0.3, floored at 0.5.
        assert!((buy_price_mult(&state, &registry) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn combo_bonus_honors_per_source_ceiling() {
        let registry = registry_with(vec![equip(
            "chain",
            EquipmentCategory::Cauldron,
            vec![EquipmentEffect::CraftCombo { bonus_per_combo: 5.0, max_combo: Some(3) }],
        )]);
        let mut state = GameState::new_game("t");
        own(&mut state, "chain");
        state.active_cauldron = Some("chain".to_string());
        let mut mods = ModifierState::default();
        mods.craft_combo = 7;
        assert!((combo_quality_bonus(&state, &registry, &mods) - 15.0).abs() < 1e-9);
    }

    #[test]
    fn fail_accumulation_only_advances_with_a_source() {
        let registry = registry_with(vec![equip(
            "reflux",
            EquipmentCategory::Cauldron,
            vec![EquipmentEffect::CraftFailAccumulate { rate: 0.1 }],
        )]);
        let mut state = GameState::new_game("t");
        let mut mods = ModifierState::default();

        // No source: nothing recorded.
        record_failure(&state, &registry, &mut mods, "potion_01");
        assert!(mods.fail_accumulation.is_empty());

        own(&mut state, "reflux");
        state.active_cauldron = Some("reflux".to_string());
        record_failure(&state, &registry, &mut mods, "potion_01");
        record_failure(&state, &registry, &mut mods, "potion_01");
        let bonus = fail_accumulation_bonus(&state, &registry, &mods, "potion_01");
        assert!((bonus - 0.2).abs() < 1e-9);

        // Success clears only that recipe's streak.
        record_success(&state, &registry, &mut mods, "potion_01");
        assert_eq!(
            fail_accumulation_bonus(&state, &registry, &mods, "potion_01"),
            0.0
        );
    }

    #[test]
    fn certain_fail_save_always_saves() {
        let registry = registry_with(vec![equip(
            "reflux",
            EquipmentCategory::Cauldron,
            vec![EquipmentEffect::CraftFailSave { chance: 1.0 }],
        )]);
        let mut state = GameState::new_game("t");
        own(&mut state, "reflux");
        state.active_cauldron = Some("reflux".to_string());
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            assert!(should_save_materials(&state, &registry, &mut rng));
        }
    }

    #[test]
    fn duplicate_quality_stays_within_bounds() {
        let registry = registry_with(vec![equip(
            "twin",
            EquipmentCategory::Cauldron,
            vec![EquipmentEffect::CraftDuplicate { chance: 1.0, quality_variance: 10 }],
        )]);
        let mut state = GameState::new_game("t");
        own(&mut state, "twin");
        state.active_cauldron = Some("twin".to_string());
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let source = OwnedItem::new("potion_01", 98);
            let copy = try_duplicate(&mut state, &registry, &source, &mut rng)
                .expect("chance 1.0 must duplicate");
            assert!(copy.quality >= 1 && copy.quality <= 100);
        }
    }

    #[test]
    fn inventory_expansion_sums_across_sources() {
        let registry = registry_with(vec![
            equip(
                "satchel",
                EquipmentCategory::Special,
                vec![EquipmentEffect::InventoryExpand { value: 10 }],
            ),
            equip(
                "shelf",
                EquipmentCategory::Special,
                vec![EquipmentEffect::InventoryExpand { value: 5 }],
            ),
        ]);
        let mut state = GameState::new_game("t");
        assert_eq!(inventory_expansion(&state, &registry), 0);
        own(&mut state, "satchel");
        own(&mut state, "shelf");
        assert_eq!(inventory_expansion(&state, &registry), 15);
    }

    #[test]
    fn daily_sell_counter_resets_on_new_day() {
        let mut mods = ModifierState::default();
        record_sell(&mut mods, 4);
        record_sell(&mut mods, 4);
        assert_eq!(daily_sell_count(&mods, 4), 2);
        record_sell(&mut mods, 5);
        assert_eq!(daily_sell_count(&mods, 5), 1);
        assert_eq!(daily_sell_count(&mods, 4), 0);
    }
}
