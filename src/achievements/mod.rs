//! Achievement engine: condition evaluation, completion checks, and
//! reward claims.
//!
//! Completion and claiming are deliberately split. `check_achievements`
//! marks at most one achievement completed and parks its reward; the
//! presentation layer walks the player through the dialogue before
//! `claim_reward` applies the payout. Only then does the next check run,
//! so chained unlocks resolve one at a time.

use crate::shared::*;
use bevy::prelude::*;

/// Current value of the stat a numeric condition reads.
fn condition_value(state: &GameState, kind: ConditionKind) -> u32 {
    match kind {
        ConditionKind::Level => state.alchemy_level,
        ConditionKind::Reputation => state.reputation,
        ConditionKind::Money => state.money,
        ConditionKind::QuestCount => state.completed_quest_count,
        ConditionKind::ActiveQuestCount => state.active_quests.len() as u32,
        ConditionKind::CraftCount => state.stats.total_craft_count,
        ConditionKind::CraftItem => 0,
        ConditionKind::CraftQuality => state.stats.highest_quality_crafted,
        ConditionKind::ExpeditionCount => state.stats.total_expedition_count,
        ConditionKind::RecipeCount => state.known_recipes.len() as u32,
        ConditionKind::ConsecutiveQuests => state.stats.consecutive_quest_success,
        ConditionKind::TotalSales => state.stats.total_sales_amount,
        ConditionKind::Day => state.day,
        ConditionKind::VillageDevelopment => state.village_development,
        ConditionKind::InventoryOpened => state.stats.inventory_opened as u32,
    }
}

pub fn evaluate_condition(state: &GameState, condition: &AchievementCondition) -> bool {
    if condition.kind == ConditionKind::CraftItem {
        return condition
            .target_item
            .as_ref()
            .map_or(false, |id| state.crafted_items.contains(id));
    }
    let value = condition_value(state, condition.kind);
    match condition.comparison {
        Comparison::Ge => value >= condition.target_value,
        Comparison::Le => value <= condition.target_value,
        Comparison::Eq => value == condition.target_value,
    }
}

fn prerequisites_met(state: &GameState, def: &AchievementDef) -> bool {
    def.prerequisites.iter().all(|id| state.is_achievement_completed(id))
}

pub fn is_eligible(state: &GameState, def: &AchievementDef) -> bool {
    !state.is_achievement_completed(&def.id)
        && prerequisites_met(state, def)
        && def.conditions.iter().all(|c| evaluate_condition(state, c))
}

/// Finds the highest-priority newly-eligible achievement, marks it
/// completed with its reward pending, and returns its id. Does nothing
/// while a reward is still unclaimed.
pub fn check_achievements(
    state: &mut GameState,
    registry: &AchievementRegistry,
) -> Option<String> {
    if state.achievements.pending_reward.is_some() {
        return None;
    }
    let id = registry
        .all_sorted()
        .iter()
        .find(|def| is_eligible(state, def))
        .map(|def| def.id.clone())?;
    state.complete_achievement(&id);
    info!("[Achievements] completed {id}");
    Some(id)
}

/// The goal shown on the HUD: the first important achievement whose
/// prerequisites are met but which is not yet complete.
pub fn current_goal<'a>(
    state: &GameState,
    registry: &'a AchievementRegistry,
) -> Option<&'a AchievementDef> {
    registry.all_sorted().iter().find(|def| {
        def.important && !state.is_achievement_completed(&def.id) && prerequisites_met(state, def)
    })
}

/// Goals that become visible on the HUD once a given achievement lands.
pub fn newly_active_goals<'a>(
    state: &GameState,
    registry: &'a AchievementRegistry,
    completed_id: &str,
) -> Vec<&'a AchievementDef> {
    registry
        .all_sorted()
        .iter()
        .filter(|def| {
            def.important
                && !state.is_achievement_completed(&def.id)
                && def.prerequisites.iter().any(|p| p == completed_id)
                && prerequisites_met(state, def)
        })
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct ClaimedReward {
    pub achievement_id: String,
    pub unlocked_actions: Vec<ActionType>,
    pub levels_gained: u32,
}

/// Applies the parked reward and clears the pending marker.
pub fn claim_reward(
    state: &mut GameState,
    registry: &AchievementRegistry,
) -> Option<ClaimedReward> {
    let id = state.achievements.pending_reward.clone()?;
    let Some(def) = registry.get(&id).cloned() else {
        state.clear_pending_reward();
        return None;
    };
    let reward = &def.reward;

    let mut claimed = ClaimedReward {
        achievement_id: id.clone(),
        ..Default::default()
    };
    if reward.money > 0 {
        state.add_money(reward.money);
    }
    if reward.exp > 0 {
        claimed.levels_gained = state.add_exp(reward.exp);
    }
    if reward.reputation > 0 {
        state.add_reputation(reward.reputation);
    }
    if reward.village_development > 0 {
        state.add_village_development(reward.village_development);
    }
    for item in &reward.items {
        for _ in 0..item.quantity {
            state.add_item(OwnedItem::with_origin(
                &item.item_id,
                item.quality,
                ItemOrigin {
                    kind: OriginKind::Reward,
                    day: state.day,
                    detail: Some(def.title.clone()),
                },
            ));
        }
    }
    for recipe_id in &reward.recipes {
        state.learn_recipe(recipe_id);
    }
    for action in &reward.unlocks {
        if state.unlock_action(*action) {
            claimed.unlocked_actions.push(*action);
        }
    }
    for facility_id in &reward.facilities {
        state.facilities.insert(facility_id.clone());
    }

    state.clear_pending_reward();
    state.add_message(format!("Milestone reached: {}.", def.title));
    info!("[Achievements] claimed reward for {id}");
    Some(claimed)
}

/// Rough completion percentage for the album screen.
pub fn achievement_progress(state: &GameState, def: &AchievementDef) -> u32 {
    if state.is_achievement_completed(&def.id) {
        return 100;
    }
    if def.conditions.is_empty() {
        return 0;
    }
    let total: f64 = def
        .conditions
        .iter()
        .map(|condition| match condition.kind {
            ConditionKind::CraftItem => {
                if evaluate_condition(state, condition) {
                    1.0
                } else {
                    0.0
                }
            }
            _ => match condition.comparison {
                Comparison::Ge if condition.target_value > 0 => {
                    (condition_value(state, condition.kind) as f64
                        / condition.target_value as f64)
                        .min(1.0)
                }
                _ => {
                    if evaluate_condition(state, condition) {
                        1.0
                    } else {
                        0.0
                    }
                }
            },
        })
        .sum();
    ((total / def.conditions.len() as f64) * 100.0).floor() as u32
}

// ═══════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════
