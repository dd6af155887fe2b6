//! Quest board operations: accepting requests and delivering on them.
//!
//! Deadline expiry and new-quest generation happen in the calendar's
//! morning pipeline, not here.

use crate::effects;
use crate::shared::balance::*;
use crate::shared::*;
use bevy::prelude::*;

/// Moves a posted quest onto the active list, stamping the acceptance day.
pub fn accept_quest(state: &mut GameState, quests: &QuestRegistry, quest_id: &str) -> Result<(), String> {
    let Some(def) = quests.get(quest_id) else {
        return Err(format!("Unknown quest: {quest_id}."));
    };
    let Some(position) = state.available_quests.iter().position(|id| id == quest_id) else {
        return Err(format!("\"{}\" is not on the board.", def.title));
    };
    state.available_quests.remove(position);
    state.active_quests.push(ActiveQuest {
        quest_id: quest_id.to_string(),
        accepted_day: state.day,
    });
    state.add_message(format!("Accepted request: {}.", def.title));
    info!("[Quests] accepted {quest_id}");
    Ok(())
}

#[derive(Debug, Clone)]
pub struct DeliveryOutcome {
    pub money_gained: u32,
    pub reputation_gained: u32,
    pub development_gained: u32,
    pub average_quality: u32,
    pub message: String,
}

/// Items that would satisfy a quest right now, best quality first.
pub fn qualifying_items(state: &GameState, def: &QuestDef) -> Vec<OwnedItem> {
    let mut matches: Vec<OwnedItem> = state
        .inventory
        .iter()
        .filter(|item| {
            item.item_id == def.required_item_id
                && def.required_quality.map_or(true, |min| item.quality >= min)
        })
        .cloned()
        .collect();
    matches.sort_by_key(|item| std::cmp::Reverse(item.quality));
    matches
}

pub fn can_deliver(state: &GameState, quests: &QuestRegistry, quest_id: &str) -> bool {
    let Some(def) = quests.get(quest_id) else {
        return false;
    };
    state.active_quests.iter().any(|q| q.quest_id == quest_id)
        && qualifying_items(state, def).len() as u32 >= def.required_quantity
}

/// Consumes the required items (highest quality first) and applies the
/// rewards with equipment modifiers. A shortfall consumes nothing.
pub fn deliver_quest(
    state: &mut GameState,
    quests: &QuestRegistry,
    equipment: &EquipmentRegistry,
    quest_id: &str,
) -> Result<DeliveryOutcome, String> {
    let Some(position) = state.active_quests.iter().position(|q| q.quest_id == quest_id) else {
        return Err(format!("Request {quest_id} is not in progress."));
    };
    let Some(def) = quests.get(quest_id).cloned() else {
        return Err(format!("Unknown quest: {quest_id}."));
    };

    let candidates = qualifying_items(state, &def);
    if (candidates.len() as u32) < def.required_quantity {
        return Err(format!(
            "\"{}\" needs {} × the requested item; you have {}.",
            def.title,
            def.required_quantity,
            candidates.len()
        ));
    }

    let delivered: Vec<OwnedItem> = candidates
        .into_iter()
        .take(def.required_quantity as usize)
        .collect();
    for item in &delivered {
        state.remove_item(&item.item_id, item.quality);
    }
    let total_quality: u32 = delivered.iter().map(|i| i.quality).sum();
    let average_quality = total_quality / delivered.len().max(1) as u32;

    let money_mult = effects::quest_money_mult(state, equipment);
    let (bonus_money, bonus_reputation) =
        effects::quest_quality_bonus(state, equipment, average_quality);
    let money_gained = (def.reward_money as f64 * money_mult).floor() as u32 + bonus_money;
    let reputation_gained = def.reward_reputation
        + effects::quest_reputation_bonus(state, equipment)
        + bonus_reputation;

    let base_development = def.development_override.unwrap_or(match def.kind {
        QuestKind::Deliver => 1,
        QuestKind::Quality | QuestKind::Bulk => 2,
    });
    let development_gained = if average_quality >= HIGH_QUALITY_THRESHOLD {
        base_development + 1
    } else {
        base_development
    };

    state.add_money(money_gained);
    state.add_reputation(reputation_gained);
    state.add_village_development(development_gained);
    state.completed_quest_count += 1;
    state.stats.consecutive_quest_success += 1;
    state.active_quests.remove(position);

    let message = format!(
        "Delivered \"{}\": +{} coins, +{} reputation.",
        def.title, money_gained, reputation_gained
    );
    state.add_message(message.clone());
    info!("[Quests] delivered {quest_id} (avg quality {average_quality})");

    Ok(DeliveryOutcome {
        money_gained,
        reputation_gained,
        development_gained,
        average_quality,
        message,
    })
}
