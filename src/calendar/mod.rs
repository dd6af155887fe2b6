//! Calendar domain: day advancement and the morning pipeline.
//!
//! Ending a turn advances the day, then runs the morning in a fixed
//! order: expedition returns, quest deadlines, fresh postings, and the
//! traveling merchant. If anything happened overnight the game wakes up
//! in the Morning phase so the events can be presented; otherwise it
//! drops straight into Action.

use crate::expedition;
use crate::shared::balance::*;
use crate::shared::*;
use bevy::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;

pub struct CalendarPlugin;

impl Plugin for CalendarPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<EndTurnEvent>().add_systems(
            Update,
            handle_end_turn.run_if(in_state(AppState::Playing)),
        );
    }
}

fn handle_end_turn(
    mut events: EventReader<EndTurnEvent>,
    mut state: ResMut<GameState>,
    items: Res<ItemRegistry>,
    areas: Res<AreaRegistry>,
    quests: Res<QuestRegistry>,
    equipment: Res<EquipmentRegistry>,
    books: Res<BookRegistry>,
) {
    let mut rng = rand::thread_rng();
    for event in events.read() {
        end_turn(
            &mut state, &items, &areas, &quests, &equipment, &books, &mut rng, event.days,
        );
    }
}

// ─── Calendar math ─────────────────────────────────────────────────────

pub fn month_of_day(day: u32) -> u32 {
    day.div_ceil(DAYS_PER_MONTH)
}

pub fn day_of_month(day: u32) -> u32 {
    (day - 1) % DAYS_PER_MONTH + 1
}

/// The merchant camps in the village square for one week each month.
pub fn is_merchant_visiting(day: u32) -> bool {
    let dom = day_of_month(day);
    (MERCHANT_VISIT_START_DAY..=MERCHANT_VISIT_END_DAY).contains(&dom)
}

pub fn format_date(day: u32) -> String {
    format!("Month {}, Day {}", month_of_day(day), day_of_month(day))
}

// ─── Turn resolution ───────────────────────────────────────────────────

/// Advances the calendar by `days` and resolves the morning. `days` of 0
/// re-runs the morning for the current day without advancing (used when
/// an action resolves same-day).
pub fn end_turn(
    state: &mut GameState,
    items: &ItemRegistry,
    areas: &AreaRegistry,
    quests: &QuestRegistry,
    equipment: &EquipmentRegistry,
    books: &BookRegistry,
    rng: &mut impl Rng,
    days: u32,
) {
    if days > 0 {
        state.day += days;
        state.pending_day_transition = Some(DayTransition {
            to_day: state.day,
            days_advanced: days,
        });
        info!("[Calendar] advanced to {} (+{days})", format_date(state.day));
    }

    if state.day > FINAL_DAY {
        state.phase = GamePhase::Ending;
        state.add_message("The year is over.".to_string());
        info!("[Calendar] final day passed, entering ending");
        return;
    }

    let mut events = Vec::new();
    resolve_expedition_return(state, items, areas, equipment, rng, &mut events);
    expire_overdue_quests(state, quests, &mut events);
    post_new_quests(state, quests, rng, &mut events);
    update_merchant(state, items, equipment, books, rng, &mut events);

    state.phase = if events.is_empty() {
        GamePhase::Action
    } else {
        GamePhase::Morning
    };
    state.morning_events = events;
}

/// Clears the morning report and opens the day for actions.
pub fn start_action_phase(state: &mut GameState) {
    state.morning_events.clear();
    if state.phase == GamePhase::Morning {
        state.phase = GamePhase::Action;
    }
}

fn resolve_expedition_return(
    state: &mut GameState,
    items: &ItemRegistry,
    areas: &AreaRegistry,
    equipment: &EquipmentRegistry,
    rng: &mut impl Rng,
    events: &mut Vec<MorningEvent>,
) {
    if !expedition::is_expedition_due(state) {
        return;
    }
    let Some(trip) = state.expedition.take() else {
        return;
    };
    let Some(area) = areas.get(&trip.area_id) else {
        return;
    };
    let haul = expedition::calculate_expedition_drops(
        state,
        items,
        equipment,
        area,
        trip.duration_days,
        rng,
    );
    for item in &haul {
        state.add_item(item.clone());
    }
    state.add_message(format!(
        "The collector returned from {} with {} finds.",
        area.name,
        haul.len()
    ));
    info!("[Calendar] expedition returned from {} with {} items", trip.area_id, haul.len());
    events.push(MorningEvent::ExpeditionReturned {
        area_id: trip.area_id,
        items: haul,
    });
}

fn expire_overdue_quests(
    state: &mut GameState,
    quests: &QuestRegistry,
    events: &mut Vec<MorningEvent>,
) {
    let overdue: Vec<ActiveQuest> = state
        .active_quests
        .iter()
        .filter(|q| {
            quests
                .get(&q.quest_id)
                .map_or(true, |def| state.day > q.accepted_day + def.deadline_days)
        })
        .cloned()
        .collect();

    for quest in overdue {
        let title = quests
            .get(&quest.quest_id)
            .map_or_else(|| quest.quest_id.clone(), |def| def.title.clone());
        state.lose_reputation(EXPIRED_REPUTATION_PENALTY);
        state.failed_quest_count += 1;
        state.stats.consecutive_quest_success = 0;
        state.active_quests.retain(|q| q.quest_id != quest.quest_id);
        state.add_message(format!("The deadline for \"{title}\" passed."));
        info!("[Calendar] quest {} expired", quest.quest_id);
        events.push(MorningEvent::QuestExpired {
            quest_id: quest.quest_id,
            title,
        });
    }
}

fn post_new_quests(
    state: &mut GameState,
    quests: &QuestRegistry,
    rng: &mut impl Rng,
    events: &mut Vec<MorningEvent>,
) {
    if !state.is_action_unlocked(ActionType::Quest) {
        return;
    }
    let board_empty = state.available_quests.is_empty();
    if !board_empty && !rng.gen_bool(NEW_QUEST_CHANCE) {
        return;
    }

    let mut eligible: Vec<&QuestDef> = quests
        .quests
        .values()
        .filter(|def| {
            state.alchemy_level >= def.min_level
                && state.reputation >= def.min_reputation
                && !state.available_quests.contains(&def.id)
                && !state.active_quests.iter().any(|q| q.quest_id == def.id)
        })
        .collect();
    if eligible.is_empty() {
        return;
    }
    eligible.sort_by(|a, b| a.id.cmp(&b.id));
    eligible.shuffle(rng);

    let count = rng.gen_range(1..=MAX_QUESTS_PER_MORNING).min(eligible.len());
    let mut posted = Vec::new();
    for def in eligible.iter().take(count) {
        state.available_quests.push(def.id.clone());
        state.add_message(format!("New request posted: {}.", def.title));
        posted.push(def.id.clone());
    }
    info!("[Calendar] posted {} new quests", posted.len());
    events.push(MorningEvent::NewQuestsPosted { quest_ids: posted });
}

fn update_merchant(
    state: &mut GameState,
    items: &ItemRegistry,
    equipment: &EquipmentRegistry,
    books: &BookRegistry,
    rng: &mut impl Rng,
    events: &mut Vec<MorningEvent>,
) {
    if !state.is_action_unlocked(ActionType::TravelingMerchant) {
        return;
    }
    let month = month_of_day(state.day);
    if is_merchant_visiting(state.day) {
        if state.merchant_visited_months.insert(month) {
            let lineup = crate::economy::merchant::generate_lineup(
                state, items, equipment, books, month, rng,
            );
            state.merchant_lineup = Some(lineup);
            state.add_message("The traveling merchant has set up in the square.".to_string());
            info!("[Calendar] merchant arrived for month {month}");
            events.push(MorningEvent::MerchantArrived);
        }
    } else if state.merchant_lineup.take().is_some() {
        state.add_message("The traveling merchant has moved on.".to_string());
        info!("[Calendar] merchant departed");
        events.push(MorningEvent::MerchantDeparted);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_fixtures::{self, Catalog};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn turn(state: &mut GameState, catalog: &Catalog, rng: &mut StdRng, days: u32) {
        end_turn(
            state,
            &catalog.items,
            &catalog.areas,
            &catalog.quests,
            &catalog.equipment,
            &catalog.books,
            rng,
            days,
        );
    }

    #[test]
    fn calendar_math() {
        assert_eq!(month_of_day(1), 1);
        assert_eq!(month_of_day(28), 1);
        assert_eq!(month_of_day(29), 2);
        assert_eq!(day_of_month(1), 1);
        assert_eq!(day_of_month(28), 28);
        assert_eq!(day_of_month(29), 1);
        assert!(!is_merchant_visiting(7));
        assert!(is_merchant_visiting(8));
        assert!(is_merchant_visiting(14));
        assert!(!is_merchant_visiting(15));
        assert!(is_merchant_visiting(28 + 8));
        assert_eq!(format_date(30), "Month 2, Day 2");
    }

    #[test]
    fn quiet_morning_goes_straight_to_action() {
        let catalog = test_fixtures::catalog();
        let mut state = GameState::new_game("t");
        let mut rng = StdRng::seed_from_u64(1);

        turn(&mut state, &catalog, &mut rng, 1);
        assert_eq!(state.day, 2);
        assert_eq!(state.phase, GamePhase::Action);
        assert!(state.morning_events.is_empty());
        assert_eq!(
            state.pending_day_transition,
            Some(DayTransition { to_day: 2, days_advanced: 1 })
        );
    }

    #[test]
    fn year_ends_after_the_final_day() {
        let catalog = test_fixtures::catalog();
        let mut state = GameState::new_game("t");
        state.day = FINAL_DAY;
        let mut rng = StdRng::seed_from_u64(1);

        turn(&mut state, &catalog, &mut rng, 1);
        assert_eq!(state.phase, GamePhase::Ending);
    }

    #[test]
    fn expedition_returns_on_schedule() {
        let catalog = test_fixtures::catalog();
        let mut state = GameState::new_game("t");
        crate::expedition::dispatch_expedition(&mut state, &catalog.areas, "forest", 2).unwrap();
        let mut rng = StdRng::seed_from_u64(4);

        turn(&mut state, &catalog, &mut rng, 1);
        assert!(state.expedition.is_some(), "one day early");

        turn(&mut state, &catalog, &mut rng, 1);
        assert!(state.expedition.is_none());
        assert_eq!(state.phase, GamePhase::Morning);
        assert!(state
            .morning_events
            .iter()
            .any(|e| matches!(e, MorningEvent::ExpeditionReturned { area_id, items }
                if area_id == "forest" && items.len() == 4)));

        start_action_phase(&mut state);
        assert_eq!(state.phase, GamePhase::Action);
        assert!(state.morning_events.is_empty());
    }

    #[test]
    fn overdue_quests_expire_with_a_reputation_hit() {
        let catalog = test_fixtures::catalog();
        let mut state = GameState::new_game("t");
        state.reputation = 20;
        state.stats.consecutive_quest_success = 3;
        state.active_quests.push(ActiveQuest {
            quest_id: "quest_potion_basic".to_string(),
            accepted_day: 1,
        });
        state.day = 11; // deadline_days is 10; day 11 is the last valid day
        let mut rng = StdRng::seed_from_u64(1);

        turn(&mut state, &catalog, &mut rng, 0);
        assert_eq!(state.active_quests.len(), 1);

        turn(&mut state, &catalog, &mut rng, 1);
        assert!(state.active_quests.is_empty());
        assert_eq!(state.reputation, 15);
        assert_eq!(state.failed_quest_count, 1);
        assert_eq!(state.stats.consecutive_quest_success, 0);
        assert!(state
            .morning_events
            .iter()
            .any(|e| matches!(e, MorningEvent::QuestExpired { quest_id, .. }
                if quest_id == "quest_potion_basic")));
    }

    #[test]
    fn empty_board_always_gets_new_postings() {
        let catalog = test_fixtures::catalog();
        let mut state = GameState::new_game("t");
        state.unlock_action(ActionType::Quest);
        let mut rng = StdRng::seed_from_u64(2);

        turn(&mut state, &catalog, &mut rng, 1);
        let posted = state.available_quests.len();
        assert!(posted >= 1 && posted <= 2, "posted {posted}");
        // Level 1, reputation 0: only the entry templates qualify.
        for id in &state.available_quests {
            let def = catalog.quests.get(id).unwrap();
            assert!(def.min_level <= 1);
            assert_eq!(def.min_reputation, 0);
        }
    }

    #[test]
    fn quest_generation_requires_the_board_unlock() {
        let catalog = test_fixtures::catalog();
        let mut state = GameState::new_game("t");
        let mut rng = StdRng::seed_from_u64(2);
        turn(&mut state, &catalog, &mut rng, 1);
        assert!(state.available_quests.is_empty());
    }

    #[test]
    fn merchant_arrives_once_per_month_and_departs() {
        let catalog = test_fixtures::catalog();
        let mut state = GameState::new_game("t");
        state.unlock_action(ActionType::TravelingMerchant);
        state.day = MERCHANT_VISIT_START_DAY - 1;
        let mut rng = StdRng::seed_from_u64(6);

        turn(&mut state, &catalog, &mut rng, 1);
        assert!(state.merchant_lineup.is_some());
        assert!(state.merchant_visited_months.contains(&1));
        assert!(state
            .morning_events
            .iter()
            .any(|e| matches!(e, MorningEvent::MerchantArrived)));

        // Buying everything and re-running a morning must not reroll stock.
        let lineup_before = state.merchant_lineup.clone();
        turn(&mut state, &catalog, &mut rng, 1);
        assert_eq!(
            format!("{:?}", state.merchant_lineup),
            format!("{:?}", lineup_before)
        );

        state.day = MERCHANT_VISIT_END_DAY;
        turn(&mut state, &catalog, &mut rng, 1);
        assert!(state.merchant_lineup.is_none());
        assert!(state
            .morning_events
            .iter()
            .any(|e| matches!(e, MorningEvent::MerchantDeparted)));
    }

    #[test]
    fn merchant_stays_away_until_unlocked() {
        let catalog = test_fixtures::catalog();
        let mut state = GameState::new_game("t");
        state.day = MERCHANT_VISIT_START_DAY;
        let mut rng = StdRng::seed_from_u64(6);
        turn(&mut state, &catalog, &mut rng, 0);
        assert!(state.merchant_lineup.is_none());
    }
}
