//! Economy domain: the village shop, the traveling merchant, and the
//! stamina-management actions (study and rest).

pub mod merchant;
pub mod shop;

use crate::effects;
use crate::shared::balance::*;
use crate::shared::*;
use bevy::prelude::*;

#[derive(Debug, Clone)]
pub struct StudyOutcome {
    pub learned_recipe_ids: Vec<String>,
    pub days_spent: u32,
    pub message: String,
}

/// Works through an owned recipe book, learning every recipe in it that
/// the player does not already know. Costs stamina and days; equipment
/// can shorten or eliminate the reading time.
pub fn study_book(
    state: &mut GameState,
    books: &BookRegistry,
    recipes: &RecipeRegistry,
    equipment: &EquipmentRegistry,
    book_id: &str,
) -> Result<StudyOutcome, String> {
    let Some(book) = books.get(book_id) else {
        return Err(format!("Unknown book: {book_id}."));
    };
    if !state.owned_books.contains(book_id) {
        return Err(format!("You do not own \"{}\".", book.name));
    }
    let unlearned: Vec<String> = book
        .recipe_ids
        .iter()
        .filter(|id| !state.knows_recipe(id))
        .cloned()
        .collect();
    if unlearned.is_empty() {
        return Err(format!("Nothing left to learn from \"{}\".", book.name));
    }
    if state.stamina < STUDY_COST {
        return Err("Too exhausted to study.".to_string());
    }

    let max_recipe_level = unlearned
        .iter()
        .filter_map(|id| recipes.get(id))
        .map(|r| r.required_level)
        .max()
        .unwrap_or(1);
    let days_spent = effects::effective_study_days(state, equipment, book, max_recipe_level);

    state.consume_stamina(STUDY_COST);
    for recipe_id in &unlearned {
        state.learn_recipe(recipe_id);
    }

    let message = if days_spent == 0 {
        format!("Skimmed \"{}\" in an afternoon: {} new recipes.", book.name, unlearned.len())
    } else {
        format!(
            "Studied \"{}\" for {} days: {} new recipes.",
            book.name,
            days_spent,
            unlearned.len()
        )
    };
    state.add_message(message.clone());
    info!("[Economy] studied {book_id}: {} recipes in {days_spent} days", unlearned.len());

    Ok(StudyOutcome {
        learned_recipe_ids: unlearned,
        days_spent,
        message,
    })
}

/// A day off. Restores a fixed chunk of stamina; the caller advances the
/// calendar by the returned day count.
pub fn rest(state: &mut GameState) -> u32 {
    state.restore_stamina(REST_RECOVERY);
    state.add_message("Took a day to rest.".to_string());
    1
}
