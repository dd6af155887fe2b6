//! Recipe catalog. Result ids double as recipe ids.

use crate::shared::*;

struct RecipeSpec {
    id: &'static str,
    name: &'static str,
    ingredients: Vec<Ingredient>,
    required_level: u32,
    days_required: u32,
    difficulty: u32,
    exp_reward: u32,
    required_facilities: &'static [&'static str],
}

fn build(spec: RecipeSpec) -> RecipeDef {
    RecipeDef {
        id: spec.id.to_string(),
        name: spec.name.to_string(),
        result_item_id: spec.id.to_string(),
        ingredients: spec.ingredients,
        required_level: spec.required_level,
        days_required: spec.days_required,
        difficulty: spec.difficulty,
        exp_reward: spec.exp_reward,
        required_facilities: spec.required_facilities.iter().map(|s| s.to_string()).collect(),
    }
}

pub fn populate_recipes(registry: &mut RecipeRegistry) {
    let recipes = [
        RecipeSpec {
            id: "potion_01",
            name: "Healing Draught",
            ingredients: vec![Ingredient::item("herb_01", 2), Ingredient::item("water_01", 1)],
            required_level: 1,
            days_required: 1,
            difficulty: 1,
            exp_reward: 10,
            required_facilities: &[],
        },
        RecipeSpec {
            id: "antidote",
            name: "Antidote",
            ingredients: vec![Ingredient::item("herb_02", 2), Ingredient::item("water_01", 1)],
            required_level: 2,
            days_required: 1,
            difficulty: 2,
            exp_reward: 15,
            required_facilities: &[],
        },
        RecipeSpec {
            id: "bomb_01",
            name: "Blast Charge",
            ingredients: vec![
                Ingredient::item("ore_01", 1),
                Ingredient::of_category(ItemCategory::Misc, 1),
            ],
            required_level: 3,
            days_required: 2,
            difficulty: 3,
            exp_reward: 20,
            required_facilities: &[],
        },
        RecipeSpec {
            id: "ingot_01",
            name: "Iron Ingot",
            ingredients: vec![Ingredient::item("ore_01", 3)],
            required_level: 4,
            days_required: 3,
            difficulty: 4,
            exp_reward: 25,
            required_facilities: &["furnace"],
        },
        RecipeSpec {
            id: "potion_02",
            name: "Greater Draught",
            ingredients: vec![Ingredient::item("herb_01", 3), Ingredient::item("water_02", 1)],
            required_level: 5,
            days_required: 2,
            difficulty: 4,
            exp_reward: 30,
            required_facilities: &["distiller"],
        },
        RecipeSpec {
            id: "ingot_02",
            name: "Silver Ingot",
            ingredients: vec![Ingredient::item("ore_02", 3)],
            required_level: 8,
            days_required: 3,
            difficulty: 6,
            exp_reward: 50,
            required_facilities: &["furnace"],
        },
        RecipeSpec {
            id: "elixir",
            name: "Elixir",
            ingredients: vec![
                Ingredient::item("potion_02", 1),
                Ingredient::item("water_02", 1),
                Ingredient::item("misc_02", 1),
            ],
            required_level: 15,
            days_required: 5,
            difficulty: 9,
            exp_reward: 100,
            required_facilities: &["magic_circle"],
        },
    ];
    for spec in recipes {
        let recipe = build(spec);
        registry.recipes.insert(recipe.id.clone(), recipe);
    }
}
