//! Recipe book catalog. Studying an owned book teaches its recipes.

use crate::shared::*;

fn def(id: &str, name: &str, recipe_ids: &[&str], base_price: u32, study_days: u32) -> RecipeBookDef {
    RecipeBookDef {
        id: id.to_string(),
        name: name.to_string(),
        recipe_ids: recipe_ids.iter().map(|s| s.to_string()).collect(),
        base_price,
        study_days,
    }
}

pub fn populate_books(registry: &mut BookRegistry) {
    let books = [
        def("book_basics", "A Primer on Alchemy", &["potion_01", "antidote"], 100, 3),
        def("book_advanced_potions", "Advanced Compounding", &["potion_02"], 500, 4),
        def("book_metallurgy", "Smelting and the Forge", &["ingot_01", "ingot_02"], 800, 5),
        def("book_explosives", "A Treatise on Explosives", &["bomb_01"], 400, 3),
        def("book_legendary", "The Lost Panacea", &["elixir"], 2000, 7),
    ];
    for book in books {
        registry.books.insert(book.id.clone(), book);
    }
}
