//! The traveling merchant: one visit per month with a rotating lineup of
//! equipment, recipe books, and rare materials at a markup.

use crate::shared::balance::*;
use crate::shared::*;
use bevy::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;

/// Materials the merchant is willing to haul: pricey, non-craftable stock,
/// with the most valuable pieces held back until the buyer has a name.
fn rare_material_pool<'a>(state: &GameState, items: &'a ItemRegistry) -> Vec<&'a ItemDef> {
    let mut pool: Vec<&ItemDef> = items
        .items
        .values()
        .filter(|item| item.base_price >= 80 && item.category != ItemCategory::Product)
        .filter(|item| {
            if item.base_price >= MERCHANT_RARE_PRICE_TIER_HIGH {
                state.alchemy_level >= MERCHANT_RARE_LEVEL_TIER_HIGH
            } else if item.base_price >= MERCHANT_RARE_PRICE_TIER_MID {
                state.alchemy_level >= MERCHANT_RARE_LEVEL_TIER_MID
            } else {
                true
            }
        })
        .collect();
    pool.sort_by(|a, b| a.id.cmp(&b.id));
    pool
}

/// Rolls this month's lineup. Sold-out categories (all equipment owned,
/// all books owned) simply produce fewer slots.
pub fn generate_lineup(
    state: &GameState,
    items: &ItemRegistry,
    equipment: &EquipmentRegistry,
    books: &BookRegistry,
    month: u32,
    rng: &mut impl Rng,
) -> MerchantLineup {
    let mut slots = Vec::new();

    let mut unowned_equipment: Vec<&EquipmentDef> = equipment
        .equipment
        .values()
        .filter(|e| !state.owned_equipment.contains(&e.id))
        .collect();
    unowned_equipment.sort_by(|a, b| a.id.cmp(&b.id));
    if let Some(piece) = unowned_equipment.choose(rng) {
        slots.push(MerchantSlot {
            stock: MerchantStock::Equipment {
                equipment_id: piece.id.clone(),
            },
            price: piece.price,
            purchased: false,
        });
    }

    let mut unowned_books: Vec<&RecipeBookDef> = books
        .books
        .values()
        .filter(|b| !state.owned_books.contains(&b.id))
        .collect();
    unowned_books.sort_by(|a, b| a.id.cmp(&b.id));
    if let Some(book) = unowned_books.choose(rng) {
        slots.push(MerchantSlot {
            stock: MerchantStock::RecipeBook {
                book_id: book.id.clone(),
            },
            price: (book.base_price as f64 * MERCHANT_BOOK_PRICE_RATE).floor() as u32,
            purchased: false,
        });
    }

    let pool = rare_material_pool(state, items);
    if let Some(material) = pool.choose(rng) {
        slots.push(MerchantSlot {
            stock: MerchantStock::RareMaterial {
                item_id: material.id.clone(),
            },
            price: (material.base_price as f64 * MERCHANT_RARE_PRICE_RATE).floor() as u32,
            purchased: false,
        });
        if pool.len() > 1 && rng.gen_bool(MERCHANT_EXTRA_SLOT_CHANCE) {
            let rest: Vec<&&ItemDef> =
                pool.iter().filter(|m| m.id != material.id).collect();
            if let Some(extra) = rest.choose(rng) {
                slots.push(MerchantSlot {
                    stock: MerchantStock::RareMaterial {
                        item_id: extra.id.clone(),
                    },
                    price: (extra.base_price as f64 * MERCHANT_RARE_PRICE_RATE).floor() as u32,
                    purchased: false,
                });
            }
        }
    }

    MerchantLineup { month, slots }
}

/// Buys one lineup slot. Cauldrons slot themselves into an empty stand;
/// rare materials arrive at a high quality roll.
pub fn purchase_merchant_slot(
    state: &mut GameState,
    items: &ItemRegistry,
    equipment: &EquipmentRegistry,
    slot_index: usize,
    rng: &mut impl Rng,
) -> Result<String, String> {
    let Some(lineup) = &state.merchant_lineup else {
        return Err("The merchant is not in town.".to_string());
    };
    let Some(slot) = lineup.slots.get(slot_index) else {
        return Err(format!("No such stall slot: {slot_index}."));
    };
    if slot.purchased {
        return Err("That piece is already sold.".to_string());
    }
    let price = slot.price;
    let stock = slot.stock.clone();
    if !state.spend_money(price) {
        return Err(format!("That costs {price} coins."));
    }

    let message = match &stock {
        MerchantStock::Equipment { equipment_id } => {
            state.owned_equipment.insert(equipment_id.clone());
            let def = equipment.get(equipment_id);
            if let Some(def) = def {
                if def.category == EquipmentCategory::Cauldron && state.active_cauldron.is_none() {
                    state.active_cauldron = Some(equipment_id.clone());
                }
            }
            let name = def.map_or(equipment_id.as_str(), |d| d.name.as_str());
            format!("Bought {name} from the merchant for {price} coins.")
        }
        MerchantStock::RecipeBook { book_id } => {
            state.owned_books.insert(book_id.clone());
            format!("Bought a recipe book from the merchant for {price} coins.")
        }
        MerchantStock::RareMaterial { item_id } => {
            let quality = rng.gen_range(MERCHANT_RARE_QUALITY_MIN..=MERCHANT_RARE_QUALITY_MAX);
            state.add_item(OwnedItem::with_origin(
                item_id,
                quality,
                ItemOrigin {
                    kind: OriginKind::Merchant,
                    day: state.day,
                    detail: None,
                },
            ));
            format!(
                "Bought {} (quality {quality}) from the merchant for {price} coins.",
                items.name_of(item_id)
            )
        }
    };

    if let Some(lineup) = &mut state.merchant_lineup {
        lineup.slots[slot_index].purchased = true;
    }
    state.add_message(message.clone());
    info!("[Economy] merchant purchase, slot {slot_index} for {price}");
    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_fixtures;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn lineup_for(state: &GameState, seed: u64) -> MerchantLineup {
        let catalog = test_fixtures::catalog();
        let mut rng = StdRng::seed_from_u64(seed);
        generate_lineup(state, &catalog.items, &catalog.equipment, &catalog.books, 1, &mut rng)
    }

    #[test]
    fn lineup_offers_equipment_book_and_rare_material() {
        let state = GameState::new_game("t");
        let lineup = lineup_for(&state, 5);

        assert!(lineup.slots.len() >= 3);
        assert!(matches!(lineup.slots[0].stock, MerchantStock::Equipment { .. }));
        assert!(matches!(lineup.slots[1].stock, MerchantStock::RecipeBook { .. }));
        assert!(matches!(lineup.slots[2].stock, MerchantStock::RareMaterial { .. }));
        assert!(lineup.slots.iter().all(|s| !s.purchased));
    }

    #[test]
    fn low_level_buyers_only_see_cheap_rare_materials() {
        let state = GameState::new_game("t");
        for seed in 0..20 {
            let lineup = lineup_for(&state, seed);
            for slot in &lineup.slots {
                if let MerchantStock::RareMaterial { item_id } = &slot.stock {
                    // Only ore_02 (100 coins) clears the level gates at level 1.
                    assert_eq!(item_id, "ore_02");
                }
            }
        }
    }

    #[test]
    fn owned_stock_is_not_reoffered() {
        let catalog = test_fixtures::catalog();
        let mut state = GameState::new_game("t");
        for id in catalog.equipment.equipment.keys() {
            state.owned_equipment.insert(id.clone());
        }
        let lineup = lineup_for(&state, 2);
        assert!(!lineup
            .slots
            .iter()
            .any(|s| matches!(s.stock, MerchantStock::Equipment { .. })));
    }

    #[test]
    fn purchasing_a_cauldron_slots_it_into_the_empty_stand() {
        let catalog = test_fixtures::catalog();
        let mut state = GameState::new_game("t");
        state.merchant_lineup = Some(MerchantLineup {
            month: 1,
            slots: vec![MerchantSlot {
                stock: MerchantStock::Equipment {
                    equipment_id: "cauldron_spirit".to_string(),
                },
                price: 400,
                purchased: false,
            }],
        });
        let mut rng = StdRng::seed_from_u64(1);

        purchase_merchant_slot(&mut state, &catalog.items, &catalog.equipment, 0, &mut rng)
            .unwrap();
        assert!(state.owned_equipment.contains("cauldron_spirit"));
        assert_eq!(state.active_cauldron.as_deref(), Some("cauldron_spirit"));
        assert_eq!(state.money, 100);
        assert!(state.merchant_lineup.as_ref().unwrap().slots[0].purchased);

        let again =
            purchase_merchant_slot(&mut state, &catalog.items, &catalog.equipment, 0, &mut rng);
        assert!(again.is_err());
    }

    #[test]
    fn rare_material_purchase_rolls_high_quality() {
        let catalog = test_fixtures::catalog();
        let mut state = GameState::new_game("t");
        state.merchant_lineup = Some(MerchantLineup {
            month: 1,
            slots: vec![MerchantSlot {
                stock: MerchantStock::RareMaterial {
                    item_id: "ore_02".to_string(),
                },
                price: 250,
                purchased: false,
            }],
        });
        let mut rng = StdRng::seed_from_u64(9);

        purchase_merchant_slot(&mut state, &catalog.items, &catalog.equipment, 0, &mut rng)
            .unwrap();
        let ore = state.inventory.iter().find(|i| i.item_id == "ore_02").unwrap();
        assert!(ore.quality >= MERCHANT_RARE_QUALITY_MIN);
        assert!(ore.quality <= MERCHANT_RARE_QUALITY_MAX);
        assert_eq!(ore.origin.as_ref().unwrap().kind, OriginKind::Merchant);
    }

    #[test]
    fn purchase_requires_funds() {
        let catalog = test_fixtures::catalog();
        let mut state = GameState::new_game("t");
        state.money = 10;
        state.merchant_lineup = Some(MerchantLineup {
            month: 1,
            slots: vec![MerchantSlot {
                stock: MerchantStock::RecipeBook {
                    book_id: "book_basics".to_string(),
                },
                price: 120,
                purchased: false,
            }],
        });
        let mut rng = StdRng::seed_from_u64(1);
        assert!(
            purchase_merchant_slot(&mut state, &catalog.items, &catalog.equipment, 0, &mut rng)
                .is_err()
        );
        assert!(!state.merchant_lineup.as_ref().unwrap().slots[0].purchased);
    }
}
