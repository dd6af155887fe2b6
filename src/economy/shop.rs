//! The village shop: a material assortment that widens as the village
//! develops, plus a buy-anything counter for selling.

use crate::effects;
use crate::shared::balance::*;
use crate::shared::*;
use bevy::prelude::*;
use rand::Rng;

// Each tier unlocks at the matching SHOP_TIER_THRESHOLDS entry; tier 0 is
// always stocked.
const TIER_0: &[&str] = &["herb_01", "water_01", "ore_01", "misc_01"];
const TIER_1: &[&str] = &["herb_02", "plant_01"];
const TIER_2: &[&str] = &["ore_02", "water_02", "wood_01"];
const TIER_3: &[&str] = &["crystal_01", "misc_02"];

/// Item ids currently on the shop shelves, ordered cheapest tier first.
pub fn shop_assortment(state: &GameState) -> Vec<&'static str> {
    let mut assortment: Vec<&'static str> = TIER_0.to_vec();
    let tiers = [TIER_1, TIER_2, TIER_3];
    for (threshold, tier) in SHOP_TIER_THRESHOLDS.iter().zip(tiers) {
        if state.village_development >= *threshold {
            assortment.extend_from_slice(tier);
        }
    }
    assortment
}

pub fn buy_price(state: &GameState, equipment: &EquipmentRegistry, item: &ItemDef) -> u32 {
    (item.base_price as f64 * effects::buy_price_mult(state, equipment)).floor() as u32
}

pub fn sell_price(
    state: &GameState,
    equipment: &EquipmentRegistry,
    mods: &ModifierState,
    item: &ItemDef,
    quality: u32,
) -> u32 {
    let base = item.base_price as f64 * SELL_PRICE_RATE;
    (base * effects::sell_price_mult(state, equipment, mods, item, quality, state.day)).floor()
        as u32
}

/// Buys one unit off the shelf. Shop stock is workmanlike: quality rolls
/// in a fixed mid-band.
pub fn buy_item(
    state: &mut GameState,
    items: &ItemRegistry,
    equipment: &EquipmentRegistry,
    item_id: &str,
    rng: &mut impl Rng,
) -> Result<OwnedItem, String> {
    if !shop_assortment(state).contains(&item_id) {
        return Err(format!("The shop does not stock {}.", items.name_of(item_id)));
    }
    let Some(item) = items.get(item_id) else {
        return Err(format!("Unknown item: {item_id}."));
    };
    let price = buy_price(state, equipment, item);
    if !state.spend_money(price) {
        return Err(format!("{} costs {} coins.", item.name, price));
    }

    let quality = BUY_QUALITY_MIN + rng.gen_range(0..=BUY_QUALITY_RANGE);
    let owned = OwnedItem::with_origin(
        item_id,
        quality,
        ItemOrigin {
            kind: OriginKind::Shop,
            day: state.day,
            detail: None,
        },
    );
    state.add_item(owned.clone());
    state.add_message(format!("Bought {} for {} coins.", item.name, price));
    Ok(owned)
}

/// Sells one owned item at the shop's cut of its base price. Records the
/// sale for stats and same-day sell streak bonuses.
pub fn sell_item(
    state: &mut GameState,
    items: &ItemRegistry,
    equipment: &EquipmentRegistry,
    mods: &mut ModifierState,
    item_id: &str,
    quality: u32,
) -> Result<u32, String> {
    let Some(item) = items.get(item_id) else {
        return Err(format!("Unknown item: {item_id}."));
    };
    let price = sell_price(state, equipment, mods, item, quality);
    if !state.remove_item(item_id, quality) {
        return Err(format!("No {} (quality {}) to sell.", item.name, quality));
    }

    state.add_money(price);
    state.record_sale(price);
    effects::record_sell(mods, state.day);
    state.add_message(format!("Sold {} for {} coins.", item.name, price));
    info!("[Economy] sold {item_id} q{quality} for {price}");
    Ok(price)
}
