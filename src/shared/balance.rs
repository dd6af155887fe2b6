//! Balance constants for Mosswick.
//!
//! Every tunable number lives here. Domain code never hard-codes a rate or
//! threshold; if a value needs adjusting, this is the only file to touch.

// ═══════════════════════════════════════════════════════════════════════
// ALCHEMY — level curve and exp rewards
// ═══════════════════════════════════════════════════════════════════════

/// Exp needed for level 2 (the curve base).
pub const EXP_BASE: u32 = 100;
/// Per-level growth factor: exp for level N is EXP_BASE * EXP_GROWTH^(N-1).
pub const EXP_GROWTH: f64 = 1.5;
pub const MAX_LEVEL: u32 = 20;
/// Fraction of a recipe's exp reward granted on a failed craft.
pub const FAIL_EXP_RATE: f64 = 0.3;
/// Crafting at or above this quality grants bonus exp.
pub const HIGH_QUALITY_THRESHOLD: u32 = 70;
pub const HIGH_QUALITY_EXP_BONUS: f64 = 1.2;

// ═══════════════════════════════════════════════════════════════════════
// CRAFT SUCCESS RATE
// ═══════════════════════════════════════════════════════════════════════

pub const CRAFT_BASE_RATE: f64 = 1.0;
/// Rate lost per point of recipe difficulty above 1.
pub const CRAFT_DIFFICULTY_PENALTY: f64 = 0.05;
/// Rate gained per level above the recipe's required level.
pub const CRAFT_LEVEL_BONUS: f64 = 0.05;
pub const CRAFT_MAX_RATE: f64 = 0.99;
pub const CRAFT_MIN_RATE: f64 = 0.01;

// ═══════════════════════════════════════════════════════════════════════
// CRAFT QUALITY
// ═══════════════════════════════════════════════════════════════════════

/// Quality gained per level above the recipe's required level.
pub const QUALITY_LEVEL_BONUS: u32 = 2;
pub const QUALITY_RANDOM_MIN: i32 = -10;
pub const QUALITY_RANDOM_MAX: i32 = 10;
pub const QUALITY_MIN: u32 = 1;
/// Default quality cap; equipment may raise it, never lower it.
pub const QUALITY_MAX: u32 = 100;

// ═══════════════════════════════════════════════════════════════════════
// STAMINA & FATIGUE
// ═══════════════════════════════════════════════════════════════════════

pub const INITIAL_MAX_STAMINA: u32 = 100;
pub const REST_RECOVERY: u32 = 50;
pub const CRAFT_BASE_COST: u32 = 5;
/// Additional stamina per point of recipe difficulty.
pub const CRAFT_DIFFICULTY_COST: u32 = 3;
pub const STUDY_COST: u32 = 20;

/// No fatigue penalty at or above this stamina.
pub const FATIGUE_THRESHOLD_NONE: u32 = 50;
pub const FATIGUE_THRESHOLD_MILD: u32 = 30;
pub const FATIGUE_THRESHOLD_MODERATE: u32 = 10;
pub const FATIGUE_PENALTY_MILD: f64 = 0.10;
pub const FATIGUE_PENALTY_MODERATE: f64 = 0.20;
pub const FATIGUE_PENALTY_SEVERE: f64 = 0.35;

// ═══════════════════════════════════════════════════════════════════════
// CALENDAR & RUN LENGTH
// ═══════════════════════════════════════════════════════════════════════

pub const DAYS_PER_MONTH: u32 = 28;
/// The run ends after this day; day FINAL_DAY itself is playable.
pub const FINAL_DAY: u32 = 365;

// ═══════════════════════════════════════════════════════════════════════
// QUESTS
// ═══════════════════════════════════════════════════════════════════════

/// Chance each morning that new quests are posted (always posted when the
/// board is empty).
pub const NEW_QUEST_CHANCE: f64 = 0.3;
pub const EXPIRED_REPUTATION_PENALTY: u32 = 5;
pub const MAX_QUESTS_PER_MORNING: usize = 2;

// ═══════════════════════════════════════════════════════════════════════
// EXPEDITIONS
// ═══════════════════════════════════════════════════════════════════════

/// Base material drops per day spent in the field.
pub const EXPEDITION_DROPS_PER_DAY: u32 = 2;

// ═══════════════════════════════════════════════════════════════════════
// SHOP
// ═══════════════════════════════════════════════════════════════════════

/// Items sell for this fraction of base price before modifiers.
pub const SELL_PRICE_RATE: f64 = 0.7;
pub const BUY_QUALITY_MIN: u32 = 40;
pub const BUY_QUALITY_RANGE: u32 = 30;

// ═══════════════════════════════════════════════════════════════════════
// FACILITIES
// ═══════════════════════════════════════════════════════════════════════

/// An inventory-bound facility only counts while an item of at least this
/// quality is held.
pub const FACILITY_INVENTORY_QUALITY_MIN: u32 = 50;

// ═══════════════════════════════════════════════════════════════════════
// TRAVELING MERCHANT
// ═══════════════════════════════════════════════════════════════════════

/// Day-of-month window during which the merchant is in town.
pub const MERCHANT_VISIT_START_DAY: u32 = 8;
pub const MERCHANT_VISIT_END_DAY: u32 = 14;
pub const MERCHANT_RARE_QUALITY_MIN: u32 = 60;
pub const MERCHANT_RARE_QUALITY_MAX: u32 = 90;
pub const MERCHANT_RARE_PRICE_RATE: f64 = 2.5;
pub const MERCHANT_BOOK_PRICE_RATE: f64 = 1.2;
pub const MERCHANT_EXTRA_SLOT_CHANCE: f64 = 0.5;
/// Rare stock gating: materials this expensive need the matching level.
pub const MERCHANT_RARE_PRICE_TIER_HIGH: u32 = 500;
pub const MERCHANT_RARE_LEVEL_TIER_HIGH: u32 = 10;
pub const MERCHANT_RARE_PRICE_TIER_MID: u32 = 150;
pub const MERCHANT_RARE_LEVEL_TIER_MID: u32 = 5;

// ═══════════════════════════════════════════════════════════════════════
// MISC
// ═══════════════════════════════════════════════════════════════════════

pub const INITIAL_MONEY: u32 = 500;
pub const MESSAGE_LOG_CAP: usize = 50;
pub const NUM_SAVE_SLOTS: usize = 10;
/// Village development tiers that expand the general store's assortment.
pub const SHOP_TIER_THRESHOLDS: [u32; 3] = [10, 20, 50];
