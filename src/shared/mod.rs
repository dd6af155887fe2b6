//! Shared resources, events, definitions, and states for Mosswick.
//!
//! This is the type contract. Every domain plugin imports its types from
//! here; no domain defines a type another domain needs.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

pub mod balance;

use balance::*;

// ═══════════════════════════════════════════════════════════════════════
// APP STATE — top-level state machine
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, States, Default)]
pub enum AppState {
    #[default]
    Loading,
    MainMenu,
    Playing,
}

/// Where the in-game day currently sits. Stored inside [`GameState`] so a
/// save captures it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum GamePhase {
    /// Morning reports are showing; actions are locked.
    Morning,
    #[default]
    Action,
    /// A multi-day action (craft, expedition dispatch, study) is resolving.
    Processing,
    /// Day 365 has passed.
    Ending,
}

// ═══════════════════════════════════════════════════════════════════════
// CATALOG DEFINITIONS — immutable content, loaded once by DataPlugin
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemCategory {
    Herb,
    Ore,
    Water,
    Plant,
    Wood,
    Crystal,
    Misc,
    Product,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDef {
    pub id: String,
    pub name: String,
    pub category: ItemCategory,
    pub base_price: u32,
    pub description: String,
}

/// One slot of a recipe. Matches either an exact item or any item of a
/// category; exactly one of the two is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ingredient {
    pub item_id: Option<String>,
    pub category: Option<ItemCategory>,
    pub quantity: u32,
}

impl Ingredient {
    pub fn item(id: &str, quantity: u32) -> Self {
        Self {
            item_id: Some(id.to_string()),
            category: None,
            quantity,
        }
    }

    pub fn of_category(category: ItemCategory, quantity: u32) -> Self {
        Self {
            item_id: None,
            category: Some(category),
            quantity,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeDef {
    pub id: String,
    pub name: String,
    pub result_item_id: String,
    pub ingredients: Vec<Ingredient>,
    pub required_level: u32,
    pub days_required: u32,
    /// 1-10. Drives both the success penalty and the stamina cost.
    pub difficulty: u32,
    pub exp_reward: u32,
    pub required_facilities: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DropEntry {
    pub item_id: String,
    pub weight: u32,
    pub quality_min: u32,
    pub quality_max: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaDef {
    pub id: String,
    pub name: String,
    pub description: String,
    pub cost_per_day: u32,
    pub required_level: u32,
    pub drops: Vec<DropEntry>,
    pub rare_drops: Vec<DropEntry>,
    pub rare_chance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestKind {
    /// Deliver N of an item, any quality.
    Deliver,
    /// Deliver items at or above a quality bar.
    Quality,
    /// Deliver a large count.
    Bulk,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestDef {
    pub id: String,
    pub title: String,
    pub description: String,
    pub kind: QuestKind,
    pub required_item_id: String,
    pub required_quantity: u32,
    pub required_quality: Option<u32>,
    pub reward_money: u32,
    pub reward_reputation: u32,
    pub deadline_days: u32,
    pub min_level: u32,
    pub min_reputation: u32,
    /// Overrides the computed village-development gain when set.
    pub development_override: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipmentCategory {
    Cauldron,
    Time,
    Material,
    Economy,
    Special,
}

/// A single passive granted by a piece of equipment. Composition rules per
/// variant live in the `effects` module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EquipmentEffect {
    AllProbabilityBonus { value: f64 },
    CraftSuccessBonus { value: f64 },
    CraftFailAccumulate { rate: f64 },
    CraftQualityBonus { value: f64 },
    CraftQualityCap { cap: u32, fail_below_quality: Option<u32> },
    CraftQualityVarianceMult { value: f64 },
    CraftCombo { bonus_per_combo: f64, max_combo: Option<u32> },
    MaterialQualityFloor { value: u32 },
    MaterialQualityBonus { value: u32 },
    CraftStaminaMult { value: f64 },
    CraftDaysHalve,
    CraftDaysReduce { value: u32, min_original_days: Option<u32> },
    CraftDuplicate { chance: f64, quality_variance: u32 },
    CraftFailSave { chance: f64 },
    CraftFailRecover { count: u32 },
    MaterialCountReduce { value: u32, min_original_count: Option<u32> },
    StudyInstant { max_level: Option<u32> },
    StudyDaysReduce { value: u32 },
    ExpeditionDropsMult { value: f64, material_category: Option<ItemCategory> },
    ExpeditionRareBonus { value: f64 },
    SellPriceMult { value: f64, min_quality: Option<u32>, item_category: Option<ItemCategory> },
    SellSameDayBonus { min_count: u32, value: f64 },
    BuyPriceMult { value: f64 },
    QuestMoneyMult { value: f64 },
    QuestReputationBonus { value: u32 },
    QuestQualityBonus { quality_threshold: u32, money_bonus: u32, reputation_bonus: u32 },
    InventoryExpand { value: u32 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquipmentDef {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: EquipmentCategory,
    pub price: u32,
    pub effects: Vec<EquipmentEffect>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FacilityKind {
    /// Unlocked once, active forever.
    Permanent,
    /// Active only while an item of the bound id sits in the inventory at
    /// sufficient quality.
    Inventory { item_id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FacilityEffectKind {
    SuccessRate,
    Quality,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FacilityScope {
    All,
    Category(ItemCategory),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacilityEffect {
    pub kind: FacilityEffectKind,
    pub value: f64,
    pub scope: FacilityScope,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacilityDef {
    pub id: String,
    pub name: String,
    pub description: String,
    pub kind: FacilityKind,
    pub effects: Vec<FacilityEffect>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeBookDef {
    pub id: String,
    pub name: String,
    pub recipe_ids: Vec<String>,
    pub base_price: u32,
    pub study_days: u32,
}

// ═══════════════════════════════════════════════════════════════════════
// REGISTRIES — populated once by DataPlugin, read-only afterwards
// ═══════════════════════════════════════════════════════════════════════

#[derive(Resource, Debug, Default)]
pub struct ItemRegistry {
    pub items: HashMap<String, ItemDef>,
}

impl ItemRegistry {
    pub fn get(&self, id: &str) -> Option<&ItemDef> {
        self.items.get(id)
    }

    /// Display name, degrading to the raw id for unknown items.
    pub fn name_of(&self, id: &str) -> String {
        self.items
            .get(id)
            .map(|def| def.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    pub fn category_of(&self, id: &str) -> Option<ItemCategory> {
        self.items.get(id).map(|def| def.category)
    }
}

#[derive(Resource, Debug, Default)]
pub struct RecipeRegistry {
    pub recipes: HashMap<String, RecipeDef>,
}

impl RecipeRegistry {
    pub fn get(&self, id: &str) -> Option<&RecipeDef> {
        self.recipes.get(id)
    }
}

#[derive(Resource, Debug, Default)]
pub struct AreaRegistry {
    pub areas: HashMap<String, AreaDef>,
}

impl AreaRegistry {
    pub fn get(&self, id: &str) -> Option<&AreaDef> {
        self.areas.get(id)
    }
}

#[derive(Resource, Debug, Default)]
pub struct QuestRegistry {
    pub quests: HashMap<String, QuestDef>,
}

impl QuestRegistry {
    pub fn get(&self, id: &str) -> Option<&QuestDef> {
        self.quests.get(id)
    }
}

#[derive(Resource, Debug, Default)]
pub struct EquipmentRegistry {
    pub equipment: HashMap<String, EquipmentDef>,
}

impl EquipmentRegistry {
    pub fn get(&self, id: &str) -> Option<&EquipmentDef> {
        self.equipment.get(id)
    }
}

#[derive(Resource, Debug, Default)]
pub struct FacilityRegistry {
    pub facilities: HashMap<String, FacilityDef>,
}

impl FacilityRegistry {
    pub fn get(&self, id: &str) -> Option<&FacilityDef> {
        self.facilities.get(id)
    }
}

#[derive(Resource, Debug, Default)]
pub struct BookRegistry {
    pub books: HashMap<String, RecipeBookDef>,
}

impl BookRegistry {
    pub fn get(&self, id: &str) -> Option<&RecipeBookDef> {
        self.books.get(id)
    }
}

/// Kept as a vec sorted by ascending priority; the check scan depends on
/// that order.
#[derive(Resource, Debug, Default)]
pub struct AchievementRegistry {
    pub achievements: Vec<AchievementDef>,
}

impl AchievementRegistry {
    pub fn get(&self, id: &str) -> Option<&AchievementDef> {
        self.achievements.iter().find(|a| a.id == id)
    }

    pub fn all_sorted(&self) -> &[AchievementDef] {
        &self.achievements
    }
}

// ═══════════════════════════════════════════════════════════════════════
// ACHIEVEMENTS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AchievementCategory {
    Tutorial,
    Milestone,
    Story,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConditionKind {
    Level,
    Reputation,
    Money,
    QuestCount,
    ActiveQuestCount,
    CraftCount,
    /// Has a specific item ever been crafted (`target_item`).
    CraftItem,
    /// Highest quality crafted so far.
    CraftQuality,
    ExpeditionCount,
    RecipeCount,
    ConsecutiveQuests,
    TotalSales,
    Day,
    VillageDevelopment,
    InventoryOpened,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Comparison {
    #[default]
    Ge,
    Le,
    Eq,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AchievementCondition {
    pub kind: ConditionKind,
    pub target_value: u32,
    /// Only read for `CraftItem`.
    pub target_item: Option<String>,
    pub comparison: Comparison,
}

impl AchievementCondition {
    pub fn at_least(kind: ConditionKind, target_value: u32) -> Self {
        Self {
            kind,
            target_value,
            target_item: None,
            comparison: Comparison::Ge,
        }
    }

    pub fn crafted(item_id: &str) -> Self {
        Self {
            kind: ConditionKind::CraftItem,
            target_value: 1,
            target_item: Some(item_id.to_string()),
            comparison: Comparison::Ge,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardItem {
    pub item_id: String,
    pub quality: u32,
    pub quantity: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AchievementReward {
    pub money: u32,
    pub exp: u32,
    pub reputation: u32,
    pub village_development: u32,
    pub items: Vec<RewardItem>,
    pub recipes: Vec<String>,
    pub unlocks: Vec<ActionType>,
    pub facilities: Vec<String>,
}

/// Narrative payload shown when an achievement completes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDialogue {
    pub title: String,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AchievementDef {
    pub id: String,
    pub title: String,
    pub description: String,
    pub hint: Option<String>,
    pub category: AchievementCategory,
    pub conditions: Vec<AchievementCondition>,
    pub reward: AchievementReward,
    pub prerequisites: Vec<String>,
    /// Lower fires first when several are eligible in the same check.
    pub priority: u32,
    /// Completes at game start without player input (seeds the tutorial).
    pub auto_complete: bool,
    /// Shown on the HUD as the current goal while incomplete.
    pub important: bool,
    pub dialogue: Option<EventDialogue>,
}

// ═══════════════════════════════════════════════════════════════════════
// RUNTIME STATE
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OriginKind {
    Initial,
    Shop,
    Crafted,
    Expedition,
    Reward,
    Merchant,
}

/// Presentation-only provenance. Never read by game rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemOrigin {
    pub kind: OriginKind,
    pub day: u32,
    pub detail: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnedItem {
    pub item_id: String,
    pub quality: u32,
    pub origin: Option<ItemOrigin>,
}

impl OwnedItem {
    pub fn new(item_id: &str, quality: u32) -> Self {
        Self {
            item_id: item_id.to_string(),
            quality,
            origin: None,
        }
    }

    pub fn with_origin(item_id: &str, quality: u32, origin: ItemOrigin) -> Self {
        Self {
            item_id: item_id.to_string(),
            quality,
            origin: Some(origin),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveQuest {
    pub quest_id: String,
    pub accepted_day: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expedition {
    pub area_id: String,
    pub start_day: u32,
    pub duration_days: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MerchantStock {
    Equipment { equipment_id: String },
    RecipeBook { book_id: String },
    RareMaterial { item_id: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MerchantSlot {
    pub stock: MerchantStock,
    pub price: u32,
    pub purchased: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MerchantLineup {
    pub month: u32,
    pub slots: Vec<MerchantSlot>,
}

/// Pending cross-day animation handle; presentation clears it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayTransition {
    pub to_day: u32,
    pub days_advanced: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionType {
    Alchemy,
    Quest,
    Expedition,
    Shop,
    Rest,
    Study,
    Inventory,
    Album,
    TravelingMerchant,
}

/// One entry of the morning report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum MorningEvent {
    ExpeditionReturned { area_id: String, items: Vec<OwnedItem> },
    QuestExpired { quest_id: String, title: String },
    NewQuestsPosted { quest_ids: Vec<String> },
    MerchantArrived,
    MerchantDeparted,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStats {
    pub total_craft_count: u32,
    pub total_expedition_count: u32,
    pub consecutive_quest_success: u32,
    pub highest_quality_crafted: u32,
    pub total_sales_amount: u32,
    pub inventory_opened: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AchievementProgress {
    pub completed: HashSet<String>,
    /// At most one achievement sits here awaiting its reward claim.
    pub pending_reward: Option<String>,
}

// ═══════════════════════════════════════════════════════════════════════
// GAME STATE — the single mutable aggregate
// ═══════════════════════════════════════════════════════════════════════

#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub player_name: String,
    pub day: u32,
    pub money: u32,
    pub reputation: u32,
    pub village_development: u32,
    pub alchemy_level: u32,
    pub alchemy_exp: u32,
    pub stamina: u32,
    pub max_stamina: u32,
    pub inventory: Vec<OwnedItem>,
    pub known_recipes: HashSet<String>,
    pub owned_books: HashSet<String>,
    pub active_quests: Vec<ActiveQuest>,
    pub available_quests: Vec<String>,
    pub completed_quest_count: u32,
    pub failed_quest_count: u32,
    pub expedition: Option<Expedition>,
    pub crafted_items: HashSet<String>,
    pub discovered_items: HashSet<String>,
    /// Unlocked permanent facilities.
    pub facilities: HashSet<String>,
    pub owned_equipment: HashSet<String>,
    /// The one exclusive equipment slot.
    pub active_cauldron: Option<String>,
    pub merchant_lineup: Option<MerchantLineup>,
    pub merchant_visited_months: HashSet<u32>,
    pub phase: GamePhase,
    pub morning_events: Vec<MorningEvent>,
    pub message_log: Vec<String>,
    pub pending_day_transition: Option<DayTransition>,
    pub pending_dialogue: Option<EventDialogue>,
    pub unlocked_actions: HashSet<ActionType>,
    pub achievements: AchievementProgress,
    pub stats: GameStats,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new_game("Mel")
    }
}

impl GameState {
    pub fn new_game(player_name: &str) -> Self {
        let mut inventory = Vec::new();
        for quality in [45, 52, 38, 61, 44] {
            inventory.push(OwnedItem::with_origin(
                "herb_01",
                quality,
                ItemOrigin { kind: OriginKind::Initial, day: 1, detail: None },
            ));
        }
        for quality in [30, 55, 42] {
            inventory.push(OwnedItem::with_origin(
                "water_01",
                quality,
                ItemOrigin { kind: OriginKind::Initial, day: 1, detail: None },
            ));
        }
        Self {
            player_name: player_name.to_string(),
            day: 1,
            money: INITIAL_MONEY,
            reputation: 0,
            village_development: 0,
            alchemy_level: 1,
            alchemy_exp: 0,
            stamina: INITIAL_MAX_STAMINA,
            max_stamina: INITIAL_MAX_STAMINA,
            inventory,
            known_recipes: HashSet::new(),
            owned_books: HashSet::new(),
            active_quests: Vec::new(),
            available_quests: Vec::new(),
            completed_quest_count: 0,
            failed_quest_count: 0,
            expedition: None,
            crafted_items: HashSet::new(),
            discovered_items: HashSet::new(),
            facilities: HashSet::new(),
            owned_equipment: HashSet::new(),
            active_cauldron: None,
            merchant_lineup: None,
            merchant_visited_months: HashSet::new(),
            phase: GamePhase::Action,
            morning_events: Vec::new(),
            message_log: Vec::new(),
            pending_day_transition: None,
            pending_dialogue: None,
            unlocked_actions: [ActionType::Rest, ActionType::Study].into_iter().collect(),
            achievements: AchievementProgress::default(),
            stats: GameStats::default(),
        }
    }

    // ─── Messages ──────────────────────────────────────────────────────

    pub fn add_message(&mut self, message: impl Into<String>) {
        self.message_log.push(message.into());
        if self.message_log.len() > MESSAGE_LOG_CAP {
            let overflow = self.message_log.len() - MESSAGE_LOG_CAP;
            self.message_log.drain(..overflow);
        }
    }

    // ─── Inventory ─────────────────────────────────────────────────────

    pub fn add_item(&mut self, item: OwnedItem) {
        self.discovered_items.insert(item.item_id.clone());
        self.inventory.push(item);
    }

    /// Removes one entry matching both id and quality. Returns false when
    /// no such entry exists; never removes a near match.
    pub fn remove_item(&mut self, item_id: &str, quality: u32) -> bool {
        match self
            .inventory
            .iter()
            .position(|i| i.item_id == item_id && i.quality == quality)
        {
            Some(index) => {
                self.inventory.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn has_item(&self, item_id: &str) -> bool {
        self.inventory.iter().any(|i| i.item_id == item_id)
    }

    pub fn count_item(&self, item_id: &str) -> usize {
        self.inventory.iter().filter(|i| i.item_id == item_id).count()
    }

    // ─── Money & progress scalars ──────────────────────────────────────

    pub fn add_money(&mut self, amount: u32) {
        self.money = self.money.saturating_add(amount);
    }

    pub fn spend_money(&mut self, amount: u32) -> bool {
        if self.money < amount {
            return false;
        }
        self.money -= amount;
        true
    }

    pub fn add_reputation(&mut self, amount: u32) {
        self.reputation = (self.reputation + amount).min(100);
    }

    pub fn lose_reputation(&mut self, amount: u32) {
        self.reputation = self.reputation.saturating_sub(amount);
    }

    pub fn add_village_development(&mut self, amount: u32) {
        self.village_development = (self.village_development + amount).min(100);
    }

    // ─── Level & exp ───────────────────────────────────────────────────

    /// Exp needed to go from `level` to `level + 1`.
    pub fn exp_for_level(level: u32) -> u32 {
        (EXP_BASE as f64 * EXP_GROWTH.powi(level as i32 - 1)).floor() as u32
    }

    /// Adds exp and resolves any level-ups. Returns levels gained.
    pub fn add_exp(&mut self, amount: u32) -> u32 {
        self.alchemy_exp += amount;
        let mut gained = 0;
        while self.alchemy_level < MAX_LEVEL {
            let needed = Self::exp_for_level(self.alchemy_level);
            if self.alchemy_exp < needed {
                break;
            }
            self.alchemy_exp -= needed;
            self.alchemy_level += 1;
            gained += 1;
        }
        gained
    }

    // ─── Stamina ───────────────────────────────────────────────────────

    pub fn consume_stamina(&mut self, amount: u32) {
        self.stamina = self.stamina.saturating_sub(amount);
    }

    pub fn restore_stamina(&mut self, amount: u32) {
        self.stamina = (self.stamina + amount).min(self.max_stamina);
    }

    /// Success-rate penalty from the current stamina band.
    pub fn fatigue_penalty(&self) -> f64 {
        if self.stamina >= FATIGUE_THRESHOLD_NONE {
            0.0
        } else if self.stamina >= FATIGUE_THRESHOLD_MILD {
            FATIGUE_PENALTY_MILD
        } else if self.stamina >= FATIGUE_THRESHOLD_MODERATE {
            FATIGUE_PENALTY_MODERATE
        } else {
            FATIGUE_PENALTY_SEVERE
        }
    }

    // ─── Recipes, discoveries, actions ─────────────────────────────────

    /// Returns true only when the recipe was newly learned.
    pub fn learn_recipe(&mut self, recipe_id: &str) -> bool {
        self.known_recipes.insert(recipe_id.to_string())
    }

    pub fn knows_recipe(&self, recipe_id: &str) -> bool {
        self.known_recipes.contains(recipe_id)
    }

    pub fn mark_item_crafted(&mut self, item_id: &str) {
        self.crafted_items.insert(item_id.to_string());
    }

    pub fn unlock_action(&mut self, action: ActionType) -> bool {
        self.unlocked_actions.insert(action)
    }

    pub fn is_action_unlocked(&self, action: ActionType) -> bool {
        self.unlocked_actions.contains(&action)
    }

    // ─── Achievements ──────────────────────────────────────────────────

    pub fn is_achievement_completed(&self, id: &str) -> bool {
        self.achievements.completed.contains(id)
    }

    /// Marks completed and parks the reward for a later claim.
    pub fn complete_achievement(&mut self, id: &str) {
        self.achievements.completed.insert(id.to_string());
        self.achievements.pending_reward = Some(id.to_string());
    }

    pub fn clear_pending_reward(&mut self) {
        self.achievements.pending_reward = None;
    }

    // ─── Stats ─────────────────────────────────────────────────────────

    pub fn record_craft(&mut self, quality: u32) {
        self.stats.total_craft_count += 1;
        if quality > self.stats.highest_quality_crafted {
            self.stats.highest_quality_crafted = quality;
        }
    }

    pub fn record_sale(&mut self, amount: u32) {
        self.stats.total_sales_amount = self.stats.total_sales_amount.saturating_add(amount);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// TRANSIENT MODIFIER STATE — never persisted
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, Default)]
pub struct DailySell {
    pub day: u32,
    pub count: u32,
}

/// Session-local counters the equipment effects read. A load starts these
/// fresh.
#[derive(Resource, Debug, Clone, Default)]
pub struct ModifierState {
    pub craft_combo: u32,
    pub fail_accumulation: HashMap<String, u32>,
    pub daily_sell: Option<DailySell>,
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Event, Debug, Clone, Copy)]
pub struct EndTurnEvent {
    pub days: u32,
}

/// Fired after any player action resolves; the presentation layer reacts
/// by checking achievements.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct ActionCompletedEvent;

/// UI acknowledgment that the day-transition animation finished.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct ResolveDayTransitionEvent;

/// UI acknowledgment that the achievement dialogue was dismissed.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct ResolveDialogueEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Unlock,
    GoalActive,
    GoalComplete,
}

#[derive(Event, Debug, Clone)]
pub struct ToastEvent {
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct UnlockAnimationEvent {
    pub action: ActionType,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct SaveRequestEvent {
    pub slot: usize,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct LoadRequestEvent {
    pub slot: usize,
}

#[derive(Event, Debug, Clone)]
pub struct SaveCompleteEvent {
    pub slot: usize,
    pub success: bool,
    pub error_message: Option<String>,
}

#[derive(Event, Debug, Clone)]
pub struct LoadCompleteEvent {
    pub slot: usize,
    pub success: bool,
    pub error_message: Option<String>,
}

// ═══════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exp_curve_matches_growth_formula() {
        assert_eq!(GameState::exp_for_level(1), 100);
        assert_eq!(GameState::exp_for_level(2), 150);
        assert_eq!(GameState::exp_for_level(3), 225);
        assert_eq!(GameState::exp_for_level(4), 337);
    }

    #[test]
    fn add_exp_resolves_multiple_level_ups() {
        let mut state = GameState::new_game("test");
        let gained = state.add_exp(260);
        assert_eq!(gained, 2);
        assert_eq!(state.alchemy_level, 3);
        assert_eq!(state.alchemy_exp, 10);
    }

    #[test]
    fn level_caps_at_twenty() {
        let mut state = GameState::new_game("test");
        state.alchemy_level = MAX_LEVEL;
        let gained = state.add_exp(1_000_000);
        assert_eq!(gained, 0);
        assert_eq!(state.alchemy_level, MAX_LEVEL);
    }

    #[test]
    fn reputation_clamps_to_band() {
        let mut state = GameState::new_game("test");
        state.add_reputation(250);
        assert_eq!(state.reputation, 100);
        state.lose_reputation(250);
        assert_eq!(state.reputation, 0);
    }

    #[test]
    fn remove_item_requires_exact_quality_match() {
        let mut state = GameState::new_game("test");
        state.inventory.clear();
        state.add_item(OwnedItem::new("herb_01", 40));
        state.add_item(OwnedItem::new("herb_01", 60));

        assert!(!state.remove_item("herb_01", 50));
        assert_eq!(state.inventory.len(), 2);

        assert!(state.remove_item("herb_01", 60));
        assert_eq!(state.inventory.len(), 1);
        assert_eq!(state.inventory[0].quality, 40);
    }

    #[test]
    fn remove_item_takes_one_of_duplicates() {
        let mut state = GameState::new_game("test");
        state.inventory.clear();
        state.add_item(OwnedItem::new("water_01", 55));
        state.add_item(OwnedItem::new("water_01", 55));

        assert!(state.remove_item("water_01", 55));
        assert_eq!(state.count_item("water_01"), 1);
    }

    #[test]
    fn fatigue_bands_step_down_with_stamina() {
        let mut state = GameState::new_game("test");
        state.stamina = 80;
        assert_eq!(state.fatigue_penalty(), 0.0);
        state.stamina = 49;
        assert_eq!(state.fatigue_penalty(), FATIGUE_PENALTY_MILD);
        state.stamina = 29;
        assert_eq!(state.fatigue_penalty(), FATIGUE_PENALTY_MODERATE);
        state.stamina = 9;
        assert_eq!(state.fatigue_penalty(), FATIGUE_PENALTY_SEVERE);
    }

    #[test]
    fn message_log_stays_capped() {
        let mut state = GameState::new_game("test");
        for i in 0..80 {
            state.add_message(format!("line {i}"));
        }
        assert_eq!(state.message_log.len(), MESSAGE_LOG_CAP);
        assert_eq!(state.message_log.last().unwrap(), "line 79");
    }

    #[test]
    fn new_game_seeds_starting_kit() {
        let state = GameState::new_game("Mel");
        assert_eq!(state.money, INITIAL_MONEY);
        assert_eq!(state.count_item("herb_01"), 5);
        assert_eq!(state.count_item("water_01"), 3);
        assert!(state.is_action_unlocked(ActionType::Rest));
        assert!(state.is_action_unlocked(ActionType::Study));
        assert!(!state.is_action_unlocked(ActionType::Alchemy));
    }
}
