//! Achievement catalog: the tutorial chain, milestones, and story beats.
//!
//! The registry keeps these sorted by ascending priority; the check scan in
//! the achievements module relies on that order as its sole tie-break.

use crate::shared::*;

fn def(
    id: &str,
    title: &str,
    description: &str,
    category: AchievementCategory,
    priority: u32,
) -> AchievementDef {
    AchievementDef {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        hint: None,
        category,
        conditions: Vec::new(),
        reward: AchievementReward::default(),
        prerequisites: Vec::new(),
        priority,
        auto_complete: false,
        important: false,
        dialogue: None,
    }
}

fn dialogue(title: &str, lines: &[&str]) -> EventDialogue {
    EventDialogue {
        title: title.to_string(),
        lines: lines.iter().map(|s| s.to_string()).collect(),
    }
}

fn reward_item(item_id: &str, quality: u32, quantity: u32) -> RewardItem {
    RewardItem {
        item_id: item_id.to_string(),
        quality,
        quantity,
    }
}

pub fn populate_achievements(registry: &mut AchievementRegistry) {
    use AchievementCategory::*;
    use ConditionKind::*;

    let mut all = vec![
        // ─── Tutorial chain ────────────────────────────────────────────
        {
            let mut a = def(
                "ach_awakening",
                "A New Workshop",
                "Take over the old workshop on the edge of Mosswick.",
                Tutorial,
                1,
            );
            a.auto_complete = true;
            a.conditions = vec![AchievementCondition::at_least(Day, 1)];
            a.reward.unlocks = vec![ActionType::Inventory];
            a.dialogue = Some(dialogue(
                "A New Workshop",
                &[
                    "The key turns with a reluctant click. Dust, cobwebs, and a cold cauldron.",
                    "It isn't much. But it's yours now.",
                ],
            ));
            a
        },
        {
            let mut a = def(
                "ach_first_look",
                "Taking Stock",
                "Look through what the workshop's old owner left behind.",
                Tutorial,
                2,
            );
            a.prerequisites = vec!["ach_awakening".to_string()];
            a.conditions = vec![AchievementCondition::at_least(InventoryOpened, 1)];
            a.reward.unlocks = vec![ActionType::Alchemy];
            a.reward.recipes = vec!["potion_01".to_string()];
            a.important = true;
            a.hint = Some("Open your inventory.".to_string());
            a.dialogue = Some(dialogue(
                "Taking Stock",
                &["Dried herbs, a jug of spring water, and a draught recipe pinned to the shelf."],
            ));
            a
        },
        {
            let mut a = def(
                "ach_first_brew",
                "First Brew",
                "Complete your first craft.",
                Tutorial,
                3,
            );
            a.prerequisites = vec!["ach_first_look".to_string()];
            a.conditions = vec![AchievementCondition::at_least(CraftCount, 1)];
            a.reward.money = 100;
            a.reward.unlocks = vec![ActionType::Quest];
            a.important = true;
            a.hint = Some("Brew a healing draught.".to_string());
            a.dialogue = Some(dialogue(
                "First Brew",
                &[
                    "The cauldron hums back to life. The smell alone brings a neighbor to the door.",
                    "Word travels fast in a small village. The request board has work for you.",
                ],
            ));
            a
        },
        {
            let mut a = def(
                "ach_first_delivery",
                "First Delivery",
                "Fulfill a request from the village board.",
                Tutorial,
                4,
            );
            a.prerequisites = vec!["ach_first_brew".to_string()];
            a.conditions = vec![AchievementCondition::at_least(QuestCount, 1)];
            a.reward.money = 150;
            a.reward.unlocks = vec![ActionType::Shop];
            a.important = true;
            a.hint = Some("Deliver a completed request.".to_string());
            a
        },
        {
            let mut a = def(
                "ach_stocking_up",
                "Stocking Up",
                "Put some coin aside for supplies.",
                Tutorial,
                5,
            );
            a.prerequisites = vec!["ach_first_delivery".to_string()];
            a.conditions = vec![AchievementCondition::at_least(Money, 600)];
            a.reward.unlocks = vec![ActionType::Expedition];
            a.important = true;
            a.hint = Some("Hold 600 coins.".to_string());
            a
        },
        {
            let mut a = def(
                "ach_first_expedition",
                "Into the Field",
                "Send for materials from beyond the village.",
                Tutorial,
                6,
            );
            a.prerequisites = vec!["ach_stocking_up".to_string()];
            a.conditions = vec![AchievementCondition::at_least(ExpeditionCount, 1)];
            a.reward.items = vec![reward_item("herb_02", 50, 2)];
            a.reward.unlocks = vec![ActionType::Album];
            a.important = true;
            a.hint = Some("Dispatch an expedition.".to_string());
            a
        },
        {
            let mut a = def(
                "ach_known_name",
                "A Known Name",
                "Become someone the village speaks well of.",
                Tutorial,
                10,
            );
            a.prerequisites = vec!["ach_first_delivery".to_string()];
            a.conditions = vec![AchievementCondition::at_least(Reputation, 10)];
            a.reward.unlocks = vec![ActionType::TravelingMerchant];
            a.important = true;
            a.hint = Some("Reach 10 reputation.".to_string());
            a.dialogue = Some(dialogue(
                "A Known Name",
                &[
                    "\"The alchemist by the mill,\" they say now, instead of \"the stranger.\"",
                    "A traveling merchant has started calling at Mosswick mid-month. Worth a look.",
                ],
            ));
            a
        },
        // ─── Milestones ────────────────────────────────────────────────
        {
            let mut a = def(
                "ach_apprentice_rank",
                "Apprentice No Longer",
                "Reach alchemy level 4.",
                Milestone,
                110,
            );
            a.conditions = vec![AchievementCondition::at_least(Level, 4)];
            a.reward.facilities = vec!["furnace".to_string()];
            a.important = true;
            a.dialogue = Some(dialogue(
                "Apprentice No Longer",
                &["The blacksmith helps you raise a proper smelting furnace behind the workshop."],
            ));
            a
        },
        {
            let mut a = def(
                "ach_journeyman_rank",
                "Journeyman",
                "Reach alchemy level 6.",
                Milestone,
                120,
            );
            a.prerequisites = vec!["ach_apprentice_rank".to_string()];
            a.conditions = vec![AchievementCondition::at_least(Level, 6)];
            a.reward.facilities = vec!["distiller".to_string()];
            a.important = true;
            a
        },
        {
            let mut a = def(
                "ach_adept_rank",
                "Adept",
                "Reach alchemy level 10.",
                Milestone,
                130,
            );
            a.prerequisites = vec!["ach_journeyman_rank".to_string()];
            a.conditions = vec![AchievementCondition::at_least(Level, 10)];
            a.reward.facilities = vec!["advanced_workbench".to_string()];
            a.important = true;
            a
        },
        {
            let mut a = def(
                "ach_master_rank",
                "Master of the Craft",
                "Reach alchemy level 15.",
                Milestone,
                140,
            );
            a.prerequisites = vec!["ach_adept_rank".to_string()];
            a.conditions = vec![AchievementCondition::at_least(Level, 15)];
            a.reward.facilities = vec!["magic_circle".to_string()];
            a.important = true;
            a.dialogue = Some(dialogue(
                "Master of the Craft",
                &[
                    "You chalk the ritual array exactly as the old manuals describe.",
                    "There is one recipe left that frightens you. Good.",
                ],
            ));
            a
        },
        {
            let mut a = def(
                "ach_seasoned_crafter",
                "Seasoned Hands",
                "Complete 30 crafts.",
                Milestone,
                150,
            );
            a.conditions = vec![AchievementCondition::at_least(CraftCount, 30)];
            a.reward.facilities = vec!["improved_cauldron".to_string()];
            a
        },
        {
            let mut a = def(
                "ach_fine_work",
                "Fine Work",
                "Craft something of quality 80 or better.",
                Milestone,
                160,
            );
            a.conditions = vec![AchievementCondition::at_least(CraftQuality, 80)];
            a.reward.money = 300;
            a
        },
        {
            let mut a = def(
                "ach_flawless_work",
                "Flawless Work",
                "Craft something of quality 95 or better.",
                Milestone,
                165,
            );
            a.prerequisites = vec!["ach_fine_work".to_string()];
            a.conditions = vec![AchievementCondition::at_least(CraftQuality, 95)];
            a.reward.money = 800;
            a
        },
        {
            let mut a = def(
                "ach_full_purse",
                "A Full Purse",
                "Hold 2,000 coins.",
                Milestone,
                170,
            );
            a.conditions = vec![AchievementCondition::at_least(Money, 2000)];
            a.reward.reputation = 3;
            a
        },
        {
            let mut a = def(
                "ach_small_fortune",
                "A Small Fortune",
                "Hold 10,000 coins.",
                Milestone,
                175,
            );
            a.prerequisites = vec!["ach_full_purse".to_string()];
            a.conditions = vec![AchievementCondition::at_least(Money, 10_000)];
            a.reward.village_development = 5;
            a
        },
        {
            let mut a = def(
                "ach_reliable_hand",
                "A Reliable Hand",
                "Fulfill 5 requests in a row without letting one lapse.",
                Milestone,
                180,
            );
            a.conditions = vec![AchievementCondition::at_least(ConsecutiveQuests, 5)];
            a.reward.money = 300;
            a.reward.reputation = 5;
            a
        },
        {
            let mut a = def(
                "ach_busy_board",
                "Keeper of the Board",
                "Fulfill 10 requests.",
                Milestone,
                185,
            );
            a.conditions = vec![AchievementCondition::at_least(QuestCount, 10)];
            a.reward.money = 500;
            a.reward.village_development = 3;
            a
        },
        {
            let mut a = def(
                "ach_juggler",
                "Juggling Promises",
                "Hold 3 accepted requests at once.",
                Milestone,
                186,
            );
            a.conditions = vec![AchievementCondition::at_least(ActiveQuestCount, 3)];
            a.reward.money = 200;
            a
        },
        {
            let mut a = def(
                "ach_shopkeeper",
                "Side Business",
                "Earn 2,000 coins in sales at the counter.",
                Milestone,
                190,
            );
            a.conditions = vec![AchievementCondition::at_least(TotalSales, 2000)];
            a.reward.money = 300;
            a
        },
        {
            let mut a = def(
                "ach_far_afield",
                "Far Afield",
                "Complete 5 expeditions.",
                Milestone,
                195,
            );
            a.conditions = vec![AchievementCondition::at_least(ExpeditionCount, 5)];
            a.reward.items = vec![reward_item("crystal_01", 70, 1)];
            a
        },
        {
            let mut a = def(
                "ach_well_read",
                "Well Read",
                "Know 4 recipes.",
                Milestone,
                196,
            );
            a.conditions = vec![AchievementCondition::at_least(RecipeCount, 4)];
            a.reward.money = 200;
            a
        },
        {
            let mut a = def(
                "ach_village_pillar",
                "Pillar of the Village",
                "Raise village development to 30.",
                Milestone,
                200,
            );
            a.conditions = vec![AchievementCondition::at_least(VillageDevelopment, 30)];
            a.reward.reputation = 10;
            a.dialogue = Some(dialogue(
                "Pillar of the Village",
                &["The new well, the mended bridge, the painted shutters. Some of that is your coin."],
            ));
            a
        },
        {
            let mut a = def(
                "ach_midsummer",
                "A Hundred Mornings",
                "See your hundredth day in Mosswick.",
                Milestone,
                210,
            );
            a.conditions = vec![AchievementCondition::at_least(Day, 100)];
            a.reward.money = 200;
            a
        },
        // ─── Story ─────────────────────────────────────────────────────
        {
            let mut a = def(
                "ach_bomb_maker",
                "Controlled Demolition",
                "Craft a blast charge.",
                Story,
                300,
            );
            a.conditions = vec![AchievementCondition::crafted("bomb_01")];
            a.reward.money = 150;
            a
        },
        {
            let mut a = def(
                "ach_greater_medicine",
                "Greater Medicine",
                "Craft a greater draught.",
                Story,
                310,
            );
            a.conditions = vec![AchievementCondition::crafted("potion_02")];
            a.reward.money = 300;
            a
        },
        {
            let mut a = def(
                "ach_silversmith",
                "Silver Standard",
                "Craft a silver ingot.",
                Story,
                320,
            );
            a.conditions = vec![AchievementCondition::crafted("ingot_02")];
            a.reward.money = 400;
            a
        },
        {
            let mut a = def(
                "ach_the_elixir",
                "The Elixir",
                "Craft the legendary cure-all.",
                Story,
                400,
            );
            a.prerequisites = vec!["ach_master_rank".to_string()];
            a.conditions = vec![AchievementCondition::crafted("elixir")];
            a.reward.money = 2000;
            a.reward.reputation = 20;
            a.important = true;
            a.dialogue = Some(dialogue(
                "The Elixir",
                &[
                    "Gold light settles in the flask and does not fade.",
                    "Whatever else happens in Mosswick, this workshop will be remembered.",
                ],
            ));
            a
        },
    ];

    all.sort_by_key(|a| a.priority);
    registry.achievements = all;
}
