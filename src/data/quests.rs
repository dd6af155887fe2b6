//! Quest templates. The morning generator instantiates these onto the
//! village board; level and reputation gates are part of the data.

use crate::shared::*;

struct QuestSpec {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    kind: QuestKind,
    item: &'static str,
    quantity: u32,
    quality: Option<u32>,
    money: u32,
    reputation: u32,
    deadline: u32,
    min_level: u32,
    min_reputation: u32,
    development_override: Option<u32>,
}

fn build(spec: QuestSpec) -> QuestDef {
    QuestDef {
        id: spec.id.to_string(),
        title: spec.title.to_string(),
        description: spec.description.to_string(),
        kind: spec.kind,
        required_item_id: spec.item.to_string(),
        required_quantity: spec.quantity,
        required_quality: spec.quality,
        reward_money: spec.money,
        reward_reputation: spec.reputation,
        deadline_days: spec.deadline,
        min_level: spec.min_level,
        min_reputation: spec.min_reputation,
        development_override: spec.development_override,
    }
}

pub fn populate_quests(registry: &mut QuestRegistry) {
    let quests = [
        QuestSpec {
            id: "quest_potion_basic",
            title: "Draughts for the Clinic",
            description: "The village clinic is running short on healing draughts.",
            kind: QuestKind::Deliver,
            item: "potion_01",
            quantity: 3,
            quality: None,
            money: 200,
            reputation: 5,
            deadline: 10,
            min_level: 1,
            min_reputation: 0,
            development_override: None,
        },
        QuestSpec {
            id: "quest_antidote_basic",
            title: "Antidotes Needed",
            description: "A forager bit into the wrong mushroom again.",
            kind: QuestKind::Deliver,
            item: "antidote",
            quantity: 2,
            quality: None,
            money: 180,
            reputation: 5,
            deadline: 8,
            min_level: 2,
            min_reputation: 0,
            development_override: None,
        },
        QuestSpec {
            id: "quest_potion_quality",
            title: "A Gift-Worthy Draught",
            description: "It's for the village head. Only your best will do.",
            kind: QuestKind::Quality,
            item: "potion_01",
            quantity: 1,
            quality: Some(50),
            money: 300,
            reputation: 8,
            deadline: 12,
            min_level: 1,
            min_reputation: 0,
            development_override: None,
        },
        QuestSpec {
            id: "quest_antidote_quality",
            title: "A Lord's Antidote",
            description: "An order from the neighboring estate. Nothing shameful, please.",
            kind: QuestKind::Quality,
            item: "antidote",
            quantity: 1,
            quality: Some(60),
            money: 500,
            reputation: 10,
            deadline: 15,
            min_level: 2,
            min_reputation: 0,
            development_override: None,
        },
        QuestSpec {
            id: "quest_potion_bulk",
            title: "Bulk Draught Order",
            description: "Joint fieldwork with the next village. Best be prepared.",
            kind: QuestKind::Bulk,
            item: "potion_01",
            quantity: 10,
            quality: None,
            money: 600,
            reputation: 12,
            deadline: 20,
            min_level: 1,
            min_reputation: 0,
            development_override: None,
        },
        QuestSpec {
            id: "quest_bomb_bulk",
            title: "Charges for the Clearing",
            description: "There are boulders in the new field that won't move themselves.",
            kind: QuestKind::Bulk,
            item: "bomb_01",
            quantity: 5,
            quality: None,
            money: 700,
            reputation: 15,
            deadline: 25,
            min_level: 3,
            min_reputation: 20,
            development_override: None,
        },
        QuestSpec {
            id: "quest_ingot_iron",
            title: "Iron for the Smithy",
            description: "Farm tools need mending before the season turns.",
            kind: QuestKind::Deliver,
            item: "ingot_01",
            quantity: 2,
            quality: None,
            money: 400,
            reputation: 10,
            deadline: 15,
            min_level: 4,
            min_reputation: 0,
            development_override: None,
        },
        QuestSpec {
            id: "quest_potion_advanced",
            title: "Provisions for a Journey",
            description: "Someone is leaving the valley. Send them off well-supplied.",
            kind: QuestKind::Deliver,
            item: "potion_02",
            quantity: 3,
            quality: None,
            money: 800,
            reputation: 15,
            deadline: 20,
            min_level: 5,
            min_reputation: 20,
            development_override: None,
        },
        QuestSpec {
            id: "quest_ingot_silver",
            title: "Silver for the Festival",
            description: "The festival ornaments deserve real silver this year.",
            kind: QuestKind::Deliver,
            item: "ingot_02",
            quantity: 1,
            quality: None,
            money: 600,
            reputation: 12,
            deadline: 18,
            min_level: 8,
            min_reputation: 0,
            development_override: None,
        },
        QuestSpec {
            id: "quest_elixir",
            title: "The Legendary Elixir",
            description: "The village elder has taken gravely ill. Please.",
            kind: QuestKind::Quality,
            item: "elixir",
            quantity: 1,
            quality: Some(70),
            money: 3000,
            reputation: 30,
            deadline: 30,
            min_level: 15,
            min_reputation: 50,
            development_override: Some(3),
        },
    ];
    for spec in quests {
        let quest = build(spec);
        registry.quests.insert(quest.id.clone(), quest);
    }
}
