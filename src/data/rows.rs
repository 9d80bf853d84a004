//! Raw Static Table Rows
//!
//! These structures are deserialized from the TOML game-design tables.
//! A quest id of `0` in any of them marks an empty slot.

use serde::Deserialize;

/// Quest definition file (`[[quests]]` array)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawQuestFile {
    #[serde(default)]
    pub quests: Vec<RawQuestRow>,
}

/// One quest definition row
#[derive(Debug, Clone, Deserialize)]
pub struct RawQuestRow {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub quest_type: String,
    #[serde(default)]
    pub level: u32,
    /// `none`, `daily` or `weekly`
    #[serde(default = "default_repeat")]
    pub repeat: String,
}

fn default_repeat() -> String {
    "none".to_string()
}

/// Creature definition file (`[[creatures]]` array)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCreatureFile {
    #[serde(default)]
    pub creatures: Vec<RawCreatureRow>,
}

/// One creature definition row
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCreatureRow {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    /// Quests this creature hands out
    #[serde(default)]
    pub quest_ids_given: Vec<u32>,
    /// Quests this creature accepts for turn-in
    #[serde(default)]
    pub quest_ids_received: Vec<u32>,
}

/// Communicator trigger file (`[[messages]]` array)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCommunicatorFile {
    #[serde(default)]
    pub messages: Vec<RawCommunicatorRow>,
}

/// One communicator message trigger row
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCommunicatorRow {
    pub id: u32,
    /// Creature shown as the sender
    #[serde(default)]
    pub creature_id: u32,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub quest_id_delivered: u32,
    #[serde(default)]
    pub delay_ms: u32,
}

impl RawQuestRow {
    pub fn new(id: u32, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            quest_type: String::new(),
            level: 0,
            repeat: default_repeat(),
        }
    }
}

impl RawCreatureRow {
    pub fn new(id: u32, quest_ids_given: &[u32], quest_ids_received: &[u32]) -> Self {
        Self {
            id,
            name: String::new(),
            quest_ids_given: quest_ids_given.to_vec(),
            quest_ids_received: quest_ids_received.to_vec(),
        }
    }
}

impl RawCommunicatorRow {
    pub fn new(id: u32, quest_id_delivered: u32) -> Self {
        Self {
            id,
            quest_id_delivered,
            ..Default::default()
        }
    }
}
