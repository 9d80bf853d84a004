//! Quest Record Structures
//!
//! Immutable records derived from the raw static tables.

use serde::Serialize;
use std::time::Duration;

use crate::data::{RawCommunicatorRow, RawQuestRow};
use crate::error::{narrow_quest_id, CacheError};

/// Quest identifier as used by every quest index
pub type QuestId = u16;

/// Creature identifier
pub type CreatureId = u32;

/// How often a quest can be repeated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum QuestRepeat {
    #[default]
    None,
    /// Resets at the daily boundary
    Daily,
    /// Resets at the weekly boundary
    Weekly,
}

impl QuestRepeat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "" | "none" => Some(QuestRepeat::None),
            "daily" => Some(QuestRepeat::Daily),
            "weekly" => Some(QuestRepeat::Weekly),
            _ => None,
        }
    }
}

/// A quest definition keyed by its 16-bit id
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestInfo {
    pub id: QuestId,
    pub name: String,
    pub quest_type: String,
    pub level: u32,
    pub repeat: QuestRepeat,
}

impl QuestInfo {
    pub fn from_raw(raw: &RawQuestRow) -> Result<Self, CacheError> {
        let id = narrow_quest_id("quests", raw.id, raw.id)?;
        let repeat = QuestRepeat::from_str(&raw.repeat).ok_or_else(|| CacheError::InvalidField {
            table: "quests",
            row_id: raw.id,
            field: "repeat",
            value: raw.repeat.clone(),
        })?;

        Ok(Self {
            id,
            name: raw.name.clone(),
            quest_type: raw.quest_type.clone(),
            level: raw.level,
            repeat,
        })
    }

    pub fn is_repeatable(&self) -> bool {
        self.repeat != QuestRepeat::None
    }
}

/// A communicator message triggered by delivering a quest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommunicatorMessage {
    pub id: u32,
    pub quest_id: QuestId,
    pub creature_id: CreatureId,
    pub text: String,
    pub delay: Duration,
}

impl CommunicatorMessage {
    /// Build from a row whose delivered-quest id is non-zero
    pub fn from_raw(raw: &RawCommunicatorRow) -> Result<Self, CacheError> {
        Ok(Self {
            id: raw.id,
            quest_id: narrow_quest_id("communicator", raw.id, raw.quest_id_delivered)?,
            creature_id: raw.creature_id,
            text: raw.text.clone(),
            delay: Duration::from_millis(raw.delay_ms as u64),
        })
    }
}
