//! Index builders
//!
//! Each builder scans one raw table into a plain map. The maps are moved into
//! the `QuestCache` once every row is processed and are never mutated after.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use super::definition::{CommunicatorMessage, CreatureId, QuestId, QuestInfo};
use crate::data::{RawCommunicatorRow, RawCreatureRow, RawQuestRow};
use crate::error::{narrow_quest_id, CacheError};

pub type QuestIndex = HashMap<QuestId, QuestInfo>;
pub type CreatureIndex = HashMap<QuestId, Vec<CreatureId>>;
pub type CommunicatorIndex = HashMap<QuestId, Vec<CommunicatorMessage>>;

/// Quest id -> quest definition. Fails on the first row that collides.
pub fn build_quest_index(rows: &[RawQuestRow]) -> Result<QuestIndex, CacheError> {
    let mut index = QuestIndex::with_capacity(rows.len());

    for (position, row) in rows.iter().enumerate() {
        let info = QuestInfo::from_raw(row)?;
        match index.entry(info.id) {
            Entry::Occupied(_) => {
                let first_row = rows.iter().position(|r| r.id == row.id).unwrap_or(position);
                return Err(CacheError::DuplicateQuest {
                    quest_id: info.id,
                    first_row,
                    second_row: position,
                });
            }
            Entry::Vacant(slot) => {
                slot.insert(info);
            }
        }
    }

    Ok(index)
}

/// Quest givers and receivers, both keyed by quest id
#[derive(Debug, Default)]
pub struct CreatureRelations {
    pub givers: CreatureIndex,
    pub receivers: CreatureIndex,
}

/// Invert the creature table into quest -> creatures for grants and turn-ins.
///
/// Slots holding `0` are skipped. A quest listed twice by the same creature
/// records that creature twice.
pub fn build_creature_relations(rows: &[RawCreatureRow]) -> Result<CreatureRelations, CacheError> {
    let mut relations = CreatureRelations::default();

    for row in rows {
        append_relations(&mut relations.givers, row.id, &row.quest_ids_given)?;
        append_relations(&mut relations.receivers, row.id, &row.quest_ids_received)?;
    }

    Ok(relations)
}

fn append_relations(
    index: &mut CreatureIndex,
    creature_id: CreatureId,
    quest_ids: &[u32],
) -> Result<(), CacheError> {
    for &quest_id in quest_ids.iter().filter(|&&id| id != 0) {
        let quest_id = narrow_quest_id("creatures", creature_id, quest_id)?;
        index.entry(quest_id).or_default().push(creature_id);
    }
    Ok(())
}

/// Quest id -> communicator messages sent when that quest is delivered
pub fn build_communicator_index(
    rows: &[RawCommunicatorRow],
) -> Result<CommunicatorIndex, CacheError> {
    let mut index = CommunicatorIndex::new();

    for row in rows.iter().filter(|r| r.quest_id_delivered != 0) {
        let message = CommunicatorMessage::from_raw(row)?;
        index.entry(message.quest_id).or_default().push(message);
    }

    Ok(index)
}
