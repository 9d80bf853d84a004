//! Quest Cache
//!
//! Read-only quest lookups built once from the static tables at startup.
//! Hosts construct one `QuestCache`, share it behind an `Arc` and drive
//! `update` from their tick loop.

use chrono::{DateTime, Utc};
use std::time::{Duration, Instant};
use tracing::{info, warn};

use super::definition::{CommunicatorMessage, CreatureId, QuestId, QuestInfo, QuestRepeat};
use super::index::{
    build_communicator_index, build_creature_relations, build_quest_index, CommunicatorIndex,
    CreatureIndex, CreatureRelations, QuestIndex,
};
use super::reset::ResetClock;
use crate::data::StaticTables;
use crate::error::CacheError;

/// Sizes of the built indices, reported once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub quests: usize,
    pub quests_with_givers: usize,
    pub quests_with_receivers: usize,
    pub quests_with_messages: usize,
    pub build_time: Duration,
}

/// Quest reference data and reset deadlines
#[derive(Debug)]
pub struct QuestCache {
    quests: QuestIndex,
    givers: CreatureIndex,
    receivers: CreatureIndex,
    communicator: CommunicatorIndex,
    reset_clock: ResetClock,
    build_time: Duration,
}

impl QuestCache {
    /// Build every index from `tables`, with reset times relative to now
    pub fn initialise(tables: &StaticTables) -> Result<Self, CacheError> {
        Self::initialise_at(tables, Utc::now())
    }

    pub fn initialise_at(tables: &StaticTables, now: DateTime<Utc>) -> Result<Self, CacheError> {
        let started = Instant::now();

        let reset_clock = ResetClock::new(now);
        let quests = build_quest_index(&tables.quests)?;
        let CreatureRelations { givers, receivers } =
            build_creature_relations(&tables.creatures)?;
        let communicator = build_communicator_index(&tables.communicator_messages)?;

        let cache = Self {
            quests,
            givers,
            receivers,
            communicator,
            reset_clock,
            build_time: started.elapsed(),
        };
        cache.warn_unknown_references();

        let stats = cache.stats();
        info!(
            "Cached {} quests ({} with givers, {} with receivers, {} with communicator messages) in {}ms",
            stats.quests,
            stats.quests_with_givers,
            stats.quests_with_receivers,
            stats.quests_with_messages,
            stats.build_time.as_millis()
        );
        info!(
            "Next daily reset {}, next weekly reset {}",
            cache.next_daily_reset(),
            cache.next_weekly_reset()
        );

        Ok(cache)
    }

    /// Relation and communicator rows may name quests missing from the quest
    /// table. They stay indexed; this only reports them.
    fn warn_unknown_references(&self) {
        for (index, kind) in [(&self.givers, "giver"), (&self.receivers, "receiver")] {
            for (quest_id, creatures) in index {
                if !self.quests.contains_key(quest_id) {
                    warn!(
                        "Creatures {:?} reference unknown quest {} as {}",
                        creatures, quest_id, kind
                    );
                }
            }
        }

        for (quest_id, messages) in &self.communicator {
            if !self.quests.contains_key(quest_id) {
                warn!(
                    "{} communicator messages reference unknown quest {}",
                    messages.len(),
                    quest_id
                );
            }
        }
    }

    /// Advance reset deadlines against the current time.
    /// `_diff` is the time since the previous tick.
    pub fn update(&self, _diff: Duration) {
        self.update_at(Utc::now());
    }

    pub fn update_at(&self, now: DateTime<Utc>) {
        let rollover = self.reset_clock.advance(now);
        if rollover.daily {
            info!("Daily quest reset passed, next at {}", self.next_daily_reset());
        }
        if rollover.weekly {
            info!("Weekly quest reset passed, next at {}", self.next_weekly_reset());
        }
    }

    /// Get a quest by ID
    pub fn get_quest_info(&self, quest_id: QuestId) -> Option<&QuestInfo> {
        self.quests.get(&quest_id)
    }

    /// Creatures that hand out a quest, in table order
    pub fn get_quest_givers(&self, quest_id: QuestId) -> &[CreatureId] {
        self.givers.get(&quest_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Creatures that accept a quest for turn-in, in table order
    pub fn get_quest_receivers(&self, quest_id: QuestId) -> &[CreatureId] {
        self.receivers.get(&quest_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Communicator messages delivered for a quest, in table order
    pub fn get_quest_communicator_messages(&self, quest_id: QuestId) -> &[CommunicatorMessage] {
        self.communicator.get(&quest_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn next_daily_reset(&self) -> DateTime<Utc> {
        self.reset_clock.next_daily_reset()
    }

    pub fn next_weekly_reset(&self) -> DateTime<Utc> {
        self.reset_clock.next_weekly_reset()
    }

    /// Deadline after which a quest of this repeat kind resets
    pub fn next_reset(&self, repeat: QuestRepeat) -> Option<DateTime<Utc>> {
        match repeat {
            QuestRepeat::None => None,
            QuestRepeat::Daily => Some(self.next_daily_reset()),
            QuestRepeat::Weekly => Some(self.next_weekly_reset()),
        }
    }

    /// Get count of cached quests
    pub fn quest_count(&self) -> usize {
        self.quests.len()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            quests: self.quests.len(),
            quests_with_givers: self.givers.len(),
            quests_with_receivers: self.receivers.len(),
            quests_with_messages: self.communicator.len(),
            build_time: self.build_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{RawCommunicatorRow, RawCreatureRow, RawQuestRow};
    use chrono::TimeZone;
    use std::sync::Arc;

    fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn test_tables() -> StaticTables {
        let mut weekly = RawQuestRow::new(9, "Weekly Bounty");
        weekly.repeat = "weekly".to_string();

        StaticTables {
            quests: vec![RawQuestRow::new(5, "Into the Wilds"), weekly],
            creatures: vec![
                RawCreatureRow::new(100, &[5, 0, 0], &[0, 0, 0]),
                RawCreatureRow::new(101, &[9, 5], &[5]),
                RawCreatureRow::new(102, &[0, 0, 0], &[9, 9]),
            ],
            communicator_messages: vec![
                RawCommunicatorRow::new(1, 5),
                RawCommunicatorRow::new(2, 0),
                RawCommunicatorRow::new(3, 5),
            ],
        }
    }

    #[test]
    fn test_lookups() {
        let cache = QuestCache::initialise_at(&test_tables(), utc(2024, 1, 3, 8)).unwrap();

        assert_eq!(cache.get_quest_info(5).unwrap().name, "Into the Wilds");
        assert!(cache.get_quest_info(7).is_none());

        assert_eq!(cache.get_quest_givers(5), &[100, 101]);
        assert_eq!(cache.get_quest_givers(9), &[101]);
        assert_eq!(cache.get_quest_receivers(5), &[101]);
        assert_eq!(cache.get_quest_receivers(9), &[102, 102]);

        let ids: Vec<u32> = cache
            .get_quest_communicator_messages(5)
            .iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_unknown_quest_is_empty() {
        let cache = QuestCache::initialise_at(&test_tables(), utc(2024, 1, 3, 8)).unwrap();

        for quest_id in [0, 1, 7, 1000, u16::MAX] {
            assert!(cache.get_quest_info(quest_id).is_none());
            assert!(cache.get_quest_givers(quest_id).is_empty());
            assert!(cache.get_quest_receivers(quest_id).is_empty());
            assert!(cache.get_quest_communicator_messages(quest_id).is_empty());
        }
    }

    #[test]
    fn test_single_creature_scenario() {
        let tables = StaticTables {
            quests: vec![RawQuestRow::new(5, "Five")],
            creatures: vec![RawCreatureRow::new(100, &[5, 0, 0], &[0, 0, 0])],
            communicator_messages: Vec::new(),
        };
        let cache = QuestCache::initialise(&tables).unwrap();

        assert_eq!(cache.get_quest_givers(5), &[100]);
        assert!(cache.get_quest_receivers(5).is_empty());
    }

    #[test]
    fn test_lookups_are_stable() {
        let cache = QuestCache::initialise_at(&test_tables(), utc(2024, 1, 3, 8)).unwrap();

        assert_eq!(cache.get_quest_info(9), cache.get_quest_info(9));
        assert_eq!(cache.get_quest_givers(5), cache.get_quest_givers(5));
        cache.update_at(utc(2024, 1, 10, 12));
        assert_eq!(
            cache.get_quest_communicator_messages(5),
            cache.get_quest_communicator_messages(5)
        );
    }

    #[test]
    fn test_unknown_reference_is_kept() {
        let tables = StaticTables {
            quests: vec![RawQuestRow::new(5, "Five")],
            creatures: vec![RawCreatureRow::new(100, &[42], &[])],
            communicator_messages: vec![RawCommunicatorRow::new(1, 43)],
        };
        let cache = QuestCache::initialise(&tables).unwrap();

        assert!(cache.get_quest_info(42).is_none());
        assert_eq!(cache.get_quest_givers(42), &[100]);
        assert_eq!(cache.get_quest_communicator_messages(43).len(), 1);
    }

    #[test]
    fn test_initialise_fails_on_duplicate() {
        let tables = StaticTables {
            quests: vec![RawQuestRow::new(5, "A"), RawQuestRow::new(5, "B")],
            ..Default::default()
        };
        assert!(matches!(
            QuestCache::initialise(&tables),
            Err(CacheError::DuplicateQuest { quest_id: 5, .. })
        ));
    }

    #[test]
    fn test_reset_deadlines() {
        let cache = QuestCache::initialise_at(&test_tables(), utc(2024, 1, 3, 8)).unwrap();
        assert_eq!(cache.next_daily_reset(), utc(2024, 1, 4, 10));
        assert_eq!(cache.next_weekly_reset(), utc(2024, 1, 9, 10));

        let weekly = cache.get_quest_info(9).unwrap();
        assert_eq!(cache.next_reset(weekly.repeat), Some(utc(2024, 1, 9, 10)));
        assert_eq!(cache.next_reset(QuestRepeat::Daily), Some(utc(2024, 1, 4, 10)));
        assert_eq!(cache.next_reset(QuestRepeat::None), None);

        cache.update_at(utc(2024, 1, 4, 11));
        assert_eq!(cache.next_daily_reset(), utc(2024, 1, 5, 10));
        assert_eq!(cache.next_weekly_reset(), utc(2024, 1, 9, 10));
    }

    #[test]
    fn test_stats() {
        let cache = QuestCache::initialise_at(&test_tables(), utc(2024, 1, 3, 8)).unwrap();
        let stats = cache.stats();

        assert_eq!(cache.quest_count(), 2);
        assert_eq!(stats.quests, 2);
        assert_eq!(stats.quests_with_givers, 2);
        assert_eq!(stats.quests_with_receivers, 2);
        assert_eq!(stats.quests_with_messages, 1);
    }

    #[test]
    fn test_shipped_tables() {
        let data_dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
        let tables = StaticTables::load_from_directory(&data_dir).unwrap();
        let cache = QuestCache::initialise(&tables).unwrap();

        assert_eq!(cache.quest_count(), 3);
        assert_eq!(cache.get_quest_givers(12), &[100]);
        assert_eq!(cache.get_quest_receivers(5), &[101]);
        assert_eq!(cache.get_quest_receivers(12), &[102]);
        assert_eq!(cache.get_quest_communicator_messages(12)[0].id, 3);
        assert_eq!(
            cache.get_quest_info(9).map(|q| q.repeat),
            Some(QuestRepeat::Daily)
        );
    }

    #[test]
    fn test_concurrent_reads_during_update() {
        let cache = Arc::new(
            QuestCache::initialise_at(&test_tables(), utc(2024, 1, 3, 8)).unwrap(),
        );

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    for _ in 0..1000 {
                        assert_eq!(cache.get_quest_givers(5), &[100, 101]);
                        assert!(cache.next_daily_reset() >= utc(2024, 1, 4, 10));
                    }
                })
            })
            .collect();

        for day in 4..14 {
            cache.update_at(utc(2024, 1, day, 12));
        }
        for reader in readers {
            reader.join().unwrap();
        }

        assert_eq!(cache.next_daily_reset(), utc(2024, 1, 14, 10));
    }
}
