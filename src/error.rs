//! Errors raised while loading static tables and building the quest cache.

use std::path::PathBuf;

/// Failure while building the cache. Any of these aborts startup.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("{table} row {row_id}: quest id {quest_id} does not fit in 16 bits")]
    QuestIdOutOfRange {
        table: &'static str,
        row_id: u32,
        quest_id: u32,
    },

    #[error("duplicate quest id {quest_id} at quest table positions {first_row} and {second_row}")]
    DuplicateQuest {
        quest_id: u16,
        first_row: usize,
        second_row: usize,
    },

    #[error("{table} row {row_id}: invalid {field} '{value}'")]
    InvalidField {
        table: &'static str,
        row_id: u32,
        field: &'static str,
        value: String,
    },

    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Narrow a raw table quest id to the 16-bit key used by every index.
pub(crate) fn narrow_quest_id(
    table: &'static str,
    row_id: u32,
    quest_id: u32,
) -> Result<u16, CacheError> {
    u16::try_from(quest_id).map_err(|_| CacheError::QuestIdOutOfRange {
        table,
        row_id,
        quest_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_narrow_quest_id() {
        assert_eq!(narrow_quest_id("quests", 1, 65535).unwrap(), 65535);

        let err = narrow_quest_id("creatures", 42, 70_000).unwrap_err();
        assert!(matches!(
            err,
            CacheError::QuestIdOutOfRange { table: "creatures", row_id: 42, quest_id: 70_000 }
        ));
        assert_eq!(
            err.to_string(),
            "creatures row 42: quest id 70000 does not fit in 16 bits"
        );
    }
}
