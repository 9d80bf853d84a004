use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::rows::{
    RawCommunicatorFile, RawCommunicatorRow, RawCreatureFile, RawCreatureRow, RawQuestFile,
    RawQuestRow,
};
use crate::error::CacheError;

/// Static game-design tables consumed by the quest cache, in scan order
#[derive(Debug, Clone, Default)]
pub struct StaticTables {
    pub quests: Vec<RawQuestRow>,
    pub creatures: Vec<RawCreatureRow>,
    pub communicator_messages: Vec<RawCommunicatorRow>,
}

impl StaticTables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load all tables from a data directory
    ///
    /// Files are read in file-name order and rows in file order, so the
    /// resulting scan order is stable across runs.
    pub fn load_from_directory(data_dir: &Path) -> Result<Self, CacheError> {
        let quests = load_table(&data_dir.join("quests"), |f: RawQuestFile| f.quests)?;
        info!("Loaded {} quest rows", quests.len());

        let creatures = load_table(&data_dir.join("creatures"), |f: RawCreatureFile| f.creatures)?;
        info!("Loaded {} creature rows", creatures.len());

        let communicator_messages =
            load_table(&data_dir.join("communicator"), |f: RawCommunicatorFile| f.messages)?;
        info!("Loaded {} communicator rows", communicator_messages.len());

        Ok(Self {
            quests,
            creatures,
            communicator_messages,
        })
    }
}

fn load_table<F, R>(dir: &Path, rows: impl Fn(F) -> Vec<R>) -> Result<Vec<R>, CacheError>
where
    F: DeserializeOwned,
{
    if !dir.exists() {
        warn!("Table directory does not exist: {:?}", dir);
        return Ok(Vec::new());
    }

    let mut paths = Vec::new();
    let entries = std::fs::read_dir(dir).map_err(|source| CacheError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    for entry in entries {
        let entry = entry.map_err(|source| CacheError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.extension().map_or(false, |ext| ext == "toml") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut table = Vec::new();
    for path in paths {
        let file: F = read_toml(&path)?;
        let file_rows = rows(file);
        debug!("Read {} rows from {:?}", file_rows.len(), path);
        table.extend(file_rows);
    }

    Ok(table)
}

/// Read and deserialize a single TOML file
pub(crate) fn read_toml<T: DeserializeOwned>(path: &Path) -> Result<T, CacheError> {
    let content = std::fs::read_to_string(path).map_err(|source| CacheError::Io {
        path: PathBuf::from(path),
        source,
    })?;

    toml::from_str(&content).map_err(|source| CacheError::Parse {
        path: PathBuf::from(path),
        source,
    })
}
