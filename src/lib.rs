pub mod config;
pub mod data;
pub mod error;
pub mod quest;

pub use config::CacheConfig;
pub use data::StaticTables;
pub use error::CacheError;
pub use quest::{CommunicatorMessage, QuestCache, QuestInfo, QuestRepeat};
