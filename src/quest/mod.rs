//! Quest Reference Cache
//!
//! Derived quest lookups (definitions, givers, receivers, communicator
//! messages) and the daily/weekly reset clock.

pub mod cache;
pub mod definition;
pub mod index;
pub mod reset;

pub use cache::{CacheStats, QuestCache};
pub use definition::{CommunicatorMessage, CreatureId, QuestId, QuestInfo, QuestRepeat};
pub use reset::{ResetClock, ResetRollover};
