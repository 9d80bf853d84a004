pub mod rows;
pub mod tables;

pub use rows::{RawCommunicatorRow, RawCreatureRow, RawQuestRow};
pub use tables::StaticTables;
