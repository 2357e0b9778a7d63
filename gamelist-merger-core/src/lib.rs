//! Merge engine for EmulationStation-style gamelists.
//!
//! Two parsed lists are combined into one: entries are matched with a
//! pluggable [`EntityComparer`], matched pairs are combined field by field
//! with the master winning, and games can be filtered out by declarative
//! [`FilterRule`]s before matching.

pub mod comparer;
pub mod error;
pub mod filter;
pub mod list_merge;
pub mod merge;
pub mod model;
pub mod pair;
pub mod sort;

pub use comparer::{
    CompositeComparer, CompositeComparerBuilder, EntityComparer, FolderComparer, GameComparers,
    GameField,
};
pub use error::MergeError;
pub use filter::{
    FilterConfig, FilterOperation, FilterProperty, FilterRule, FilterStatistics, GameFilter,
    compile, filter_config_from_flags,
};
pub use list_merge::{ComparerMap, MergeResult, merge_game_lists, partition_games};
pub use merge::{
    FileTypePreference, NoPreference, PreferCompressed, Preferred, merge_folder, merge_game,
};
pub use model::{Folder, Game, GameList, Provider};
pub use pair::GameListPair;
pub use sort::sort_by_name;
