//! Whole-list merging: filter each side, then fold the secondary list into
//! the master list using the configured identity and field-merge policies.

use std::collections::HashMap;

use crate::comparer::EntityComparer;
use crate::filter::{FilterStatistics, GameFilter};
use crate::merge::{FileTypePreference, merge_folder, merge_game};
use crate::model::{Folder, Game, GameList};

/// An insertion-ordered map whose key identity comes from an
/// [`EntityComparer`] rather than from `Eq`/`Hash` on the key type.
///
/// Lookups bucket by `hash_key` and confirm with `equals`, so two records
/// only meet when both agree. The key of a slot is the record that created
/// it; merging replaces the value but never the key.
pub struct ComparerMap<T, C> {
    comparer: C,
    slots: Vec<(T, T)>,
    buckets: HashMap<u64, Vec<usize>>,
}

impl<T: Clone, C: EntityComparer<T>> ComparerMap<T, C> {
    pub fn new(comparer: C) -> Self {
        Self {
            comparer,
            slots: Vec::new(),
            buckets: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn find(&self, key: &T) -> Option<usize> {
        let hash = self.comparer.hash_key(key);
        self.buckets.get(&hash)?.iter().copied().find(|&i| {
            let (existing, _) = &self.slots[i];
            self.comparer.equals(existing, key)
        })
    }

    pub fn get(&self, key: &T) -> Option<&T> {
        self.find(key).map(|i| &self.slots[i].1)
    }

    /// Insert `value` under its own identity, replacing the value of an
    /// equivalent slot if one exists.
    pub fn insert(&mut self, value: T) {
        match self.find(&value) {
            Some(i) => self.slots[i].1 = value,
            None => self.push(value),
        }
    }

    fn push(&mut self, value: T) {
        let hash = self.comparer.hash_key(&value);
        self.buckets.entry(hash).or_default().push(self.slots.len());
        self.slots.push((value.clone(), value));
    }

    /// Merge `value` into its equivalent slot with `merge(current, value)`,
    /// or add it as a new slot.
    ///
    /// Returns `true` when an existing slot absorbed the value.
    pub fn merge_or_insert(&mut self, value: T, merge: impl FnOnce(&T, &T) -> T) -> bool {
        match self.find(&value) {
            Some(i) => {
                let merged = merge(&self.slots[i].1, &value);
                self.slots[i].1 = merged;
                true
            }
            None => {
                self.push(value);
                false
            }
        }
    }

    /// Slot values in insertion order.
    pub fn into_values(self) -> Vec<T> {
        self.slots.into_iter().map(|(_, value)| value).collect()
    }
}

/// The merged list plus filtering statistics.
#[derive(Debug, Clone)]
pub struct MergeResult {
    pub merged: GameList,
    pub statistics: FilterStatistics,
}

/// Split games into (kept, filtered out), preserving order.
pub fn partition_games(games: &[Game], filter: &GameFilter) -> (Vec<Game>, Vec<Game>) {
    games.iter().cloned().partition(|game| filter.matches(game))
}

fn merge_items<T, C>(
    label: &str,
    master: Vec<T>,
    secondary: Vec<T>,
    comparer: C,
    merge: impl Fn(&T, &T) -> T,
) -> Vec<T>
where
    T: Clone,
    C: EntityComparer<T>,
{
    let mut map = ComparerMap::new(comparer);
    for item in master {
        map.insert(item);
    }

    let mut merged = 0usize;
    let mut added = 0usize;
    for item in secondary {
        if map.merge_or_insert(item, &merge) {
            merged += 1;
        } else {
            added += 1;
        }
    }

    log::debug!(
        "Merged {label}: {merged} matched, {added} added, {} total",
        map.len()
    );
    map.into_values()
}

/// Merge `secondary` into `master`.
///
/// Games are filtered on both sides first; folders are never filtered. The
/// master's provider is kept and the secondary's is dropped. Output order is
/// master entries first, then secondary-only entries, each in input order.
pub fn merge_game_lists<G, F, P>(
    master: &GameList,
    secondary: &GameList,
    game_comparer: G,
    folder_comparer: F,
    filter: &GameFilter,
    preference: &P,
) -> MergeResult
where
    G: EntityComparer<Game>,
    F: EntityComparer<Folder>,
    P: FileTypePreference + ?Sized,
{
    let (master_included, master_filtered) = partition_games(&master.games, filter);
    let (secondary_included, secondary_filtered) = partition_games(&secondary.games, filter);

    log::debug!(
        "Filtered games: master {} kept / {} dropped, secondary {} kept / {} dropped",
        master_included.len(),
        master_filtered.len(),
        secondary_included.len(),
        secondary_filtered.len()
    );
    for game in master_filtered.iter().chain(&secondary_filtered) {
        log::trace!("Filtered out: {}", game.display_name());
    }

    let master_included_count = master_included.len();
    let secondary_included_count = secondary_included.len();

    let games = merge_items(
        "games",
        master_included,
        secondary_included,
        game_comparer,
        |current, other| merge_game(current, other, preference),
    );

    let folders = merge_items(
        "folders",
        master.folders.clone(),
        secondary.folders.clone(),
        folder_comparer,
        merge_folder,
    );

    let statistics = FilterStatistics {
        master_filtered_games: master_filtered,
        secondary_filtered_games: secondary_filtered,
        master_included_count,
        secondary_included_count,
        merged_game_count: games.len(),
    };

    MergeResult {
        merged: GameList::new(master.provider.clone(), folders, games),
        statistics,
    }
}

#[cfg(test)]
#[path = "tests/list_merge_tests.rs"]
mod tests;
