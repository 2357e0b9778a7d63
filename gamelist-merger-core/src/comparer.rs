//! Identity strategies used to decide whether two records describe the same
//! game or folder.
//!
//! Game identity is a prioritized fallback chain: the first field that is
//! present on *both* sides decides the match, and no later field is
//! consulted. Folder identity is a single fixed field.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::error::MergeError;
use crate::model::{Folder, Game};

/// Equality + hashing strategy over a record type.
///
/// Implementations must keep `hash_key` consistent with `equals` in the
/// usual way: records that compare equal through the field that decided the
/// match hash identically.
pub trait EntityComparer<T> {
    fn equals(&self, a: &T, b: &T) -> bool;

    fn hash_key(&self, item: &T) -> u64;

    /// Equality over possibly-absent records: two absent records are equal,
    /// one absent record never matches.
    fn equals_opt(&self, a: Option<&T>, b: Option<&T>) -> bool {
        match (a, b) {
            (None, None) => true,
            (Some(a), Some(b)) => self.equals(a, b),
            _ => false,
        }
    }
}

impl<T, C: EntityComparer<T> + ?Sized> EntityComparer<T> for &C {
    fn equals(&self, a: &T, b: &T) -> bool {
        (**self).equals(a, b)
    }

    fn hash_key(&self, item: &T) -> u64 {
        (**self).hash_key(item)
    }
}

pub(crate) fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b) || a.to_uppercase() == b.to_uppercase()
}

fn hash_str(value: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

fn hash_ignore_case(value: &str) -> u64 {
    hash_str(&value.to_uppercase())
}

// ---------------------------------------------------------------------------
// Game comparers
// ---------------------------------------------------------------------------

/// A game field that can take part in an identity chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameField {
    Id,
    Path,
    Hash,
    Crc32,
}

impl GameField {
    pub fn value<'a>(&self, game: &'a Game) -> Option<&'a str> {
        match self {
            Self::Id => game.id.as_deref(),
            Self::Path => game.path.as_deref(),
            Self::Hash => game.hash.as_deref(),
            Self::Crc32 => game.crc32.as_deref(),
        }
    }
}

/// Builds a [`CompositeComparer`] from selectors in priority order.
#[derive(Debug, Default, Clone)]
pub struct CompositeComparerBuilder {
    selectors: Vec<GameField>,
}

impl CompositeComparerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn by_id(self) -> Self {
        self.by(GameField::Id)
    }

    pub fn by_path(self) -> Self {
        self.by(GameField::Path)
    }

    pub fn by_crc32(self) -> Self {
        self.by(GameField::Crc32)
    }

    pub fn by_hash(self) -> Self {
        self.by(GameField::Hash)
    }

    pub fn by(mut self, field: GameField) -> Self {
        self.selectors.push(field);
        self
    }

    /// Finish the chain. An empty chain is a configuration error.
    pub fn build(self) -> Result<CompositeComparer, MergeError> {
        if self.selectors.is_empty() {
            return Err(MergeError::EmptyComparer);
        }
        Ok(CompositeComparer {
            selectors: self.selectors,
        })
    }
}

/// Case-insensitive fallback-chain comparer over games.
#[derive(Debug, Clone)]
pub struct CompositeComparer {
    selectors: Vec<GameField>,
}

impl CompositeComparer {
    pub fn selectors(&self) -> &[GameField] {
        &self.selectors
    }
}

impl EntityComparer<Game> for CompositeComparer {
    fn equals(&self, a: &Game, b: &Game) -> bool {
        if std::ptr::eq(a, b) {
            return true;
        }

        for field in &self.selectors {
            match (field.value(a), field.value(b)) {
                (Some(av), Some(bv)) if !av.is_empty() && !bv.is_empty() => {
                    return eq_ignore_case(av, bv);
                }
                // Missing on either side: this field can't decide, try the next one
                _ => continue,
            }
        }

        false
    }

    fn hash_key(&self, item: &Game) -> u64 {
        self.selectors
            .iter()
            .filter_map(|field| field.value(item))
            .find(|v| !v.is_empty())
            .map(hash_ignore_case)
            .unwrap_or(0)
    }
}

/// Pre-built game comparers.
pub struct GameComparers;

impl GameComparers {
    /// Hash, then CRC32, then path.
    ///
    /// Ids are left out: two scrapers routinely assign different ids to the
    /// same ROM.
    pub fn default_comparer() -> CompositeComparer {
        CompositeComparer {
            selectors: vec![GameField::Hash, GameField::Crc32, GameField::Path],
        }
    }

    /// Id, then path.
    pub fn by_id_then_path() -> CompositeComparer {
        CompositeComparer {
            selectors: vec![GameField::Id, GameField::Path],
        }
    }
}

// ---------------------------------------------------------------------------
// Folder comparers
// ---------------------------------------------------------------------------

/// Single-field folder identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FolderComparer {
    ByPath,
    #[default]
    ByName,
    /// Case-sensitive
    ById,
}

impl FolderComparer {
    fn value<'a>(&self, folder: &'a Folder) -> Option<&'a str> {
        match self {
            Self::ByPath => folder.path.as_deref(),
            Self::ByName => folder.name.as_deref(),
            Self::ById => folder.id.as_deref(),
        }
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            Self::ByPath => "path",
            Self::ByName => "name",
            Self::ById => "id",
        }
    }
}

impl EntityComparer<Folder> for FolderComparer {
    fn equals(&self, a: &Folder, b: &Folder) -> bool {
        if std::ptr::eq(a, b) {
            return true;
        }
        match (self.value(a), self.value(b)) {
            (None, None) => true,
            (Some(av), Some(bv)) => match self {
                Self::ById => av == bv,
                _ => eq_ignore_case(av, bv),
            },
            _ => false,
        }
    }

    fn hash_key(&self, item: &Folder) -> u64 {
        match (self, self.value(item)) {
            (_, None) => 0,
            (Self::ById, Some(v)) => hash_str(v),
            (_, Some(v)) => hash_ignore_case(v),
        }
    }
}

impl std::fmt::Display for FolderComparer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

impl FromStr for FolderComparer {
    type Err = MergeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "path" => Ok(Self::ByPath),
            "name" => Ok(Self::ByName),
            "id" => Ok(Self::ById),
            _ => Err(MergeError::UnknownFolderMatch(s.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "tests/comparer_tests.rs"]
mod tests;
