//! Field-level merging of two records that describe the same entity.
//!
//! The master record wins field by field; an absent or empty master value
//! falls back to the secondary record. `id` always comes from the master.

use std::path::Path;

use crate::model::{Folder, Game, has_value};

/// Archive extensions preferred by [`PreferCompressed`].
pub const COMPRESSED_EXTENSIONS: &[&str] = &["zip", "7z"];

fn pick(master: &Option<String>, secondary: &Option<String>) -> Option<String> {
    if has_value(master.as_deref()) {
        master.clone()
    } else {
        secondary.clone()
    }
}

/// Which of two matched games supplies the path, image and thumbnail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preferred {
    Master,
    Secondary,
}

/// Policy choosing whose file (and its media) to keep for a matched pair.
///
/// Returning `None` means "no preference": the usual master-wins rule
/// applies to each of the three fields independently.
pub trait FileTypePreference {
    fn prefer(&self, master: &Game, secondary: &Game) -> Option<Preferred>;
}

impl<F> FileTypePreference for F
where
    F: Fn(&Game, &Game) -> Option<Preferred>,
{
    fn prefer(&self, master: &Game, secondary: &Game) -> Option<Preferred> {
        self(master, secondary)
    }
}

/// Never expresses a preference.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPreference;

impl FileTypePreference for NoPreference {
    fn prefer(&self, _master: &Game, _secondary: &Game) -> Option<Preferred> {
        None
    }
}

/// Prefer whichever side points at a `.zip`/`.7z` file.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreferCompressed {
    pub enabled: bool,
}

impl PreferCompressed {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

/// Lowercased extension of a ROM path; blank paths have none.
fn file_extension(path: Option<&str>) -> Option<String> {
    let path = path.filter(|p| !p.trim().is_empty())?;
    Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

pub fn is_compressed(path: Option<&str>) -> bool {
    file_extension(path).is_some_and(|ext| COMPRESSED_EXTENSIONS.contains(&ext.as_str()))
}

impl FileTypePreference for PreferCompressed {
    fn prefer(&self, master: &Game, secondary: &Game) -> Option<Preferred> {
        if !self.enabled {
            return None;
        }
        if is_compressed(master.path.as_deref()) {
            Some(Preferred::Master)
        } else if is_compressed(secondary.path.as_deref()) {
            Some(Preferred::Secondary)
        } else {
            // Neither is an archive: keep the master's file as a unit
            Some(Preferred::Master)
        }
    }
}

/// Merge two folders known to be the same folder.
pub fn merge_folder(master: &Folder, secondary: &Folder) -> Folder {
    Folder {
        id: master.id.clone(),
        source: pick(&master.source, &secondary.source),
        name: pick(&master.name, &secondary.name),
        description: pick(&master.description, &secondary.description),
        image: pick(&master.image, &secondary.image),
        thumbnail: pick(&master.thumbnail, &secondary.thumbnail),
        path: pick(&master.path, &secondary.path),
    }
}

/// Merge two games known to be the same game.
///
/// When `preference` names a side, that side's path, image and thumbnail are
/// copied as-is (even when empty); otherwise each falls back independently.
pub fn merge_game<P>(master: &Game, secondary: &Game, preference: &P) -> Game
where
    P: FileTypePreference + ?Sized,
{
    let (path, image, thumbnail) = match preference.prefer(master, secondary) {
        Some(side) => {
            let preferred = match side {
                Preferred::Master => master,
                Preferred::Secondary => secondary,
            };
            (
                preferred.path.clone(),
                preferred.image.clone(),
                preferred.thumbnail.clone(),
            )
        }
        None => (
            pick(&master.path, &secondary.path),
            pick(&master.image, &secondary.image),
            pick(&master.thumbnail, &secondary.thumbnail),
        ),
    };

    Game {
        id: master.id.clone(),
        source: pick(&master.source, &secondary.source),
        name: pick(&master.name, &secondary.name),
        description: pick(&master.description, &secondary.description),
        image,
        thumbnail,
        path,
        rating: pick(&master.rating, &secondary.rating),
        release_date: pick(&master.release_date, &secondary.release_date),
        developer: pick(&master.developer, &secondary.developer),
        publisher: pick(&master.publisher, &secondary.publisher),
        genre: pick(&master.genre, &secondary.genre),
        players: pick(&master.players, &secondary.players),
        play_count: pick(&master.play_count, &secondary.play_count),
        last_played: pick(&master.last_played, &secondary.last_played),
        favorite: pick(&master.favorite, &secondary.favorite),
        hash: pick(&master.hash, &secondary.hash),
        crc32: pick(&master.crc32, &secondary.crc32),
        lang: pick(&master.lang, &secondary.lang),
        region: pick(&master.region, &secondary.region),
        genre_id: pick(&master.genre_id, &secondary.genre_id),
    }
}

#[cfg(test)]
#[path = "tests/merge_tests.rs"]
mod tests;
