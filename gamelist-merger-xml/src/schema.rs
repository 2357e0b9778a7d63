//! Element names of the gamelist format and their record fields.

use gamelist_merger_core::{Folder, Game, Provider};

pub(crate) const ROOT: &str = "gameList";
pub(crate) const GAME: &str = "game";
pub(crate) const FOLDER: &str = "folder";
pub(crate) const PROVIDER: &str = "provider";
pub(crate) const PATH: &str = "path";

/// Generates the ordered element list of a record plus field lookups by tag.
macro_rules! element_table {
    ($ty:ty, $elements:ident, $field:ident, $field_mut:ident, { $($tag:literal => $name:ident),* $(,)? }) => {
        pub(crate) const $elements: &[&str] = &[$($tag),*];

        pub(crate) fn $field<'a>(item: &'a $ty, tag: &str) -> Option<&'a Option<String>> {
            match tag {
                $($tag => Some(&item.$name),)*
                _ => None,
            }
        }

        pub(crate) fn $field_mut<'a>(item: &'a mut $ty, tag: &str) -> Option<&'a mut Option<String>> {
            match tag {
                $($tag => Some(&mut item.$name),)*
                _ => None,
            }
        }
    };
}

element_table!(Game, GAME_ELEMENTS, game_field, game_field_mut, {
    "path" => path,
    "name" => name,
    "desc" => description,
    "image" => image,
    "thumbnail" => thumbnail,
    "rating" => rating,
    "releasedate" => release_date,
    "developer" => developer,
    "publisher" => publisher,
    "genre" => genre,
    "players" => players,
    "playcount" => play_count,
    "lastplayed" => last_played,
    "favorite" => favorite,
    "hash" => hash,
    "crc32" => crc32,
    "lang" => lang,
    "region" => region,
    "genreid" => genre_id,
});

element_table!(Folder, FOLDER_ELEMENTS, folder_field, folder_field_mut, {
    "path" => path,
    "name" => name,
    "desc" => description,
    "image" => image,
    "thumbnail" => thumbnail,
});

// Scrapers write `System` with a capital S.
element_table!(Provider, PROVIDER_ELEMENTS, provider_field, provider_field_mut, {
    "System" => system,
    "software" => software,
    "database" => database,
    "web" => web,
});

/// Provider lookup that also accepts a lowercase `system` element.
pub(crate) fn provider_field_mut_lenient<'a>(
    provider: &'a mut Provider,
    tag: &str,
) -> Option<&'a mut Option<String>> {
    match tag {
        "system" => Some(&mut provider.system),
        _ => provider_field_mut(provider, tag),
    }
}
