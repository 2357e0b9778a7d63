//! Record types for a parsed gamelist.
//!
//! Every field is optional: a gamelist produced by one scraper rarely fills
//! the same fields as another, and an empty string is treated the same as an
//! absent value by the merge engine.

/// Returns `true` when the value is present and non-empty.
pub fn has_value(value: Option<&str>) -> bool {
    matches!(value, Some(v) if !v.is_empty())
}

/// A single `<game>` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Game {
    /// Scraper-assigned identifier (`id` attribute)
    pub id: Option<String>,
    /// Scraper name (`source` attribute)
    pub source: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub thumbnail: Option<String>,
    /// ROM path, usually relative to the gamelist (e.g., "./game.zip")
    pub path: Option<String>,
    /// Rating from 0.0 to 1.0, kept as written
    pub rating: Option<String>,
    /// Release date, usually YYYYMMDDTHHMMSS
    pub release_date: Option<String>,
    pub developer: Option<String>,
    pub publisher: Option<String>,
    pub genre: Option<String>,
    /// Number of players (e.g., "1", "1-4")
    pub players: Option<String>,
    pub play_count: Option<String>,
    pub last_played: Option<String>,
    /// "true" or absent
    pub favorite: Option<String>,
    /// Content hash as reported by the scraper
    pub hash: Option<String>,
    pub crc32: Option<String>,
    pub lang: Option<String>,
    pub region: Option<String>,
    pub genre_id: Option<String>,
}

macro_rules! with_fields {
    ($($method:ident => $field:ident),* $(,)?) => {
        $(
            pub fn $method(mut self, value: impl Into<String>) -> Self {
                self.$field = Some(value.into());
                self
            }
        )*
    };
}

impl Game {
    pub fn new() -> Self {
        Self::default()
    }

    with_fields! {
        with_id => id,
        with_source => source,
        with_name => name,
        with_description => description,
        with_image => image,
        with_thumbnail => thumbnail,
        with_path => path,
        with_rating => rating,
        with_release_date => release_date,
        with_developer => developer,
        with_publisher => publisher,
        with_genre => genre,
        with_players => players,
        with_play_count => play_count,
        with_last_played => last_played,
        with_favorite => favorite,
        with_hash => hash,
        with_crc32 => crc32,
        with_lang => lang,
        with_region => region,
        with_genre_id => genre_id,
    }

    /// Name for display, falling back to the path when the name is missing.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .or(self.path.as_deref())
            .unwrap_or("<unnamed>")
    }
}

/// A `<folder>` entry grouping games under a directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Folder {
    pub id: Option<String>,
    pub source: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub thumbnail: Option<String>,
    pub path: Option<String>,
}

impl Folder {
    pub fn new() -> Self {
        Self::default()
    }

    with_fields! {
        with_id => id,
        with_source => source,
        with_name => name,
        with_description => description,
        with_image => image,
        with_thumbnail => thumbnail,
        with_path => path,
    }
}

/// The `<provider>` block describing which scraper produced the list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Provider {
    pub system: Option<String>,
    pub software: Option<String>,
    pub database: Option<String>,
    pub web: Option<String>,
}

impl Provider {
    pub fn new() -> Self {
        Self::default()
    }

    with_fields! {
        with_system => system,
        with_software => software,
        with_database => database,
        with_web => web,
    }
}

/// A whole gamelist: optional provider, folders and games in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameList {
    pub provider: Option<Provider>,
    pub folders: Vec<Folder>,
    pub games: Vec<Game>,
}

impl GameList {
    pub fn new(provider: Option<Provider>, folders: Vec<Folder>, games: Vec<Game>) -> Self {
        Self {
            provider,
            folders,
            games,
        }
    }

    pub fn total_games(&self) -> usize {
        self.games.len()
    }

    pub fn total_folders(&self) -> usize {
        self.folders.len()
    }
}
