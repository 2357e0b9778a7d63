use crate::model::GameList;

/// Sort games by name, case-insensitively. Missing names sort as empty.
///
/// The sort is stable, so games with equal names keep their merged order.
/// Provider and folders are left untouched.
pub fn sort_by_name(mut list: GameList) -> GameList {
    list.games
        .sort_by_cached_key(|g| g.name.as_deref().unwrap_or_default().to_uppercase());
    list
}

#[cfg(test)]
#[path = "tests/sort_tests.rs"]
mod tests;
