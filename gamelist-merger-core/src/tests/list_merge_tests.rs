use super::*;
use crate::comparer::{CompositeComparerBuilder, FolderComparer, GameComparers};
use crate::filter::{FilterConfig, FilterOperation, FilterProperty, FilterRule, compile};
use crate::merge::{NoPreference, Preferred};
use crate::model::Provider;

fn game(id: &str, name: &str, path: &str) -> Game {
    Game::new().with_id(id).with_name(name).with_path(path)
}

fn games(list: Vec<Game>) -> GameList {
    GameList::new(None, Vec::new(), list)
}

fn merge(master: &GameList, secondary: &GameList, filter: &GameFilter) -> MergeResult {
    merge_game_lists(
        master,
        secondary,
        GameComparers::default_comparer(),
        FolderComparer::ByPath,
        filter,
        &NoPreference,
    )
}

#[test]
fn empty_lists_give_empty_result() {
    let result = merge(&GameList::default(), &GameList::default(), &GameFilter::accept_all());
    assert!(result.merged.games.is_empty());
    assert!(result.merged.folders.is_empty());
    assert!(result.merged.provider.is_none());
    assert_eq!(result.statistics, FilterStatistics::default());
}

#[test]
fn only_master_games() {
    let master = games(vec![game("1", "Game 1", "./game1.rom")]);
    let result = merge(&master, &GameList::default(), &GameFilter::accept_all());
    assert_eq!(result.merged.games, master.games);
    assert_eq!(result.statistics.master_included_count, 1);
    assert_eq!(result.statistics.secondary_included_count, 0);
}

#[test]
fn only_secondary_games() {
    let secondary = games(vec![game("1", "Game 1", "./game1.rom")]);
    let result = merge(&GameList::default(), &secondary, &GameFilter::accept_all());
    assert_eq!(result.merged.games, secondary.games);
    assert_eq!(result.statistics.master_included_count, 0);
    assert_eq!(result.statistics.secondary_included_count, 1);
}

#[test]
fn non_overlapping_games_are_combined_in_order() {
    let master = games(vec![
        game("1", "Master A", "./a.rom"),
        game("2", "Master B", "./b.rom"),
    ]);
    let secondary = games(vec![
        game("3", "Secondary C", "./c.rom"),
        game("4", "Secondary D", "./d.rom"),
    ]);
    let result = merge(&master, &secondary, &GameFilter::accept_all());

    let names: Vec<_> = result
        .merged
        .games
        .iter()
        .map(|g| g.name.as_deref().unwrap_or_default())
        .collect();
    assert_eq!(names, ["Master A", "Master B", "Secondary C", "Secondary D"]);
    assert_eq!(result.statistics.merged_game_count, 4);
}

#[test]
fn overlapping_game_keeps_master_position_and_fills_fields() {
    let master = games(vec![
        game("1", "First", "./first.rom").with_rating("0.5"),
        game("2", "Shared", "./shared.rom"),
    ]);
    let secondary = games(vec![
        game("9", "New", "./new.rom"),
        Game::new()
            .with_path("./SHARED.rom")
            .with_description("Complete description")
            .with_developer("Test Dev"),
    ]);
    let result = merge(&master, &secondary, &GameFilter::accept_all());

    assert_eq!(result.merged.games.len(), 3);
    let shared = &result.merged.games[1];
    assert_eq!(shared.id.as_deref(), Some("2"));
    assert_eq!(shared.name.as_deref(), Some("Shared"));
    assert_eq!(shared.path.as_deref(), Some("./shared.rom"));
    assert_eq!(shared.description.as_deref(), Some("Complete description"));
    assert_eq!(shared.developer.as_deref(), Some("Test Dev"));
    assert_eq!(result.merged.games[2].name.as_deref(), Some("New"));
}

#[test]
fn repeated_secondary_matches_merge_against_latest_value() {
    let master = games(vec![Game::new().with_path("./game.rom")]);
    let secondary = games(vec![
        Game::new().with_path("./game.rom").with_developer("First Dev"),
        Game::new()
            .with_path("./game.rom")
            .with_developer("Second Dev")
            .with_publisher("Second Pub"),
    ]);
    let result = merge(&master, &secondary, &GameFilter::accept_all());

    assert_eq!(result.merged.games.len(), 1);
    let merged = &result.merged.games[0];
    assert_eq!(merged.developer.as_deref(), Some("First Dev"));
    assert_eq!(merged.publisher.as_deref(), Some("Second Pub"));
}

#[test]
fn filter_applies_to_both_sides_and_is_recorded() {
    let master = games(vec![
        game("1", "Game 1", "./game1.rom").with_region("us"),
        game("2", "Game 2 [BIOS]", "./bios.rom"),
    ]);
    let secondary = games(vec![
        game("3", "Game 3", "./game3.rom").with_region("eu"),
        game("4", "Game 4 [BIOS]", "./bios2.rom"),
    ]);
    let filter = compile(&FilterConfig::default().exclude(FilterRule::new(
        FilterProperty::Name,
        FilterOperation::Contains,
        ["[BIOS]"],
    )));
    let result = merge(&master, &secondary, &filter);

    let stats = &result.statistics;
    assert_eq!(stats.master_included_count, 1);
    assert_eq!(stats.secondary_included_count, 1);
    assert_eq!(stats.master_filtered_games.len(), 1);
    assert_eq!(stats.secondary_filtered_games.len(), 1);
    assert_eq!(stats.master_filtered_games[0].name.as_deref(), Some("Game 2 [BIOS]"));
    assert_eq!(stats.merged_game_count, 2);
    assert_eq!(stats.total_filtered_count(), 2);
}

#[test]
fn merging_against_empty_list_returns_filtered_input() {
    let master = games(vec![
        game("1", "Keep", "./keep.rom").with_region("us"),
        game("2", "Drop", "./drop.rom").with_region("jp"),
    ]);
    let filter = compile(&FilterConfig::default().exclude(FilterRule::new(
        FilterProperty::Region,
        FilterOperation::In,
        ["jp"],
    )));
    let result = merge(&master, &GameList::default(), &filter);

    assert_eq!(result.merged.games, vec![master.games[0].clone()]);
    assert_eq!(result.statistics.master_filtered_games, vec![master.games[1].clone()]);
}

#[test]
fn folders_are_merged_not_filtered() {
    let master = GameList::new(
        None,
        vec![
            Folder::new()
                .with_id("1")
                .with_name("Folder")
                .with_image("./master-image.png")
                .with_path("./folder"),
        ],
        Vec::new(),
    );
    let secondary = GameList::new(
        None,
        vec![
            Folder::new()
                .with_id("2")
                .with_source("ScreenScraper")
                .with_description("Folder description")
                .with_path("./folder"),
            Folder::new().with_name("Other").with_path("./other"),
        ],
        Vec::new(),
    );
    let reject_all = compile(&FilterConfig::default().include(FilterRule::new(
        FilterProperty::Name,
        FilterOperation::HasValue,
        Vec::<String>::new(),
    )));
    let result = merge(&master, &secondary, &reject_all);

    assert_eq!(result.merged.folders.len(), 2);
    let merged = &result.merged.folders[0];
    assert_eq!(merged.id.as_deref(), Some("1"));
    assert_eq!(merged.description.as_deref(), Some("Folder description"));
    assert_eq!(merged.source.as_deref(), Some("ScreenScraper"));
    assert_eq!(merged.image.as_deref(), Some("./master-image.png"));
}

#[test]
fn master_provider_is_kept() {
    let master = GameList::new(
        Some(Provider::new().with_system("Big Boy").with_software("SomeScraper")),
        Vec::new(),
        Vec::new(),
    );
    let secondary = GameList::new(
        Some(Provider::new().with_system("Other")),
        Vec::new(),
        Vec::new(),
    );
    let result = merge(&master, &secondary, &GameFilter::accept_all());
    let provider = result.merged.provider.unwrap();
    assert_eq!(provider.system.as_deref(), Some("Big Boy"));
    assert_eq!(provider.software.as_deref(), Some("SomeScraper"));

    let result = merge(&GameList::default(), &secondary, &GameFilter::accept_all());
    assert!(result.merged.provider.is_none());
}

#[test]
fn preference_is_applied_to_matched_pairs() {
    let master = games(vec![
        game("1", "Master Game", "./game1.rom")
            .with_image("./master-image.png")
            .with_thumbnail("./master-thumb.png"),
    ]);
    let secondary = games(vec![
        game("1", "Secondary Game", "./game1.zip")
            .with_image("./secondary-image.png")
            .with_thumbnail("./secondary-thumb.png"),
    ]);
    let prefer_secondary = |_: &Game, _: &Game| Some(Preferred::Secondary);
    let result = merge_game_lists(
        &master,
        &secondary,
        GameComparers::by_id_then_path(),
        FolderComparer::ByPath,
        &GameFilter::accept_all(),
        &prefer_secondary,
    );

    assert_eq!(result.merged.games.len(), 1);
    let merged = &result.merged.games[0];
    assert_eq!(merged.path.as_deref(), Some("./game1.zip"));
    assert_eq!(merged.image.as_deref(), Some("./secondary-image.png"));
    assert_eq!(merged.thumbnail.as_deref(), Some("./secondary-thumb.png"));
    assert_eq!(merged.name.as_deref(), Some("Master Game"));
}

#[test]
fn comparer_map_requires_matching_hash_bucket() {
    // Equal through the path fallback, but the first record hashes by its
    // hash field, so a keyed lookup never sees the second one as a match.
    let comparer = GameComparers::default_comparer();
    let with_hash = Game::new().with_hash("ABCD").with_path("./game.rom");
    let path_only = Game::new().with_path("./game.rom");
    assert!(comparer.equals(&with_hash, &path_only));

    let mut map = ComparerMap::new(&comparer);
    map.insert(with_hash);
    assert!(map.get(&path_only).is_none());
    assert!(!map.merge_or_insert(path_only, |a, _| a.clone()));
    assert_eq!(map.len(), 2);
}

#[test]
fn comparer_map_keeps_first_inserted_key() {
    let comparer = CompositeComparerBuilder::new().by_id().build().unwrap();
    let mut map = ComparerMap::new(comparer);
    map.insert(Game::new().with_id("a").with_name("one"));
    map.merge_or_insert(Game::new().with_id("A").with_name("two"), |_, b| {
        Game::new().with_id("zzz").with_name(b.name.clone().unwrap_or_default())
    });

    // The merged value carries a different id, but lookups still go through
    // the key that created the slot.
    let found = map.get(&Game::new().with_id("a")).unwrap();
    assert_eq!(found.name.as_deref(), Some("two"));
    assert!(map.get(&Game::new().with_id("zzz")).is_none());
    assert_eq!(map.into_values().len(), 1);
}

#[test]
fn duplicate_master_entries_collapse() {
    let master = games(vec![
        game("1", "Old", "./game.rom"),
        game("2", "New", "./game.rom"),
    ]);
    let result = merge(&master, &GameList::default(), &GameFilter::accept_all());
    assert_eq!(result.merged.games.len(), 1);
    assert_eq!(result.merged.games[0].name.as_deref(), Some("New"));
    assert_eq!(result.statistics.master_included_count, 2);
    assert_eq!(result.statistics.merged_game_count, 1);
}
