use super::*;

fn master_game() -> Game {
    Game::new()
        .with_id("1")
        .with_name("Master Game")
        .with_description("Master description")
        .with_path("./game1.rom")
        .with_image("./master-image.png")
        .with_thumbnail("./master-thumb.png")
        .with_rating("0.8")
}

fn secondary_game() -> Game {
    Game::new()
        .with_id("99")
        .with_name("Secondary Game")
        .with_path("./game1.zip")
        .with_image("./secondary-image.png")
        .with_thumbnail("./secondary-thumb.png")
        .with_developer("Test Developer")
        .with_rating("0.5")
}

#[test]
fn folder_master_wins_and_fills_gaps() {
    let master = Folder::new()
        .with_id("1")
        .with_name("Folder")
        .with_image("./master-image.png")
        .with_path("./folder");
    let secondary = Folder::new()
        .with_id("2")
        .with_source("ScreenScraper")
        .with_description("Folder description")
        .with_thumbnail("./thumb.png")
        .with_image("./secondary-image.png")
        .with_path("./folder");

    let merged = merge_folder(&master, &secondary);
    assert_eq!(merged.id.as_deref(), Some("1"));
    assert_eq!(merged.name.as_deref(), Some("Folder"));
    assert_eq!(merged.image.as_deref(), Some("./master-image.png"));
    assert_eq!(merged.description.as_deref(), Some("Folder description"));
    assert_eq!(merged.thumbnail.as_deref(), Some("./thumb.png"));
    assert_eq!(merged.source.as_deref(), Some("ScreenScraper"));
    assert_eq!(merged.path.as_deref(), Some("./folder"));
}

#[test]
fn folder_empty_master_fields_fall_back() {
    let master = Folder {
        id: Some("m".into()),
        name: Some(String::new()),
        description: Some(String::new()),
        ..Folder::default()
    };
    let secondary = Folder::new()
        .with_id("s")
        .with_name("Secondary")
        .with_description("From secondary");

    let merged = merge_folder(&master, &secondary);
    assert_eq!(merged.id.as_deref(), Some("m"));
    assert_eq!(merged.name.as_deref(), Some("Secondary"));
    assert_eq!(merged.description.as_deref(), Some("From secondary"));
}

#[test]
fn folder_id_comes_from_master_even_when_absent() {
    let master = Folder::new().with_name("A");
    let secondary = Folder::new().with_id("2").with_name("A");
    assert_eq!(merge_folder(&master, &secondary).id, None);
}

#[test]
fn folder_both_empty_stays_empty() {
    let master = Folder {
        image: Some(String::new()),
        ..Folder::default()
    };
    let merged = merge_folder(&master, &Folder::default());
    assert_eq!(merged.image, None);
    assert_eq!(merged.name, None);
}

#[test]
fn game_without_preference_uses_master_first() {
    let merged = merge_game(&master_game(), &secondary_game(), &NoPreference);
    assert_eq!(merged.id.as_deref(), Some("1"));
    assert_eq!(merged.name.as_deref(), Some("Master Game"));
    assert_eq!(merged.path.as_deref(), Some("./game1.rom"));
    assert_eq!(merged.image.as_deref(), Some("./master-image.png"));
    assert_eq!(merged.thumbnail.as_deref(), Some("./master-thumb.png"));
    assert_eq!(merged.rating.as_deref(), Some("0.8"));
    assert_eq!(merged.developer.as_deref(), Some("Test Developer"));
}

#[test]
fn game_without_preference_fills_each_media_field_independently() {
    let master = Game::new().with_path("./game.rom").with_image("");
    let secondary = Game::new()
        .with_path("./game.zip")
        .with_image("./s.png")
        .with_thumbnail("./s-thumb.png");

    let merged = merge_game(&master, &secondary, &NoPreference);
    assert_eq!(merged.path.as_deref(), Some("./game.rom"));
    assert_eq!(merged.image.as_deref(), Some("./s.png"));
    assert_eq!(merged.thumbnail.as_deref(), Some("./s-thumb.png"));
}

#[test]
fn game_preferring_secondary_takes_its_media_trio() {
    let prefer_secondary = |_: &Game, _: &Game| Some(Preferred::Secondary);
    let merged = merge_game(&master_game(), &secondary_game(), &prefer_secondary);

    assert_eq!(merged.path.as_deref(), Some("./game1.zip"));
    assert_eq!(merged.image.as_deref(), Some("./secondary-image.png"));
    assert_eq!(merged.thumbnail.as_deref(), Some("./secondary-thumb.png"));
    assert_eq!(merged.name.as_deref(), Some("Master Game"));
    assert_eq!(merged.description.as_deref(), Some("Master description"));
    assert_eq!(merged.rating.as_deref(), Some("0.8"));
    assert_eq!(merged.developer.as_deref(), Some("Test Developer"));
}

#[test]
fn game_preferred_side_values_are_taken_verbatim() {
    let secondary = Game::new().with_path("./game1.zip").with_image("");
    let prefer_secondary = |_: &Game, _: &Game| Some(Preferred::Secondary);
    let merged = merge_game(&master_game(), &secondary, &prefer_secondary);

    assert_eq!(merged.path.as_deref(), Some("./game1.zip"));
    assert_eq!(merged.image.as_deref(), Some(""));
    assert_eq!(merged.thumbnail, None);
    assert_eq!(merged.name.as_deref(), Some("Master Game"));
}

#[test]
fn game_preferring_master_takes_its_media_trio() {
    let master = Game::new().with_path("./game1.7z");
    let prefer_master = |_: &Game, _: &Game| Some(Preferred::Master);
    let merged = merge_game(&master, &secondary_game(), &prefer_master);

    assert_eq!(merged.path.as_deref(), Some("./game1.7z"));
    assert_eq!(merged.image, None);
    assert_eq!(merged.thumbnail, None);
    assert_eq!(merged.developer.as_deref(), Some("Test Developer"));
}

#[test]
fn game_all_scalar_fields_fall_back() {
    let secondary = Game {
        source: Some("src".into()),
        name: Some("name".into()),
        description: Some("desc".into()),
        rating: Some("0.1".into()),
        release_date: Some("19900101T000000".into()),
        developer: Some("dev".into()),
        publisher: Some("pub".into()),
        genre: Some("genre".into()),
        players: Some("2".into()),
        play_count: Some("3".into()),
        last_played: Some("20200101T000000".into()),
        favorite: Some("true".into()),
        hash: Some("h".into()),
        crc32: Some("c".into()),
        lang: Some("en".into()),
        region: Some("us".into()),
        genre_id: Some("256".into()),
        ..Game::default()
    };
    let merged = merge_game(&Game::default(), &secondary, &NoPreference);
    assert_eq!(merged, Game { id: None, ..secondary });
}

#[test]
fn compressed_detection() {
    assert!(is_compressed(Some("./game.zip")));
    assert!(is_compressed(Some("./game.ZIP")));
    assert!(is_compressed(Some("./dir/game (USA).7z")));
    assert!(!is_compressed(Some("./game.rom")));
    assert!(!is_compressed(Some("   ")));
    assert!(!is_compressed(Some("")));
    assert!(!is_compressed(None));
}

#[test]
fn prefer_compressed_disabled_has_no_preference() {
    let policy = PreferCompressed::new(false);
    let zip = Game::new().with_path("./a.zip");
    let rom = Game::new().with_path("./b.rom");
    assert_eq!(policy.prefer(&zip, &rom), None);
}

#[test]
fn prefer_compressed_picks_the_archive() {
    let policy = PreferCompressed::new(true);
    let zip = Game::new().with_path("./a.zip");
    let seven = Game::new().with_path("./a.7z");
    let rom = Game::new().with_path("./b.rom");
    let gb = Game::new().with_path("./b.gb");

    assert_eq!(policy.prefer(&zip, &rom), Some(Preferred::Master));
    assert_eq!(policy.prefer(&rom, &seven), Some(Preferred::Secondary));
    assert_eq!(policy.prefer(&zip, &seven), Some(Preferred::Master));
    assert_eq!(policy.prefer(&rom, &gb), Some(Preferred::Master));
}

#[test]
fn prefer_compressed_treats_blank_path_as_unknown() {
    let policy = PreferCompressed::new(true);
    let blank = Game::new().with_path(" ");
    let none = Game::new();
    let zip = Game::new().with_path("./b.zip");
    assert_eq!(policy.prefer(&blank, &zip), Some(Preferred::Secondary));
    assert_eq!(policy.prefer(&none, &zip), Some(Preferred::Secondary));
}
