use tui_platformer::core::{CollisionQuery, MapError, Tile, TileMap};
use tui_platformer::types::{CollectibleKind, ObstacleClass, Rect};
use tui_platformer::BUNDLED_LEVEL;

#[test]
fn test_item_triggers_carry_tags_and_positions() {
    let map = TileMap::parse("P.D\nROT\n###").unwrap();
    let tags: Vec<(&str, i32, i32)> = map.items().iter().map(|t| (t.tag, t.x, t.y)).collect();
    assert_eq!(
        tags,
        vec![
            ("diamond", 64, 0),
            ("ruby", 0, 32),
            ("pearl", 32, 32),
            ("trophy", 64, 32),
        ]
    );
    for t in map.items() {
        assert!(CollectibleKind::from_tag(t.tag).is_some());
    }
}

#[test]
fn test_parse_errors() {
    assert_eq!(TileMap::parse(""), Err(MapError::Empty));
    assert_eq!(TileMap::parse("; only a comment\n"), Err(MapError::Empty));
    assert_eq!(TileMap::parse("...\n###"), Err(MapError::MissingPlayerSpawn));
    assert_eq!(
        TileMap::parse("P..\n#x#"),
        Err(MapError::UnknownTile {
            line: 2,
            column: 2,
            ch: 'x'
        })
    );
}

#[test]
fn test_unknown_tile_message_names_position() {
    let err = TileMap::parse("; header\nP?").unwrap_err();
    assert_eq!(err.to_string(), "unknown tile '?' at line 2, column 2");
}

#[test]
fn test_first_spawn_wins() {
    let map = TileMap::parse(".P.P\nP...\n####").unwrap();
    assert_eq!(map.player_spawn(), (32, 0));
    assert_eq!(map.tile(3, 0), Some(Tile::Empty));
}

#[test]
fn test_query_returns_row_major_order() {
    // Two pillars and a floor; the probe touches all three.
    let map = TileMap::parse("P....\n.#.#.\n#####").unwrap();
    let probe = Rect::new(32, 40, 96, 48);
    let hits = map.collide(&probe, ObstacleClass::Blockers);
    assert_eq!(
        hits.as_slice(),
        &[
            Rect::new(32, 32, 32, 32),
            Rect::new(96, 32, 32, 32),
            Rect::new(0, 64, 160, 32),
        ]
    );
}

#[test]
fn test_touching_edges_do_not_collide() {
    let map = TileMap::parse("P\n#").unwrap();
    let standing = Rect::new(0, 0, 24, 32);
    assert!(map.collide(&standing, ObstacleClass::Blockers).is_empty());
    let sunk = Rect::new(0, 1, 24, 32);
    assert_eq!(map.collide(&sunk, ObstacleClass::Blockers).len(), 1);
}

#[test]
fn test_exit_class_is_separate_from_blockers() {
    let map = TileMap::parse("PEE\n###").unwrap();
    assert_eq!(map.exits(), &[Rect::new(32, 0, 64, 32)]);

    let probe = Rect::new(40, 0, 24, 32);
    assert_eq!(map.collide(&probe, ObstacleClass::Exit).len(), 1);
    assert!(map.collide(&probe, ObstacleClass::Blockers).is_empty());
}

#[test]
fn test_bundled_level_is_well_formed() {
    let map = TileMap::parse(BUNDLED_LEVEL).unwrap();
    let kinds: Vec<CollectibleKind> = map
        .items()
        .iter()
        .filter_map(|t| CollectibleKind::from_tag(t.tag))
        .collect();
    assert!(kinds.contains(&CollectibleKind::Trophy));
    assert_eq!(map.exits().len(), 1);
    assert_eq!(map.pixel_width(), map.cols() as i32 * 32);

    // The spawn is standing room, not inside a wall.
    let (x, y) = map.player_spawn();
    let body = Rect::new(x, y, 24, 32);
    assert!(map.collide(&body, ObstacleClass::Blockers).is_empty());
}
