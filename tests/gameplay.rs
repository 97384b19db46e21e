use skog::{
    actor::move_actor,
    config::GameConfig,
    engine::{EngineBuilder, PlayerCommand},
    harvest::chop,
    map::{load_map, parse_map},
    roamer::{roam, RoamOutcome},
    Coordinate, Direction, GameState, TileContent, TreeState,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn game(map: &str) -> GameState {
    GameState::new(parse_map(map), 100)
}

fn quiet_config() -> GameConfig {
    let mut config = GameConfig::default();
    config.growth.seed_creation_chance = 0.0;
    config.growth.seed_to_sapling = 0.0;
    config.growth.sapling_to_adult = 0.0;
    config
}

#[test]
fn player_stops_in_front_of_wall() {
    let mut state = game("p..#");
    assert_eq!(state.player.position, Coordinate::new(0, 0));
    assert_eq!(state.grid.occupant(Coordinate::new(3, 0)), TileContent::Wall);

    for _ in 0..3 {
        move_actor(&state.grid, &mut state.player, Direction::Right, 1);
    }
    assert_eq!(state.player.position, Coordinate::new(2, 0));
}

#[test]
fn player_stops_in_front_of_wall_through_engine() {
    let config = quiet_config();
    let mut engine = EngineBuilder::standard(&config, 1).build();
    let mut state = game("p..#");
    for _ in 0..3 {
        engine
            .step(&mut state, Some(PlayerCommand::Move(Direction::Right)))
            .unwrap();
    }
    assert_eq!(state.player.position, Coordinate::new(2, 0));
}

#[test]
fn adult_chopped_four_times_is_removed() {
    let mut state = game("p.");
    let target = Coordinate::new(1, 0);
    state
        .grid
        .set_occupant(target, TileContent::Tree(TreeState::Adult));

    let expected = [
        TileContent::Tree(TreeState::Trunk),
        TileContent::Tree(TreeState::Stump),
        TileContent::Tree(TreeState::Stumpling),
        TileContent::Empty,
    ];
    for want in expected {
        assert_eq!(chop(&mut state, Direction::Right, 1), 1);
        assert_eq!(state.grid.occupant(target), want);
    }
    assert!(state.grid.is_plantable(target));
    assert!(!state.grid.is_occupied(target));
    assert_eq!(state.player.score, 1);
}

#[test]
fn omni_chop_hits_only_the_adult() {
    let mut state = game("...\n.p.\n...");
    state
        .grid
        .set_occupant(Coordinate::new(1, 0), TileContent::Tree(TreeState::Sapling));
    state
        .grid
        .set_occupant(Coordinate::new(2, 1), TileContent::Tree(TreeState::Adult));
    state
        .grid
        .set_occupant(Coordinate::new(1, 2), TileContent::Tree(TreeState::Seed));

    chop(&mut state, Direction::Omni, 1);

    assert_eq!(
        state.grid.occupant(Coordinate::new(2, 1)),
        TileContent::Tree(TreeState::Trunk)
    );
    assert_eq!(
        state.grid.occupant(Coordinate::new(1, 0)),
        TileContent::Tree(TreeState::Sapling)
    );
    assert_eq!(
        state.grid.occupant(Coordinate::new(1, 2)),
        TileContent::Tree(TreeState::Seed)
    );
    assert_eq!(state.grid.occupant(Coordinate::new(0, 1)), TileContent::Empty);
    assert_eq!(state.player.score, 1);
}

#[test]
fn chopping_bare_tiles_changes_nothing() {
    let mut state = game("#p.\n.w.");
    for direction in [
        Direction::Left,
        Direction::Right,
        Direction::Down,
        Direction::Up,
        Direction::Omni,
    ] {
        assert_eq!(chop(&mut state, direction, 1), 0);
    }
    assert_eq!(state.player.score, 0);
    assert_eq!(state.grid.occupant(Coordinate::new(0, 0)), TileContent::Wall);
    assert_eq!(state.grid.occupant(Coordinate::new(2, 0)), TileContent::Empty);
    assert_eq!(
        state.grid.occupant(Coordinate::new(1, 1)),
        TileContent::WaterLight
    );
}

#[test]
fn roamer_plants_once_adjacent_then_retargets() {
    let mut state = game("....\n.s..\n....");
    let destination = Coordinate::new(1, 0);
    state.roamer.destination = Some(destination);
    let mut rng = ChaCha8Rng::seed_from_u64(12);

    let outcome = roam(&mut state, 16, &mut rng);
    assert!(matches!(outcome, RoamOutcome::Planted { planted: true, .. }));
    assert_eq!(
        state.grid.occupant(destination),
        TileContent::Tree(TreeState::Seed)
    );
    assert_eq!(state.grid.count_trees(TreeState::Seed), 1);
    let next = state.roamer.destination.expect("new destination");
    assert_ne!(next, destination);
}

#[test]
fn roamer_keeps_planting_over_time() {
    let config = quiet_config();
    let mut engine = EngineBuilder::standard(&config, 99).build();
    let mut state = game("##########\n#s.......#\n#........#\n#........#\n##########");
    engine.run(&mut state, 200).unwrap();

    assert!(state.roamer_plantings() > 0);
    assert_eq!(
        state.grid.count_trees(TreeState::Seed) as u64,
        state.roamer_plantings()
    );
}

#[test]
fn same_seed_same_forest() {
    let mut config = GameConfig::default();
    config.growth.seed_creation_chance = 0.2;
    config.growth.seed_to_sapling = 0.2;
    config.growth.sapling_to_adult = 0.2;
    let map = "..........\n..s.......\n....##....\n.......p..";

    let run = |seed| {
        let mut engine = EngineBuilder::standard(&config, seed).build();
        let mut state = game(map);
        engine.run(&mut state, 150).unwrap();
        (
            state.roamer.position,
            state.grid.tree_coordinates(),
            state.grid.count_trees(TreeState::Adult),
        )
    };

    assert_eq!(run(5), run(5));
}

#[test]
fn load_map_reads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tiny.map");
    std::fs::write(&path, "p..#\n..s\n").unwrap();

    let map = load_map(&path).unwrap();
    assert_eq!(map.grid.width(), 4);
    assert_eq!(map.grid.height(), 2);
    assert_eq!(map.player_start, Coordinate::new(0, 0));
    assert_eq!(map.roamer_start, Coordinate::new(2, 1));
}

#[test]
fn empty_map_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.map");
    std::fs::write(&path, "").unwrap();
    assert!(load_map(&path).is_err());
}

#[test]
fn config_file_overrides_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("skog.yaml");
    std::fs::write(
        &path,
        "simulation:\n  tick_ms: 50\n  seed: 7\nharvest:\n  chop_award: 2\n",
    )
    .unwrap();

    let config = GameConfig::load(&path).unwrap();
    assert_eq!(config.simulation.tick_ms, 50);
    assert_eq!(config.simulation.seed, Some(7));
    assert_eq!(config.harvest.chop_award, 2);
    assert_eq!(config.growth.seed_creation_max, 3);
}

#[test]
fn invalid_config_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.yaml");
    std::fs::write(&path, "growth:\n  seed_to_sapling: 2.0\n").unwrap();
    let message = format!("{:#}", GameConfig::load(&path).unwrap_err());
    assert!(message.contains("bad.yaml"), "{message}");
    assert!(message.contains("growth.seed_to_sapling"), "{message}");
}

#[test]
fn unparseable_config_file_names_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.yaml");
    std::fs::write(&path, "simulation: [not, a, map]\n").unwrap();
    let message = format!("{:#}", GameConfig::load(&path).unwrap_err());
    assert!(message.contains("broken.yaml"), "{message}");
    assert!(message.contains("Failed to parse configuration"), "{message}");
}

#[test]
fn shipped_maps_and_config_load() {
    let root = env!("CARGO_MANIFEST_DIR");
    let config = GameConfig::load(format!("{root}/config/skog.yaml")).unwrap();
    for name in ["forest", "glade"] {
        let map = load_map(format!("{root}/maps/{name}.{}", config.maps.extension)).unwrap();
        assert!(!map.grid.is_blocked(map.player_start), "{name} player start");
        assert!(!map.grid.is_blocked(map.roamer_start), "{name} roamer start");
    }
}
