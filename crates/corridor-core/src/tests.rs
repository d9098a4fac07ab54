use std::path::Path;

use crate::commands::PlayerCommand;
use crate::config::{DeterrentCatalog, LevelsConfig};
use crate::constants::TICK_MS;
use crate::enums::GameState;
use crate::error::ConfigError;
use crate::state::GameStateSnapshot;
use crate::types::{Position, SimTime, Velocity};

const LEVELS_JSON: &str = r#"{
    "levels": [
        { "id": 1, "name": "Minneriya Edge", "farms": 3, "houses": 2,
          "herds": [ { "elephants": 4 }, { "elephants": 6 } ] },
        { "name": "Paddy Belt", "farms": 5, "houses": 3,
          "herds": [ { "elephants": 8 } ] }
    ]
}"#;

const CATALOG_JSON: &str = r#"{
    "deterrents": {
        "electric_fence": { "name": "Electric Fence", "cost": 80, "effectiveness": 90,
            "duration": 60000, "range": 60, "size": 40, "blocking": true,
            "unlockLevel": 2, "description": "Solid barrier." },
        "bee_hive": { "name": "Bee Hive", "cost": 40, "effectiveness": 70,
            "duration_ms": 45000, "range": 90, "unlockLevel": 1 }
    }
}"#;

// ---- Geometry ----

#[test]
fn test_position_range_and_angle() {
    let a = Position::new(0.0, 0.0);
    let b = Position::new(3.0, 4.0);
    assert!((a.range_to(&b) - 5.0).abs() < 1e-10);

    let east = Position::new(10.0, 0.0);
    assert!(a.angle_to(&east).abs() < 1e-10);
    let south = Position::new(0.0, 10.0);
    assert!((a.angle_to(&south) - std::f64::consts::FRAC_PI_2).abs() < 1e-10);
}

#[test]
fn test_direction_to_coincident_points_is_unit() {
    let p = Position::new(7.0, 7.0);
    let dir = p.direction_to(&p);
    assert!((dir.length() - 1.0).abs() < 1e-10);
}

#[test]
fn test_position_step() {
    let mut p = Position::new(0.0, 0.0);
    p.step(&Velocity::new(20.0, -10.0), 0.5);
    assert_eq!(p, Position::new(10.0, -5.0));
}

#[test]
fn test_velocity_speed() {
    assert!((Velocity::new(3.0, 4.0).speed() - 5.0).abs() < 1e-10);
}

#[test]
fn test_sim_time_advance() {
    let mut time = SimTime::default();
    for _ in 0..125 {
        time.advance();
    }
    assert_eq!(time.tick, 125);
    assert_eq!(time.elapsed_ms, 125 * TICK_MS);
}

#[test]
fn test_terminal_states() {
    assert!(GameState::Won.is_terminal());
    assert!(GameState::Lost.is_terminal());
    assert!(!GameState::Playing.is_terminal());
    assert!(!GameState::LevelTransition.is_terminal());
    assert_eq!(GameState::default(), GameState::LevelTransition);
}

// ---- Configuration ----

#[test]
fn test_levels_parse() {
    let config = LevelsConfig::from_json(LEVELS_JSON).unwrap();
    assert_eq!(config.level_count(), 2);
    let first = config.level(0).unwrap();
    assert_eq!(first.name, "Minneriya Edge");
    assert_eq!(first.herds.len(), 2);
    assert_eq!(first.herds[1].elephants, 6);
    assert_eq!(config.level(1).unwrap().id, None);
    assert!(config.level(2).is_none());
}

#[test]
fn test_levels_rejects_empty_and_herdless() {
    let empty = LevelsConfig::from_json(r#"{ "levels": [] }"#);
    assert!(matches!(empty, Err(ConfigError::Invalid(_))));

    let herdless = LevelsConfig::from_json(
        r#"{ "levels": [ { "name": "x", "farms": 1, "houses": 1, "herds": [] } ] }"#,
    );
    assert!(matches!(herdless, Err(ConfigError::Invalid(_))));

    let garbage = LevelsConfig::from_json("not json");
    assert!(matches!(garbage, Err(ConfigError::Parse(_))));
}

#[test]
fn test_levels_missing_file_falls_back() {
    let config = LevelsConfig::load_or_default(Path::new("/nonexistent/levels.json"));
    assert_eq!(config, LevelsConfig::default());
    assert_eq!(config.level_count(), 1);
    let herd_sizes: Vec<u32> = config.levels[0].herds.iter().map(|h| h.elephants).collect();
    assert_eq!(herd_sizes, vec![8, 10, 12]);
}

#[test]
fn test_catalog_parse_accepts_duration_alias() {
    let catalog = DeterrentCatalog::from_json(CATALOG_JSON).unwrap();
    let fence = catalog.get("electric_fence").unwrap();
    assert_eq!(fence.duration_ms, 60_000);
    assert!(fence.blocking);
    assert_eq!(fence.unlock_level, 2);

    let hive = catalog.get("bee_hive").unwrap();
    assert_eq!(hive.duration_ms, 45_000);
    assert_eq!(hive.size, 30.0, "size defaults when omitted");
    assert!(!hive.blocking);
    assert!(hive.description.is_empty());
}

#[test]
fn test_catalog_unlocks() {
    let catalog = DeterrentCatalog::from_json(CATALOG_JSON).unwrap();
    let level_one: Vec<&str> = catalog.available(1).map(|(k, _)| k).collect();
    assert_eq!(level_one, vec!["bee_hive"]);
    let level_two: Vec<&str> = catalog.available(2).map(|(k, _)| k).collect();
    assert_eq!(level_two, vec!["bee_hive", "electric_fence"]);
    let new_at_two: Vec<&str> = catalog.unlocked_at(2).map(|(k, _)| k).collect();
    assert_eq!(new_at_two, vec!["electric_fence"]);
}

#[test]
fn test_catalog_rejects_effectiveness_over_100() {
    let bad = r#"{ "deterrents": { "x": { "name": "X", "cost": 1, "effectiveness": 150,
        "duration": 1000, "range": 10 } } }"#;
    assert!(matches!(
        DeterrentCatalog::from_json(bad),
        Err(ConfigError::Invalid(_))
    ));
}

#[test]
fn test_catalog_missing_file_falls_back() {
    let catalog = DeterrentCatalog::load_or_default(Path::new("/nonexistent/deterrents.json"));
    assert_eq!(catalog, DeterrentCatalog::default());
    assert!(catalog.get("thorny_bush").is_some());
}

#[test]
fn test_shipped_configs_parse() {
    let levels = LevelsConfig::from_json(include_str!("../../../config/levels.json")).unwrap();
    assert_eq!(levels.level_count(), 4);
    assert!(levels.levels.iter().all(|level| !level.herds.is_empty()));

    let catalog =
        DeterrentCatalog::from_json(include_str!("../../../config/deterrents.json")).unwrap();
    assert_eq!(catalog.available(1).count(), 2);
    for level in 1..=levels.level_count() {
        assert!(catalog.available(level).count() > 0);
    }
    let blocking: Vec<&str> = catalog
        .deterrents
        .iter()
        .filter(|(_, spec)| spec.blocking)
        .map(|(kind, _)| kind.as_str())
        .collect();
    assert_eq!(blocking, vec!["electric_fence", "trench"]);
}

// ---- Wire formats ----

#[test]
fn test_command_tagging() {
    let json = serde_json::to_string(&PlayerCommand::Click { x: 1.0, y: 2.0 }).unwrap();
    assert!(json.contains(r#""type":"click""#), "got {json}");
    let back: PlayerCommand = serde_json::from_str(r#"{"type":"continue"}"#).unwrap();
    assert_eq!(back, PlayerCommand::Continue);
}

#[test]
fn test_snapshot_serde() {
    let snapshot = GameStateSnapshot::default();
    let json = serde_json::to_string(&snapshot).unwrap();
    let back: GameStateSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back.game_state, GameState::LevelTransition);
    assert!(json.contains(r#""game_state":"level_transition""#));
    assert!(
        json.len() < 1024,
        "Empty snapshot should be <1KB, was {} bytes",
        json.len()
    );
}
