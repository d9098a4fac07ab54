//! Full campaign runs through the public engine API.

use std::collections::BTreeSet;

use corridor_core::commands::PlayerCommand;
use corridor_core::config::{HerdConfig, LevelConfig, LevelsConfig};
use corridor_core::constants::{ELEPHANT_SPEED, MAX_SPEED_FACTOR, WIN_SUCCESS_RATE};
use corridor_core::enums::GameState;
use corridor_core::events::GameEvent;
use corridor_sim::{SimConfig, SimulationEngine};

fn two_levels() -> LevelsConfig {
    let level = |name: &str, farms, houses| LevelConfig {
        id: None,
        name: name.to_string(),
        farms,
        houses,
        herds: vec![HerdConfig { elephants: 2 }],
    };
    LevelsConfig {
        levels: vec![level("River Crossing", 2, 1), level("Village Edge", 3, 2)],
    }
}

#[test]
fn campaign_reaches_an_end_state() {
    for seed in [1, 2, 3] {
        let mut engine = SimulationEngine::new(SimConfig {
            seed,
            levels: two_levels(),
            ..Default::default()
        });

        let mut safe = BTreeSet::new();
        let mut levels_started = 0;
        let mut last = None;
        for _ in 0..60_000 {
            if engine.game_state() == GameState::LevelTransition {
                engine.queue_command(PlayerCommand::Continue);
            }
            let snapshot = engine.tick();

            for elephant in &snapshot.elephants {
                assert!(
                    elephant.velocity.speed() <= ELEPHANT_SPEED * MAX_SPEED_FACTOR + 1e-9,
                    "seed {seed}: elephant {:?} too fast",
                    elephant.id
                );
            }
            for event in &snapshot.events {
                match event {
                    GameEvent::ReachedSafety { elephant, .. } => {
                        assert!(safe.insert(*elephant), "seed {seed}: {elephant:?} saved twice");
                    }
                    GameEvent::LevelStarted { .. } => levels_started += 1,
                    _ => {}
                }
            }
            for farm in &snapshot.farms {
                assert!(farm.damage_level <= 2);
            }

            let done = snapshot.game_state.is_terminal();
            last = Some(snapshot);
            if done {
                break;
            }
        }

        let last = last.expect("at least one tick");
        assert!(
            last.game_state.is_terminal(),
            "seed {seed}: campaign still running"
        );
        assert!(levels_started >= 1);

        let campaign = engine.campaign();
        assert_eq!(campaign.saved_total as usize, safe.len());
        if last.game_state == GameState::Won {
            assert_eq!(levels_started, 2);
            assert_eq!(campaign.saved_total + campaign.lost_total, 4);
            let rate = campaign.success_rate().unwrap_or(1.0);
            assert!(rate >= WIN_SUCCESS_RATE, "seed {seed}: won at {rate}");
        } else {
            assert!(last.loss_reason.is_some());
        }
    }
}

#[test]
fn identical_inputs_replay_identically() {
    let commands = [
        PlayerCommand::Continue,
        PlayerCommand::SelectDeterrent {
            kind: "thorny_bush".into(),
        },
        PlayerCommand::Click { x: 200.0, y: 300.0 },
    ];
    let run = || {
        let mut engine = SimulationEngine::new(SimConfig {
            seed: 99,
            levels: two_levels(),
            ..Default::default()
        });
        engine.queue_commands(commands.clone());
        (0..3000)
            .map(|_| serde_json::to_string(&engine.tick()).unwrap())
            .collect::<Vec<_>>()
    };
    assert_eq!(run(), run());
}
