//! End-to-end runs through the public engine API with the built-in catalog.

use arena_sim::catalog;
use arena_sim::core::commands::HostCommand;
use arena_sim::core::config::ConfigRepository;
use arena_sim::core::enums::GamePhase;
use arena_sim::core::events::GameEvent;
use arena_sim::core::state::GameStateSnapshot;
use arena_sim::{SimConfig, SimulationEngine};

const DT: f64 = 1.0 / 60.0;

/// Drive a run, circling the arena and always taking the first upgrade.
fn play(engine: &mut SimulationEngine, ticks: usize) -> Vec<GameStateSnapshot> {
    let mut snapshots = Vec::with_capacity(ticks);
    for i in 0..ticks {
        let angle = i as f64 * 0.01;
        engine.queue_command(HostCommand::SetMoveInput {
            x: angle.cos(),
            y: angle.sin(),
        });
        let snap = engine.tick(DT);
        if snap.phase == GamePhase::ChoosingUpgrade {
            engine.queue_command(HostCommand::ChooseUpgrade {
                choice: snap.upgrade_options[0].choice.clone(),
            });
        }
        snapshots.push(snap);
    }
    snapshots
}

#[test]
fn full_run_keeps_invariants() {
    let mut engine = SimulationEngine::new(SimConfig::default(), catalog::builtin());
    engine.queue_command(HostCommand::Start {
        hero_id: "KASSANDRA".into(),
    });

    let snapshots = play(&mut engine, 3600);
    let mut game_overs = 0;
    for snap in &snapshots {
        if let Some(player) = &snap.player {
            assert!(
                player.hp >= 0.0 && player.hp <= player.max_hp,
                "hp {} outside [0, {}]",
                player.hp,
                player.max_hp
            );
            for weapon in &player.weapons {
                assert!(weapon.level <= weapon.max_level, "{weapon:?} over max level");
            }
            assert!(player.weapons.len() <= 4);
        }
        if snap.phase == GamePhase::ChoosingUpgrade {
            assert!(!snap.upgrade_options.is_empty());
        }
        game_overs += snap
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
    }
    assert!(game_overs <= 1, "Game over is reported at most once");

    let last = snapshots.last().unwrap();
    assert!(last.time.elapsed_secs > 0.0);
    if last.phase == GamePhase::GameOver {
        assert_eq!(game_overs, 1);
    }
}

#[test]
fn enemies_spawn_during_first_stage() {
    let mut engine = SimulationEngine::new(SimConfig::default(), catalog::builtin());
    engine.queue_command(HostCommand::Start {
        hero_id: "ARTHUR".into(),
    });
    // Level 1 spawns its first ghoul after 2 seconds.
    let snapshots = play(&mut engine, 150);
    assert!(
        snapshots.iter().any(|s| !s.enemies.is_empty()),
        "Expected at least one enemy within 2.5 seconds"
    );
}

#[test]
fn json_catalog_matches_builtin() {
    let json = serde_json::to_string(&catalog::builtin()).unwrap();
    let loaded = ConfigRepository::from_json(&json).unwrap();

    let mut engine_a = SimulationEngine::new(SimConfig::default(), catalog::builtin());
    let mut engine_b = SimulationEngine::new(SimConfig::default(), loaded);
    for engine in [&mut engine_a, &mut engine_b] {
        engine.queue_command(HostCommand::Start {
            hero_id: "KASSANDRA".into(),
        });
    }

    let a = play(&mut engine_a, 600);
    let b = play(&mut engine_b, 600);
    for (snap_a, snap_b) in a.iter().zip(&b) {
        assert_eq!(
            serde_json::to_string(snap_a).unwrap(),
            serde_json::to_string(snap_b).unwrap(),
            "Loaded catalog diverged from the built-in one"
        );
    }
}

#[test]
fn restart_then_start_again() {
    let mut engine = SimulationEngine::new(SimConfig::default(), catalog::builtin());
    engine.queue_command(HostCommand::Start {
        hero_id: "KASSANDRA".into(),
    });
    play(&mut engine, 120);

    engine.queue_command(HostCommand::Restart);
    let snap = engine.tick(DT);
    assert_eq!(snap.phase, GamePhase::HeroSelection);
    assert_eq!(snap.kill_count, 0);

    engine.queue_command(HostCommand::Start {
        hero_id: "ARTHUR".into(),
    });
    let snap = engine.tick(DT);
    assert_eq!(snap.phase, GamePhase::Playing);
    assert_eq!(snap.player.unwrap().hero_id, "ARTHUR");
    assert_eq!(snap.time.tick, 1);
}
