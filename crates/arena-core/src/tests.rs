#[cfg(test)]
mod tests {
    use crate::commands::{HostCommand, StatBoostToken, UpgradeChoice};
    use crate::components::{DamageOutcome, Health, Projectile};
    use crate::config::{ConfigError, ConfigRepository, DefinitionKind, LevelDef};
    use crate::enums::*;
    use crate::stats::{recompute, Modifier, ModifierSource, PermanentBoosts, StatBlock, StatError};
    use crate::types::{Aabb, HalfExtents, Position};

    fn hero_base() -> StatBlock {
        StatBlock {
            max_hp: 100.0,
            move_speed: 3.0,
            attack_damage: 10.0,
            defense: 2.0,
            ..Default::default()
        }
    }

    fn relic(id: &str, modifiers: Vec<Modifier>) -> ModifierSource {
        ModifierSource {
            id: id.to_string(),
            kind: SourceKind::Relic,
            modifiers,
        }
    }

    fn skill(id: &str, modifiers: Vec<Modifier>) -> ModifierSource {
        ModifierSource {
            id: id.to_string(),
            kind: SourceKind::Skill,
            modifiers,
        }
    }

    // ---- Damage intake ----

    #[test]
    fn test_take_damage_reduces_and_kills_once() {
        let mut health = Health::new(30.0);
        assert_eq!(
            health.take_damage(8.0, 0.0, 1.0),
            DamageOutcome::Damaged { amount: 8.0 }
        );
        assert_eq!(health.hp, 22.0);

        assert_eq!(
            health.take_damage(25.0, 0.0, 1.0),
            DamageOutcome::Killed { amount: 25.0 }
        );
        assert_eq!(health.hp, 0.0, "health must clamp at zero");
        assert!(!health.alive);

        assert_eq!(
            health.take_damage(25.0, 0.0, 1.0),
            DamageOutcome::Ignored,
            "a dead actor must not report death twice"
        );
        assert_eq!(health.hp, 0.0);
    }

    #[test]
    fn test_take_damage_minimum_one() {
        let mut health = Health::new(50.0);
        health.take_damage(3.0, 10.0, 1.0);
        assert_eq!(health.hp, 49.0, "defense above damage still deals 1");
    }

    #[test]
    fn test_take_damage_applies_multiplier_after_defense() {
        let mut health = Health::new(100.0);
        health.take_damage(12.0, 2.0, 1.5);
        assert!((health.hp - 85.0).abs() < 1e-9);
    }

    #[test]
    fn test_heal_clamps_to_max_and_ignores_dead() {
        let mut health = Health::new(40.0);
        health.take_damage(10.0, 0.0, 1.0);
        assert_eq!(health.heal(25.0), 10.0);
        assert_eq!(health.hp, 40.0);

        health.take_damage(100.0, 0.0, 1.0);
        assert_eq!(health.heal(10.0), 0.0);
        assert!(!health.alive);
    }

    #[test]
    fn test_set_max_hp_clamps_current() {
        let mut health = Health::new(100.0);
        health.set_max_hp(60.0);
        assert_eq!(health.hp, 60.0);
        health.set_max_hp(80.0);
        assert_eq!(health.hp, 60.0, "raising max must not heal");
    }

    // ---- Projectile hit resolution ----

    #[test]
    fn test_projectile_pierce_then_deactivate() {
        let mut projectile = Projectile::new(Owner::Player, 5.0, 1.0, 1);
        projectile.register_hit(1);
        assert!(projectile.active);
        assert_eq!(projectile.pierce, 0);
        projectile.register_hit(2);
        assert!(!projectile.active);
        assert!(projectile.hit_entities.contains(&1) && projectile.hit_entities.contains(&2));
    }

    // ---- Overlap ----

    #[test]
    fn test_aabb_touching_does_not_overlap() {
        let a = Aabb::new(Position::new(0.0, 0.0), HalfExtents::new(10.0, 10.0));
        let b = Aabb::new(Position::new(25.0, 0.0), HalfExtents::new(15.0, 10.0));
        assert!(!a.overlaps(&b), "exactly touching boxes must not overlap");

        let c = Aabb::new(Position::new(24.0, 0.0), HalfExtents::new(15.0, 10.0));
        assert!(a.overlaps(&c), "one unit closer must overlap");
    }

    #[test]
    fn test_aabb_padding_extends_reach() {
        let a = Aabb::new(Position::new(0.0, 0.0), HalfExtents::new(5.0, 5.0));
        let b = Aabb::new(Position::new(40.0, 0.0), HalfExtents::new(5.0, 5.0));
        assert!(!a.overlaps(&b));
        assert!(a.overlaps_padded(&b, 31.0));
        assert!(!a.overlaps_padded(&b, 30.0));
    }

    // ---- Stat pipeline ----

    #[test]
    fn test_recompute_idempotent() {
        let base = hero_base();
        let mut boosts = PermanentBoosts::new(&base);
        boosts
            .apply(&base, &Modifier::new(StatKind::MaxHp, 0.05, ModifierOp::PercentageBase))
            .unwrap();
        let sources = vec![
            relic(
                "order",
                vec![
                    Modifier::new(StatKind::MoveSpeed, 0.10, ModifierOp::PercentageAdd),
                    Modifier::new(StatKind::DamageTakenMultiplier, 0.08, ModifierOp::PercentageAdd),
                ],
            ),
            skill(
                "might",
                vec![Modifier::new(StatKind::AttackDamage, 0.05, ModifierOp::PercentageAdd)],
            ),
        ];

        let first = recompute(&base, &boosts, &sources);
        let second = recompute(&base, &boosts, &sources);
        assert_eq!(first, second);
        assert_eq!(
            first.stats.max_hp.to_bits(),
            second.stats.max_hp.to_bits(),
            "recompute must be bit-identical"
        );
    }

    #[test]
    fn test_percentage_base_uses_unboosted_hero_value() {
        let base = hero_base();
        let mut boosts = PermanentBoosts::new(&base);
        let boost = Modifier::new(StatKind::MaxHp, 0.10, ModifierOp::PercentageBase);
        assert_eq!(boosts.apply(&base, &boost).unwrap(), 10.0);
        assert_eq!(boosts.apply(&base, &boost).unwrap(), 10.0, "not compounding");
        assert_eq!(boosts.base().max_hp, 120.0);
        assert_eq!(boosts.history().len(), 2);

        // A percentage_base modifier on top of a percentage_add one still
        // adds a fraction of the unboosted hero value.
        let sources = vec![skill(
            "tough",
            vec![
                Modifier::new(StatKind::MaxHp, 0.5, ModifierOp::PercentageAdd),
                Modifier::new(StatKind::MaxHp, 0.10, ModifierOp::PercentageBase),
            ],
        )];
        let current = recompute(&base, &boosts, &sources);
        assert_eq!(current.stats.max_hp, 120.0 * 1.5 + 10.0);
    }

    #[test]
    fn test_boost_rejects_percentage_add_and_damage_taken() {
        let base = hero_base();
        let mut boosts = PermanentBoosts::new(&base);
        let err = boosts
            .apply(&base, &Modifier::new(StatKind::Defense, 0.1, ModifierOp::PercentageAdd))
            .unwrap_err();
        assert_eq!(err, StatError::UnsupportedBoostOp(ModifierOp::PercentageAdd));
        let err = boosts
            .apply(&base, &Modifier::new(StatKind::DamageTakenMultiplier, 0.1, ModifierOp::FlatAdd))
            .unwrap_err();
        assert_eq!(err, StatError::UnboostableStat(StatKind::DamageTakenMultiplier));
        assert_eq!(boosts.base(), &base, "failed boosts leave the base untouched");
    }

    #[test]
    fn test_relics_apply_grouped_by_stat_before_skills() {
        let base = hero_base();
        let boosts = PermanentBoosts::new(&base);
        // Relic A: speed flat +1, damage x2. Relic B: speed x2.
        // Grouped: speed (A flat, B pct) then damage. Then skill flat +1 speed.
        let sources = vec![
            relic(
                "a",
                vec![
                    Modifier::new(StatKind::MoveSpeed, 1.0, ModifierOp::FlatAdd),
                    Modifier::new(StatKind::AttackDamage, 1.0, ModifierOp::PercentageAdd),
                ],
            ),
            skill(
                "s",
                vec![Modifier::new(StatKind::MoveSpeed, 1.0, ModifierOp::FlatAdd)],
            ),
            relic(
                "b",
                vec![Modifier::new(StatKind::MoveSpeed, 1.0, ModifierOp::PercentageAdd)],
            ),
        ];
        let current = recompute(&base, &boosts, &sources);
        assert_eq!(current.stats.move_speed, (3.0 + 1.0) * 2.0 + 1.0);
        assert_eq!(current.stats.attack_damage, 20.0);
    }

    #[test]
    fn test_damage_taken_multiplier_is_multiplicative() {
        let base = hero_base();
        let boosts = PermanentBoosts::new(&base);
        let sources = vec![
            relic(
                "a",
                vec![Modifier::new(StatKind::DamageTakenMultiplier, 0.5, ModifierOp::PercentageAdd)],
            ),
            relic(
                "b",
                vec![Modifier::new(StatKind::DamageTakenMultiplier, -0.5, ModifierOp::FlatAdd)],
            ),
        ];
        let current = recompute(&base, &boosts, &sources);
        assert!((current.damage_taken_multiplier - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_cooldown_floor() {
        let base = hero_base();
        let boosts = PermanentBoosts::new(&base);
        let sources = vec![skill(
            "haste",
            vec![Modifier::new(StatKind::Cooldown, -5.0, ModifierOp::FlatAdd)],
        )];
        let current = recompute(&base, &boosts, &sources);
        assert_eq!(current.stats.cooldown, crate::constants::MIN_COOLDOWN_MULTIPLIER);
    }

    // ---- Configuration ----

    #[test]
    fn test_missing_definition_error() {
        let repo = ConfigRepository::default();
        match repo.enemy("nope") {
            Err(ConfigError::MissingDefinition { kind, id }) => {
                assert_eq!(kind, DefinitionKind::Enemy);
                assert_eq!(id, "nope");
            }
            other => panic!("expected MissingDefinition, got {other:?}"),
        }
    }

    #[test]
    fn test_xp_threshold_fallback_growth() {
        let mut repo = ConfigRepository::default();
        repo.levels.insert(
            2,
            LevelDef {
                xp_needed: Some(150),
                ..Default::default()
            },
        );
        assert_eq!(repo.initial_xp_threshold(), crate::constants::DEFAULT_FIRST_XP_THRESHOLD);
        assert_eq!(repo.xp_threshold(2, 100), 150);
        assert_eq!(repo.xp_threshold(3, 150), 187, "floor(150 * 1.25)");
    }

    #[test]
    fn test_next_level_skips_gaps() {
        let mut repo = ConfigRepository::default();
        for level in [1, 2, 5] {
            repo.levels.insert(level, LevelDef::default());
        }
        assert_eq!(repo.first_level(), Some(1));
        assert_eq!(repo.next_level_after(2), Some(5));
        assert_eq!(repo.next_level_after(5), None);
    }

    #[test]
    fn test_repository_from_json() {
        let json = r#"{
            "enemies": {
                "ghoul": {
                    "id": "ghoul",
                    "name": "Ghoul",
                    "stats": { "max_hp": 30, "move_speed": 1.5, "attack_damage": 8, "collision_damage": 8 },
                    "loot_table": { "xp_orb_small": 0.5 },
                    "width": 38,
                    "height": 38
                }
            },
            "levels": {
                "1": {
                    "xp_needed": 100,
                    "enemy_groups": [{ "enemy_id": "ghoul", "count": 5, "spawn_delay_secs": 2 }],
                    "completion": "AfterDuration",
                    "duration_secs": 60
                }
            }
        }"#;
        let repo = ConfigRepository::from_json(json).unwrap();
        let ghoul = repo.enemy("ghoul").unwrap();
        assert_eq!(ghoul.behavior, BehaviorKind::Chase);
        assert_eq!(ghoul.stats.defense, 0.0);
        assert_eq!(repo.level(1).unwrap().completion, LevelCompletion::AfterDuration);
        assert_eq!(repo.initial_xp_threshold(), 100);
    }

    #[test]
    fn test_repository_from_json_rejects_garbage() {
        assert!(matches!(
            ConfigRepository::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    // ---- Wire shapes ----

    #[test]
    fn test_command_tagging() {
        let cmd = HostCommand::ChooseUpgrade {
            choice: UpgradeChoice::StatBoost(StatBoostToken::RecoverHealth),
        };
        let json = serde_json::to_string(&cmd).unwrap();
        assert!(json.contains("\"type\":\"ChooseUpgrade\""), "{json}");
        let back: HostCommand = serde_json::from_str(&json).unwrap();
        match back {
            HostCommand::ChooseUpgrade { choice } => {
                assert_eq!(choice, UpgradeChoice::StatBoost(StatBoostToken::RecoverHealth))
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
