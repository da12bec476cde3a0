//! Built-in content catalog.
//!
//! The default heroes, enemies, weapons, skills, relics, loot items, and
//! level timeline. Hosts with their own data load a `ConfigRepository`
//! from JSON instead.

use std::collections::BTreeMap;

use arena_core::config::*;
use arena_core::constants::DEFAULT_ORB_XP;
use arena_core::enums::*;
use arena_core::stats::{Modifier, StatBlock};

/// Build the default catalog.
pub fn builtin() -> ConfigRepository {
    let mut repo = ConfigRepository::default();
    for hero in heroes() {
        repo.heroes.insert(hero.id.clone(), hero);
    }
    for enemy in enemies() {
        repo.enemies.insert(enemy.id.clone(), enemy);
    }
    for weapon in weapons() {
        repo.weapons.insert(weapon.id.clone(), weapon);
    }
    for skill in skills() {
        repo.skills.insert(skill.id.clone(), skill);
    }
    for relic in relics() {
        repo.relics.insert(relic.id.clone(), relic);
    }
    for item in loot_items() {
        repo.loot_items.insert(item.id.clone(), item);
    }
    repo.levels = levels();
    repo
}

fn heroes() -> Vec<HeroDef> {
    vec![
        HeroDef {
            id: "KASSANDRA".into(),
            name: "Kassandra".into(),
            description: "Nimble ranger from the old forest.".into(),
            stats: StatBlock {
                max_hp: 90.0,
                move_speed: 3.0,
                attack_damage: 12.0,
                defense: 2.0,
                luck: 10.0,
                crit_chance: 0.05,
                pickup_radius: 150.0,
                ..Default::default()
            },
            initial_weapon: Some("short_bow".into()),
            initial_skills: vec![],
        },
        HeroDef {
            id: "ARTHUR".into(),
            name: "Arthur".into(),
            description: "Veteran knight holding the last line.".into(),
            stats: StatBlock {
                max_hp: 120.0,
                move_speed: 2.6,
                attack_damage: 15.0,
                defense: 5.0,
                luck: 5.0,
                crit_chance: 0.03,
                pickup_radius: 120.0,
                ..Default::default()
            },
            initial_weapon: Some("broadsword".into()),
            initial_skills: vec!["toughness_rank1".into()],
        },
    ]
}

fn loot(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
    entries.iter().map(|(id, p)| (id.to_string(), *p)).collect()
}

fn enemies() -> Vec<EnemyDef> {
    let melee = |max_hp, move_speed, attack_damage, defense, xp, collision| EnemyStatsDef {
        max_hp,
        move_speed,
        attack_damage,
        defense,
        xp_value: Some(xp),
        collision_damage: collision,
        attack_range: None,
        attack_cooldown_secs: None,
        projectile_id: None,
    };
    vec![
        EnemyDef {
            id: "ghoul_weak".into(),
            name: "Hungry Ghoul".into(),
            stats: melee(30.0, 1.5, 8.0, 0.0, 10, 8.0),
            behavior: BehaviorKind::Chase,
            loot_table: loot(&[("health_potion_small", 0.05)]),
            width: 38.0,
            height: 38.0,
            is_boss: false,
            is_elite: false,
        },
        EnemyDef {
            id: "ghoul_strong".into(),
            name: "Brute Ghoul".into(),
            stats: melee(70.0, 1.2, 15.0, 2.0, 25, 15.0),
            behavior: BehaviorKind::Chase,
            loot_table: loot(&[("health_potion_small", 0.1)]),
            width: 42.0,
            height: 42.0,
            is_boss: false,
            is_elite: false,
        },
        EnemyDef {
            id: "skeleton_archer".into(),
            name: "Skeleton Archer".into(),
            stats: EnemyStatsDef {
                attack_range: Some(300.0),
                attack_cooldown_secs: Some(2.5),
                projectile_id: Some("enemy_arrow".into()),
                ..melee(40.0, 1.0, 12.0, 1.0, 20, 5.0)
            },
            behavior: BehaviorKind::KiteRanged,
            loot_table: loot(&[("xp_orb_medium", 0.1)]),
            width: 40.0,
            height: 40.0,
            is_boss: false,
            is_elite: false,
        },
        EnemyDef {
            id: "skeleton_mage".into(),
            name: "Skeleton Mage".into(),
            stats: EnemyStatsDef {
                attack_range: Some(350.0),
                attack_cooldown_secs: Some(3.0),
                projectile_id: Some("enemy_fireball".into()),
                ..melee(60.0, 0.8, 18.0, 0.0, 35, 5.0)
            },
            behavior: BehaviorKind::StationaryRanged,
            loot_table: loot(&[("xp_orb_large", 0.08)]),
            width: 42.0,
            height: 42.0,
            is_boss: false,
            is_elite: true,
        },
        EnemyDef {
            id: "lich_king".into(),
            name: "Lich King".into(),
            stats: EnemyStatsDef {
                attack_cooldown_secs: Some(4.0),
                projectile_id: Some("enemy_fireball".into()),
                ..melee(1000.0, 1.0, 30.0, 10.0, 200, 25.0)
            },
            behavior: BehaviorKind::BossPattern,
            loot_table: loot(&[("xp_orb_large", 1.0), ("health_potion_small", 0.5)]),
            width: 80.0,
            height: 80.0,
            is_boss: true,
            is_elite: false,
        },
    ]
}

fn weapons() -> Vec<WeaponDef> {
    #[allow(clippy::too_many_arguments)]
    fn ranged(
        level: u32,
        damage: f64,
        cooldown_secs: f64,
        projectiles: u32,
        projectile_speed: f64,
        duration_secs: f64,
        area: f64,
        pierce: u32,
        effects: &[&str],
    ) -> WeaponLevelStats {
        WeaponLevelStats {
            level,
            damage,
            cooldown_secs,
            projectiles,
            projectile_speed,
            duration_secs,
            area,
            pierce,
            knockback: 0.0,
            effects: effects.iter().map(|e| e.to_string()).collect(),
        }
    }

    fn swing(
        level: u32,
        damage: f64,
        cooldown_secs: f64,
        area: f64,
        duration_secs: f64,
        knockback: f64,
        effects: &[&str],
    ) -> WeaponLevelStats {
        WeaponLevelStats {
            level,
            damage,
            cooldown_secs,
            projectiles: 1,
            projectile_speed: 0.0,
            duration_secs,
            area,
            pierce: 0,
            knockback,
            effects: effects.iter().map(|e| e.to_string()).collect(),
        }
    }

    vec![
        WeaponDef {
            id: "short_bow".into(),
            name: "Short Bow".into(),
            description: "A light bow with a quick draw.".into(),
            kind: WeaponKind::Ranged,
            max_level: 5,
            level_stats: vec![
                ranged(1, 8.0, 0.8, 1, 7.0, 1.0, 1.0, 0, &[]),
                ranged(2, 10.0, 0.75, 1, 7.5, 1.1, 1.0, 0, &[]),
                ranged(3, 12.0, 0.7, 2, 8.0, 1.2, 1.1, 0, &["spread_shot_small"]),
                ranged(4, 15.0, 0.65, 2, 8.5, 1.3, 1.1, 1, &["spread_shot_small"]),
                ranged(5, 18.0, 0.6, 3, 9.0, 1.5, 1.2, 1, &["spread_shot_medium"]),
            ],
            tags: vec!["bow".into(), "ranged".into(), "starter".into()],
        },
        WeaponDef {
            id: "broadsword".into(),
            name: "Broadsword".into(),
            description: "A sturdy blade that cleaves what stands in front.".into(),
            kind: WeaponKind::MeleeSwing,
            max_level: 5,
            level_stats: vec![
                swing(1, 15.0, 1.2, 1.5, 0.3, 0.5, &[]),
                swing(2, 18.0, 1.1, 1.6, 0.3, 0.6, &[]),
                swing(3, 22.0, 1.0, 1.7, 0.35, 0.7, &["cleave"]),
                swing(4, 27.0, 0.9, 1.8, 0.35, 0.8, &["cleave"]),
                swing(5, 35.0, 0.8, 2.0, 0.4, 1.0, &["cleave_wider"]),
            ],
            tags: vec!["sword".into(), "melee".into(), "starter".into()],
        },
        WeaponDef {
            id: "fireball_staff".into(),
            name: "Fireball Staff".into(),
            description: "Hurls bursting fireballs.".into(),
            kind: WeaponKind::Ranged,
            // Only two rows exist; level-ups stop at 2.
            max_level: 8,
            level_stats: vec![
                ranged(1, 20.0, 1.5, 1, 5.0, 1.2, 1.5, 0, &["explosion_on_impact_small"]),
                ranged(2, 25.0, 1.4, 1, 5.0, 1.3, 1.6, 0, &["explosion_on_impact_small"]),
            ],
            tags: vec!["staff".into(), "magic".into(), "fire".into()],
        },
        WeaponDef {
            id: "enemy_fireball".into(),
            name: "Enemy Fireball".into(),
            description: String::new(),
            kind: WeaponKind::Ranged,
            max_level: 1,
            level_stats: vec![ranged(1, 18.0, 3.0, 1, 4.0, 2.5, 1.5, 0, &[])],
            tags: vec!["enemy".into()],
        },
    ]
}

fn skills() -> Vec<SkillDef> {
    let pct = |stat, magnitude| Modifier::new(stat, magnitude, ModifierOp::PercentageAdd);
    vec![
        SkillDef {
            id: "might_aura".into(),
            name: "Might Aura".into(),
            description: "Raises attack damage.".into(),
            max_level: 5,
            level_stats: vec![
                SkillLevel { level: 1, effects: vec![pct(StatKind::AttackDamage, 0.05)] },
                SkillLevel { level: 2, effects: vec![pct(StatKind::AttackDamage, 0.10)] },
                SkillLevel { level: 3, effects: vec![pct(StatKind::AttackDamage, 0.15)] },
                SkillLevel { level: 4, effects: vec![pct(StatKind::AttackDamage, 0.20)] },
                SkillLevel {
                    level: 5,
                    effects: vec![pct(StatKind::AttackDamage, 0.25), pct(StatKind::Area, 0.10)],
                },
            ],
            tags: vec!["buff".into(), "damage".into()],
        },
        SkillDef {
            id: "swiftness_boots".into(),
            name: "Swiftness Boots".into(),
            description: "Raises movement speed.".into(),
            max_level: 3,
            level_stats: vec![
                SkillLevel { level: 1, effects: vec![pct(StatKind::MoveSpeed, 0.08)] },
                SkillLevel { level: 2, effects: vec![pct(StatKind::MoveSpeed, 0.16)] },
                SkillLevel { level: 3, effects: vec![pct(StatKind::MoveSpeed, 0.25)] },
            ],
            tags: vec!["utility".into(), "movement".into()],
        },
        SkillDef {
            id: "toughness_rank1".into(),
            name: "Toughness".into(),
            description: "Slightly raises max HP.".into(),
            max_level: 1,
            level_stats: vec![SkillLevel {
                level: 1,
                effects: vec![Modifier::new(StatKind::MaxHp, 0.10, ModifierOp::PercentageBase)],
            }],
            tags: vec!["defense".into()],
        },
    ]
}

fn relics() -> Vec<RelicDef> {
    vec![
        RelicDef {
            id: "imperial_seal_fragment".into(),
            name: "Imperial Seal Fragment".into(),
            description: "15% chance on level-up for an extra random stat boost.".into(),
            rarity: Rarity::Epic,
            effects: vec![RelicEffect {
                trigger: Trigger::OnLevelUp,
                chance: Some(0.15),
                condition: None,
                action: RelicAction::RandomStatBoost {
                    possible_stats: vec![
                        Modifier::new(StatKind::MaxHp, 0.05, ModifierOp::PercentageBase),
                        Modifier::new(StatKind::AttackDamage, 0.03, ModifierOp::PercentageBase),
                        Modifier::new(StatKind::MoveSpeed, 0.02, ModifierOp::PercentageBase),
                    ],
                    count: 1,
                },
            }],
        },
        RelicDef {
            id: "taiping_jing_fragment".into(),
            name: "Taiping Scripture Page".into(),
            description: "Every 8 experience pickups restore 1 HP.".into(),
            rarity: Rarity::Rare,
            effects: vec![RelicEffect {
                trigger: Trigger::OnXpCollect,
                chance: None,
                condition: Some(EffectCondition::Counter {
                    counter_id: "taiping_xp_count".into(),
                    threshold: 8,
                }),
                action: RelicAction::Heal { amount: 1.0 },
            }],
        },
        RelicDef {
            id: "buliangren_secret_order".into(),
            name: "Secret Order".into(),
            description: "+10% move speed, +8% damage taken.".into(),
            rarity: Rarity::Rare,
            effects: vec![
                RelicEffect {
                    trigger: Trigger::Passive,
                    chance: None,
                    condition: None,
                    action: RelicAction::ModifyStat {
                        modifier: Modifier::new(StatKind::MoveSpeed, 0.10, ModifierOp::PercentageAdd),
                    },
                },
                RelicEffect {
                    trigger: Trigger::Passive,
                    chance: None,
                    condition: None,
                    action: RelicAction::ModifyStat {
                        modifier: Modifier::new(
                            StatKind::DamageTakenMultiplier,
                            0.08,
                            ModifierOp::PercentageAdd,
                        ),
                    },
                },
            ],
        },
        RelicDef {
            id: "shangyuan_brocade_pouch".into(),
            name: "Lantern Festival Pouch".into(),
            description: "Elite and boss kills drop an extra 15 XP orb.".into(),
            rarity: Rarity::Rare,
            effects: vec![RelicEffect {
                trigger: Trigger::OnEliteOrBossKill,
                chance: None,
                condition: None,
                action: RelicAction::SpawnLoot {
                    item_id: "experience_orb".into(),
                    xp_amount: Some(15),
                },
            }],
        },
    ]
}

fn loot_items() -> Vec<LootItemDef> {
    let item = |id: &str, kind, value| LootItemDef {
        id: id.into(),
        kind,
        value,
    };
    vec![
        item("xp_orb_small", LootKind::ExperienceOrb, 5.0),
        item("xp_orb_medium", LootKind::ExperienceOrb, 20.0),
        item("xp_orb_large", LootKind::ExperienceOrb, 50.0),
        item("experience_orb", LootKind::ExperienceOrb, DEFAULT_ORB_XP as f64),
        item("health_potion_small", LootKind::HealthPotion, 20.0),
    ]
}

fn levels() -> BTreeMap<u32, LevelDef> {
    let group = |enemy_id: &str, count, delay, interval, max_alive, area: &str| SpawnGroupDef {
        enemy_id: enemy_id.into(),
        count: Some(count),
        spawn_delay_secs: delay,
        spawn_interval_secs: Some(interval),
        max_alive: Some(max_alive),
        spawn_area: Some(area.into()),
    };

    let mut levels = BTreeMap::new();
    levels.insert(
        1,
        LevelDef {
            xp_needed: Some(100),
            duration_secs: Some(60.0),
            enemy_groups: vec![group("ghoul_weak", 5, 2.0, 5.0, 10, "full_screen_edge")],
            boss: None,
            completion: LevelCompletion::AfterDuration,
        },
    );
    levels.insert(
        2,
        LevelDef {
            xp_needed: Some(150),
            duration_secs: Some(90.0),
            enemy_groups: vec![
                group("ghoul_weak", 8, 1.0, 4.0, 15, "full_screen_edge"),
                group("skeleton_archer", 3, 10.0, 8.0, 5, "top_half_edge"),
            ],
            boss: None,
            completion: LevelCompletion::AfterDuration,
        },
    );
    levels.insert(
        3,
        LevelDef {
            xp_needed: Some(220),
            duration_secs: Some(120.0),
            enemy_groups: vec![
                group("ghoul_strong", 5, 1.0, 6.0, 8, "full_screen_edge"),
                group("skeleton_archer", 5, 5.0, 7.0, 7, "bottom_half_edge"),
            ],
            boss: None,
            completion: LevelCompletion::AfterDuration,
        },
    );
    levels.insert(
        5,
        LevelDef {
            xp_needed: Some(500),
            duration_secs: Some(180.0),
            enemy_groups: vec![
                group("ghoul_strong", 10, 1.0, 3.0, 15, "full_screen_edge"),
                group("skeleton_mage", 2, 15.0, 10.0, 4, "full_screen_edge"),
            ],
            boss: Some(BossDef {
                enemy_id: "lich_king".into(),
                trigger_secs: 180.0,
            }),
            completion: LevelCompletion::BossDefeated,
        },
    );
    levels
}
