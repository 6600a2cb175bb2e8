//! End-to-end checks for the world: chunk streaming, combat arithmetic,
//! pickups, projectiles, and restart semantics, all driven through the
//! public command/query surface.

use gridlock_core::{
    Ability, AimVector, CellCoord, Command, Event, GridVector, MonsterArchetype, PowerupKind,
    ProjectileKind,
};
use gridlock_world::{apply, query, World, MAX_LOADED_CHUNKS, MAX_POWERUPS, MAX_PROJECTILES};

struct Harness {
    world: World,
    clock: u64,
}

impl Harness {
    fn new(seed: u64) -> Self {
        Self {
            world: World::new(seed),
            clock: 0,
        }
    }

    fn submit(&mut self, command: Command) -> Vec<Event> {
        let mut events = Vec::new();
        apply(&mut self.world, command, &mut events);
        events
    }

    fn tick(&mut self) -> Vec<Event> {
        self.clock += 1;
        self.submit(Command::Tick { now_ms: self.clock })
    }

    fn run_ticks(&mut self, count: usize) -> Vec<Event> {
        let mut events = Vec::new();
        for _ in 0..count {
            events.extend(self.tick());
        }
        events
    }

    /// Ticks until the spawn-protection window has lapsed.
    fn clear_spawn_protection(&mut self) {
        let _ = self.run_ticks(181);
        assert!(!query::player(&self.world).invulnerable);
    }
}

#[test]
fn first_tick_streams_the_full_chunk_window() {
    let mut harness = Harness::new(7);
    let events = harness.tick();
    let loads = events
        .iter()
        .filter(|event| matches!(event, Event::ChunkLoaded { .. }))
        .count();
    assert_eq!(loads, MAX_LOADED_CHUNKS);
    assert_eq!(query::loaded_chunk_count(&harness.world), MAX_LOADED_CHUNKS);
}

#[test]
fn resident_chunk_coordinates_are_unique() {
    let mut harness = Harness::new(7);
    let _ = harness.tick();
    let mut coords = query::loaded_chunks(&harness.world);
    coords.sort();
    coords.dedup();
    assert_eq!(coords.len(), MAX_LOADED_CHUNKS);
}

#[test]
fn walking_evicts_stale_chunks_and_their_distant_entities() {
    let mut harness = Harness::new(3);
    harness.submit(Command::SpawnMonster {
        cell: CellCoord::new(-300, 1),
        archetype: MonsterArchetype::Wanderer,
        health: 30,
        power: 4,
    });
    let mut saw_eviction = false;
    for _ in 0..700 {
        let _ = harness.submit(Command::MovePlayer {
            step: GridVector::new(1, 0),
        });
        let events = harness.tick();
        saw_eviction |= events
            .iter()
            .any(|event| matches!(event, Event::ChunkEvicted { .. }));
    }
    assert!(saw_eviction);
    assert_eq!(query::loaded_chunk_count(&harness.world), MAX_LOADED_CHUNKS);
    let mut coords = query::loaded_chunks(&harness.world);
    coords.sort();
    coords.dedup();
    assert_eq!(coords.len(), MAX_LOADED_CHUNKS);
    // The monster's chunk fell out of the window and the monster sat far
    // beyond the protection radius, so eviction released it.
    assert!(query::monsters(&harness.world).is_empty());
}

#[test]
fn terrain_is_stable_across_restart_with_the_same_seed() {
    let mut harness = Harness::new(99);
    let _ = harness.tick();
    let cell = CellCoord::new(10, -14);
    let before = query::terrain_at(&harness.world, cell);
    assert!(before.is_some());
    let events = harness.submit(Command::Restart);
    assert!(events.contains(&Event::WorldRestarted));
    assert_eq!(query::loaded_chunk_count(&harness.world), 0);
    let _ = harness.tick();
    assert_eq!(query::terrain_at(&harness.world, cell), before);
}

#[test]
fn spawn_protection_blocks_incoming_melee_damage() {
    let mut harness = Harness::new(1);
    harness.submit(Command::SpawnMonster {
        cell: CellCoord::new(2, 1),
        archetype: MonsterArchetype::Wanderer,
        health: 40,
        power: 6,
    });
    let events = harness.tick();
    assert!(events.contains(&Event::CombatTick));
    let player = query::player(&harness.world);
    assert_eq!(player.health, 100);
    assert!(player.in_combat);
    let monsters = query::monsters(&harness.world);
    let monster = monsters.iter().next().unwrap();
    // Player power 8 at multiplier 1 lands floor(8 * 0.5) = 4 per tick.
    assert_eq!(monster.health, 36);
}

#[test]
fn melee_damage_lands_once_protection_lapses() {
    let mut harness = Harness::new(1);
    harness.clear_spawn_protection();
    harness.submit(Command::SpawnMonster {
        cell: CellCoord::new(2, 1),
        archetype: MonsterArchetype::Wanderer,
        health: 400,
        power: 6,
    });
    let _ = harness.tick();
    // Monster power 6 lands floor(6 * 0.5) = 3 per tick.
    assert_eq!(query::player(&harness.world).health, 97);
}

#[test]
fn kills_grant_experience_and_level_ups_heal_to_full() {
    let mut harness = Harness::new(1);
    harness.submit(Command::SpawnMonster {
        cell: CellCoord::new(2, 1),
        archetype: MonsterArchetype::Wanderer,
        health: 1,
        power: 10,
    });
    let events = harness.tick();
    assert!(events
        .iter()
        .any(|event| matches!(event, Event::MonsterDied { experience: 100, .. })));
    assert!(events.contains(&Event::PlayerLeveledUp { level: 2 }));
    let player = query::player(&harness.world);
    assert_eq!(player.level, 2);
    assert_eq!(player.max_health, 120);
    assert_eq!(player.health, 120);
    assert_eq!(player.power, 10);
    assert_eq!(player.experience, 0);
    assert_eq!(player.experience_to_next, 200);
    assert!(query::monsters(&harness.world).is_empty());
}

#[test]
fn speed_powerup_doubles_the_stride() {
    let mut harness = Harness::new(1);
    harness.submit(Command::SpawnPowerup {
        cell: CellCoord::new(1, 1),
        kind: PowerupKind::DoubleSpeed,
    });
    let events = harness.tick();
    assert!(events.contains(&Event::PowerupCollected {
        kind: PowerupKind::DoubleSpeed
    }));
    assert!(query::powerups(&harness.world).is_empty());
    let events = harness.submit(Command::MovePlayer {
        step: GridVector::new(1, 0),
    });
    assert!(events.contains(&Event::PlayerMoved {
        from: CellCoord::new(1, 1),
        to: CellCoord::new(3, 1),
    }));
}

#[test]
fn movement_cooldown_rejects_back_to_back_steps() {
    let mut harness = Harness::new(1);
    let _ = harness.tick();
    let first = harness.submit(Command::MovePlayer {
        step: GridVector::new(0, 1),
    });
    assert_eq!(first.len(), 1);
    let second = harness.submit(Command::MovePlayer {
        step: GridVector::new(0, 1),
    });
    assert!(second.is_empty());
    assert_eq!(query::player(&harness.world).cell, CellCoord::new(1, 2));
}

#[test]
fn diagonal_steps_move_both_axes_at_once() {
    let mut harness = Harness::new(1);
    let _ = harness.tick();
    let events = harness.submit(Command::MovePlayer {
        step: GridVector::new(-1, 1),
    });
    assert!(events.contains(&Event::PlayerMoved {
        from: CellCoord::new(1, 1),
        to: CellCoord::new(0, 2),
    }));
}

#[test]
fn landmine_detonation_is_blocked_by_spawn_protection() {
    let mut harness = Harness::new(1);
    harness.submit(Command::SpawnLandmine {
        cell: CellCoord::new(1, 1),
        damage: 20,
    });
    let events = harness.tick();
    assert!(events.contains(&Event::LandmineDetonated { damage: 20 }));
    assert_eq!(query::player(&harness.world).health, 100);
    assert!(query::landmines(&harness.world).is_empty());
}

#[test]
fn landmine_damage_lands_once_protection_lapses() {
    let mut harness = Harness::new(1);
    harness.clear_spawn_protection();
    harness.submit(Command::SpawnLandmine {
        cell: CellCoord::new(1, 1),
        damage: 20,
    });
    let _ = harness.tick();
    let player = query::player(&harness.world);
    assert_eq!(player.health, 80);
    assert!(player.invulnerable);
}

#[test]
fn lightning_bolt_damages_and_stuns_the_player() {
    let mut harness = Harness::new(1);
    harness.clear_spawn_protection();
    harness.submit(Command::FireProjectile {
        origin: CellCoord::new(1, 5),
        aim: AimVector::new(0.0, -1.0),
        kind: ProjectileKind::Lightning,
        damage: 9,
    });
    let _ = harness.tick();
    let events = harness.tick();
    assert!(events
        .iter()
        .any(|event| matches!(event, Event::ProjectileExpired { .. })));
    let player = query::player(&harness.world);
    assert_eq!(player.health, 91);
    assert!(player.stunned);
    // A stunned player cannot move.
    let refused = harness.submit(Command::MovePlayer {
        step: GridVector::new(1, 0),
    });
    assert!(refused.is_empty());
    assert_eq!(query::player(&harness.world).cell, CellCoord::new(1, 1));
}

#[test]
fn projectiles_expire_past_the_safety_radius() {
    let mut harness = Harness::new(1);
    let _ = harness.submit(Command::FireProjectile {
        origin: CellCoord::new(1, 1),
        aim: AimVector::new(0.0, -1.0),
        kind: ProjectileKind::Lightning,
        damage: 5,
    });
    let events = harness.run_ticks(30);
    assert!(events
        .iter()
        .any(|event| matches!(event, Event::ProjectileExpired { .. })));
    assert!(query::projectiles(&harness.world).is_empty());
}

#[test]
fn projectile_arena_enforces_its_capacity() {
    let mut harness = Harness::new(1);
    for _ in 0..(MAX_PROJECTILES + 5) {
        harness.submit(Command::FireProjectile {
            origin: CellCoord::new(1, 4),
            aim: AimVector::new(0.0, 1.0),
            kind: ProjectileKind::Fireball,
            damage: 3,
        });
    }
    assert_eq!(query::projectiles(&harness.world).len(), MAX_PROJECTILES);
}

#[test]
fn powerup_arena_enforces_its_capacity() {
    let mut harness = Harness::new(1);
    for offset in 0..(MAX_POWERUPS as i32 + 10) {
        harness.submit(Command::SpawnPowerup {
            cell: CellCoord::new(100 + offset, 100),
            kind: PowerupKind::DoubleDamage,
        });
    }
    assert_eq!(query::powerups(&harness.world).len(), MAX_POWERUPS);
}

#[test]
fn monster_steps_are_gated_by_their_cooldown() {
    let mut harness = Harness::new(1);
    harness.submit(Command::SpawnMonster {
        cell: CellCoord::new(5, 5),
        archetype: MonsterArchetype::Wanderer,
        health: 30,
        power: 4,
    });
    let id = query::monsters(&harness.world).iter().next().unwrap().id;
    harness.submit(Command::StepMonster {
        monster: id,
        step: GridVector::new(2, 0),
    });
    harness.submit(Command::StepMonster {
        monster: id,
        step: GridVector::new(2, 0),
    });
    let monsters = query::monsters(&harness.world);
    let monster = monsters.iter().next().unwrap();
    assert_eq!(monster.cell, CellCoord::new(7, 5));
    assert!(!monster.ready);
}

#[test]
fn despawn_commands_remove_entities_by_id() {
    let mut harness = Harness::new(1);
    harness.submit(Command::SpawnMonster {
        cell: CellCoord::new(42, 42),
        archetype: MonsterArchetype::Rusher,
        health: 25,
        power: 5,
    });
    harness.submit(Command::SpawnPowerup {
        cell: CellCoord::new(40, 40),
        kind: PowerupKind::DoubleHealth,
    });
    harness.submit(Command::SpawnLandmine {
        cell: CellCoord::new(41, 41),
        damage: 18,
    });
    let monster = query::monsters(&harness.world).iter().next().unwrap().id;
    let powerup = query::powerups(&harness.world).iter().next().unwrap().id;
    let landmine = query::landmines(&harness.world).iter().next().unwrap().id;
    harness.submit(Command::DespawnMonster { monster });
    harness.submit(Command::DespawnPowerup { powerup });
    harness.submit(Command::DespawnLandmine { landmine });
    assert!(query::monsters(&harness.world).is_empty());
    assert!(query::powerups(&harness.world).is_empty());
    assert!(query::landmines(&harness.world).is_empty());
}

#[test]
fn heal_restores_full_health_and_starts_its_cooldown() {
    let mut harness = Harness::new(1);
    harness.clear_spawn_protection();
    harness.submit(Command::SpawnLandmine {
        cell: CellCoord::new(1, 1),
        damage: 30,
    });
    let _ = harness.tick();
    assert_eq!(query::player(&harness.world).health, 70);
    harness.submit(Command::TriggerAbility {
        ability: Ability::Heal,
    });
    assert_eq!(query::player(&harness.world).health, 100);
    // Wait out the hit invulnerability, take another blast, and confirm the
    // heal cooldown swallows the re-trigger.
    let _ = harness.run_ticks(61);
    harness.submit(Command::SpawnLandmine {
        cell: CellCoord::new(1, 1),
        damage: 30,
    });
    let _ = harness.tick();
    harness.submit(Command::TriggerAbility {
        ability: Ability::Heal,
    });
    assert_eq!(query::player(&harness.world).health, 70);
}

#[test]
fn smash_leaps_and_clears_nearby_monsters() {
    let mut harness = Harness::new(1);
    let _ = harness.tick();
    // Face right, then smash: the player leaps three cells along the facing.
    let _ = harness.submit(Command::MovePlayer {
        step: GridVector::new(1, 0),
    });
    harness.submit(Command::SpawnMonster {
        cell: CellCoord::new(6, 1),
        archetype: MonsterArchetype::Wanderer,
        health: 10,
        power: 2,
    });
    harness.submit(Command::TriggerAbility {
        ability: Ability::Smash,
    });
    let player = query::player(&harness.world);
    assert_eq!(player.cell, CellCoord::new(5, 1));
    // Smash lands power * 2 = 16, enough to clear the 10-health monster.
    assert!(query::monsters(&harness.world).is_empty());
}

#[test]
fn player_death_starts_the_restart_countdown() {
    let mut harness = Harness::new(1);
    harness.clear_spawn_protection();
    harness.submit(Command::SpawnLandmine {
        cell: CellCoord::new(1, 1),
        damage: 500,
    });
    let events = harness.tick();
    assert!(events.contains(&Event::PlayerDied));
    let player = query::player(&harness.world);
    assert!(!player.alive);
    assert_eq!(player.health, 0);
    assert_eq!(player.death_timer, 180);
    // Dead players ignore movement.
    let refused = harness.submit(Command::MovePlayer {
        step: GridVector::new(1, 0),
    });
    assert!(refused.is_empty());
    let _ = harness.tick();
    assert_eq!(query::player(&harness.world).death_timer, 179);
}

#[test]
fn rusher_packs_amplify_melee_damage() {
    let mut harness = Harness::new(1);
    harness.clear_spawn_protection();
    for cell in [CellCoord::new(2, 1), CellCoord::new(2, 2)] {
        harness.submit(Command::SpawnMonster {
            cell,
            archetype: MonsterArchetype::Rusher,
            health: 500,
            power: 6,
        });
    }
    let _ = harness.tick();
    // Each rusher lands floor(6 * 0.5) = 3, doubled once for its packmate,
    // so the pair costs the player 12 health in one tick.
    assert_eq!(query::player(&harness.world).health, 88);
}

#[test]
fn melee_kills_take_a_predictable_number_of_ticks() {
    let mut harness = Harness::new(1);
    harness.clear_spawn_protection();
    harness.submit(Command::SpawnMonster {
        cell: CellCoord::new(2, 1),
        archetype: MonsterArchetype::Wanderer,
        health: 10,
        power: 2,
    });
    // The player lands floor(8 * 0.5) = 4 per tick, so a 10-health monster
    // falls on the third exchange and never sooner.
    for _ in 0..2 {
        let events = harness.tick();
        assert!(!events
            .iter()
            .any(|event| matches!(event, Event::MonsterDied { .. })));
    }
    let events = harness.tick();
    assert!(events
        .iter()
        .any(|event| matches!(event, Event::MonsterDied { .. })));
    assert!(query::monsters(&harness.world).is_empty());
    let player = query::player(&harness.world);
    // The monster landed floor(2 * 0.5) = 1 on each of the three exchanges.
    assert_eq!(player.health, 97);
    assert_eq!(player.experience, 20);
}

#[test]
fn arrows_expire_at_their_maximum_range() {
    let mut harness = Harness::new(1);
    // Fired well off to the side, the arrow stays inside the safety radius
    // for its whole flight and dies purely from range exhaustion.
    let _ = harness.submit(Command::FireProjectile {
        origin: CellCoord::new(45, 10),
        aim: AimVector::new(-1.0, 0.0),
        kind: ProjectileKind::Arrow,
        damage: 5,
    });
    let early = harness.run_ticks(39);
    assert!(!early
        .iter()
        .any(|event| matches!(event, Event::ProjectileExpired { .. })));
    // 40 ticks at speed 2 covers the arrow's 80-cell range exactly.
    let events = harness.tick();
    assert!(events
        .iter()
        .any(|event| matches!(event, Event::ProjectileExpired { .. })));
    assert!(query::projectiles(&harness.world).is_empty());
    assert_eq!(query::player(&harness.world).health, 100);
}

#[test]
fn monsters_spawned_on_mountains_come_out_tougher() {
    let mut harness = Harness::new(1);
    let _ = harness.tick();
    let mountain = CellCoord::new(101, 100);
    assert_eq!(
        query::terrain_at(&harness.world, mountain),
        Some(gridlock_core::TerrainKind::Mountain)
    );
    harness.submit(Command::SpawnMonster {
        cell: mountain,
        archetype: MonsterArchetype::Wanderer,
        health: 20,
        power: 4,
    });
    let monsters = query::monsters(&harness.world);
    let monster = monsters.iter().next().unwrap();
    assert_eq!(monster.health, 30);
    assert_eq!(monster.max_health, 30);
    assert_eq!(monster.power, 6);
}
