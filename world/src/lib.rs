#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative simulation state for Gridlock Arena.
//!
//! The [`World`] owns the player, every entity arena, and the chunk table.
//! All mutation flows through [`apply`], which executes one [`Command`] and
//! appends the resulting [`Event`]s to the caller's buffer. Reads flow
//! through the [`query`] module, which hands out immutable snapshots so
//! systems can plan their next command batch without touching live state.
//!
//! One `Command::Tick` advances every clock in the simulation: status
//! timers, melee exchanges, pickups, landmines, projectile flight, and the
//! chunk streaming window around the player. Everything else is a discrete
//! request that either takes effect immediately or is silently ignored when
//! its gate (cooldown, stun, capacity) rejects it.

pub mod chunks;
mod entities;
mod terrain;

use gridlock_core::{
    Ability, AimVector, CellCoord, ChunkCoord, Command, Event, GridVector, LandmineId,
    MonsterArchetype, MonsterId, PowerupId, PowerupKind, ProjectileId, ProjectileKind,
    StatusEffect, TerrainKind,
};

use crate::chunks::{chunk_containing, ChunkLoad, ChunkStore};
use crate::entities::{Arena, Landmine, Monster, Player, Powerup, Projectile};

/// Radius of the streamed chunk window, measured in chunks.
pub const CHUNK_LOAD_RADIUS: i32 = 12;
/// Upper bound on resident chunks; exactly covers the streamed window.
pub const MAX_LOADED_CHUNKS: usize = 625;
/// Upper bound on live monsters.
pub const MAX_MONSTERS: usize = 2000;
/// Upper bound on uncollected powerups.
pub const MAX_POWERUPS: usize = 50;
/// Upper bound on buried landmines.
pub const MAX_LANDMINES: usize = 100;
/// Upper bound on projectiles in flight.
pub const MAX_PROJECTILES: usize = 100;
/// Entities closer to the player than this survive chunk eviction.
pub const PROTECTION_RADIUS: f32 = 200.0;

const PLAYER_START_CELL: CellCoord = CellCoord::new(1, 1);
const PLAYER_START_HEALTH: i32 = 100;
const PLAYER_START_POWER: i32 = 8;

const MELEE_DAMAGE_FRACTION: f32 = 0.5;
const RUSHER_PACK_RADIUS: u32 = 2;
const XP_PER_POWER: i32 = 10;
const LEVEL_XP_STEP: i32 = 100;
const LEVEL_HEALTH_BONUS: i32 = 20;
const LEVEL_POWER_BONUS: i32 = 2;

const MOVE_COOLDOWN: u32 = 6;
const MONSTER_MAX_STRIDE: i32 = 2;
const RUSHER_STEP_COOLDOWN: u32 = 6;
const CASTER_STEP_COOLDOWN: u32 = 9;
const WANDERER_STEP_COOLDOWN: u32 = 12;

const SMASH_COOLDOWN: u32 = 180;
const RUSH_COOLDOWN: u32 = 600;
const HEAL_COOLDOWN: u32 = 1800;
const ARROW_COOLDOWN: u32 = 60;
const SMASH_LEAP_CELLS: i32 = 3;
const SMASH_RADIUS: f32 = 2.0;
const SMASH_DAMAGE_FACTOR: f32 = 2.0;
const RUSH_DURATION: u32 = 180;

const STUN_DURATION: u32 = 60;
const DOT_DURATION: u32 = 180;
const DOT_INTERVAL: u32 = 60;
const HIT_INVULNERABILITY: u32 = 60;
const SPAWN_INVULNERABILITY: u32 = 180;
const POWERUP_DURATION: u32 = 300;
const DEATH_RESTART_DELAY: u32 = 180;

const PROJECTILE_SAFETY_RADIUS: f32 = 50.0;

/// Authoritative container for all simulation state.
#[derive(Clone, Debug)]
pub struct World {
    seed: u64,
    player: Player,
    monsters: Arena<Monster>,
    powerups: Arena<Powerup>,
    landmines: Arena<Landmine>,
    projectiles: Arena<Projectile>,
    chunks: ChunkStore,
    next_monster_id: u32,
    next_powerup_id: u32,
    next_landmine_id: u32,
    next_projectile_id: u32,
}

impl World {
    /// Creates a fresh world for the provided seed.
    ///
    /// The player spawns near the origin with a spawn-protection window
    /// already running. No chunks are resident until the first tick streams
    /// the window around the player in.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        let mut player =
            Player::spawn(PLAYER_START_CELL, PLAYER_START_HEALTH, PLAYER_START_POWER);
        player.invulnerability_timer = SPAWN_INVULNERABILITY;
        Self {
            seed,
            player,
            monsters: Arena::new(MAX_MONSTERS),
            powerups: Arena::new(MAX_POWERUPS),
            landmines: Arena::new(MAX_LANDMINES),
            projectiles: Arena::new(MAX_PROJECTILES),
            chunks: ChunkStore::new(seed, MAX_LOADED_CHUNKS),
            next_monster_id: 0,
            next_powerup_id: 0,
            next_landmine_id: 0,
            next_projectile_id: 0,
        }
    }

    /// Seed the world was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

/// Executes a single command against the world, appending resulting events.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::MovePlayer { step } => world.handle_move_player(step, out_events),
        Command::TriggerAbility { ability } => world.handle_ability(ability, out_events),
        Command::FireArrow => world.handle_fire_arrow(),
        Command::Restart => {
            *world = World::new(world.seed);
            out_events.push(Event::WorldRestarted);
        }
        Command::Tick { now_ms } => world.tick(now_ms, out_events),
        Command::StepMonster { monster, step } => world.handle_step_monster(monster, step),
        Command::FireProjectile {
            origin,
            aim,
            kind,
            damage,
        } => world.spawn_projectile(origin, aim, kind, damage),
        Command::SpawnMonster {
            cell,
            archetype,
            health,
            power,
        } => world.handle_spawn_monster(cell, archetype, health, power),
        Command::SpawnPowerup { cell, kind } => world.handle_spawn_powerup(cell, kind),
        Command::SpawnLandmine { cell, damage } => world.handle_spawn_landmine(cell, damage),
        Command::DespawnMonster { monster } => world.handle_despawn_monster(monster),
        Command::DespawnPowerup { powerup } => world.handle_despawn_powerup(powerup),
        Command::DespawnLandmine { landmine } => world.handle_despawn_landmine(landmine),
    }
}

impl World {
    fn tick(&mut self, now_ms: u64, out: &mut Vec<Event>) {
        self.tick_player_timers(out);
        self.tick_monster_timers(out);
        self.resolve_melee(out);
        self.resolve_pickups(out);
        self.resolve_landmines(out);
        self.step_projectiles(out);
        self.update_chunks(now_ms, out);
        self.sweep_dead_monsters();
    }

    fn handle_move_player(&mut self, step: GridVector, out: &mut Vec<Event>) {
        if !self.player.alive || self.player.stun_timer > 0 || self.player.movement_cooldown > 0 {
            return;
        }
        let step = step.clamped_to_unit_step();
        if step.is_zero() {
            return;
        }
        self.player.intent = step;
        // Horizontal motion wins the facing so sprites and aim stay stable
        // through diagonal runs.
        self.player.facing = if step.dx() != 0 {
            GridVector::new(step.dx(), 0)
        } else {
            GridVector::new(0, step.dy())
        };
        let stride = self.stride();
        let from = self.player.cell;
        let to = CellCoord::new(
            from.x() + step.dx() * stride,
            from.y() + step.dy() * stride,
        );
        self.player.cell = to;
        self.player.movement_cooldown = if self.player.in_combat {
            MOVE_COOLDOWN * 2
        } else {
            MOVE_COOLDOWN
        };
        out.push(Event::PlayerMoved { from, to });
    }

    fn stride(&self) -> i32 {
        let boost = if self.player.speed_boost_timer > 0 {
            2.0
        } else {
            1.0
        };
        ((self.player.speed_multiplier * boost) as i32).max(1)
    }

    fn handle_ability(&mut self, ability: Ability, out: &mut Vec<Event>) {
        if !self.player.alive || self.player.stun_timer > 0 {
            return;
        }
        match ability {
            Ability::Smash if self.player.smash_cooldown == 0 => self.perform_smash(out),
            Ability::Rush if self.player.rush_cooldown == 0 => {
                self.player.speed_boost_timer = RUSH_DURATION;
                self.player.rush_cooldown = RUSH_COOLDOWN;
            }
            Ability::Heal if self.player.heal_cooldown == 0 => {
                self.player.health = self.player.max_health;
                self.player.heal_cooldown = HEAL_COOLDOWN;
            }
            _ => {}
        }
    }

    fn perform_smash(&mut self, out: &mut Vec<Event>) {
        let leap = self.aim_step();
        let from = self.player.cell;
        let to = CellCoord::new(
            from.x() + leap.dx() * SMASH_LEAP_CELLS,
            from.y() + leap.dy() * SMASH_LEAP_CELLS,
        );
        self.player.cell = to;
        self.player.smash_cooldown = SMASH_COOLDOWN;
        out.push(Event::PlayerMoved { from, to });
        let hit =
            (self.player.power as f32 * self.player.damage_multiplier * SMASH_DAMAGE_FACTOR) as i32;
        let count = self.monsters.len();
        for index in 0..count {
            let dies = match self.monsters.get_mut(index) {
                Some(monster)
                    if monster.alive && to.euclidean_distance(monster.cell) <= SMASH_RADIUS =>
                {
                    monster.health -= hit;
                    monster.health <= 0
                }
                _ => continue,
            };
            if dies {
                self.award_kill(index, out);
            }
        }
    }

    /// Direction abilities and arrows use: live intent when the player is
    /// holding a direction, last facing otherwise.
    fn aim_step(&self) -> GridVector {
        if self.player.intent.is_zero() {
            self.player.facing
        } else {
            self.player.intent
        }
    }

    fn handle_fire_arrow(&mut self) {
        if !self.player.alive || self.player.stun_timer > 0 || self.player.arrow_cooldown > 0 {
            return;
        }
        let step = self.aim_step();
        let aim = AimVector::new(step.dx() as f32, step.dy() as f32);
        let damage =
            ((self.player.power as f32 * self.player.damage_multiplier) / 2.0) as i32;
        self.spawn_projectile(self.player.cell, aim, ProjectileKind::Arrow, damage);
        self.player.arrow_cooldown = ARROW_COOLDOWN;
    }

    fn spawn_projectile(
        &mut self,
        origin: CellCoord,
        aim: AimVector,
        kind: ProjectileKind,
        damage: i32,
    ) {
        let id = ProjectileId::new(self.next_projectile_id);
        if self
            .projectiles
            .try_push(Projectile::new(id, origin, aim, kind, damage))
        {
            self.next_projectile_id += 1;
        }
    }

    fn handle_step_monster(&mut self, id: MonsterId, step: GridVector) {
        let Some(monster) = self.monsters.iter_mut().find(|monster| monster.id == id) else {
            return;
        };
        if !monster.alive || monster.stun_timer > 0 || monster.movement_cooldown > 0 {
            return;
        }
        let dx = step.dx().clamp(-MONSTER_MAX_STRIDE, MONSTER_MAX_STRIDE);
        let dy = step.dy().clamp(-MONSTER_MAX_STRIDE, MONSTER_MAX_STRIDE);
        if dx == 0 && dy == 0 {
            return;
        }
        monster.cell = CellCoord::new(monster.cell.x() + dx, monster.cell.y() + dy);
        let base = match monster.archetype {
            MonsterArchetype::Rusher => RUSHER_STEP_COOLDOWN,
            MonsterArchetype::Caster { .. } => CASTER_STEP_COOLDOWN,
            MonsterArchetype::Wanderer => WANDERER_STEP_COOLDOWN,
        };
        monster.movement_cooldown = if monster.in_combat { base * 2 } else { base };
    }

    fn handle_spawn_monster(
        &mut self,
        cell: CellCoord,
        archetype: MonsterArchetype,
        health: i32,
        power: i32,
    ) {
        let mut health = health.max(1);
        let mut power = power.max(1);
        // Mountain dwellers run tougher than lowland spawns.
        if query::terrain_at(self, cell) == Some(TerrainKind::Mountain) {
            health += health / 2;
            power += 2;
        }
        let id = MonsterId::new(self.next_monster_id);
        if self
            .monsters
            .try_push(Monster::new(id, cell, archetype, health, power))
        {
            self.next_monster_id += 1;
        }
    }

    fn handle_spawn_powerup(&mut self, cell: CellCoord, kind: PowerupKind) {
        let id = PowerupId::new(self.next_powerup_id);
        if self.powerups.try_push(Powerup { id, cell, kind }) {
            self.next_powerup_id += 1;
        }
    }

    fn handle_spawn_landmine(&mut self, cell: CellCoord, damage: i32) {
        let id = LandmineId::new(self.next_landmine_id);
        if self.landmines.try_push(Landmine {
            id,
            cell,
            damage: damage.max(1),
        }) {
            self.next_landmine_id += 1;
        }
    }

    fn handle_despawn_monster(&mut self, id: MonsterId) {
        if let Some(index) = self.monsters.position(|monster| monster.id == id) {
            let _ = self.monsters.swap_remove(index);
        }
    }

    fn handle_despawn_powerup(&mut self, id: PowerupId) {
        if let Some(index) = self.powerups.position(|powerup| powerup.id == id) {
            let _ = self.powerups.swap_remove(index);
        }
    }

    fn handle_despawn_landmine(&mut self, id: LandmineId) {
        if let Some(index) = self.landmines.position(|landmine| landmine.id == id) {
            let _ = self.landmines.swap_remove(index);
        }
    }

    fn tick_player_timers(&mut self, out: &mut Vec<Event>) {
        let player = &mut self.player;
        if !player.alive {
            player.death_timer = player.death_timer.saturating_sub(1);
            return;
        }
        player.movement_cooldown = player.movement_cooldown.saturating_sub(1);
        player.invulnerability_timer = player.invulnerability_timer.saturating_sub(1);
        player.stun_timer = player.stun_timer.saturating_sub(1);
        player.smash_cooldown = player.smash_cooldown.saturating_sub(1);
        player.rush_cooldown = player.rush_cooldown.saturating_sub(1);
        player.heal_cooldown = player.heal_cooldown.saturating_sub(1);
        player.arrow_cooldown = player.arrow_cooldown.saturating_sub(1);
        player.speed_boost_timer = player.speed_boost_timer.saturating_sub(1);
        if player.powerup_timer > 0 {
            player.powerup_timer -= 1;
            if player.powerup_timer == 0 {
                player.damage_multiplier = 1.0;
                player.speed_multiplier = 1.0;
            }
        }
        if player.dot_timer > 0 {
            player.dot_timer -= 1;
            if player.dot_timer % DOT_INTERVAL == 0 && player.dot_damage > 0 {
                player.health -= player.dot_damage;
            }
            if player.dot_timer == 0 {
                player.dot_damage = 0;
            }
        }
        self.check_player_death(out);
    }

    fn tick_monster_timers(&mut self, out: &mut Vec<Event>) {
        let count = self.monsters.len();
        for index in 0..count {
            let burned_out = {
                let Some(monster) = self.monsters.get_mut(index) else {
                    continue;
                };
                if !monster.alive {
                    continue;
                }
                monster.movement_cooldown = monster.movement_cooldown.saturating_sub(1);
                monster.stun_timer = monster.stun_timer.saturating_sub(1);
                if monster.dot_timer > 0 {
                    monster.dot_timer -= 1;
                    if monster.dot_timer % DOT_INTERVAL == 0 && monster.dot_damage > 0 {
                        monster.health -= monster.dot_damage;
                    }
                    if monster.dot_timer == 0 {
                        monster.dot_damage = 0;
                    }
                }
                monster.health <= 0
            };
            if burned_out {
                self.award_kill(index, out);
            }
        }
    }

    fn resolve_melee(&mut self, out: &mut Vec<Event>) {
        self.player.in_combat = false;
        for monster in self.monsters.iter_mut() {
            monster.in_combat = false;
        }
        if !self.player.alive {
            return;
        }
        let player_cell = self.player.cell;
        let mut engaged = Vec::new();
        let mut incoming = 0;
        for (index, monster) in self.monsters.iter().enumerate() {
            if !monster.alive || !monster.cell.is_adjacent_to(player_cell) {
                continue;
            }
            engaged.push(index);
            let mut damage = (monster.power as f32 * MELEE_DAMAGE_FRACTION) as i32;
            if monster.archetype == MonsterArchetype::Rusher {
                // Each nearby packmate doubles the blow.
                let packmates = self
                    .monsters
                    .iter()
                    .filter(|other| {
                        other.alive
                            && other.id != monster.id
                            && other.archetype == MonsterArchetype::Rusher
                            && other.cell.chebyshev_distance(monster.cell) <= RUSHER_PACK_RADIUS
                    })
                    .count();
                damage <<= packmates.min(8);
            }
            incoming += damage;
        }
        if engaged.is_empty() {
            return;
        }
        self.player.in_combat = true;
        let outgoing = (self.player.power as f32
            * self.player.damage_multiplier
            * MELEE_DAMAGE_FRACTION) as i32;
        for &index in &engaged {
            if let Some(monster) = self.monsters.get_mut(index) {
                monster.in_combat = true;
                monster.health -= outgoing;
            }
        }
        if self.player.invulnerability_timer == 0 {
            self.player.health -= incoming;
        }
        out.push(Event::CombatTick);
        for &index in &engaged {
            let died = self
                .monsters
                .get(index)
                .is_some_and(|monster| monster.alive && monster.health <= 0);
            if died {
                self.award_kill(index, out);
            }
        }
        self.check_player_death(out);
    }

    fn resolve_pickups(&mut self, out: &mut Vec<Event>) {
        if !self.player.alive {
            return;
        }
        let cell = self.player.cell;
        while let Some(index) = self.powerups.position(|powerup| powerup.cell == cell) {
            let powerup = self.powerups.swap_remove(index);
            match powerup.kind {
                PowerupKind::DoubleDamage => {
                    self.player.damage_multiplier = 2.0;
                    self.player.powerup_timer = POWERUP_DURATION;
                }
                PowerupKind::DoubleHealth => {
                    self.player.health = self.player.max_health;
                }
                PowerupKind::DoubleSpeed => {
                    self.player.speed_multiplier = 2.0;
                    self.player.powerup_timer = POWERUP_DURATION;
                }
            }
            out.push(Event::PowerupCollected { kind: powerup.kind });
        }
    }

    fn resolve_landmines(&mut self, out: &mut Vec<Event>) {
        if !self.player.alive {
            return;
        }
        let cell = self.player.cell;
        while let Some(index) = self.landmines.position(|landmine| landmine.cell == cell) {
            let landmine = self.landmines.swap_remove(index);
            out.push(Event::LandmineDetonated {
                damage: landmine.damage,
            });
            if self.player.invulnerability_timer == 0 {
                self.player.health -= landmine.damage;
                self.player.invulnerability_timer = HIT_INVULNERABILITY;
            }
        }
        self.check_player_death(out);
    }

    fn step_projectiles(&mut self, out: &mut Vec<Event>) {
        let player_cell = self.player.cell;
        let count = self.projectiles.len();
        for index in 0..count {
            let (cell, damage, effect, distance_from_player, out_of_range) = {
                let Some(projectile) = self.projectiles.get_mut(index) else {
                    continue;
                };
                if !projectile.alive {
                    continue;
                }
                projectile.x += projectile.aim.dx() * projectile.speed;
                projectile.y += projectile.aim.dy() * projectile.speed;
                projectile.traveled += projectile.speed;
                let cell = projectile.cell();
                let dx = projectile.x - player_cell.x() as f32;
                let dy = projectile.y - player_cell.y() as f32;
                (
                    cell,
                    projectile.damage,
                    projectile.effect,
                    (dx * dx + dy * dy).sqrt(),
                    projectile.traveled >= projectile.max_range,
                )
            };
            if out_of_range || distance_from_player > PROJECTILE_SAFETY_RADIUS {
                self.expire_projectile(index, out);
                continue;
            }
            if self.player.alive && cell.chebyshev_distance(player_cell) <= 1 {
                self.strike_player(damage, effect, out);
                self.expire_projectile(index, out);
                continue;
            }
            let victim = self.monsters.position(|monster| {
                monster.alive && monster.cell.chebyshev_distance(cell) <= 1
            });
            if let Some(victim_index) = victim {
                self.strike_monster(victim_index, damage, effect, out);
                self.expire_projectile(index, out);
            }
        }
        self.sweep_dead_projectiles();
    }

    fn expire_projectile(&mut self, index: usize, out: &mut Vec<Event>) {
        if let Some(projectile) = self.projectiles.get_mut(index) {
            if projectile.alive {
                projectile.alive = false;
                out.push(Event::ProjectileExpired {
                    projectile: projectile.id,
                });
            }
        }
    }

    fn strike_player(&mut self, damage: i32, effect: StatusEffect, out: &mut Vec<Event>) {
        if self.player.invulnerability_timer > 0 {
            return;
        }
        self.player.health -= damage;
        self.player.invulnerability_timer = HIT_INVULNERABILITY;
        match effect {
            StatusEffect::Stun => self.player.stun_timer = STUN_DURATION,
            StatusEffect::DamageOverTime => {
                self.player.dot_timer = DOT_DURATION;
                self.player.dot_damage = damage / 3;
            }
            StatusEffect::None => {}
        }
        self.check_player_death(out);
    }

    fn strike_monster(
        &mut self,
        index: usize,
        damage: i32,
        effect: StatusEffect,
        out: &mut Vec<Event>,
    ) {
        let died = {
            let Some(monster) = self.monsters.get_mut(index) else {
                return;
            };
            monster.health -= damage;
            match effect {
                StatusEffect::Stun => monster.stun_timer = STUN_DURATION,
                StatusEffect::DamageOverTime => {
                    monster.dot_timer = DOT_DURATION;
                    monster.dot_damage = damage / 3;
                }
                StatusEffect::None => {}
            }
            monster.alive && monster.health <= 0
        };
        if died {
            self.award_kill(index, out);
        }
    }

    fn award_kill(&mut self, index: usize, out: &mut Vec<Event>) {
        let (id, experience) = match self.monsters.get_mut(index) {
            Some(monster) if monster.alive => {
                monster.alive = false;
                (monster.id, monster.power * XP_PER_POWER)
            }
            _ => return,
        };
        out.push(Event::MonsterDied {
            monster: id,
            experience,
        });
        self.player.experience += experience;
        while self.player.experience >= self.player.experience_to_next {
            self.player.experience -= self.player.experience_to_next;
            self.player.level += 1;
            self.player.experience_to_next = self.player.level * LEVEL_XP_STEP;
            self.player.max_health += LEVEL_HEALTH_BONUS;
            self.player.power += LEVEL_POWER_BONUS;
            self.player.health = self.player.max_health;
            out.push(Event::PlayerLeveledUp {
                level: self.player.level,
            });
        }
    }

    fn check_player_death(&mut self, out: &mut Vec<Event>) {
        if self.player.alive && self.player.health <= 0 {
            self.player.alive = false;
            self.player.health = 0;
            self.player.death_timer = DEATH_RESTART_DELAY;
            out.push(Event::PlayerDied);
        }
    }

    fn update_chunks(&mut self, now_ms: u64, out: &mut Vec<Event>) {
        let center = chunk_containing(self.player.cell);
        for dy in -CHUNK_LOAD_RADIUS..=CHUNK_LOAD_RADIUS {
            for dx in -CHUNK_LOAD_RADIUS..=CHUNK_LOAD_RADIUS {
                let coord = ChunkCoord::new(center.x() + dx, center.y() + dy);
                match self.chunks.ensure_loaded(coord, now_ms) {
                    ChunkLoad::AlreadyLoaded => {}
                    ChunkLoad::Loaded => out.push(Event::ChunkLoaded { chunk: coord }),
                    ChunkLoad::Replaced { evicted } => {
                        out.push(Event::ChunkEvicted { chunk: evicted });
                        out.push(Event::ChunkLoaded { chunk: coord });
                        self.release_chunk_entities(evicted);
                    }
                }
            }
        }
        self.chunks.refresh_region(center, CHUNK_LOAD_RADIUS, now_ms);
    }

    fn release_chunk_entities(&mut self, chunk: ChunkCoord) {
        let player_cell = self.player.cell;
        let doomed = |cell: CellCoord| {
            chunk_containing(cell) == chunk
                && cell.euclidean_distance(player_cell) > PROTECTION_RADIUS
        };
        let mut index = 0;
        while index < self.monsters.len() {
            if self.monsters.get(index).is_some_and(|monster| doomed(monster.cell)) {
                let _ = self.monsters.swap_remove(index);
            } else {
                index += 1;
            }
        }
        let mut index = 0;
        while index < self.powerups.len() {
            if self.powerups.get(index).is_some_and(|powerup| doomed(powerup.cell)) {
                let _ = self.powerups.swap_remove(index);
            } else {
                index += 1;
            }
        }
        let mut index = 0;
        while index < self.landmines.len() {
            if self.landmines.get(index).is_some_and(|landmine| doomed(landmine.cell)) {
                let _ = self.landmines.swap_remove(index);
            } else {
                index += 1;
            }
        }
    }

    fn sweep_dead_monsters(&mut self) {
        let mut index = 0;
        while index < self.monsters.len() {
            if self.monsters.get(index).is_some_and(|monster| !monster.alive) {
                let _ = self.monsters.swap_remove(index);
            } else {
                index += 1;
            }
        }
    }

    fn sweep_dead_projectiles(&mut self) {
        let mut index = 0;
        while index < self.projectiles.len() {
            if self
                .projectiles
                .get(index)
                .is_some_and(|projectile| !projectile.alive)
            {
                let _ = self.projectiles.swap_remove(index);
            } else {
                index += 1;
            }
        }
    }
}

/// Read-only queries over the world, returning owned snapshots.
pub mod query {
    use gridlock_core::{
        CellCoord, ChunkCoord, LandmineSnapshot, LandmineView, MonsterSnapshot, MonsterView,
        PlayerSnapshot, PowerupSnapshot, PowerupView, ProjectileSnapshot, ProjectileView,
        TerrainKind, WELCOME_BANNER,
    };

    use crate::chunks::{chunk_containing, local_cell, Chunk};
    use crate::World;

    /// One sampled terrain cell, paired with its world coordinate.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct TerrainSample {
        /// World cell the sample describes.
        pub cell: CellCoord,
        /// Terrain kind generated for the cell.
        pub kind: TerrainKind,
    }

    /// Banner adapters print when the experience boots.
    #[must_use]
    pub fn welcome_banner() -> &'static str {
        WELCOME_BANNER
    }

    /// Snapshot of the player's current state.
    #[must_use]
    pub fn player(world: &World) -> PlayerSnapshot {
        let player = &world.player;
        PlayerSnapshot {
            cell: player.cell,
            health: player.health,
            max_health: player.max_health,
            power: player.power,
            alive: player.alive,
            level: player.level,
            experience: player.experience,
            experience_to_next: player.experience_to_next,
            in_combat: player.in_combat,
            invulnerable: player.invulnerability_timer > 0,
            stunned: player.stun_timer > 0,
            movement_ready: player.movement_cooldown == 0,
            facing: player.facing,
            intent: player.intent,
            death_timer: player.death_timer,
        }
    }

    /// View of every live monster, ordered by identifier.
    #[must_use]
    pub fn monsters(world: &World) -> MonsterView {
        MonsterView::from_snapshots(
            world
                .monsters
                .iter()
                .filter(|monster| monster.alive)
                .map(|monster| MonsterSnapshot {
                    id: monster.id,
                    cell: monster.cell,
                    archetype: monster.archetype,
                    health: monster.health,
                    max_health: monster.max_health,
                    power: monster.power,
                    in_combat: monster.in_combat,
                    ready: monster.stun_timer == 0 && monster.movement_cooldown == 0,
                })
                .collect(),
        )
    }

    /// View of every uncollected powerup, ordered by identifier.
    #[must_use]
    pub fn powerups(world: &World) -> PowerupView {
        PowerupView::from_snapshots(
            world
                .powerups
                .iter()
                .map(|powerup| PowerupSnapshot {
                    id: powerup.id,
                    cell: powerup.cell,
                    kind: powerup.kind,
                })
                .collect(),
        )
    }

    /// View of every buried landmine, ordered by identifier.
    #[must_use]
    pub fn landmines(world: &World) -> LandmineView {
        LandmineView::from_snapshots(
            world
                .landmines
                .iter()
                .map(|landmine| LandmineSnapshot {
                    id: landmine.id,
                    cell: landmine.cell,
                    damage: landmine.damage,
                })
                .collect(),
        )
    }

    /// View of every projectile in flight, ordered by identifier.
    #[must_use]
    pub fn projectiles(world: &World) -> ProjectileView {
        ProjectileView::from_snapshots(
            world
                .projectiles
                .iter()
                .filter(|projectile| projectile.alive)
                .map(|projectile| ProjectileSnapshot {
                    id: projectile.id,
                    x: projectile.x,
                    y: projectile.y,
                    kind: projectile.kind,
                    traveled: projectile.traveled,
                    max_range: projectile.max_range,
                })
                .collect(),
        )
    }

    /// Terrain kind at the provided cell, when its chunk is resident.
    #[must_use]
    pub fn terrain_at(world: &World, cell: CellCoord) -> Option<TerrainKind> {
        let chunk = world.chunks.find(chunk_containing(cell))?;
        let (local_x, local_y) = local_cell(cell);
        Some(chunk.terrain_at(local_x, local_y))
    }

    /// Terrain samples for the square window of cells centered on `center`,
    /// skipping cells whose chunks are not resident.
    #[must_use]
    pub fn visible_terrain(
        world: &World,
        center: CellCoord,
        half_extent: i32,
    ) -> Vec<TerrainSample> {
        let mut samples = Vec::new();
        for dy in -half_extent..=half_extent {
            for dx in -half_extent..=half_extent {
                let cell = CellCoord::new(center.x() + dx, center.y() + dy);
                if let Some(kind) = terrain_at(world, cell) {
                    samples.push(TerrainSample { cell, kind });
                }
            }
        }
        samples
    }

    /// Number of chunks currently resident.
    #[must_use]
    pub fn loaded_chunk_count(world: &World) -> usize {
        world.chunks.len()
    }

    /// Coordinates of every resident chunk, in table order.
    #[must_use]
    pub fn loaded_chunks(world: &World) -> Vec<ChunkCoord> {
        world.chunks.iter().map(Chunk::coord).collect()
    }

    /// Access stamp of the resident chunk at `chunk`, if any.
    #[must_use]
    pub fn chunk_last_access(world: &World, chunk: ChunkCoord) -> Option<u64> {
        world.chunks.find(chunk).map(Chunk::last_access)
    }
}
