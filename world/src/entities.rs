//! Fixed-capacity entity storage and the concrete entity records.
//!
//! Every entity class lives in an [`Arena`] with a hard capacity. Spawning
//! into a full arena is a no-op, and removal swaps the last element into the
//! vacated slot so iteration stays dense. Entities are located by their
//! stable identifier, never by slot index, because slots are recycled.

use gridlock_core::{
    AimVector, CellCoord, GridVector, LandmineId, MonsterArchetype, MonsterId, PowerupId,
    PowerupKind, ProjectileId, ProjectileKind, StatusEffect,
};

/// Dense storage for one entity class with a fixed upper bound.
#[derive(Clone, Debug)]
pub(crate) struct Arena<T> {
    slots: Vec<T>,
    capacity: usize,
}

impl<T> Arena<T> {
    /// Creates an empty arena that will hold at most `capacity` entities.
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Number of live entities.
    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    /// Attempts to insert an entity, reporting whether space remained.
    pub(crate) fn try_push(&mut self, entity: T) -> bool {
        if self.slots.len() >= self.capacity {
            return false;
        }
        self.slots.push(entity);
        true
    }

    /// Removes the entity at `index`, filling the hole with the last entry.
    pub(crate) fn swap_remove(&mut self, index: usize) -> T {
        self.slots.swap_remove(index)
    }

    /// Shared iterator over the live entities in slot order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &T> {
        self.slots.iter()
    }

    /// Exclusive iterator over the live entities in slot order.
    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.slots.iter_mut()
    }

    /// Shared access to the entity at `index`.
    pub(crate) fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index)
    }

    /// Exclusive access to the entity at `index`.
    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slots.get_mut(index)
    }

    /// Index of the first entity matching the predicate.
    pub(crate) fn position(&self, predicate: impl FnMut(&T) -> bool) -> Option<usize> {
        self.slots.iter().position(predicate)
    }
}

/// A hostile inhabitant of the arena.
#[derive(Clone, Debug)]
pub(crate) struct Monster {
    pub(crate) id: MonsterId,
    pub(crate) cell: CellCoord,
    pub(crate) archetype: MonsterArchetype,
    pub(crate) health: i32,
    pub(crate) max_health: i32,
    pub(crate) power: i32,
    pub(crate) alive: bool,
    pub(crate) in_combat: bool,
    pub(crate) movement_cooldown: u32,
    pub(crate) stun_timer: u32,
    pub(crate) dot_timer: u32,
    pub(crate) dot_damage: i32,
}

impl Monster {
    pub(crate) fn new(
        id: MonsterId,
        cell: CellCoord,
        archetype: MonsterArchetype,
        health: i32,
        power: i32,
    ) -> Self {
        Self {
            id,
            cell,
            archetype,
            health,
            max_health: health,
            power,
            alive: true,
            in_combat: false,
            movement_cooldown: 0,
            stun_timer: 0,
            dot_timer: 0,
            dot_damage: 0,
        }
    }
}

/// A collectible buff waiting on the ground.
#[derive(Clone, Debug)]
pub(crate) struct Powerup {
    pub(crate) id: PowerupId,
    pub(crate) cell: CellCoord,
    pub(crate) kind: PowerupKind,
}

/// A buried one-shot trap.
#[derive(Clone, Debug)]
pub(crate) struct Landmine {
    pub(crate) id: LandmineId,
    pub(crate) cell: CellCoord,
    pub(crate) damage: i32,
}

/// A bolt in flight, tracked at sub-cell resolution.
#[derive(Clone, Debug)]
pub(crate) struct Projectile {
    pub(crate) id: ProjectileId,
    pub(crate) x: f32,
    pub(crate) y: f32,
    pub(crate) aim: AimVector,
    pub(crate) kind: ProjectileKind,
    pub(crate) damage: i32,
    pub(crate) effect: StatusEffect,
    pub(crate) speed: f32,
    pub(crate) traveled: f32,
    pub(crate) max_range: f32,
    pub(crate) alive: bool,
}

impl Projectile {
    pub(crate) fn new(
        id: ProjectileId,
        origin: CellCoord,
        aim: AimVector,
        kind: ProjectileKind,
        damage: i32,
    ) -> Self {
        Self {
            id,
            x: origin.x() as f32,
            y: origin.y() as f32,
            aim: aim.normalized_or_up(),
            kind,
            damage,
            effect: kind.status_effect(),
            speed: kind.speed(),
            traveled: 0.0,
            max_range: kind.max_range(),
            alive: true,
        }
    }

    /// Cell the projectile currently overlaps.
    pub(crate) fn cell(&self) -> CellCoord {
        CellCoord::new(self.x.round() as i32, self.y.round() as i32)
    }
}

/// The authoritative player record.
#[derive(Clone, Debug)]
pub(crate) struct Player {
    pub(crate) cell: CellCoord,
    pub(crate) health: i32,
    pub(crate) max_health: i32,
    pub(crate) power: i32,
    pub(crate) alive: bool,
    pub(crate) level: i32,
    pub(crate) experience: i32,
    pub(crate) experience_to_next: i32,
    pub(crate) damage_multiplier: f32,
    pub(crate) speed_multiplier: f32,
    pub(crate) powerup_timer: u32,
    pub(crate) speed_boost_timer: u32,
    pub(crate) movement_cooldown: u32,
    pub(crate) invulnerability_timer: u32,
    pub(crate) stun_timer: u32,
    pub(crate) dot_timer: u32,
    pub(crate) dot_damage: i32,
    pub(crate) smash_cooldown: u32,
    pub(crate) rush_cooldown: u32,
    pub(crate) heal_cooldown: u32,
    pub(crate) arrow_cooldown: u32,
    pub(crate) in_combat: bool,
    pub(crate) facing: GridVector,
    pub(crate) intent: GridVector,
    pub(crate) death_timer: u32,
}

impl Player {
    pub(crate) fn spawn(cell: CellCoord, health: i32, power: i32) -> Self {
        Self {
            cell,
            health,
            max_health: health,
            power,
            alive: true,
            level: 1,
            experience: 0,
            experience_to_next: 100,
            damage_multiplier: 1.0,
            speed_multiplier: 1.0,
            powerup_timer: 0,
            speed_boost_timer: 0,
            movement_cooldown: 0,
            invulnerability_timer: 0,
            stun_timer: 0,
            dot_timer: 0,
            dot_damage: 0,
            smash_cooldown: 0,
            rush_cooldown: 0,
            heal_cooldown: 0,
            arrow_cooldown: 0,
            in_combat: false,
            facing: GridVector::new(0, -1),
            intent: GridVector::default(),
            death_timer: 0,
        }
    }
}
