#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Gridlock Arena engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters and systems submit
//! [`Command`] values describing desired mutations, the world executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values
//! for systems to react to deterministically. Systems consume event streams,
//! query immutable snapshots, and respond exclusively with new command
//! batches.

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Gridlock Arena.";

/// Side length of a terrain chunk measured in cells.
pub const CHUNK_SIZE: i32 = 32;

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    /// Requests that the player step in the provided grid direction(s).
    ///
    /// Both axes may be set at once, producing a diagonal step. Components
    /// outside `-1..=1` are clamped by the world.
    MovePlayer {
        /// Intended step expressed in whole cells per axis.
        step: GridVector,
    },
    /// Requests activation of one of the player's special abilities.
    TriggerAbility {
        /// Ability the player attempts to activate.
        ability: Ability,
    },
    /// Requests that the player loose an arrow along the current aim.
    FireArrow,
    /// Resets the entire simulation back to its initial state.
    Restart,
    /// Advances the simulation by one fixed tick.
    Tick {
        /// Monotonic millisecond reading used for chunk access bookkeeping.
        now_ms: u64,
    },
    /// Requests that a monster step by the provided cell offset.
    StepMonster {
        /// Identifier of the monster attempting to move.
        monster: MonsterId,
        /// Offset of the attempted step measured in whole cells.
        step: GridVector,
    },
    /// Requests that a projectile be launched from the provided origin.
    FireProjectile {
        /// Cell the projectile departs from.
        origin: CellCoord,
        /// Direction of travel; degenerate vectors default to up.
        aim: AimVector,
        /// Kind of projectile, which fixes speed, range, and status effect.
        kind: ProjectileKind,
        /// Damage applied on impact.
        damage: i32,
    },
    /// Requests that a monster be spawned with fully resolved stats.
    SpawnMonster {
        /// Cell the monster occupies after spawning.
        cell: CellCoord,
        /// Behavioral archetype assigned to the monster.
        archetype: MonsterArchetype,
        /// Starting (and maximum) health.
        health: i32,
        /// Attack power.
        power: i32,
    },
    /// Requests that a powerup be placed into the world.
    SpawnPowerup {
        /// Cell the powerup occupies.
        cell: CellCoord,
        /// Effect granted when the player collects it.
        kind: PowerupKind,
    },
    /// Requests that a landmine be buried at the provided cell.
    SpawnLandmine {
        /// Cell the landmine occupies.
        cell: CellCoord,
        /// One-shot damage applied when triggered.
        damage: i32,
    },
    /// Requests removal of a monster that drifted out of relevance.
    DespawnMonster {
        /// Identifier of the monster to remove.
        monster: MonsterId,
    },
    /// Requests removal of a powerup that drifted out of relevance.
    DespawnPowerup {
        /// Identifier of the powerup to remove.
        powerup: PowerupId,
    },
    /// Requests removal of a landmine that drifted out of relevance.
    DespawnLandmine {
        /// Identifier of the landmine to remove.
        landmine: LandmineId,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Announces that the simulation was reset to its initial state.
    WorldRestarted,
    /// Confirms that the player moved between two cells.
    PlayerMoved {
        /// Cell the player occupied before the step.
        from: CellCoord,
        /// Cell the player occupies after the step.
        to: CellCoord,
    },
    /// Announces that a chunk finished loading and generating terrain.
    ChunkLoaded {
        /// Coordinate of the freshly loaded chunk.
        chunk: ChunkCoord,
    },
    /// Announces that a chunk was evicted from the loaded table.
    ChunkEvicted {
        /// Coordinate of the evicted chunk.
        chunk: ChunkCoord,
    },
    /// Reports that melee combat dealt damage this tick.
    CombatTick,
    /// Confirms that a monster died and experience was granted.
    MonsterDied {
        /// Identifier of the monster that died.
        monster: MonsterId,
        /// Experience granted to the player.
        experience: i32,
    },
    /// Announces that the player reached a new level.
    PlayerLeveledUp {
        /// Level that became active.
        level: i32,
    },
    /// Announces that the player's health was exhausted.
    PlayerDied,
    /// Confirms that the player collected an active powerup.
    PowerupCollected {
        /// Effect granted by the collected powerup.
        kind: PowerupKind,
    },
    /// Confirms that the player triggered a buried landmine.
    LandmineDetonated {
        /// Damage applied by the detonation.
        damage: i32,
    },
    /// Reports that a projectile left play.
    ProjectileExpired {
        /// Identifier of the expired projectile.
        projectile: ProjectileId,
    },
}

/// Unique identifier assigned to a monster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonsterId(u32);

impl MonsterId {
    /// Creates a new monster identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a powerup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PowerupId(u32);

impl PowerupId {
    /// Creates a new powerup identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a landmine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LandmineId(u32);

impl LandmineId {
    /// Creates a new landmine identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectileId(u32);

impl ProjectileId {
    /// Creates a new projectile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location of a single world cell expressed as signed, unbounded coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    x: i32,
    y: i32,
}

impl CellCoord {
    /// Creates a new world cell coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Signed x component of the cell.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Signed y component of the cell.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns the cell offset by the provided vector.
    #[must_use]
    pub const fn offset_by(self, vector: GridVector) -> Self {
        Self {
            x: self.x.wrapping_add(vector.dx()),
            y: self.y.wrapping_add(vector.dy()),
        }
    }

    /// Computes the Chebyshev (chessboard) distance between two cells.
    #[must_use]
    pub fn chebyshev_distance(self, other: CellCoord) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    /// Computes the Euclidean distance between two cells.
    #[must_use]
    pub fn euclidean_distance(self, other: CellCoord) -> f32 {
        let dx = (self.x as f64) - (other.x as f64);
        let dy = (self.y as f64) - (other.y as f64);
        ((dx * dx + dy * dy) as f32).sqrt()
    }

    /// Reports whether the two cells touch without overlapping.
    ///
    /// Adjacency includes diagonals and excludes self-overlap, matching the
    /// melee combat radius.
    #[must_use]
    pub fn is_adjacent_to(self, other: CellCoord) -> bool {
        self != other && self.chebyshev_distance(other) <= 1
    }
}

/// Coordinate of a terrain chunk measured in whole chunks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkCoord {
    x: i32,
    y: i32,
}

impl ChunkCoord {
    /// Creates a new chunk coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Signed x component of the chunk.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Signed y component of the chunk.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }
}

/// Whole-cell offset applied to grid positions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridVector {
    dx: i32,
    dy: i32,
}

impl GridVector {
    /// Creates a new grid vector from per-axis components.
    #[must_use]
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// Horizontal component of the vector.
    #[must_use]
    pub const fn dx(&self) -> i32 {
        self.dx
    }

    /// Vertical component of the vector.
    #[must_use]
    pub const fn dy(&self) -> i32 {
        self.dy
    }

    /// Reports whether both components are zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }

    /// Returns the vector with each component clamped to `-1..=1`.
    #[must_use]
    pub fn clamped_to_unit_step(self) -> Self {
        Self {
            dx: self.dx.clamp(-1, 1),
            dy: self.dy.clamp(-1, 1),
        }
    }
}

/// Cardinal movement directions available to characters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Movement toward decreasing y.
    Up,
    /// Movement toward increasing y.
    Down,
    /// Movement toward decreasing x.
    Left,
    /// Movement toward increasing x.
    Right,
}

impl Direction {
    /// All four cardinal directions in a fixed order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Returns the unit grid vector corresponding to the direction.
    #[must_use]
    pub const fn as_vector(self) -> GridVector {
        match self {
            Direction::Up => GridVector::new(0, -1),
            Direction::Down => GridVector::new(0, 1),
            Direction::Left => GridVector::new(-1, 0),
            Direction::Right => GridVector::new(1, 0),
        }
    }
}

/// Floating-point direction used for projectile travel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AimVector {
    dx: f32,
    dy: f32,
}

impl AimVector {
    /// Creates an aim vector from raw components.
    #[must_use]
    pub const fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }

    /// Horizontal component of the aim.
    #[must_use]
    pub const fn dx(&self) -> f32 {
        self.dx
    }

    /// Vertical component of the aim.
    #[must_use]
    pub const fn dy(&self) -> f32 {
        self.dy
    }

    /// Returns the aim normalized to unit length.
    ///
    /// Degenerate vectors (zero length, or non-finite components) default to
    /// straight up so callers never observe an unusable direction.
    #[must_use]
    pub fn normalized_or_up(self) -> Self {
        let length_squared = self.dx * self.dx + self.dy * self.dy;
        if !length_squared.is_finite() || length_squared <= f32::EPSILON {
            return Self { dx: 0.0, dy: -1.0 };
        }
        let length = length_squared.sqrt();
        Self {
            dx: self.dx / length,
            dy: self.dy / length,
        }
    }
}

/// Terrain kinds assigned to individual world cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerrainKind {
    /// Open grassland, the default walkable cell.
    Grass,
    /// Elevated rocky cell that biases powerful monsters.
    Mountain,
    /// Forested cell.
    Tree,
    /// Inland freshwater cell.
    Lake,
    /// Deep water cell, favoured near chunk edges.
    Sea,
}

/// Effects granted when the player collects a powerup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerupKind {
    /// Doubles damage dealt for the powerup duration.
    DoubleDamage,
    /// Instantly restores the player to full health.
    DoubleHealth,
    /// Doubles movement speed for the powerup duration.
    DoubleSpeed,
}

impl PowerupKind {
    /// All powerup kinds in a fixed order.
    pub const ALL: [PowerupKind; 3] = [
        PowerupKind::DoubleDamage,
        PowerupKind::DoubleHealth,
        PowerupKind::DoubleSpeed,
    ];
}

/// Status effect attached to a projectile kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusEffect {
    /// No effect beyond impact damage.
    None,
    /// Prevents the victim from moving or acting while the timer runs.
    Stun,
    /// Applies periodic damage while the timer runs.
    DamageOverTime,
}

/// Kinds of projectiles travelling through the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileKind {
    /// Long-range stunning bolt.
    Lightning,
    /// Medium-range burning projectile applying damage over time.
    Fireball,
    /// Short-range arrow with no attached effect.
    Arrow,
}

impl ProjectileKind {
    /// Status effect applied to whatever the projectile strikes.
    #[must_use]
    pub const fn status_effect(self) -> StatusEffect {
        match self {
            Self::Lightning => StatusEffect::Stun,
            Self::Fireball => StatusEffect::DamageOverTime,
            Self::Arrow => StatusEffect::None,
        }
    }

    /// Maximum distance the projectile may travel before expiring.
    #[must_use]
    pub const fn max_range(self) -> f32 {
        match self {
            Self::Lightning => 200.0,
            Self::Fireball => 150.0,
            Self::Arrow => 80.0,
        }
    }

    /// Distance travelled per simulation tick.
    #[must_use]
    pub const fn speed(self) -> f32 {
        match self {
            Self::Lightning | Self::Fireball | Self::Arrow => 2.0,
        }
    }
}

/// Behavioral archetypes a monster may be assigned.
///
/// The archetype carries every behavior-relevant parameter so simulation
/// logic never branches on visual asset selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonsterArchetype {
    /// Closes distance toward the player at elevated speed; packs of
    /// adjacent rushers amplify each other's melee damage.
    Rusher,
    /// Keeps its distance and periodically fires its bolt at the player.
    Caster {
        /// Projectile kind the caster launches.
        bolt: ProjectileKind,
    },
    /// Steps uniformly at random among the four cardinal directions.
    Wanderer,
}

/// Player abilities that fire once per activation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Ability {
    /// Leap along the current facing and damage everything nearby.
    Smash,
    /// Temporary doubled movement speed.
    Rush,
    /// Restore the player to full health.
    Heal,
}

/// Immutable representation of the player's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerSnapshot {
    /// Cell currently occupied by the player.
    pub cell: CellCoord,
    /// Remaining health.
    pub health: i32,
    /// Maximum health.
    pub max_health: i32,
    /// Attack power before multipliers.
    pub power: i32,
    /// Whether the player is alive.
    pub alive: bool,
    /// Current level.
    pub level: i32,
    /// Experience accrued toward the next level.
    pub experience: i32,
    /// Experience required to reach the next level.
    pub experience_to_next: i32,
    /// Whether the player traded melee damage this tick.
    pub in_combat: bool,
    /// Whether the invulnerability window is active.
    pub invulnerable: bool,
    /// Whether the stun timer is active.
    pub stunned: bool,
    /// Whether the movement cooldown has elapsed.
    pub movement_ready: bool,
    /// Direction of the player's most recent step.
    pub facing: GridVector,
    /// Direction the player is currently trying to move.
    pub intent: GridVector,
    /// Ticks remaining before the dead player may be respawned.
    pub death_timer: u32,
}

/// Immutable representation of a single monster's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonsterSnapshot {
    /// Unique identifier assigned to the monster.
    pub id: MonsterId,
    /// Cell currently occupied by the monster.
    pub cell: CellCoord,
    /// Behavioral archetype assigned at spawn.
    pub archetype: MonsterArchetype,
    /// Remaining health.
    pub health: i32,
    /// Maximum health.
    pub max_health: i32,
    /// Attack power.
    pub power: i32,
    /// Whether the monster traded melee damage this tick.
    pub in_combat: bool,
    /// Whether the monster may act this tick (cooldown elapsed, not stunned).
    pub ready: bool,
}

/// Immutable representation of a single powerup used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PowerupSnapshot {
    /// Unique identifier assigned to the powerup.
    pub id: PowerupId,
    /// Cell the powerup occupies.
    pub cell: CellCoord,
    /// Effect granted on collection.
    pub kind: PowerupKind,
}

/// Immutable representation of a single landmine used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LandmineSnapshot {
    /// Unique identifier assigned to the landmine.
    pub id: LandmineId,
    /// Cell the landmine occupies.
    pub cell: CellCoord,
    /// Damage applied when triggered.
    pub damage: i32,
}

/// Immutable representation of a single projectile used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileSnapshot {
    /// Unique identifier assigned to the projectile.
    pub id: ProjectileId,
    /// Horizontal position in cell units.
    pub x: f32,
    /// Vertical position in cell units.
    pub y: f32,
    /// Kind of projectile in flight.
    pub kind: ProjectileKind,
    /// Distance travelled so far.
    pub traveled: f32,
    /// Maximum travel distance before expiry.
    pub max_range: f32,
}

/// Read-only snapshot describing all live monsters.
#[derive(Clone, Debug, Default)]
pub struct MonsterView {
    snapshots: Vec<MonsterSnapshot>,
}

impl MonsterView {
    /// Creates a new monster view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<MonsterSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured monster snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &MonsterSnapshot> {
        self.snapshots.iter()
    }

    /// Number of captured snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view captured no monsters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<MonsterSnapshot> {
        self.snapshots
    }
}

/// Read-only snapshot describing all active powerups.
#[derive(Clone, Debug, Default)]
pub struct PowerupView {
    snapshots: Vec<PowerupSnapshot>,
}

impl PowerupView {
    /// Creates a new powerup view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<PowerupSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured powerup snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &PowerupSnapshot> {
        self.snapshots.iter()
    }

    /// Number of captured snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view captured no powerups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

/// Read-only snapshot describing all active landmines.
#[derive(Clone, Debug, Default)]
pub struct LandmineView {
    snapshots: Vec<LandmineSnapshot>,
}

impl LandmineView {
    /// Creates a new landmine view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<LandmineSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured landmine snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &LandmineSnapshot> {
        self.snapshots.iter()
    }

    /// Number of captured snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view captured no landmines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

/// Read-only snapshot describing all projectiles in flight.
#[derive(Clone, Debug, Default)]
pub struct ProjectileView {
    snapshots: Vec<ProjectileSnapshot>,
}

impl ProjectileView {
    /// Creates a new projectile view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<ProjectileSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured projectile snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &ProjectileSnapshot> {
        self.snapshots.iter()
    }

    /// Number of captured snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view captured no projectiles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}
