#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic population maintenance system.
//!
//! The system keeps the area around the player stocked: freshly loaded
//! chunks receive a sparse scatter of monsters, ring-shaped bands around the
//! player are topped up to their configured minima every tick, and monsters
//! that drift far out of relevance are despawned once enough remain nearby.
//! All randomness flows from one seeded stream, so a fixed seed replays the
//! same population decisions.

use std::f64::consts::TAU;

use gridlock_core::{
    CellCoord, ChunkCoord, Command, Event, LandmineView, MonsterArchetype, MonsterView,
    PlayerSnapshot, PowerupKind, PowerupView, ProjectileKind, CHUNK_SIZE,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const MONSTER_BASE_HEALTH: i32 = 20;
const MONSTER_HEALTH_SPREAD: i32 = 30;
const MONSTER_BASE_POWER: i32 = 3;
const MONSTER_POWER_SPREAD: i32 = 5;
const LANDMINE_BASE_DAMAGE: i32 = 15;
const LANDMINE_DAMAGE_SPREAD: i32 = 10;
const LEVEL_HEALTH_BONUS: i32 = 5;
const LEVEL_POWER_BONUS: i32 = 1;
/// Chance that a band top-up places a second monster beside the first.
const CLUSTER_CHANCE: f64 = 0.1;
const CHUNK_POWERUP_MAX: u32 = 1;
const CHUNK_LANDMINE_MAX: u32 = 2;

const WORLD_ORIGIN: CellCoord = CellCoord::new(0, 0);

/// Ring-shaped spawn band centered on the player.
#[derive(Clone, Copy, Debug)]
pub struct BandTuning {
    /// Inner radius of the band; nothing spawns closer to the player.
    pub min_radius: f64,
    /// Outer radius of the band.
    pub max_radius: f64,
    /// Population floor the band is topped up to every tick.
    pub minimum: usize,
    /// Minimum Chebyshev spacing between entities of this class.
    pub separation: u32,
    /// Hard cap on the total population of this class.
    pub cap: usize,
}

/// One-off scatter of monsters placed close to a fresh spawn.
#[derive(Clone, Copy, Debug)]
pub struct BurstTuning {
    /// Number of monsters in the burst.
    pub count: usize,
    /// Inner radius of the burst ring.
    pub min_radius: f64,
    /// Outer radius of the burst ring.
    pub max_radius: f64,
}

/// Aggregated tuning knobs for the population system.
#[derive(Clone, Copy, Debug)]
pub struct PopulationTuning {
    /// Monster spawn band and floor.
    pub monsters: BandTuning,
    /// Powerup spawn band and floor.
    pub powerups: BandTuning,
    /// Landmine spawn band and floor.
    pub landmines: BandTuning,
    /// Initial scatter placed when a run starts or restarts.
    pub burst: BurstTuning,
    /// Placement attempts allowed per missing entity before giving up.
    pub retry_budget: u32,
    /// Per-cell chance that a freshly generated chunk cell hosts a monster.
    pub chunk_cell_chance: f64,
    /// Monsters beyond this distance become despawn candidates.
    pub despawn_radius: f64,
    /// Distant monsters are only despawned while at least this many remain
    /// within the despawn radius.
    pub despawn_guard: usize,
}

impl Default for PopulationTuning {
    fn default() -> Self {
        Self {
            monsters: BandTuning {
                min_radius: 50.0,
                max_radius: 300.0,
                minimum: 50,
                separation: 1,
                cap: 2_000,
            },
            powerups: BandTuning {
                min_radius: 100.0,
                max_radius: 400.0,
                minimum: 5,
                separation: 2,
                cap: 50,
            },
            landmines: BandTuning {
                min_radius: 150.0,
                max_radius: 500.0,
                minimum: 10,
                separation: 3,
                cap: 100,
            },
            burst: BurstTuning {
                count: 10,
                min_radius: 5.0,
                max_radius: 50.0,
            },
            retry_budget: 10,
            chunk_cell_chance: 0.02,
            despawn_radius: 300.0,
            despawn_guard: 6,
        }
    }
}

/// Configuration parameters required to construct the population system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided seed.
    #[must_use]
    pub const fn new(rng_seed: u64) -> Self {
        Self { rng_seed }
    }
}

/// Pure system that emits spawn and despawn commands to maintain density.
#[derive(Debug)]
pub struct Population {
    rng: ChaCha8Rng,
    tuning: PopulationTuning,
    seeded: bool,
}

impl Population {
    /// Creates a new population system with default tuning.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self::with_tuning(config, PopulationTuning::default())
    }

    /// Creates a new population system with custom tuning.
    #[must_use]
    pub fn with_tuning(config: Config, tuning: PopulationTuning) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
            tuning,
            seeded: false,
        }
    }

    /// Consumes this tick's events and views, emitting population commands.
    pub fn handle(
        &mut self,
        events: &[Event],
        player: &PlayerSnapshot,
        monsters: &MonsterView,
        powerups: &PowerupView,
        landmines: &LandmineView,
        out: &mut Vec<Command>,
    ) {
        let restarted = events
            .iter()
            .any(|event| matches!(event, Event::WorldRestarted));
        let mut monster_cells: Vec<CellCoord> =
            monsters.iter().map(|monster| monster.cell).collect();
        let mut monster_count = monster_cells.len();
        let mut powerup_cells: Vec<CellCoord> =
            powerups.iter().map(|powerup| powerup.cell).collect();
        let mut landmine_cells: Vec<CellCoord> =
            landmines.iter().map(|landmine| landmine.cell).collect();

        if restarted || !self.seeded {
            self.seeded = true;
            self.spawn_burst(player, &mut monster_cells, &mut monster_count, out);
        }

        for event in events {
            if let Event::ChunkLoaded { chunk } = event {
                self.seed_chunk(
                    *chunk,
                    player,
                    &mut monster_cells,
                    &mut monster_count,
                    &mut powerup_cells,
                    &mut landmine_cells,
                    out,
                );
            }
        }

        self.despawn_distant_monsters(player, monsters, out);
        self.top_up_monsters(player, &mut monster_cells, &mut monster_count, out);
        self.top_up_powerups(player, &mut powerup_cells, out);
        self.top_up_landmines(player, &mut landmine_cells, out);
    }

    fn spawn_burst(
        &mut self,
        player: &PlayerSnapshot,
        occupied: &mut Vec<CellCoord>,
        count: &mut usize,
        out: &mut Vec<Command>,
    ) {
        let burst = self.tuning.burst;
        let band = self.tuning.monsters;
        for _ in 0..burst.count {
            if *count >= band.cap {
                return;
            }
            let Some(cell) = self.place_in_ring(
                player.cell,
                burst.min_radius,
                burst.max_radius,
                band.separation,
                occupied,
            ) else {
                continue;
            };
            occupied.push(cell);
            *count += 1;
            out.push(self.roll_monster(cell, player.level));
        }
    }

    fn seed_chunk(
        &mut self,
        chunk: ChunkCoord,
        player: &PlayerSnapshot,
        occupied: &mut Vec<CellCoord>,
        count: &mut usize,
        powerup_cells: &mut Vec<CellCoord>,
        landmine_cells: &mut Vec<CellCoord>,
        out: &mut Vec<Command>,
    ) {
        let band = self.tuning.monsters;
        let base_x = chunk.x() * CHUNK_SIZE;
        let base_y = chunk.y() * CHUNK_SIZE;
        'scan: for local_y in 0..CHUNK_SIZE {
            for local_x in 0..CHUNK_SIZE {
                if !self.rng.gen_bool(self.tuning.chunk_cell_chance) {
                    continue;
                }
                if *count >= band.cap {
                    break 'scan;
                }
                let cell = CellCoord::new(base_x + local_x, base_y + local_y);
                if cell == player.cell
                    || cell == WORLD_ORIGIN
                    || violates_separation(cell, band.separation, occupied)
                {
                    continue;
                }
                occupied.push(cell);
                *count += 1;
                out.push(self.roll_monster(cell, player.level));
            }
        }

        let powerup_rolls = self.rng.gen_range(0..=CHUNK_POWERUP_MAX);
        for _ in 0..powerup_rolls {
            if powerup_cells.len() >= self.tuning.powerups.cap {
                break;
            }
            let Some(cell) = self.place_in_chunk(
                chunk,
                player,
                self.tuning.powerups.separation,
                powerup_cells,
            ) else {
                continue;
            };
            powerup_cells.push(cell);
            let kind = PowerupKind::ALL[self.rng.gen_range(0..PowerupKind::ALL.len())];
            out.push(Command::SpawnPowerup { cell, kind });
        }

        let landmine_rolls = self.rng.gen_range(0..=CHUNK_LANDMINE_MAX);
        for _ in 0..landmine_rolls {
            if landmine_cells.len() >= self.tuning.landmines.cap {
                break;
            }
            let Some(cell) = self.place_in_chunk(
                chunk,
                player,
                self.tuning.landmines.separation,
                landmine_cells,
            ) else {
                continue;
            };
            landmine_cells.push(cell);
            let damage = LANDMINE_BASE_DAMAGE + self.rng.gen_range(0..LANDMINE_DAMAGE_SPREAD);
            out.push(Command::SpawnLandmine { cell, damage });
        }
    }

    /// Samples a cell inside `chunk`, honoring separation.
    fn place_in_chunk(
        &mut self,
        chunk: ChunkCoord,
        player: &PlayerSnapshot,
        separation: u32,
        occupied: &[CellCoord],
    ) -> Option<CellCoord> {
        let base_x = chunk.x() * CHUNK_SIZE;
        let base_y = chunk.y() * CHUNK_SIZE;
        for _ in 0..self.tuning.retry_budget {
            let cell = CellCoord::new(
                base_x + self.rng.gen_range(0..CHUNK_SIZE),
                base_y + self.rng.gen_range(0..CHUNK_SIZE),
            );
            if cell == player.cell
                || cell == WORLD_ORIGIN
                || violates_separation(cell, separation, occupied)
            {
                continue;
            }
            return Some(cell);
        }
        None
    }

    fn despawn_distant_monsters(
        &mut self,
        player: &PlayerSnapshot,
        monsters: &MonsterView,
        out: &mut Vec<Command>,
    ) {
        let radius = self.tuning.despawn_radius as f32;
        let nearby = monsters
            .iter()
            .filter(|monster| monster.cell.euclidean_distance(player.cell) <= radius)
            .count();
        if nearby < self.tuning.despawn_guard {
            return;
        }
        for monster in monsters.iter() {
            if monster.cell.euclidean_distance(player.cell) > radius {
                out.push(Command::DespawnMonster {
                    monster: monster.id,
                });
            }
        }
    }

    fn top_up_monsters(
        &mut self,
        player: &PlayerSnapshot,
        occupied: &mut Vec<CellCoord>,
        count: &mut usize,
        out: &mut Vec<Command>,
    ) {
        let band = self.tuning.monsters;
        let nearby = occupied
            .iter()
            .filter(|cell| cell.euclidean_distance(player.cell) <= band.max_radius as f32)
            .count();
        let deficit = band.minimum.saturating_sub(nearby);
        for _ in 0..deficit {
            if *count >= band.cap {
                return;
            }
            let Some(cell) = self.place_in_ring(
                player.cell,
                band.min_radius,
                band.max_radius,
                band.separation,
                occupied,
            ) else {
                continue;
            };
            occupied.push(cell);
            *count += 1;
            out.push(self.roll_monster(cell, player.level));

            // Packs are scarier than loners, so some top-ups arrive in pairs.
            if *count < band.cap && self.rng.gen_bool(CLUSTER_CHANCE) {
                if let Some(partner) = self.place_beside(cell, player, band.separation, occupied) {
                    occupied.push(partner);
                    *count += 1;
                    out.push(self.roll_monster(partner, player.level));
                }
            }
        }
    }

    fn top_up_powerups(
        &mut self,
        player: &PlayerSnapshot,
        occupied: &mut Vec<CellCoord>,
        out: &mut Vec<Command>,
    ) {
        let band = self.tuning.powerups;
        let deficit = band.minimum.saturating_sub(occupied.len());
        for _ in 0..deficit {
            if occupied.len() >= band.cap {
                return;
            }
            let Some(cell) = self.place_in_ring(
                player.cell,
                band.min_radius,
                band.max_radius,
                band.separation,
                occupied,
            ) else {
                continue;
            };
            occupied.push(cell);
            let kind = PowerupKind::ALL[self.rng.gen_range(0..PowerupKind::ALL.len())];
            out.push(Command::SpawnPowerup { cell, kind });
        }
    }

    fn top_up_landmines(
        &mut self,
        player: &PlayerSnapshot,
        occupied: &mut Vec<CellCoord>,
        out: &mut Vec<Command>,
    ) {
        let band = self.tuning.landmines;
        let deficit = band.minimum.saturating_sub(occupied.len());
        for _ in 0..deficit {
            if occupied.len() >= band.cap {
                return;
            }
            let Some(cell) = self.place_in_ring(
                player.cell,
                band.min_radius,
                band.max_radius,
                band.separation,
                occupied,
            ) else {
                continue;
            };
            occupied.push(cell);
            let damage = LANDMINE_BASE_DAMAGE + self.rng.gen_range(0..LANDMINE_DAMAGE_SPREAD);
            out.push(Command::SpawnLandmine { cell, damage });
        }
    }

    /// Samples a cell in the ring around `center`, honoring separation.
    ///
    /// Gives up after the retry budget is spent so a crowded ring can never
    /// stall the tick.
    fn place_in_ring(
        &mut self,
        center: CellCoord,
        min_radius: f64,
        max_radius: f64,
        separation: u32,
        occupied: &[CellCoord],
    ) -> Option<CellCoord> {
        for _ in 0..self.tuning.retry_budget {
            let radius = self.rng.gen_range(min_radius..=max_radius);
            let angle = self.rng.gen_range(0.0..TAU);
            let cell = CellCoord::new(
                center.x() + (radius * angle.cos()).round() as i32,
                center.y() + (radius * angle.sin()).round() as i32,
            );
            if cell == center
                || cell == WORLD_ORIGIN
                || violates_separation(cell, separation, occupied)
            {
                continue;
            }
            return Some(cell);
        }
        None
    }

    /// Samples a cell adjacent to `anchor` for a pack partner.
    fn place_beside(
        &mut self,
        anchor: CellCoord,
        player: &PlayerSnapshot,
        separation: u32,
        occupied: &[CellCoord],
    ) -> Option<CellCoord> {
        for _ in 0..self.tuning.retry_budget {
            let cell = CellCoord::new(
                anchor.x() + self.rng.gen_range(-1..=1),
                anchor.y() + self.rng.gen_range(-1..=1),
            );
            if cell == anchor
                || cell == player.cell
                || cell == WORLD_ORIGIN
                || violates_separation(cell, separation, occupied)
            {
                continue;
            }
            return Some(cell);
        }
        None
    }

    fn roll_monster(&mut self, cell: CellCoord, player_level: i32) -> Command {
        let archetype = match self.rng.gen_range(0..5) {
            0 => MonsterArchetype::Rusher,
            1 => MonsterArchetype::Caster {
                bolt: ProjectileKind::Lightning,
            },
            2 => MonsterArchetype::Caster {
                bolt: ProjectileKind::Fireball,
            },
            _ => MonsterArchetype::Wanderer,
        };
        // Spawns keep pace with the player's progression.
        let level_bonus = player_level.max(1) - 1;
        Command::SpawnMonster {
            cell,
            archetype,
            health: MONSTER_BASE_HEALTH
                + self.rng.gen_range(0..MONSTER_HEALTH_SPREAD)
                + level_bonus * LEVEL_HEALTH_BONUS,
            power: MONSTER_BASE_POWER
                + self.rng.gen_range(0..MONSTER_POWER_SPREAD)
                + level_bonus * LEVEL_POWER_BONUS,
        }
    }
}

fn violates_separation(cell: CellCoord, separation: u32, occupied: &[CellCoord]) -> bool {
    occupied
        .iter()
        .any(|other| cell.chebyshev_distance(*other) < separation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridlock_core::{GridVector, MonsterId, MonsterSnapshot};

    fn player_at(cell: CellCoord) -> PlayerSnapshot {
        PlayerSnapshot {
            cell,
            health: 100,
            max_health: 100,
            power: 8,
            alive: true,
            level: 1,
            experience: 0,
            experience_to_next: 100,
            in_combat: false,
            invulnerable: false,
            stunned: false,
            movement_ready: true,
            facing: GridVector::new(0, -1),
            intent: GridVector::default(),
            death_timer: 0,
        }
    }

    fn monster_at(id: u32, cell: CellCoord) -> MonsterSnapshot {
        MonsterSnapshot {
            id: MonsterId::new(id),
            cell,
            archetype: MonsterArchetype::Wanderer,
            health: 30,
            max_health: 30,
            power: 5,
            in_combat: false,
            ready: true,
        }
    }

    fn empty_views() -> (MonsterView, PowerupView, LandmineView) {
        (
            MonsterView::default(),
            PowerupView::default(),
            LandmineView::default(),
        )
    }

    #[test]
    fn first_tick_stocks_every_band() {
        let mut population = Population::new(Config::new(42));
        let (monsters, powerups, landmines) = empty_views();
        let player = player_at(CellCoord::new(1, 1));
        let mut commands = Vec::new();
        population.handle(&[], &player, &monsters, &powerups, &landmines, &mut commands);

        let monster_spawns: Vec<CellCoord> = commands
            .iter()
            .filter_map(|command| match command {
                Command::SpawnMonster { cell, .. } => Some(*cell),
                _ => None,
            })
            .collect();
        let powerup_spawns = commands
            .iter()
            .filter(|command| matches!(command, Command::SpawnPowerup { .. }))
            .count();
        let landmine_spawns = commands
            .iter()
            .filter(|command| matches!(command, Command::SpawnLandmine { .. }))
            .count();

        // Burst plus band top-up plus pack partners, minus whatever the
        // retry budget discarded.
        assert!(monster_spawns.len() >= 50);
        assert!(monster_spawns.len() <= 90);
        assert!(powerup_spawns >= 1 && powerup_spawns <= 5);
        assert!(landmine_spawns >= 1 && landmine_spawns <= 10);
        for cell in &monster_spawns {
            let distance = cell.euclidean_distance(player.cell);
            assert!(distance <= 301.0, "monster at {distance}");
            assert_ne!(*cell, player.cell);
        }
    }

    #[test]
    fn identical_seeds_replay_identical_spawns() {
        let (monsters, powerups, landmines) = empty_views();
        let player = player_at(CellCoord::new(1, 1));
        let mut first = Vec::new();
        let mut second = Vec::new();
        Population::new(Config::new(9)).handle(
            &[],
            &player,
            &monsters,
            &powerups,
            &landmines,
            &mut first,
        );
        Population::new(Config::new(9)).handle(
            &[],
            &player,
            &monsters,
            &powerups,
            &landmines,
            &mut second,
        );
        assert_eq!(first, second);
    }

    #[test]
    fn distant_monsters_despawn_only_when_enough_remain_nearby() {
        let mut tuning = PopulationTuning::default();
        tuning.monsters.minimum = 0;
        tuning.burst.count = 0;
        let player = player_at(CellCoord::new(0, 0));
        let far = monster_at(99, CellCoord::new(400, 0));
        let mut near: Vec<MonsterSnapshot> = (0..6)
            .map(|index| monster_at(index, CellCoord::new(10 + index as i32, 0)))
            .collect();
        near.push(far);
        let view = MonsterView::from_snapshots(near.clone());
        let (_, powerups, landmines) = empty_views();

        let mut commands = Vec::new();
        let mut population = Population::with_tuning(Config::new(5), tuning);
        population.handle(&[], &player, &view, &powerups, &landmines, &mut commands);
        assert!(commands.contains(&Command::DespawnMonster {
            monster: MonsterId::new(99)
        }));

        // Removing one nearby monster drops the guard below its threshold.
        let _ = near.remove(0);
        let thin_view = MonsterView::from_snapshots(near);
        let mut commands = Vec::new();
        let mut population = Population::with_tuning(Config::new(5), tuning);
        population.handle(&[], &player, &thin_view, &powerups, &landmines, &mut commands);
        assert!(!commands
            .iter()
            .any(|command| matches!(command, Command::DespawnMonster { .. })));
    }

    #[test]
    fn fresh_chunks_receive_a_sparse_scatter() {
        let mut tuning = PopulationTuning::default();
        tuning.monsters.minimum = 0;
        tuning.burst.count = 0;
        let mut population = Population::with_tuning(Config::new(4), tuning);
        let (monsters, powerups, landmines) = empty_views();
        let player = player_at(CellCoord::new(1, 1));
        let events = [Event::ChunkLoaded {
            chunk: gridlock_core::ChunkCoord::new(5, 5),
        }];
        let mut commands = Vec::new();
        population.handle(
            &events,
            &player,
            &monsters,
            &powerups,
            &landmines,
            &mut commands,
        );
        let spawned: Vec<CellCoord> = commands
            .iter()
            .filter_map(|command| match command {
                Command::SpawnMonster { cell, .. } => Some(*cell),
                _ => None,
            })
            .collect();
        assert!(!spawned.is_empty());
        for cell in spawned {
            assert!(cell.x() >= 160 && cell.x() < 192);
            assert!(cell.y() >= 160 && cell.y() < 192);
        }
    }

    #[test]
    fn spawns_scale_with_the_player_level() {
        let (monsters, powerups, landmines) = empty_views();
        let novice = player_at(CellCoord::new(1, 1));
        let mut veteran = novice;
        veteran.level = 5;

        let mut low = Vec::new();
        let mut high = Vec::new();
        Population::new(Config::new(21)).handle(
            &[],
            &novice,
            &monsters,
            &powerups,
            &landmines,
            &mut low,
        );
        Population::new(Config::new(21)).handle(
            &[],
            &veteran,
            &monsters,
            &powerups,
            &landmines,
            &mut high,
        );

        // Identical seeds draw identical placements, so the spawns pair up
        // and differ only by the level bonus.
        for (weak, strong) in low.iter().zip(high.iter()) {
            if let (
                Command::SpawnMonster {
                    health: weak_health,
                    power: weak_power,
                    ..
                },
                Command::SpawnMonster {
                    health: strong_health,
                    power: strong_power,
                    ..
                },
            ) = (weak, strong)
            {
                assert_eq!(*strong_health, weak_health + 4 * LEVEL_HEALTH_BONUS);
                assert_eq!(*strong_power, weak_power + 4 * LEVEL_POWER_BONUS);
            }
        }
        assert_eq!(low.len(), high.len());
    }

    #[test]
    fn nothing_spawns_on_the_world_origin() {
        let mut population = Population::new(Config::new(17));
        let (monsters, powerups, landmines) = empty_views();
        // Parking the player next to the origin keeps the spawn rings tight
        // around it.
        let mut tuning = PopulationTuning::default();
        tuning.monsters.min_radius = 1.0;
        tuning.monsters.max_radius = 3.0;
        tuning.burst.min_radius = 1.0;
        tuning.burst.max_radius = 2.0;
        let mut population_tight = Population::with_tuning(Config::new(17), tuning);
        let player = player_at(CellCoord::new(1, 0));
        let mut commands = Vec::new();
        population_tight.handle(&[], &player, &monsters, &powerups, &landmines, &mut commands);
        population.handle(&[], &player, &monsters, &powerups, &landmines, &mut commands);

        for command in &commands {
            let cell = match command {
                Command::SpawnMonster { cell, .. }
                | Command::SpawnPowerup { cell, .. }
                | Command::SpawnLandmine { cell, .. } => *cell,
                _ => continue,
            };
            assert_ne!(cell, CellCoord::new(0, 0));
            assert_ne!(cell, player.cell);
        }
    }

    #[test]
    fn caps_bound_the_total_population() {
        let mut tuning = PopulationTuning::default();
        tuning.monsters.cap = 3;
        tuning.monsters.minimum = 10;
        tuning.burst.count = 10;
        let mut population = Population::with_tuning(Config::new(8), tuning);
        let (monsters, powerups, landmines) = empty_views();
        let player = player_at(CellCoord::new(1, 1));
        let mut commands = Vec::new();
        population.handle(&[], &player, &monsters, &powerups, &landmines, &mut commands);
        let spawned = commands
            .iter()
            .filter(|command| matches!(command, Command::SpawnMonster { .. }))
            .count();
        assert!(spawned <= 3);
    }
}
