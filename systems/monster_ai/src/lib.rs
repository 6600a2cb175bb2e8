#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic monster behavior system.
//!
//! Each tick the system walks the monster view and emits one action per
//! monster whose cooldown has elapsed. Behavior depends solely on the
//! monster's archetype, the player snapshot, and a seeded random stream, so
//! identical seeds replay identical campaigns.

use gridlock_core::{
    AimVector, Command, Direction, GridVector, MonsterArchetype, MonsterView, PlayerSnapshot,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Probability that a ready caster fires instead of repositioning.
const CASTER_FIRE_CHANCE: f64 = 0.3;
/// Rushers cover up to this many cells per axis in one step.
const RUSHER_STRIDE: i32 = 2;
/// Casters stop retreating beyond this Chebyshev distance.
const CASTER_COMFORT_DISTANCE: u32 = 8;

/// Configuration parameters required to construct the behavior system.
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

/// Pure system that emits movement and attack commands for every monster.
#[derive(Debug)]
pub struct MonsterAi {
    rng: ChaCha8Rng,
}

impl MonsterAi {
    /// Creates a new behavior system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Consumes immutable views and emits this tick's monster commands.
    pub fn handle(
        &mut self,
        monsters: &MonsterView,
        player: &PlayerSnapshot,
        out: &mut Vec<Command>,
    ) {
        for monster in monsters.iter() {
            if !monster.ready {
                continue;
            }
            // Without a live player every archetype falls back to wandering.
            let archetype = if player.alive {
                monster.archetype
            } else {
                MonsterArchetype::Wanderer
            };
            match archetype {
                MonsterArchetype::Rusher => {
                    let step = step_toward(monster.cell, player.cell, RUSHER_STRIDE);
                    if !step.is_zero() && monster.cell.chebyshev_distance(player.cell) > 1 {
                        out.push(Command::StepMonster {
                            monster: monster.id,
                            step,
                        });
                    }
                }
                MonsterArchetype::Caster { bolt } => {
                    if self.rng.gen_bool(CASTER_FIRE_CHANCE) {
                        let aim = AimVector::new(
                            (player.cell.x() - monster.cell.x()) as f32,
                            (player.cell.y() - monster.cell.y()) as f32,
                        );
                        out.push(Command::FireProjectile {
                            origin: monster.cell,
                            aim,
                            kind: bolt,
                            damage: monster.power,
                        });
                    }
                    let step = if monster.cell.chebyshev_distance(player.cell)
                        < CASTER_COMFORT_DISTANCE
                    {
                        step_toward(player.cell, monster.cell, 1)
                    } else {
                        GridVector::default()
                    };
                    let step = if step.is_zero() {
                        self.random_cardinal()
                    } else {
                        step
                    };
                    out.push(Command::StepMonster {
                        monster: monster.id,
                        step,
                    });
                }
                MonsterArchetype::Wanderer => {
                    let step = self.random_cardinal();
                    out.push(Command::StepMonster {
                        monster: monster.id,
                        step,
                    });
                }
            }
        }
    }

    fn random_cardinal(&mut self) -> GridVector {
        let index = self.rng.gen_range(0..Direction::ALL.len());
        Direction::ALL[index].as_vector()
    }
}

/// Per-axis step from `from` toward `to`, covering at most `stride` cells on
/// each axis without overshooting.
fn step_toward(
    from: gridlock_core::CellCoord,
    to: gridlock_core::CellCoord,
    stride: i32,
) -> GridVector {
    let dx = to.x() - from.x();
    let dy = to.y() - from.y();
    GridVector::new(
        dx.signum() * dx.abs().min(stride),
        dy.signum() * dy.abs().min(stride),
    )
}
