#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Composition root wiring the world and the pure systems into a session.
//!
//! Adapters drive the session one frame at a time: they hand over the input
//! captured during the frame plus a monotonic clock reading, and the session
//! runs the fixed pipeline — player commands, monster commands, the world
//! tick, then population maintenance reacting to the tick's events. Every
//! event produced during the frame is returned for presentation.

use gridlock_core::{Command, Event};
use gridlock_system_monster_ai::MonsterAi;
use gridlock_system_player_control::{InputFrame, PlayerControl};
use gridlock_system_population::Population;
use gridlock_world::{apply, query, World};

/// Configuration parameters required to start a session.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided seed.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }
}

/// A running game: the world plus every system that feeds it commands.
#[derive(Debug)]
pub struct Session {
    world: World,
    player_control: PlayerControl,
    monster_ai: MonsterAi,
    population: Population,
    commands: Vec<Command>,
    events: Vec<Event>,
}

impl Session {
    /// Builds a session whose terrain, monster behavior, and population all
    /// derive from the provided seed.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            world: World::new(config.seed),
            player_control: PlayerControl::default(),
            monster_ai: MonsterAi::new(gridlock_system_monster_ai::Config::new(config.seed)),
            population: Population::new(gridlock_system_population::Config::new(config.seed)),
            commands: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Immutable access to the world for queries.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Banner adapters print when the experience boots.
    #[must_use]
    pub fn welcome_banner(&self) -> &'static str {
        query::welcome_banner()
    }

    /// Advances the simulation by one frame and returns its events.
    pub fn advance(&mut self, input: &InputFrame, now_ms: u64) -> &[Event] {
        self.commands.clear();
        self.events.clear();

        let player = query::player(&self.world);
        self.player_control
            .handle(input, &player, &mut self.commands);

        let monsters = query::monsters(&self.world);
        self.monster_ai
            .handle(&monsters, &player, &mut self.commands);

        self.commands.push(Command::Tick { now_ms });
        for command in self.commands.drain(..) {
            apply(&mut self.world, command, &mut self.events);
        }

        let player = query::player(&self.world);
        let monsters = query::monsters(&self.world);
        let powerups = query::powerups(&self.world);
        let landmines = query::landmines(&self.world);
        self.population.handle(
            &self.events,
            &player,
            &monsters,
            &powerups,
            &landmines,
            &mut self.commands,
        );
        for command in self.commands.drain(..) {
            apply(&mut self.world, command, &mut self.events);
        }

        &self.events
    }
}
