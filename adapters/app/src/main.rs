#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Desktop entry point that boots the Gridlock Arena experience.

mod scene;

use anyhow::Result;
use clap::Parser;
use gridlock_rendering::{cues_for_events, AudioCue, Color, Presentation, RenderingBackend};
use gridlock_rendering_macroquad::MacroquadBackend;
use gridlock_system_bootstrap::{Config, Session};
use gridlock_system_player_control::InputFrame;
use gridlock_world::query;
use std::time::Duration;

const TICK_INTERVAL: Duration = Duration::from_millis(16);
const MAX_TICKS_PER_FRAME: u32 = 8;
const VIEW_HALF_EXTENT: i32 = 15;

/// Infinite-world survival arena.
#[derive(Debug, Parser)]
#[command(name = "gridlock-arena")]
struct Args {
    /// Seed controlling terrain, monster behaviour, and population.
    ///
    /// A random seed is drawn when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Advances the simulation for the given number of ticks without opening
    /// a window, then prints a summary and exits.
    #[arg(long)]
    headless_ticks: Option<u64>,
    /// Renders as fast as possible instead of synchronising with the display.
    #[arg(long)]
    no_vsync: bool,
    /// Prints frame timing metrics once per second.
    #[arg(long)]
    show_fps: bool,
    /// Skips sprite loading and renders flat shapes only.
    #[arg(long)]
    no_sprites: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);

    let mut session = Session::new(Config::new(seed));
    println!("{}", session.welcome_banner());
    println!("seed: {seed}");

    if let Some(ticks) = args.headless_ticks {
        run_headless(&mut session, ticks);
        return Ok(());
    }

    let backend = MacroquadBackend::new()
        .with_vsync(!args.no_vsync)
        .with_show_fps(args.show_fps)
        .with_sprite_loading(!args.no_sprites);

    let presentation = Presentation::new(
        "Gridlock Arena",
        Color::from_rgb_u8(0x10, 0x14, 0x1c),
        scene::build_scene(session.world(), VIEW_HALF_EXTENT),
    );

    let mut elapsed = Duration::ZERO;
    let mut accumulator = Duration::ZERO;
    backend.run(presentation, move |frame_dt, input, scene| {
        elapsed += frame_dt;
        accumulator += frame_dt;

        let frame = scene::input_frame(input);
        let mut cues: Vec<AudioCue> = Vec::new();
        let mut steps = 0;
        while accumulator >= TICK_INTERVAL && steps < MAX_TICKS_PER_FRAME {
            accumulator -= TICK_INTERVAL;
            steps += 1;
            let events = session.advance(&frame, elapsed.as_millis() as u64);
            cues.extend(cues_for_events(events));
        }
        if steps == MAX_TICKS_PER_FRAME {
            // A long stall should not trigger a catch-up spiral.
            accumulator = Duration::ZERO;
        }

        *scene = scene::build_scene(session.world(), VIEW_HALF_EXTENT);
        cues
    })
}

fn run_headless(session: &mut Session, ticks: u64) {
    let input = InputFrame::default();
    for tick in 0..ticks {
        let _ = session.advance(&input, (tick + 1) * TICK_INTERVAL.as_millis() as u64);
    }

    let world = session.world();
    let player = query::player(world);
    println!(
        "after {ticks} ticks: level {} ({}/{} xp), {}/{} hp, {} monsters, {} chunks loaded",
        player.level,
        player.experience,
        player.experience_to_next,
        player.health,
        player.max_health,
        query::monsters(world).len(),
        query::loaded_chunk_count(world),
    );
}
