//! Builds presentation scenes from world queries.
//!
//! The simulation knows nothing about pixels; this module flattens the
//! query snapshots into the declarative sprite lists the rendering
//! contracts expect, clipped to the window around the player.

use gridlock_rendering::{
    FrameInput, HudModel, LandmineSprite, MonsterSprite, PlayerSprite, PowerupSprite,
    ProjectileSprite, Scene, TerrainTile,
};
use gridlock_system_player_control::InputFrame;
use gridlock_world::{query, World};

/// Translates backend key state into the player controller's input frame.
pub(crate) fn input_frame(input: FrameInput) -> InputFrame {
    InputFrame {
        step: input.step,
        smash: input.smash,
        rush: input.rush,
        heal: input.heal,
        fire: input.fire,
        restart: input.restart,
    }
}

/// Captures the window of world state centred on the player.
pub(crate) fn build_scene(world: &World, half_extent: i32) -> Scene {
    let player = query::player(world);
    let camera = player.cell;
    let window = half_extent.max(0) as u32;

    let terrain = query::visible_terrain(world, camera, half_extent)
        .into_iter()
        .map(|sample| TerrainTile {
            cell: sample.cell,
            kind: sample.kind,
        })
        .collect();

    let monsters: Vec<MonsterSprite> = query::monsters(world)
        .iter()
        .filter(|monster| monster.cell.chebyshev_distance(camera) <= window)
        .map(|monster| MonsterSprite {
            cell: monster.cell,
            archetype: monster.archetype,
            health_fraction: monster.health as f32 / monster.max_health.max(1) as f32,
            in_combat: monster.in_combat,
        })
        .collect();

    let powerups = query::powerups(world)
        .iter()
        .filter(|powerup| powerup.cell.chebyshev_distance(camera) <= window)
        .map(|powerup| PowerupSprite {
            cell: powerup.cell,
            kind: powerup.kind,
        })
        .collect();

    let landmines = query::landmines(world)
        .iter()
        .filter(|landmine| landmine.cell.chebyshev_distance(camera) <= window)
        .map(|landmine| LandmineSprite {
            cell: landmine.cell,
        })
        .collect();

    let projectiles = query::projectiles(world)
        .iter()
        .map(|projectile| ProjectileSprite {
            position: glam::Vec2::new(projectile.x, projectile.y),
            kind: projectile.kind,
        })
        .collect();

    let hud = HudModel {
        health: player.health,
        max_health: player.max_health,
        level: player.level,
        experience: player.experience,
        experience_to_next: player.experience_to_next,
        power: player.power,
        monsters_visible: monsters.len(),
        game_over: !player.alive,
    };

    Scene {
        camera,
        half_extent,
        terrain,
        player: PlayerSprite {
            cell: player.cell,
            facing: player.facing,
            alive: player.alive,
            invulnerable: player.invulnerable,
            in_combat: player.in_combat,
        },
        monsters,
        powerups,
        landmines,
        projectiles,
        hud,
    }
}
