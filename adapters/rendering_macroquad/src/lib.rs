#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Gridlock Arena.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature. Consumers that need sound playback can opt back
//! in by enabling `macroquad/audio` in their own `Cargo.toml` dependency
//! specification; until then the audio cues returned by the frame callback
//! are dropped after being counted for diagnostics.

mod sprites;

use anyhow::{Context, Result};
use glam::Vec2;
use gridlock_core::{CellCoord, GridVector, ProjectileKind};
use gridlock_rendering::{
    archetype_color, powerup_color, terrain_color, AudioCue, Color, FrameInput, HudModel,
    LandmineSprite, MonsterSprite, PlayerSprite, PowerupSprite, Presentation, ProjectileSprite,
    RenderingBackend, Scene, SpriteKey, TerrainTile,
};
use macroquad::input::{is_key_down, is_key_pressed, KeyCode};
use std::{
    sync::mpsc,
    time::{Duration, Instant},
};

use self::sprites::{DrawParams, SpriteAtlas};

/// Keyboard state sampled once per frame.
#[derive(Clone, Copy, Debug, Default)]
struct KeyboardShortcuts {
    quit_requested: bool,
    step: GridVector,
    smash: bool,
    rush: bool,
    heal: bool,
    fire: bool,
    restart: bool,
}

impl KeyboardShortcuts {
    fn poll() -> Self {
        let quit_requested = is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q);

        let mut dx = 0;
        let mut dy = 0;
        if is_key_down(KeyCode::A) || is_key_down(KeyCode::Left) {
            dx -= 1;
        }
        if is_key_down(KeyCode::D) || is_key_down(KeyCode::Right) {
            dx += 1;
        }
        if is_key_down(KeyCode::W) || is_key_down(KeyCode::Up) {
            dy -= 1;
        }
        if is_key_down(KeyCode::S) || is_key_down(KeyCode::Down) {
            dy += 1;
        }

        Self {
            quit_requested,
            step: GridVector::new(dx, dy),
            smash: is_key_pressed(KeyCode::J),
            rush: is_key_pressed(KeyCode::K),
            heal: is_key_pressed(KeyCode::L),
            fire: is_key_pressed(KeyCode::Space),
            restart: is_key_pressed(KeyCode::R),
        }
    }

    fn frame_input(self) -> FrameInput {
        FrameInput {
            step: self.step,
            smash: self.smash,
            rush: self.rush,
            heal: self.heal,
            fire: self.fire,
            restart: self.restart,
        }
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
    load_sprites: bool,
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self {
            swap_interval: None,
            show_fps: false,
            load_sprites: true,
        }
    }
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend prints frame timing metrics once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }

    /// Configures whether the backend should attempt to load sprite assets.
    ///
    /// When enabled and the default manifest exists on disk, a broken
    /// manifest aborts startup; when the manifest is absent the backend
    /// silently falls back to flat-shape rendering.
    #[must_use]
    pub fn with_sprite_loading(mut self, enabled: bool) -> Self {
        self.load_sprites = enabled;
        self
    }
}

/// Tracks the average frames-per-second produced by the render loop.
#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
    simulation_accum: Duration,
    render_accum: Duration,
}

#[derive(Clone, Copy, Debug)]
struct FpsMetrics {
    per_second: f64,
    avg_simulation: Duration,
    avg_render: Duration,
}

impl FpsCounter {
    fn record_frame(
        &mut self,
        frame: Duration,
        simulation: Duration,
        render: Duration,
    ) -> Option<FpsMetrics> {
        self.elapsed += frame;
        self.frames += 1;
        self.simulation_accum += simulation;
        self.render_accum += render;

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let frames = self.frames.max(1);
        let per_second = f64::from(self.frames) / self.elapsed.as_secs_f64();
        let avg_simulation = self.simulation_accum / frames;
        let avg_render = self.render_accum / frames;
        self.elapsed = Duration::ZERO;
        self.frames = 0;
        self.simulation_accum = Duration::ZERO;
        self.render_accum = Duration::ZERO;
        Some(FpsMetrics {
            per_second,
            avg_simulation,
            avg_render,
        })
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> Vec<AudioCue> + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
            load_sprites,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: 960,
            window_height: 960,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        let (atlas_init_sender, atlas_init_receiver) = mpsc::channel::<Result<()>>();

        macroquad::Window::from_config(config, async move {
            let mut init_sender = Some(atlas_init_sender);
            let mut scene = scene;

            let mut sprite_atlas = None;
            if load_sprites && SpriteAtlas::default_manifest_path().exists() {
                match SpriteAtlas::from_default_manifest()
                    .context("failed to initialise sprite atlas")
                {
                    Ok(atlas) => {
                        debug_assert!(atlas.contains(SpriteKey::Player));
                        sprite_atlas = Some(atlas);
                    }
                    Err(error) => {
                        if let Some(sender) = init_sender.take() {
                            let _ = sender.send(Err(error));
                        }
                        return;
                    }
                }
            }

            if let Some(sender) = init_sender.take() {
                let _ = sender.send(Ok(()));
            }

            let background = to_macroquad_color(clear_color);
            let mut fps_counter = FpsCounter::default();

            loop {
                let keyboard = KeyboardShortcuts::poll();
                if keyboard.quit_requested {
                    break;
                }

                macroquad::window::clear_background(background);

                let screen_width = macroquad::window::screen_width();
                let screen_height = macroquad::window::screen_height();

                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));

                let simulation_start = Instant::now();
                let cues = update_scene(frame_dt, keyboard.frame_input(), &mut scene);
                let simulation_duration = simulation_start.elapsed();
                // Audio is compiled out; see the crate docs.
                let _ = cues.len();

                let metrics = SceneMetrics::from_scene(&scene, screen_width, screen_height);

                let render_start = Instant::now();
                draw_terrain(&scene.terrain, &scene, &metrics);
                draw_landmines(&scene.landmines, &scene, &metrics, sprite_atlas.as_ref());
                draw_powerups(&scene.powerups, &scene, &metrics, sprite_atlas.as_ref());
                draw_monsters(&scene.monsters, &scene, &metrics, sprite_atlas.as_ref());
                draw_player(&scene.player, &scene, &metrics, sprite_atlas.as_ref());
                draw_projectiles(&scene.projectiles, &scene, &metrics);
                draw_hud(&scene.hud, screen_width, screen_height);
                let render_duration = render_start.elapsed();

                if show_fps {
                    if let Some(FpsMetrics {
                        per_second,
                        avg_simulation,
                        avg_render,
                    }) = fps_counter.record_frame(frame_dt, simulation_duration, render_duration)
                    {
                        println!(
                            "FPS: {:.2} | sim: {:>6.2}ms render: {:>6.2}ms",
                            per_second,
                            avg_simulation.as_secs_f64() * 1_000.0,
                            avg_render.as_secs_f64() * 1_000.0,
                        );
                    }
                } else {
                    let _ = fps_counter.record_frame(
                        frame_dt,
                        simulation_duration,
                        render_duration,
                    );
                }

                macroquad::window::next_frame().await;
            }
        });

        atlas_init_receiver.recv().unwrap_or_else(|_| Ok(()))?;

        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct SceneMetrics {
    cell_step: f32,
    offset_x: f32,
    offset_y: f32,
}

impl SceneMetrics {
    fn from_scene(scene: &Scene, screen_width: f32, screen_height: f32) -> Self {
        let window_cells = scene.window_cells().max(1) as f32;
        let cell_step = (screen_width.min(screen_height) / window_cells).max(1.0);
        let span = cell_step * window_cells;
        Self {
            cell_step,
            offset_x: (screen_width - span) / 2.0,
            offset_y: (screen_height - span) / 2.0,
        }
    }

    /// Screen position of the top-left corner of the provided world cell.
    fn cell_to_screen(&self, scene: &Scene, cell: CellCoord) -> Vec2 {
        let origin_x = scene.camera.x() - scene.half_extent;
        let origin_y = scene.camera.y() - scene.half_extent;
        Vec2::new(
            self.offset_x + (cell.x() - origin_x) as f32 * self.cell_step,
            self.offset_y + (cell.y() - origin_y) as f32 * self.cell_step,
        )
    }

    /// Screen position of a sub-cell point expressed in cell units.
    fn point_to_screen(&self, scene: &Scene, point: Vec2) -> Vec2 {
        let origin_x = (scene.camera.x() - scene.half_extent) as f32;
        let origin_y = (scene.camera.y() - scene.half_extent) as f32;
        Vec2::new(
            self.offset_x + (point.x - origin_x + 0.5) * self.cell_step,
            self.offset_y + (point.y - origin_y + 0.5) * self.cell_step,
        )
    }
}

fn draw_terrain(tiles: &[TerrainTile], scene: &Scene, metrics: &SceneMetrics) {
    for tile in tiles {
        let top_left = metrics.cell_to_screen(scene, tile.cell);
        macroquad::shapes::draw_rectangle(
            top_left.x,
            top_left.y,
            metrics.cell_step,
            metrics.cell_step,
            to_macroquad_color(terrain_color(tile.kind)),
        );
    }
}

fn draw_landmines(
    landmines: &[LandmineSprite],
    scene: &Scene,
    metrics: &SceneMetrics,
    atlas: Option<&SpriteAtlas>,
) {
    let color = Color::from_rgb_u8(0x26, 0x26, 0x26);
    for landmine in landmines {
        let top_left = metrics.cell_to_screen(scene, landmine.cell);
        if let Some(atlas) = atlas {
            if draw_sprite(atlas, SpriteKey::Landmine, top_left, metrics, color) {
                continue;
            }
        }
        let center = cell_center(top_left, metrics);
        macroquad::shapes::draw_circle(
            center.x,
            center.y,
            metrics.cell_step * 0.25,
            to_macroquad_color(color),
        );
    }
}

fn draw_powerups(
    powerups: &[PowerupSprite],
    scene: &Scene,
    metrics: &SceneMetrics,
    atlas: Option<&SpriteAtlas>,
) {
    for powerup in powerups {
        let color = powerup_color(powerup.kind);
        let top_left = metrics.cell_to_screen(scene, powerup.cell);
        if let Some(atlas) = atlas {
            if draw_sprite(atlas, SpriteKey::Powerup, top_left, metrics, color) {
                continue;
            }
        }
        let center = cell_center(top_left, metrics);
        macroquad::shapes::draw_circle(
            center.x,
            center.y,
            metrics.cell_step * 0.35,
            to_macroquad_color(color),
        );
    }
}

fn draw_monsters(
    monsters: &[MonsterSprite],
    scene: &Scene,
    metrics: &SceneMetrics,
    atlas: Option<&SpriteAtlas>,
) {
    for monster in monsters {
        let mut color = archetype_color(monster.archetype);
        if monster.in_combat {
            color = color.lighten(0.35);
        }
        let top_left = metrics.cell_to_screen(scene, monster.cell);
        let drawn = atlas
            .map(|atlas| draw_sprite(atlas, SpriteKey::Monster, top_left, metrics, color))
            .unwrap_or(false);
        if !drawn {
            let center = cell_center(top_left, metrics);
            macroquad::shapes::draw_circle(
                center.x,
                center.y,
                metrics.cell_step * 0.4,
                to_macroquad_color(color),
            );
        }
        if monster.health_fraction < 1.0 {
            draw_health_bar(top_left, metrics, monster.health_fraction);
        }
    }
}

fn draw_health_bar(top_left: Vec2, metrics: &SceneMetrics, fraction: f32) {
    let width = metrics.cell_step * 0.8;
    let height = (metrics.cell_step * 0.08).max(1.0);
    let x = top_left.x + metrics.cell_step * 0.1;
    let y = top_left.y - height * 1.5;
    macroquad::shapes::draw_rectangle(
        x,
        y,
        width,
        height,
        to_macroquad_color(Color::from_rgb_u8(0x40, 0x12, 0x12)),
    );
    macroquad::shapes::draw_rectangle(
        x,
        y,
        width * fraction.clamp(0.0, 1.0),
        height,
        to_macroquad_color(Color::from_rgb_u8(0x3e, 0xd4, 0x58)),
    );
}

fn draw_player(
    player: &PlayerSprite,
    scene: &Scene,
    metrics: &SceneMetrics,
    atlas: Option<&SpriteAtlas>,
) {
    let mut color = Color::from_rgb_u8(0xf2, 0xe9, 0x4e);
    if !player.alive {
        color = Color::from_rgb_u8(0x55, 0x55, 0x55);
    } else if player.invulnerable {
        color = color.lighten(0.5);
    }

    let top_left = metrics.cell_to_screen(scene, player.cell);
    let drawn = atlas
        .map(|atlas| draw_sprite(atlas, SpriteKey::Player, top_left, metrics, color))
        .unwrap_or(false);
    if !drawn {
        let inset = metrics.cell_step * 0.15;
        macroquad::shapes::draw_rectangle(
            top_left.x + inset,
            top_left.y + inset,
            metrics.cell_step - inset * 2.0,
            metrics.cell_step - inset * 2.0,
            to_macroquad_color(color),
        );
    }

    // Facing indicator so aimed abilities read at a glance.
    let center = cell_center(top_left, metrics);
    let tip = Vec2::new(
        center.x + player.facing.dx() as f32 * metrics.cell_step * 0.45,
        center.y + player.facing.dy() as f32 * metrics.cell_step * 0.45,
    );
    macroquad::shapes::draw_line(
        center.x,
        center.y,
        tip.x,
        tip.y,
        (metrics.cell_step * 0.08).max(1.0),
        to_macroquad_color(Color::from_rgb_u8(0xff, 0xff, 0xff)),
    );
}

fn draw_projectiles(projectiles: &[ProjectileSprite], scene: &Scene, metrics: &SceneMetrics) {
    for projectile in projectiles {
        let center = metrics.point_to_screen(scene, projectile.position);
        macroquad::shapes::draw_circle(
            center.x,
            center.y,
            metrics.cell_step * 0.18,
            to_macroquad_color(projectile_color(projectile.kind)),
        );
    }
}

fn draw_hud(hud: &HudModel, screen_width: f32, screen_height: f32) {
    let text_color = to_macroquad_color(Color::from_rgb_u8(0xf0, 0xf0, 0xf0));
    macroquad::text::draw_text(
        &format!("HP {}/{}", hud.health, hud.max_health),
        12.0,
        24.0,
        24.0,
        text_color,
    );
    macroquad::text::draw_text(
        &format!(
            "Lv {}  XP {}/{}  PWR {}",
            hud.level, hud.experience, hud.experience_to_next, hud.power
        ),
        12.0,
        48.0,
        24.0,
        text_color,
    );
    macroquad::text::draw_text(
        &format!("Monsters nearby: {}", hud.monsters_visible),
        12.0,
        72.0,
        24.0,
        text_color,
    );

    if hud.game_over {
        macroquad::shapes::draw_rectangle(
            0.0,
            0.0,
            screen_width,
            screen_height,
            to_macroquad_color(Color::new(0.0, 0.0, 0.0, 0.6)),
        );
        macroquad::text::draw_text(
            "YOU DIED",
            screen_width / 2.0 - 80.0,
            screen_height / 2.0,
            48.0,
            to_macroquad_color(Color::from_rgb_u8(0xc8, 0x2a, 0x36)),
        );
        macroquad::text::draw_text(
            "press R to restart now",
            screen_width / 2.0 - 110.0,
            screen_height / 2.0 + 32.0,
            24.0,
            text_color,
        );
    }
}

fn draw_sprite(
    atlas: &SpriteAtlas,
    key: SpriteKey,
    top_left: Vec2,
    metrics: &SceneMetrics,
    tint: Color,
) -> bool {
    let params = DrawParams::new(top_left, Vec2::splat(metrics.cell_step)).with_tint(tint);
    atlas.draw(key, params).is_ok()
}

fn cell_center(top_left: Vec2, metrics: &SceneMetrics) -> Vec2 {
    Vec2::new(
        top_left.x + metrics.cell_step / 2.0,
        top_left.y + metrics.cell_step / 2.0,
    )
}

fn projectile_color(kind: ProjectileKind) -> Color {
    match kind {
        ProjectileKind::Lightning => Color::from_rgb_u8(0xf5, 0xe6, 0x3d),
        ProjectileKind::Fireball => Color::from_rgb_u8(0xe8, 0x6a, 0x1f),
        ProjectileKind::Arrow => Color::from_rgb_u8(0xd0, 0xd0, 0xd0),
    }
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
