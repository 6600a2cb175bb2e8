#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Gridlock Arena adapters.
//!
//! Backends receive a declarative [`Scene`] describing one frame of the
//! arena as seen from the player's position, plus the heads-up display
//! model. Adapters rebuild the scene each frame from world queries; the
//! contracts here never reach into simulation state themselves.

use anyhow::Result as AnyResult;
use glam::Vec2;
use gridlock_core::{
    CellCoord, Event, GridVector, MonsterArchetype, PowerupKind, ProjectileKind, TerrainKind,
};
use std::time::Duration;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Fill color used when presenting a terrain kind.
#[must_use]
pub fn terrain_color(kind: TerrainKind) -> Color {
    match kind {
        TerrainKind::Grass => Color::from_rgb_u8(0x4a, 0x8f, 0x3c),
        TerrainKind::Mountain => Color::from_rgb_u8(0x8a, 0x86, 0x7d),
        TerrainKind::Tree => Color::from_rgb_u8(0x2d, 0x5f, 0x2a),
        TerrainKind::Lake => Color::from_rgb_u8(0x3a, 0x6e, 0xc4),
        TerrainKind::Sea => Color::from_rgb_u8(0x1f, 0x3f, 0x8c),
    }
}

/// Fill color used when presenting a powerup kind.
#[must_use]
pub fn powerup_color(kind: PowerupKind) -> Color {
    match kind {
        PowerupKind::DoubleDamage => Color::from_rgb_u8(0xe0, 0x4a, 0x2f),
        PowerupKind::DoubleHealth => Color::from_rgb_u8(0x3e, 0xd4, 0x58),
        PowerupKind::DoubleSpeed => Color::from_rgb_u8(0x3e, 0xa8, 0xd4),
    }
}

/// Fill color used when presenting a monster archetype.
#[must_use]
pub fn archetype_color(archetype: MonsterArchetype) -> Color {
    match archetype {
        MonsterArchetype::Rusher => Color::from_rgb_u8(0xc8, 0x2a, 0x36),
        MonsterArchetype::Caster { .. } => Color::from_rgb_u8(0x8e, 0x44, 0xc8),
        MonsterArchetype::Wanderer => Color::from_rgb_u8(0xb8, 0x8a, 0x2e),
    }
}

/// Keys identifying sprites that backends may load from a manifest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpriteKey {
    /// The player character.
    Player,
    /// Any monster body.
    Monster,
    /// A collectible powerup.
    Powerup,
    /// A buried landmine.
    Landmine,
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Combined held movement direction, one step per axis.
    pub step: GridVector,
    /// Whether the smash ability key was pressed this frame.
    pub smash: bool,
    /// Whether the rush ability key was pressed this frame.
    pub rush: bool,
    /// Whether the heal ability key was pressed this frame.
    pub heal: bool,
    /// Whether the fire key was pressed this frame.
    pub fire: bool,
    /// Whether the manual restart key was pressed this frame.
    pub restart: bool,
}

/// One terrain cell visible within the scene window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TerrainTile {
    /// World cell the tile occupies.
    pub cell: CellCoord,
    /// Terrain kind generated for the cell.
    pub kind: TerrainKind,
}

/// The player character as presented on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerSprite {
    /// World cell the player occupies.
    pub cell: CellCoord,
    /// Direction the player last moved.
    pub facing: GridVector,
    /// Whether the player is alive.
    pub alive: bool,
    /// Whether the invulnerability window is active (drawn lightened).
    pub invulnerable: bool,
    /// Whether melee damage was traded this tick.
    pub in_combat: bool,
}

/// One monster as presented on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonsterSprite {
    /// World cell the monster occupies.
    pub cell: CellCoord,
    /// Archetype controlling the monster's palette.
    pub archetype: MonsterArchetype,
    /// Remaining health as a fraction of the maximum, in 0.0..=1.0.
    pub health_fraction: f32,
    /// Whether melee damage was traded this tick.
    pub in_combat: bool,
}

/// One powerup as presented on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PowerupSprite {
    /// World cell the powerup occupies.
    pub cell: CellCoord,
    /// Kind controlling the powerup's palette.
    pub kind: PowerupKind,
}

/// One landmine as presented on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LandmineSprite {
    /// World cell the landmine occupies.
    pub cell: CellCoord,
}

/// One projectile as presented on screen, at sub-cell resolution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileSprite {
    /// Position in cell units.
    pub position: Vec2,
    /// Kind controlling the projectile's palette.
    pub kind: ProjectileKind,
}

/// Heads-up display model drawn over the scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HudModel {
    /// Remaining player health.
    pub health: i32,
    /// Maximum player health.
    pub max_health: i32,
    /// Current player level.
    pub level: i32,
    /// Experience accrued toward the next level.
    pub experience: i32,
    /// Experience required to reach the next level.
    pub experience_to_next: i32,
    /// Player attack power.
    pub power: i32,
    /// Number of monsters in the scene window.
    pub monsters_visible: usize,
    /// Whether the death overlay should be drawn.
    pub game_over: bool,
}

/// Scene description covering one frame of the arena.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// World cell the view centers on.
    pub camera: CellCoord,
    /// Number of cells drawn in each direction from the camera.
    pub half_extent: i32,
    /// Terrain tiles visible within the window.
    pub terrain: Vec<TerrainTile>,
    /// Player character.
    pub player: PlayerSprite,
    /// Monsters visible within the window.
    pub monsters: Vec<MonsterSprite>,
    /// Powerups visible within the window.
    pub powerups: Vec<PowerupSprite>,
    /// Landmines visible within the window.
    pub landmines: Vec<LandmineSprite>,
    /// Projectiles in flight.
    pub projectiles: Vec<ProjectileSprite>,
    /// Heads-up display model.
    pub hud: HudModel,
}

impl Scene {
    /// Side length of the scene window measured in cells.
    #[must_use]
    pub fn window_cells(&self) -> i32 {
        self.half_extent * 2 + 1
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Short audio cues surfaced alongside a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioCue {
    /// Melee damage was traded this tick.
    Combat,
    /// A monster died.
    MonsterDied,
    /// The player reached a new level.
    LevelUp,
    /// The player died.
    PlayerDied,
    /// The player collected a powerup.
    PowerupCollected,
    /// A landmine detonated.
    Explosion,
}

/// Derives the audio cues corresponding to one frame's events.
#[must_use]
pub fn cues_for_events(events: &[Event]) -> Vec<AudioCue> {
    let mut cues = Vec::new();
    for event in events {
        let cue = match event {
            Event::CombatTick => Some(AudioCue::Combat),
            Event::MonsterDied { .. } => Some(AudioCue::MonsterDied),
            Event::PlayerLeveledUp { .. } => Some(AudioCue::LevelUp),
            Event::PlayerDied => Some(AudioCue::PlayerDied),
            Event::PowerupCollected { .. } => Some(AudioCue::PowerupCollected),
            Event::LandmineDetonated { .. } => Some(AudioCue::Explosion),
            _ => None,
        };
        if let Some(cue) = cue {
            cues.push(cue);
        }
    }
    cues
}

/// Rendering backend capable of presenting Gridlock Arena scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the simulated frame
    /// delta and per-frame input, mutates the scene in place, and returns
    /// the audio cues the backend should play for the frame.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> Vec<AudioCue> + 'static;
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridlock_core::MonsterId;

    #[test]
    fn lighten_moves_channels_toward_white() {
        let color = Color::from_rgb_u8(0, 0, 0).lighten(0.5);
        assert!((color.red - 0.5).abs() < 1e-6);
        assert!((color.green - 0.5).abs() < 1e-6);
        assert!((color.blue - 0.5).abs() < 1e-6);
        assert!((color.alpha - 1.0).abs() < 1e-6);
    }

    #[test]
    fn terrain_palette_distinguishes_water_from_land() {
        assert_ne!(
            terrain_color(TerrainKind::Grass),
            terrain_color(TerrainKind::Sea)
        );
        assert_ne!(
            terrain_color(TerrainKind::Lake),
            terrain_color(TerrainKind::Sea)
        );
    }

    #[test]
    fn events_translate_into_matching_cues() {
        let events = [
            Event::CombatTick,
            Event::MonsterDied {
                monster: MonsterId::new(3),
                experience: 40,
            },
            Event::PlayerLeveledUp { level: 2 },
            Event::ChunkLoaded {
                chunk: gridlock_core::ChunkCoord::new(0, 0),
            },
        ];
        assert_eq!(
            cues_for_events(&events),
            vec![AudioCue::Combat, AudioCue::MonsterDied, AudioCue::LevelUp]
        );
    }

    #[test]
    fn scene_window_spans_both_sides_of_the_camera() {
        let scene = Scene {
            camera: CellCoord::new(0, 0),
            half_extent: 15,
            terrain: Vec::new(),
            player: PlayerSprite {
                cell: CellCoord::new(0, 0),
                facing: GridVector::new(0, -1),
                alive: true,
                invulnerable: false,
                in_combat: false,
            },
            monsters: Vec::new(),
            powerups: Vec::new(),
            landmines: Vec::new(),
            projectiles: Vec::new(),
            hud: HudModel {
                health: 100,
                max_health: 100,
                level: 1,
                experience: 0,
                experience_to_next: 100,
                power: 8,
                monsters_visible: 0,
                game_over: false,
            },
        };
        assert_eq!(scene.window_cells(), 31);
    }
}
