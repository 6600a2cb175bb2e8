//! Deterministic terrain generation.
//!
//! Each chunk derives a private seed by hashing the world seed together with
//! the chunk coordinate, then fills its cells from layered trigonometric
//! noise plus a seeded jitter stream. The same world seed and coordinate
//! always produce the same terrain, so an evicted chunk regenerates
//! bit-identically when the player returns.

use gridlock_core::{ChunkCoord, TerrainKind, CHUNK_SIZE};
use sha2::{Digest, Sha256};

/// Weight of the per-cell jitter layer.
const JITTER_WEIGHT: f32 = 0.3;
/// Weight of the edge-versus-interior bias.
const EDGE_WEIGHT: f32 = 0.2;
/// Magnitude of the biome band shift.
const BIOME_SHIFT: f32 = 0.1;

/// Deterministic stream generator with 64 bits of state.
pub(crate) struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    pub(crate) fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub(crate) fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform sample in `[0, 1)`.
    fn next_unit(&mut self) -> f32 {
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }

    /// Uniform sample in `0..bound`.
    fn next_below(&mut self, bound: u64) -> u64 {
        self.next_u64() % bound
    }
}

/// Derives the chunk's private seed from the world seed and its coordinate.
fn derive_chunk_seed(world_seed: u64, coord: ChunkCoord) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(world_seed.to_le_bytes());
    hasher.update(coord.x().to_le_bytes());
    hasher.update(coord.y().to_le_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}

/// Generates the terrain for one chunk in row-major cell order.
pub(crate) fn generate(world_seed: u64, coord: ChunkCoord) -> Vec<TerrainKind> {
    let mut rng = SplitMix64::new(derive_chunk_seed(world_seed, coord));
    let side = CHUNK_SIZE as usize;
    let mut cells = Vec::with_capacity(side * side);
    let biome = biome_shift(coord);
    let half = (CHUNK_SIZE - 1) as f32 / 2.0;
    for local_y in 0..CHUNK_SIZE {
        for local_x in 0..CHUNK_SIZE {
            let world_x = (coord.x() * CHUNK_SIZE + local_x) as f32;
            let world_y = (coord.y() * CHUNK_SIZE + local_y) as f32;
            let broad = (world_x * 0.01).sin() * (world_y * 0.01).cos();
            let detail = (world_x * 0.05 + world_y * 0.03).sin() * 0.5;
            let jitter = (rng.next_unit() * 2.0 - 1.0) * JITTER_WEIGHT;
            // Interior cells trend high (rock and forest), edge cells trend
            // low (water), so chunk boundaries read as natural shorelines.
            let edge_x = (local_x as f32 - half).abs() / half;
            let edge_y = (local_y as f32 - half).abs() / half;
            let edge = edge_x.max(edge_y);
            let height = broad + detail + jitter + biome + (1.0 - 2.0 * edge) * EDGE_WEIGHT;
            cells.push(classify(height));
        }
    }
    overlay_clusters(&mut rng, &mut cells);
    cells
}

/// Slow-varying shift that nudges whole regions wetter or rockier.
fn biome_shift(coord: ChunkCoord) -> f32 {
    let band = (coord.x().unsigned_abs() + coord.y().unsigned_abs()) % 100;
    if band < 33 {
        0.0
    } else if band < 66 {
        -BIOME_SHIFT
    } else {
        BIOME_SHIFT
    }
}

fn classify(height: f32) -> TerrainKind {
    if height > 0.8 {
        TerrainKind::Mountain
    } else if height > 0.3 {
        TerrainKind::Tree
    } else if height > -0.2 {
        TerrainKind::Grass
    } else if height > -0.8 {
        TerrainKind::Lake
    } else {
        TerrainKind::Sea
    }
}

/// Stamps a handful of single-kind blobs over the noise layers so forests
/// and lakes clump instead of dithering.
fn overlay_clusters(rng: &mut SplitMix64, cells: &mut [TerrainKind]) {
    let side = CHUNK_SIZE as i64;
    let cluster_count = 1 + rng.next_below(3) as i64;
    for _ in 0..cluster_count {
        let center_x = rng.next_below(side as u64) as i64;
        let center_y = rng.next_below(side as u64) as i64;
        let kind = match rng.next_below(4) {
            0 => TerrainKind::Tree,
            1 => TerrainKind::Lake,
            2 => TerrainKind::Mountain,
            _ => TerrainKind::Grass,
        };
        let radius = 2 + rng.next_below(3) as i64;
        for local_y in (center_y - radius).max(0)..=(center_y + radius).min(side - 1) {
            for local_x in (center_x - radius).max(0)..=(center_x + radius).min(side - 1) {
                let dx = local_x - center_x;
                let dy = local_y - center_y;
                if dx * dx + dy * dy > radius * radius {
                    continue;
                }
                if rng.next_unit() < 0.6 {
                    cells[(local_y * side + local_x) as usize] = kind;
                }
            }
        }
    }
}
