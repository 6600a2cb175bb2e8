//! Chunk table with least-recently-used eviction.
//!
//! The infinite grid is carved into fixed-size square chunks. A bounded table
//! keeps the chunks surrounding the player resident; touching a chunk stamps
//! it with the caller's clock reading, and loading into a full table evicts
//! the chunk with the stalest stamp. Ties break toward the lowest slot index
//! so eviction stays deterministic under a frozen clock.

use gridlock_core::{CellCoord, ChunkCoord, TerrainKind, CHUNK_SIZE};

use crate::terrain;

/// Maps a world cell to the chunk containing it.
///
/// Uses floored division so negative cells land in negative chunks without a
/// seam around the origin.
#[must_use]
pub fn chunk_containing(cell: CellCoord) -> ChunkCoord {
    ChunkCoord::new(cell.x().div_euclid(CHUNK_SIZE), cell.y().div_euclid(CHUNK_SIZE))
}

/// Maps a world cell to its offset within its chunk, each axis in
/// `0..CHUNK_SIZE`.
#[must_use]
pub fn local_cell(cell: CellCoord) -> (usize, usize) {
    (
        cell.x().rem_euclid(CHUNK_SIZE) as usize,
        cell.y().rem_euclid(CHUNK_SIZE) as usize,
    )
}

/// One resident chunk together with its generated terrain.
#[derive(Clone, Debug)]
pub struct Chunk {
    coord: ChunkCoord,
    last_access: u64,
    terrain: Vec<TerrainKind>,
}

impl Chunk {
    /// Coordinate of the chunk.
    #[must_use]
    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    /// Most recent clock stamp recorded for the chunk.
    #[must_use]
    pub fn last_access(&self) -> u64 {
        self.last_access
    }

    /// Terrain kind at the provided intra-chunk offset.
    #[must_use]
    pub fn terrain_at(&self, local_x: usize, local_y: usize) -> TerrainKind {
        self.terrain[local_y * CHUNK_SIZE as usize + local_x]
    }
}

/// Outcome of a load request against the chunk table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChunkLoad {
    /// The chunk was already resident; its access stamp was refreshed.
    AlreadyLoaded,
    /// The chunk was generated into a free slot.
    Loaded,
    /// The chunk was generated after evicting the stalest resident chunk.
    Replaced {
        /// Coordinate of the chunk that was evicted to make room.
        evicted: ChunkCoord,
    },
}

/// Bounded table of resident chunks.
#[derive(Clone, Debug)]
pub struct ChunkStore {
    seed: u64,
    capacity: usize,
    chunks: Vec<Chunk>,
}

impl ChunkStore {
    /// Creates an empty store bounded at `capacity` resident chunks.
    pub(crate) fn new(seed: u64, capacity: usize) -> Self {
        Self {
            seed,
            capacity,
            chunks: Vec::with_capacity(capacity),
        }
    }

    /// Number of chunks currently resident.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Reports whether no chunks are resident.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Shared access to the resident chunk at `coord`, if any.
    #[must_use]
    pub fn find(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.iter().find(|chunk| chunk.coord == coord)
    }

    /// Iterator over every resident chunk in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.iter()
    }

    fn find_index(&self, coord: ChunkCoord) -> Option<usize> {
        self.chunks.iter().position(|chunk| chunk.coord == coord)
    }

    /// Ensures the chunk at `coord` is resident, generating terrain on a
    /// miss and evicting the least-recently-used chunk when the table is
    /// full.
    pub(crate) fn ensure_loaded(&mut self, coord: ChunkCoord, now_ms: u64) -> ChunkLoad {
        if let Some(index) = self.find_index(coord) {
            self.chunks[index].last_access = now_ms;
            return ChunkLoad::AlreadyLoaded;
        }
        let fresh = Chunk {
            coord,
            last_access: now_ms,
            terrain: terrain::generate(self.seed, coord),
        };
        if self.chunks.len() < self.capacity {
            self.chunks.push(fresh);
            return ChunkLoad::Loaded;
        }
        let victim = self.stalest_index();
        let evicted = self.chunks[victim].coord;
        self.chunks[victim] = fresh;
        ChunkLoad::Replaced { evicted }
    }

    /// Stamps every resident chunk within `radius` chunks of `center`.
    pub(crate) fn refresh_region(&mut self, center: ChunkCoord, radius: i32, now_ms: u64) {
        for chunk in &mut self.chunks {
            let dx = (chunk.coord.x() - center.x()).abs();
            let dy = (chunk.coord.y() - center.y()).abs();
            if dx <= radius && dy <= radius {
                chunk.last_access = now_ms;
            }
        }
    }

    fn stalest_index(&self) -> usize {
        let mut victim = 0;
        for (index, chunk) in self.chunks.iter().enumerate() {
            if chunk.last_access < self.chunks[victim].last_access {
                victim = index;
            }
        }
        victim
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_cells_map_to_negative_chunks() {
        assert_eq!(chunk_containing(CellCoord::new(0, 0)), ChunkCoord::new(0, 0));
        assert_eq!(chunk_containing(CellCoord::new(31, 31)), ChunkCoord::new(0, 0));
        assert_eq!(chunk_containing(CellCoord::new(32, 0)), ChunkCoord::new(1, 0));
        assert_eq!(
            chunk_containing(CellCoord::new(-1, -1)),
            ChunkCoord::new(-1, -1)
        );
        assert_eq!(
            chunk_containing(CellCoord::new(-32, -33)),
            ChunkCoord::new(-1, -2)
        );
    }

    #[test]
    fn local_offsets_stay_in_bounds_for_negative_cells() {
        assert_eq!(local_cell(CellCoord::new(-1, -1)), (31, 31));
        assert_eq!(local_cell(CellCoord::new(-32, 64)), (0, 0));
        let (local_x, local_y) = local_cell(CellCoord::new(-1000, 999));
        assert!(local_x < CHUNK_SIZE as usize);
        assert!(local_y < CHUNK_SIZE as usize);
    }

    #[test]
    fn chunk_and_local_round_trip_to_the_original_cell() {
        for cell in [
            CellCoord::new(0, 0),
            CellCoord::new(-1, 1),
            CellCoord::new(-500, 712),
            CellCoord::new(8191, -8192),
        ] {
            let chunk = chunk_containing(cell);
            let (local_x, local_y) = local_cell(cell);
            assert_eq!(chunk.x() * CHUNK_SIZE + local_x as i32, cell.x());
            assert_eq!(chunk.y() * CHUNK_SIZE + local_y as i32, cell.y());
        }
    }

    #[test]
    fn load_into_free_slot_reports_loaded() {
        let mut store = ChunkStore::new(7, 4);
        assert_eq!(store.ensure_loaded(ChunkCoord::new(0, 0), 1), ChunkLoad::Loaded);
        assert_eq!(
            store.ensure_loaded(ChunkCoord::new(0, 0), 2),
            ChunkLoad::AlreadyLoaded
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn full_table_evicts_the_stalest_chunk() {
        let mut store = ChunkStore::new(7, 2);
        assert_eq!(store.ensure_loaded(ChunkCoord::new(0, 0), 10), ChunkLoad::Loaded);
        assert_eq!(store.ensure_loaded(ChunkCoord::new(1, 0), 20), ChunkLoad::Loaded);
        // Touch the older chunk so the newer one becomes the victim.
        assert_eq!(
            store.ensure_loaded(ChunkCoord::new(0, 0), 30),
            ChunkLoad::AlreadyLoaded
        );
        assert_eq!(
            store.ensure_loaded(ChunkCoord::new(2, 0), 40),
            ChunkLoad::Replaced {
                evicted: ChunkCoord::new(1, 0)
            }
        );
        assert_eq!(store.len(), 2);
        assert!(store.find(ChunkCoord::new(0, 0)).is_some());
        assert!(store.find(ChunkCoord::new(1, 0)).is_none());
    }

    #[test]
    fn eviction_ties_break_toward_the_lowest_slot() {
        let mut store = ChunkStore::new(7, 3);
        for x in 0..3 {
            let _ = store.ensure_loaded(ChunkCoord::new(x, 0), 5);
        }
        assert_eq!(
            store.ensure_loaded(ChunkCoord::new(9, 9), 6),
            ChunkLoad::Replaced {
                evicted: ChunkCoord::new(0, 0)
            }
        );
    }

    #[test]
    fn refresh_region_only_touches_chunks_within_radius() {
        let mut store = ChunkStore::new(7, 8);
        let _ = store.ensure_loaded(ChunkCoord::new(0, 0), 1);
        let _ = store.ensure_loaded(ChunkCoord::new(5, 0), 1);
        store.refresh_region(ChunkCoord::new(0, 0), 2, 99);
        let near = store.find(ChunkCoord::new(0, 0)).map(Chunk::last_access);
        let far = store.find(ChunkCoord::new(5, 0)).map(Chunk::last_access);
        assert_eq!(near, Some(99));
        assert_eq!(far, Some(1));
    }

    #[test]
    fn duplicate_loads_never_create_duplicate_entries() {
        let mut store = ChunkStore::new(7, 4);
        for stamp in 0..10 {
            let _ = store.ensure_loaded(ChunkCoord::new(3, -3), stamp);
        }
        assert_eq!(store.len(), 1);
    }
}
