//! World map orchestration.
//!
//! Owns the tile cache, the live grid, the two field generators and the
//! occupant registry, and implements the pan operation that keeps them all
//! consistent as the viewpoint moves. Every tile the map ever materializes
//! flows through the cache, so panning away and back reproduces identical
//! terrain.

use std::error::Error;
use std::fmt;

use crate::cache::TileCache;
use crate::field::{FieldGenerator, FieldParams};
use crate::grid::LiveGrid;
use crate::occupants::{Occupant, OccupantId, OccupantRegistry};
use crate::seeds::MapSeeds;
use crate::storage::{MapStorage, StorageError};
use crate::tile::{Tile, TileCoord};

/// Construction parameters for a world map.
#[derive(Clone, Debug)]
pub struct WorldConfig {
    /// Map name; keys the persisted tile cache
    pub name: String,
    /// Master seed; field seeds derive from it
    pub seed: u64,
    /// Window width in tiles
    pub width: usize,
    /// Window height in tiles
    pub height: usize,
    /// Absolute coordinate of the window's initial top-left cell
    pub origin: (i64, i64),
    /// Noise parameters for the elevation field
    pub elevation: FieldParams,
    /// Noise parameters for the moisture field
    pub moisture: FieldParams,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            name: "world".to_string(),
            seed: 0,
            width: 80,
            height: 50,
            origin: (0, 0),
            // Push the elevation distribution low so oceans dominate
            elevation: FieldParams {
                exponent: 1.6,
                ..FieldParams::default()
            },
            moisture: FieldParams::default(),
        }
    }
}

/// Errors from occupant membership and movement calls.
#[derive(Debug, PartialEq, Eq)]
pub enum WorldError {
    /// The occupant id is not registered on this map
    NotAMember(OccupantId),
}

impl fmt::Display for WorldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorldError::NotAMember(id) => write!(f, "occupant {:?} is not on this map", id),
        }
    }
}

impl Error for WorldError {}

/// An infinite scrolling tile world.
pub struct WorldMap {
    name: String,
    seeds: MapSeeds,
    elevation: FieldGenerator,
    moisture: FieldGenerator,
    cache: TileCache,
    grid: LiveGrid,
    occupants: OccupantRegistry,
}

impl WorldMap {
    /// Create a map with an empty cache.
    pub fn new(config: WorldConfig) -> Self {
        Self::with_cache(config, TileCache::new())
    }

    /// Create a map, restoring any previously dumped cache for its name.
    pub fn load_or_new(config: WorldConfig, storage: &MapStorage) -> Result<Self, StorageError> {
        let cache = storage.load(&config.name)?;
        Ok(Self::with_cache(config, cache))
    }

    /// Create a map over an existing cache. Tiles already in the cache are
    /// reused as-is when the initial window materializes.
    pub fn with_cache(config: WorldConfig, mut cache: TileCache) -> Self {
        let seeds = MapSeeds::from_master(config.seed);
        let elevation = FieldGenerator::new(seeds.elevation, config.elevation);
        let moisture = FieldGenerator::new(seeds.moisture, config.moisture);

        let (origin_x, origin_y) = config.origin;
        let grid = LiveGrid::new(config.width, config.height, origin_x, origin_y, |x, y| {
            cache.get_or_create(TileCoord::new(x, y), &elevation, &moisture)
        });

        WorldMap {
            name: config.name,
            seeds,
            elevation,
            moisture,
            cache,
            grid,
            occupants: OccupantRegistry::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn seed(&self) -> u64 {
        self.seeds.master
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn x_off(&self) -> i64 {
        self.grid.x_off()
    }

    pub fn y_off(&self) -> i64 {
        self.grid.y_off()
    }

    pub fn cache(&self) -> &TileCache {
        &self.cache
    }

    pub fn grid(&self) -> &LiveGrid {
        &self.grid
    }

    /// Tile at an absolute coordinate inside the live window.
    ///
    /// # Panics
    ///
    /// Outside the window: the engine offers no random access to
    /// unmaterialized terrain, callers must pan first.
    pub fn at(&self, x: i64, y: i64) -> &Tile {
        match self.grid.at(x, y) {
            Some(tile) => tile,
            None => panic!(
                "tile access ({}, {}) outside live window [{}, {}) x [{}, {})",
                x,
                y,
                self.grid.x_off(),
                self.grid.x_off() + self.grid.width() as i64,
                self.grid.y_off(),
                self.grid.y_off() + self.grid.height() as i64,
            ),
        }
    }

    /// Shift the live window by (dx, dy), returning the number of unit
    /// steps performed.
    ///
    /// Each axis resolves one unit at a time: the trailing edge retires
    /// (its tiles stay in the cache) and the leading edge fetches through
    /// the cache, so `pan(3, 0)` and three `pan(1, 0)` calls produce the
    /// same window. Callers that count turns own the returned total.
    pub fn pan(&mut self, dx: i64, dy: i64) -> u64 {
        let WorldMap {
            elevation,
            moisture,
            cache,
            grid,
            ..
        } = self;
        let mut fetch =
            |x: i64, y: i64| cache.get_or_create(TileCoord::new(x, y), elevation, moisture);

        for _ in 0..dx.abs() {
            if dx > 0 {
                grid.shift_east(&mut fetch);
            } else {
                grid.shift_west(&mut fetch);
            }
        }
        for _ in 0..dy.abs() {
            if dy > 0 {
                grid.shift_south(&mut fetch);
            } else {
                grid.shift_north(&mut fetch);
            }
        }

        dx.unsigned_abs() + dy.unsigned_abs()
    }

    /// Fetch a tile anywhere in the infinite domain, through the cache.
    fn fetch(&mut self, coord: TileCoord) -> Tile {
        let WorldMap {
            elevation,
            moisture,
            cache,
            ..
        } = self;
        cache.get_or_create(coord, elevation, moisture)
    }

    // ---- Occupants -------------------------------------------------------

    /// Register an occupant, returning its id.
    pub fn add_occupant(&mut self, occupant: Occupant) -> OccupantId {
        self.occupants.add(occupant)
    }

    /// Unregister an occupant. Removing an id that is not on the map is a
    /// caller error.
    pub fn remove_occupant(&mut self, id: OccupantId) -> Result<Occupant, WorldError> {
        self.occupants.remove(id).ok_or(WorldError::NotAMember(id))
    }

    /// Unregister an occupant if present; absence is a no-op.
    pub fn discard_occupant(&mut self, id: OccupantId) -> Option<Occupant> {
        self.occupants.remove(id)
    }

    pub fn contains_occupant(&self, id: OccupantId) -> bool {
        self.occupants.contains(id)
    }

    /// Remove and return an arbitrary occupant.
    pub fn pop_occupant(&mut self) -> Option<(OccupantId, Occupant)> {
        self.occupants.pop()
    }

    pub fn occupant(&self, id: OccupantId) -> Option<&Occupant> {
        self.occupants.get(id)
    }

    /// Iterate occupants for rendering.
    pub fn occupants(&self) -> impl Iterator<Item = (OccupantId, &Occupant)> {
        self.occupants.iter()
    }

    /// Move an occupant unconditionally.
    pub fn move_occupant(&mut self, id: OccupantId, dx: i64, dy: i64) -> Result<(), WorldError> {
        let occupant = self
            .occupants
            .get_mut(id)
            .ok_or(WorldError::NotAMember(id))?;
        occupant.x += dx;
        occupant.y += dy;
        Ok(())
    }

    /// Move an occupant unless the destination terrain blocks it. Returns
    /// whether the move happened.
    ///
    /// The destination resolves through the cache, so it works anywhere in
    /// the infinite domain, inside the window or not.
    pub fn attempt_move_occupant(
        &mut self,
        id: OccupantId,
        dx: i64,
        dy: i64,
    ) -> Result<bool, WorldError> {
        let (x, y) = match self.occupants.get(id) {
            Some(occupant) => (occupant.x, occupant.y),
            None => return Err(WorldError::NotAMember(id)),
        };

        let target = self.fetch(TileCoord::new(x + dx, y + dy));
        if target.blocked {
            return Ok(false);
        }

        self.move_occupant(id, dx, dy)?;
        Ok(true)
    }

    /// Persist the tile cache under this map's name.
    pub fn dump(&self, storage: &MapStorage) -> Result<(), StorageError> {
        storage.save(&self.name, &self.cache)
    }
}
