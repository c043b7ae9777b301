//! World domain plugin.
//!
//! Responsible for:
//! - Building the tile world (generated or handcrafted) when loading finishes
//! - Walkability queries against the variant's blocking set
//! - Isometric projection and paint ordering helpers

use bevy::prelude::*;
use std::collections::{HashMap, HashSet};

use crate::config::{GameConfig, WorldVariant};
use crate::shared::*;

pub mod iso;
pub mod maps;
pub mod tiles;
pub mod ysort;

pub use iso::{screen_to_tile, tile_depth, tile_to_screen, tile_to_screen_relative};
pub use maps::{generate_world, handcrafted_meadow};
pub use tiles::{blocking_set, TileDescriptor, TILE_DESCRIPTORS};
pub use ysort::{build_draw_list, is_tile_visible, sort_back_to_front, DrawItem, DrawList};

// ═══════════════════════════════════════════════════════════════════════
// PLUGIN
// ═══════════════════════════════════════════════════════════════════════

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WorldMap>()
            .init_resource::<DrawList>()
            .add_systems(
                OnTransition {
                    exited: GameState::Loading,
                    entered: GameState::Playing,
                },
                spawn_world,
            );
    }
}

// ═══════════════════════════════════════════════════════════════════════
// RESOURCES
// ═══════════════════════════════════════════════════════════════════════

/// The loaded world and its collision rules.
#[derive(Resource, Debug, Clone)]
pub struct WorldMap {
    pub width: usize,
    pub height: usize,
    /// Row-major terrain: terrain[y * width + x]
    pub terrain: Vec<TileKind>,
    /// Decorations standing on terrain, keyed by (x, y).
    pub overlays: HashMap<(i32, i32), TileKind>,
    /// Kinds that make a tile unwalkable, as terrain or overlay.
    pub blocking: HashSet<TileKind>,
    /// Where the character starts.
    pub spawn: TilePos,
}

impl Default for WorldMap {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            terrain: Vec::new(),
            overlays: HashMap::new(),
            blocking: blocking_set(WorldVariant::Generated),
            spawn: TilePos::default(),
        }
    }
}

impl WorldMap {
    pub fn filled(width: usize, height: usize, kind: TileKind) -> Self {
        Self {
            width,
            height,
            terrain: vec![kind; width * height],
            ..Default::default()
        }
    }

    /// Builds terrain from rows, `rows[y][x]`. Short rows are padded with grass.
    pub fn from_rows(rows: &[Vec<TileKind>]) -> Self {
        let height = rows.len();
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut map = Self::filled(width, height, TileKind::Grass);
        for (y, row) in rows.iter().enumerate() {
            for (x, kind) in row.iter().enumerate() {
                map.terrain[y * width + x] = *kind;
            }
        }
        map
    }

    pub fn with_blocking(mut self, blocking: impl IntoIterator<Item = TileKind>) -> Self {
        self.blocking = blocking.into_iter().collect();
        self
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width as i32 && y < self.height as i32
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        self.in_bounds(x, y)
            .then(|| y as usize * self.width + x as usize)
    }

    /// Terrain at a position, `None` outside the map.
    pub fn get_tile(&self, x: i32, y: i32) -> Option<TileKind> {
        self.index(x, y).map(|i| self.terrain[i])
    }

    pub fn set_tile(&mut self, x: i32, y: i32, kind: TileKind) {
        if let Some(i) = self.index(x, y) {
            self.terrain[i] = kind;
        }
    }

    pub fn overlay(&self, x: i32, y: i32) -> Option<TileKind> {
        self.overlays.get(&(x, y)).copied()
    }

    /// `None` clears the overlay. Out-of-bounds positions are ignored.
    pub fn set_overlay(&mut self, x: i32, y: i32, kind: Option<TileKind>) {
        if !self.in_bounds(x, y) {
            return;
        }
        match kind {
            Some(kind) => {
                self.overlays.insert((x, y), kind);
            }
            None => {
                self.overlays.remove(&(x, y));
            }
        }
    }

    /// In bounds, and neither terrain nor overlay is in the blocking set.
    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        let Some(terrain) = self.get_tile(x, y) else {
            return false;
        };
        if self.blocking.contains(&terrain) {
            return false;
        }
        !self
            .overlay(x, y)
            .is_some_and(|o| self.blocking.contains(&o))
    }
}

/// Builds the world described by the config.
pub fn build_world(config: &GameConfig) -> WorldMap {
    let world = &config.world;
    let map = match world.variant {
        WorldVariant::Generated => {
            let seed = world.seed.unwrap_or_else(rand::random);
            info!("Generating {}x{} world (seed {})", world.width, world.height, seed);
            generate_world(world.width, world.height, seed)
        }
        WorldVariant::Handcrafted => {
            info!("Loading handcrafted meadow");
            handcrafted_meadow()
        }
    };
    match &world.blocking {
        Some(kinds) => map.with_blocking(kinds.iter().copied()),
        None => map.with_blocking(blocking_set(world.variant)),
    }
}

pub fn spawn_world(config: Res<GameConfig>, mut world_map: ResMut<WorldMap>) {
    *world_map = build_world(&config);
    if !world_map.is_walkable(world_map.spawn.x, world_map.spawn.y) {
        warn!(
            "Spawn tile ({}, {}) is blocked",
            world_map.spawn.x, world_map.spawn.y
        );
    }
}
