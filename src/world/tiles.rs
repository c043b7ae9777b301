//! Static tile descriptor table.

use std::collections::HashSet;

use crate::config::WorldVariant;
use crate::shared::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileDescriptor {
    pub kind: TileKind,
    /// Sprite key for whatever front end draws the world.
    pub asset: &'static str,
    pub collidable: bool,
    pub category: RenderCategory,
    /// Pixel size. `None` = one tile.
    pub size: Option<(f32, f32)>,
}

pub const TILE_DESCRIPTORS: &[TileDescriptor] = &[
    TileDescriptor { kind: TileKind::Grass,    asset: "tiles/grass",    collidable: false, category: RenderCategory::Terrain, size: None },
    TileDescriptor { kind: TileKind::Dirt,     asset: "tiles/dirt",     collidable: false, category: RenderCategory::Terrain, size: None },
    TileDescriptor { kind: TileKind::Sand,     asset: "tiles/sand",     collidable: false, category: RenderCategory::Terrain, size: None },
    TileDescriptor { kind: TileKind::Stone,    asset: "tiles/stone",    collidable: false, category: RenderCategory::Terrain, size: None },
    TileDescriptor { kind: TileKind::Water,    asset: "tiles/water",    collidable: true,  category: RenderCategory::Water,   size: None },
    TileDescriptor { kind: TileKind::Mountain, asset: "tiles/mountain", collidable: true,  category: RenderCategory::Terrain, size: None },
    TileDescriptor { kind: TileKind::Cliff,    asset: "tiles/cliff",    collidable: true,  category: RenderCategory::Terrain, size: None },
    TileDescriptor { kind: TileKind::Tree,     asset: "sprites/tree",   collidable: true,  category: RenderCategory::Tree,    size: Some((64.0, 96.0)) },
    TileDescriptor { kind: TileKind::Bush,     asset: "sprites/bush",   collidable: true,  category: RenderCategory::Bush,    size: Some((48.0, 48.0)) },
    TileDescriptor { kind: TileKind::Rock,     asset: "sprites/rock",   collidable: true,  category: RenderCategory::Rock,    size: Some((40.0, 40.0)) },
    TileDescriptor { kind: TileKind::Sheep,    asset: "sprites/sheep",  collidable: false, category: RenderCategory::Sheep,   size: Some((32.0, 32.0)) },
];

impl TileKind {
    pub const ALL: [TileKind; 11] = [
        TileKind::Grass,
        TileKind::Dirt,
        TileKind::Sand,
        TileKind::Stone,
        TileKind::Water,
        TileKind::Mountain,
        TileKind::Cliff,
        TileKind::Tree,
        TileKind::Bush,
        TileKind::Rock,
        TileKind::Sheep,
    ];

    pub fn descriptor(self) -> &'static TileDescriptor {
        &TILE_DESCRIPTORS[self as usize]
    }

    pub fn category(self) -> RenderCategory {
        self.descriptor().category
    }

    /// Pixel size at the given tile size.
    pub fn size(self, tile_size: f32) -> (f32, f32) {
        self.descriptor().size.unwrap_or((tile_size, tile_size))
    }
}

/// Tile kinds that make a tile unwalkable in a variant.
pub fn blocking_set(variant: WorldVariant) -> HashSet<TileKind> {
    match variant {
        WorldVariant::Generated => [TileKind::Water, TileKind::Mountain].into_iter().collect(),
        WorldVariant::Handcrafted => TILE_DESCRIPTORS
            .iter()
            .filter(|d| d.collidable)
            .map(|d| d.kind)
            .collect(),
    }
}
