//! Isometric projection between tile space and screen space.
//!
//! A tile is a diamond twice as wide as it is tall: one step in +x moves
//! half a tile right and a quarter tile down, one step in +y moves half a
//! tile left and a quarter tile down. All functions are pure; bounds are the
//! caller's business.

use bevy::math::Vec2;

use crate::shared::*;

/// Screen offset of a tile relative to the origin tile.
pub fn tile_to_screen(tile: TilePos, tile_size: f32) -> Vec2 {
    let half_w = tile_size / 2.0;
    let half_h = tile_size / 4.0;
    let (x, y) = (tile.x as f32, tile.y as f32);
    Vec2::new((x - y) * half_w, (x + y) * half_h)
}

/// Screen offset of `tile` as seen from `anchor`.
pub fn tile_to_screen_relative(tile: TilePos, anchor: TilePos, tile_size: f32) -> Vec2 {
    tile_to_screen(tile - anchor, tile_size)
}

/// Nearest tile to a screen delta measured from `anchor`'s screen position.
pub fn screen_to_tile(delta: Vec2, anchor: TilePos, tile_size: f32) -> TilePos {
    let x_minus_y = delta.x / (tile_size / 2.0);
    let x_plus_y = delta.y / (tile_size / 4.0);
    let x = anchor.x as f32 + (x_minus_y + x_plus_y) / 2.0;
    let y = anchor.y as f32 + (x_plus_y - x_minus_y) / 2.0;
    TilePos::new(x.round() as i32, y.round() as i32)
}

impl RenderCategory {
    /// Tie-breaker between things standing on the same tile.
    pub fn depth_offset(self) -> f32 {
        match self {
            RenderCategory::Terrain => 0.0,
            RenderCategory::Water => 0.1,
            RenderCategory::Rock => 0.2,
            RenderCategory::Bush => 0.3,
            RenderCategory::Sheep => 0.35,
            RenderCategory::Tree => 0.4,
        }
    }
}

/// Larger depth draws later (in front).
pub fn tile_depth(tile: TilePos, category: RenderCategory) -> f32 {
    tile.x as f32 + tile.y as f32 + category.depth_offset()
}
