//! World layouts: the seeded procedural generator and the hand-laid meadow.

use rand::prelude::*;
use rand::rngs::StdRng;

use crate::shared::*;
use super::WorldMap;

/// Terrain result for one generated tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratedTile {
    pub terrain: TileKind,
    pub overlay: Option<TileKind>,
}

/// Two octaves of sin·cos noise. Low values are water, high values mountain.
pub fn terrain_noise(x: i32, y: i32) -> f32 {
    let (fx, fy) = (x as f32, y as f32);
    (fx * 0.2).sin() * (fy * 0.2).cos() + (fx * 0.05).sin() * (fy * 0.05).cos() * 2.0
}

/// Picks a tile for a noise value. `rng` decides trees and dirt on grass.
pub fn classify(noise: f32, rng: &mut impl Rng) -> GeneratedTile {
    let terrain = if noise < -1.5 {
        TileKind::Water
    } else if noise < -0.5 {
        TileKind::Sand
    } else if noise > 1.5 {
        TileKind::Mountain
    } else if noise > 0.8 {
        TileKind::Stone
    } else {
        TileKind::Grass
    };

    if terrain != TileKind::Grass {
        return GeneratedTile { terrain, overlay: None };
    }
    if rng.gen::<f32>() > 0.85 {
        GeneratedTile { terrain, overlay: Some(TileKind::Tree) }
    } else if rng.gen::<f32>() > 0.9 {
        GeneratedTile { terrain: TileKind::Dirt, overlay: None }
    } else {
        GeneratedTile { terrain, overlay: None }
    }
}

/// Generates a `width × height` world. The same seed gives the same world.
pub fn generate_world(width: usize, height: usize, seed: u64) -> WorldMap {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut map = WorldMap::filled(width, height, TileKind::Grass);

    for y in 0..height as i32 {
        for x in 0..width as i32 {
            let tile = classify(terrain_noise(x, y), &mut rng);
            map.set_tile(x, y, tile.terrain);
            map.set_overlay(x, y, tile.overlay);
        }
    }

    map.spawn = TilePos::new((width / 2) as i32, (height / 2) as i32);
    map
}

// ═══════════════════════════════════════════════════════════════════════
// HANDCRAFTED MEADOW: 6×6, cliffs over water along the south edge
// ═══════════════════════════════════════════════════════════════════════

const G: TileKind = TileKind::Grass;
const C: TileKind = TileKind::Cliff;

const MEADOW_TERRAIN: [[TileKind; 6]; 6] = [
    [G, G, G, G, G, G],
    [G, G, G, G, G, G],
    [G, G, G, G, G, C],
    [G, G, G, G, G, G],
    [G, G, G, G, G, G],
    [C, C, C, C, C, C],
];

const MEADOW_TREES: &[(i32, i32)] = &[(1, 0), (3, 0), (2, 2), (1, 4), (4, 4)];

pub const MEADOW_SPAWN: TilePos = TilePos::new(2, 3);

pub fn handcrafted_meadow() -> WorldMap {
    let rows: Vec<Vec<TileKind>> = MEADOW_TERRAIN.iter().map(|row| row.to_vec()).collect();
    let mut map = WorldMap::from_rows(&rows);
    for &(x, y) in MEADOW_TREES {
        map.set_overlay(x, y, Some(TileKind::Tree));
    }
    map.spawn = MEADOW_SPAWN;
    map
}
