use bevy::prelude::*;
use crate::shared::*;
use super::iso::tile_depth;
use super::WorldMap;

/// One sprite to paint: a terrain tile or an overlay standing on it.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub kind: TileKind,
    pub tile: TilePos,
    /// Screen position of the tile's anchor point.
    pub screen: Vec2,
    pub depth: f32,
}

/// Back-to-front paint list for the visible part of the world.
#[derive(Resource, Debug, Clone, Default)]
pub struct DrawList {
    pub items: Vec<DrawItem>,
}

/// Stable: items with equal depth keep their insertion order.
pub fn sort_back_to_front(items: &mut [DrawItem]) {
    items.sort_by(|a, b| a.depth.total_cmp(&b.depth));
}

/// Whether a screen point lies within the viewport grown by `margin` on every side.
pub fn is_tile_visible(screen: Vec2, viewport: Vec2, margin: f32) -> bool {
    screen.x >= -margin
        && screen.x <= viewport.x + margin
        && screen.y >= -margin
        && screen.y <= viewport.y + margin
}

/// Collects terrain and overlays for every on-screen tile and sorts them.
/// `project` maps a tile to its screen position.
pub fn build_draw_list(
    map: &WorldMap,
    project: impl Fn(TilePos) -> Vec2,
    viewport: Vec2,
) -> Vec<DrawItem> {
    let mut items = Vec::new();
    for y in 0..map.height as i32 {
        for x in 0..map.width as i32 {
            let tile = TilePos::new(x, y);
            let screen = project(tile);
            if !is_tile_visible(screen, viewport, CULL_MARGIN) {
                continue;
            }
            let layers = map.get_tile(x, y).into_iter().chain(map.overlay(x, y));
            for kind in layers {
                items.push(DrawItem {
                    kind,
                    tile,
                    screen,
                    depth: tile_depth(tile, kind.category()),
                });
            }
        }
    }
    sort_back_to_front(&mut items);
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::iso::tile_to_screen;

    fn item(kind: TileKind, x: i32, y: i32) -> DrawItem {
        let tile = TilePos::new(x, y);
        DrawItem {
            kind,
            tile,
            screen: Vec2::ZERO,
            depth: tile_depth(tile, kind.category()),
        }
    }

    #[test]
    fn later_rows_paint_over_earlier_ones() {
        let mut items = vec![
            item(TileKind::Tree, 1, 1),
            item(TileKind::Grass, 1, 1),
            item(TileKind::Grass, 0, 0),
            item(TileKind::Water, 2, 0),
        ];
        sort_back_to_front(&mut items);
        let order: Vec<(TileKind, i32, i32)> =
            items.iter().map(|i| (i.kind, i.tile.x, i.tile.y)).collect();
        assert_eq!(
            order,
            vec![
                (TileKind::Grass, 0, 0),
                (TileKind::Grass, 1, 1),
                (TileKind::Water, 2, 0),
                (TileKind::Tree, 1, 1),
            ]
        );
    }

    #[test]
    fn equal_depth_keeps_insertion_order() {
        let mut items = vec![
            item(TileKind::Grass, 2, 0),
            item(TileKind::Sand, 1, 1),
            item(TileKind::Dirt, 0, 2),
        ];
        sort_back_to_front(&mut items);
        let kinds: Vec<TileKind> = items.iter().map(|i| i.kind).collect();
        assert_eq!(kinds, vec![TileKind::Grass, TileKind::Sand, TileKind::Dirt]);
    }

    #[test]
    fn culling_margin() {
        let viewport = Vec2::new(960.0, 540.0);
        assert!(is_tile_visible(Vec2::new(-99.0, 10.0), viewport, CULL_MARGIN));
        assert!(!is_tile_visible(Vec2::new(-101.0, 10.0), viewport, CULL_MARGIN));
        assert!(is_tile_visible(Vec2::new(1060.0, 640.0), viewport, CULL_MARGIN));
        assert!(!is_tile_visible(Vec2::new(500.0, 641.0), viewport, CULL_MARGIN));
    }

    #[test]
    fn draw_list_includes_overlays() {
        let mut map = WorldMap::from_rows(&[
            vec![TileKind::Grass, TileKind::Grass],
            vec![TileKind::Grass, TileKind::Water],
        ]);
        map.set_overlay(0, 1, Some(TileKind::Tree));

        let center = Vec2::new(480.0, 270.0);
        let list = build_draw_list(&map, |t| center + tile_to_screen(t, 64.0), Vec2::new(960.0, 540.0));
        assert_eq!(list.len(), 5);
        assert_eq!(list.last().map(|i| i.kind), Some(TileKind::Water));
        let depths: Vec<f32> = list.iter().map(|i| i.depth).collect();
        assert!(depths.windows(2).all(|w| w[0] <= w[1]));
    }
}
