use bevy::prelude::*;
use crate::config::GameConfig;
use crate::shared::*;
use crate::world::WorldMap;
use super::camera::IsoCamera;

/// Places the character on the world's spawn tile once the world exists.
pub fn place_at_spawn(world_map: Res<WorldMap>, mut player: ResMut<PlayerState>) {
    player.position = world_map.spawn;
    info!("Player placed at ({}, {})", player.position.x, player.position.y);
}

/// Resolves taps to tiles and walks the character there if it can stand on it.
pub fn handle_tile_tap(
    mut tap_events: EventReader<TileTapEvent>,
    camera: Res<IsoCamera>,
    config: Res<GameConfig>,
    world_map: Res<WorldMap>,
    mut player: ResMut<PlayerState>,
    mut moved_events: EventWriter<PlayerMovedEvent>,
) {
    for event in tap_events.read() {
        let from = player.position;
        let to = camera.viewport_to_tile(event.screen, from, config.tile_size);

        if to == from {
            continue;
        }
        if !world_map.in_bounds(to.x, to.y) {
            debug!("Tap at ({}, {}) is outside the map", to.x, to.y);
            continue;
        }
        if !world_map.is_walkable(to.x, to.y) {
            debug!("Tile ({}, {}) is blocked", to.x, to.y);
            continue;
        }

        player.position = to;
        moved_events.send(PlayerMovedEvent { from, to });
    }
}
