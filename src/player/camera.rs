use bevy::prelude::*;
use crate::config::GameConfig;
use crate::shared::*;
use crate::world::ysort::{build_draw_list, DrawList};
use crate::world::{screen_to_tile, tile_to_screen_relative, WorldMap};

/// View onto the world. The character's tile sits at the viewport center,
/// shifted by `offset` and scaled by `zoom`.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct IsoCamera {
    pub offset: Vec2,
    pub zoom: f32,
    pub viewport: Vec2,
}

impl Default for IsoCamera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
            viewport: Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT),
        }
    }
}

impl IsoCamera {
    pub fn center(&self) -> Vec2 {
        self.viewport / 2.0
    }

    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Viewport pixel where `tile` is drawn.
    pub fn tile_to_viewport(&self, tile: TilePos, anchor: TilePos, tile_size: f32) -> Vec2 {
        self.center() + self.offset + tile_to_screen_relative(tile, anchor, tile_size) * self.zoom
    }

    /// Tile under a viewport pixel. Exact inverse of `tile_to_viewport`.
    pub fn viewport_to_tile(&self, screen: Vec2, anchor: TilePos, tile_size: f32) -> TilePos {
        let delta = (screen - self.center() - self.offset) / self.zoom;
        screen_to_tile(delta, anchor, tile_size)
    }
}

#[derive(Event, Debug, Clone)]
pub struct CameraPanEvent {
    pub delta: Vec2,
}

/// Multiplies the current zoom; the result is clamped.
#[derive(Event, Debug, Clone)]
pub struct CameraZoomEvent {
    pub factor: f32,
}

pub fn handle_camera_input(
    mut pan_events: EventReader<CameraPanEvent>,
    mut zoom_events: EventReader<CameraZoomEvent>,
    mut camera: ResMut<IsoCamera>,
) {
    for event in pan_events.read() {
        camera.pan(event.delta);
    }
    for event in zoom_events.read() {
        let zoom = camera.zoom * event.factor;
        camera.set_zoom(zoom);
    }
}

/// Rebuilds the paint list when the view, the character or the world moves.
pub fn rebuild_draw_list(
    camera: Res<IsoCamera>,
    player: Res<PlayerState>,
    world_map: Res<WorldMap>,
    config: Res<GameConfig>,
    mut draw_list: ResMut<DrawList>,
) {
    if !(camera.is_changed() || player.is_changed() || world_map.is_changed()) {
        return;
    }
    let anchor = player.position;
    draw_list.items = build_draw_list(
        &world_map,
        |tile| camera.tile_to_viewport(tile, anchor, config.tile_size),
        camera.viewport,
    );
    debug!("Draw list rebuilt: {} items", draw_list.items.len());
}
