mod camera;
mod movement;
mod pause;
mod stats;

use bevy::prelude::*;
use crate::shared::*;

pub use camera::{
    handle_camera_input, rebuild_draw_list, CameraPanEvent, CameraZoomEvent, IsoCamera,
};
pub use movement::{handle_tile_tap, place_at_spawn};
pub use pause::handle_pause_toggle;

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        // -- Local resources --
        app.init_resource::<IsoCamera>();

        app.add_event::<TileTapEvent>()
            .add_event::<PlayerMovedEvent>()
            .add_event::<CameraPanEvent>()
            .add_event::<CameraZoomEvent>()
            .add_event::<TogglePauseEvent>();

        // -- Place the character once the world has been built --
        // Only after loading, so resuming from Paused keeps the position.
        app.add_systems(
            OnTransition {
                exited: GameState::Loading,
                entered: GameState::Playing,
            },
            movement::place_at_spawn.after(crate::world::spawn_world),
        );

        app.add_systems(Update, pause::handle_pause_toggle);

        // -- Systems that run every frame while Playing --
        app.add_systems(
            Update,
            (
                camera::handle_camera_input,
                movement::handle_tile_tap.after(camera::handle_camera_input),
            )
                .run_if(in_state(GameState::Playing)),
        );

        app.add_systems(
            PostUpdate,
            camera::rebuild_draw_list.run_if(in_state(GameState::Playing)),
        );
    }
}
