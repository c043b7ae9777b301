use bevy::prelude::*;
use crate::shared::*;

/// Playing -> Paused and back. Ignored in any other state.
pub fn handle_pause_toggle(
    mut toggle_events: EventReader<TogglePauseEvent>,
    current_state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    // Several toggles in one frame count once.
    if toggle_events.read().count() == 0 {
        return;
    }
    match current_state.get() {
        GameState::Playing => {
            info!("Paused");
            next_state.set(GameState::Paused);
        }
        GameState::Paused => {
            info!("Resumed");
            next_state.set(GameState::Playing);
        }
        GameState::Loading => {}
    }
}
