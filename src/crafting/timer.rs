use bevy::prelude::*;
use crate::config::GameConfig;
use crate::shared::*;
use super::tracker::{CraftStores, CraftingTracker, TickOutcome};

/// Drives the tracker at a fixed cadence, independent of any screen.
#[derive(Resource, Debug, Clone)]
pub struct CraftTickTimer(pub Timer);

impl CraftTickTimer {
    pub fn new(secs: f32) -> Self {
        Self(Timer::from_seconds(secs.max(0.01), TimerMode::Repeating))
    }
}

impl FromWorld for CraftTickTimer {
    fn from_world(world: &mut World) -> Self {
        let secs = world
            .get_resource::<GameConfig>()
            .map(|c| c.craft_tick_secs)
            .unwrap_or(CRAFT_TICK_SECS);
        Self::new(secs)
    }
}

/// Runs in every state. Completes the in-flight craft once its time is up
/// and reports the outcome as events.
#[allow(clippy::too_many_arguments)]
pub fn tick_crafting(
    time: Res<Time>,
    clock: Res<GameClock>,
    mut timer: ResMut<CraftTickTimer>,
    mut tracker: ResMut<CraftingTracker>,
    recipe_registry: Res<RecipeRegistry>,
    item_registry: Res<ItemRegistry>,
    mut inventory: ResMut<Inventory>,
    mut player: ResMut<PlayerState>,
    mut completed_events: EventWriter<CraftCompletedEvent>,
    mut aborted_events: EventWriter<CraftAbortedEvent>,
    mut level_events: EventWriter<LevelUpEvent>,
) {
    timer.0.tick(time.delta());
    if !timer.0.just_finished() || !tracker.is_active() {
        return;
    }

    let stores = CraftStores {
        recipes: &recipe_registry,
        items: &item_registry,
        inventory: &mut inventory,
        player: &mut player,
    };

    match tracker.tick(clock.now_ms(), stores) {
        TickOutcome::Idle | TickOutcome::InProgress { .. } => {}
        TickOutcome::Completed(done) => {
            if done.levels_gained > 0 {
                let first_new_level = player.level + 1 - done.levels_gained;
                for new_level in first_new_level..=player.level {
                    info!("Level up! Now level {}", new_level);
                    level_events.send(LevelUpEvent { new_level });
                }
            }
            completed_events.send(CraftCompletedEvent {
                recipe_id: done.recipe_id,
                item_id: done.item_id,
                item_name: done.item_name,
                quantity: done.quantity,
                experience: done.experience,
            });
        }
        TickOutcome::Aborted { recipe_id, reason } => {
            aborted_events.send(CraftAbortedEvent { recipe_id, reason });
        }
    }
}
