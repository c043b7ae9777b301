//! Timed crafting.
//!
//! One craft runs at a time. `tick_crafting` runs in every state so a craft
//! finishes whether or not anything is looking at it.

use bevy::prelude::*;
use crate::shared::*;

mod bench;
mod timer;
mod tracker;
mod unlock;

pub use bench::{
    available_crafts, can_craft, format_crafting_time, has_all_ingredients,
    missing_ingredients, missing_ingredients_description, recipes_for_level,
    CancelCraftEvent, MissingIngredient, StartCraftEvent,
};
pub use timer::{tick_crafting, CraftTickTimer};
pub use tracker::{
    progress_percent, CompletionHandle, CraftCompletion, CraftJob, CraftStores,
    CraftingTracker, TickOutcome,
};
pub use unlock::{discover_for_level, DiscoverRecipeEvent};

/// Reads `GameConfig` at build time, so insert it before adding this plugin.
pub struct CraftingPlugin;

impl Plugin for CraftingPlugin {
    fn build(&self, app: &mut App) {
        app
            .init_resource::<CraftingTracker>()
            .init_resource::<CraftTickTimer>()
            .init_resource::<DiscoveredRecipes>()
            .add_event::<StartCraftEvent>()
            .add_event::<CancelCraftEvent>()
            .add_event::<CraftStartedEvent>()
            .add_event::<CraftCompletedEvent>()
            .add_event::<CraftAbortedEvent>()
            .add_event::<LevelUpEvent>()
            .add_event::<DiscoverRecipeEvent>()
            .add_systems(
                OnTransition {
                    exited: GameState::Loading,
                    entered: GameState::Playing,
                },
                unlock::initialize_discovered_recipes,
            )
            // Background tick: every state
            .add_systems(Update, timer::tick_crafting)
            .add_systems(
                Update,
                (
                    bench::handle_start_craft,
                    bench::handle_cancel_craft,
                    unlock::discover_on_level_up,
                    unlock::handle_discover_recipe,
                )
                    .run_if(in_state(GameState::Playing)),
            );
    }
}
