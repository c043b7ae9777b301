//! Data layer: populates the item and recipe catalogs at game startup.
//!
//! This plugin runs in OnEnter(GameState::Loading), fills ItemRegistry and
//! RecipeRegistry from the hard-coded game-design data defined in
//! submodules, then transitions the game into GameState::Playing.
//!
//! The catalogs are read-only after this point.

mod items;
mod recipes;

pub use items::populate_items;
pub use recipes::populate_recipes;

use bevy::prelude::*;
use crate::shared::*;

pub struct DataPlugin;

impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Loading), load_all_data);
    }
}

fn load_all_data(
    mut item_registry: ResMut<ItemRegistry>,
    mut recipe_registry: ResMut<RecipeRegistry>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    info!("DataPlugin: populating registries…");

    populate_items(&mut item_registry);
    info!("  Items loaded: {}", item_registry.items.len());

    populate_recipes(&mut recipe_registry);
    info!("  Recipes loaded: {}", recipe_registry.recipes.len());

    for recipe in recipe_registry.recipes.values() {
        let unknown = std::iter::once(&recipe.result)
            .chain(recipe.ingredients.iter().map(|(id, _)| id))
            .filter(|id| item_registry.get(id).is_none());
        for id in unknown {
            warn!("Recipe '{}' references unknown item '{}'", recipe.id, id);
        }
    }

    info!("DataPlugin: all registries populated. Transitioning to Playing.");
    next_state.set(GameState::Playing);
}
