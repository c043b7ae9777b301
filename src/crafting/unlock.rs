use bevy::prelude::*;
use crate::shared::*;

// ──────────────────────────────────────────────────────────────────────────────
// DISCOVERY EVENT
// ──────────────────────────────────────────────────────────────────────────────

/// Send this event to teach the player a recipe.
#[derive(Event, Debug, Clone)]
pub struct DiscoverRecipeEvent {
    pub recipe_id: String,
}

/// Adds every recipe the given level qualifies for. Returns how many were new.
pub fn discover_for_level(
    discovered: &mut DiscoveredRecipes,
    recipes: &RecipeRegistry,
    level: u32,
) -> usize {
    let before = discovered.ids.len();
    discovered.ids.extend(
        recipes
            .recipes
            .values()
            .filter(|r| r.required_level <= level)
            .map(|r| r.id.clone()),
    );
    discovered.ids.len() - before
}

// ──────────────────────────────────────────────────────────────────────────────
// SYSTEMS
// ──────────────────────────────────────────────────────────────────────────────

/// Runs once when loading finishes.
pub fn initialize_discovered_recipes(
    mut discovered: ResMut<DiscoveredRecipes>,
    recipe_registry: Res<RecipeRegistry>,
    player: Res<PlayerState>,
) {
    let newly = discover_for_level(&mut discovered, &recipe_registry, player.level);
    if newly > 0 {
        info!(
            "CraftingPlugin: discovered {} recipes ({} total)",
            newly,
            discovered.ids.len()
        );
    }
}

pub fn discover_on_level_up(
    mut level_events: EventReader<LevelUpEvent>,
    mut discovered: ResMut<DiscoveredRecipes>,
    recipe_registry: Res<RecipeRegistry>,
) {
    for event in level_events.read() {
        let newly = discover_for_level(&mut discovered, &recipe_registry, event.new_level);
        if newly > 0 {
            info!("Level {} unlocked {} new recipes", event.new_level, newly);
        }
    }
}

/// Handles DiscoverRecipeEvent. Already-known ids are a no-op.
pub fn handle_discover_recipe(
    mut events: EventReader<DiscoverRecipeEvent>,
    mut discovered: ResMut<DiscoveredRecipes>,
    recipe_registry: Res<RecipeRegistry>,
) {
    for event in events.read() {
        let recipe_id = &event.recipe_id;

        if discovered.ids.contains(recipe_id) {
            continue;
        }

        if recipe_registry.get(recipe_id).is_some() {
            discovered.ids.insert(recipe_id.clone());
            info!("Discovered recipe: '{}'", recipe_id);
        } else {
            warn!("DiscoverRecipeEvent: recipe '{}' not found in registry", recipe_id);
        }
    }
}
