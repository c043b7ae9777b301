use bevy::prelude::*;
use crate::shared::*;
use super::tracker::CraftingTracker;

// ──────────────────────────────────────────────────────────────────────────────
// EVENTS
// ──────────────────────────────────────────────────────────────────────────────

/// Request to begin crafting a recipe.
#[derive(Event, Debug, Clone)]
pub struct StartCraftEvent {
    pub recipe_id: String,
}

/// Request to drop the in-flight craft.
#[derive(Event, Debug, Clone, Default)]
pub struct CancelCraftEvent;

// ──────────────────────────────────────────────────────────────────────────────
// SYSTEMS
// ──────────────────────────────────────────────────────────────────────────────

/// Runs in Playing. Hands each StartCraftEvent to the tracker; ingredients
/// stay in the inventory until the craft finishes.
pub fn handle_start_craft(
    mut events: EventReader<StartCraftEvent>,
    clock: Res<GameClock>,
    mut tracker: ResMut<CraftingTracker>,
    recipe_registry: Res<RecipeRegistry>,
    item_registry: Res<ItemRegistry>,
    inventory: Res<Inventory>,
    player: Res<PlayerState>,
    mut started_events: EventWriter<CraftStartedEvent>,
) {
    for event in events.read() {
        let recipe_id = &event.recipe_id;

        if let Some(recipe) = recipe_registry.get(recipe_id) {
            if !has_all_ingredients(&inventory, recipe) {
                let missing = missing_ingredients_description(recipe, &inventory, &item_registry);
                warn!("Cannot craft '{}': missing {}", recipe.name, missing);
                continue;
            }
        }

        if tracker.start_craft(recipe_id, clock.now_ms(), &recipe_registry, &inventory, &player) {
            started_events.send(CraftStartedEvent {
                recipe_id: recipe_id.clone(),
            });
        }
    }
}

pub fn handle_cancel_craft(
    mut events: EventReader<CancelCraftEvent>,
    mut tracker: ResMut<CraftingTracker>,
) {
    for _ in events.read() {
        if tracker.cancel_craft().is_none() {
            debug!("Cancel requested with no craft in progress");
        }
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// HELPER FUNCTIONS
// ──────────────────────────────────────────────────────────────────────────────

/// Returns true if the inventory has all required ingredients for a recipe.
pub fn has_all_ingredients(inventory: &Inventory, recipe: &Recipe) -> bool {
    recipe
        .ingredients
        .iter()
        .all(|(item_id, qty)| inventory.has(item_id, *qty))
}

/// Level gate plus ingredients.
pub fn can_craft(recipe: &Recipe, inventory: &Inventory, player_level: u32) -> bool {
    player_level >= recipe.required_level && has_all_ingredients(inventory, recipe)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingIngredient {
    pub item_id: ItemId,
    pub required: u32,
    pub available: u32,
    pub missing: u32,
}

pub fn missing_ingredients(recipe: &Recipe, inventory: &Inventory) -> Vec<MissingIngredient> {
    recipe
        .ingredients
        .iter()
        .filter_map(|(item_id, qty)| {
            let available = inventory.count(item_id);
            (available < *qty).then(|| MissingIngredient {
                item_id: item_id.clone(),
                required: *qty,
                available,
                missing: qty - available,
            })
        })
        .collect()
}

/// Returns a human-readable list of missing ingredients.
pub fn missing_ingredients_description(
    recipe: &Recipe,
    inventory: &Inventory,
    items: &ItemRegistry,
) -> String {
    missing_ingredients(recipe, inventory)
        .iter()
        .map(|m| {
            format!(
                "{} (have {}/{})",
                items.display_name(&m.item_id),
                m.available,
                m.required
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Recipes the player can start right now, sorted by id.
pub fn available_crafts<'a>(
    recipes: &'a RecipeRegistry,
    inventory: &Inventory,
    player_level: u32,
) -> Vec<&'a Recipe> {
    let mut out: Vec<&Recipe> = recipes
        .recipes
        .values()
        .filter(|r| can_craft(r, inventory, player_level))
        .collect();
    out.sort_by(|a, b| a.id.cmp(&b.id));
    out
}

/// Recipes whose level gate is met, sorted by required level then id.
pub fn recipes_for_level(recipes: &RecipeRegistry, player_level: u32) -> Vec<&Recipe> {
    let mut out: Vec<&Recipe> = recipes
        .recipes
        .values()
        .filter(|r| r.required_level <= player_level)
        .collect();
    out.sort_by(|a, b| {
        a.required_level
            .cmp(&b.required_level)
            .then_with(|| a.id.cmp(&b.id))
    });
    out
}

/// "45s", "2m", "1m 30s".
pub fn format_crafting_time(seconds: u32) -> String {
    if seconds < 60 {
        return format!("{}s", seconds);
    }
    let minutes = seconds / 60;
    let rest = seconds % 60;
    if rest == 0 {
        format!("{}m", minutes)
    } else {
        format!("{}m {}s", minutes, rest)
    }
}
