use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::GameConfig;
use crate::shared::*;
use super::bench::has_all_ingredients;

// ──────────────────────────────────────────────────────────────────────────────
// CRAFT JOB
// ──────────────────────────────────────────────────────────────────────────────

/// The single in-flight craft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CraftJob {
    pub recipe_id: String,
    /// Milliseconds since the Unix epoch.
    pub start_time_ms: u64,
    pub active: bool,
    /// Set once completion has begun; a job in this state is never completed again.
    #[serde(default)]
    pub completing: bool,
}

impl CraftJob {
    pub fn new(recipe_id: impl Into<String>, start_time_ms: u64) -> Self {
        Self {
            recipe_id: recipe_id.into(),
            start_time_ms,
            active: true,
            completing: false,
        }
    }

    /// Seconds since start. A clock behind the start time counts as zero.
    pub fn elapsed_secs(&self, now_ms: u64) -> f32 {
        now_ms.saturating_sub(self.start_time_ms) as f32 / 1000.0
    }
}

/// Completion percentage in [0, 100].
pub fn progress_percent(elapsed_secs: f32, crafting_time: f32) -> f32 {
    if crafting_time <= 0.0 {
        return 100.0;
    }
    (elapsed_secs / crafting_time * 100.0).clamp(0.0, 100.0)
}

// ──────────────────────────────────────────────────────────────────────────────
// OUTCOMES
// ──────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct CraftCompletion {
    pub recipe_id: String,
    pub item_id: ItemId,
    pub item_name: String,
    pub quantity: u32,
    pub experience: u32,
    pub levels_gained: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    Idle,
    InProgress { progress: f32 },
    Completed(CraftCompletion),
    Aborted { recipe_id: String, reason: AbortReason },
}

/// Stores a tick may read or mutate, borrowed for the duration of one tick.
pub struct CraftStores<'a> {
    pub recipes: &'a RecipeRegistry,
    pub items: &'a ItemRegistry,
    pub inventory: &'a mut Inventory,
    pub player: &'a mut PlayerState,
}

// ──────────────────────────────────────────────────────────────────────────────
// TRACKER
// ──────────────────────────────────────────────────────────────────────────────

/// Returned by `on_complete`; pass it back to `remove_completion_callback`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompletionHandle(u64);

type CompletionCallback = Box<dyn FnMut(&str, u32) + Send + Sync>;

/// Owns the single crafting slot and the completion observers.
#[derive(Resource)]
pub struct CraftingTracker {
    current: Option<CraftJob>,
    observers: Vec<(CompletionHandle, CompletionCallback)>,
    next_handle: u64,
    xp_per_item: u32,
}

impl fmt::Debug for CraftingTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CraftingTracker")
            .field("current", &self.current)
            .field("observers", &self.observers.len())
            .field("xp_per_item", &self.xp_per_item)
            .finish()
    }
}

impl FromWorld for CraftingTracker {
    fn from_world(world: &mut World) -> Self {
        let xp = world
            .get_resource::<GameConfig>()
            .map(|c| c.xp_per_crafted_item)
            .unwrap_or(XP_PER_CRAFTED_ITEM);
        Self::new(xp)
    }
}

impl CraftingTracker {
    pub fn new(xp_per_item: u32) -> Self {
        Self {
            current: None,
            observers: Vec::new(),
            next_handle: 0,
            xp_per_item,
        }
    }

    pub fn current(&self) -> Option<&CraftJob> {
        self.current.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.current.as_ref().is_some_and(|job| job.active)
    }

    /// Starts a craft. Returns false (and changes nothing) if a craft is
    /// already running, the recipe is unknown, the player is under-levelled,
    /// or an ingredient is short.
    pub fn start_craft(
        &mut self,
        recipe_id: &str,
        now_ms: u64,
        recipes: &RecipeRegistry,
        inventory: &Inventory,
        player: &PlayerState,
    ) -> bool {
        if let Some(reason) = self.start_rejection(recipe_id, recipes, inventory, player) {
            debug!("Not starting craft '{}': {}", recipe_id, reason);
            return false;
        }
        self.current = Some(CraftJob::new(recipe_id, now_ms));
        info!("Started crafting '{}'", recipe_id);
        true
    }

    fn start_rejection(
        &self,
        recipe_id: &str,
        recipes: &RecipeRegistry,
        inventory: &Inventory,
        player: &PlayerState,
    ) -> Option<&'static str> {
        if self.is_active() {
            return Some("a craft is already in progress");
        }
        let Some(recipe) = recipes.get(recipe_id) else {
            return Some("unknown recipe");
        };
        if player.level < recipe.required_level {
            return Some("player level too low");
        }
        if !has_all_ingredients(inventory, recipe) {
            return Some("missing ingredients");
        }
        None
    }

    /// Drops the current job. Ingredients are only taken at completion,
    /// so there is nothing to refund.
    pub fn cancel_craft(&mut self) -> Option<CraftJob> {
        let job = self.current.take();
        if let Some(ref job) = job {
            info!("Cancelled crafting '{}'", job.recipe_id);
        }
        job
    }

    pub fn progress(&self, now_ms: u64, recipes: &RecipeRegistry) -> f32 {
        let Some(job) = self.current.as_ref().filter(|j| j.active) else {
            return 0.0;
        };
        let Some(recipe) = recipes.get(&job.recipe_id) else {
            return 0.0;
        };
        progress_percent(job.elapsed_secs(now_ms), recipe.crafting_time)
    }

    pub fn on_complete(
        &mut self,
        callback: impl FnMut(&str, u32) + Send + Sync + 'static,
    ) -> CompletionHandle {
        let handle = CompletionHandle(self.next_handle);
        self.next_handle += 1;
        self.observers.push((handle, Box::new(callback)));
        handle
    }

    pub fn remove_completion_callback(&mut self, handle: CompletionHandle) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(h, _)| *h != handle);
        self.observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Advances the current job. Completes it once its crafting time has
    /// elapsed; every later tick on the cleared slot is `Idle`.
    pub fn tick(&mut self, now_ms: u64, mut stores: CraftStores<'_>) -> TickOutcome {
        let recipes = stores.recipes;
        let Some(job) = self.current.as_mut() else {
            return TickOutcome::Idle;
        };
        if !job.active || job.completing {
            return TickOutcome::Idle;
        }

        let Some(recipe) = recipes.get(&job.recipe_id) else {
            error!("Recipe '{}' not found, dropping craft", job.recipe_id);
            let recipe_id = job.recipe_id.clone();
            self.current = None;
            return TickOutcome::Aborted {
                recipe_id,
                reason: AbortReason::UnknownRecipe,
            };
        };

        let elapsed = job.elapsed_secs(now_ms);
        if elapsed < recipe.crafting_time {
            return TickOutcome::InProgress {
                progress: progress_percent(elapsed, recipe.crafting_time),
            };
        }

        job.completing = true;
        let result = apply_completion(recipe, &mut stores, self.xp_per_item);
        self.current = None;

        match result {
            Ok(completion) => {
                info!(
                    "Crafted {} x{} (+{} XP)",
                    completion.item_name, completion.quantity, completion.experience
                );
                for (_, callback) in self.observers.iter_mut() {
                    callback(&completion.item_name, completion.quantity);
                }
                TickOutcome::Completed(completion)
            }
            Err(reason) => {
                warn!("Craft '{}' aborted: {:?}", recipe.id, reason);
                TickOutcome::Aborted {
                    recipe_id: recipe.id.clone(),
                    reason,
                }
            }
        }
    }
}

/// Consumes ingredients and grants the result on a staged copy, so either
/// everything lands or nothing does.
fn apply_completion(
    recipe: &Recipe,
    stores: &mut CraftStores<'_>,
    xp_per_item: u32,
) -> Result<CraftCompletion, AbortReason> {
    let Some(result_def) = stores.items.get(&recipe.result) else {
        return Err(AbortReason::UnknownResultItem);
    };
    if !has_all_ingredients(stores.inventory, recipe) {
        return Err(AbortReason::MissingIngredients);
    }

    let mut staged = stores.inventory.clone();
    for (item_id, qty) in &recipe.ingredients {
        staged.try_remove(item_id, *qty);
    }
    let leftover = staged.try_add(
        &recipe.result,
        recipe.result_quantity,
        result_def.effective_max_stack(),
    );
    if leftover > 0 {
        return Err(AbortReason::InventoryFull);
    }
    *stores.inventory = staged;

    let experience = recipe.result_quantity * xp_per_item;
    let levels_gained = stores.player.gain_experience(experience);

    Ok(CraftCompletion {
        recipe_id: recipe.id.clone(),
        item_id: recipe.result.clone(),
        item_name: result_def.name.clone(),
        quantity: recipe.result_quantity,
        experience,
        levels_gained,
    })
}
