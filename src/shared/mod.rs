//! Shared components, resources, events, and states for isocraft.
//!
//! This is the type contract. Every domain plugin imports from here.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::time::{SystemTime, UNIX_EPOCH};

// ═══════════════════════════════════════════════════════════════════════
// GAME STATE
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, States, Default)]
pub enum GameState {
    #[default]
    Loading,
    Playing,
    Paused,
}

// ═══════════════════════════════════════════════════════════════════════
// CLOCK
// ═══════════════════════════════════════════════════════════════════════

/// Wall-clock source for anything measured in real milliseconds
/// (craft start times, progress). `Manual` is advanced explicitly.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameClock {
    #[default]
    System,
    Manual(u64),
}

impl GameClock {
    pub fn now_ms(&self) -> u64 {
        match self {
            GameClock::System => unix_millis(),
            GameClock::Manual(ms) => *ms,
        }
    }

    /// Moves a manual clock forward. No effect on the system clock.
    pub fn advance(&mut self, ms: u64) {
        if let GameClock::Manual(now) = self {
            *now = now.saturating_add(ms);
        }
    }
}

pub fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

// ═══════════════════════════════════════════════════════════════════════
// TILES
// ═══════════════════════════════════════════════════════════════════════

/// Integer grid coordinate of one tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TilePos {
    pub x: i32,
    pub y: i32,
}

impl TilePos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl std::ops::Sub for TilePos {
    type Output = TilePos;

    fn sub(self, rhs: TilePos) -> TilePos {
        TilePos::new(self.x.wrapping_sub(rhs.x), self.y.wrapping_sub(rhs.y))
    }
}

/// Every kind of thing that can occupy a tile, terrain or decoration.
/// The discriminant indexes the descriptor table in `world::tiles`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TileKind {
    Grass,
    Dirt,
    Sand,
    Stone,
    Water,
    Mountain,
    Cliff,
    Tree,
    Bush,
    Rock,
    Sheep,
}

/// Paint layer used to order things standing on the same tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RenderCategory {
    Terrain,
    Water,
    Rock,
    Bush,
    Sheep,
    Tree,
}

// ═══════════════════════════════════════════════════════════════════════
// ITEMS & INVENTORY
// ═══════════════════════════════════════════════════════════════════════

/// Unique identifier for every item type in the game.
pub type ItemId = String;

/// Declared alphabetically; inventory sorting relies on this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ItemCategory {
    Armor,
    Consumable,
    Craftable,
    Resource,
    Tool,
    Weapon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ItemRarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDef {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub category: ItemCategory,
    pub rarity: ItemRarity,
    pub stackable: bool,
    pub max_stack: u32,
    pub value: u32,
}

impl ItemDef {
    /// Per-slot limit. Non-stackable items always take one slot each.
    pub fn effective_max_stack(&self) -> u32 {
        if self.stackable {
            self.max_stack.max(1)
        } else {
            1
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySlot {
    pub item_id: ItemId,
    pub quantity: u32,
}

/// Fixed-size ordered slot array. The slot id is its index.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    pub slots: Vec<Option<InventorySlot>>,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::with_slots(INVENTORY_SLOTS)
    }
}

impl Inventory {
    pub fn with_slots(size: usize) -> Self {
        Self {
            slots: vec![None; size],
        }
    }

    /// Try to add an item. Returns the quantity that couldn't fit.
    pub fn try_add(&mut self, item_id: &str, quantity: u32, max_stack: u32) -> u32 {
        let max_stack = max_stack.max(1);
        let mut remaining = quantity;

        // First pass: stack onto existing slots with same item
        for slot in self.slots.iter_mut() {
            if remaining == 0 {
                break;
            }
            if let Some(ref mut s) = slot {
                if s.item_id == item_id && s.quantity < max_stack {
                    let add = remaining.min(max_stack - s.quantity);
                    s.quantity += add;
                    remaining -= add;
                }
            }
        }

        // Second pass: fill empty slots
        for slot in self.slots.iter_mut() {
            if remaining == 0 {
                break;
            }
            if slot.is_none() {
                let add = remaining.min(max_stack);
                *slot = Some(InventorySlot {
                    item_id: item_id.to_string(),
                    quantity: add,
                });
                remaining -= add;
            }
        }

        remaining
    }

    /// Remove quantity of an item, first slot first. Returns how many were actually removed.
    pub fn try_remove(&mut self, item_id: &str, quantity: u32) -> u32 {
        let mut remaining = quantity;
        for slot in self.slots.iter_mut() {
            if remaining == 0 {
                break;
            }
            if let Some(ref mut s) = slot {
                if s.item_id == item_id {
                    let remove = remaining.min(s.quantity);
                    s.quantity -= remove;
                    remaining -= remove;
                    if s.quantity == 0 {
                        *slot = None;
                    }
                }
            }
        }
        quantity - remaining
    }

    pub fn count(&self, item_id: &str) -> u32 {
        self.slots
            .iter()
            .filter_map(|s| s.as_ref())
            .filter(|s| s.item_id == item_id)
            .map(|s| s.quantity)
            .sum()
    }

    pub fn has(&self, item_id: &str, quantity: u32) -> bool {
        self.count(item_id) >= quantity
    }

    /// Whether `quantity` more of the item would fit without leftovers.
    pub fn can_add(&self, item_id: &str, quantity: u32, max_stack: u32) -> bool {
        let max_stack = max_stack.max(1);
        let topping_up: u32 = self
            .slots
            .iter()
            .filter_map(|s| s.as_ref())
            .filter(|s| s.item_id == item_id && s.quantity < max_stack)
            .map(|s| max_stack - s.quantity)
            .sum();
        let empty = self.free_slots() as u32;
        topping_up.saturating_add(empty.saturating_mul(max_stack)) >= quantity
    }

    pub fn used_slots(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn free_slots(&self) -> usize {
        self.slots.len() - self.used_slots()
    }

    pub fn is_full(&self) -> bool {
        self.free_slots() == 0
    }
}

// ═══════════════════════════════════════════════════════════════════════
// ITEM REGISTRY
// ═══════════════════════════════════════════════════════════════════════

#[derive(Resource, Debug, Clone, Default)]
pub struct ItemRegistry {
    pub items: HashMap<ItemId, ItemDef>,
}

impl ItemRegistry {
    pub fn get(&self, id: &str) -> Option<&ItemDef> {
        self.items.get(id)
    }

    /// Unknown ids are treated as unstackable.
    pub fn max_stack(&self, id: &str) -> u32 {
        self.get(id).map(ItemDef::effective_max_stack).unwrap_or(1)
    }

    pub fn display_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.get(id).map(|d| d.name.as_str()).unwrap_or(id)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// PLAYER
// ═══════════════════════════════════════════════════════════════════════

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub name: String,
    pub level: u32,
    pub experience: u32,
    pub health: f32,
    pub max_health: f32,
    pub hunger: f32,
    pub max_hunger: f32,
    pub thirst: f32,
    pub max_thirst: f32,
    pub energy: f32,
    pub max_energy: f32,
    pub position: TilePos,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new("Survivor")
    }
}

impl PlayerState {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: 1,
            experience: 0,
            health: MAX_HEALTH,
            max_health: MAX_HEALTH,
            hunger: MAX_HUNGER,
            max_hunger: MAX_HUNGER,
            thirst: MAX_THIRST,
            max_thirst: MAX_THIRST,
            energy: MAX_ENERGY,
            max_energy: MAX_ENERGY,
            position: TilePos::default(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// CRAFTING
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub description: String,
    pub ingredients: Vec<(ItemId, u32)>,
    pub result: ItemId,
    pub result_quantity: u32,
    pub required_level: u32,
    /// Real-time seconds from start to completion.
    pub crafting_time: f32,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct RecipeRegistry {
    pub recipes: HashMap<String, Recipe>,
}

impl RecipeRegistry {
    pub fn get(&self, id: &str) -> Option<&Recipe> {
        self.recipes.get(id)
    }
}

/// Recipe ids the player has learned.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveredRecipes {
    pub ids: BTreeSet<String>,
}

/// Why an in-flight craft was dropped without granting its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbortReason {
    UnknownRecipe,
    UnknownResultItem,
    MissingIngredients,
    InventoryFull,
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Event, Debug, Clone)]
pub struct CraftStartedEvent {
    pub recipe_id: String,
}

#[derive(Event, Debug, Clone, PartialEq)]
pub struct CraftCompletedEvent {
    pub recipe_id: String,
    pub item_id: ItemId,
    pub item_name: String,
    pub quantity: u32,
    pub experience: u32,
}

#[derive(Event, Debug, Clone, PartialEq)]
pub struct CraftAbortedEvent {
    pub recipe_id: String,
    pub reason: AbortReason,
}

#[derive(Event, Debug, Clone)]
pub struct LevelUpEvent {
    pub new_level: u32,
}

/// A tap on the play field, in screen pixels.
/// Playing <-> Paused. Crafting keeps ticking while paused.
#[derive(Event, Debug, Clone)]
pub struct TogglePauseEvent;

#[derive(Event, Debug, Clone)]
pub struct TileTapEvent {
    pub screen: Vec2,
}

#[derive(Event, Debug, Clone)]
pub struct PlayerMovedEvent {
    pub from: TilePos,
    pub to: TilePos,
}

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

pub const DEFAULT_TILE_SIZE: f32 = 64.0;
pub const SCREEN_WIDTH: f32 = 960.0;
pub const SCREEN_HEIGHT: f32 = 540.0;
pub const CULL_MARGIN: f32 = 100.0;
pub const MIN_ZOOM: f32 = 0.5;
pub const MAX_ZOOM: f32 = 3.0;

pub const DEFAULT_WORLD_WIDTH: usize = 20;
pub const DEFAULT_WORLD_HEIGHT: usize = 20;

pub const CRAFT_TICK_SECS: f32 = 0.5;
pub const XP_PER_CRAFTED_ITEM: u32 = 10;
pub const XP_PER_LEVEL: u32 = 100;
pub const HEALTH_PER_LEVEL: f32 = 10.0;

pub const INVENTORY_SLOTS: usize = 20;

pub const MAX_HEALTH: f32 = 100.0;
pub const MAX_HUNGER: f32 = 100.0;
pub const MAX_THIRST: f32 = 100.0;
pub const MAX_ENERGY: f32 = 100.0;
