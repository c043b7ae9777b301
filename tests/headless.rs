//! Headless integration tests for isocraft.
//!
//! These tests drive the real plugins inside a Bevy app built on
//! `MinimalPlugins`. Frame time is fixed with `TimeUpdateStrategy` and the
//! wall clock is a manual `GameClock`, so crafting runs deterministically.
//!
//! Run with: `cargo test --test headless`

use std::time::Duration;

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;
use isocraft::config::{GameConfig, WorldVariant};
use isocraft::crafting::{CancelCraftEvent, CraftJob, CraftingPlugin, CraftingTracker, StartCraftEvent};
use isocraft::data::DataPlugin;
use isocraft::player::{CameraPanEvent, CameraZoomEvent, IsoCamera, PlayerPlugin};
use isocraft::save::{
    read_state, write_state, BlobStore, ClearGameDataEvent, LoadCompleteEvent, LoadOutcome,
    MemoryBlobStore, PersistedState, SavePlugin, SaveRequestEvent, SaveStore, ROOT_KEY,
    SAVE_VERSION,
};
use isocraft::shared::*;
use isocraft::world::{DrawList, WorldMap, WorldPlugin};

const T0: u64 = 1_700_000_000_000;
const FRAME_MS: u64 = 100;

// ─────────────────────────────────────────────────────────────────────────────
// Test App Builder
// ─────────────────────────────────────────────────────────────────────────────

/// Every event of type `E` seen so far.
#[derive(Resource)]
struct Collected<E: Event + Clone>(Vec<E>);

impl<E: Event + Clone> Default for Collected<E> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

fn collect<E: Event + Clone>(mut reader: EventReader<E>, mut out: ResMut<Collected<E>>) {
    out.0.extend(reader.read().cloned());
}

fn track<E: Event + Clone>(app: &mut App) {
    app.init_resource::<Collected<E>>()
        .add_systems(Last, collect::<E>);
}

fn collected<E: Event + Clone>(app: &App) -> Vec<E> {
    app.world().resource::<Collected<E>>().0.clone()
}

fn seeded_config() -> GameConfig {
    let mut config = GameConfig::default();
    config.world.seed = Some(42);
    config
}

fn handcrafted_config() -> GameConfig {
    let mut config = GameConfig::default();
    config.world.variant = WorldVariant::Handcrafted;
    config
}

/// Builds the full game (mirrors main.rs) over an in-memory save store.
fn build_test_app(config: GameConfig, store: MemoryBlobStore) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(StatesPlugin);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(FRAME_MS)));

    let inventory = Inventory::with_slots(config.inventory_slots);
    app.insert_resource(config)
        .insert_resource(SaveStore(Box::new(store)));

    // ── Game State ───────────────────────────────────────────────────────
    app.init_state::<GameState>();

    // ── Shared Resources (mirrors main.rs) ───────────────────────────────
    app.insert_resource(GameClock::Manual(T0))
        .init_resource::<PlayerState>()
        .insert_resource(inventory)
        .init_resource::<ItemRegistry>()
        .init_resource::<RecipeRegistry>()
        .init_resource::<DiscoveredRecipes>();

    app.add_plugins((WorldPlugin, PlayerPlugin, CraftingPlugin, SavePlugin, DataPlugin));

    track::<CraftStartedEvent>(&mut app);
    track::<CraftCompletedEvent>(&mut app);
    track::<CraftAbortedEvent>(&mut app);
    track::<LevelUpEvent>(&mut app);
    track::<PlayerMovedEvent>(&mut app);
    track::<LoadCompleteEvent>(&mut app);

    app
}

/// Boots through Loading into Playing.
fn boot(app: &mut App) {
    app.update();
    app.update();
    assert_eq!(
        app.world().resource::<State<GameState>>().get(),
        &GameState::Playing
    );
}

/// Advances the wall clock and frame time together, one frame at a time.
fn run_for(app: &mut App, ms: u64) {
    for _ in 0..ms / FRAME_MS {
        app.world_mut().resource_mut::<GameClock>().advance(FRAME_MS);
        app.update();
    }
}

fn give(app: &mut App, item_id: &str, quantity: u32) {
    let max_stack = app.world().resource::<ItemRegistry>().max_stack(item_id);
    let leftover = app
        .world_mut()
        .resource_mut::<Inventory>()
        .try_add(item_id, quantity, max_stack);
    assert_eq!(leftover, 0);
}

fn count(app: &App, item_id: &str) -> u32 {
    app.world().resource::<Inventory>().count(item_id)
}

fn start(app: &mut App, recipe_id: &str) {
    app.world_mut().send_event(StartCraftEvent {
        recipe_id: recipe_id.to_string(),
    });
    app.update();
}

fn stored_state(app: &mut App) -> LoadOutcome {
    let mut store = app.world_mut().resource_mut::<SaveStore>();
    read_state(store.0.as_mut()).unwrap()
}

// ─────────────────────────────────────────────────────────────────────────────
// Boot
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_headless_boot_reaches_playing_with_world() {
    let mut app = build_test_app(seeded_config(), MemoryBlobStore::default());
    boot(&mut app);

    assert!(!app.world().resource::<ItemRegistry>().items.is_empty());
    assert!(!app.world().resource::<RecipeRegistry>().recipes.is_empty());

    let map = app.world().resource::<WorldMap>();
    assert_eq!((map.width, map.height), (DEFAULT_WORLD_WIDTH, DEFAULT_WORLD_HEIGHT));
    assert_eq!(map.spawn, TilePos::new(10, 10));
    assert_eq!(app.world().resource::<PlayerState>().position, map.spawn);

    let discovered = app.world().resource::<DiscoveredRecipes>();
    assert!(discovered.ids.contains("wooden_plank"));
    assert!(!discovered.ids.contains("iron_axe"));

    assert!(collected::<LoadCompleteEvent>(&app).is_empty(), "nothing saved yet");
}

// ─────────────────────────────────────────────────────────────────────────────
// Crafting
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_wooden_plank_crafts_once_in_background() {
    let mut app = build_test_app(seeded_config(), MemoryBlobStore::default());
    boot(&mut app);
    give(&mut app, "wood", 1);

    start(&mut app, "wooden_plank");
    assert_eq!(collected::<CraftStartedEvent>(&app).len(), 1);
    assert_eq!(count(&app, "wood"), 1, "ingredients stay until completion");

    run_for(&mut app, 1_000);
    let now = app.world().resource::<GameClock>().now_ms();
    let progress = app
        .world()
        .resource::<CraftingTracker>()
        .progress(now, app.world().resource::<RecipeRegistry>());
    assert!(progress > 0.0 && progress < 100.0, "progress was {}", progress);
    assert!(collected::<CraftCompletedEvent>(&app).is_empty());

    run_for(&mut app, 3_000);
    let completed = collected::<CraftCompletedEvent>(&app);
    assert_eq!(
        completed,
        vec![CraftCompletedEvent {
            recipe_id: "wooden_plank".into(),
            item_id: "wooden_plank".into(),
            item_name: "Wooden Plank".into(),
            quantity: 4,
            experience: 40,
        }]
    );
    assert_eq!(count(&app, "wood"), 0);
    assert_eq!(count(&app, "wooden_plank"), 4);
    assert_eq!(app.world().resource::<PlayerState>().experience, 40);
    assert!(!app.world().resource::<CraftingTracker>().is_active());

    // Keep ticking: nothing else happens
    run_for(&mut app, 5_000);
    assert_eq!(collected::<CraftCompletedEvent>(&app).len(), 1);
    assert_eq!(count(&app, "wooden_plank"), 4);
}

#[test]
fn test_second_start_in_same_frame_is_rejected() {
    let mut app = build_test_app(seeded_config(), MemoryBlobStore::default());
    boot(&mut app);
    give(&mut app, "wood", 5);

    app.world_mut().send_event(StartCraftEvent { recipe_id: "wooden_plank".into() });
    app.world_mut().send_event(StartCraftEvent { recipe_id: "wooden_plank".into() });
    app.update();

    assert_eq!(collected::<CraftStartedEvent>(&app).len(), 1);
    run_for(&mut app, 3_000);
    assert_eq!(collected::<CraftCompletedEvent>(&app).len(), 1);
    assert_eq!(count(&app, "wood"), 4);
}

#[test]
fn test_start_without_ingredients_does_nothing() {
    let mut app = build_test_app(seeded_config(), MemoryBlobStore::default());
    boot(&mut app);

    start(&mut app, "wooden_axe");
    start(&mut app, "no_such_recipe");
    assert!(collected::<CraftStartedEvent>(&app).is_empty());
    assert!(!app.world().resource::<CraftingTracker>().is_active());
}

#[test]
fn test_cancel_keeps_ingredients() {
    let mut app = build_test_app(seeded_config(), MemoryBlobStore::default());
    boot(&mut app);
    give(&mut app, "fibers", 2);

    start(&mut app, "rope");
    run_for(&mut app, 1_000);
    app.world_mut().send_event(CancelCraftEvent);
    app.update();

    run_for(&mut app, 5_000);
    assert!(collected::<CraftCompletedEvent>(&app).is_empty());
    assert_eq!(count(&app, "fibers"), 2);
    assert_eq!(count(&app, "rope"), 0);
}

#[test]
fn test_ingredients_gone_at_completion_aborts() {
    let mut app = build_test_app(seeded_config(), MemoryBlobStore::default());
    boot(&mut app);
    give(&mut app, "wood", 1);

    start(&mut app, "wooden_plank");
    app.world_mut().resource_mut::<Inventory>().try_remove("wood", 1);
    run_for(&mut app, 3_000);

    assert_eq!(
        collected::<CraftAbortedEvent>(&app),
        vec![CraftAbortedEvent {
            recipe_id: "wooden_plank".into(),
            reason: AbortReason::MissingIngredients,
        }]
    );
    assert_eq!(count(&app, "wooden_plank"), 0);
    assert_eq!(app.world().resource::<PlayerState>().experience, 0);
}

#[test]
fn test_crafting_level_up_discovers_recipes() {
    let mut app = build_test_app(seeded_config(), MemoryBlobStore::default());
    boot(&mut app);
    app.world_mut().resource_mut::<PlayerState>().experience = 95;
    give(&mut app, "fibers", 2);

    start(&mut app, "rope");
    run_for(&mut app, 4_000);

    let level_ups = collected::<LevelUpEvent>(&app);
    assert_eq!(level_ups.len(), 1);
    assert_eq!(level_ups[0].new_level, 2);

    let player = app.world().resource::<PlayerState>();
    assert_eq!(player.level, 2);
    assert_eq!(player.max_health, MAX_HEALTH + HEALTH_PER_LEVEL);
    assert!(app
        .world()
        .resource::<DiscoveredRecipes>()
        .ids
        .contains("copper_ingot"));
}

fn toggle_pause(app: &mut App) {
    app.world_mut().send_event(TogglePauseEvent);
    app.update();
    app.update();
}

fn state(app: &App) -> GameState {
    *app.world().resource::<State<GameState>>().get()
}

#[test]
fn test_craft_completes_while_paused() {
    let mut app = build_test_app(handcrafted_config(), MemoryBlobStore::default());
    boot(&mut app);
    tap(&mut app, 512.0, 286.0);
    assert_eq!(app.world().resource::<PlayerState>().position, TilePos::new(3, 3));

    give(&mut app, "wood", 1);
    start(&mut app, "wooden_plank");
    toggle_pause(&mut app);
    assert_eq!(state(&app), GameState::Paused);

    run_for(&mut app, 3_000);
    assert_eq!(state(&app), GameState::Paused);
    assert_eq!(collected::<CraftCompletedEvent>(&app).len(), 1);
    assert_eq!(count(&app, "wood"), 0);
    assert_eq!(count(&app, "wooden_plank"), 4);

    // Resuming keeps the world and the character where they were
    toggle_pause(&mut app);
    assert_eq!(state(&app), GameState::Playing);
    assert_eq!(app.world().resource::<PlayerState>().position, TilePos::new(3, 3));
    assert_eq!(count(&app, "wooden_plank"), 4);
    assert_eq!(collected::<CraftCompletedEvent>(&app).len(), 1);
}

// ─────────────────────────────────────────────────────────────────────────────
// Movement
// ─────────────────────────────────────────────────────────────────────────────

fn tap(app: &mut App, x: f32, y: f32) {
    app.world_mut().send_event(TileTapEvent { screen: Vec2::new(x, y) });
    app.update();
}

#[test]
fn test_tap_moves_to_walkable_neighbour() {
    let mut app = build_test_app(handcrafted_config(), MemoryBlobStore::default());
    boot(&mut app);
    assert_eq!(app.world().resource::<PlayerState>().position, TilePos::new(2, 3));

    // Viewport center is (480, 270); one tile east is (+32, +16).
    tap(&mut app, 512.0, 286.0);
    assert_eq!(app.world().resource::<PlayerState>().position, TilePos::new(3, 3));

    let moves = collected::<PlayerMovedEvent>(&app);
    assert_eq!(moves.len(), 1);
    assert_eq!(moves[0].from, TilePos::new(2, 3));
    assert_eq!(moves[0].to, TilePos::new(3, 3));
}

#[test]
fn test_tap_on_blocked_or_outside_tile_is_ignored() {
    let mut app = build_test_app(handcrafted_config(), MemoryBlobStore::default());
    boot(&mut app);

    // (2, 2) holds a tree.
    tap(&mut app, 512.0, 254.0);
    // (-1, 3) is off the map.
    tap(&mut app, 384.0, 222.0);

    assert_eq!(app.world().resource::<PlayerState>().position, TilePos::new(2, 3));
    assert!(collected::<PlayerMovedEvent>(&app).is_empty());
}

#[test]
fn test_tap_follows_camera_pan_and_zoom() {
    let mut app = build_test_app(handcrafted_config(), MemoryBlobStore::default());
    boot(&mut app);

    app.world_mut().send_event(CameraPanEvent { delta: Vec2::new(100.0, 0.0) });
    app.world_mut().send_event(CameraZoomEvent { factor: 2.0 });
    // One tile east at zoom 2 is (+64, +32) from the shifted center.
    tap(&mut app, 644.0, 302.0);

    let camera = *app.world().resource::<IsoCamera>();
    assert_eq!(camera.zoom, 2.0);
    assert_eq!(camera.offset, Vec2::new(100.0, 0.0));
    assert_eq!(app.world().resource::<PlayerState>().position, TilePos::new(3, 3));
    assert!(!app.world().resource::<DrawList>().items.is_empty());
}

// ─────────────────────────────────────────────────────────────────────────────
// Persistence
// ─────────────────────────────────────────────────────────────────────────────

fn saved(player: PlayerState, version: u32, craft: Option<CraftJob>) -> MemoryBlobStore {
    let mut inventory = Inventory::default();
    inventory.try_add("stone", 7, 50);
    let state = PersistedState {
        version,
        player,
        inventory,
        current_craft: craft,
        discovered: DiscoveredRecipes::default(),
    };
    let mut store = MemoryBlobStore::default();
    write_state(&mut store, &state).unwrap();
    store
}

#[test]
fn test_completion_autosaves() {
    let mut app = build_test_app(seeded_config(), MemoryBlobStore::default());
    boot(&mut app);
    give(&mut app, "wood", 1);

    start(&mut app, "wooden_plank");
    run_for(&mut app, 3_000);

    let LoadOutcome::Loaded(state) = stored_state(&mut app) else {
        panic!("expected an autosave after crafting");
    };
    assert_eq!(state.version, SAVE_VERSION);
    assert_eq!(state.inventory.count("wooden_plank"), 4);
    assert_eq!(state.player.experience, 40);
    assert_eq!(state.current_craft, None);
}

#[test]
fn test_save_request_writes_current_state() {
    let mut app = build_test_app(seeded_config(), MemoryBlobStore::default());
    boot(&mut app);
    give(&mut app, "berries", 3);

    app.world_mut().send_event(SaveRequestEvent);
    app.update();

    let LoadOutcome::Loaded(state) = stored_state(&mut app) else {
        panic!("expected a save");
    };
    assert_eq!(state.inventory.count("berries"), 3);
    assert!(state.discovered.ids.contains("wooden_plank"));
}

#[test]
fn test_load_restores_state_and_drops_abandoned_craft() {
    let mut player = PlayerState::new("Returning");
    player.level = 3;
    player.experience = 250;
    let mut job = CraftJob::new("wooden_plank", T0 - 60_000);
    job.active = true;
    let store = saved(player, SAVE_VERSION, Some(job));

    let mut app = build_test_app(seeded_config(), store);
    boot(&mut app);

    let player = app.world().resource::<PlayerState>();
    assert_eq!(player.name, "Returning");
    assert_eq!(player.level, 3);
    assert_eq!(count(&app, "stone"), 7);
    assert!(!app.world().resource::<CraftingTracker>().is_active());
    assert!(app.world().resource::<DiscoveredRecipes>().ids.contains("iron_ingot"));

    let loads = collected::<LoadCompleteEvent>(&app);
    assert_eq!(loads.len(), 1);
    assert!(loads[0].success);

    run_for(&mut app, 2_000);
    assert!(collected::<CraftCompletedEvent>(&app).is_empty());
}

#[test]
fn test_version_mismatch_starts_fresh() {
    let mut player = PlayerState::new("Old");
    player.level = 9;
    let store = saved(player, SAVE_VERSION + 1, None);

    let mut app = build_test_app(seeded_config(), store);
    boot(&mut app);

    assert_eq!(app.world().resource::<PlayerState>().level, 1);
    assert_eq!(count(&app, "stone"), 0);
    let loads = collected::<LoadCompleteEvent>(&app);
    assert_eq!(loads.len(), 1);
    assert!(!loads[0].success);
    assert_eq!(stored_state(&mut app), LoadOutcome::Empty);
}

#[test]
fn test_clear_game_data_resets_everything() {
    let mut app = build_test_app(seeded_config(), MemoryBlobStore::default());
    boot(&mut app);
    give(&mut app, "wood", 3);
    app.world_mut().resource_mut::<PlayerState>().gain_experience(500);
    start(&mut app, "wooden_plank");
    app.world_mut().send_event(SaveRequestEvent);
    app.update();

    app.world_mut().send_event(ClearGameDataEvent);
    app.update();

    assert_eq!(app.world().resource::<PlayerState>().level, 1);
    assert_eq!(count(&app, "wood"), 0);
    assert!(!app.world().resource::<CraftingTracker>().is_active());
    assert!(app.world().resource::<DiscoveredRecipes>().ids.contains("wooden_plank"));
    assert!(!app.world().resource::<DiscoveredRecipes>().ids.contains("iron_axe"));

    let store = app.world().resource::<SaveStore>();
    assert_eq!(store.0.get(ROOT_KEY).unwrap(), None);
}
