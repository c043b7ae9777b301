use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::GameConfig;
use crate::crafting::{discover_for_level, CraftJob, CraftingTracker};
use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// PUBLIC TYPES
// ═══════════════════════════════════════════════════════════════════════

pub const SAVE_VERSION: u32 = 1;
/// Key the whole game snapshot is stored under.
pub const ROOT_KEY: &str = "persist:root";

/// Everything that survives a restart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    pub version: u32,
    pub player: PlayerState,
    pub inventory: Inventory,
    /// Written for completeness; never resumed on load.
    pub current_craft: Option<CraftJob>,
    pub discovered: DiscoveredRecipes,
}

#[derive(Deserialize)]
struct VersionProbe {
    version: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Empty,
    Loaded(PersistedState),
    /// A blob existed but was thrown away.
    Discarded(String),
}

// ═══════════════════════════════════════════════════════════════════════
// BLOB STORES
// ═══════════════════════════════════════════════════════════════════════

/// String key-value persistence boundary.
pub trait BlobStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), String>;
    fn remove(&mut self, key: &str) -> Result<(), String>;
    fn clear(&mut self) -> Result<(), String>;
}

/// One `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `saves/` next to the executable.
    pub fn default_dir() -> PathBuf {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."));
        exe_dir.join("saves")
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn key_path(&self, key: &str) -> PathBuf {
        let file: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{}.json", file))
    }

    fn ensure_dir(&self) -> Result<(), String> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).map_err(|e| {
                format!("Could not create saves directory {}: {}", self.dir.display(), e)
            })?;
        }
        Ok(())
    }
}

impl BlobStore for FileBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>, String> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| format!("Read failed for {}: {}", path.display(), e))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        self.ensure_dir()?;
        let path = self.key_path(key);
        // Write to a temp file first, then rename for atomicity
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, value)
            .map_err(|e| format!("Write failed for {}: {}", tmp_path.display(), e))?;
        fs::rename(&tmp_path, &path).map_err(|e| format!("Rename failed: {}", e))
    }

    fn remove(&mut self, key: &str) -> Result<(), String> {
        let path = self.key_path(key);
        if path.exists() {
            fs::remove_file(&path)
                .map_err(|e| format!("Remove failed for {}: {}", path.display(), e))?;
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<(), String> {
        if !self.dir.exists() {
            return Ok(());
        }
        let entries = fs::read_dir(&self.dir)
            .map_err(|e| format!("Could not list {}: {}", self.dir.display(), e))?;
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                fs::remove_file(&path)
                    .map_err(|e| format!("Remove failed for {}: {}", path.display(), e))?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    blobs: HashMap<String, String>,
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>, String> {
        Ok(self.blobs.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        self.blobs.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), String> {
        self.blobs.remove(key);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), String> {
        self.blobs.clear();
        Ok(())
    }
}

/// The game's blob store.
#[derive(Resource)]
pub struct SaveStore(pub Box<dyn BlobStore>);

impl SaveStore {
    pub fn memory() -> Self {
        Self(Box::new(MemoryBlobStore::default()))
    }

    pub fn file(dir: impl Into<PathBuf>) -> Self {
        Self(Box::new(FileBlobStore::new(dir)))
    }

    pub fn from_config(config: &GameConfig) -> Self {
        let dir = config
            .save_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(FileBlobStore::default_dir);
        info!("Saves directory: {}", dir.display());
        Self::file(dir)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// SNAPSHOT READ / WRITE
// ═══════════════════════════════════════════════════════════════════════

pub fn write_state(store: &mut dyn BlobStore, state: &PersistedState) -> Result<(), String> {
    let json =
        serde_json::to_string_pretty(state).map_err(|e| format!("Serialization failed: {}", e))?;
    store.set(ROOT_KEY, &json)
}

/// Reads the snapshot. Blobs from another schema version, or that do not
/// parse, are removed from the store and reported as `Discarded`.
pub fn read_state(store: &mut dyn BlobStore) -> Result<LoadOutcome, String> {
    let Some(json) = store.get(ROOT_KEY)? else {
        return Ok(LoadOutcome::Empty);
    };

    let reason = match serde_json::from_str::<VersionProbe>(&json) {
        Ok(probe) if probe.version != SAVE_VERSION => format!(
            "save version {} does not match {}",
            probe.version, SAVE_VERSION
        ),
        Ok(_) => match serde_json::from_str::<PersistedState>(&json) {
            Ok(state) => return Ok(LoadOutcome::Loaded(state)),
            Err(e) => format!("Deserialization failed: {}", e),
        },
        Err(e) => format!("Deserialization failed: {}", e),
    };

    store.remove(ROOT_KEY)?;
    Ok(LoadOutcome::Discarded(reason))
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Event, Debug, Clone, Default)]
pub struct SaveRequestEvent;

/// Sent after a save completes (success or failure).
#[derive(Event, Debug, Clone)]
pub struct SaveCompleteEvent {
    pub success: bool,
    pub error_message: Option<String>,
}

/// Sent after the startup load.
#[derive(Event, Debug, Clone)]
pub struct LoadCompleteEvent {
    pub success: bool,
    pub error_message: Option<String>,
}

/// Wipes the store and resets player, inventory and crafting to a fresh game.
#[derive(Event, Debug, Clone, Default)]
pub struct ClearGameDataEvent;

// ═══════════════════════════════════════════════════════════════════════
// PLUGIN
// ═══════════════════════════════════════════════════════════════════════

/// Uses an existing `SaveStore` if one was inserted, otherwise builds a
/// file store from `GameConfig`.
pub struct SavePlugin;

impl Plugin for SavePlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<SaveStore>() {
            let store = app
                .world()
                .get_resource::<GameConfig>()
                .map(SaveStore::from_config)
                .unwrap_or_else(|| SaveStore::file(FileBlobStore::default_dir()));
            app.insert_resource(store);
        }

        app.add_event::<SaveRequestEvent>()
            .add_event::<SaveCompleteEvent>()
            .add_event::<LoadCompleteEvent>()
            .add_event::<ClearGameDataEvent>()
            .add_systems(Startup, load_saved_game)
            .add_systems(
                Update,
                (
                    autosave_on_craft_complete,
                    handle_save_request.after(autosave_on_craft_complete),
                    handle_clear_game_data.after(handle_save_request),
                ),
            );
    }
}

// ═══════════════════════════════════════════════════════════════════════
// SYSTEMS
// ═══════════════════════════════════════════════════════════════════════

fn load_saved_game(
    mut store: ResMut<SaveStore>,
    mut player_state: ResMut<PlayerState>,
    mut inventory: ResMut<Inventory>,
    mut discovered: ResMut<DiscoveredRecipes>,
    mut tracker: ResMut<CraftingTracker>,
    mut complete_events: EventWriter<LoadCompleteEvent>,
) {
    match read_state(store.0.as_mut()) {
        Ok(LoadOutcome::Empty) => {
            info!("No saved game found, starting fresh.");
        }
        Ok(LoadOutcome::Loaded(file)) => {
            *player_state = file.player;
            *inventory = file.inventory;
            *discovered = file.discovered;

            if let Some(job) = file.current_craft.filter(|j| j.active) {
                info!("Discarding unfinished craft '{}' from last session", job.recipe_id);
            }
            tracker.cancel_craft();

            info!("Loaded saved game (level {})", player_state.level);
            complete_events.send(LoadCompleteEvent {
                success: true,
                error_message: None,
            });
        }
        Ok(LoadOutcome::Discarded(reason)) => {
            warn!("Discarded saved game: {}", reason);
            complete_events.send(LoadCompleteEvent {
                success: false,
                error_message: Some(reason),
            });
        }
        Err(e) => {
            warn!("Load FAILED: {}", e);
            complete_events.send(LoadCompleteEvent {
                success: false,
                error_message: Some(e),
            });
        }
    }
}

/// Save right after every finished craft.
fn autosave_on_craft_complete(
    mut craft_events: EventReader<CraftCompletedEvent>,
    mut save_writer: EventWriter<SaveRequestEvent>,
) {
    if craft_events.read().count() > 0 {
        save_writer.send(SaveRequestEvent);
    }
}

fn handle_save_request(
    mut save_events: EventReader<SaveRequestEvent>,
    mut complete_events: EventWriter<SaveCompleteEvent>,
    mut store: ResMut<SaveStore>,
    player_state: Res<PlayerState>,
    inventory: Res<Inventory>,
    discovered: Res<DiscoveredRecipes>,
    tracker: Res<CraftingTracker>,
) {
    // Several requests in one frame collapse into one write.
    if save_events.read().count() == 0 {
        return;
    }

    let state = PersistedState {
        version: SAVE_VERSION,
        player: player_state.clone(),
        inventory: inventory.clone(),
        current_craft: tracker.current().cloned(),
        discovered: discovered.clone(),
    };

    match write_state(store.0.as_mut(), &state) {
        Ok(()) => {
            debug!("Save succeeded.");
            complete_events.send(SaveCompleteEvent {
                success: true,
                error_message: None,
            });
        }
        Err(e) => {
            warn!("Save FAILED: {}", e);
            complete_events.send(SaveCompleteEvent {
                success: false,
                error_message: Some(e),
            });
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn handle_clear_game_data(
    mut clear_events: EventReader<ClearGameDataEvent>,
    mut store: ResMut<SaveStore>,
    config: Res<GameConfig>,
    recipe_registry: Res<RecipeRegistry>,
    mut player_state: ResMut<PlayerState>,
    mut inventory: ResMut<Inventory>,
    mut discovered: ResMut<DiscoveredRecipes>,
    mut tracker: ResMut<CraftingTracker>,
) {
    if clear_events.read().count() == 0 {
        return;
    }

    if let Err(e) = store.0.clear() {
        error!("Clearing saved data FAILED: {}", e);
    }

    let position = player_state.position;
    *player_state = PlayerState::default();
    player_state.position = position;
    *inventory = Inventory::with_slots(config.inventory_slots);
    *discovered = DiscoveredRecipes::default();
    discover_for_level(&mut discovered, &recipe_registry, player_state.level);
    tracker.cancel_craft();

    info!("Game data cleared.");
}
