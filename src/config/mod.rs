//! Runtime configuration.
//!
//! `GameConfig` is read once at startup from a RON file. Every field has a
//! default, so a partial file (or no file at all) is fine.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::shared::*;

pub const CONFIG_FILE: &str = "isocraft.ron";

/// Which blocking rules a world uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WorldVariant {
    /// Procedurally generated terrain: only water and mountains block.
    #[default]
    Generated,
    /// Hand-laid maps: every collidable descriptor blocks.
    Handcrafted,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub variant: WorldVariant,
    pub width: usize,
    pub height: usize,
    /// Fixed seed for reproducible worlds. `None` = fresh every run.
    pub seed: Option<u64>,
    /// Replaces the variant's blocking set when present.
    pub blocking: Option<Vec<TileKind>>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            variant: WorldVariant::Generated,
            width: DEFAULT_WORLD_WIDTH,
            height: DEFAULT_WORLD_HEIGHT,
            seed: None,
            blocking: None,
        }
    }
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub tile_size: f32,
    pub craft_tick_secs: f32,
    pub xp_per_crafted_item: u32,
    pub inventory_slots: usize,
    pub world: WorldConfig,
    /// Directory for save blobs. `None` = `saves/` next to the executable.
    pub save_dir: Option<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tile_size: DEFAULT_TILE_SIZE,
            craft_tick_secs: CRAFT_TICK_SECS,
            xp_per_crafted_item: XP_PER_CRAFTED_ITEM,
            inventory_slots: INVENTORY_SLOTS,
            world: WorldConfig::default(),
            save_dir: None,
        }
    }
}

impl GameConfig {
    pub fn from_ron_str(text: &str) -> Result<Self, String> {
        ron::from_str(text).map_err(|e| format!("Invalid config: {}", e))
    }

    /// Reads the config file, falling back to defaults when it is missing or broken.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!("No config at {}, using defaults", path.display());
            return Self::default();
        }
        let loaded = fs::read_to_string(path)
            .map_err(|e| format!("Read failed for {}: {}", path.display(), e))
            .and_then(|text| Self::from_ron_str(&text));
        match loaded {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                warn!("{}. Falling back to defaults.", e);
                Self::default()
            }
        }
    }
}
